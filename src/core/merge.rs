use crate::core::engine::HandlerGenerator;
use crate::domain::model::{GenerationContext, OutputFile, TemplateKind};
use crate::domain::ports::{MethodOracle, Renderer, SourceTree};
use crate::utils::error::Result;

impl<R: Renderer, O: MethodOracle, S: SourceTree> HandlerGenerator<R, O, S> {
    /// Per-service implementation file: the existing content (or a fresh
    /// struct stub) followed by one fragment per method it does not declare
    /// yet. Returns `None` when nothing is missing.
    pub fn merge_service(&self, context: &GenerationContext) -> Result<Option<OutputFile>> {
        let full_path = self.tree.resolve(&context.struct_path);

        let base = if self.tree.exists(&full_path) {
            self.tree.read_to_string(&full_path)?
        } else {
            tracing::debug!("{} not found, starting from struct stub", context.struct_path);
            self.renderer.render(TemplateKind::StructStub, context)?
        };

        let mut fragments = Vec::new();
        for method in &context.service.methods {
            if self
                .oracle
                .method_exists(&full_path, &context.struct_name, &method.name)
            {
                tracing::debug!("{}.{} already implemented", context.struct_name, method.name);
                continue;
            }
            let method_context = context.for_method(method.clone(), None);
            fragments.push(self.renderer.render(TemplateKind::MethodOnly, &method_context)?);
            tracing::info!("➕ {}.{}", context.struct_name, method.name);
        }

        if fragments.is_empty() {
            tracing::info!("⏭️ {} is up to date", context.struct_path);
            return Ok(None);
        }

        Ok(Some(OutputFile::new(
            context.struct_path.clone(),
            append_fragments(&base, &fragments),
        )))
    }
}

/// 把方法片段接在既有內容之後
///
/// `base` stays a byte-for-byte prefix of the result. A blank line separates
/// the base from the first fragment and each fragment from the next.
pub fn append_fragments(base: &str, fragments: &[String]) -> String {
    let mut out = String::with_capacity(base.len() + fragments.iter().map(String::len).sum::<usize>() + 8);
    out.push_str(base);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 || !out.is_empty() {
            out.push('\n');
        }
        out.push_str(fragment.trim_end_matches('\n'));
        out.push('\n');
    }
    out
}
