use crate::config::GenerationMode;
use crate::core::engine::HandlerGenerator;
use crate::core::naming::{derive_context, method_file_path};
use crate::domain::model::{FileUnit, GenerationContext, OutputFile, ServiceUnit, TemplateKind};
use crate::domain::ports::{MethodOracle, Renderer, SourceTree};
use crate::utils::error::Result;

impl<R: Renderer, O: MethodOracle, S: SourceTree> HandlerGenerator<R, O, S> {
    /// 單一 service 需要輸出的檔案；manifest 一定在第一個
    pub fn plan_service(&self, file: &FileUnit, service: &ServiceUnit) -> Result<Vec<OutputFile>> {
        let context = derive_context(file, service, &self.options);
        tracing::info!(
            "📦 {}: {} method(s) -> {}",
            service.name,
            service.methods.len(),
            if context.dir.is_empty() { "." } else { &context.dir }
        );

        let mut files = vec![self.render_manifest(&context)?];

        match self.options.mode {
            GenerationMode::PerMethod => {
                files.extend(self.struct_file_if_missing(&context)?);
                files.extend(self.per_method_files(&context)?);
            }
            GenerationMode::PerService => {
                files.extend(self.merge_service(&context)?);
            }
        }

        Ok(files)
    }

    fn render_manifest(&self, context: &GenerationContext) -> Result<OutputFile> {
        let content = self.renderer.render(TemplateKind::ServiceManifest, context)?;
        Ok(OutputFile::new(context.manifest_path.clone(), content))
    }

    fn struct_file_if_missing(&self, context: &GenerationContext) -> Result<Option<OutputFile>> {
        let full_path = self.tree.resolve(&context.struct_path);
        if self.tree.exists(&full_path) {
            tracing::debug!("{} already exists, leaving it alone", context.struct_path);
            return Ok(None);
        }

        let content = self.renderer.render(TemplateKind::StructStub, context)?;
        tracing::info!("📝 Creating {}", context.struct_path);
        Ok(Some(OutputFile::new(context.struct_path.clone(), content)))
    }

    // 已存在的方法檔一律視為使用者的實作，不重新產生
    fn per_method_files(&self, context: &GenerationContext) -> Result<Vec<OutputFile>> {
        let mut files = Vec::new();

        for method in &context.service.methods {
            let method_path = method_file_path(&context.dir, &context.service.name, &method.name);
            let full_path = self.tree.resolve(&method_path);
            if self.tree.exists(&full_path) {
                tracing::debug!("{}: {} exists, skipping", method.name, method_path);
                continue;
            }

            let method_context = context.for_method(method.clone(), Some(method_path.clone()));
            let content = self.renderer.render(TemplateKind::MethodStub, &method_context)?;
            tracing::info!("📝 Creating {}", method_path);
            files.push(OutputFile::new(method_path, content));
        }

        Ok(files)
    }
}
