use crate::domain::model::{GenerationContext, TemplateKind};
use crate::domain::ports::Renderer;
use crate::utils::error::{GenError, Result};
use handlebars::Handlebars;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 內嵌的預設模板
pub fn builtin_source(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::MethodStub => include_str!("../templates/method_stub.tmpl"),
        TemplateKind::MethodOnly => include_str!("../templates/method_only.tmpl"),
        TemplateKind::ServiceManifest => include_str!("../templates/service_manifest.tmpl"),
        TemplateKind::StructStub => include_str!("../templates/struct_stub.tmpl"),
    }
}

/// Handlebars renderer over the embedded templates.
///
/// All four kinds are registered under [`TemplateKind::name`] so they can
/// include each other as partials (`{{> method_only}}`). The registry is
/// compiled on first use and reused for the rest of the invocation.
pub struct TemplateRenderer {
    sources: HashMap<TemplateKind, String>,
    registry: RefCell<Option<Rc<Handlebars<'static>>>>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            registry: RefCell::new(None),
        }
    }

    /// Replaces the embedded source of one template kind.
    pub fn with_template(mut self, kind: TemplateKind, source: impl Into<String>) -> Self {
        self.sources.insert(kind, source.into());
        self.registry.replace(None);
        self
    }

    pub fn is_compiled(&self) -> bool {
        self.registry.borrow().is_some()
    }

    fn source(&self, kind: TemplateKind) -> &str {
        self.sources
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| builtin_source(kind))
    }

    fn registry(&self) -> Result<Rc<Handlebars<'static>>> {
        if let Some(registry) = self.registry.borrow().as_ref() {
            return Ok(Rc::clone(registry));
        }

        let mut handlebars = Handlebars::new();
        // 產出的是 Go 原始碼，不做 HTML 跳脫；未定義的變數視為錯誤
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for kind in TemplateKind::ALL {
            handlebars
                .register_template_string(kind.name(), self.source(kind))
                .map_err(|e| GenError::TemplateParseError {
                    template: kind.name().to_string(),
                    message: e.to_string(),
                })?;
        }
        tracing::debug!("Compiled {} templates", TemplateKind::ALL.len());

        let registry = Rc::new(handlebars);
        self.registry.replace(Some(Rc::clone(&registry)));
        Ok(registry)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, kind: TemplateKind, context: &GenerationContext) -> Result<String> {
        self.registry()?
            .render(kind.name(), context)
            .map_err(|e| GenError::RenderError {
                template: kind.name().to_string(),
                message: e.to_string(),
            })
    }
}
