use crate::adapters::{GoMethodOracle, LocalSourceTree};
use crate::config::Options;
use crate::core::template::TemplateRenderer;
use crate::domain::model::{InterfaceDescription, OutputFile};
use crate::domain::ports::{MethodOracle, Renderer, SourceTree};
use crate::utils::error::{GenError, Result};

/// 生成引擎：持有本次呼叫的設定與三個協作者
pub struct HandlerGenerator<R: Renderer, O: MethodOracle, S: SourceTree> {
    pub(crate) options: Options,
    pub(crate) renderer: R,
    pub(crate) oracle: O,
    pub(crate) tree: S,
}

impl<R: Renderer, O: MethodOracle, S: SourceTree> HandlerGenerator<R, O, S> {
    pub fn new(options: Options, renderer: R, oracle: O, tree: S) -> Self {
        Self {
            options,
            renderer,
            oracle,
            tree,
        }
    }

    /// Plans every service of every file.
    ///
    /// The first failure aborts the run and no files are returned, so a
    /// manifest never ships without its implementation files.
    pub fn generate(&self, description: &InterfaceDescription) -> Result<Vec<OutputFile>> {
        tracing::info!(
            "🚀 Generating Connect handlers ({} mode) for {} file(s)",
            self.options.mode,
            description.files.len()
        );

        let mut files = Vec::new();
        for file in &description.files {
            for service in &file.services {
                let generated = self.plan_service(file, service).map_err(|e| {
                    GenError::ServiceGenerationError {
                        service: service.name.clone(),
                        source: Box::new(e),
                    }
                })?;
                files.extend(generated);
            }
        }

        tracing::info!("✅ {} file(s) to write", files.len());
        Ok(files)
    }
}

impl HandlerGenerator<TemplateRenderer, GoMethodOracle, LocalSourceTree> {
    /// 使用內嵌模板、tree-sitter oracle 與本機輸出目錄
    pub fn with_defaults(options: Options) -> Self {
        let tree = LocalSourceTree::from_out_dir(&options.out);
        tracing::debug!("Output root: {}", tree.root().display());
        Self::new(options, TemplateRenderer::new(), GoMethodOracle::new(), tree)
    }
}

/// 解析參數後執行一次完整生成；設定錯誤會在規劃前回傳
pub fn generate(description: &InterfaceDescription, parameter: &str) -> Result<Vec<OutputFile>> {
    let options = Options::from_parameter(parameter)?;
    HandlerGenerator::with_defaults(options).generate(description)
}
