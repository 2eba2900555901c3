pub mod engine;
pub mod merge;
pub mod naming;
pub mod planner;
pub mod template;
pub mod types;

pub use crate::domain::model::{GenerationContext, OutputFile, TemplateKind};
pub use crate::domain::ports::{MethodOracle, Renderer, SourceTree};
pub use crate::utils::error::Result;
pub use engine::{generate, HandlerGenerator};
pub use merge::append_fragments;
pub use template::TemplateRenderer;
