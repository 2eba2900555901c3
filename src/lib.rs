pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{GoMethodOracle, LocalSourceTree};
pub use config::{GenerationMode, Options};
pub use self::core::{generate, HandlerGenerator, TemplateRenderer};
pub use domain::model::{InterfaceDescription, OutputFile};
pub use utils::error::{GenError, Result};
