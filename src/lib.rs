pub mod adapters;
pub mod app;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::LocalStorage;
pub use crate::app::pipelines::FilePipeline;
pub use crate::core::{
    etl::FormatterEngine,
    pipeline::{apply_preset, apply_schema},
    tokenizer::tokenize,
    workspace::Workspace,
};
pub use crate::domain::model::{Dataset, FieldValue, Record, Table};
pub use crate::domain::preset::Preset;
pub use crate::utils::error::{FormatterError, Result};
