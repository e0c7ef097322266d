pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod i18n;
pub mod utils;

pub use crate::adapters::RestStore;
pub use crate::config::CliConfig;
pub use crate::core::engine::ImportEngine;
pub use crate::core::importer::BatchImporter;
pub use crate::core::parser::ParseOptions;
pub use crate::domain::model::{EntityKind, EntityPayload, ImportResult, Row};
pub use crate::domain::ports::{ConfigProvider, DirectoryStore};
pub use crate::i18n::Catalog;
pub use crate::utils::error::{ImportError, Result};
