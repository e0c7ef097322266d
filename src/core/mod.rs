pub mod engine;
pub mod importer;
pub mod mapper;
pub mod parser;
pub mod sample;
pub mod template;

pub use crate::domain::model::{EntityKind, EntityPayload, ImportResult, Row};
pub use crate::domain::ports::{ConfigProvider, DirectoryStore};
pub use crate::utils::error::Result;
