pub mod model;
pub mod ports;

pub use model::{
    BusinessCreate, BusinessStatus, CategoryCreate, EntityKind, EntityPayload, ImportResult,
    ReviewCreate, Row,
};
pub use ports::{ConfigProvider, DirectoryStore};
