use crate::utils::error::Result;
use async_trait::async_trait;

/// Boundary to the hosted directory backend. One call per row; any
/// `Err` counts as a row failure, never a batch failure.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn insert(&self, collection: &str, payload: serde_json::Value) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    /// `None` until the user supplies credentials; operations that talk
    /// to the backend must check before building a store.
    fn api_key(&self) -> Option<&str>;
    fn auth_token(&self) -> Option<&str>;
    fn retries(&self) -> usize;
    fn strict_columns(&self) -> bool;
    fn language(&self) -> &str;
}
