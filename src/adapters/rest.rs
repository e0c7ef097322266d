use crate::domain::ports::{ConfigProvider, DirectoryStore};
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Store adapter for the hosted directory backend. One row becomes one
/// `POST /rest/v1/{collection}` carrying a single JSON object; row
/// identity and ownership columns are filled in server-side.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    auth_token: Option<String>,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let store = Self::new(config.endpoint(), config.api_key().unwrap_or_default());
        match config.auth_token() {
            Some(token) => store.with_auth_token(token),
            None => store,
        }
    }
}

#[async_trait]
impl DirectoryStore for RestStore {
    async fn insert(&self, collection: &str, payload: serde_json::Value) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.base_url, collection);
        tracing::debug!("POST {}", url);

        let mut request = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .json(&payload);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::StoreError {
                message: format!("{} on {}: {}", status, collection, body.trim()),
            });
        }
        Ok(())
    }
}
