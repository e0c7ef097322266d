use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use clap::Args;
use serde::{Deserialize, Serialize};

/// Connection and behavior settings shared by every subcommand.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct CliConfig {
    /// Base URL of the hosted directory backend
    #[arg(long, default_value = "http://localhost:54321")]
    pub endpoint: String,

    /// API key sent with every backend request (needed by the import
    /// and sample subcommands; templates are generated locally)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Bearer token of the signed-in user, if any
    #[arg(long)]
    pub auth_token: Option<String>,

    /// Language for user-facing messages
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Retries per failed row insert (0 disables retrying)
    #[arg(long, default_value = "0")]
    pub retries: usize,

    /// Fail the whole file when a row's column count differs from the header
    #[arg(long)]
    pub strict_columns: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Credentials check for the subcommands that build a store.
    pub fn require_api_key(&self) -> Result<&str> {
        let key = validate_required_field("api_key", &self.api_key)?;
        validate_non_empty_string("api_key", key)?;
        Ok(key)
    }
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn retries(&self) -> usize {
        self.retries
    }

    fn strict_columns(&self) -> bool {
        self.strict_columns
    }

    fn language(&self) -> &str {
        &self.language
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        if let Some(key) = &self.api_key {
            validate_non_empty_string("api_key", key)?;
        }
        validate_non_empty_string("language", &self.language)?;
        validate_range("retries", self.retries, 0, 5)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            endpoint: "https://api.seadex.example".to_string(),
            api_key: Some("key".to_string()),
            auth_token: None,
            language: "en".to_string(),
            retries: 0,
            strict_columns: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let mut c = config();
        c.endpoint = "not-a-url".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut c = config();
        c.api_key = Some("  ".to_string());
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_absent_api_key_passes_validation_but_fails_require() {
        let mut c = config();
        c.api_key = None;
        assert!(c.validate().is_ok());
        assert!(matches!(
            c.require_api_key(),
            Err(crate::utils::error::ImportError::MissingConfigError { .. })
        ));

        assert_eq!(config().require_api_key().unwrap(), "key");
    }

    #[test]
    fn test_api_key_is_not_demanded_at_parse_time() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            config: CliConfig,
        }

        // Local operations like template generation must parse without
        // backend credentials.
        let cli = TestCli::try_parse_from(["seadex-import"]).unwrap();
        assert!(cli.config.api_key.is_none());

        let cli =
            TestCli::try_parse_from(["seadex-import", "--api-key", "key"]).unwrap();
        assert_eq!(cli.config.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_excessive_retries_rejected() {
        let mut c = config();
        c.retries = 50;
        assert!(c.validate().is_err());
    }
}
