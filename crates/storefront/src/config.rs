//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STYLEHUB_DATA_DIR` - Directory for the local JSON store (default: data)
//! - `STYLEHUB_SEED_DIR` - Directory with catalog seed documents (default: seeds)
//! - `STYLEHUB_BACKEND` - `local` (default) or `remote`
//!
//! ## Required when `STYLEHUB_BACKEND=remote`
//! - `STYLEHUB_API_BASE_URL` - Base URL of the remote record service
//! - `STYLEHUB_API_TOKEN` - Bearer token for the record service

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_API_TOKEN_LENGTH: usize = 16;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the local JSON store documents
    pub data_dir: PathBuf,
    /// Directory holding the catalog seed documents
    pub seed_dir: PathBuf,
    /// Which store backend to run against
    pub backend: StoreBackend,
}

/// Store backend selection.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// JSON documents under `data_dir`
    Local,
    /// Remote record service
    Remote(RemoteApiConfig),
}

/// Remote record service configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct RemoteApiConfig {
    /// Base URL of the record service
    pub base_url: Url,
    /// Bearer token (server-side only)
    pub api_token: SecretString,
}

impl std::fmt::Debug for RemoteApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, or if the remote
    /// backend is selected without its required variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("STYLEHUB_DATA_DIR", "data"));
        let seed_dir = PathBuf::from(get_env_or_default("STYLEHUB_SEED_DIR", "seeds"));
        let backend = match get_env_or_default("STYLEHUB_BACKEND", "local").as_str() {
            "local" => StoreBackend::Local,
            "remote" => StoreBackend::Remote(RemoteApiConfig::from_env()?),
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "STYLEHUB_BACKEND".to_string(),
                    format!("expected 'local' or 'remote', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            data_dir,
            seed_dir,
            backend,
        })
    }
}

impl RemoteApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("STYLEHUB_API_BASE_URL")?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STYLEHUB_API_BASE_URL".to_string(), e.to_string())
        })?;

        let api_token = get_required_env("STYLEHUB_API_TOKEN").map(SecretString::from)?;
        validate_api_token(&api_token, "STYLEHUB_API_TOKEN")?;

        Ok(Self {
            base_url,
            api_token,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that an API token is not a placeholder and has plausible length.
fn validate_api_token(token: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = token.expose_secret();

    if value.len() < MIN_API_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_API_TOKEN_LENGTH,
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_token_rejected() {
        let token = SecretString::from("your-api-token-here".to_string());
        let err = validate_api_token(&token, "STYLEHUB_API_TOKEN").expect_err("placeholder");
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_short_token_rejected() {
        let token = SecretString::from("abc123".to_string());
        assert!(validate_api_token(&token, "STYLEHUB_API_TOKEN").is_err());
    }

    #[test]
    fn test_plausible_token_accepted() {
        let token = SecretString::from("kA9f2mQx7Lp0Zw4VbN1c".to_string());
        assert!(validate_api_token(&token, "STYLEHUB_API_TOKEN").is_ok());
    }

    #[test]
    fn test_remote_config_debug_redacts_token() {
        let config = RemoteApiConfig {
            base_url: Url::parse("https://records.stylehub.dev").expect("url"),
            api_token: SecretString::from("kA9f2mQx7Lp0Zw4VbN1c".to_string()),
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("kA9f2mQx"));
    }
}
