use std::env;

use crate::core::{HarnessError, Result};

pub mod endpoints;

const DEFAULT_BASE_URL: &str = "https://dummyjson.com/";
const DEFAULT_RESPONSE_BUDGET_MS: u64 = 10_000;

/// Harness configuration
///
/// Every knob has a default pointing at the public dummyjson instance, so
/// a plain `HarnessConfig::from_env()` works with no environment at all.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the service under test, with a trailing slash
    pub base_url: String,
    /// Maximum acceptable server response time, asserted post-hoc.
    /// Never used as a request timeout.
    pub response_budget_ms: u64,
    /// Optional token TTL sent as `expiresInMins` on login
    pub token_ttl_mins: Option<i64>,
}

impl HarnessConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut base_url =
            env::var("STORECHECK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let config = HarnessConfig {
            base_url,
            response_budget_ms: match env::var("STORECHECK_RESPONSE_BUDGET_MS") {
                Ok(raw) => raw.parse().map_err(|_| {
                    HarnessError::configuration("Invalid STORECHECK_RESPONSE_BUDGET_MS")
                })?,
                Err(_) => DEFAULT_RESPONSE_BUDGET_MS,
            },
            token_ttl_mins: match env::var("STORECHECK_TOKEN_TTL_MINS") {
                Ok(raw) => Some(raw.parse().map_err(|_| {
                    HarnessError::configuration("Invalid STORECHECK_TOKEN_TTL_MINS")
                })?),
                Err(_) => None,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(HarnessError::configuration(
                "Base URL must be an absolute http(s) URL",
            ));
        }

        if self.response_budget_ms == 0 {
            return Err(HarnessError::configuration(
                "Response budget must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Resolve a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            response_budget_ms: DEFAULT_RESPONSE_BUDGET_MS,
            token_ttl_mins: None,
        }
    }
}
