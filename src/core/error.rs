use std::fmt;

/// Harness-wide Result type
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Main harness error type
#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    /// Transport-level failures (connection refused, TLS, malformed URL)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not valid JSON at all
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body is JSON but does not match the expected schema
    #[error("decode error: response does not match {expected}: {source}")]
    Decode {
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Fixture bootstrap failures; always fatal for the whole run
    #[error("bootstrap error: {0}")]
    Bootstrap(String),

    /// Authentication failures outside the assertable negative paths
    #[error("auth error: {0}")]
    Auth(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

// Helper functions for common error scenarios
impl HarnessError {
    pub fn bootstrap(msg: impl Into<String>) -> Self {
        HarnessError::Bootstrap(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        HarnessError::Auth(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        HarnessError::Configuration(msg.into())
    }

    pub fn decode(expected: &'static str, source: serde_json::Error) -> Self {
        HarnessError::Decode { expected, source }
    }

    /// True when the error came out of the response decoder rather than
    /// the transport, i.e. the service answered with an unexpected shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, HarnessError::Decode { .. } | HarnessError::Json(_))
    }
}

/// Wraps any harness error into a fatal bootstrap error, keeping the
/// discovery step that failed in the message.
pub fn fatal_during(step: impl fmt::Display) -> impl FnOnce(HarnessError) -> HarnessError {
    move |err| HarnessError::Bootstrap(format!("{step} failed: {err}"))
}
