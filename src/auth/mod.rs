//! Credential provider: bearer-token acquisition for the fixture user.
//!
//! The token is acquired lazily on first authenticated use and memoized
//! in a single-flight cell, so concurrent first users await one in-flight
//! login instead of issuing duplicates. The shared [`User`] record itself
//! is never mutated.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tracing::info;

use crate::client::{ApiClient, ApiResponse};
use crate::config::endpoints;
use crate::core::{HarnessError, Result};
use crate::schema::{decode_user, User};

/// Build the `auth/login` request body. The TTL field is optional; tests
/// also pass deliberately broken values through raw payloads instead.
pub fn login_payload(username: &str, password: &str, expires_in_mins: Option<i64>) -> Value {
    let mut body = json!({
        (endpoints::USERNAME): username,
        (endpoints::PASSWORD): password,
    });
    if let Some(ttl) = expires_in_mins {
        body[endpoints::EXPIRES_IN_MINS] = json!(ttl);
    }
    body
}

/// Send credentials to the login endpoint and return the raw response.
/// Branching on the status code is the caller's responsibility: a 400
/// with an error-message body is an assertable outcome, not a failure.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<ApiResponse> {
    let body = login_payload(username, password, client.config().token_ttl_mins);
    client.post(endpoints::AUTH_LOGIN, Some(&body), None).await
}

/// Bearer-token headers for an arbitrary token value. Negative tests use
/// this directly with forged or empty tokens.
pub fn headers_with_token(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| HarnessError::auth("token is not a valid header value"))?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// The authenticated identity shared by every test: the cached real user
/// plus its at-most-once-acquired bearer token.
#[derive(Debug)]
pub struct Session {
    user: User,
    token: OnceCell<String>,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            token: OnceCell::new(),
        }
    }

    /// The cached real user
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The memoized bearer token, logging in with the cached credentials
    /// on first use.
    pub async fn bearer_token(&self, client: &ApiClient) -> Result<&str> {
        let token = self
            .token
            .get_or_try_init(|| self.acquire_token(client))
            .await?;
        Ok(token)
    }

    async fn acquire_token(&self, client: &ApiClient) -> Result<String> {
        let username = self
            .user
            .username
            .as_deref()
            .ok_or_else(|| HarnessError::auth("fixture user has no username"))?;
        let password = self
            .user
            .password
            .as_deref()
            .ok_or_else(|| HarnessError::auth("fixture user has no password"))?;

        let response = login(client, username, password).await?;
        if !response.status.is_success() {
            return Err(HarnessError::auth(format!(
                "login as {username} returned {}: {}",
                response.status,
                response.text()
            )));
        }

        let user = decode_user(&response.json()?)?;
        let token = user
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| HarnessError::auth("login response carried no token"))?;

        info!(username = %username, "acquired bearer token for fixture user");
        Ok(token)
    }

    /// `{Authorization: Bearer <token>, Content-Type: application/json}`
    /// for the fixture user, triggering the lazy login when needed.
    pub async fn authenticated_headers(&self, client: &ApiClient) -> Result<HeaderMap> {
        let token = self.bearer_token(client).await?;
        headers_with_token(token)
    }
}
