//! Firebase Identity Toolkit adapter.
//!
//! Email/password accounts only:
//!
//! ```text
//! POST {base}/v1/accounts:signInWithPassword?key={key}
//! POST {base}/v1/accounts:signUp?key={key}
//! { "email": "...", "password": "...", "returnSecureToken": true }
//! ```
//!
//! Success carries `localId` and `email`; failure carries
//! `{ "error": { "message": "EMAIL_NOT_FOUND" } }`.

use super::IdentityProvider;
use crate::domain::{FoodiePalError, Result, User};
use crate::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::Instrument;

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Identity Toolkit REST client.
pub struct FirebaseIdentity {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseIdentity {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// # Errors
    ///
    /// Returns [`FoodiePalError::Config`] if no identity API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .identity_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FoodiePalError::Config("identity_api_key is not set".to_string()))?;
        let base = config
            .identity_base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL);
        Self::new(base, api_key)
    }

    async fn account_call(&self, method: &str, email: &str, password: &str) -> Result<User> {
        let span = tracing::debug_span!("identity_request", method, email);
        self.send_account_call(method, email, password)
            .instrument(span)
            .await
    }

    async fn send_account_call(&self, method: &str, email: &str, password: &str) -> Result<User> {
        let url = format!("{}/v1/accounts:{method}", self.base_url);

        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Credentials {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let code = serde_json::from_slice::<ErrorEnvelope>(&body)
                .map_or_else(|_| format!("HTTP {}", status.as_u16()), |e| e.error.message);
            tracing::warn!(status = status.as_u16(), code = %code, "identity request rejected");
            return Err(FoodiePalError::Auth(code));
        }

        let account: AccountResponse = serde_json::from_slice(&body)?;
        tracing::info!(user_id = %account.local_id, "identity request succeeded");
        Ok(User::new(account.local_id, account.email))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        self.account_call("signInWithPassword", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
        self.account_call("signUp", email, password).await
    }

    async fn sign_out(&self) -> Result<()> {
        // ID tokens are not kept, so there is nothing to revoke remotely.
        tracing::debug!("identity sign-out is local only");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_use_wire_names() {
        let body = serde_json::to_value(Credentials {
            email: "me@example.com",
            password: "hunter22",
            return_secure_token: true,
        })
        .unwrap();
        assert_eq!(body["returnSecureToken"], true);
        assert_eq!(body["email"], "me@example.com");
    }

    #[test]
    fn error_envelope_decodes_message() {
        let e: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","errors":[]}}"#).unwrap();
        assert_eq!(e.error.message, "EMAIL_NOT_FOUND");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        assert!(matches!(
            FirebaseIdentity::from_config(&Config::default()),
            Err(FoodiePalError::Config(_))
        ));
    }
}
