//! Hosted auth client (GoTrue-compatible REST API).

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    auth::{AuthSession, Credentials, HostedUser},
    secret::Secret,
};

/// Configuration for connecting to the hosted auth service.
#[derive(Debug, Clone)]
pub struct HostedAuthConfig {
    /// Auth API base, e.g. `"https://project.example.co/auth/v1"`.
    pub url: String,

    /// Public API key sent as the `apikey` header.
    pub api_key: Secret,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the hosted auth service.
#[derive(Debug, Clone)]
pub struct HostedAuthClient {
    config: HostedAuthConfig,
    http: Client,
}

impl HostedAuthClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: HostedAuthConfig) -> Result<Self, HostedAuthError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.url.trim_end_matches('/'))
    }

    fn with_api_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", self.config.api_key.expose())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    user: HostedUser,
}

impl From<TokenResponse> for AuthSession {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: Secret::from(response.access_token),
            refresh_token: Secret::from(response.refresh_token),
            expires_in: response.expires_in,
            user: response.user,
        }
    }
}

async fn unexpected(response: Response, operation: &str) -> HostedAuthError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    HostedAuthError::UnexpectedResponse(format!(
        "{operation} request failed with status {status}: {text}"
    ))
}

#[async_trait]
impl IdentityProvider for HostedAuthClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, HostedAuthError> {
        let body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password.expose(),
        });

        let response = self
            .with_api_key(self.http.post(self.endpoint("token")))
            .query(&[("grant_type", "password")])
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let parsed: TokenResponse = response.json().await?;

                debug!(user = %parsed.user.id, "password grant accepted");

                Ok(parsed.into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                Err(HostedAuthError::InvalidCredentials)
            }
            _ => Err(unexpected(response, "token").await),
        }
    }

    async fn user(&self, access_token: &str) -> Result<HostedUser, HostedAuthError> {
        let response = self
            .with_api_key(self.http.get(self.endpoint("user")))
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(HostedAuthError::Unauthorized),
            _ => Err(unexpected(response, "user").await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), HostedAuthError> {
        let response = self
            .with_api_key(self.http.post(self.endpoint("logout")))
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(HostedAuthError::Unauthorized),
            _ => Err(unexpected(response, "logout").await),
        }
    }
}

/// Where admin identities come from.
#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an email and password for tokens.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, HostedAuthError>;

    /// Resolve the user an access token belongs to.
    async fn user(&self, access_token: &str) -> Result<HostedUser, HostedAuthError>;

    /// Revoke the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), HostedAuthError>;
}

/// Errors that can occur when communicating with the hosted auth service.
#[derive(Debug, Error)]
pub enum HostedAuthError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("access token rejected")]
    Unauthorized,

    /// The service returned a non-2xx response or unexpected body.
    #[error("unexpected response from hosted auth: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn config(url: &str) -> HostedAuthConfig {
        HostedAuthConfig {
            url: url.to_string(),
            api_key: Secret::new("anon-key"),
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn endpoints_tolerate_trailing_slash() -> Result<(), HostedAuthError> {
        assert_eq!(
            HostedAuthClient::new(config("https://auth.example.com/auth/v1/"))?.endpoint("token"),
            "https://auth.example.com/auth/v1/token"
        );
        assert_eq!(
            HostedAuthClient::new(config("https://auth.example.com/auth/v1"))?.endpoint("user"),
            "https://auth.example.com/auth/v1/user"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unresponsive_service_times_out() -> TestResult {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        // Accept and hold the connection without ever answering.
        let _server = tokio::spawn(async move {
            let accepted = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(accepted);
        });

        let client = HostedAuthClient::new(HostedAuthConfig {
            timeout: Duration::from_millis(200),
            ..config(&format!("http://{addr}/auth/v1"))
        })?;

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.http.get(client.endpoint("user")).send(),
        )
        .await?;

        assert!(
            matches!(&result, Err(error) if error.is_timeout()),
            "expected a timeout, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn token_response_becomes_session() -> Result<(), serde_json::Error> {
        let response: TokenResponse = serde_json::from_value(serde_json::json!({
            "access_token": "access",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": {
                "id": "0190a4b2-7c1e-7c3d-8a4b-1c2d3e4f5a6b",
                "email": "admin@example.com",
                "role": "authenticated"
            }
        }))?;

        let session = AuthSession::from(response);

        assert_eq!(session.access_token.expose(), "access");
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.email, "admin@example.com");

        Ok(())
    }

    #[test]
    fn config_debug_hides_api_key() {
        let config = config("https://auth.example.com");

        assert!(!format!("{config:?}").contains("anon-key"));
    }
}
