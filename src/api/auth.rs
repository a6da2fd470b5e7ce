//! Auth API
//!
//! Exchanges credentials for tokens. Persisting the result is the
//! session's job (see [`crate::session::SessionContext::begin`]).

use async_trait::async_trait;
use gloo_net::http::Request;

use super::ensure_success;
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{LoginRequest, LoginResponse};

/// Credential exchange, the seam the login flow is written against
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST /auth/login`
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    config: AppConfig,
}

impl AuthClient {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl AuthApi for AuthClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest {
            username,
            password,
            expires_in_mins: self.config.token_expires_in_mins,
        };
        let response = Request::post(&self.config.auth_api_url).json(&body)?.send().await?;
        if is_rejection(response.status()) {
            return Err(ApiError::InvalidCredentials);
        }
        let text = ensure_success(response)?.text().await?;
        decode_login(&text)
    }
}

/// Statuses meaning "these credentials are wrong" rather than "the server broke"
fn is_rejection(status: u16) -> bool {
    matches!(status, 400 | 401 | 403)
}

/// A 2xx body without a usable access token is still a failed login
fn decode_login(body: &str) -> ApiResult<LoginResponse> {
    match serde_json::from_str::<LoginResponse>(body) {
        Ok(response) if !response.access_token.is_empty() => Ok(response),
        _ => Err(ApiError::InvalidCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_statuses() {
        assert!(is_rejection(400));
        assert!(is_rejection(401));
        assert!(!is_rejection(200));
        assert!(!is_rejection(500));
    }

    #[test]
    fn test_decode_login_success() {
        let response = decode_login(r#"{"username":"emilys","accessToken":"a","refreshToken":"r"}"#).unwrap();
        assert_eq!(response.access_token, "a");
        assert_eq!(response.profile["username"], "emilys");
    }

    #[test]
    fn test_decode_login_without_token() {
        assert_eq!(decode_login(r#"{"message":"Invalid credentials"}"#), Err(ApiError::InvalidCredentials));
        assert_eq!(decode_login(r#"{"accessToken":""}"#), Err(ApiError::InvalidCredentials));
    }
}
