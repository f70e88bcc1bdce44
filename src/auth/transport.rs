use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use crate::domain::UserType;
use super::form::LoginRequest;
use super::routes::Locale;

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// The `user` object returned by the backend. Only `userType` is interpreted;
/// every other field is kept as-is for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "userType")]
    pub user_type: String,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

impl SessionUser {
    pub fn kind(&self) -> UserType {
        UserType::from_wire(&self.user_type)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginData {
    pub user: SessionUser,
    pub token: String,
}

/// Body of the login response, successful or not.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<LoginData>,
}

/// Sends a login request to the backend.
///
/// The HTTP status is not interpreted: a 401 with a JSON body is an ordinary
/// `LoginResponse` with `success: false`.
#[async_trait]
pub trait LoginTransport: Send + Sync {
    async fn post_login(&self, locale: &Locale, request: &LoginRequest) -> Result<LoginResponse, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Clone)]
pub struct HttpLoginTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLoginTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, LOGIN_ENDPOINT)
    }
}

#[async_trait]
impl LoginTransport for HttpLoginTransport {
    #[instrument(skip(self, request), fields(url = %self.login_url(), email = %request.email))]
    async fn post_login(&self, locale: &Locale, request: &LoginRequest) -> Result<LoginResponse, TransportError> {
        let response = self
            .client
            .post(self.login_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT_LANGUAGE, locale.as_str())
            .header("X-Locale", locale.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!(status = %response.status(), "Login response received");
        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
