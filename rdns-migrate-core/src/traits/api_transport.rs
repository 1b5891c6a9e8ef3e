//! RDNS API transport abstract Trait

use std::fmt;

use async_trait::async_trait;

use crate::error::MigrateResult;
use crate::types::Response;

/// HTTP method used against the RDNS APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// A request against the legacy or destination API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Sent as `Authorization: Bearer <token>`
    pub bearer: Option<String>,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            bearer: None,
            body: Some(body),
        }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Sends requests and decodes the RDNS response envelope
///
/// Implementations:
/// - `HttpTransport`: reqwest client
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Execute a request
    ///
    /// Returns the decoded envelope for 2xx responses. Non-2xx responses,
    /// transport failures and undecodable bodies are errors.
    async fn send(&self, request: ApiRequest) -> MigrateResult<Response>;
}
