//! HTTP transport for the RDNS APIs
//!
//! Shared by the legacy-API queries and the destination-API posts: builds a
//! JSON request, executes it, decodes the response envelope and maps failure
//! statuses to errors.
//!
//! # Status handling
//! Any non-2xx status is a failure. The envelope's `msg` becomes the error
//! message when present, otherwise the numeric status is reported.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{MigrateError, MigrateResult};
use crate::traits::{ApiRequest, ApiTransport, HttpMethod};
use crate::types::Response;
use crate::utils::log_sanitizer::truncate_for_log;

/// Default per-request timeout against the RDNS APIs
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed [`ApiTransport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a per-request timeout
    pub fn new(timeout: Duration) -> MigrateResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MigrateError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Build the reqwest request: JSON content type, optional bearer, optional JSON body
    pub fn build_request(&self, request: &ApiRequest) -> RequestBuilder {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        let mut builder = builder.header(CONTENT_TYPE, "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }
        builder
    }

    /// Performs an HTTP request and returns status code and response text
    async fn execute_request(
        request_builder: RequestBuilder,
        method: HttpMethod,
        url: &str,
    ) -> MigrateResult<(u16, String)> {
        log::debug!("{method} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                MigrateError::Timeout(format!("{method} {url}: {e}"))
            } else {
                MigrateError::Network(format!("{method} {url}: {e}"))
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| MigrateError::Network(format!("read response body error: {e}")))?;

        log::debug!("Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> MigrateResult<Response> {
        let builder = self.build_request(&request);
        let (status, text) = Self::execute_request(builder, request.method, &request.url).await?;
        let envelope: Response = parse_json(&text)?;
        log::debug!("got response entry: {envelope:?}");
        check_status(status, envelope)
    }
}

/// Parse a JSON response body
pub fn parse_json<T>(response_text: &str) -> MigrateResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(response_text).map_err(|e| {
        log::debug!("JSON parse failed: {e}");
        MigrateError::Parse(format!(
            "decode response error: {e}: {}",
            truncate_for_log(response_text)
        ))
    })
}

/// Map a non-2xx status to [`MigrateError::Api`], preferring the envelope message
pub fn check_status(status: u16, envelope: Response) -> MigrateResult<Response> {
    if (200..300).contains(&status) {
        return Ok(envelope);
    }
    let message = if envelope.message.is_empty() {
        format!("request failed with HTTP status {status}")
    } else {
        envelope.message
    };
    Err(MigrateError::Api { status, message })
}
