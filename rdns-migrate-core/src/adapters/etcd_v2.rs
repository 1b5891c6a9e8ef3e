//! etcd v2 keys API source store
//!
//! Lists directories with `GET {endpoint}/v2/keys{path}?recursive=true`.
//! Endpoints are tried in order until one answers.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{MigrateError, MigrateResult};
use crate::traits::SourceStore;
use crate::types::StoreNode;
use crate::utils::datetime;
use crate::utils::log_sanitizer::truncate_for_log;

/// How long an endpoint may take to answer with response headers
///
/// Reading the body afterwards is not bounded, so large directories are not cut off.
pub const STORE_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// etcd error code for a missing key
const ETCD_KEY_NOT_FOUND: i64 = 100;

#[derive(Debug, Deserialize)]
struct EtcdResponse {
    node: Option<EtcdNode>,
}

#[derive(Debug, Deserialize)]
struct EtcdNode {
    key: Option<String>,
    #[serde(default)]
    value: String,
    #[serde(default, with = "datetime")]
    expiration: Option<DateTime<Utc>>,
    #[serde(default)]
    nodes: Vec<EtcdNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EtcdError {
    error_code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    cause: String,
}

/// etcd v2 backed [`SourceStore`]
#[derive(Debug, Clone)]
pub struct EtcdV2Store {
    client: Client,
    endpoints: Vec<String>,
}

impl EtcdV2Store {
    /// Create a store client for a list of endpoints, e.g. `http://127.0.0.1:2379`
    pub fn new(endpoints: Vec<String>) -> MigrateResult<Self> {
        let endpoints: Vec<String> = endpoints
            .into_iter()
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if endpoints.is_empty() {
            return Err(MigrateError::InvalidConfig(
                "at least one etcd endpoint is required".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| MigrateError::Store(format!("failed to build etcd client: {e}")))?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    fn keys_url(endpoint: &str, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{endpoint}/v2/keys/{path}")
    }
}

#[async_trait]
impl SourceStore for EtcdV2Store {
    async fn list(&self, path: &str) -> MigrateResult<Vec<StoreNode>> {
        let mut last_error = None;

        for endpoint in &self.endpoints {
            let url = Self::keys_url(endpoint, path);
            log::debug!("GET {url}");

            let request = self.client.get(&url).query(&[("recursive", "true")]).send();
            let response = match tokio::time::timeout(STORE_REQUEST_TIMEOUT, request).await {
                Ok(Ok(r)) => r,
                Ok(Err(e)) => {
                    log::warn!("etcd endpoint {endpoint} unavailable: {e}");
                    last_error = Some(MigrateError::Store(format!("{endpoint}: {e}")));
                    continue;
                }
                Err(_) => {
                    log::warn!(
                        "etcd endpoint {endpoint} did not answer within {}ms",
                        STORE_REQUEST_TIMEOUT.as_millis()
                    );
                    last_error = Some(MigrateError::Store(format!(
                        "{endpoint}: no response within {}ms",
                        STORE_REQUEST_TIMEOUT.as_millis()
                    )));
                    continue;
                }
            };

            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| MigrateError::Store(format!("read etcd response error: {e}")))?;
            log::debug!("etcd Response Status: {status}, Body: {}", truncate_for_log(&text));

            return nodes_from_body(status, &text);
        }

        Err(last_error
            .unwrap_or_else(|| MigrateError::Store("no etcd endpoint answered".to_string())))
    }
}

/// Decode a keys API answer into the child entries of the listed directory
fn nodes_from_body(status: u16, text: &str) -> MigrateResult<Vec<StoreNode>> {
    if !(200..300).contains(&status) {
        let err: EtcdError = serde_json::from_str(text).map_err(|e| {
            MigrateError::Store(format!(
                "unexpected etcd response (HTTP {status}): {e}: {}",
                truncate_for_log(text)
            ))
        })?;
        if err.error_code == ETCD_KEY_NOT_FOUND {
            log::debug!("etcd key not found: {}", err.cause);
            return Ok(Vec::new());
        }
        return Err(MigrateError::Store(format!(
            "etcd error {}: {} ({})",
            err.error_code, err.message, err.cause
        )));
    }

    let resp: EtcdResponse = serde_json::from_str(text).map_err(|e| {
        MigrateError::Store(format!(
            "decode etcd response error: {e}: {}",
            truncate_for_log(text)
        ))
    })?;

    Ok(resp
        .node
        .map(|dir| {
            dir.nodes
                .into_iter()
                .filter_map(|n| {
                    n.key.map(|key| StoreNode {
                        key,
                        value: n.value,
                        expiration: n.expiration,
                    })
                })
                .collect()
        })
        .unwrap_or_default())
}
