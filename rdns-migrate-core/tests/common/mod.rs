//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rdns_migrate_core::{
    ApiRequest, ApiTransport, Domain, HttpMethod, MigrateError, MigrateResult, Response,
    SourceStore, StoreNode,
};

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// In-memory legacy store keyed by directory
#[derive(Default)]
pub struct FakeStore {
    dirs: HashMap<String, Vec<StoreNode>>,
}

impl FakeStore {
    pub fn with_dir(mut self, path: &str, keys: &[(&str, &str)]) -> Self {
        self.dirs.insert(
            path.to_string(),
            keys.iter()
                .map(|(key, value)| StoreNode {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                    expiration: None,
                })
                .collect(),
        );
        self
    }
}

#[async_trait]
impl SourceStore for FakeStore {
    async fn list(&self, path: &str) -> MigrateResult<Vec<StoreNode>> {
        Ok(self.dirs.get(path).cloned().unwrap_or_default())
    }
}

/// Store whose every read fails
pub struct BrokenStore;

#[async_trait]
impl SourceStore for BrokenStore {
    async fn list(&self, _path: &str) -> MigrateResult<Vec<StoreNode>> {
        Err(MigrateError::Store("connection refused".to_string()))
    }
}

/// Records requests and answers GETs from a table of domains
#[derive(Default)]
pub struct FakeApi {
    domains: HashMap<String, Domain>,
    rejected_urls: Vec<String>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeApi {
    pub fn with_domain(mut self, url: &str, domain: Domain) -> Self {
        self.domains.insert(url.to_string(), domain);
        self
    }

    /// Every call to `url` answers HTTP 500 without a message
    pub fn rejecting(mut self, url: &str) -> Self {
        self.rejected_urls.push(url.to_string());
        self
    }

    pub fn posts_to(&self, url: &str) -> Vec<serde_json::Value> {
        self.requests
            .lock()
            .map(|r| {
                r.iter()
                    .filter(|req| req.method == HttpMethod::Post && req.url == url)
                    .filter_map(|req| req.body.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl ApiTransport for FakeApi {
    async fn send(&self, request: ApiRequest) -> MigrateResult<Response> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if self.rejected_urls.contains(&request.url) {
            return Err(MigrateError::Api {
                status: 500,
                message: "request failed with HTTP status 500".to_string(),
            });
        }
        Ok(Response {
            status: 200,
            data: self.domains.get(&request.url).cloned().unwrap_or_default(),
            ..Response::default()
        })
    }
}

pub fn hosts(fqdn: &str, hosts: &[&str]) -> Domain {
    Domain {
        fqdn: fqdn.to_string(),
        hosts: hosts.iter().map(ToString::to_string).collect(),
        ..Domain::default()
    }
}

pub fn text(fqdn: &str, text: &str) -> Domain {
    Domain {
        fqdn: fqdn.to_string(),
        text: text.to_string(),
        ..Domain::default()
    }
}
