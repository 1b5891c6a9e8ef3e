//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread::{self, ThreadId};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{MigrateError, MigrateResult};
use crate::http_client::check_status;
use crate::traits::{ApiRequest, ApiTransport, HttpMethod, SourceStore};
use crate::types::{Domain, Response, StoreNode};

pub fn node(key: &str, value: &str) -> StoreNode {
    StoreNode {
        key: key.to_string(),
        value: value.to_string(),
        expiration: None,
    }
}

pub fn a_response(fqdn: &str, hosts: &[&str]) -> Response {
    Response {
        status: 200,
        data: Domain {
            fqdn: fqdn.to_string(),
            hosts: hosts.iter().map(ToString::to_string).collect(),
            ..Domain::default()
        },
        ..Response::default()
    }
}

pub fn txt_response(fqdn: &str, text: &str) -> Response {
    Response {
        status: 200,
        data: Domain {
            fqdn: fqdn.to_string(),
            text: text.to_string(),
            ..Domain::default()
        },
        ..Response::default()
    }
}

// ===== MockSourceStore =====

pub struct MockSourceStore {
    entries: RwLock<HashMap<String, Vec<StoreNode>>>,
    /// 如果 Some，list 时返回此错误
    list_error: RwLock<Option<String>>,
    listed: RwLock<Vec<String>>,
}

impl MockSourceStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            list_error: RwLock::new(None),
            listed: RwLock::new(Vec::new()),
        }
    }

    pub async fn insert(&self, path: &str, nodes: Vec<StoreNode>) {
        self.entries.write().await.insert(path.to_string(), nodes);
    }

    pub async fn set_list_error(&self, err: Option<String>) {
        *self.list_error.write().await = err;
    }

    pub async fn listed_paths(&self) -> Vec<String> {
        self.listed.read().await.clone()
    }
}

#[async_trait]
impl SourceStore for MockSourceStore {
    async fn list(&self, path: &str) -> MigrateResult<Vec<StoreNode>> {
        self.listed.write().await.push(path.to_string());
        if let Some(ref msg) = *self.list_error.read().await {
            return Err(MigrateError::Store(msg.clone()));
        }
        Ok(self
            .entries
            .read()
            .await
            .get(path)
            .cloned()
            .unwrap_or_default())
    }
}

// ===== MockTransport =====

struct ScriptedFailure {
    method: HttpMethod,
    url: String,
    /// 0-based index among calls to the same method and URL
    nth: usize,
    status: u16,
    message: String,
}

/// Records every request; answers with scripted envelopes, or an empty 200 envelope
pub struct MockTransport {
    responses: RwLock<HashMap<(HttpMethod, String), Response>>,
    failures: RwLock<Vec<ScriptedFailure>>,
    requests: RwLock<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            failures: RwLock::new(Vec::new()),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub async fn respond(&self, method: HttpMethod, url: &str, response: Response) {
        self.responses
            .write()
            .await
            .insert((method, url.to_string()), response);
    }

    /// Make the `nth` call to `method url` fail with an HTTP status
    pub async fn fail_nth(&self, method: HttpMethod, url: &str, nth: usize, status: u16, message: &str) {
        self.failures.write().await.push(ScriptedFailure {
            method,
            url: url.to_string(),
            nth,
            status,
            message: message.to_string(),
        });
    }

    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.read().await.clone()
    }

    pub async fn requests_to(&self, url: &str) -> Vec<ApiRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.url == url)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> MigrateResult<Response> {
        let previous_calls = {
            let mut requests = self.requests.write().await;
            let count = requests
                .iter()
                .filter(|r| r.method == request.method && r.url == request.url)
                .count();
            requests.push(request.clone());
            count
        };

        if let Some(failure) = self.failures.read().await.iter().find(|f| {
            f.method == request.method && f.url == request.url && f.nth == previous_calls
        }) {
            let envelope = Response {
                status: i64::from(failure.status),
                message: failure.message.clone(),
                ..Response::default()
            };
            return check_status(failure.status, envelope);
        }

        Ok(self
            .responses
            .read()
            .await
            .get(&(request.method, request.url))
            .cloned()
            .unwrap_or_else(|| Response {
                status: 200,
                ..Response::default()
            }))
    }
}

// ===== 日志捕获 =====

static CAPTURED: Mutex<Vec<(ThreadId, log::Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        if let Ok(mut lines) = CAPTURED.lock() {
            lines.push((thread::current().id(), record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Route `log` output into memory; safe to call from every test
pub fn capture_logs() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
}

/// Lines logged on the current test thread at `level` or more severe
pub fn logged_at_least(level: log::Level) -> Vec<String> {
    let current = thread::current().id();
    CAPTURED
        .lock()
        .map(|lines| {
            lines
                .iter()
                .filter(|(id, l, _)| *id == current && *l <= level)
                .map(|(_, _, msg)| msg.clone())
                .collect()
        })
        .unwrap_or_default()
}
