//! Migration configuration
//!
//! Values are supplied already parsed by the front end (CLI flags or
//! environment); this module only validates and normalizes them.

use std::time::Duration;

use crate::error::{MigrateError, MigrateResult};
use crate::http_client::DEFAULT_API_TIMEOUT;

pub const DEFAULT_SRC_API_ENDPOINT: &str = "http://127.0.0.1:9333";
pub const DEFAULT_SRC_ENDPOINTS: &str = "http://127.0.0.1:2379";
pub const DEFAULT_SRC_PREFIX: &str = "/rdns";
pub const DEFAULT_DOMAIN: &str = "lb.rancher.cloud";

/// Everything a migration run needs to know about both sides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Legacy etcd endpoints
    pub src_endpoints: Vec<String>,
    /// Legacy RDNS API base URL
    pub src_api_endpoint: String,
    /// Legacy etcd key prefix
    pub src_prefix: String,
    /// Legacy root domain
    pub src_domain: String,
    /// Destination RDNS API base URL
    pub dst_api_endpoint: String,
    /// Destination root domain
    pub dst_domain: String,
    /// Per-request timeout against both APIs
    pub api_timeout: Duration,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            src_endpoints: vec![DEFAULT_SRC_ENDPOINTS.to_string()],
            src_api_endpoint: DEFAULT_SRC_API_ENDPOINT.to_string(),
            src_prefix: DEFAULT_SRC_PREFIX.to_string(),
            src_domain: DEFAULT_DOMAIN.to_string(),
            dst_api_endpoint: String::new(),
            dst_domain: DEFAULT_DOMAIN.to_string(),
            api_timeout: DEFAULT_API_TIMEOUT,
        }
    }
}

impl MigrationConfig {
    /// Split a comma separated endpoint list, dropping blanks
    pub fn parse_endpoints(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Trim trailing slashes from URLs and the key prefix
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.src_api_endpoint = self.src_api_endpoint.trim().trim_end_matches('/').to_string();
        self.dst_api_endpoint = self.dst_api_endpoint.trim().trim_end_matches('/').to_string();
        self.src_prefix = self.src_prefix.trim().trim_end_matches('/').to_string();
        self.src_domain = self.src_domain.trim().trim_matches('.').to_string();
        self.dst_domain = self.dst_domain.trim().trim_matches('.').to_string();
        self
    }

    pub fn validate(&self) -> MigrateResult<()> {
        if self.src_endpoints.iter().all(|e| e.trim().is_empty()) {
            return Err(MigrateError::InvalidConfig(
                "source etcd endpoints must not be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("source api endpoint", &self.src_api_endpoint),
            ("destination api endpoint", &self.dst_api_endpoint),
            ("source domain", &self.src_domain),
            ("destination domain", &self.dst_domain),
        ] {
            if value.trim().is_empty() {
                return Err(MigrateError::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        if self.api_timeout.is_zero() {
            return Err(MigrateError::InvalidConfig(
                "api timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether record names have to move to a different root domain
    pub fn rewrites_domain(&self) -> bool {
        self.src_domain != self.dst_domain
    }

    /// `<prefix>/_frozen`, also for a prefix that was not normalized
    pub fn frozen_key(&self) -> String {
        format!("{}/_frozen", self.src_prefix.trim_end_matches('/'))
    }
}
