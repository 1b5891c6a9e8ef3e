//! Command line flags

use std::time::Duration;

use clap::Parser;
use rdns_migrate_core::config::{
    DEFAULT_DOMAIN, DEFAULT_SRC_API_ENDPOINT, DEFAULT_SRC_ENDPOINTS, DEFAULT_SRC_PREFIX,
};
use rdns_migrate_core::MigrationConfig;

/// Migrate RDNS from 0.4.x to 0.5.x
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, env = "DEBUG")]
    pub debug: bool,

    /// Source API endpoint which needs to be migrated
    #[arg(long, env = "SRC_API_ENDPOINT", default_value = DEFAULT_SRC_API_ENDPOINT)]
    pub src_api_endpoint: String,

    /// Source etcd endpoints which need to be migrated, comma separated
    #[arg(long, env = "SRC_ENDPOINTS", default_value = DEFAULT_SRC_ENDPOINTS)]
    pub src_endpoints: String,

    /// Source etcd prefix which needs to be migrated
    #[arg(long, env = "SRC_PREFIX", default_value = DEFAULT_SRC_PREFIX)]
    pub src_prefix: String,

    /// Source domain which needs to be migrated
    #[arg(long, env = "SRC_DOMAIN", default_value = DEFAULT_DOMAIN)]
    pub src_domain: String,

    /// Destination API endpoint
    #[arg(long, env = "DST_API_ENDPOINT")]
    pub dst_api_endpoint: String,

    /// Destination domain
    #[arg(long, env = "DST_DOMAIN", default_value = DEFAULT_DOMAIN)]
    pub dst_domain: String,

    /// Per-request timeout against both APIs, in seconds
    #[arg(long, env = "API_TIMEOUT_SECS", default_value_t = 30)]
    pub api_timeout_secs: u64,
}

impl Cli {
    pub fn to_config(&self) -> MigrationConfig {
        MigrationConfig {
            src_endpoints: MigrationConfig::parse_endpoints(&self.src_endpoints),
            src_api_endpoint: self.src_api_endpoint.clone(),
            src_prefix: self.src_prefix.clone(),
            src_domain: self.src_domain.clone(),
            dst_api_endpoint: self.dst_api_endpoint.clone(),
            dst_domain: self.dst_domain.clone(),
            api_timeout: Duration::from_secs(self.api_timeout_secs),
        }
        .normalized()
    }
}
