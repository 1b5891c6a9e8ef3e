//! RDNS Migrate Core Library
//!
//! Moves the state of an RDNS 0.4.x deployment into an RDNS 0.5.x one:
//! - frozen-domain markers
//! - subdomain tokens
//! - the A records and ACME challenge TXT records owned by those tokens
//!
//! The legacy store and the HTTP APIs sit behind the [`SourceStore`] and
//! [`ApiTransport`] traits; [`EtcdV2Store`] and [`HttpTransport`] are the
//! production implementations.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rdns_migrate_core::{EtcdV2Store, HttpTransport, MigrationConfig, MigrationService};
//!
//! # async fn example() -> rdns_migrate_core::MigrateResult<()> {
//! let config = MigrationConfig {
//!     dst_api_endpoint: "http://rdns-v2:9333".to_string(),
//!     ..MigrationConfig::default()
//! }
//! .normalized();
//! config.validate()?;
//!
//! let store = Arc::new(EtcdV2Store::new(config.src_endpoints.clone())?);
//! let transport = Arc::new(HttpTransport::new(config.api_timeout)?);
//! let report = MigrationService::new(&config, store, transport).run().await?;
//! println!("{} migrated, {} failed", report.succeeded(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod http_client;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use adapters::EtcdV2Store;
pub use config::MigrationConfig;
pub use error::{MigrateError, MigrateResult};
pub use http_client::HttpTransport;
pub use services::{MigrationService, SourceReader};
pub use traits::{ApiRequest, ApiTransport, HttpMethod, SourceStore};
pub use types::{Domain, Frozen, MigrationReport, RecordKind, RecordOutcome, Response, StoreNode, Token};
pub use utils::token::generate_token;
