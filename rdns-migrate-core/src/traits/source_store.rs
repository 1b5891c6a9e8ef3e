//! Legacy key-value store abstract Trait

use async_trait::async_trait;

use crate::error::MigrateResult;
use crate::types::StoreNode;

/// Read-only access to the legacy hierarchical store
///
/// Implementations:
/// - `EtcdV2Store`: etcd v2 keys API over HTTP
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// List the child entries under a directory key
    ///
    /// Returns an empty list when the key does not exist or has no children;
    /// errors only when the store cannot be read.
    ///
    /// # Arguments
    /// * `path` - Directory key, e.g. `/rdns/_frozen`
    async fn list(&self, path: &str) -> MigrateResult<Vec<StoreNode>>;
}
