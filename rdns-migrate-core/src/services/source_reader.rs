//! Source Reader: enumerates frozen markers and tokens from the legacy store

use std::sync::Arc;

use crate::error::MigrateResult;
use crate::traits::SourceStore;
use crate::types::{Frozen, Token};

/// Directory holding one entry per subdomain token
pub const TOKEN_ORIGIN_KEY: &str = "/token_origin";

/// Reads the two record families the migration moves
pub struct SourceReader {
    store: Arc<dyn SourceStore>,
    frozen_key: String,
}

impl SourceReader {
    /// # Arguments
    /// * `store` - Legacy store
    /// * `frozen_key` - Directory of frozen markers, see [`MigrationConfig::frozen_key`]
    ///
    /// [`MigrationConfig::frozen_key`]: crate::config::MigrationConfig::frozen_key
    pub fn new(store: Arc<dyn SourceStore>, frozen_key: impl Into<String>) -> Self {
        Self {
            store,
            frozen_key: frozen_key.into(),
        }
    }

    /// All frozen-domain markers under `<prefix>/_frozen`
    pub async fn get_frozen(&self) -> MigrateResult<Vec<Frozen>> {
        let nodes = self.store.list(&self.frozen_key).await?;
        log::debug!("read {} frozen entries from {}", nodes.len(), self.frozen_key);
        Ok(nodes
            .into_iter()
            .map(|n| Frozen {
                path: n.key,
                expiration: n.expiration,
            })
            .collect())
    }

    /// All subdomain tokens under `/token_origin`
    pub async fn get_tokens(&self) -> MigrateResult<Vec<Token>> {
        let nodes = self.store.list(TOKEN_ORIGIN_KEY).await?;
        log::debug!("read {} tokens from {TOKEN_ORIGIN_KEY}", nodes.len());
        Ok(nodes
            .into_iter()
            .map(|n| Token {
                path: n.key,
                token: n.value,
                expiration: n.expiration,
            })
            .collect())
    }
}
