//! Bearer token derivation for the legacy API
//!
//! The legacy API checks `Authorization: Bearer base64(bcrypt(secret))`
//! against the stored secret. The hash is salted, so every call returns a
//! different token for the same secret.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{MigrateError, MigrateResult};
use crate::utils::log_sanitizer::mask_secret;

/// bcrypt's minimum cost factor
pub const BCRYPT_MIN_COST: u32 = 4;

/// Derive a one-off bearer token from a token secret
pub fn generate_token(secret: &str) -> MigrateResult<String> {
    let hash = bcrypt::hash(secret, BCRYPT_MIN_COST)
        .map_err(|e| MigrateError::TokenGeneration(format!("{}: {e}", mask_secret(secret))))?;
    Ok(BASE64.encode(hash))
}
