//! API 响应包装类型

use serde::{Deserialize, Serialize};

use super::Domain;
use crate::utils::nullable;

/// Envelope returned by both the legacy and the destination API
///
/// Missing and `null` fields both decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(deserialize_with = "nullable::deserialize")]
    pub status: i64,
    #[serde(rename = "msg", deserialize_with = "nullable::deserialize")]
    pub message: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub data: Domain,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub token: String,
}
