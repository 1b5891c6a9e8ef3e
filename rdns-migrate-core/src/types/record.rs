//! Records read from the legacy store and sent to the destination API

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{datetime, nullable};

/// One child entry of a source store listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreNode {
    /// Full key, e.g. `/token_origin/foo_lb_rancher_cloud`
    pub key: String,
    pub value: String,
    pub expiration: Option<DateTime<Utc>>,
}

/// Subdomain authorization token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Store key of the token, or the rewritten fqdn once prepared for the destination
    pub path: String,
    /// Raw secret
    pub token: String,
    #[serde(default, with = "datetime")]
    pub expiration: Option<DateTime<Utc>>,
}

/// Frozen-domain marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frozen {
    pub path: String,
    #[serde(default, with = "datetime")]
    pub expiration: Option<DateTime<Utc>>,
}

/// Domain as carried by the RDNS APIs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    #[serde(deserialize_with = "nullable::deserialize")]
    pub fqdn: String,
    /// A record values
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "nullable::deserialize"
    )]
    pub hosts: Vec<String>,
    /// Wildcard subdomain records, unused by the migration
    #[serde(
        rename = "subdomain",
        skip_serializing_if = "HashMap::is_empty",
        deserialize_with = "nullable::deserialize"
    )]
    pub sub_domain: HashMap<String, Vec<String>>,
    /// TXT record value
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "nullable::deserialize"
    )]
    pub text: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "nullable::deserialize"
    )]
    pub token: String,
    #[serde(with = "datetime")]
    pub expiration: Option<DateTime<Utc>>,
}

impl Domain {
    /// Whether this is a TXT record rather than an A record
    pub fn is_txt(&self) -> bool {
        !self.text.is_empty()
    }
}
