//! Decode JSON `null` as the type's default
//!
//! Use with `#[serde(default, deserialize_with = "nullable::deserialize")]`
//! on fields the APIs may send as `null` instead of omitting.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
