//! Utility module

pub mod datetime;
pub mod domain;
pub mod log_sanitizer;
pub mod nullable;
pub mod token;
