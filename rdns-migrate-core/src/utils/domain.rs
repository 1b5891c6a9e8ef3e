//! Store key and domain-name transforms

use std::collections::HashMap;

use crate::error::{MigrateError, MigrateResult};

/// Label prefix of the only TXT records that get migrated
pub const ACME_CHALLENGE_LABEL: &str = "_acme-challenge";

/// Last `/`-separated segment of a store key.
fn key_leaf(key: &str) -> MigrateResult<&str> {
    key.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|leaf| !leaf.is_empty())
        .ok_or_else(|| MigrateError::InvalidRecord(format!("store key '{key}' has no entry name")))
}

/// Rebuilds the fqdn encoded in a token key.
///
/// `/token_origin/foo_lb_rancher_cloud` → `foo.lb.rancher.cloud`
pub fn domain_from_token_path(path: &str) -> MigrateResult<String> {
    Ok(key_leaf(path)?.replace('_', "."))
}

/// Entry name of a frozen key: `/rdns/_frozen/example_com` → `example_com`
pub fn frozen_label(path: &str) -> MigrateResult<String> {
    key_leaf(path).map(str::to_string)
}

/// Splits an fqdn into its leading `n` labels, failing when it has fewer.
fn leading_labels(fqdn: &str, n: usize) -> MigrateResult<Vec<&str>> {
    let labels: Vec<&str> = fqdn.split('.').take(n).collect();
    if labels.len() < n || labels.iter().any(|l| l.is_empty()) {
        return Err(MigrateError::InvalidRecord(format!(
            "fqdn '{fqdn}' needs at least {n} label(s) to be rewritten"
        )));
    }
    Ok(labels)
}

/// `foo.bar.com` + `baz.com` → `foo.baz.com`
pub fn rewrite_token_path(fqdn: &str, dst_domain: &str) -> MigrateResult<String> {
    let labels = leading_labels(fqdn, 1)?;
    Ok(format!("{}.{dst_domain}", labels[0]))
}

/// Moves a record fqdn under the destination domain.
///
/// A records keep their first label; TXT records keep two so that the
/// `_acme-challenge` label survives.
pub fn rewrite_record_fqdn(fqdn: &str, is_txt: bool, dst_domain: &str) -> MigrateResult<String> {
    let keep = if is_txt { 2 } else { 1 };
    let labels = leading_labels(fqdn, keep)?;
    Ok(format!("{}.{dst_domain}", labels.join(".")))
}

/// TXT values are sometimes stored as `{"text": "..."}`; unwrap those and
/// pass anything else through untouched.
pub fn unwrap_txt_value(raw: &str) -> String {
    match serde_json::from_str::<HashMap<String, String>>(raw) {
        Ok(mut map) => map.remove("text").unwrap_or_default(),
        Err(_) => raw.to_string(),
    }
}

/// `_acme-challenge.<fqdn>`
pub fn acme_challenge_fqdn(fqdn: &str) -> String {
    format!("{ACME_CHALLENGE_LABEL}.{fqdn}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_path_to_fqdn() {
        assert!(matches!(
            domain_from_token_path("/token_origin/a_b_c").as_deref(),
            Ok("a.b.c")
        ));
    }

    #[test]
    fn token_path_under_prefix() {
        assert!(matches!(
            domain_from_token_path("/rdns/token_origin/foo_lb_rancher_cloud").as_deref(),
            Ok("foo.lb.rancher.cloud")
        ));
    }

    #[test]
    fn token_path_without_leaf_is_rejected() {
        assert!(matches!(
            domain_from_token_path("/"),
            Err(MigrateError::InvalidRecord(_))
        ));
    }

    #[test]
    fn frozen_label_is_entry_name() {
        assert!(matches!(
            frozen_label("/rdns/_frozen/example_com").as_deref(),
            Ok("example_com")
        ));
    }

    #[test]
    fn token_rewrite_keeps_first_label() {
        assert!(matches!(
            rewrite_token_path("foo.bar.com", "baz.com").as_deref(),
            Ok("foo.baz.com")
        ));
    }

    #[test]
    fn a_record_rewrite() {
        assert!(matches!(
            rewrite_record_fqdn("foo.lb.rancher.cloud", false, "example.org").as_deref(),
            Ok("foo.example.org")
        ));
    }

    #[test]
    fn txt_record_rewrite_keeps_acme_label() {
        assert!(matches!(
            rewrite_record_fqdn("_acme-challenge.foo.bar.com", true, "baz.com").as_deref(),
            Ok("_acme-challenge.foo.baz.com")
        ));
    }

    #[test]
    fn txt_rewrite_needs_two_labels() {
        assert!(matches!(
            rewrite_record_fqdn("single", true, "baz.com"),
            Err(MigrateError::InvalidRecord(_))
        ));
        assert!(matches!(
            rewrite_record_fqdn("", false, "baz.com"),
            Err(MigrateError::InvalidRecord(_))
        ));
    }

    #[test]
    fn json_txt_value_is_unwrapped() {
        assert_eq!(unwrap_txt_value(r#"{"text":"xyz"}"#), "xyz");
    }

    #[test]
    fn raw_txt_value_passes_through() {
        assert_eq!(unwrap_txt_value("xyz"), "xyz");
        assert_eq!(unwrap_txt_value(r#"{"text": 1}"#), r#"{"text": 1}"#);
    }

    #[test]
    fn json_without_text_key_becomes_empty() {
        assert_eq!(unwrap_txt_value(r#"{"other":"v"}"#), "");
    }

    #[test]
    fn acme_fqdn() {
        assert_eq!(acme_challenge_fqdn("foo.bar.com"), "_acme-challenge.foo.bar.com");
    }
}
