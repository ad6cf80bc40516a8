//! Whitelist source records.
//!
//! A persisted whitelist is a JSON array of objects. Only the `address`
//! field is read; anything else a record carries (labels, allocation notes)
//! is ignored.

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::identity::Identity;

/// One entry of a persisted whitelist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub address: String,
}

impl IdentityRecord {
    /// Convert to a validated identity.
    pub fn identity(&self) -> Result<Identity, TypeError> {
        Identity::new(self.address.clone())
    }
}

/// Parse a JSON array of records into identities, preserving input order.
///
/// Fails on the first record that is missing `address` or holds an invalid
/// one. A silently dropped record would exclude an eligible participant, so
/// nothing is skipped.
pub fn parse_identity_records(json: &str) -> Result<Vec<Identity>, TypeError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let record: IdentityRecord =
                serde_json::from_value(value).map_err(|e| TypeError::InvalidRecord {
                    index,
                    reason: e.to_string(),
                })?;
            record.identity().map_err(|e| TypeError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_addresses_in_order() {
        let json = r#"[{"address":"addrB"},{"address":"addrA","note":"team"}]"#;
        let ids = parse_identity_records(json).unwrap();
        let addrs: Vec<&str> = ids.iter().map(Identity::as_str).collect();
        assert_eq!(addrs, vec!["addrB", "addrA"]);
    }

    #[test]
    fn empty_array_is_empty_list() {
        assert!(parse_identity_records("[]").unwrap().is_empty());
    }

    #[test]
    fn missing_address_reports_index() {
        let json = r#"[{"address":"addrA"},{"name":"nobody"}]"#;
        let err = parse_identity_records(json).unwrap_err();
        assert!(matches!(err, TypeError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn empty_address_reports_index() {
        let json = r#"[{"address":""}]"#;
        let err = parse_identity_records(json).unwrap_err();
        assert!(matches!(err, TypeError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn non_array_is_serialization_error() {
        assert!(matches!(
            parse_identity_records(r#"{"address":"addrA"}"#),
            Err(TypeError::Serialization(_))
        ));
    }
}
