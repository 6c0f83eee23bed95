//! Shared pieces of the API response schemas

use serde::Deserialize;

/// An identifier as it appears on the wire
///
/// The dashboard API is not consistent about identifier types; both JSON
/// strings and integers are accepted and normalized to a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    pub(crate) fn into_string(self) -> String {
        match self {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}
