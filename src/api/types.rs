use serde::{Deserialize, Serialize};

use super::deserializers::string_or_null;

/// Key of the reference number in search rows, for every resource kind
pub const REFERENCE_NUMBER_FIELD: &str = "Reference Number";

/// One row of a register search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    #[serde(rename = "Name", default, deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(rename = "Reference Number")]
    pub reference_number: String,
    #[serde(rename = "Status", default, deserialize_with = "string_or_null")]
    pub status: String,
    #[serde(rename = "Type of business or Individual", default, deserialize_with = "string_or_null")]
    pub type_label: String,
    #[serde(rename = "URL", default, deserialize_with = "string_or_null")]
    pub url: String,
}

/// Outcome of a reference-number search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolutionResult {
    /// Exactly one record matched
    Resolved(String),
    /// Several records matched, in register order
    Ambiguous(Vec<SearchCandidate>),
}

impl ResolutionResult {
    pub fn reference_number(&self) -> Option<&str> {
        match self {
            Self::Resolved(reference) => Some(reference),
            Self::Ambiguous(_) => None,
        }
    }

    pub fn candidates(&self) -> Option<&[SearchCandidate]> {
        match self {
            Self::Resolved(_) => None,
            Self::Ambiguous(candidates) => Some(candidates),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}
