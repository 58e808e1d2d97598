//! Record Store Adapter
//!
//! CRUD against the remote tabular store for the Awards and Requirements
//! collections, with schema-tolerant field-name normalization.

pub mod client;
pub mod fields;
pub mod records;

use serde::Deserialize;

pub use client::{Record, StoreClient};
pub use records::{
    Award, CreateAward, CreateRequirement, DeleteRequest, Requirement, UpdateAward,
    UpdateRequirement,
};

/// Target collection selector, carried in the `type` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Awards,
    Requirements,
}

impl Collection {
    /// Selector string, for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Awards => "awards",
            Collection::Requirements => "requirements",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_deserializes_lowercase() {
        let c: Collection = serde_json::from_str(r#""awards""#).unwrap();
        assert_eq!(c, Collection::Awards);
        let c: Collection = serde_json::from_str(r#""requirements""#).unwrap();
        assert_eq!(c, Collection::Requirements);
    }

    #[test]
    fn test_unknown_collection_fails() {
        let result: Result<Collection, _> = serde_json::from_str(r#""books""#);
        assert!(result.is_err());
    }
}
