//! Canonical field resolution for inconsistently-cased store columns.
//!
//! The backing store has user-defined column names whose casing has drifted
//! over time ("name" vs "Name"). Each canonical field carries an ordered
//! alias list: the primary casing first (used for all writes), then the known
//! alternates. Reads check the aliases in order and the first present value
//! wins; when all are missing the documented default applies.
//!
//! Every read path (list, create-echo, update-echo) goes through this one
//! resolver. The predecessor had per-path fallback chains, and the create
//! path only read the primary casing, so records created against a
//! capitalized schema came back blank.

use serde_json::{Map, Value};

/// Alias lists for the Awards table
pub mod award {
    /// name TEXT, required on create
    pub const NAME: &[&str] = &["name", "Name"];
    /// url TEXT, optional
    pub const URL: &[&str] = &["url", "URL", "Url"];
    /// notes TEXT, optional
    pub const NOTES: &[&str] = &["notes", "Notes"];
    /// deadline TEXT, free-form
    pub const DEADLINE: &[&str] = &["deadline", "Deadline"];
    /// status TEXT, enum-like
    pub const STATUS: &[&str] = &["status", "Status"];

    /// Default status for new or status-less awards
    pub const DEFAULT_STATUS: &str = "researching";
}

/// Alias lists for the Requirements table
pub mod requirement {
    /// awardId TEXT, foreign key to Awards
    pub const AWARD_ID: &[&str] = &["awardId", "AwardId"];
    /// text TEXT, required on create
    pub const TEXT: &[&str] = &["text", "Text"];
    /// done CHECKBOX; unchecked comes back missing, not false
    pub const DONE: &[&str] = &["done", "Done"];
}

/// The primary casing of a field, used for writes
pub fn primary<'a>(aliases: &[&'a str]) -> &'a str {
    aliases[0]
}

/// Resolve a string field through its alias list; first present,
/// non-null value wins.
pub fn resolve_str(fields: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|name| fields.get(*name).and_then(Value::as_str))
        .map(str::to_string)
}

/// Resolve a string field, applying `default` when every alias is missing
pub fn str_or(fields: &Map<String, Value>, aliases: &[&str], default: &str) -> String {
    resolve_str(fields, aliases).unwrap_or_else(|| default.to_string())
}

/// Resolve a boolean field, applying `default` when every alias is missing
pub fn bool_or(fields: &Map<String, Value>, aliases: &[&str], default: bool) -> bool {
    aliases
        .iter()
        .find_map(|name| fields.get(*name).and_then(Value::as_bool))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_primary_casing_wins() {
        let f = fields(json!({"name": "Hugo Award", "Name": "stale"}));
        assert_eq!(
            resolve_str(&f, award::NAME).as_deref(),
            Some("Hugo Award")
        );
    }

    #[test]
    fn test_alternate_casings_resolve_to_same_value() {
        for key in ["url", "URL", "Url"] {
            let f = fields(json!({ key: "https://example.org" }));
            assert_eq!(
                resolve_str(&f, award::URL).as_deref(),
                Some("https://example.org"),
                "casing {key} did not resolve"
            );
        }
    }

    #[test]
    fn test_missing_string_field_gets_default() {
        let f = fields(json!({}));
        assert_eq!(str_or(&f, award::NOTES, ""), "");
        assert_eq!(
            str_or(&f, award::STATUS, award::DEFAULT_STATUS),
            "researching"
        );
    }

    #[test]
    fn test_unchecked_checkbox_defaults_to_false() {
        // Checkbox columns omit the field entirely when unchecked
        let f = fields(json!({"text": "Pay entry fee"}));
        assert!(!bool_or(&f, requirement::DONE, false));
    }

    #[test]
    fn test_checkbox_alternate_casing() {
        let f = fields(json!({"Done": true}));
        assert!(bool_or(&f, requirement::DONE, false));
    }

    #[test]
    fn test_primary_is_first_alias() {
        assert_eq!(primary(award::NAME), "name");
        assert_eq!(primary(requirement::AWARD_ID), "awardId");
    }
}
