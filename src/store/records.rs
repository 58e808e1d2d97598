//! Canonical record shapes and their mapping from raw store records

use super::client::Record;
use super::fields::{self, award, requirement};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A literary award being tracked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// Store-assigned record identifier
    pub id: String,
    pub name: String,
    pub url: String,
    pub notes: String,
    /// Free-form deadline text
    pub deadline: String,
    pub status: String,
    /// Derived; held in the Requirements collection via `awardId` and always
    /// serialized empty here
    pub requirements: Vec<Requirement>,
}

/// A submission requirement belonging to an award
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Store-assigned record identifier
    pub id: String,
    /// Foreign key to the owning award
    #[serde(rename = "awardId")]
    pub award_id: String,
    pub text: String,
    pub done: bool,
}

impl Award {
    /// Map a raw store record to the canonical shape. Shared by every read
    /// path so list, create-echo, and update-echo behave identically.
    pub fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        Award {
            id: record.id.clone(),
            name: fields::str_or(f, award::NAME, ""),
            url: fields::str_or(f, award::URL, ""),
            notes: fields::str_or(f, award::NOTES, ""),
            deadline: fields::str_or(f, award::DEADLINE, ""),
            status: fields::str_or(f, award::STATUS, award::DEFAULT_STATUS),
            requirements: Vec::new(),
        }
    }
}

impl Requirement {
    /// Map a raw store record to the canonical shape
    pub fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        Requirement {
            id: record.id.clone(),
            award_id: fields::str_or(f, requirement::AWARD_ID, ""),
            text: fields::str_or(f, requirement::TEXT, ""),
            done: fields::bool_or(f, requirement::DONE, false),
        }
    }
}

/// Body of `POST /api/data?type=awards`
#[derive(Debug, Deserialize)]
pub struct CreateAward {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateAward {
    /// Full field map for the store, defaults applied, primary casing used
    pub fn into_fields(self) -> Map<String, Value> {
        let mut f = Map::new();
        f.insert(fields::primary(award::NAME).into(), self.name.into());
        f.insert(
            fields::primary(award::URL).into(),
            self.url.unwrap_or_default().into(),
        );
        f.insert(
            fields::primary(award::NOTES).into(),
            self.notes.unwrap_or_default().into(),
        );
        f.insert(
            fields::primary(award::DEADLINE).into(),
            self.deadline.unwrap_or_default().into(),
        );
        f.insert(
            fields::primary(award::STATUS).into(),
            self.status
                .unwrap_or_else(|| award::DEFAULT_STATUS.to_string())
                .into(),
        );
        f
    }
}

/// Body of `PATCH /api/data?type=awards`. Only supplied fields are sent to
/// the store; the rest stay untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateAward {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateAward {
    /// Sparse field map containing only the supplied fields
    pub fn into_fields(self) -> Map<String, Value> {
        let mut f = Map::new();
        let pairs = [
            (award::NAME, self.name),
            (award::URL, self.url),
            (award::NOTES, self.notes),
            (award::DEADLINE, self.deadline),
            (award::STATUS, self.status),
        ];
        for (aliases, value) in pairs {
            if let Some(value) = value {
                f.insert(fields::primary(aliases).into(), value.into());
            }
        }
        f
    }
}

/// Body of `POST /api/data?type=requirements`
#[derive(Debug, Deserialize)]
pub struct CreateRequirement {
    #[serde(rename = "awardId")]
    pub award_id: String,
    pub text: String,
    #[serde(default)]
    pub done: Option<bool>,
}

impl CreateRequirement {
    /// Full field map for the store, defaults applied, primary casing used
    pub fn into_fields(self) -> Map<String, Value> {
        let mut f = Map::new();
        f.insert(
            fields::primary(requirement::AWARD_ID).into(),
            self.award_id.into(),
        );
        f.insert(fields::primary(requirement::TEXT).into(), self.text.into());
        f.insert(
            fields::primary(requirement::DONE).into(),
            self.done.unwrap_or(false).into(),
        );
        f
    }
}

/// Body of `PATCH /api/data?type=requirements`
#[derive(Debug, Deserialize)]
pub struct UpdateRequirement {
    pub id: String,
    pub done: bool,
}

impl UpdateRequirement {
    /// Field map carrying only the done flag
    pub fn into_fields(self) -> Map<String, Value> {
        let mut f = Map::new();
        f.insert(fields::primary(requirement::DONE).into(), self.done.into());
        f
    }
}

/// Body of `DELETE /api/data`
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}
