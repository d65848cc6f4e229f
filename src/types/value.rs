//! Value shapes flowing through action pipelines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Applicability scope of an action: one string, or an array of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Applies to one raw string (once per matched node in group entries).
    Single,
    /// Applies to the whole array collected from a group entry.
    Group,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Single => f.write_str("single"),
            Scope::Group => f.write_str("group"),
        }
    }
}

/// A raw extracted value: one string or a group of strings.
///
/// The explicit tagged union keeps every scope decision an exhaustive
/// match instead of a runtime type probe. Serializes untagged, so a
/// record value renders as a plain string or a plain array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A single string value.
    Single(String),
    /// An array of string values, one per matched node (or post-fan-out).
    Group(Vec<String>),
}

impl RawValue {
    /// The scope this value satisfies.
    pub fn scope(&self) -> Scope {
        match self {
            RawValue::Single(_) => Scope::Single,
            RawValue::Group(_) => Scope::Group,
        }
    }

    /// Borrow the single string, if this is a single value.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            RawValue::Single(value) => Some(value),
            RawValue::Group(_) => None,
        }
    }

    /// Borrow the group slice, if this is a group value.
    pub fn as_group(&self) -> Option<&[String]> {
        match self {
            RawValue::Single(_) => None,
            RawValue::Group(values) => Some(values),
        }
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Single(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Single(value.to_owned())
    }
}

impl From<Vec<String>> for RawValue {
    fn from(values: Vec<String>) -> Self {
        RawValue::Group(values)
    }
}
