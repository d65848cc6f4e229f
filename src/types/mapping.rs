//! The declarative mapping format: result keys, selectors, attributes, and
//! the action invocations applied to each extracted value.
//!
//! A mapping is plain data and round-trips through `serde_json`:
//!
//! ```json
//! {
//!     "price": { "selector": ".price", "actions": [{ "name": "remove", "params": ["\\$"] }] },
//!     "tags":  { "selector": ".tag-text", "actions": [{ "name": "split", "params": [","] }] },
//!     "link?": { "selector": "a.more", "attribute": "href" }
//! }
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::value::RawValue;

/// Which node property a mapping entry reads.
///
/// Exactly two aliases are special-cased; any other string passes through
/// as a literal property name on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attribute {
    /// The node's text content (the default).
    Text,
    /// The node's inner markup.
    Html,
    /// Any other property, passed through by name.
    Named(String),
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute::Text
    }
}

impl From<String> for Attribute {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => Attribute::Text,
            "html" => Attribute::Html,
            _ => Attribute::Named(raw),
        }
    }
}

impl From<&str> for Attribute {
    fn from(raw: &str) -> Self {
        Attribute::from(raw.to_owned())
    }
}

impl From<Attribute> for String {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Text => "text".to_owned(),
            Attribute::Html => "html".to_owned(),
            Attribute::Named(name) => name,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Text => f.write_str("text"),
            Attribute::Html => f.write_str("html"),
            Attribute::Named(name) => f.write_str(name),
        }
    }
}

/// One step of an action pipeline: an action name plus positional params.
///
/// A bare string is shorthand for an invocation with no parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionInvocation {
    /// Bare name, no parameters.
    Name(String),
    /// Name with positional parameters.
    Call {
        name: String,
        #[serde(default)]
        params: Vec<Value>,
    },
}

impl ActionInvocation {
    /// Invocation with positional parameters.
    pub fn call(name: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Self {
        ActionInvocation::Call {
            name: name.into(),
            params: params.into_iter().collect(),
        }
    }

    /// The action name.
    pub fn name(&self) -> &str {
        match self {
            ActionInvocation::Name(name) => name,
            ActionInvocation::Call { name, .. } => name,
        }
    }

    /// The positional parameters (empty for the bare-name shorthand).
    pub fn params(&self) -> &[Value] {
        match self {
            ActionInvocation::Name(_) => &[],
            ActionInvocation::Call { params, .. } => params,
        }
    }
}

impl From<&str> for ActionInvocation {
    fn from(name: &str) -> Self {
        ActionInvocation::Name(name.to_owned())
    }
}

impl From<String> for ActionInvocation {
    fn from(name: String) -> Self {
        ActionInvocation::Name(name)
    }
}

/// One extraction descriptor: where to look, what to read, how to refine it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Selector resolved against the document tree. Required, non-empty.
    pub selector: String,

    /// Node property to read. Defaults to [`Attribute::Text`].
    #[serde(default)]
    pub attribute: Attribute,

    /// Ordered action pipeline applied to the raw value.
    #[serde(default)]
    pub actions: Vec<ActionInvocation>,
}

impl MappingEntry {
    /// Entry reading the text content of `selector`, with no actions.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attribute: Attribute::default(),
            actions: Vec::new(),
        }
    }

    /// Set the attribute to read.
    pub fn with_attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Append one action invocation.
    pub fn with_action(mut self, invocation: impl Into<ActionInvocation>) -> Self {
        self.actions.push(invocation.into());
        self
    }

    /// Replace the whole action pipeline.
    pub fn with_actions(
        mut self,
        invocations: impl IntoIterator<Item = ActionInvocation>,
    ) -> Self {
        self.actions = invocations.into_iter().collect();
        self
    }
}

/// A full mapping: result key → extraction descriptor, in insertion order.
///
/// A key ending in `?` marks its entry optional: a missing node yields an
/// empty string instead of failing.
pub type Mapping = IndexMap<String, MappingEntry>;

/// The result of one `search` call: result key → extracted value, in the
/// mapping's insertion order.
pub type Record = IndexMap<String, RawValue>;

/// Split a raw mapping key into the real result key and its optional flag.
pub(crate) fn split_optional_key(raw: &str) -> (&str, bool) {
    match raw.strip_suffix('?') {
        Some(key) => (key, true),
        None => (raw, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_optional_key() {
        assert_eq!(split_optional_key("title"), ("title", false));
        assert_eq!(split_optional_key("title?"), ("title", true));
        assert_eq!(split_optional_key("?"), ("", true));
    }

    #[test]
    fn test_attribute_aliases() {
        assert_eq!(Attribute::from("text"), Attribute::Text);
        assert_eq!(Attribute::from("html"), Attribute::Html);
        assert_eq!(Attribute::from("href"), Attribute::Named("href".to_owned()));
        assert_eq!(Attribute::default(), Attribute::Text);
    }

    #[test]
    fn test_invocation_bare_shorthand() {
        let invocation = ActionInvocation::from("split");
        assert_eq!(invocation.name(), "split");
        assert!(invocation.params().is_empty());
    }

    #[test]
    fn test_mapping_deserializes_from_json() {
        let mapping: Mapping = serde_json::from_value(json!({
            "price": {
                "selector": ".price",
                "actions": [{ "name": "remove", "params": ["\\$"] }]
            },
            "tags": {
                "selector": ".tag-text",
                "actions": ["split"]
            },
            "link?": {
                "selector": "a.more",
                "attribute": "href"
            }
        }))
        .unwrap();

        let keys: Vec<_> = mapping.keys().cloned().collect();
        assert_eq!(keys, ["price", "tags", "link?"]);

        let price = &mapping["price"];
        assert_eq!(price.attribute, Attribute::Text);
        assert_eq!(price.actions[0].name(), "remove");
        assert_eq!(price.actions[0].params(), [json!("\\$")]);

        assert_eq!(mapping["tags"].actions[0], ActionInvocation::from("split"));
        assert_eq!(mapping["link?"].attribute, Attribute::Named("href".to_owned()));
    }

    #[test]
    fn test_mapping_entry_round_trips() {
        let entry = MappingEntry::new(".title")
            .with_attribute("html")
            .with_action(ActionInvocation::call("replace", [json!("a"), json!("b")]));

        let encoded = serde_json::to_value(&entry).unwrap();
        let decoded: MappingEntry = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, entry);
    }
}
