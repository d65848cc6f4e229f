//! Testing utilities: an in-memory document tree.
//!
//! Useful for testing applications that use the library without standing up
//! a real document-tree backend. Nodes are registered under exact selector
//! strings; no selector grammar is evaluated and no markup is parsed.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::traits::dom::{DocumentTree, DomNode};

/// A fixture node with configurable text, markup, and named properties.
#[derive(Debug, Clone, Default)]
pub struct StaticNode {
    text: Option<Value>,
    html: Option<Value>,
    properties: HashMap<String, Value>,
}

impl StaticNode {
    /// A node with nothing set; every lookup on it resolves to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A node with the given text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(Value::String(text.into())),
            ..Self::default()
        }
    }

    /// Set the text content to an arbitrary value, including non-strings
    /// for exercising type errors.
    pub fn with_text_value(mut self, value: Value) -> Self {
        self.text = Some(value);
        self
    }

    /// Set the inner markup.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(Value::String(html.into()));
        self
    }

    /// Set a named property.
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }
}

impl DomNode for StaticNode {
    fn text_content(&self) -> Option<Value> {
        self.text.clone()
    }

    fn inner_html(&self) -> Option<Value> {
        self.html.clone()
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }
}

/// An in-memory document tree keyed by exact selector string.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    nodes: IndexMap<String, Vec<StaticNode>>,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one node under a selector.
    pub fn with_node(mut self, selector: impl Into<String>, node: StaticNode) -> Self {
        self.nodes.entry(selector.into()).or_default().push(node);
        self
    }

    /// Append several nodes under a selector.
    pub fn with_nodes(
        mut self,
        selector: impl Into<String>,
        nodes: impl IntoIterator<Item = StaticNode>,
    ) -> Self {
        self.nodes.entry(selector.into()).or_default().extend(nodes);
        self
    }
}

impl DocumentTree for StaticDocument {
    type Node = StaticNode;

    fn query_all(&self, selector: &str) -> Vec<StaticNode> {
        self.nodes.get(selector).cloned().unwrap_or_default()
    }
}
