//! The document-tree contract consumed by the spider.

use serde_json::Value;

/// A node in the document tree.
///
/// Property access returns `Option<Value>` so an implementation can report
/// both absent properties and non-string ones; the spider accepts only
/// `Value::String` and turns anything else into a type error.
pub trait DomNode {
    /// The node's text content (the `"text"` attribute alias).
    fn text_content(&self) -> Option<Value>;

    /// The node's inner markup (the `"html"` attribute alias).
    fn inner_html(&self) -> Option<Value>;

    /// An arbitrary named property on the node.
    fn property(&self, name: &str) -> Option<Value>;
}

/// A queryable document tree, resolved synchronously by selector string.
pub trait DocumentTree {
    type Node: DomNode;

    /// All nodes matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// The first node matching `selector`, if any.
    fn query_one(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }
}
