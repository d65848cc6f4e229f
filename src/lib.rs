//! Declarative extraction over DOM-like document trees.
//!
//! Given a mapping of result keys to selector-based descriptors, a
//! [`Spider`] queries a document tree, reads the requested attribute off
//! each matched node, and refines every raw value through a named pipeline
//! of transformation actions before aggregating the results into a keyed
//! record.
//!
//! The document tree itself is an external collaborator: implement
//! [`DocumentTree`]/[`DomNode`] over whatever tree you already have. The
//! library does no parsing and no fetching of its own.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dom_spider::{Mapping, Spider};
//!
//! let spider = Spider::new(document).with_group_keys(["tags"]);
//! let mapping: Mapping = serde_json::from_str(
//!     r#"{
//!         "price": { "selector": ".price", "actions": [{ "name": "remove", "params": ["\\$"] }] },
//!         "tags":  { "selector": ".tag-text", "actions": [{ "name": "split", "params": [","] }] }
//!     }"#,
//! )?;
//! let record = spider.search(&mapping)?;
//! ```
//!
//! # Modules
//!
//! - [`actions`] - Action registry, runner, and builtin transforms
//! - [`types`] - Mapping format and value shapes
//! - [`traits`] - Document-tree collaborator contract
//! - [`spider`] - The extraction orchestrator
//! - [`error`] - Typed error taxonomy
//! - [`testing`] - In-memory document tree for tests

pub mod actions;
pub mod error;
pub mod spider;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use actions::{
    builtin_actions, ActionDescriptor, ActionHandler, ActionRegistry, ActionRunner,
};
pub use error::{
    ActionError, ActionResult, ConfigError, ExtractError, RegistrationError, SearchError,
    SearchResult,
};
pub use spider::Spider;
pub use traits::dom::{DocumentTree, DomNode};
pub use types::{ActionInvocation, Attribute, Mapping, MappingEntry, RawValue, Record, Scope};
