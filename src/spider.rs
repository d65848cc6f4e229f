//! The extraction orchestrator: resolves a declarative mapping against a
//! document tree and routes every raw value through the action runner.

use std::collections::HashSet;

use serde_json::Value;

use crate::actions::{ActionRegistry, ActionRunner};
use crate::error::{ConfigError, ExtractError, SearchError, SearchResult};
use crate::traits::dom::{DocumentTree, DomNode};
use crate::types::mapping::split_optional_key;
use crate::types::{Attribute, Mapping, MappingEntry, RawValue, Record};

/// Extracts a keyed record from a document tree.
///
/// A spider owns the tree it walks, an opaque extraction context handed to
/// every action handler, the set of keys processed as groups, and an action
/// registry pre-seeded with the builtins. Register any custom actions via
/// [`Spider::actions_mut`] before the first [`Spider::search`] call.
pub struct Spider<D, C = ()> {
    target: D,
    context: C,
    group_keys: HashSet<String>,
    registry: ActionRegistry<C>,
}

impl<D: DocumentTree> Spider<D> {
    /// Spider over `target` with no context and no group keys.
    pub fn new(target: D) -> Self {
        Self::with_context(target, ())
    }
}

impl<D: DocumentTree, C> Spider<D, C> {
    /// Spider over `target` threading `context` into every action handler.
    pub fn with_context(target: D, context: C) -> Self {
        Self {
            target,
            context,
            group_keys: HashSet::new(),
            registry: ActionRegistry::with_builtins(),
        }
    }

    /// Set the keys whose entries are processed as groups (one value per
    /// matched node) rather than as single values.
    pub fn with_group_keys(
        mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.group_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// The action registry.
    pub fn actions(&self) -> &ActionRegistry<C> {
        &self.registry
    }

    /// Mutable access for registering custom actions during setup.
    pub fn actions_mut(&mut self) -> &mut ActionRegistry<C> {
        &mut self.registry
    }

    /// The extraction context handed to action handlers.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Resolve every mapping entry and build the result record.
    ///
    /// Entries are processed in insertion order. All-or-nothing: the first
    /// failure halts the call and surfaces as a [`SearchError`] naming the
    /// failing key and entry; no partial record is returned.
    pub fn search(&self, mapping: &Mapping) -> SearchResult<Record> {
        tracing::debug!(entries = mapping.len(), "resolving extraction mapping");
        let runner = ActionRunner::new(&self.registry);
        let mut record = Record::new();
        for (raw_key, entry) in mapping {
            let (key, optional) = split_optional_key(raw_key);
            let value = self
                .search_entry(key, entry, optional, &runner)
                .map_err(|source| SearchError {
                    key: key.to_owned(),
                    entry: entry.clone(),
                    source,
                })?;
            record.insert(key.to_owned(), value);
        }
        Ok(record)
    }

    fn search_entry(
        &self,
        key: &str,
        entry: &MappingEntry,
        optional: bool,
        runner: &ActionRunner<'_, C>,
    ) -> Result<RawValue, ExtractError> {
        if key.is_empty() {
            return Err(ConfigError::EmptyKey.into());
        }
        if entry.selector.trim().is_empty() {
            return Err(ConfigError::EmptySelector.into());
        }
        if self.group_keys.contains(key) {
            tracing::trace!(key, selector = %entry.selector, "resolving group entry");
            self.search_group(entry, runner)
        } else {
            tracing::trace!(key, selector = %entry.selector, "resolving single entry");
            self.search_single(entry, optional, runner)
                .map(RawValue::Single)
        }
    }

    /// Single path: exactly one node, one refined string.
    fn search_single(
        &self,
        entry: &MappingEntry,
        optional: bool,
        runner: &ActionRunner<'_, C>,
    ) -> Result<String, ExtractError> {
        let raw = match self.target.query_one(&entry.selector) {
            Some(node) => self.raw_text(&node, &entry.attribute)?,
            None if optional => String::new(),
            None => {
                return Err(ExtractError::NodeNotFound {
                    selector: entry.selector.clone(),
                })
            }
        };
        Ok(runner.run_single(&raw, &entry.actions, &self.context)?)
    }

    /// Group path: per-element cleanup through the single phase, then the
    /// collected array through the group phase, both driven by the entry's
    /// one invocation list.
    fn search_group(
        &self,
        entry: &MappingEntry,
        runner: &ActionRunner<'_, C>,
    ) -> Result<RawValue, ExtractError> {
        let nodes = self.target.query_all(&entry.selector);
        let mut values = Vec::with_capacity(nodes.len());
        for node in &nodes {
            let raw = self.raw_text(node, &entry.attribute)?;
            values.push(runner.run_single(&raw, &entry.actions, &self.context)?);
        }
        Ok(runner.run_group(values, &entry.actions, &self.context)?)
    }

    /// Read one attribute off a node; only string values are accepted, and
    /// they come back trimmed.
    fn raw_text(&self, node: &D::Node, attribute: &Attribute) -> Result<String, ExtractError> {
        let resolved = match attribute {
            Attribute::Text => node.text_content(),
            Attribute::Html => node.inner_html(),
            Attribute::Named(property) => node.property(property),
        };
        match resolved {
            Some(Value::String(raw)) => Ok(raw.trim().to_owned()),
            _ => Err(ExtractError::PropertyType {
                attribute: attribute.to_string(),
            }),
        }
    }
}
