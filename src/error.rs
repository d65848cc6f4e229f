//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Registration errors are
//! surfaced directly during setup; everything raised while a mapping entry
//! is being processed is wrapped into a [`SearchError`] carrying the
//! occurrence record for that entry.

use thiserror::Error;

use crate::types::{MappingEntry, Scope};

/// Errors raised while registering actions.
///
/// These occur during setup, outside of any `search` call, and are never
/// wrapped into a [`SearchError`].
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// An action with this name is already registered in this registry.
    #[error("action `{name}` is already registered")]
    Duplicate { name: String },

    /// Action names must be non-empty.
    #[error("action name must be a non-empty string")]
    EmptyName,
}

/// Errors raised while resolving or executing an action pipeline.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Referenced action name is not in the registry.
    #[error("action `{name}` is not registered")]
    NotRegistered { name: String },

    /// Action invoked against a value of the wrong shape.
    #[error("action `{name}` applies to {expected} values but received a {received} value")]
    ScopeMismatch {
        name: String,
        expected: Scope,
        received: Scope,
    },

    /// Malformed action invocation in a mapping entry.
    #[error("invalid action invocation: {reason}")]
    InvalidInvocation { reason: String },

    /// An action rejected its parameters.
    #[error("action `{name}`: {reason}")]
    BadArguments { name: String, reason: String },

    /// A handler failed for a reason of its own.
    #[error("action `{name}` failed: {source}")]
    Handler {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Validation errors for the shape of a mapping entry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Every mapping entry needs a selector.
    #[error("mapping entry requires a non-empty selector")]
    EmptySelector,

    /// A mapping key of `""` or `"?"` resolves to nothing.
    #[error("mapping key must not be empty")]
    EmptyKey,
}

/// Errors raised while processing a single mapping entry.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The entry itself is malformed.
    #[error("invalid mapping entry: {0}")]
    Config(#[from] ConfigError),

    /// The action pipeline failed.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// A required (non-optional) entry matched no node.
    #[error("no element matches selector `{selector}`")]
    NodeNotFound { selector: String },

    /// The resolved node attribute is missing or not a string.
    #[error("attribute `{attribute}` did not resolve to a string value")]
    PropertyType { attribute: String },
}

/// Failure of one `search` call, wrapping the underlying [`ExtractError`]
/// together with the occurrence record: the result key (without its `?`
/// marker) and the mapping entry that was being processed.
///
/// `search` is all-or-nothing, so at most one of these surfaces per call
/// and no partial record is returned alongside it.
#[derive(Debug, Error)]
#[error("extraction failed for key `{key}`: {source}")]
pub struct SearchError {
    /// Result key of the failing mapping entry.
    pub key: String,
    /// The mapping entry that was being processed.
    pub entry: MappingEntry,
    /// The underlying failure, with its cause chain intact.
    #[source]
    pub source: ExtractError,
}

/// Result type alias for action registration and execution.
pub type ActionResult<T> = std::result::Result<T, ActionError>;

/// Result type alias for `search` operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MappingEntry;

    #[test]
    fn test_search_error_preserves_cause() {
        let error = SearchError {
            key: "price".to_string(),
            entry: MappingEntry::new(".price"),
            source: ExtractError::NodeNotFound {
                selector: ".price".to_string(),
            },
        };

        let message = error.to_string();
        assert!(message.contains("price"));

        let cause = std::error::Error::source(&error).expect("cause is attached");
        assert!(cause.to_string().contains(".price"));
    }

    #[test]
    fn test_scope_mismatch_message_names_both_scopes() {
        let error = ActionError::ScopeMismatch {
            name: "split".to_string(),
            expected: Scope::Group,
            received: Scope::Single,
        };
        let message = error.to_string();
        assert!(message.contains("group"));
        assert!(message.contains("single"));
    }
}
