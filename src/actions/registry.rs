//! Registry of named, scope-tagged transformation actions.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ActionError, ActionResult, RegistrationError};
use crate::types::{RawValue, Scope};

/// Handler for a single-scoped action: one string in, one string out.
pub type SingleHandler<C> =
    Box<dyn Fn(&str, &C, &[Value]) -> ActionResult<String> + Send + Sync>;

/// Handler for a group-scoped action.
///
/// Receives the whole collected array and may change the value's shape,
/// e.g. `split` fans the single raw text of one node out into many values.
pub type GroupHandler<C> =
    Box<dyn Fn(&[String], &C, &[Value]) -> ActionResult<RawValue> + Send + Sync>;

/// A scope-typed action handler. The variant is the action's scope, so a
/// handler can never be invoked against a value shape it does not accept
/// without that mismatch being caught in [`ActionRegistry::invoke`].
pub enum ActionHandler<C> {
    Single(SingleHandler<C>),
    Group(GroupHandler<C>),
}

impl<C> ActionHandler<C> {
    /// The scope this handler applies to.
    pub fn scope(&self) -> Scope {
        match self {
            ActionHandler::Single(_) => Scope::Single,
            ActionHandler::Group(_) => Scope::Group,
        }
    }
}

/// A named action ready for registration.
pub struct ActionDescriptor<C> {
    /// Unique, non-empty registration name.
    pub name: String,
    /// The scope-typed handler.
    pub handler: ActionHandler<C>,
}

impl<C> ActionDescriptor<C> {
    /// Descriptor for a single-scoped action.
    pub fn single<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str, &C, &[Value]) -> ActionResult<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            handler: ActionHandler::Single(Box::new(handler)),
        }
    }

    /// Descriptor for a group-scoped action.
    pub fn group<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[String], &C, &[Value]) -> ActionResult<RawValue> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            handler: ActionHandler::Group(Box::new(handler)),
        }
    }
}

/// Holds the actions one spider can run.
///
/// Name uniqueness is scoped to one registry instance. Registration is a
/// setup-time step; `search` only ever borrows the registry immutably.
pub struct ActionRegistry<C> {
    actions: IndexMap<String, ActionHandler<C>>,
}

impl<C> ActionRegistry<C> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            actions: IndexMap::new(),
        }
    }

    /// A registry pre-seeded with the builtin actions
    /// (`split`, `replace`, `remove`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register_batch(crate::actions::builtin::builtin_actions())
            .expect("builtin action names are unique and non-empty");
        registry
    }

    /// Register one action.
    pub fn register(&mut self, descriptor: ActionDescriptor<C>) -> Result<(), RegistrationError> {
        let ActionDescriptor { name, handler } = descriptor;
        if name.trim().is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        if self.actions.contains_key(&name) {
            return Err(RegistrationError::Duplicate { name });
        }
        self.actions.insert(name, handler);
        Ok(())
    }

    /// Register a batch of actions in order.
    ///
    /// Not atomic: a failure partway through leaves the earlier
    /// registrations in place.
    pub fn register_batch(
        &mut self,
        descriptors: impl IntoIterator<Item = ActionDescriptor<C>>,
    ) -> Result<(), RegistrationError> {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    /// Whether an action with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// The registered scope of an action, if it exists.
    pub fn scope_of(&self, name: &str) -> Option<Scope> {
        self.actions.get(name).map(ActionHandler::scope)
    }

    /// Invoke a registered action against a raw value.
    ///
    /// The call-time scope check lives here: a single-scoped action given a
    /// group value (or vice versa) fails with
    /// [`ActionError::ScopeMismatch`] rather than being coerced.
    pub fn invoke(
        &self,
        name: &str,
        value: RawValue,
        context: &C,
        params: &[Value],
    ) -> ActionResult<RawValue> {
        let handler = self
            .actions
            .get(name)
            .ok_or_else(|| ActionError::NotRegistered {
                name: name.to_owned(),
            })?;

        match (handler, value) {
            (ActionHandler::Single(run), RawValue::Single(value)) => {
                run(&value, context, params).map(RawValue::Single)
            }
            (ActionHandler::Group(run), RawValue::Group(values)) => run(&values, context, params),
            (ActionHandler::Single(_), RawValue::Group(_)) => Err(ActionError::ScopeMismatch {
                name: name.to_owned(),
                expected: Scope::Single,
                received: Scope::Group,
            }),
            (ActionHandler::Group(_), RawValue::Single(_)) => Err(ActionError::ScopeMismatch {
                name: name.to_owned(),
                expected: Scope::Group,
                received: Scope::Single,
            }),
        }
    }
}

impl<C> Default for ActionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ActionRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper() -> ActionDescriptor<()> {
        ActionDescriptor::single("upper", |value, _context, _params| {
            Ok(value.to_uppercase())
        })
    }

    #[test]
    fn test_register_and_has() {
        let mut registry = ActionRegistry::new();
        assert!(!registry.has("upper"));

        registry.register(upper()).unwrap();
        assert!(registry.has("upper"));
        assert_eq!(registry.scope_of("upper"), Some(Scope::Single));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = ActionRegistry::new();
        registry.register(upper()).unwrap();

        let error = registry.register(upper()).unwrap_err();
        assert!(matches!(error, RegistrationError::Duplicate { name } if name == "upper"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut registry: ActionRegistry<()> = ActionRegistry::new();
        let descriptor = ActionDescriptor::single("  ", |value, _context, _params| {
            Ok(value.to_owned())
        });
        assert!(matches!(
            registry.register(descriptor),
            Err(RegistrationError::EmptyName)
        ));
    }

    #[test]
    fn test_batch_registration_is_not_atomic() {
        let mut registry = ActionRegistry::new();
        let result = registry.register_batch([upper(), upper()]);

        assert!(matches!(result, Err(RegistrationError::Duplicate { .. })));
        // The first registration survives the failed batch.
        assert!(registry.has("upper"));
    }

    #[test]
    fn test_invoke_checks_scope_at_call_time() {
        let mut registry = ActionRegistry::new();
        registry.register(upper()).unwrap();

        let error = registry
            .invoke("upper", RawValue::Group(vec!["a".to_string()]), &(), &[])
            .unwrap_err();
        assert!(matches!(
            error,
            ActionError::ScopeMismatch {
                expected: Scope::Single,
                received: Scope::Group,
                ..
            }
        ));
    }

    #[test]
    fn test_invoke_unknown_action() {
        let registry: ActionRegistry<()> = ActionRegistry::new();
        let error = registry
            .invoke("nope", RawValue::from("a"), &(), &[])
            .unwrap_err();
        assert!(matches!(error, ActionError::NotRegistered { name } if name == "nope"));
    }
}
