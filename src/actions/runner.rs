//! Executes ordered action invocation lists against raw values.
//!
//! A mapping entry carries one invocation list shared between two phases:
//! per-element cleanup (single scope, once per matched node) and
//! whole-array reduction (group scope). Each phase executes only the
//! invocations registered for its scope and silently skips the rest, so
//! the same list drives both.

use serde_json::Value;

use crate::actions::registry::ActionRegistry;
use crate::error::{ActionError, ActionResult};
use crate::types::{ActionInvocation, RawValue, Scope};

/// Runs invocation lists against the actions of one registry.
#[derive(Debug)]
pub struct ActionRunner<'r, C> {
    registry: &'r ActionRegistry<C>,
}

impl<'r, C> ActionRunner<'r, C> {
    pub fn new(registry: &'r ActionRegistry<C>) -> Self {
        Self { registry }
    }

    /// Thread a single string through the single-scoped invocations.
    ///
    /// Group-scoped invocations in the list are skipped, never executed.
    /// Unknown action names fail even when their scope would not match.
    pub fn run_single(
        &self,
        value: &str,
        invocations: &[ActionInvocation],
        context: &C,
    ) -> ActionResult<String> {
        let mut current = value.to_owned();
        for invocation in invocations {
            let (name, params) = resolve(invocation)?;
            match self.required_scope(name)? {
                Scope::Group => {
                    tracing::trace!(action = name, "skipping group action in single phase");
                    continue;
                }
                Scope::Single => {}
            }
            match self
                .registry
                .invoke(name, RawValue::Single(current), context, params)?
            {
                RawValue::Single(next) => current = next,
                RawValue::Group(_) => {
                    // Single handlers produce single values by construction,
                    // but the shape contract is re-checked rather than assumed.
                    return Err(ActionError::ScopeMismatch {
                        name: name.to_owned(),
                        expected: Scope::Single,
                        received: Scope::Group,
                    });
                }
            }
        }
        Ok(current)
    }

    /// Thread a collected array through the group-scoped invocations.
    ///
    /// Single-scoped invocations in the list are skipped. A group action
    /// may change the value's shape; if one reduces the value to a single
    /// string, a later group action fails with a scope mismatch.
    pub fn run_group(
        &self,
        values: Vec<String>,
        invocations: &[ActionInvocation],
        context: &C,
    ) -> ActionResult<RawValue> {
        let mut current = RawValue::Group(values);
        for invocation in invocations {
            let (name, params) = resolve(invocation)?;
            match self.required_scope(name)? {
                Scope::Single => {
                    tracing::trace!(action = name, "skipping single action in group phase");
                    continue;
                }
                Scope::Group => {}
            }
            current = self.registry.invoke(name, current, context, params)?;
        }
        Ok(current)
    }

    fn required_scope(&self, name: &str) -> ActionResult<Scope> {
        self.registry
            .scope_of(name)
            .ok_or_else(|| ActionError::NotRegistered {
                name: name.to_owned(),
            })
    }
}

/// Normalize an invocation and validate its shape.
fn resolve(invocation: &ActionInvocation) -> ActionResult<(&str, &[Value])> {
    let name = invocation.name();
    if name.trim().is_empty() {
        return Err(ActionError::InvalidInvocation {
            reason: "action name must be a non-empty string".to_owned(),
        });
    }
    Ok((name, invocation.params()))
}
