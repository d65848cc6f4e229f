//! The action system: a registry of named transformations, a runner that
//! threads raw values through invocation lists, and the builtin actions.

pub mod builtin;
pub mod registry;
pub mod runner;

pub use builtin::builtin_actions;
pub use registry::{ActionDescriptor, ActionHandler, ActionRegistry};
pub use runner::ActionRunner;
