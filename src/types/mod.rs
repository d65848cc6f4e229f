//! Data types for mappings, action invocations, and extracted values.

pub mod mapping;
pub mod value;

pub use mapping::{ActionInvocation, Attribute, Mapping, MappingEntry, Record};
pub use value::{RawValue, Scope};
