//! Trait abstractions for the document-tree collaborator.
//!
//! The library never parses documents itself; applications implement these
//! traits over whatever tree they already have.

pub mod dom;
