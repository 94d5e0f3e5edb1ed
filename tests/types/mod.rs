//! Type tests
//!
//! - Generic instantiations (List, Map, user generics)
//! - Per-backend type rules
//! - Name and import resolution
//! - Signatures of resolved specifiers

pub mod tests_backends;
pub mod tests_resolution;
