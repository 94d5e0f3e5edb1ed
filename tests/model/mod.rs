//! Model tests
//!
//! Declaration-level validation and dumps:
//! - Structured and unstructured parcelables
//! - Unions and their first-member rule
//! - Enums: value autofill, backing types
//! - Interfaces: methods, arguments, directions
//! - Declaration dumps

pub mod tests_dump;
pub mod tests_enums;
pub mod tests_interfaces;
pub mod tests_parcelables;
pub mod tests_unions;
