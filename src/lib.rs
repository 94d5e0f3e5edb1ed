//! # idl-sema
//!
//! Semantic core for an interface definition language: builds a typed,
//! annotated model of parcelables, unions, enums and interfaces and
//! validates it before any code generation happens.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline     → autofill, generic checks, per-backend checks
//!   ↓
//! model        → Defined types, members, Document
//!   ↓
//! types        → TypeSpecifier, signature parser, Typenames registry
//!   ↓
//! consts       → Constant expressions and evaluation
//!   ↓
//! annotations  → Schema registry, annotation instances
//!   ↓
//! diagnostics  → Diagnostic stream (errors and advisories)
//!   ↓
//! base         → Location, builtin names, keywords
//! ```

// ============================================================================
// MODULES (dependency order: base → diagnostics → annotations → consts → types → model → pipeline)
// ============================================================================

/// Foundation types: Location, Span, builtin type names
pub mod base;

/// Error and advisory reporting
pub mod diagnostics;

/// Internal invariant and parse errors
pub mod error;

/// Backend selection and diagnostic switches
pub mod options;

/// Annotation schemas and instances
pub mod annotations;

/// Constant expressions: visitor and evaluator
pub mod consts;

/// Type specifiers and the type registry
pub mod types;

/// Defined types, members and documents
pub mod model;

/// Validation driver
pub mod pipeline;

pub use base::{Location, Position, Span};
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticId, Severity};
pub use error::{Fallible, InternalError, ParseOptionError};
pub use model::{DefinedType, DefinedTypeKind, Document};
pub use options::{Backend, Options};
pub use pipeline::{ValidationReport, validate};
pub use types::{TypeSpecifier, Typenames};
