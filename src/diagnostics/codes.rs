//! Standard diagnostic codes.
//!
//! ## Code Ranges
//!
//! - **E00xx**: Annotation errors
//! - **E01xx**: Type specifier and resolution errors
//! - **E02xx**: Declaration errors (fields, constants, enums, unions)
//! - **E03xx**: Interface and method errors
//! - **E04xx**: Backend-specific errors
//! - **E05xx**: Document and import errors
//! - **W00xx**: Advisories

// ========================================================================
// ANNOTATIONS (E00xx)
// ========================================================================

/// Annotation name not in the schema registry.
pub const UNKNOWN_ANNOTATION: &str = "E0001";
/// Parameter not accepted by the annotation.
pub const UNKNOWN_ANNOTATION_PARAMETER: &str = "E0002";
/// Parameter value refers to another constant.
pub const NON_CONSTANT_ANNOTATION_VALUE: &str = "E0003";
/// Parameter value does not evaluate.
pub const INVALID_ANNOTATION_VALUE: &str = "E0004";
/// Required parameter missing.
pub const MISSING_ANNOTATION_PARAMETER: &str = "E0005";
/// Annotation not allowed on this kind of node.
pub const UNSUPPORTED_ANNOTATION: &str = "E0006";
/// Non-repeatable annotation repeated.
pub const REPEATED_ANNOTATION: &str = "E0007";

// ========================================================================
// TYPES (E01xx)
// ========================================================================

/// Type name did not resolve.
pub const UNRESOLVED_TYPE: &str = "E0101";
/// Malformed generic instantiation.
pub const INVALID_GENERIC: &str = "E0102";
/// Type cannot be used in this form (array, nullable, utf8, void).
pub const INVALID_TYPE: &str = "E0103";
/// Duplicate or malformed type parameter declaration.
pub const INVALID_TYPE_PARAMETER: &str = "E0104";

// ========================================================================
// DECLARATIONS (E02xx)
// ========================================================================

/// Two fields share a name.
pub const DUPLICATE_FIELD: &str = "E0201";
/// Two constants share a name.
pub const DUPLICATE_CONSTANT: &str = "E0202";
/// Two fields share a capitalized accessor name.
pub const DUPLICATE_GETTER: &str = "E0203";
/// Field type violates `@JavaOnlyImmutable`.
pub const MUTABLE_FIELD: &str = "E0204";
/// Field type violates `@FixedSize`.
pub const NON_FIXED_SIZE_FIELD: &str = "E0205";
/// Declaration or default value is invalid.
pub const INVALID_DECLARATION: &str = "E0206";
/// Constant of an unsupported type or value.
pub const INVALID_CONSTANT: &str = "E0207";
/// Union is empty or its first member lacks a default.
pub const INVALID_UNION: &str = "E0208";
/// Enum has members, no backing type, or bad enumerators.
pub const INVALID_ENUM: &str = "E0209";

// ========================================================================
// INTERFACES (E03xx)
// ========================================================================

/// Two methods share a name.
pub const DUPLICATE_METHOD: &str = "E0301";
/// Two arguments of one method share a name.
pub const DUPLICATE_ARGUMENT: &str = "E0302";
/// Oneway method returns a value or has out arguments.
pub const INVALID_ONEWAY: &str = "E0303";
/// Argument direction missing or impossible.
pub const INVALID_DIRECTION: &str = "E0304";
/// Argument name reserved.
pub const RESERVED_NAME: &str = "E0305";
/// User method redefines an introspection method.
pub const RESERVED_METHOD: &str = "E0306";
/// Return or argument type not allowed here.
pub const INVALID_METHOD_TYPE: &str = "E0307";

// ========================================================================
// BACKENDS (E04xx)
// ========================================================================

/// Type not supported by a backend.
pub const UNSUPPORTED_BY_BACKEND: &str = "E0401";
/// Unstructured parcelable without a header.
pub const MISSING_HEADER: &str = "E0402";

// ========================================================================
// DOCUMENTS (E05xx)
// ========================================================================

/// Two imports provide the same simple name.
pub const AMBIGUOUS_IMPORT: &str = "E0501";
/// Two types share a canonical name.
pub const DUPLICATE_TYPE: &str = "E0502";

// ========================================================================
// ADVISORIES (W00xx)
// ========================================================================

pub const ENUM_ZERO: &str = "W0001";
pub const INOUT_PARAMETER: &str = "W0002";
pub const INTERFACE_NAME: &str = "W0003";
