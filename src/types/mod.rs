//! Type references and the registry they resolve against.
//!
//! - [`TypeSpecifier`] - a type as written at one use site, plus its resolution
//! - [`Typenames`] - documents, defined types and name lookup
//! - [`parse_type_signature`] - `Name<P>[]` strings to specifiers

mod signature;
mod specifier;
mod typenames;

pub use signature::parse_type_signature;
pub use specifier::{DefinedTypeRef, Resolution, TypeName, TypeResolver, TypeSpecifier};
pub use typenames::{DefinedTypeId, DocumentId, Typenames};
