//! The declaration model.
//!
//! - [`DefinedType`] - parcelables, unions, enums and interfaces
//! - [`Members`] - fields, constants and methods in source order
//! - [`Document`] - imports plus the types one file defines
//! - [`CodeWriter`] - indentation-aware output for `dump`

mod defined;
mod document;
mod enums;
mod interface;
mod members;
mod parcelable;
mod union;
mod writer;

pub use defined::{DefinedType, DefinedTypeKind, Members, TypeHeader};
pub use document::{Document, Import};
pub(crate) use document::resolve_name_in;
pub use enums::{EnumDeclaration, Enumerator};
pub use interface::Interface;
pub use members::{Argument, ConstantDeclaration, Direction, Method, VariableDeclaration};
pub use parcelable::{Parcelable, StructuredParcelable};
pub use union::UnionDecl;
pub use writer::CodeWriter;
