//! Annotation system.
//!
//! - [`schema`] - the static catalog of recognized annotations
//! - [`Annotation`] - one parsed `@Name(params)` attached to a node
//! - [`Annotations`] / [`Annotatable`] - the annotation set of a node and
//!   its validation against the node's supported annotation types

mod annotatable;
mod annotation;
pub mod schema;

pub use annotatable::{Annotatable, Annotations};
pub use annotation::{Annotation, AnnotationParams};
pub use schema::{AnnotationSchema, AnnotationType, ParamType};
