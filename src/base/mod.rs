//! Foundation types for the toolchain core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Location`] - File plus begin/end positions, attached to every node
//! - [`Position`], [`Span`] - Line/column positions
//! - Domain constants (builtin type names, reserved words)
//!
//! This module has NO dependencies on other modules of the crate.

pub mod constants;
mod position;

pub use position::{Location, Position, Span};
