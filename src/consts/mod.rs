//! Constant expressions.
//!
//! - [`ConstantValue`] - literal, array, reference, unary and binary nodes
//! - [`ConstantVisitor`] - pre-order walk over sub-expressions
//! - [`ConstantEnv`] - how references find the constant they name
//! - evaluation to backend-neutral value strings (`value_string`)

mod eval;
mod expr;

pub use eval::{
    ConstantEnv, ConstantValueDecorator, EvalError, NoConstants, ResolvedConstant, Value,
    default_decorator,
};
pub use expr::{BinaryOp, ConstantKind, ConstantValue, ConstantVisitor, LiteralKind, UnaryOp};
