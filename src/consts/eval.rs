//! Constant evaluation.
//!
//! Expressions evaluate to a [`Value`], then are checked against the
//! expected type and rendered as a backend-neutral value string. An empty
//! value string means evaluation failed.

use smol_str::SmolStr;
use thiserror::Error;

use super::expr::{BinaryOp, ConstantKind, ConstantValue, LiteralKind, UnaryOp};
use crate::model::DefinedTypeKind;
use crate::types::{DefinedTypeId, TypeName, TypeSpecifier};

/// Renders a raw value string for a (non-array) expected type.
pub type ConstantValueDecorator = fn(&TypeName, &str) -> String;

/// Enum values render as `<EnumType>.<ENUMERATOR>`; everything else as is.
pub fn default_decorator(ty: &TypeName, raw: &str) -> String {
    match ty.defined_type() {
        Some(target) if target.kind == DefinedTypeKind::Enum => {
            let member = raw.rsplit('.').next().unwrap_or(raw);
            format!("{}.{}", ty.name(), member)
        }
        _ => raw.to_string(),
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvalError {
    #[error("invalid literal '{0}'")]
    InvalidLiteral(SmolStr),
    #[error("unknown reference '{0}'")]
    UnknownReference(SmolStr),
    #[error("circular reference to '{0}'")]
    CircularReference(SmolStr),
    #[error("operator '{op}' cannot be applied to {operand}")]
    BadOperand { op: &'static str, operand: &'static str },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("value {value} does not fit in '{ty}'")]
    OutOfRange { value: i64, ty: SmolStr },
    #[error("expected a value of type '{expected}', found {found}")]
    TypeMismatch { expected: String, found: &'static str },
    #[error("'{name}' is not an enumerator of '{ty}'")]
    NotAnEnumerator { name: SmolStr, ty: SmolStr },
    #[error("type '{0}' cannot hold a constant value")]
    UnsupportedType(SmolStr),
}

/// An evaluated constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integral(i64),
    Floating { value: f64, text: SmolStr },
    /// Character literal including its quotes.
    Character(SmolStr),
    /// String contents without quotes.
    String(String),
    Array(Vec<Value>),
    /// Reference to an enumerator, as written.
    Enumerator(SmolStr),
}

impl Value {
    fn describe(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "a boolean",
            Value::Integral(_) => "an integral",
            Value::Floating { .. } => "a floating point value",
            Value::Character(_) => "a character",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Enumerator(_) => "an enumerator",
        }
    }
}

/// A constant (or enumerator) a reference resolved to.
pub struct ResolvedConstant<'a> {
    pub value: &'a ConstantValue,
    /// Declared type; the backing type for enumerators.
    pub ty: &'a TypeSpecifier,
    /// Canonical name of the declaring type.
    pub scope: &'a str,
}

/// Where references inside constant expressions are looked up.
pub trait ConstantEnv {
    /// Find the constant `name` (`NAME` or `Type.NAME`) written inside the
    /// type whose canonical name is `scope`.
    fn lookup_constant(&self, scope: &str, name: &str) -> Option<ResolvedConstant<'_>>;

    /// Whether `name` is an enumerator of the enum `enum_type`.
    fn is_enumerator(&self, enum_type: DefinedTypeId, name: &str) -> bool;
}

/// An environment without any constants, for contexts where references
/// are not allowed (annotation parameters).
pub struct NoConstants;

impl ConstantEnv for NoConstants {
    fn lookup_constant(&self, _scope: &str, _name: &str) -> Option<ResolvedConstant<'_>> {
        None
    }

    fn is_enumerator(&self, _enum_type: DefinedTypeId, _name: &str) -> bool {
        false
    }
}

pub(crate) fn parse_integral(text: &str) -> Option<i64> {
    let (body, long) = match text.strip_suffix(['l', 'L']) {
        Some(body) => (body, true),
        None => (text, false),
    };
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        let raw = u64::from_str_radix(hex, 16).ok()?;
        // Hex literals that fit 32 bits are two's complement ints.
        if !long && raw <= u64::from(u32::MAX) {
            return Some(i64::from(raw as u32 as i32));
        }
        return Some(raw as i64);
    }
    body.parse::<i64>().ok()
}

pub(crate) fn parse_floating(text: &str) -> Option<f64> {
    let body = text.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(text);
    body.parse::<f64>().ok()
}

fn split_reference(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(dot) => (Some(&name[..dot]), &name[dot + 1..]),
        None => (None, name),
    }
}

struct Evaluator<'e> {
    env: &'e dyn ConstantEnv,
    /// References being evaluated, as (scope, name), for cycle detection.
    stack: Vec<(String, String)>,
}

impl<'e> Evaluator<'e> {
    fn eval(
        &mut self,
        value: &ConstantValue,
        expected: &TypeName,
        is_array: bool,
        scope: &str,
    ) -> Result<Value, EvalError> {
        match value.kind() {
            ConstantKind::Literal { kind, text } => Self::eval_literal(*kind, text),
            ConstantKind::Array(values) => values
                .iter()
                .map(|v| self.eval(v, expected, false, scope))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            ConstantKind::Reference(name) => self.eval_reference(name, expected, is_array, scope),
            ConstantKind::Unary { op, operand } => {
                let operand = self.eval(operand, expected, is_array, scope)?;
                Self::eval_unary(*op, operand)
            }
            ConstantKind::Binary { lhs, op, rhs } => {
                let lhs = self.eval(lhs, expected, is_array, scope)?;
                let rhs = self.eval(rhs, expected, is_array, scope)?;
                Self::eval_binary(lhs, *op, rhs)
            }
        }
    }

    fn eval_literal(kind: LiteralKind, text: &SmolStr) -> Result<Value, EvalError> {
        let invalid = || EvalError::InvalidLiteral(text.clone());
        match kind {
            LiteralKind::Boolean => match text.as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(invalid()),
            },
            LiteralKind::Integral => parse_integral(text).map(Value::Integral).ok_or_else(invalid),
            LiteralKind::Floating => parse_floating(text)
                .map(|value| Value::Floating {
                    value,
                    text: text.clone(),
                })
                .ok_or_else(invalid),
            LiteralKind::Character => Ok(Value::Character(text.clone())),
            LiteralKind::String => text
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(invalid),
        }
    }

    fn eval_reference(
        &mut self,
        name: &SmolStr,
        expected: &TypeName,
        is_array: bool,
        scope: &str,
    ) -> Result<Value, EvalError> {
        if let Some(target) = expected.defined_type().filter(|_| !is_array) {
            if target.kind == DefinedTypeKind::Enum {
                let (prefix, member) = split_reference(name);
                let prefix_ok =
                    prefix.is_none_or(|p| p == expected.simple_name() || p == expected.name());
                if prefix_ok && self.env.is_enumerator(target.id, member) {
                    return Ok(Value::Enumerator(name.clone()));
                }
                return Err(EvalError::NotAnEnumerator {
                    name: name.clone(),
                    ty: SmolStr::new(expected.name()),
                });
            }
        }

        let env = self.env;
        let resolved = env
            .lookup_constant(scope, name)
            .ok_or_else(|| EvalError::UnknownReference(name.clone()))?;
        let key = (resolved.scope.to_string(), name.to_string());
        if self.stack.contains(&key) {
            return Err(EvalError::CircularReference(name.clone()));
        }
        tracing::trace!("evaluating reference '{}' in '{}'", name, resolved.scope);
        self.stack.push(key);
        let result = self.eval(
            resolved.value,
            resolved.ty.base(),
            resolved.ty.is_array(),
            resolved.scope,
        );
        self.stack.pop();
        result
    }

    fn eval_unary(op: UnaryOp, operand: Value) -> Result<Value, EvalError> {
        match (op, operand) {
            (UnaryOp::Plus, Value::Integral(v)) => Ok(Value::Integral(v)),
            (UnaryOp::Minus, Value::Integral(v)) => {
                v.checked_neg().map(Value::Integral).ok_or(EvalError::Overflow)
            }
            (UnaryOp::Plus, f @ Value::Floating { .. }) => Ok(f),
            (UnaryOp::Minus, Value::Floating { value, text }) => Ok(Value::Floating {
                value: -value,
                text: SmolStr::new(format!("-{}", text)),
            }),
            (UnaryOp::BitNot, Value::Integral(v)) => Ok(Value::Integral(!v)),
            (UnaryOp::LogicalNot, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (UnaryOp::LogicalNot, Value::Integral(v)) => Ok(Value::Boolean(v == 0)),
            (op, other) => Err(EvalError::BadOperand {
                op: op.as_str(),
                operand: other.describe(),
            }),
        }
    }

    fn eval_binary(lhs: Value, op: BinaryOp, rhs: Value) -> Result<Value, EvalError> {
        match (lhs, rhs) {
            (Value::Integral(l), Value::Integral(r)) => Self::eval_integral(l, op, r),
            (Value::Boolean(l), Value::Boolean(r)) => match op {
                BinaryOp::LogicalAnd | BinaryOp::BitAnd => Ok(Value::Boolean(l && r)),
                BinaryOp::LogicalOr | BinaryOp::BitOr => Ok(Value::Boolean(l || r)),
                BinaryOp::BitXor | BinaryOp::Ne => Ok(Value::Boolean(l != r)),
                BinaryOp::Eq => Ok(Value::Boolean(l == r)),
                _ => Err(EvalError::BadOperand {
                    op: op.as_str(),
                    operand: "a boolean",
                }),
            },
            (Value::String(l), Value::String(r)) => match op {
                BinaryOp::Add => Ok(Value::String(l + &r)),
                BinaryOp::Eq => Ok(Value::Boolean(l == r)),
                BinaryOp::Ne => Ok(Value::Boolean(l != r)),
                _ => Err(EvalError::BadOperand {
                    op: op.as_str(),
                    operand: "a string",
                }),
            },
            (l, _) => Err(EvalError::BadOperand {
                op: op.as_str(),
                operand: l.describe(),
            }),
        }
    }

    fn eval_integral(l: i64, op: BinaryOp, r: i64) -> Result<Value, EvalError> {
        let arithmetic = |v: Option<i64>| v.map(Value::Integral).ok_or(EvalError::Overflow);
        match op {
            BinaryOp::Add => arithmetic(l.checked_add(r)),
            BinaryOp::Sub => arithmetic(l.checked_sub(r)),
            BinaryOp::Mul => arithmetic(l.checked_mul(r)),
            BinaryOp::Div | BinaryOp::Rem if r == 0 => Err(EvalError::DivisionByZero),
            BinaryOp::Div => arithmetic(l.checked_div(r)),
            BinaryOp::Rem => arithmetic(l.checked_rem(r)),
            BinaryOp::BitAnd => Ok(Value::Integral(l & r)),
            BinaryOp::BitOr => Ok(Value::Integral(l | r)),
            BinaryOp::BitXor => Ok(Value::Integral(l ^ r)),
            BinaryOp::Shl | BinaryOp::Shr => {
                let shift = u32::try_from(r).ok().filter(|s| *s < 64).ok_or(EvalError::Overflow)?;
                if op == BinaryOp::Shl {
                    arithmetic(l.checked_shl(shift))
                } else {
                    arithmetic(l.checked_shr(shift))
                }
            }
            BinaryOp::LogicalAnd => Ok(Value::Boolean(l != 0 && r != 0)),
            BinaryOp::LogicalOr => Ok(Value::Boolean(l != 0 || r != 0)),
            BinaryOp::Eq => Ok(Value::Boolean(l == r)),
            BinaryOp::Ne => Ok(Value::Boolean(l != r)),
            BinaryOp::Lt => Ok(Value::Boolean(l < r)),
            BinaryOp::Gt => Ok(Value::Boolean(l > r)),
            BinaryOp::Le => Ok(Value::Boolean(l <= r)),
            BinaryOp::Ge => Ok(Value::Boolean(l >= r)),
        }
    }
}

/// Type-check `value` against the expected type and render it.
fn render(
    value: &Value,
    expected: &TypeName,
    is_array: bool,
    decorator: ConstantValueDecorator,
) -> Result<String, EvalError> {
    let mismatch = |found: &Value| EvalError::TypeMismatch {
        expected: if is_array {
            format!("{}[]", expected.name())
        } else {
            expected.name().to_string()
        },
        found: found.describe(),
    };

    if is_array {
        let Value::Array(items) = value else {
            return Err(mismatch(value));
        };
        let rendered = items
            .iter()
            .map(|item| render(item, expected, false, decorator))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(format!("{{{}}}", rendered.join(", ")));
    }

    if let Some(target) = expected.defined_type() {
        if target.kind != DefinedTypeKind::Enum {
            return Err(EvalError::UnsupportedType(SmolStr::new(expected.name())));
        }
        return match value {
            Value::Enumerator(name) => Ok(decorator(expected, name)),
            other => Err(mismatch(other)),
        };
    }

    let in_range = |v: i64, fits: bool| {
        if fits {
            Ok(v.to_string())
        } else {
            Err(EvalError::OutOfRange {
                value: v,
                ty: SmolStr::new(expected.name()),
            })
        }
    };

    let raw = match (expected.name(), value) {
        ("boolean", Value::Boolean(b)) => b.to_string(),
        ("byte", Value::Integral(v)) => in_range(*v, i8::try_from(*v).is_ok())?,
        ("int", Value::Integral(v)) => in_range(*v, i32::try_from(*v).is_ok())?,
        ("long", Value::Integral(v)) => v.to_string(),
        ("char", Value::Character(text)) => text.to_string(),
        ("float" | "double", Value::Floating { text, .. }) => text.to_string(),
        ("float" | "double", Value::Integral(v)) => v.to_string(),
        ("String", Value::String(s)) => format!("\"{}\"", s),
        ("boolean" | "byte" | "int" | "long" | "char" | "float" | "double" | "String", other) => {
            return Err(mismatch(other));
        }
        (name, _) => return Err(EvalError::UnsupportedType(SmolStr::new(name))),
    };
    Ok(decorator(expected, &raw))
}

impl ConstantValue {
    /// Evaluate against `expected`, resolving references from inside `scope`.
    pub fn evaluate(
        &self,
        expected: &TypeSpecifier,
        env: &dyn ConstantEnv,
        scope: &str,
    ) -> Result<Value, EvalError> {
        let mut evaluator = Evaluator {
            env,
            stack: Vec::new(),
        };
        evaluator.eval(self, expected.base(), expected.is_array(), scope)
    }

    pub fn try_value_string(
        &self,
        expected: &TypeSpecifier,
        env: &dyn ConstantEnv,
        scope: &str,
        decorator: ConstantValueDecorator,
    ) -> Result<String, EvalError> {
        let value = self.evaluate(expected, env, scope)?;
        render(&value, expected.base(), expected.is_array(), decorator)
    }

    /// The rendered value, or an empty string if evaluation fails.
    pub fn value_string(
        &self,
        expected: &TypeSpecifier,
        env: &dyn ConstantEnv,
        scope: &str,
        decorator: ConstantValueDecorator,
    ) -> String {
        self.try_value_string(expected, env, scope, decorator)
            .unwrap_or_else(|err| {
                tracing::debug!("{}: cannot evaluate '{}': {}", self.location(), self, err);
                String::new()
            })
    }
}
