use std::fmt;

use smol_str::SmolStr;

use crate::base::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Boolean,
    Character,
    Floating,
    Integral,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    BitNot,
    LogicalNot,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::LogicalNot => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    LogicalAnd,
    LogicalOr,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::LogicalAnd | BinaryOp::LogicalOr)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstantKind {
    /// Literal as written in source, e.g. `0x10`, `"abc"`, `'c'`, `1.5f`.
    Literal { kind: LiteralKind, text: SmolStr },
    Array(Vec<ConstantValue>),
    /// `NAME` or `Type.NAME`.
    Reference(SmolStr),
    Unary {
        op: UnaryOp,
        operand: Box<ConstantValue>,
    },
    Binary {
        lhs: Box<ConstantValue>,
        op: BinaryOp,
        rhs: Box<ConstantValue>,
    },
}

/// An un-evaluated constant expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantValue {
    location: Location,
    kind: ConstantKind,
}

impl ConstantValue {
    pub fn new(location: Location, kind: ConstantKind) -> Self {
        Self { location, kind }
    }

    fn literal(location: Location, kind: LiteralKind, text: impl Into<SmolStr>) -> Self {
        Self::new(
            location,
            ConstantKind::Literal {
                kind,
                text: text.into(),
            },
        )
    }

    pub fn boolean(location: Location, value: bool) -> Self {
        Self::literal(location, LiteralKind::Boolean, if value { "true" } else { "false" })
    }

    /// `text` includes the quotes: `'c'`.
    pub fn character(location: Location, text: impl Into<SmolStr>) -> Self {
        Self::literal(location, LiteralKind::Character, text)
    }

    pub fn floating(location: Location, text: impl Into<SmolStr>) -> Self {
        Self::literal(location, LiteralKind::Floating, text)
    }

    pub fn integral(location: Location, text: impl Into<SmolStr>) -> Self {
        Self::literal(location, LiteralKind::Integral, text)
    }

    /// `text` includes the quotes: `"abc"`.
    pub fn string(location: Location, text: impl Into<SmolStr>) -> Self {
        Self::literal(location, LiteralKind::String, text)
    }

    pub fn array(location: Location, values: Vec<ConstantValue>) -> Self {
        Self::new(location, ConstantKind::Array(values))
    }

    pub fn reference(location: Location, name: impl Into<SmolStr>) -> Self {
        Self::new(location, ConstantKind::Reference(name.into()))
    }

    pub fn unary(location: Location, op: UnaryOp, operand: ConstantValue) -> Self {
        Self::new(
            location,
            ConstantKind::Unary {
                op,
                operand: Box::new(operand),
            },
        )
    }

    pub fn binary(location: Location, lhs: ConstantValue, op: BinaryOp, rhs: ConstantValue) -> Self {
        Self::new(
            location,
            ConstantKind::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            },
        )
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn kind(&self) -> &ConstantKind {
        &self.kind
    }

    /// Walk this expression and every sub-expression, parents first.
    pub fn accept<'a, V: ConstantVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        match &self.kind {
            ConstantKind::Literal { .. } => visitor.visit_literal(self),
            ConstantKind::Array(values) => {
                visitor.visit_array(self);
                for value in values {
                    value.accept(visitor);
                }
            }
            ConstantKind::Reference(name) => visitor.visit_reference(self, name),
            ConstantKind::Unary { operand, .. } => {
                visitor.visit_unary(self);
                operand.accept(visitor);
            }
            ConstantKind::Binary { lhs, rhs, .. } => {
                visitor.visit_binary(self);
                lhs.accept(visitor);
                rhs.accept(visitor);
            }
        }
    }

    /// The first reference to another constant, if any.
    pub fn find_reference(&self) -> Option<&ConstantValue> {
        let mut finder = ReferenceFinder::default();
        self.accept(&mut finder);
        finder.found
    }

    /// Structural validity: literals are well formed, names are non-empty.
    pub fn check_valid(&self) -> bool {
        match &self.kind {
            ConstantKind::Literal { kind, text } => match kind {
                LiteralKind::Boolean => text == "true" || text == "false",
                LiteralKind::Character => text.len() >= 3 && text.starts_with('\'') && text.ends_with('\''),
                LiteralKind::String => text.len() >= 2 && text.starts_with('"') && text.ends_with('"'),
                LiteralKind::Floating => super::eval::parse_floating(text).is_some(),
                LiteralKind::Integral => super::eval::parse_integral(text).is_some(),
            },
            ConstantKind::Array(values) => values.iter().all(ConstantValue::check_valid),
            ConstantKind::Reference(name) => !name.is_empty(),
            ConstantKind::Unary { operand, .. } => operand.check_valid(),
            ConstantKind::Binary { lhs, rhs, .. } => lhs.check_valid() && rhs.check_valid(),
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstantKind::Literal { text, .. } => f.write_str(text),
            ConstantKind::Array(values) => {
                f.write_str("{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("}")
            }
            ConstantKind::Reference(name) => f.write_str(name),
            ConstantKind::Unary { op, operand } => write!(f, "{}{}", op.as_str(), operand),
            ConstantKind::Binary { lhs, op, rhs } => write!(f, "({} {} {})", lhs, op.as_str(), rhs),
        }
    }
}

/// Visitor over constant sub-expressions. Every method defaults to a no-op.
pub trait ConstantVisitor<'a> {
    fn visit_literal(&mut self, _value: &'a ConstantValue) {}
    fn visit_array(&mut self, _value: &'a ConstantValue) {}
    fn visit_reference(&mut self, _value: &'a ConstantValue, _name: &'a str) {}
    fn visit_unary(&mut self, _value: &'a ConstantValue) {}
    fn visit_binary(&mut self, _value: &'a ConstantValue) {}
}

#[derive(Default)]
struct ReferenceFinder<'a> {
    found: Option<&'a ConstantValue>,
}

impl<'a> ConstantVisitor<'a> for ReferenceFinder<'a> {
    fn visit_reference(&mut self, value: &'a ConstantValue, _name: &'a str) {
        if self.found.is_none() {
            self.found = Some(value);
        }
    }
}
