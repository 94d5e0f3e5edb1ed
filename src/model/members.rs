//! Members of defined types: fields, arguments, constants and methods.

use std::fmt;

use smol_str::SmolStr;

use crate::base::{Location, constants};
use crate::consts::{ConstantEnv, ConstantValue, default_decorator};
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::error::Fallible;
use crate::types::{TypeSpecifier, Typenames};

// ============================================================================
// VARIABLES
// ============================================================================

/// A field declaration, optionally with a default value.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    location: Location,
    ty: TypeSpecifier,
    name: SmolStr,
    default_value: Option<ConstantValue>,
}

impl VariableDeclaration {
    pub fn new(location: Location, ty: TypeSpecifier, name: impl Into<SmolStr>) -> Self {
        Self {
            location,
            ty,
            name: name.into(),
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: ConstantValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with the first letter upper-cased, as used by generated getters.
    pub fn capitalized_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn type_specifier(&self) -> &TypeSpecifier {
        &self.ty
    }

    pub(crate) fn type_specifier_mut(&mut self) -> &mut TypeSpecifier {
        &mut self.ty
    }

    pub fn default_value(&self) -> Option<&ConstantValue> {
        self.default_value.as_ref()
    }

    pub fn is_default_user_specified(&self) -> bool {
        self.default_value.is_some()
    }

    /// An explicit default, or `null` through `@nullable`.
    pub fn has_useful_default_value(&self) -> bool {
        self.default_value.is_some() || self.ty.is_nullable()
    }

    /// Validate the type and the default value. `scope` is the canonical
    /// name of the declaring type.
    pub fn check_valid(
        &self,
        typenames: &Typenames,
        scope: &str,
        diags: &mut DiagnosticCollector,
    ) -> Fallible<bool> {
        let mut valid = self.ty.check_valid(typenames, diags)?;

        if self.ty.name() == constants::VOID {
            diags.error(
                &self.location,
                codes::INVALID_DECLARATION,
                format!(
                    "Declaration {} is void, but declarations cannot be of void type.",
                    self.name
                ),
            );
            valid = false;
        }

        let Some(value) = &self.default_value else {
            return Ok(valid);
        };
        if !valid {
            return Ok(false);
        }
        Ok(check_value(
            value,
            &self.ty,
            &self.name,
            typenames,
            scope,
            diags,
        ))
    }

    /// Rendered default value, empty if there is none or it does not evaluate.
    pub fn value_string(&self, env: &dyn ConstantEnv, scope: &str) -> String {
        self.default_value
            .as_ref()
            .map(|value| value.value_string(&self.ty, env, scope, default_decorator))
            .unwrap_or_default()
    }

    /// `Type name`
    pub fn signature(&self) -> String {
        format!("{} {}", self.ty.signature(), self.name)
    }

    /// `Type name` plus ` = value` when the default was written in source.
    pub fn to_source(&self, env: &dyn ConstantEnv, scope: &str) -> String {
        let mut source = format!("{} {}", self.ty, self.name);
        if self.is_default_user_specified() {
            source.push_str(" = ");
            source.push_str(&self.value_string(env, scope));
        }
        source
    }
}

fn check_value(
    value: &ConstantValue,
    ty: &TypeSpecifier,
    name: &str,
    typenames: &Typenames,
    scope: &str,
    diags: &mut DiagnosticCollector,
) -> bool {
    if !value.check_valid() {
        diags.error(
            value.location(),
            codes::INVALID_CONSTANT,
            format!("Invalid constant value '{}' for '{}'.", value, name),
        );
        return false;
    }
    match value.try_value_string(ty, typenames, scope, default_decorator) {
        Ok(rendered) if !rendered.is_empty() => true,
        Ok(_) => {
            diags.error(
                value.location(),
                codes::INVALID_CONSTANT,
                format!("Invalid value for '{}'.", name),
            );
            false
        }
        Err(err) => {
            diags.error(
                value.location(),
                codes::INVALID_CONSTANT,
                format!("Invalid value for '{}': {}.", name, err),
            );
            false
        }
    }
}

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    InOut,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        }
    }
}

/// A method argument. The direction defaults to `in` when not written.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    variable: VariableDeclaration,
    direction: Direction,
    direction_specified: bool,
}

impl Argument {
    pub fn new(location: Location, ty: TypeSpecifier, name: impl Into<SmolStr>) -> Self {
        Self {
            variable: VariableDeclaration::new(location, ty, name),
            direction: Direction::In,
            direction_specified: false,
        }
    }

    pub fn with_direction(
        location: Location,
        direction: Direction,
        ty: TypeSpecifier,
        name: impl Into<SmolStr>,
    ) -> Self {
        Self {
            variable: VariableDeclaration::new(location, ty, name),
            direction,
            direction_specified: true,
        }
    }

    pub fn location(&self) -> &Location {
        self.variable.location()
    }

    pub fn name(&self) -> &str {
        self.variable.name()
    }

    pub fn type_specifier(&self) -> &TypeSpecifier {
        self.variable.type_specifier()
    }

    pub(crate) fn type_specifier_mut(&mut self) -> &mut TypeSpecifier {
        self.variable.type_specifier_mut()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_direction_specified(&self) -> bool {
        self.direction_specified
    }

    pub fn is_in(&self) -> bool {
        matches!(self.direction, Direction::In | Direction::InOut)
    }

    pub fn is_out(&self) -> bool {
        matches!(self.direction, Direction::Out | Direction::InOut)
    }

    /// The direction keyword as written, empty if none was.
    pub fn direction_specifier(&self) -> &'static str {
        if self.direction_specified {
            self.direction.as_str()
        } else {
            ""
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction_specified {
            write!(f, "{} ", self.direction.as_str())?;
        }
        write!(f, "{} {}", self.variable.ty, self.variable.name)
    }
}

// ============================================================================
// CONSTANTS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ConstantDeclaration {
    location: Location,
    ty: TypeSpecifier,
    name: SmolStr,
    value: ConstantValue,
}

impl ConstantDeclaration {
    pub fn new(location: Location, ty: TypeSpecifier, name: impl Into<SmolStr>, value: ConstantValue) -> Self {
        Self {
            location,
            ty,
            name: name.into(),
            value,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_specifier(&self) -> &TypeSpecifier {
        &self.ty
    }

    pub(crate) fn type_specifier_mut(&mut self) -> &mut TypeSpecifier {
        &mut self.ty
    }

    pub fn value(&self) -> &ConstantValue {
        &self.value
    }

    pub fn check_valid(
        &self,
        typenames: &Typenames,
        scope: &str,
        diags: &mut DiagnosticCollector,
    ) -> Fallible<bool> {
        if !self.ty.check_valid(typenames, diags)? {
            return Ok(false);
        }
        let signature = self.ty.signature();
        if !constants::CONSTANT_TYPES.contains(&signature.as_str()) {
            diags.error(
                &self.location,
                codes::INVALID_CONSTANT,
                format!("Constant of type {} is not supported.", signature),
            );
            return Ok(false);
        }
        Ok(check_value(
            &self.value,
            &self.ty,
            &self.name,
            typenames,
            scope,
            diags,
        ))
    }

    pub fn value_string(&self, env: &dyn ConstantEnv, scope: &str) -> String {
        self.value.value_string(&self.ty, env, scope, default_decorator)
    }

    /// `Type NAME`
    pub fn signature(&self) -> String {
        format!("{} {}", self.ty.signature(), self.name)
    }

    /// `const Type NAME = value`
    pub fn to_source(&self, env: &dyn ConstantEnv, scope: &str) -> String {
        format!(
            "const {} {} = {}",
            self.ty,
            self.name,
            self.value_string(env, scope)
        )
    }
}

// ============================================================================
// METHODS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Method {
    location: Location,
    oneway: bool,
    comments: String,
    return_type: TypeSpecifier,
    name: SmolStr,
    arguments: Vec<Argument>,
    id: Option<i32>,
    is_user_defined: bool,
}

impl Method {
    pub fn new(
        location: Location,
        oneway: bool,
        return_type: TypeSpecifier,
        name: impl Into<SmolStr>,
        arguments: Vec<Argument>,
    ) -> Self {
        Self {
            location,
            oneway,
            comments: String::new(),
            return_type,
            name: name.into(),
            arguments,
            id: None,
            is_user_defined: true,
        }
    }

    /// An implicit interface-meta method with a fixed transaction id.
    pub fn meta(location: Location, return_type: TypeSpecifier, name: impl Into<SmolStr>, id: i32) -> Self {
        Self {
            id: Some(id),
            is_user_defined: false,
            ..Self::new(location, false, return_type, name, Vec::new())
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub(crate) fn apply_interface_oneway(&mut self, oneway: bool) {
        self.oneway = self.oneway || oneway;
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_oneway(&self) -> bool {
        self.oneway
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn is_hidden(&self) -> bool {
        constants::has_hide_comment(&self.comments)
    }

    pub fn return_type(&self) -> &TypeSpecifier {
        &self.return_type
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn in_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| a.is_in())
    }

    pub fn out_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| a.is_out())
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn is_user_defined(&self) -> bool {
        self.is_user_defined
    }

    pub(crate) fn type_specifiers_mut(&mut self) -> impl Iterator<Item = &mut TypeSpecifier> {
        std::iter::once(&mut self.return_type)
            .chain(self.arguments.iter_mut().map(Argument::type_specifier_mut))
    }

    /// `name(T1, T2)`
    pub fn signature(&self) -> String {
        let args = self
            .arguments
            .iter()
            .map(|a| a.type_specifier().signature())
            .collect::<Vec<_>>();
        format!("{}({})", self.name, args.join(", "))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.oneway {
            f.write_str("oneway ")?;
        }
        let args = self.arguments.iter().map(|a| a.to_string()).collect::<Vec<_>>();
        write!(f, "{} {}({})", self.return_type, self.name, args.join(", "))?;
        if let Some(id) = self.id {
            write!(f, " = {}", id)?;
        }
        Ok(())
    }
}
