use smol_str::SmolStr;

use super::defined::{Members, TypeHeader, impl_annotatable};
use super::writer::CodeWriter;
use crate::annotations::{Annotatable, AnnotationType};
use crate::base::{Location, constants};
use crate::consts::{BinaryOp, ConstantEnv, ConstantValue, default_decorator};
use crate::diagnostics::{DiagnosticCollector, DiagnosticId, codes};
use crate::error::{Fallible, InternalError};
use crate::types::{TypeResolver, TypeSpecifier, Typenames};

/// One named member of an enum.
#[derive(Clone, Debug, PartialEq)]
pub struct Enumerator {
    location: Location,
    name: SmolStr,
    value: Option<ConstantValue>,
    value_user_specified: bool,
    comments: String,
}

impl Enumerator {
    pub fn new(location: Location, name: impl Into<SmolStr>, value: Option<ConstantValue>) -> Self {
        Self {
            location,
            name: name.into(),
            value_user_specified: value.is_some(),
            value,
            comments: String::new(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&ConstantValue> {
        self.value.as_ref()
    }

    pub fn is_value_user_specified(&self) -> bool {
        self.value_user_specified
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    fn check_valid(
        &self,
        backing_type: &TypeSpecifier,
        typenames: &Typenames,
        scope: &str,
        diags: &mut DiagnosticCollector,
    ) -> bool {
        let Some(value) = &self.value else {
            return false;
        };
        if !value.check_valid() {
            diags.error(
                value.location(),
                codes::INVALID_CONSTANT,
                format!("Invalid value for enumerator '{}'.", self.name),
            );
            return false;
        }
        if self.value_string(backing_type, typenames, scope).is_empty() {
            diags.error(
                &self.location,
                codes::INVALID_ENUM,
                "Enumerator type differs from enum backing type.",
            );
            return false;
        }
        true
    }

    pub fn value_string(&self, backing_type: &TypeSpecifier, env: &dyn ConstantEnv, scope: &str) -> String {
        self.value
            .as_ref()
            .map(|v| v.value_string(backing_type, env, scope, default_decorator))
            .unwrap_or_default()
    }
}

/// An enum: enumerators over an integral backing type.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDeclaration {
    header: TypeHeader,
    enumerators: Vec<Enumerator>,
    backing_type: Option<TypeSpecifier>,
    members: Members,
}

const ENUM_ANNOTATIONS: &[AnnotationType] = &[
    AnnotationType::VintfStability,
    AnnotationType::Backing,
    AnnotationType::Hide,
    AnnotationType::JavaPassthrough,
];

impl_annotatable!(EnumDeclaration, ENUM_ANNOTATIONS);

impl EnumDeclaration {
    /// Enumerators without a value get `0` (first) or `<previous> + 1`.
    /// This runs before resolution since later values may name earlier
    /// enumerators.
    pub fn new(header: TypeHeader, mut enumerators: Vec<Enumerator>) -> Self {
        let mut previous: Option<SmolStr> = None;
        for enumerator in &mut enumerators {
            if enumerator.value.is_none() {
                let loc = enumerator.location.clone();
                enumerator.value = Some(match &previous {
                    None => ConstantValue::integral(loc, "0"),
                    Some(prev) => ConstantValue::binary(
                        loc.clone(),
                        ConstantValue::reference(loc.clone(), prev.clone()),
                        BinaryOp::Add,
                        ConstantValue::integral(loc, "1"),
                    ),
                });
            }
            previous = Some(enumerator.name.clone());
        }
        Self {
            header,
            enumerators,
            backing_type: None,
            members: Members::default(),
        }
    }

    /// Non-enumerator members. Enums reject all of them.
    pub fn with_members(mut self, members: Members) -> Self {
        self.members = members;
        self
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    pub fn enumerators(&self) -> &[Enumerator] {
        &self.enumerators
    }

    pub fn enumerator(&self, name: &str) -> Option<&Enumerator> {
        self.enumerators.iter().find(|e| e.name == name)
    }

    /// Set by [`autofill`](Self::autofill).
    pub fn backing_type(&self) -> Option<&TypeSpecifier> {
        self.backing_type.as_ref()
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    /// Pick and resolve the backing type: `@Backing(type=...)`, else `byte`.
    ///
    /// A backing type that fails to resolve is reported, but autofill still
    /// succeeds and leaves the failure to validation.
    pub fn autofill(&mut self, resolver: &dyn TypeResolver, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        let mut backing = match self.header.annotations().get(AnnotationType::Backing) {
            Some(annotation) => {
                if !annotation.check_valid(diags) {
                    return Ok(false);
                }
                let ty = annotation.param_string("type").ok_or_else(|| {
                    InternalError::invariant(annotation.location(), "@Backing has no 'type' after validation")
                })?;
                TypeSpecifier::new(annotation.location().clone(), ty, None, false)
            }
            None => TypeSpecifier::new(
                Location::internal("<default backing type>"),
                constants::DEFAULT_ENUM_BACKING_TYPE,
                None,
                false,
            ),
        };

        let mut scratch = diags.fork();
        if !backing.resolve(resolver, &mut scratch)? {
            diags.error(
                self.header.location(),
                codes::INVALID_ENUM,
                format!("Invalid backing type: {}", backing.name()),
            );
        }
        tracing::trace!("enum '{}' backed by '{}'", self.header.canonical_name(), backing.name());
        self.backing_type = Some(backing);
        Ok(true)
    }

    pub fn check_valid(&self, typenames: &Typenames, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        if !self.check_annotations(diags) {
            return Ok(false);
        }
        if !self.members.is_empty() {
            diags.error(
                self.header.location(),
                codes::INVALID_ENUM,
                "Enum doesn't support fields/constants/methods.",
            );
            return Ok(false);
        }
        let Some(backing_type) = &self.backing_type else {
            diags.error(
                self.header.location(),
                codes::INVALID_ENUM,
                "Enum declaration missing backing type.",
            );
            return Ok(false);
        };

        let scope = self.header.canonical_name();
        let mut success = true;
        for enumerator in &self.enumerators {
            success &= enumerator.check_valid(backing_type, typenames, scope, diags);
        }
        if !success {
            return Ok(false);
        }

        let Some(first) = self.enumerators.first() else {
            return Err(InternalError::invariant(
                self.header.location(),
                format!("The enum '{}' has no enumerators.", self.header.name()),
            ));
        };
        let first_value = first.value_string(backing_type, typenames, scope);
        if first_value != "0" {
            diags.report(
                DiagnosticId::EnumZero,
                first.location(),
                format!(
                    "The first enumerator '{}' should be 0, but it is {}.",
                    first.name(),
                    first_value
                ),
            );
        }
        Ok(true)
    }

    pub fn dump(&self, env: &dyn ConstantEnv, writer: &mut CodeWriter) {
        self.header.dump(writer);
        writer.write_line(&format!("enum {} {{", self.header.name()));
        writer.indent();
        let scope = self.header.canonical_name();
        for enumerator in &self.enumerators {
            let value = match &self.backing_type {
                Some(backing) => enumerator.value_string(backing, env, scope),
                None => enumerator.value.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            };
            writer.write_line(&format!("{} = {},", enumerator.name(), value));
        }
        writer.dedent();
        writer.write_line("}");
    }
}
