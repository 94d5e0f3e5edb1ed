//! The closed set of defined types and the checks they share.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::enums::EnumDeclaration;
use super::interface::Interface;
use super::members::{ConstantDeclaration, Method, VariableDeclaration};
use super::parcelable::{Parcelable, StructuredParcelable};
use super::union::UnionDecl;
use super::writer::CodeWriter;
use crate::annotations::{Annotatable, AnnotationType, Annotations};
use crate::base::{Location, constants};
use crate::consts::ConstantEnv;
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::error::Fallible;
use crate::options::Backend;
use crate::types::{TypeSpecifier, Typenames};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefinedTypeKind {
    Parcelable,
    StructuredParcelable,
    Union,
    Enum,
    Interface,
}

impl DefinedTypeKind {
    /// Parcelable, structured parcelable or union.
    pub fn is_parcelable_like(self) -> bool {
        matches!(
            self,
            DefinedTypeKind::Parcelable | DefinedTypeKind::StructuredParcelable | DefinedTypeKind::Union
        )
    }

    pub fn keyword(self) -> &'static str {
        match self {
            DefinedTypeKind::Parcelable | DefinedTypeKind::StructuredParcelable => "parcelable",
            DefinedTypeKind::Union => "union",
            DefinedTypeKind::Enum => "enum",
            DefinedTypeKind::Interface => "interface",
        }
    }
}

/// Name, package, comments and annotations of a defined type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeHeader {
    location: Location,
    name: SmolStr,
    package: SmolStr,
    canonical_name: SmolStr,
    comments: String,
    annotations: Annotations,
}

impl TypeHeader {
    pub fn new(location: Location, package: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        let name = name.into();
        let package = package.into();
        let canonical_name = if package.is_empty() {
            name.clone()
        } else {
            SmolStr::new(format!("{}.{}", package, name))
        };
        Self {
            location,
            name,
            package,
            canonical_name,
            comments: String::new(),
            annotations: Annotations::default(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// `package.Name`, or `Name` without a package.
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn is_hidden(&self) -> bool {
        constants::has_hide_comment(&self.comments)
    }

    pub(crate) fn dump(&self, writer: &mut CodeWriter) {
        if self.is_hidden() {
            writer.write_hide_comment();
        }
        if !self.annotations.is_empty() {
            writer.write_line(&self.annotations.to_string());
        }
    }
}

/// Fields, constants and methods of a defined type, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Members {
    pub fields: Vec<VariableDeclaration>,
    pub constants: Vec<ConstantDeclaration>,
    pub methods: Vec<Method>,
}

impl Members {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: VariableDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_constant(mut self, constant: ConstantDeclaration) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.constants.is_empty() && self.methods.is_empty()
    }

    pub(crate) fn type_specifiers_mut(&mut self) -> Vec<&mut TypeSpecifier> {
        let mut specs: Vec<&mut TypeSpecifier> = Vec::new();
        specs.extend(self.fields.iter_mut().map(VariableDeclaration::type_specifier_mut));
        specs.extend(self.constants.iter_mut().map(ConstantDeclaration::type_specifier_mut));
        for method in &mut self.methods {
            specs.extend(method.type_specifiers_mut());
        }
        specs
    }
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum DefinedType {
    Parcelable(Parcelable),
    StructuredParcelable(StructuredParcelable),
    Union(UnionDecl),
    Enum(EnumDeclaration),
    Interface(Interface),
}

impl DefinedType {
    pub fn header(&self) -> &TypeHeader {
        match self {
            DefinedType::Parcelable(t) => t.header(),
            DefinedType::StructuredParcelable(t) => t.header(),
            DefinedType::Union(t) => t.header(),
            DefinedType::Enum(t) => t.header(),
            DefinedType::Interface(t) => t.header(),
        }
    }

    pub fn kind(&self) -> DefinedTypeKind {
        match self {
            DefinedType::Parcelable(_) => DefinedTypeKind::Parcelable,
            DefinedType::StructuredParcelable(_) => DefinedTypeKind::StructuredParcelable,
            DefinedType::Union(_) => DefinedTypeKind::Union,
            DefinedType::Enum(_) => DefinedTypeKind::Enum,
            DefinedType::Interface(_) => DefinedTypeKind::Interface,
        }
    }

    pub fn name(&self) -> &str {
        self.header().name()
    }

    pub fn canonical_name(&self) -> &str {
        self.header().canonical_name()
    }

    pub fn is_hidden(&self) -> bool {
        self.header().is_hidden()
    }

    /// Declared type parameters of a generic parcelable or union.
    pub fn type_parameters(&self) -> Option<&[SmolStr]> {
        match self {
            DefinedType::Parcelable(t) => t.type_parameters(),
            DefinedType::StructuredParcelable(t) => t.type_parameters(),
            DefinedType::Union(t) => t.type_parameters(),
            DefinedType::Enum(_) | DefinedType::Interface(_) => None,
        }
    }

    fn members(&self) -> Option<&Members> {
        match self {
            DefinedType::Parcelable(_) => None,
            DefinedType::StructuredParcelable(t) => Some(t.members()),
            DefinedType::Union(t) => Some(t.members()),
            DefinedType::Enum(t) => Some(t.members()),
            DefinedType::Interface(t) => Some(t.members()),
        }
    }

    pub fn fields(&self) -> &[VariableDeclaration] {
        self.members().map(|m| m.fields.as_slice()).unwrap_or_default()
    }

    pub fn constants(&self) -> &[ConstantDeclaration] {
        self.members().map(|m| m.constants.as_slice()).unwrap_or_default()
    }

    pub fn methods(&self) -> &[Method] {
        self.members().map(|m| m.methods.as_slice()).unwrap_or_default()
    }

    pub fn as_enum(&self) -> Option<&EnumDeclaration> {
        match self {
            DefinedType::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn as_enum_mut(&mut self) -> Option<&mut EnumDeclaration> {
        match self {
            DefinedType::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            DefinedType::Interface(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_structured_parcelable(&self) -> Option<&StructuredParcelable> {
        match self {
            DefinedType::StructuredParcelable(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionDecl> {
        match self {
            DefinedType::Union(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_unstructured_parcelable(&self) -> Option<&Parcelable> {
        match self {
            DefinedType::Parcelable(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn type_specifiers_mut(&mut self) -> Vec<&mut TypeSpecifier> {
        match self {
            DefinedType::Parcelable(_) => Vec::new(),
            DefinedType::StructuredParcelable(t) => t.members_mut().type_specifiers_mut(),
            DefinedType::Union(t) => t.members_mut().type_specifiers_mut(),
            DefinedType::Enum(t) => t.members_mut().type_specifiers_mut(),
            DefinedType::Interface(t) => t.members_mut().type_specifiers_mut(),
        }
    }

    /// Backend-independent validity.
    pub fn check_valid(&self, typenames: &Typenames, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        tracing::trace!("checking {} '{}'", self.kind().keyword(), self.canonical_name());
        match self {
            DefinedType::Parcelable(t) => Ok(t.check_valid(diags)),
            DefinedType::StructuredParcelable(t) => t.check_valid(typenames, diags),
            DefinedType::Union(t) => t.check_valid(typenames, diags),
            DefinedType::Enum(t) => t.check_valid(typenames, diags),
            DefinedType::Interface(t) => t.check_valid(typenames, diags),
        }
    }

    /// Validity for one backend; requires a successful [`check_valid`](Self::check_valid).
    pub fn language_specific_check_valid(
        &self,
        typenames: &Typenames,
        backend: Backend,
        diags: &mut DiagnosticCollector,
    ) -> bool {
        match self {
            DefinedType::Parcelable(t) => t.language_specific_check_valid(backend, diags),
            DefinedType::StructuredParcelable(t) => {
                t.language_specific_check_valid(typenames, backend, diags)
            }
            DefinedType::Union(t) => t.language_specific_check_valid(typenames, backend, diags),
            DefinedType::Enum(_) => true,
            DefinedType::Interface(t) => t.language_specific_check_valid(typenames, backend, diags),
        }
    }

    pub fn dump_to(&self, env: &dyn ConstantEnv, writer: &mut CodeWriter) {
        match self {
            DefinedType::Parcelable(t) => t.dump(writer),
            DefinedType::StructuredParcelable(t) => t.dump(env, writer),
            DefinedType::Union(t) => t.dump(env, writer),
            DefinedType::Enum(t) => t.dump(env, writer),
            DefinedType::Interface(t) => t.dump(env, writer),
        }
    }

    /// Declaration source for this type.
    pub fn dump(&self, env: &dyn ConstantEnv) -> String {
        let mut writer = CodeWriter::new();
        self.dump_to(env, &mut writer);
        writer.finish()
    }
}

impl Annotatable for DefinedType {
    fn annotations(&self) -> &Annotations {
        self.header().annotations()
    }

    fn supported_annotations(&self) -> &'static [AnnotationType] {
        match self {
            DefinedType::Parcelable(t) => t.supported_annotations(),
            DefinedType::StructuredParcelable(t) => t.supported_annotations(),
            DefinedType::Union(t) => t.supported_annotations(),
            DefinedType::Enum(t) => t.supported_annotations(),
            DefinedType::Interface(t) => t.supported_annotations(),
        }
    }

    fn location(&self) -> &Location {
        self.header().location()
    }
}

macro_rules! impl_annotatable {
    ($ty:ty, $supported:expr) => {
        impl $crate::annotations::Annotatable for $ty {
            fn annotations(&self) -> &$crate::annotations::Annotations {
                self.header().annotations()
            }

            fn supported_annotations(&self) -> &'static [$crate::annotations::AnnotationType] {
                $supported
            }

            fn location(&self) -> &$crate::base::Location {
                self.header().location()
            }
        }
    };
}

pub(crate) use impl_annotatable;

// ============================================================================
// SHARED CHECKS
// ============================================================================

/// Field validity, unique field names, immutable fields and constants.
pub(crate) fn check_members(
    header: &TypeHeader,
    members: &Members,
    typenames: &Typenames,
    diags: &mut DiagnosticCollector,
) -> Fallible<bool> {
    let scope = header.canonical_name();
    let mut success = true;
    for field in &members.fields {
        success &= field.check_valid(typenames, scope, diags)?;
    }

    let mut seen: FxHashMap<&str, &Location> = FxHashMap::default();
    for field in &members.fields {
        if let Some(previous) = seen.get(field.name()) {
            diags.duplicate_definition(
                field.location(),
                previous,
                codes::DUPLICATE_FIELD,
                format!("'{}' has duplicate field name '{}'", header.name(), field.name()),
            );
            success = false;
        } else {
            seen.insert(field.name(), field.location());
        }
    }

    if header.annotations().is_java_only_immutable() {
        for field in &members.fields {
            if !typenames.can_be_java_only_immutable(field.type_specifier()) {
                diags.error(
                    field.location(),
                    codes::MUTABLE_FIELD,
                    format!(
                        "The @JavaOnlyImmutable '{}' has a non-immutable field named '{}'.",
                        header.name(),
                        field.name()
                    ),
                );
                success = false;
            }
        }
    }

    success &= check_constants(header, &members.constants, typenames, diags)?;
    Ok(success)
}

/// Unique constant names, each constant valid.
pub(crate) fn check_constants(
    header: &TypeHeader,
    constants: &[ConstantDeclaration],
    typenames: &Typenames,
    diags: &mut DiagnosticCollector,
) -> Fallible<bool> {
    let mut success = true;
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for constant in constants {
        if !seen.insert(constant.name()) {
            diags.error(
                constant.location(),
                codes::DUPLICATE_CONSTANT,
                format!("Found duplicate constant name '{}'", constant.name()),
            );
            success = false;
        }
        success &= constant.check_valid(typenames, header.canonical_name(), diags)?;
    }
    Ok(success)
}

/// Field names must stay unique once capitalized for getters.
pub(crate) fn check_getter_names(
    header: &TypeHeader,
    fields: &[VariableDeclaration],
    diags: &mut DiagnosticCollector,
) -> bool {
    let mut success = true;
    let mut getters: FxHashSet<String> = FxHashSet::default();
    for field in fields {
        if !getters.insert(field.capitalized_name()) {
            diags.error(
                field.location(),
                codes::DUPLICATE_GETTER,
                format!(
                    "'{}' has duplicate field name '{}' after capitalizing the first letter",
                    header.name(),
                    field.name()
                ),
            );
            success = false;
        }
    }
    success
}

pub(crate) fn check_type_parameters(
    header: &TypeHeader,
    params: Option<&[SmolStr]>,
    diags: &mut DiagnosticCollector,
) -> bool {
    let Some(params) = params else {
        return true;
    };
    let unique: FxHashSet<&SmolStr> = params.iter().collect();
    if unique.len() != params.len() {
        diags.error(
            header.location(),
            codes::INVALID_GENERIC,
            "Every type parameter should be unique.",
        );
        return false;
    }
    true
}

/// Per-backend check of every field type.
pub(crate) fn check_fields_for_backend(
    fields: &[VariableDeclaration],
    typenames: &Typenames,
    backend: Backend,
    diags: &mut DiagnosticCollector,
) -> bool {
    let mut success = true;
    for field in fields {
        success &= field
            .type_specifier()
            .language_specific_check_valid(typenames, backend, diags);
    }
    success
}

/// Write fields and constants of a parcelable-like body.
pub(crate) fn dump_body(
    header: &TypeHeader,
    members: &Members,
    env: &dyn ConstantEnv,
    writer: &mut CodeWriter,
) {
    let scope = header.canonical_name();
    for field in &members.fields {
        if field.type_specifier().is_hidden() {
            writer.write_hide_comment();
        }
        writer.write_line(&format!("{};", field.to_source(env, scope)));
    }
    dump_constants(header, &members.constants, env, writer);
}

pub(crate) fn dump_constants(
    header: &TypeHeader,
    constants: &[ConstantDeclaration],
    env: &dyn ConstantEnv,
    writer: &mut CodeWriter,
) {
    for constant in constants {
        if constant.type_specifier().is_hidden() {
            writer.write_hide_comment();
        }
        writer.write_line(&format!(
            "{};",
            constant.to_source(env, header.canonical_name())
        ));
    }
}
