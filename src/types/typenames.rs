//! The type registry: every document added to a run, and name lookup over
//! the types they define.
//!
//! # Architecture
//!
//! 1. **Arena** - `Typenames` owns each [`Document`]; a [`DefinedTypeId`]
//!    is a (document, index) pair into it
//! 2. **Index** - canonical name to [`DefinedTypeRef`], in insertion order
//! 3. **Scopes** - resolution of one document goes through an `ImportScope`
//!    (type parameters, then imports, then the index)
//!
//! Resolution and autofill take `&mut self`; every check afterwards only
//! reads, which lets per-backend checks share the registry across threads.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::specifier::{DefinedTypeRef, Resolution, TypeResolver, TypeSpecifier};
use crate::base::{Location, constants};
use crate::consts::{ConstantEnv, ResolvedConstant};
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::error::{Fallible, InternalError};
use crate::model::{
    DefinedType, DefinedTypeKind, Document, EnumDeclaration, Import, Interface, resolve_name_in,
};

// ============================================================================
// IDS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u32);

impl DocumentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A defined type: its document and its position in that document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinedTypeId {
    pub document: DocumentId,
    pub index: u32,
}

// ============================================================================
// INDEX
// ============================================================================

#[derive(Clone, Debug, Default)]
struct TypeIndex {
    types: IndexMap<SmolStr, DefinedTypeRef>,
}

impl TypeIndex {
    /// `package.name` first, so a type in the enclosing package wins, then
    /// the name as a canonical name. Types of other packages need an import
    /// or a qualified name.
    fn lookup(&self, name: &str, package: &str) -> Option<(&SmolStr, DefinedTypeRef)> {
        if !package.is_empty() {
            let qualified = format!("{}.{}", package, name);
            if let Some((canonical, target)) = self.types.get_key_value(qualified.as_str()) {
                return Some((canonical, *target));
            }
        }
        self.types
            .get_key_value(name)
            .map(|(canonical, target)| (canonical, *target))
    }

    fn resolve_typename(&self, name: &str, package: &str) -> Option<Resolution> {
        if constants::is_builtin(name) {
            return Some(Resolution::builtin(name));
        }
        self.lookup(name, package).map(|(canonical, target)| Resolution {
            canonical_name: canonical.clone(),
            defined_type: Some(target),
        })
    }
}

/// Names visible inside one defined type of one document.
struct ImportScope<'a> {
    index: &'a TypeIndex,
    imports: &'a [Import],
    package: &'a str,
    type_parameters: &'a [SmolStr],
}

impl TypeResolver for ImportScope<'_> {
    fn resolve(&self, name: &str, _location: &Location, diags: &mut DiagnosticCollector) -> Option<Resolution> {
        if self.type_parameters.iter().any(|p| p == name) {
            return Some(Resolution::builtin(name));
        }
        let name = resolve_name_in(self.imports, name, diags)?;
        self.index.resolve_typename(&name, self.package)
    }
}

// ============================================================================
// TYPENAMES
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct Typenames {
    index: TypeIndex,
    documents: Vec<Document>,
}

impl Typenames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document and every type it defines. A canonical name that
    /// is already taken is reported and the later type stays unindexed.
    pub fn add_document(&mut self, document: Document, diags: &mut DiagnosticCollector) -> DocumentId {
        let id = DocumentId(self.documents.len() as u32);
        for (index, defined) in document.defined_types().iter().enumerate() {
            let name = defined.canonical_name();
            if let Some(previous) = self.index.types.get(name) {
                let previous_location = self
                    .defined_type(previous.id)
                    .map(|t| t.header().location().clone())
                    .unwrap_or_else(|| Location::internal("<unknown>"));
                diags.duplicate_definition(
                    defined.header().location(),
                    &previous_location,
                    codes::DUPLICATE_TYPE,
                    format!("redefinition of type '{}'", name),
                );
                continue;
            }
            let target = DefinedTypeRef {
                id: DefinedTypeId {
                    document: id,
                    index: index as u32,
                },
                kind: defined.kind(),
            };
            tracing::trace!("registered {} '{}'", defined.kind().keyword(), name);
            self.index.types.insert(SmolStr::new(name), target);
        }
        self.documents.push(document);
        id
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id.index())
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Builtins resolve to themselves, everything else by canonical name.
    pub fn resolve_typename(&self, name: &str) -> Option<Resolution> {
        self.index.resolve_typename(name, "")
    }

    /// Resolve `name` as written inside `package`, without imports.
    pub fn resolve_typename_in(&self, package: &str, name: &str) -> Option<Resolution> {
        self.index.resolve_typename(name, package)
    }

    pub fn try_get_defined_type(&self, name: &str) -> Option<&DefinedType> {
        self.try_get_defined_type_in("", name)
    }

    pub fn try_get_defined_type_in(&self, package: &str, name: &str) -> Option<&DefinedType> {
        self.index
            .lookup(name, package)
            .and_then(|(_, target)| self.defined_type(target.id))
    }

    pub fn defined_type(&self, id: DefinedTypeId) -> Option<&DefinedType> {
        self.documents
            .get(id.document.index())?
            .defined_types()
            .get(id.index as usize)
    }

    /// Every indexed type, in registration order.
    pub fn defined_types(&self) -> impl Iterator<Item = &DefinedType> {
        self.index
            .types
            .values()
            .filter_map(|target| self.defined_type(target.id))
    }

    fn defined_type_of(&self, ty: &TypeSpecifier, kind: DefinedTypeKind) -> Option<&DefinedType> {
        ty.defined_type()
            .filter(|target| target.kind == kind)
            .and_then(|target| self.defined_type(target.id))
    }

    pub fn get_interface(&self, ty: &TypeSpecifier) -> Option<&Interface> {
        self.defined_type_of(ty, DefinedTypeKind::Interface)
            .and_then(DefinedType::as_interface)
    }

    pub fn get_enum_declaration(&self, ty: &TypeSpecifier) -> Option<&EnumDeclaration> {
        self.defined_type_of(ty, DefinedTypeKind::Enum)
            .and_then(DefinedType::as_enum)
    }

    pub fn is_primitive_typename(&self, name: &str) -> bool {
        constants::is_primitive(name)
    }

    pub fn is_builtin_typename(&self, name: &str) -> bool {
        constants::is_builtin(name)
    }

    /// Whether an argument of this type may be `out`/`inout`, and if not,
    /// what about the type prevents it.
    pub fn can_be_out_parameter(&self, ty: &TypeSpecifier) -> Fallible<(bool, String)> {
        let name = ty.canonical_name()?;
        if constants::is_builtin(name) || ty.base().is_enum() {
            let can_be_out = ty.is_array()
                || matches!(
                    name,
                    constants::LIST | constants::MAP | constants::PARCEL_FILE_DESCRIPTOR
                );
            let aspect = if ty.base().is_enum() {
                "Enum type".to_string()
            } else {
                format!("'{}'", name)
            };
            return Ok((can_be_out, aspect));
        }

        let Some(target) = ty.defined_type() else {
            // Generic type parameter.
            return Ok((false, format!("'{}'", name)));
        };
        let defined = self.defined_type(target.id).ok_or_else(|| InternalError::UnknownType {
            location: ty.location().clone(),
            name: name.to_string(),
        })?;
        if defined.kind() == DefinedTypeKind::Interface {
            return Ok((false, "interface".to_string()));
        }
        if defined.header().annotations().is_java_only_immutable() {
            return Ok((false, "@JavaOnlyImmutable".to_string()));
        }
        Ok((true, String::new()))
    }

    /// Primitives, enums and `@FixedSize` parcelables, never nullable,
    /// generic or array.
    pub fn can_be_fixed_size(&self, ty: &TypeSpecifier) -> bool {
        if ty.is_generic() || ty.is_nullable() || ty.is_array() {
            return false;
        }
        if constants::is_primitive(ty.name()) {
            return true;
        }
        let Some(defined) = ty.defined_type().and_then(|target| self.defined_type(target.id)) else {
            return false;
        };
        match defined.kind() {
            DefinedTypeKind::Enum => true,
            DefinedTypeKind::StructuredParcelable | DefinedTypeKind::Union => {
                defined.header().annotations().is_fixed_size()
            }
            DefinedTypeKind::Parcelable | DefinedTypeKind::Interface => false,
        }
    }

    pub fn can_be_java_only_immutable(&self, ty: &TypeSpecifier) -> bool {
        let name = ty.name();
        if ty.is_generic() {
            return (name == constants::LIST || name == constants::MAP)
                && ty
                    .type_parameters()
                    .iter()
                    .all(|param| self.can_be_java_only_immutable(param));
        }
        if constants::is_builtin(name) {
            return true;
        }
        match ty.defined_type().and_then(|target| self.defined_type(target.id)) {
            Some(defined) if defined.kind() == DefinedTypeKind::Enum => true,
            Some(defined) => defined.header().annotations().is_java_only_immutable(),
            None => false,
        }
    }

    fn document_mut(&mut self, id: DocumentId) -> Fallible<(&TypeIndex, &mut Document)> {
        let Typenames { index, documents } = self;
        let document = documents.get_mut(id.index()).ok_or_else(|| {
            InternalError::invariant(&Location::internal("<typenames>"), format!("unknown document {:?}", id))
        })?;
        Ok((index, document))
    }

    /// Resolve every type specifier in the document. All failures are
    /// reported before returning.
    pub fn resolve_document(&mut self, id: DocumentId, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        let (index, document) = self.document_mut(id)?;
        let (imports, types) = document.split_mut();
        let mut success = true;
        for defined in types.iter_mut() {
            let type_parameters = defined.type_parameters().map(<[SmolStr]>::to_vec).unwrap_or_default();
            let package = SmolStr::new(defined.header().package());
            let scope = ImportScope {
                index,
                imports,
                package: &package,
                type_parameters: &type_parameters,
            };
            for spec in defined.type_specifiers_mut() {
                success &= spec.resolve(&scope, diags)?;
            }
        }
        Ok(success)
    }

    /// Fill in what can only be known after resolution: enum backing types.
    pub fn autofill_document(&mut self, id: DocumentId, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        let (index, document) = self.document_mut(id)?;
        let (imports, types) = document.split_mut();
        let mut success = true;
        for enum_decl in types.iter_mut().filter_map(DefinedType::as_enum_mut) {
            let package = SmolStr::new(enum_decl.header().package());
            let scope = ImportScope {
                index,
                imports,
                package: &package,
                type_parameters: &[],
            };
            success &= enum_decl.autofill(&scope, diags)?;
        }
        Ok(success)
    }
}

impl ConstantEnv for Typenames {
    fn lookup_constant(&self, scope: &str, name: &str) -> Option<ResolvedConstant<'_>> {
        let package = scope.rsplit_once('.').map_or("", |(package, _)| package);
        let (target, member) = match name.rsplit_once('.') {
            Some((type_name, member)) => (self.try_get_defined_type_in(package, type_name)?, member),
            None => (self.try_get_defined_type(scope)?, name),
        };

        if let Some(enum_decl) = target.as_enum() {
            let enumerator = enum_decl.enumerator(member)?;
            return Some(ResolvedConstant {
                value: enumerator.value()?,
                ty: enum_decl.backing_type()?,
                scope: target.canonical_name(),
            });
        }

        target
            .constants()
            .iter()
            .find(|constant| constant.name() == member)
            .map(|constant| ResolvedConstant {
                value: constant.value(),
                ty: constant.type_specifier(),
                scope: target.canonical_name(),
            })
    }

    fn is_enumerator(&self, enum_type: DefinedTypeId, name: &str) -> bool {
        self.defined_type(enum_type)
            .and_then(DefinedType::as_enum)
            .is_some_and(|decl| decl.enumerator(name).is_some())
    }
}
