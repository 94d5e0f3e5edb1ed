use std::fmt;

use smol_str::SmolStr;

use super::typenames::{DefinedTypeId, Typenames};
use crate::annotations::{Annotatable, AnnotationType, Annotations};
use crate::base::{Location, constants};
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::error::{Fallible, InternalError};
use crate::model::DefinedTypeKind;
use crate::options::Backend;

/// Arena handle to the defined type a specifier resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DefinedTypeRef {
    pub id: DefinedTypeId,
    pub kind: DefinedTypeKind,
}

/// Outcome of a successful name lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub canonical_name: SmolStr,
    /// `None` for builtins and generic type parameters.
    pub defined_type: Option<DefinedTypeRef>,
}

impl Resolution {
    pub fn builtin(name: &str) -> Self {
        Self {
            canonical_name: SmolStr::new(name),
            defined_type: None,
        }
    }
}

/// Name lookup used while resolving specifiers.
pub trait TypeResolver {
    /// Resolve `name` as written at `location`. Problems other than
    /// "not found" (ambiguous imports) are reported into `diags`.
    fn resolve(
        &self,
        name: &str,
        location: &Location,
        diags: &mut DiagnosticCollector,
    ) -> Option<Resolution>;
}

/// The non-array part of a type reference: name, type parameters and
/// the resolution result.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeName {
    unresolved_name: SmolStr,
    type_parameters: Option<Vec<TypeSpecifier>>,
    resolution: Option<Resolution>,
}

impl TypeName {
    /// Canonical name once resolved, the name as written before.
    pub fn name(&self) -> &str {
        match &self.resolution {
            Some(resolution) => &resolution.canonical_name,
            None => &self.unresolved_name,
        }
    }

    pub fn simple_name(&self) -> &str {
        let name = self.name();
        name.rsplit('.').next().unwrap_or(name)
    }

    pub fn unresolved_name(&self) -> &str {
        &self.unresolved_name
    }

    pub fn type_parameters(&self) -> &[TypeSpecifier] {
        self.type_parameters.as_deref().unwrap_or_default()
    }

    pub fn is_generic(&self) -> bool {
        self.type_parameters.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    pub fn defined_type(&self) -> Option<DefinedTypeRef> {
        self.resolution.as_ref().and_then(|r| r.defined_type)
    }

    fn is_kind(&self, kind: DefinedTypeKind) -> bool {
        self.defined_type().is_some_and(|r| r.kind == kind)
    }

    pub fn is_enum(&self) -> bool {
        self.is_kind(DefinedTypeKind::Enum)
    }

    pub fn is_interface(&self) -> bool {
        self.is_kind(DefinedTypeKind::Interface)
    }

    /// Parcelable, structured parcelable or union.
    pub fn is_parcelable_like(&self) -> bool {
        self.defined_type().is_some_and(|r| r.kind.is_parcelable_like())
    }

    fn signature(&self) -> String {
        let mut sig = self.name().to_string();
        if let Some(params) = &self.type_parameters {
            let params = params.iter().map(TypeSpecifier::signature).collect::<Vec<_>>();
            sig.push('<');
            sig.push_str(&params.join(","));
            sig.push('>');
        }
        sig
    }
}

/// A reference to a type as written at one use site.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSpecifier {
    location: Location,
    base: TypeName,
    is_array: bool,
    annotations: Annotations,
    comments: String,
}

impl TypeSpecifier {
    /// An empty type parameter list is the same as none.
    pub fn new(
        location: Location,
        name: impl Into<SmolStr>,
        type_parameters: Option<Vec<TypeSpecifier>>,
        is_array: bool,
    ) -> Self {
        Self {
            location,
            base: TypeName {
                unresolved_name: name.into(),
                type_parameters: type_parameters.filter(|params| !params.is_empty()),
                resolution: None,
            },
            is_array,
            annotations: Annotations::default(),
            comments: String::new(),
        }
    }

    /// An already-resolved builtin, for specifiers synthesized internally.
    pub fn builtin(location: Location, name: &str) -> Self {
        let mut spec = Self::new(location, name, None, false);
        spec.base.resolution = Some(Resolution::builtin(name));
        spec
    }

    pub fn into_array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn base(&self) -> &TypeName {
        &self.base
    }

    /// Element type of an array specifier.
    pub fn array_base(&self) -> Fallible<&TypeName> {
        if !self.is_array {
            return Err(InternalError::NotAnArray {
                location: self.location.clone(),
                name: self.base.name().to_string(),
            });
        }
        Ok(&self.base)
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn simple_name(&self) -> &str {
        self.base.simple_name()
    }

    pub fn unresolved_name(&self) -> &str {
        self.base.unresolved_name()
    }

    pub fn type_parameters(&self) -> &[TypeSpecifier] {
        self.base.type_parameters()
    }

    pub fn is_generic(&self) -> bool {
        self.base.is_generic()
    }

    pub fn is_resolved(&self) -> bool {
        self.base.is_resolved()
    }

    pub fn defined_type(&self) -> Option<DefinedTypeRef> {
        self.base.defined_type()
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn is_hidden(&self) -> bool {
        constants::has_hide_comment(&self.comments)
    }

    pub fn is_nullable(&self) -> bool {
        self.annotations.is_nullable()
    }

    pub fn is_utf8_in_cpp(&self) -> bool {
        self.annotations.is_utf8_in_cpp()
    }

    pub fn canonical_name(&self) -> Fallible<&str> {
        match &self.base.resolution {
            Some(resolution) => Ok(&resolution.canonical_name),
            None => Err(InternalError::Unresolved {
                location: self.location.clone(),
                name: self.base.unresolved_name.to_string(),
            }),
        }
    }

    /// `Name<P1,P2>[]`, without annotations.
    pub fn signature(&self) -> String {
        let mut sig = self.base.signature();
        if self.is_array {
            sig.push_str("[]");
        }
        sig
    }

    /// Resolve this specifier and its type parameters. Resolving twice is
    /// an internal error.
    pub fn resolve(
        &mut self,
        resolver: &dyn TypeResolver,
        diags: &mut DiagnosticCollector,
    ) -> Fallible<bool> {
        if self.base.is_resolved() {
            return Err(InternalError::AlreadyResolved {
                location: self.location.clone(),
                name: self.base.name().to_string(),
            });
        }
        let mut success = true;
        match resolver.resolve(&self.base.unresolved_name, &self.location, diags) {
            Some(resolution) => {
                tracing::trace!(
                    "resolved '{}' to '{}'",
                    self.base.unresolved_name,
                    resolution.canonical_name
                );
                self.base.resolution = Some(resolution);
            }
            None => {
                diags.error(
                    &self.location,
                    codes::UNRESOLVED_TYPE,
                    format!("Failed to resolve '{}'", self.base.unresolved_name),
                );
                success = false;
            }
        }
        for param in self.base.type_parameters.iter_mut().flatten() {
            success &= param.resolve(resolver, diags)?;
        }
        Ok(success)
    }

    fn invalid(&self, diags: &mut DiagnosticCollector, code: &str, message: String) -> bool {
        diags.error(&self.location, code, message);
        false
    }

    /// Backend-independent validity.
    pub fn check_valid(&self, typenames: &Typenames, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        if !self.check_annotations(diags) {
            return Ok(false);
        }
        let name = self.canonical_name()?;

        if self.is_generic() {
            let mut params_valid = true;
            for param in self.type_parameters() {
                params_valid &= param.check_valid(typenames, diags)?;
            }
            if !params_valid {
                return Ok(false);
            }
            if !self.check_generic(name, typenames, diags) {
                return Ok(false);
            }
        }

        let is_generic_string_list = name == constants::LIST
            && self.type_parameters().len() == 1
            && self.type_parameters()[0].name() == constants::STRING;
        if self.is_utf8_in_cpp() && name != constants::STRING && !is_generic_string_list {
            return Ok(self.invalid(
                diags,
                codes::INVALID_TYPE,
                "@utf8InCpp can only be used on String, String[], and List<String>.".to_string(),
            ));
        }

        if name == constants::VOID && (self.is_array || self.is_nullable() || self.is_utf8_in_cpp()) {
            return Ok(self.invalid(
                diags,
                codes::INVALID_TYPE,
                "void type cannot be an array or nullable or utf8 string".to_string(),
            ));
        }

        if self.is_array {
            if self.base.is_interface() {
                return Ok(self.invalid(
                    diags,
                    codes::INVALID_TYPE,
                    "Binder type cannot be an array".to_string(),
                ));
            }
            if name == constants::PARCELABLE_HOLDER {
                return Ok(self.invalid(
                    diags,
                    codes::INVALID_TYPE,
                    "Arrays of ParcelableHolder are not supported.".to_string(),
                ));
            }
        }

        if self.is_nullable() {
            if constants::is_primitive(name) && !self.is_array {
                return Ok(self.invalid(
                    diags,
                    codes::INVALID_TYPE,
                    "Primitive type cannot get nullable annotation".to_string(),
                ));
            }
            if self.base.is_enum() && !self.is_array {
                return Ok(self.invalid(
                    diags,
                    codes::INVALID_TYPE,
                    "Enum type cannot get nullable annotation".to_string(),
                ));
            }
            if name == constants::PARCELABLE_HOLDER {
                return Ok(self.invalid(
                    diags,
                    codes::INVALID_TYPE,
                    "ParcelableHolder cannot be nullable.".to_string(),
                ));
            }
        }
        Ok(true)
    }

    fn check_generic(&self, name: &str, typenames: &Typenames, diags: &mut DiagnosticCollector) -> bool {
        let params = self.type_parameters();
        if name == constants::LIST || name == constants::MAP {
            let has_primitive = params
                .iter()
                .any(|p| p.base.is_enum() || constants::is_primitive(p.name()));
            if has_primitive {
                return self.invalid(
                    diags,
                    codes::INVALID_TYPE_PARAMETER,
                    "A generic type cannot have any primitive type parameters.".to_string(),
                );
            }
        }

        if name == constants::LIST {
            if params.len() != 1 {
                return self.invalid(
                    diags,
                    codes::INVALID_GENERIC,
                    format!("List can only have one type parameter, but got: '{}'", self.signature()),
                );
            }
            let contained = &params[0];
            let supported = if constants::is_builtin(contained.name()) {
                constants::LIST_BUILTIN_ELEMENTS.contains(&contained.name())
            } else {
                !contained.base.is_interface()
            };
            if !supported {
                return self.invalid(
                    diags,
                    codes::INVALID_TYPE_PARAMETER,
                    format!(
                        "List<{}> is not supported. List<T> supports parcelable/union, String, IBinder, and ParcelFileDescriptor.",
                        contained.name()
                    ),
                );
            }
            return true;
        }

        if name == constants::MAP {
            if params.len() != 2 {
                return self.invalid(
                    diags,
                    codes::INVALID_GENERIC,
                    format!("Map must have 0 or 2 type parameters, but got '{}'", self.signature()),
                );
            }
            let key = params[0].name();
            if key != constants::STRING {
                return self.invalid(
                    diags,
                    codes::INVALID_TYPE_PARAMETER,
                    format!("The type of key in map must be String, but it is '{}'", key),
                );
            }
            return true;
        }

        let declared = self
            .defined_type()
            .and_then(|r| typenames.defined_type(r.id))
            .and_then(|t| t.type_parameters());
        match declared {
            Some(declared) if declared.len() != params.len() => self.invalid(
                diags,
                codes::INVALID_GENERIC,
                format!(
                    "{} must have {} type parameters, but got {}",
                    name,
                    declared.len(),
                    params.len()
                ),
            ),
            Some(_) => true,
            None => self.invalid(
                diags,
                codes::INVALID_GENERIC,
                format!("{} is not a generic type.", name),
            ),
        }
    }

    /// Validity for one backend. Reads only; runs once per requested backend.
    pub fn language_specific_check_valid(
        &self,
        typenames: &Typenames,
        backend: Backend,
        diags: &mut DiagnosticCollector,
    ) -> bool {
        let name = self.name();
        let unsupported = |diags: &mut DiagnosticCollector, message: String| {
            diags.error(&self.location, codes::UNSUPPORTED_BY_BACKEND, message);
            false
        };

        if backend.is_native_stable() {
            if self.is_array && name == constants::IBINDER {
                return unsupported(
                    diags,
                    format!("The {} backend does not support array of IBinder", backend),
                );
            }
            if name == constants::PARCELABLE_HOLDER {
                return unsupported(
                    diags,
                    format!("The {} backend does not support ParcelableHolder yet.", backend),
                );
            }
            if self.is_array && self.is_nullable() {
                if name == constants::PARCEL_FILE_DESCRIPTOR {
                    return unsupported(
                        diags,
                        format!(
                            "The {} backend does not support nullable array of ParcelFileDescriptor",
                            backend
                        ),
                    );
                }
                if self.base.is_parcelable_like() {
                    return unsupported(
                        diags,
                        format!("The {} backend does not support nullable array of parcelable", backend),
                    );
                }
            }
            if name == constants::FILE_DESCRIPTOR {
                return unsupported(
                    diags,
                    format!("FileDescriptor isn't supported by the {} backend.", backend),
                );
            }
        }

        if backend == Backend::Ndk && name == constants::LIST {
            if let Some(contained) = self.type_parameters().first() {
                if typenames.get_interface(contained).is_some() {
                    return unsupported(
                        diags,
                        format!(
                            "List<{}> is not supported. List in NDK doesn't support interface.",
                            contained.name()
                        ),
                    );
                }
                if contained.name() == constants::IBINDER {
                    return unsupported(
                        diags,
                        format!(
                            "List<{}> is not supported. List in NDK doesn't support IBinder.",
                            contained.name()
                        ),
                    );
                }
            }
        }

        if self.is_array
            && matches!(name, constants::LIST | constants::MAP | constants::CHAR_SEQUENCE)
        {
            return unsupported(diags, format!("{}[] is not supported.", name));
        }

        if backend != Backend::Java {
            if name == constants::LIST && !self.is_generic() {
                return unsupported(
                    diags,
                    "Currently, only the Java backend supports non-generic List.".to_string(),
                );
            }
            if name == constants::MAP || name == constants::CHAR_SEQUENCE {
                return unsupported(
                    diags,
                    format!("Currently, only Java backend supports {}.", name),
                );
            }
        }
        true
    }
}

const SUPPORTED_ANNOTATIONS: &[AnnotationType] = &[
    AnnotationType::Nullable,
    AnnotationType::Utf8InCpp,
    AnnotationType::UnsupportedAppUsage,
    AnnotationType::Hide,
    AnnotationType::JavaPassthrough,
];

impl Annotatable for TypeSpecifier {
    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn supported_annotations(&self) -> &'static [AnnotationType] {
        SUPPORTED_ANNOTATIONS
    }

    fn location(&self) -> &Location {
        &self.location
    }
}

impl fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.annotations.is_empty() {
            write!(f, "{} ", self.annotations)?;
        }
        f.write_str(&self.signature())
    }
}
