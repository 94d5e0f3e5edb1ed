use std::fmt;

use rustc_hash::FxHashMap;

use super::annotation::Annotation;
use super::schema::{self, AnnotationType};
use crate::base::Location;
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::options::Backend;

/// The annotations attached to one node, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self(annotations)
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First annotation of `kind`.
    pub fn get(&self, kind: AnnotationType) -> Option<&Annotation> {
        self.0.iter().find(|a| a.kind() == kind)
    }

    pub fn has(&self, kind: AnnotationType) -> bool {
        self.get(kind).is_some()
    }

    pub fn is_nullable(&self) -> bool {
        self.has(AnnotationType::Nullable)
    }

    pub fn is_utf8_in_cpp(&self) -> bool {
        self.has(AnnotationType::Utf8InCpp)
    }

    pub fn is_sensitive_data(&self) -> bool {
        self.has(AnnotationType::SensitiveData)
    }

    pub fn is_vintf_stability(&self) -> bool {
        self.has(AnnotationType::VintfStability)
    }

    pub fn is_java_only_immutable(&self) -> bool {
        self.has(AnnotationType::JavaOnlyImmutable)
    }

    pub fn is_fixed_size(&self) -> bool {
        self.has(AnnotationType::FixedSize)
    }

    pub fn is_hide(&self) -> bool {
        self.has(AnnotationType::Hide)
    }

    /// `@JavaOnlyStableParcelable` only has meaning for the Java backend.
    pub fn is_stable_api_parcelable(&self, backend: Backend) -> bool {
        backend == Backend::Java && self.has(AnnotationType::JavaStableParcelable)
    }

    /// Whether `@JavaDerive` asks for `method` (`equals`, `toString`).
    pub fn java_derive(&self, method: &str) -> bool {
        self.get(AnnotationType::JavaDerive)
            .and_then(|a| a.param_bool(method))
            .unwrap_or(false)
    }

    /// Traits requested by `@RustDerive`, in parameter order.
    pub fn rust_derive(&self) -> Vec<&'static str> {
        let Some(annotation) = self.get(AnnotationType::RustDerive) else {
            return Vec::new();
        };
        AnnotationType::RustDerive
            .schema()
            .parameter_names()
            .filter(|name| annotation.param_bool(name).unwrap_or(false))
            .collect()
    }

    pub fn unsupported_app_usage(&self) -> Option<&Annotation> {
        self.get(AnnotationType::UnsupportedAppUsage)
    }

    /// Annotation strings of every `@JavaPassthrough`.
    pub fn java_passthrough(&self) -> impl Iterator<Item = String> + '_ {
        self.0
            .iter()
            .filter(|a| a.kind() == AnnotationType::JavaPassthrough)
            .filter_map(|a| a.param_string("annotation"))
    }

    pub fn descriptor(&self) -> Option<String> {
        self.get(AnnotationType::Descriptor)
            .and_then(|a| a.param_string("value"))
    }

    /// The `type` named by `@Backing`, if present.
    pub fn backing_type(&self) -> Option<String> {
        self.get(AnnotationType::Backing)
            .and_then(|a| a.param_string("type"))
    }

    /// Validate the set against the annotation types `owner` supports.
    pub fn check_valid(
        &self,
        owner: &Location,
        supported: &[AnnotationType],
        diags: &mut DiagnosticCollector,
    ) -> bool {
        let mut success = true;
        let mut seen: FxHashMap<AnnotationType, &Location> = FxHashMap::default();
        for annotation in &self.0 {
            if !supported.contains(&annotation.kind()) {
                diags.error(
                    owner,
                    codes::UNSUPPORTED_ANNOTATION,
                    format!(
                        "'{}' is not a supported annotation for this node. It must be one of: {}",
                        annotation.name(),
                        schema::join_names(supported)
                    ),
                );
                success = false;
                continue;
            }
            if !annotation.check_valid(diags) {
                success = false;
                continue;
            }
            if annotation.is_repeatable() {
                continue;
            }
            if let Some(previous) = seen.get(&annotation.kind()) {
                diags.duplicate_definition(
                    owner,
                    previous,
                    codes::REPEATED_ANNOTATION,
                    format!(
                        "'{}' is repeated, but not allowed. Previous location: {}",
                        annotation.name(),
                        previous
                    ),
                );
                success = false;
            } else {
                seen.insert(annotation.kind(), annotation.location());
            }
        }
        success
    }
}

impl fmt::Display for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = self.0.iter().map(|a| a.to_string()).collect::<Vec<_>>();
        rendered.sort();
        f.write_str(&rendered.join(" "))
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A node carrying annotations, validated against its own supported set.
pub trait Annotatable {
    fn annotations(&self) -> &Annotations;

    fn supported_annotations(&self) -> &'static [AnnotationType];

    fn location(&self) -> &Location;

    fn check_annotations(&self, diags: &mut DiagnosticCollector) -> bool {
        self.annotations()
            .check_valid(self.location(), self.supported_annotations(), diags)
    }
}
