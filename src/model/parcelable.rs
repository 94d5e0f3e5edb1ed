use smol_str::SmolStr;

use super::defined::{
    Members, TypeHeader, check_fields_for_backend, check_getter_names, check_members,
    check_type_parameters, dump_body, impl_annotatable,
};
use super::writer::CodeWriter;
use crate::annotations::{Annotatable, AnnotationType};
use crate::consts::ConstantEnv;
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::error::Fallible;
use crate::options::Backend;
use crate::types::Typenames;

// ============================================================================
// UNSTRUCTURED PARCELABLE
// ============================================================================

/// A parcelable whose layout lives in external code.
#[derive(Clone, Debug, PartialEq)]
pub struct Parcelable {
    header: TypeHeader,
    type_parameters: Option<Vec<SmolStr>>,
    cpp_header: String,
}

const PARCELABLE_ANNOTATIONS: &[AnnotationType] = &[
    AnnotationType::VintfStability,
    AnnotationType::UnsupportedAppUsage,
    AnnotationType::JavaStableParcelable,
    AnnotationType::Hide,
    AnnotationType::JavaPassthrough,
    AnnotationType::JavaOnlyImmutable,
];

impl_annotatable!(Parcelable, PARCELABLE_ANNOTATIONS);

impl Parcelable {
    /// `cpp_header` is taken as written, surrounding quotes are dropped.
    pub fn new(header: TypeHeader, cpp_header: &str) -> Self {
        let cpp_header = cpp_header
            .strip_prefix('"')
            .and_then(|h| h.strip_suffix('"'))
            .unwrap_or(cpp_header);
        Self {
            header,
            type_parameters: None,
            cpp_header: cpp_header.to_string(),
        }
    }

    pub fn with_type_parameters(mut self, params: Vec<SmolStr>) -> Self {
        self.type_parameters = Some(params);
        self
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    pub fn type_parameters(&self) -> Option<&[SmolStr]> {
        self.type_parameters.as_deref()
    }

    pub fn cpp_header(&self) -> &str {
        &self.cpp_header
    }

    pub fn check_valid(&self, diags: &mut DiagnosticCollector) -> bool {
        let annotations_valid = self.check_annotations(diags);
        check_type_parameters(&self.header, self.type_parameters(), diags) && annotations_valid
    }

    pub fn language_specific_check_valid(&self, backend: Backend, diags: &mut DiagnosticCollector) -> bool {
        if backend.needs_cpp_header() && self.cpp_header.is_empty() {
            diags.error(
                self.header.location(),
                codes::MISSING_HEADER,
                "Unstructured parcelable must have C++ header defined.",
            );
            return false;
        }
        true
    }

    pub fn dump(&self, writer: &mut CodeWriter) {
        self.header.dump(writer);
        writer.write_line(&format!("parcelable {} ;", self.header.name()));
    }
}

// ============================================================================
// STRUCTURED PARCELABLE
// ============================================================================

/// A parcelable with fields declared in source.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuredParcelable {
    header: TypeHeader,
    type_parameters: Option<Vec<SmolStr>>,
    members: Members,
}

const STRUCTURED_ANNOTATIONS: &[AnnotationType] = &[
    AnnotationType::VintfStability,
    AnnotationType::UnsupportedAppUsage,
    AnnotationType::Hide,
    AnnotationType::JavaPassthrough,
    AnnotationType::JavaDerive,
    AnnotationType::JavaOnlyImmutable,
    AnnotationType::FixedSize,
    AnnotationType::RustDerive,
];

impl_annotatable!(StructuredParcelable, STRUCTURED_ANNOTATIONS);

impl StructuredParcelable {
    pub fn new(header: TypeHeader, members: Members) -> Self {
        Self {
            header,
            type_parameters: None,
            members,
        }
    }

    pub fn with_type_parameters(mut self, params: Vec<SmolStr>) -> Self {
        self.type_parameters = Some(params);
        self
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    pub fn type_parameters(&self) -> Option<&[SmolStr]> {
        self.type_parameters.as_deref()
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    pub fn check_valid(&self, typenames: &Typenames, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        let mut success = self.check_annotations(diags);
        success &= check_type_parameters(&self.header, self.type_parameters(), diags);
        if !self.members.methods.is_empty() {
            diags.error(
                self.header.location(),
                codes::INVALID_DECLARATION,
                format!("Parcelable '{}' cannot have methods.", self.header.name()),
            );
            success = false;
        }
        success &= check_members(&self.header, &self.members, typenames, diags)?;

        if self.header.annotations().is_fixed_size() {
            for field in &self.members.fields {
                if !typenames.can_be_fixed_size(field.type_specifier()) {
                    diags.error(
                        field.location(),
                        codes::NON_FIXED_SIZE_FIELD,
                        format!(
                            "The @FixedSize parcelable '{}' has a non-fixed size field named {}.",
                            self.header.name(),
                            field.name()
                        ),
                    );
                    success = false;
                }
            }
        }

        // Immutable parcelables provide getters.
        if self.header.annotations().is_java_only_immutable() {
            success &= check_getter_names(&self.header, &self.members.fields, diags);
        }
        Ok(success)
    }

    pub fn language_specific_check_valid(
        &self,
        typenames: &Typenames,
        backend: Backend,
        diags: &mut DiagnosticCollector,
    ) -> bool {
        check_fields_for_backend(&self.members.fields, typenames, backend, diags)
    }

    pub fn dump(&self, env: &dyn ConstantEnv, writer: &mut CodeWriter) {
        self.header.dump(writer);
        writer.write_line(&format!("parcelable {} {{", self.header.name()));
        writer.indent();
        dump_body(&self.header, &self.members, env, writer);
        writer.dedent();
        writer.write_line("}");
    }
}
