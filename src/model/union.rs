use smol_str::SmolStr;

use super::defined::{
    Members, TypeHeader, check_fields_for_backend, check_getter_names, check_members,
    check_type_parameters, dump_body, impl_annotatable,
};
use super::writer::CodeWriter;
use crate::annotations::{Annotatable, AnnotationType};
use crate::base::constants;
use crate::consts::ConstantEnv;
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::error::Fallible;
use crate::options::Backend;
use crate::types::Typenames;

/// A discriminated union: exactly one field is active at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct UnionDecl {
    header: TypeHeader,
    type_parameters: Option<Vec<SmolStr>>,
    members: Members,
}

const UNION_ANNOTATIONS: &[AnnotationType] = &[
    AnnotationType::VintfStability,
    AnnotationType::Hide,
    AnnotationType::JavaPassthrough,
    AnnotationType::JavaDerive,
    AnnotationType::JavaOnlyImmutable,
    AnnotationType::RustDerive,
];

impl_annotatable!(UnionDecl, UNION_ANNOTATIONS);

impl UnionDecl {
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
        let name = self.header.name();
        let mut success = self.check_annotations(diags);
        success &= check_type_parameters(&self.header, self.type_parameters(), diags);
        if !self.members.methods.is_empty() {
            diags.error(
                self.header.location(),
                codes::INVALID_DECLARATION,
                format!("Union '{}' cannot have methods.", name),
            );
            success = false;
        }
        success &= check_members(&self.header, &self.members, typenames, diags)?;

        // Unions always provide getters.
        success &= check_getter_names(&self.header, &self.members.fields, diags);

        for field in &self.members.fields {
            if field.type_specifier().name() == constants::PARCELABLE_HOLDER {
                diags.error(
                    field.location(),
                    codes::INVALID_UNION,
                    format!("A union can't have a member of ParcelableHolder '{}'", field.name()),
                );
                success = false;
            }
        }

        let Some(first) = self.members.fields.first() else {
            diags.error(
                self.header.location(),
                codes::INVALID_UNION,
                format!("The union '{}' has no fields.", name),
            );
            return Ok(false);
        };

        if !first.has_useful_default_value() {
            let ty = first.type_specifier();
            let remedy = if ty.is_array() {
                "Arrays can be initialized with values(e.g. ... = { values... };) or marked as @nullable."
            } else if ty.base().is_enum() {
                "Enum types can be initialized with a reference. (e.g. ... = MyEnum.FOO;)"
            } else {
                "Add a default value or mark it as @nullable."
            };
            diags.error(
                first.location(),
                codes::INVALID_UNION,
                format!(
                    "The union's first member should have a useful default value. {}",
                    remedy
                ),
            );
            success = false;
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
        writer.write_line(&format!("union {} {{", self.header.name()));
        writer.indent();
        dump_body(&self.header, &self.members, env, writer);
        writer.dedent();
        writer.write_line("}");
    }
}
