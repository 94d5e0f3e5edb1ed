use rustc_hash::{FxHashMap, FxHashSet};

use super::defined::{Members, TypeHeader, check_constants, dump_constants, impl_annotatable};
use super::members::{Argument, Direction, Method};
use super::writer::CodeWriter;
use crate::annotations::{Annotatable, AnnotationType};
use crate::base::{Location, constants};
use crate::consts::ConstantEnv;
use crate::diagnostics::{DiagnosticCollector, DiagnosticId, codes};
use crate::error::Fallible;
use crate::options::Backend;
use crate::types::Typenames;

/// A binder interface: methods and constants.
#[derive(Clone, Debug, PartialEq)]
pub struct Interface {
    header: TypeHeader,
    oneway: bool,
    members: Members,
}

const INTERFACE_ANNOTATIONS: &[AnnotationType] = &[
    AnnotationType::SensitiveData,
    AnnotationType::VintfStability,
    AnnotationType::UnsupportedAppUsage,
    AnnotationType::Hide,
    AnnotationType::JavaPassthrough,
    AnnotationType::Descriptor,
];

impl_annotatable!(Interface, INTERFACE_ANNOTATIONS);

impl Interface {
    /// A `oneway` interface makes every method oneway.
    pub fn new(header: TypeHeader, oneway: bool, mut members: Members) -> Self {
        for method in &mut members.methods {
            method.apply_interface_oneway(oneway);
        }
        Self {
            header,
            oneway,
            members,
        }
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    pub fn is_oneway(&self) -> bool {
        self.oneway
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    pub fn methods(&self) -> &[Method] {
        &self.members.methods
    }

    /// `@Descriptor(value=...)` if present, else the canonical name.
    pub fn descriptor(&self) -> String {
        self.header
            .annotations()
            .descriptor()
            .unwrap_or_else(|| self.header.canonical_name().to_string())
    }

    pub fn check_valid(&self, typenames: &Typenames, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        let mut success = self.check_annotations(diags);

        if let Some(field) = self.members.fields.first() {
            diags.error(
                field.location(),
                codes::INVALID_DECLARATION,
                format!("Interface '{}' cannot have fields.", self.header.name()),
            );
            success = false;
        }

        let mut method_names: FxHashMap<&str, &Location> = FxHashMap::default();
        for method in &self.members.methods {
            success &= check_method(method, typenames, diags)?;

            if let Some(previous) = method_names.get(method.name()) {
                diags.duplicate_definition(
                    method.location(),
                    previous,
                    codes::DUPLICATE_METHOD,
                    format!("attempt to redefine method {}", method.name()),
                );
                success = false;
                continue;
            }
            method_names.insert(method.name(), method.location());

            let signature = method.signature();
            if method.is_user_defined() && constants::RESERVED_METHOD_SIGNATURES.contains(&signature.as_str()) {
                diags.error(
                    method.location(),
                    codes::RESERVED_METHOD,
                    format!("method {} is reserved for internal use.", signature),
                );
                success = false;
            }
        }

        success &= check_constants(&self.header, &self.members.constants, typenames, diags)?;

        if !self.header.name().starts_with(constants::INTERFACE_NAME_PREFIX) {
            diags.report(
                DiagnosticId::InterfaceName,
                self.header.location(),
                "Interface names should start with I.",
            );
        }
        Ok(success)
    }

    pub fn language_specific_check_valid(
        &self,
        typenames: &Typenames,
        backend: Backend,
        diags: &mut DiagnosticCollector,
    ) -> bool {
        let mut success = true;
        for method in &self.members.methods {
            success &= method
                .return_type()
                .language_specific_check_valid(typenames, backend, diags);
            for arg in method.arguments() {
                success &= arg
                    .type_specifier()
                    .language_specific_check_valid(typenames, backend, diags);
            }
        }
        success
    }

    pub fn dump(&self, env: &dyn ConstantEnv, writer: &mut CodeWriter) {
        self.header.dump(writer);
        writer.write_line(&format!("interface {} {{", self.header.name()));
        writer.indent();
        for method in self.members.methods.iter().filter(|m| m.is_user_defined()) {
            if method.is_hidden() {
                writer.write_hide_comment();
            }
            writer.write_line(&format!("{};", method));
        }
        dump_constants(&self.header, &self.members.constants, env, writer);
        writer.dedent();
        writer.write_line("}");
    }
}

/// Return type, oneway rules and every argument of one method. Stops at the
/// first problem.
fn check_method(method: &Method, typenames: &Typenames, diags: &mut DiagnosticCollector) -> Fallible<bool> {
    let return_type = method.return_type();
    if !return_type.check_valid(typenames, diags)? {
        return Ok(false);
    }
    if return_type.name() == constants::PARCELABLE_HOLDER {
        diags.error(
            method.location(),
            codes::INVALID_METHOD_TYPE,
            "ParcelableHolder cannot be a return type",
        );
        return Ok(false);
    }
    if method.is_oneway() && return_type.name() != constants::VOID {
        diags.error(
            method.location(),
            codes::INVALID_ONEWAY,
            format!("oneway method '{}' cannot return a value", method.name()),
        );
        return Ok(false);
    }

    let mut argument_names: FxHashSet<&str> = FxHashSet::default();
    for arg in method.arguments() {
        if !argument_names.insert(arg.name()) {
            diags.error(
                method.location(),
                codes::DUPLICATE_ARGUMENT,
                format!(
                    "method '{}' has duplicate argument name '{}'",
                    method.name(),
                    arg.name()
                ),
            );
            return Ok(false);
        }
        if !check_argument(method, arg, typenames, diags)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn check_argument(
    method: &Method,
    arg: &Argument,
    typenames: &Typenames,
    diags: &mut DiagnosticCollector,
) -> Fallible<bool> {
    let ty = arg.type_specifier();
    if !ty.check_valid(typenames, diags)? {
        return Ok(false);
    }
    if ty.name() == constants::PARCELABLE_HOLDER {
        diags.error(
            arg.location(),
            codes::INVALID_METHOD_TYPE,
            "ParcelableHolder cannot be an argument type",
        );
        return Ok(false);
    }
    if method.is_oneway() && arg.is_out() {
        diags.error(
            method.location(),
            codes::INVALID_ONEWAY,
            format!("oneway method '{}' cannot have out parameters", method.name()),
        );
        return Ok(false);
    }

    let (can_be_out, aspect) = typenames.can_be_out_parameter(ty)?;
    if !arg.is_direction_specified() && can_be_out {
        diags.error(
            arg.location(),
            codes::INVALID_DIRECTION,
            format!(
                "'{}' can be an out type, so you must declare it as in, out, or inout.",
                ty.signature()
            ),
        );
        return Ok(false);
    }
    if arg.direction() != Direction::In && !can_be_out {
        diags.error(
            arg.location(),
            codes::INVALID_DIRECTION,
            format!(
                "'{}' can't be an {} parameter because {} can only be an in parameter.",
                arg.name(),
                arg.direction_specifier(),
                aspect
            ),
        );
        return Ok(false);
    }

    if constants::is_reserved_keyword(arg.name()) {
        diags.error(
            arg.location(),
            codes::RESERVED_NAME,
            format!("Argument name '{}' is a Java or aidl keyword", arg.name()),
        );
        return Ok(false);
    }
    if arg.name().starts_with(constants::RESERVED_ARGUMENT_PREFIX) {
        diags.error(
            arg.location(),
            codes::RESERVED_NAME,
            format!(
                "Argument name '{}' cannot begin with '{}'",
                arg.name(),
                constants::RESERVED_ARGUMENT_PREFIX
            ),
        );
        return Ok(false);
    }

    if arg.direction() == Direction::InOut {
        diags.report(
            DiagnosticId::InoutParameter,
            arg.location(),
            format!(
                "{} is 'inout'. Avoid inout parameters, they read like 'out' parameters but are also 'in'.",
                arg.name()
            ),
        );
    }
    Ok(true)
}
