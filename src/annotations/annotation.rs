use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

use super::schema::{self, AnnotationSchema, AnnotationType, ParamType};
use crate::base::Location;
use crate::consts::{ConstantValue, NoConstants, Value, default_decorator};
use crate::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use crate::types::TypeSpecifier;

/// Parameter name → constant expression, ordered by name.
pub type AnnotationParams = BTreeMap<SmolStr, ConstantValue>;

/// A parsed annotation instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    location: Location,
    schema: &'static AnnotationSchema,
    parameters: AnnotationParams,
}

impl Annotation {
    /// Look `name` up in the schema registry.
    ///
    /// Unknown names fail with an error listing every registered name.
    pub fn parse(
        location: Location,
        name: &str,
        parameters: Option<AnnotationParams>,
    ) -> Result<Self, Diagnostic> {
        let Some(schema) = schema::lookup(name) else {
            let names = schema::all_names().collect::<Vec<_>>().join(" ");
            return Err(Diagnostic::error(
                &location,
                format!(
                    "'{}' is not a recognized annotation. It must be one of: {}.",
                    name, names
                ),
            )
            .with_code(codes::UNKNOWN_ANNOTATION));
        };
        Ok(Self {
            location,
            schema,
            parameters: parameters.unwrap_or_default(),
        })
    }

    /// Build an annotation of a known type.
    pub fn new(location: Location, kind: AnnotationType, parameters: AnnotationParams) -> Self {
        Self {
            location,
            schema: kind.schema(),
            parameters,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn kind(&self) -> AnnotationType {
        self.schema.kind
    }

    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    pub fn is_repeatable(&self) -> bool {
        self.schema.repeatable
    }

    pub fn parameters(&self) -> &AnnotationParams {
        &self.parameters
    }

    fn parameter_type(ty: ParamType) -> TypeSpecifier {
        TypeSpecifier::builtin(Location::internal("<annotation>"), ty.type_name())
    }

    /// Validate parameters against the schema.
    ///
    /// Every supplied parameter must be supported, free of references and
    /// evaluate to a non-empty value; every required parameter must be present.
    pub fn check_valid(&self, diags: &mut DiagnosticCollector) -> bool {
        let mut success = true;
        for (param_name, param) in &self.parameters {
            let Some(param_type) = self.schema.parameter_type(param_name) else {
                let supported = self.schema.parameter_names().collect::<Vec<_>>().join(" ");
                diags.error(
                    &self.location,
                    codes::UNKNOWN_ANNOTATION_PARAMETER,
                    format!(
                        "Parameter {} not supported for annotation {}. It must be one of: {}",
                        param_name,
                        self.name(),
                        supported
                    ),
                );
                success = false;
                continue;
            };

            if let Some(reference) = param.find_reference() {
                diags.error(
                    reference.location(),
                    codes::NON_CONSTANT_ANNOTATION_VALUE,
                    format!(
                        "Value must be a constant expression but contains reference to {}.",
                        reference
                    ),
                );
                success = false;
                continue;
            }

            let value = if param.check_valid() {
                param.value_string(
                    &Self::parameter_type(param_type),
                    &NoConstants,
                    "",
                    default_decorator,
                )
            } else {
                String::new()
            };
            if value.is_empty() {
                diags.error(
                    &self.location,
                    codes::INVALID_ANNOTATION_VALUE,
                    format!(
                        "Invalid value for parameter {} on annotation {}.",
                        param_name,
                        self.name()
                    ),
                );
                success = false;
            }
        }

        for required in self.schema.required {
            if !self.parameters.contains_key(*required) {
                diags.error(
                    &self.location,
                    codes::MISSING_ANNOTATION_PARAMETER,
                    format!("Missing '{}' on @{}.", required, self.name()),
                );
                success = false;
            }
        }
        success
    }

    fn param_value(&self, name: &str) -> Option<Value> {
        let param_type = self.schema.parameter_type(name)?;
        let param = self.parameters.get(name)?;
        param
            .evaluate(&Self::parameter_type(param_type), &NoConstants, "")
            .ok()
    }

    /// Evaluated string parameter, without quotes.
    pub fn param_string(&self, name: &str) -> Option<String> {
        match self.param_value(name)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn param_bool(&self, name: &str) -> Option<bool> {
        match self.param_value(name)? {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Rendered values of the supported parameters.
    pub fn param_strings(&self) -> BTreeMap<&str, String> {
        self.parameters
            .iter()
            .filter_map(|(name, param)| {
                let param_type = self.schema.parameter_type(name)?;
                let value = param.value_string(
                    &Self::parameter_type(param_type),
                    &NoConstants,
                    "",
                    default_decorator,
                );
                Some((name.as_str(), value))
            })
            .collect()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())?;
        if self.parameters.is_empty() {
            return Ok(());
        }
        let params = self
            .param_strings()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>();
        write!(f, "({})", params.join(", "))
    }
}
