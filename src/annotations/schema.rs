//! The annotation schema catalog.
//!
//! A process-wide constant table: names are unique and every
//! [`AnnotationType`] has exactly one schema.

use std::fmt;

/// Identity of a recognized annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationType {
    Nullable,
    Utf8InCpp,
    SensitiveData,
    VintfStability,
    UnsupportedAppUsage,
    JavaStableParcelable,
    Hide,
    Backing,
    JavaPassthrough,
    JavaDerive,
    JavaOnlyImmutable,
    FixedSize,
    Descriptor,
    RustDerive,
}

/// Expected type of an annotation parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    String,
    Int,
    Long,
    Boolean,
}

impl ParamType {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamType::String => "String",
            ParamType::Int => "int",
            ParamType::Long => "long",
            ParamType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct AnnotationSchema {
    pub kind: AnnotationType,
    pub name: &'static str,
    /// Supported parameters, sorted by name.
    pub parameters: &'static [(&'static str, ParamType)],
    pub repeatable: bool,
    pub required: &'static [&'static str],
}

impl AnnotationSchema {
    pub fn parameter_type(&self, name: &str) -> Option<ParamType> {
        self.parameters
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, ty)| *ty)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &'static str> {
        self.parameters.iter().map(|(name, _)| *name)
    }
}

pub static SCHEMAS: &[AnnotationSchema] = &[
    AnnotationSchema {
        kind: AnnotationType::Nullable,
        name: "nullable",
        parameters: &[],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::Utf8InCpp,
        name: "utf8InCpp",
        parameters: &[],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::SensitiveData,
        name: "SensitiveData",
        parameters: &[],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::VintfStability,
        name: "VintfStability",
        parameters: &[],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::UnsupportedAppUsage,
        name: "UnsupportedAppUsage",
        parameters: &[
            ("expectedSignature", ParamType::String),
            ("implicitMember", ParamType::String),
            ("maxTargetSdk", ParamType::Int),
            ("publicAlternatives", ParamType::String),
            ("trackingBug", ParamType::Long),
        ],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::JavaStableParcelable,
        name: "JavaOnlyStableParcelable",
        parameters: &[],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::Hide,
        name: "Hide",
        parameters: &[],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::Backing,
        name: "Backing",
        parameters: &[("type", ParamType::String)],
        repeatable: false,
        required: &["type"],
    },
    AnnotationSchema {
        kind: AnnotationType::JavaPassthrough,
        name: "JavaPassthrough",
        parameters: &[("annotation", ParamType::String)],
        repeatable: true,
        required: &["annotation"],
    },
    AnnotationSchema {
        kind: AnnotationType::JavaDerive,
        name: "JavaDerive",
        parameters: &[("equals", ParamType::Boolean), ("toString", ParamType::Boolean)],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::JavaOnlyImmutable,
        name: "JavaOnlyImmutable",
        parameters: &[],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::FixedSize,
        name: "FixedSize",
        parameters: &[],
        repeatable: false,
        required: &[],
    },
    AnnotationSchema {
        kind: AnnotationType::Descriptor,
        name: "Descriptor",
        parameters: &[("value", ParamType::String)],
        repeatable: false,
        required: &["value"],
    },
    AnnotationSchema {
        kind: AnnotationType::RustDerive,
        name: "RustDerive",
        parameters: &[
            ("Clone", ParamType::Boolean),
            ("Copy", ParamType::Boolean),
            ("Eq", ParamType::Boolean),
            ("Hash", ParamType::Boolean),
            ("Ord", ParamType::Boolean),
            ("PartialEq", ParamType::Boolean),
            ("PartialOrd", ParamType::Boolean),
        ],
        repeatable: false,
        required: &[],
    },
];

impl AnnotationType {
    pub fn schema(self) -> &'static AnnotationSchema {
        // SCHEMAS is laid out in variant order.
        &SCHEMAS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.schema().name
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Find the schema registered under `name`.
pub fn lookup(name: &str) -> Option<&'static AnnotationSchema> {
    SCHEMAS.iter().find(|schema| schema.name == name)
}

/// Every registered annotation name, in registry order.
pub fn all_names() -> impl Iterator<Item = &'static str> {
    SCHEMAS.iter().map(|schema| schema.name)
}

/// Render a set of annotation types as `a, b, c`.
pub fn join_names(kinds: &[AnnotationType]) -> String {
    kinds
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}
