//! Diagnostics: validation error and advisory reporting.
//!
//! Every check in the crate reports through a [`DiagnosticCollector`].
//! Errors make the enclosing check fail; advisories (warnings keyed by a
//! [`DiagnosticId`]) are reported but never block generation.

pub mod codes;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::base::Location;
use crate::error::ParseOptionError;
use crate::options::DiagnosticOptions;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        }
    }
}

/// Identifiers of the advisory diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticId {
    /// The first enumerator of an enum is not zero.
    EnumZero,
    /// An argument is declared `inout`.
    InoutParameter,
    /// An interface name does not start with `I`.
    InterfaceName,
}

impl DiagnosticId {
    pub const ALL: &'static [DiagnosticId] = &[
        DiagnosticId::EnumZero,
        DiagnosticId::InoutParameter,
        DiagnosticId::InterfaceName,
    ];

    /// Name used to switch the advisory on the command line (`-Wno-<name>`).
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticId::EnumZero => "enum-zero",
            DiagnosticId::InoutParameter => "inout-parameter",
            DiagnosticId::InterfaceName => "interface-name",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticId::EnumZero => codes::ENUM_ZERO,
            DiagnosticId::InoutParameter => codes::INOUT_PARAMETER,
            DiagnosticId::InterfaceName => codes::INTERFACE_NAME,
        }
    }
}

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiagnosticId {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiagnosticId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| ParseOptionError::UnknownDiagnostic(s.to_string()))
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Where the offending node was declared.
    pub location: Location,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// Advisory identifier, set only on warnings.
    pub id: Option<DiagnosticId>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Optional related information.
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq)]
pub struct RelatedInfo {
    pub location: Location,
    pub message: Arc<str>,
}

impl RelatedInfo {
    pub fn new(location: Location, message: impl Into<Arc<str>>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(location: &Location, message: impl Into<Arc<str>>) -> Self {
        Self {
            location: location.clone(),
            severity: Severity::Error,
            code: None,
            id: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Create a new advisory diagnostic.
    pub fn warning(id: DiagnosticId, location: &Location, message: impl Into<Arc<str>>) -> Self {
        Self {
            location: location.clone(),
            severity: Severity::Warning,
            code: Some(Arc::from(id.code())),
            id: Some(id),
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity.as_str(), self.location, self.message)?;
        if let Some(id) = self.id {
            write!(f, " [-W{}]", id)?;
        }
        for related in &self.related {
            write!(f, "\n  {}: {}", related.location, related.message)?;
        }
        Ok(())
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during validation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    options: DiagnosticOptions,
}

impl DiagnosticCollector {
    /// Create a new empty collector with every advisory enabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DiagnosticOptions) -> Self {
        Self {
            diagnostics: Vec::new(),
            options,
        }
    }

    /// Add a diagnostic. Disabled advisories are dropped.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if let Some(id) = diagnostic.id {
            if !self.options.is_enabled(id) {
                tracing::trace!("dropping disabled advisory -W{}", id);
                return;
            }
        }
        tracing::debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Record an error with a code.
    pub fn error(&mut self, location: &Location, code: &str, message: impl Into<Arc<str>>) {
        self.add(Diagnostic::error(location, message).with_code(code));
    }

    /// Record an advisory.
    pub fn report(&mut self, id: DiagnosticId, location: &Location, message: impl Into<Arc<str>>) {
        self.add(Diagnostic::warning(id, location, message));
    }

    /// Add a duplicate definition error citing the earlier declaration.
    pub fn duplicate_definition(
        &mut self,
        location: &Location,
        previous: &Location,
        code: &str,
        message: impl Into<Arc<str>>,
    ) {
        self.add(
            Diagnostic::error(location, message)
                .with_code(code)
                .with_related(RelatedInfo::new(previous.clone(), "previously defined here")),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Move every diagnostic of `other` into this collector.
    pub fn extend(&mut self, other: DiagnosticCollector) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn options(&self) -> &DiagnosticOptions {
        &self.options
    }

    /// Start a sibling collector sharing these options.
    pub fn fork(&self) -> DiagnosticCollector {
        DiagnosticCollector::with_options(self.options.clone())
    }
}
