//! Validation driver.
//!
//! Phases, in order, each gated on the previous one:
//!
//! 1. resolve every type specifier of the document
//! 2. autofill (enum backing types)
//! 3. backend-independent checks
//! 4. per-backend checks, one task per requested backend
//!
//! The per-backend phase only reads the registry. Each backend reports into
//! its own collector and the results are merged in the order the backends
//! were requested.

use rayon::prelude::*;

use crate::base::Location;
use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::error::InternalError;
use crate::options::{Backend, Options};
use crate::types::{DocumentId, Typenames};

/// Everything one run found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
    /// True when no phase failed.
    pub valid: bool,
    /// Outcome per backend, in request order. Empty if validation stopped
    /// before the per-backend phase.
    pub backends: Vec<(Backend, bool)>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn backend_valid(&self, backend: Backend) -> Option<bool> {
        self.backends
            .iter()
            .find(|(b, _)| *b == backend)
            .map(|(_, valid)| *valid)
    }
}

/// Validate one document that was added to `typenames`.
///
/// Validation failures end up in the report. `Err` means an internal
/// invariant broke and the run must be abandoned.
pub fn validate(
    typenames: &mut Typenames,
    document: DocumentId,
    options: &Options,
) -> Result<ValidationReport, InternalError> {
    let mut diags = DiagnosticCollector::with_options(options.diagnostics().clone());
    run(typenames, document, options, &mut diags).inspect_err(|err| {
        tracing::error!("validation aborted: {}", err);
    })
}

fn run(
    typenames: &mut Typenames,
    document: DocumentId,
    options: &Options,
    diags: &mut DiagnosticCollector,
) -> Result<ValidationReport, InternalError> {
    let stopped = |diags: &mut DiagnosticCollector| ValidationReport {
        diagnostics: diags.take(),
        valid: false,
        backends: Vec::new(),
    };

    tracing::debug!("resolving document {:?}", document);
    if !typenames.resolve_document(document, diags)? {
        return Ok(stopped(diags));
    }

    tracing::debug!("autofilling document {:?}", document);
    if !typenames.autofill_document(document, diags)? {
        return Ok(stopped(diags));
    }

    let typenames: &Typenames = typenames;
    let doc = typenames.document(document).ok_or_else(|| {
        InternalError::invariant(
            &Location::internal("<pipeline>"),
            format!("unknown document {:?}", document),
        )
    })?;

    tracing::debug!("checking document {:?}", document);
    if !doc.check_valid(typenames, diags)? || diags.has_errors() {
        return Ok(stopped(diags));
    }

    tracing::debug!("checking {} backend(s)", options.backends().len());
    let template = diags.fork();
    let per_backend: Vec<(Backend, bool, DiagnosticCollector)> = options
        .backends()
        .par_iter()
        .map(|&backend| {
            let mut backend_diags = template.fork();
            let valid = doc.language_specific_check_valid(typenames, backend, &mut backend_diags);
            tracing::debug!("backend {}: {}", backend, if valid { "ok" } else { "failed" });
            (backend, valid, backend_diags)
        })
        .collect();

    let mut backends = Vec::with_capacity(per_backend.len());
    for (backend, valid, backend_diags) in per_backend {
        diags.extend(backend_diags);
        backends.push((backend, valid));
    }
    let valid = backends.iter().all(|(_, valid)| *valid);
    Ok(ValidationReport {
        diagnostics: diags.take(),
        valid,
        backends,
    })
}
