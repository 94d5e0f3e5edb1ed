//! Validation options: requested backends and advisory switches.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::diagnostics::DiagnosticId;
use crate::error::ParseOptionError;

/// A code-generation target with its own type constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Backend {
    Java,
    Cpp,
    Ndk,
    Rust,
}

impl Backend {
    pub const ALL: &'static [Backend] = &[Backend::Java, Backend::Cpp, Backend::Ndk, Backend::Rust];

    /// NDK and Rust share the stricter native type model.
    pub fn is_native_stable(&self) -> bool {
        matches!(self, Backend::Ndk | Backend::Rust)
    }

    /// Backends that include an external header for unstructured parcelables.
    pub fn needs_cpp_header(&self) -> bool {
        matches!(self, Backend::Cpp | Backend::Ndk)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Java => "Java",
            Backend::Cpp => "C++",
            Backend::Ndk => "NDK",
            Backend::Rust => "Rust",
        };
        f.write_str(name)
    }
}

impl FromStr for Backend {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Backend::Java),
            "cpp" => Ok(Backend::Cpp),
            "ndk" => Ok(Backend::Ndk),
            "rust" => Ok(Backend::Rust),
            _ => Err(ParseOptionError::UnknownBackend(s.to_string())),
        }
    }
}

/// Which advisories are reported. All are enabled by default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticOptions {
    disabled: FxHashSet<DiagnosticId>,
}

impl DiagnosticOptions {
    pub fn disable(mut self, id: DiagnosticId) -> Self {
        self.disabled.insert(id);
        self
    }

    pub fn is_enabled(&self, id: DiagnosticId) -> bool {
        !self.disabled.contains(&id)
    }
}

/// Options for one validation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    backends: Vec<Backend>,
    diagnostics: DiagnosticOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            backends: vec![Backend::Java],
            diagnostics: DiagnosticOptions::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the requested backends. Duplicates are ignored.
    pub fn with_backends(mut self, backends: impl IntoIterator<Item = Backend>) -> Self {
        self.backends.clear();
        for backend in backends {
            if !self.backends.contains(&backend) {
                self.backends.push(backend);
            }
        }
        self
    }

    /// Parse a comma separated backend list such as `java,ndk`.
    pub fn with_backend_list(self, list: &str) -> Result<Self, ParseOptionError> {
        let backends = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Backend::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_backends(backends))
    }

    pub fn without_diagnostic(mut self, id: DiagnosticId) -> Self {
        self.diagnostics = self.diagnostics.disable(id);
        self
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    pub fn diagnostics(&self) -> &DiagnosticOptions {
        &self.diagnostics
    }
}
