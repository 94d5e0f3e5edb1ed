//! One parsed source file: imports and the types it defines.

use smol_str::SmolStr;

use super::defined::DefinedType;
use crate::base::Location;
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::error::Fallible;
use crate::options::Backend;
use crate::types::Typenames;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    location: Location,
    needed_class: SmolStr,
}

impl Import {
    pub fn new(location: Location, needed_class: impl Into<SmolStr>) -> Self {
        Self {
            location,
            needed_class: needed_class.into(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Fully qualified imported name.
    pub fn needed_class(&self) -> &str {
        &self.needed_class
    }

    /// Segment after the last dot.
    pub fn simple_name(&self) -> &str {
        self.needed_class
            .rsplit_once('.')
            .map_or(self.needed_class.as_str(), |(_, simple)| simple)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    imports: Vec<Import>,
    defined_types: Vec<DefinedType>,
}

impl Document {
    pub fn new(imports: Vec<Import>, defined_types: Vec<DefinedType>) -> Self {
        Self {
            imports,
            defined_types,
        }
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn defined_types(&self) -> &[DefinedType] {
        &self.defined_types
    }

    pub(crate) fn split_mut(&mut self) -> (&[Import], &mut [DefinedType]) {
        (&self.imports, &mut self.defined_types)
    }

    /// Map a name as written to the import that provides it.
    ///
    /// - `Simple` with `import p.Simple` gives `p.Simple`
    /// - `Outer.Inner` with `import p.Outer` gives `p.Outer`
    /// - anything no import provides is returned unchanged
    ///
    /// Two imports providing the same simple name is an error, reported
    /// at the second import, and gives `None`.
    pub fn resolve_name(&self, unresolved: &str, diags: &mut DiagnosticCollector) -> Option<String> {
        resolve_name_in(&self.imports, unresolved, diags)
    }

    /// Backend-independent checks of every defined type. Keeps going after
    /// a failing type so all of them are reported.
    pub fn check_valid(&self, typenames: &Typenames, diags: &mut DiagnosticCollector) -> Fallible<bool> {
        let mut success = true;
        for defined in &self.defined_types {
            success &= defined.check_valid(typenames, diags)?;
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
        for defined in &self.defined_types {
            success &= defined.language_specific_check_valid(typenames, backend, diags);
        }
        success
    }
}

pub(crate) fn resolve_name_in(
    imports: &[Import],
    unresolved: &str,
    diags: &mut DiagnosticCollector,
) -> Option<String> {
    let class_name = unresolved.split_once('.').map_or(unresolved, |(first, _)| first);

    let mut found: Option<&Import> = None;
    for import in imports.iter().filter(|i| i.simple_name() == class_name) {
        match found {
            Some(previous) if previous.needed_class() != import.needed_class() => {
                diags.error(
                    import.location(),
                    codes::AMBIGUOUS_IMPORT,
                    format!(
                        "Ambiguous type: {} vs. {}",
                        previous.needed_class(),
                        import.needed_class()
                    ),
                );
                return None;
            }
            _ => found = Some(import),
        }
    }

    Some(match found {
        Some(import) => import.needed_class().to_string(),
        None => unresolved.to_string(),
    })
}
