//! Inventory importers and their dispatch registry.
//!
//! Each importer understands the license-listing output of one package
//! manager and advertises a type token that configuration files use to
//! route a source to it.

use std::collections::HashMap;

use crate::error::ImportError;
use crate::models::{Application, ApplicationComponent, UsagePattern};

pub mod yarn;

/// Result of one import call.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Freshly created records, one per entry in the source.
    pub components: Vec<ApplicationComponent>,
    /// Number of components produced.
    pub component_count: usize,
    /// Tallied nowhere by any importer; always zero. Kept so the
    /// per-source summary line has a stable shape.
    pub license_count: usize,
}

pub trait Importer {
    /// The type token configuration files use to select this importer.
    fn supported_type(&self) -> &'static str;

    /// Read one inventory source and produce its component records.
    ///
    /// `parameters` is a free-form map accepted for every source;
    /// importers interpret or ignore it as they see fit. Any failure
    /// aborts the whole import with no partial records.
    fn import(
        &self,
        source_url: &str,
        application: &Application,
        usage: UsagePattern,
        repo_type: &str,
        parameters: &HashMap<String, String>,
    ) -> Result<ImportOutcome, ImportError>;
}

/// Maps supported-type tokens to importer instances.
///
/// Built once at startup and passed to the dispatch loop; nothing is
/// registered ambiently.
pub struct ImporterRegistry {
    importers: HashMap<&'static str, Box<dyn Importer>>,
}

impl ImporterRegistry {
    pub fn new() -> Self {
        Self {
            importers: HashMap::new(),
        }
    }

    /// A registry with every built-in importer registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(yarn::YarnImporter::new()));
        registry
    }

    pub fn register(&mut self, importer: Box<dyn Importer>) {
        self.importers.insert(importer.supported_type(), importer);
    }

    pub fn get(&self, kind: &str) -> Option<&dyn Importer> {
        self.importers.get(kind).map(|importer| importer.as_ref())
    }

    /// Known type tokens, sorted for stable error messages.
    pub fn supported_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.importers.keys().copied().collect();
        types.sort_unstable();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_yarn() {
        let registry = ImporterRegistry::with_defaults();
        let importer = registry.get("yarn").expect("yarn importer registered");
        assert_eq!(importer.supported_type(), "yarn");
        assert_eq!(registry.supported_types(), vec!["yarn"]);
    }

    #[test]
    fn test_unknown_token_is_none() {
        let registry = ImporterRegistry::with_defaults();
        assert!(registry.get("gradle").is_none());
    }
}
