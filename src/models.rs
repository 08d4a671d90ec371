use serde::{Deserialize, Serialize};

/// How an imported component is incorporated into the owning application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UsagePattern {
    StaticLinking,
    DynamicLinking,
    StandaloneProduct,
}

impl std::fmt::Display for UsagePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsagePattern::StaticLinking => write!(f, "static-linking"),
            UsagePattern::DynamicLinking => write!(f, "dynamic-linking"),
            UsagePattern::StandaloneProduct => write!(f, "standalone-product"),
        }
    }
}

/// The application whose dependency inventory is being assembled.
///
/// Importers receive a shared reference and return fresh components;
/// only the caller attaches them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub release: String,
    pub components: Vec<ApplicationComponent>,
}

impl Application {
    pub fn new(name: String, release: String) -> Self {
        Self {
            name,
            release,
            components: Vec::new(),
        }
    }
}

/// One normalized dependency record produced by an importer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationComponent {
    /// Name of the owning [`Application`].
    pub application: String,
    pub artifact_id: String,
    /// Empty for ecosystems without a group/namespace concept (npm).
    pub group_id: String,
    pub version: String,
    pub usage: UsagePattern,
    /// Empty string when the source did not declare a homepage.
    pub oss_homepage: String,
    pub source_repo_url: String,
    pub repo_type: String,
    /// Package URL identifier, e.g. `pkg:npm/left-pad@1.3.0`.
    pub package_url: String,
    pub raw_licenses: Vec<RawLicense>,
}

impl ApplicationComponent {
    /// Record a declared license together with its derived license-file
    /// URL and the locator of the source it was read from.
    pub fn add_raw_license(&mut self, declared: &str, license_url: &str, origin: &str) {
        self.raw_licenses.push(RawLicense {
            declared_license: declared.to_string(),
            license_url: license_url.to_string(),
            origin: origin.to_string(),
        });
    }
}

/// A license exactly as declared by the source, before any resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLicense {
    pub declared_license: String,
    /// Best-effort URL of the license text; may be empty.
    pub license_url: String,
    /// Locator of the inventory source this license was read from.
    pub origin: String,
}
