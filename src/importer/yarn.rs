use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ImportError;
use crate::importer::{ImportOutcome, Importer};
use crate::models::{Application, ApplicationComponent, UsagePattern};
use crate::purl;

/// The type token this importer advertises.
pub const SUPPORTED_TYPE: &str = "yarn";

/// Marker preceding the embedded license array in `yarn licenses list --json` output.
const BODY_MARKER: &str = "\"body\":";

/// Imports the license table produced by `yarn licenses list`.
///
/// Each table row is `[name, version, license, url, vendorUrl?, vendorName?]`;
/// the trailing two fields are optional and the vendor name is not used.
pub struct YarnImporter;

impl YarnImporter {
    pub fn new() -> Self {
        Self
    }
}

impl Importer for YarnImporter {
    fn supported_type(&self) -> &'static str {
        SUPPORTED_TYPE
    }

    fn import(
        &self,
        source_url: &str,
        application: &Application,
        usage: UsagePattern,
        repo_type: &str,
        _parameters: &HashMap<String, String>,
    ) -> Result<ImportOutcome, ImportError> {
        let path = source_url.strip_prefix("file:").unwrap_or(source_url);
        let fragment = extract_fragment(Path::new(path), source_url)?;
        normalize(&fragment, source_url, application, usage, repo_type)
    }
}

/// Isolate the license table from the yarn report and repair it into
/// parseable JSON.
///
/// The report embeds a JSON array inside output that is not itself
/// strict JSON: everything before the `"body":` marker is header noise
/// and the envelope's closing braces after it would break array-only
/// parsing. Repository URL schemes are normalized here too, before URL
/// synthesis sees them.
fn extract_fragment(path: &Path, source_url: &str) -> Result<String, ImportError> {
    let file = File::open(path).map_err(|e| ImportError::Io {
        source_url: source_url.to_string(),
        details: e.to_string(),
    })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        lines.push(line.map_err(|e| ImportError::Io {
            source_url: source_url.to_string(),
            details: e.to_string(),
        })?);
    }
    let content = lines.join("\n");

    let (_, fragment) = content.split_once(BODY_MARKER).ok_or_else(|| ImportError::Format {
        source_url: source_url.to_string(),
        details: format!("missing '{}' marker", BODY_MARKER),
    })?;

    // Order matters: "www.github" contains ".git", so the host collapse
    // must run before the ".git" suffix strip.
    let repaired = strip_envelope_braces(fragment)
        .replace("git+", "")
        .replace("www.github", "github")
        .replace(".git", "")
        .replace("git://", "https://")
        .replace("git@github.com:", "https://github.com/")
        .replace("ssh://git@", "https://")
        .replace("Unknown", "");

    Ok(repaired)
}

/// Remove every `}` after the marker.
///
/// Blunt on purpose: this assumes no string value after the marker
/// contains a legitimate `}`. Kept as its own function so the
/// assumption stays visible and testable.
fn strip_envelope_braces(fragment: &str) -> String {
    fragment.replace('}', "")
}

/// Best-effort guess at a fetchable raw license file for GitHub-hosted
/// repositories. Never validated against the repository; non-GitHub
/// URLs pass through unchanged.
fn default_github_license_url(repo: &str) -> String {
    if repo.contains("github.com") && !repo.contains("/raw/") {
        let repo = repo
            .replace("git://", "https://")
            .replace("github.com", "raw.githubusercontent.com");
        format!("{}/master/LICENSE", repo)
    } else {
        repo.to_string()
    }
}

/// Parse the repaired fragment and produce one component per row.
fn normalize(
    fragment: &str,
    source_url: &str,
    application: &Application,
    usage: UsagePattern,
    repo_type: &str,
) -> Result<ImportOutcome, ImportError> {
    let rows: Vec<Vec<String>> =
        serde_json::from_str(fragment).map_err(|e| ImportError::Parse {
            source_url: source_url.to_string(),
            details: e.to_string(),
        })?;

    let mut components = Vec::with_capacity(rows.len());
    let mut component_count = 0;

    for row in &rows {
        if row.len() < 4 {
            return Err(ImportError::Format {
                source_url: source_url.to_string(),
                details: format!("entry has {} fields, expected at least 4", row.len()),
            });
        }
        let name = &row[0];
        let version = &row[1];
        let license = &row[2];
        let repo = &row[3];
        let license_url = default_github_license_url(repo);

        // The vendor URL doubles as the homepage, and only the full
        // six-field layout carries it.
        let home_page = if row.len() == 6 && !row[4].is_empty() {
            row[4].clone()
        } else {
            String::new()
        };

        let package_url = purl::npm(name, version).ok_or_else(|| ImportError::Format {
            source_url: source_url.to_string(),
            details: format!(
                "cannot build a package URL for '{}' version '{}'",
                name, version
            ),
        })?;

        let mut component = ApplicationComponent {
            application: application.name.clone(),
            artifact_id: name.clone(),
            group_id: String::new(),
            version: version.clone(),
            usage,
            oss_homepage: home_page,
            source_repo_url: repo.clone(),
            repo_type: repo_type.to_string(),
            package_url,
            raw_licenses: Vec::new(),
        };
        component.add_raw_license(license, &license_url, source_url);

        component_count += 1;
        components.push(component);
    }

    Ok(ImportOutcome {
        components,
        component_count,
        license_count: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = concat!(
        r#"{"type":"table","data":{"head":["Name","Version","License","URL","VendorUrl","VendorName"],"#,
        r#""body":[["left-pad","1.3.0","MIT","git://github.com/left-pad/left-pad"],"#,
        r#"["react","18.2.0","MIT","git+https://www.github.com/facebook/react.git","https://reactjs.org/","Meta"],"#,
        r#"["mystery-pkg","2.0.0","Unknown","ssh://git@gitlab.com/acme/mystery"]]}}"#
    );

    fn fixture(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", content).unwrap();
        f
    }

    fn import_fixture(content: &str) -> Result<ImportOutcome, ImportError> {
        let f = fixture(content);
        let app = Application::new("demo-app".to_string(), "1.0.0".to_string());
        YarnImporter::new().import(
            &format!("file:{}", f.path().display()),
            &app,
            UsagePattern::DynamicLinking,
            "npm",
            &HashMap::new(),
        )
    }

    #[test]
    fn test_extract_removes_noise() {
        let f = fixture(SAMPLE);
        let fragment = extract_fragment(f.path(), "file:test").unwrap();
        for needle in [
            "}",
            "git+",
            "www.github",
            ".git",
            "git://",
            "git@github.com:",
            "ssh://git@",
            "Unknown",
        ] {
            assert!(
                !fragment.contains(needle),
                "fragment still contains {:?}: {}",
                needle,
                fragment
            );
        }
    }

    #[test]
    fn test_extract_missing_marker_is_format_error() {
        let f = fixture(r#"{"type":"table","data":{"head":[]}}"#);
        let err = extract_fragment(f.path(), "file:test").unwrap_err();
        assert!(matches!(err, ImportError::Format { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let app = Application::new("demo-app".to_string(), "1.0.0".to_string());
        let err = YarnImporter::new()
            .import(
                "file:/nonexistent/licenses.json",
                &app,
                UsagePattern::DynamicLinking,
                "npm",
                &HashMap::new(),
            )
            .unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }

    #[test]
    fn test_strip_envelope_braces() {
        assert_eq!(strip_envelope_braces(r#"[["a"]]}}"#), r#"[["a"]]"#);
    }

    #[test]
    fn test_default_license_url_for_github() {
        assert_eq!(
            default_github_license_url("git://github.com/acme/widget"),
            "https://raw.githubusercontent.com/acme/widget/master/LICENSE"
        );
    }

    #[test]
    fn test_default_license_url_keeps_raw_urls() {
        let raw = "https://raw.githubusercontent.com/acme/widget/raw/master/LICENSE";
        assert_eq!(default_github_license_url(raw), raw);
    }

    #[test]
    fn test_default_license_url_ignores_other_hosts() {
        assert_eq!(
            default_github_license_url("https://gitlab.com/acme/widget"),
            "https://gitlab.com/acme/widget"
        );
    }

    #[test]
    fn test_minimal_import() {
        let outcome = import_fixture(
            r#"{"body":[["left-pad","1.3.0","MIT","git://github.com/left-pad/left-pad"]]}"#,
        )
        .unwrap();

        assert_eq!(outcome.component_count, 1);
        assert_eq!(outcome.license_count, 0);

        let component = &outcome.components[0];
        assert_eq!(component.application, "demo-app");
        assert_eq!(component.artifact_id, "left-pad");
        assert_eq!(component.version, "1.3.0");
        assert_eq!(component.group_id, "");
        assert_eq!(component.source_repo_url, "https://github.com/left-pad/left-pad");
        assert_eq!(component.package_url, "pkg:npm/left-pad@1.3.0");

        let raw = &component.raw_licenses[0];
        assert_eq!(raw.declared_license, "MIT");
        assert_eq!(
            raw.license_url,
            "https://raw.githubusercontent.com/left-pad/left-pad/master/LICENSE"
        );
    }

    #[test]
    fn test_component_count_matches_rows() {
        let outcome = import_fixture(SAMPLE).unwrap();
        assert_eq!(outcome.component_count, 3);
        assert_eq!(outcome.components.len(), 3);
    }

    #[test]
    fn test_four_field_row_has_empty_homepage() {
        let outcome = import_fixture(
            r#"{"body":[["left-pad","1.3.0","MIT","git://github.com/left-pad/left-pad"]]}"#,
        )
        .unwrap();
        assert_eq!(outcome.components[0].oss_homepage, "");
    }

    #[test]
    fn test_five_field_row_has_empty_homepage() {
        // Only the full six-field layout carries a vendor URL.
        let outcome = import_fixture(
            r#"{"body":[["pkg","1.0.0","MIT","https://gitlab.com/acme/pkg","https://acme.example"]]}"#,
        )
        .unwrap();
        assert_eq!(outcome.components[0].oss_homepage, "");
    }

    #[test]
    fn test_six_field_row_takes_vendor_url_as_homepage() {
        let outcome = import_fixture(SAMPLE).unwrap();
        let react = &outcome.components[1];
        assert_eq!(react.oss_homepage, "https://reactjs.org/");
        assert_eq!(react.source_repo_url, "https://github.com/facebook/react");
        assert_eq!(
            react.raw_licenses[0].license_url,
            "https://raw.githubusercontent.com/facebook/react/master/LICENSE"
        );
    }

    #[test]
    fn test_unknown_license_is_blanked() {
        let outcome = import_fixture(SAMPLE).unwrap();
        let mystery = &outcome.components[2];
        assert_eq!(mystery.raw_licenses[0].declared_license, "");
        assert_eq!(mystery.source_repo_url, "https://gitlab.com/acme/mystery");
    }

    #[test]
    fn test_short_row_is_format_error() {
        let err = import_fixture(r#"{"body":[["left-pad","1.3.0"]]}"#).unwrap_err();
        assert!(matches!(err, ImportError::Format { .. }));
    }

    #[test]
    fn test_non_array_fragment_is_parse_error() {
        let err = import_fixture(r#"{"body":["not-a-row"]}"#).unwrap_err();
        assert!(matches!(err, ImportError::Parse { .. }));
    }
}
