//! Package URL (purl) synthesis.

/// Build a `pkg:npm/<name>@<version>` package URL.
///
/// npm has no group/namespace concept, so the full package name
/// (including any `@scope/` prefix) is percent-encoded as a single name
/// segment. Returns `None` when name or version is empty — there is
/// nothing sensible to encode.
pub fn npm(name: &str, version: &str) -> Option<String> {
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some(format!(
        "pkg:npm/{}@{}",
        urlencoding::encode(name),
        urlencoding::encode(version)
    ))
}
