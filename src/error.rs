use thiserror::Error;

/// Failures raised while importing a license inventory source.
///
/// Every variant is fatal for the import that raised it: no partial
/// records are produced and nothing is retried. The hosting application
/// decides whether to abort the run or continue with other sources.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source file could not be opened or read.
    #[error("could not read inventory source '{source_url}': {details}")]
    Io { source_url: String, details: String },

    /// The source was readable but is not shaped like the expected
    /// envelope, or an entry is missing mandatory fields.
    #[error("inventory source '{source_url}' has an unexpected format: {details}")]
    Format { source_url: String, details: String },

    /// The extracted fragment is not valid JSON of the expected shape.
    #[error("could not parse inventory source '{source_url}': {details}")]
    Parse { source_url: String, details: String },
}
