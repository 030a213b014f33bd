//! Classifier error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The keyword table file could not be read.
    #[error("failed to read keyword table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The keyword table is not valid TOML of the expected shape.
    #[error("invalid keyword table: {0}")]
    Parse(#[from] toml::de::Error),
}
