//! Error types for ontology construction.

use thiserror::Error;

use crate::vocab::TermKind;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving identifiers, mutating the graph, or
/// reading and writing artifacts.
#[derive(Error, Debug)]
pub enum Error {
    /// A cell-type or anatomical-structure identifier carries a prefix
    /// outside the recognized set.
    #[error("Invalid {kind} identifier: {raw:?}")]
    InvalidIdentifier {
        /// The identifier exactly as it appeared in the row.
        raw: String,
        /// Which kind of term the identifier was meant to name.
        kind: TermKind,
    },

    /// The row has no named anatomical structure.
    #[error("Anatomical structure data are missing")]
    MissingAnatomicalStructure,

    /// The row has no named cell type.
    #[error("Cell type data are missing")]
    MissingCellType,

    /// The row has no biomarker where at least one is required.
    #[error("Biomarker data are missing")]
    MissingBiomarkerData,

    /// Configuration could not be interpreted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The graph could not be written in the requested format.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Row data was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file was not valid TOML.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Returns true for errors that abort only the current row.
    #[must_use]
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidIdentifier { .. }
                | Error::MissingAnatomicalStructure
                | Error::MissingCellType
                | Error::MissingBiomarkerData
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_identifier_names_raw_string() {
        let err = Error::InvalidIdentifier {
            raw: "FOO:123".to_string(),
            kind: TermKind::CellType,
        };
        let msg = err.to_string();
        assert!(msg.contains("FOO:123"), "{msg}");
        assert!(msg.contains("cell type"), "{msg}");
    }

    #[test]
    fn row_errors_classified() {
        assert!(Error::MissingCellType.is_row_error());
        assert!(Error::MissingAnatomicalStructure.is_row_error());
        assert!(Error::MissingBiomarkerData.is_row_error());
        assert!(!Error::Config("x".to_string()).is_row_error());
        assert!(!Error::Serialization("x".to_string()).is_row_error());
    }
}
