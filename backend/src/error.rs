//! Error types for the mecgen conversion pipeline.
//!
//! - [`CsvError`] - table loading errors
//! - [`BuildError`] - document construction errors
//! - [`XmlError`] - well-formedness check failures
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Loading Errors
// =============================================================================

/// Errors while loading the metadata table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes could not be decoded with the detected encoding.
    #[error("Failed to decode content as {0}")]
    Encoding(String),

    /// Malformed CSV record.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    Empty,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Document Build Errors
// =============================================================================

/// Errors while building the MEC document.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    /// The table has no rows, so there is no base row.
    #[error("Table has no rows")]
    EmptyTable,

    /// A column the document cannot be built without is absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Writing the element tree failed.
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

// =============================================================================
// Well-formedness Errors
// =============================================================================

/// A parse failure reported by the well-formedness checker.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct XmlError {
    /// Parser message.
    pub message: String,
    /// 1-based line of the failure.
    pub line: usize,
    /// 1-based column of the failure.
    pub column: usize,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::convert_csv`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Table loading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Document build error.
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table loading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for document construction.
pub type BuildResult<T> = Result<T, BuildError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
