//! # mecgen - MEC CoreMetadata generation
//!
//! mecgen turns a localization sheet (one row per language variant of a title)
//! into the MEC CoreMetadata XML a video distribution partner ingests.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Builder   │────▶│   MEC XML   │
//! │ (UTF8/EUC)  │     │  (auto-enc) │     │ (normalize) │     │ (checked)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mecgen::{convert_csv, ConvertOptions};
//!
//! let result = convert_csv("titles.csv".as_ref(), &ConvertOptions::default()).unwrap();
//! match result.rendered.document() {
//!     Some(xml) => println!("{}", xml),
//!     None => eprintln!("{}", result.rendered.preview()),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Table and normalized work models
//! - [`normalize`] - Cell normalization
//! - [`parser`] - CSV loading with auto-detection
//! - [`mec`] - Document builder
//! - [`validation`] - Well-formedness, diagnostics, pre-checks
//! - [`pipeline`] - End-to-end conversion
//! - [`logs`] - Per-conversion log

// Core modules
pub mod error;
pub mod models;
pub mod normalize;

// Loading
pub mod parser;

// Building
pub mod mec;

// Validation
pub mod validation;

// Orchestration
pub mod logs;
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{BuildError, CsvError, PipelineError, XmlError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ArtKind, JobFunction, MecWork, Role, Row, Table, WorkType};

// =============================================================================
// Re-exports - Normalizer
// =============================================================================

pub use normalize::{normalize_date, normalize_text};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes, parse_bytes_auto,
    parse_csv_file_auto, parse_table, ParseResult,
};

// =============================================================================
// Re-exports - Builder
// =============================================================================

pub use mec::{build_document, render_xml, CONTENT_ID_PREFIX};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{check, highlight, is_valid, precheck, Diagnostic, PrecheckIssue, Rendered};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use logs::{ConversionLog, LogEntry, LogLevel};
pub use pipeline::{
    convert_bytes, convert_csv, convert_table, ConversionResult, ConvertOptions, CsvInfo,
};
