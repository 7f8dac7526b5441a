//! High-level pipeline API for CSV to MEC conversion.
//!
//! Combines loading, pre-checks, document building and the well-formedness
//! check, and records what happened in a [`ConversionLog`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mecgen::pipeline::{convert_csv, ConvertOptions};
//! use std::path::Path;
//!
//! let result = convert_csv(Path::new("titles.csv"), &ConvertOptions::default())?;
//! if let Some(xml) = result.rendered.document() {
//!     std::fs::write("MEC_Metadata.xml", xml)?;
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PipelineResult;
use crate::logs::ConversionLog;
use crate::mec::{build_tree, extract_work, to_xml_string};
use crate::models::{ArtKind, Table};
use crate::parser::{parse_bytes, ParseResult};
use crate::validation::{highlight, is_valid, precheck, PrecheckIssue, Rendered};

/// Environment variable holding the comma-separated required art kinds.
pub const ENV_REQUIRED_ART: &str = "MECGEN_REQUIRED_ART";
/// Environment variable forcing the CSV delimiter.
pub const ENV_DELIMITER: &str = "MECGEN_DELIMITER";

/// Options for the conversion pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Art kinds every localized row must reference
    pub required_art: Vec<ArtKind>,

    /// CSV delimiter (auto-detect if not specified)
    pub delimiter: Option<char>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            required_art: vec![ArtKind::Boxart, ArtKind::Hero],
            delimiter: None,
        }
    }
}

impl ConvertOptions {
    /// Defaults overridden by `MECGEN_REQUIRED_ART` and `MECGEN_DELIMITER`.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(list) = std::env::var(ENV_REQUIRED_ART) {
            options.required_art = parse_art_list(&list);
        }
        if let Ok(delimiter) = std::env::var(ENV_DELIMITER) {
            options.delimiter = parse_delimiter(&delimiter);
        }
        options
    }
}

/// Parse a comma-separated art list, ignoring unknown names.
pub fn parse_art_list(list: &str) -> Vec<ArtKind> {
    let mut kinds: Vec<ArtKind> = Vec::new();
    for kind in list.split(',').filter_map(ArtKind::from_name) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

/// Parse a delimiter, accepting `tab` / `\t` for the tab character.
pub fn parse_delimiter(text: &str) -> Option<char> {
    match text {
        "tab" | "\\t" | "\t" => Some('\t'),
        _ => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
    }
}

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Result of a complete conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    /// The document, or its diagnostic when malformed
    pub rendered: Rendered,

    /// Independent re-parse of the produced document
    pub valid: bool,

    /// Pre-check findings (never block the build)
    pub issues: Vec<PrecheckIssue>,

    /// What happened, in order
    pub log: ConversionLog,

    /// CSV parsing metadata, when the table came from CSV
    pub csv_info: Option<CsvInfo>,
}

impl ConversionResult {
    /// Whether the document may be handed to the partner.
    ///
    /// Pre-check issues only block when `strict` is set.
    pub fn is_deliverable(&self, strict: bool) -> bool {
        self.valid && (!strict || self.issues.is_empty())
    }
}

/// Convert a CSV file to an MEC document.
pub fn convert_csv(path: &Path, options: &ConvertOptions) -> PipelineResult<ConversionResult> {
    let bytes = std::fs::read(path)?;
    convert_bytes(&bytes, options)
}

/// Convert CSV bytes to an MEC document.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> PipelineResult<ConversionResult> {
    let parse_result = parse_bytes(bytes, options.delimiter)?;
    convert_parsed(parse_result, options)
}

/// Convert an already loaded table.
pub fn convert_table(table: &Table, options: &ConvertOptions) -> PipelineResult<ConversionResult> {
    let mut log = ConversionLog::new();
    let (rendered, valid, issues) = run(table, options, &mut log)?;
    Ok(ConversionResult {
        rendered,
        valid,
        issues,
        log,
        csv_info: None,
    })
}

fn convert_parsed(
    parse_result: ParseResult,
    options: &ConvertOptions,
) -> PipelineResult<ConversionResult> {
    let mut log = ConversionLog::new();

    log.info("Reading CSV file...");
    log.success(format!("Detected encoding: {}", parse_result.encoding));
    log.success(format!(
        "Detected separator: '{}'",
        format_delimiter(parse_result.delimiter)
    ));
    log.success(format!("Read {} language rows", parse_result.table.len()));

    let csv_info = CsvInfo {
        encoding: parse_result.encoding.clone(),
        delimiter: parse_result.delimiter,
        headers: parse_result.table.columns().to_vec(),
        row_count: parse_result.table.len(),
    };

    let (rendered, valid, issues) = run(&parse_result.table, options, &mut log)?;

    Ok(ConversionResult {
        rendered,
        valid,
        issues,
        log,
        csv_info: Some(csv_info),
    })
}

fn run(
    table: &Table,
    options: &ConvertOptions,
    log: &mut ConversionLog,
) -> PipelineResult<(Rendered, bool, Vec<PrecheckIssue>)> {
    log.info("Running pre-checks...");
    let issues = precheck(table, &options.required_art);
    if issues.is_empty() {
        log.success("Pre-checks passed");
    } else {
        log.warning(format!("{} pre-check issue(s)", issues.len()));
        for issue in &issues {
            log.warning_indent(issue.to_string(), 1);
        }
    }

    log.info("Building MEC document...");
    let work = extract_work(table)?;
    log.success(format!(
        "{} localized block(s), {} credit(s), work type '{}'",
        work.localized.len(),
        work.credits.len(),
        work.work_type_text
    ));
    if !work.skipped_ratings.is_empty() {
        log.warning(format!(
            "{} rating segment(s) not in country:system:value form were skipped",
            work.skipped_ratings.len()
        ));
        for segment in &work.skipped_ratings {
            log.warning_indent(format!("'{}'", segment), 1);
        }
    }

    let rendered = highlight(to_xml_string(&build_tree(&work))?);

    log.info("Checking well-formedness...");
    let valid = match &rendered {
        Rendered::WellFormed(doc) => is_valid(doc),
        Rendered::Malformed(diag) => {
            log.error(format!("Invalid XML: {}", diag.error));
            false
        }
    };
    if valid {
        log.success("XML structure is well-formed");
    }

    Ok((rendered, valid, issues))
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}
