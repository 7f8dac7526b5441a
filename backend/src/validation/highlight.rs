//! Diagnostic view of a generated document.
//!
//! A document either parses, or it comes back as a [`Diagnostic`] whose
//! `preview` numbers every line and marks the one the parser stopped on.
//! The preview is for people; it is never handed out as a document.

use serde::Serialize;

use super::check;

/// Outcome of serializing a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "content", rename_all = "snake_case")]
pub enum Rendered {
    /// The document parses.
    WellFormed(String),
    /// The document does not parse.
    Malformed(Diagnostic),
}

/// A parse failure with its annotated preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// The text that failed to parse.
    pub document: String,
    /// Parser message.
    pub error: String,
    /// 1-based line of the failure, when the parser reported one.
    pub line: Option<usize>,
    /// 1-based column of the failure, when the parser reported one.
    pub column: Option<usize>,
    /// Summary line followed by the numbered source.
    pub preview: String,
}

impl Rendered {
    pub fn is_well_formed(&self) -> bool {
        matches!(self, Rendered::WellFormed(_))
    }

    /// The document, only when it is well-formed.
    pub fn document(&self) -> Option<&str> {
        match self {
            Rendered::WellFormed(doc) => Some(doc),
            Rendered::Malformed(_) => None,
        }
    }

    /// Text to show a reviewer: the document, or the diagnostic preview.
    pub fn preview(&self) -> &str {
        match self {
            Rendered::WellFormed(doc) => doc,
            Rendered::Malformed(diag) => &diag.preview,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Rendered::WellFormed(_) => None,
            Rendered::Malformed(diag) => Some(diag),
        }
    }
}

/// Tag `document` as well-formed, or annotate where it breaks.
pub fn highlight(document: String) -> Rendered {
    match check(&document) {
        Ok(()) => Rendered::WellFormed(document),
        Err(err) => {
            // Parsers report 0 when they have no position.
            let line = Some(err.line).filter(|l| *l > 0);
            let column = Some(err.column).filter(|c| *c > 0);
            let preview = annotate(&document, &err.message, line);
            Rendered::Malformed(Diagnostic {
                document,
                error: err.message,
                line,
                column,
                preview,
            })
        }
    }
}

/// Number every line of `document`, marking `bad_line` with `>`.
fn annotate(document: &str, error: &str, bad_line: Option<usize>) -> String {
    let mut out = format!("Invalid XML: {}\n", error);
    for (i, line) in document.lines().enumerate() {
        let number = i + 1;
        let marker = if bad_line == Some(number) { '>' } else { ' ' };
        out.push_str(&format!("{}{:4}: {}\n", marker, number, line));
    }
    out
}
