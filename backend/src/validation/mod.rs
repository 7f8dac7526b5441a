//! Well-formedness checking, diagnostics and pre-checks.
//!
//! The checker only answers "does this parse as XML?". Schema conformance
//! against the MEC XSD is left to the partner's ingest.
//!
//! - [`check`] / [`is_valid`] - parse and report
//! - [`highlight`] - tag a document as well-formed or annotate the failure
//! - [`precheck`] - table-level warnings raised before the build
//!
//! # Example
//!
//! ```rust
//! use mecgen::{check, is_valid};
//!
//! assert!(is_valid("<a><b/></a>"));
//! assert!(!is_valid("<a><b></a>"));
//!
//! let err = check("<a>\n<b></a>").unwrap_err();
//! assert_eq!(err.line, 2);
//! ```

pub mod highlight;
pub mod precheck;

pub use highlight::{highlight, Diagnostic, Rendered};
pub use precheck::{precheck, IssueKind, PrecheckIssue, SUMMARY_190_LIMIT, SUMMARY_400_LIMIT};

use crate::error::XmlError;

/// Parse `text` as an XML document.
///
/// A DOCTYPE is accepted; entities it declares are expanded but never
/// validated against.
///
/// # Returns
/// * `Ok(())` if the text is well-formed
/// * `Err(XmlError)` with the parser message and 1-based position otherwise
pub fn check(text: &str) -> Result<(), XmlError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };

    match roxmltree::Document::parse_with_options(text, options) {
        Ok(_) => Ok(()),
        Err(e) => {
            let pos = e.pos();
            Err(XmlError {
                message: e.to_string(),
                line: pos.row as usize,
                column: pos.col as usize,
            })
        }
    }
}

/// Simpler variant of [`check`]: just true/false.
pub fn is_valid(text: &str) -> bool {
    check(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        assert!(is_valid("<a><b/></a>"));
        assert!(is_valid("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<a>\n  <b>x</b>\n</a>\n"));
    }

    #[test]
    fn test_mismatched_tags() {
        assert!(!is_valid("<a><b></a>"));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(!is_valid(""));
        assert!(!is_valid("not xml at all"));
        assert!(!is_valid("<a>"));
        assert!(!is_valid("<x:a/>"));
    }

    #[test]
    fn test_doctype_is_well_formed() {
        assert!(is_valid("<?xml version=\"1.0\"?>\n<!DOCTYPE a>\n<a><b/></a>"));
        assert!(check("<!DOCTYPE a [<!ENTITY t \"Okja\">]>\n<a>&t;</a>").is_ok());
    }

    #[test]
    fn test_doctype_does_not_hide_later_errors() {
        let err = check("<?xml version=\"1.0\"?>\n<!DOCTYPE a>\n<a><b></a>").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_check_reports_position() {
        let err = check("<root>\n  <child>\n</root>").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.column >= 1);
        assert!(!err.message.is_empty());
    }
}
