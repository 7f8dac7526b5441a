//! Table-level checks run before the build.
//!
//! The partner rejects summaries over their length limits and titles without
//! the key art it needs. These checks only report; the builder still emits
//! whatever the table holds.

use serde::Serialize;

use crate::models::{cell, columns, ArtKind, Table};
use crate::normalize::{is_blank, normalize_text};

/// Maximum characters in `Summary190`.
pub const SUMMARY_190_LIMIT: usize = 190;
/// Maximum characters in `Summary400`.
pub const SUMMARY_400_LIMIT: usize = 400;

/// What is wrong with a localized row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    SummaryTooLong {
        column: &'static str,
        length: usize,
        limit: usize,
    },
    MissingArt {
        art: ArtKind,
    },
}

/// A pre-check finding on one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecheckIssue {
    /// 1-based data row.
    pub row: usize,
    pub language: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl std::fmt::Display for PrecheckIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            IssueKind::SummaryTooLong {
                column,
                length,
                limit,
            } => write!(
                f,
                "Row {} ({}): {} has {} characters (limit {})",
                self.row, self.language, column, length, limit
            ),
            IssueKind::MissingArt { art } => write!(
                f,
                "Row {} ({}): missing {} art reference",
                self.row,
                self.language,
                art.as_str()
            ),
        }
    }
}

/// Check every localized row of `table`.
///
/// Rows with an empty language produce no localized block and are not
/// checked.
pub fn precheck(table: &Table, required_art: &[ArtKind]) -> Vec<PrecheckIssue> {
    let mut issues = Vec::new();

    for (i, row) in table.rows().iter().enumerate() {
        let language = normalize_text(cell(row, columns::LANGUAGE));
        if language.is_empty() {
            continue;
        }

        for (column, limit) in [
            (columns::SUMMARY_190, SUMMARY_190_LIMIT),
            (columns::SUMMARY_400, SUMMARY_400_LIMIT),
        ] {
            let length = normalize_text(cell(row, column)).chars().count();
            if length > limit {
                issues.push(PrecheckIssue {
                    row: i + 1,
                    language: language.clone(),
                    kind: IssueKind::SummaryTooLong {
                        column,
                        length,
                        limit,
                    },
                });
            }
        }

        for art in required_art {
            if is_blank(cell(row, art.as_str())) {
                issues.push(PrecheckIssue {
                    row: i + 1,
                    language: language.clone(),
                    kind: IssueKind::MissingArt { art: *art },
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(rows: Vec<serde_json::Value>) -> Table {
        Table::from_records(
            ["Language", "Summary190", "Summary400", "boxart", "hero"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows,
        )
    }

    #[test]
    fn test_clean_rows_have_no_issues() {
        let t = table(vec![json!({
            "Language": "en-US",
            "Summary190": "short",
            "Summary400": "longer",
            "boxart": "b.jpg",
            "hero": "h.jpg"
        })]);
        assert!(precheck(&t, &[ArtKind::Boxart, ArtKind::Hero]).is_empty());
    }

    #[test]
    fn test_summary_limits_count_characters() {
        // 190 Hangul syllables are 570 bytes but exactly at the limit.
        let at_limit = "가".repeat(190);
        let over = "x".repeat(401);
        let t = table(vec![json!({
            "Language": "ko-KR",
            "Summary190": at_limit,
            "Summary400": over,
        })]);

        let issues = precheck(&t, &[]);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].kind,
            IssueKind::SummaryTooLong {
                column: "Summary400",
                length: 401,
                limit: 400
            }
        );
        assert_eq!(issues[0].row, 1);
    }

    #[test]
    fn test_missing_required_art() {
        let t = table(vec![
            json!({ "Language": "en-US", "boxart": "b.jpg", "hero": null }),
            json!({ "Language": "", "boxart": null }),
            json!({ "Language": "fr-FR", "boxart": null, "hero": "h.jpg" }),
        ]);

        let issues = precheck(&t, &[ArtKind::Boxart, ArtKind::Hero]);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].kind, IssueKind::MissingArt { art: ArtKind::Hero });
        assert_eq!(issues[0].language, "en-US");
        assert_eq!(issues[1].row, 3);
        assert_eq!(issues[1].kind, IssueKind::MissingArt { art: ArtKind::Boxart });
        assert!(issues[1].to_string().contains("missing boxart"));
    }

    #[test]
    fn test_empty_string_art_counts_as_missing() {
        let t = table(vec![json!({ "Language": "en-US", "boxart": "", "hero": "h.jpg" })]);

        let issues = precheck(&t, &[ArtKind::Boxart, ArtKind::Hero]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MissingArt { art: ArtKind::Boxart });
    }
}
