//! Cast and crew aggregation.
//!
//! Each role column is reduced over all rows to a language -> name mapping
//! (first-seen language order, last non-empty name wins), empty mappings are
//! dropped, and billing order is numbered per [`JobFunction`].

use std::collections::HashMap;

use crate::models::{cell, columns, Credit, JobFunction, LocalizedName, Role, Table};
use crate::normalize::normalize_text;

/// Names for one role column across every row of the table.
pub fn collect_names(table: &Table, role: Role) -> Vec<LocalizedName> {
    let column = role.column();

    table
        .rows()
        .iter()
        .map(|row| {
            (
                normalize_text(cell(row, columns::LANGUAGE)),
                normalize_text(cell(row, &column)),
            )
        })
        .filter(|(_, name)| !name.is_empty())
        .fold(Vec::new(), |mut names: Vec<LocalizedName>, (language, name)| {
            match names.iter_mut().find(|n| n.language == language) {
                Some(existing) => existing.name = name,
                None => names.push(LocalizedName { language, name }),
            }
            names
        })
}

/// Person entries in [`Role::ALL`] order, with per-family billing order.
pub fn collect_credits(table: &Table) -> Vec<Credit> {
    let mut counters: HashMap<JobFunction, u32> = HashMap::new();

    Role::ALL
        .iter()
        .map(|&role| (role, collect_names(table, role)))
        .filter(|(_, names)| !names.is_empty())
        .map(|(role, names)| {
            let job_function = role.job_function();
            let counter = counters.entry(job_function).or_insert(0);
            *counter += 1;
            Credit {
                role,
                job_function,
                billing_order: *counter,
                names,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(columns: &[&str], rows: Vec<serde_json::Value>) -> Table {
        Table::from_records(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn test_names_merge_by_language() {
        let t = table(
            &["Language", "Director"],
            vec![
                json!({ "Language": "en-US", "Director": "Bong Joon-ho" }),
                json!({ "Language": "ko-KR", "Director": "봉준호" }),
                json!({ "Language": "fr-FR", "Director": null }),
            ],
        );

        let names = collect_names(&t, Role::Director);
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].language, "en-US");
        assert_eq!(names[0].name, "Bong Joon-ho");
        assert_eq!(names[1].language, "ko-KR");
        assert_eq!(names[1].name, "봉준호");
    }

    #[test]
    fn test_repeated_language_keeps_position_and_last_name() {
        let t = table(
            &["Language", "Writer"],
            vec![
                json!({ "Language": "en-US", "Writer": "First" }),
                json!({ "Language": "ja-JP", "Writer": "Ichi" }),
                json!({ "Language": "en-US", "Writer": "Second" }),
            ],
        );

        let names = collect_names(&t, Role::Writer);
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].language, "en-US");
        assert_eq!(names[0].name, "Second");
    }

    #[test]
    fn test_missing_column_yields_nothing() {
        let t = table(&["Language"], vec![json!({ "Language": "en-US" })]);
        assert!(collect_names(&t, Role::Actor(4)).is_empty());
        assert!(collect_credits(&t).is_empty());
    }

    #[test]
    fn test_billing_order_per_job_function() {
        let t = table(
            &["Language", "Director", "Actor1", "Actor2"],
            vec![json!({ "Language": "en-US", "Director": "C", "Actor1": "A", "Actor2": "B" })],
        );

        let credits = collect_credits(&t);
        assert_eq!(credits.len(), 3);

        assert_eq!(credits[0].job_function, JobFunction::Director);
        assert_eq!(credits[0].billing_order, 1);

        assert_eq!(credits[1].role, Role::Actor(1));
        assert_eq!(credits[1].billing_order, 1);
        assert_eq!(credits[1].names[0].name, "A");

        assert_eq!(credits[2].role, Role::Actor(2));
        assert_eq!(credits[2].billing_order, 2);
        assert_eq!(credits[2].names[0].name, "B");
    }

    #[test]
    fn test_skipped_actor_does_not_consume_billing_slot() {
        let t = table(
            &["Language", "Actor1", "Actor2", "Actor3"],
            vec![json!({ "Language": "en-US", "Actor1": "A", "Actor2": "", "Actor3": "C" })],
        );

        let credits = collect_credits(&t);
        assert_eq!(credits.len(), 2);
        assert_eq!(credits[1].role, Role::Actor(3));
        assert_eq!(credits[1].billing_order, 2);
    }
}
