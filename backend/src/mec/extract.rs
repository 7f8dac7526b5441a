//! Table -> [`MecWork`] normalization pass.
//!
//! Every cell the document needs is normalized here, before any element is
//! created. Work-level fields come from the base row only.

use tracing::debug;

use super::roles::collect_credits;
use super::CONTENT_ID_PREFIX;
use crate::error::{BuildError, BuildResult};
use crate::models::{
    cell, columns, ArtKind, ArtReference, LocalizedInfo, MecWork, ParentLink, Rating, Row, Table,
    WorkType,
};
use crate::normalize::{normalize_date, normalize_text};

/// Normalize `table` into a [`MecWork`].
///
/// Fails when the table is empty or a required column is absent.
pub fn extract_work(table: &Table) -> BuildResult<MecWork> {
    let base = table.base_row().ok_or(BuildError::EmptyTable)?;
    ensure_required_columns(table, base)?;

    let work_type_text = normalize_text(cell(base, columns::WORK_TYPE));
    let work_type = WorkType::parse(&work_type_text);

    let localized: Vec<LocalizedInfo> = table
        .rows()
        .iter()
        .filter_map(|row| localized_info(table, row, &work_type))
        .collect();
    debug!(blocks = localized.len(), work_type = %work_type_text, "collected localized blocks");

    let (ratings, skipped_ratings) = parse_ratings(&normalize_text(cell(base, columns::RATING_INFO)));
    let credits = collect_credits(table);

    let (sequence_number, parent) = if work_type.is_serial() {
        let sequence = non_empty(normalize_text(cell(base, columns::SEQUENCE_NUMBER)));
        let parent = non_empty(normalize_text(cell(base, columns::PARENT_CONTENT_ID))).and_then(
            |id| {
                work_type.parent_relationship().map(|relationship| ParentLink {
                    relationship,
                    content_id: format!("{}{}", CONTENT_ID_PREFIX, id),
                })
            },
        );
        (sequence, parent)
    } else {
        (None, None)
    };

    Ok(MecWork {
        content_id: format!(
            "{}{}",
            CONTENT_ID_PREFIX,
            normalize_text(cell(base, columns::CONTENT_ID))
        ),
        work_type_text,
        work_type,
        localized,
        release_year: normalize_text(cell(base, columns::RELEASE_YEAR)),
        release_date: normalize_date(cell(base, columns::RELEASE_DATE)),
        alt_id: normalize_text(cell(base, columns::ALT_ID_ORG)),
        ratings,
        skipped_ratings,
        credits,
        original_language: normalize_text(cell(base, columns::ORIGINAL_LANGUAGE)),
        org_id: normalize_text(cell(base, columns::ORG_ID)),
        sequence_number,
        parent,
        display_string: normalize_text(cell(base, columns::DISPLAY_STRING)),
    })
}

/// A required column must be declared by the table or present on the base row.
fn ensure_required_columns(table: &Table, base: &Row) -> BuildResult<()> {
    match columns::REQUIRED
        .iter()
        .find(|c| !table.has_column(c) && !base.contains_key(**c))
    {
        Some(missing) => Err(BuildError::MissingField(missing.to_string())),
        None => Ok(()),
    }
}

fn localized_info(table: &Table, row: &Row, work_type: &WorkType) -> Option<LocalizedInfo> {
    let language = normalize_text(cell(row, columns::LANGUAGE));
    if language.is_empty() {
        return None;
    }

    let art = ArtKind::ALL
        .iter()
        .filter(|kind| !cell(row, kind.as_str()).is_null())
        .map(|kind| ArtReference {
            kind: *kind,
            resolution: kind.resolution(work_type),
            value: normalize_text(cell(row, kind.as_str())),
        })
        .collect();

    let genres = table
        .genre_columns()
        .map(|column| normalize_text(cell(row, column)))
        .filter(|id| !id.is_empty())
        .collect();

    Some(LocalizedInfo {
        language,
        title: normalize_text(cell(row, columns::TITLE)),
        art,
        summary_190: normalize_text(cell(row, columns::SUMMARY_190)),
        summary_400: normalize_text(cell(row, columns::SUMMARY_400)),
        genres,
    })
}

/// Split `country:system:value` triples separated by `;`.
///
/// Returns the parsed ratings and the non-empty segments that were skipped.
pub fn parse_ratings(info: &str) -> (Vec<Rating>, Vec<String>) {
    let mut ratings = Vec::new();
    let mut skipped = Vec::new();

    for segment in info.split(';').map(str::trim) {
        let parts: Vec<&str> = segment.split(':').collect();
        match parts.as_slice() {
            [country, system, value] => ratings.push(Rating {
                country: country.to_string(),
                system: system.to_string(),
                value: value.to_string(),
            }),
            _ if segment.is_empty() => {}
            _ => skipped.push(segment.to_string()),
        }
    }

    (ratings, skipped)
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn columns_of(record: &Value) -> Vec<String> {
        record
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn base_record() -> Value {
        json!({
            "Language": "en-US",
            "Title": "The Host",
            "Summary190": "Short",
            "Summary400": "Long",
            "ContentID": "TH001",
            "WorkType": "Movie",
            "ReleaseYear": 2006.0,
            "ReleaseDate": "2006.07.27",
            "AltID_ORG": "ALT-1",
            "RatingInfo": "US:MPAA:R",
            "OriginalLanguage": "ko",
            "OrgID": "org-9",
            "DisplayString": "Showbox"
        })
    }

    #[test]
    fn test_work_level_fields_are_normalized() {
        let record = base_record();
        let table = Table::from_records(columns_of(&record), vec![record]);
        let work = extract_work(&table).unwrap();

        assert_eq!(work.content_id, "md:cid:org:TH001");
        assert_eq!(work.work_type, WorkType::Movie);
        assert_eq!(work.work_type_text, "Movie");
        assert_eq!(work.release_year, "2006");
        assert_eq!(work.release_date, "2006-07-27");
        assert_eq!(work.ratings.len(), 1);
        assert!(work.sequence_number.is_none());
        assert!(work.parent.is_none());
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let table = Table::new(vec!["Language".into()]);
        assert_eq!(extract_work(&table), Err(BuildError::EmptyTable));
    }

    #[test]
    fn test_missing_required_column_is_reported() {
        let mut record = base_record();
        record.as_object_mut().unwrap().remove("ContentID");
        let table = Table::from_records(columns_of(&record), vec![record]);

        assert_eq!(
            extract_work(&table),
            Err(BuildError::MissingField("ContentID".into()))
        );
    }

    #[test]
    fn test_null_required_cell_is_emitted_empty() {
        let mut record = base_record();
        record["OrgID"] = Value::Null;
        let table = Table::from_records(columns_of(&record), vec![record]);

        assert_eq!(extract_work(&table).unwrap().org_id, "");
    }

    #[test]
    fn test_rows_without_language_are_not_localized() {
        let record = base_record();
        let mut second = base_record();
        second["Language"] = json!("");
        let table = Table::from_records(columns_of(&record), vec![record, second]);

        assert_eq!(extract_work(&table).unwrap().localized.len(), 1);
    }

    #[test]
    fn test_base_row_without_language_still_supplies_work_fields() {
        let mut record = base_record();
        record["Language"] = Value::Null;
        let table = Table::from_records(columns_of(&record), vec![record]);
        let work = extract_work(&table).unwrap();

        assert!(work.localized.is_empty());
        assert_eq!(work.content_id, "md:cid:org:TH001");
    }

    #[test]
    fn test_serial_fields_only_for_season_and_episode() {
        let mut record = base_record();
        record["WorkType"] = json!("Season");
        record["SequenceNumber"] = json!(2.0);
        record["ParentContentID"] = json!("SER1");
        let table = Table::from_records(columns_of(&record), vec![record.clone()]);
        let work = extract_work(&table).unwrap();

        assert_eq!(work.sequence_number.as_deref(), Some("2"));
        let parent = work.parent.unwrap();
        assert_eq!(parent.relationship, "isseasonof");
        assert_eq!(parent.content_id, "md:cid:org:SER1");

        record["WorkType"] = json!("movie");
        let table = Table::from_records(columns_of(&record), vec![record]);
        let work = extract_work(&table).unwrap();
        assert!(work.sequence_number.is_none());
        assert!(work.parent.is_none());
    }

    #[test]
    fn test_parse_ratings_skips_malformed_segments() {
        let (ratings, skipped) = parse_ratings("US:MPAA:PG;KR:KMRB:12");
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].country, "KR");
        assert_eq!(ratings[1].system, "KMRB");
        assert_eq!(ratings[1].value, "12");
        assert!(skipped.is_empty());

        let (ratings, skipped) = parse_ratings("US:MPAA; KR:KMRB:12 ;");
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].country, "KR");
        assert_eq!(ratings[0].value, "12");
        assert_eq!(skipped, vec!["US:MPAA".to_string()]);
    }

    #[test]
    fn test_parse_ratings_empty_info() {
        let (ratings, skipped) = parse_ratings("");
        assert!(ratings.is_empty());
        assert!(skipped.is_empty());
    }
}
