//! Domain models for the mecgen conversion pipeline.
//!
//! - [`Table`] - the input: one row per language variant of a title
//! - [`MecWork`] - the normalized work, ready to be laid out as XML
//! - [`WorkType`] - movie / season / episode classifier
//! - [`ArtKind`] - the four art reference purposes
//! - [`Role`] / [`JobFunction`] - cast and crew columns and their billing family

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single table row: column name -> cell.
pub type Row = Map<String, Value>;

// =============================================================================
// Column names
// =============================================================================

/// Column names read by the builder.
pub mod columns {
    pub const LANGUAGE: &str = "Language";
    pub const TITLE: &str = "Title";
    pub const SUMMARY_190: &str = "Summary190";
    pub const SUMMARY_400: &str = "Summary400";
    pub const GENRE_PREFIX: &str = "Genre";

    pub const CONTENT_ID: &str = "ContentID";
    pub const WORK_TYPE: &str = "WorkType";
    pub const RELEASE_YEAR: &str = "ReleaseYear";
    pub const RELEASE_DATE: &str = "ReleaseDate";
    pub const ALT_ID_ORG: &str = "AltID_ORG";
    pub const RATING_INFO: &str = "RatingInfo";
    pub const ORIGINAL_LANGUAGE: &str = "OriginalLanguage";
    pub const ORG_ID: &str = "OrgID";
    pub const DISPLAY_STRING: &str = "DisplayString";
    pub const SEQUENCE_NUMBER: &str = "SequenceNumber";
    pub const PARENT_CONTENT_ID: &str = "ParentContentID";

    /// Columns without which no document is produced.
    pub const REQUIRED: [&str; 13] = [
        LANGUAGE,
        TITLE,
        SUMMARY_190,
        SUMMARY_400,
        CONTENT_ID,
        WORK_TYPE,
        RELEASE_YEAR,
        RELEASE_DATE,
        ALT_ID_ORG,
        RATING_INFO,
        ORIGINAL_LANGUAGE,
        ORG_ID,
        DISPLAY_STRING,
    ];
}

// =============================================================================
// Table
// =============================================================================

/// Ordered in-memory table.
///
/// Column order is kept separately from the rows because genre columns are
/// emitted in the order they appear in the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from JSON objects.
    ///
    /// Non-object records are ignored.
    pub fn from_records(columns: Vec<String>, records: Vec<Value>) -> Self {
        let rows = records
            .into_iter()
            .filter_map(|record| match record {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        Self { columns, rows }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, sole source of work-level fields.
    pub fn base_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Genre columns in table order.
    pub fn genre_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| c.starts_with(columns::GENRE_PREFIX))
    }
}

/// Cell lookup that treats an absent key as a missing value.
pub fn cell<'a>(row: &'a Row, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&Value::Null)
}

// =============================================================================
// Work Type
// =============================================================================

/// Classifier driving art resolutions and the parent/sequence branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkType {
    Movie,
    Season,
    Episode,
    /// Any other free text, kept lowercased.
    Other(String),
}

impl WorkType {
    /// Case-insensitive parse; surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();
        match normalized.as_str() {
            "movie" => Self::Movie,
            "season" => Self::Season,
            "episode" => Self::Episode,
            _ => Self::Other(normalized),
        }
    }

    /// Seasons and episodes carry sequence and parent information.
    pub fn is_serial(&self) -> bool {
        matches!(self, Self::Season | Self::Episode)
    }

    /// Relationship to the parent content, for serial work types.
    pub fn parent_relationship(&self) -> Option<&'static str> {
        match self {
            Self::Season => Some("isseasonof"),
            Self::Episode => Some("isepisodeof"),
            _ => None,
        }
    }
}

// =============================================================================
// Art
// =============================================================================

/// Purpose of an art reference. Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtKind {
    Boxart,
    Cover,
    Hero,
    Poster,
}

impl ArtKind {
    pub const ALL: [ArtKind; 4] = [Self::Boxart, Self::Cover, Self::Hero, Self::Poster];

    /// Column name, also used as the `purpose` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boxart => "boxart",
            Self::Cover => "cover",
            Self::Hero => "hero",
            Self::Poster => "poster",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "boxart" => Some(Self::Boxart),
            "cover" => Some(Self::Cover),
            "hero" => Some(Self::Hero),
            "poster" => Some(Self::Poster),
            _ => None,
        }
    }

    /// Resolution the partner expects for this art kind.
    pub fn resolution(&self, work_type: &WorkType) -> &'static str {
        match (self, work_type) {
            (Self::Boxart, WorkType::Movie) => "1920x2560",
            (Self::Boxart, _) => "2560x1920",
            (Self::Poster, _) => "2000x3000",
            (Self::Cover, WorkType::Episode) => "1920x1080",
            (Self::Cover, _) | (Self::Hero, _) => "3840x2160",
        }
    }
}

// =============================================================================
// Cast & Crew
// =============================================================================

/// Billing family. Each family numbers its entries independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobFunction {
    Director,
    Writer,
    Actor,
}

impl JobFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Director => "Director",
            Self::Writer => "Writer",
            Self::Actor => "Actor",
        }
    }
}

/// A cast or crew column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Director,
    Writer,
    /// `Actor1`..`Actor6`.
    Actor(u8),
}

impl Role {
    /// Output order of person entries.
    pub const ALL: [Role; 8] = [
        Self::Director,
        Self::Writer,
        Self::Actor(1),
        Self::Actor(2),
        Self::Actor(3),
        Self::Actor(4),
        Self::Actor(5),
        Self::Actor(6),
    ];

    pub fn column(&self) -> String {
        match self {
            Self::Director => "Director".to_string(),
            Self::Writer => "Writer".to_string(),
            Self::Actor(n) => format!("Actor{}", n),
        }
    }

    pub fn job_function(&self) -> JobFunction {
        match self {
            Self::Director => JobFunction::Director,
            Self::Writer => JobFunction::Writer,
            Self::Actor(_) => JobFunction::Actor,
        }
    }
}

// =============================================================================
// Normalized Work
// =============================================================================

/// An art reference on a localized block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtReference {
    pub kind: ArtKind,
    pub resolution: &'static str,
    pub value: String,
}

/// One per-language block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedInfo {
    pub language: String,
    pub title: String,
    pub art: Vec<ArtReference>,
    pub summary_190: String,
    pub summary_400: String,
    pub genres: Vec<String>,
}

/// A `country:system:value` rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub country: String,
    pub system: String,
    pub value: String,
}

/// A person's name in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedName {
    pub language: String,
    pub name: String,
}

/// A cast or crew entry with its billing position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credit {
    pub role: Role,
    pub job_function: JobFunction,
    pub billing_order: u32,
    pub names: Vec<LocalizedName>,
}

/// Link from a season or episode to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentLink {
    pub relationship: &'static str,
    pub content_id: String,
}

/// The fully normalized work. Every string here is final output text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MecWork {
    pub content_id: String,
    /// Work type text as written in the table.
    pub work_type_text: String,
    pub work_type: WorkType,
    pub localized: Vec<LocalizedInfo>,
    pub release_year: String,
    pub release_date: String,
    pub alt_id: String,
    pub ratings: Vec<Rating>,
    /// Rating segments that did not split into three parts.
    pub skipped_ratings: Vec<String>,
    pub credits: Vec<Credit>,
    pub original_language: String,
    pub org_id: String,
    pub sequence_number: Option<String>,
    pub parent: Option<ParentLink>,
    pub display_string: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_work_type_parse_is_case_insensitive() {
        assert_eq!(WorkType::parse("Movie"), WorkType::Movie);
        assert_eq!(WorkType::parse(" EPISODE "), WorkType::Episode);
        assert_eq!(WorkType::parse("season"), WorkType::Season);
        assert_eq!(WorkType::parse("Short"), WorkType::Other("short".into()));
        assert!(WorkType::Episode.is_serial());
        assert!(!WorkType::Movie.is_serial());
    }

    #[test]
    fn test_art_resolutions() {
        let movie = WorkType::Movie;
        let episode = WorkType::Episode;
        let season = WorkType::Season;

        assert_eq!(ArtKind::Boxart.resolution(&movie), "1920x2560");
        assert_eq!(ArtKind::Boxart.resolution(&episode), "2560x1920");
        assert_eq!(ArtKind::Boxart.resolution(&season), "2560x1920");
        assert_eq!(ArtKind::Poster.resolution(&episode), "2000x3000");
        assert_eq!(ArtKind::Cover.resolution(&episode), "1920x1080");
        assert_eq!(ArtKind::Cover.resolution(&season), "3840x2160");
        assert_eq!(ArtKind::Hero.resolution(&movie), "3840x2160");
        assert_eq!(ArtKind::Cover.resolution(&movie), "3840x2160");

        let other = WorkType::parse("short");
        assert_eq!(ArtKind::Boxart.resolution(&other), "2560x1920");
        assert_eq!(ArtKind::Cover.resolution(&other), "3840x2160");
        assert_eq!(ArtKind::Poster.resolution(&other), "2000x3000");
    }

    #[test]
    fn test_role_columns_and_families() {
        assert_eq!(Role::Actor(3).column(), "Actor3");
        assert_eq!(Role::Actor(3).job_function(), JobFunction::Actor);
        assert_eq!(Role::Writer.job_function().as_str(), "Writer");
    }

    #[test]
    fn test_table_genre_columns_keep_order() {
        let table = Table::from_records(
            vec!["Language".into(), "Genre2".into(), "Title".into(), "Genre1".into()],
            vec![json!({ "Language": "en-US" }), json!("not a row")],
        );
        let genres: Vec<&str> = table.genre_columns().collect();
        assert_eq!(genres, vec!["Genre2", "Genre1"]);
        assert_eq!(table.len(), 1);
        assert!(cell(&table.rows()[0], "Title").is_null());
    }
}
