//! MEC CoreMetadata document builder.
//!
//! ```text
//! Table ──▶ extract ──▶ MecWork ──▶ builder ──▶ Element ──▶ tree ──▶ XML text ──▶ highlight
//!           (normalize)  (immutable)  (layout)     (tree)    (indent)             (Rendered)
//! ```
//!
//! - [`extract`] - normalizes the table into a [`MecWork`](crate::models::MecWork)
//! - [`roles`] - cast and crew aggregation with billing order
//! - [`builder`] - lays the work out as an element tree
//! - [`tree`] - element type and serializer

pub mod builder;
pub mod extract;
pub mod roles;
pub mod tree;

pub use builder::build_tree;
pub use extract::{extract_work, parse_ratings};
pub use roles::{collect_credits, collect_names};
pub use tree::{to_xml_string, Element};

use tracing::debug;

use crate::error::BuildResult;
use crate::models::Table;
use crate::validation::{highlight, Rendered};

/// Prefix of every content identifier in the document.
pub const CONTENT_ID_PREFIX: &str = "md:cid:org:";

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const MD_NAMESPACE: &str = "http://www.movielabs.com/schema/md/v2.6/md";
pub const MDMEC_NAMESPACE: &str = "http://www.movielabs.com/schema/mdmec/v2.6";
pub const SCHEMA_LOCATION: &str = "http://www.movielabs.com/schema/mdmec/v2.6/mdmec-v2.6.xsd";

/// Serialize the MEC document for `table` without the well-formedness pass.
pub fn render_xml(table: &Table) -> BuildResult<String> {
    let work = extract_work(table)?;
    to_xml_string(&build_tree(&work))
}

/// Build the MEC document for `table`.
///
/// The result is tagged: [`Rendered::WellFormed`] carries the document,
/// [`Rendered::Malformed`] carries the raw text plus an annotated preview.
///
/// # Example
/// ```
/// use mecgen::{build_document, Table};
/// use serde_json::json;
///
/// let record = json!({
///     "Language": "en-US", "Title": "Okja", "Summary190": "", "Summary400": "",
///     "ContentID": "OK1", "WorkType": "movie", "ReleaseYear": "2017",
///     "ReleaseDate": "2017.06.28", "AltID_ORG": "A1", "RatingInfo": "US:MPAA:TV-MA",
///     "OriginalLanguage": "ko", "OrgID": "netflix", "DisplayString": "Plan B"
/// });
/// let columns = record.as_object().unwrap().keys().cloned().collect();
/// let table = Table::from_records(columns, vec![record]);
///
/// let rendered = build_document(&table).unwrap();
/// assert!(rendered.is_well_formed());
/// assert!(rendered.document().unwrap().contains("md:cid:org:OK1"));
/// ```
pub fn build_document(table: &Table) -> BuildResult<Rendered> {
    let xml = render_xml(table)?;
    debug!(bytes = xml.len(), "serialized MEC document");
    Ok(highlight(xml))
}
