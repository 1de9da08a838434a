//! Payload shapes for the external book catalog
//!
//! Upstream records are modeled permissively: every field is optional and
//! unknown fields are ignored, so a partial upstream document never fails
//! the decode. The response types are the simplified projections this
//! gateway serves to its own clients.

use serde::{Deserialize, Serialize};

/// A text field the catalog serves either as a plain string or as an
/// object carrying the text under a `value` key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogText {
    Plain(String),
    Wrapped { value: Option<String> },
}

impl CatalogText {
    /// Collapse both upstream shapes to the plain string.
    pub fn into_plain(self) -> Option<String> {
        match self {
            CatalogText::Plain(text) => Some(text),
            CatalogText::Wrapped { value } => value,
        }
    }
}

/// Upstream book search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub num_found: Option<u64>,
    #[serde(default)]
    pub docs: Vec<BookDoc>,
}

/// One document from the book search projection
/// (`key,title,author_name,first_publish_year,author_key`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_key: Option<Vec<String>>,
}

/// Upstream list of an author's works
#[derive(Debug, Clone, Deserialize)]
pub struct WorksResponse {
    #[serde(default)]
    pub entries: Vec<WorkEntry>,
}

/// One work entry as the catalog serves it
#[derive(Debug, Clone, Deserialize)]
pub struct WorkEntry {
    pub title: Option<String>,
    pub key: Option<String>,
    pub description: Option<CatalogText>,
}

/// Simplified work projection served by this gateway
#[derive(Debug, Clone, Serialize)]
pub struct WorkSummary {
    pub title: Option<String>,
    pub key: Option<String>,
    pub description: Option<String>,
}

impl From<WorkEntry> for WorkSummary {
    fn from(entry: WorkEntry) -> Self {
        Self {
            title: entry.title,
            key: entry.key,
            description: entry.description.and_then(CatalogText::into_plain),
        }
    }
}

/// Merged book search payload served by this gateway
#[derive(Debug, Clone, Serialize)]
pub struct SearchBooksResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_found: Option<u64>,
    pub docs: Vec<BookDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_books_by_author: Option<Vec<WorkSummary>>,
}

/// Upstream canonical author record
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorRecord {
    pub key: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    pub birth_date: Option<String>,
    pub bio: Option<CatalogText>,
}

/// Upstream author search response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSearchResponse {
    #[serde(default)]
    pub docs: Vec<AuthorSearchDoc>,
}

/// One document from the author search, carrying the aggregate statistics
/// the canonical record lacks
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSearchDoc {
    pub key: Option<String>,
    pub top_work: Option<String>,
    pub work_count: Option<u64>,
    #[serde(default)]
    pub top_subjects: Vec<String>,
    pub ratings_average: Option<f64>,
    pub ratings_count: Option<u64>,
}

/// Author profile served by this gateway
///
/// Statistics fields stay null when the name-based search produced no
/// matching entry; that is not an error.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorProfile {
    pub key: String,
    pub name: Option<String>,
    pub alternate_names: Vec<String>,
    pub birth_date: Option<String>,
    pub bio: Option<String>,
    pub top_work: Option<String>,
    pub work_count: Option<u64>,
    pub top_subjects: Vec<String>,
    pub ratings_average: Option<f64>,
    pub ratings_count: Option<u64>,
}

/// Cover image size accepted by the cover host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    /// Parse the `size` query parameter case-insensitively; anything
    /// outside {S, M, L}, including an absent value, falls back to L.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_uppercase).as_deref() {
            Some("S") => CoverSize::Small,
            Some("M") => CoverSize::Medium,
            _ => CoverSize::Large,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_text_plain_string_normalizes() {
        let text: CatalogText = serde_json::from_value(json!("a plain blurb")).unwrap();
        assert_eq!(text.into_plain(), Some("a plain blurb".to_string()));
    }

    #[test]
    fn catalog_text_wrapped_object_normalizes() {
        let text: CatalogText =
            serde_json::from_value(json!({"type": "/type/text", "value": "a wrapped blurb"}))
                .unwrap();
        assert_eq!(text.into_plain(), Some("a wrapped blurb".to_string()));
    }

    #[test]
    fn work_summary_has_one_description_shape_for_both_inputs() {
        let plain: WorkEntry = serde_json::from_value(json!({
            "title": "The Hobbit",
            "key": "/works/OL262758W",
            "description": "text"
        }))
        .unwrap();
        let wrapped: WorkEntry = serde_json::from_value(json!({
            "title": "The Hobbit",
            "key": "/works/OL262758W",
            "description": {"type": "/type/text", "value": "text"}
        }))
        .unwrap();

        let plain = WorkSummary::from(plain);
        let wrapped = WorkSummary::from(wrapped);
        assert_eq!(plain.description, Some("text".to_string()));
        assert_eq!(wrapped.description, Some("text".to_string()));
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            serde_json::to_value(&wrapped).unwrap()
        );
    }

    #[test]
    fn work_summary_without_description_stays_absent() {
        let entry: WorkEntry =
            serde_json::from_value(json!({"title": "Untitled", "key": "/works/OL1W"})).unwrap();
        assert_eq!(WorkSummary::from(entry).description, None);
    }

    #[test]
    fn book_doc_tolerates_missing_fields() {
        let doc: BookDoc = serde_json::from_value(json!({"title": "Dune"})).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Dune"));
        assert!(doc.author_key.is_none());
    }

    #[test]
    fn merged_search_response_carries_only_the_projection() {
        // The merged payload is a deliberate projection: num_found plus the
        // docs (and the secondary field when present), not the upstream
        // envelope's extra metadata.
        let merged = SearchBooksResponse {
            num_found: Some(3),
            docs: vec![],
            other_books_by_author: None,
        };

        let body = serde_json::to_value(&merged).unwrap();
        let keys: std::collections::BTreeSet<&str> = body
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let expected: std::collections::BTreeSet<&str> =
            ["docs", "num_found"].into_iter().collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn search_response_decode_ignores_upstream_envelope_metadata() {
        let search: SearchResponse = serde_json::from_value(json!({
            "numFound": 3,
            "num_found": 3,
            "start": 0,
            "q": "tolkien",
            "docs": [{"title": "The Hobbit"}]
        }))
        .unwrap();

        assert_eq!(search.num_found, Some(3));
        assert_eq!(search.docs.len(), 1);
    }

    #[test]
    fn cover_size_parses_known_values_case_insensitively() {
        assert_eq!(CoverSize::parse(Some("s")), CoverSize::Small);
        assert_eq!(CoverSize::parse(Some("M")), CoverSize::Medium);
        assert_eq!(CoverSize::parse(Some("l")), CoverSize::Large);
    }

    #[test]
    fn cover_size_defaults_to_large() {
        assert_eq!(CoverSize::parse(None), CoverSize::Large);
        assert_eq!(CoverSize::parse(Some("X")), CoverSize::Large);
        assert_eq!(CoverSize::parse(Some("")), CoverSize::Large);
    }
}
