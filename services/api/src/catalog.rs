//! Outbound client for the external book catalog
//!
//! This module owns transport only: request construction, status checking,
//! and decoding upstream JSON into the gateway's payload shapes. Calls are
//! sequential and are never retried; every transport or decode failure
//! surfaces as a [`CatalogError`] for the handler to convert.

use reqwest::Client;
use std::env;
use thiserror::Error;
use tracing::info;

use crate::models::catalog::{
    AuthorProfile, AuthorRecord, AuthorSearchDoc, AuthorSearchResponse, BookDoc, CatalogText,
    CoverSize, SearchBooksResponse, SearchResponse, WorkSummary, WorksResponse,
};

/// Field projection requested from the book search endpoint
const SEARCH_FIELDS: &str = "key,title,author_name,first_publish_year,author_key";

/// How many alternate names and top subjects an author profile keeps
const AUTHOR_LIST_LIMIT: usize = 5;

/// Catalog endpoints configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub base_url: String,
    /// Base URL of the cover image host
    pub covers_base_url: String,
}

impl CatalogConfig {
    /// Create a new CatalogConfig from environment variables
    ///
    /// # Environment Variables
    /// - `CATALOG_BASE_URL`: catalog API base (default: `https://openlibrary.org`)
    /// - `CATALOG_COVERS_BASE_URL`: cover host base (default: `https://covers.openlibrary.org`)
    pub fn from_env() -> Self {
        let base_url = env::var("CATALOG_BASE_URL")
            .unwrap_or_else(|_| "https://openlibrary.org".to_string());
        let covers_base_url = env::var("CATALOG_COVERS_BASE_URL")
            .unwrap_or_else(|_| "https://covers.openlibrary.org".to_string());

        Self {
            base_url,
            covers_base_url,
        }
    }
}

/// Errors raised while talking to the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Network failure or non-success status from the catalog
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream payload did not decode into the expected shape
    #[error("invalid catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the external book catalog
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Keyword search for books, enriched with the first author's work list
    ///
    /// When the first matching document carries an author key, a second
    /// sequential call fetches that author's works and attaches them under
    /// `other_books_by_author`. Zero matches is success with an empty list
    /// and no secondary field.
    pub async fn search_books(&self, query: &str) -> Result<SearchBooksResponse, CatalogError> {
        info!("Searching catalog for: {}", query);

        let url = format!("{}/search.json", self.config.base_url);
        let search: SearchResponse = self
            .fetch(self.http.get(&url).query(&[("q", query), ("fields", SEARCH_FIELDS)]))
            .await?;

        let other_books = match first_author_key(&search) {
            Some(author_key) => Some(self.works_by_author(&author_key).await?),
            None => None,
        };

        Ok(merge_search(search, other_books))
    }

    /// Title-scoped search returning the first matching document, if any
    pub async fn find_book_by_title(&self, title: &str) -> Result<Option<BookDoc>, CatalogError> {
        info!("Looking up book by title: {}", title);

        let url = format!("{}/search.json", self.config.base_url);
        let search: SearchResponse = self
            .fetch(self.http.get(&url).query(&[("title", title), ("fields", SEARCH_FIELDS)]))
            .await?;

        Ok(search.docs.into_iter().next())
    }

    /// Fetch an author's works as simplified summaries
    pub async fn works_by_author(&self, author_key: &str) -> Result<Vec<WorkSummary>, CatalogError> {
        info!("Fetching works for author: {}", author_key);

        let url = format!("{}/authors/{}/works.json", self.config.base_url, author_key);
        let works: WorksResponse = self.fetch(self.http.get(&url)).await?;

        Ok(works.entries.into_iter().map(WorkSummary::from).collect())
    }

    /// Two-step author profile aggregation
    ///
    /// Step 1 fetches the canonical record by key; step 2 runs a name-based
    /// author search and scans it for the same key to recover the aggregate
    /// statistics the canonical record lacks. A miss in step 2 leaves the
    /// statistics null.
    pub async fn author_details(&self, author_key: &str) -> Result<AuthorProfile, CatalogError> {
        info!("Fetching author profile: {}", author_key);

        let url = format!("{}/authors/{}.json", self.config.base_url, author_key);
        let record: AuthorRecord = self.fetch(self.http.get(&url)).await?;

        let summary = match record.name.clone() {
            Some(name) => {
                let url = format!("{}/search/authors.json", self.config.base_url);
                let search: AuthorSearchResponse =
                    self.fetch(self.http.get(&url).query(&[("q", name.as_str())])).await?;
                find_author_summary(search, author_key)
            }
            None => None,
        };

        Ok(build_author_profile(record, summary))
    }

    /// Deterministic cover image URL for a cover identifier and size
    pub fn cover_url(&self, cover_id: u64, size: CoverSize) -> String {
        format!(
            "{}/b/id/{}-{}.jpg",
            self.config.covers_base_url,
            cover_id,
            size.as_str()
        )
    }

    /// Issue one request, check the status, and decode the JSON body
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CatalogError> {
        let body = request
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }
}

/// Author key of the first search document, when present
fn first_author_key(search: &SearchResponse) -> Option<String> {
    search
        .docs
        .first()
        .and_then(|doc| doc.author_key.as_ref())
        .and_then(|keys| keys.first())
        .cloned()
}

/// Merge the search result with the optional secondary work list
fn merge_search(
    search: SearchResponse,
    other_books: Option<Vec<WorkSummary>>,
) -> SearchBooksResponse {
    SearchBooksResponse {
        num_found: search.num_found,
        docs: search.docs,
        other_books_by_author: other_books,
    }
}

/// Scan the author search for the entry matching the requested key
fn find_author_summary(
    search: AuthorSearchResponse,
    author_key: &str,
) -> Option<AuthorSearchDoc> {
    search
        .docs
        .into_iter()
        .find(|doc| doc.key.as_deref() == Some(author_key))
}

/// Assemble the profile from the canonical record and the optional
/// statistics entry, applying the truncations and key normalization
fn build_author_profile(
    record: AuthorRecord,
    summary: Option<AuthorSearchDoc>,
) -> AuthorProfile {
    let key = record
        .key
        .as_deref()
        .map(|k| k.strip_prefix("/authors/").unwrap_or(k).to_string())
        .unwrap_or_default();

    let mut alternate_names = record.alternate_names;
    alternate_names.truncate(AUTHOR_LIST_LIMIT);

    let (top_work, work_count, mut top_subjects, ratings_average, ratings_count) = match summary {
        Some(doc) => (
            doc.top_work,
            doc.work_count,
            doc.top_subjects,
            doc.ratings_average,
            doc.ratings_count,
        ),
        None => (None, None, Vec::new(), None, None),
    };
    top_subjects.truncate(AUTHOR_LIST_LIMIT);

    AuthorProfile {
        key,
        name: record.name,
        alternate_names,
        birth_date: record.birth_date,
        bio: record.bio.and_then(CatalogText::into_plain),
        top_work,
        work_count,
        top_subjects,
        ratings_average,
        ratings_count,
    }
}
