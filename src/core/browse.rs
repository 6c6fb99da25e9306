//! # Browse Controller
//!
//! Owns the paging cursor and the accumulated list of summaries, and drives
//! the catalog fetcher on behalf of the presentation layer.
//!
//! ```text
//! BrowseController
//! ├── fetcher: Arc<dyn CatalogFetcher>  // remote catalog
//! ├── page_size: u32                    // entries per page (20)
//! ├── items: Vec<CatalogItemSummary>    // append-only until reset
//! ├── cursor: u32                       // offset of the next page
//! ├── is_loading: bool                  // a list/search call is in flight
//! ├── last_error: Option<BrowseError>   // sticky until next op or reset
//! └── exhausted: bool                   // remote returned an empty page
//! ```
//!
//! Every operation takes `&mut self`, so two loads can never overlap on one
//! controller. Failures come back as a [`FailureKind`]; nothing escapes as a
//! panic or a raw transport error.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::catalog::{
    CatalogFetcher, CatalogItemDetail, CatalogItemSummary, FailureKind, FetchError,
};

pub const PAGE_SIZE: u32 = 20;

/// What the user was doing when a failure happened; picks the copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Detail,
    Search,
}

/// User-facing copy for a failure. The one table every layer renders from.
pub fn failure_message(op: Operation, kind: FailureKind) -> &'static str {
    match (op, kind) {
        (Operation::Search, FailureKind::NotFound) => "No entry found. Check the name or number.",
        (_, FailureKind::Network) => "Could not reach the catalog. Check your internet connection.",
        (Operation::Load, _) => "Could not load the catalog.",
        (Operation::Detail, _) => "Could not load the details for that entry.",
        (Operation::Search, _) => "Search failed.",
    }
}

/// A classified failure plus the copy to show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseError {
    pub kind: FailureKind,
    pub message: String,
}

impl BrowseError {
    pub fn new(op: Operation, kind: FailureKind) -> Self {
        Self {
            kind,
            message: failure_message(op, kind).to_string(),
        }
    }
}

impl fmt::Display for BrowseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for BrowseError {}

/// Clears the loading flag when dropped, including when the in-flight
/// future is dropped before it completes.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn new(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct BrowseController {
    fetcher: Arc<dyn CatalogFetcher>,
    page_size: u32,
    items: Vec<CatalogItemSummary>,
    cursor: u32,
    is_loading: bool,
    last_error: Option<BrowseError>,
    exhausted: bool,
}

impl BrowseController {
    pub fn new(fetcher: Arc<dyn CatalogFetcher>, page_size: u32) -> Self {
        Self {
            fetcher,
            page_size,
            items: Vec::new(),
            cursor: 0,
            is_loading: false,
            last_error: None,
            exhausted: false,
        }
    }

    pub fn items(&self) -> &[CatalogItemSummary] {
        &self.items
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&BrowseError> {
        self.last_error.as_ref()
    }

    /// True once the remote has returned an empty page.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Looks up a loaded summary by its assigned id.
    pub fn find(&self, id: u32) -> Option<&CatalogItemSummary> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Loads the next page, or the first page when `reset` is set.
    ///
    /// Returns the number of summaries added. On failure `items` and
    /// `cursor` are left as they were and `last_error` is set.
    pub async fn load_page(&mut self, reset: bool) -> Result<usize, FailureKind> {
        if reset {
            self.items.clear();
            self.cursor = 0;
            self.exhausted = false;
        } else if self.exhausted {
            debug!("Catalog exhausted at offset {}, skipping fetch", self.cursor);
            return Ok(0);
        }

        let _loading = LoadingGuard::new(&mut self.is_loading);
        self.last_error = None;

        let offset = self.cursor;
        info!("Loading page: offset={offset}, reset={reset}");

        let page = match self.fetcher.list_page(self.page_size, offset).await {
            Ok(page) => page,
            Err(err) => {
                warn!("Failed to load page at offset {offset}: {err}");
                let kind = err.kind();
                self.last_error = Some(BrowseError::new(Operation::Load, kind));
                return Err(kind);
            }
        };

        let summaries = CatalogItemSummary::from_page(page.results, offset);
        let added = summaries.len();
        if added == 0 {
            self.exhausted = true;
        }

        if reset {
            self.items = summaries;
            self.cursor = self.page_size;
        } else {
            self.items.extend(summaries);
            self.cursor += self.page_size;
        }

        info!(
            "Loaded {added} entries, {} total, next offset {}",
            self.items.len(),
            self.cursor
        );
        Ok(added)
    }

    /// Fetches the full record for a summary. Leaves loading and error
    /// state alone; the caller renders the returned kind.
    pub async fn fetch_detail(
        &self,
        summary: &CatalogItemSummary,
    ) -> Result<CatalogItemDetail, FailureKind> {
        debug!("Fetching detail for {} (#{})", summary.name, summary.id);
        self.fetcher
            .fetch_detail(&summary.source_url)
            .await
            .map_err(|err| {
                warn!("Failed to fetch detail for {}: {err}", summary.name);
                match err.kind() {
                    FailureKind::Network => FailureKind::Network,
                    _ => FailureKind::General,
                }
            })
    }

    /// Looks an item up by name or number.
    pub async fn search(&mut self, query: &str) -> Result<CatalogItemDetail, FailureKind> {
        let _loading = LoadingGuard::new(&mut self.is_loading);
        self.last_error = None;

        let query = query.trim();
        let result = if query.is_empty() {
            Err(FetchError::NotFound)
        } else {
            info!("Searching for '{query}'");
            self.fetcher.search(query).await
        };

        result.map_err(|err| {
            warn!("Search for '{query}' failed: {err}");
            let kind = err.kind();
            self.last_error = Some(BrowseError::new(Operation::Search, kind));
            kind
        })
    }

    /// Drops the loaded list and error without fetching anything.
    pub fn reset(&mut self) {
        debug!("Resetting browse state ({} items)", self.items.len());
        self.items.clear();
        self.cursor = 0;
        self.last_error = None;
        self.exhausted = false;
    }
}
