//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Map;

use crate::catalog::types::Sprites;
use crate::catalog::{CatalogFetcher, CatalogItemDetail, FetchError, ListEntry, ListPage};
use crate::core::browse::BrowseController;

/// Builds a minimal detail record.
pub fn detail(id: u32, name: &str) -> CatalogItemDetail {
    CatalogItemDetail {
        id,
        name: name.to_string(),
        sprites: Sprites::default(),
        stats: Vec::new(),
        types: Vec::new(),
        abilities: Vec::new(),
        extra: Map::new(),
    }
}

/// A page of `count` entries whose names encode their remote position.
pub fn page(offset: u32, count: u32) -> ListPage {
    ListPage {
        results: (offset..offset + count)
            .map(|n| ListEntry {
                name: format!("mon-{}", n + 1),
                url: format!("https://stub/pokemon/{}/", n + 1),
            })
            .collect(),
        ..Default::default()
    }
}

/// A scripted fetcher. List pages are served in the order they were queued;
/// details and searches are looked up by key.
#[derive(Default)]
pub struct StubFetcher {
    pages: Mutex<VecDeque<Result<ListPage, FetchError>>>,
    details: Mutex<HashMap<String, Result<CatalogItemDetail, FetchError>>>,
    searches: Mutex<HashMap<String, Result<CatalogItemDetail, FetchError>>>,
    requested_offsets: Mutex<Vec<u32>>,
    search_calls: Mutex<u32>,
    hang: bool,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetcher whose list and search calls never complete.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn push_page(self, page: Result<ListPage, FetchError>) -> Self {
        self.pages.lock().unwrap().push_back(page);
        self
    }

    pub fn with_detail(self, key: &str, result: Result<CatalogItemDetail, FetchError>) -> Self {
        self.details.lock().unwrap().insert(key.to_string(), result);
        self
    }

    pub fn with_search(self, query: &str, result: Result<CatalogItemDetail, FetchError>) -> Self {
        self.searches.lock().unwrap().insert(query.to_string(), result);
        self
    }

    pub fn requested_offsets(&self) -> Vec<u32> {
        self.requested_offsets.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> u32 {
        *self.search_calls.lock().unwrap()
    }
}

#[async_trait]
impl CatalogFetcher for StubFetcher {
    fn name(&self) -> &str {
        "stub"
    }

    async fn list_page(&self, _page_size: u32, offset: u32) -> Result<ListPage, FetchError> {
        self.requested_offsets.lock().unwrap().push(offset);
        if self.hang {
            futures::future::pending::<()>().await;
        }
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ListPage::default()))
    }

    async fn fetch_detail(&self, url_or_id: &str) -> Result<CatalogItemDetail, FetchError> {
        self.details
            .lock()
            .unwrap()
            .get(url_or_id)
            .cloned()
            .unwrap_or(Err(FetchError::Http { status: 404 }))
    }

    async fn search(&self, query: &str) -> Result<CatalogItemDetail, FetchError> {
        *self.search_calls.lock().unwrap() += 1;
        if self.hang {
            futures::future::pending::<()>().await;
        }
        self.searches
            .lock()
            .unwrap()
            .get(&query.trim().to_lowercase())
            .cloned()
            .unwrap_or(Err(FetchError::NotFound))
    }
}

/// Creates a controller over the given stub, keeping a handle for assertions.
pub fn test_controller(stub: StubFetcher) -> (BrowseController, Arc<StubFetcher>) {
    let stub = Arc::new(stub);
    let controller = BrowseController::new(stub.clone(), crate::core::browse::PAGE_SIZE);
    (controller, stub)
}
