//! PokeAPI fetcher.
//!
//! Endpoints used:
//! - `GET {base}/pokemon?limit=L&offset=O` for the paged list
//! - `GET {base}/pokemon/{idOrName}` for detail and search
//!
//! Every request carries the client-wide timeout; reqwest cancels the
//! transfer when it elapses and we report `FetchError::Timeout`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::catalog::{CatalogFetcher, CatalogItemDetail, FetchError, ListPage};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maps a reqwest error onto the fetch taxonomy.
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

fn http_error(status: StatusCode) -> FetchError {
    FetchError::Http { status: status.as_u16() }
}

/// Search is the one path where a 404 means "no such item".
fn search_error(status: StatusCode) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound,
        other => http_error(other),
    }
}

/// Catalog names and numbers are `[a-z0-9-]`. Anything else is rejected
/// before it can reach the URL path.
fn is_search_term(needle: &str) -> bool {
    !needle.is_empty()
        && needle
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

pub struct PokeApiFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl PokeApiFetcher {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs are used as-is; anything else is treated as an id or name.
    fn detail_url(&self, url_or_id: &str) -> String {
        if url_or_id.starts_with("http") {
            url_or_id.to_string()
        } else {
            format!("{}/pokemon/{}", self.base_url, url_or_id)
        }
    }

    /// Sends a GET and returns the response if its status is a success.
    /// `on_status` turns any other status into the error for this call site.
    async fn get(
        &self,
        url: &str,
        on_status: fn(StatusCode) -> FetchError,
    ) -> Result<reqwest::Response, FetchError> {
        info!("GET {url}");
        let response = self.client.get(url).send().await.map_err(|e| {
            let err = classify(e);
            warn!("Request to {url} failed: {err}");
            err
        })?;

        let status = response.status();
        debug!("Response status for {url}: {status}");
        if status.is_success() {
            Ok(response)
        } else {
            warn!("Remote returned {status} for {url}");
            Err(on_status(status))
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
        response.json::<T>().await.map_err(|e| {
            let err = classify(e);
            warn!("Failed to read response body: {err}");
            err
        })
    }
}

#[async_trait]
impl CatalogFetcher for PokeApiFetcher {
    fn name(&self) -> &str {
        "pokeapi"
    }

    async fn list_page(&self, page_size: u32, offset: u32) -> Result<ListPage, FetchError> {
        let url = format!(
            "{}/pokemon?limit={}&offset={}",
            self.base_url, page_size, offset
        );
        let response = self.get(&url, http_error).await?;

        let page: ListPage = Self::decode(response).await?;
        info!(
            "List page received: {} entries (offset={offset})",
            page.results.len()
        );
        Ok(page)
    }

    async fn fetch_detail(&self, url_or_id: &str) -> Result<CatalogItemDetail, FetchError> {
        let url = self.detail_url(url_or_id);
        let response = self.get(&url, http_error).await?;

        let detail: CatalogItemDetail = Self::decode(response).await?;
        info!("Detail received: {} (#{})", detail.name, detail.id);
        Ok(detail)
    }

    async fn search(&self, query: &str) -> Result<CatalogItemDetail, FetchError> {
        let needle = query.trim().to_lowercase();
        if !is_search_term(&needle) {
            warn!("Rejecting search query {query:?}");
            return Err(FetchError::NotFound);
        }
        let url = format!("{}/pokemon/{}", self.base_url, needle);
        let response = self.get(&url, search_error).await?;

        let detail: CatalogItemDetail = Self::decode(response).await?;
        info!("Search for '{needle}' found {} (#{})", detail.name, detail.id);
        Ok(detail)
    }
}
