use std::fmt;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Serialize;

use super::types::{CatalogItemDetail, ListPage};

/// Errors raised by a catalog fetcher.
/// Classified at the transport boundary so callers never inspect message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No response arrived before the request deadline.
    Timeout,
    /// DNS, connect or other connection-level failure.
    Transport(String),
    /// The remote answered with a non-success status.
    Http { status: u16 },
    /// The search path reported a missing resource (404).
    NotFound,
    /// The body could not be decoded into the expected shape.
    Decode(String),
}

impl FetchError {
    /// Collapses the error into the closed set the presentation layer renders.
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Timeout | FetchError::Transport(_) => FailureKind::Network,
            FetchError::NotFound => FailureKind::NotFound,
            FetchError::Http { .. } | FetchError::Decode(_) => FailureKind::General,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Transport(msg) => write!(f, "network error: {msg}"),
            FetchError::Http { status } => write!(f, "HTTP error (status {status})"),
            FetchError::NotFound => write!(f, "not found"),
            FetchError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Failure kinds exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    NotFound,
    General,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::NotFound => "not_found",
            FailureKind::General => "general",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Returns the name of the backing service.
    fn name(&self) -> &str;

    /// Fetches one page of `{name, url}` entries starting at `offset`.
    async fn list_page(&self, page_size: u32, offset: u32) -> Result<ListPage, FetchError>;

    /// Fetches a detail payload by absolute URL or bare identifier.
    /// A missing item surfaces as `Http { status: 404 }`, not `NotFound`.
    async fn fetch_detail(&self, url_or_id: &str) -> Result<CatalogItemDetail, FetchError>;

    /// Looks an item up by name or number, case-insensitively.
    async fn search(&self, query: &str) -> Result<CatalogItemDetail, FetchError>;

    /// Fetches several details concurrently. All-or-nothing: the first
    /// failing member fails the batch. Results keep the input order.
    async fn fetch_details(&self, refs: &[String]) -> Result<Vec<CatalogItemDetail>, FetchError> {
        try_join_all(refs.iter().map(|r| self.fetch_detail(r))).await
    }
}
