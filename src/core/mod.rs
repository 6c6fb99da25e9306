//! # Core Application Logic
//!
//! Browsing state and favorites. Knows nothing about the terminal; the shell
//! drives these types and renders whatever they return.
//!
//! ```text
//!     ┌────────────────────┐        ┌────────────────────┐
//!     │  BrowseController  │        │   FavoritesStore   │
//!     │  cursor, items,    │        │  details by id,    │
//!     │  loading, error    │        │  insertion order   │
//!     └─────────┬──────────┘        └────────────────────┘
//!               │ Arc<dyn CatalogFetcher>
//!               ▼
//!     ┌────────────────────┐
//!     │   catalog fetcher  │ ──► remote service
//!     └────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`browse`]: paging, search and detail lookups with classified failures
//! - [`favorites`]: the in-memory favorites set
//! - [`config`]: settings resolution

pub mod browse;
pub mod config;
pub mod favorites;

pub use browse::{BrowseController, BrowseError, Operation, PAGE_SIZE};
pub use favorites::FavoritesStore;
