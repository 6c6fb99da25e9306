pub mod fetcher;
pub mod pokeapi;
pub mod types;

pub use fetcher::{CatalogFetcher, FailureKind, FetchError};
pub use pokeapi::PokeApiFetcher;
pub use types::{CatalogItemDetail, CatalogItemSummary, ListEntry, ListPage};
