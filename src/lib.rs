//! # Vitrine
//!
//! Free-text product search for an e-commerce catalog.
//!
//! The heart of the crate is the [`interpret::QueryInterpreter`], a
//! request-scoped pipeline that turns a raw search string into a typed
//! catalog query:
//!
//! 1. normalization and tokenization
//! 2. per-token spelling correction against a product vocabulary
//! 3. lightweight part-of-speech tagging
//! 4. intent classification (sort preference from query adjectives)
//! 5. price-range extraction ("under 500", "between 100 and 500")
//! 6. fuzzy feature/brand/category matching via edit distance
//! 7. synonym expansion
//! 8. filter and search-term assembly
//!
//! The resulting [`query::FilterFragment`] and sort specification are
//! executed against a [`catalog::CatalogStore`], which supports weighted
//! multi-field text search, filtering, sorting, and pagination. An
//! in-memory store implementation and an HTTP layer exposing the
//! `/products` endpoints round out the crate.

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod http;
pub mod interpret;
pub mod query;
pub mod spelling;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
