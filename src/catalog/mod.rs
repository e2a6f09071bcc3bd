//! Catalog documents and the store abstraction the interpreter queries.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, VitrineError};
use crate::query::{FilterFragment, SortSpec};

pub use self::memory::MemoryCatalog;

/// A catalog product.
///
/// Field names serialize in camelCase to match the storefront's JSON wire
/// format (`oldPrice`, `createdAt`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable product identifier.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Product title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Top-level category.
    #[serde(default)]
    pub category: String,
    /// Subcategory within the category.
    #[serde(default)]
    pub subcategory: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Tag set.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Current price. Never negative.
    pub price: f64,
    /// Pre-discount price, when on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    /// Average rating in [0, 5].
    #[serde(default)]
    pub rating: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Listing time, used by the "latest" sort.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Validate the catalog invariants: price >= 0 and rating in [0, 5].
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(VitrineError::other("product title is required"));
        }
        if !(self.price >= 0.0) {
            return Err(VitrineError::other(format!(
                "product '{}' has negative price {}",
                self.title, self.price
            )));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(VitrineError::other(format!(
                "product '{}' has rating {} outside [0, 5]",
                self.title, self.rating
            )));
        }
        Ok(())
    }
}

/// A paginated, sorted catalog query.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Filter constraints (empty fragment matches everything).
    pub filter: FilterFragment,
    /// Full-text search terms for the weighted text index; `None` skips
    /// text matching entirely.
    pub search_terms: Option<String>,
    /// Explicit sort; `None` means text-relevance order when search terms
    /// are present, insertion order otherwise.
    pub sort: Option<SortSpec>,
    /// Documents to skip.
    pub skip: usize,
    /// Maximum documents to return.
    pub limit: usize,
}

impl SearchRequest {
    /// Create a request matching everything, with the given page window.
    pub fn paged(skip: usize, limit: usize) -> Self {
        SearchRequest {
            limit,
            skip,
            ..Default::default()
        }
    }
}

/// Results of a catalog query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// Total matching documents before pagination.
    pub total_count: u64,
    /// The requested page of documents.
    pub items: Vec<Product>,
}

/// Abstract catalog store.
///
/// Implementations must support equality/range/set-membership filtering and
/// a text-search operator over the weighted multi-field index (title,
/// description, brand, category, tags).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Execute a filtered, sorted, paginated query.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults>;

    /// Fetch a single product by id.
    async fn get(&self, id: Uuid) -> Result<Option<Product>>;

    /// Random sample of products in a category, for shelf placements.
    async fn sample_by_category(&self, category: &str, size: usize) -> Result<Vec<Product>>;
}
