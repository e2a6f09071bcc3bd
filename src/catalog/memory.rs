//! In-memory catalog store.
//!
//! A linear-scan store good for a few thousand products: filter
//! evaluation, weighted multi-field text scoring, sorting, and pagination,
//! all over a `RwLock<Vec<Product>>` snapshot. The text index weights
//! mirror the storefront's document index: title 10, brand 8, description,
//! tags, and category 5 each.

use std::path::Path;

use ahash::AHashSet;
use parking_lot::RwLock;
use rand::seq::IteratorRandom;
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

use crate::catalog::{CatalogStore, Product, SearchRequest, SearchResults};
use crate::error::{Result, VitrineError};
use crate::query::{Constraint, FilterFragment, SortField, SortOrder, SortSpec};

const WEIGHT_TITLE: f64 = 10.0;
const WEIGHT_BRAND: f64 = 8.0;
const WEIGHT_DESCRIPTION: f64 = 5.0;
const WEIGHT_TAGS: f64 = 5.0;
const WEIGHT_CATEGORY: f64 = 5.0;

/// In-memory catalog backed by a product vector.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        MemoryCatalog::default()
    }

    /// Create a catalog from a product list, validating every product.
    pub fn with_products(products: Vec<Product>) -> Result<Self> {
        for product in &products {
            product.validate()?;
        }
        Ok(MemoryCatalog {
            products: RwLock::new(products),
        })
    }

    /// Load a catalog from a JSON file containing a product array.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VitrineError::config(format!(
                "failed to read products file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let products: Vec<Product> = serde_json::from_str(&content).map_err(|e| {
            VitrineError::config(format!(
                "failed to parse products file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::with_products(products)
    }

    /// Insert a product after validating it.
    pub fn insert(&self, product: Product) -> Result<()> {
        product.validate()?;
        self.products.write().push(product);
        Ok(())
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryCatalog {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let terms: Vec<String> = request
            .search_terms
            .as_deref()
            .map(tokenize)
            .unwrap_or_default();

        let snapshot = self.products.read().clone();

        let mut matched: Vec<(Product, f64)> = snapshot
            .into_iter()
            .filter(|product| matches_filter(product, &request.filter))
            .filter_map(|product| {
                if terms.is_empty() {
                    Some((product, 0.0))
                } else {
                    let score = text_score(&product, &terms);
                    (score > 0.0).then_some((product, score))
                }
            })
            .collect();

        match request.sort {
            Some(sort) => sort_products(&mut matched, sort),
            // No explicit sort: relevance order when text terms are
            // present, insertion order otherwise.
            None => {
                if !terms.is_empty() {
                    matched.sort_by(|a, b| b.1.total_cmp(&a.1));
                }
            }
        }

        let total_count = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(request.skip)
            .take(request.limit)
            .map(|(product, _)| product)
            .collect();

        Ok(SearchResults { total_count, items })
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>> {
        Ok(self.products.read().iter().find(|p| p.id == id).cloned())
    }

    async fn sample_by_category(&self, category: &str, size: usize) -> Result<Vec<Product>> {
        let snapshot = self.products.read().clone();
        let sampled = snapshot
            .into_iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .choose_multiple(&mut rand::rng(), size);
        Ok(sampled)
    }
}

/// Split text into lowercase word terms.
fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Weighted text-index score: each query term that appears in a field
/// contributes that field's weight.
fn text_score(product: &Product, terms: &[String]) -> f64 {
    let title: AHashSet<String> = tokenize(&product.title).into_iter().collect();
    let brand: AHashSet<String> = tokenize(&product.brand).into_iter().collect();
    let description: AHashSet<String> = tokenize(&product.description).into_iter().collect();
    let category: AHashSet<String> = tokenize(&product.category).into_iter().collect();
    let tags: AHashSet<String> = product
        .tags
        .iter()
        .flat_map(|t| tokenize(t))
        .collect();

    let mut score = 0.0;
    for term in terms {
        if title.contains(term) {
            score += WEIGHT_TITLE;
        }
        if brand.contains(term) {
            score += WEIGHT_BRAND;
        }
        if description.contains(term) {
            score += WEIGHT_DESCRIPTION;
        }
        if tags.contains(term) {
            score += WEIGHT_TAGS;
        }
        if category.contains(term) {
            score += WEIGHT_CATEGORY;
        }
    }
    score
}

fn matches_filter(product: &Product, filter: &FilterFragment) -> bool {
    let all_clauses = filter
        .clauses
        .iter()
        .all(|c| matches_constraint(product, &c.field, &c.constraint));
    if !all_clauses {
        return false;
    }
    if filter.any_of.is_empty() {
        return true;
    }
    filter
        .any_of
        .iter()
        .any(|c| matches_constraint(product, &c.field, &c.constraint))
}

fn matches_constraint(product: &Product, field: &str, constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Range { min, max } => match numeric_field(product, field) {
            Some(value) => {
                min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
            }
            None => false,
        },
        Constraint::Equals { value } => text_field(product, field)
            .iter()
            .any(|v| v.eq_ignore_ascii_case(value)),
        Constraint::AnyIn { values } => {
            let field_values = text_field(product, field);
            values.iter().any(|wanted| {
                field_values
                    .iter()
                    .any(|v| v.eq_ignore_ascii_case(wanted))
            })
        }
        Constraint::Contains { value } => {
            let needle = value.to_lowercase();
            text_field(product, field)
                .iter()
                .any(|v| v.to_lowercase().contains(&needle))
        }
        Constraint::ContainsAny { values } => {
            let haystacks: Vec<String> = text_field(product, field)
                .iter()
                .map(|v| v.to_lowercase())
                .collect();
            values.iter().any(|wanted| {
                let needle = wanted.to_lowercase();
                haystacks.iter().any(|h| h.contains(&needle))
            })
        }
    }
}

fn numeric_field(product: &Product, field: &str) -> Option<f64> {
    match field {
        "price" => Some(product.price),
        "oldPrice" => product.old_price,
        "rating" => Some(product.rating),
        "stock" => Some(product.stock as f64),
        _ => None,
    }
}

fn text_field(product: &Product, field: &str) -> Vec<String> {
    match field {
        "title" => vec![product.title.clone()],
        "description" => vec![product.description.clone()],
        "category" => vec![product.category.clone()],
        "subcategory" => vec![product.subcategory.clone()],
        "brand" => vec![product.brand.clone()],
        "tags" => product.tags.clone(),
        _ => Vec::new(),
    }
}

fn sort_products(matched: &mut [(Product, f64)], sort: SortSpec) {
    matched.sort_by(|(a, _), (b, _)| {
        let ordering = match sort.field {
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
