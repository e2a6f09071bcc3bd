//! HTTP layer: the `/products` endpoints.
//!
//! Thin glue between the query-string parameters and the interpreter plus
//! catalog store. Search responses use the storefront envelope:
//! `{ success, totalProducts, totalPages, currentPage, pageSize, products }`.
//! Store calls are wrapped in an explicit timeout and retried once with a
//! short backoff on transient backend errors; a hung or failing backend
//! surfaces as a generic 500 rather than an indefinite stall.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{CatalogStore, Product, SearchRequest, SearchResults};
use crate::error::VitrineError;
use crate::interpret::QueryInterpreter;
use crate::query::Constraint;

const DEFAULT_PAGE_SIZE: usize = 15;
const MAX_PAGE_SIZE: usize = 100;
const CATEGORY_SAMPLE_SIZE: usize = 10;

/// Timeout and retry settings for store access.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Per-attempt timeout on the store call.
    pub timeout: Duration,
    /// Backoff before the single retry of a transient failure.
    pub retry_backoff: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            timeout: Duration::from_secs(5),
            retry_backoff: Duration::from_millis(200),
        }
    }
}

/// Shared state for the product routes.
#[derive(Clone)]
pub struct AppState {
    /// Catalog backend.
    pub store: Arc<dyn CatalogStore>,
    /// Query interpreter, shared read-only.
    pub interpreter: Arc<QueryInterpreter>,
    /// Store access policy.
    pub settings: StoreSettings,
}

impl AppState {
    /// Create app state with default store settings.
    pub fn new(store: Arc<dyn CatalogStore>, interpreter: Arc<QueryInterpreter>) -> Self {
        AppState {
            store,
            interpreter,
            settings: StoreSettings::default(),
        }
    }
}

/// Build the product API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/search", get(search_products))
        .route("/products/category/:name", get(products_by_category))
        .route("/products/:id", get(get_product))
        .with_state(state)
}

/// Query-string parameters accepted by the product routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsParams {
    /// Free-text search. `query` is accepted as an alias.
    pub search: Option<String>,
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,
    #[serde(default, rename = "pageSize", deserialize_with = "lenient_number")]
    pub page_size: Option<i64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// Accept `page`/`pageSize` as loosely as the storefront always has:
/// a non-numeric value falls back to the default instead of failing the
/// whole request.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

impl ProductsParams {
    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().or(self.query.as_deref())
    }

    fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1) as usize
    }

    fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as usize
    }

    /// Pagination window; saturates so absurd page numbers cannot overflow
    /// the skip computation.
    fn window(&self) -> (usize, usize) {
        let page_size = self.page_size();
        let skip = self.page().saturating_sub(1).saturating_mul(page_size);
        (skip, page_size)
    }
}

/// The storefront response envelope for product pages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub success: bool,
    pub total_products: u64,
    pub total_pages: u64,
    pub current_page: usize,
    pub page_size: usize,
    pub products: Vec<Product>,
}

impl ProductPage {
    fn from_results(results: SearchResults, page: usize, page_size: usize) -> Self {
        ProductPage {
            success: true,
            total_products: results.total_count,
            total_pages: results.total_count.div_ceil(page_size as u64),
            current_page: page,
            page_size,
            products: results.items,
        }
    }
}

/// API error with the `{ success: false, message }` body shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "success": false,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

impl From<VitrineError> for ApiError {
    fn from(err: VitrineError) -> Self {
        match err {
            VitrineError::Query(message) => ApiError {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            VitrineError::NotFound(message) => ApiError {
                status: StatusCode::NOT_FOUND,
                message,
            },
            other => {
                // Backend detail stays in the logs, not in the response.
                warn!(error = %other, "request failed");
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal Server Error".to_string(),
                }
            }
        }
    }
}

/// `GET /products` — interpreted search when a search term is present,
/// plain category browsing otherwise.
async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductsParams>,
) -> Result<Json<ProductPage>, ApiError> {
    match params.search_term() {
        Some(term) if !term.trim().is_empty() => {
            interpreted_search(&state, term, &params).await
        }
        Some(_) => Err(VitrineError::query("Search query is required").into()),
        None => browse(&state, &params).await,
    }
}

/// `GET /products/search` — interpreted search; the term is required.
async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<ProductsParams>,
) -> Result<Json<ProductPage>, ApiError> {
    match params.search_term() {
        Some(term) if !term.trim().is_empty() => {
            interpreted_search(&state, term, &params).await
        }
        _ => Err(VitrineError::query("Search query is required").into()),
    }
}

/// `GET /products/category/{name}` — a random shelf of up to ten products
/// from one category.
async fn products_by_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if name.trim().is_empty() {
        return Err(VitrineError::query("Category is required").into());
    }

    let products = state.store.sample_by_category(&name, CATEGORY_SAMPLE_SIZE).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "products": products,
    })))
}

/// `GET /products/{id}` — fetch one product.
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let product = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| VitrineError::not_found("Product not found"))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "product": product,
    })))
}

async fn interpreted_search(
    state: &AppState,
    term: &str,
    params: &ProductsParams,
) -> Result<Json<ProductPage>, ApiError> {
    let interpreted = state.interpreter.interpret(term)?;
    debug!(
        query = term,
        corrected = %interpreted.corrected_query,
        search_terms = %interpreted.search_terms,
        "interpreted search query"
    );

    let page = params.page();
    let (skip, page_size) = params.window();
    let request = SearchRequest {
        filter: interpreted.filter,
        search_terms: Some(interpreted.search_terms),
        sort: Some(interpreted.sort),
        skip,
        limit: page_size,
    };

    let results = query_with_retry(state, &request).await?;
    info!(
        query = term,
        total = results.total_count,
        page,
        "search completed"
    );
    Ok(Json(ProductPage::from_results(results, page, page_size)))
}

async fn browse(
    state: &AppState,
    params: &ProductsParams,
) -> Result<Json<ProductPage>, ApiError> {
    let page = params.page();
    let (skip, page_size) = params.window();

    let mut request = SearchRequest::paged(skip, page_size);
    if let Some(category) = &params.category {
        request.filter.insert(
            "category",
            Constraint::Equals {
                value: category.clone(),
            },
        );
    }
    if let Some(subcategory) = &params.subcategory {
        request.filter.insert(
            "subcategory",
            Constraint::Equals {
                value: subcategory.clone(),
            },
        );
    }

    let results = query_with_retry(state, &request).await?;
    Ok(Json(ProductPage::from_results(results, page, page_size)))
}

/// Run a store query under the configured timeout, retrying once with
/// backoff on a transient storage failure.
async fn query_with_retry(
    state: &AppState,
    request: &SearchRequest,
) -> Result<SearchResults, VitrineError> {
    match attempt(state, request).await {
        Ok(results) => Ok(results),
        Err(VitrineError::Storage(reason)) => {
            warn!(%reason, "store query failed, retrying once");
            tokio::time::sleep(state.settings.retry_backoff).await;
            attempt(state, request).await
        }
        Err(other) => Err(other),
    }
}

async fn attempt(
    state: &AppState,
    request: &SearchRequest,
) -> Result<SearchResults, VitrineError> {
    match tokio::time::timeout(state.settings.timeout, state.store.search(request)).await {
        Ok(result) => result,
        Err(_) => Err(VitrineError::storage("search backend unavailable (timeout)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamping() {
        let params = ProductsParams {
            page: Some(-3),
            page_size: Some(1000),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);

        let params = ProductsParams {
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 1);
    }

    #[test]
    fn test_window_saturates_on_huge_page() {
        let params = ProductsParams {
            page: Some(i64::MAX),
            page_size: Some(100),
            ..Default::default()
        };
        let (skip, page_size) = params.window();
        assert_eq!(page_size, 100);
        // The skip computation must not overflow, it pins to usize::MAX.
        assert_eq!(skip, usize::MAX);
    }

    #[test]
    fn test_default_page_size() {
        let params = ProductsParams::default();
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_search_alias() {
        let params = ProductsParams {
            query: Some("shoes".into()),
            ..Default::default()
        };
        assert_eq!(params.search_term(), Some("shoes"));

        let params = ProductsParams {
            search: Some("bags".into()),
            query: Some("shoes".into()),
            ..Default::default()
        };
        assert_eq!(params.search_term(), Some("bags"));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let results = SearchResults {
            total_count: 31,
            items: vec![],
        };
        let page = ProductPage::from_results(results, 1, 15);
        assert_eq!(page.total_pages, 3);
    }
}
