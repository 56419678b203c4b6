//! Stock endpoints - reports and the add/subtract ledger operation

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::repos::{Stock, StockAdjustment, StockReport, StockRepo};
use crate::http::error::{non_empty, ApiError};
use crate::http::extractors::ValidUuid;
use crate::http::server::AppState;
use crate::models::{Pagination, PaginationParams};

/// Stock change request.
///
/// `available` and `sold` are signed increments; `price`, if present,
/// replaces the stored price.
#[derive(Debug, Deserialize)]
pub struct StockChangeRequest {
    pub item_id: Uuid,
    pub store_id: Uuid,
    #[serde(default)]
    pub available: Option<i64>,
    #[serde(default)]
    pub sold: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl From<StockChangeRequest> for StockAdjustment {
    fn from(req: StockChangeRequest) -> Self {
        Self {
            item_id: req.item_id,
            store_id: req.store_id,
            available: req.available,
            sold: req.sold,
            price: req.price,
        }
    }
}

/// GET /stock/ - all stock rows ordered by item name
async fn list_stock(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<StockReport>>, ApiError> {
    let page = Pagination::from(params);
    let mut conn = state.pool.acquire().await?;
    let rows = StockRepo::new(&mut conn).list(page).await?;
    non_empty(rows)
}

/// GET /stock/items/id/{id} - one item's stock by store
async fn stock_by_item_id(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<StockReport>>, ApiError> {
    let page = Pagination::from(params);
    let mut conn = state.pool.acquire().await?;
    let rows = StockRepo::new(&mut conn).list_for_item(id, page).await?;
    non_empty(rows)
}

/// GET /stock/items/name/{name} - one item's stock by store
async fn stock_by_item_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<StockReport>>, ApiError> {
    let page = Pagination::from(params);
    let mut conn = state.pool.acquire().await?;
    let rows = StockRepo::new(&mut conn)
        .list_for_item_name(&name, page)
        .await?;
    non_empty(rows)
}

/// POST /stock/add - create or merge a stock record
#[instrument(skip(state, req), fields(item_id = %req.item_id, store_id = %req.store_id))]
async fn add_stock(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StockChangeRequest>,
) -> Result<Json<Stock>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let stock = StockRepo::new(&mut conn)
        .adjust(StockAdjustment::from(req))
        .await?;
    Ok(Json(stock))
}

/// Stock routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stock", get(list_stock))
        .route("/stock/", get(list_stock))
        .route("/stock/items/id/{id}", get(stock_by_item_id))
        .route("/stock/items/name/{name}", get(stock_by_item_name))
        .route("/stock/add", post(add_stock))
}
