//! Item endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::repos::{Item, ItemChanges, ItemRepo, NewItem};
use crate::http::error::{non_empty, ApiError};
use crate::http::extractors::ValidUuid;
use crate::http::server::AppState;
use crate::models::{Pagination, PaginationParams, Patch, RecordName};

/// Create item request
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: String,
}

impl TryFrom<CreateItemRequest> for NewItem {
    type Error = ApiError;

    fn try_from(req: CreateItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: RecordName::new(&req.name)?,
            description: req.description,
        })
    }
}

/// Update item request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
}

impl TryFrom<UpdateItemRequest> for ItemChanges {
    type Error = ApiError;

    fn try_from(req: UpdateItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name.try_map(|n| RecordName::new(&n))?,
            description: req.description,
        })
    }
}

/// GET /items/ - list items ordered by name
async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let page = Pagination::from(params);
    let mut conn = state.pool.acquire().await?;
    let items = ItemRepo::new(&mut conn).list(page).await?;
    non_empty(items)
}

/// GET /items/id/{id}
async fn get_item_by_id(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Item>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let item = ItemRepo::new(&mut conn).get_by_id(id).await?;
    Ok(Json(item))
}

/// GET /items/name/{name}
async fn get_item_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let item = ItemRepo::new(&mut conn).get_by_name(&name).await?;
    Ok(Json(item))
}

/// POST /items/create
#[instrument(skip(state, req))]
async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let new_item = NewItem::try_from(req)?;
    let mut conn = state.pool.acquire().await?;
    let item = ItemRepo::new(&mut conn).create(new_item).await?;
    Ok(Json(item))
}

/// PUT /items/update/id/{id}
#[instrument(skip(state, req), fields(item_id = %id))]
async fn update_item(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let changes = ItemChanges::try_from(req)?;
    let mut conn = state.pool.acquire().await?;
    let item = ItemRepo::new(&mut conn).update(id, changes).await?;
    Ok(Json(item))
}

/// DELETE /items/delete/id/{id}
#[instrument(skip(state), fields(item_id = %id))]
async fn delete_item(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Item>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let item = ItemRepo::new(&mut conn).delete(id).await?;
    Ok(Json(item))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/", get(list_items))
        .route("/items/id/{id}", get(get_item_by_id))
        .route("/items/name/{name}", get(get_item_by_name))
        .route("/items/create", post(create_item))
        .route("/items/update/id/{id}", put(update_item))
        .route("/items/delete/id/{id}", delete(delete_item))
}
