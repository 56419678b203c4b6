//! Store endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::repos::{NewStore, Store, StoreChanges, StoreRepo};
use crate::http::error::{non_empty, ApiError};
use crate::http::extractors::ValidUuid;
use crate::http::server::AppState;
use crate::models::{Pagination, PaginationParams, Patch, RecordName};

/// Create store request
#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub description: String,
    pub address: String,
}

impl TryFrom<CreateStoreRequest> for NewStore {
    type Error = ApiError;

    fn try_from(req: CreateStoreRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: RecordName::new(&req.name)?,
            description: req.description,
            address: req.address,
        })
    }
}

/// Update store request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStoreRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
}

impl TryFrom<UpdateStoreRequest> for StoreChanges {
    type Error = ApiError;

    fn try_from(req: UpdateStoreRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name.try_map(|n| RecordName::new(&n))?,
            description: req.description,
            address: req.address,
        })
    }
}

/// GET /stores/ - list stores ordered by name
async fn list_stores(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<Store>>, ApiError> {
    let page = Pagination::from(params);
    let mut conn = state.pool.acquire().await?;
    let stores = StoreRepo::new(&mut conn).list(page).await?;
    non_empty(stores)
}

/// GET /stores/id/{id}
async fn get_store_by_id(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Store>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let store = StoreRepo::new(&mut conn).get_by_id(id).await?;
    Ok(Json(store))
}

/// GET /stores/name/{name}
async fn get_store_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Store>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let store = StoreRepo::new(&mut conn).get_by_name(&name).await?;
    Ok(Json(store))
}

/// POST /stores/create
#[instrument(skip(state, req))]
async fn create_store(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStoreRequest>,
) -> Result<Json<Store>, ApiError> {
    let new_store = NewStore::try_from(req)?;
    let mut conn = state.pool.acquire().await?;
    let store = StoreRepo::new(&mut conn).create(new_store).await?;
    Ok(Json(store))
}

/// PUT /stores/update/id/{id}
#[instrument(skip(state, req), fields(store_id = %id))]
async fn update_store(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    Json(req): Json<UpdateStoreRequest>,
) -> Result<Json<Store>, ApiError> {
    let changes = StoreChanges::try_from(req)?;
    let mut conn = state.pool.acquire().await?;
    let store = StoreRepo::new(&mut conn).update(id, changes).await?;
    Ok(Json(store))
}

/// DELETE /stores/delete/id/{id}
#[instrument(skip(state), fields(store_id = %id))]
async fn delete_store(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Store>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let store = StoreRepo::new(&mut conn).delete(id).await?;
    Ok(Json(store))
}

/// Store routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stores", get(list_stores))
        .route("/stores/", get(list_stores))
        .route("/stores/id/{id}", get(get_store_by_id))
        .route("/stores/name/{name}", get(get_store_by_name))
        .route("/stores/create", post(create_store))
        .route("/stores/update/id/{id}", put(update_store))
        .route("/stores/delete/id/{id}", delete(delete_store))
}
