use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use service::items::Item;

use crate::errors::ApiError;
use crate::routes::ServerState;

/// Success envelope shared by every mutating route.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub message: &'static str,
    pub item: Item,
}

impl ItemResponse {
    fn new(message: &'static str, item: Item) -> Json<Self> {
        Json(Self { message, item })
    }
}

#[utoipa::path(get, path = "/items/", tag = "items", responses((status = 200, description = "All items keyed by name")))]
pub async fn list_items(State(state): State<ServerState>) -> Json<HashMap<String, Item>> {
    Json(state.items.list().await)
}

#[utoipa::path(
    get, path = "/items/{name}", tag = "items",
    params(("name" = String, Path, description = "Item name")),
    responses((status = 200, description = "OK", body = crate::openapi::ItemDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc))
)]
pub async fn get_item(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<Item>, ApiError> {
    state
        .items
        .get(&name)
        .await
        .map(Json)
        .ok_or_else(|| service::errors::ServiceError::not_found("item").into())
}

#[utoipa::path(
    post, path = "/items/", tag = "items",
    request_body = crate::openapi::ItemDoc,
    responses((status = 200, description = "Item created", body = crate::openapi::ItemResponseDoc), (status = 400, description = "Item already exists", body = crate::openapi::ErrorDoc), (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc))
)]
pub async fn create_item(
    State(state): State<ServerState>,
    payload: Result<Json<Item>, JsonRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let Json(item) = payload?;
    let created = state.items.create(item).await?;
    Ok(ItemResponse::new("Item created", created))
}

#[utoipa::path(
    put, path = "/items/{name}", tag = "items",
    params(("name" = String, Path, description = "Item name")),
    request_body = crate::openapi::ItemDoc,
    responses((status = 200, description = "Item replaced", body = crate::openapi::ItemResponseDoc), (status = 404, description = "Item not found", body = crate::openapi::ErrorDoc), (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc))
)]
pub async fn replace_item(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    payload: Result<Json<Item>, JsonRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let Json(item) = payload?;
    let replaced = state.items.replace(&name, item).await?;
    Ok(ItemResponse::new("Item replaced", replaced))
}

#[utoipa::path(
    patch, path = "/items/{name}", tag = "items",
    params(("name" = String, Path, description = "Item name")),
    request_body = crate::openapi::ItemPatchDoc,
    responses((status = 200, description = "Item updated", body = crate::openapi::ItemResponseDoc), (status = 404, description = "Item not found", body = crate::openapi::ErrorDoc), (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc))
)]
pub async fn patch_item(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let Json(updates) = payload?;
    let updated = state.items.partial_update(&name, updates).await?;
    Ok(ItemResponse::new("Item updated", updated))
}

#[utoipa::path(
    delete, path = "/items/{name}", tag = "items",
    params(("name" = String, Path, description = "Item name")),
    responses((status = 200, description = "Item deleted", body = crate::openapi::ItemResponseDoc), (status = 404, description = "Item not found", body = crate::openapi::ErrorDoc))
)]
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let deleted = state.items.delete(&name).await?;
    Ok(ItemResponse::new("Item deleted", deleted))
}
