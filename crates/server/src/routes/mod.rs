use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::items::ItemStore;

use crate::openapi::ApiDoc;

pub mod items;

/// State shared by every handler. The store is injected at startup.
#[derive(Clone)]
pub struct ServerState {
    pub items: Arc<dyn ItemStore>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(store: Arc<dyn ItemStore>, cors: CorsLayer) -> Router {
    let state = ServerState { items: store };

    let public = Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json));

    // Collection routes answer with and without the trailing slash
    let item_routes = Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/", get(items::list_items).post(items::create_item))
        .route(
            "/items/:name",
            get(items::get_item)
                .put(items::replace_item)
                .patch(items::patch_item)
                .delete(items::delete_item),
        );

    public
        .merge(item_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
