use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ItemDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: bool,
}

/// Any subset of item fields; unknown keys are ignored.
#[derive(ToSchema)]
pub struct ItemPatchDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

#[derive(ToSchema)]
pub struct ItemResponseDoc {
    pub message: String,
    pub item: ItemDoc,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub detail: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::items::list_items,
        crate::routes::items::get_item,
        crate::routes::items::create_item,
        crate::routes::items::replace_item,
        crate::routes::items::patch_item,
        crate::routes::items::delete_item,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            ItemPatchDoc,
            ItemResponseDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;
