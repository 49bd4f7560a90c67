// src/presentation/http/controllers/products.rs
use crate::application::{
    commands::products::{CreateProductCommand, DeleteProductCommand, UpdateProductCommand},
    dto::ProductDto,
    queries::products::{ProductDetailQuery, ProductsByCategoryQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use utoipa::ToSchema;

// Maps an explicit JSON null to Some(None) while a missing field stays None.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    /// Price in minor currency units.
    pub price: i64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category_id: i64,
}

/// `image_url` distinguishes absent from null: omitting the field keeps the
/// current value, sending null clears it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    pub category_id: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Active products with stock on hand.", body = [ProductDto])
    ),
    tag = "Products"
)]
pub async fn list_products(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<ProductDto>>> {
    state
        .services
        .product_queries
        .list_products()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/products/by-category/{category_slug}",
    params(("category_slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "Listed products in the category and its direct subcategories.", body = [ProductDto]),
        (status = 404, description = "No such category.", body = ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn products_by_category(
    Extension(state): Extension<HttpState>,
    Path(category_slug): Path<String>,
) -> HttpResult<Json<Vec<ProductDto>>> {
    state
        .services
        .product_queries
        .products_by_category(ProductsByCategoryQuery { category_slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product detail.", body = ProductDto),
        (status = 404, description = "No such product.", body = ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn product_detail(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<ProductDto>> {
    state
        .services
        .product_queries
        .product_detail(ProductDetailQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created.", body = ProductDto),
        (status = 404, description = "No such category.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateProductRequest>,
) -> HttpResult<(StatusCode, Json<ProductDto>)> {
    let command = CreateProductCommand {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        stock: payload.stock,
        image_url: payload.image_url,
        category_id: payload.category_id,
    };

    let product = state
        .services
        .product_commands
        .create_product(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated.", body = ProductDto),
        (status = 404, description = "No such product.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> HttpResult<Json<ProductDto>> {
    let command = UpdateProductCommand {
        slug,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        stock: payload.stock,
        image_url: payload.image_url,
        category_id: payload.category_id,
    };

    state
        .services
        .product_commands
        .update_product(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product deactivated."),
        (status = 404, description = "No such product.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .product_commands
        .delete_product(&user, DeleteProductCommand { slug })
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "deleted" })))
}
