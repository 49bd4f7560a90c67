// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{auth, categories, products, reviews},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Json, Router,
    http::Method,
    routing::get,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/auth/register", axum::routing::post(auth::register))
        .route("/api/v1/auth/login", axum::routing::post(auth::login))
        .route("/api/v1/auth/me", get(auth::profile))
        .route(
            "/api/v1/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/v1/categories/{id}",
            axum::routing::put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/api/v1/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/v1/products/by-category/{category_slug}",
            get(products::products_by_category),
        )
        .route(
            "/api/v1/products/{slug}",
            get(products::product_detail)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/api/v1/products/{slug}/reviews",
            get(reviews::reviews_for_product),
        )
        .route("/api/v1/reviews", get(reviews::list_reviews))
        .route(
            "/api/v1/reviews/{product_id}",
            axum::routing::post(reviews::submit_review).delete(reviews::deactivate_reviews),
        )
        .route(
            "/api/v1/ratings/{product_id}",
            get(reviews::ratings_for_product),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health(Extension(state): Extension<HttpState>) -> Json<StatusResponse> {
    let status = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
    {
        Ok(_) => "ok",
        Err(_) => "degraded",
    };
    Json(StatusResponse {
        status: status.into(),
    })
}
