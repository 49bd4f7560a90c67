// src/presentation/http/controllers/reviews.rs
use crate::application::{
    commands::reviews::{DeactivateProductReviewsCommand, SubmitReviewCommand},
    dto::{RatingDto, ReviewDto},
    queries::reviews::{RatingsForProductQuery, ReviewsForProductQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitReviewRequest {
    pub header: String,
    pub body: String,
    /// Optional grade between 1.0 and 5.0.
    pub grade: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    responses(
        (status = 200, description = "All active reviews.", body = [ReviewDto])
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<ReviewDto>>> {
    state
        .services
        .review_queries
        .list_reviews()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{slug}/reviews",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Active reviews for the product.", body = [ReviewDto]),
        (status = 404, description = "No such product.", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn reviews_for_product(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<Vec<ReviewDto>>> {
    state
        .services
        .review_queries
        .reviews_for_product(ReviewsForProductQuery { product_slug: slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/reviews/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    request_body = SubmitReviewRequest,
    responses(
        (status = 201, description = "Review recorded; the product average reflects the grade.", body = ReviewDto),
        (status = 404, description = "No such product.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Reviews"
)]
pub async fn submit_review(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(product_id): Path<i64>,
    Json(payload): Json<SubmitReviewRequest>,
) -> HttpResult<(StatusCode, Json<ReviewDto>)> {
    let command = SubmitReviewCommand {
        product_id,
        header: payload.header,
        body: payload.body,
        grade: payload.grade,
    };

    let review = state
        .services
        .review_commands
        .submit_review(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Reviews and ratings deactivated, product rating reset."),
        (status = 404, description = "Nothing to deactivate.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Reviews"
)]
pub async fn deactivate_reviews(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(product_id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .review_commands
        .deactivate_reviews_for_product(&user, DeactivateProductReviewsCommand { product_id })
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "deactivated" })))
}

#[utoipa::path(
    get,
    path = "/api/v1/ratings/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Active rating rows for the product.", body = [RatingDto]),
        (status = 403, description = "Caller may not moderate reviews.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Reviews"
)]
pub async fn ratings_for_product(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(product_id): Path<i64>,
) -> HttpResult<Json<Vec<RatingDto>>> {
    state
        .services
        .review_queries
        .ratings_for_product(&user, RatingsForProductQuery { product_id })
        .await
        .into_http()
        .map(Json)
}
