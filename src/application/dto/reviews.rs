use crate::domain::review::{Rating, Review};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub rating_id: Option<i64>,
    pub header: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.into(),
            user_id: review.user_id.into(),
            product_id: review.product_id.into(),
            rating_id: review.rating_id.map(Into::into),
            header: review.header.into_inner(),
            body: review.body.into_inner(),
            created_at: review.created_at,
            is_active: review.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingDto {
    pub id: i64,
    pub grade: f64,
    pub user_id: i64,
    pub product_id: i64,
    pub is_active: bool,
}

impl From<Rating> for RatingDto {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id.into(),
            grade: rating.grade.into(),
            user_id: rating.user_id.into(),
            product_id: rating.product_id.into(),
            is_active: rating.is_active,
        }
    }
}
