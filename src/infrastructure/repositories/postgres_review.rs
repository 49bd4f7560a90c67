// src/infrastructure/repositories/postgres_review.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::ProductId;
use crate::domain::review::{
    Grade, NewReview, Rating, RatingId, Review, ReviewBody, ReviewHeader, ReviewId,
    ReviewReadRepository, ReviewWriteRepository,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresReviewWriteRepository {
    pool: PgPool,
}

impl PostgresReviewWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresReviewReadRepository {
    pool: PgPool,
}

impl PostgresReviewReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    id: i64,
    user_id: i64,
    product_id: i64,
    rating_id: Option<i64>,
    header: String,
    body: String,
    created_at: DateTime<Utc>,
    is_active: bool,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DomainError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: ReviewId::new(row.id)?,
            user_id: UserId::new(row.user_id)?,
            product_id: ProductId::new(row.product_id)?,
            rating_id: row.rating_id.map(RatingId::new).transpose()?,
            header: ReviewHeader::new(row.header)?,
            body: ReviewBody::new(row.body)?,
            created_at: row.created_at,
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, FromRow)]
struct RatingRow {
    id: i64,
    grade: f64,
    user_id: i64,
    product_id: i64,
    is_active: bool,
}

impl TryFrom<RatingRow> for Rating {
    type Error = DomainError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        Ok(Rating {
            id: RatingId::new(row.id)?,
            grade: Grade::new(row.grade)?,
            user_id: UserId::new(row.user_id)?,
            product_id: ProductId::new(row.product_id)?,
            is_active: row.is_active,
        })
    }
}

const REVIEW_COLUMNS: &str =
    "id, user_id, product_id, rating_id, header, body, created_at, is_active";

#[async_trait]
impl ReviewWriteRepository for PostgresReviewWriteRepository {
    async fn submit(&self, review: NewReview) -> DomainResult<Review> {
        let NewReview {
            user_id,
            product_id,
            header,
            body,
            grade,
            created_at,
            is_active,
        } = review;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // The rating row, the recomputed product average and the review itself
        // all land in the same transaction.
        let rating_id = match grade {
            Some(grade) => {
                let id = sqlx::query_scalar::<_, i64>(
                    "INSERT INTO ratings (grade, user_id, product_id, is_active)
                     VALUES ($1, $2, $3, TRUE)
                     RETURNING id",
                )
                .bind(grade.value())
                .bind(i64::from(user_id))
                .bind(i64::from(product_id))
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx)?;

                let average = sqlx::query_scalar::<_, f64>(
                    "SELECT COALESCE(AVG(grade), 0)::float8 FROM ratings
                     WHERE product_id = $1 AND is_active = TRUE",
                )
                .bind(i64::from(product_id))
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx)?;

                let updated = sqlx::query("UPDATE products SET rating = $1 WHERE id = $2")
                    .bind(average)
                    .bind(i64::from(product_id))
                    .execute(&mut *tx)
                    .await
                    .map_err(map_sqlx)?;
                if updated.rows_affected() == 0 {
                    return Err(DomainError::NotFound("product not found".into()));
                }

                Some(id)
            }
            None => None,
        };

        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "INSERT INTO reviews (user_id, product_id, rating_id, header, body, created_at, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(i64::from(user_id))
        .bind(i64::from(product_id))
        .bind(rating_id)
        .bind(header.as_str())
        .bind(body.as_str())
        .bind(created_at)
        .bind(is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        Review::try_from(row)
    }

    async fn deactivate_for_product(&self, product_id: ProductId) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Strict order: reviews, then ratings, then the cached product rating.
        // A step that touches no rows aborts the whole operation.
        let reviews = sqlx::query(
            "UPDATE reviews SET is_active = FALSE WHERE product_id = $1 AND is_active = TRUE",
        )
        .bind(i64::from(product_id))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if reviews.rows_affected() == 0 {
            return Err(DomainError::NotFound(
                "no active reviews for product".into(),
            ));
        }

        let ratings = sqlx::query(
            "UPDATE ratings SET is_active = FALSE WHERE product_id = $1 AND is_active = TRUE",
        )
        .bind(i64::from(product_id))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if ratings.rows_affected() == 0 {
            return Err(DomainError::NotFound(
                "no active ratings for product".into(),
            ));
        }

        let product = sqlx::query("UPDATE products SET rating = 0 WHERE id = $1")
            .bind(i64::from(product_id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if product.rows_affected() == 0 {
            return Err(DomainError::NotFound("product not found".into()));
        }

        tx.commit().await.map_err(map_sqlx)
    }
}

#[async_trait]
impl ReviewReadRepository for PostgresReviewReadRepository {
    async fn list_active(&self) -> DomainResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE is_active = TRUE ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn list_for_product(&self, product_id: ProductId) -> DomainResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews
             WHERE product_id = $1 AND is_active = TRUE ORDER BY created_at DESC"
        ))
        .bind(i64::from(product_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn list_ratings_for_product(&self, product_id: ProductId) -> DomainResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            "SELECT id, grade, user_id, product_id, is_active FROM ratings
             WHERE product_id = $1 AND is_active = TRUE ORDER BY id",
        )
        .bind(i64::from(product_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Rating::try_from).collect()
    }
}
