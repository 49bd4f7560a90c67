use super::ReviewQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, RatingDto, ReviewDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{product::ProductId, slug::Slug},
};

pub struct ReviewsForProductQuery {
    pub product_slug: String,
}

pub struct RatingsForProductQuery {
    pub product_id: i64,
}

impl ReviewQueryService {
    pub async fn list_reviews(&self) -> ApplicationResult<Vec<ReviewDto>> {
        let reviews = self.read_repo.list_active().await?;
        Ok(reviews.into_iter().map(Into::into).collect())
    }

    pub async fn reviews_for_product(
        &self,
        query: ReviewsForProductQuery,
    ) -> ApplicationResult<Vec<ReviewDto>> {
        let slug = Slug::new(query.product_slug)?;
        let product = self
            .product_repo
            .find_by_slug(&slug)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;

        let reviews = self.read_repo.list_for_product(product.id).await?;
        Ok(reviews.into_iter().map(Into::into).collect())
    }

    /// Moderation visibility: every active rating row for the product,
    /// linked to a review or not.
    pub async fn ratings_for_product(
        &self,
        actor: &AuthenticatedUser,
        query: RatingsForProductQuery,
    ) -> ApplicationResult<Vec<RatingDto>> {
        ensure_capability(actor, "reviews", "moderate")?;

        let product_id = ProductId::new(query.product_id)?;
        let ratings = self.read_repo.list_ratings_for_product(product_id).await?;
        Ok(ratings.into_iter().map(Into::into).collect())
    }
}
