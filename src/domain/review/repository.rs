use crate::domain::errors::DomainResult;
use crate::domain::product::ProductId;
use crate::domain::review::entity::{NewReview, Rating, Review};
use async_trait::async_trait;

#[async_trait]
pub trait ReviewWriteRepository: Send + Sync {
    /// Persist a review and, when it carries a grade, the backing rating row,
    /// recomputing the product's cached average grade. One unit of work: on
    /// any failure nothing is persisted and the product rating is untouched.
    async fn submit(&self, review: NewReview) -> DomainResult<Review>;

    /// Moderation path. Deactivates every review for the product, then every
    /// rating for the product (linked to a review or not), then resets the
    /// product's cached rating to 0 — atomically, in that order. Each step
    /// that matches no rows aborts the whole operation with NotFound.
    async fn deactivate_for_product(&self, product_id: ProductId) -> DomainResult<()>;
}

#[async_trait]
pub trait ReviewReadRepository: Send + Sync {
    async fn list_active(&self) -> DomainResult<Vec<Review>>;
    async fn list_for_product(&self, product_id: ProductId) -> DomainResult<Vec<Review>>;
    async fn list_ratings_for_product(&self, product_id: ProductId) -> DomainResult<Vec<Rating>>;
}
