// src/application/commands/reviews/submit.rs
use super::service::ReviewCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, ReviewDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        product::ProductId,
        review::{Grade, NewReview, ReviewBody, ReviewHeader},
    },
};

pub struct SubmitReviewCommand {
    pub product_id: i64,
    pub header: String,
    pub body: String,
    pub grade: Option<f64>,
}

impl ReviewCommandService {
    /// Persists the review, the optional rating row, and the recomputed
    /// product average as one unit of work (the write repository owns the
    /// transaction boundary).
    pub async fn submit_review(
        &self,
        actor: &AuthenticatedUser,
        command: SubmitReviewCommand,
    ) -> ApplicationResult<ReviewDto> {
        ensure_capability(actor, "reviews", "create")?;

        // Tokens can outlive the account; resolve the caller against the
        // store before writing on their behalf.
        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| ApplicationError::unauthorized("user is not active"))?;

        let product_id = ProductId::new(command.product_id)?;
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;

        let header = ReviewHeader::new(command.header)?;
        let body = ReviewBody::new(command.body)?;
        let grade = command.grade.map(Grade::new).transpose()?;

        let new_review = NewReview {
            user_id: user.id,
            product_id: product.id,
            header,
            body,
            grade,
            created_at: self.clock.now(),
            is_active: true,
        };

        let review = self.write_repo.submit(new_review).await?;
        Ok(review.into())
    }
}
