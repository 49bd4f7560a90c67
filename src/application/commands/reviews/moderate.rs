// src/application/commands/reviews/moderate.rs
use super::service::ReviewCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::AuthenticatedUser,
        error::ApplicationResult,
    },
    domain::product::ProductId,
};

pub struct DeactivateProductReviewsCommand {
    pub product_id: i64,
}

impl ReviewCommandService {
    /// Moderation path: deactivates every review and rating for the product
    /// and resets its cached rating to 0, atomically. Fails with NotFound
    /// before mutating anything when the product has no active reviews.
    pub async fn deactivate_reviews_for_product(
        &self,
        actor: &AuthenticatedUser,
        command: DeactivateProductReviewsCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "reviews", "moderate")?;

        let product_id = ProductId::new(command.product_id)?;
        self.write_repo.deactivate_for_product(product_id).await?;
        Ok(())
    }
}
