// src/application/commands/products/delete.rs
use super::service::ProductCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::Slug,
};

pub struct DeleteProductCommand {
    pub slug: String,
}

impl ProductCommandService {
    pub async fn delete_product(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteProductCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "products", "delete")?;

        let slug = Slug::new(command.slug)?;
        let product = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;

        self.write_repo.soft_delete(product.id).await?;
        Ok(())
    }
}
