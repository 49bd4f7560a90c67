// src/application/commands/products/update.rs
use super::service::{MAX_SLUG_ATTEMPTS, ProductCommandService, ProductSlugLookup};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, ProductDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::CategoryId,
        errors::DomainError,
        product::{Price, ProductName, ProductUpdate, StockCount},
        slug::Slug,
    },
};

/// Products are addressed by slug on the wire, matching the public routes.
pub struct UpdateProductCommand {
    pub slug: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    pub image_url: Option<Option<String>>,
    pub category_id: Option<i64>,
}

impl ProductCommandService {
    pub async fn update_product(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        ensure_capability(actor, "products", "update")?;

        let slug = Slug::new(command.slug)?;
        let existing = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;
        let id = existing.id;

        let new_name = command.name.map(ProductName::new).transpose()?;
        let new_price = command.price.map(Price::new).transpose()?;
        let new_stock = command.stock.map(StockCount::new).transpose()?;
        let new_category = match command.category_id {
            Some(category_id) => {
                let category_id = CategoryId::new(category_id)?;
                self.category_repo
                    .find_by_id(category_id)
                    .await?
                    .filter(|c| c.is_active)
                    .ok_or_else(|| ApplicationError::not_found("category not found"))?;
                Some(category_id)
            }
            None => None,
        };

        for attempt in 0..MAX_SLUG_ATTEMPTS {
            let mut update = ProductUpdate::new(id);

            if let Some(ref name) = new_name {
                let lookup = ProductSlugLookup {
                    repo: self.read_repo.as_ref(),
                    ignore: Some(id),
                };
                let slug = self.slug_resolver.resolve(name.as_str(), &lookup).await?;
                update = update.with_name(name.clone()).with_slug(slug);
            }
            if let Some(ref description) = command.description {
                update = update.with_description(description.clone());
            }
            if let Some(price) = new_price {
                update = update.with_price(price);
            }
            if let Some(stock) = new_stock {
                update = update.with_stock(stock);
            }
            if let Some(ref image_url) = command.image_url {
                update = update.with_image_url(image_url.clone());
            }
            if let Some(category_id) = new_category {
                update = update.with_category(category_id);
            }

            match self.write_repo.update(update).await {
                Ok(updated) => return Ok(updated.into()),
                Err(DomainError::Conflict(_))
                    if new_name.is_some() && attempt + 1 < MAX_SLUG_ATTEMPTS =>
                {
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ApplicationError::conflict(
            "could not allocate a unique product slug",
        ))
    }
}
