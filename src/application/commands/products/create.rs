// src/application/commands/products/create.rs
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
        product::{NewProduct, Price, ProductName, StockCount},
    },
};

pub struct CreateProductCommand {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category_id: i64,
}

impl ProductCommandService {
    pub async fn create_product(
        &self,
        actor: &AuthenticatedUser,
        command: CreateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        ensure_capability(actor, "products", "create")?;

        let name = ProductName::new(command.name)?;
        let price = Price::new(command.price)?;
        let stock = StockCount::new(command.stock)?;
        let category_id = CategoryId::new(command.category_id)?;

        self.category_repo
            .find_by_id(category_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        for attempt in 0..MAX_SLUG_ATTEMPTS {
            let lookup = ProductSlugLookup {
                repo: self.read_repo.as_ref(),
                ignore: None,
            };
            let slug = self.slug_resolver.resolve(name.as_str(), &lookup).await?;

            let new_product = NewProduct {
                name: name.clone(),
                slug,
                description: command.description.clone(),
                price,
                stock,
                image_url: command.image_url.clone(),
                category_id,
                is_active: true,
            };

            match self.write_repo.insert(new_product).await {
                Ok(created) => return Ok(created.into()),
                Err(DomainError::Conflict(_)) if attempt + 1 < MAX_SLUG_ATTEMPTS => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Err(ApplicationError::conflict(
            "could not allocate a unique product slug",
        ))
    }
}
