// src/application/commands/categories/create.rs
use super::service::{CategoryCommandService, CategorySlugLookup, MAX_SLUG_ATTEMPTS};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, CategoryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::{CategoryId, CategoryName, NewCategory},
        errors::DomainError,
    },
};

pub struct CreateCategoryCommand {
    pub name: String,
    pub parent_id: Option<i64>,
}

impl CategoryCommandService {
    pub async fn create_category(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "categories", "create")?;

        let name = CategoryName::new(command.name)?;
        let parent_id = command.parent_id.map(CategoryId::new).transpose()?;

        if let Some(parent) = parent_id {
            self.read_repo
                .find_by_id(parent)
                .await?
                .filter(|c| c.is_active)
                .ok_or_else(|| ApplicationError::not_found("parent category not found"))?;
        }

        for attempt in 0..MAX_SLUG_ATTEMPTS {
            let lookup = CategorySlugLookup {
                repo: self.read_repo.as_ref(),
                ignore: None,
            };
            let slug = self.slug_resolver.resolve(name.as_str(), &lookup).await?;

            let new_category = NewCategory {
                name: name.clone(),
                slug,
                parent_id,
                is_active: true,
            };

            match self.write_repo.insert(new_category).await {
                Ok(created) => return Ok(created.into()),
                Err(DomainError::Conflict(_)) if attempt + 1 < MAX_SLUG_ATTEMPTS => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Err(ApplicationError::conflict(
            "could not allocate a unique category slug",
        ))
    }
}
