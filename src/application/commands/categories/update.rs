// src/application/commands/categories/update.rs
use super::service::{CategoryCommandService, CategorySlugLookup, MAX_SLUG_ATTEMPTS};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, CategoryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::{CategoryId, CategoryName, CategoryUpdate},
        errors::DomainError,
    },
};

pub struct UpdateCategoryCommand {
    pub id: i64,
    pub name: Option<String>,
    pub parent_id: Option<i64>,
}

impl CategoryCommandService {
    pub async fn update_category(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "categories", "update")?;

        let id = CategoryId::new(command.id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let new_name = command.name.map(CategoryName::new).transpose()?;
        let new_parent = match command.parent_id {
            Some(parent_id) => {
                let parent = CategoryId::new(parent_id)?;
                if parent == id {
                    return Err(ApplicationError::validation(
                        "category cannot be its own parent",
                    ));
                }
                self.read_repo
                    .find_by_id(parent)
                    .await?
                    .filter(|c| c.is_active)
                    .ok_or_else(|| ApplicationError::not_found("parent category not found"))?;
                Some(parent)
            }
            None => None,
        };

        if new_name.is_none() && new_parent.is_none() {
            return Ok(existing.into());
        }

        // Renaming re-derives the slug, skipping the category's own row so an
        // unchanged name keeps its slug.
        for attempt in 0..MAX_SLUG_ATTEMPTS {
            let mut update = CategoryUpdate::new(id);

            if let Some(ref name) = new_name {
                let lookup = CategorySlugLookup {
                    repo: self.read_repo.as_ref(),
                    ignore: Some(id),
                };
                let slug = self.slug_resolver.resolve(name.as_str(), &lookup).await?;
                update = update.with_name(name.clone()).with_slug(slug);
            }
            if let Some(parent) = new_parent {
                update = update.with_parent(Some(parent));
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
            "could not allocate a unique category slug",
        ))
    }
}
