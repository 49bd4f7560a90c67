use crate::domain::category::entity::{Category, CategoryUpdate, NewCategory};
use crate::domain::category::value_objects::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::slug::Slug;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryWriteRepository: Send + Sync {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category>;
    async fn soft_delete(&self, id: CategoryId) -> DomainResult<()>;
}

#[async_trait]
pub trait CategoryReadRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>>;
    async fn list_active(&self) -> DomainResult<Vec<Category>>;
    async fn list_children(&self, parent_id: CategoryId) -> DomainResult<Vec<Category>>;
    /// Collision check for the slug resolver. Matches every row, active or
    /// not, except the one being renamed.
    async fn slug_exists(&self, slug: &Slug, ignore: Option<CategoryId>) -> DomainResult<bool>;
}
