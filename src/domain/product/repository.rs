use crate::domain::category::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::product::entity::{NewProduct, Product, ProductUpdate};
use crate::domain::product::value_objects::ProductId;
use crate::domain::slug::Slug;
use async_trait::async_trait;

#[async_trait]
pub trait ProductWriteRepository: Send + Sync {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product>;
    async fn update(&self, update: ProductUpdate) -> DomainResult<Product>;
    async fn soft_delete(&self, id: ProductId) -> DomainResult<()>;
}

#[async_trait]
pub trait ProductReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Product>>;
    /// Active products with stock on hand.
    async fn list_listed(&self) -> DomainResult<Vec<Product>>;
    /// Listed products in any of the given categories.
    async fn list_by_categories(&self, category_ids: &[CategoryId]) -> DomainResult<Vec<Product>>;
    async fn slug_exists(&self, slug: &Slug, ignore: Option<ProductId>) -> DomainResult<bool>;
}
