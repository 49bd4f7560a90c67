use super::ProductQueryService;
use crate::application::{dto::ProductDto, error::ApplicationResult};

impl ProductQueryService {
    /// Storefront listing: active products with stock on hand.
    pub async fn list_products(&self) -> ApplicationResult<Vec<ProductDto>> {
        let products = self.read_repo.list_listed().await?;
        Ok(products.into_iter().map(Into::into).collect())
    }
}
