use super::ProductQueryService;
use crate::{
    application::{
        dto::ProductDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::Slug,
};

pub struct ProductDetailQuery {
    pub slug: String,
}

impl ProductQueryService {
    pub async fn product_detail(&self, query: ProductDetailQuery) -> ApplicationResult<ProductDto> {
        let slug = Slug::new(query.slug)?;
        let product = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .filter(|p| p.is_listed())
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;

        Ok(product.into())
    }
}
