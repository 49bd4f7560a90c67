use super::ProductQueryService;
use crate::{
    application::{
        dto::ProductDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::Slug,
};

pub struct ProductsByCategoryQuery {
    pub category_slug: String,
}

impl ProductQueryService {
    /// Listed products for a category and its direct subcategories.
    pub async fn products_by_category(
        &self,
        query: ProductsByCategoryQuery,
    ) -> ApplicationResult<Vec<ProductDto>> {
        let slug = Slug::new(query.category_slug)?;
        let category = self
            .category_repo
            .find_by_slug(&slug)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let mut category_ids = vec![category.id];
        let children = self.category_repo.list_children(category.id).await?;
        category_ids.extend(children.into_iter().map(|c| c.id));

        let products = self.read_repo.list_by_categories(&category_ids).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }
}
