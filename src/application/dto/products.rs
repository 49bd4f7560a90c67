use crate::domain::product::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Price in minor currency units.
    pub price: i64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category_id: i64,
    /// Mean of the product's active rating grades; 0 when none exist.
    pub rating: f64,
    pub is_active: bool,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into(),
            name: product.name.into_inner(),
            slug: product.slug.into_inner(),
            description: product.description,
            price: product.price.into(),
            stock: product.stock.into(),
            image_url: product.image_url,
            category_id: product.category_id.into(),
            rating: product.rating,
            is_active: product.is_active,
        }
    }
}
