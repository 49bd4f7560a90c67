// src/domain/product/entity.rs
use crate::domain::category::CategoryId;
use crate::domain::product::value_objects::{Price, ProductId, ProductName, StockCount};
use crate::domain::slug::Slug;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    pub stock: StockCount,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
    /// Cached mean of the product's active rating grades; 0 when none exist.
    /// Recomputed by the review writer, never set by clients.
    pub rating: f64,
    pub is_active: bool,
}

impl Product {
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Whether the product shows up in storefront listings.
    pub fn is_listed(&self) -> bool {
        self.is_active && self.stock.value() > 0
    }
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    pub stock: StockCount,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub name: Option<ProductName>,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<StockCount>,
    pub image_url: Option<Option<String>>,
    pub category_id: Option<CategoryId>,
}

impl ProductUpdate {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            description: None,
            price: None,
            stock: None,
            image_url: None,
            category_id: None,
        }
    }

    pub fn with_name(mut self, name: ProductName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: StockCount) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = Some(image_url);
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}
