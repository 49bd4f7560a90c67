// src/infrastructure/repositories/postgres_product.rs
use super::map_sqlx;
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::{
    NewProduct, Price, Product, ProductId, ProductName, ProductReadRepository, ProductUpdate,
    ProductWriteRepository, StockCount,
};
use crate::domain::slug::Slug;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresProductWriteRepository {
    pool: PgPool,
}

impl PostgresProductWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_row(&self, id: ProductId) -> DomainResult<Option<ProductRow>> {
        sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

#[derive(Clone)]
pub struct PostgresProductReadRepository {
    pool: PgPool,
}

impl PostgresProductReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    price: i64,
    stock: i32,
    image_url: Option<String>,
    category_id: i64,
    rating: f64,
    is_active: bool,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId::new(row.id)?,
            name: ProductName::new(row.name)?,
            slug: Slug::new(row.slug)?,
            description: row.description,
            price: Price::new(row.price)?,
            stock: StockCount::new(row.stock)?,
            image_url: row.image_url,
            category_id: CategoryId::new(row.category_id)?,
            rating: row.rating,
            is_active: row.is_active,
        })
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, slug, description, price, stock, image_url, category_id, rating, is_active";

#[async_trait]
impl ProductWriteRepository for PostgresProductWriteRepository {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let NewProduct {
            name,
            slug,
            description,
            price,
            stock,
            image_url,
            category_id,
            is_active,
        } = product;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, slug, description, price, stock, image_url, category_id, rating, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(slug.as_str())
        .bind(description)
        .bind(price.value())
        .bind(stock.value())
        .bind(image_url)
        .bind(i64::from(category_id))
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Product::try_from(row)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        let ProductUpdate {
            id,
            name,
            slug,
            description,
            price,
            stock,
            image_url,
            category_id,
        } = update;

        let untouched = name.is_none()
            && slug.is_none()
            && description.is_none()
            && price.is_none()
            && stock.is_none()
            && image_url.is_none()
            && category_id.is_none();
        if untouched {
            return self
                .find_row(id)
                .await?
                .ok_or_else(|| DomainError::NotFound("product not found".into()))
                .and_then(Product::try_from);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE products SET ");
        {
            let mut fields = builder.separated(", ");
            if let Some(name) = name {
                let name_str: String = name.into();
                fields.push("name = ");
                fields.push_bind_unseparated(name_str);
            }
            if let Some(slug) = slug {
                let slug_str: String = slug.into();
                fields.push("slug = ");
                fields.push_bind_unseparated(slug_str);
            }
            if let Some(description) = description {
                fields.push("description = ");
                fields.push_bind_unseparated(description);
            }
            if let Some(price) = price {
                fields.push("price = ");
                fields.push_bind_unseparated(price.value());
            }
            if let Some(stock) = stock {
                fields.push("stock = ");
                fields.push_bind_unseparated(stock.value());
            }
            if let Some(image_url) = image_url {
                fields.push("image_url = ");
                fields.push_bind_unseparated(image_url);
            }
            if let Some(category_id) = category_id {
                fields.push("category_id = ");
                fields.push_bind_unseparated(i64::from(category_id));
            }
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(&format!(" RETURNING {PRODUCT_COLUMNS}"));

        let maybe_row = builder
            .build_query_as::<ProductRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row.ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        Product::try_from(row)
    }

    async fn soft_delete(&self, id: ProductId) -> DomainResult<()> {
        let result = sqlx::query("UPDATE products SET is_active = FALSE WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("product not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductReadRepository for PostgresProductReadRepository {
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Product::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Product::try_from).transpose()
    }

    async fn list_listed(&self) -> DomainResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE is_active = TRUE AND stock > 0 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn list_by_categories(&self, category_ids: &[CategoryId]) -> DomainResult<Vec<Product>> {
        let ids: Vec<i64> = category_ids.iter().copied().map(i64::from).collect();
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE category_id = ANY($1) AND is_active = TRUE AND stock > 0 ORDER BY name"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn slug_exists(&self, slug: &Slug, ignore: Option<ProductId>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM products WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug.as_str())
        .bind(ignore.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}
