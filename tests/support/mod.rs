#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use bazaar_core::application::dto::{AuthTokenDto, AuthenticatedUser, TokenSubject};
use bazaar_core::application::error::{ApplicationError, ApplicationResult};
use bazaar_core::application::ports::security::{PasswordHasher, TokenManager};
use bazaar_core::application::ports::time::Clock;
use bazaar_core::domain::category::{
    Category, CategoryId, CategoryName, CategoryReadRepository, CategoryUpdate,
    CategoryWriteRepository, NewCategory,
};
use bazaar_core::domain::errors::{DomainError, DomainResult};
use bazaar_core::domain::product::{
    NewProduct, Price, Product, ProductId, ProductName, ProductReadRepository, ProductUpdate,
    ProductWriteRepository, StockCount,
};
use bazaar_core::domain::review::{
    NewReview, Rating, RatingId, Review, ReviewId, ReviewReadRepository, ReviewWriteRepository,
};
use bazaar_core::domain::slug::Slug;
use bazaar_core::domain::user::{
    NewUser, PasswordHash, Role, User, UserId, UserRepository, Username,
};

#[derive(Default, Clone)]
struct StoreState {
    categories: Vec<Category>,
    products: Vec<Product>,
    reviews: Vec<Review>,
    ratings: Vec<Rating>,
    users: Vec<User>,
    next_id: i64,
}

impl StoreState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Backs every repository trait with one mutex-guarded state, mirroring the
/// all-or-nothing behaviour of the Postgres implementations: multi-step
/// writes mutate a copy and commit it only on success.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_category(&self, name: &str, slug: &str, parent_id: Option<i64>) -> Category {
        let mut state = self.inner.lock().unwrap();
        let id = state.allocate_id();
        let category = Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            slug: Slug::new(slug).unwrap(),
            parent_id: parent_id.map(|p| CategoryId::new(p).unwrap()),
            is_active: true,
        };
        state.categories.push(category.clone());
        category
    }

    pub fn seed_product(&self, name: &str, slug: &str, category_id: i64, stock: i32) -> Product {
        let mut state = self.inner.lock().unwrap();
        let id = state.allocate_id();
        let product = Product {
            id: ProductId::new(id).unwrap(),
            name: ProductName::new(name).unwrap(),
            slug: Slug::new(slug).unwrap(),
            description: format!("{name} description"),
            price: Price::new(1000).unwrap(),
            stock: StockCount::new(stock).unwrap(),
            image_url: None,
            category_id: CategoryId::new(category_id).unwrap(),
            rating: 0.0,
            is_active: true,
        };
        state.products.push(product.clone());
        product
    }

    pub fn seed_user(&self, username: &str, role: Role, is_active: bool) -> User {
        let mut state = self.inner.lock().unwrap();
        let id = state.allocate_id();
        let user = User {
            id: UserId::new(id).unwrap(),
            username: Username::new(username).unwrap(),
            password_hash: PasswordHash::new("plain:secret123").unwrap(),
            role,
            is_active,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        user
    }

    pub fn deactivate_product(&self, id: ProductId) {
        let mut state = self.inner.lock().unwrap();
        if let Some(product) = state.products.iter_mut().find(|p| p.id == id) {
            product.is_active = false;
        }
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        let state = self.inner.lock().unwrap();
        state.products.iter().find(|p| p.id == id).cloned()
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.inner.lock().unwrap().reviews.clone()
    }

    pub fn ratings(&self) -> Vec<Rating> {
        self.inner.lock().unwrap().ratings.clone()
    }
}

#[async_trait]
impl CategoryWriteRepository for InMemoryStore {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut state = self.inner.lock().unwrap();
        if state
            .categories
            .iter()
            .any(|c| c.slug.as_str() == category.slug.as_str())
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let id = state.allocate_id();
        let created = Category {
            id: CategoryId::new(id)?,
            name: category.name,
            slug: category.slug,
            parent_id: category.parent_id,
            is_active: category.is_active,
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let mut state = self.inner.lock().unwrap();
        if let Some(ref slug) = update.slug {
            if state
                .categories
                .iter()
                .any(|c| c.id != update.id && c.slug.as_str() == slug.as_str())
            {
                return Err(DomainError::Conflict("slug already exists".into()));
            }
        }
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(slug) = update.slug {
            category.slug = slug;
        }
        if let Some(parent_id) = update.parent_id {
            category.parent_id = parent_id;
        }
        Ok(category.clone())
    }

    async fn soft_delete(&self, id: CategoryId) -> DomainResult<()> {
        let mut state = self.inner.lock().unwrap();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        category.is_active = false;
        Ok(())
    }
}

#[async_trait]
impl CategoryReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let state = self.inner.lock().unwrap();
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .find(|c| c.slug.as_str() == slug.as_str())
            .cloned())
    }

    async fn list_active(&self) -> DomainResult<Vec<Category>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect())
    }

    async fn list_children(&self, parent_id: CategoryId) -> DomainResult<Vec<Category>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .filter(|c| c.parent_id == Some(parent_id) && c.is_active)
            .cloned()
            .collect())
    }

    async fn slug_exists(&self, slug: &Slug, ignore: Option<CategoryId>) -> DomainResult<bool> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .any(|c| c.slug.as_str() == slug.as_str() && Some(c.id) != ignore))
    }
}

#[async_trait]
impl ProductWriteRepository for InMemoryStore {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let mut state = self.inner.lock().unwrap();
        if state
            .products
            .iter()
            .any(|p| p.slug.as_str() == product.slug.as_str())
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let id = state.allocate_id();
        let created = Product {
            id: ProductId::new(id)?,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            stock: product.stock,
            image_url: product.image_url,
            category_id: product.category_id,
            rating: 0.0,
            is_active: product.is_active,
        };
        state.products.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        let mut state = self.inner.lock().unwrap();
        if let Some(ref slug) = update.slug {
            if state
                .products
                .iter()
                .any(|p| p.id != update.id && p.slug.as_str() == slug.as_str())
            {
                return Err(DomainError::Conflict("slug already exists".into()));
            }
        }
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(slug) = update.slug {
            product.slug = slug;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(image_url) = update.image_url {
            product.image_url = image_url;
        }
        if let Some(category_id) = update.category_id {
            product.category_id = category_id;
        }
        Ok(product.clone())
    }

    async fn soft_delete(&self, id: ProductId) -> DomainResult<()> {
        let mut state = self.inner.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        product.is_active = false;
        Ok(())
    }
}

#[async_trait]
impl ProductReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let state = self.inner.lock().unwrap();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Product>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .iter()
            .find(|p| p.slug.as_str() == slug.as_str())
            .cloned())
    }

    async fn list_listed(&self) -> DomainResult<Vec<Product>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| p.is_listed())
            .cloned()
            .collect())
    }

    async fn list_by_categories(&self, category_ids: &[CategoryId]) -> DomainResult<Vec<Product>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| category_ids.contains(&p.category_id) && p.is_listed())
            .cloned()
            .collect())
    }

    async fn slug_exists(&self, slug: &Slug, ignore: Option<ProductId>) -> DomainResult<bool> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .iter()
            .any(|p| p.slug.as_str() == slug.as_str() && Some(p.id) != ignore))
    }
}

#[async_trait]
impl ReviewWriteRepository for InMemoryStore {
    async fn submit(&self, review: NewReview) -> DomainResult<Review> {
        let mut state = self.inner.lock().unwrap();
        let mut draft = state.clone();

        let rating_id = match review.grade {
            Some(grade) => {
                let id = RatingId::new(draft.allocate_id())?;
                draft.ratings.push(Rating {
                    id,
                    grade,
                    user_id: review.user_id,
                    product_id: review.product_id,
                    is_active: true,
                });

                let grades: Vec<f64> = draft
                    .ratings
                    .iter()
                    .filter(|r| r.product_id == review.product_id && r.is_active)
                    .map(|r| r.grade.value())
                    .collect();
                let average = grades.iter().sum::<f64>() / grades.len() as f64;

                let product = draft
                    .products
                    .iter_mut()
                    .find(|p| p.id == review.product_id)
                    .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
                product.rating = average;

                Some(id)
            }
            None => None,
        };

        let created = Review {
            id: ReviewId::new(draft.allocate_id())?,
            user_id: review.user_id,
            product_id: review.product_id,
            rating_id,
            header: review.header,
            body: review.body,
            created_at: review.created_at,
            is_active: review.is_active,
        };
        draft.reviews.push(created.clone());

        *state = draft;
        Ok(created)
    }

    async fn deactivate_for_product(&self, product_id: ProductId) -> DomainResult<()> {
        let mut state = self.inner.lock().unwrap();
        let mut draft = state.clone();

        let mut touched = 0;
        for review in draft
            .reviews
            .iter_mut()
            .filter(|r| r.product_id == product_id && r.is_active)
        {
            review.is_active = false;
            touched += 1;
        }
        if touched == 0 {
            return Err(DomainError::NotFound("no active reviews for product".into()));
        }

        let mut touched = 0;
        for rating in draft
            .ratings
            .iter_mut()
            .filter(|r| r.product_id == product_id && r.is_active)
        {
            rating.is_active = false;
            touched += 1;
        }
        if touched == 0 {
            return Err(DomainError::NotFound("no active ratings for product".into()));
        }

        let product = draft
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        product.rating = 0.0;

        *state = draft;
        Ok(())
    }
}

#[async_trait]
impl ReviewReadRepository for InMemoryStore {
    async fn list_active(&self) -> DomainResult<Vec<Review>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .reviews
            .iter()
            .filter(|r| r.is_active)
            .cloned()
            .collect())
    }

    async fn list_for_product(&self, product_id: ProductId) -> DomainResult<Vec<Review>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id && r.is_active)
            .cloned()
            .collect())
    }

    async fn list_ratings_for_product(&self, product_id: ProductId) -> DomainResult<Vec<Rating>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .ratings
            .iter()
            .filter(|r| r.product_id == product_id && r.is_active)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn count(&self) -> DomainResult<u64> {
        let state = self.inner.lock().unwrap();
        Ok(state.users.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut state = self.inner.lock().unwrap();
        if state
            .users
            .iter()
            .any(|u| u.username.as_str() == new_user.username.as_str())
        {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let id = state.allocate_id();
        let user = User {
            id: UserId::new(id)?,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|u| u.username.as_str() == username.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let state = self.inner.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Reversible stand-in for Argon2 so credential paths stay observable.
#[derive(Default)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("plain:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

#[derive(Default)]
pub struct StaticTokenManager;

#[async_trait]
impl TokenManager for StaticTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = Utc::now();
        Ok(AuthTokenDto {
            token: format!("token-for-{}", subject.username),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, _token: &str) -> ApplicationResult<AuthenticatedUser> {
        Err(ApplicationError::unauthorized("not supported in tests"))
    }
}

pub fn actor_for(user: &User) -> AuthenticatedUser {
    let now = Utc::now();
    AuthenticatedUser {
        id: user.id,
        username: user.username.to_string(),
        role: user.role,
        capabilities: user.role.default_capabilities(),
        is_active: user.is_active,
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}
