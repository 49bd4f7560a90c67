// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            categories::CategoryCommandService, products::ProductCommandService,
            reviews::ReviewCommandService, users::UserCommandService,
        },
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::SlugGenerator,
        },
        queries::{
            categories::CategoryQueryService, products::ProductQueryService,
            reviews::ReviewQueryService, users::UserQueryService,
        },
    },
    domain::{
        category::{CategoryReadRepository, CategoryWriteRepository},
        product::{ProductReadRepository, ProductWriteRepository},
        review::{ReviewReadRepository, ReviewWriteRepository},
        slug::SlugResolver,
        user::UserRepository,
    },
};

pub struct ApplicationServices {
    pub category_commands: Arc<CategoryCommandService>,
    pub product_commands: Arc<ProductCommandService>,
    pub review_commands: Arc<ReviewCommandService>,
    pub user_commands: Arc<UserCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub product_queries: Arc<ProductQueryService>,
    pub review_queries: Arc<ReviewQueryService>,
    pub user_queries: Arc<UserQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

pub struct Repositories {
    pub category_write: Arc<dyn CategoryWriteRepository>,
    pub category_read: Arc<dyn CategoryReadRepository>,
    pub product_write: Arc<dyn ProductWriteRepository>,
    pub product_read: Arc<dyn ProductReadRepository>,
    pub review_write: Arc<dyn ReviewWriteRepository>,
    pub review_read: Arc<dyn ReviewReadRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let slug_resolver = Arc::new(SlugResolver::new(slugger));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&repos.category_write),
            Arc::clone(&repos.category_read),
            Arc::clone(&slug_resolver),
        ));

        let product_commands = Arc::new(ProductCommandService::new(
            Arc::clone(&repos.product_write),
            Arc::clone(&repos.product_read),
            Arc::clone(&repos.category_read),
            Arc::clone(&slug_resolver),
        ));

        let review_commands = Arc::new(ReviewCommandService::new(
            Arc::clone(&repos.review_write),
            Arc::clone(&repos.product_read),
            Arc::clone(&repos.users),
            Arc::clone(&clock),
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));

        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(&repos.category_read)));
        let product_queries = Arc::new(ProductQueryService::new(
            Arc::clone(&repos.product_read),
            Arc::clone(&repos.category_read),
        ));
        let review_queries = Arc::new(ReviewQueryService::new(
            Arc::clone(&repos.review_read),
            Arc::clone(&repos.product_read),
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&repos.users)));

        Self {
            category_commands,
            product_commands,
            review_commands,
            user_commands,
            category_queries,
            product_queries,
            review_queries,
            user_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }
}
