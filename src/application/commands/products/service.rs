// src/application/commands/products/service.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    category::CategoryReadRepository,
    errors::DomainResult,
    product::{ProductId, ProductReadRepository, ProductWriteRepository},
    slug::{Slug, SlugLookup, SlugResolver},
};

pub(super) const MAX_SLUG_ATTEMPTS: usize = 3;

pub struct ProductCommandService {
    pub(super) write_repo: Arc<dyn ProductWriteRepository>,
    pub(super) read_repo: Arc<dyn ProductReadRepository>,
    pub(super) category_repo: Arc<dyn CategoryReadRepository>,
    pub(super) slug_resolver: Arc<SlugResolver>,
}

impl ProductCommandService {
    pub fn new(
        write_repo: Arc<dyn ProductWriteRepository>,
        read_repo: Arc<dyn ProductReadRepository>,
        category_repo: Arc<dyn CategoryReadRepository>,
        slug_resolver: Arc<SlugResolver>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            category_repo,
            slug_resolver,
        }
    }
}

pub(super) struct ProductSlugLookup<'a> {
    pub(super) repo: &'a dyn ProductReadRepository,
    pub(super) ignore: Option<ProductId>,
}

#[async_trait]
impl SlugLookup for ProductSlugLookup<'_> {
    async fn slug_exists(&self, slug: &Slug) -> DomainResult<bool> {
        self.repo.slug_exists(slug, self.ignore).await
    }
}
