// src/application/commands/categories/service.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    category::{CategoryId, CategoryReadRepository, CategoryWriteRepository},
    errors::DomainResult,
    slug::{Slug, SlugLookup, SlugResolver},
};

/// Attempts to insert a freshly resolved slug before giving up; the unique
/// constraint closes the probe-then-insert race, the retries absorb it.
pub(super) const MAX_SLUG_ATTEMPTS: usize = 3;

pub struct CategoryCommandService {
    pub(super) write_repo: Arc<dyn CategoryWriteRepository>,
    pub(super) read_repo: Arc<dyn CategoryReadRepository>,
    pub(super) slug_resolver: Arc<SlugResolver>,
}

impl CategoryCommandService {
    pub fn new(
        write_repo: Arc<dyn CategoryWriteRepository>,
        read_repo: Arc<dyn CategoryReadRepository>,
        slug_resolver: Arc<SlugResolver>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_resolver,
        }
    }
}

pub(super) struct CategorySlugLookup<'a> {
    pub(super) repo: &'a dyn CategoryReadRepository,
    pub(super) ignore: Option<CategoryId>,
}

#[async_trait]
impl SlugLookup for CategorySlugLookup<'_> {
    async fn slug_exists(&self, slug: &Slug) -> DomainResult<bool> {
        self.repo.slug_exists(slug, self.ignore).await
    }
}
