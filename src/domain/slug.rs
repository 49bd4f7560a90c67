// src/domain/slug.rs
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};

/// URL-safe, unique, human-readable identifier derived from a display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Existence probe the resolver reads through. Implementations decide which
/// rows count as collisions (every existing slug does, active or not) and may
/// exclude the record currently being renamed.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn slug_exists(&self, slug: &Slug) -> DomainResult<bool>;
}

/// Domain service that derives a unique slug for a display name.
///
/// The resolver only reads via the lookup; inserting the record with the
/// returned slug is the caller's job. Concurrent creations of the same name
/// can still race past the probe, so writers insert under a unique constraint
/// and retry on conflict.
pub struct SlugResolver {
    generator: Arc<dyn SlugGenerator>,
}

impl SlugResolver {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    pub async fn resolve(&self, name: &str, lookup: &dyn SlugLookup) -> DomainResult<Slug> {
        let base = self.generator.slugify(name);
        let base = if base.is_empty() {
            // Names made entirely of punctuation or symbols normalize to
            // nothing; fall back to a timestamped token.
            format!("item-{}", Utc::now().timestamp())
        } else {
            base
        };

        let mut candidate = base.clone();
        let mut counter = 1u64;

        loop {
            let slug = Slug::new(candidate)?;
            if !lookup.slug_exists(&slug).await? {
                return Ok(slug);
            }
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
    }
}
