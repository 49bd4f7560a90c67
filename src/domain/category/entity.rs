// src/domain/category/entity.rs
use crate::domain::category::value_objects::{CategoryId, CategoryName};
use crate::domain::slug::Slug;

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
}

impl Category {
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn rename(&mut self, name: CategoryName, slug: Slug) {
        self.name = name;
        self.slug = slug;
    }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
}

/// Partial update; `parent_id` uses a nested Option so the parent can be
/// cleared as well as replaced.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub id: CategoryId,
    pub name: Option<CategoryName>,
    pub slug: Option<Slug>,
    pub parent_id: Option<Option<CategoryId>>,
}

impl CategoryUpdate {
    pub fn new(id: CategoryId) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            parent_id: None,
        }
    }

    pub fn with_name(mut self, name: CategoryName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_parent(mut self, parent_id: Option<CategoryId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.slug.is_none() && self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_category() -> Category {
        Category {
            id: CategoryId::new(1).unwrap(),
            name: CategoryName::new("Kitchen").unwrap(),
            slug: Slug::new("kitchen").unwrap(),
            parent_id: None,
            is_active: true,
        }
    }

    #[test]
    fn deactivate_flips_flag() {
        let mut category = sample_category();
        category.deactivate();
        assert!(!category.is_active);
    }

    #[test]
    fn rename_replaces_name_and_slug() {
        let mut category = sample_category();
        category.rename(
            CategoryName::new("Kitchenware").unwrap(),
            Slug::new("kitchenware").unwrap(),
        );
        assert_eq!(category.name.as_str(), "Kitchenware");
        assert_eq!(category.slug.as_str(), "kitchenware");
    }

    #[test]
    fn update_builder_tracks_touched_fields() {
        let update = CategoryUpdate::new(CategoryId::new(1).unwrap());
        assert!(update.is_noop());

        let update = update.with_parent(None);
        assert!(!update.is_noop());
        assert_eq!(update.parent_id, Some(None));
    }
}
