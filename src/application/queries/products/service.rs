// src/application/queries/products/service.rs
use std::sync::Arc;

use crate::domain::{category::CategoryReadRepository, product::ProductReadRepository};

pub struct ProductQueryService {
    pub(super) read_repo: Arc<dyn ProductReadRepository>,
    pub(super) category_repo: Arc<dyn CategoryReadRepository>,
}

impl ProductQueryService {
    pub fn new(
        read_repo: Arc<dyn ProductReadRepository>,
        category_repo: Arc<dyn CategoryReadRepository>,
    ) -> Self {
        Self {
            read_repo,
            category_repo,
        }
    }
}
