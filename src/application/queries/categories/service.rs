// src/application/queries/categories/service.rs
use std::sync::Arc;

use crate::domain::category::CategoryReadRepository;

pub struct CategoryQueryService {
    pub(super) read_repo: Arc<dyn CategoryReadRepository>,
}

impl CategoryQueryService {
    pub fn new(read_repo: Arc<dyn CategoryReadRepository>) -> Self {
        Self { read_repo }
    }
}
