// src/application/queries/reviews/service.rs
use std::sync::Arc;

use crate::domain::{product::ProductReadRepository, review::ReviewReadRepository};

pub struct ReviewQueryService {
    pub(super) read_repo: Arc<dyn ReviewReadRepository>,
    pub(super) product_repo: Arc<dyn ProductReadRepository>,
}

impl ReviewQueryService {
    pub fn new(
        read_repo: Arc<dyn ReviewReadRepository>,
        product_repo: Arc<dyn ProductReadRepository>,
    ) -> Self {
        Self {
            read_repo,
            product_repo,
        }
    }
}
