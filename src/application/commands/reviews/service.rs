// src/application/commands/reviews/service.rs
use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::{
        product::ProductReadRepository, review::ReviewWriteRepository, user::UserRepository,
    },
};

pub struct ReviewCommandService {
    pub(super) write_repo: Arc<dyn ReviewWriteRepository>,
    pub(super) product_repo: Arc<dyn ProductReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ReviewCommandService {
    pub fn new(
        write_repo: Arc<dyn ReviewWriteRepository>,
        product_repo: Arc<dyn ProductReadRepository>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            product_repo,
            user_repo,
            clock,
        }
    }
}
