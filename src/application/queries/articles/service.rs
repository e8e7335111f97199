use std::sync::Arc;

use crate::{application::ports::category::CategoryDirectory, domain::article::ArticleReadRepository};

/// Read side of the blog: listings, single-post lookups and the admin table.
pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) categories: Arc<dyn CategoryDirectory>,
    pub(super) default_page_size: u32,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        categories: Arc<dyn CategoryDirectory>,
        default_page_size: u32,
    ) -> Self {
        Self {
            read_repo,
            categories,
            default_page_size,
        }
    }
}
