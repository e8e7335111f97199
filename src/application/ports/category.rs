// src/application/ports/category.rs
use crate::{application::ApplicationResult, domain::article::CategoryId};
use async_trait::async_trait;

/// Display data owned by the category collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
    pub color: String,
}

#[async_trait]
pub trait CategoryDirectory: Send + Sync {
    async fn find(&self, id: &CategoryId) -> ApplicationResult<Option<CategoryInfo>>;
}
