use std::collections::HashMap;
use std::sync::Arc;

use crate::application::{
    ApplicationResult,
    ports::category::{CategoryDirectory, CategoryInfo},
};
use crate::domain::article::CategoryId;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCategoryDirectory {
    categories: Arc<RwLock<HashMap<String, CategoryInfo>>>,
}

impl InMemoryCategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) {
        self.categories.write().await.insert(
            id.into(),
            CategoryInfo {
                name: name.into(),
                color: color.into(),
            },
        );
    }
}

#[async_trait]
impl CategoryDirectory for InMemoryCategoryDirectory {
    async fn find(&self, id: &CategoryId) -> ApplicationResult<Option<CategoryInfo>> {
        Ok(self.categories.read().await.get(id.as_str()).cloned())
    }
}
