// tests/support/mocks/store.rs
use async_trait::async_trait;
use edupress_core::domain::article::{
    Article, ArticleId, ArticlePage, ArticleQuery, ArticleReadRepository, ArticleSlug,
    ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use edupress_core::domain::errors::{DomainError, DomainResult};

/// Store whose transport is down: every call fails the way a timed-out pool does.
#[derive(Clone, Default)]
pub struct UnavailableStore;

fn down<T>() -> DomainResult<T> {
    Err(DomainError::Unavailable("pool timed out while waiting for an open connection".into()))
}

#[async_trait]
impl ArticleWriteRepository for UnavailableStore {
    async fn insert(&self, _article: NewArticle) -> DomainResult<Article> {
        down()
    }

    async fn update_fields(&self, _update: ArticleUpdate) -> DomainResult<Article> {
        down()
    }

    async fn increment_view_count(&self, _id: ArticleId) -> DomainResult<bool> {
        down()
    }
}

#[async_trait]
impl ArticleReadRepository for UnavailableStore {
    async fn find_by_id(&self, _id: ArticleId) -> DomainResult<Option<Article>> {
        down()
    }

    async fn find_by_slug(&self, _slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        down()
    }

    async fn query(&self, _query: ArticleQuery) -> DomainResult<ArticlePage> {
        down()
    }
}
