use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::query::{ArticlePage, ArticleQuery};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Fails with `DomainError::SlugTaken` when the slug is already stored.
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Fails with `DomainError::Conflict` when the record changed since it was read.
    async fn update_fields(&self, update: ArticleUpdate) -> DomainResult<Article>;
    /// Atomic `view_count + 1`; `false` when no such post exists.
    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<bool>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;

    async fn slug_exists(&self, slug: &ArticleSlug) -> DomainResult<bool> {
        Ok(self.find_by_slug(slug).await?.is_some())
    }

    async fn query(&self, query: ArticleQuery) -> DomainResult<ArticlePage>;
}
