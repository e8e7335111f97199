// src/infrastructure/repositories/memory_article.rs
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::domain::article::{
    Article, ArticleId, ArticlePage, ArticleQuery, ArticleReadRepository, ArticleSlug,
    ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Store {
    next_id: i64,
    posts: BTreeMap<ArticleId, Article>,
    slugs: HashMap<String, ArticleId>,
}

/// Process-local post store. Each write holds the lock for the whole
/// read-modify-write, so single-document operations are atomic.
#[derive(Clone, Default)]
pub struct InMemoryArticleRepository {
    inner: Arc<RwLock<Store>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut store = self.inner.write().await;
        if store.slugs.contains_key(article.slug.as_str()) {
            return Err(DomainError::SlugTaken(article.slug.into_inner()));
        }

        store.next_id += 1;
        let id = ArticleId(store.next_id);
        let created = article.into_article(id);
        store.slugs.insert(created.slug.as_str().to_string(), id);
        store.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn update_fields(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut store = self.inner.write().await;
        let current = store
            .posts
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;
        if current.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "post was modified concurrently, please retry".into(),
            ));
        }
        update.apply_to(current);
        Ok(current.clone())
    }

    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<bool> {
        let mut store = self.inner.write().await;
        match store.posts.get_mut(&id) {
            Some(post) => {
                post.view_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let store = self.inner.read().await;
        Ok(store
            .slugs
            .get(slug.as_str())
            .and_then(|id| store.posts.get(id))
            .cloned())
    }

    async fn slug_exists(&self, slug: &ArticleSlug) -> DomainResult<bool> {
        Ok(self.inner.read().await.slugs.contains_key(slug.as_str()))
    }

    async fn query(&self, query: ArticleQuery) -> DomainResult<ArticlePage> {
        let limit = query.limit.max(1);
        let store = self.inner.read().await;
        let mut rows: Vec<Article> = store
            .posts
            .values()
            .filter(|post| query.filter.matches(post))
            .filter(|post| query.after.as_ref().is_none_or(|cursor| cursor.admits(post)))
            .cloned()
            .collect();
        drop(store);

        rows.sort_by(|a, b| query.sort.compare(a, b));
        rows.truncate(limit as usize + 1);
        Ok(ArticlePage::from_overfetch(rows, limit, query.sort))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{
        ArticleFilter, ArticleSort, ArticleStatus, ArticleTitle, CategoryId, ContentSource,
        DerivedFields, StatusFilter, Tags,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn new_post(slug: &str, minutes: i64, status: ArticleStatus) -> NewArticle {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        let source = ContentSource::new("some words").unwrap();
        NewArticle {
            title: ArticleTitle::new(slug).unwrap(),
            subtitle: None,
            slug: ArticleSlug::new(slug).unwrap(),
            derived: DerivedFields::compute(&source, None),
            content_source: source,
            category_id: CategoryId::new("news").unwrap(),
            tags: Tags::default(),
            status,
            featured: false,
            cover_image: None,
            published_at: (status == ArticleStatus::Published).then_some(at),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected_by_the_store() {
        let repo = InMemoryArticleRepository::new();
        repo.insert(new_post("same", 0, ArticleStatus::Draft))
            .await
            .unwrap();
        let err = repo
            .insert(new_post("same", 1, ArticleStatus::Draft))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SlugTaken(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn stale_update_is_a_conflict() {
        let repo = InMemoryArticleRepository::new();
        let post = repo
            .insert(new_post("post", 0, ArticleStatus::Draft))
            .await
            .unwrap();
        let later = post.updated_at + Duration::seconds(1);
        repo.update_fields(ArticleUpdate::new(post.id, post.updated_at, later).with_featured(true))
            .await
            .unwrap();

        let err = repo
            .update_fields(ArticleUpdate::new(post.id, post.updated_at, later).with_featured(false))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn query_overfetches_to_decide_on_a_cursor() {
        let repo = InMemoryArticleRepository::new();
        for n in 0..3 {
            repo.insert(new_post(&format!("p-{n}"), n, ArticleStatus::Published))
                .await
                .unwrap();
        }
        repo.insert(new_post("hidden", 10, ArticleStatus::Draft))
            .await
            .unwrap();

        let query = |after| ArticleQuery {
            filter: ArticleFilter {
                status: StatusFilter::default(),
                ..ArticleFilter::default()
            },
            sort: ArticleSort::Latest,
            limit: 2,
            after,
        };
        let first = repo.query(query(None)).await.unwrap();
        let slugs: Vec<_> = first.articles.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, ["p-2", "p-1"]);

        let second = repo.query(query(first.next_cursor)).await.unwrap();
        assert_eq!(second.articles.len(), 1);
        assert_eq!(second.articles[0].slug.as_str(), "p-0");
        assert!(second.next_cursor.is_none());
    }
}
