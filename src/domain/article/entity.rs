// src/domain/article/entity.rs
use crate::domain::article::query::latest_key;
use crate::domain::article::services::derived::DerivedFields;
use crate::domain::article::value_objects::{
    ArticleId, ArticleSlug, ArticleStatus, ArticleTitle, CategoryId, ContentSource, CoverImage,
    Tags,
};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub subtitle: Option<String>,
    pub slug: ArticleSlug,
    pub content_source: ContentSource,
    pub content_rendered: String,
    pub excerpt: String,
    pub read_time_minutes: u32,
    pub category_id: CategoryId,
    pub tags: Tags,
    pub status: ArticleStatus,
    pub featured: bool,
    pub cover_image: Option<CoverImage>,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Replaces the source and every field derived from it in one step.
    pub fn set_content(&mut self, source: ContentSource, derived: DerivedFields, now: DateTime<Utc>) {
        self.content_source = source;
        self.content_rendered = derived.content_rendered;
        self.excerpt = derived.excerpt;
        self.read_time_minutes = derived.read_time_minutes;
        self.updated_at = now;
    }

    /// Applies a lifecycle move; `published_at` is stamped on the first publish only.
    pub fn change_status(&mut self, next: ArticleStatus, now: DateTime<Utc>) -> DomainResult<()> {
        self.status = self.status.transition_to(next)?;
        if self.status == ArticleStatus::Published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Archived posts are kept for history and cannot be edited.
    pub fn ensure_editable(&self) -> DomainResult<()> {
        if self.status == ArticleStatus::Archived {
            return Err(DomainError::InvalidTransition {
                from: ArticleStatus::Archived.as_str(),
                to: ArticleStatus::Archived.as_str(),
            });
        }
        Ok(())
    }

    pub fn latest_sort_key(&self) -> DateTime<Utc> {
        latest_key(self.published_at, self.created_at)
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub subtitle: Option<String>,
    pub slug: ArticleSlug,
    pub content_source: ContentSource,
    pub derived: DerivedFields,
    pub category_id: CategoryId,
    pub tags: Tags,
    pub status: ArticleStatus,
    pub featured: bool,
    pub cover_image: Option<CoverImage>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewArticle {
    pub fn into_article(self, id: ArticleId) -> Article {
        Article {
            id,
            title: self.title,
            subtitle: self.subtitle,
            slug: self.slug,
            content_source: self.content_source,
            content_rendered: self.derived.content_rendered,
            excerpt: self.derived.excerpt,
            read_time_minutes: self.derived.read_time_minutes,
            category_id: self.category_id,
            tags: self.tags,
            status: self.status,
            featured: self.featured,
            cover_image: self.cover_image,
            view_count: 0,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Presence-aware change for an optional field: untouched, replaced, or cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Keep,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> FieldUpdate<T> {
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldUpdate<U> {
        match self {
            Self::Keep => FieldUpdate::Keep,
            Self::Set(value) => FieldUpdate::Set(f(value)),
            Self::Clear => FieldUpdate::Clear,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<FieldUpdate<U>, E> {
        Ok(match self {
            Self::Keep => FieldUpdate::Keep,
            Self::Set(value) => FieldUpdate::Set(f(value)?),
            Self::Clear => FieldUpdate::Clear,
        })
    }

    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(value) => *current = Some(value),
            Self::Clear => *current = None,
        }
    }
}

/// `None` = absent, `Some(None)` = explicit null, `Some(Some(v))` = value.
impl<T> From<Option<Option<T>>> for FieldUpdate<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Self::Keep,
            Some(None) => Self::Clear,
            Some(Some(value)) => Self::Set(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: ArticleStatus,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ContentChange {
    pub source: ContentSource,
    pub derived: DerivedFields,
}

/// Field-level write. `original_updated_at` guards against lost concurrent edits.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub subtitle: FieldUpdate<String>,
    pub content: Option<ContentChange>,
    pub excerpt: Option<String>,
    pub category_id: Option<CategoryId>,
    pub tags: Option<Tags>,
    pub status: Option<StatusChange>,
    pub featured: Option<bool>,
    pub cover_image: FieldUpdate<CoverImage>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            subtitle: FieldUpdate::Keep,
            content: None,
            excerpt: None,
            category_id: None,
            tags: None,
            status: None,
            featured: None,
            cover_image: FieldUpdate::Keep,
            original_updated_at,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_subtitle(mut self, subtitle: FieldUpdate<String>) -> Self {
        self.subtitle = subtitle;
        self
    }

    /// Source and derived fields travel together so they can never diverge in the store.
    pub fn with_content(mut self, source: ContentSource, derived: DerivedFields) -> Self {
        self.excerpt = None;
        self.content = Some(ContentChange { source, derived });
        self
    }

    pub fn with_excerpt(mut self, excerpt: String) -> Self {
        match &mut self.content {
            Some(change) => change.derived.excerpt = excerpt,
            None => self.excerpt = Some(excerpt),
        }
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_status(mut self, status: ArticleStatus, published_at: Option<DateTime<Utc>>) -> Self {
        self.status = Some(StatusChange {
            status,
            published_at,
        });
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn with_cover_image(mut self, cover_image: FieldUpdate<CoverImage>) -> Self {
        self.cover_image = cover_image;
        self
    }

    /// Writes this update onto a loaded record (used by stores without partial updates).
    pub fn apply_to(self, article: &mut Article) {
        if let Some(title) = self.title {
            article.title = title;
        }
        self.subtitle.apply_to(&mut article.subtitle);
        if let Some(ContentChange { source, derived }) = self.content {
            article.set_content(source, derived, self.updated_at);
        }
        if let Some(excerpt) = self.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(category_id) = self.category_id {
            article.category_id = category_id;
        }
        if let Some(tags) = self.tags {
            article.tags = tags;
        }
        if let Some(change) = self.status {
            article.status = change.status;
            article.published_at = change.published_at;
        }
        if let Some(featured) = self.featured {
            article.featured = featured;
        }
        self.cover_image.apply_to(&mut article.cover_image);
        article.updated_at = self.updated_at;
    }
}
