use crate::application::ports::category::CategoryInfo;
use crate::domain::article::{Article, CategoryId, CoverImage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverImageDto {
    pub url: String,
    pub external_id: String,
}

impl From<CoverImage> for CoverImageDto {
    fn from(image: CoverImage) -> Self {
        Self {
            url: image.url,
            external_id: image.external_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: String,
    pub content_source: String,
    pub content_rendered: String,
    pub excerpt: String,
    pub read_time_minutes: u32,
    pub category_id: String,
    pub tags: Vec<String>,
    /// `draft`, `published` or `archived`.
    pub status: String,
    pub featured: bool,
    pub cover_image: Option<CoverImageDto>,
    pub view_count: i64,
    #[serde(default, with = "serde_time::option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            subtitle: article.subtitle,
            slug: article.slug.into_inner(),
            content_source: article.content_source.into_inner(),
            content_rendered: article.content_rendered,
            excerpt: article.excerpt,
            read_time_minutes: article.read_time_minutes,
            category_id: article.category_id.into_inner(),
            tags: article.tags.into_inner(),
            status: article.status.as_str().to_string(),
            featured: article.featured,
            cover_image: article.cover_image.map(Into::into),
            view_count: article.view_count,
            published_at: article.published_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl CategoryDto {
    pub fn new(id: &CategoryId, info: CategoryInfo) -> Self {
        Self {
            id: id.as_str().to_string(),
            name: info.name,
            color: info.color,
        }
    }
}

/// Admin table row: the post plus its category's display data, when the category exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminArticleDto {
    #[serde(flatten)]
    pub post: ArticleDto,
    pub category: Option<CategoryDto>,
}
