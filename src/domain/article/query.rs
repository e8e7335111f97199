use crate::domain::article::{
    cursor::ArticleListCursor,
    entity::Article,
    value_objects::{ArticleId, ArticleStatus, CategoryId},
};
use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Single sort dimension per query; `id` breaks ties so keyset cursors are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSort {
    /// `COALESCE(published_at, created_at)` descending.
    #[default]
    Latest,
    /// `view_count` descending.
    Popular,
}

impl ArticleSort {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Popular => "popular",
        }
    }

    /// Orders two posts as the store returns them (first = earlier in the page).
    pub fn compare(self, a: &Article, b: &Article) -> Ordering {
        match self {
            Self::Latest => b
                .latest_sort_key()
                .cmp(&a.latest_sort_key())
                .then_with(|| b.id.cmp(&a.id)),
            Self::Popular => b
                .view_count
                .cmp(&a.view_count)
                .then_with(|| b.id.cmp(&a.id)),
        }
    }
}

impl fmt::Display for ArticleSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleSort {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "popular" => Ok(Self::Popular),
            other => Err(DomainError::validation(
                "sort",
                format!("unknown sort `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Only(ArticleStatus),
    Any,
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::Only(ArticleStatus::Published)
    }
}

impl StatusFilter {
    pub fn matches(self, status: ArticleStatus) -> bool {
        match self {
            Self::Only(expected) => expected == status,
            Self::Any => true,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            Ok(Self::Any)
        } else {
            value.parse().map(Self::Only)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub status: StatusFilter,
    pub category_id: Option<CategoryId>,
    /// Already normalized with [`crate::domain::article::Tags::normalize_one`].
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub exclude_id: Option<ArticleId>,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        self.status.matches(article.status)
            && self
                .category_id
                .as_ref()
                .is_none_or(|category| *category == article.category_id)
            && self
                .tag
                .as_deref()
                .is_none_or(|tag| article.tags.contains(tag))
            && self
                .featured
                .is_none_or(|featured| featured == article.featured)
            && self.exclude_id.is_none_or(|excluded| excluded != article.id)
    }
}

#[derive(Debug, Clone)]
pub struct ArticleQuery {
    pub filter: ArticleFilter,
    pub sort: ArticleSort,
    pub limit: u32,
    pub after: Option<ArticleListCursor>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    /// Present only when at least one more matching post exists past this page.
    pub next_cursor: Option<ArticleListCursor>,
}

impl ArticlePage {
    /// Builds a page from up to `limit + 1` sorted rows.
    pub fn from_overfetch(mut rows: Vec<Article>, limit: u32, sort: ArticleSort) -> Self {
        let limit = limit as usize;
        let mut next_cursor = None;
        if rows.len() > limit {
            rows.truncate(limit);
            next_cursor = rows
                .last()
                .map(|last| ArticleListCursor::after(sort, last));
        }
        Self {
            articles: rows,
            next_cursor,
        }
    }
}

pub(crate) fn latest_key(published_at: Option<DateTime<Utc>>, created_at: DateTime<Utc>) -> DateTime<Utc> {
    published_at.unwrap_or(created_at)
}
