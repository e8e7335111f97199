use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        ArticleFilter, ArticleListCursor, ArticlePage, ArticleQuery, ArticleSort, CategoryId,
        StatusFilter, Tags,
    },
};

pub const MAX_PAGE_SIZE: u32 = 50;

/// Listing options. Every call carries its own filters; nothing is remembered between calls.
#[derive(Debug, Clone, Default)]
pub struct ListPostsQuery {
    /// `0` selects the configured default.
    pub page_size: u32,
    pub category_id: Option<String>,
    pub tag: Option<String>,
    /// `None` lists published posts only.
    pub status: Option<StatusFilter>,
    pub featured: Option<bool>,
    pub sort: ArticleSort,
    pub cursor: Option<String>,
}

impl ArticleQueryService {
    pub async fn list_posts(&self, query: ListPostsQuery) -> ApplicationResult<CursorPage<ArticleDto>> {
        let page = self.fetch_page(query, StatusFilter::default()).await?;
        Ok(CursorPage::new(
            page.articles.into_iter().map(Into::into).collect(),
            page.next_cursor.map(|cursor| cursor.encode()),
        ))
    }

    pub(super) async fn fetch_page(
        &self,
        query: ListPostsQuery,
        default_status: StatusFilter,
    ) -> ApplicationResult<ArticlePage> {
        let limit = self.normalize_page_size(query.page_size);
        let after = decode_cursor(query.cursor.as_deref(), query.sort)?;

        let category_id = non_blank(query.category_id)
            .map(CategoryId::new)
            .transpose()?;
        let tag = query.tag.as_deref().and_then(Tags::normalize_one);

        let filter = ArticleFilter {
            status: query.status.unwrap_or(default_status),
            category_id,
            tag,
            featured: query.featured,
            exclude_id: None,
        };

        let page = self
            .read_repo
            .query(ArticleQuery {
                filter,
                sort: query.sort,
                limit,
                after,
            })
            .await?;
        Ok(page)
    }

    pub(super) fn normalize_page_size(&self, page_size: u32) -> u32 {
        let page_size = if page_size == 0 {
            self.default_page_size
        } else {
            page_size
        };
        page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

fn decode_cursor(token: Option<&str>, sort: ArticleSort) -> ApplicationResult<Option<ArticleListCursor>> {
    let Some(token) = token.filter(|token| !token.trim().is_empty()) else {
        return Ok(None);
    };
    let cursor = ArticleListCursor::decode(token)?;
    if cursor.sort() != sort {
        return Err(ApplicationError::validation(
            "cursor",
            format!("cursor was issued for `{}` but the query sorts by `{sort}`", cursor.sort()),
        ));
    }
    Ok(Some(cursor))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
