use super::{ArticleQueryService, MAX_PAGE_SIZE};
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::article::{ArticleFilter, ArticleQuery, ArticleSort, StatusFilter},
};

pub const DEFAULT_RELATED_LIMIT: u32 = 3;

#[derive(Debug, Clone, Default)]
pub struct ListRelatedPostsQuery {
    pub slug: String,
    /// `0` selects [`DEFAULT_RELATED_LIMIT`].
    pub limit: u32,
}

impl ArticleQueryService {
    /// Newest published posts sharing the category of a published post, excluding that post.
    pub async fn list_related_posts(
        &self,
        query: ListRelatedPostsQuery,
    ) -> ApplicationResult<Vec<ArticleDto>> {
        let source = self.find_visible_by_slug(&query.slug, false).await?;
        let limit = match query.limit {
            0 => DEFAULT_RELATED_LIMIT,
            n => n.min(MAX_PAGE_SIZE),
        };

        let page = self
            .read_repo
            .query(ArticleQuery {
                filter: ArticleFilter {
                    status: StatusFilter::default(),
                    category_id: Some(source.category_id),
                    tag: None,
                    featured: None,
                    exclude_id: Some(source.id),
                },
                sort: ArticleSort::Latest,
                limit,
                after: None,
            })
            .await?;
        Ok(page.articles.into_iter().map(Into::into).collect())
    }
}
