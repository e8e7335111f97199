use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, ArticleSlug},
};

#[derive(Debug, Clone, Default)]
pub struct GetPostBySlugQuery {
    pub slug: String,
    /// Admin preview. Public callers leave this off so drafts look absent.
    pub include_unpublished: bool,
}

impl GetPostBySlugQuery {
    pub fn public(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            include_unpublished: false,
        }
    }
}

impl ArticleQueryService {
    pub async fn get_post_by_slug(&self, query: GetPostBySlugQuery) -> ApplicationResult<ArticleDto> {
        let article = self
            .find_visible_by_slug(&query.slug, query.include_unpublished)
            .await?;
        Ok(article.into())
    }

    /// A malformed slug cannot name a stored post, so it reads as absent.
    pub(super) async fn find_visible_by_slug(
        &self,
        slug: &str,
        include_unpublished: bool,
    ) -> ApplicationResult<Article> {
        let slug = ArticleSlug::new(slug).map_err(|_| ApplicationError::not_found("post not found"))?;
        self.read_repo
            .find_by_slug(&slug)
            .await?
            .filter(|article| include_unpublished || article.status.is_public())
            .ok_or_else(|| ApplicationError::not_found("post not found"))
    }
}
