use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

/// Admin edit form lookup; returns posts in any status.
#[derive(Debug, Clone, Copy)]
pub struct GetPostByIdQuery {
    pub id: i64,
}

impl ArticleQueryService {
    pub async fn get_post_by_id(&self, query: GetPostByIdQuery) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id).map_err(|_| ApplicationError::not_found("post not found"))?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;
        Ok(article.into())
    }
}
