use super::ArticleCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::article::ArticleId,
};

#[derive(Debug, Clone, Copy)]
pub struct RecordViewCommand {
    pub id: i64,
}

impl ArticleCommandService {
    /// Bumps the view counter of a published post. Concurrent calls never lose increments.
    pub async fn record_view(&self, command: RecordViewCommand) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)
            .map_err(|_| ApplicationError::not_found("post not found"))?;
        let visible = self
            .read_repo
            .find_by_id(id)
            .await?
            .is_some_and(|article| article.status.is_public());
        if !visible {
            return Err(ApplicationError::not_found("post not found"));
        }

        if !self.write_repo.increment_view_count(id).await? {
            return Err(ApplicationError::not_found("post not found"));
        }
        tracing::debug!(post_id = %id, "view recorded");
        Ok(())
    }
}
