use super::{ArticleCommandService, UpdatePostCommand};
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::article::ArticleStatus,
};

#[derive(Debug, Clone, Copy)]
pub struct ArchivePostCommand {
    pub id: i64,
}

impl ArticleCommandService {
    /// Soft delete. The row stays for history and drops out of public listings.
    pub async fn archive_post(&self, command: ArchivePostCommand) -> ApplicationResult<ArticleDto> {
        self.update_post(UpdatePostCommand {
            status: Some(ArticleStatus::Archived),
            ..UpdatePostCommand::new(command.id)
        })
        .await
    }
}
