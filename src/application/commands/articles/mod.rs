// src/application/commands/articles/mod.rs
mod archive;
mod create;
mod service;
mod update;
mod view;

pub use archive::ArchivePostCommand;
pub use create::{CoverImageInput, CreatePostCommand, CreatePostCommandBuilder};
pub use service::ArticleCommandService;
pub use update::UpdatePostCommand;
pub use view::RecordViewCommand;
