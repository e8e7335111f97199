// tests/support/builders.rs
use std::sync::Arc;

use edupress_core::application::{
    commands::articles::{ArticleCommandService, CreatePostCommand},
    dto::ArticleDto,
    ports::time::Clock,
    queries::articles::ArticleQueryService,
    services::ApplicationServices,
};
use edupress_core::domain::article::{ArticleReadRepository, ArticleStatus, ArticleWriteRepository};
use edupress_core::infrastructure::{
    repositories::{InMemoryArticleRepository, InMemoryCategoryDirectory},
    util::DefaultSlugGenerator,
};

use super::mocks::SteppingClock;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// `n` distinct words prefixed with `prefix`, e.g. `alpha0 alpha1 ...`.
pub fn words(prefix: &str, n: usize) -> String {
    (0..n)
        .map(|i| format!("{prefix}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Application services over the in-memory store with a stepping clock.
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub store: InMemoryArticleRepository,
    pub categories: InMemoryCategoryDirectory,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryArticleRepository::new();
        let categories = InMemoryCategoryDirectory::new();
        let write: Arc<dyn ArticleWriteRepository> = Arc::new(store.clone());
        let read: Arc<dyn ArticleReadRepository> = Arc::new(store.clone());
        let clock: Arc<dyn Clock> = Arc::new(SteppingClock::new());
        let services = Arc::new(ApplicationServices::new(
            write,
            read,
            Arc::new(categories.clone()),
            clock,
            Arc::new(DefaultSlugGenerator),
            DEFAULT_PAGE_SIZE,
        ));
        Self {
            services,
            store,
            categories,
        }
    }

    pub fn commands(&self) -> Arc<ArticleCommandService> {
        Arc::clone(&self.services.article_commands)
    }

    pub fn queries(&self) -> Arc<ArticleQueryService> {
        Arc::clone(&self.services.article_queries)
    }

    pub async fn create(&self, command: CreatePostCommand) -> ArticleDto {
        self.services
            .article_commands
            .create_post(command)
            .await
            .expect("create post")
    }

    pub async fn create_published(&self, title: &str, category: &str) -> ArticleDto {
        self.create(post(title).category(category).status(ArticleStatus::Published).build().unwrap())
            .await
    }
}

/// Draft in category `math` with a short body; adjust through the builder.
pub fn post(title: &str) -> edupress_core::application::commands::articles::CreatePostCommandBuilder {
    CreatePostCommand::builder()
        .title(title)
        .content(words("lorem", 40))
        .category("math")
}
