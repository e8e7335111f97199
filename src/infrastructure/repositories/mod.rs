// src/infrastructure/repositories/mod.rs
mod error;
mod memory_article;
mod memory_category;
mod postgres_article;
mod postgres_category;

pub use error::map_sqlx;
pub use memory_article::InMemoryArticleRepository;
pub use memory_category::InMemoryCategoryDirectory;
pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_category::PostgresCategoryDirectory;
