pub mod articles;
pub mod pagination;
pub mod serde_time;

pub use articles::{AdminArticleDto, ArticleDto, CategoryDto, CoverImageDto};
pub use pagination::CursorPage;
