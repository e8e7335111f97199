pub mod cursor;
pub mod entity;
pub mod query;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use cursor::ArticleListCursor;
pub use entity::{Article, ArticleUpdate, ContentChange, FieldUpdate, NewArticle, StatusChange};
pub use query::{ArticleFilter, ArticlePage, ArticleQuery, ArticleSort, StatusFilter};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use services::derived::DerivedFields;
pub use value_objects::{
    ArticleId, ArticleSlug, ArticleStatus, ArticleTitle, CategoryId, ContentSource, CoverImage,
    MAX_TAGS, Tags,
};
