mod admin;
mod get_by_id;
mod get_by_slug;
mod list;
mod related;
mod service;

pub use admin::ListAdminPostsQuery;
pub use get_by_id::GetPostByIdQuery;
pub use get_by_slug::GetPostBySlugQuery;
pub use list::{ListPostsQuery, MAX_PAGE_SIZE};
pub use related::{DEFAULT_RELATED_LIMIT, ListRelatedPostsQuery};
pub use service::ArticleQueryService;
