// src/presentation/http/controllers/posts.rs
use crate::application::{
    commands::articles::RecordViewCommand,
    dto::ArticleDto,
    error::ApplicationError,
    queries::articles::{GetPostBySlugQuery, ListPostsQuery, ListRelatedPostsQuery},
};
use crate::domain::article::ArticleSort;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{PostIdPath, QueryParams};
use crate::presentation::http::openapi::PostListResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PostListParams {
    /// Posts per page, 1 to 50. Defaults to 10.
    pub page_size: Option<u32>,
    pub category_id: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    /// `latest` (default) or `popular`.
    pub sort: Option<String>,
    /// Token from the previous page.
    pub cursor: Option<String>,
}

impl PostListParams {
    pub(super) fn into_query(self) -> Result<ListPostsQuery, ApplicationError> {
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<ArticleSort>)
            .transpose()?
            .unwrap_or_default();
        Ok(ListPostsQuery {
            page_size: self.page_size.unwrap_or(0),
            category_id: self.category_id,
            tag: self.tag,
            status: None,
            featured: self.featured,
            sort,
            cursor: self.cursor,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RelatedParams {
    /// Number of related posts, defaults to 3.
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(PostListParams),
    responses(
        (status = 200, description = "One page of published posts.", body = PostListResponse),
        (status = 400, description = "Invalid filter, sort or cursor.", body = crate::presentation::http::error::ErrorResponse),
        (status = 503, description = "Content store unavailable.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    QueryParams(params): QueryParams<PostListParams>,
) -> HttpResult<Json<PostListResponse>> {
    let query = params.into_query().into_http()?;
    state
        .services
        .article_queries
        .list_posts(query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "A published post.", body = ArticleDto),
        (status = 404, description = "No published post with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_post_by_slug(GetPostBySlugQuery::public(slug))
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}/related",
    params(("slug" = String, Path, description = "Post slug"), RelatedParams),
    responses(
        (status = 200, description = "Newest published posts in the same category.", body = [ArticleDto]),
        (status = 404, description = "No published post with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn list_related_posts(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    QueryParams(params): QueryParams<RelatedParams>,
) -> HttpResult<Json<Vec<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_related_posts(ListRelatedPostsQuery {
            slug,
            limit: params.limit.unwrap_or(0),
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{slug}/views",
    params(("slug" = i64, Path, description = "Numeric id of the post")),
    responses(
        (status = 204, description = "View recorded."),
        (status = 404, description = "No published post with this id.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn record_view(
    Extension(state): Extension<HttpState>,
    PostIdPath(id): PostIdPath,
) -> HttpResult<StatusCode> {
    state
        .services
        .article_commands
        .record_view(RecordViewCommand { id })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
