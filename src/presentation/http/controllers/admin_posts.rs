// src/presentation/http/controllers/admin_posts.rs
use super::posts::PostListParams;
use crate::application::{
    commands::articles::{
        ArchivePostCommand, CoverImageInput, CreatePostCommand, UpdatePostCommand,
    },
    dto::{ArticleDto, CoverImageDto},
    error::ApplicationError,
    queries::articles::{GetPostByIdQuery, GetPostBySlugQuery, ListAdminPostsQuery},
};
use crate::domain::article::{ArticleStatus, FieldUpdate, StatusFilter};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{JsonBody, PostIdPath, QueryParams};
use crate::presentation::http::openapi::AdminPostListResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn parse_status(raw: Option<String>) -> Result<Option<ArticleStatus>, ApplicationError> {
    raw.as_deref()
        .map(str::parse::<ArticleStatus>)
        .transpose()
        .map_err(Into::into)
}

fn cover_input(dto: CoverImageDto) -> CoverImageInput {
    CoverImageInput {
        url: dto.url,
        external_id: dto.external_id,
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AdminPostListParams {
    pub page_size: Option<u32>,
    pub category_id: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    /// `draft`, `published`, `archived` or `all` (default).
    pub status: Option<String>,
    pub sort: Option<String>,
    pub cursor: Option<String>,
}

impl AdminPostListParams {
    fn into_query(self) -> Result<ListAdminPostsQuery, ApplicationError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<StatusFilter>)
            .transpose()?;
        let mut listing = PostListParams {
            page_size: self.page_size,
            category_id: self.category_id,
            tag: self.tag,
            featured: self.featured,
            sort: self.sort,
            cursor: self.cursor,
        }
        .into_query()?;
        listing.status = status;
        Ok(ListAdminPostsQuery { listing })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content_source: String,
    /// Omit to derive one from the content; `""` stores an empty excerpt.
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `draft` (default) or `published`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub cover_image: Option<CoverImageDto>,
}

impl CreatePostRequest {
    fn into_command(self) -> Result<CreatePostCommand, ApplicationError> {
        Ok(CreatePostCommand {
            title: self.title,
            subtitle: self.subtitle,
            content_source: self.content_source,
            excerpt: self.excerpt,
            category_id: self.category_id,
            tags: self.tags,
            status: parse_status(self.status)?,
            featured: self.featured,
            cover_image: self.cover_image.map(cover_input),
        })
    }
}

/// Partial update; absent fields are left untouched. `null` clears `subtitle` and `coverImage`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub subtitle: Option<Option<String>>,
    #[serde(default)]
    pub content_source: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<CoverImageDto>)]
    pub cover_image: Option<Option<CoverImageDto>>,
}

impl UpdatePostRequest {
    fn into_command(self, id: i64) -> Result<UpdatePostCommand, ApplicationError> {
        Ok(UpdatePostCommand {
            id,
            title: self.title,
            subtitle: FieldUpdate::from(self.subtitle),
            content_source: self.content_source,
            excerpt: self.excerpt,
            category_id: self.category_id,
            tags: self.tags,
            status: parse_status(self.status)?,
            featured: self.featured,
            cover_image: FieldUpdate::from(self.cover_image).map(cover_input),
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/posts",
    params(AdminPostListParams),
    responses(
        (status = 200, description = "One page of posts in any status, with category display data.", body = AdminPostListResponse),
        (status = 400, description = "Invalid filter, sort or cursor.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn list_admin_posts(
    Extension(state): Extension<HttpState>,
    QueryParams(params): QueryParams<AdminPostListParams>,
) -> HttpResult<Json<AdminPostListResponse>> {
    let query = params.into_query().into_http()?;
    state
        .services
        .article_queries
        .list_admin_posts(query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created.", body = ArticleDto),
        (status = 400, description = "Validation failed.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "No free slug could be allocated.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn create_post(
    Extension(state): Extension<HttpState>,
    JsonBody(payload): JsonBody<CreatePostRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let command = payload.into_command().into_http()?;
    let created = state
        .services
        .article_commands
        .create_post(command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post, in any status.", body = ArticleDto),
        (status = 404, description = "Unknown post.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn get_post(
    Extension(state): Extension<HttpState>,
    PostIdPath(id): PostIdPath,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_post_by_id(GetPostByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/posts/by-slug/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Preview of a post in any status.", body = ArticleDto),
        (status = 404, description = "Unknown slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn preview_post_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_post_by_slug(GetPostBySlugQuery {
            slug,
            include_unpublished: true,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated.", body = ArticleDto),
        (status = 400, description = "Validation failed.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown post.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Disallowed status transition or concurrent edit.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn update_post(
    Extension(state): Extension<HttpState>,
    PostIdPath(id): PostIdPath,
    JsonBody(payload): JsonBody<UpdatePostRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = payload.into_command(id).into_http()?;
    state
        .services
        .article_commands
        .update_post(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post archived.", body = ArticleDto),
        (status = 404, description = "Unknown post.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Post is already archived.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn archive_post(
    Extension(state): Extension<HttpState>,
    PostIdPath(id): PostIdPath,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .archive_post(ArchivePostCommand { id })
        .await
        .into_http()
        .map(Json)
}
