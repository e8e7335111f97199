// src/presentation/http/openapi.rs
use crate::application::dto::{AdminArticleDto, ArticleDto, CursorPage};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<ArticleDto>,
    /// Null on the last page.
    pub cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminPostListResponse {
    pub posts: Vec<AdminArticleDto>,
    pub cursor: Option<String>,
    pub has_more: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::posts::list_posts,
        crate::presentation::http::controllers::posts::get_post_by_slug,
        crate::presentation::http::controllers::posts::list_related_posts,
        crate::presentation::http::controllers::posts::record_view,
        crate::presentation::http::controllers::admin_posts::list_admin_posts,
        crate::presentation::http::controllers::admin_posts::create_post,
        crate::presentation::http::controllers::admin_posts::get_post,
        crate::presentation::http::controllers::admin_posts::preview_post_by_slug,
        crate::presentation::http::controllers::admin_posts::update_post,
        crate::presentation::http::controllers::admin_posts::archive_post,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            PostListResponse,
            AdminPostListResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::admin_posts::CreatePostRequest,
            crate::presentation::http::controllers::admin_posts::UpdatePostRequest,
            crate::application::dto::ArticleDto,
            crate::application::dto::AdminArticleDto,
            crate::application::dto::CategoryDto,
            crate::application::dto::CoverImageDto
        )
    ),
    tags(
        (name = "Posts", description = "Public blog endpoints"),
        (name = "Admin", description = "Post management endpoints for the admin panel"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Edupress API",
        description = "Blog publishing service",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let listed = env::var("PUBLIC_API_URLS").unwrap_or_default();
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into());
        openapi.servers = Some(
            server_urls(&listed, &listen_addr)
                .into_iter()
                .map(Server::new)
                .collect(),
        );
    }
}

/// Advertised base URLs: `PUBLIC_API_URLS` in order without repeats, else the listen address.
fn server_urls(listed: &str, listen_addr: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let urls: Vec<String> = listed
        .split(',')
        .map(|url| url.trim().trim_end_matches('/'))
        .filter(|url| !url.is_empty() && seen.insert(*url))
        .map(str::to_string)
        .collect();
    if urls.is_empty() {
        vec![format!("http://{listen_addr}")]
    } else {
        urls
    }
}

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Writes the pretty-printed document to `OPENAPI_SNAPSHOT_PATH` and returns the path used.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}

impl From<CursorPage<ArticleDto>> for PostListResponse {
    fn from(page: CursorPage<ArticleDto>) -> Self {
        Self {
            posts: page.posts,
            cursor: page.cursor,
            has_more: page.has_more,
        }
    }
}

impl From<CursorPage<AdminArticleDto>> for AdminPostListResponse {
    fn from(page: CursorPage<AdminArticleDto>) -> Self {
        Self {
            posts: page.posts,
            cursor: page.cursor,
            has_more: page.has_more,
        }
    }
}
