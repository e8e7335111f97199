// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleId, ArticleListCursor, ArticlePage, ArticleQuery, ArticleReadRepository,
    ArticleSlug, ArticleSort, ArticleTitle, ArticleUpdate, ArticleWriteRepository,
    CategoryId, ContentChange, ContentSource, CoverImage, FieldUpdate, NewArticle, StatusChange,
    StatusFilter, Tags,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const POST_COLUMNS: &str = "id, title, subtitle, slug, content_source, content_rendered, excerpt, \
     read_time_minutes, category_id, tags, status, featured, cover_image_url, \
     cover_image_external_id, view_count, published_at, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    subtitle: Option<String>,
    slug: String,
    content_source: String,
    content_rendered: String,
    excerpt: String,
    read_time_minutes: i32,
    category_id: String,
    tags: Vec<String>,
    status: String,
    featured: bool,
    cover_image_url: Option<String>,
    cover_image_external_id: Option<String>,
    view_count: i64,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Article {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let cover_image = match (row.cover_image_url, row.cover_image_external_id) {
            (Some(url), Some(external_id)) => Some(CoverImage::new(url, external_id)?),
            _ => None,
        };
        let read_time_minutes = u32::try_from(row.read_time_minutes).map_err(|_| {
            DomainError::Persistence(format!("post {} has a negative read time", row.id))
        })?;

        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            subtitle: row.subtitle,
            slug: ArticleSlug::new(row.slug)?,
            content_source: ContentSource::new(row.content_source)?,
            content_rendered: row.content_rendered,
            excerpt: row.excerpt,
            read_time_minutes,
            category_id: CategoryId::new(row.category_id)?,
            tags: Tags::normalize(row.tags),
            status: row.status.parse()?,
            featured: row.featured,
            cover_image,
            view_count: row.view_count,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn read_time_column(minutes: u32) -> i32 {
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            subtitle,
            slug,
            content_source,
            derived,
            category_id,
            tags,
            status,
            featured,
            cover_image,
            published_at,
            created_at,
            updated_at,
        } = article;
        let (cover_url, cover_external_id) = cover_image
            .map(|image| (image.url, image.external_id))
            .unzip();

        let sql = format!(
            "INSERT INTO posts (title, subtitle, slug, content_source, content_rendered, excerpt, \
             read_time_minutes, category_id, tags, status, featured, cover_image_url, \
             cover_image_external_id, published_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(title.into_inner())
            .bind(subtitle)
            .bind(slug.into_inner())
            .bind(content_source.into_inner())
            .bind(derived.content_rendered)
            .bind(derived.excerpt)
            .bind(read_time_column(derived.read_time_minutes))
            .bind(category_id.into_inner())
            .bind(tags.into_inner())
            .bind(status.as_str())
            .bind(featured)
            .bind(cover_url)
            .bind(cover_external_id)
            .bind(published_at)
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update_fields(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            subtitle,
            content,
            excerpt,
            category_id,
            tags,
            status,
            featured,
            cover_image,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }

        match subtitle {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(subtitle) => {
                builder.push(", subtitle = ");
                builder.push_bind(subtitle);
            }
            FieldUpdate::Clear => {
                builder.push(", subtitle = NULL");
            }
        }

        if let Some(ContentChange { source, derived }) = content {
            builder.push(", content_source = ");
            builder.push_bind(source.into_inner());
            builder.push(", content_rendered = ");
            builder.push_bind(derived.content_rendered);
            builder.push(", excerpt = ");
            builder.push_bind(derived.excerpt);
            builder.push(", read_time_minutes = ");
            builder.push_bind(read_time_column(derived.read_time_minutes));
        }

        if let Some(excerpt) = excerpt {
            builder.push(", excerpt = ");
            builder.push_bind(excerpt);
        }

        if let Some(category_id) = category_id {
            builder.push(", category_id = ");
            builder.push_bind(category_id.into_inner());
        }

        if let Some(tags) = tags {
            builder.push(", tags = ");
            builder.push_bind(tags.into_inner());
        }

        if let Some(StatusChange {
            status,
            published_at,
        }) = status
        {
            builder.push(", status = ");
            builder.push_bind(status.as_str());
            builder.push(", published_at = ");
            builder.push_bind(published_at);
        }

        if let Some(featured) = featured {
            builder.push(", featured = ");
            builder.push_bind(featured);
        }

        match cover_image {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(image) => {
                builder.push(", cover_image_url = ");
                builder.push_bind(image.url);
                builder.push(", cover_image_external_id = ");
                builder.push_bind(image.external_id);
            }
            FieldUpdate::Clear => {
                builder.push(", cover_image_url = NULL, cover_image_external_id = NULL");
            }
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" RETURNING ");
        builder.push(POST_COLUMNS);

        let maybe_row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        match maybe_row {
            Some(row) => Article::try_from(row),
            None => {
                let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1")
                    .bind(i64::from(id))
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx)?
                    .is_some();
                if exists {
                    Err(DomainError::Conflict(
                        "post was modified concurrently, please retry".into(),
                    ))
                } else {
                    Err(DomainError::NotFound("post not found".into()))
                }
            }
        }
    }

    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    if *has_where {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_where = true;
    }
}

impl PostgresArticleReadRepository {
    fn apply_conditions(builder: &mut QueryBuilder<'_, Postgres>, query: &ArticleQuery) {
        let filter = &query.filter;
        let mut has_where = false;

        if let StatusFilter::Only(status) = filter.status {
            push_clause(builder, &mut has_where);
            builder.push("status = ");
            builder.push_bind(status.as_str());
        }

        if let Some(category_id) = &filter.category_id {
            push_clause(builder, &mut has_where);
            builder.push("category_id = ");
            builder.push_bind(category_id.as_str().to_string());
        }

        if let Some(tag) = &filter.tag {
            push_clause(builder, &mut has_where);
            builder.push_bind(tag.clone());
            builder.push(" = ANY(tags)");
        }

        if let Some(featured) = filter.featured {
            push_clause(builder, &mut has_where);
            builder.push("featured = ");
            builder.push_bind(featured);
        }

        if let Some(excluded) = filter.exclude_id {
            push_clause(builder, &mut has_where);
            builder.push("id <> ");
            builder.push_bind(i64::from(excluded));
        }

        match &query.after {
            Some(ArticleListCursor::Latest {
                sort_at,
                article_id,
            }) => {
                push_clause(builder, &mut has_where);
                builder.push("(COALESCE(published_at, created_at), id) < (");
                builder.push_bind(*sort_at);
                builder.push(", ");
                builder.push_bind(i64::from(*article_id));
                builder.push(")");
            }
            Some(ArticleListCursor::Popular {
                view_count,
                article_id,
            }) => {
                push_clause(builder, &mut has_where);
                builder.push("(view_count, id) < (");
                builder.push_bind(*view_count);
                builder.push(", ");
                builder.push_bind(i64::from(*article_id));
                builder.push(")");
            }
            None => {}
        }
    }

    fn apply_ordering(builder: &mut QueryBuilder<'_, Postgres>, sort: ArticleSort) {
        match sort {
            ArticleSort::Latest => {
                builder.push(" ORDER BY COALESCE(published_at, created_at) DESC, id DESC");
            }
            ArticleSort::Popular => {
                builder.push(" ORDER BY view_count DESC, id DESC");
            }
        }
    }

    async fn fetch_one_by(&self, column: &str, value: PostKey<'_>) -> DomainResult<Option<Article>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE {column} = $1");
        let query = sqlx::query_as::<_, PostRow>(&sql);
        let query = match value {
            PostKey::Id(id) => query.bind(id),
            PostKey::Slug(slug) => query.bind(slug),
        };
        let row = query.fetch_optional(&self.pool).await.map_err(map_sqlx)?;
        row.map(Article::try_from).transpose()
    }
}

enum PostKey<'a> {
    Id(i64),
    Slug(&'a str),
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        self.fetch_one_by("id", PostKey::Id(i64::from(id))).await
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        self.fetch_one_by("slug", PostKey::Slug(slug.as_str())).await
    }

    async fn slug_exists(&self, slug: &ArticleSlug) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE slug = $1)")
            .bind(slug.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn query(&self, query: ArticleQuery) -> DomainResult<ArticlePage> {
        let limit = query.limit.max(1);
        let fetch_limit = i64::from(limit) + 1;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(POST_COLUMNS);
        builder.push(" FROM posts");
        Self::apply_conditions(&mut builder, &query);
        Self::apply_ordering(&mut builder, query.sort);
        builder.push(" LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ArticlePage::from_overfetch(articles, limit, query.sort))
    }
}
