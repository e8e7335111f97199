use super::{ArticleCommandService, create::{CoverImageInput, normalize_subtitle}};
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        Article, ArticleId, ArticleStatus, ArticleTitle, ArticleUpdate, CategoryId, ContentSource,
        DerivedFields, FieldUpdate, Tags,
    },
};
use chrono::{DateTime, Utc};

/// Partial update. There is deliberately no slug field: slugs never change.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: FieldUpdate<String>,
    pub content_source: Option<String>,
    pub excerpt: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ArticleStatus>,
    pub featured: Option<bool>,
    pub cover_image: FieldUpdate<CoverImageInput>,
}

impl UpdatePostCommand {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl ArticleCommandService {
    pub async fn update_post(&self, command: UpdatePostCommand) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)
            .map_err(|_| ApplicationError::not_found("post not found"))?;
        let mut article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        if let Some(next) = command.status {
            article.status.transition_to(next)?;
        }
        article.ensure_editable()?;

        let now = self.clock.now();
        let update = ArticleUpdate::new(id, article.updated_at, now);
        let update = apply_fields(&mut article, command, update, now)?;

        let updated = self.write_repo.update_fields(update).await?;
        if updated.status == ArticleStatus::Archived {
            tracing::info!(post_id = %updated.id, slug = %updated.slug, "post archived");
        } else {
            tracing::debug!(post_id = %updated.id, status = %updated.status, "post updated");
        }
        Ok(updated.into())
    }
}

fn apply_fields(
    article: &mut Article,
    command: UpdatePostCommand,
    mut update: ArticleUpdate,
    now: DateTime<Utc>,
) -> ApplicationResult<ArticleUpdate> {
    let UpdatePostCommand {
        id: _,
        title,
        subtitle,
        content_source,
        excerpt,
        category_id,
        tags,
        status,
        featured,
        cover_image,
    } = command;

    if let Some(title) = title {
        let title = ArticleTitle::new(title)?;
        article.title = title.clone();
        update = update.with_title(title);
    }

    if !subtitle.is_keep() {
        let subtitle = match subtitle {
            FieldUpdate::Set(value) => {
                normalize_subtitle(value).map_or(FieldUpdate::Clear, FieldUpdate::Set)
            }
            other => other,
        };
        subtitle.clone().apply_to(&mut article.subtitle);
        update = update.with_subtitle(subtitle);
    }

    match content_source {
        Some(source) => {
            let source = ContentSource::new(source)?;
            let derived = DerivedFields::compute(&source, excerpt);
            article.set_content(source.clone(), derived.clone(), now);
            update = update.with_content(source, derived);
        }
        None => {
            if let Some(excerpt) = excerpt {
                article.excerpt = excerpt.clone();
                update = update.with_excerpt(excerpt);
            }
        }
    }

    if let Some(category_id) = category_id {
        let category_id = CategoryId::new(category_id)?;
        article.category_id = category_id.clone();
        update = update.with_category(category_id);
    }

    if let Some(tags) = tags {
        let tags = Tags::normalize(&tags);
        article.tags = tags.clone();
        update = update.with_tags(tags);
    }

    if let Some(featured) = featured {
        article.featured = featured;
        update = update.with_featured(featured);
    }

    if !cover_image.is_keep() {
        let cover_image = cover_image.try_map(CoverImageInput::into_domain)?;
        cover_image.clone().apply_to(&mut article.cover_image);
        update = update.with_cover_image(cover_image);
    }

    if let Some(next) = status {
        let previous = (article.status, article.published_at);
        article.change_status(next, now)?;
        if previous != (article.status, article.published_at) {
            update = update.with_status(article.status, article.published_at);
        }
    }

    Ok(update)
}
