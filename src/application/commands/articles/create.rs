// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{
            ArticleStatus, ArticleTitle, CategoryId, ContentSource, CoverImage, DerivedFields,
            NewArticle, Tags,
        },
        errors::DomainError,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImageInput {
    pub url: String,
    pub external_id: String,
}

impl CoverImageInput {
    pub(super) fn into_domain(self) -> ApplicationResult<CoverImage> {
        CoverImage::new(self.url, self.external_id).map_err(Into::into)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
    pub title: String,
    pub subtitle: Option<String>,
    pub content_source: String,
    /// `Some("")` stores an empty excerpt; `None` derives one from the content.
    pub excerpt: Option<String>,
    pub category_id: String,
    pub tags: Vec<String>,
    /// Defaults to draft.
    pub status: Option<ArticleStatus>,
    pub featured: bool,
    pub cover_image: Option<CoverImageInput>,
}

impl CreatePostCommand {
    pub fn builder() -> CreatePostCommandBuilder {
        CreatePostCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreatePostCommandBuilder {
    title: Option<String>,
    subtitle: Option<String>,
    content_source: Option<String>,
    excerpt: Option<String>,
    category_id: Option<String>,
    tags: Vec<String>,
    status: Option<ArticleStatus>,
    featured: bool,
    cover_image: Option<CoverImageInput>,
}

impl CreatePostCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn content(mut self, content_source: impl Into<String>) -> Self {
        self.content_source = Some(content_source.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn status(mut self, status: ArticleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn cover_image(mut self, url: impl Into<String>, external_id: impl Into<String>) -> Self {
        self.cover_image = Some(CoverImageInput {
            url: url.into(),
            external_id: external_id.into(),
        });
        self
    }

    pub fn build(self) -> ApplicationResult<CreatePostCommand> {
        Ok(CreatePostCommand {
            title: self
                .title
                .ok_or_else(|| ApplicationError::validation("title", "title is required"))?,
            subtitle: self.subtitle,
            content_source: self.content_source.ok_or_else(|| {
                ApplicationError::validation("contentSource", "content cannot be empty")
            })?,
            excerpt: self.excerpt,
            category_id: self
                .category_id
                .ok_or_else(|| ApplicationError::validation("categoryId", "category is required"))?,
            tags: self.tags,
            status: self.status,
            featured: self.featured,
            cover_image: self.cover_image,
        })
    }
}

pub(super) fn normalize_subtitle(subtitle: String) -> Option<String> {
    let trimmed = subtitle.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ArticleCommandService {
    pub async fn create_post(&self, command: CreatePostCommand) -> ApplicationResult<ArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let category_id = CategoryId::new(command.category_id)?;
        let content_source = ContentSource::new(command.content_source)?;
        let status = command.status.unwrap_or_default();
        if status == ArticleStatus::Archived {
            return Err(ApplicationError::validation(
                "status",
                "a post cannot be created archived",
            ));
        }
        let cover_image = command
            .cover_image
            .map(CoverImageInput::into_domain)
            .transpose()?;

        let derived = DerivedFields::compute(&content_source, command.excerpt);
        let tags = Tags::normalize(&command.tags);
        let subtitle = command.subtitle.and_then(normalize_subtitle);
        let now = self.clock.now();

        let mut allocation = self.slug_service.allocate(&title).await?;

        loop {
            let new_article = NewArticle {
                title: title.clone(),
                subtitle: subtitle.clone(),
                slug: allocation.slug.clone(),
                content_source: content_source.clone(),
                derived: derived.clone(),
                category_id: category_id.clone(),
                tags: tags.clone(),
                status,
                featured: command.featured,
                cover_image: cover_image.clone(),
                published_at: (status == ArticleStatus::Published).then_some(now),
                created_at: now,
                updated_at: now,
            };

            match self.write_repo.insert(new_article).await {
                Ok(created) => {
                    tracing::info!(
                        post_id = %created.id,
                        slug = %created.slug,
                        status = %created.status,
                        "post created"
                    );
                    return Ok(created.into());
                }
                Err(DomainError::SlugTaken(_)) => {
                    tracing::warn!(
                        slug = %allocation.slug,
                        attempt = allocation.attempt,
                        "slug claimed by a concurrent insert, retrying"
                    );
                    allocation = self.slug_service.allocate_after(allocation).await?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
