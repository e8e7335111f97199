// src/domain/article/services/mod.rs
pub mod derived;

use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleSlug, ArticleTitle};
use crate::domain::errors::{DomainError, DomainResult};

/// Candidates tried per allocation (`base`, `base-2`, ... `base-50`).
pub const MAX_SLUG_ATTEMPTS: u32 = 50;

const FALLBACK_SLUG: &str = "post";

/// A free slug, the base it was built from and the attempt number that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugAllocation {
    pub base: String,
    pub slug: ArticleSlug,
    pub attempt: u32,
}

/// Domain service responsible for producing unique slugs for articles.
///
/// Allocation only proposes a value; it reserves nothing. Callers insert with the
/// proposal and, if the store reports the slug as taken, resume from `attempt + 1`.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ArticleSlugService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    fn base_slug(&self, title: &ArticleTitle) -> String {
        let base = self.generator.slugify(title.as_str());
        if base.is_empty() {
            FALLBACK_SLUG.to_string()
        } else {
            base
        }
    }

    pub async fn allocate(&self, title: &ArticleTitle) -> DomainResult<SlugAllocation> {
        self.allocate_from(self.base_slug(title), 1).await
    }

    /// Resumes after a proposal the store rejected as taken.
    pub async fn allocate_after(&self, taken: SlugAllocation) -> DomainResult<SlugAllocation> {
        self.allocate_from(taken.base, taken.attempt + 1).await
    }

    /// Finds the first free candidate at or after `first_attempt`.
    async fn allocate_from(&self, base: String, first_attempt: u32) -> DomainResult<SlugAllocation> {
        for attempt in first_attempt.max(1)..=MAX_SLUG_ATTEMPTS {
            let slug = ArticleSlug::new(candidate(&base, attempt))?;
            if !self.read_repo.slug_exists(&slug).await? {
                return Ok(SlugAllocation {
                    base,
                    slug,
                    attempt,
                });
            }
            tracing::debug!(slug = %slug, attempt, "slug candidate taken");
        }

        Err(DomainError::SlugExhausted(format!(
            "no free slug for `{base}` after {MAX_SLUG_ATTEMPTS} attempts"
        )))
    }
}

fn candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}
