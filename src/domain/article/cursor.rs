use crate::domain::article::{entity::Article, query::ArticleSort, value_objects::ArticleId};
use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset position of the last post on a page. Encodes its sort key plus id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleListCursor {
    Latest {
        sort_at: DateTime<Utc>,
        article_id: ArticleId,
    },
    Popular {
        view_count: i64,
        article_id: ArticleId,
    },
}

fn invalid_cursor() -> DomainError {
    DomainError::validation("cursor", "invalid cursor token")
}

impl ArticleListCursor {
    pub fn after(sort: ArticleSort, article: &Article) -> Self {
        match sort {
            ArticleSort::Latest => Self::Latest {
                sort_at: article.latest_sort_key(),
                article_id: article.id,
            },
            ArticleSort::Popular => Self::Popular {
                view_count: article.view_count,
                article_id: article.id,
            },
        }
    }

    pub const fn sort(&self) -> ArticleSort {
        match self {
            Self::Latest { .. } => ArticleSort::Latest,
            Self::Popular { .. } => ArticleSort::Popular,
        }
    }

    /// True when `article` sorts strictly after this position.
    pub fn admits(&self, article: &Article) -> bool {
        match self {
            Self::Latest {
                sort_at,
                article_id,
            } => (article.latest_sort_key(), article.id) < (*sort_at, *article_id),
            Self::Popular {
                view_count,
                article_id,
            } => (article.view_count, article.id) < (*view_count, *article_id),
        }
    }

    pub fn encode(&self) -> String {
        let raw = match self {
            Self::Latest {
                sort_at,
                article_id,
            } => format!("latest|{}|{}", sort_at.to_rfc3339(), article_id.0),
            Self::Popular {
                view_count,
                article_id,
            } => format!("popular|{view_count}|{}", article_id.0),
        };
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| invalid_cursor())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid_cursor())?;
        let mut parts = raw.splitn(3, '|');
        let kind = parts.next().ok_or_else(invalid_cursor)?;
        let key = parts.next().ok_or_else(invalid_cursor)?;
        let id = parts
            .next()
            .and_then(|value| value.parse::<i64>().ok())
            .ok_or_else(invalid_cursor)?;
        let article_id = ArticleId::new(id).map_err(|_| invalid_cursor())?;

        match kind {
            "latest" => {
                let sort_at = DateTime::parse_from_rfc3339(key)
                    .map_err(|_| invalid_cursor())?
                    .with_timezone(&Utc);
                Ok(Self::Latest {
                    sort_at,
                    article_id,
                })
            }
            "popular" => {
                let view_count = key.parse::<i64>().map_err(|_| invalid_cursor())?;
                Ok(Self::Popular {
                    view_count,
                    article_id,
                })
            }
            _ => Err(invalid_cursor()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_cursor_survives_encoding_with_subsecond_precision() {
        let sort_at = DateTime::parse_from_rfc3339("2024-05-01T08:30:15.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        let cursor = ArticleListCursor::Latest {
            sort_at,
            article_id: ArticleId(42),
        };
        let decoded = ArticleListCursor::decode(&cursor.encode()).expect("decode should succeed");
        assert_eq!(decoded, cursor);
        assert_eq!(decoded.sort(), ArticleSort::Latest);
    }

    #[test]
    fn popular_cursor_keeps_its_sort() {
        let cursor = ArticleListCursor::Popular {
            view_count: 1_337,
            article_id: ArticleId(7),
        };
        let decoded = ArticleListCursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
        assert_eq!(decoded.sort(), ArticleSort::Popular);
    }

    #[test]
    fn garbage_tokens_are_validation_errors() {
        let unknown_kind = URL_SAFE_NO_PAD.encode("oldest|x|1");
        let zero_id = URL_SAFE_NO_PAD.encode("popular|12|0");
        let tokens: [&str; 4] = ["", "!!!", &unknown_kind, &zero_id];
        for token in tokens {
            match ArticleListCursor::decode(token) {
                Err(DomainError::Validation { field, .. }) => assert_eq!(field, "cursor"),
                other => panic!("unexpected result for {token:?}: {other:?}"),
            }
        }
    }
}
