// src/config.rs
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

/// Which backend holds posts. `memory` is for demos and local runs without Postgres.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArticleStoreKind {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for ArticleStoreKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid(format!(
                "ARTICLE_STORE must be `postgres` or `memory`, got `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    allowed_origins: Vec<String>,
    article_store: ArticleStoreKind,
    database_max_connections: u32,
    database_acquire_timeout: Duration,
    default_page_size: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a positive integer"))),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Build configuration from environment variables (and `.env` when present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let article_store = env::var("ARTICLE_STORE")
            .ok()
            .map(|value| value.parse::<ArticleStoreKind>())
            .transpose()?
            .unwrap_or_default();

        // only the postgres store needs a connection string
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) if article_store == ArticleStoreKind::Memory => String::new(),
            Err(_) => return Err(ConfigError::Missing("DATABASE_URL")),
        };
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(default_allowed_origins);

        let database_max_connections = parse_number("DATABASE_MAX_CONNECTIONS", 16_u32)?;
        let acquire_timeout_secs = parse_number("DATABASE_ACQUIRE_TIMEOUT_SECS", 5_u64)?;
        let default_page_size = parse_number("DEFAULT_PAGE_SIZE", 10_u32)?;

        if database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        Ok(Self {
            database_url,
            listen_addr,
            allowed_origins,
            article_store,
            database_max_connections,
            database_acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            default_page_size,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn article_store(&self) -> ArticleStoreKind {
        self.article_store
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn database_acquire_timeout(&self) -> Duration {
        self.database_acquire_timeout
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Used by router construction in tests where a full `AppConfig` is unnecessary.
    pub fn allowed_origins_from_env() -> Vec<String> {
        env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(default_allowed_origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_kind_parses_case_insensitively() {
        assert_eq!("Memory".parse::<ArticleStoreKind>().unwrap(), ArticleStoreKind::Memory);
        assert_eq!(
            " postgres ".parse::<ArticleStoreKind>().unwrap(),
            ArticleStoreKind::Postgres
        );
        assert!("mongo".parse::<ArticleStoreKind>().is_err());
    }

    #[test]
    fn origins_skip_blank_entries() {
        assert_eq!(
            parse_origins("https://a.example, ,https://b.example"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }
}
