use crate::domain::errors::DomainError;

const CNT_POST_SLUG: &str = "posts_slug_key";
const CNT_POST_STATUS_CHECK: &str = "posts_status_check";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_POST_SLUG => DomainError::SlugTaken("slug already exists".into()),
                    CNT_POST_STATUS_CHECK => {
                        DomainError::validation("status", "unknown post status")
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if db_err.code().as_deref() == Some("23505") {
                return DomainError::Conflict("unique constraint violated".into());
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => DomainError::Unavailable(err.to_string()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
