// src/presentation/http/extractors.rs
//! Wrappers over axum's extractors whose rejections answer with an `ErrorResponse`.
use crate::application::error::ApplicationError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// JSON request body. Malformed or mistyped bodies are a validation error on `body`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError::from_error(ApplicationError::validation(
                "body",
                rejection.body_text(),
            ))),
        }
    }
}

/// Query string parameters. Unparseable values are a validation error on `query`.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError::from_error(ApplicationError::validation(
                "query",
                rejection.body_text(),
            ))),
        }
    }
}

/// Numeric post id from the path. A segment that is not an id names no post.
#[derive(Debug, Clone, Copy)]
pub struct PostIdPath(pub i64);

impl<S> FromRequestParts<S> for PostIdPath
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| Self(id))
            .map_err(|_| HttpError::from_error(ApplicationError::not_found("post not found")))
    }
}
