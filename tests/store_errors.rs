// tests/store_errors.rs
use std::sync::Arc;

use axum::http::StatusCode;
use edupress_core::application::{
    commands::articles::{CreatePostCommand, RecordViewCommand},
    error::ApplicationError,
    queries::articles::ListPostsQuery,
    services::ApplicationServices,
};
use edupress_core::infrastructure::{
    repositories::InMemoryCategoryDirectory, util::DefaultSlugGenerator,
};
use tower::util::ServiceExt as _;

mod support;
use support::{FixedClock, UnavailableStore};

fn services_over_a_dead_store() -> Arc<ApplicationServices> {
    Arc::new(ApplicationServices::new(
        Arc::new(UnavailableStore),
        Arc::new(UnavailableStore),
        Arc::new(InMemoryCategoryDirectory::new()),
        Arc::new(FixedClock),
        Arc::new(DefaultSlugGenerator),
        10,
    ))
}

/// ストア障害は StoreUnavailable として伝播する
#[tokio::test]
async fn every_operation_reports_the_store_as_unavailable() {
    let services = services_over_a_dead_store();

    let err = services
        .article_queries
        .list_posts(ListPostsQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::StoreUnavailable(_)));

    let command = CreatePostCommand::builder()
        .title("Anything")
        .content("body")
        .category("math")
        .build()
        .unwrap();
    let err = services
        .article_commands
        .create_post(command)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::StoreUnavailable(_)));

    let err = services
        .article_commands
        .record_view(RecordViewCommand { id: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::StoreUnavailable(_)));
}

#[tokio::test]
async fn unavailable_store_maps_to_503() {
    let app = support::make_test_router(services_over_a_dead_store());
    let resp = app
        .oneshot(support::empty_request("GET", "/api/v1/posts"))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
        .await;
}
