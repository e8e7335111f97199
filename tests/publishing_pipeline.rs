// tests/publishing_pipeline.rs
use edupress_core::application::{
    commands::articles::{ArchivePostCommand, RecordViewCommand, UpdatePostCommand},
    error::ApplicationError,
    queries::articles::{GetPostByIdQuery, GetPostBySlugQuery},
};
use edupress_core::domain::article::{ArticleStatus, ContentSource, DerivedFields, FieldUpdate};

mod support;
use support::{TestApp, post, words};

/// シナリオA: 下書き作成時の派生フィールド
#[tokio::test]
async fn creating_a_draft_derives_slug_and_read_time() {
    let app = TestApp::new();
    let created = app
        .create(
            post("Phương pháp học Toán")
                .content(words("alpha", 250))
                .status(ArticleStatus::Draft)
                .build()
                .unwrap(),
        )
        .await;

    assert_eq!(created.slug, "phuong-phap-hoc-toan");
    assert_eq!(created.read_time_minutes, 2);
    assert!(created.published_at.is_none());
    assert_eq!(created.status, "draft");
    assert_eq!(created.view_count, 0);
    assert!(created.excerpt.starts_with("alpha0 alpha1"));
}

/// シナリオB: 初回公開時のみ publishedAt を記録する
#[tokio::test]
async fn publishing_stamps_published_at_once() {
    let app = TestApp::new();
    let draft = app.create(post("Publish me").build().unwrap()).await;

    let published = app
        .commands()
        .update_post(UpdatePostCommand {
            status: Some(ArticleStatus::Published),
            ..UpdatePostCommand::new(draft.id)
        })
        .await
        .unwrap();
    let first_stamp = published.published_at.expect("published_at set");

    let again = app
        .commands()
        .update_post(UpdatePostCommand {
            status: Some(ArticleStatus::Published),
            ..UpdatePostCommand::new(draft.id)
        })
        .await
        .unwrap();
    assert_eq!(again.published_at, Some(first_stamp));

    // unpublish, edit, republish: the original stamp survives
    app.commands()
        .update_post(UpdatePostCommand {
            status: Some(ArticleStatus::Draft),
            ..UpdatePostCommand::new(draft.id)
        })
        .await
        .unwrap();
    let republished = app
        .commands()
        .update_post(UpdatePostCommand {
            title: Some("Publish me again".into()),
            status: Some(ArticleStatus::Published),
            ..UpdatePostCommand::new(draft.id)
        })
        .await
        .unwrap();
    assert_eq!(republished.published_at, Some(first_stamp));
    assert_eq!(republished.slug, "publish-me");
}

/// シナリオC: 本文更新で派生フィールドを再計算する
#[tokio::test]
async fn content_update_rederives_read_time_and_excerpt() {
    let app = TestApp::new();
    let created = app
        .create(post("Rewrite").content(words("alpha", 250)).build().unwrap())
        .await;

    let updated = app
        .commands()
        .update_post(UpdatePostCommand {
            content_source: Some(words("beta", 450)),
            ..UpdatePostCommand::new(created.id)
        })
        .await
        .unwrap();

    assert_eq!(updated.read_time_minutes, 3);
    assert_ne!(updated.excerpt, created.excerpt);
    assert!(updated.excerpt.starts_with("beta0 beta1"));
    assert_ne!(updated.content_rendered, created.content_rendered);
    assert!(updated.updated_at > created.updated_at);
}

/// シナリオD: アーカイブ後の再公開は不正な遷移
#[tokio::test]
async fn archived_post_cannot_be_republished() {
    let app = TestApp::new();
    let created = app.create_published("Old news", "math").await;

    let archived = app
        .commands()
        .archive_post(ArchivePostCommand { id: created.id })
        .await
        .unwrap();
    assert_eq!(archived.status, "archived");
    assert_eq!(archived.published_at, created.published_at);

    let err = app
        .commands()
        .update_post(UpdatePostCommand {
            status: Some(ArticleStatus::Published),
            ..UpdatePostCommand::new(created.id)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidTransition(_)));

    let err = app
        .commands()
        .update_post(UpdatePostCommand {
            title: Some("edited".into()),
            ..UpdatePostCommand::new(created.id)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidTransition(_)));

    let err = app
        .commands()
        .archive_post(ArchivePostCommand { id: created.id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidTransition(_)));
}

#[tokio::test]
async fn stored_derived_fields_match_a_fresh_computation() {
    let app = TestApp::new();
    let source = "# Heading\n\nSome *emphasis* and a [link](https://example.com).\n\n```rust\nfn main() {}\n```\n\n<script>alert(1)</script>";
    let created = app
        .create(post("Derived").content(source).build().unwrap())
        .await;

    let recomputed = DerivedFields::compute(&ContentSource::new(source).unwrap(), None);
    assert_eq!(created.content_rendered, recomputed.content_rendered);
    assert_eq!(created.read_time_minutes, recomputed.read_time_minutes);
    assert_eq!(created.excerpt, recomputed.excerpt);
    assert!(created.read_time_minutes >= 1);
    assert!(!created.content_rendered.contains("<script>"));
    assert!(!created.excerpt.contains("fn main"));
}

#[tokio::test]
async fn explicit_excerpt_wins_and_empty_is_kept_empty() {
    let app = TestApp::new();
    let custom = app
        .create(post("Custom excerpt").excerpt("Hand written.").build().unwrap())
        .await;
    assert_eq!(custom.excerpt, "Hand written.");

    let empty = app
        .create(post("Empty excerpt").excerpt("").build().unwrap())
        .await;
    assert_eq!(empty.excerpt, "");

    // a content change with an explicit excerpt keeps the explicit one
    let updated = app
        .commands()
        .update_post(UpdatePostCommand {
            content_source: Some(words("gamma", 10)),
            excerpt: Some("Still mine.".into()),
            ..UpdatePostCommand::new(custom.id)
        })
        .await
        .unwrap();
    assert_eq!(updated.excerpt, "Still mine.");
    assert_eq!(updated.read_time_minutes, 1);
}

#[tokio::test]
async fn partial_update_touches_only_supplied_fields() {
    let app = TestApp::new();
    let created = app
        .create(
            post("Partial")
                .subtitle("A subtitle")
                .tags(["Rust", "rust", " Async "])
                .cover_image("https://cdn.example/img.png", "img-1")
                .build()
                .unwrap(),
        )
        .await;
    assert_eq!(created.tags, ["rust", "async"]);
    assert_eq!(created.subtitle.as_deref(), Some("A subtitle"));

    let updated = app
        .commands()
        .update_post(UpdatePostCommand {
            featured: Some(true),
            subtitle: FieldUpdate::Clear,
            cover_image: FieldUpdate::Clear,
            ..UpdatePostCommand::new(created.id)
        })
        .await
        .unwrap();
    assert!(updated.featured);
    assert!(updated.subtitle.is_none());
    assert!(updated.cover_image.is_none());
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.tags, created.tags);
    assert_eq!(updated.content_source, created.content_source);
    assert_eq!(updated.slug, created.slug);
}

#[tokio::test]
async fn validation_errors_name_the_offending_field() {
    let app = TestApp::new();
    let cases = [
        (post("   ").build().unwrap(), "title"),
        (post("No body").content("  \n ").build().unwrap(), "contentSource"),
        (post("No category").category(" ").build().unwrap(), "categoryId"),
        (
            post("Archived at birth")
                .status(ArticleStatus::Archived)
                .build()
                .unwrap(),
            "status",
        ),
    ];
    for (command, expected) in cases {
        let err = app.commands().create_post(command).await.unwrap_err();
        assert!(
            matches!(err, ApplicationError::Validation { ref field, .. } if field == expected),
            "expected validation on {expected}, got {err:?}"
        );
    }
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn missing_posts_are_not_found() {
    let app = TestApp::new();
    let err = app
        .commands()
        .update_post(UpdatePostCommand {
            featured: Some(true),
            ..UpdatePostCommand::new(42)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let err = app
        .queries()
        .get_post_by_id(GetPostByIdQuery { id: 42 })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

/// 0以下のIDは入力エラーではなく存在しない記事として扱う
#[tokio::test]
async fn non_positive_ids_are_not_found_for_update_and_archive() {
    let app = TestApp::new();
    for id in [0, -5] {
        let err = app
            .commands()
            .update_post(UpdatePostCommand {
                featured: Some(true),
                ..UpdatePostCommand::new(id)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)), "update {id}: {err:?}");

        let err = app
            .commands()
            .archive_post(ArchivePostCommand { id })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)), "archive {id}: {err:?}");
    }
}

#[tokio::test]
async fn drafts_are_hidden_from_public_lookup_but_visible_in_preview() {
    let app = TestApp::new();
    let draft = app.create(post("Secret draft").build().unwrap()).await;

    let err = app
        .queries()
        .get_post_by_slug(GetPostBySlugQuery::public(draft.slug.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let preview = app
        .queries()
        .get_post_by_slug(GetPostBySlugQuery {
            slug: draft.slug.clone(),
            include_unpublished: true,
        })
        .await
        .unwrap();
    assert_eq!(preview.id, draft.id);
}

#[tokio::test]
async fn views_count_only_on_published_posts() {
    let app = TestApp::new();
    let draft = app.create(post("Unseen").build().unwrap()).await;
    let err = app
        .commands()
        .record_view(RecordViewCommand { id: draft.id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let published = app.create_published("Seen", "math").await;
    for _ in 0..3 {
        app.commands()
            .record_view(RecordViewCommand { id: published.id })
            .await
            .unwrap();
    }
    let reloaded = app
        .queries()
        .get_post_by_id(GetPostByIdQuery { id: published.id })
        .await
        .unwrap();
    assert_eq!(reloaded.view_count, 3);
    // views do not count as edits
    assert_eq!(reloaded.updated_at, published.updated_at);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_views_are_never_lost() {
    let app = TestApp::new();
    let published = app.create_published("Popular", "math").await;

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let commands = app.commands();
            tokio::spawn(async move {
                commands
                    .record_view(RecordViewCommand { id: published.id })
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let reloaded = app
        .queries()
        .get_post_by_id(GetPostByIdQuery { id: published.id })
        .await
        .unwrap();
    assert_eq!(reloaded.view_count, 64);
}
