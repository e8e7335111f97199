use anyhow::Result;
use edupress_core::application::{
    ports::{category::CategoryDirectory, time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use edupress_core::config::{AppConfig, ArticleStoreKind};
use edupress_core::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use edupress_core::infrastructure::{
    database,
    repositories::{
        InMemoryArticleRepository, InMemoryCategoryDirectory, PostgresArticleReadRepository,
        PostgresArticleWriteRepository, PostgresCategoryDirectory,
    },
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use edupress_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Stores = (
    Arc<dyn ArticleWriteRepository>,
    Arc<dyn ArticleReadRepository>,
    Arc<dyn CategoryDirectory>,
);

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let (article_write_repo, article_read_repo, categories) = init_stores(&config).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        article_write_repo,
        article_read_repo,
        categories,
        clock,
        slugger,
        config.default_page_size(),
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn init_stores(config: &AppConfig) -> Result<Stores> {
    match config.article_store() {
        ArticleStoreKind::Postgres => {
            let pool = database::init_pool(
                config.database_url(),
                config.database_max_connections(),
                config.database_acquire_timeout(),
            )
            .await?;
            database::run_migrations(&pool).await?;
            tracing::info!(
                max_connections = config.database_max_connections(),
                "connected to postgres"
            );
            Ok((
                Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
                Arc::new(PostgresArticleReadRepository::new(pool.clone())),
                Arc::new(PostgresCategoryDirectory::new(pool)),
            ))
        }
        ArticleStoreKind::Memory => {
            tracing::warn!("using the in-memory post store; data is lost on shutdown");
            let repo = InMemoryArticleRepository::new();
            Ok((
                Arc::new(repo.clone()),
                Arc::new(repo),
                Arc::new(InMemoryCategoryDirectory::new()),
            ))
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
