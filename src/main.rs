use std::{process, sync::Arc};

use escape::{
    application::{
        assets::AssetStore,
        error::AppError,
        feed::FeedService,
        ingest::PostIngestService,
        repos::{PostsRepo, PostsWriteRepo},
    },
    config,
    infra::{
        content::ContentStore,
        db::PostgresRepositories,
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
};
use sqlx::PgPool;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;

    let content = Arc::new(
        ContentStore::new(
            settings.content.directory.clone(),
            &settings.content.public_prefix,
        )
        .map_err(InfraError::from)?,
    );

    let reader: Arc<dyn PostsRepo> = repositories.clone();
    let writer: Arc<dyn PostsWriteRepo> = repositories.clone();
    let assets: Arc<dyn AssetStore> = content.clone();

    let state = HttpState {
        feed: Arc::new(FeedService::new(reader)),
        ingest: Arc::new(PostIngestService::new(assets, writer)),
        content,
        health: repositories,
        site: settings.site.chrome(),
    };

    serve_http(&settings, state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect_pool(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;
    info!(target = "escape::migrate", "database migrations applied");
    Ok(())
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let pool = connect_pool(settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;
    Ok(Arc::new(PostgresRepositories::new(pool)))
}

async fn connect_pool(settings: &config::Settings) -> Result<PgPool, AppError> {
    let database_url = settings.database.url.as_deref().ok_or_else(|| {
        AppError::unexpected(
            "database.url must be configured (ESCAPE__DATABASE__URL or --database-url)",
        )
    })?;

    PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let body_limit = settings.content.max_request_bytes.get() as usize;
    let router = http::build_router(state, body_limit);

    let addr = settings.server.addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| InfraError::Bind { addr, source })?;

    info!(target = "escape::serve", addr = %addr, "listening");

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
