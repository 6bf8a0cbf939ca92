use std::{process, sync::Arc};

use tinta::{
    application::{
        admin::{posts::AdminPostService, users::AdminUserService},
        auth::AuthService,
        error::AppError,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, SessionSigner},
        telemetry,
        uploads::ImageStore,
    },
};
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
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::CreateAdmin(args) => run_create_admin(settings, args).await,
    }
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let url = settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| AppError::from(InfraError::configuration("database.url must be set")))?;

    let pool = PostgresRepositories::connect(url, settings.database.max_connections.get())
        .await
        .map_err(|err| {
            AppError::from(InfraError::database(format!(
                "failed to connect to database: {err}"
            )))
        })?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| {
            AppError::from(InfraError::database(format!("failed to migrate: {err}")))
        })?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_admin_state(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> AdminState {
    let images = Arc::new(ImageStore::new(settings.media.post_images_dir.clone()));
    let sessions = Arc::new(SessionSigner::new(
        &settings.auth.secret_key,
        settings.auth.session_ttl,
    ));

    AdminState {
        db: repositories.clone(),
        posts: Arc::new(AdminPostService::new(repositories.clone(), images)),
        users: Arc::new(AdminUserService::new(repositories.clone())),
        auth: Arc::new(AuthService::new(repositories.clone())),
        sessions,
        page_size: settings.site.items_per_page.get(),
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let state = build_admin_state(repositories, &settings);

    serve_http(&settings, state).await
}

async fn run_create_admin(
    settings: config::Settings,
    args: config::CreateAdminArgs,
) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let auth = AuthService::new(repositories);

    let user = auth
        .create_admin(&args.name, &args.email, &args.password)
        .await
        .map_err(|err| AppError::unexpected(err.to_string()))?;

    info!(
        target = "tinta::cli",
        user_id = user.id,
        email = %user.email,
        "administrator account created"
    );
    Ok(())
}

async fn serve_http(settings: &config::Settings, state: AdminState) -> Result<(), AppError> {
    let router = http::build_router(state, http::DEFAULT_UPLOAD_BODY_LIMIT);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "tinta::http",
        addr = %settings.server.addr,
        environment = settings.environment.as_str(),
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal(settings.server.graceful_shutdown))
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal(grace: std::time::Duration) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install shutdown signal handler");
        return;
    }

    info!(target = "tinta::http", "shutdown signal received");

    // In-flight requests get the configured grace period, then we bail.
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        error!(
            target = "tinta::http",
            "graceful shutdown deadline exceeded, aborting"
        );
        process::exit(1);
    });
}
