use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use taskhub_api::{build_router, AppState, GateSettings};
use taskhub_core::repositories::{TaskRepository, UserRepository};
use taskhub_infrastructure::{
    create_pool, run_migrations, InMemoryTaskRepository, InMemoryUserRepository,
    PgTaskRepository, PgUserRepository,
};
use taskhub_security::{SessionAuthority, SessionSweeper};
use taskhub_shared::config::{AppConfig, DatabaseSettings};
use taskhub_shared::telemetry::init_telemetry;

type Stores = (Arc<dyn UserRepository>, Arc<dyn TaskRepository>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize telemetry; the guard flushes buffered logs on exit
    let _log_guard = init_telemetry(&config.logging);

    info!(name = %config.app.name, env = %config.app.env, "TaskHub server starting...");

    let session_ttl = config.session.ttl().context("invalid session.ttl")?;
    let sweep_interval = config
        .session
        .sweep_interval()
        .context("invalid session.sweep_interval")?;
    let gate = GateSettings::from_settings(&config.session).context("invalid session.header")?;

    if config.is_production() && config.database.is_in_memory() {
        warn!("Production environment is running on the in-memory store");
    }
    let (users, tasks) = open_stores(&config.database).await?;

    // Sessions live in memory only and are lost on restart
    let sessions = Arc::new(SessionAuthority::new(session_ttl));
    let sweeper = SessionSweeper::new(sessions.clone(), sweep_interval).spawn();
    info!(ttl_secs = session_ttl.as_secs(), "Session authority ready");

    let app = build_router(AppState::new(users, tasks, sessions, gate));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse().context("invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.shutdown().await;
    info!("TaskHub server stopped");
    Ok(())
}

async fn open_stores(settings: &DatabaseSettings) -> anyhow::Result<Stores> {
    if settings.is_in_memory() {
        warn!("Using the in-memory store; data is lost on restart");
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
        return Ok((users, tasks));
    }

    info!("Connecting to database...");
    let pool = create_pool(settings)
        .await
        .context("failed to connect to database")?;
    info!("Database connection established.");

    if settings.run_migrations {
        run_migrations(&pool).await.context("failed to run migrations")?;
    }

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let tasks: Arc<dyn TaskRepository> = Arc::new(PgTaskRepository::new(pool));
    Ok((users, tasks))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
