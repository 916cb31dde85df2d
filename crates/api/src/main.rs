use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use campus_events_api::app::{build_router, AppState, Stores};
use campus_events_api::config::Config;
use campus_events_api::jobs::{JobScheduler, OtpSweepJob, PoolMetricsJob, RateLimitSweepJob};
use campus_events_api::middleware::{self, logging::init_logging};
use campus_events_api::services::provision_admin;
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "campus-events", version, about = "College event management backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Create or reset an admin and print its secret once.
    ProvisionAdmin {
        #[arg(long, default_value = "ADMIN001")]
        external_id: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging).context("failed to install tracing subscriber")?;

    info!("Starting Campus Events API v{}", env!("CARGO_PKG_VERSION"));

    let db_config: persistence::db::DatabaseConfig = (&config.database).into();
    let pool = persistence::db::create_pool(&db_config).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, pool).await,
        Command::ProvisionAdmin { external_id, email } => {
            let roles = config.role_table()?;
            let directory = persistence::repositories::AllowListRepository::new(pool);
            let admin = provision_admin(&directory, &roles, &external_id, &email).await?;

            println!("Admin {} provisioned.", admin.external_id);
            println!("Secret (shown once): {}", admin.secret);
            Ok(())
        }
    }
}

async fn serve(config: Config, pool: PgPool) -> Result<()> {
    middleware::init_metrics().context("failed to install Prometheus recorder")?;

    let addr = config.socket_addr()?;
    let sweep_interval = config.otp.sweep_interval_secs;

    let stores = Stores::postgres(&pool);
    let state = AppState::new(config, pool.clone(), stores)?;

    let mut scheduler = JobScheduler::new();
    scheduler.register(OtpSweepJob::new(state.stores.otp.clone(), sweep_interval));
    scheduler.register(PoolMetricsJob::new(pool));
    if let Some(limiter) = state.rate_limiter.clone() {
        scheduler.register(RateLimitSweepJob::new(limiter));
    }
    scheduler.start();

    let app = build_router(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
