use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use course_api::auth::CredentialHasher;
use course_api::config;
use course_api::database::{DatabaseManager, MemoryStore, PgStore};
use course_api::{router, AppState};

#[derive(Parser)]
#[command(name = "course-api")]
#[command(about = "Course catalogue REST API")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (defaults to COURSE_API_PORT, then 5000)")]
    port: Option<u16>,

    #[arg(long, help = "Keep data in process memory instead of Postgres")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let config = config::config();
    tracing::info!("Starting Course API in {:?} mode", config.environment);

    let hasher = CredentialHasher::new(config.security.hash_params())
        .context("invalid password hashing parameters")?;
    let realm = &config.security.auth_realm;

    let state = if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        AppState::new(Arc::new(MemoryStore::new()), hasher, realm)?
    } else {
        let url = DatabaseManager::database_url()?;
        let pool = DatabaseManager::connect(&url, &config.database)
            .await
            .context("failed to connect to database")?;
        AppState::new(Arc::new(PgStore::new(pool)), hasher, realm)?
    };

    let mut app = router(state);
    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Course API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
