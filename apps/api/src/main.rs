mod config;
mod errors;
mod job_postings;
mod models;
mod routes;
mod scoring;
mod state;
mod store;
mod submissions;
mod tasks;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::scoring::ScoringSelector;
use crate::state::AppState;
use crate::store::pg::PgStore;
use crate::tasks::queue::spawn_worker;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting intake API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply migrations. The pool is shared by the
    // request handlers and the scoring worker; eight connections cover both.
    let db = sqlx::postgres::PgPoolOptions::new()
        .max_connections(8)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    info!("PostgreSQL pool ready, migrations applied");

    let store = Arc::new(PgStore::new(db));

    // Scoring backends are constructed once at startup with their
    // credentials threaded in; the selector closes over the backend set.
    let selector = Arc::new(ScoringSelector::from_config(&config.scoring));
    info!("Scoring backends registered: {:?}", selector.services());

    // Spawn the scoring worker; intake handlers enqueue and return.
    let queue = spawn_worker(store.clone(), selector);

    let state = AppState { store, queue };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
