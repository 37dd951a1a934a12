//! # Tickmill — Tick Ingestion & Reconciliation Service
//!
//! ```text
//!  ┌────────────┐  POST /tick/{trade_id}   ┌──────────────────────────────┐
//!  │ Tick Feed  │ ───────────────────────▶ │ AppState                     │
//!  └────────────┘                           │ ├─ PositionLedger            │
//!  ┌────────────┐  POST /stream_tick        │ ├─ AuditLog / TransactionLog │
//!  │ Price Feed │ ───────────────────────▶ │ ├─ Advisor (model | rules)   │
//!  └────────────┘                           │ └─ Mothership ────────────┐  │
//!                                           └───────────────────────────│──┘
//!  ┌────────────┐  GET /dashboard                                       │
//!  │  Browser   │  GET /healthcheck          reconcile / positions  ◀───┘
//!  └────────────┘
//! ```

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod clients;
mod config;
mod engine;
mod error;
mod models;
mod pipeline;
mod routes;
mod state;
mod store;
mod validate;

use auth::require_api_key;
use config::Config;
use routes::{
    dashboard::{dashboard, home},
    stream::handle_stream_tick,
    tick::{handle_tick, healthcheck},
};
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("tickmill=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════════════╗
  ║            TICKMILL — Tick & Reconciliation           ║
  ║  Validate · Ledger · P&L · Signals · Mothership       ║
  ╚═══════════════════════════════════════════════════════╝"#);

    // ── 3. Config & shared state ──────────────────────────────────────────────
    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    info!(
        advisor  = %config.advisor_provider,
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    let state = build_state(config);

    // ── 4. CORS ───────────────────────────────────────────────────────────────
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 5. Router ─────────────────────────────────────────────────────────────
    let app = Router::new()
        // ── Ingestion ─────────────────────────────────────────────────────────
        .route("/tick/:trade_id", post(handle_tick))
        .route("/stream_tick",    post(handle_stream_tick))
        // ── Observation ───────────────────────────────────────────────────────
        .route("/healthcheck",    get(healthcheck))
        .route("/dashboard",      get(dashboard))
        .route("/",               get(home))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    let addr: SocketAddr = bind_addr.parse()?;

    info!(?addr, "🚀 Tickmill server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
