//! HTTP JSON API for Rolodex
//!
//! | Method | Path | Command |
//! |---|---|---|
//! | GET | `/api/data`, `/api/data/` | list |
//! | POST | `/api/data/:id` | create |
//! | GET | `/api/data/:id` | get |
//! | PATCH | `/api/data/:id` | update |
//! | DELETE | `/api/data/:id` | delete |
//! | GET | `/healthz` | ping |
//!
//! `POST /` and `PUT /:id` are demo routes answering with fixed text.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
mod middleware;
mod routes;
pub mod telemetry;

use std::future::Future;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use axum::Router;
use rolodex_engine::RecordStore;
use rolodex_executor::Executor;
use tokio::net::TcpListener;
use tracing::info;

pub use config::ServerConfig;

/// Shared state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// Command executor over the record store
    pub executor: Executor,
    /// Request body limit
    pub max_body_bytes: usize,
}

impl AppState {
    /// State over `store` with the default body limit
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            executor: Executor::new(store),
            max_body_bytes: config::DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the request body limit
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// The store behind the executor
    pub fn store(&self) -> &Arc<RecordStore> {
        self.executor.store()
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/data", get(routes::list_contacts))
        .route("/api/data/", get(routes::list_contacts))
        .route(
            "/api/data/:id",
            get(routes::get_contact)
                .post(routes::create_contact)
                .patch(routes::update_contact)
                .delete(routes::delete_contact),
        )
        .route("/healthz", get(routes::healthz))
        .route("/", post(routes::demo_add))
        .route("/:id", put(routes::demo_update))
        .layer(from_fn(middleware::cors_middleware))
        .layer(from_fn(middleware::request_tracing_middleware))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

/// Serve `state` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Open the store described by `config`, serve until `shutdown`, then flush
pub async fn run<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = RecordStore::builder()
        .path(&config.data_file)
        .durability(config.durability)
        .open()?;
    let store = Arc::new(store);
    info!(
        path = %config.data_file.display(),
        durability = %config.durability,
        contacts = store.len(),
        "record store ready"
    );

    let state = AppState::new(Arc::clone(&store)).with_max_body_bytes(config.max_body_bytes);
    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, "rolodex server listening");

    let served = serve(listener, state, shutdown).await;

    info!("shutting down; flushing store");
    let flush = Arc::clone(&store);
    tokio::task::spawn_blocking(move || flush.shutdown()).await?;
    served?;
    Ok(())
}
