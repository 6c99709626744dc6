//! HTTP server for the summary relay.
//!
//! Provides endpoints for:
//! - Transcript summarization
//! - Emailing a summary
//! - Liveness

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use summary_mailer::Mailer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::Summarizer;

pub const DEFAULT_PORT: u16 = 5000;

/// Serve until `shutdown_signal` completes, then drain in-flight requests.
pub async fn run_server_with_shutdown<S, M, F>(
    state: Arc<AppState<S, M>>,
    port: u16,
    shutdown_signal: F,
) -> anyhow::Result<()>
where
    S: Summarizer + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!(error = %e, %addr, "Failed to bind listener"))
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server running on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    Ok(())
}
