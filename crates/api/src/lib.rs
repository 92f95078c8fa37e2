//! HTTP surface of the DexScreener cache.
//!
//! # Endpoints
//!
//! - `GET /` - Service information
//! - `GET /health` - Health check, including cache reachability
//! - `GET /search?q=` - Search pairs by token name, symbol or address
//! - `GET /search/pair/:chainId/:pairId` - Pair by chain and address
//! - `GET /search/tokens/:chainId/:tokenAddress` - Pairs trading a token

use axum::{routing::get, Router};
use dexcache_lookup::LookupService;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub mod error;
pub mod routes;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub lookup: LookupService,
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(routes::health::info))
        .route("/health", get(routes::health::check))
        .route("/search", get(routes::search::search_pairs))
        .route(
            "/search/pair/:chain_id/:pair_id",
            get(routes::search::pair_by_address),
        )
        .route(
            "/search/tokens/:chain_id/:token_address",
            get(routes::search::pairs_by_token),
        )
        .fallback(routes::not_found)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
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
                tracing::error!("failed to listen for SIGTERM: {e}");
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
    tracing::info!("shutdown signal received");
}
