//! Health check endpoint.

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

const SERVICE: &str = "dexcache";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub cache: &'static str,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /health - 503 while the cache store is unreachable.
pub async fn check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, cache) = match state.lookup.cache_status().await {
        Ok(()) => (StatusCode::OK, "healthy", "up"),
        Err(e) => {
            tracing::warn!(error = %e, "cache health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            service: SERVICE,
            cache,
        }),
    )
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
        description: "Read-through cache for DexScreener pair data",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "GET",
                path: "/search?q=",
                description: "Search for pairs matching query",
            },
            EndpointInfo {
                method: "GET",
                path: "/search/pair/:chainId/:pairId",
                description: "Get detailed pair info",
            },
            EndpointInfo {
                method: "GET",
                path: "/search/tokens/:chainId/:tokenAddress",
                description: "Search trading pairs by token address",
            },
        ],
    })
}
