//! Pair search endpoints.

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use dexcache_common::Pair;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Token name, symbol or address, e.g. `SOL/USDC`
    pub q: Option<String>,
}

/// GET /search?q= - Search for pairs matching query.
pub async fn search_pairs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Pair>>, ApiError> {
    let query = params.q.unwrap_or_default();
    tracing::info!("Searching pairs for: {query}");

    Ok(Json(state.lookup.search_by_query(&query).await?))
}

/// GET /search/pair/:chain_id/:pair_id - Pair details, 0 or 1 elements.
pub async fn pair_by_address(
    State(state): State<AppState>,
    Path((chain_id, pair_id)): Path<(String, String)>,
) -> Result<Json<Vec<Pair>>, ApiError> {
    tracing::info!("Get pair for chain {chain_id}, pairId {pair_id}");

    Ok(Json(state.lookup.pair_by_address(&chain_id, &pair_id).await?))
}

/// GET /search/tokens/:chain_id/:token_address - Pairs trading the token.
pub async fn pairs_by_token(
    State(state): State<AppState>,
    Path((chain_id, token_address)): Path<(String, String)>,
) -> Result<Json<Vec<Pair>>, ApiError> {
    tracing::info!("Get token pairs for chain {chain_id}, token {token_address}");

    Ok(Json(
        state
            .lookup
            .pairs_by_token(&chain_id, &token_address)
            .await?,
    ))
}
