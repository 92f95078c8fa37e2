//! Read-through lookups: cache first, DexScreener on a miss, then write-through.

use dexcache_common::Pair;
use dexcache_db::{PairsCache, StoreError};
use dexcache_upstream::{normalize, PairsSource, UpstreamError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("query parameter \"q\" is required")]
    EmptyQuery,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn log_failure(operation: &'static str, key: &str, error: &LookupError) {
    tracing::error!(operation, key, %error, "lookup failed");
}

/// `LookupService` is cheap to clone; every clone shares the cache handle and
/// the upstream client.
#[derive(Clone)]
pub struct LookupService {
    cache: Arc<dyn PairsCache>,
    source: Arc<dyn PairsSource>,
}

impl LookupService {
    pub fn new(cache: Arc<dyn PairsCache>, source: Arc<dyn PairsSource>) -> Self {
        Self { cache, source }
    }

    pub async fn cache_status(&self) -> Result<(), StoreError> {
        self.cache.ping().await
    }

    /// Free-text search. Empty upstream results are returned but never cached.
    pub async fn search_by_query(&self, query: &str) -> Result<Vec<Pair>, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        self.search(query)
            .await
            .inspect_err(|e| log_failure("search_by_query", query, e))
    }

    /// `chain_id` only selects the upstream endpoint; the cache is keyed by address
    pub async fn pair_by_address(
        &self,
        chain_id: &str,
        pair_id: &str,
    ) -> Result<Vec<Pair>, LookupError> {
        self.pair(chain_id, pair_id)
            .await
            .inspect_err(|e| log_failure("pair_by_address", pair_id, e))
    }

    pub async fn pairs_by_token(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<Pair>, LookupError> {
        self.token_pairs(chain_id, token_address)
            .await
            .inspect_err(|e| log_failure("pairs_by_token", token_address, e))
    }

    async fn search(&self, query: &str) -> Result<Vec<Pair>, LookupError> {
        let cached = self.cache.pairs_by_query(query).await?;
        if !cached.is_empty() {
            tracing::info!("Found {} cached pairs by query: {query}", cached.len());
            return Ok(cached);
        }

        let upstream = self.source.search(query).await?;
        if upstream.is_empty() {
            tracing::debug!("No pairs upstream for query: {query}");
            return Ok(Vec::new());
        }

        tracing::info!("Found {} pairs by query: {query}", upstream.len());
        let pairs = normalize(upstream);
        self.cache.save_pairs(&pairs, Some(query), None).await?;
        Ok(pairs)
    }

    async fn pair(&self, chain_id: &str, pair_id: &str) -> Result<Vec<Pair>, LookupError> {
        if let Some(cached) = self.cache.pair(pair_id).await? {
            tracing::info!("Found cached pair for: {pair_id}");
            return Ok(vec![cached]);
        }

        let upstream = self.source.pair(chain_id, pair_id).await?;
        tracing::debug!("Fetched {} pairs for {chain_id}/{pair_id}", upstream.len());

        let pairs = normalize(upstream);
        self.cache.save_pairs(&pairs, None, None).await?;
        Ok(pairs)
    }

    async fn token_pairs(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<Pair>, LookupError> {
        let cached = self.cache.pairs_by_token(token_address).await?;
        if !cached.is_empty() {
            tracing::info!("Found {} cached pairs for {token_address}", cached.len());
            return Ok(cached);
        }

        let upstream = self.source.token_pairs(chain_id, token_address).await?;
        tracing::debug!(
            "Fetched {} pairs for token {chain_id}/{token_address}",
            upstream.len()
        );

        let pairs = normalize(upstream);
        self.cache
            .save_pairs(&pairs, None, Some(token_address))
            .await?;
        Ok(pairs)
    }
}
