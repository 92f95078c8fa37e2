//! DexScreener integration: wire model, per-endpoint decoding, normalization
//! into [`dexcache_common::Pair`] and the HTTP client.

pub mod dexscreener;
pub mod model;
pub mod normalize;

pub use dexscreener::DexScreener;
pub use model::UpstreamPair;
pub use normalize::{normalize, normalize_pair};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid upstream base url {0:?}")]
    InvalidBaseUrl(String),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// Also covers required pair fields missing from the body
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Source of raw pair records. Each method maps to one upstream endpoint.
#[async_trait::async_trait]
pub trait PairsSource: Send + Sync {
    /// Free-text search over pairs and tokens
    async fn search(&self, query: &str) -> Result<Vec<UpstreamPair>, UpstreamError>;

    /// Pair by chain and pair address, 0 or 1 elements in practice
    async fn pair(&self, chain_id: &str, pair_id: &str) -> Result<Vec<UpstreamPair>, UpstreamError>;

    async fn token_pairs(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<UpstreamPair>, UpstreamError>;
}
