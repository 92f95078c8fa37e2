use crate::model::{decode_pair, decode_search, decode_token_pairs, UpstreamPair};
use crate::{PairsSource, UpstreamError};
use dexcache_config::UpstreamConfig;
use reqwest::Url;
use std::time::Duration;

const USER_AGENT: &str = concat!("dexcache/", env!("CARGO_PKG_VERSION"));

/// DexScreener REST API client
#[derive(Debug, Clone)]
pub struct DexScreener {
    base_url: Url,
    http: reqwest::Client,
}

impl DexScreener {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| UpstreamError::InvalidBaseUrl(config.base_url.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self { base_url, http })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn search_url(&self, query: &str) -> Result<Url, UpstreamError> {
        let mut url = self.endpoint(&["latest", "dex", "search"])?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    pub fn pair_url(&self, chain_id: &str, pair_id: &str) -> Result<Url, UpstreamError> {
        self.endpoint(&["latest", "dex", "pairs", chain_id, pair_id])
    }

    pub fn token_pairs_url(&self, chain_id: &str, token_address: &str) -> Result<Url, UpstreamError> {
        self.endpoint(&["tokens", "v1", chain_id, token_address])
    }

    async fn fetch<F>(&self, url: Url, decode: F) -> Result<Vec<UpstreamPair>, UpstreamError>
    where
        F: FnOnce(&[u8]) -> serde_json::Result<Vec<UpstreamPair>>,
    {
        tracing::debug!(%url, "upstream request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Request {
                url: url.to_string(),
                source,
            })?;

        decode(&body).map_err(|source| UpstreamError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl PairsSource for DexScreener {
    async fn search(&self, query: &str) -> Result<Vec<UpstreamPair>, UpstreamError> {
        let url = self.search_url(query)?;
        self.fetch(url, decode_search).await
    }

    async fn pair(&self, chain_id: &str, pair_id: &str) -> Result<Vec<UpstreamPair>, UpstreamError> {
        let url = self.pair_url(chain_id, pair_id)?;
        self.fetch(url, decode_pair).await
    }

    async fn token_pairs(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<UpstreamPair>, UpstreamError> {
        let url = self.token_pairs_url(chain_id, token_address)?;
        self.fetch(url, decode_token_pairs).await
    }
}
