use dexcache_common::Social;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TxnCount {
    pub buys: u64,
    pub sells: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Txns {
    pub m5: Option<TxnCount>,
    pub h1: Option<TxnCount>,
    pub h6: Option<TxnCount>,
    pub h24: TxnCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamLiquidity {
    #[serde(default)]
    pub usd: f64,
    #[serde(default)]
    pub base: f64,
    #[serde(default)]
    pub quote: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Website {
    pub label: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    pub image_url: Option<String>,
    pub header: Option<String>,
    pub open_graph: Option<String>,
    pub websites: Option<Vec<Website>>,
    pub socials: Option<Vec<Social>>,
}

/// Pair record as served by DexScreener.
///
/// Required fields fail decoding when missing; everything the API may omit is
/// an `Option` and gets its default in [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPair {
    pub chain_id: String,
    pub dex_id: String,
    pub url: Option<String>,
    pub pair_address: String,
    pub labels: Option<Vec<String>>,
    pub base_token: UpstreamToken,
    pub quote_token: UpstreamToken,
    pub price_native: String,
    pub price_usd: String,
    pub txns: Txns,
    pub volume: Volume,
    pub price_change: Option<PriceChange>,
    pub liquidity: Option<UpstreamLiquidity>,
    pub fdv: Option<f64>,
    pub market_cap: f64,
    pub pair_created_at: u64,
    pub info: Option<PairInfo>,
}

/// `GET /latest/dex/search`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub schema_version: String,
    pub pairs: Option<Vec<UpstreamPair>>,
}

/// `GET /latest/dex/pairs/{chain}/{pair}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairsResponse {
    #[serde(default)]
    pub schema_version: String,
    pub pairs: Option<Vec<UpstreamPair>>,
    pub pair: Option<UpstreamPair>,
}

pub fn decode_search(body: &[u8]) -> serde_json::Result<Vec<UpstreamPair>> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response.pairs.unwrap_or_default())
}

pub fn decode_pair(body: &[u8]) -> serde_json::Result<Vec<UpstreamPair>> {
    let response: PairsResponse = serde_json::from_slice(body)?;
    match (response.pairs, response.pair) {
        (Some(pairs), _) => Ok(pairs),
        (None, Some(pair)) => Ok(vec![pair]),
        (None, None) => Ok(Vec::new()),
    }
}

/// `GET /tokens/v1/{chain}/{tokens}` returns a bare array
pub fn decode_token_pairs(body: &[u8]) -> serde_json::Result<Vec<UpstreamPair>> {
    let pairs: Option<Vec<UpstreamPair>> = serde_json::from_slice(body)?;
    Ok(pairs.unwrap_or_default())
}
