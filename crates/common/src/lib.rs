use serde::{Deserialize, Serialize};

/// `Token` is one side of a trading pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

/// Pool liquidity, in USD and in units of each token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Liquidity {
    pub usd: f64,
    pub base: f64,
    pub quote: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// `Pair` represents the trading pair in DEX, as it is cached and served to clients.
///
/// Field names on the wire are camelCase and shared with every process using
/// the same cache instance, so they must not be renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub blockchain: String,
    pub dex: String,
    pub pair_address: String,
    pub base_token: Token,
    pub quote_token: Token,
    pub liquidity: Liquidity,
    pub volume24h: f64,
    pub mcap: f64,
    /// epoch millis
    pub pair_created_at: u64,
    pub trades24h: u64,
    /// Decimal strings are kept as received
    pub usd_price: String,
    pub price_in_base_token: String,
    pub price_change_percent24h: f64,
    pub logo: String,
    pub socials: Vec<Social>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Pair {
        Pair {
            blockchain: "solana".into(),
            dex: "raydium".into(),
            pair_address: "2uf4xh61rdwxng9woyxsvqp7zua6klfpb3nvnrqeoisd".into(),
            base_token: Token {
                address: "So11111111111111111111111111111111111111112".into(),
                name: "Wrapped SOL".into(),
                symbol: "SOL".into(),
            },
            quote_token: Token {
                address: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".into(),
                name: "USD Coin".into(),
                symbol: "USDC".into(),
            },
            liquidity: Liquidity::default(),
            volume24h: 1_000_000.0,
            mcap: 5_000_000.0,
            pair_created_at: 1_640_995_200_000,
            trades24h: 1500,
            usd_price: "100.0".into(),
            price_in_base_token: "1.0".into(),
            price_change_percent24h: 5.0,
            logo: String::new(),
            socials: vec![Social {
                kind: "twitter".into(),
                url: "https://twitter.com/solana".into(),
            }],
        }
    }

    #[test]
    fn serializes_with_cache_field_names() {
        let value = serde_json::to_value(pair()).unwrap();

        for field in [
            "blockchain",
            "dex",
            "pairAddress",
            "baseToken",
            "quoteToken",
            "liquidity",
            "volume24h",
            "mcap",
            "pairCreatedAt",
            "trades24h",
            "usdPrice",
            "priceInBaseToken",
            "priceChangePercent24h",
            "logo",
            "socials",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["socials"][0]["type"], "twitter");
        assert_eq!(value["usdPrice"], "100.0");
    }

    #[test]
    fn reads_entry_written_by_another_process() {
        let raw = r#"{
            "blockchain":"solana","dex":"raydium","pairAddress":"abc",
            "baseToken":{"address":"b","name":"Base","symbol":"B"},
            "quoteToken":{"address":"q","name":"Quote","symbol":"Q"},
            "liquidity":{"usd":1.5,"base":2,"quote":3},
            "volume24h":10,"mcap":20,"pairCreatedAt":1700000000000,"trades24h":7,
            "usdPrice":"0.000000012345678901","priceInBaseToken":"1e-9",
            "priceChangePercent24h":-3.2,"logo":"","socials":[]
        }"#;

        let pair: Pair = serde_json::from_str(raw).unwrap();
        assert_eq!(pair.pair_address, "abc");
        assert_eq!(pair.usd_price, "0.000000012345678901");
        assert_eq!(pair.liquidity.base, 2.0);
        assert!(pair.socials.is_empty());
    }
}
