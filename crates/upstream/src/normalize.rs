use crate::model::{PairInfo, PriceChange, UpstreamLiquidity, UpstreamPair, UpstreamToken};
use dexcache_common::{Liquidity, Pair, Token};

/// Order and length preserving, no failure modes
pub fn normalize(pairs: Vec<UpstreamPair>) -> Vec<Pair> {
    pairs.into_iter().map(normalize_pair).collect()
}

pub fn normalize_pair(pair: UpstreamPair) -> Pair {
    let UpstreamPair {
        chain_id,
        dex_id,
        pair_address,
        base_token,
        quote_token,
        price_native,
        price_usd,
        txns,
        volume,
        price_change,
        liquidity,
        market_cap,
        pair_created_at,
        info,
        url: _,
        labels: _,
        fdv: _,
    } = pair;

    let liquidity = match liquidity {
        Some(UpstreamLiquidity { usd, base, quote }) => Liquidity { usd, base, quote },
        None => Liquidity::default(),
    };

    let price_change_percent24h = match price_change {
        Some(PriceChange { h24: Some(change), .. }) => change,
        Some(PriceChange { h24: None, .. }) | None => 0.0,
    };

    let (logo, socials) = match info {
        Some(PairInfo {
            image_url, socials, ..
        }) => (image_url.unwrap_or_default(), socials.unwrap_or_default()),
        None => (String::new(), Vec::new()),
    };

    Pair {
        blockchain: chain_id,
        dex: dex_id,
        pair_address,
        base_token: token(base_token),
        quote_token: token(quote_token),
        liquidity,
        volume24h: volume.h24,
        mcap: market_cap,
        pair_created_at,
        trades24h: txns.h24.buys.saturating_add(txns.h24.sells),
        usd_price: price_usd,
        price_in_base_token: price_native,
        price_change_percent24h,
        logo,
        socials,
    }
}

fn token(token: UpstreamToken) -> Token {
    let UpstreamToken {
        address,
        name,
        symbol,
    } = token;
    Token {
        address,
        name,
        symbol,
    }
}
