use crate::{decode_pair, key_pair, key_query, key_token, StoreError};
use bb8_redis::RedisConnectionManager;
use dexcache_common::Pair;
use dexcache_config::RedisConfig;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::time::Duration;

/// Structured connection info, so a password is never parsed back out of a URL
pub fn connection_info(config: &RedisConfig) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
        redis: RedisConnectionInfo {
            db: config.db,
            password: config.password.clone().filter(|p| !p.is_empty()),
            ..Default::default()
        },
    }
}

// One pipeline per save:
// 1. "pair:{address}" -> pair json, with ttl
// 2. addresses added to "query:{query}", ttl refreshed
// 3. addresses added to "token:{token}", ttl refreshed
pub(crate) fn save_pipeline(
    pairs: &[Pair],
    query: Option<&str>,
    token: Option<&str>,
    ttl: u64,
) -> Result<redis::Pipeline, StoreError> {
    let mut pipe = redis::pipe();
    for pair in pairs {
        let value = serde_json::to_string(pair).map_err(StoreError::Encode)?;
        pipe.cmd("SET")
            .arg(key_pair(&pair.pair_address))
            .arg(value)
            .arg("EX")
            .arg(ttl)
            .ignore();
    }

    let addresses: Vec<&str> = pairs.iter().map(|pair| pair.pair_address.as_str()).collect();
    for index_key in query.map(key_query).into_iter().chain(token.map(key_token)) {
        pipe.sadd(&index_key, addresses.as_slice())
            .ignore()
            .expire(&index_key, ttl as i64)
            .ignore();
    }
    Ok(pipe)
}

#[derive(Clone, Debug)]
pub struct RedisDB {
    pool: bb8::Pool<RedisConnectionManager>,
    ttl: u64,
}

impl RedisDB {
    /// Builds the pool without connecting. Connections are opened on first
    /// checkout and replaced by the pool when they break, so concurrent first
    /// callers share one pool instead of racing to create clients.
    pub fn connect_lazy(config: &RedisConfig, ttl: u64) -> Result<Self, StoreError> {
        let manager = RedisConnectionManager::new(connection_info(config))
            .map_err(|e| StoreError::Unavailable(format!("invalid redis address: {e}")))?;
        let pool = bb8::Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
            .build_unchecked(manager);

        tracing::debug!(
            host = %config.host,
            port = config.port,
            db = config.db,
            "redis pool created"
        );
        Ok(Self { pool, ttl })
    }

    /// Checks out a connection and pings the server
    pub async fn ensure_connected(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut *conn).await?;
        Ok(())
    }
}

impl RedisDB {
    pub async fn pair(&self, address: &str) -> Result<Option<Pair>, StoreError> {
        let mut conn = self.pool.get().await?;
        let key = key_pair(address);

        let data: Option<String> = conn.get(&key).await?;
        data.map(|raw| decode_pair(&key, &raw)).transpose()
    }

    /// Resolves an index set ("query:*" or "token:*") into the pairs it links
    async fn pairs_by_index(&self, index_key: &str) -> Result<Vec<Pair>, StoreError> {
        let mut conn = self.pool.get().await?;

        let addresses: Vec<String> = conn.smembers(index_key).await?;
        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = addresses.iter().map(|address| key_pair(address)).collect();
        // explicit MGET: redis-rs sends GET for a single key and the reply shape changes
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut *conn)
            .await?;

        keys.iter()
            .zip(values)
            .filter_map(|(key, raw)| raw.map(|raw| decode_pair(key, &raw)))
            .collect()
    }

    pub async fn pairs_by_query(&self, query: &str) -> Result<Vec<Pair>, StoreError> {
        self.pairs_by_index(&key_query(query)).await
    }

    pub async fn pairs_by_token(&self, token: &str) -> Result<Vec<Pair>, StoreError> {
        self.pairs_by_index(&key_token(token)).await
    }

    pub async fn save_pairs(
        &self,
        pairs: &[Pair],
        query: Option<&str>,
        token: Option<&str>,
    ) -> Result<(), StoreError> {
        if pairs.is_empty() {
            return Ok(());
        }

        let pipe = save_pipeline(pairs, query, token, self.ttl)?;
        let mut conn = self.pool.get().await?;
        let _: () = pipe.query_async(&mut *conn).await?;

        tracing::debug!(
            pairs = pairs.len(),
            query = ?query,
            token = ?token,
            "saved pairs to redis"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexcache_common::{Liquidity, Token};

    fn pair(address: &str) -> Pair {
        let token = |symbol: &str| Token {
            address: format!("{symbol}-address"),
            name: symbol.to_string(),
            symbol: symbol.to_string(),
        };
        Pair {
            blockchain: "solana".into(),
            dex: "raydium".into(),
            pair_address: address.into(),
            base_token: token("SOL"),
            quote_token: token("USDC"),
            liquidity: Liquidity::default(),
            volume24h: 1.0,
            mcap: 2.0,
            pair_created_at: 1_640_995_200_000,
            trades24h: 3,
            usd_price: "100.0".into(),
            price_in_base_token: "1.0".into(),
            price_change_percent24h: 0.0,
            logo: String::new(),
            socials: Vec::new(),
        }
    }

    fn local_config() -> RedisConfig {
        let mut config = RedisConfig::default();
        if let Ok(host) = std::env::var("REDIS_HOST") {
            config.host = host;
        }
        config.connection_timeout_secs = 1;
        config
    }

    fn commands(pipe: &redis::Pipeline) -> Vec<Vec<String>> {
        pipe.cmd_iter()
            .map(|cmd| {
                cmd.args_iter()
                    .map(|arg| match arg {
                        redis::Arg::Simple(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                        redis::Arg::Cursor => "<cursor>".to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn password_with_url_delimiters_stays_intact() {
        let config = RedisConfig {
            host: "redis.internal".into(),
            password: Some("p@ss#w/rd:x".into()),
            db: 2,
            ..RedisConfig::default()
        };

        let info = connection_info(&config);
        assert!(matches!(&info.addr, ConnectionAddr::Tcp(host, 6379) if host == "redis.internal"));
        assert_eq!(info.redis.password.as_deref(), Some("p@ss#w/rd:x"));
        assert_eq!(info.redis.db, 2);
    }

    #[test]
    fn empty_password_means_no_auth() {
        let config = RedisConfig {
            password: Some(String::new()),
            ..RedisConfig::default()
        };
        assert_eq!(connection_info(&config).redis.password, None);
    }

    #[test]
    fn save_pipeline_writes_pairs_and_refreshes_indexes() {
        let pairs = [pair("PairA"), pair("pairB")];
        let pipe = save_pipeline(&pairs, Some(" SOL/USDC "), Some("Mint"), 3600).unwrap();

        let json = |p: &Pair| serde_json::to_string(p).unwrap();
        assert_eq!(
            commands(&pipe),
            vec![
                args(&["SET", "pair:paira", &json(&pairs[0]), "EX", "3600"]),
                args(&["SET", "pair:pairb", &json(&pairs[1]), "EX", "3600"]),
                args(&["SADD", "query:sol/usdc", "PairA", "pairB"]),
                args(&["EXPIRE", "query:sol/usdc", "3600"]),
                args(&["SADD", "token:mint", "PairA", "pairB"]),
                args(&["EXPIRE", "token:mint", "3600"]),
            ]
        );
    }

    #[test]
    fn save_pipeline_without_index_only_sets_pairs() {
        let pipe = save_pipeline(&[pair("Lonely")], None, None, 60).unwrap();

        let commands = commands(&pipe);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0][..2], args(&["SET", "pair:lonely"]));
        assert_eq!(commands[0][3..], args(&["EX", "60"]));
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let mut config = local_config();
        config.host = "127.0.0.1".into();
        config.port = 1;
        let db = RedisDB::connect_lazy(&config, 60).unwrap();

        let err = db.pairs_by_query("sol").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "{err:?}");
    }

    #[tokio::test]
    async fn empty_save_does_not_connect() {
        let mut config = local_config();
        config.port = 1;
        let db = RedisDB::connect_lazy(&config, 60).unwrap();

        assert!(db.save_pairs(&[], Some("sol"), None).await.is_ok());
    }

    #[tokio::test]
    #[ignore] // needs a running redis
    async fn round_trip_through_indexes() {
        let db = RedisDB::connect_lazy(&local_config(), 60).unwrap();
        let saved = pair("RoundTripPairAddress");

        db.save_pairs(std::slice::from_ref(&saved), Some("SOL/USDC"), Some("TokenX"))
            .await
            .unwrap();

        assert_eq!(db.pairs_by_query(" sol/usdc ").await.unwrap(), vec![saved.clone()]);
        assert_eq!(db.pairs_by_token("tokenx").await.unwrap(), vec![saved.clone()]);
        assert_eq!(db.pair("roundtrippairaddress").await.unwrap(), Some(saved));
        assert!(db.pairs_by_query("never saved").await.unwrap().is_empty());
    }
}
