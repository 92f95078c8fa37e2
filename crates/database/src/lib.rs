use dexcache_common::Pair;
use dexcache_config::{CacheBackend, Config};

pub mod memory;
pub mod redis;

pub use self::memory::MemoryDB;
pub use self::redis::RedisDB;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached. Never reported as an empty result.
    #[error("cache store unavailable: {0}")]
    Unavailable(String),

    #[error("cache command failed: {0}")]
    Command(::redis::RedisError),

    #[error("corrupt cache entry {key}: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to encode pair: {0}")]
    Encode(serde_json::Error),
}

impl From<::redis::RedisError> for StoreError {
    fn from(e: ::redis::RedisError) -> Self {
        if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout() {
            StoreError::Unavailable(e.to_string())
        } else {
            StoreError::Command(e)
        }
    }
}

impl From<bb8::RunError<::redis::RedisError>> for StoreError {
    fn from(e: bb8::RunError<::redis::RedisError>) -> Self {
        match e {
            bb8::RunError::User(e) => StoreError::Unavailable(e.to_string()),
            bb8::RunError::TimedOut => {
                StoreError::Unavailable("timed out waiting for a connection".into())
            }
        }
    }
}

fn normalize_key_part(part: &str) -> String {
    part.trim().to_lowercase()
}

/// key: "pair:{pair_address}"
pub fn key_pair(address: &str) -> String {
    format!("pair:{}", normalize_key_part(address))
}

/// key: "query:{query}", a set of pair addresses
pub fn key_query(query: &str) -> String {
    format!("query:{}", normalize_key_part(query))
}

/// key: "token:{token_address}", a set of pair addresses
pub fn key_token(token: &str) -> String {
    format!("token:{}", normalize_key_part(token))
}

pub(crate) fn decode_pair(key: &str, raw: &str) -> Result<Pair, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })
}

// Traits
#[async_trait::async_trait]
pub trait PairsCache: Send + Sync {
    async fn pair(&self, address: &str) -> Result<Option<Pair>, StoreError>;

    /// Pairs linked to `query`. Entries that expired before their index are skipped.
    async fn pairs_by_query(&self, query: &str) -> Result<Vec<Pair>, StoreError>;

    async fn pairs_by_token(&self, token: &str) -> Result<Vec<Pair>, StoreError>;

    /// Writes every pair and links it to the query and/or token index,
    /// refreshing the TTL of each touched key.
    async fn save_pairs(
        &self,
        pairs: &[Pair],
        query: Option<&str>,
        token: Option<&str>,
    ) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// `CacheDB`
#[derive(Clone, Debug)]
pub enum CacheDB {
    Redis(RedisDB),
    Memory(MemoryDB),
}

impl CacheDB {
    /// Does not touch the network; redis connections are opened on first use.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let ttl = config.cache.ttl_secs;
        match config.cache.backend {
            CacheBackend::Redis => Ok(Self::Redis(RedisDB::connect_lazy(&config.redis, ttl)?)),
            CacheBackend::Memory => {
                tracing::warn!("📦 Using in-memory cache, entries are not shared between processes");
                Ok(Self::Memory(MemoryDB::new(ttl)))
            }
        }
    }
}

#[async_trait::async_trait]
impl PairsCache for CacheDB {
    async fn pair(&self, address: &str) -> Result<Option<Pair>, StoreError> {
        match self {
            Self::Redis(db) => db.pair(address).await,
            Self::Memory(db) => Ok(db.pair(address).await),
        }
    }

    async fn pairs_by_query(&self, query: &str) -> Result<Vec<Pair>, StoreError> {
        match self {
            Self::Redis(db) => db.pairs_by_query(query).await,
            Self::Memory(db) => Ok(db.pairs_by_query(query).await),
        }
    }

    async fn pairs_by_token(&self, token: &str) -> Result<Vec<Pair>, StoreError> {
        match self {
            Self::Redis(db) => db.pairs_by_token(token).await,
            Self::Memory(db) => Ok(db.pairs_by_token(token).await),
        }
    }

    async fn save_pairs(
        &self,
        pairs: &[Pair],
        query: Option<&str>,
        token: Option<&str>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Redis(db) => db.save_pairs(pairs, query, token).await,
            Self::Memory(db) => {
                db.save_pairs(pairs, query, token).await;
                Ok(())
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Redis(db) => db.ensure_connected().await,
            Self::Memory(_) => Ok(()),
        }
    }
}
