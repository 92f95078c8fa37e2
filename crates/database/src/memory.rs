use crate::{key_pair, key_query, key_token};
use dexcache_common::Pair;
use hashbrown::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Expiring<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Expiring<T> {
    fn live(&self, now: Instant) -> Option<&T> {
        (self.expires_at > now).then_some(&self.value)
    }
}

#[derive(Debug, Default)]
struct Entries {
    // "pair:{address}" -> pair
    pairs: HashMap<String, Expiring<Pair>>,
    // "query:{query}" / "token:{token}" -> raw pair addresses
    indexes: HashMap<String, Expiring<HashSet<String>>>,
}

/// Process-local store with the same keys and TTL rules as `RedisDB`
#[derive(Clone, Debug)]
pub struct MemoryDB {
    entries: Arc<RwLock<Entries>>,
    ttl: Duration,
}

impl MemoryDB {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries::default())),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    pub async fn pair(&self, address: &str) -> Option<Pair> {
        let entries = self.entries.read().await;
        entries
            .pairs
            .get(&key_pair(address))
            .and_then(|entry| entry.live(Instant::now()))
            .cloned()
    }

    async fn pairs_by_index(&self, index_key: &str) -> Vec<Pair> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        let Some(addresses) = entries.indexes.get(index_key).and_then(|e| e.live(now)) else {
            return Vec::new();
        };

        addresses
            .iter()
            .filter_map(|address| entries.pairs.get(&key_pair(address)))
            .filter_map(|entry| entry.live(now))
            .cloned()
            .collect()
    }

    pub async fn pairs_by_query(&self, query: &str) -> Vec<Pair> {
        self.pairs_by_index(&key_query(query)).await
    }

    pub async fn pairs_by_token(&self, token: &str) -> Vec<Pair> {
        self.pairs_by_index(&key_token(token)).await
    }

    pub async fn save_pairs(&self, pairs: &[Pair], query: Option<&str>, token: Option<&str>) {
        let now = Instant::now();
        let expires_at = now + self.ttl;
        let mut entries = self.entries.write().await;

        entries.pairs.retain(|_, entry| entry.expires_at > now);
        entries.indexes.retain(|_, entry| entry.expires_at > now);

        let index_keys: Vec<String> = query
            .map(key_query)
            .into_iter()
            .chain(token.map(key_token))
            .collect();

        for pair in pairs {
            entries.pairs.insert(
                key_pair(&pair.pair_address),
                Expiring {
                    value: pair.clone(),
                    expires_at,
                },
            );

            for index_key in &index_keys {
                let index = entries
                    .indexes
                    .entry(index_key.clone())
                    .or_insert_with(|| Expiring {
                        value: HashSet::new(),
                        expires_at,
                    });
                index.value.insert(pair.pair_address.clone());
                index.expires_at = expires_at;
            }
        }
    }
}
