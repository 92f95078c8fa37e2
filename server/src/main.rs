use anyhow::{Context, Result};
use dexcache_api::{router, shutdown_signal, AppState};
use dexcache_config::Config;
use dexcache_db::{CacheDB, PairsCache};
use dexcache_lookup::LookupService;
use dexcache_upstream::DexScreener;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    let _log_guard = dexcache_logger::init_logger(&config.log.level, config.log.directory.as_deref());

    tracing::info!(
        port = config.server.port,
        backend = ?config.cache.backend,
        ttl_secs = config.cache.ttl_secs,
        upstream = %config.upstream.base_url,
        "Starting dexcache"
    );

    let cache = CacheDB::from_config(&config)?;
    // the pool connects lazily; a failed probe only means the first requests will retry
    match cache.ping().await {
        Ok(()) => tracing::info!("📦 Connection to cache success"),
        Err(e) => tracing::warn!("📦 Cache not reachable yet: {e}"),
    }

    let upstream = DexScreener::new(&config.upstream)?;
    let state = AppState {
        lookup: LookupService::new(Arc::new(cache), Arc::new(upstream)),
    };
    let app = router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("📦 Cache connection closed");
    Ok(())
}
