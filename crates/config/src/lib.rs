use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_PATH_ENV: &str = "DEXCACHE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// One hour, shared by pair entries and index sets
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("invalid config {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: i64,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 6379,
            password: None,
            db: 0,
            pool_size: 16,
            connection_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dexscreener.com".into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
}

impl FromStr for CacheBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Daily-rolling log files are written here when set
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub upstream: UpstreamConfig,
    pub cache: CacheConfig,
    pub log: LogConfig,
}

impl Config {
    /// Reads the yaml file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match std::fs::read_to_string(path) {
            Ok(data) => Self::parse(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data)?)
    }

    /// Loads the file named by `DEXCACHE_CONFIG` (or `config.yml`) and applies
    /// environment overrides on top.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::load(Path::new(&path))?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Redis rejects `EX 0`, and a zero ttl would drop every memory entry on write
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "cache.ttl_secs",
                reason: "must be at least one second",
            });
        }
        Ok(())
    }

    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = parsed(&var, "PORT")? {
            self.server.port = port;
        }
        if let Some(secs) = parsed(&var, "REQUEST_TIMEOUT_SECS")? {
            self.server.request_timeout_secs = secs;
        }

        if let Some(host) = var("REDIS_HOST") {
            self.redis.host = host;
        }
        if let Some(port) = parsed(&var, "REDIS_PORT")? {
            self.redis.port = port;
        }
        if let Some(password) = var("REDIS_PASSWORD") {
            self.redis.password = Some(password).filter(|p| !p.is_empty());
        }
        if let Some(db) = parsed(&var, "REDIS_DB")? {
            self.redis.db = db;
        }

        if let Some(url) = var("UPSTREAM_BASE_URL") {
            self.upstream.base_url = url;
        }
        if let Some(secs) = parsed(&var, "UPSTREAM_TIMEOUT_SECS")? {
            self.upstream.timeout_secs = secs;
        }

        if let Some(backend) = parsed(&var, "CACHE_BACKEND")? {
            self.cache.backend = backend;
        }
        if let Some(ttl) = parsed(&var, "CACHE_TTL_SECS")? {
            self.cache.ttl_secs = ttl;
        }

        if let Some(level) = var("LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(dir) = var("LOG_DIR") {
            self.log.directory = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}

fn parsed<F, T>(var: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
        None => Ok(None),
    }
}
