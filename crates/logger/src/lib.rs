use std::path::Path;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub const LOG_FILE_PREFIX: &str = "dexcache.log";

/// Installs the global subscriber. `RUST_LOG` wins over `level` when set.
///
/// With a `directory` the output goes to a daily-rolling file instead of stdout;
/// the returned guard must be kept alive for the lifetime of the process.
pub fn init_logger(level: &str, directory: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = FmtSubscriber::builder().with_env_filter(filter);

    match directory {
        Some(dir) => {
            let (writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE_PREFIX));
            let subscriber = builder.with_writer(writer).with_ansi(false).finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("setting default subscriber failed");
            Some(guard)
        }
        None => {
            let subscriber = builder.finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("setting default subscriber failed");
            None
        }
    }
}
