//! Logging setup for the tuner binary: console plus rotating log files
//!
//! Console output is human-readable; file output is JSON by default so tuning runs
//! can be compared afterwards.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::common::constants::{DEFAULT_LEVEL_FILTER, DEFAULT_LOG_DIR, LOG_FILE_PREFIX};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory to store log files
    pub log_dir: String,
    /// Log level filter (e.g., "info", "lock_tuner=debug")
    pub level_filter: String,
    pub rotation: LogRotation,
    pub console_timestamps: bool,
    /// JSON lines instead of plain text in files
    pub file_json_format: bool,
}

#[derive(Debug, Clone)]
pub enum LogRotation {
    Daily,
    Hourly,
    /// Rotate when file reaches size limit (MB)
    SizeBased(u64),
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: DEFAULT_LOG_DIR.to_string(),
            level_filter: DEFAULT_LEVEL_FILTER.to_string(),
            rotation: LogRotation::Daily,
            console_timestamps: true,
            file_json_format: true,
        }
    }
}

/// Initialize console + rotating file logging.
///
/// The returned guard flushes the background file writer on drop and must be held
/// for the lifetime of the program.
pub fn init_dual_logging(config: &LoggingConfig) -> Result<WorkerGuard, Box<dyn std::error::Error + Send + Sync>> {
    std::fs::create_dir_all(&config.log_dir)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level_filter));
    let file_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level_filter));

    let file_name = format!("{LOG_FILE_PREFIX}.log");
    let file_appender = match config.rotation {
        LogRotation::Daily => tracing_appender::rolling::daily(&config.log_dir, &file_name),
        LogRotation::Hourly => tracing_appender::rolling::hourly(&config.log_dir, &file_name),
        LogRotation::SizeBased(_size_mb) => {
            // tracing_appender has no size-based policy; daily is the closest
            tracing_appender::rolling::daily(&config.log_dir, &file_name)
        }
    };
    let (file_writer, guard) = non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_timer(if config.console_timestamps {
            ChronoUtc::new("%Y-%m-%d %H:%M:%S%.3f UTC".to_string())
        } else {
            ChronoUtc::new(String::new())
        })
        .with_filter(console_filter);

    let file_layer = if config.file_json_format {
        fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_target(true)
            .with_timer(ChronoUtc::new("%Y-%m-%dT%H:%M:%S%.3fZ".to_string()))
            .with_filter(file_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_target(true)
            .with_timer(ChronoUtc::new("%Y-%m-%d %H:%M:%S%.3f UTC".to_string()))
            .with_filter(file_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        log_dir = %config.log_dir,
        rotation = ?config.rotation,
        json_format = config.file_json_format,
        "📁 Dual logging initialized - console + rotating files"
    );

    Ok(guard)
}

/// Console-only logging, used when the log directory cannot be set up
pub fn init_simple_logging(level_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_filter)))
        .try_init();
}

/// Tuner log files in `log_dir`, sorted by name
pub fn get_current_log_files(log_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(log_dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| is_tuner_log(path))
                .collect()
        })
        .unwrap_or_default();

    files.sort();
    files
}

fn is_tuner_log(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(LOG_FILE_PREFIX) && name.contains(".log"))
            .unwrap_or(false)
}

/// Remove tuner log files not modified within `keep_days`
pub fn cleanup_old_logs(log_dir: &Path, keep_days: u32) -> Result<usize, std::io::Error> {
    let cutoff = std::time::SystemTime::now() - std::time::Duration::from_secs(u64::from(keep_days) * 24 * 3600);
    let mut removed = 0;

    for path in get_current_log_files(log_dir) {
        let modified = path.metadata().and_then(|metadata| metadata.modified());
        if matches!(modified, Ok(modified) if modified < cutoff) {
            std::fs::remove_file(&path)?;
            removed += 1;
            tracing::debug!("🗑️ Removed old log file: {:?}", path);
        }
    }

    if removed > 0 {
        tracing::info!("🧹 Cleaned up {} old log files (older than {} days)", removed, keep_days);
    }
    Ok(removed)
}

pub fn log_system_info() {
    tracing::info!(
        package_version = env!("CARGO_PKG_VERSION"),
        target_arch = std::env::consts::ARCH,
        target_os = std::env::consts::OS,
        cpu_count = num_cpus::get(),
        "📊 Environment information logged"
    );
}
