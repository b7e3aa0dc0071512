//! Logging configuration for stepview components
//!
//! Provides centralized logging setup with:
//! - Colorful console output with structured formatting
//! - File logging to a temporary directory
//! - Environment variable support (RUST_LOG)
//! - Default INFO level
//!
//! The interactive terminal client must never write log lines to the
//! terminal it draws on, so it uses [`init_file_only_logging`].

use eyre::Result;
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Once,
};
use tracing::Level;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, time::LocalTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Name of the directory (under the system temp folder) holding all log files
const LOG_ROOT: &str = "stepview-logs";

/// HTTP client internals are chatty at debug level
const QUIET_HTTP_DIRECTIVES: &str = "hyper=warn,hyper_util=warn,reqwest=warn";

/// Initialize logging for stepview components
///
/// This function sets up:
/// - Colorful, structured console logging with timestamps, on stderr
/// - File logging to a temporary directory with daily rotation
/// - Environment variable support for log levels (RUST_LOG)
/// - Default INFO level if no RUST_LOG is set
///
/// # Arguments
/// * `component_name` - Name of the component (e.g., "stepview", "stepview-trace")
/// * `enable_file_logging` - Whether to also write a rolling log file
///
/// # Examples
/// ```rust
/// use stepview_common::logging;
///
/// fn main() -> eyre::Result<()> {
///     logging::init_logging("stepview", false)?;
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init_logging(component_name: &str, enable_file_logging: bool) -> Result<()> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .pretty()
        .with_filter(filter_for_console());

    if enable_file_logging {
        let log_dir = create_log_directory(component_name)?;
        let file_layer = build_file_layer(&log_dir, component_name);

        tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {}", e))?;

        tracing::info!(
            component = component_name,
            log_dir = %log_dir.display(),
            "Logging initialized with console and file output"
        );
    } else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {}", e))?;

        tracing::info!(component = component_name, "Logging initialized with console output only");
    }

    log_environment_info(component_name);
    Ok(())
}

/// Initialize file-only logging and return the directory the logs go to
///
/// Used by the terminal client, which owns the whole screen while running.
pub fn init_file_only_logging(component_name: &str) -> Result<PathBuf> {
    let log_dir = create_log_directory(component_name)?;
    let file_layer = build_file_layer(&log_dir, component_name);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::info!(
        component = component_name,
        log_dir = %log_dir.display(),
        "Logging initialized with file output only"
    );
    log_environment_info(component_name);

    Ok(log_dir)
}

/// Build a non-colored, daily-rolling file layer writing into `log_dir`
fn build_file_layer<S>(log_dir: &Path, component_name: &str) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    let file_appender = rolling::daily(log_dir, format!("{component_name}.log"));
    let (non_blocking_appender, guard) = non_blocking(file_appender);

    // The guard flushes on drop; logging lives for the whole process.
    std::mem::forget(guard);

    fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(false)
        .with_writer(non_blocking_appender)
        .with_filter(filter_for_file())
}

/// Create log directory in system temp folder
fn create_log_directory(component_name: &str) -> Result<PathBuf> {
    let log_dir = env::temp_dir().join(LOG_ROOT).join(component_name);
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

/// The RUST_LOG directives, or `default` when unset
fn base_directives(default: &str) -> String {
    env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default.to_string())
}

/// Filter for console output - hides HTTP client noise
fn filter_for_console() -> EnvFilter {
    EnvFilter::new(format!("{},{}", base_directives("info"), QUIET_HTTP_DIRECTIVES))
}

/// Filter for file output - be more verbose for debugging
fn filter_for_file() -> EnvFilter {
    EnvFilter::new(base_directives("debug"))
}

/// Log useful environment and system information
fn log_environment_info(component_name: &str) {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| "info".to_string());
    let args: Vec<String> = env::args().collect();

    tracing::info!(
        component = component_name,
        rust_log = %rust_log,
        args = ?args,
        "Environment information"
    );

    if let Ok(current_dir) = env::current_dir() {
        tracing::debug!(working_directory = %current_dir.display(), "Working directory");
    }
}

/// Initialize simple logging (console only, no fancy formatting)
///
/// Used by the plain-text frontend and by tests. Log lines go to stderr so
/// they never interleave with rendered views on stdout.
///
/// # Arguments
/// * `level` - The default log level to use
pub fn init_simple_logging(level: Level) -> Result<()> {
    let env_filter = EnvFilter::new(format!(
        "{},{}",
        base_directives(level.as_str()),
        QUIET_HTTP_DIRECTIVES
    ));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize simple logging: {}", e))?;

    Ok(())
}

// Global test logging initialization - ensures logging is only set up once across all tests
static TEST_LOGGING_INIT: Once = Once::new();

/// Safe logging initialization for tests - can be called multiple times without crashing
///
/// Console-only output, INFO by default but respecting RUST_LOG.
///
/// # Usage
/// ```rust
/// use stepview_common::logging;
///
/// logging::ensure_test_logging(None);
/// tracing::info!("This will work safely in any test!");
/// ```
pub fn ensure_test_logging(default_level: Option<Level>) {
    TEST_LOGGING_INIT.call_once(|| {
        // A failure here means another subscriber is already installed
        let _ = init_simple_logging(default_level.unwrap_or(Level::INFO));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, error, info, warn};

    #[test]
    fn test_logging_functions_work() {
        ensure_test_logging(None);

        info!("Test info message");
        warn!("Test warning message");
        debug!("Test debug message");
        error!("Test error message");
    }

    #[test]
    fn test_log_directory_creation() {
        let log_dir = create_log_directory("test-component").unwrap();
        assert!(log_dir.exists());
        assert!(log_dir.to_string_lossy().contains(LOG_ROOT));
        assert!(log_dir.to_string_lossy().contains("test-component"));
    }

    #[test]
    fn test_console_filter_quiets_http_clients() {
        let console_filter = filter_for_console().to_string();
        assert!(console_filter.contains("reqwest=warn"));
        assert!(console_filter.contains("hyper=warn"));
        assert!(!filter_for_file().to_string().is_empty());
    }

    #[test]
    fn test_repeated_initialization_does_not_panic() {
        ensure_test_logging(None);

        // A subscriber is already installed, so both attempts must fail gracefully
        assert!(init_logging("test-repeat-1", false).is_err());
        assert!(init_simple_logging(Level::DEBUG).is_err());

        info!("Logging still works after repeated init attempts");
    }
}
