//! Logging setup for the galaxy viewer.
//!
//! Console output through `tracing-subscriber`, plus a JSON log file in debug
//! builds. Library crates log through the `log` facade; those records are
//! forwarded into the same subscriber.

use std::path::{Path, PathBuf};

use galaxy_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "galaxy.log";

/// Filter directives taken from the config's `debug.log_level`, falling back to
/// [`DEFAULT_FILTER`] when absent or blank.
///
/// A bare level such as `"debug"` keeps GPU driver crates at `warn`.
pub fn filter_directives(config: Option<&Config>) -> String {
    let level = config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty());
    match level {
        None => DEFAULT_FILTER.to_string(),
        Some(level) if level.contains(',') || level.contains('=') => level.to_string(),
        Some(level) => format!("{level},wgpu=warn,naga=warn"),
    }
}

/// Path of the JSON log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the config. When `debug_build` is set and
/// `log_dir` can be created, records are also written there as JSON lines.
/// Must be called at most once per process.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let directives = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::debug!(filter = %directives, dir = %log_dir.display(), "File logging enabled");
        return;
    }

    subscriber.init();
    tracing::debug!(filter = %directives, "Console logging enabled");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_without_config() {
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_blank_level_falls_back_to_default() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_bare_level_keeps_gpu_crates_quiet() {
        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        let directives = filter_directives(Some(&config));
        assert_eq!(directives, "debug,wgpu=warn,naga=warn");
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_full_directive_passed_through() {
        let mut config = Config::default();
        config.debug.log_level = "warn,galaxy_gen=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "warn,galaxy_gen=trace");
    }

    #[test]
    fn test_default_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_FILTER).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("wgpu=warn"));
        assert!(rendered.contains("naga=warn"));
    }

    #[test]
    fn test_subsystem_filters_parse() {
        for directives in ["info", "debug,galaxy_render=trace", "error,galaxy_app=info"] {
            assert!(
                EnvFilter::try_new(directives).is_ok(),
                "failed to parse {directives}"
            );
        }
    }

    #[test]
    fn test_log_file_lives_in_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_path(dir.path());
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
    }
}
