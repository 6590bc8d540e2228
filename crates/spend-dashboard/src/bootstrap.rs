use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the per-user state directory under `$HOME`.
pub const APP_DIR: &str = ".spend-dashboard";

// ── Directory bootstrap ────────────────────────────────────────────────────────

fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Ensure `~/.spend-dashboard/logs/` exists.
pub fn ensure_directories() -> anyhow::Result<()> {
    std::fs::create_dir_all(app_dir().join("logs"))?;
    Ok(())
}

/// Log destination used by the interactive dashboard when `--log-file` is unset.
pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join("spend-dashboard.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a user-facing level name onto an `EnvFilter` directive.
pub fn filter_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With a `log_file` the output is appended there without ANSI colours, so
/// the terminal UI stays intact; otherwise it goes to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Run `f` with `HOME` pointed at `home`, restoring it afterwards.
    fn with_home<T>(home: &std::path::Path, f: impl FnOnce() -> T) -> T {
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", home);

        let out = f();

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }
        out
    }

    // ── ensure_directories ────────────────────────────────────────────────────

    #[test]
    fn test_ensure_directories_and_default_log_file() {
        let tmp = TempDir::new().expect("tempdir");

        let (result, log_file) = with_home(tmp.path(), || (ensure_directories(), default_log_file()));
        result.expect("ensure_directories should succeed");

        let app_dir = tmp.path().join(APP_DIR);
        assert!(app_dir.join("logs").is_dir(), "logs subdir must exist");
        assert_eq!(log_file, app_dir.join("logs").join("spend-dashboard.log"));
    }

    // ── filter_directive ──────────────────────────────────────────────────────

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("info"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("verbose"), "info");
    }

    // ── setup_logging ─────────────────────────────────────────────────────────

    #[test]
    fn test_setup_logging_to_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("nested").join("run.log");

        setup_logging("INFO", Some(&path)).expect("first init succeeds");
        tracing::info!("hello from the test");

        let written = std::fs::read_to_string(&path).expect("log file");
        assert!(written.contains("hello from the test"));
        assert!(!written.contains('\u{1b}'), "no ANSI escapes in file output");

        // The global subscriber can only be installed once.
        assert!(setup_logging("INFO", None).is_err());
    }
}
