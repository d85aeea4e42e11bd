//! Operator-facing logging built on tracing.
//!
//! This module configures operator-facing logging with:
//! - `LEVEL message` lines on stderr
//! - A filter that can be switched to debug once configuration is known
//! - Optional daily-rotated log files
//! - One span per component, handed to the component that logs in it

use std::path::PathBuf;

use tracing::Span;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*, reload, Registry};

/// Filter used unless `RUST_LOG` is set or debug mode is on.
const DEFAULT_LOG_FILTER: &str = "jiracli=info,warn";

/// Log level used when debug mode is requested.
const DEBUG_LOG_FILTER: &str = "jiracli=debug,warn";

/// Environment variable naming a directory for log files.
pub const LOG_DIR_ENV_VAR: &str = "JIRACLI_LOG_DIR";

/// Handle to the installed subscriber.
///
/// The debug flag is only known after configuration has been resolved, so
/// the filter is reloadable.
#[derive(Debug, Clone)]
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Switch between the default and the debug filter.
    ///
    /// `RUST_LOG`, when set, wins over both.
    pub fn set_debug(&self, debug: bool) -> anyhow::Result<()> {
        self.filter.reload(build_filter(debug))?;
        tracing::debug!("Debug logging enabled");
        Ok(())
    }
}

/// Install the global subscriber.
///
/// Output:
/// - Plain `LEVEL message` lines on stderr
/// - Log level configuration via `RUST_LOG` environment variable
/// - A daily rotating file in `$JIRACLI_LOG_DIR`, when that is set
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be created
/// - The tracing subscriber cannot be set
pub fn init() -> anyhow::Result<LogHandle> {
    let (filter, handle) = reload::Layer::new(build_filter(false));

    let file_layer = match log_directory() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, &dir, "jiracli.log");
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_target(true),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "jiracli starting up");

    Ok(LogHandle { filter: handle })
}

/// The span a component emits its events in.
///
/// Debug level, so its name only shows up in debug output.
pub fn component_span(component: &'static str) -> Span {
    tracing::debug_span!("jiracli", component)
}

/// Get the directory log files are written to, if any.
pub fn log_directory() -> Option<PathBuf> {
    std::env::var_os(LOG_DIR_ENV_VAR)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

/// Mark the end of the run in debug output.
pub fn shutdown() {
    tracing::debug!("jiracli shutting down");
}

fn build_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(debug)))
}

fn default_directive(debug: bool) -> &'static str {
    if debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}
