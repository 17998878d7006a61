//! Terminal logging for the recordings manager.
//!
//! Every crate in the workspace logs through the `log` facade; `meeting_auth`
//! emits `tracing` events that arrive here as `log` records carrying their
//! module path as target. Below `TRACE`, the HTTP stack underneath `reqwest`
//! and `axum` is silenced so request-level chatter does not bury the
//! per-user listing progress.

use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{ConfigBuilder, TermLogger};

/// Target prefixes of the HTTP client and server stack. `tracing::span`
/// covers span enter/exit records only, so `meeting_auth` events stay visible.
const DEPENDENCY_TARGETS: &[&str] = &[
    "h2",
    "hyper",
    "hyper_util",
    "mio",
    "reqwest",
    "rustls",
    "tower_http",
    "axum",
    "tracing::span",
];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger at the configured level.
    ///
    /// Fails if another global logger is already installed.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        TermLogger::init(
            config.log_level_filter,
            Self::build_log_config(config.log_level_filter),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
    }

    fn build_log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder
            .set_time_format_rfc3339()
            .set_target_level(LevelFilter::Error);

        for target in Self::ignored_targets(level) {
            builder.add_filter_ignore_str(target);
        }

        builder.build()
    }

    /// Targets dropped at `level`: none at `TRACE`, the dependency stack otherwise.
    fn ignored_targets(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            DEPENDENCY_TARGETS
        }
    }
}
