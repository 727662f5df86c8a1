// toot - A command-line client for Mastodon
// Copyright (C) 2025 toot Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Logging system for toot
//!
//! Stdout belongs to command output and stderr to `Error:` lines, so the
//! console layer is only installed when asked for. File logs are JSON with
//! daily rotation.

use std::path::PathBuf;

use anyhow::Result;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logger configuration
pub struct LoggerConfig {
    /// Directory for log files; no file output when unset
    pub log_dir: Option<PathBuf>,
    /// Log file prefix
    pub file_prefix: String,
    /// Maximum log level
    pub level: Level,
    /// Whether to log to stderr
    pub console_output: bool,
    /// Log rotation strategy
    pub rotation: Rotation,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            file_prefix: "toot".to_string(),
            level: Level::INFO,
            console_output: false,
            rotation: Rotation::DAILY,
        }
    }
}

impl LoggerConfig {
    /// Verbose runs log at debug level to stderr
    pub fn for_cli(verbose: bool, log_dir: Option<PathBuf>) -> Self {
        Self {
            log_dir,
            level: if verbose { Level::DEBUG } else { Level::INFO },
            console_output: verbose,
            ..Self::default()
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("toot={},api={}", self.level, self.level)))
    }
}

/// Main logger struct
pub struct Logger;

impl Logger {
    /// Initialize the logging system with custom configuration
    pub fn init_with_config(config: LoggerConfig) -> Result<()> {
        if !config.console_output && config.log_dir.is_none() {
            return Ok(());
        }

        let console_layer = config.console_output.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_span_events(FmtSpan::CLOSE)
                .boxed()
        });

        let file_layer = match &config.log_dir {
            Some(log_dir) => {
                std::fs::create_dir_all(log_dir)?;
                let file_appender =
                    RollingFileAppender::new(config.rotation.clone(), log_dir, &config.file_prefix);
                Some(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_span_events(FmtSpan::CLOSE)
                        .json()
                        .boxed(),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(config.filter())
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        Ok(())
    }
}

/// Macro for logging API calls with timing
#[macro_export]
macro_rules! log_api_call {
    ($method:expr, $url:expr) => {
        tracing::debug!(
            target: "api",
            method = $method,
            url = $url,
            "API call started"
        )
    };
    ($method:expr, $url:expr, $duration:expr) => {
        tracing::info!(
            target: "api",
            method = $method,
            url = $url,
            duration_ms = $duration,
            "API call completed"
        )
    };
}
