//! Logging setup.
//!
//! Thin wrapper over `env_logger`. The `DEVBOARD_LOG` variable takes the
//! usual env_logger filter syntax and wins over the level passed in.

use anyhow::{anyhow, Result};
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

pub const LOG_ENV: &str = "DEVBOARD_LOG";

/// Parse a log level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_log_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("Invalid log level: {}. Valid options: off, error, warn, info, debug, trace", level))
}

/// Install the global logger. Calling it twice is harmless.
pub fn init_logging(default_level: LevelFilter) {
    let env = Env::default().filter_or(LOG_ENV, default_level.as_str().to_lowercase());
    let result = Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialised");
    }
}
