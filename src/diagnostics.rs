//! Logging setup and the three diagnostic severities.
//!
//! Trace output goes through `log::trace!`, per-token problems through
//! [`report`] and unrecoverable conditions through [`fatal`].

use crate::error::NetmaskError;
use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// log4rs configuration picked up from the working directory when present.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Initialise log4rs.
///
/// Uses [`LOG_CONFIG_FILE`] when it exists and `debug` is off, otherwise a
/// stderr appender at WARN (TRACE with `debug`).
pub fn init_logging(debug: bool) -> Result<(), Box<dyn Error>> {
    if !debug && Path::new(LOG_CONFIG_FILE).exists() {
        log4rs::init_file(LOG_CONFIG_FILE, Default::default())?;
        log::debug!("logging configured from {LOG_CONFIG_FILE}");
        return Ok(());
    }

    log4rs::init_config(console_config(debug)?)?;
    Ok(())
}

/// Build the fallback stderr configuration.
fn console_config(debug: bool) -> Result<Config, Box<dyn Error>> {
    let level = if debug {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("netmask: {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

/// Report a per-token failure; the token contributes nothing.
pub fn report(err: &NetmaskError) {
    log::warn!("{} {}", "warning:".yellow(), err);
}

/// Log an unrecoverable condition and terminate the process.
pub fn fatal(message: &str) -> ! {
    log::error!("{} {}", "fatal:".on_red(), message);
    log::logger().flush();
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_config_levels() {
        let config = console_config(false).expect("config should build");
        assert_eq!(config.root().level(), LevelFilter::Warn);
        let config = console_config(true).expect("config should build");
        assert_eq!(config.root().level(), LevelFilter::Trace);
        assert_eq!(config.appenders().len(), 1);
    }
}
