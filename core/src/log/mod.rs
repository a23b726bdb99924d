//!
//! Logger and logging macros
//!
//! The macros are thin re-exports of the [`log`] facade so that crates of the
//! workspace import them from a single place (`spendkit_core::{debug, trace}`).
//! Binaries and tests bootstrap the console logger with [`init_logger`] or
//! [`try_init_logger`].
//!

use log::LevelFilter;
use log4rs::config::{Config, Root};
use std::sync::atomic::{AtomicBool, Ordering};

mod appender;
mod consts;
mod logger;

pub use consts::*;
pub use logger::LogError;

#[doc(hidden)]
pub use ::log as __log;

const CONSOLE_APPENDER: &str = "stdout";

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => (
        $crate::log::__log::trace!($($t)*)
    )
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => (
        $crate::log::__log::debug!($($t)*)
    )
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => (
        $crate::log::__log::info!($($t)*)
    )
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => (
        $crate::log::__log::warn!($($t)*)
    )
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => (
        $crate::log::__log::error!($($t)*)
    )
}

/// Builds the log4rs configuration for a filter expression such as
/// `"info,spendkit_wallet_core=trace"`.
fn build_config(filters: &str) -> Result<Config, LogError> {
    let loggers = logger::Builder::from_expression(filters).appenders([CONSOLE_APPENDER].into_iter()).build();
    let mut stdout = appender::AppenderSpec::console(CONSOLE_APPENDER, None);
    Config::builder()
        .appender(stdout.appender()?)
        .loggers(loggers.items())
        .build(Root::builder().appender(CONSOLE_APPENDER).build(loggers.root_level()))
        .map_err(|err| LogError::ConfigError(err.to_string()))
}

/// Initializes the global console logger. Subsequent calls are ignored.
pub fn init_logger(filters: &str) -> Result<(), LogError> {
    if LOGGER_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let config = build_config(filters)?;
    log4rs::init_config(config).map_err(|err| LogError::InitError(err.to_string()))?;
    Ok(())
}

/// Tries to init the global logger, but does not panic if it was already set.
/// Should be used for tests.
pub fn try_init_logger(filters: &str) {
    let _ = init_logger(filters);
}

/// Returns the effective root level for a filter expression.
pub fn root_level(filters: &str) -> LevelFilter {
    logger::Builder::from_expression(filters).build().root_level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_level_from_expression() {
        assert_eq!(root_level("info"), LevelFilter::Info);
        assert_eq!(root_level("debug,spendkit_wallet_core=trace"), LevelFilter::Debug);
        // no root level given
        assert_eq!(root_level("spendkit_wallet_core=trace"), LevelFilter::Error);
    }

    #[test]
    fn test_build_config() {
        let config = build_config("warn,spendkit_wallet_core=trace").unwrap();
        assert_eq!(config.root().level(), LevelFilter::Warn);
        assert_eq!(config.loggers().len(), 1);
        assert_eq!(config.loggers()[0].name(), "spendkit_wallet_core");
        assert_eq!(config.loggers()[0].level(), LevelFilter::Trace);
    }
}
