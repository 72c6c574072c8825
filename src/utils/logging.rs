//! Logging setup for the token exporter.
//!
//! Each module owns a `const ENABLE_LOGS: bool` switch; the `log_info!`,
//! `log_warn!` and `log_error!` macros below read it, so the API client,
//! extractor and poller can be silenced independently. Plain `log::debug!`
//! is used for per-request and per-style detail that `RUST_LOG` controls.

/// `log::info!` when the calling module's `ENABLE_LOGS` is set.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// `log::warn!` when the calling module's `ENABLE_LOGS` is set.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// `log::error!`, gated the same way.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

/// Install `env_logger` with millisecond timestamps. `RUST_LOG` picks the
/// filter (default `info`); repeated calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
