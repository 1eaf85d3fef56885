//! Log categories and logger setup
//!
//! Messages go through the `log` facade. Each [`LogCategory`] maps onto a
//! `log::Level` and prefixes the message with a marker that is easy to spot in
//! a scrolling console.

use log::Level;

/// Category of a log message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogCategory {
    /// General output, usually temporary while a feature is being built
    #[default]
    Default,
    /// State information worth keeping once the feature is done
    Info,
    /// State expectations and values, e.g. `Expecting 5 - Received 4`
    Debug,
    /// Code that was not supposed to be reached
    Fault,
    /// Inability to fulfil a requirement
    Failure,
}

impl LogCategory {
    /// Marker printed in front of the message
    pub fn emoji(self) -> &'static str {
        match self {
            LogCategory::Default => "📎",
            LogCategory::Info => "ℹ️",
            LogCategory::Debug => "🧑🏼‍💻",
            LogCategory::Fault => "⁉️",
            LogCategory::Failure => "❌",
        }
    }

    /// `log` level the category is emitted at
    pub fn level(self) -> Level {
        match self {
            LogCategory::Default | LogCategory::Info => Level::Info,
            LogCategory::Debug => Level::Debug,
            LogCategory::Fault => Level::Warn,
            LogCategory::Failure => Level::Error,
        }
    }

    /// `message` prefixed with the category marker
    pub fn decorate(self, message: &str) -> String {
        format!("{} {}", self.emoji(), message)
    }

    /// Emit `message` under `target`
    pub fn log(self, target: &str, message: &str) {
        log::log!(target: target, self.level(), "{}", self.decorate(message));
    }
}

/// Install `env_logger` with an `info` default filter.
///
/// Respects `RUST_LOG`. Returns false if a logger was already installed.
pub fn init_logging() -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
