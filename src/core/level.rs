//! Severity level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of severities understood by every capability set.
///
/// Ordered from least to most severe. `Panic` and `Fatal` terminate the
/// caller after the record is emitted; the remaining levels only log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Level {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Panic = 4,
    Fatal = 5,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Panic,
        Level::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// Lowercase label, as used by the production encoder.
    pub fn to_lowercase_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }

    /// Whether emitting at this level ends the calling flow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Level::Panic | Level::Fatal)
    }

    /// Map onto the `log` facade. The facade tops out at `Error`, so the
    /// terminal levels share it and are told apart by the `severity` key.
    pub fn as_log_level(&self) -> log::Level {
        match self {
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error | Level::Panic | Level::Fatal => log::Level::Error,
        }
    }

    pub fn as_level_filter(&self) -> log::LevelFilter {
        self.as_log_level().to_level_filter()
    }

    /// Inverse of [`Level::as_log_level`] for records produced elsewhere.
    /// `Trace` has no counterpart and folds into `Debug`.
    pub fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Debug => Magenta,
            Level::Info => Blue,
            Level::Warn => Yellow,
            Level::Error => Red,
            Level::Panic => BrightRed,
            Level::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "PANIC" => Ok(Level::Panic),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(LoggerError::config("Level", format!("invalid log level: '{}'", s))),
        }
    }
}

impl TryFrom<i64> for Level {
    type Error = LoggerError;

    /// Raw values follow declaration order, `0` for `Debug` through `5` for
    /// `Fatal`. Anything outside that range is rejected here, so dispatch
    /// never sees a level it cannot route.
    fn try_from(value: i64) -> Result<Self, LoggerError> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Level::ALL.get(idx).copied())
            .ok_or(LoggerError::UnknownLevel(value))
    }
}
