//! Logging macros for the formatted call shape.
//!
//! Each `*f!` macro builds the [`std::fmt::Arguments`] for the matching
//! `*f` method, so call sites read like `println!`.
//!
//! # Examples
//!
//! ```
//! use logger_abstract::prelude::*;
//! use logger_abstract::{fields, infof};
//!
//! let logger = LoggerBuilder::new(Kind::Console)
//!     .destination(Box::new(std::io::sink()))
//!     .build();
//!
//! let port = 8080;
//! infof!(logger, "Server listening on port {}", port);
//!
//! let request = logger.with(&fields!["request_id" => "abc123", "attempt" => 2]);
//! infof!(request, "Request accepted");
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logger_abstract::prelude::*;
/// # let logger = LoggerBuilder::new(Kind::Console).destination(Box::new(std::io::sink())).build();
/// use logger_abstract::logf;
/// logf!(logger, Level::Warn, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, &[&format_args!($($arg)+)])
    };
}

/// Log a formatted debug-level message.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

/// Log a formatted info-level message.
///
/// # Examples
///
/// ```
/// # use logger_abstract::prelude::*;
/// # let logger = LoggerBuilder::new(Kind::Console).destination(Box::new(std::io::sink())).build();
/// use logger_abstract::infof;
/// infof!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Log a formatted warning-level message.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

/// Log a formatted error-level message.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

/// Print a formatted message (informational).
#[macro_export]
macro_rules! printf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.printf(format_args!($($arg)+))
    };
}

/// Log a formatted message, then panic.
#[macro_export]
macro_rules! panicf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(format_args!($($arg)+))
    };
}

/// Log a formatted message, then run the fatal hook.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
}

/// Build an array of [`Field`](crate::core::Field)s from `key => value`
/// pairs, ready to pass to `with`.
#[macro_export]
macro_rules! fields {
    () => {
        [] as [$crate::core::Field; 0]
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        [$($crate::core::Field::new($key, $value)),+]
    };
}

#[cfg(test)]
mod tests {
    use crate::adapters::{FatalHook, StructuredLogger};
    use crate::core::{Level, Leveled, Logger, StandardExtended, Standard};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Lines(Mutex<Vec<(log::Level, String)>>);

    impl log::Log for Lines {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            self.0.lock().push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    fn logger() -> (Arc<Lines>, StructuredLogger) {
        let lines = Arc::new(Lines::default());
        let logger = StructuredLogger::new(lines.clone()).with_fatal_hook(FatalHook::Panic);
        (lines, logger)
    }

    #[test]
    fn test_logf_macro() {
        let (lines, logger) = logger();
        logf!(logger, Level::Warn, "Retry {} of {}", 1, 3);
        assert_eq!(lines.0.lock()[0], (log::Level::Warn, "Retry 1 of 3".to_string()));
    }

    #[test]
    fn test_leveled_macros() {
        let (lines, logger) = logger();
        debugf!(logger, "Count: {}", 5);
        infof!(logger, "Items: {}", 100);
        warnf!(logger, "Low disk: {}%", 7);
        errorf!(logger, "Code: {}", 500);
        printf!(logger, "printed {}", "plainly");

        let lines = lines.0.lock();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], (log::Level::Debug, "Count: 5".to_string()));
        assert_eq!(lines[1], (log::Level::Info, "Items: 100".to_string()));
        assert_eq!(lines[2], (log::Level::Warn, "Low disk: 7%".to_string()));
        assert_eq!(lines[3], (log::Level::Error, "Code: 500".to_string()));
        assert_eq!(lines[4], (log::Level::Info, "printed plainly".to_string()));
    }

    #[test]
    #[should_panic(expected = "invariant broken: 3")]
    fn test_panicf_macro() {
        let (_lines, logger) = logger();
        panicf!(logger, "invariant broken: {}", 3);
    }

    #[test]
    #[should_panic(expected = "cannot continue")]
    fn test_fatalf_macro_with_panic_hook() {
        let (_lines, logger) = logger();
        fatalf!(logger, "cannot {}", "continue");
    }

    #[test]
    fn test_fields_macro() {
        let fields = fields!["request_id" => "abc123", "attempt" => 2];
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].to_string(), "request_id=abc123");

        let none = fields![];
        assert!(none.is_empty());
    }
}
