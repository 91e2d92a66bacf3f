//! # Logger Abstract
//!
//! Capability traits for structured, leveled logging, and an adapter that
//! maps them onto the [`log`] facade.
//!
//! ## Features
//!
//! - **Small capability sets**: depend on `Leveled`, `Contextual` or just
//!   `Logger`, never on a concrete backend
//! - **Adapter**: `StructuredLogger` wraps any `Arc<dyn log::Log>`
//! - **Presets**: development (text), production (JSON) and console
//!   (`label=value` over any writer)
//! - **Context**: `with` derives loggers carrying extra fields without
//!   touching the parent
//!
//! ## Example
//!
//! ```
//! use logger_abstract::prelude::*;
//! use logger_abstract::adapters::structured;
//!
//! let logger = structured::new(Kind::Console, Some(Box::new(std::io::sink())));
//! logger.log(Level::Warn, &[&"disk low"]);
//!
//! let request = logger.with(&[Field::new("request_id", "abc123")]);
//! request.errorln(&[&"request", &"failed"]);
//! ```

pub mod adapters;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::adapters::{
        new_dev_logger, new_logger, new_prod_logger, FatalHook, Kind, LoggerBuilder,
        PresetConfig, StructuredLogger,
    };
    pub use crate::core::{
        Contextual, ContextualExtended, ContextualExtendedLogger, ContextualLogger, Field,
        FieldValue, Fields, Leveled, LeveledExtended, Level, Logger, LoggerError, Result,
        Standard, StandardExtended,
    };
}

pub use crate::adapters::{
    new_dev_logger, new_logger, new_prod_logger, FatalHook, Kind, LoggerBuilder, PresetConfig,
    StructuredLogger,
};
pub use crate::core::{
    Contextual, ContextualExtended, ContextualExtendedLogger, ContextualLogger, Field,
    FieldValue, Fields, Level, Leveled, LeveledExtended, Logger, LoggerError, Result, Standard,
    StandardExtended,
};
