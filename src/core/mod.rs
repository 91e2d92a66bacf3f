//! Core types and capability traits

pub mod capability;
pub mod error;
pub mod fields;
pub mod level;
pub mod message;

pub use capability::{
    Contextual, ContextualExtended, ContextualExtendedLogger, ContextualLogger, Leveled,
    LeveledExtended, Logger, Standard, StandardExtended,
};
pub use error::{LoggerError, Result};
pub use fields::{Field, FieldValue, Fields};
pub use level::Level;
