//! Capability traits
//!
//! Each trait is one facet of logging behaviour. They compose additively,
//! so consumer code can ask for the smallest set it needs:
//!
//! ```text
//! Standard ─┬─ StandardExtended ─┐
//!           └─ Leveled ──────────┴─ LeveledExtended ── ContextualExtended
//!                 └─ Contextual
//! ```
//!
//! `Logger` (the generic `log(level, ..)` entry point) stands apart because
//! many backends do not offer it; `ContextualLogger` and
//! `ContextualExtendedLogger` bundle it with the contextual sets.
//!
//! Every operation comes in three call shapes:
//! - plain (`info`): arguments concatenated with no separator
//! - formatted (`infof`): a prepared [`fmt::Arguments`], see [`crate::infof!`]
//! - line (`infoln`): arguments joined by single spaces
//!
//! Methods carry `#[track_caller]`, so implementations can report the call
//! site of the consumer rather than their own.
//!
//! # Example
//!
//! ```
//! use logger_abstract::prelude::*;
//!
//! fn start(log: &dyn Leveled, port: u16) {
//!     log.info(&[&"listening on ", &port]);
//!     log.debugln(&[&"port", &port, &"ready"]);
//! }
//! ```

use super::fields::Field;
use super::level::Level;
use std::fmt::{self, Display};

/// Logs a message at an explicit level.
pub trait Logger: Send + Sync {
    #[track_caller]
    fn log(&self, level: Level, args: &[&dyn Display]);
}

/// The subset every backend offers: the two terminal levels.
///
/// `panic*` emits then unwinds; `fatal*` emits then ends the process (or
/// whatever the adapter's fatal hook dictates). Neither returns normally
/// from a conforming adapter.
pub trait Standard: Send + Sync {
    #[track_caller]
    fn fatal(&self, args: &[&dyn Display]);
    #[track_caller]
    fn fatalf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn fatalln(&self, args: &[&dyn Display]);

    #[track_caller]
    fn panic(&self, args: &[&dyn Display]);
    #[track_caller]
    fn panicf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn panicln(&self, args: &[&dyn Display]);
}

/// [`Standard`] plus unleveled print methods.
pub trait StandardExtended: Standard {
    #[track_caller]
    fn print(&self, args: &[&dyn Display]);
    #[track_caller]
    fn printf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn println(&self, args: &[&dyn Display]);
}

/// [`Standard`] plus the commonly used non-terminal levels.
pub trait Leveled: Standard {
    #[track_caller]
    fn debug(&self, args: &[&dyn Display]);
    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn debugln(&self, args: &[&dyn Display]);

    #[track_caller]
    fn error(&self, args: &[&dyn Display]);
    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn errorln(&self, args: &[&dyn Display]);

    #[track_caller]
    fn info(&self, args: &[&dyn Display]);
    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn infoln(&self, args: &[&dyn Display]);

    #[track_caller]
    fn warn(&self, args: &[&dyn Display]);
    #[track_caller]
    fn warnf(&self, args: fmt::Arguments<'_>);
    #[track_caller]
    fn warnln(&self, args: &[&dyn Display]);
}

/// [`Leveled`] with context attachment.
pub trait Contextual: Leveled {
    /// Derive a logger that adds `fields` to every record it emits.
    ///
    /// The receiver is not modified; the returned logger owns its own copy
    /// of the accumulated fields.
    fn with(&self, fields: &[Field]) -> Box<dyn Leveled>;
}

/// [`Leveled`] together with the print methods.
pub trait LeveledExtended: StandardExtended + Leveled {}

/// [`Contextual`] for the extended method set.
pub trait ContextualExtended: LeveledExtended {
    fn with(&self, fields: &[Field]) -> Box<dyn LeveledExtended>;
}

pub trait ContextualLogger: Logger + Contextual {}

pub trait ContextualExtendedLogger: Logger + ContextualExtended {}
