//! Adapter from the capability traits onto the `log` facade
//!
//! [`StructuredLogger`] wraps one `Arc<dyn log::Log>` and turns every call
//! into a single `log::Record`. Attached fields travel as the record's
//! key-values, the logger name as its target and the consumer's call site
//! as its file and line.

use super::encoder::SEVERITY_KEY;
use super::presets::{Kind, LoggerBuilder};
use crate::core::message::{sprint, sprintf, sprintln};
use crate::core::{
    Contextual, ContextualExtended, ContextualExtendedLogger, ContextualLogger, Field, Fields,
    Level, Leveled, LeveledExtended, Logger, LoggerError, Result, Standard, StandardExtended,
};
use log::kv::{self, Key, Source, Value, VisitSource};
use log::{Log, Metadata, Record};
use std::fmt::{self, Display};
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// What happens after a fatal record has been emitted and flushed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FatalHook {
    /// Exit the process with status 1
    #[default]
    Exit,
    /// Panic with the message instead of exiting
    Panic,
}

impl FatalHook {
    fn fire(&self, message: &str) -> ! {
        match self {
            FatalHook::Exit => std::process::exit(1),
            FatalHook::Panic => panic!("{}", message),
        }
    }
}

/// Fields of one record: the reserved severity first on error-level
/// records, then the logger's own fields.
struct RecordFields<'a> {
    severity: Option<Level>,
    fields: &'a Fields,
}

impl Source for RecordFields<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> std::result::Result<(), kv::Error> {
        if let Some(severity) = self.severity {
            visitor.visit_pair(Key::from_str(SEVERITY_KEY), Value::from(severity.to_str()))?;
        }
        self.fields.visit(visitor)
    }
}

/// Forwards to whatever logger is installed in the `log` facade
struct GlobalLog;

impl Log for GlobalLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record)
    }

    fn flush(&self) {
        log::logger().flush()
    }
}

/// Contextual logger backed by a `log::Log` handle.
///
/// Cloning is cheap and yields an independent logger sharing the same
/// handle. The handle itself is never mutated, so parent and child loggers
/// share no mutable state.
#[derive(Clone)]
pub struct StructuredLogger {
    handle: Arc<dyn Log>,
    fields: Fields,
    name: Option<String>,
    fatal_hook: FatalHook,
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("fields", &self.fields)
            .field("name", &self.name)
            .field("fatal_hook", &self.fatal_hook)
            .finish_non_exhaustive()
    }
}

impl StructuredLogger {
    /// Wrap an existing handle without changing its configuration
    pub fn new(handle: Arc<dyn Log>) -> Self {
        Self::from_parts(handle, Fields::new(), None, FatalHook::default())
    }

    /// Wrap the logger currently installed in the `log` facade
    pub fn from_global() -> Self {
        Self::new(Arc::new(GlobalLog))
    }

    pub(crate) fn from_parts(
        handle: Arc<dyn Log>,
        fields: Fields,
        name: Option<String>,
        fatal_hook: FatalHook,
    ) -> Self {
        Self {
            handle,
            fields,
            name,
            fatal_hook,
        }
    }

    /// Create a builder for a preset-backed logger
    pub fn builder(kind: Kind) -> LoggerBuilder {
        LoggerBuilder::new(kind)
    }

    /// Child logger carrying `fields` in addition to the receiver's own
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
            fields: self.fields.extended(fields),
            name: self.name.clone(),
            fatal_hook: self.fatal_hook,
        }
    }

    /// Child logger whose name is `name` appended to the receiver's, dot
    /// separated
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let name = match (&self.name, name.is_empty()) {
            (_, true) => self.name.clone(),
            (Some(parent), false) => Some(format!("{}.{}", parent, name)),
            (None, false) => Some(name.to_string()),
        };
        Self {
            name,
            ..self.with(&[])
        }
    }

    #[must_use]
    pub fn with_fatal_hook(&self, fatal_hook: FatalHook) -> Self {
        Self {
            fatal_hook,
            ..self.with(&[])
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The logger itself, as a byte sink: each write becomes one INFO record
    pub fn output(&self) -> Self {
        self.clone()
    }

    /// Changing the sink of a constructed logger is not supported; the
    /// active output is left as it is and the call always reports
    /// [`LoggerError::Unsupported`].
    pub fn set_output(&self, _writer: Box<dyn Write + Send>) -> Result<()> {
        Err(LoggerError::unsupported("set_output"))
    }

    /// Flush the underlying handle
    pub fn sync(&self) {
        self.handle.flush();
    }

    #[track_caller]
    fn emit(&self, level: Level, message: String) {
        let caller = Location::caller();
        let kvs = RecordFields {
            severity: (level >= Level::Error).then_some(level),
            fields: &self.fields,
        };

        self.handle.log(
            &Record::builder()
                .args(format_args!("{}", message))
                .level(level.as_log_level())
                .target(self.name.as_deref().unwrap_or(""))
                .file(Some(caller.file()))
                .line(Some(caller.line()))
                .key_values(&kvs)
                .build(),
        );

        match level {
            Level::Panic => panic!("{}", message),
            Level::Fatal => {
                self.handle.flush();
                self.fatal_hook.fire(&message)
            }
            Level::Debug | Level::Info | Level::Warn | Level::Error => {}
        }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, level: Level, args: &[&dyn Display]) {
        match level {
            Level::Debug => self.debug(args),
            Level::Info => self.info(args),
            Level::Warn => self.warn(args),
            Level::Error => self.error(args),
            Level::Panic => self.panic(args),
            Level::Fatal => self.fatal(args),
        }
    }
}

impl Standard for StructuredLogger {
    fn fatal(&self, args: &[&dyn Display]) {
        self.emit(Level::Fatal, sprint(args));
    }

    fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Fatal, sprintf(args));
    }

    fn fatalln(&self, args: &[&dyn Display]) {
        self.emit(Level::Fatal, sprintln(args));
    }

    fn panic(&self, args: &[&dyn Display]) {
        self.emit(Level::Panic, sprint(args));
    }

    fn panicf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Panic, sprintf(args));
    }

    fn panicln(&self, args: &[&dyn Display]) {
        self.emit(Level::Panic, sprintln(args));
    }
}

// The facade has no separate print level; printing is informational.
impl StandardExtended for StructuredLogger {
    fn print(&self, args: &[&dyn Display]) {
        self.info(args);
    }

    fn printf(&self, args: fmt::Arguments<'_>) {
        self.infof(args);
    }

    fn println(&self, args: &[&dyn Display]) {
        self.infoln(args);
    }
}

impl Leveled for StructuredLogger {
    fn debug(&self, args: &[&dyn Display]) {
        self.emit(Level::Debug, sprint(args));
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, sprintf(args));
    }

    fn debugln(&self, args: &[&dyn Display]) {
        self.emit(Level::Debug, sprintln(args));
    }

    fn error(&self, args: &[&dyn Display]) {
        self.emit(Level::Error, sprint(args));
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, sprintf(args));
    }

    fn errorln(&self, args: &[&dyn Display]) {
        self.emit(Level::Error, sprintln(args));
    }

    fn info(&self, args: &[&dyn Display]) {
        self.emit(Level::Info, sprint(args));
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, sprintf(args));
    }

    fn infoln(&self, args: &[&dyn Display]) {
        self.emit(Level::Info, sprintln(args));
    }

    fn warn(&self, args: &[&dyn Display]) {
        self.emit(Level::Warn, sprint(args));
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, sprintf(args));
    }

    fn warnln(&self, args: &[&dyn Display]) {
        self.emit(Level::Warn, sprintln(args));
    }
}

impl Contextual for StructuredLogger {
    fn with(&self, fields: &[Field]) -> Box<dyn Leveled> {
        Box::new(StructuredLogger::with(self, fields))
    }
}

impl LeveledExtended for StructuredLogger {}

impl ContextualExtended for StructuredLogger {
    fn with(&self, fields: &[Field]) -> Box<dyn LeveledExtended> {
        Box::new(StructuredLogger::with(self, fields))
    }
}

impl ContextualLogger for StructuredLogger {}

impl ContextualExtendedLogger for StructuredLogger {}

impl Write for StructuredLogger {
    /// Log `buf` as one INFO message; every byte is always accepted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.emit(Level::Info, String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync();
        Ok(())
    }
}

/// Wrap an existing handle and announce it on that handle
pub fn new_logger(handle: Arc<dyn Log>) -> Box<dyn ContextualLogger> {
    let logger = StructuredLogger::new(handle);
    logger.info(&[&"Using mapped structured logger"]);
    Box::new(logger)
}

/// Development preset on stderr
pub fn new_dev_logger() -> Box<dyn ContextualExtendedLogger> {
    new(Kind::Development, None)
}

/// Production preset on stderr
pub fn new_prod_logger() -> Box<dyn ContextualExtendedLogger> {
    new(Kind::Production, None)
}

/// Build a preset logger writing to `destination`, or to the preset's
/// default output when `None`.
///
/// Development and production setup failures end the process; see
/// [`LoggerBuilder::build`].
pub fn new(kind: Kind, destination: Option<Box<dyn Write + Send>>) -> Box<dyn ContextualExtendedLogger> {
    let mut builder = LoggerBuilder::new(kind);
    if let Some(destination) = destination {
        builder = builder.destination(destination);
    }
    let logger = builder.build();
    logger.infof(format_args!("Constructed {} logger", kind));
    Box::new(logger)
}
