//! Preset construction: kinds, environment configuration and the builder

use super::encoder::{Encoder, EncoderConfig, Encoding};
use super::sink::EncodedLog;
use super::structured::{FatalHook, StructuredLogger};
use crate::core::{Field, Level, LoggerError, Result};
use log::Log;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Environment variable overriding the minimum level of the
/// development and production presets
pub const LEVEL_ENV: &str = "LOGGER_ABSTRACT_LEVEL";

/// Environment variable selecting the output of the development and
/// production presets: `stderr`, `stdout` or a file path
pub const OUTPUT_ENV: &str = "LOGGER_ABSTRACT_OUTPUT";

/// Preset configuration selected at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Human oriented text on stderr, debug and above
    Development,
    /// JSON lines on stderr, info and above
    Production,
    /// `label=value` lines with the fixed console labels over a caller
    /// supplied destination, debug and above
    Console,
}

impl Kind {
    pub fn to_str(&self) -> &'static str {
        match self {
            Kind::Development => "development",
            Kind::Production => "production",
            Kind::Console => "console",
        }
    }

    fn default_level(&self) -> Level {
        match self {
            Kind::Development | Kind::Console => Level::Debug,
            Kind::Production => Level::Info,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Kind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Kind::Development),
            "production" | "prod" => Ok(Kind::Production),
            "console" => Ok(Kind::Console),
            _ => Err(LoggerError::config("Kind", format!("unknown preset: '{}'", s))),
        }
    }
}

/// Where a preset writes when no destination is supplied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputPath {
    #[default]
    Stderr,
    Stdout,
    /// Opened in append mode, created if missing
    File(PathBuf),
}

impl OutputPath {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "stderr" => OutputPath::Stderr,
            "stdout" => OutputPath::Stdout,
            path => OutputPath::File(PathBuf::from(path)),
        }
    }

    fn open(&self) -> Result<Box<dyn Write + Send>> {
        match self {
            OutputPath::Stderr => Ok(Box::new(std::io::stderr())),
            OutputPath::Stdout => Ok(Box::new(std::io::stdout())),
            OutputPath::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        LoggerError::io_operation("opening log output", path.display().to_string(), e)
                    })?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Development and production preset settings, usually read from the
/// environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetConfig {
    pub level: Option<Level>,
    pub output: OutputPath,
}

impl PresetConfig {
    /// Read [`LEVEL_ENV`] and [`OUTPUT_ENV`]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(LEVEL_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<Level>())
            .transpose()?;
        let output = lookup(OUTPUT_ENV)
            .map(|value| OutputPath::parse(&value))
            .unwrap_or_default();

        Ok(Self { level, output })
    }
}

/// Builder for constructing a [`StructuredLogger`] from a preset
///
/// # Example
/// ```
/// use logger_abstract::prelude::*;
///
/// let logger = LoggerBuilder::new(Kind::Console)
///     .destination(Box::new(std::io::sink()))
///     .name("billing")
///     .level(Level::Info)
///     .build();
/// logger.info(&[&"ready"]);
/// ```
pub struct LoggerBuilder {
    kind: Kind,
    destination: Option<Box<dyn Write + Send>>,
    name: Option<String>,
    level: Option<Level>,
    color: Option<bool>,
    fatal_hook: FatalHook,
    fields: Vec<Field>,
    config: Option<PresetConfig>,
}

impl LoggerBuilder {
    /// Create a new builder for the given preset
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            destination: None,
            name: None,
            level: None,
            color: None,
            fatal_hook: FatalHook::default(),
            fields: Vec::new(),
            config: None,
        }
    }

    /// Write to `destination` instead of the preset's default output
    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Box<dyn Write + Send>) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Set the logger name rendered under the `logger` label
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the minimum level, overriding both the preset default and the
    /// environment
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Force level coloring on or off
    #[must_use = "builder methods return a new value"]
    pub fn color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fatal_hook(mut self, hook: FatalHook) -> Self {
        self.fatal_hook = hook;
        self
    }

    /// Attach a field to every record from the start
    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Use explicit preset settings instead of reading the environment.
    /// Ignored by [`Kind::Console`].
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: PresetConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the logger.
    ///
    /// Failing to set up the development or production preset ends the
    /// process: a logger that cannot log is not handed out. The console
    /// preset cannot fail.
    pub fn build(self) -> StructuredLogger {
        let kind = self.kind;
        match self.try_build() {
            Ok(logger) => logger,
            Err(e) => fail_fast(kind, &e),
        }
    }

    pub(crate) fn try_build(self) -> Result<StructuredLogger> {
        let handle = Self::handle(
            self.kind,
            self.destination,
            self.level,
            self.color,
            self.config,
        )?;
        Ok(StructuredLogger::from_parts(
            handle,
            self.fields.into(),
            self.name,
            self.fatal_hook,
        ))
    }

    fn handle(
        kind: Kind,
        destination: Option<Box<dyn Write + Send>>,
        level: Option<Level>,
        color: Option<bool>,
        config: Option<PresetConfig>,
    ) -> Result<Arc<dyn Log>> {
        let (encoding, encoder_config) = match kind {
            Kind::Development => (Encoding::Text, EncoderConfig::development()),
            Kind::Production => (Encoding::Json, EncoderConfig::production()),
            Kind::Console => (Encoding::Console, EncoderConfig::console()),
        };

        let (preset_level, destination, writes_to_stderr) = match kind {
            Kind::Console => match destination {
                Some(destination) => (None, destination, false),
                None => (None, Box::new(std::io::stderr()) as Box<dyn Write + Send>, true),
            },
            Kind::Development | Kind::Production => {
                let config = match config {
                    Some(config) => config,
                    None => PresetConfig::from_env()?,
                };
                match destination {
                    Some(destination) => (config.level, destination, false),
                    None => {
                        let writes_to_stderr = config.output == OutputPath::Stderr;
                        (config.level, config.output.open()?, writes_to_stderr)
                    }
                }
            }
        };

        let level = level.or(preset_level).unwrap_or_else(|| kind.default_level());
        let color = color.unwrap_or_else(|| Self::default_color(kind, writes_to_stderr));
        let encoder = Encoder::new(encoding, encoder_config.with_color(color));

        Ok(Arc::new(EncodedLog::new(level.as_level_filter(), encoder, destination)))
    }

    fn default_color(kind: Kind, writes_to_stderr: bool) -> bool {
        kind != Kind::Production && writes_to_stderr && std::io::stderr().is_terminal()
    }
}

/// Report a construction failure and end the process.
fn fail_fast(kind: Kind, error: &LoggerError) -> ! {
    eprintln!("[LOGGER FATAL] Failed to construct {} logger: {}", kind, error);
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!("prod".parse::<Kind>().unwrap(), Kind::Production);
        assert_eq!("Console".parse::<Kind>().unwrap(), Kind::Console);
        assert_eq!(Kind::Development.to_string(), "development");
        assert!("syslog".parse::<Kind>().is_err());
    }

    #[test]
    fn test_config_defaults_when_unset() {
        let config = PresetConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PresetConfig::default());
        assert_eq!(config.output, OutputPath::Stderr);
    }

    #[test]
    fn test_config_reads_level_and_output() {
        let config = PresetConfig::from_lookup(lookup(&[
            (LEVEL_ENV, "warn"),
            (OUTPUT_ENV, "/tmp/app.log"),
        ]))
        .unwrap();

        assert_eq!(config.level, Some(Level::Warn));
        assert_eq!(config.output, OutputPath::File(PathBuf::from("/tmp/app.log")));
    }

    #[test]
    fn test_config_rejects_bad_level() {
        let result = PresetConfig::from_lookup(lookup(&[(LEVEL_ENV, "loud")]));
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_production_fails_on_unopenable_output() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("app.log");
        let config = PresetConfig {
            level: None,
            output: OutputPath::File(missing),
        };

        let result = LoggerBuilder::new(Kind::Production).config(config).try_build();
        assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
    }

    #[test]
    fn test_development_fails_on_bad_env_level() {
        let config = PresetConfig::from_lookup(lookup(&[(LEVEL_ENV, "shout")]));
        assert!(config.is_err());
    }

    #[test]
    fn test_console_ignores_preset_config() {
        let broken = PresetConfig {
            level: None,
            output: OutputPath::File(PathBuf::from("/nonexistent/dir/app.log")),
        };

        let result = LoggerBuilder::new(Kind::Console)
            .destination(Box::new(std::io::sink()))
            .config(broken)
            .try_build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_levels() {
        assert_eq!(Kind::Development.default_level(), Level::Debug);
        assert_eq!(Kind::Console.default_level(), Level::Debug);
        assert_eq!(Kind::Production.default_level(), Level::Info);
    }

    #[test]
    fn test_production_never_colors() {
        assert!(!LoggerBuilder::default_color(Kind::Production, true));
        assert!(!LoggerBuilder::default_color(Kind::Console, false));
    }
}
