//! Record encoders for the preset sinks
//!
//! Three encodings are provided:
//! - Console: `label=value` pairs with the fixed console labels
//! - Text: tab separated, human oriented (development preset)
//! - Json: one object per line (production preset)

use super::timestamp::TimestampFormat;
use crate::core::Level;
use chrono::{DateTime, Utc};
use log::kv::{self, Key, Source, Value, VisitSource};
use log::Record;
use std::backtrace::{Backtrace, BacktraceStatus};

/// Reserved key that carries the severity of error-level records, so the
/// encoders can tell `ERROR` from `PANIC` and `FATAL`. The adapter emits it
/// as the first pair of every error-level record; encoders consume only
/// that leading pair and render any other `severity` as a plain field.
pub const SEVERITY_KEY: &str = "severity";

/// Output encoding for records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// `time=... level=WARN msg="disk low" key=value`
    #[default]
    Console,

    /// `2025-01-08T10:30:45.123Z\tWARN\tsrc/main.rs:10\tdisk low\t{"key":"value"}`
    Text,

    /// `{"level":"warn","ts":1736332245.123,"msg":"disk low","key":"value"}`
    Json,
}

/// How the level label is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelCase {
    #[default]
    Upper,
    Lower,
}

/// Field labels and rendering options shared by all encodings.
///
/// An empty label omits that element from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub message_key: String,
    pub level_key: String,
    pub time_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub function_key: String,
    pub stacktrace_key: String,
    pub timestamp: TimestampFormat,
    pub level_case: LevelCase,
    /// Colorize the level label (uppercase only)
    pub color: bool,
    /// Capture a backtrace for records at or above this level
    pub stacktrace_level: Option<Level>,
}

impl EncoderConfig {
    /// Labels used by the console preset: `msg level time logger caller fn
    /// stack`.
    pub fn console() -> Self {
        Self {
            message_key: "msg".to_string(),
            level_key: "level".to_string(),
            time_key: "time".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            function_key: "fn".to_string(),
            stacktrace_key: "stack".to_string(),
            timestamp: TimestampFormat::Console,
            level_case: LevelCase::Upper,
            color: false,
            stacktrace_level: Some(Level::Panic),
        }
    }

    pub fn development() -> Self {
        Self {
            timestamp: TimestampFormat::Iso8601,
            stacktrace_level: Some(Level::Warn),
            ..Self::console()
        }
    }

    pub fn production() -> Self {
        Self {
            time_key: "ts".to_string(),
            function_key: String::new(),
            stacktrace_key: "stacktrace".to_string(),
            timestamp: TimestampFormat::EpochSeconds,
            level_case: LevelCase::Lower,
            stacktrace_level: Some(Level::Error),
            ..Self::console()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::console()
    }
}

/// A typed field value pulled off a record
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn from_value(value: &Value<'_>) -> Self {
        if let Some(b) = value.to_bool() {
            Scalar::Bool(b)
        } else if let Some(i) = value.to_i64() {
            Scalar::Int(i)
        } else if let Some(u) = value.to_u64() {
            Scalar::Uint(u)
        } else if let Some(f) = value.to_f64() {
            Scalar::Float(f)
        } else if let Some(s) = value.to_borrowed_str() {
            Scalar::Str(s.to_string())
        } else {
            Scalar::Str(value.to_string())
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Str(s) => serde_json::Value::String(s.clone()),
            Scalar::Int(i) => serde_json::Value::Number((*i).into()),
            Scalar::Uint(u) => serde_json::Value::Number((*u).into()),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
        }
    }

    fn to_logfmt(&self) -> String {
        match self {
            Scalar::Str(s) => escape_logfmt_value(s),
            Scalar::Int(i) => i.to_string(),
            Scalar::Uint(u) => u.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Key-values of one record, with the reserved severity split off.
///
/// Only a leading `severity` pair on an error-level record names the
/// severity; any other pair with that key is an ordinary field.
struct Collected {
    record_level: log::Level,
    first: bool,
    severity: Option<Level>,
    fields: Vec<(String, Scalar)>,
}

impl Collected {
    fn new(record_level: log::Level) -> Self {
        Self {
            record_level,
            first: true,
            severity: None,
            fields: Vec::new(),
        }
    }

    fn reserved_severity(&self, key: &Key<'_>, value: &Value<'_>) -> Option<Level> {
        if !self.first || self.record_level != log::Level::Error || key.as_str() != SEVERITY_KEY {
            return None;
        }
        value
            .to_string()
            .parse::<Level>()
            .ok()
            .filter(|level| *level >= Level::Error)
    }
}

impl<'kvs> VisitSource<'kvs> for Collected {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        let reserved = self.reserved_severity(&key, &value);
        self.first = false;
        match reserved {
            Some(level) => self.severity = Some(level),
            None => self
                .fields
                .push((key.as_str().to_string(), Scalar::from_value(&value))),
        }
        Ok(())
    }
}

/// Turns `log::Record`s into single output lines (without terminator)
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    encoding: Encoding,
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(encoding: Encoding, config: EncoderConfig) -> Self {
        Self { encoding, config }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a record stamped with the current time
    pub fn encode(&self, record: &Record<'_>) -> String {
        self.encode_at(record, &Utc::now())
    }

    pub fn encode_at(&self, record: &Record<'_>, at: &DateTime<Utc>) -> String {
        let mut collected = Collected::new(record.level());
        if let Err(e) = record.key_values().visit(&mut collected) {
            collected
                .fields
                .push(("kv_error".to_string(), Scalar::Str(e.to_string())));
        }
        let level = collected
            .severity
            .unwrap_or_else(|| Level::from_log_level(record.level()));
        let parts = Parts {
            time: self.config.timestamp.format(at),
            level,
            name: record.target(),
            caller: Self::caller(record),
            function: record.module_path(),
            message: record.args().to_string(),
            stack: self.stack(level),
        };

        match self.encoding {
            Encoding::Console => self.format_console(&parts, &collected.fields),
            Encoding::Text => self.format_text(&parts, &collected.fields),
            Encoding::Json => self.format_json(&parts, at, &collected.fields),
        }
    }

    fn caller(record: &Record<'_>) -> Option<String> {
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => Some(format!("{}:{}", file, line)),
            (Some(file), None) => Some(file.to_string()),
            _ => None,
        }
    }

    fn stack(&self, level: Level) -> Option<String> {
        let threshold = self.config.stacktrace_level?;
        if level < threshold {
            return None;
        }
        let backtrace = Backtrace::capture();
        (backtrace.status() == BacktraceStatus::Captured).then(|| backtrace.to_string())
    }

    fn level_label(&self, level: Level) -> String {
        match self.config.level_case {
            LevelCase::Lower => level.to_lowercase_str().to_string(),
            LevelCase::Upper => self.colorize(level),
        }
    }

    #[cfg(feature = "console")]
    fn colorize(&self, level: Level) -> String {
        use colored::Colorize;
        if self.config.color {
            level.to_str().color(level.color_code()).to_string()
        } else {
            level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn colorize(&self, level: Level) -> String {
        level.to_str().to_string()
    }

    /// Format as `label=value` pairs
    fn format_console(&self, parts: &Parts<'_>, fields: &[(String, Scalar)]) -> String {
        let config = &self.config;
        let mut out = Vec::new();

        push_pair(&mut out, &config.time_key, escape_logfmt_value(&parts.time));
        push_pair(&mut out, &config.level_key, self.level_label(parts.level));
        if !parts.name.is_empty() {
            push_pair(&mut out, &config.name_key, escape_logfmt_value(parts.name));
        }
        if let Some(ref caller) = parts.caller {
            push_pair(&mut out, &config.caller_key, escape_logfmt_value(caller));
        }
        if let Some(function) = parts.function {
            push_pair(&mut out, &config.function_key, escape_logfmt_value(function));
        }
        // Message is always quoted
        push_pair(
            &mut out,
            &config.message_key,
            quote_logfmt_value(&parts.message),
        );
        for (key, value) in fields {
            out.push(format!("{}={}", escape_logfmt_key(key), value.to_logfmt()));
        }
        if let Some(ref stack) = parts.stack {
            push_pair(&mut out, &config.stacktrace_key, quote_logfmt_value(stack));
        }

        out.join(" ")
    }

    /// Format as tab separated text with a trailing JSON object of fields
    fn format_text(&self, parts: &Parts<'_>, fields: &[(String, Scalar)]) -> String {
        let config = &self.config;
        let mut out = Vec::new();

        if !config.time_key.is_empty() {
            out.push(parts.time.clone());
        }
        if !config.level_key.is_empty() {
            out.push(self.level_label(parts.level));
        }
        if !config.name_key.is_empty() && !parts.name.is_empty() {
            out.push(parts.name.to_string());
        }
        if !config.caller_key.is_empty() {
            if let Some(ref caller) = parts.caller {
                out.push(caller.clone());
            }
        }
        if !config.function_key.is_empty() {
            if let Some(function) = parts.function {
                out.push(function.to_string());
            }
        }
        out.push(sanitize_message(&parts.message));
        if !fields.is_empty() {
            out.push(fields_to_json(fields).to_string());
        }

        let mut line = out.join("\t");
        if !config.stacktrace_key.is_empty() {
            if let Some(ref stack) = parts.stack {
                line.push('\n');
                line.push_str(stack.trim_end());
            }
        }
        line
    }

    /// Format as a single-line JSON object
    fn format_json(
        &self,
        parts: &Parts<'_>,
        at: &DateTime<Utc>,
        fields: &[(String, Scalar)],
    ) -> String {
        let config = &self.config;
        let mut json_obj = serde_json::Map::new();

        insert_json(
            &mut json_obj,
            &config.level_key,
            serde_json::Value::String(self.level_label(parts.level)),
        );
        insert_json(&mut json_obj, &config.time_key, config.timestamp.to_json(at));
        if !parts.name.is_empty() {
            insert_json(
                &mut json_obj,
                &config.name_key,
                serde_json::Value::String(parts.name.to_string()),
            );
        }
        if let Some(ref caller) = parts.caller {
            insert_json(
                &mut json_obj,
                &config.caller_key,
                serde_json::Value::String(caller.clone()),
            );
        }
        if let Some(function) = parts.function {
            insert_json(
                &mut json_obj,
                &config.function_key,
                serde_json::Value::String(function.to_string()),
            );
        }
        insert_json(
            &mut json_obj,
            &config.message_key,
            serde_json::Value::String(parts.message.clone()),
        );
        for (key, value) in fields {
            json_obj.insert(key.clone(), value.to_json());
        }
        if let Some(ref stack) = parts.stack {
            insert_json(
                &mut json_obj,
                &config.stacktrace_key,
                serde_json::Value::String(stack.clone()),
            );
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }
}

/// The fixed elements of one record, ready for rendering
struct Parts<'a> {
    time: String,
    level: Level,
    name: &'a str,
    caller: Option<String>,
    function: Option<&'a str>,
    message: String,
    stack: Option<String>,
}

fn push_pair(out: &mut Vec<String>, key: &str, value: String) {
    if !key.is_empty() {
        out.push(format!("{}={}", key, value));
    }
}

fn insert_json(obj: &mut serde_json::Map<String, serde_json::Value>, key: &str, value: serde_json::Value) {
    if !key.is_empty() {
        obj.insert(key.to_string(), value);
    }
}

fn fields_to_json(fields: &[(String, Scalar)]) -> serde_json::Value {
    let obj = fields
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(obj)
}

/// Escape control characters so one record stays on one line
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Escape a logfmt key (remove spaces and special chars)
fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

/// Escape a logfmt value (quote if contains spaces)
fn escape_logfmt_value(value: &str) -> String {
    if value.is_empty() || value.contains([' ', '"', '=', '\n', '\r', '\t']) {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

/// Quote a logfmt value
fn quote_logfmt_value(value: &str) -> String {
    format!(
        "\"{}\"",
        value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    )
}
