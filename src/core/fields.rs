//! Structured key-value fields attached to a logger
//!
//! This module provides:
//! - `FieldValue`: the value side of a field
//! - `Field`: one key-value pair
//! - `Fields`: the ordered set a logger carries into every record

use log::kv::{self, Key, ToValue, Value, VisitSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Duration(d) => write!(f, "{:?}", d),
        }
    }
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Durations travel as their string form (`1.5s`), matching the string
/// duration encoding the presets use.
impl ToValue for FieldValue {
    fn to_value(&self) -> Value<'_> {
        match self {
            FieldValue::String(s) => Value::from(s.as_str()),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::Bool(b) => Value::from(*b),
            FieldValue::Duration(d) => Value::from_debug(d),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::Duration(d)
    }
}

/// A single key-value pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Ordered fields carried by a logger.
///
/// Keys are not deduplicated: a child that re-attaches a key emits both
/// the inherited and the new pair, in attachment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fields {
    fields: Vec<Field>,
}

impl Fields {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Pair up a flat token list `k1, v1, k2, v2, ...`.
    ///
    /// A pair whose key is not a string is kept under `invalid` as
    /// `key=value`. A trailing key with no value is kept under `ignored`.
    pub fn from_flat(tokens: &[FieldValue]) -> Self {
        let mut fields = Vec::with_capacity(tokens.len() / 2 + 1);
        let mut tokens = tokens.iter();
        while let Some(key) = tokens.next() {
            let Some(value) = tokens.next() else {
                fields.push(Field::new("ignored", key.clone()));
                break;
            };
            match key.as_str() {
                Some(k) => fields.push(Field::new(k, value.clone())),
                None => fields.push(Field::new("invalid", format!("{}={}", key, value))),
            }
        }
        Self { fields }
    }

    /// Copy of `self` with `extra` appended; `self` is left untouched.
    pub fn extended(&self, extra: &[Field]) -> Self {
        let mut fields = Vec::with_capacity(self.fields.len() + extra.len());
        fields.extend_from_slice(&self.fields);
        fields.extend_from_slice(extra);
        Self { fields }
    }

    pub fn as_slice(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Latest value attached under `key`.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.key == key)
            .map(|field| &field.value)
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(Field::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl kv::Source for Fields {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for field in &self.fields {
            visitor.visit_pair(Key::from_str(&field.key), field.value.to_value())?;
        }
        Ok(())
    }
}
