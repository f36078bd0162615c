//! Context values and their textual form.

use std::{borrow::Cow, collections::HashMap};
use tracing::warn;

/// Emitted in place of a value that has no textual form.
pub const SKIPPED_SENTINEL: &str = "<!--[skipped unknown type]-->";

/// Variables available to a single render, keyed by name.
pub type Context = HashMap<String, Value>;

/// A value that can be put into a template.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Anything else. The string names the original type for diagnostics.
    Opaque(String),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Text(s),
            toml::Value::Integer(i) => Self::Integer(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Boolean(b),
            // Templates have no way to walk these.
            other => Self::Opaque(other.type_str().to_owned()),
        }
    }
}

/// Build a [`Context`] from the top-level keys of a TOML document.
pub fn context_from_toml(src: &str) -> Result<Context, toml::de::Error> {
    let table: toml::Table = toml::from_str(src)?;
    Ok(table.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
}

/// Textual form of `value`, before any escaping.
///
/// Opaque values never fail the render: they become [`SKIPPED_SENTINEL`]
/// and a warning is logged.
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Text(s) => Cow::Borrowed(s),
        Value::Integer(i) => Cow::Owned(i.to_string()),
        Value::Float(f) => Cow::Owned(f.to_string()),
        Value::Boolean(b) => Cow::Owned(b.to_string()),
        Value::Opaque(kind) => {
            warn!(kind = %kind, "tried to templatize a value that is not text, number or boolean");
            Cow::Borrowed(SKIPPED_SENTINEL)
        }
    }
}
