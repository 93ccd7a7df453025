//! Core model types for named statistics.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The two statistic kinds.
///
/// The kind is fixed at registration time and never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Holds an arbitrary payload, mutated only by absolute replacement.
    Value,
    /// Holds a signed 64-bit integer, mutated only by relative increments.
    Counter,
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StatKind::Value => write!(f, "value"),
            StatKind::Counter => write!(f, "counter"),
        }
    }
}

/// The payload of a value statistic, and the uniform shape all reads return.
///
/// A freshly registered (or reset) value statistic holds [`StatValue::Null`]
/// until the first `update`. Counters read back as [`StatValue::Integer`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StatValue {
    /// No payload has been set yet.
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Bytes(Bytes),
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StatValue::Null => write!(f, "null"),
            StatValue::Integer(n) => write!(f, "{}", n),
            StatValue::Float(x) => write!(f, "{}", x),
            StatValue::Boolean(b) => write!(f, "{}", b),
            StatValue::Text(s) => write!(f, "{}", s),
            StatValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for StatValue {
    fn from(n: i64) -> Self {
        StatValue::Integer(n)
    }
}

impl From<i32> for StatValue {
    fn from(n: i32) -> Self {
        StatValue::Integer(n as i64)
    }
}

impl From<u32> for StatValue {
    fn from(n: u32) -> Self {
        StatValue::Integer(n as i64)
    }
}

impl From<f64> for StatValue {
    fn from(x: f64) -> Self {
        StatValue::Float(x)
    }
}

impl From<f32> for StatValue {
    fn from(x: f32) -> Self {
        StatValue::Float(x as f64)
    }
}

impl From<bool> for StatValue {
    fn from(b: bool) -> Self {
        StatValue::Boolean(b)
    }
}

impl From<&str> for StatValue {
    fn from(s: &str) -> Self {
        StatValue::Text(s.to_string())
    }
}

impl From<String> for StatValue {
    fn from(s: String) -> Self {
        StatValue::Text(s)
    }
}

impl From<Bytes> for StatValue {
    fn from(b: Bytes) -> Self {
        StatValue::Bytes(b)
    }
}

impl From<Vec<u8>> for StatValue {
    fn from(b: Vec<u8>) -> Self {
        StatValue::Bytes(Bytes::from(b))
    }
}

/// Tagged statistic state, as stored by a backend.
///
/// The kind is the discriminant: a counter can never hold a non-integer
/// payload and a value statistic can never be incremented. Backends keep one
/// `Statistic` per registered name and go through the methods below, which
/// refuse the wrong variant instead of coercing it.
#[derive(Clone, Debug, PartialEq)]
pub enum Statistic {
    Counter(i64),
    Value(StatValue),
}

impl Statistic {
    /// Fresh state for a newly registered statistic: counters start at 0,
    /// value statistics start at [`StatValue::Null`].
    pub fn new(kind: StatKind) -> Self {
        match kind {
            StatKind::Counter => Statistic::Counter(0),
            StatKind::Value => Statistic::Value(StatValue::Null),
        }
    }

    pub fn kind(&self) -> StatKind {
        match self {
            Statistic::Counter(_) => StatKind::Counter,
            Statistic::Value(_) => StatKind::Value,
        }
    }

    /// The current value. Counters read back as [`StatValue::Integer`].
    pub fn current(&self) -> StatValue {
        match self {
            Statistic::Counter(n) => StatValue::Integer(*n),
            Statistic::Value(v) => v.clone(),
        }
    }

    /// Applies a relative delta and returns the new value, or `None` if this
    /// statistic is not a counter. Wraps on i64 overflow.
    pub fn increment(&mut self, delta: i64) -> Option<i64> {
        match self {
            Statistic::Counter(n) => {
                *n = n.wrapping_add(delta);
                Some(*n)
            }
            Statistic::Value(_) => None,
        }
    }

    /// Replaces the payload. Returns `false` if this statistic is not a value
    /// statistic (counters only move by increments).
    pub fn update(&mut self, value: StatValue) -> bool {
        match self {
            Statistic::Value(v) => {
                *v = value;
                true
            }
            Statistic::Counter(_) => false,
        }
    }

    /// Restores the kind-appropriate neutral value: 0 for counters,
    /// [`StatValue::Null`] for value statistics.
    pub fn reset(&mut self) {
        match self {
            Statistic::Counter(n) => *n = 0,
            Statistic::Value(v) => *v = StatValue::Null,
        }
    }
}

/// One row of a registry snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct StatEntry {
    pub name: String,
    pub value: StatValue,
}

impl StatEntry {
    pub fn new(name: impl Into<String>, value: impl Into<StatValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
