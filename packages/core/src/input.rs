//! # Directive Inputs
//!
//! Raw values bound to a directive's breakpoint-scoped inputs, and the
//! per-instance cache that stores them. No validation happens here; the
//! visibility engine interprets values permissively.

use crate::breakpoint::BreakpointKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A raw input value as bound by the host.
///
/// An empty [`InputValue::Text`] is the bare-attribute form (`<div fxHide>`).
/// An absent value is `None` wherever an `Option<InputValue>` appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl InputValue {
    pub fn text(value: impl Into<String>) -> Self {
        InputValue::Text(value.into())
    }

    /// The bare-attribute sentinel
    pub fn empty() -> Self {
        InputValue::Text(String::new())
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, InputValue::Text(text) if text.is_empty())
    }

    /// Membership in the falsy set `{"false", false, 0}`.
    ///
    /// Everything else, including the empty string, `"0"` and unknown text,
    /// counts as truthy.
    pub fn is_falsy(&self) -> bool {
        match self {
            InputValue::Bool(value) => !value,
            InputValue::Number(value) => *value == 0.0,
            InputValue::Text(text) => text == "false",
        }
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Bool(value)
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        InputValue::Number(f64::from(value))
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Bool(value) => write!(f, "{}", value),
            InputValue::Number(value) => write!(f, "{}", value),
            InputValue::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// Last-set raw value per breakpoint for one directive instance
#[derive(Debug, Clone, Default)]
pub struct InputCache {
    values: HashMap<BreakpointKey, InputValue>,
}

impl InputCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `key`, replacing any previous value
    pub fn set(&mut self, key: BreakpointKey, value: InputValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: BreakpointKey) -> Option<&InputValue> {
        self.values.get(&key)
    }

    /// Whether `key` was ever explicitly set, empty string included
    pub fn has(&self, key: BreakpointKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys with an explicit value, in table order
    pub fn keys(&self) -> Vec<BreakpointKey> {
        BreakpointKey::ALL
            .into_iter()
            .filter(|key| self.has(*key))
            .collect()
    }
}
