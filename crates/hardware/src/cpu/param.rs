//! Typed CPU parameters.
//!
//! This module implements the value layer under every CPU variant. It provides:
//! 1. **Raw input:** `RawValue`, what a user or configuration file hands in (bool, int, or string).
//! 2. **Coercion:** `ParamKind::coerce`, turning raw input into a checked `ParamValue`.
//! 3. **Declaration:** `ParamSpec`, a named parameter with its kind and optional render override.
//! 4. **Storage:** `ParameterSet`, the defined/undefined map owned by a CPU.
//!
//! A value only ever reaches a `ParameterSet` after coercion succeeded, so a stored
//! value is always in range.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Unchecked parameter input.
///
/// Configuration files and command lines deliver strings; programmatic callers
/// usually pass native booleans and integers. Both are accepted and coerced by the
/// parameter's [`ParamKind`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Native boolean.
    Bool(bool),
    /// Native integer (may be negative; range checks happen during coercion).
    Int(i64),
    /// String to be parsed according to the parameter kind.
    Str(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A checked parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Non-negative integer.
    Int(u64),
    /// String from the parameter's allowed domain.
    Str(String),
}

impl ParamValue {
    /// Returns the boolean if this is a flag.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is a count.
    pub const fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string if this is a choice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Default textual form for the template layer.
    ///
    /// Booleans render as `"1"`/`"0"`, integers as decimal, strings verbatim.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(true) => "1".to_owned(),
            Self::Bool(false) => "0".to_owned(),
            Self::Int(i) => i.to_string(),
            Self::Str(s) => s.clone(),
        }
    }
}

/// Coercion rule attached to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Accepts `true`/`false`, `0`/`1`, and their string forms (case-insensitive).
    Bool,
    /// Accepts non-negative integers, optionally capped at `max` (inclusive).
    Int {
        /// Largest accepted value, if bounded.
        max: Option<u64>,
    },
    /// Accepts strings. When `allowed` is non-empty the value must match one entry
    /// case-insensitively and is stored in the entry's canonical spelling.
    Str {
        /// Accepted values; empty means unrestricted.
        allowed: &'static [&'static str],
    },
}

impl ParamKind {
    /// Coerces a raw input into a checked value.
    ///
    /// # Arguments
    ///
    /// * `param` - Parameter name, used in error messages.
    /// * `raw` - The unchecked input.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameterValue` naming the parameter and the
    /// offending input.
    pub fn coerce(self, param: &str, raw: &RawValue) -> Result<ParamValue, ConfigError> {
        match self {
            Self::Bool => coerce_bool(param, raw).map(ParamValue::Bool),
            Self::Int { max } => coerce_int(param, raw, max).map(ParamValue::Int),
            Self::Str { allowed } => coerce_str(param, raw, allowed).map(ParamValue::Str),
        }
    }
}

fn coerce_bool(param: &str, raw: &RawValue) -> Result<bool, ConfigError> {
    const REASON: &str = "must be 0, 1, true, or false";
    match raw {
        RawValue::Bool(b) => Ok(*b),
        RawValue::Int(0) => Ok(false),
        RawValue::Int(1) => Ok(true),
        RawValue::Str(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConfigError::invalid_value(param, raw, REASON)),
        },
        RawValue::Int(_) => Err(ConfigError::invalid_value(param, raw, REASON)),
    }
}

fn coerce_int(param: &str, raw: &RawValue, max: Option<u64>) -> Result<u64, ConfigError> {
    let signed = match raw {
        RawValue::Int(i) => *i,
        RawValue::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::invalid_value(param, raw, "must be a number"))?,
        RawValue::Bool(_) => {
            return Err(ConfigError::invalid_value(param, raw, "must be a number"));
        }
    };

    let value = u64::try_from(signed)
        .map_err(|_| ConfigError::invalid_value(param, raw, "must be a non-negative number"))?;

    match max {
        Some(max) if value > max => Err(ConfigError::invalid_value(
            param,
            raw,
            format!("must be at most {max}"),
        )),
        _ => Ok(value),
    }
}

fn coerce_str(
    param: &str,
    raw: &RawValue,
    allowed: &'static [&'static str],
) -> Result<String, ConfigError> {
    let text = raw.to_string();
    if allowed.is_empty() {
        return Ok(text);
    }
    allowed
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(&text))
        .map(|canonical| (*canonical).to_owned())
        .ok_or_else(|| {
            ConfigError::invalid_value(param, raw, format!("must be one of {}", allowed.join(", ")))
        })
}

/// Declaration of a single CPU parameter.
///
/// Variants list their parameters as static tables of `ParamSpec`. The optional
/// render override replaces [`ParamValue::render`] for this parameter only.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Parameter name, as accepted from configuration input.
    pub name: &'static str,
    /// Coercion rule.
    pub kind: ParamKind,
    /// Custom textual form for the template layer.
    pub render: Option<fn(&ParamValue) -> String>,
}

impl ParamSpec {
    /// Declares a boolean parameter.
    pub const fn flag(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Bool,
            render: None,
        }
    }

    /// Declares an unbounded non-negative integer parameter.
    pub const fn count(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Int { max: None },
            render: None,
        }
    }

    /// Declares a non-negative integer parameter capped at `max` (inclusive).
    pub const fn bounded(name: &'static str, max: u64) -> Self {
        Self {
            name,
            kind: ParamKind::Int { max: Some(max) },
            render: None,
        }
    }

    /// Declares a string parameter restricted to `allowed` (empty: unrestricted).
    pub const fn choice(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: ParamKind::Str { allowed },
            render: None,
        }
    }

    /// Attaches a render override.
    pub const fn with_render(self, render: fn(&ParamValue) -> String) -> Self {
        Self {
            render: Some(render),
            ..self
        }
    }

    /// Renders a value of this parameter for the template layer.
    pub fn render_value(&self, value: &ParamValue) -> String {
        self.render
            .map_or_else(|| value.render(), |render| render(value))
    }
}

/// Defined parameter values of one CPU.
///
/// A key that is absent is *undefined*. That state is distinct from any defined
/// value, including `false` and `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// Creates an empty set (every parameter undefined).
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerces `raw` according to `spec` and stores it.
    ///
    /// `None` leaves the parameter undefined and clears any previous value.
    ///
    /// # Arguments
    ///
    /// * `spec` - Declaration of the parameter being set.
    /// * `raw` - Unchecked input, or `None` for "not provided".
    ///
    /// # Errors
    ///
    /// The coercion error. On error the set is unchanged.
    pub fn set(&mut self, spec: &ParamSpec, raw: Option<&RawValue>) -> Result<(), ConfigError> {
        match raw {
            Some(raw) => {
                let value = spec.kind.coerce(spec.name, raw)?;
                let _ = self.values.insert(spec.name.to_owned(), value);
            }
            None => {
                let _ = self.values.remove(spec.name);
            }
        }
        Ok(())
    }

    /// Returns the value of `name`, if defined.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Returns whether `name` holds a value.
    pub fn is_defined(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates over defined parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of defined parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no parameter is defined.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
