// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Value types shared by all memory accessors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Address of an object in the inspected process. Address 0 is `NULL`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Handle(pub u64);

impl Handle {
    /// The null pointer
    pub const NULL: Handle = Handle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Parse an address literal: `0x`-prefixed hex or plain decimal
    pub fn parse_literal(text: &str) -> Option<Handle> {
        let text = text.trim();
        if let Some(hex) = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
        {
            return u64::from_str_radix(hex, 16).ok().map(Handle);
        }
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return text.parse().ok().map(Handle);
        }
        None
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<u64> for Handle {
    fn from(address: u64) -> Self {
        Handle(address)
    }
}

/// A handle that has been cast to a concrete struct type.
///
/// Fields can only be read through a `TaggedNode`, so every read carries the
/// layout it is interpreted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedNode {
    handle: Handle,
    type_name: String,
}

impl TaggedNode {
    pub fn new(handle: Handle, type_name: impl Into<String>) -> Self {
        Self {
            handle,
            type_name: type_name.into(),
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A typed value read from a struct field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    /// Enum constant, e.g. `T_SeqScan` or `RTE_RELATION`
    Enum(String),
    Ptr(Handle),
}

impl FieldValue {
    /// Build an enum constant value
    pub fn label(name: impl Into<String>) -> Self {
        FieldValue::Enum(name.into())
    }

    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Char(_) => "char",
            FieldValue::Enum(_) => "enum",
            FieldValue::Ptr(_) => "pointer",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Bool(b) => Some(i64::from(*b)),
            FieldValue::Char(c) => Some(i64::from(u32::from(*c))),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// C booleans are stored as `char`; only the value 1 counts as true.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            other => other.as_int().map(|v| v == 1),
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            FieldValue::Char(c) => Some(*c),
            FieldValue::Int(v) => u8::try_from(*v).ok().map(char::from),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            FieldValue::Enum(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            FieldValue::Ptr(handle) => Some(*handle),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Char(c) => write!(f, "{}", c),
            FieldValue::Enum(name) => write!(f, "{}", name),
            FieldValue::Ptr(handle) => write!(f, "{}", handle),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::Char(c)
    }
}

impl From<Handle> for FieldValue {
    fn from(handle: Handle) -> Self {
        FieldValue::Ptr(handle)
    }
}

/// Errors raised while reading the inspected memory
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("Cannot access memory at address {0}")]
    InvalidAddress(Handle),

    #[error("There is no member named {field} in {type_name}")]
    MissingField { type_name: String, field: String },

    #[error("Field {field} holds a {found} value, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("No symbol \"{0}\" in current context")]
    UnknownSymbol(String),

    #[error("Index {index} out of bounds for array at {array}")]
    IndexOutOfBounds { array: Handle, index: usize },

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<std::io::Error> for AccessError {
    fn from(err: std::io::Error) -> Self {
        AccessError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        AccessError::DeserializationError(err.to_string())
    }
}

pub type AccessResult<T> = Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(Handle::parse_literal("0x1f"), Some(Handle(31)));
        assert_eq!(Handle::parse_literal(" 4096 "), Some(Handle(4096)));
        assert_eq!(Handle::parse_literal("0x0"), Some(Handle::NULL));
        assert_eq!(Handle::parse_literal("plan"), None);
        assert_eq!(Handle::parse_literal("0xzz"), None);
        assert_eq!(Handle::parse_literal(""), None);
    }

    #[test]
    fn test_flag_only_accepts_one() {
        assert_eq!(FieldValue::Int(1).as_flag(), Some(true));
        assert_eq!(FieldValue::Int(2).as_flag(), Some(false));
        assert_eq!(FieldValue::Int(0).as_flag(), Some(false));
        assert_eq!(FieldValue::Bool(true).as_flag(), Some(true));
        assert_eq!(FieldValue::Char('\u{1}').as_flag(), Some(true));
        assert_eq!(FieldValue::label("true").as_flag(), None);
    }

    #[test]
    fn test_char_conversion() {
        assert_eq!(FieldValue::Char('r').as_char(), Some('r'));
        assert_eq!(FieldValue::Int(114).as_char(), Some('r'));
        assert_eq!(FieldValue::Int(-1).as_char(), None);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(FieldValue::from(7_i64), FieldValue::Int(7));
        assert_eq!(FieldValue::from(1.5_f64), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from(true).as_flag(), Some(true));
        assert_eq!(FieldValue::from('r').as_char(), Some('r'));
        assert_eq!(FieldValue::from(Handle(0x40)).as_handle(), Some(Handle(0x40)));
        assert_eq!(FieldValue::label("CMD_SELECT").as_label(), Some("CMD_SELECT"));
        assert_eq!(FieldValue::Int(1).as_label(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Float(10.0).to_string(), "10");
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::label("RTE_RELATION").to_string(), "RTE_RELATION");
        assert_eq!(FieldValue::Ptr(Handle(0x1000)).to_string(), "0x1000");
    }

    #[test]
    fn test_field_value_json_shape() {
        let value: FieldValue = serde_json::from_str(r#"{"enum": "T_Var"}"#).unwrap();
        assert_eq!(value, FieldValue::label("T_Var"));

        let value: FieldValue = serde_json::from_str(r#"{"ptr": 4096}"#).unwrap();
        assert_eq!(value, FieldValue::Ptr(Handle(4096)));
    }
}
