//! Session variables attached to result rows and modifiers.
//!
//! A variable key can be in one of three states: absent from the map (the launcher
//! keeps whatever outer-scope value exists), [`VarValue::Set`], or
//! [`VarValue::Cleared`]. A cleared variable is written as JSON `null` and wipes any
//! outer-scope variable of the same name.

use std::collections::BTreeMap;

/// Value of a session variable that is present in a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VarValue {
    /// The variable is set to a string.
    Set(String),
    /// The variable is present with no value.
    Cleared,
}

impl VarValue {
    /// Returns the string value, or `None` for a cleared variable.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Set(value) => Some(value),
            Self::Cleared => None,
        }
    }
}

impl From<Option<String>> for VarValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Cleared, Self::Set)
    }
}

impl From<VarValue> for Option<String> {
    fn from(value: VarValue) -> Self {
        match value {
            VarValue::Set(value) => Some(value),
            VarValue::Cleared => None,
        }
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        Self::Set(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        Self::Set(value)
    }
}

/// Ordered map of variable names to values.
///
/// `BTreeMap` keeps serialization order stable between runs.
pub type Variables = BTreeMap<String, VarValue>;
