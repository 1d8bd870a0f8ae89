//! Modifier-key overrides for result rows.
//!
//! When the user holds a modifier key while a row is selected, the launcher swaps in
//! the fields of the matching [`Mod`]. A `Mod` is self-contained: it never inherits
//! the parent item's variables.

use super::variables::{VarValue, Variables};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five modifier keys the launcher recognizes.
///
/// Serialized as the lowercase names `fn`, `ctrl`, `opt`, `cmd`, `shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModKey {
    Fn,
    Ctrl,
    Opt,
    Cmd,
    Shift,
}

impl ModKey {
    pub const ALL: [Self; 5] = [Self::Fn, Self::Ctrl, Self::Opt, Self::Cmd, Self::Shift];

    /// Wire name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fn => "fn",
            Self::Ctrl => "ctrl",
            Self::Opt => "opt",
            Self::Cmd => "cmd",
            Self::Shift => "shift",
        }
    }
}

impl fmt::Display for ModKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Override applied while a modifier key is held.
///
/// Built with chained setters that consume and return the value:
///
/// ```
/// use scriptfilter::Mod;
///
/// let alt = Mod::new()
///     .subtitle("Open in browser")
///     .arg("https://example.com")
///     .variable("mode", "browser");
/// assert_eq!(alt.arg.as_deref(), Some("https://example.com"));
/// assert!(alt.valid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mod {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub arg: Option<String>,
    pub icon: Option<String>,
    pub valid: bool,
    pub variables: Variables,
}

impl Default for Mod {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            arg: None,
            icon: None,
            valid: true,
            variables: Variables::new(),
        }
    }
}

impl Mod {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }

    #[must_use]
    pub fn subtitle(self, subtitle: impl Into<String>) -> Self {
        Self {
            subtitle: Some(subtitle.into()),
            ..self
        }
    }

    #[must_use]
    pub fn arg(self, arg: impl Into<String>) -> Self {
        Self {
            arg: Some(arg.into()),
            ..self
        }
    }

    /// Sets the icon path. Relative paths resolve against the workflow directory.
    #[must_use]
    pub fn icon(self, path: impl Into<String>) -> Self {
        Self {
            icon: Some(path.into()),
            ..self
        }
    }

    /// Sets a session variable.
    ///
    /// Accepts a string for a set value, or `None`/[`VarValue::Cleared`] to emit
    /// the variable as `null`.
    #[must_use]
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Marks the modifier actionable only when `valid` holds.
    #[must_use]
    pub fn valid_if(self, valid: bool) -> Self {
        Self { valid, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_empty() {
        let m = Mod::new();
        assert!(m.valid);
        assert!(m.title.is_none());
        assert!(m.variables.is_empty());
    }

    #[test]
    fn setters_leave_the_original_untouched() {
        let base = Mod::new().title("base");
        let changed = base.clone().title("changed").valid_if(false);
        assert_eq!(base.title.as_deref(), Some("base"));
        assert!(base.valid);
        assert_eq!(changed.title.as_deref(), Some("changed"));
        assert!(!changed.valid);
    }

    #[test]
    fn variable_accepts_cleared_values() {
        let m = Mod::new()
            .variable("a", "1")
            .variable("b", None::<String>)
            .variable("c", Some("3".to_string()));
        assert_eq!(m.variables["a"], VarValue::Set("1".into()));
        assert_eq!(m.variables["b"], VarValue::Cleared);
        assert_eq!(m.variables["c"], VarValue::Set("3".into()));
    }

    #[test]
    fn key_names_match_wire_names() {
        let names: Vec<&str> = ModKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["fn", "ctrl", "opt", "cmd", "shift"]);
        assert_eq!(serde_json::to_string(&ModKey::Cmd).unwrap(), "\"cmd\"");
    }
}
