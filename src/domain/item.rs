//! Result row model.
//!
//! An [`Item`] is one selectable row in the launcher's result list. Only `title` is
//! required; every other display field is independently optional.

use super::modifier::{Mod, ModKey};
use super::variables::{VarValue, Variables};
use std::collections::BTreeMap;

/// One result row.
///
/// Fields are public for reading; values are built through chained setters that
/// consume `self`, so a shared base row can be cloned and specialized:
///
/// ```
/// use scriptfilter::{Item, Mod, ModKey};
///
/// let base = Item::new("Open repository").icon("icons/repo.png");
/// let row = base
///     .clone()
///     .subtitle("~/src/scriptfilter")
///     .arg("/Users/me/src/scriptfilter")
///     .modifier(ModKey::Cmd, Mod::new().subtitle("Reveal in Finder"));
///
/// assert_eq!(row.title, "Open repository");
/// assert!(base.subtitle.is_none());
/// assert!(row.mods.contains_key(&ModKey::Cmd));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub uid: Option<String>,
    pub subtitle: Option<String>,
    /// Text the launcher matches user input against; falls back to `title`.
    pub matching: Option<String>,
    pub arg: Option<String>,
    /// Icon path. Relative paths resolve against the workflow's install directory.
    pub icon: Option<String>,
    /// Text shown by the launcher's "large type" action.
    pub largetype: Option<String>,
    pub mods: BTreeMap<ModKey, Mod>,
    pub variables: Variables,
    /// When false, actioning the row does nothing.
    pub valid: bool,
    /// When false, the row is dropped from the output document entirely.
    pub visible: bool,
}

impl Item {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uid: None,
            subtitle: None,
            matching: None,
            arg: None,
            icon: None,
            largetype: None,
            mods: BTreeMap::new(),
            variables: Variables::new(),
            valid: true,
            visible: true,
        }
    }

    #[must_use]
    pub fn title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    #[must_use]
    pub fn uid(self, uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
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

    /// Overrides the text the launcher filters on.
    #[must_use]
    pub fn matching(self, text: impl Into<String>) -> Self {
        Self {
            matching: Some(text.into()),
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

    #[must_use]
    pub fn icon(self, path: impl Into<String>) -> Self {
        Self {
            icon: Some(path.into()),
            ..self
        }
    }

    #[must_use]
    pub fn largetype(self, text: impl Into<String>) -> Self {
        Self {
            largetype: Some(text.into()),
            ..self
        }
    }

    /// Attaches a modifier override, replacing any previous one for `key`.
    #[must_use]
    pub fn modifier(mut self, key: ModKey, modifier: Mod) -> Self {
        self.mods.insert(key, modifier);
        self
    }

    /// Sets a session variable. `None` or [`VarValue::Cleared`] emits `null`.
    #[must_use]
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn valid_if(self, valid: bool) -> Self {
        Self { valid, ..self }
    }

    /// Hides the row when `hidden` holds.
    #[must_use]
    pub fn hide_when(self, hidden: bool) -> Self {
        Self {
            visible: !hidden,
            ..self
        }
    }

    /// Text the launcher matches against: `matching` if set, else `title`.
    #[must_use]
    pub fn match_text(&self) -> &str {
        self.matching.as_deref().unwrap_or(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_has_only_a_title() {
        let item = Item::new("Hello world!");
        assert_eq!(item.title, "Hello world!");
        assert!(item.uid.is_none());
        assert!(item.subtitle.is_none());
        assert!(item.matching.is_none());
        assert!(item.arg.is_none());
        assert!(item.icon.is_none());
        assert!(item.largetype.is_none());
        assert!(item.mods.is_empty());
        assert!(item.variables.is_empty());
        assert!(item.valid);
        assert!(item.visible);
    }

    #[test]
    fn setters_read_back() {
        let item = Item::new("t")
            .uid("u")
            .subtitle("s")
            .matching("m")
            .arg("a")
            .icon("i.png")
            .largetype("big")
            .valid_if(false);
        assert_eq!(item.uid.as_deref(), Some("u"));
        assert_eq!(item.subtitle.as_deref(), Some("s"));
        assert_eq!(item.matching.as_deref(), Some("m"));
        assert_eq!(item.arg.as_deref(), Some("a"));
        assert_eq!(item.icon.as_deref(), Some("i.png"));
        assert_eq!(item.largetype.as_deref(), Some("big"));
        assert!(!item.valid);
    }

    #[test]
    fn hide_when_inverts_into_visible() {
        assert!(!Item::new("x").hide_when(true).visible);
        assert!(Item::new("x").hide_when(false).visible);
    }

    #[test]
    fn modifier_replaces_existing_key() {
        let item = Item::new("x")
            .modifier(ModKey::Cmd, Mod::new().arg("first"))
            .modifier(ModKey::Cmd, Mod::new().arg("second"));
        assert_eq!(item.mods.len(), 1);
        assert_eq!(item.mods[&ModKey::Cmd].arg.as_deref(), Some("second"));
    }

    #[test]
    fn modifier_variables_do_not_inherit_item_variables() {
        let item = Item::new("x")
            .variable("shared", "outer")
            .modifier(ModKey::Opt, Mod::new());
        assert!(item.mods[&ModKey::Opt].variables.is_empty());
    }

    #[test]
    fn match_text_falls_back_to_title() {
        assert_eq!(Item::new("Title").match_text(), "Title");
        assert_eq!(Item::new("Title").matching("alias").match_text(), "alias");
    }
}
