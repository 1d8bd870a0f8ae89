//! Wire records for the launcher's JSON schema.
//!
//! These types mirror the document format byte-for-byte and are kept separate from
//! the domain records so the JSON shape (renamed keys, nested `icon`/`text` objects,
//! omitted optionals) never leaks into the builder API.
//!
//! # Document Format
//!
//! ```json
//! {
//!   "skipknowledge": true,
//!   "items": [
//!     {
//!       "title": "Hello world!",
//!       "subtitle": "optional",
//!       "icon": { "path": "icon.png" },
//!       "text": { "largetype": "optional" },
//!       "variables": { "cleared": null },
//!       "mods": { "cmd": { "valid": true, "variables": {} } },
//!       "valid": true,
//!       "visible": true
//!     }
//!   ],
//!   "cache": { "seconds": 60, "loosereload": false }
//! }
//! ```

use crate::domain::{Item, Items, Mod, ModKey, ScriptFilterError, VarValue, Variables};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

const fn default_true() -> bool {
    true
}

/// `{"path": ...}` icon object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub path: String,
}

/// `{"largetype": ...}` text object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub largetype: String,
}

/// `{"seconds": ..., "loosereload": ...}` cache directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub seconds: u64,
    #[serde(default)]
    pub loosereload: bool,
}

/// Variables as written on the wire: `null` marks a cleared variable.
pub type VariablesRecord = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRecord>,
    pub valid: bool,
    pub variables: VariablesRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matching: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextRecord>,
    pub variables: VariablesRecord,
    #[serde(default)]
    pub mods: BTreeMap<ModKey, ModRecord>,
    pub valid: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsRecord {
    #[serde(default = "default_true")]
    pub skipknowledge: bool,
    pub items: Vec<ItemRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheRecord>,
}

fn variables_to_record(variables: &Variables) -> VariablesRecord {
    variables
        .iter()
        .map(|(key, value)| (key.clone(), value.as_deref().map(String::from)))
        .collect()
}

fn variables_from_record(record: VariablesRecord) -> Variables {
    record
        .into_iter()
        .map(|(key, value)| (key, VarValue::from(value)))
        .collect()
}

impl From<&Mod> for ModRecord {
    fn from(m: &Mod) -> Self {
        Self {
            title: m.title.clone(),
            subtitle: m.subtitle.clone(),
            arg: m.arg.clone(),
            icon: m.icon.clone().map(|path| IconRecord { path }),
            valid: m.valid,
            variables: variables_to_record(&m.variables),
        }
    }
}

impl From<ModRecord> for Mod {
    fn from(record: ModRecord) -> Self {
        Self {
            title: record.title,
            subtitle: record.subtitle,
            arg: record.arg,
            icon: record.icon.map(|icon| icon.path),
            valid: record.valid,
            variables: variables_from_record(record.variables),
        }
    }
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            uid: item.uid.clone(),
            subtitle: item.subtitle.clone(),
            matching: item.matching.clone(),
            arg: item.arg.clone(),
            icon: item.icon.clone().map(|path| IconRecord { path }),
            text: item
                .largetype
                .clone()
                .map(|largetype| TextRecord { largetype }),
            variables: variables_to_record(&item.variables),
            mods: item
                .mods
                .iter()
                .map(|(key, m)| (*key, ModRecord::from(m)))
                .collect(),
            valid: item.valid,
            visible: item.visible,
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            title: record.title,
            uid: record.uid,
            subtitle: record.subtitle,
            matching: record.matching,
            arg: record.arg,
            icon: record.icon.map(|icon| icon.path),
            largetype: record.text.map(|text| text.largetype),
            mods: record
                .mods
                .into_iter()
                .map(|(key, m)| (key, Mod::from(m)))
                .collect(),
            variables: variables_from_record(record.variables),
            valid: record.valid,
            visible: record.visible,
        }
    }
}

impl From<&Items> for ItemsRecord {
    /// Applies the one-way render transform: hidden rows are dropped and the
    /// title sort is applied before the rows are recorded.
    fn from(items: &Items) -> Self {
        Self {
            skipknowledge: items.skip_knowledge,
            items: items.rendered_items().map(ItemRecord::from).collect(),
            cache: items.cache_ttl().map(|ttl| CacheRecord {
                seconds: ttl.as_secs(),
                loosereload: items.loose_reload(),
            }),
        }
    }
}

impl ItemsRecord {
    /// Rebuilds the domain document.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptFilterError::MalformedDocument`] if the cache TTL lies
    /// outside the range the launcher accepts.
    pub fn into_items(self) -> crate::domain::Result<Items> {
        let items = Items::new(self.items.into_iter().map(Item::from).collect())
            .skip_knowledge(self.skipknowledge);

        match self.cache {
            Some(cache) => {
                let items = items
                    .cache(Duration::from_secs(cache.seconds))
                    .map_err(|e| ScriptFilterError::MalformedDocument(e.to_string()))?;
                Ok(if cache.loosereload {
                    items.enable_loose_reload()
                } else {
                    items
                })
            }
            None => Ok(items),
        }
    }
}
