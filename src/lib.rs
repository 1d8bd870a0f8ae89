//! Scriptfilter: helpers for writing launcher script filters in Rust.
//!
//! A script filter is a small program the launcher runs on every keystroke. It
//! receives the user's query as arguments and answers with one JSON document on
//! standard output describing the rows to display. This crate provides:
//! - A typed model of that document ([`Item`], [`Mod`], [`Items`])
//! - A codec for the launcher's exact JSON schema
//! - A dispatch boundary that turns any outcome, including failures and panics,
//!   into a valid document
//! - Collaborators for the common chores: a TTL file cache, environment
//!   configuration, update checks, notifications and query tokenizing

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Script filter binary (main.rs / user crates)       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Error boundary
//! │  - Matcher evaluation and routing                   │
//! │  - Failure / fault classification                   │
//! │  - Update-check wrapper                             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Codec         │   │ Storage Layer │   │ Infrastructure│
//! │ (codec/)      │   │ (storage/)    │   │ (infra../)    │
//! │ - Wire records│   │ - TTL cache   │   │ - Releases    │
//! │ - JSON I/O    │   │ - Cached docs │   │ - Notifier    │
//! │               │   │               │   │ - Paths, words│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │  ← Pure values
//! │  - Items, Item, Mod, ModKey, VarValue               │
//! │  - Error types (domain/error)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber (stderr in debug mode)        │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Dispatch boundary, failure signal, router
//! - [`codec`]: JSON wire format
//! - [`domain`]: Core document types and errors
//! - [`infrastructure`]: Paths, releases, notifications, tokenizer
//! - [`storage`]: File cache for memoizing documents between runs
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! The launcher passes workflow metadata through environment variables, read by
//! [`Config::from_env`]. Set `alfred_debug=1` (the launcher does this when its
//! debugger is open) to get debug logs on standard error.
//!
//! # Example
//!
//! ```no_run
//! use scriptfilter::{app, fail, Item, Items, ModKey, Mod};
//!
//! fn main() -> scriptfilter::Result<()> {
//!     app::run(|args| match args {
//!         [] => Some(Ok(Items::new(vec![
//!             Item::new("Open docs")
//!                 .arg("https://docs.rs")
//!                 .modifier(ModKey::Cmd, Mod::new().subtitle("Copy link instead")),
//!         ])
//!         .into())),
//!         ["greet", name] => Some(Ok(Item::new(format!("Hello, {name}!")).into())),
//!         ["greet"] => Some(fail("Who should I greet?", "Type a name")),
//!         _ => None,
//!     })
//! }
//! ```
//!
//! # Key Design Decisions
//!
//! ## One Document Per Run
//!
//! The launcher reads standard output to the end and parses it as a single JSON
//! document. Everything the matcher produces is rendered to a string first and
//! written in one go, so a failure midway never leaves half a document behind.
//!
//! ## Failures Are Rows
//!
//! An error the user cannot see is an error the user cannot report. Anything that
//! goes wrong inside the matcher is turned into a row: a [`Failure`] shows its own
//! message, anything else shows a generic title with the full error chain in
//! large type (Cmd+L).
//!
//! ## Builders By Value
//!
//! Rows are assembled with chained setters that consume and return the record.
//! The records are also plain structs with public fields, for code that prefers
//! to mutate.

pub mod app;
pub mod codec;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;

pub use app::{fail, run, Failure, Outcome, Output, Router};
pub use domain::{
    Item, Items, Mod, ModKey, Result, ScriptFilterError, VarValue, Variables, MAX_CACHE_TTL,
    MIN_CACHE_TTL,
};
pub use infrastructure::{notify, tokenize, UpdateChecker};
pub use storage::{cached_items, Cache, FileCache};

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Workflow configuration read from the launcher's environment.
///
/// Every field is optional: a script run by hand outside the launcher still gets
/// a usable configuration with conventional directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Display name of the workflow (`alfred_workflow_name`).
    pub workflow_name: Option<String>,

    /// Version string of the workflow (`alfred_workflow_version`).
    ///
    /// Compared against the latest release by the update check.
    pub workflow_version: Option<String>,

    /// Bundle identifier (`alfred_workflow_bundleid`), used to derive default
    /// cache and data directories.
    pub bundle_id: Option<String>,

    /// Whether the launcher's debugger is open (`alfred_debug` is `1` or `true`).
    pub debug: bool,

    /// Cache directory exported by the launcher (`alfred_workflow_cache`).
    pub cache_dir: Option<PathBuf>,

    /// Data directory exported by the launcher (`alfred_workflow_data`).
    pub data_dir: Option<PathBuf>,

    /// Location of the launcher's preferences (`alfred_preferences`).
    pub preferences: Option<PathBuf>,

    /// Also write logs to a rotating file in the cache directory
    /// (`scriptfilter_log_file` is `1` or `true`).
    pub log_to_file: bool,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Variables that are not valid UTF-8 are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let vars: BTreeMap<String, String> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::from_vars(&vars)
    }

    /// Parses configuration from a variable map.
    ///
    /// # Parsing Rules
    ///
    /// - Empty values count as unset
    /// - Flags (`alfred_debug`, `scriptfilter_log_file`) are on for `1` or `true`
    /// - Paths have a leading `~` expanded
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::path::PathBuf;
    /// use scriptfilter::Config;
    ///
    /// let mut vars = BTreeMap::new();
    /// vars.insert("alfred_debug".to_string(), "1".to_string());
    /// vars.insert("alfred_workflow_cache".to_string(), "/tmp/wf-cache".to_string());
    ///
    /// let config = Config::from_vars(&vars);
    /// assert!(config.debug);
    /// assert_eq!(config.cache_dir(), PathBuf::from("/tmp/wf-cache"));
    /// ```
    #[must_use]
    pub fn from_vars(vars: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let flag = |key: &str| {
            get(key).is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        };
        let path = |key: &str| get(key).map(|v| infrastructure::expand_tilde(&v));

        Self {
            workflow_name: get("alfred_workflow_name"),
            workflow_version: get("alfred_workflow_version"),
            bundle_id: get("alfred_workflow_bundleid"),
            debug: flag("alfred_debug"),
            cache_dir: path("alfred_workflow_cache"),
            data_dir: path("alfred_workflow_data"),
            preferences: path("alfred_preferences"),
            log_to_file: flag("scriptfilter_log_file"),
        }
    }

    /// Directory for disposable cached data.
    ///
    /// The launcher-provided directory when set, otherwise the conventional
    /// per-bundle cache location, otherwise a directory under the system temp dir.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            infrastructure::default_cache_dir(self.bundle_id.as_deref())
        })
    }

    /// Directory for persistent workflow data, resolved like [`Config::cache_dir`].
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            infrastructure::default_data_dir(self.bundle_id.as_deref())
        })
    }
}
