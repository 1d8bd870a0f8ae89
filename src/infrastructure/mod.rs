//! Infrastructure layer for the world outside the process.
//!
//! Everything here talks to the host system: the launcher's directory
//! conventions, the GitHub releases API, the desktop notification center.
//! The query tokenizer lives here too since it is the entry point for raw
//! launcher input.
//!
//! # Modules
//!
//! - `paths`: Workflow cache/data directory conventions and tilde expansion
//! - `releases`: Latest-release lookup and version comparison
//! - `notifier`: Desktop notifications through `osascript`
//! - `tokenize`: Shell-like query splitting

pub mod notifier;
pub mod paths;
pub mod releases;
pub mod tokenize;

pub use notifier::{notify, Notification};
pub use paths::{default_cache_dir, default_data_dir, expand_tilde};
pub use releases::{
    is_newer, GithubReleases, ReleaseSource, UpdateChecker, DEFAULT_CHECK_INTERVAL,
};
pub use tokenize::tokenize;
