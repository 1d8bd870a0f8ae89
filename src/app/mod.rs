//! Application layer: turning an argument list into exactly one emitted document.
//!
//! # Architecture
//!
//! ```text
//! argv → matcher (closure or Router) → Output / error → Outcome → JSON on stdout
//!                                          ↑
//!                              Failure (intentional) | anything else (fault)
//! ```
//!
//! # Modules
//!
//! - [`dispatch`]: The error boundary and the `run` entry point
//! - [`failure`]: The intentional failure signal
//! - [`outcome`]: Matcher output, pass outcome, error rows
//! - [`router`]: Ordered predicate/handler matcher
//!
//! # Example
//!
//! ```rust
//! use scriptfilter::app::{dispatch, fail};
//! use scriptfilter::Item;
//!
//! let mut out = Vec::new();
//! let args = vec!["greet".to_string(), "Ada".to_string()];
//! dispatch(&mut out, &args, |args| match args {
//!     ["greet", name] => Some(Ok(Item::new(format!("Hello, {name}!")).into())),
//!     ["greet"] => Some(fail("Who should I greet?", "Type a name")),
//!     _ => None,
//! })?;
//! assert!(String::from_utf8(out).unwrap().contains("Hello, Ada!"));
//! # Ok::<(), scriptfilter::ScriptFilterError>(())
//! ```

pub mod dispatch;
pub mod failure;
pub mod outcome;
pub mod router;

pub use dispatch::{dispatch, dispatch_with_update_check, emit, evaluate, run};
pub use failure::{fail, Failure};
pub use outcome::{failure_item, fault_item, Outcome, Output, ERROR_ICON, FAULT_SUBTITLE, FAULT_TITLE};
pub use router::Router;
