//! Domain layer: the result-document records and the crate error type.
//!
//! These types are plain values with no filesystem or process side effects. All
//! composition is by value: [`Items`] owns its [`Item`]s, and each `Item` owns its
//! [`Mod`]s keyed by [`ModKey`].
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`variables`]: Tri-state session variable values
//! - [`modifier`]: Modifier keys and overrides
//! - [`item`]: One result row
//! - [`items`]: The result document
//!
//! # Examples
//!
//! ```
//! use scriptfilter::domain::{Item, Items, Result};
//!
//! fn rows() -> Result<Items> {
//!     Ok(Items::new(vec![Item::new("Hello world!")]))
//! }
//! # rows().unwrap();
//! ```

pub mod error;
pub mod item;
pub mod items;
pub mod modifier;
pub mod variables;

pub use error::{Result, ScriptFilterError};
pub use item::Item;
pub use items::{Items, MAX_CACHE_TTL, MIN_CACHE_TTL};
pub use modifier::{Mod, ModKey};
pub use variables::{VarValue, Variables};
