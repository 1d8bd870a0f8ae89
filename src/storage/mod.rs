//! Storage layer for memoizing results between invocations.
//!
//! Each invocation is a fresh process, so the filesystem is the only state shared
//! across runs. This layer provides a TTL file cache and a helper that stores
//! encoded result documents in it.
//!
//! # Modules
//!
//! - `backend`: Cache trait abstraction
//! - `file_cache`: File-per-key cache with modification-time freshness
//! - `cached`: Compute-or-load helper for result documents

pub mod backend;
pub mod cached;
pub mod file_cache;

pub use backend::Cache;
pub use cached::cached_items;
pub use file_cache::FileCache;
