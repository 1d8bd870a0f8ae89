//! Serialization codec between domain records and the launcher's JSON schema.
//!
//! # Modules
//!
//! - `models`: Wire record types mirroring the JSON document
//! - `json`: Encode/decode functions used for standard output and the file cache

pub mod json;
pub mod models;

pub use json::{
    decode, decode_item, decode_mod, encode, encode_item, encode_mod, from_slice, from_str,
    to_string_pretty, to_vec,
};
pub use models::{CacheRecord, IconRecord, ItemRecord, ItemsRecord, ModRecord, TextRecord};
