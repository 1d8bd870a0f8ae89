//! JSON encode/decode for result documents.
//!
//! Encoding always goes through the render transform (hidden rows dropped, title sort
//! applied), so decoding an encoded document reproduces the launcher-facing view, not
//! the caller's original input.

use super::models::{ItemRecord, ItemsRecord, ModRecord};
use crate::domain::error::{Result, ScriptFilterError};
use crate::domain::{Item, Items, Mod};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

fn serialize_err(e: &serde_json::Error) -> ScriptFilterError {
    ScriptFilterError::MalformedDocument(format!("failed to serialize JSON: {e}"))
}

fn decode_err(e: &serde_json::Error) -> ScriptFilterError {
    ScriptFilterError::MalformedDocument(format!("failed to parse JSON: {e}"))
}

fn record_to_value<T: Serialize>(record: &T) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| serialize_err(&e))
}

fn record_from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| decode_err(&e))
}

/// Encodes a document as a JSON value.
///
/// # Errors
///
/// Returns [`ScriptFilterError::MalformedDocument`] if serialization fails.
pub fn encode(items: &Items) -> Result<Value> {
    record_to_value(&ItemsRecord::from(items))
}

/// Encodes a document as pretty-printed JSON with 2-space indentation.
///
/// Map keys are ordered, so encoding the same value twice is byte-identical.
///
/// # Errors
///
/// Returns [`ScriptFilterError::MalformedDocument`] if serialization fails.
///
/// # Examples
///
/// ```
/// use scriptfilter::{codec, Items};
///
/// let json = codec::to_string_pretty(&Items::default())?;
/// assert_eq!(json, "{\n  \"skipknowledge\": true,\n  \"items\": []\n}");
/// # Ok::<(), scriptfilter::ScriptFilterError>(())
/// ```
pub fn to_string_pretty(items: &Items) -> Result<String> {
    serde_json::to_string_pretty(&ItemsRecord::from(items)).map_err(|e| serialize_err(&e))
}

/// Encodes a document as compact JSON bytes, as stored in the file cache.
///
/// # Errors
///
/// Returns [`ScriptFilterError::MalformedDocument`] if serialization fails.
pub fn to_vec(items: &Items) -> Result<Vec<u8>> {
    serde_json::to_vec(&ItemsRecord::from(items)).map_err(|e| serialize_err(&e))
}

/// Decodes a document from a JSON value.
///
/// Missing `skipknowledge` defaults to `true` and a missing `cache` to none.
///
/// # Errors
///
/// Returns [`ScriptFilterError::MalformedDocument`] when a required key (`items`, or
/// an item's `title`, `valid`, `visible`, `variables`) is missing or mistyped.
pub fn decode(value: Value) -> Result<Items> {
    record_from_value::<ItemsRecord>(value)?.into_items()
}

/// Decodes a document from JSON text.
///
/// # Errors
///
/// See [`decode`].
pub fn from_str(json: &str) -> Result<Items> {
    serde_json::from_str::<ItemsRecord>(json)
        .map_err(|e| decode_err(&e))?
        .into_items()
}

/// Decodes a document from JSON bytes.
///
/// # Errors
///
/// See [`decode`].
pub fn from_slice(bytes: &[u8]) -> Result<Items> {
    serde_json::from_slice::<ItemsRecord>(bytes)
        .map_err(|e| decode_err(&e))?
        .into_items()
}

/// Encodes a single row.
///
/// # Errors
///
/// Returns [`ScriptFilterError::MalformedDocument`] if serialization fails.
pub fn encode_item(item: &Item) -> Result<Value> {
    record_to_value(&ItemRecord::from(item))
}

/// Decodes a single row.
///
/// # Errors
///
/// Returns [`ScriptFilterError::MalformedDocument`] when a required key is missing.
pub fn decode_item(value: Value) -> Result<Item> {
    record_from_value::<ItemRecord>(value).map(Item::from)
}

/// Encodes a single modifier override.
///
/// # Errors
///
/// Returns [`ScriptFilterError::MalformedDocument`] if serialization fails.
pub fn encode_mod(m: &Mod) -> Result<Value> {
    record_to_value(&ModRecord::from(m))
}

/// Decodes a single modifier override.
///
/// # Errors
///
/// Returns [`ScriptFilterError::MalformedDocument`] when `valid` or `variables` is missing.
pub fn decode_mod(value: Value) -> Result<Mod> {
    record_from_value::<ModRecord>(value).map(Mod::from)
}
