//! Results of matching logic and of one dispatch pass.
//!
//! Matching logic produces an [`Output`]; the dispatch boundary classifies the whole
//! pass into an [`Outcome`], whose document (if any) is what gets emitted:
//!
//! ```text
//! Dispatching ──┬── Output   ──► document
//!               ├── Empty    ──► nothing
//!               ├── Failed   ──► failure row
//!               └── Faulted  ──► generic error row
//! ```

use super::failure::Failure;
use crate::domain::{Item, Items};

/// Icon shown on error rows.
pub const ERROR_ICON: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/AlertStopIcon.icns";

/// Title of the generic error row.
pub const FAULT_TITLE: &str = "Unexpected error";

/// Subtitle of the generic error row.
pub const FAULT_SUBTITLE: &str =
    "Press Cmd+L to see the full error, or open the workflow debugger for the log";

/// What a matched branch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Write nothing.
    Empty,
    /// Write this document.
    Document(Items),
}

impl From<Items> for Output {
    fn from(items: Items) -> Self {
        Self::Document(items)
    }
}

impl From<Item> for Output {
    fn from(item: Item) -> Self {
        Self::Document(item.into())
    }
}

impl From<Vec<Item>> for Output {
    fn from(items: Vec<Item>) -> Self {
        Self::Document(items.into())
    }
}

impl From<()> for Output {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

/// Terminal classification of one dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(Items),
    Empty,
    Failed(Failure),
    /// Unmatched arguments or any unexpected fault; carries the full detail text.
    Faulted(String),
}

impl Outcome {
    /// The document to emit, if any.
    #[must_use]
    pub fn into_document(self) -> Option<Items> {
        match self {
            Self::Output(items) => Some(items),
            Self::Empty => None,
            Self::Failed(failure) => Some(failure_item(&failure).into()),
            Self::Faulted(detail) => Some(fault_item(&detail).into()),
        }
    }
}

/// Error row for an intentional failure.
#[must_use]
pub fn failure_item(failure: &Failure) -> Item {
    let item = Item::new(failure.title.clone()).icon(ERROR_ICON);
    match &failure.subtitle {
        Some(subtitle) => item.subtitle(subtitle.clone()),
        None => item,
    }
}

/// Generic error row; `detail` is kept in large type for inspection.
#[must_use]
pub fn fault_item(detail: &str) -> Item {
    Item::new(FAULT_TITLE)
        .subtitle(FAULT_SUBTITLE)
        .icon(ERROR_ICON)
        .largetype(detail)
}
