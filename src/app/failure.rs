//! Intentional, user-facing failure signal.
//!
//! Matching logic returns a [`Failure`] (usually through `?` into an
//! `anyhow::Result`) to abort with a message the user should see. The dispatch
//! boundary recognizes it by type and renders it as a single error row carrying the
//! failure's own title and subtitle, instead of the generic fault row.

use thiserror::Error;

/// Abort-with-message signal raised by matching logic.
///
/// # Examples
///
/// ```
/// use scriptfilter::app::{Failure, Output};
///
/// fn lookup(query: &str) -> anyhow::Result<Output> {
///     if query.is_empty() {
///         return Err(Failure::new("Type a package name").subtitle("e.g. serde").into());
///     }
///     Ok(Output::Empty)
/// }
///
/// let err = lookup("").unwrap_err();
/// assert_eq!(err.downcast_ref::<Failure>().unwrap().title, "Type a package name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}")]
pub struct Failure {
    pub title: String,
    pub subtitle: Option<String>,
}

impl Failure {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
        }
    }

    #[must_use]
    pub fn subtitle(self, subtitle: impl Into<String>) -> Self {
        Self {
            subtitle: Some(subtitle.into()),
            ..self
        }
    }
}

/// Returns a [`Failure`] with a title and subtitle as an `anyhow` error.
///
/// # Errors
///
/// Always returns `Err`.
pub fn fail<T>(title: impl Into<String>, subtitle: impl Into<String>) -> anyhow::Result<T> {
    Err(Failure::new(title).subtitle(subtitle).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_is_recoverable_by_downcast() {
        let err = fail::<()>("Bad input", "explanation").unwrap_err();
        let failure = err.downcast_ref::<Failure>().unwrap();
        assert_eq!(failure.title, "Bad input");
        assert_eq!(failure.subtitle.as_deref(), Some("explanation"));
    }

    #[test]
    fn failure_survives_added_context() {
        use anyhow::Context;
        let err = fail::<()>("Bad input", "explanation")
            .context("while parsing query")
            .unwrap_err();
        assert!(err.downcast_ref::<Failure>().is_some());
    }
}
