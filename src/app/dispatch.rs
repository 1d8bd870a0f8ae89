//! The dispatch/error boundary.
//!
//! One pass takes the raw argument list and a matcher, runs the matcher once, and
//! emits at most one JSON document. This is the single recovery point of the crate:
//!
//! - a [`Failure`] becomes an error row with the failure's own title and subtitle;
//! - a matcher returning `None`, any other error, or a panic becomes the generic
//!   error row with the full detail in large type;
//! - [`ScriptFilterError::InvalidArgument`] is a contract violation in the matching
//!   logic and is returned to the caller without writing anything.
//!
//! The document is rendered to a string before anything is written, so output is
//! never partial.

use super::failure::Failure;
use super::outcome::{fault_item, Outcome, Output};
use crate::codec;
use crate::domain::error::{Result, ScriptFilterError};
use crate::domain::{Item, Items};
use crate::infrastructure::releases::UpdateChecker;
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

/// Runs `matcher` against `args` and classifies the result.
///
/// The matcher sees the arguments as string slices so branches can use slice
/// patterns, and returns `None` when it has no branch for them.
///
/// # Errors
///
/// Returns [`ScriptFilterError::InvalidArgument`] if the matching logic raised it.
/// Every other fault is folded into the returned [`Outcome`].
///
/// # Examples
///
/// ```
/// use scriptfilter::app::{evaluate, Outcome};
/// use scriptfilter::Item;
///
/// let args = vec!["hello".to_string()];
/// let outcome = evaluate(&args, |args| match args {
///     ["hello"] => Some(Ok(Item::new("Hello world!").into())),
///     _ => None,
/// })?;
/// assert!(matches!(outcome, Outcome::Output(_)));
/// # Ok::<(), scriptfilter::ScriptFilterError>(())
/// ```
pub fn evaluate<F>(args: &[String], matcher: F) -> Result<Outcome>
where
    F: FnOnce(&[&str]) -> Option<anyhow::Result<Output>>,
{
    let span = tracing::debug_span!("dispatch", argc = args.len());
    let _guard = span.entered();

    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    let result = panic::catch_unwind(AssertUnwindSafe(|| matcher(&argv)));

    match result {
        Ok(Some(Ok(Output::Document(items)))) => {
            tracing::debug!(item_count = items.items.len(), "matched with output");
            Ok(Outcome::Output(items))
        }
        Ok(Some(Ok(Output::Empty))) => {
            tracing::debug!("matched with no output");
            Ok(Outcome::Empty)
        }
        Ok(Some(Err(err))) => classify(err),
        Ok(None) => {
            let err = ScriptFilterError::UnmatchedArguments(args.to_vec());
            Ok(fault(&anyhow::Error::new(err)))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(panic = %message, "matching logic panicked");
            Ok(Outcome::Faulted(format!("panic: {message}")))
        }
    }
}

fn classify(err: anyhow::Error) -> Result<Outcome> {
    if let Some(failure) = err.downcast_ref::<Failure>() {
        tracing::debug!(title = %failure.title, "signaled failure");
        return Ok(Outcome::Failed(failure.clone()));
    }
    if let Some(ScriptFilterError::InvalidArgument(message)) =
        err.downcast_ref::<ScriptFilterError>()
    {
        tracing::error!(error = %message, "invalid argument in matching logic");
        return Err(ScriptFilterError::InvalidArgument(message.clone()));
    }
    Ok(fault(&err))
}

fn fault(err: &anyhow::Error) -> Outcome {
    let detail = format!("{err:?}");
    tracing::error!(error = %err, detail = %detail, "script filter fault");
    Outcome::Faulted(detail)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

/// Renders the outcome's document, falling back to a fault row if encoding fails.
fn render(outcome: Outcome) -> Option<String> {
    let document = outcome.into_document()?;
    match codec::to_string_pretty(&document) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode document");
            codec::to_string_pretty(&fault_item(&e.to_string()).into()).ok()
        }
    }
}

/// Writes the outcome's document (if any) to `out` in one write.
///
/// # Errors
///
/// Returns [`ScriptFilterError::Io`] if writing fails.
pub fn emit<W: Write>(out: &mut W, outcome: Outcome) -> Result<()> {
    if let Some(json) = render(outcome) {
        writeln!(out, "{json}")?;
        out.flush()?;
        tracing::debug!(bytes = json.len(), "document written");
    }
    Ok(())
}

/// Runs one full pass: evaluate the matcher and emit the result to `out`.
///
/// # Errors
///
/// Returns [`ScriptFilterError::InvalidArgument`] raised by the matching logic, or
/// [`ScriptFilterError::Io`] if the document cannot be written.
pub fn dispatch<W, F>(out: &mut W, args: &[String], matcher: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&[&str]) -> Option<anyhow::Result<Output>>,
{
    let outcome = evaluate(args, matcher)?;
    emit(out, outcome)
}

/// Like [`dispatch`], but prepends an "update available" row to successful
/// documents when `checker` reports a newer release than `current_version`.
///
/// A failing release lookup is logged and otherwise ignored.
///
/// # Errors
///
/// Same as [`dispatch`].
pub fn dispatch_with_update_check<W, F>(
    out: &mut W,
    args: &[String],
    matcher: F,
    checker: &UpdateChecker,
    current_version: &str,
) -> Result<()>
where
    W: Write,
    F: FnOnce(&[&str]) -> Option<anyhow::Result<Output>>,
{
    let outcome = match evaluate(args, matcher)? {
        Outcome::Output(items) => Outcome::Output(with_update_row(items, checker, current_version)),
        other => other,
    };
    emit(out, outcome)
}

fn with_update_row(items: Items, checker: &UpdateChecker, current_version: &str) -> Items {
    match checker.newer_version(current_version) {
        Ok(Some(latest)) => {
            tracing::debug!(current = %current_version, latest = %latest, "update available");
            items.prepend(
                Item::new(format!("Update available: {latest}"))
                    .subtitle(format!(
                        "You are running {current_version}. Press Enter to open the release page."
                    ))
                    .arg(checker.release_url()),
            )
        }
        Ok(None) => items,
        Err(e) => {
            tracing::warn!(error = %e, "update check failed");
            items
        }
    }
}

/// Entry point for a script filter binary.
///
/// Reads the process arguments (without the program name), installs logging from
/// the environment, runs one dispatch pass, and writes to standard output. A failed
/// write to standard output is logged and swallowed.
///
/// # Errors
///
/// Returns [`ScriptFilterError::InvalidArgument`] raised by the matching logic.
///
/// # Examples
///
/// ```no_run
/// use scriptfilter::{app, Item};
///
/// fn main() -> scriptfilter::Result<()> {
///     app::run(|args| match args {
///         [] => Some(Ok(Item::new("Hello world!").into())),
///         _ => None,
///     })
/// }
/// ```
pub fn run<F>(matcher: F) -> Result<()>
where
    F: FnOnce(&[&str]) -> Option<anyhow::Result<Output>>,
{
    let config = crate::Config::from_env();
    crate::observability::init_logging(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match dispatch(&mut out, &args, matcher) {
        Err(ScriptFilterError::Io(e)) => {
            tracing::error!(error = %e, "failed to write to standard output");
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::outcome::{ERROR_ICON, FAULT_TITLE};
    use crate::app::failure::fail;
    use crate::infrastructure::releases::ReleaseSource;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn run_to_string<F>(list: &[&str], matcher: F) -> String
    where
        F: FnOnce(&[&str]) -> Option<anyhow::Result<Output>>,
    {
        let mut out = Vec::new();
        dispatch(&mut out, &args(list), matcher).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn hello(argv: &[&str]) -> Option<anyhow::Result<Output>> {
        match argv {
            ["hello"] => Some(Ok(Item::new("Hello world!").into())),
            ["quiet"] => Some(Ok(().into())),
            ["bad"] => Some(fail("Bad input", "explanation")),
            ["broken"] => Some(Err(anyhow::anyhow!("disk on fire"))),
            ["ttl"] => Some(
                Items::default()
                    .cache(Duration::from_secs(1))
                    .map(Output::from)
                    .map_err(anyhow::Error::from),
            ),
            ["panic"] => panic!("matcher exploded"),
            _ => None,
        }
    }

    #[test]
    fn hello_world_document() {
        let text = run_to_string(&["hello"], hello);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "items": [{
                    "title": "Hello world!",
                    "valid": true,
                    "visible": true,
                    "variables": {},
                    "mods": {}
                }],
                "skipknowledge": true
            })
        );
        assert!(text.contains("\n  \"items\": ["));
        assert!(text.contains("\n      \"title\": \"Hello world!\""));
    }

    #[test]
    fn empty_output_writes_nothing() {
        assert_eq!(run_to_string(&["quiet"], hello), "");
    }

    #[test]
    fn signaled_failure_row() {
        let value: Value = serde_json::from_str(&run_to_string(&["bad"], hello)).unwrap();
        let rows = value["items"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], "Bad input");
        assert_eq!(rows[0]["subtitle"], "explanation");
        assert_eq!(rows[0]["icon"]["path"], ERROR_ICON);
    }

    #[test]
    fn unmatched_arguments_become_a_fault_row() {
        let value: Value = serde_json::from_str(&run_to_string(&["unknown"], hello)).unwrap();
        let rows = value["items"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], FAULT_TITLE);
        assert!(rows[0]["text"]["largetype"]
            .as_str()
            .unwrap()
            .contains("unknown"));
    }

    #[test]
    fn unexpected_errors_keep_detail() {
        let value: Value = serde_json::from_str(&run_to_string(&["broken"], hello)).unwrap();
        assert_eq!(value["items"][0]["title"], FAULT_TITLE);
        assert!(value["items"][0]["text"]["largetype"]
            .as_str()
            .unwrap()
            .contains("disk on fire"));
    }

    #[test]
    fn panics_are_contained() {
        let outcome = evaluate(&args(&["panic"]), hello).unwrap();
        match outcome {
            Outcome::Faulted(detail) => assert!(detail.contains("matcher exploded")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_argument_escapes_the_boundary() {
        let mut out = Vec::new();
        let result = dispatch(&mut out, &args(&["ttl"]), hello);
        assert!(matches!(result, Err(ScriptFilterError::InvalidArgument(_))));
        assert!(out.is_empty());
    }

    struct FixedRelease(&'static str);

    impl ReleaseSource for FixedRelease {
        fn latest_tag(&self) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn release_url(&self) -> String {
            "https://example.com/releases/latest".to_string()
        }
    }

    struct BrokenRelease;

    impl ReleaseSource for BrokenRelease {
        fn latest_tag(&self) -> Result<String> {
            Err(ScriptFilterError::Update("offline".into()))
        }

        fn release_url(&self) -> String {
            String::new()
        }
    }

    fn dispatch_checked(source: impl ReleaseSource + 'static, list: &[&str]) -> Value {
        let checker = UpdateChecker::new(source);
        let mut out = Vec::new();
        dispatch_with_update_check(&mut out, &args(list), hello, &checker, "1.0.0").unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn update_row_is_prepended_when_newer() {
        let value = dispatch_checked(FixedRelease("v1.2.0"), &["hello"]);
        let rows = value["items"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], "Update available: v1.2.0");
        assert_eq!(rows[0]["arg"], "https://example.com/releases/latest");
        assert_eq!(rows[1]["title"], "Hello world!");
    }

    #[test]
    fn no_update_row_when_current() {
        let value = dispatch_checked(FixedRelease("1.0.0"), &["hello"]);
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn failed_update_check_is_ignored() {
        let value = dispatch_checked(BrokenRelease, &["hello"]);
        assert_eq!(value["items"][0]["title"], "Hello world!");
    }

    #[test]
    fn update_row_is_not_added_to_error_rows() {
        let value = dispatch_checked(FixedRelease("9.0.0"), &["bad"]);
        let rows = value["items"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], "Bad input");
    }

    #[test]
    fn update_row_stays_first_with_title_sorting() {
        let checker = UpdateChecker::new(FixedRelease("v9.0.0"));
        let mut out = Vec::new();
        dispatch_with_update_check(
            &mut out,
            &[],
            |_| {
                Some(Ok(Items::new(vec![Item::new("beta"), Item::new("alpha")])
                    .enable_sorting_by_title()
                    .into()))
            },
            &checker,
            "1.0.0",
        )
        .unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        let titles: Vec<&str> = value["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Update available: v9.0.0", "alpha", "beta"]);
    }
}
