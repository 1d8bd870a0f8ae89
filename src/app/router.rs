//! Ordered argument matcher.
//!
//! A [`Router`] is a list of predicate/handler pairs tried in registration order.
//! The first predicate that accepts the argument list wins and only its handler
//! runs. When nothing matches, [`Router::route`] returns `None`, which the dispatch
//! boundary reports as unsupported arguments.
//!
//! Plain closures with slice patterns work as matchers too; the router is for
//! scripts whose branches are assembled dynamically.

use super::outcome::Output;

type Predicate<'a> = Box<dyn Fn(&[&str]) -> bool + 'a>;
type Handler<'a> = Box<dyn FnOnce(&[&str]) -> anyhow::Result<Output> + 'a>;

/// Ordered list of predicate/handler pairs.
///
/// # Examples
///
/// ```
/// use scriptfilter::app::{Output, Router};
/// use scriptfilter::Item;
///
/// let router = Router::new()
///     .on_args(&["hello"], |_| Ok(Item::new("Hello world!").into()))
///     .on_command("echo", |rest| Ok(Item::new(rest.join(" ")).into()));
///
/// let out = router.route(&["echo", "a", "b"]).unwrap().unwrap();
/// assert!(matches!(out, Output::Document(ref d) if d.items[0].title == "a b"));
/// ```
#[derive(Default)]
pub struct Router<'a> {
    routes: Vec<(Predicate<'a>, Handler<'a>)>,
    fallback: Option<Handler<'a>>,
}

impl<'a> Router<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: None,
        }
    }

    /// Adds a branch taken when `predicate` accepts the arguments.
    #[must_use]
    pub fn on<P, H>(mut self, predicate: P, handler: H) -> Self
    where
        P: Fn(&[&str]) -> bool + 'a,
        H: FnOnce(&[&str]) -> anyhow::Result<Output> + 'a,
    {
        self.routes.push((Box::new(predicate), Box::new(handler)));
        self
    }

    /// Adds a branch taken when the arguments equal `expected` exactly.
    #[must_use]
    pub fn on_args<H>(self, expected: &[&str], handler: H) -> Self
    where
        H: FnOnce(&[&str]) -> anyhow::Result<Output> + 'a,
    {
        let expected: Vec<String> = expected.iter().map(|s| (*s).to_string()).collect();
        self.on(move |args| args.iter().copied().eq(expected.iter().map(String::as_str)), handler)
    }

    /// Adds a branch taken when the first argument is `name`.
    ///
    /// The handler receives the remaining arguments.
    #[must_use]
    pub fn on_command<H>(self, name: &str, handler: H) -> Self
    where
        H: FnOnce(&[&str]) -> anyhow::Result<Output> + 'a,
    {
        let name = name.to_string();
        self.on(
            move |args| args.first() == Some(&name.as_str()),
            move |args| handler(&args[1..]),
        )
    }

    /// Handler used when no branch matches.
    #[must_use]
    pub fn fallback<H>(mut self, handler: H) -> Self
    where
        H: FnOnce(&[&str]) -> anyhow::Result<Output> + 'a,
    {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Runs the first matching branch, or `None` when nothing matches.
    pub fn route(self, args: &[&str]) -> Option<anyhow::Result<Output>> {
        let Self { routes, fallback } = self;
        let handler = routes
            .into_iter()
            .find(|(predicate, _)| predicate(args))
            .map(|(_, handler)| handler)
            .or(fallback)?;

        tracing::debug!(argc = args.len(), "route matched");
        Some(handler(args))
    }
}

impl std::fmt::Debug for Router<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
