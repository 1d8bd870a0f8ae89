//! Demo script filter.
//!
//! A small workflow backend exercising the library end to end. The launcher runs
//! it with the user's query as arguments:
//!
//! - *(no arguments)*: a handful of sample rows with modifiers and variables
//! - `hello`: a single greeting row
//! - `fail <message...>`: an intentional failure shown as an error row
//! - `quiet`: no output at all
//! - `split <text>`: one row per word of `text`, split shell-style
//! - `search <query>`: the sample rows fuzzy-filtered by `query`
//!
//! Anything else is reported as unsupported arguments.

#![allow(clippy::multiple_crate_versions)]

use scriptfilter::{app, fail, tokenize, Item, Items, Mod, ModKey, Output, Router};

fn sample_items() -> Items {
    Items::new(vec![
        Item::new("Open the documentation")
            .uid("docs")
            .subtitle("Opens docs.rs in the browser")
            .arg("https://docs.rs/scriptfilter")
            .matching("docs documentation help")
            .modifier(
                ModKey::Cmd,
                Mod::new()
                    .subtitle("Copy the link instead")
                    .variable("action", "copy"),
            )
            .variable("action", "open"),
        Item::new("Clear the cache")
            .uid("clear-cache")
            .subtitle("Removes memoized results")
            .arg("clear-cache")
            .largetype("Cached documents live in the workflow cache directory"),
        Item::new("Check for updates")
            .uid("update")
            .arg("update")
            .modifier(ModKey::Opt, Mod::new().valid_if(false).subtitle("Not available offline")),
        Item::new("Hidden row").hide_when(true),
    ])
}

fn split_rows(text: &[&str]) -> anyhow::Result<Output> {
    let words = tokenize(&text.join(" "));
    if words.is_empty() {
        return fail("Nothing to split", "Type some words, quotes keep them together");
    }
    Ok(words
        .into_iter()
        .enumerate()
        .map(|(i, word)| Item::new(word.clone()).subtitle(format!("word {}", i + 1)).arg(word))
        .collect::<Items>()
        .into())
}

fn main() -> scriptfilter::Result<()> {
    let router = Router::new()
        .on(|args| args.is_empty(), |_| Ok(sample_items().into()))
        .on_args(&["hello"], |_| Ok(Item::new("Hello world!").into()))
        .on_args(&["quiet"], |_| Ok(Output::Empty))
        .on_command("fail", |message| {
            let subtitle = if message.is_empty() {
                "No details given".to_string()
            } else {
                message.join(" ")
            };
            fail("Intentional failure", subtitle)
        })
        .on_command("split", split_rows)
        .on_command("search", |query| {
            Ok(sample_items().filter_by_query(&query.join(" ")).into())
        });

    app::run(|args| router.route(args))
}
