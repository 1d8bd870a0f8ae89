//! Shell-like splitting of a query string into words.
//!
//! Script filters often receive the whole query as a single argument. This splits it
//! on whitespace while keeping quoted runs together:
//!
//! - `"..."` groups words; `\"` and `\\` are escapes inside it
//! - `'...'` groups words literally, with no escapes
//! - outside quotes, a backslash escapes the next character
//! - an unterminated quote runs to the end of the input

/// Splits `input` into words.
///
/// # Examples
///
/// ```
/// use scriptfilter::infrastructure::tokenize;
///
/// assert_eq!(tokenize(r#"open "my project" --fast"#), ["open", "my project", "--fast"]);
/// assert_eq!(tokenize("  "), Vec::<String>::new());
/// ```
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Quote {
        None,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (Quote::None, '\'') => {
                quote = Quote::Single;
                in_word = true;
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                in_word = true;
            }
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::None, '\\') => {
                in_word = true;
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (Quote::Double, '\\') => match chars.next() {
                Some(next @ ('"' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => current.push('\\'),
            },
            (_, c) => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    words
}
