//! Shell quoting for option arguments
//!
//! Every argument becomes exactly one shell word. Bare flags are never quoted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How option arguments are wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// `'value'`, switching to ANSI-C `$'value'` when the value holds a `'`
    #[default]
    Single,
    /// `"value"`, escaping `"` when present
    Double,
    /// No wrapping, spaces escaped as `\ `
    None,
}

impl QuoteStyle {
    /// The wrapping character, if any.
    pub fn quote_char(self) -> Option<char> {
        match self {
            QuoteStyle::Single => Some('\''),
            QuoteStyle::Double => Some('"'),
            QuoteStyle::None => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            QuoteStyle::Single => "single",
            QuoteStyle::Double => "double",
            QuoteStyle::None => "none",
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(QuoteStyle::Single),
            "double" => Ok(QuoteStyle::Double),
            "none" => Ok(QuoteStyle::None),
            _ => Err(Error::InvalidQuoteStyle(s.to_string())),
        }
    }
}

/// Quote one argument so a POSIX shell reads it back as a single word.
///
/// The decision order is fixed:
///
/// 1. [`QuoteStyle::None`] only escapes spaces.
/// 2. If the argument contains the active quote character, single style
///    switches to ANSI-C quoting (`$'...'`) and double style stays in double
///    quotes; both backslash-escape the quote character (and backslashes,
///    which are the escape character of those forms).
/// 3. Otherwise the argument is wrapped unchanged.
///
/// # Limits
///
/// Only the quote character (and backslash, in the escaping forms) is
/// escaped. Under [`QuoteStyle::Double`] a wrapped argument is still subject
/// to shell expansion of `$`, backticks and `\`, and one ending in a
/// backslash escapes the closing quote: `a\` renders as `"a\"`. Prefer
/// [`QuoteStyle::Single`] for untrusted input.
///
/// ```
/// use curl_builder::{quote, QuoteStyle};
///
/// assert_eq!(quote("a b", QuoteStyle::Single), "'a b'");
/// assert_eq!(quote("it's", QuoteStyle::Single), r"$'it\'s'");
/// assert_eq!(quote(r#"say "hi""#, QuoteStyle::Double), r#""say \"hi\"""#);
/// assert_eq!(quote("a b", QuoteStyle::None), r"a\ b");
/// ```
pub fn quote(argument: &str, style: QuoteStyle) -> String {
    let Some(q) = style.quote_char() else {
        return argument.replace(' ', "\\ ");
    };

    if argument.contains(q) {
        let escaped = escape(argument, q);
        return match style {
            QuoteStyle::Single => format!("$'{escaped}'"),
            _ => format!("{q}{escaped}{q}"),
        };
    }

    format!("{q}{argument}{q}")
}

fn escape(argument: &str, q: char) -> String {
    let mut out = String::with_capacity(argument.len() + 4);
    for c in argument.chars() {
        if c == q || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
