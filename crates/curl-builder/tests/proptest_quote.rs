//! Property-based tests for quoting and rendering
//!
//! Uses proptest to check the quoting rules over generated arguments and that
//! building is stable.

use curl_builder::{Command, QuoteStyle, quote};
use proptest::prelude::*;

/// Strategies for generating arguments
mod strategies {
    use proptest::prelude::*;

    /// Printable ASCII without quotes or backslashes
    pub fn plain() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 _./:=@&?%+-]{0,40}").unwrap()
    }

    /// Plain text with at least one of the given character inserted
    pub fn containing(c: char) -> impl Strategy<Value = String> {
        (plain(), plain()).prop_map(move |(a, b)| format!("{a}{c}{b}"))
    }

    /// Plain text holding both quote characters
    pub fn both_quotes() -> impl Strategy<Value = String> {
        (plain(), plain(), plain()).prop_map(|(a, b, c)| format!("{a}'{b}\"{c}"))
    }

    /// Command line flags
    pub fn flag() -> impl Strategy<Value = String> {
        prop::string::string_regex("-[a-zA-Z]|--[a-z][a-z-]{1,15}").unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn plain_arguments_are_wrapped_unchanged(a in strategies::plain()) {
        prop_assert_eq!(quote(&a, QuoteStyle::Single), format!("'{a}'"));
        prop_assert_eq!(quote(&a, QuoteStyle::Double), format!("\"{a}\""));
    }

    #[test]
    fn single_quote_selects_ansi_c_form(a in strategies::containing('\'')) {
        let quoted = quote(&a, QuoteStyle::Single);
        prop_assert_eq!(quoted, format!("$'{}'", a.replace('\'', "\\'")));
    }

    #[test]
    fn double_quote_is_escaped_in_double_style(a in strategies::containing('"')) {
        let quoted = quote(&a, QuoteStyle::Double);
        prop_assert_eq!(quoted, format!("\"{}\"", a.replace('"', "\\\"")));
        // inert inside single quotes
        prop_assert_eq!(quote(&a, QuoteStyle::Single), format!("'{a}'"));
    }

    #[test]
    fn both_quotes(a in strategies::both_quotes()) {
        prop_assert_eq!(
            quote(&a, QuoteStyle::Single),
            format!("$'{}'", a.replace('\'', "\\'"))
        );
        prop_assert_eq!(
            quote(&a, QuoteStyle::Double),
            format!("\"{}\"", a.replace('"', "\\\""))
        );
    }

    #[test]
    fn none_style_only_escapes_spaces(a in strategies::plain()) {
        let quoted = quote(&a, QuoteStyle::None);
        prop_assert_eq!(&quoted, &a.replace(' ', "\\ "));
        prop_assert!(!quoted.starts_with('\''));
    }

    #[test]
    fn empty_template_renders_empty(
        url in strategies::plain(),
        flags in prop::collection::vec(strategies::flag(), 0..5),
    ) {
        let mut command = Command::new();
        command.set_url(url).set_template("");
        for flag in &flags {
            command.add_option(flag.as_str(), Some("value"));
        }
        prop_assert_eq!(command.build(), "");
    }

    #[test]
    fn build_is_idempotent(
        url in "[a-z]{1,10}",
        args in prop::collection::vec((strategies::flag(), prop::option::of(strategies::plain())), 0..6),
    ) {
        let mut command = Command::new();
        command.set_url(format!("http://{url}.example"));
        for (flag, arg) in &args {
            command.add_option(flag.as_str(), arg.as_deref());
        }
        let first = command.build();
        prop_assert_eq!(&first, &command.build());
        prop_assert_eq!(command.options().len(), args.len());
    }

    #[test]
    fn flags_render_in_insertion_order(flags in prop::collection::vec(strategies::flag(), 1..8)) {
        let mut command = Command::new();
        for flag in &flags {
            command.add_option(flag.as_str(), None);
        }
        prop_assert_eq!(command.build(), format!("curl {}", flags.join(" ")));
    }
}
