//! Command template rendering
//!
//! A template holds up to three placeholders. Non-empty values are inserted
//! with one leading space; an empty value also takes one adjacent literal
//! space on each side with it, so the output stays single-spaced whatever is
//! missing. Substituted text is never scanned for placeholders again.

/// Placeholder for the command name.
pub const TEMPLATE_NAME: &str = "{name}";

/// Placeholder for the rendered options.
pub const TEMPLATE_OPTIONS: &str = "{options}";

/// Placeholder for the URL.
pub const TEMPLATE_URL: &str = "{url}";

/// `{name}{options}{url}`
pub const DEFAULT_TEMPLATE: &str = "{name}{options}{url}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Name,
    Options,
    Url,
}

impl Placeholder {
    const ALL: [Placeholder; 3] = [Placeholder::Name, Placeholder::Options, Placeholder::Url];

    fn token(self) -> &'static str {
        match self {
            Placeholder::Name => TEMPLATE_NAME,
            Placeholder::Options => TEMPLATE_OPTIONS,
            Placeholder::Url => TEMPLATE_URL,
        }
    }
}

#[derive(Debug)]
enum Piece {
    Literal(String),
    Rendered(String),
    Slot(Placeholder),
}

impl Piece {
    fn text(&self) -> &str {
        match self {
            Piece::Literal(text) | Piece::Rendered(text) => text,
            Piece::Slot(_) => "",
        }
    }
}

fn split(template: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut rest = template;
    loop {
        let next = Placeholder::ALL
            .iter()
            .filter_map(|p| rest.find(p.token()).map(|at| (at, *p)))
            .min_by_key(|(at, _)| *at);
        let Some((at, placeholder)) = next else {
            break;
        };
        if at > 0 {
            pieces.push(Piece::Literal(rest[..at].to_string()));
        }
        pieces.push(Piece::Slot(placeholder));
        rest = &rest[at + placeholder.token().len()..];
    }
    if !rest.is_empty() {
        pieces.push(Piece::Literal(rest.to_string()));
    }
    pieces
}

fn strip_trailing_space(piece: Option<&mut Piece>) {
    if let Some(Piece::Literal(text)) = piece {
        if text.ends_with(' ') {
            text.pop();
        }
    }
}

fn strip_leading_space(piece: Option<&mut Piece>) {
    if let Some(Piece::Literal(text)) = piece {
        if text.starts_with(' ') {
            text.remove(0);
        }
    }
}

fn substitute(pieces: &mut Vec<Piece>, placeholder: Placeholder, value: &str) {
    let mut i = 0;
    while i < pieces.len() {
        if !matches!(pieces[i], Piece::Slot(p) if p == placeholder) {
            i += 1;
            continue;
        }
        if value.is_empty() {
            if i > 0 {
                strip_trailing_space(pieces.get_mut(i - 1));
            }
            strip_leading_space(pieces.get_mut(i + 1));
            pieces.remove(i);
        } else {
            pieces[i] = Piece::Rendered(format!(" {value}"));
            i += 1;
        }
    }
}

/// Render a template, substituting name, options and url in that order.
///
/// ```
/// use curl_builder::template::{render, DEFAULT_TEMPLATE};
///
/// assert_eq!(render(DEFAULT_TEMPLATE, "curl", "-v", "http://example.com"), "curl -v http://example.com");
/// assert_eq!(render(DEFAULT_TEMPLATE, "curl", "", ""), "curl");
/// assert_eq!(render("", "curl", "-v", "http://example.com"), "");
/// ```
pub fn render(template: &str, name: &str, options: &str, url: &str) -> String {
    let mut pieces = split(template);
    for (placeholder, value) in Placeholder::ALL.into_iter().zip([name, options, url]) {
        substitute(&mut pieces, placeholder, value);
    }

    // Trailing whitespace is trimmed from template text only, so substituted
    // values keep an escaped trailing space intact.
    let out: String = pieces.iter().map(Piece::text).collect();
    let last_rendered = pieces
        .iter()
        .rposition(|piece| matches!(piece, Piece::Rendered(_)));
    match last_rendered {
        Some(last) => {
            let head_len: usize = pieces[..=last].iter().map(|p| p.text().len()).sum();
            let (head, tail) = out.split_at(head_len);
            format!("{}{}", head.trim_start(), tail.trim_end())
        }
        None => out.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        assert_eq!(
            render(DEFAULT_TEMPLATE, "curl", "-v -L", "http://example.com"),
            "curl -v -L http://example.com"
        );
        assert_eq!(render(DEFAULT_TEMPLATE, "curl", "", "http://x"), "curl http://x");
        assert_eq!(render(DEFAULT_TEMPLATE, "curl", "-v", ""), "curl -v");
    }

    #[test]
    fn test_reordered_template() {
        let template = format!("{TEMPLATE_NAME}{TEMPLATE_URL}{TEMPLATE_OPTIONS}");
        assert_eq!(
            render(&template, "curl", "-v -L", "http://example.com"),
            "curl http://example.com -v -L"
        );
    }

    #[test]
    fn test_spaced_template_collapses_empty_parts() {
        let template = "{name} {options} {url}";
        assert_eq!(render(template, "curl", "", ""), "curl");
        assert_eq!(render(template, "curl", "", "http://x"), "curl http://x");
        assert_eq!(render(template, "curl", "-v", "http://x"), "curl  -v  http://x");
    }

    #[test]
    fn test_empty_and_missing_placeholders() {
        assert_eq!(render("", "curl", "-v", "http://x"), "");
        assert_eq!(render("{name}{url}", "curl", "-v", "http://x"), "curl http://x");
        assert_eq!(render("  {name}  ", "curl", "", ""), "curl");
    }

    #[test]
    fn test_literal_text_is_kept() {
        assert_eq!(
            render("{name}{options}{url} | jq .", "curl", "-s", "http://x"),
            "curl -s http://x | jq ."
        );
    }

    #[test]
    fn test_repeated_placeholder() {
        assert_eq!(render("{url}{url}", "curl", "", "a"), "a a");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        assert_eq!(
            render(DEFAULT_TEMPLATE, "curl", "-d '{url}'", "http://x"),
            "curl -d '{url}' http://x"
        );
    }

    #[test]
    fn test_trailing_escaped_space_survives() {
        assert_eq!(
            render("{name}{url}{options}", "curl", r"-d a\ ", "http://x"),
            r"curl http://x -d a\ "
        );
    }
}
