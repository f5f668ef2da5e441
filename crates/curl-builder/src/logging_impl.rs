//! Logging infrastructure for curl-builder
//!
//! Built commands routinely carry credentials: `Authorization` and `Cookie`
//! headers, `-u user:password`, tokens in URLs. Everything logged goes through
//! [`LogConfig`] so those values are redacted before they reach a subscriber.
//!
//! # Log Levels
//!
//! - **WARN**: rejected option input
//! - **DEBUG**: built commands, imported requests

use std::borrow::Cow;
use std::collections::HashSet;

use crate::command::Command;
use crate::options::Options;
use crate::template;

const REDACTED: &str = "[REDACTED]";

/// Headers whose values never reach the log, upper-cased.
const DEFAULT_REDACTED_HEADERS: &[&str] = &[
    "AUTHORIZATION",
    "PROXY-AUTHORIZATION",
    "COOKIE",
    "SET-COOKIE",
    "X-API-KEY",
    "X-AUTH-TOKEN",
    "X-CSRF-TOKEN",
    "X-AMZ-SECURITY-TOKEN",
];

/// curl flags whose argument is a credential or key material.
const DEFAULT_REDACTED_FLAGS: &[&str] = &[
    "-u",
    "--user",
    "-U",
    "--proxy-user",
    "--oauth2-bearer",
    "-E",
    "--cert",
    "--key",
    "--pass",
    "--aws-sigv4",
];

/// Substrings (lower-case) that mark an argument as sensitive.
const SECRET_MARKERS: &[&str] = &["password", "secret", "bearer ", "basic "];

/// Well-known API token prefixes.
const TOKEN_PREFIXES: &[&str] = &[
    "sk-", "pk-", "sk_live_", "sk_test_", "pk_live_", "pk_test_", "ghp_", "gho_", "ghu_", "ghs_",
    "ghr_", "xoxb-", "xoxp-", "xoxa-", "AKIA", "eyJ",
];

/// How commands are rendered for the log.
///
/// Redaction is on by default; `redact_header` and `redact_flag` extend the
/// built-in lists.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Redact credentials before logging (default: true)
    pub redact_sensitive: bool,

    /// Upper-cased header names whose values are redacted
    pub redact_headers: HashSet<String>,

    /// Option flags whose argument is always redacted
    pub redact_flags: HashSet<String>,

    /// Longest argument logged before truncation, in bytes (default: 200)
    pub max_value_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            redact_sensitive: true,
            redact_headers: DEFAULT_REDACTED_HEADERS.iter().copied().map(String::from).collect(),
            redact_flags: DEFAULT_REDACTED_FLAGS.iter().copied().map(String::from).collect(),
            max_value_length: 200,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log commands exactly as built, credentials included.
    ///
    /// Only for local debugging: the log will contain secrets.
    pub fn unsafe_disable_redaction(mut self) -> Self {
        self.redact_sensitive = false;
        self
    }

    pub fn redact_header(mut self, name: &str) -> Self {
        self.redact_headers.insert(name.to_uppercase());
        self
    }

    pub fn redact_flag(mut self, flag: &str) -> Self {
        self.redact_flags.insert(flag.to_string());
        self
    }

    pub fn max_value_length(mut self, len: usize) -> Self {
        self.max_value_length = len;
        self
    }

    /// Whether the value of header `name` is hidden (case-insensitive).
    pub fn should_redact_header(&self, name: &str) -> bool {
        self.redact_sensitive && self.redact_headers.contains(&name.trim().to_uppercase())
    }

    /// Whether the argument of `flag` is hidden.
    pub fn should_redact_flag(&self, flag: &str) -> bool {
        self.redact_sensitive && self.redact_flags.contains(flag)
    }

    /// Hide `value` when it looks like a credential, otherwise truncate it.
    pub fn redact_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.redact_sensitive {
            let lower = value.to_lowercase();
            if SECRET_MARKERS.iter().any(|marker| lower.contains(marker)) || is_likely_secret(value)
            {
                return Cow::Borrowed(REDACTED);
            }
        }
        self.truncate(value)
    }

    /// Replace `user:password@` in the URL authority.
    ///
    /// A user name without a password is kept.
    pub fn redact_url<'a>(&self, url: &'a str) -> Cow<'a, str> {
        if self.redact_sensitive {
            if let Some((scheme, rest)) = url.split_once("://") {
                let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
                if let Some((userinfo, host)) = authority.rsplit_once('@') {
                    if userinfo.contains(':') {
                        let tail = &rest[authority.len()..];
                        return Cow::Owned(format!("{scheme}://{REDACTED}@{host}{tail}"));
                    }
                }
            }
        }
        self.truncate(url)
    }

    fn redact_argument<'a>(&self, flag: &str, argument: &'a str) -> Cow<'a, str> {
        if self.should_redact_flag(flag) {
            return Cow::Borrowed(REDACTED);
        }
        if matches!(flag, "-H" | "--header" | "--proxy-header") {
            if let Some((name, _)) = argument.split_once(':') {
                if self.should_redact_header(name) {
                    return Cow::Owned(format!("{name}: {REDACTED}"));
                }
            }
        }
        self.redact_value(argument)
    }

    /// Cut `value` at `max_value_length` bytes, on a char boundary.
    fn truncate<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let max = self.max_value_length;
        if value.len() <= max {
            return Cow::Borrowed(value);
        }
        let end = (0..=max)
            .rev()
            .find(|&i| value.is_char_boundary(i))
            .unwrap_or(0);
        let (kept, dropped) = value.split_at(end);
        Cow::Owned(format!("{kept}...[truncated {} bytes]", dropped.len()))
    }
}

/// JWTs and tokens carrying a well-known prefix.
fn is_likely_secret(value: &str) -> bool {
    let value = value.trim();
    looks_like_jwt(value)
        || TOKEN_PREFIXES.iter().any(|prefix| {
            value
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.len() > 10)
        })
}

fn looks_like_jwt(value: &str) -> bool {
    let segments: Vec<&str> = value.split('.').collect();
    segments.len() == 3
        && segments
            .iter()
            .all(|segment| segment.len() > 10 && segment.bytes().all(is_token_byte))
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"+/=_-".contains(&b)
}

/// Escape line breaks and tabs, drop other control characters.
///
/// Keeps one command on one log line.
pub fn sanitize_for_log(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Render `command` for logging with secrets redacted.
///
/// Does not touch the command's stored state.
pub fn format_command_for_log(command: &Command, config: &LogConfig) -> String {
    let mut options = Options::new();
    for slot in command.options() {
        let argument = slot
            .argument
            .as_deref()
            .map(|argument| config.redact_argument(&slot.flag, argument).into_owned());
        options.push(slot.flag.clone(), argument);
    }

    let rendered = template::render(
        command.template(),
        command.name(),
        &options.render(command.quote_style()),
        &config.redact_url(command.url()),
    );
    sanitize_for_log(&rendered)
}
