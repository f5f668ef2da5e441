//! curl-builder - Build shell-safe curl command lines
//!
//! Turns a URL, a set of options and optionally an HTTP request into one line
//! of shell syntax. Nothing is executed; the output is only guaranteed to
//! parse back into the intended arguments.
//!
//! # Example
//!
//! ```rust
//! use curl_builder::{Command, HttpRequest};
//!
//! let request = HttpRequest::new("http://example.com")
//!     .with_header("Accept", "text/html")
//!     .with_header("Accept", "application/xhtml+xml")
//!     .with_body("data");
//!
//! let mut command = Command::new();
//! command.set_request(request, true);
//! assert_eq!(
//!     command.build(),
//!     "curl -H 'Accept: text/html, application/xhtml+xml' -d 'data' http://example.com"
//! );
//! ```
//!
//! # Features
//!
//! - `logging`: structured logging through `tracing`, with secrets redacted
//!   according to [`LogConfig`](crate::LogConfig)
//! - `http`: import `http::Request<B>` values directly

mod command;
mod error;
mod options;
mod quote;
mod request;
pub mod template;

#[cfg(feature = "logging")]
mod logging_impl;

pub use command::{Command, DEFAULT_NAME};
pub use error::{Error, Result};
pub use options::{OptionEntry, OptionValue, Options, OptionsInput, Slot};
pub use quote::{QuoteStyle, quote};
pub use request::{HttpRequest, RequestLike, SKIPPED_HEADER, UNFOLDED_HEADERS, import_request};
pub use template::{DEFAULT_TEMPLATE, TEMPLATE_NAME, TEMPLATE_OPTIONS, TEMPLATE_URL};

#[cfg(feature = "logging")]
pub use logging_impl::{LogConfig, format_command_for_log, sanitize_for_log};
