//! Command builder
//!
//! [`Command`] owns everything that goes into the command line and renders it
//! on demand. Building never resets state, so a command can be tweaked and
//! rebuilt any number of times.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::options::{OptionEntry, Options};
use crate::quote::QuoteStyle;
use crate::request::{RequestLike, import_request};
use crate::template::{self, DEFAULT_TEMPLATE};

#[cfg(feature = "logging")]
use crate::logging_impl::{LogConfig, format_command_for_log};

/// Default command name.
pub const DEFAULT_NAME: &str = "curl";

/// Builder for a curl command line.
///
/// # Example
///
/// ```rust
/// use curl_builder::{Command, QuoteStyle};
///
/// let mut command = Command::new();
/// command
///     .set_url("http://example.com")
///     .add_option("-H", Some("Accept: text/html"))
///     .add_option("-L", None);
/// assert_eq!(command.build(), "curl -H 'Accept: text/html' -L http://example.com");
///
/// command.set_quote_style(QuoteStyle::Double);
/// assert_eq!(command.build(), r#"curl -H "Accept: text/html" -L http://example.com"#);
/// ```
#[derive(Clone)]
pub struct Command {
    name: String,
    url: String,
    template: String,
    options: Options,
    quote_style: QuoteStyle,
    command: String,
    request: Option<Arc<dyn RequestLike>>,
    #[cfg(feature = "logging")]
    log_config: LogConfig,
}

impl Default for Command {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("template", &self.template)
            .field("options", &self.options)
            .field("quote_style", &self.quote_style)
            .field("has_request", &self.request.is_some())
            .finish_non_exhaustive()
    }
}

impl Command {
    /// Create a command with the default template and single quoting.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            url: String::new(),
            template: DEFAULT_TEMPLATE.to_string(),
            options: Options::new(),
            quote_style: QuoteStyle::default(),
            command: String::new(),
            request: None,
            #[cfg(feature = "logging")]
            log_config: LogConfig::default(),
        }
    }

    /// Render the command line and remember it as the last built command.
    pub fn build(&mut self) -> String {
        self.command = self.render();

        #[cfg(feature = "logging")]
        tracing::debug!(
            command = %format_command_for_log(self, &self.log_config),
            options = self.options.len(),
            "built command"
        );

        self.command.clone()
    }

    fn render(&self) -> String {
        template::render(
            &self.template,
            &self.name,
            &self.options.render(self.quote_style),
            &self.url,
        )
    }

    /// Last built command; empty before the first [`build`](Self::build).
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Overwrite the stored command string.
    pub fn set_command(&mut self, command: impl Into<String>) -> &mut Self {
        self.command = command.into();
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = url.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set the layout, using the `{name}`, `{options}` and `{url}` placeholders.
    pub fn set_template(&mut self, template: impl Into<String>) -> &mut Self {
        self.template = template.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Replace all options with the normalized `input`.
    ///
    /// Leaves the current options untouched when `input` is malformed.
    pub fn set_options<I, E>(&mut self, input: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<OptionEntry>,
    {
        self.options = self.normalize(input)?;
        Ok(self)
    }

    /// Append the normalized `input` after the existing options.
    pub fn add_options<I, E>(&mut self, input: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<OptionEntry>,
    {
        let options = self.normalize(input)?;
        self.options.extend(options);
        Ok(self)
    }

    fn normalize<I, E>(&self, input: I) -> Result<Options>
    where
        I: IntoIterator<Item = E>,
        E: Into<OptionEntry>,
    {
        let normalized = Options::normalize(input);
        #[cfg(feature = "logging")]
        if let Err(ref e) = normalized {
            tracing::warn!(error = %e, "rejected option input");
        }
        normalized
    }

    /// Append one option; repeated flags accumulate.
    pub fn add_option(&mut self, flag: impl Into<String>, argument: Option<&str>) -> &mut Self {
        self.options.push(flag, argument.map(str::to_string));
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_quote_style(&mut self, style: QuoteStyle) -> &mut Self {
        self.quote_style = style;
        self
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.quote_style
    }

    /// Attach a request, importing it right away when `parse` is true.
    pub fn set_request<R>(&mut self, request: R, parse: bool) -> &mut Self
    where
        R: RequestLike + 'static,
    {
        self.set_shared_request(Arc::new(request), parse)
    }

    /// Attach a request shared with other owners.
    pub fn set_shared_request(&mut self, request: Arc<dyn RequestLike>, parse: bool) -> &mut Self {
        self.request = Some(request);
        if parse {
            self.parse_request();
        }
        self
    }

    pub fn request(&self) -> Option<&dyn RequestLike> {
        self.request.as_deref()
    }

    /// Import URL, headers and body from the attached request.
    ///
    /// Returns `false` when no request is attached.
    pub fn parse_request(&mut self) -> bool {
        let Some(request) = self.request.clone() else {
            return false;
        };
        let added = import_request(self, &*request);

        #[cfg(feature = "logging")]
        tracing::debug!(options = added, "imported request");
        #[cfg(not(feature = "logging"))]
        let _ = added;

        true
    }

    #[cfg(feature = "logging")]
    pub fn set_log_config(&mut self, config: LogConfig) -> &mut Self {
        self.log_config = config;
        self
    }

    #[cfg(feature = "logging")]
    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
