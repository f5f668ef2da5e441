//! Request adapter
//!
//! The builder reads requests through the narrow [`RequestLike`] trait and has
//! no dependency on a concrete HTTP message type. [`HttpRequest`] is a plain
//! owned implementation; with the `http` feature, `http::Request<B>`
//! implements the trait as well.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::command::Command;

/// Headers that may legitimately repeat and must not be comma-folded.
pub const UNFOLDED_HEADERS: [&str; 3] = ["Set-Cookie", "WWW-Authenticate", "Proxy-Authenticate"];

/// Header never exported: curl derives it from the URL.
pub const SKIPPED_HEADER: &str = "Host";

/// A request the builder can import.
pub trait RequestLike: Send + Sync {
    /// Request target as a string.
    fn uri(&self) -> String;

    /// Header names with all their values, in order.
    fn headers(&self) -> Vec<(String, Vec<String>)>;

    /// Request body.
    fn body(&self) -> Cow<'_, [u8]>;

    /// Values of a header joined with `", "`, looked up case-insensitively.
    fn header_line(&self, name: &str) -> Option<String> {
        let values: Vec<String> = self
            .headers()
            .into_iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .flat_map(|(_, values)| values)
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }
}

/// Owned request description.
///
/// Deserializes from JSON such as
/// `{"uri": "http://example.com", "headers": {"Accept": ["text/html"]}, "body": "data"}`.
/// Header names differing only in case are merged under the first spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub uri: String,
    #[serde(default, deserialize_with = "fold_headers")]
    pub headers: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub body: String,
}

impl HttpRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Append a header value, keeping earlier values of the same header.
    ///
    /// The name is matched case-insensitively against headers already set.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        fold_header(&mut self.headers, name.into(), [value.into()]);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Decode a request description from JSON.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn fold_header(
    headers: &mut IndexMap<String, Vec<String>>,
    name: String,
    values: impl IntoIterator<Item = String>,
) {
    let position = headers.keys().position(|key| key.eq_ignore_ascii_case(&name));
    match position {
        Some(index) => {
            if let Some((_, existing)) = headers.get_index_mut(index) {
                existing.extend(values);
            }
        }
        None => {
            headers.insert(name, values.into_iter().collect());
        }
    }
}

fn fold_headers<'de, D>(deserializer: D) -> Result<IndexMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Vec<String>>::deserialize(deserializer)?;
    let mut headers = IndexMap::with_capacity(raw.len());
    for (name, values) in raw {
        fold_header(&mut headers, name, values);
    }
    Ok(headers)
}

impl RequestLike for HttpRequest {
    fn uri(&self) -> String {
        self.uri.clone()
    }

    fn headers(&self) -> Vec<(String, Vec<String>)> {
        self.headers
            .iter()
            .map(|(name, values)| (name.clone(), values.clone()))
            .collect()
    }

    fn body(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.body.as_bytes())
    }
}

#[cfg(feature = "http")]
impl<B> RequestLike for http::Request<B>
where
    B: AsRef<[u8]> + Send + Sync,
{
    fn uri(&self) -> String {
        http::Request::uri(self).to_string()
    }

    fn headers(&self) -> Vec<(String, Vec<String>)> {
        let headers = http::Request::headers(self);
        headers
            .keys()
            .map(|name| {
                let values = headers
                    .get_all(name)
                    .iter()
                    .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                    .collect();
                (name.as_str().to_string(), values)
            })
            .collect()
    }

    fn body(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(http::Request::body(self).as_ref())
    }
}

fn is_unfolded(name: &str) -> bool {
    UNFOLDED_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}

/// Copy URL, headers and body of `request` into `command`.
///
/// Headers are grouped case-insensitively under their first spelling, so each
/// name yields one folded `-H`. A header listed without values is sent as
/// `Name;`, curl's form for an empty header.
///
/// Returns the number of options added.
pub fn import_request(command: &mut Command, request: &dyn RequestLike) -> usize {
    let mut added = 0;
    command.set_url(request.uri());

    let mut grouped: IndexMap<String, (String, Vec<String>)> = IndexMap::new();
    for (name, values) in request.headers() {
        if name.eq_ignore_ascii_case(SKIPPED_HEADER) {
            continue;
        }
        grouped
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| (name, Vec::new()))
            .1
            .extend(values);
    }

    for (name, values) in grouped.into_values() {
        if values.is_empty() {
            command.add_option("-H", Some(format!("{name};").as_str()));
            added += 1;
        } else if is_unfolded(&name) {
            for value in values {
                command.add_option("-H", Some(format!("{name}: {value}").as_str()));
                added += 1;
            }
        } else {
            command.add_option("-H", Some(format!("{name}: {}", values.join(", ")).as_str()));
            added += 1;
        }
    }

    let body = request.body();
    if !body.is_empty() {
        command.add_option("-d", Some(&*String::from_utf8_lossy(&body)));
        added += 1;
    }
    added
}
