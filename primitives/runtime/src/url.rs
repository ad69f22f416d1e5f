//! Request URL construction for generated operations.
//!
//! The builder reproduces the URL contract of the original client
//! generation fixtures exactly, including one deliberate quirk: once an
//! endpoint declares any query-eligible parameter, the query string begins
//! with `?` even when every optional entry is omitted at call time. This
//! is preserved observed behavior; do not "fix" it without renegotiating
//! the contract with consumers.

use crate::encoding::encode_component;

/// A value rendered into a query-string entry.
///
/// Omission rules for optional parameters follow the documented contract:
/// absent values, boolean `false` and the empty string are treated as
/// "omit". Numeric zero is NOT omitted — presence is decided by the
/// caller's `Option`, not by truthiness.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Boolean entry, rendered as `true`/`false`.
    Bool(bool),
    /// Integral entry.
    Int(i64),
    /// Floating-point entry.
    Float(f64),
    /// Text entry.
    Str(String),
}

impl QueryValue {
    /// String form prior to percent-encoding.
    pub fn render(&self) -> String {
        match self {
            QueryValue::Bool(b) => b.to_string(),
            QueryValue::Int(i) => i.to_string(),
            QueryValue::Float(f) => f.to_string(),
            QueryValue::Str(s) => s.clone(),
        }
    }

    /// Whether an *optional* parameter carrying this value is dropped.
    pub fn is_omitted(&self) -> bool {
        matches!(self, QueryValue::Bool(false)) || matches!(self, QueryValue::Str(s) if s.is_empty())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self { QueryValue::Bool(value) }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self { QueryValue::Int(value) }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self { QueryValue::Float(value) }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self { QueryValue::Str(value.to_string()) }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self { QueryValue::Str(value) }
}

/// Incremental builder for one request URL.
///
/// Generated code drives this in template order: raw (pre-encoded) literal
/// segments and encoded dynamic segments, then optionally a query section.
/// Identical inputs always produce identical output.
#[derive(Debug)]
pub struct UrlBuilder {
    url: String,
    any_query_entry: bool,
}

impl UrlBuilder {
    /// Start from the client's base URL. The base is taken verbatim; the
    /// path template's leading `/` is stripped at generation time, so a
    /// base ending in `/` concatenates cleanly.
    pub fn new(base_url: &str) -> Self {
        Self { url: base_url.to_string(), any_query_entry: false }
    }

    /// Append a literal segment that was percent-encoded at generation
    /// time. No further escaping happens here.
    pub fn push_raw(&mut self, pre_encoded: &str) -> &mut Self {
        self.url.push_str(pre_encoded);
        self
    }

    /// Append a dynamic path argument, percent-encoding it in full.
    pub fn push_segment(&mut self, value: &str) -> &mut Self {
        self.url.push_str(&encode_component(value));
        self
    }

    /// Open the query section by appending `?`.
    ///
    /// Generated code calls this whenever the endpoint declares at least
    /// one query parameter — even if every entry is subsequently omitted,
    /// leaving a bare trailing `?` (preserved quirk).
    pub fn begin_query(&mut self) -> &mut Self {
        self.url.push('?');
        self
    }

    /// Append one `key=value` entry. Entries are joined with `&` in call
    /// order; the separator only appears between entries actually
    /// appended.
    pub fn append_query(&mut self, key: &str, value: &QueryValue) -> &mut Self {
        if self.any_query_entry {
            self.url.push('&');
        }
        self.url.push_str(&encode_component(key));
        self.url.push('=');
        self.url.push_str(&encode_component(&value.render()));
        self.any_query_entry = true;
        self
    }

    /// Append an optional entry, honoring the omission rules of
    /// [`QueryValue::is_omitted`].
    pub fn append_query_if_present(
        &mut self,
        key: &str,
        value: Option<QueryValue>,
    ) -> &mut Self {
        if let Some(value) = value {
            if !value.is_omitted() {
                self.append_query(key, &value);
            }
        }
        self
    }

    /// Final URL.
    pub fn finish(self) -> String { self.url }
}
