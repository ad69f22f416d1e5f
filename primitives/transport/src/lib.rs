#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `clientele-transport` — Foundational Communication Layer
//!
//! This crate defines the **core transport abstraction** that generated
//! clients issue their requests through.
//!
//! It provides the fundamental interface (`Transport` trait) for delivering
//! one fully-formed HTTP request and returning the raw response. Backends
//! such as `clientele-http` implement this trait to perform the actual I/O
//! work; mock transports implement it for tests.
//!
//! ## Core Concepts
//!
//! ### `PreparedRequest`
//! A request the generated code has already assembled: verb, final URL
//! (path substitution and query construction happen upstream in the
//! runtime crate) and an optional serialized body.
//!
//! ### `Transport` Trait
//! Defines how a prepared request is sent, returning a [`RawResponse`]
//! (status + body bytes) rather than a typed result. Decoding into the
//! declared response type happens in the runtime crate, where failures are
//! classified uniformly.
//!
//! ### `TransportError`
//! Enumerates the classes of delivery failure, so that higher layers can
//! reason uniformly about network and serialization problems without
//! backend-specific detail leaking through.
//!
//! ### `DynTransport`
//! A type-erased (`Arc<dyn Transport>`) wrapper for ergonomic sharing —
//! generated clients hold one of these, so any backend can be plugged in
//! without generic parameters.
//!
//! Cancellation, timeouts and retries are deliberately not modelled here;
//! they belong to the backend (e.g. a preconfigured `reqwest` client).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

/// Type alias for structured error handling in transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Canonical error type for all transport implementations.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// An HTTP-level failure (connection refused, timeout, malformed URL).
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// The server answered with a non-success status code.
    #[error("server returned status {code}")]
    Status {
        /// The HTTP status code.
        code: u16,
    },

    /// Failure to serialize a request body or read a response body.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Any other error not covered by the specific variants above.
    #[error("other error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self { TransportError::Serialization(err.to_string()) }
}

/// HTTP verbs carried on prepared requests.
///
/// The verb is defined here rather than borrowed from the generator-side
/// model so that generated clients link only the runtime crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl Method {
    /// Canonical upper-case wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A fully formed request, ready for delivery.
///
/// Identical arguments upstream always produce a byte-identical
/// `PreparedRequest`; transports must not reorder or rewrite any part of
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP verb, taken verbatim from the endpoint declaration.
    pub method: Method,
    /// Final URL including base, encoded path and query string.
    pub url: String,
    /// Serialized JSON body, when the endpoint declares one.
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// A request without a body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), body: None }
    }

    /// A request carrying `value` serialized as its JSON body.
    ///
    /// # Errors
    /// [`TransportError::Serialization`] if the value cannot be serialized.
    pub fn with_json_body<T: Serialize>(
        method: Method,
        url: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(Self { method, url: url.into(), body: Some(body) })
    }
}

/// The raw outcome of delivering a request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status code is in the 2xx success range.
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// The base transport trait for single-request delivery.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one prepared request and return the raw response.
    ///
    /// Implementations return `Ok` for any response the server produced,
    /// including non-2xx statuses; only delivery failures map to
    /// [`TransportError`]. Interpreting the status is the caller's
    /// concern.
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse>;

    /// Returns a descriptor of the backend, e.g. a symbolic name or URL.
    ///
    /// For mock or in-memory transports this is typically a test label.
    fn descriptor(&self) -> &str;
}

/// Type alias for a shared, dynamically dispatched transport instance.
///
/// This enables pluggable backends at runtime without generic parameters:
/// ```
/// use transport::{DynTransport, Transport};
///
/// fn use_transport(t: DynTransport) {
///     println!("Sending via: {}", t.descriptor());
/// }
/// ```
pub type DynTransport = Arc<dyn Transport>;
