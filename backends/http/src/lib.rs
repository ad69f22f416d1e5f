#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `clientele-http` — HTTP Transport Backend
//!
//! This crate provides the concrete HTTP-based implementation of the
//! [`transport::Transport`] trait that generated clients use by default.
//!
//! ## Overview
//!
//! - Implements [`HttpTransport`], a thin wrapper over [`reqwest::Client`]
//! - Delivers prepared requests verbatim: verb, URL and body are never
//!   rewritten
//! - Supports unauthenticated and basic-authenticated endpoints
//!
//! Timeouts, proxies and TLS policy are configured on the underlying
//! `reqwest::Client`; pass a preconfigured client via
//! [`HttpTransport::from_client`] to control them. This crate adds no
//! retry logic of its own.
//!
//! ## Example
//! ```no_run
//! use clientele_http::HttpTransport;
//! use transport::{Method, PreparedRequest, Transport};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = HttpTransport::new();
//! let request = PreparedRequest::new(
//!     Method::Get,
//!     "https://api.example.com/products?with_attributes=true",
//! );
//! let response = transport.send(request).await.unwrap();
//! println!("status = {}", response.status);
//! # });
//! ```

use async_trait::async_trait;
use transport::{PreparedRequest, RawResponse, Transport, TransportError};

/// A concrete implementation of the [`Transport`] trait using HTTP.
///
/// Unlike higher-level layers, `HttpTransport` performs no URL assembly,
/// status interpretation or payload decoding — it delivers the prepared
/// request and hands the status and body bytes back. Errors encountered
/// during delivery are normalized into [`TransportError`] variants for
/// uniform handling.
#[derive(Clone, Default)]
pub struct HttpTransport {
    /// The underlying HTTP client used to perform requests.
    client: reqwest::Client,
    /// Optional basic authentication credentials `(username, password)`.
    auth: Option<(String, String)>,
}

impl HttpTransport {
    /// Constructs a new `HttpTransport` with a default client and no
    /// authentication.
    pub fn new() -> Self { Self::default() }

    /// Constructs a new `HttpTransport` with basic authentication.
    ///
    /// # Example
    /// ```
    /// use clientele_http::HttpTransport;
    ///
    /// let transport = HttpTransport::with_auth("apiuser", "apipassword");
    /// ```
    pub fn with_auth(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), auth: Some((user.into(), pass.into())) }
    }

    /// Constructs a new `HttpTransport` over a preconfigured
    /// [`reqwest::Client`].
    ///
    /// Use this to set timeouts, proxies or TLS options; the transport
    /// delegates all of that to the client.
    pub fn from_client(client: reqwest::Client) -> Self { Self { client, auth: None } }

    fn method_of(request: &PreparedRequest) -> reqwest::Method {
        match request.method {
            transport::Method::Get => reqwest::Method::GET,
            transport::Method::Post => reqwest::Method::POST,
            transport::Method::Put => reqwest::Method::PUT,
            transport::Method::Patch => reqwest::Method::PATCH,
            transport::Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// Delivers one prepared request and returns status plus body bytes.
    ///
    /// Bodies are sent as `application/json`; the prepared request only
    /// ever carries JSON payloads.
    ///
    /// # Errors
    /// - [`TransportError::Http`] if the request cannot be delivered
    /// - [`TransportError::Serialization`] if the response body cannot be
    ///   read
    async fn send(&self, request: PreparedRequest) -> transport::Result<RawResponse> {
        tracing::trace!(method = %request.method, url = %request.url, "dispatching request");

        let mut builder = self.client.request(Self::method_of(&request), &request.url);
        if let Some((user, pass)) = &self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|err| {
            tracing::error!("HTTP transport - request failed: {}", err);
            TransportError::Http(err.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|err| {
            tracing::error!("HTTP transport - failed to read body: {}", err);
            TransportError::Serialization(err.to_string())
        })?;

        Ok(RawResponse { status, body: body.to_vec() })
    }

    /// Returns the backend descriptor.
    fn descriptor(&self) -> &str { "http" }
}

#[cfg(test)]
mod tests {
    use transport::Method;

    use super::*;

    #[test]
    fn test_new() {
        let transport = HttpTransport::new();
        assert!(transport.auth.is_none());
        assert_eq!(transport.descriptor(), "http");
    }

    #[test]
    fn test_with_auth() {
        let transport = HttpTransport::with_auth("apiuser", "apipassword");

        let (user, pass) = transport.auth.as_ref().expect("auth should be set");
        assert_eq!(user, "apiuser");
        assert_eq!(pass, "apipassword");
    }

    #[tokio::test]
    async fn test_send_against_unreachable_host() {
        // Port 9 (discard) is not listening; delivery must fail with an
        // Http error, never a fabricated Ok response.
        let transport = HttpTransport::new();
        let request = PreparedRequest::new(Method::Get, "http://127.0.0.1:9/products?");

        let result = transport.send(request).await;
        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
