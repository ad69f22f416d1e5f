#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `clientele-runtime` — Support Library for Generated Clients
//!
//! Generated Rust clients link this crate for everything that happens at
//! call time: URL construction ([`UrlBuilder`]), query-value rendering and
//! omission rules ([`QueryValue`]), opaque payloads ([`OpaqueValue`]), and
//! the uniform success-or-error result channel ([`ApiResult`],
//! [`adapt_response`], [`dispatch`]).
//!
//! The generator (`clientele-codegen`) shares the percent-encoding helpers
//! in [`encoding`] so that literal path segments baked into generated
//! source agree byte-for-byte with what this crate produces at runtime.
//!
//! ## The result channel
//!
//! Every generated operation resolves to `ApiResult<T>` where `T` is the
//! endpoint's declared response type. Transport failures, non-success
//! statuses and payloads that do not deserialize into `T` all surface as
//! the error branch — nothing is thrown past the caller. A per-client
//! [`ErrorHook`] may intercept any of these errors and either recover with
//! a replacement payload or propagate a (possibly transformed) error.

pub mod encoding;
pub mod opaque;
pub mod result;
pub mod url;

pub use opaque::OpaqueValue;
pub use result::{adapt_response, dispatch, ApiError, ApiResult, ErrorHook, HookOutcome};
pub use url::{QueryValue, UrlBuilder};
