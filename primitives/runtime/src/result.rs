//! The uniform success-or-error result channel.
//!
//! Every generated operation resolves to [`ApiResult<T>`]. Whatever goes
//! wrong — delivery failure, non-success status, payload that does not
//! deserialize — the caller inspects one tagged value; nothing is thrown
//! past it.
//!
//! A per-client [`ErrorHook`] may intercept errors before they reach the
//! caller. The hook cannot name the operation's response type (one hook
//! serves every operation of a client), so a recovery is expressed as a
//! raw JSON value that is re-decoded against the declared response type.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use transport::{DynTransport, PreparedRequest, RawResponse, TransportError};

/// Runtime failure of a generated operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying request mechanism failed, or the server answered
    /// with a non-success status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response payload does not conform to the declared response
    /// type.
    #[error("deserialization error: {detail}")]
    Deserialization {
        /// Human-readable description of the mismatch.
        detail: String,
    },
}

/// Result alias for generated operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Disposition returned by an [`ErrorHook`].
pub enum HookOutcome {
    /// Treat the call as successful with this replacement payload; it is
    /// decoded against the operation's declared response type.
    Recover(serde_json::Value),
    /// Propagate this (possibly transformed) error to the caller.
    Fail(ApiError),
}

/// Caller-supplied handler invoked on transport or deserialization
/// failure. Configured per client instance, never global.
pub type ErrorHook = Arc<dyn Fn(ApiError) -> HookOutcome + Send + Sync>;

/// Wrap a raw call outcome into the uniform result.
///
/// Success requires a 2xx status and a body that deserializes into `T`.
/// On any failure the configured hook (if present) decides the final
/// outcome; otherwise the error is returned directly.
pub fn adapt_response<T: DeserializeOwned>(
    outcome: transport::Result<RawResponse>,
    hook: Option<&ErrorHook>,
) -> ApiResult<T> {
    let error = match outcome {
        Ok(raw) if raw.is_success() => match serde_json::from_slice::<T>(&raw.body) {
            Ok(value) => return Ok(value),
            Err(err) => ApiError::Deserialization { detail: err.to_string() },
        },
        Ok(raw) => ApiError::Transport(TransportError::Status { code: raw.status }),
        Err(err) => ApiError::Transport(err),
    };

    match hook {
        Some(hook) => match hook(error) {
            HookOutcome::Recover(value) => serde_json::from_value(value)
                .map_err(|err| ApiError::Deserialization { detail: err.to_string() }),
            HookOutcome::Fail(error) => Err(error),
        },
        None => Err(error),
    }
}

/// Deliver one prepared request and adapt its outcome.
///
/// This is the call every generated operation lowers to: one asynchronous
/// unit of work whose completion is independent of any other in-flight
/// operation.
pub async fn dispatch<T: DeserializeOwned>(
    transport: &DynTransport,
    request: PreparedRequest,
    hook: Option<&ErrorHook>,
) -> ApiResult<T> {
    let outcome = transport.send(request).await;
    adapt_response(outcome, hook)
}
