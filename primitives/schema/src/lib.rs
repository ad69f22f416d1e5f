#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `clientele-schema` — Resolved API Model
//!
//! This crate defines the typed, already-resolved representation of an API
//! that the rest of the workspace generates client code from: type nodes,
//! endpoint parameters, endpoints and the client specification.
//!
//! The model is pure data. It is constructed once per generation run by an
//! upstream resolver (parsing a raw schema format is not this workspace's
//! concern), is immutable afterwards, and is discarded once emission
//! completes. Reused type nodes are shared via [`std::sync::Arc`] so that
//! two endpoints referring to the same declared type observe the same
//! allocation rather than a deep copy.
//!
//! Generation-time inconsistencies in the model are reported as
//! [`SchemaViolation`] values; they abort a generation run before anything
//! is emitted.

pub mod model;

use thiserror::Error;

pub use model::{
    AliasType, BaseUrlConfig, ClientSpec, Endpoint, ErrorHookConfig, Field, HttpMethod,
    ObjectType, ParamLocation, Parameter, Primitive, TypeNode, TypeRef,
};

/// A generation-time inconsistency in the resolved model.
///
/// Every variant is fatal: generation halts and no partial client is
/// emitted. Runtime failures of generated clients are a separate concern
/// (see the transport and runtime crates).
#[derive(Debug, Error)]
pub enum SchemaViolation {
    /// A `{name}` placeholder in a path template has no declared parameter.
    #[error(
        "endpoint `{operation_id}`: path placeholder `{{{placeholder}}}` has no matching parameter"
    )]
    UnmatchedPlaceholder {
        /// Operation identifier of the offending endpoint.
        operation_id: String,
        /// Placeholder name without braces.
        placeholder: String,
    },

    /// A parameter is declared with path placement but the template never
    /// mentions it.
    #[error(
        "endpoint `{operation_id}`: parameter `{parameter}` is placed in the path but `{{{parameter}}}` does not occur in `{path}`"
    )]
    UnusedPathParameter {
        /// Operation identifier of the offending endpoint.
        operation_id: String,
        /// Name of the dangling parameter.
        parameter: String,
        /// The endpoint's path template.
        path: String,
    },

    /// Two parameters of one endpoint share a name.
    #[error("endpoint `{operation_id}`: duplicate parameter name `{name}`")]
    DuplicateParameter {
        /// Operation identifier of the offending endpoint.
        operation_id: String,
        /// The repeated parameter name.
        name: String,
    },

    /// More than one parameter of one endpoint is placed in the body.
    #[error("endpoint `{operation_id}`: duplicate body parameters `{first}` and `{second}`")]
    MultipleBodyParameters {
        /// Operation identifier of the offending endpoint.
        operation_id: String,
        /// Name of the first body parameter.
        first: String,
        /// Name of the second body parameter.
        second: String,
    },

    /// The path template itself cannot be tokenized.
    #[error("endpoint `{operation_id}`: malformed path template `{path}`: {detail}")]
    MalformedPathTemplate {
        /// Operation identifier of the offending endpoint.
        operation_id: String,
        /// The endpoint's path template.
        path: String,
        /// Human-readable description of the defect.
        detail: String,
    },

    /// Two type declarations share a name.
    #[error("duplicate type declaration `{name}`")]
    DuplicateTypeDeclaration {
        /// The repeated type name.
        name: String,
    },

    /// An anonymous node was submitted as a named declaration.
    #[error("expected a named type declaration, got an anonymous node")]
    AnonymousTypeDeclaration,

    /// A named type is referenced but never declared.
    #[error("reference to undeclared type `{name}`")]
    UnknownTypeReference {
        /// The unresolved type name.
        name: String,
    },
}

/// Convenient result alias for model validation.
pub type Result<T> = std::result::Result<T, SchemaViolation>;
