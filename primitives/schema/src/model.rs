//! Data model for resolved API schemas.
//!
//! The shapes here mirror what a schema resolver produces: a set of named
//! type declarations plus a list of endpoints, each carrying its parameters
//! and response type. Field and parameter order is significant throughout —
//! it is observable in generated output and must survive round-trips.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared handle to a type node.
///
/// Endpoints that reuse a declared type hold clones of the same `Arc`, so
/// the node is referenced rather than copied and identity comparisons via
/// [`Arc::ptr_eq`] are meaningful.
pub type TypeRef = Arc<TypeNode>;

/// A resolved type in the API model.
///
/// The variant set is deliberately closed: every reachable node in a
/// well-formed model is one of these, which keeps downstream type mapping
/// total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TypeNode {
    /// A scalar type.
    Primitive(Primitive),
    /// A named alias for another type.
    Alias(AliasType),
    /// A named structure with ordered fields.
    Object(ObjectType),
    /// An ordered sequence of elements.
    Array {
        /// Element type.
        element: TypeRef,
    },
    /// A string-keyed associative container.
    Map {
        /// Value type; keys are always string-like.
        value: TypeRef,
    },
    /// Unknown or deliberately untyped data.
    ///
    /// Opaque nodes map to an explicit opaque value type in every target;
    /// structural access requires a caller-acknowledged cast.
    Opaque,
}

impl TypeNode {
    /// The declared name of this node, for named variants.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            TypeNode::Alias(alias) => Some(&alias.name),
            TypeNode::Object(object) => Some(&object.name),
            _ => None,
        }
    }

    /// Whether values of this type are already strings when stringified
    /// for URL embedding (i.e. no conversion call is needed in emitted
    /// code). Aliases delegate to their underlying type.
    pub fn is_string(&self) -> bool {
        match self {
            TypeNode::Primitive(Primitive::String) => true,
            TypeNode::Alias(alias) => alias.underlying.is_string(),
            _ => false,
        }
    }
}

/// Scalar types of the model.
///
/// `Integer` and `Number` are kept apart even though some targets merge
/// them; the distinction is meaningful for targets with separate integral
/// types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    /// Boolean truth value.
    Boolean,
    /// Integral number.
    Integer,
    /// Floating-point number.
    Number,
    /// Unicode text.
    String,
}

/// A named alias (typedef) for another type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasType {
    /// Declared alias name.
    pub name: String,
    /// The aliased type.
    pub underlying: TypeRef,
    /// Documentation attached to the declaration, possibly empty.
    pub doc: String,
}

/// A named structure with ordered fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectType {
    /// Declared structure name.
    pub name: String,
    /// Documentation attached to the declaration, possibly empty.
    pub doc: String,
    /// Fields in declaration order. The order is observable in generated
    /// output and must be preserved exactly.
    pub fields: Vec<Field>,
}

/// One field of an [`ObjectType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Field name as declared.
    pub name: String,
    /// Field type.
    pub ty: TypeRef,
    /// Whether the field must be present. Non-required fields are wrapped
    /// in a presence-indicating form in every target.
    pub required: bool,
    /// Documentation, possibly empty.
    pub doc: String,
}

/// Declared placement of an endpoint parameter.
///
/// This is the placement carried over from the resolved input. The
/// classifier in the codegen crate re-derives and cross-checks it against
/// the endpoint's path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamLocation {
    /// Substituted into a `{name}` placeholder of the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Serialized as the request body.
    Body,
}

/// One declared parameter of an endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name as declared.
    pub name: String,
    /// Declared placement.
    pub location: ParamLocation,
    /// Parameter type.
    pub ty: TypeRef,
    /// Whether the caller must supply a value.
    pub required: bool,
    /// Documentation, possibly empty.
    pub doc: String,
}

/// HTTP verbs supported by generated operations.
///
/// The verb is taken verbatim from the endpoint declaration; the generator
/// never rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
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

impl HttpMethod {
    /// Canonical upper-case wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One API operation: path template, verb, parameters and response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Operation identifier; generated operations are named from it.
    pub operation_id: String,
    /// Path template with `{name}` placeholders, e.g. `products/{id}`.
    /// A leading `/` is tolerated and stripped during planning.
    pub path: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Declared response type; `None` means the response payload is
    /// treated as opaque.
    pub response: Option<TypeRef>,
    /// Documentation, possibly empty.
    pub doc: String,
}

/// Initial base-URL configuration baked into the generated client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseUrlConfig {
    /// Value assigned to the base-URL field at construction time. The
    /// field stays settable on the generated client instance.
    pub default: String,
}

/// Whether the generated client exposes an error-hook surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHookConfig {
    /// When `false`, no hook field or setter is emitted and runtime errors
    /// surface directly in the result's error branch.
    pub enabled: bool,
}

impl Default for ErrorHookConfig {
    fn default() -> Self { Self { enabled: true } }
}

/// The full client specification: configuration plus ordered endpoints.
///
/// Emission order follows `endpoints` declaration order, which makes
/// repeated generation runs reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSpec {
    /// Name of the generated client type, e.g. `RemoteCaller`.
    pub name: String,
    /// Base-URL configuration.
    pub base_url: BaseUrlConfig,
    /// Error-hook configuration.
    pub error_hook: ErrorHookConfig,
    /// Endpoints in declaration order.
    pub endpoints: Vec<Endpoint>,
}
