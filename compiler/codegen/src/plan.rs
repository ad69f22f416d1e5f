//! Request planning: path templates → executable request plans.
//!
//! A [`RequestPlan`] is the per-endpoint recipe for building a concrete
//! request from argument values: ordered path segments, query slots and
//! the optional body parameter. The per-target generators lower the plan
//! to source text; its semantics are exactly those of
//! [`runtime::UrlBuilder`], so literal segments are percent-encoded here,
//! once, at generation time, and agree byte-for-byte with runtime output.

use std::sync::OnceLock;

use regex::Regex;
use runtime::encoding::encode_path_literal;
use schema::{Endpoint, HttpMethod, SchemaViolation};

use crate::classify::ClassifiedParameters;

static PATH_TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn path_token_re() -> &'static Regex {
    PATH_TOKEN_RE.get_or_init(|| {
        Regex::new(r"\{([A-Za-z0-9_]*)\}|[^{]+|.").expect("path tokenization pattern compiles")
    })
}

/// One token of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    /// Literal template text, verbatim.
    Literal(String),
    /// A `{name}` placeholder.
    Parameter(String),
}

/// A tokenized path template.
///
/// Tokenization strips a leading `/` (the base URL supplies the joining
/// slash) and never merges or reorders tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    /// Tokens in template order.
    pub tokens: Vec<PathToken>,
}

impl PathTemplate {
    /// Tokenize `path` for the endpoint named by `operation_id`.
    ///
    /// # Errors
    /// [`SchemaViolation::MalformedPathTemplate`] on an empty `{}`
    /// placeholder or an unclosed `{`.
    pub fn parse(operation_id: &str, path: &str) -> Result<Self, SchemaViolation> {
        let rel_path = path.strip_prefix('/').unwrap_or(path);

        let mut tokens = Vec::new();
        for capture in path_token_re().captures_iter(rel_path) {
            if let Some(name) = capture.get(1) {
                if name.as_str().is_empty() {
                    return Err(SchemaViolation::MalformedPathTemplate {
                        operation_id: operation_id.to_string(),
                        path: path.to_string(),
                        detail: "empty `{}` placeholder".to_string(),
                    });
                }
                tokens.push(PathToken::Parameter(name.as_str().to_string()));
            } else {
                let text = capture.get(0).map(|m| m.as_str()).unwrap_or_default();
                if text == "{" {
                    return Err(SchemaViolation::MalformedPathTemplate {
                        operation_id: operation_id.to_string(),
                        path: path.to_string(),
                        detail: "unclosed `{`".to_string(),
                    });
                }
                tokens.push(PathToken::Literal(text.to_string()));
            }
        }

        Ok(Self { tokens })
    }

    /// Placeholder names in first-occurrence order, deduplicated.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for token in &self.tokens {
            if let PathToken::Parameter(name) = token {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    }
}

/// One segment of a planned request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Literal text, already percent-encoded (slashes preserved).
    Literal(String),
    /// A dynamic segment substituted from the named parameter and
    /// percent-encoded in full at call time.
    Parameter(String),
}

/// One query-string slot of a planned request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySlot {
    /// Parameter name, used verbatim as the query key.
    pub name: String,
    /// Required slots are always appended; optional slots only when the
    /// caller supplies a present, non-omitted value.
    pub required: bool,
}

/// The per-endpoint recipe for building a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    /// Operation identifier of the planned endpoint.
    pub operation_id: String,
    /// HTTP verb, verbatim from the declaration.
    pub method: HttpMethod,
    /// Path segments in template order.
    pub segments: Vec<PathSegment>,
    /// Query slots in declaration order.
    pub query: Vec<QuerySlot>,
    /// Name of the body parameter, when the endpoint declares one.
    pub body: Option<String>,
}

impl RequestPlan {
    /// Plan the request construction for `endpoint`.
    ///
    /// `classified` must come from the same endpoint; the classifier has
    /// already established the placeholder/parameter bijection, so this
    /// step cannot encounter unknown placeholders.
    pub fn build(
        endpoint: &Endpoint,
        classified: &ClassifiedParameters<'_>,
    ) -> Result<Self, SchemaViolation> {
        let template = PathTemplate::parse(&endpoint.operation_id, &endpoint.path)?;

        let segments = template
            .tokens
            .iter()
            .map(|token| match token {
                PathToken::Literal(text) => PathSegment::Literal(encode_path_literal(text)),
                PathToken::Parameter(name) => PathSegment::Parameter(name.clone()),
            })
            .collect();

        let query = classified
            .query
            .iter()
            .map(|p| QuerySlot { name: p.name.clone(), required: p.required })
            .collect();

        Ok(Self {
            operation_id: endpoint.operation_id.clone(),
            method: endpoint.method,
            segments,
            query,
            body: classified.body.map(|p| p.name.clone()),
        })
    }

    /// Whether the endpoint declares any query-eligible parameter.
    ///
    /// When true, generated code opens the query section unconditionally —
    /// the URL ends in a bare `?` if every optional entry is omitted at
    /// call time. Preserved observed behavior.
    pub fn has_query(&self) -> bool { !self.query.is_empty() }
}
