//! Parameter classification.
//!
//! Each declared parameter of an endpoint is assigned to exactly one of
//! Path, Query or Body, in declaration order:
//!
//! 1. its name occurs as a `{name}` placeholder in the path template → Path;
//! 2. otherwise, it is the designated request-body argument → Body;
//! 3. otherwise → Query.
//!
//! The classifier also enforces the placeholder/parameter bijection: a
//! placeholder without a declared parameter, or a declared path parameter
//! without a placeholder, aborts generation.

use std::collections::HashSet;

use schema::{Endpoint, ParamLocation, Parameter, SchemaViolation};

use crate::plan::PathTemplate;

/// One parameter slot of a generated operation's call signature.
#[derive(Debug, Clone, Copy)]
pub struct CallSlot<'a> {
    /// The declared parameter.
    pub parameter: &'a Parameter,
    /// The classified placement.
    pub location: ParamLocation,
    /// Whether the slot is positional-required in the signature. Path
    /// parameters and the body argument are always required at the call
    /// site; query parameters follow their declaration.
    pub call_required: bool,
}

/// The classified parameters of one endpoint.
#[derive(Debug)]
pub struct ClassifiedParameters<'a> {
    /// Path parameters in placeholder (first-occurrence) order, as
    /// consumed by URL construction.
    pub path: Vec<&'a Parameter>,
    /// Query parameters in declaration order.
    pub query: Vec<&'a Parameter>,
    /// The body parameter, when declared.
    pub body: Option<&'a Parameter>,
    /// Signature slots: required first (Path in declared order, then
    /// Query, then Body), then optional, declaration order within groups.
    pub call_order: Vec<CallSlot<'a>>,
}

impl<'a> ClassifiedParameters<'a> {
    /// Find a classified path parameter by placeholder name.
    ///
    /// The bijection established at classification time guarantees a
    /// match for every placeholder of the same endpoint.
    pub fn path_parameter(&self, name: &str) -> Option<&'a Parameter> {
        self.path.iter().copied().find(|p| p.name == name)
    }
}

/// Classify the parameters of `endpoint` against its path template.
///
/// # Errors
/// Any [`SchemaViolation`] described in the module docs; the first
/// violation encountered aborts classification.
pub fn classify(endpoint: &Endpoint) -> Result<ClassifiedParameters<'_>, SchemaViolation> {
    let template = PathTemplate::parse(&endpoint.operation_id, &endpoint.path)?;
    let placeholders = template.placeholders();
    let placeholder_set: HashSet<&str> = placeholders.iter().copied().collect();

    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut path_declared: Vec<&Parameter> = Vec::new();
    let mut query: Vec<&Parameter> = Vec::new();
    let mut body: Option<&Parameter> = None;

    for parameter in &endpoint.parameters {
        if !seen_names.insert(parameter.name.as_str()) {
            return Err(SchemaViolation::DuplicateParameter {
                operation_id: endpoint.operation_id.clone(),
                name: parameter.name.clone(),
            });
        }

        if placeholder_set.contains(parameter.name.as_str()) {
            path_declared.push(parameter);
        } else if parameter.location == ParamLocation::Body {
            if let Some(first) = body {
                return Err(SchemaViolation::MultipleBodyParameters {
                    operation_id: endpoint.operation_id.clone(),
                    first: first.name.clone(),
                    second: parameter.name.clone(),
                });
            }
            body = Some(parameter);
        } else {
            if parameter.location == ParamLocation::Path {
                // Declared as a path parameter, but the template never
                // mentions it.
                return Err(SchemaViolation::UnusedPathParameter {
                    operation_id: endpoint.operation_id.clone(),
                    parameter: parameter.name.clone(),
                    path: endpoint.path.clone(),
                });
            }
            query.push(parameter);
        }
    }

    // Every placeholder must have a declared parameter.
    for placeholder in &placeholders {
        if !path_declared.iter().any(|p| p.name == *placeholder) {
            return Err(SchemaViolation::UnmatchedPlaceholder {
                operation_id: endpoint.operation_id.clone(),
                placeholder: (*placeholder).to_string(),
            });
        }
    }

    // Reorder path parameters into placeholder order for URL construction.
    let path: Vec<&Parameter> = placeholders
        .iter()
        .filter_map(|name| path_declared.iter().copied().find(|p| p.name == *name))
        .collect();

    let call_order = build_call_order(&path_declared, &query, body);

    Ok(ClassifiedParameters { path, query, body, call_order })
}

/// Required-first signature ordering: Path (declared order), Query
/// (declared order), Body, then optional Query parameters.
fn build_call_order<'a>(
    path_declared: &[&'a Parameter],
    query: &[&'a Parameter],
    body: Option<&'a Parameter>,
) -> Vec<CallSlot<'a>> {
    let mut slots = Vec::new();

    for parameter in path_declared {
        slots.push(CallSlot { parameter, location: ParamLocation::Path, call_required: true });
    }
    for parameter in query.iter().filter(|p| p.required) {
        slots.push(CallSlot { parameter, location: ParamLocation::Query, call_required: true });
    }
    if let Some(parameter) = body {
        // A body argument is either declared or absent; it never becomes
        // optional through omission rules.
        slots.push(CallSlot { parameter, location: ParamLocation::Body, call_required: true });
    }
    for parameter in query.iter().filter(|p| !p.required) {
        slots.push(CallSlot { parameter, location: ParamLocation::Query, call_required: false });
    }

    slots
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use schema::{HttpMethod, Primitive, TypeNode, TypeRef};

    use super::*;

    fn string_ty() -> TypeRef { Arc::new(TypeNode::Primitive(Primitive::String)) }

    fn param(name: &str, location: ParamLocation, required: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            location,
            ty: string_ty(),
            required,
            doc: String::new(),
        }
    }

    fn endpoint(path: &str, parameters: Vec<Parameter>) -> Endpoint {
        Endpoint {
            operation_id: "op".to_string(),
            path: path.to_string(),
            method: HttpMethod::Get,
            parameters,
            response: None,
            doc: String::new(),
        }
    }

    #[test]
    fn test_placeholder_parameter_bijection() {
        let ep = endpoint(
            "/products/{id}",
            vec![
                param("id", ParamLocation::Path, true),
                param("verbose", ParamLocation::Query, false),
            ],
        );

        let classified = classify(&ep).expect("well-formed endpoint");
        assert_eq!(classified.path.len(), 1);
        assert_eq!(classified.path[0].name, "id");
        assert_eq!(classified.query.len(), 1);
        assert!(classified.body.is_none());
    }

    #[test]
    fn test_declared_query_matching_placeholder_becomes_path() {
        // The template decides: a placeholder match wins over the
        // declared placement.
        let ep = endpoint("/products/{id}", vec![param("id", ParamLocation::Query, true)]);

        let classified = classify(&ep).expect("well-formed endpoint");
        assert_eq!(classified.path.len(), 1);
        assert!(classified.query.is_empty());
    }

    #[test]
    fn test_orphan_placeholder_is_rejected() {
        let ep = endpoint("/products/{id}", vec![]);

        let err = classify(&ep).expect_err("orphan placeholder");
        match err {
            SchemaViolation::UnmatchedPlaceholder { placeholder, .. } => {
                assert_eq!(placeholder, "id");
            }
            other => panic!("unexpected violation: {other}"),
        }
    }

    #[test]
    fn test_unused_path_parameter_is_rejected() {
        let ep = endpoint("/products", vec![param("id", ParamLocation::Path, true)]);

        let err = classify(&ep).expect_err("dangling path parameter");
        assert!(matches!(err, SchemaViolation::UnusedPathParameter { .. }));
    }

    #[test]
    fn test_duplicate_parameter_name_is_rejected() {
        let ep = endpoint(
            "/products",
            vec![
                param("verbose", ParamLocation::Query, false),
                param("verbose", ParamLocation::Query, false),
            ],
        );

        assert!(matches!(classify(&ep), Err(SchemaViolation::DuplicateParameter { .. })));
    }

    #[test]
    fn test_multiple_body_parameters_are_rejected() {
        let ep = endpoint(
            "/me",
            vec![
                param("update", ParamLocation::Body, true),
                param("patch", ParamLocation::Body, true),
            ],
        );

        let err = classify(&ep).expect_err("two bodies");
        match err {
            SchemaViolation::MultipleBodyParameters { first, second, .. } => {
                assert_eq!(first, "update");
                assert_eq!(second, "patch");
            }
            other => panic!("unexpected violation: {other}"),
        }
    }

    #[test]
    fn test_call_order_required_first() {
        let ep = endpoint(
            "/estimates/time/{region}",
            vec![
                param("customer_uuid", ParamLocation::Query, false),
                param("region", ParamLocation::Path, true),
                param("start_latitude", ParamLocation::Query, true),
                param("filter", ParamLocation::Body, true),
            ],
        );

        let classified = classify(&ep).expect("well-formed endpoint");
        let names: Vec<&str> =
            classified.call_order.iter().map(|s| s.parameter.name.as_str()).collect();
        assert_eq!(names, vec!["region", "start_latitude", "filter", "customer_uuid"]);

        let required: Vec<bool> = classified.call_order.iter().map(|s| s.call_required).collect();
        assert_eq!(required, vec![true, true, true, false]);
    }

    #[test]
    fn test_path_follows_template_order() {
        let ep = endpoint(
            "/estimates/price/{a}/{b}",
            vec![param("b", ParamLocation::Path, true), param("a", ParamLocation::Path, true)],
        );

        let classified = classify(&ep).expect("well-formed endpoint");
        let names: Vec<&str> = classified.path.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);

        // Signature keeps declaration order within the required group.
        let call: Vec<&str> =
            classified.call_order.iter().map(|s| s.parameter.name.as_str()).collect();
        assert_eq!(call, vec!["b", "a"]);
    }
}
