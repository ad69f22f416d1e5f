// codegen/src/generators/typescript_client.rs

//! TypeScript client generator.
//!
//! Emits one self-contained `client.ts` module: interfaces and type
//! aliases for the registered declarations, a tagged `ApiResult` type, and
//! a client class with one async method per endpoint. The URL contract is
//! identical to the Rust target's: pre-encoded literal segments,
//! `encodeURIComponent` for dynamic values, the unconditional `?` once a
//! query parameter is declared, and `&`-joined appended entries.
//!
//! Response payloads are parsed (`JSON.parse` via `response.json()`) and
//! typed against the declared response interface; structural validation
//! beyond well-formed JSON is the Rust target's strength and is not
//! reproduced here.

use std::fmt::Write as _;

use registry::TypeRegistry;
use schema::{ClientSpec, Endpoint, ObjectType, Primitive, TypeNode};

use crate::classify::classify;
use crate::doc_comment::write_line_comment;
use crate::mapper::{TypeMapper, TypeScriptTypeMapper};
use crate::plan::{PathSegment, RequestPlan};
use crate::utils::sanitize_ts_identifier;
use crate::{ClientGenerator, CodegenError, Result, Target};

const INDENT: &str = "    ";

/// Generator for TypeScript client modules.
pub struct TypeScriptClientGenerator;

impl ClientGenerator for TypeScriptClientGenerator {
    fn target(&self) -> Target { Target::TypeScript }

    fn generate(&self, types: &TypeRegistry, spec: &ClientSpec) -> Result<Vec<(String, String)>> {
        let mapper = TypeScriptTypeMapper;

        let mut out = String::new();
        writeln!(out, "// Automatically generated file by clientele. DO NOT EDIT OR APPEND ANYTHING!")?;
        writeln!(out)?;

        render_declarations(&mut out, types, &mapper)?;
        render_result_types(&mut out, spec)?;
        render_client(&mut out, spec, &mapper)?;

        writeln!(out)?;
        writeln!(out, "// Automatically generated file by clientele. DO NOT EDIT OR APPEND ANYTHING!")?;

        Ok(vec![("client.ts".to_string(), out)])
    }
}

fn render_declarations(
    out: &mut String,
    types: &TypeRegistry,
    mapper: &TypeScriptTypeMapper,
) -> Result<()> {
    for (_, node) in types.iter() {
        match node.as_ref() {
            TypeNode::Object(object) => render_interface(out, object, mapper)?,
            TypeNode::Alias(alias) => {
                write_line_comment(out, &alias.doc, "")?;
                writeln!(
                    out,
                    "export type {} = {};",
                    alias.name,
                    mapper.type_expression(&alias.underlying)
                )?;
            }
            other => {
                return Err(CodegenError::Message(format!(
                    "registry holds an unnamed declaration: {other:?}"
                )));
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_interface(
    out: &mut String,
    object: &ObjectType,
    mapper: &TypeScriptTypeMapper,
) -> Result<()> {
    write_line_comment(out, &object.doc, "")?;
    writeln!(out, "export interface {} {{", object.name)?;

    for (i, field) in object.fields.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_line_comment(out, &field.doc, INDENT)?;

        let expr = mapper.type_expression(&field.ty);
        let marker = if field.required { "" } else { "?" };
        writeln!(out, "{INDENT}{}{marker}: {expr};", field.name)?;
    }

    writeln!(out, "}}")?;
    Ok(())
}

/// The uniform result channel: a tagged success-or-error value plus the
/// error-hook signature, emitted once per module.
fn render_result_types(out: &mut String, spec: &ClientSpec) -> Result<()> {
    writeln!(out, "export type ApiError =")?;
    writeln!(out, "{INDENT}| {{ kind: \"transport\"; status?: number; detail: string }}")?;
    writeln!(out, "{INDENT}| {{ kind: \"deserialization\"; detail: string }};")?;
    writeln!(out)?;
    writeln!(
        out,
        "export type ApiResult<T> = {{ ok: true; value: T }} | {{ ok: false; error: ApiError }};"
    )?;
    writeln!(out)?;
    if spec.error_hook.enabled {
        writeln!(out, "export type ErrorHook = (error: ApiError) => ApiResult<unknown>;")?;
        writeln!(out)?;
    }
    Ok(())
}

fn render_client(
    out: &mut String,
    spec: &ClientSpec,
    mapper: &TypeScriptTypeMapper,
) -> Result<()> {
    let hook = spec.error_hook.enabled;

    writeln!(out, "export class {} {{", spec.name)?;
    writeln!(out, "{INDENT}public base_url: string;")?;
    if hook {
        writeln!(out, "{INDENT}public on_error: ErrorHook | null;")?;
    }
    writeln!(out)?;
    writeln!(out, "{INDENT}constructor() {{")?;
    // JSON string escaping is valid JavaScript string escaping.
    writeln!(
        out,
        "{INDENT}{INDENT}this.base_url = {};",
        serde_json::to_string(&spec.base_url.default)?
    )?;
    if hook {
        writeln!(out, "{INDENT}{INDENT}this.on_error = null;")?;
    }
    writeln!(out, "{INDENT}}}")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}public set_base_url(base_url: string) {{")?;
    writeln!(out, "{INDENT}{INDENT}this.base_url = base_url;")?;
    writeln!(out, "{INDENT}}}")?;
    if hook {
        writeln!(out)?;
        writeln!(out, "{INDENT}public set_error_hook(on_error: ErrorHook) {{")?;
        writeln!(out, "{INDENT}{INDENT}this.on_error = on_error;")?;
        writeln!(out, "{INDENT}}}")?;
    }

    for endpoint in &spec.endpoints {
        writeln!(out)?;
        render_operation(out, endpoint, mapper)?;
    }

    writeln!(out)?;
    render_dispatch(out, hook)?;
    writeln!(out, "}}")?;
    Ok(())
}

fn render_operation(
    out: &mut String,
    endpoint: &Endpoint,
    mapper: &TypeScriptTypeMapper,
) -> Result<()> {
    let classified = classify(endpoint)?;
    let plan = RequestPlan::build(endpoint, &classified)?;

    let mut description =
        format!("Sends a request to the endpoint: {} {}", endpoint.path, endpoint.method);
    if !endpoint.doc.trim().is_empty() {
        description.push_str("\n\n");
        description.push_str(&endpoint.doc);
    }
    write_line_comment(out, &description, INDENT)?;

    let args: Vec<String> = classified
        .call_order
        .iter()
        .map(|slot| {
            let ident = sanitize_ts_identifier(&slot.parameter.name);
            let marker = if slot.call_required { "" } else { "?" };
            format!("{ident}{marker}: {}", mapper.type_expression(&slot.parameter.ty))
        })
        .collect();

    let return_type = endpoint
        .response
        .as_ref()
        .map(|node| mapper.type_expression(node))
        .unwrap_or_else(|| "unknown".to_string());

    writeln!(
        out,
        "{INDENT}public async {}({}): Promise<ApiResult<{return_type}>> {{",
        sanitize_ts_identifier(&endpoint.operation_id),
        args.join(", ")
    )?;

    // Path construction in template order. Literals were percent-encoded
    // at generation time and embed verbatim.
    if plan.segments.is_empty() && !plan.has_query() {
        writeln!(out, "{INDENT}{INDENT}const url = this.base_url;")?;
    } else {
        writeln!(out, "{INDENT}{INDENT}let url = this.base_url;")?;
    }
    for segment in &plan.segments {
        match segment {
            PathSegment::Literal(text) => {
                writeln!(out, "{INDENT}{INDENT}url += \"{text}\";")?;
            }
            PathSegment::Parameter(name) => {
                let parameter = classified.path_parameter(name).ok_or_else(|| {
                    CodegenError::Message(format!(
                        "planned segment `{name}` has no classified parameter"
                    ))
                })?;
                let ident = sanitize_ts_identifier(&parameter.name);
                writeln!(
                    out,
                    "{INDENT}{INDENT}url += encodeURIComponent({});",
                    string_expression(&parameter.ty, &ident)
                )?;
            }
        }
    }

    if plan.has_query() {
        writeln!(out, "{INDENT}{INDENT}url += \"?\";")?;
        writeln!(out, "{INDENT}{INDENT}const entries: string[] = [];")?;
        for slot in &plan.query {
            let parameter = classified
                .query
                .iter()
                .copied()
                .find(|p| p.name == slot.name)
                .ok_or_else(|| {
                    CodegenError::Message(format!(
                        "planned query slot `{}` has no classified parameter",
                        slot.name
                    ))
                })?;
            let ident = sanitize_ts_identifier(&parameter.name);
            let entry = format!(
                "entries.push(\"{}=\" + encodeURIComponent({}));",
                slot.name,
                string_expression(&parameter.ty, &ident)
            );
            if slot.required {
                writeln!(out, "{INDENT}{INDENT}{entry}")?;
            } else {
                writeln!(
                    out,
                    "{INDENT}{INDENT}if ({}) {{",
                    presence_condition(&parameter.ty, &ident)
                )?;
                writeln!(out, "{INDENT}{INDENT}{INDENT}{entry}")?;
                writeln!(out, "{INDENT}{INDENT}}}")?;
            }
        }
        writeln!(out, "{INDENT}{INDENT}url += entries.join(\"&\");")?;
    }

    let body_expr = match &plan.body {
        Some(body) => format!("JSON.stringify({})", sanitize_ts_identifier(body)),
        None => "undefined".to_string(),
    };
    writeln!(
        out,
        "{INDENT}{INDENT}return this.dispatch<{return_type}>(url, \"{}\", {body_expr});",
        endpoint.method.as_str()
    )?;
    writeln!(out, "{INDENT}}}")?;
    Ok(())
}

/// The stringified form of a parameter for URL embedding; string-typed
/// values pass through, everything else gets `.toString()`.
fn string_expression(ty: &TypeNode, ident: &str) -> String {
    if ty.is_string() {
        ident.to_string()
    } else {
        format!("{ident}.toString()")
    }
}

/// The presence check for an optional query parameter: an explicit
/// `undefined` test plus the documented omit values (boolean `false`,
/// empty string).
fn presence_condition(ty: &TypeNode, ident: &str) -> String {
    if is_boolean(ty) {
        format!("{ident} !== undefined && {ident} !== false")
    } else if ty.is_string() {
        format!("{ident} !== undefined && {ident} !== \"\"")
    } else {
        format!("{ident} !== undefined")
    }
}

fn is_boolean(ty: &TypeNode) -> bool {
    match ty {
        TypeNode::Primitive(Primitive::Boolean) => true,
        TypeNode::Alias(alias) => is_boolean(&alias.underlying),
        _ => false,
    }
}

/// The shared delivery-and-adaptation helper every operation calls into.
fn render_dispatch(out: &mut String, hook: bool) -> Result<()> {
    writeln!(
        out,
        "{INDENT}private async dispatch<T>(url: string, method: string, body?: string): Promise<ApiResult<T>> {{"
    )?;
    writeln!(out, "{INDENT}{INDENT}let response: Response;")?;
    writeln!(out, "{INDENT}{INDENT}try {{")?;
    writeln!(out, "{INDENT}{INDENT}{INDENT}response = await fetch(url, body === undefined")?;
    writeln!(out, "{INDENT}{INDENT}{INDENT}{INDENT}? {{ method: method }}")?;
    writeln!(
        out,
        "{INDENT}{INDENT}{INDENT}{INDENT}: {{ method: method, headers: {{ \"Content-Type\": \"application/json\" }}, body: body }});"
    )?;
    writeln!(out, "{INDENT}{INDENT}}} catch (err) {{")?;
    writeln!(
        out,
        "{INDENT}{INDENT}{INDENT}return this.settle<T>({{ kind: \"transport\", detail: String(err) }});"
    )?;
    writeln!(out, "{INDENT}{INDENT}}}")?;
    writeln!(out, "{INDENT}{INDENT}if (!response.ok) {{")?;
    writeln!(
        out,
        "{INDENT}{INDENT}{INDENT}return this.settle<T>({{ kind: \"transport\", status: response.status, detail: response.statusText }});"
    )?;
    writeln!(out, "{INDENT}{INDENT}}}")?;
    writeln!(out, "{INDENT}{INDENT}try {{")?;
    writeln!(out, "{INDENT}{INDENT}{INDENT}const value = await response.json() as T;")?;
    writeln!(out, "{INDENT}{INDENT}{INDENT}return {{ ok: true, value: value }};")?;
    writeln!(out, "{INDENT}{INDENT}}} catch (err) {{")?;
    writeln!(
        out,
        "{INDENT}{INDENT}{INDENT}return this.settle<T>({{ kind: \"deserialization\", detail: String(err) }});"
    )?;
    writeln!(out, "{INDENT}{INDENT}}}")?;
    writeln!(out, "{INDENT}}}")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}private settle<T>(error: ApiError): ApiResult<T> {{")?;
    if hook {
        writeln!(out, "{INDENT}{INDENT}if (this.on_error) {{")?;
        writeln!(out, "{INDENT}{INDENT}{INDENT}return this.on_error(error) as ApiResult<T>;")?;
        writeln!(out, "{INDENT}{INDENT}}}")?;
    }
    writeln!(out, "{INDENT}{INDENT}return {{ ok: false, error: error }};")?;
    writeln!(out, "{INDENT}}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use schema::{
        BaseUrlConfig, ErrorHookConfig, Field, HttpMethod, ParamLocation, Parameter, TypeRef,
    };

    use super::*;

    fn primitive(p: Primitive) -> TypeRef { Arc::new(TypeNode::Primitive(p)) }

    fn product() -> TypeRef {
        Arc::new(TypeNode::Object(ObjectType {
            name: "Product".to_string(),
            doc: String::new(),
            fields: vec![
                Field {
                    name: "product_id".to_string(),
                    ty: primitive(Primitive::String),
                    required: true,
                    doc: "Unique identifier of the product.".to_string(),
                },
                Field {
                    name: "capacity".to_string(),
                    ty: primitive(Primitive::Integer),
                    required: false,
                    doc: String::new(),
                },
            ],
        }))
    }

    fn fixture() -> (TypeRegistry, ClientSpec) {
        let product = product();
        let mut types = TypeRegistry::new();
        types.insert(Arc::clone(&product)).expect("fresh name");

        let spec = ClientSpec {
            name: "RemoteCaller".to_string(),
            base_url: BaseUrlConfig { default: String::new() },
            error_hook: ErrorHookConfig { enabled: true },
            endpoints: vec![
                Endpoint {
                    operation_id: "products".to_string(),
                    path: "/products".to_string(),
                    method: HttpMethod::Get,
                    parameters: vec![Parameter {
                        name: "with_attributes".to_string(),
                        location: ParamLocation::Query,
                        ty: primitive(Primitive::Boolean),
                        required: false,
                        doc: String::new(),
                    }],
                    response: Some(Arc::clone(&product)),
                    doc: String::new(),
                },
                Endpoint {
                    operation_id: "get_product".to_string(),
                    path: "/products/{id}".to_string(),
                    method: HttpMethod::Get,
                    parameters: vec![Parameter {
                        name: "id".to_string(),
                        location: ParamLocation::Path,
                        ty: primitive(Primitive::String),
                        required: true,
                        doc: String::new(),
                    }],
                    response: Some(product),
                    doc: String::new(),
                },
            ],
        };

        (types, spec)
    }

    fn generate() -> String {
        let (types, spec) = fixture();
        let files =
            TypeScriptClientGenerator.generate(&types, &spec).expect("well-formed model");
        assert_eq!(files[0].0, "client.ts");
        files[0].1.clone()
    }

    #[test]
    fn test_interface_fields_keep_declared_order_and_optionality() {
        let source = generate();
        assert!(source.contains("export interface Product {"));
        let id = source.find("product_id: string;").expect("required field");
        let capacity = source.find("capacity?: number;").expect("optional field");
        assert!(id < capacity);
    }

    #[test]
    fn test_bare_question_mark_and_presence_check() {
        let source = generate();
        assert!(source.contains("url += \"?\";"));
        assert!(source
            .contains("if (with_attributes !== undefined && with_attributes !== false) {"));
        assert!(source.contains(
            "entries.push(\"with_attributes=\" + encodeURIComponent(with_attributes.toString()));"
        ));
        assert!(source.contains("url += entries.join(\"&\");"));
    }

    #[test]
    fn test_path_argument_is_encoded_and_string_passthrough() {
        let source = generate();
        assert!(source.contains("url += \"products/\";"));
        assert!(source.contains("url += encodeURIComponent(id);"));
    }

    #[test]
    fn test_client_surface_and_result_channel() {
        let source = generate();
        assert!(source.contains("export class RemoteCaller {"));
        assert!(source.contains("public set_base_url(base_url: string) {"));
        assert!(source.contains("public set_error_hook(on_error: ErrorHook) {"));
        assert!(source.contains("export type ApiResult<T>"));
        assert!(source
            .contains("public async products(with_attributes?: boolean): Promise<ApiResult<Product>> {"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate(), generate());
    }
}
