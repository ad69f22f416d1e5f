// codegen/src/generators/rust_client.rs

//! Rust client generator.
//!
//! Emits one `client.rs` module containing the type declarations and the
//! client struct. The emitted code links the workspace's runtime crates
//! (`clientele-runtime`, `clientele-transport`) and drives the same
//! `UrlBuilder` the planner's semantics are defined against, so generated
//! behavior and planned behavior cannot drift apart.

use std::fmt::Write as _;

use registry::TypeRegistry;
use schema::{ClientSpec, Endpoint, HttpMethod, ObjectType, TypeNode};

use crate::classify::classify;
use crate::doc_comment::write_doc_comment;
use crate::mapper::{RustTypeMapper, TypeMapper};
use crate::plan::{PathSegment, RequestPlan};
use crate::utils::{rust_fn_name, sanitize_rust_identifier};
use crate::{ClientGenerator, CodegenError, Result, Target};

/// Generator for Rust client modules.
pub struct RustClientGenerator;

impl ClientGenerator for RustClientGenerator {
    fn target(&self) -> Target { Target::Rust }

    fn generate(&self, types: &TypeRegistry, spec: &ClientSpec) -> Result<Vec<(String, String)>> {
        let mapper = RustTypeMapper;

        let declarations = render_declarations(types, &mapper)?;
        let client = render_client(spec, &mapper)?;

        let mut out = String::new();
        writeln!(out, "//! Generated API client module. DO NOT EDIT.")?;
        writeln!(out, "//!")?;
        writeln!(out, "//! Link `clientele-runtime`, `clientele-transport` and a transport")?;
        writeln!(out, "//! backend such as `clientele-http` to use this module.")?;
        writeln!(out)?;
        out.push_str(&render_imports(&declarations, &client));
        if !declarations.is_empty() {
            writeln!(out)?;
            out.push_str(&declarations);
        }
        writeln!(out)?;
        out.push_str(&client);

        Ok(vec![("client.rs".to_string(), out)])
    }
}

/// Render the `use` lines the emitted module needs, based on what the
/// rendered source actually references.
fn render_imports(declarations: &str, client: &str) -> String {
    let body = format!("{declarations}{client}");
    let mut out = String::new();

    if body.contains("BTreeMap<") {
        out.push_str("use std::collections::BTreeMap;\n\n");
    }

    let runtime_items: Vec<&str> =
        ["dispatch", "ApiResult", "ErrorHook", "OpaqueValue", "QueryValue", "UrlBuilder"]
            .into_iter()
            .filter(|item| body.contains(item))
            .collect();
    if !runtime_items.is_empty() {
        out.push_str(&format!("use runtime::{{{}}};\n", runtime_items.join(", ")));
    }

    if declarations.contains("Serialize") {
        out.push_str("use serde::{Deserialize, Serialize};\n");
    }

    let transport_items: Vec<&str> = ["DynTransport", "Method", "PreparedRequest"]
        .into_iter()
        .filter(|item| body.contains(item))
        .collect();
    if !transport_items.is_empty() {
        out.push_str(&format!("use transport::{{{}}};\n", transport_items.join(", ")));
    }

    out
}

/// Render all registered type declarations in declaration order.
fn render_declarations(types: &TypeRegistry, mapper: &RustTypeMapper) -> Result<String> {
    let mut out = String::new();

    for (i, (_, node)) in types.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        match node.as_ref() {
            TypeNode::Object(object) => render_struct(&mut out, object, mapper)?,
            TypeNode::Alias(alias) => {
                write_doc_comment(&mut out, &alias.doc, "")?;
                writeln!(
                    out,
                    "pub type {} = {};",
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
    }

    Ok(out)
}

fn render_struct(out: &mut String, object: &ObjectType, mapper: &RustTypeMapper) -> Result<()> {
    write_doc_comment(out, &object.doc, "")?;
    writeln!(out, "#[derive(Debug, Clone, Serialize, Deserialize)]")?;
    writeln!(out, "pub struct {} {{", object.name)?;

    for (i, field) in object.fields.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_doc_comment(out, &field.doc, "    ")?;

        let ident = sanitize_rust_identifier(&field.name);
        if ident != field.name {
            writeln!(out, "    #[serde(rename = {:?})]", field.name)?;
        }

        let expr = mapper.type_expression(&field.ty);
        if field.required {
            writeln!(out, "    pub {ident}: {expr},")?;
        } else {
            writeln!(out, "    #[serde(skip_serializing_if = \"Option::is_none\")]")?;
            writeln!(out, "    pub {ident}: {},", mapper.optional(&expr))?;
        }
    }

    writeln!(out, "}}")?;
    Ok(())
}

/// Render the client struct, its configuration surface and one operation
/// per endpoint, in declaration order.
fn render_client(spec: &ClientSpec, mapper: &RustTypeMapper) -> Result<String> {
    let mut out = String::new();
    let name = &spec.name;
    let hook = spec.error_hook.enabled;

    writeln!(out, "/// Generated API client.")?;
    writeln!(out, "///")?;
    writeln!(out, "/// Base URL and error hook are per-instance configuration; set them")?;
    writeln!(out, "/// before sharing the instance across concurrent calls.")?;
    writeln!(out, "pub struct {name} {{")?;
    writeln!(out, "    base_url: String,")?;
    if hook {
        writeln!(out, "    error_hook: Option<ErrorHook>,")?;
    }
    writeln!(out, "    transport: DynTransport,")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl {name} {{")?;
    writeln!(out, "    /// Create a client over the given transport.")?;
    writeln!(out, "    pub fn new(transport: DynTransport) -> Self {{")?;
    writeln!(out, "        Self {{")?;
    writeln!(out, "            base_url: {:?}.to_string(),", spec.base_url.default)?;
    if hook {
        writeln!(out, "            error_hook: None,")?;
    }
    writeln!(out, "            transport,")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /// Set the base URL prepended to every request path.")?;
    writeln!(out, "    pub fn set_base_url(&mut self, base_url: impl Into<String>) {{")?;
    writeln!(out, "        self.base_url = base_url.into();")?;
    writeln!(out, "    }}")?;
    if hook {
        writeln!(out)?;
        writeln!(out, "    /// Set the hook invoked on transport or deserialization failure.")?;
        writeln!(out, "    pub fn set_error_hook(&mut self, error_hook: ErrorHook) {{")?;
        writeln!(out, "        self.error_hook = Some(error_hook);")?;
        writeln!(out, "    }}")?;
    }

    for endpoint in &spec.endpoints {
        writeln!(out)?;
        render_operation(&mut out, endpoint, mapper, hook)?;
    }

    writeln!(out, "}}")?;
    Ok(out)
}

fn render_operation(
    out: &mut String,
    endpoint: &Endpoint,
    mapper: &RustTypeMapper,
    hook: bool,
) -> Result<()> {
    let classified = classify(endpoint)?;
    let plan = RequestPlan::build(endpoint, &classified)?;

    writeln!(
        out,
        "    /// Sends a request to the endpoint: {} {}",
        endpoint.path, endpoint.method
    )?;
    if !endpoint.doc.trim().is_empty() {
        writeln!(out, "    ///")?;
        write_doc_comment(out, &endpoint.doc, "    ")?;
    }

    let mut args = vec!["&self".to_string()];
    for slot in &classified.call_order {
        let ident = sanitize_rust_identifier(&slot.parameter.name);
        let expr = mapper.type_expression(&slot.parameter.ty);
        let expr = if slot.call_required { expr } else { mapper.optional(&expr) };
        args.push(format!("{ident}: {expr}"));
    }

    let return_type = endpoint
        .response
        .as_ref()
        .map(|node| mapper.type_expression(node))
        .unwrap_or_else(|| "OpaqueValue".to_string());

    if classified.call_order.len() > 7 {
        writeln!(out, "    #[allow(clippy::too_many_arguments)]")?;
    }
    writeln!(
        out,
        "    pub async fn {}({}) -> ApiResult<{return_type}> {{",
        rust_fn_name(&endpoint.operation_id),
        args.join(", ")
    )?;

    if plan.segments.is_empty() && !plan.has_query() {
        writeln!(out, "        let url = UrlBuilder::new(&self.base_url);")?;
    } else {
        writeln!(out, "        let mut url = UrlBuilder::new(&self.base_url);")?;
    }

    for segment in &plan.segments {
        match segment {
            // Literal text is already percent-encoded, so it contains only
            // URL-safe ASCII and can be embedded verbatim.
            PathSegment::Literal(text) => {
                writeln!(out, "        url.push_raw(\"{text}\");")?;
            }
            PathSegment::Parameter(name) => {
                let parameter = classified.path_parameter(name).ok_or_else(|| {
                    CodegenError::Message(format!(
                        "planned segment `{name}` has no classified parameter"
                    ))
                })?;
                let ident = sanitize_rust_identifier(&parameter.name);
                if parameter.ty.is_string() {
                    writeln!(out, "        url.push_segment(&{ident});")?;
                } else {
                    writeln!(out, "        url.push_segment(&{ident}.to_string());")?;
                }
            }
        }
    }

    if plan.has_query() {
        writeln!(out, "        url.begin_query();")?;
        for slot in &plan.query {
            let ident = sanitize_rust_identifier(&slot.name);
            if slot.required {
                writeln!(
                    out,
                    "        url.append_query(\"{}\", &QueryValue::from({ident}));",
                    slot.name
                )?;
            } else {
                writeln!(
                    out,
                    "        url.append_query_if_present(\"{}\", {ident}.map(QueryValue::from));",
                    slot.name
                )?;
            }
        }
    }

    let method_token = method_token(endpoint.method);
    match &plan.body {
        Some(body) => {
            let ident = sanitize_rust_identifier(body);
            writeln!(
                out,
                "        let request = PreparedRequest::with_json_body({method_token}, url.finish(), &{ident})?;"
            )?;
        }
        None => {
            writeln!(out, "        let request = PreparedRequest::new({method_token}, url.finish());")?;
        }
    }

    let hook_expr = if hook { "self.error_hook.as_ref()" } else { "None" };
    writeln!(out, "        dispatch(&self.transport, request, {hook_expr}).await")?;
    writeln!(out, "    }}")?;
    Ok(())
}

fn method_token(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "Method::Get",
        HttpMethod::Post => "Method::Post",
        HttpMethod::Put => "Method::Put",
        HttpMethod::Patch => "Method::Patch",
        HttpMethod::Delete => "Method::Delete",
    }
}
