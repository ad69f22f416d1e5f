#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Generation pipeline.
//!
//! One generation run is a single synchronous pass: validate every
//! endpoint of the client spec against its path template, then hand the
//! registry and spec to the requested per-target generator and collect
//! the emitted files. Validation runs to completion before any emission
//! starts, so a [`schema::SchemaViolation`] can never leave a partial or
//! corrupt client behind.
//!
//! The pass is stateless across invocations; generating twice from the
//! same inputs yields byte-identical files.

use std::path::Path;

use codegen::{
    ClientGenerator, CodegenError, RustClientGenerator, Target, TypeScriptClientGenerator,
};
use config::GeneratorConfig;
use registry::TypeRegistry;
use schema::{ClientSpec, SchemaViolation};
use thiserror::Error;

/// Errors surfaced by a generation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The model is inconsistent; nothing was emitted.
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
    /// Code generation failed.
    #[error(transparent)]
    Codegen(#[from] CodegenError),
    /// The configured target language is not supported.
    #[error("unknown target language `{0}`")]
    UnknownTarget(String),
    /// Generated files could not be persisted.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenient result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Resolve a configuration target string to a [`Target`].
pub fn target_from_str(name: &str) -> Result<Target> {
    match name {
        "rust" => Ok(Target::Rust),
        "typescript" => Ok(Target::TypeScript),
        other => Err(PipelineError::UnknownTarget(other.to_string())),
    }
}

/// The generator for a target language.
pub fn generator_for(target: Target) -> Box<dyn ClientGenerator> {
    match target {
        Target::Rust => Box::new(RustClientGenerator),
        Target::TypeScript => Box::new(TypeScriptClientGenerator),
    }
}

/// Validate every endpoint of `spec` without emitting anything.
///
/// # Errors
/// The first [`SchemaViolation`] encountered, in endpoint declaration
/// order.
pub fn validate(spec: &ClientSpec) -> std::result::Result<(), SchemaViolation> {
    for endpoint in &spec.endpoints {
        codegen::classify::classify(endpoint)?;
    }
    Ok(())
}

/// Run one generation pass and return the emitted `(name, source)` pairs.
pub fn generate(
    types: &TypeRegistry,
    spec: &ClientSpec,
    target: Target,
) -> Result<Vec<(String, String)>> {
    validate(spec)?;

    tracing::debug!(
        target_language = target.as_str(),
        endpoints = spec.endpoints.len(),
        declarations = types.len(),
        "starting generation pass"
    );

    let files = generator_for(target).generate(types, spec)?;
    Ok(files)
}

/// Run one generation pass and persist the emitted files under `out_dir`.
pub fn generate_to_dir<P: AsRef<Path>>(
    types: &TypeRegistry,
    spec: &ClientSpec,
    target: Target,
    out_dir: P,
) -> Result<()> {
    let files = generate(types, spec, target)?;
    codegen::write_generated(&out_dir, &files)?;

    tracing::info!(
        target_language = target.as_str(),
        files = files.len(),
        out_dir = %out_dir.as_ref().display(),
        "generation pass complete"
    );
    Ok(())
}

/// Run a generation pass driven by a [`GeneratorConfig`].
///
/// The configuration's client section overrides the spec's client name,
/// initial base URL and hook surface; the endpoints and types always come
/// from the resolved model.
pub fn run(
    types: &TypeRegistry,
    spec: &ClientSpec,
    generator_config: &GeneratorConfig,
) -> Result<()> {
    let target = target_from_str(&generator_config.target)?;

    let mut spec = spec.clone();
    spec.name = generator_config.client.name.clone();
    spec.base_url = schema::BaseUrlConfig { default: generator_config.client.base_url.clone() };
    spec.error_hook = schema::ErrorHookConfig { enabled: generator_config.client.error_hook };

    generate_to_dir(types, &spec, target, &generator_config.output_dir)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use schema::{
        BaseUrlConfig, Endpoint, ErrorHookConfig, HttpMethod, ObjectType, ParamLocation,
        Parameter, Primitive, TypeNode, TypeRef,
    };

    use super::*;

    fn primitive(p: Primitive) -> TypeRef { Arc::new(TypeNode::Primitive(p)) }

    fn fixture() -> (TypeRegistry, ClientSpec) {
        let product = Arc::new(TypeNode::Object(ObjectType {
            name: "Product".to_string(),
            doc: String::new(),
            fields: vec![],
        }));

        let mut types = TypeRegistry::new();
        types.insert(Arc::clone(&product)).expect("fresh name");

        let spec = ClientSpec {
            name: "RemoteCaller".to_string(),
            base_url: BaseUrlConfig { default: "https://api.example.com/".to_string() },
            error_hook: ErrorHookConfig { enabled: true },
            endpoints: vec![Endpoint {
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
            }],
        };

        (types, spec)
    }

    #[test]
    fn test_generate_for_both_targets() {
        let (types, spec) = fixture();

        let rust = generate(&types, &spec, Target::Rust).expect("well-formed model");
        assert_eq!(rust[0].0, "client.rs");

        let ts = generate(&types, &spec, Target::TypeScript).expect("well-formed model");
        assert_eq!(ts[0].0, "client.ts");
    }

    #[test]
    fn test_generation_is_deterministic_across_runs() {
        let (types, spec) = fixture();

        let first = generate(&types, &spec, Target::Rust).expect("well-formed model");
        let second = generate(&types, &spec, Target::Rust).expect("well-formed model");
        assert_eq!(first, second);
    }

    #[test]
    fn test_violation_emits_nothing() {
        let (types, mut spec) = fixture();
        // Break the placeholder bijection.
        spec.endpoints[0].parameters.clear();

        let dir = tempfile::tempdir().expect("temp dir");
        let result = generate_to_dir(&types, &spec, Target::Rust, dir.path());
        assert!(matches!(result, Err(PipelineError::Schema(_))));

        let leftovers = std::fs::read_dir(dir.path()).expect("readable dir").count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_run_applies_config_overrides() {
        let (types, spec) = fixture();
        let dir = tempfile::tempdir().expect("temp dir");

        let mut generator_config = GeneratorConfig::default();
        generator_config.output_dir = dir.path().to_path_buf();
        generator_config.client.name = "StoreClient".to_string();
        generator_config.client.base_url = "https://store.example.com/".to_string();

        run(&types, &spec, &generator_config).expect("config-driven run");

        let source =
            std::fs::read_to_string(dir.path().join("client.rs")).expect("emitted file");
        assert!(source.contains("pub struct StoreClient {"));
        assert!(source.contains("https://store.example.com/"));
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        assert!(matches!(target_from_str("elm"), Err(PipelineError::UnknownTarget(_))));
    }
}
