#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for typed API clients.
//!
//! This crate turns a resolved API model (`clientele-schema` +
//! `clientele-registry`) into ready-to-use client modules. It focuses
//! solely on the mapping logic: translating type nodes into target type
//! expressions, classifying endpoint parameters into path/query/body,
//! planning URL and request construction, and composing the per-target
//! client source.
//!
//! Other responsibilities — resolving raw schema documents, laying out
//! output trees, or running the generated code — reside in companion
//! crates.

pub mod classify;
pub mod doc_comment;
pub mod generators;
pub mod mapper;
pub mod plan;
pub mod utils;

use std::fs;
use std::path::Path;

use registry::TypeRegistry;
use schema::{ClientSpec, SchemaViolation};
use thiserror::Error;

pub use generators::{RustClientGenerator, TypeScriptClientGenerator};

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Underlying I/O error while writing generated files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON serialization error while embedding literals.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Formatting error when building generated source.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    /// The model is inconsistent; generation halts, nothing is emitted.
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

impl From<String> for CodegenError {
    fn from(msg: String) -> Self { CodegenError::Message(msg) }
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Target languages client modules can be emitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Rust client linking the `clientele-runtime`/`clientele-transport`
    /// crates.
    Rust,
    /// Self-contained TypeScript client module.
    TypeScript,
}

impl Target {
    /// Short lower-case name, used in configuration and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Rust => "rust",
            Target::TypeScript => "typescript",
        }
    }
}

/// Defines the core interface for generating a client module from a
/// resolved model. Implementors produce a set of `(filename, source)`
/// pairs.
///
/// Generation must be deterministic: the same registry and spec always
/// produce byte-identical output, in the model's declaration order.
pub trait ClientGenerator {
    /// The language this generator emits.
    fn target(&self) -> Target;

    /// Generate the client module source files.
    fn generate(&self, types: &TypeRegistry, spec: &ClientSpec) -> Result<Vec<(String, String)>>;
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<String> = src.lines().map(|l| l.trim_end().to_string()).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

/// Persist a list of generated source files to disk under the given output
/// directory, creating any necessary subdirectories.
///
/// Lexical formatting of the emitted source is left to external tooling.
pub fn write_generated<P: AsRef<Path>>(
    out_dir: P,
    files: &[(String, String)],
) -> std::io::Result<()> {
    fs::create_dir_all(&out_dir)?;
    for (name, src) in files {
        let path = out_dir.as_ref().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let cleaned = clean_generated_source(src);
        fs::write(&path, cleaned.as_bytes())?;
    }
    Ok(())
}
