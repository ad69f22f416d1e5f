//! Per-target client generators.
//!
//! Each generator lowers the same inputs — the type registry, the client
//! spec, and per-endpoint classification + request plan — to source text
//! for one target language. Emission order always follows declaration
//! order, which is what makes repeated runs byte-identical.

pub mod rust_client;
pub mod typescript_client;

pub use rust_client::RustClientGenerator;
pub use typescript_client::TypeScriptClientGenerator;
