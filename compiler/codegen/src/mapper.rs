//! Type mapping: schema type nodes → target type expressions.
//!
//! Each target implements [`TypeMapper`]. The mapping is a pure function
//! and is total over every [`TypeNode`] variant: named nodes map to their
//! declared identifier, anonymous containers map structurally, and opaque
//! nodes map to an explicit opaque type — never to an implicit dynamic
//! type. There is no failure case for a well-formed model.

use schema::{Primitive, TypeNode};

/// Per-target translation of type nodes into type expressions.
pub trait TypeMapper {
    /// The type expression for a node, e.g. `Vec<Product>` or
    /// `Array<Product>`.
    fn type_expression(&self, node: &TypeNode) -> String;

    /// Wrap a type expression in the target's presence-indicating
    /// (optional) form.
    fn optional(&self, expr: &str) -> String;
}

/// Mapping into Rust type expressions.
///
/// Opaque nodes become `OpaqueValue` from the runtime support crate,
/// which requires an explicit cast before structural access.
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn type_expression(&self, node: &TypeNode) -> String {
        match node {
            TypeNode::Primitive(Primitive::Boolean) => "bool".to_string(),
            TypeNode::Primitive(Primitive::Integer) => "i64".to_string(),
            TypeNode::Primitive(Primitive::Number) => "f64".to_string(),
            TypeNode::Primitive(Primitive::String) => "String".to_string(),
            TypeNode::Alias(alias) => alias.name.clone(),
            TypeNode::Object(object) => object.name.clone(),
            TypeNode::Array { element } => {
                format!("Vec<{}>", self.type_expression(element))
            }
            TypeNode::Map { value } => {
                format!("BTreeMap<String, {}>", self.type_expression(value))
            }
            TypeNode::Opaque => "OpaqueValue".to_string(),
        }
    }

    fn optional(&self, expr: &str) -> String { format!("Option<{expr}>") }
}

/// Mapping into TypeScript type expressions.
///
/// Integers and numbers both become `number` (TypeScript has one numeric
/// type); opaque nodes become `unknown`, which refuses structural access
/// until the caller narrows it explicitly.
pub struct TypeScriptTypeMapper;

impl TypeMapper for TypeScriptTypeMapper {
    fn type_expression(&self, node: &TypeNode) -> String {
        match node {
            TypeNode::Primitive(Primitive::Boolean) => "boolean".to_string(),
            TypeNode::Primitive(Primitive::Integer) | TypeNode::Primitive(Primitive::Number) => {
                "number".to_string()
            }
            TypeNode::Primitive(Primitive::String) => "string".to_string(),
            TypeNode::Alias(alias) => alias.name.clone(),
            TypeNode::Object(object) => object.name.clone(),
            TypeNode::Array { element } => {
                format!("Array<{}>", self.type_expression(element))
            }
            TypeNode::Map { value } => {
                format!("Map<string, {}>", self.type_expression(value))
            }
            TypeNode::Opaque => "unknown".to_string(),
        }
    }

    fn optional(&self, expr: &str) -> String {
        // Optionality in TypeScript lives on the declaration site
        // (`field?:`, trailing `?` parameters); the expression itself
        // only widens with undefined where needed.
        format!("{expr} | undefined")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use schema::{AliasType, ObjectType};

    use super::*;

    fn product() -> TypeNode {
        TypeNode::Object(ObjectType {
            name: "Product".to_string(),
            doc: String::new(),
            fields: vec![],
        })
    }

    #[test]
    fn test_rust_primitives() {
        let mapper = RustTypeMapper;
        assert_eq!(mapper.type_expression(&TypeNode::Primitive(Primitive::Boolean)), "bool");
        assert_eq!(mapper.type_expression(&TypeNode::Primitive(Primitive::Integer)), "i64");
        assert_eq!(mapper.type_expression(&TypeNode::Primitive(Primitive::Number)), "f64");
        assert_eq!(mapper.type_expression(&TypeNode::Primitive(Primitive::String)), "String");
    }

    #[test]
    fn test_rust_containers_nest() {
        let mapper = RustTypeMapper;
        let node = TypeNode::Map { value: Arc::new(TypeNode::Array { element: Arc::new(product()) }) };
        assert_eq!(mapper.type_expression(&node), "BTreeMap<String, Vec<Product>>");
    }

    #[test]
    fn test_rust_opaque_and_optional() {
        let mapper = RustTypeMapper;
        assert_eq!(mapper.type_expression(&TypeNode::Opaque), "OpaqueValue");
        assert_eq!(mapper.optional("OpaqueValue"), "Option<OpaqueValue>");
    }

    #[test]
    fn test_typescript_merges_numerics() {
        let mapper = TypeScriptTypeMapper;
        assert_eq!(mapper.type_expression(&TypeNode::Primitive(Primitive::Integer)), "number");
        assert_eq!(mapper.type_expression(&TypeNode::Primitive(Primitive::Number)), "number");
    }

    #[test]
    fn test_typescript_containers_and_opaque() {
        let mapper = TypeScriptTypeMapper;
        let node = TypeNode::Array { element: Arc::new(product()) };
        assert_eq!(mapper.type_expression(&node), "Array<Product>");

        let node = TypeNode::Map { value: Arc::new(product()) };
        assert_eq!(mapper.type_expression(&node), "Map<string, Product>");

        assert_eq!(mapper.type_expression(&TypeNode::Opaque), "unknown");
    }

    #[test]
    fn test_named_nodes_map_to_identifier() {
        let alias = TypeNode::Alias(AliasType {
            name: "ProductMap".to_string(),
            underlying: Arc::new(TypeNode::Map { value: Arc::new(product()) }),
            doc: String::new(),
        });

        assert_eq!(RustTypeMapper.type_expression(&alias), "ProductMap");
        assert_eq!(TypeScriptTypeMapper.type_expression(&alias), "ProductMap");
    }
}
