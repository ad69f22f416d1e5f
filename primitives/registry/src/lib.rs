#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Type Registry — a lightweight database for declared type definitions.
//!
//! This crate stores the named type declarations of a resolved API model
//! during a generation run. It is designed for build-time usage: the
//! generator fills it once, then iterates it in declaration order while
//! emitting code.
//!
//! Declaration order matters. The registry preserves insertion order for
//! iteration (a sorted map would silently reorder emitted declarations),
//! which is what makes repeated generation runs byte-identical.

use std::collections::HashMap;

use schema::{SchemaViolation, TypeRef};

/// A registry of named type declarations.
///
/// Stores shared [`TypeRef`] handles; endpoints referencing a registered
/// type hold clones of the same `Arc`, never copies.
#[derive(Default)]
pub struct TypeRegistry {
    /// Declaration order of type names.
    order: Vec<String>,
    /// Map from type name to its definition.
    by_name: HashMap<String, TypeRef>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self { Self::default() }

    /// Register a named type declaration.
    ///
    /// The node must be a named variant ([`TypeNode::Alias`] or
    /// [`TypeNode::Object`]); anonymous nodes live inline in the model and
    /// are never registered.
    ///
    /// # Errors
    /// [`SchemaViolation::DuplicateTypeDeclaration`] if a declaration with
    /// the same name was already registered;
    /// [`SchemaViolation::AnonymousTypeDeclaration`] if the node has no
    /// identifier.
    pub fn insert(&mut self, node: TypeRef) -> Result<(), SchemaViolation> {
        let name = node
            .identifier()
            .ok_or(SchemaViolation::AnonymousTypeDeclaration)?
            .to_string();

        if self.by_name.contains_key(&name) {
            return Err(SchemaViolation::DuplicateTypeDeclaration { name });
        }

        self.order.push(name.clone());
        self.by_name.insert(name, node);
        Ok(())
    }

    /// Look up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&TypeRef> { self.by_name.get(name) }

    /// Resolve a named reference, failing on undeclared names.
    ///
    /// # Errors
    /// [`SchemaViolation::UnknownTypeReference`] if no declaration with the
    /// given name exists.
    pub fn resolve(&self, name: &str) -> Result<&TypeRef, SchemaViolation> {
        self.by_name
            .get(name)
            .ok_or_else(|| SchemaViolation::UnknownTypeReference { name: name.to_string() })
    }

    /// Number of registered declarations.
    pub fn len(&self) -> usize { self.order.len() }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Iterate declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeRef)> {
        self.order.iter().filter_map(move |name| {
            self.by_name.get(name).map(|node| (name.as_str(), node))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use schema::{AliasType, ObjectType, Primitive, SchemaViolation, TypeNode};

    use super::*;

    fn object(name: &str) -> TypeRef {
        Arc::new(TypeNode::Object(ObjectType {
            name: name.to_string(),
            doc: String::new(),
            fields: vec![],
        }))
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = TypeRegistry::new();
        registry.insert(object("Product")).expect("fresh name");

        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(registry.get("Product").is_some());
        assert!(registry.get("Missing").is_none());
    }

    #[test]
    fn test_duplicate_declaration_is_refused() {
        let mut registry = TypeRegistry::new();
        registry.insert(object("Product")).expect("fresh name");

        let err = registry.insert(object("Product")).expect_err("duplicate");
        match err {
            SchemaViolation::DuplicateTypeDeclaration { name } => assert_eq!(name, "Product"),
            other => panic!("unexpected violation: {other}"),
        }
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let mut registry = TypeRegistry::new();
        for name in ["Zebra", "Apple", "Mango"] {
            registry.insert(object(name)).expect("fresh name");
        }

        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_resolve_unknown_reference() {
        let registry = TypeRegistry::new();
        let err = registry.resolve("Profile").expect_err("nothing registered");
        match err {
            SchemaViolation::UnknownTypeReference { name } => assert_eq!(name, "Profile"),
            other => panic!("unexpected violation: {other}"),
        }
    }

    #[test]
    fn test_registered_nodes_are_shared() {
        let alias = Arc::new(TypeNode::Alias(AliasType {
            name: "ProductId".to_string(),
            underlying: Arc::new(TypeNode::Primitive(Primitive::String)),
            doc: String::new(),
        }));

        let mut registry = TypeRegistry::new();
        registry.insert(Arc::clone(&alias)).expect("fresh name");

        let stored = registry.get("ProductId").expect("registered");
        assert!(Arc::ptr_eq(stored, &alias));
    }
}
