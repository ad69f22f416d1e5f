// codegen/src/utils.rs

//! Identifier utilities: casing conversions and keyword sanitization for
//! names carried over from resolved schemas.

/// Convert camelCase (or PascalCase) to snake_case.
///
/// Used to derive Rust function names from operation identifiers that a
/// resolver may carry over in camelCase form; identifiers that are already
/// snake_case pass through unchanged.
///
/// # Examples
/// ```
/// use codegen::utils::camel_to_snake_case;
/// assert_eq!(camel_to_snake_case("updateMe"), "update_me");
/// assert_eq!(camel_to_snake_case("estimatesPrice"), "estimates_price");
/// assert_eq!(camel_to_snake_case("products"), "products");
/// assert_eq!(camel_to_snake_case("already_snake"), "already_snake");
/// ```
pub fn camel_to_snake_case(input: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = input.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            if let Some(prev) = chars.get(i - 1) {
                if prev.is_lowercase()
                    || (i > 1 && chars.get(i - 2).is_some_and(|p| p.is_lowercase()))
                {
                    result.push('_');
                }
            }
        }
        result.push(c.to_lowercase().next().unwrap_or(*c));
    }

    result
}

/// Convert snake_case to PascalCase.
pub fn snake_to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Sanitizes external identifiers (parameter and operation names coming
/// from a resolved schema) to be valid Rust identifiers.
pub fn sanitize_rust_identifier(name: &str) -> String {
    // Handle reserved keywords
    match name {
        "type" => "r#type".to_string(),
        "ref" => "r#ref".to_string(),
        "match" => "r#match".to_string(),
        "move" => "r#move".to_string(),
        "async" => "r#async".to_string(),
        "self" => "self_".to_string(),
        "super" => "super_".to_string(),
        "crate" => "crate_".to_string(),
        _ => strip_invalid(name),
    }
}

/// Sanitizes external identifiers to be valid TypeScript identifiers.
/// TypeScript has no raw-identifier syntax, so colliding keywords get an
/// underscore suffix.
pub fn sanitize_ts_identifier(name: &str) -> String {
    match name {
        "class" | "function" | "var" | "let" | "const" | "new" | "delete" | "in" | "of" => {
            format!("{name}_")
        }
        _ => strip_invalid(name),
    }
}

/// Replace hyphens with underscores and drop any remaining characters that
/// are not alphanumeric or underscores.
fn strip_invalid(name: &str) -> String {
    let sanitized = name.replace('-', "_");
    sanitized.chars().filter(|c| c.is_alphanumeric() || *c == '_').collect()
}

/// Derive the Rust function name for an operation identifier.
pub fn rust_fn_name(operation_id: &str) -> String {
    camel_to_snake_case(&sanitize_rust_identifier(operation_id))
}
