//! Percent-encoding sets shared by the generator and the runtime.
//!
//! The component set matches JavaScript's `encodeURIComponent`: everything
//! is escaped except ASCII alphanumerics and `- _ . ! ~ * ' ( )`. The
//! path-literal set additionally preserves `/`, so that static template
//! text like `estimates/price/` survives encoding intact while dynamic
//! argument values are escaped in full.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in dynamic URL components (path arguments and query
/// keys/values). Equivalent to `encodeURIComponent`.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters escaped in literal path template segments; like
/// [`COMPONENT`] but keeps `/` so multi-segment literals stay literal.
pub const PATH_LITERAL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'/');

/// Percent-encode a dynamic URL component.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Percent-encode a literal path template segment, preserving `/`.
pub fn encode_path_literal(input: &str) -> String {
    utf8_percent_encode(input, PATH_LITERAL).to_string()
}
