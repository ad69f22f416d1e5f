// codegen/src/doc_comment.rs

//! Documentation rendering for generated source.
//!
//! Descriptions arrive from resolved schemas as free-form text; these
//! helpers turn them into Rust `///` doc comments or TypeScript `//`
//! comment blocks, trimming trailing whitespace and collapsing leading and
//! trailing blank lines while preserving interior paragraph breaks.

use std::fmt::Write as _;

/// Write one sanitized Rust doc-comment line with the given indent.
pub fn write_doc_line(buf: &mut String, text: &str, indent: &str) -> std::fmt::Result {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        writeln!(buf, "{indent}///")
    } else {
        writeln!(buf, "{indent}/// {trimmed}")
    }
}

/// Write a multi-line Rust doc comment with the given indent.
///
/// Interior blank lines become bare `///` separators; leading and
/// trailing blank lines are dropped.
pub fn write_doc_comment(buf: &mut String, text: &str, indent: &str) -> std::fmt::Result {
    for line in trimmed_lines(text) {
        write_doc_line(buf, line, indent)?;
    }
    Ok(())
}

/// Write a multi-line `//` comment block with the given indent, as used in
/// emitted TypeScript.
pub fn write_line_comment(buf: &mut String, text: &str, indent: &str) -> std::fmt::Result {
    for line in trimmed_lines(text) {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            writeln!(buf, "{indent}//")?;
        } else {
            writeln!(buf, "{indent}// {trimmed}")?;
        }
    }
    Ok(())
}

/// Lines of `text` without leading or trailing blank lines.
fn trimmed_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();

    while matches!(lines.first(), Some(line) if line.trim().is_empty()) {
        lines.remove(0);
    }
    while matches!(lines.last(), Some(line) if line.trim().is_empty()) {
        lines.pop();
    }

    lines
}
