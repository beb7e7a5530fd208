//! Assembles link directives and the wrapped program into one HTML fragment.

use super::key::ModuleKey;
use super::registry::Registry;

/// Build the output document for `qualified_name`.
///
/// ```text
/// <link rel=import href='../lit/lit.html'>
/// <script>
/// window.Vaadin = window.Vaadin || {};
/// ...
/// window.Vaadin.modules["app/app.js"] = {};
/// (function() {
/// <program>
/// })();
/// </script>
/// ```
#[must_use]
pub fn assemble(
    registry: &Registry,
    qualified_name: &ModuleKey,
    program: &str,
    directives: &[String],
) -> String {
    let mut out = String::with_capacity(program.len() + 256 + directives.len() * 48);

    for url in directives {
        out.push_str("<link rel=import href='");
        out.push_str(&escape_attribute(url));
        out.push_str("'>\n");
    }

    out.push_str("<script>\n");
    for line in registry.init_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&registry.reset_line(qualified_name));
    out.push('\n');

    out.push_str("(function() {\n");
    out.push_str(&escape_script_close(program));
    if !program.is_empty() && !program.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("})();\n");
    out.push_str("</script>\n");
    out
}

/// Escape a value for a single-quoted attribute.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Write every `</script` (any case) as `<\/script`.
fn escape_script_close(program: &str) -> String {
    const CLOSE: &[u8] = b"</script";

    let bytes = program.as_bytes();
    let mut out = String::with_capacity(program.len());
    let mut start = 0;
    let mut i = 0;
    while i + CLOSE.len() <= bytes.len() {
        if bytes[i..i + CLOSE.len()].eq_ignore_ascii_case(CLOSE) {
            out.push_str(&program[start..=i]);
            out.push('\\');
            start = i + 1;
            i += CLOSE.len();
        } else {
            i += 1;
        }
    }
    out.push_str(&program[start..]);
    out
}
