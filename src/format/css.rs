use std::fmt::Write;

use super::{sections, W3CTokenDocument};

/// Render every token as a custom property inside a single `:root` block.
pub fn to_css_variables(doc: &W3CTokenDocument) -> String {
    let mut css = String::from(":root {\n");
    for section in sections(doc) {
        for (name, value) in &section.variables {
            let _ = writeln!(css, "  --{name}: {value};");
        }
    }
    css.push_str("}\n");
    css
}
