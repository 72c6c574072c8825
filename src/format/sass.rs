use std::fmt::Write;

use super::{sections, W3CTokenDocument};

const HEADER: &str = "// Design tokens generated from Figma\n\n";

/// Render every token as a Sass variable, one commented block per category.
pub fn to_sass_variables(doc: &W3CTokenDocument) -> String {
    let mut scss = String::from(HEADER);
    for section in sections(doc) {
        let _ = writeln!(scss, "// {}", section.title);
        for (name, value) in &section.variables {
            let _ = writeln!(scss, "${name}: {value};");
        }
        scss.push('\n');
    }
    scss
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::to_w3c_format;
    use crate::tokens::{TokenSet, TokenValue};

    #[test]
    fn groups_variables_under_headers() {
        let mut set = TokenSet::default();
        set.colors.insert("red".into(), TokenValue::new("rgba(255, 0, 0, 1)"));
        set.colors.insert("blue".into(), TokenValue::new("rgba(0, 0, 255, 1)"));
        set.shadows.insert("card".into(), TokenValue::new("0px 1px 2px rgba(0, 0, 0, 1)"));

        let scss = to_sass_variables(&to_w3c_format(&set));
        assert_eq!(
            scss,
            "// Design tokens generated from Figma\n\n\
             // Colors\n\
             $color-blue: rgba(0, 0, 255, 1);\n\
             $color-red: rgba(255, 0, 0, 1);\n\
             \n\
             // Shadows\n\
             $shadow-card: 0px 1px 2px rgba(0, 0, 0, 1);\n\
             \n"
        );
    }

    #[test]
    fn empty_document_is_header_only() {
        let scss = to_sass_variables(&to_w3c_format(&TokenSet::default()));
        assert_eq!(scss, HEADER);
    }
}
