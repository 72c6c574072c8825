//! Serializers from the token document to the files consumers import.

pub mod css;
pub mod sass;
pub mod w3c;

pub use css::to_css_variables;
pub use sass::to_sass_variables;
pub use w3c::{to_w3c_format, W3CTokenDocument};

/// One category's worth of flat `name: value` variables.
pub(crate) struct Section<'a> {
    pub title: &'static str,
    pub variables: Vec<(String, &'a str)>,
}

/// Flatten the document into variable sections, in output order: colors,
/// typography, shadows, border radius. Typography tokens expand into one
/// variable per property.
pub(crate) fn sections(doc: &W3CTokenDocument) -> Vec<Section<'_>> {
    let tokens = &doc.tokens;
    let mut sections = Vec::new();

    if let Some(colors) = &tokens.colors {
        sections.push(Section {
            title: "Colors",
            variables: prefixed("color", colors.iter().map(|(name, t)| (name, t.value.as_str()))),
        });
    }

    if let Some(typography) = &tokens.typography {
        let mut variables = Vec::new();
        for (name, token) in typography.iter() {
            variables.push((format!("font-family-{name}"), token.font_family.value.as_str()));
            variables.push((format!("font-size-{name}"), token.font_size.value.as_str()));
            variables.push((format!("font-weight-{name}"), token.font_weight.value.as_str()));
            variables.push((format!("line-height-{name}"), token.line_height.value.as_str()));
            variables.push((format!("letter-spacing-{name}"), token.letter_spacing.value.as_str()));
        }
        sections.push(Section {
            title: "Typography",
            variables,
        });
    }

    if let Some(shadows) = &tokens.shadows {
        sections.push(Section {
            title: "Shadows",
            variables: prefixed("shadow", shadows.iter().map(|(name, t)| (name, t.value.as_str()))),
        });
    }

    if let Some(radii) = &tokens.border_radius {
        sections.push(Section {
            title: "Border radius",
            variables: prefixed(
                "border-radius",
                radii.iter().map(|(name, t)| (name, t.value.as_str())),
            ),
        });
    }

    sections
}

fn prefixed<'a>(
    prefix: &str,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> Vec<(String, &'a str)> {
    entries
        .map(|(name, value)| (format!("{prefix}-{name}"), value))
        .collect()
}
