use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::models::{Color, StyleType};

/// Token categories in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Typography,
    Colors,
    Shadows,
    BorderRadius,
}

impl TokenCategory {
    /// The `type` tag written on the category and on each of its tokens.
    pub fn type_tag(self) -> &'static str {
        match self {
            TokenCategory::Typography => "typography",
            TokenCategory::Colors => "color",
            TokenCategory::Shadows => "shadow",
            TokenCategory::BorderRadius => "dimension",
        }
    }

    /// The remote style type feeding this category. `BorderRadius` has none.
    pub fn style_type(self) -> Option<StyleType> {
        match self {
            TokenCategory::Typography => Some(StyleType::Text),
            TokenCategory::Colors => Some(StyleType::Fill),
            TokenCategory::Shadows => Some(StyleType::Effect),
            TokenCategory::BorderRadius => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TokenCategory::Typography => "typography",
            TokenCategory::Colors => "colors",
            TokenCategory::Shadows => "shadows",
            TokenCategory::BorderRadius => "border radius",
        }
    }
}

/// A `{ "value": ... }` leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValue {
    pub value: String,
}

impl TokenValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

pub type ColorToken = TokenValue;
pub type ShadowToken = TokenValue;
pub type DimensionToken = TokenValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    pub font_family: TokenValue,
    pub font_size: TokenValue,
    pub font_weight: TokenValue,
    pub line_height: TokenValue,
    pub letter_spacing: TokenValue,
}

/// Extracted tokens grouped by category. Rebuilt from scratch on every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    pub typography: BTreeMap<String, TypographyToken>,
    pub colors: BTreeMap<String, ColorToken>,
    pub shadows: BTreeMap<String, ShadowToken>,
    /// Reserved; nothing populates it yet.
    pub border_radius: BTreeMap<String, DimensionToken>,
}

impl TokenSet {
    pub fn len(&self) -> usize {
        self.typography.len() + self.colors.len() + self.shadows.len() + self.border_radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `"Brand/Primary Blue"` -> `"brand-primary-blue"`.
///
/// Slashes become hyphens, each run of whitespace becomes one hyphen, then
/// everything is lowercased.
pub fn token_name(style_name: &str) -> String {
    let mut out = String::with_capacity(style_name.len());
    let mut in_whitespace = false;
    for ch in style_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch == '/' {
            out.push('-');
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Renders a number the way the token files expect: `12` rather than `12.0`,
/// and `0` rather than `-0`.
pub fn format_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}

/// `rgba(r, g, b, a)` with 0-1 channels scaled to 0-255. Alpha defaults to 1.
pub fn rgba(color: &Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        channel(color.r),
        channel(color.g),
        channel(color.b),
        format_number(color.a.unwrap_or(1.0))
    )
}

fn channel(value: f64) -> i64 {
    // f64::round rounds half away from zero
    (value * 255.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_name_normalizes_separators() {
        assert_eq!(token_name("Brand/Primary"), "brand-primary");
        assert_eq!(token_name("Heading  Large"), "heading-large");
        assert_eq!(token_name("Brand / Primary"), "brand---primary");
        assert_eq!(token_name("Shadow\tXL"), "shadow-xl");
    }

    #[test]
    fn rgba_rounds_channels() {
        let color = Color {
            r: 0.2,
            g: 0.4,
            b: 1.0,
            a: Some(0.5),
        };
        assert_eq!(rgba(&color), "rgba(51, 102, 255, 0.5)");
    }

    #[test]
    fn rgba_defaults_alpha_to_one() {
        let color = Color {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: None,
        };
        assert_eq!(rgba(&color), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn format_number_drops_trailing_zero() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-1.5), "-1.5");
    }

    #[test]
    fn format_number_drops_negative_zero_sign() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format!("{}px", format_number(-0.0)), "0px");
    }
}
