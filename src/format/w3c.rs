//! The W3C design-tokens document written to `design-tokens.json`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tokens::{
    ColorToken, DimensionToken, ShadowToken, TokenCategory, TokenSet, TypographyToken,
};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

pub const SCHEMA_URL: &str = "https://design-tokens.github.io/design-tokens/tokens.schema.json";

/// Key holding a group's own type tag; a token cannot share it.
pub const GROUP_TAG_KEY: &str = "type";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct W3CTokenDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub tokens: W3CTokens,
}

/// One optional group per category; an empty category is left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct W3CTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<TokenGroup<TypographyToken>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<TokenGroup<ColorToken>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadows: Option<TokenGroup<ShadowToken>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<TokenGroup<DimensionToken>>,
}

/// `{ "type": tag, name: { "type": tag, ...token }, ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenGroup<T> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub entries: BTreeMap<String, TypedToken<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedToken<T> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub token: T,
}

impl<T> TokenGroup<T> {
    /// Tokens in name order, without the group's own `type` tag.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(name, typed)| (name.as_str(), &typed.token))
    }
}

/// Reshape an extracted [`TokenSet`] into the W3C document layout.
pub fn to_w3c_format(tokens: &TokenSet) -> W3CTokenDocument {
    W3CTokenDocument {
        schema: SCHEMA_URL.to_string(),
        tokens: W3CTokens {
            typography: group(TokenCategory::Typography, &tokens.typography),
            colors: group(TokenCategory::Colors, &tokens.colors),
            shadows: group(TokenCategory::Shadows, &tokens.shadows),
            border_radius: group(TokenCategory::BorderRadius, &tokens.border_radius),
        },
    }
}

fn group<T: Clone>(category: TokenCategory, tokens: &BTreeMap<String, T>) -> Option<TokenGroup<T>> {
    if tokens.is_empty() {
        return None;
    }
    let kind = category.type_tag();
    let entries: BTreeMap<String, TypedToken<T>> = tokens
        .iter()
        .filter(|(name, _)| {
            let reserved = name.as_str() == GROUP_TAG_KEY;
            if reserved {
                log_warn!(
                    "Dropping {} token named \"{GROUP_TAG_KEY}\": the name is reserved for the group tag",
                    category.label()
                );
            }
            !reserved
        })
        .map(|(name, token)| {
            (
                name.clone(),
                TypedToken {
                    kind,
                    token: token.clone(),
                },
            )
        })
        .collect();
    if entries.is_empty() {
        return None;
    }
    Some(TokenGroup { kind, entries })
}
