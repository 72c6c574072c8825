use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::api::models::{Effect, Node, NodesResponse, StyleDescriptor, StylesResponse};
use crate::api::{fetch_as, ApiError, DesignApi};

use super::models::{
    format_number, rgba, token_name, ColorToken, ShadowToken, TokenCategory, TokenSet, TokenValue,
    TypographyToken,
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

const DEFAULT_FONT_WEIGHT: f64 = 400.0;

/// Why a single style produced no token.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("node {node_id} missing from response")]
    MissingNode { node_id: String },

    #[error("malformed node: {0}")]
    Malformed(String),
}

type BuildToken<T> = fn(&Node) -> Result<Option<T>, ExtractError>;

/// Pulls styles from one design file and turns them into tokens.
pub struct TokenExtractor<A: ?Sized> {
    api: Arc<A>,
    file_key: String,
}

impl<A: DesignApi + ?Sized> TokenExtractor<A> {
    pub fn new(api: Arc<A>, file_key: impl Into<String>) -> Self {
        Self {
            api,
            file_key: file_key.into(),
        }
    }

    /// Extract every category. Categories are independent; a failure in one
    /// leaves it empty and does not touch the others.
    pub async fn extract_all(&self) -> TokenSet {
        log_info!("Starting design tokens extraction...");

        let colors = self.extract_colors().await;
        log_info!("Successfully extracted {} colors", colors.len());

        let typography = self.extract_typography().await;
        log_info!("Successfully extracted {} typography styles", typography.len());

        let shadows = self.extract_shadows().await;
        log_info!("Successfully extracted {} shadows", shadows.len());

        TokenSet {
            typography,
            colors,
            shadows,
            border_radius: BTreeMap::new(),
        }
    }

    pub async fn extract_colors(&self) -> BTreeMap<String, ColorToken> {
        self.extract_category(TokenCategory::Colors, color_token).await
    }

    pub async fn extract_typography(&self) -> BTreeMap<String, TypographyToken> {
        self.extract_category(TokenCategory::Typography, typography_token)
            .await
    }

    pub async fn extract_shadows(&self) -> BTreeMap<String, ShadowToken> {
        self.extract_category(TokenCategory::Shadows, shadow_token).await
    }

    /// Fetch the style list, keep the styles feeding `category`, and build one
    /// token per style. Per-style failures are logged and skipped.
    pub async fn extract_category<T>(
        &self,
        category: TokenCategory,
        build: BuildToken<T>,
    ) -> BTreeMap<String, T> {
        let mut tokens = BTreeMap::new();

        let Some(wanted) = category.style_type() else {
            return tokens;
        };

        log_info!("Getting {} from Figma...", category.label());
        let styles = match self.list_styles().await {
            Ok(styles) => styles,
            Err(err) => {
                log_error!("Error getting {}: {err}", category.label());
                return tokens;
            }
        };

        let matching: Vec<&StyleDescriptor> =
            styles.iter().filter(|style| style.style_type == wanted).collect();
        log_info!(
            "Found {} styles, {} of them {}",
            styles.len(),
            matching.len(),
            category.label()
        );

        for style in matching {
            let name = token_name(&style.name);
            let Some(node_id) = style.node_reference.as_deref().filter(|id| !id.is_empty()) else {
                log::debug!("Style {name} has no node reference, skipping");
                continue;
            };

            match self.extract_style(node_id, build).await {
                Ok(Some(token)) => {
                    log::debug!("Extracted {}: {name}", category.type_tag());
                    if tokens.insert(name.clone(), token).is_some() {
                        log::debug!("Token name {name} seen twice, keeping the later style");
                    }
                }
                Ok(None) => log::debug!("Style {name} yielded no {} value", category.type_tag()),
                Err(err) => log_warn!(
                    "Failed to get {} details for style {name}: {err}",
                    category.type_tag()
                ),
            }
        }

        tokens
    }

    async fn list_styles(&self) -> Result<Vec<StyleDescriptor>, ApiError> {
        let endpoint = format!("files/{}/styles", self.file_key);
        let response: StylesResponse = fetch_as(self.api.as_ref(), &endpoint).await?;
        let styles = response
            .into_entries()
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<StyleDescriptor>(entry) {
                Ok(style) => Some(style),
                Err(err) => {
                    log_warn!("Skipping malformed style entry: {err}");
                    None
                }
            })
            .collect();
        Ok(styles)
    }

    async fn extract_style<T>(
        &self,
        node_id: &str,
        build: BuildToken<T>,
    ) -> Result<Option<T>, ExtractError> {
        let node = self.fetch_node(node_id).await?;
        build(&node)
    }

    async fn fetch_node(&self, node_id: &str) -> Result<Node, ExtractError> {
        let endpoint = format!("files/{}/nodes?ids={}", self.file_key, node_id);
        let mut response: NodesResponse = fetch_as(self.api.as_ref(), &endpoint).await?;
        response
            .nodes
            .remove(node_id)
            .flatten()
            .and_then(|entry| entry.document)
            .ok_or_else(|| ExtractError::MissingNode {
                node_id: node_id.to_string(),
            })
    }
}

fn color_token(node: &Node) -> Result<Option<ColorToken>, ExtractError> {
    let fill = node
        .fills
        .first()
        .ok_or_else(|| ExtractError::Malformed("node has no fills".into()))?;
    if fill.kind != "SOLID" {
        return Err(ExtractError::Malformed(format!(
            "first fill is {}, expected SOLID",
            fill.kind
        )));
    }
    let color = fill
        .color
        .as_ref()
        .ok_or_else(|| ExtractError::Malformed("solid fill has no color".into()))?;

    Ok(Some(TokenValue::new(rgba(color))))
}

fn typography_token(node: &Node) -> Result<Option<TypographyToken>, ExtractError> {
    let style = node
        .style
        .as_ref()
        .ok_or_else(|| ExtractError::Malformed("node has no text style".into()))?;
    let font_family = style
        .font_family
        .clone()
        .ok_or_else(|| ExtractError::Malformed("text style has no fontFamily".into()))?;
    let font_size = style
        .font_size
        .ok_or_else(|| ExtractError::Malformed("text style has no fontSize".into()))?;

    let line_height = match style.line_height_percent {
        Some(percent) if percent != 0.0 => format!("{}%", format_number(percent)),
        _ => "normal".to_string(),
    };
    let letter_spacing = match style.letter_spacing {
        Some(spacing) if spacing != 0.0 => format!("{}px", format_number(spacing)),
        _ => "normal".to_string(),
    };

    Ok(Some(TypographyToken {
        font_family: TokenValue::new(font_family),
        font_size: TokenValue::new(format!("{}px", format_number(font_size))),
        font_weight: TokenValue::new(format_number(
            style.font_weight.unwrap_or(DEFAULT_FONT_WEIGHT),
        )),
        line_height: TokenValue::new(line_height),
        letter_spacing: TokenValue::new(letter_spacing),
    }))
}

fn shadow_token(node: &Node) -> Result<Option<ShadowToken>, ExtractError> {
    let shadows = node
        .effects
        .iter()
        .filter(|effect| matches!(effect.kind.as_str(), "DROP_SHADOW" | "INNER_SHADOW"))
        .map(box_shadow)
        .collect::<Result<Vec<_>, _>>()?;

    if shadows.is_empty() {
        return Ok(None);
    }
    Ok(Some(TokenValue::new(shadows.join(", "))))
}

fn box_shadow(effect: &Effect) -> Result<String, ExtractError> {
    let offset = effect
        .offset
        .ok_or_else(|| ExtractError::Malformed(format!("{} has no offset", effect.kind)))?;
    let color = effect
        .color
        .as_ref()
        .ok_or_else(|| ExtractError::Malformed(format!("{} has no color", effect.kind)))?;
    let inset = if effect.kind == "INNER_SHADOW" { "inset " } else { "" };

    Ok(format!(
        "{inset}{}px {}px {}px {}",
        format_number(offset.x),
        format_number(offset.y),
        format_number(effect.radius.unwrap_or(0.0)),
        rgba(color)
    ))
}
