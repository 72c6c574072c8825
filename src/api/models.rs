//! Wire shapes for the subset of the Figma REST API the exporter reads.
//!
//! Everything the API may leave out is an `Option`; defaults are applied by
//! the extractor, not here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `designs/{key}` and the legacy `files/{key}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileInfo {
    pub version: Option<String>,
    /// Style map keyed by node id. Only checked for presence.
    pub styles: Option<Value>,
}

/// Response of `files/{key}/styles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StylesResponse {
    pub meta: Option<StylesMeta>,
}

impl StylesResponse {
    /// Raw style entries. Each one is decoded into a [`StyleDescriptor`] on its
    /// own so a single malformed entry cannot sink the whole list.
    pub fn into_entries(self) -> Vec<Value> {
        self.meta.and_then(|meta| meta.styles).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StylesMeta {
    pub styles: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleDescriptor {
    #[serde(rename = "key", default)]
    pub id: String,
    pub name: String,
    pub style_type: StyleType,
    #[serde(rename = "node_id")]
    pub node_reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StyleType {
    Fill,
    Text,
    Effect,
    #[serde(other)]
    Other,
}

/// Response of `files/{key}/nodes?ids={id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodesResponse {
    #[serde(default)]
    pub nodes: HashMap<String, Option<NodeEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeEntry {
    pub document: Option<Node>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
    pub id: Option<String>,
    #[serde(default)]
    pub fills: Vec<Paint>,
    pub style: Option<TypeStyle>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: Option<Color>,
}

/// RGBA with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub line_height_percent: Option<f64>,
    pub letter_spacing: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: Option<Vector>,
    pub radius: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}
