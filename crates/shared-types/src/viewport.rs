//! Viewport data types: requests, responses, and channel descriptors

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Semantic type of the x axis, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XAxisType {
    Timestamp,
    Numeric,
}

impl Default for XAxisType {
    fn default() -> Self {
        XAxisType::Numeric
    }
}

/// Side-channel metadata describing one viewport response.
///
/// Invariant: `num_columns == channel_names.len() + 1` (the extra column
/// is the x axis), and `returned_points` is identical across every column
/// of the response it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportMetadata {
    pub total_points: u64,
    pub returned_points: u64,
    pub is_full_resolution: bool,
    pub x_min: f64,
    pub x_max: f64,
    pub num_columns: u32,
    pub channel_names: Vec<String>,
    pub x_type: XAxisType,
    pub x_format: Option<String>,
}

impl ViewportMetadata {
    /// An all-zero metadata block, used for the empty-buffer response.
    pub fn empty() -> Self {
        Self {
            total_points: 0,
            returned_points: 0,
            is_full_resolution: true,
            x_min: 0.0,
            x_max: 0.0,
            num_columns: 0,
            channel_names: Vec::new(),
            x_type: XAxisType::Numeric,
            x_format: None,
        }
    }
}

/// One decoded viewport: a shared x column plus one column per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportResponse {
    pub x: Vec<f64>,
    pub channels: HashMap<String, Vec<f64>>,
    pub metadata: ViewportMetadata,
}

impl ViewportResponse {
    pub fn empty() -> Self {
        Self {
            x: Vec::new(),
            channels: HashMap::new(),
            metadata: ViewportMetadata::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Parameters for one viewport fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportRequest {
    pub file_id: String,
    pub x_min: f64,
    pub x_max: f64,
    /// Target downsample count per channel.
    pub max_points: u32,
}

/// Descriptor for one plotted channel: styling plus the y-axis it lives on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRef {
    pub name: String,
    pub unit: String,
    /// Hex color, e.g. "#1f77b4".
    pub color: String,
    /// Renderer axis id, e.g. "y", "y2".
    pub axis_id: String,
}

impl ChannelRef {
    pub fn new(name: &str, unit: &str, color: &str, axis_id: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            color: color.to_string(),
            axis_id: axis_id.to_string(),
        }
    }
}
