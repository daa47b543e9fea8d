//! Renderer event types, decoupled from any concrete plotting surface
//!
//! The embedding layer translates its native pointer/relayout callbacks
//! into these structs before handing them to the orchestrator. Click and
//! hover coordinates arrive already resolved into the axis's native
//! domain.

use crate::axis::AxisValue;
use serde::{Deserialize, Serialize};

/// A resolved click on the plot area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub x: AxisValue,
    /// Per-trace y samples at the clicked point, keyed by channel name.
    #[serde(default)]
    pub y_per_trace: Vec<(String, f64)>,
}

/// A resolved hover over the plot area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverEvent {
    pub x: AxisValue,
    #[serde(default)]
    pub y_per_trace: Vec<(String, f64)>,
}

/// An axis-range change from pan/zoom/reset.
///
/// The range arrives either as paired min/max fields or as a range array;
/// `autorange` marks a reset and must map back to the dataset's full known
/// extent, not be treated as "no data needed".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayoutEvent {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub x_range: Option<[f64; 2]>,
    #[serde(default)]
    pub autorange: bool,
}

impl RelayoutEvent {
    /// Resolve the event into a concrete `(min, max)` range, given the
    /// dataset's full extent for autorange/reset events.
    pub fn resolve_range(&self, full_extent: (f64, f64)) -> Option<(f64, f64)> {
        if self.autorange {
            return Some(full_extent);
        }
        if let (Some(min), Some(max)) = (self.x_min, self.x_max) {
            return Some((min, max));
        }
        self.x_range.map(|[min, max]| (min, max))
    }
}
