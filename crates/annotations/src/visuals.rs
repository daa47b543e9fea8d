//! Renderer-agnostic shape and annotation descriptors
//!
//! These are immutable per-render values: the mapper produces a fresh
//! `Visuals` from the label model and the renderer adapter diffs/applies
//! it. Nothing here is mutated in place across render passes.

use serde::Serialize;
use tracelab_shared::AxisValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Line,
}

/// Stroke styling for line shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeLine {
    pub color: String,
    pub width: f64,
    pub dash: Option<String>,
}

/// One renderer shape. Coordinates reference either a data axis ("x",
/// "y", "y2", ...) or the paper (fraction of plot area, 0..1).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub kind: ShapeKind,
    pub xref: String,
    pub yref: String,
    pub x0: AxisValue,
    pub x1: AxisValue,
    pub y0: AxisValue,
    pub y1: AxisValue,
    pub fill_color: Option<String>,
    pub opacity: f64,
    pub layer: String,
    pub line: Option<ShapeLine>,
}

/// One renderer text annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub x: AxisValue,
    pub y: AxisValue,
    pub xref: String,
    pub yref: String,
    pub text: String,
    pub show_arrow: bool,
    pub x_anchor: String,
}

/// Everything the renderer needs to draw the committed label data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visuals {
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}
