//! Shared types for the tracelab viewport streaming and annotation engine
//!
//! This crate contains all types that are shared between the data-manager,
//! annotations, and chart-orchestrator crates: axis values, viewport
//! metadata, the label model, renderer-facing event types, configuration,
//! and the common error enum.

pub mod axis;
pub mod chart_config;
pub mod errors;
pub mod events;
pub mod labels;
pub mod viewport;

pub use axis::AxisValue;
pub use chart_config::{ChartConfig, ConfigValidationResult};
pub use errors::{ChartError, Result};
pub use events::{ClickEvent, HoverEvent, RelayoutEvent};
pub use labels::{Guideline, LabelClass, LabelEvent, LabelId, LabelModel};
pub use viewport::{
    ChannelRef, ViewportMetadata, ViewportRequest, ViewportResponse, XAxisType,
};
