//! Renderer seam
//!
//! The plotting surface is an external collaborator; tracelab only needs
//! it to accept trace arrays, overlay shape/annotation lists, a preview
//! slot, and an error surface. Trace data and the axis range travel in
//! one `RendererUpdate` so the view never jumps to an autoscaled range
//! and then snaps back.

use tracelab_annotations::{PreviewShape, Visuals};
use tracelab_shared::viewport::{ChannelRef, ViewportResponse};
use tracelab_shared::ChartError;

/// One plotted series.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub unit: String,
    pub color: String,
    pub axis_id: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Atomic renderer update: traces plus the axis range they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererUpdate {
    pub traces: Vec<Trace>,
    pub x_range: (f64, f64),
    pub is_full_resolution: bool,
}

impl RendererUpdate {
    /// Build traces from a decoded response, styled and ordered by the
    /// channel descriptors. Channels the response lacks (e.g. truncated
    /// by a bounds error) are skipped.
    pub fn from_response(
        response: &ViewportResponse,
        channels: &[ChannelRef],
        x_range: (f64, f64),
    ) -> Self {
        let traces = channels
            .iter()
            .filter_map(|channel| {
                let y = response.channels.get(&channel.name)?;
                Some(Trace {
                    name: channel.name.clone(),
                    unit: channel.unit.clone(),
                    color: channel.color.clone(),
                    axis_id: channel.axis_id.clone(),
                    x: response.x.clone(),
                    y: y.clone(),
                })
            })
            .collect();

        Self {
            traces,
            x_range,
            is_full_resolution: response.metadata.is_full_resolution,
        }
    }
}

/// The orchestrator's view of the plotting surface.
pub trait Renderer {
    /// Replace trace data and the stored axis range together.
    fn apply_update(&mut self, update: RendererUpdate);

    /// Replace the committed shapes/annotations wholesale.
    fn set_overlays(&mut self, visuals: &Visuals);

    /// Mirror the single in-progress preview shape; `None` clears it.
    fn set_preview(&mut self, preview: Option<&PreviewShape>);

    /// Surface a user-visible failure; the plot itself stays at its last
    /// consistent state.
    fn notify_error(&mut self, error: &ChartError);
}
