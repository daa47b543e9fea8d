//! Viewport orchestrator for tracelab
//!
//! Owns the renderer handle and wires relayout/click/hover events from
//! the renderer into the fetch controller and the interaction state
//! machine, reconciling live data updates without discarding the user's
//! current pan/zoom.

pub mod autosave;
pub mod orchestrator;
pub mod renderer;

pub use autosave::LabelAutosave;
pub use orchestrator::{ChartOrchestrator, ViewState};
pub use renderer::{Renderer, RendererUpdate, Trace};
