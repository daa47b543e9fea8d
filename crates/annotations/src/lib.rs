//! Annotation layer for tracelab
//!
//! Two halves: a pure mapper that turns the label model into
//! renderer-ready shape/annotation descriptors, and the interaction state
//! machine that turns pointer gestures into candidate events and
//! guidelines while maintaining a single live preview shape.

pub mod interaction;
pub mod mapper;
pub mod visuals;

pub use interaction::{Effect, InteractionMachine, PreviewShape, ToolMode};
pub use mapper::to_visuals;
pub use visuals::{Annotation, Shape, ShapeKind, ShapeLine, Visuals};
