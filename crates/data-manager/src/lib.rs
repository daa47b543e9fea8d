//! Viewport data management for tracelab
//!
//! This crate owns the wire side of the engine:
//! - decoding the binary concatenated-columns viewport format
//! - resolving out-of-band response headers, with degraded-header recovery
//! - the debounced, cancelable fetch controller (at most one request in
//!   flight per controller, superseded requests are aborted)
//! - HTTP transports for the viewport and label persistence endpoints

pub mod controller;
pub mod decoder;
pub mod headers;
pub mod transport;

pub use controller::ViewportFetchController;
pub use decoder::decode_viewport;
pub use headers::ViewportHeaders;
pub use transport::{
    HttpLabelRepository, HttpViewportTransport, LabelRepository, ViewportTransport,
};
