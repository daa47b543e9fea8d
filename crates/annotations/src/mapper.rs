//! Label-to-visual mapper
//!
//! Pure and order-preserving: the same label model always maps to the
//! same shape/annotation lists, and hiding an entry is the only way to
//! take its visuals away without deleting it.

use crate::visuals::{Annotation, Shape, ShapeKind, ShapeLine, Visuals};
use tracelab_shared::viewport::ChannelRef;
use tracelab_shared::{AxisValue, LabelModel};

/// Fill opacity of committed event rectangles.
pub const EVENT_FILL_OPACITY: f64 = 0.2;

/// Paper-width fraction reserved per stacked y axis; the guideline's
/// horizontal extent starts after the gutter so axis labels stay legible.
pub const AXIS_GUTTER_FRACTION: f64 = 0.04;

/// Convert the label model into renderer-ready visuals.
pub fn to_visuals(model: &LabelModel, channels: &[ChannelRef]) -> Visuals {
    let mut visuals = Visuals::default();

    for event in model.events.iter().filter(|e| !e.hide) {
        visuals.shapes.push(Shape {
            kind: ShapeKind::Rect,
            xref: "x".to_string(),
            yref: "paper".to_string(),
            x0: event.start.clone(),
            x1: event.end.clone(),
            y0: AxisValue::Number(0.0),
            y1: AxisValue::Number(1.0),
            fill_color: Some(event.color.clone()),
            opacity: EVENT_FILL_OPACITY,
            layer: "below".to_string(),
            line: None,
        });

        visuals.annotations.push(text_annotation(
            event.start.clone(),
            AxisValue::Number(1.02),
            "start",
            "center",
        ));
        visuals.annotations.push(text_annotation(
            event.end.clone(),
            AxisValue::Number(1.02),
            "end",
            "center",
        ));
        visuals.annotations.push(text_annotation(
            AxisValue::midpoint(&event.start, &event.end),
            AxisValue::Number(1.06),
            &format!("{} - {}", event.class_name, event.labeler),
            "center",
        ));
    }

    let gutter = (AXIS_GUTTER_FRACTION * channels.len() as f64).min(0.6);
    for guideline in model.guidelines.iter().filter(|g| !g.hide) {
        visuals.shapes.push(Shape {
            kind: ShapeKind::Line,
            xref: "paper".to_string(),
            yref: guideline.yaxis.clone(),
            x0: AxisValue::Number(gutter),
            x1: AxisValue::Number(1.0),
            y0: guideline.y.clone(),
            y1: guideline.y.clone(),
            fill_color: None,
            opacity: 1.0,
            layer: "above".to_string(),
            line: Some(ShapeLine {
                color: guideline.color.clone(),
                width: 1.5,
                dash: Some("dot".to_string()),
            }),
        });

        visuals.annotations.push(Annotation {
            x: AxisValue::Number(1.0),
            y: guideline.y.clone(),
            xref: "paper".to_string(),
            yref: guideline.yaxis.clone(),
            text: format!("{} - {}", guideline.channel_name, guideline.y),
            show_arrow: false,
            x_anchor: "right".to_string(),
        });
    }

    visuals
}

fn text_annotation(x: AxisValue, y: AxisValue, text: &str, anchor: &str) -> Annotation {
    Annotation {
        x,
        y,
        xref: "x".to_string(),
        yref: "paper".to_string(),
        text: text.to_string(),
        show_arrow: false,
        x_anchor: anchor.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracelab_shared::labels::{Guideline, LabelEvent};

    fn event(start: f64, end: f64, hide: bool) -> LabelEvent {
        LabelEvent {
            class_name: "Spike".to_string(),
            color: "#ff0000".to_string(),
            description: String::new(),
            labeler: "alice".to_string(),
            start: AxisValue::Number(start),
            end: AxisValue::Number(end),
            hide,
        }
    }

    fn channels(n: usize) -> Vec<ChannelRef> {
        (0..n)
            .map(|i| ChannelRef::new(&format!("ch{i}"), "V", "#1f77b4", &format!("y{}", i + 1)))
            .collect()
    }

    #[test]
    fn test_event_maps_to_rect_and_three_annotations() {
        let model = LabelModel {
            events: vec![event(10.0, 25.0, false)],
            guidelines: vec![],
        };
        let visuals = to_visuals(&model, &channels(1));

        assert_eq!(visuals.shapes.len(), 1);
        assert_eq!(visuals.shapes[0].kind, ShapeKind::Rect);
        assert_eq!(visuals.shapes[0].x0, AxisValue::Number(10.0));
        assert_eq!(visuals.shapes[0].x1, AxisValue::Number(25.0));

        assert_eq!(visuals.annotations.len(), 3);
        assert_eq!(visuals.annotations[0].text, "start");
        assert_eq!(visuals.annotations[1].text, "end");
        assert_eq!(visuals.annotations[2].text, "Spike - alice");
        assert_eq!(visuals.annotations[2].x, AxisValue::Number(17.5));
    }

    #[test]
    fn test_guideline_maps_to_line_with_scaled_gutter() {
        let model = LabelModel {
            events: vec![],
            guidelines: vec![Guideline {
                channel_name: "Temperature".to_string(),
                color: "#00ff00".to_string(),
                y: AxisValue::Number(42.5),
                yaxis: "y2".to_string(),
                hide: false,
            }],
        };

        let visuals = to_visuals(&model, &channels(3));
        assert_eq!(visuals.shapes.len(), 1);
        let line = &visuals.shapes[0];
        assert_eq!(line.kind, ShapeKind::Line);
        assert_eq!(line.yref, "y2");
        assert_eq!(line.x0, AxisValue::Number(AXIS_GUTTER_FRACTION * 3.0));
        assert_eq!(line.x1, AxisValue::Number(1.0));

        assert_eq!(visuals.annotations.len(), 1);
        assert_eq!(visuals.annotations[0].text, "Temperature - 42.5");
        assert_eq!(visuals.annotations[0].x_anchor, "right");
    }

    #[test]
    fn test_mapper_is_pure_and_idempotent() {
        let model = LabelModel {
            events: vec![event(0.0, 5.0, false), event(10.0, 20.0, false)],
            guidelines: vec![],
        };
        let chans = channels(2);
        let first = to_visuals(&model, &chans);
        let second = to_visuals(&model, &chans);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hidden_entries_produce_nothing() {
        let model = LabelModel {
            events: vec![event(0.0, 5.0, true), event(10.0, 20.0, true)],
            guidelines: vec![Guideline {
                channel_name: "p".to_string(),
                color: "#000000".to_string(),
                y: AxisValue::Number(1.0),
                yaxis: "y".to_string(),
                hide: true,
            }],
        };
        let visuals = to_visuals(&model, &channels(1));
        assert!(visuals.shapes.is_empty());
        assert!(visuals.annotations.is_empty());
    }

    #[test]
    fn test_click_order_is_preserved_even_when_reversed() {
        // start > end is tolerated; the rect keeps the click order.
        let model = LabelModel {
            events: vec![event(25.0, 10.0, false)],
            guidelines: vec![],
        };
        let visuals = to_visuals(&model, &channels(1));
        assert_eq!(visuals.shapes[0].x0, AxisValue::Number(25.0));
        assert_eq!(visuals.shapes[0].x1, AxisValue::Number(10.0));
    }

    #[test]
    fn test_chronological_midpoint_annotation() {
        let model = LabelModel {
            events: vec![LabelEvent {
                class_name: "Dip".to_string(),
                color: "#0000ff".to_string(),
                description: String::new(),
                labeler: "bob".to_string(),
                start: AxisValue::Timestamp("2024-01-01T00:00:00Z".to_string()),
                end: AxisValue::Timestamp("2024-01-01T02:00:00Z".to_string()),
                hide: false,
            }],
            guidelines: vec![],
        };
        let visuals = to_visuals(&model, &channels(1));
        assert_eq!(
            visuals.annotations[2].x,
            AxisValue::Timestamp("2024-01-01T01:00:00.000Z".to_string())
        );
    }
}
