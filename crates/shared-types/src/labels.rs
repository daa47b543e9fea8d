//! Label model: events, guidelines, and the classes users resolve
//! selections into
//!
//! The model is owned by the labeling page for one file; it is mutated by
//! the interaction machine on gesture commit, by the bulk operations here,
//! and replaced wholesale when a server round-trip returns the stored copy.

use crate::axis::AxisValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one stored label set, assigned by the persistence layer.
pub type LabelId = Uuid;

/// One labeled interval on the x axis.
///
/// `start`/`end` keep click order: whichever click came first is `start`,
/// even when it is numerically the larger bound. Downstream renders sort
/// visually, so the permissive ordering is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelEvent {
    pub class_name: String,
    pub color: String,
    pub description: String,
    pub labeler: String,
    pub start: AxisValue,
    pub end: AxisValue,
    /// Removes the event from rendering but not from storage.
    #[serde(default)]
    pub hide: bool,
}

/// A horizontal reference line pinned at `y` on one channel's axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guideline {
    pub channel_name: String,
    pub color: String,
    pub y: AxisValue,
    pub yaxis: String,
    #[serde(default)]
    pub hide: bool,
}

/// An event class the user can resolve a selection into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelClass {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

/// All label data for one open file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelModel {
    #[serde(default)]
    pub events: Vec<LabelEvent>,
    #[serde(default)]
    pub guidelines: Vec<Guideline>,
}

impl LabelModel {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.guidelines.is_empty()
    }

    /// Hide every event without deleting anything.
    pub fn hide_all_events(&mut self) {
        for event in &mut self.events {
            event.hide = true;
        }
    }

    pub fn show_all_events(&mut self) {
        for event in &mut self.events {
            event.hide = false;
        }
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn clear_guidelines(&mut self) {
        self.guidelines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> LabelModel {
        LabelModel {
            events: vec![LabelEvent {
                class_name: "Spike".to_string(),
                color: "#ff0000".to_string(),
                description: String::new(),
                labeler: "alice".to_string(),
                start: AxisValue::Number(10.0),
                end: AxisValue::Number(25.0),
                hide: false,
            }],
            guidelines: vec![Guideline {
                channel_name: "Temperature".to_string(),
                color: "#00ff00".to_string(),
                y: AxisValue::Number(42.5),
                yaxis: "y".to_string(),
                hide: false,
            }],
        }
    }

    #[test]
    fn test_model_round_trip() {
        let model = sample_model();
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"className\":\"Spike\""));
        let back: LabelModel = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }

    #[test]
    fn test_hide_all_is_not_delete() {
        let mut model = sample_model();
        model.hide_all_events();
        assert_eq!(model.events.len(), 1);
        assert!(model.events[0].hide);
        model.show_all_events();
        assert!(!model.events[0].hide);
    }

    #[test]
    fn test_clear_events_keeps_guidelines() {
        let mut model = sample_model();
        model.clear_events();
        assert!(model.events.is_empty());
        assert_eq!(model.guidelines.len(), 1);
    }
}
