//! Annotation interaction state machine
//!
//! Interprets click/hover events against the current tool mode, building
//! a live preview shape and emitting candidate events/guidelines on
//! gesture completion. The preview lives in its own slot, never in the
//! committed shape list, so a data-driven redraw can't resurrect a stale
//! preview and the committed visuals are always recomputed from the label
//! model.

use tracelab_shared::labels::Guideline;
use tracelab_shared::viewport::ChannelRef;
use tracelab_shared::{AxisValue, ChartError, ClickEvent, HoverEvent, LabelClass, LabelEvent, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    None,
    Label,
    Guideline,
}

/// The single uncommitted shape shown during an in-progress gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewShape {
    VerticalLine { x: AxisValue },
    Rectangle { x0: AxisValue, x1: AxisValue },
    HorizontalLine { y: f64, yaxis: String },
}

/// What the caller must do after feeding one pointer event in.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The preview slot changed; mirror it to the renderer.
    PreviewChanged,
    /// A label gesture completed; resolve `(start, end)` into a class
    /// choice and call `commit_label`. The preview stays up meanwhile.
    SelectionMade { start: AxisValue, end: AxisValue },
    /// A guideline gesture completed and this guideline should be
    /// appended to the model.
    GuidelineReady(Guideline),
}

pub struct InteractionMachine {
    mode: ToolMode,
    click_count: u8,
    pending_start: Option<AxisValue>,
    pending_selection: Option<(AxisValue, AxisValue)>,
    selected_channel: Option<String>,
    channels: Vec<ChannelRef>,
    preview: Option<PreviewShape>,
}

impl InteractionMachine {
    pub fn new(channels: Vec<ChannelRef>) -> Self {
        Self {
            mode: ToolMode::None,
            click_count: 0,
            pending_start: None,
            pending_selection: None,
            selected_channel: None,
            channels,
            preview: None,
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn click_count(&self) -> u8 {
        self.click_count
    }

    pub fn preview(&self) -> Option<&PreviewShape> {
        self.preview.as_ref()
    }

    /// The completed-but-uncommitted selection, if a label gesture has
    /// finished and is waiting for a class choice.
    pub fn pending_selection(&self) -> Option<&(AxisValue, AxisValue)> {
        self.pending_selection.as_ref()
    }

    pub fn set_channels(&mut self, channels: Vec<ChannelRef>) {
        self.channels = channels;
        if let Some(name) = &self.selected_channel {
            if !self.channels.iter().any(|c| &c.name == name) {
                self.selected_channel = None;
            }
        }
    }

    pub fn select_channel(&mut self, name: &str) -> Result<()> {
        if self.channels.iter().any(|c| c.name == name) {
            self.selected_channel = Some(name.to_string());
            Ok(())
        } else {
            Err(ChartError::Gesture {
                message: format!("unknown channel {name:?}"),
            })
        }
    }

    /// Switch tool. Any in-progress gesture is abandoned: the click count
    /// resets and the preview slot is cleared. Entering guideline mode
    /// requires a target channel (the selected one, defaulting to the
    /// first available).
    pub fn set_mode(&mut self, mode: ToolMode) -> Result<()> {
        self.reset_gesture();
        if mode == ToolMode::Guideline && self.guideline_channel().is_none() {
            self.mode = ToolMode::None;
            return Err(ChartError::Gesture {
                message: "guideline mode requires at least one channel".to_string(),
            });
        }
        self.mode = mode;
        Ok(())
    }

    /// Abandon the current gesture and return to no-tool.
    pub fn cancel_gesture(&mut self) {
        self.reset_gesture();
        self.mode = ToolMode::None;
    }

    pub fn handle_click(&mut self, event: &ClickEvent) -> Effect {
        match self.mode {
            ToolMode::None => Effect::None,
            ToolMode::Label => self.label_click(event),
            ToolMode::Guideline => self.guideline_click(event),
        }
    }

    pub fn handle_hover(&mut self, event: &HoverEvent) -> Effect {
        match self.mode {
            ToolMode::None => Effect::None,
            ToolMode::Label => self.label_hover(event),
            ToolMode::Guideline => self.guideline_hover(event),
        }
    }

    /// Resolve the finished selection into a committed event. Fails if no
    /// selection is pending; the gesture state is preserved so the user
    /// can correct and retry. Click order is preserved into start/end.
    pub fn commit_label(&mut self, class: &LabelClass, labeler: &str) -> Result<LabelEvent> {
        let (start, end) = self
            .pending_selection
            .clone()
            .ok_or_else(|| ChartError::Gesture {
                message: "no selection to commit; draw a label interval first".to_string(),
            })?;

        let event = LabelEvent {
            class_name: class.name.clone(),
            color: class.color.clone(),
            description: class.description.clone(),
            labeler: labeler.to_string(),
            start,
            end,
            hide: false,
        };

        self.reset_gesture();
        self.mode = ToolMode::None;
        Ok(event)
    }

    fn label_click(&mut self, event: &ClickEvent) -> Effect {
        if self.click_count == 0 {
            // A fresh first click starts a new pair, replacing any earlier
            // uncommitted selection.
            self.pending_selection = None;
            self.pending_start = Some(event.x.clone());
            self.click_count = 1;
            Effect::None
        } else {
            self.click_count = 0;
            let start = match self.pending_start.take() {
                Some(s) => s,
                None => {
                    log::warn!("label gesture lost its start point, restarting");
                    return Effect::None;
                }
            };
            let end = event.x.clone();
            self.pending_selection = Some((start.clone(), end.clone()));
            // The preview stays up until the caller commits or cancels.
            Effect::SelectionMade { start, end }
        }
    }

    fn label_hover(&mut self, event: &HoverEvent) -> Effect {
        if self.click_count != 1 {
            return Effect::None;
        }
        let Some(start) = self.pending_start.clone() else {
            return Effect::None;
        };

        // First hover after the anchoring click shows a vertical line;
        // from the next hover on, the preview is a rectangle whose
        // pointer-side bound tracks live.
        self.preview = Some(match self.preview {
            None => PreviewShape::VerticalLine {
                x: event.x.clone(),
            },
            Some(_) => PreviewShape::Rectangle {
                x0: start,
                x1: event.x.clone(),
            },
        });
        Effect::PreviewChanged
    }

    fn guideline_click(&mut self, event: &ClickEvent) -> Effect {
        let Some(channel) = self.guideline_channel().cloned() else {
            return Effect::None;
        };

        let y = match &self.preview {
            Some(PreviewShape::HorizontalLine { y, .. }) => Some(*y),
            _ => project_y(event.y_per_trace.as_slice(), &channel.name),
        };
        let Some(y) = y else {
            log::warn!("guideline click carried no y sample for {:?}", channel.name);
            return Effect::None;
        };

        let guideline = Guideline {
            channel_name: channel.name.clone(),
            color: channel.color.clone(),
            y: AxisValue::Number(y),
            yaxis: channel.axis_id.clone(),
            hide: false,
        };

        self.reset_gesture();
        self.mode = ToolMode::None;
        Effect::GuidelineReady(guideline)
    }

    fn guideline_hover(&mut self, event: &HoverEvent) -> Effect {
        let Some(channel) = self.guideline_channel().cloned() else {
            return Effect::None;
        };
        let Some(y) = project_y(event.y_per_trace.as_slice(), &channel.name) else {
            return Effect::None;
        };

        self.preview = Some(PreviewShape::HorizontalLine {
            y,
            yaxis: channel.axis_id.clone(),
        });
        Effect::PreviewChanged
    }

    fn guideline_channel(&self) -> Option<&ChannelRef> {
        match &self.selected_channel {
            Some(name) => self.channels.iter().find(|c| &c.name == name),
            None => self.channels.first(),
        }
    }

    fn reset_gesture(&mut self) {
        self.click_count = 0;
        self.pending_start = None;
        self.pending_selection = None;
        self.preview = None;
    }
}

/// Pick the hovered y sample for the target channel. Events carrying no
/// sample for it are ignored; another trace's value must never end up
/// pinned on this channel's axis.
fn project_y(samples: &[(String, f64)], channel: &str) -> Option<f64> {
    samples
        .iter()
        .find(|(name, _)| name == channel)
        .map(|(_, y)| *y)
}
