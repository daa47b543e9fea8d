//! Chart orchestrator
//!
//! One orchestrator per open file. Renderer events come in, viewport
//! fetches and label mutations go out; every committed visual is
//! recomputed from the label model through the mapper, and trace updates
//! always land together with the axis range they were fetched for.

use crate::autosave::LabelAutosave;
use crate::renderer::{Renderer, RendererUpdate};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracelab_annotations::{to_visuals, Effect, InteractionMachine, ToolMode};
use tracelab_data::{LabelRepository, ViewportFetchController, ViewportTransport};
use tracelab_shared::labels::LabelId;
use tracelab_shared::viewport::{ChannelRef, ViewportRequest, ViewportResponse};
use tracelab_shared::{
    AxisValue, ChartConfig, ClickEvent, HoverEvent, LabelClass, LabelEvent, LabelModel,
    RelayoutEvent, Result,
};

/// Per-file view state.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub file_id: String,
    /// The currently visible x range.
    pub x_range: (f64, f64),
    /// The dataset's full known extent; autorange maps back to this.
    pub full_extent: (f64, f64),
    pub channels: Vec<ChannelRef>,
    pub label_id: LabelId,
    pub user: String,
}

pub struct ChartOrchestrator<T: ViewportTransport, R: Renderer> {
    renderer: R,
    fetcher: Arc<ViewportFetchController<T>>,
    autosave: LabelAutosave,
    machine: InteractionMachine,
    model: LabelModel,
    state: ViewState,
    config: ChartConfig,
}

impl<T: ViewportTransport, R: Renderer> ChartOrchestrator<T, R> {
    pub fn new(
        renderer: R,
        transport: T,
        repository: Arc<dyn LabelRepository>,
        state: ViewState,
        config: ChartConfig,
    ) -> Self {
        let machine = InteractionMachine::new(state.channels.clone());
        let fetcher = Arc::new(ViewportFetchController::new(
            transport,
            Duration::from_millis(config.debounce_ms),
        ));
        let autosave =
            LabelAutosave::new(repository, Duration::from_millis(config.autosave_ms));
        Self {
            renderer,
            fetcher,
            autosave,
            machine,
            model: LabelModel::default(),
            state,
            config,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn model(&self) -> &LabelModel {
        &self.model
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    /// Completed selection awaiting a class choice, if any.
    pub fn pending_selection(&self) -> Option<&(AxisValue, AxisValue)> {
        self.machine.pending_selection()
    }

    /// Initial full-extent load. The response's range becomes the
    /// dataset's known extent for later autorange events, and the label
    /// model is adopted wholesale.
    pub async fn load_initial(&mut self, model: LabelModel) -> Result<()> {
        let request = ViewportRequest {
            file_id: self.state.file_id.clone(),
            x_min: self.state.full_extent.0,
            x_max: self.state.full_extent.1,
            max_points: self.config.max_points,
        };
        let response = self.fetcher.request(request).await?;
        self.state.full_extent = (response.metadata.x_min, response.metadata.x_max);
        let range = self.state.full_extent;
        self.model = model;
        self.apply_response(response, range);
        Ok(())
    }

    /// Begin a navigation refetch: resolve the event into a request and
    /// hand back a future that owns its controller handle, so the host
    /// can poll it while click/hover events keep flowing through the
    /// `&mut self` entry points. `None` means the event carried no usable
    /// range.
    pub fn begin_relayout(
        &self,
        event: &RelayoutEvent,
    ) -> Option<impl Future<Output = (Result<Option<ViewportResponse>>, (f64, f64))>> {
        let (x_min, x_max) = event.resolve_range(self.state.full_extent)?;
        let request = ViewportRequest {
            file_id: self.state.file_id.clone(),
            x_min,
            x_max,
            max_points: self.config.max_points,
        };
        let fetcher = Arc::clone(&self.fetcher);
        Some(async move { (fetcher.request_debounced(request).await, (x_min, x_max)) })
    }

    /// Apply the outcome of a relayout fetch. Superseded and cancelled
    /// outcomes are silent no-ops; real failures are surfaced to the
    /// renderer and leave the plot at its last consistent state.
    pub fn finish_relayout(
        &mut self,
        outcome: Result<Option<ViewportResponse>>,
        x_range: (f64, f64),
    ) -> Result<()> {
        match outcome {
            Ok(Some(response)) => {
                self.apply_response(response, x_range);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => {
                self.renderer.notify_error(&e);
                Err(e)
            }
        }
    }

    /// Sequential composition of `begin_relayout` and `finish_relayout`
    /// for hosts without concurrent event delivery.
    pub async fn on_relayout(&mut self, event: &RelayoutEvent) -> Result<()> {
        let Some(fetch) = self.begin_relayout(event) else {
            return Ok(());
        };
        let (outcome, x_range) = fetch.await;
        self.finish_relayout(outcome, x_range)
    }

    pub fn on_hover(&mut self, event: &HoverEvent) {
        if let Effect::PreviewChanged = self.machine.handle_hover(event) {
            self.renderer.set_preview(self.machine.preview());
        }
    }

    pub fn on_click(&mut self, event: &ClickEvent) {
        match self.machine.handle_click(event) {
            Effect::GuidelineReady(guideline) => {
                self.model.guidelines.push(guideline);
                self.renderer.set_preview(None);
                self.remap_overlays();
                self.autosave.mark_dirty();
            }
            Effect::PreviewChanged => {
                self.renderer.set_preview(self.machine.preview());
            }
            // SelectionMade: the preview stays up; the host resolves the
            // class choice and calls commit_pending_label.
            Effect::SelectionMade { .. } | Effect::None => {}
        }
    }

    pub fn set_tool(&mut self, mode: ToolMode) -> Result<()> {
        let result = self.machine.set_mode(mode);
        self.renderer.set_preview(None);
        result
    }

    pub fn cancel_gesture(&mut self) {
        self.machine.cancel_gesture();
        self.renderer.set_preview(None);
    }

    pub fn select_channel(&mut self, name: &str) -> Result<()> {
        self.machine.select_channel(name)
    }

    /// Resolve the pending selection into a committed event.
    pub fn commit_pending_label(&mut self, class: &LabelClass) -> Result<LabelEvent> {
        let event = self.machine.commit_label(class, &self.state.user)?;
        self.model.events.push(event.clone());
        self.renderer.set_preview(None);
        self.remap_overlays();
        self.autosave.mark_dirty();
        Ok(event)
    }

    pub fn hide_all_events(&mut self) {
        self.model.hide_all_events();
        self.remap_overlays();
        self.autosave.mark_dirty();
    }

    pub fn show_all_events(&mut self) {
        self.model.show_all_events();
        self.remap_overlays();
        self.autosave.mark_dirty();
    }

    pub fn clear_events(&mut self) {
        self.model.clear_events();
        self.remap_overlays();
        self.autosave.mark_dirty();
    }

    /// Replace the model wholesale (e.g. after an external refresh).
    pub fn adopt_model(&mut self, model: LabelModel) {
        self.model = model;
        self.remap_overlays();
    }

    /// Debounced autosave; run after mutations (usually spawned). The
    /// stored copy comes back as the new source of truth.
    pub async fn autosave_flush(&mut self) -> Result<()> {
        let stored = self
            .autosave
            .flush(self.state.label_id, self.model.clone(), &self.state.user)
            .await?;
        if let Some(stored) = stored {
            self.adopt_model(stored);
        }
        Ok(())
    }

    /// Manual save, bypassing the debounce.
    pub async fn save_now(&mut self) -> Result<()> {
        let stored = self
            .autosave
            .save_now(self.state.label_id, self.model.clone(), &self.state.user)
            .await?;
        self.adopt_model(stored);
        Ok(())
    }

    /// Drop all navigation work in flight (file/page change).
    pub fn shutdown(&mut self) {
        self.fetcher.cancel();
    }

    /// Apply a fetched viewport: trace data and axis range land together,
    /// committed overlays are recomputed from the model, and the preview
    /// slot is re-asserted so a data redraw can't resurrect stale shapes.
    fn apply_response(&mut self, response: ViewportResponse, x_range: (f64, f64)) {
        self.state.x_range = x_range;
        self.renderer.apply_update(RendererUpdate::from_response(
            &response,
            &self.state.channels,
            x_range,
        ));
        self.remap_overlays();
        self.renderer.set_preview(self.machine.preview());
    }

    fn remap_overlays(&mut self) {
        let visuals = to_visuals(&self.model, &self.state.channels);
        self.renderer.set_overlays(&visuals);
    }
}
