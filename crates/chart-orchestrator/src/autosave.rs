//! Debounced label persistence
//!
//! Every committed mutation marks the model dirty; the host runs `flush`
//! afterwards (typically spawned), and bursts of edits within the quiet
//! period collapse into a single save. `save_now` is the manual path that
//! skips the debounce.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracelab_data::LabelRepository;
use tracelab_shared::labels::LabelId;
use tracelab_shared::{LabelModel, Result};

pub struct LabelAutosave {
    repository: Arc<dyn LabelRepository>,
    debounce: Duration,
    generation: AtomicU64,
    dirty: AtomicBool,
}

impl LabelAutosave {
    pub fn new(repository: Arc<dyn LabelRepository>, debounce: Duration) -> Self {
        Self {
            repository,
            debounce,
            generation: AtomicU64::new(0),
            dirty: AtomicBool::new(false),
        }
    }

    /// Record one more edit; invalidates any flush already waiting out
    /// the quiet period.
    pub fn mark_dirty(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Debounced save. Resolves `Ok(None)` when there was nothing to save
    /// or a newer edit superseded this flush; `Ok(Some(stored))` carries
    /// the repository's copy for the caller to re-adopt.
    pub async fn flush(
        &self,
        label_id: LabelId,
        model: LabelModel,
        user: &str,
    ) -> Result<Option<LabelModel>> {
        if !self.is_dirty() {
            return Ok(None);
        }
        let generation = self.generation.load(Ordering::SeqCst);

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(None);
        }

        let stored = self
            .repository
            .save(label_id, model, user.to_string())
            .await?;
        if self.generation.load(Ordering::SeqCst) == generation {
            self.dirty.store(false, Ordering::SeqCst);
        }
        log::debug!("autosaved label set {label_id}");
        Ok(Some(stored))
    }

    /// Manual save: bypasses the debounce and invalidates pending
    /// flushes.
    pub async fn save_now(
        &self,
        label_id: LabelId,
        model: LabelModel,
        user: &str,
    ) -> Result<LabelModel> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let stored = self
            .repository
            .save(label_id, model, user.to_string())
            .await?;
        self.dirty.store(false, Ordering::SeqCst);
        Ok(stored)
    }
}
