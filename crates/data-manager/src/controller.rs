//! Viewport fetch controller
//!
//! One controller per chart instance. Navigation events funnel through
//! `request_debounced`, which coalesces bursts of pan/zoom into a single
//! network round-trip; issuing any new request aborts whatever was in
//! flight, so exactly one response is ever live and out-of-order arrival
//! races cannot happen.

use crate::decoder::decode_viewport;
use crate::transport::ViewportTransport;
use futures::future::{AbortHandle, Abortable};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracelab_shared::viewport::{ViewportRequest, ViewportResponse};
use tracelab_shared::{ChartError, Result};

pub struct ViewportFetchController<T: ViewportTransport> {
    transport: T,
    debounce: Duration,
    /// Bumped by every request entry point and by `cancel`; a stale
    /// generation means the call was superseded.
    generation: AtomicU64,
    loading: AtomicBool,
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
}

impl<T: ViewportTransport> ViewportFetchController<T> {
    pub fn new(transport: T, debounce: Duration) -> Self {
        Self {
            transport,
            debounce,
            generation: AtomicU64::new(0),
            loading: AtomicBool::new(false),
            in_flight: Mutex::new(None),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// True from the moment a request (or its debounce wait) starts until
    /// the owning generation reaches success, cancellation, or failure.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Issue a request immediately, aborting any prior in-flight one.
    pub async fn request(&self, request: ViewportRequest) -> Result<ViewportResponse> {
        let generation = self.next_generation();
        self.loading.store(true, Ordering::SeqCst);
        let result = self.run_fetch(generation, request).await;
        self.finish(generation);
        result
    }

    /// Debounced entry point: rapid successive calls within the quiet
    /// period collapse into one request carrying the last call's
    /// parameters. Superseded calls resolve `Ok(None)` and must be
    /// treated as no-ops.
    pub async fn request_debounced(
        &self,
        request: ViewportRequest,
    ) -> Result<Option<ViewportResponse>> {
        let generation = self.next_generation();
        self.loading.store(true, Ordering::SeqCst);

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(None);
        }

        let result = self.run_fetch(generation, request).await;
        self.finish(generation);
        match result {
            Ok(response) => Ok(Some(response)),
            Err(e) => Err(e),
        }
    }

    /// Abort in-flight work and invalidate any pending debounce timer.
    /// Safe to call with nothing in flight.
    pub fn cancel(&self) {
        self.next_generation();
        if let Some((_, handle)) = self.in_flight.lock().take() {
            handle.abort();
        }
        self.loading.store(false, Ordering::SeqCst);
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Clear the loading flag only if this generation still owns it; a
    /// superseded call must not stomp the newer session's flag.
    fn finish(&self, generation: u64) {
        if self.generation.load(Ordering::SeqCst) == generation {
            self.loading.store(false, Ordering::SeqCst);
        }
    }

    async fn run_fetch(
        &self,
        generation: u64,
        request: ViewportRequest,
    ) -> Result<ViewportResponse> {
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        {
            let mut slot = self.in_flight.lock();
            match slot.take() {
                Some((prev_gen, prev)) if prev_gen < generation => {
                    log::debug!("superseding in-flight viewport request (generation {prev_gen})");
                    prev.abort();
                    *slot = Some((generation, abort_handle));
                }
                Some(newer) => {
                    // A newer call registered first; this one is already
                    // stale and must not touch the newer handle.
                    *slot = Some(newer);
                    return Err(ChartError::Cancelled);
                }
                None => *slot = Some((generation, abort_handle)),
            }
        }

        let outcome = Abortable::new(self.transport.fetch(request), abort_registration).await;

        {
            let mut slot = self.in_flight.lock();
            if slot.as_ref().map(|(g, _)| *g) == Some(generation) {
                *slot = None;
            }
        }

        match outcome {
            Err(futures::future::Aborted) => Err(ChartError::Cancelled),
            Ok(Err(e)) => Err(e),
            Ok(Ok((bytes, headers))) => {
                // A response that arrived for a superseded generation is
                // never decoded.
                if self.generation.load(Ordering::SeqCst) != generation {
                    return Err(ChartError::Cancelled);
                }
                decode_viewport(&bytes, &headers)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::ViewportHeaders;
    use bytes::Bytes;
    use futures::future::BoxFuture;

    struct NoopTransport;

    impl ViewportTransport for NoopTransport {
        fn fetch(
            &self,
            _request: ViewportRequest,
        ) -> BoxFuture<'_, Result<(Bytes, ViewportHeaders)>> {
            Box::pin(async { Ok((Bytes::new(), ViewportHeaders::default())) })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stale_registration_leaves_newer_handle_alone() {
        let c = ViewportFetchController::new(NoopTransport, Duration::ZERO);
        // A concurrently scheduled call several generations ahead has
        // already registered its handle.
        let (newer, _registration) = AbortHandle::new_pair();
        *c.in_flight.lock() = Some((3, newer.clone()));

        let err = c
            .request(ViewportRequest {
                file_id: "f".to_string(),
                x_min: 0.0,
                x_max: 1.0,
                max_points: 1_000,
            })
            .await
            .unwrap_err();

        assert_eq!(err, ChartError::Cancelled);
        assert!(!newer.is_aborted());
        assert_eq!(c.in_flight.lock().as_ref().map(|(g, _)| *g), Some(3));
    }
}
