//! HTTP transports for the viewport and label persistence endpoints
//!
//! Both endpoints sit behind traits so the fetch controller and the
//! orchestrator can be driven by mock transports in tests.

use crate::headers::ViewportHeaders;
use bytes::Bytes;
use futures::future::BoxFuture;
use tracelab_shared::labels::LabelId;
use tracelab_shared::viewport::ViewportRequest;
use tracelab_shared::{ChartError, LabelModel, Result};

/// Expected media type of a viewport payload.
pub const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

/// One round-trip to the viewport endpoint: raw payload plus whatever
/// side-channel headers survived transit.
pub trait ViewportTransport: Send + Sync {
    fn fetch(&self, request: ViewportRequest) -> BoxFuture<'_, Result<(Bytes, ViewportHeaders)>>;
}

/// Full-model label persistence: the stored copy comes back and the
/// caller re-adopts it as the new source of truth.
pub trait LabelRepository: Send + Sync {
    fn save(
        &self,
        label_id: LabelId,
        model: LabelModel,
        user: String,
    ) -> BoxFuture<'_, Result<LabelModel>>;
}

/// Production viewport transport over reqwest.
pub struct HttpViewportTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpViewportTransport {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn fetch_inner(&self, request: ViewportRequest) -> Result<(Bytes, ViewportHeaders)> {
        let url = format!("{}/api/viewport", self.base_url);
        let x_min = request.x_min.to_string();
        let x_max = request.x_max.to_string();
        let max_points = request.max_points.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("file_id", request.file_id.as_str()),
                ("x_min", x_min.as_str()),
                ("x_max", x_max.as_str()),
                ("max_points", max_points.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ChartError::Network {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let headers = ViewportHeaders::from_pairs(
            response
                .headers()
                .iter()
                .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v))),
        );

        let body = response.bytes().await.map_err(|e| ChartError::Network {
            message: e.to_string(),
        })?;

        log::debug!(
            "viewport fetch for {} returned {} bytes",
            request.file_id,
            body.len()
        );
        screen_response(status, &content_type, body, headers)
    }
}

/// Classify one viewport exchange before any decoding: non-2xx statuses
/// and non-binary bodies never reach the decoder.
fn screen_response(
    status: u16,
    content_type: &str,
    body: Bytes,
    headers: ViewportHeaders,
) -> Result<(Bytes, ViewportHeaders)> {
    if !(200..300).contains(&status) {
        return Err(ChartError::Http {
            status,
            message: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    if !content_type.starts_with(BINARY_CONTENT_TYPE) {
        // The body is an error payload, not data.
        if body.is_empty() {
            return Err(ChartError::ContentType {
                expected: BINARY_CONTENT_TYPE.to_string(),
                actual: content_type.to_string(),
            });
        }
        return Err(ChartError::Network {
            message: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok((body, headers))
}

impl ViewportTransport for HttpViewportTransport {
    fn fetch(&self, request: ViewportRequest) -> BoxFuture<'_, Result<(Bytes, ViewportHeaders)>> {
        Box::pin(self.fetch_inner(request))
    }
}

/// Production label repository over reqwest.
pub struct HttpLabelRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLabelRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn save_inner(
        &self,
        label_id: LabelId,
        model: LabelModel,
        user: String,
    ) -> Result<LabelModel> {
        let url = format!("{}/api/labels/{}", self.base_url, label_id);
        let response = self
            .client
            .put(&url)
            .query(&[("user", user.as_str())])
            .json(&model)
            .send()
            .await
            .map_err(|e| ChartError::Persistence {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChartError::Persistence {
                message: format!("HTTP {status}: {message}"),
            });
        }

        response.json().await.map_err(|e| ChartError::Persistence {
            message: e.to_string(),
        })
    }
}

impl LabelRepository for HttpLabelRepository {
    fn save(
        &self,
        label_id: LabelId,
        model: LabelModel,
        user: String,
    ) -> BoxFuture<'_, Result<LabelModel>> {
        Box::pin(self.save_inner(label_id, model, user))
    }
}
