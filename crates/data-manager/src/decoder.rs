//! Binary viewport decoder
//!
//! The wire format is a flat sequence of `num_columns` equal-length
//! little-endian float64 segments, ordered `[x][ch_0]..[ch_{n-1}]`, each
//! of length `returned_points`. The segment boundaries come entirely from
//! the side-channel metadata; the payload itself carries no framing.

use crate::headers::ViewportHeaders;
use std::collections::HashMap;
use tracelab_shared::{ChartError, Result};
use tracelab_shared::viewport::ViewportResponse;

/// Decode one viewport payload into typed columns.
///
/// An empty buffer yields an empty response (logged, not an error); a
/// buffer whose length is not a multiple of 8 is a protocol violation. A
/// channel whose slice would run past the end of the buffer is skipped
/// with a warning, since partial data is more useful than none here.
pub fn decode_viewport(bytes: &[u8], headers: &ViewportHeaders) -> Result<ViewportResponse> {
    if bytes.is_empty() {
        log::warn!("empty viewport payload, returning empty response");
        return Ok(ViewportResponse::empty());
    }

    if bytes.len() % 8 != 0 {
        return Err(ChartError::Protocol {
            message: format!(
                "payload length {} is not a multiple of 8, not a float64 array",
                bytes.len()
            ),
        });
    }

    let floats = cast_floats(bytes);
    let total_floats = floats.len();
    let mut metadata = headers.resolve(total_floats);

    let mut points = metadata.returned_points as usize;
    if points > total_floats {
        log::warn!(
            "returned-points header claims {points} but payload holds {total_floats} floats, \
             truncating"
        );
        points = total_floats;
        metadata.returned_points = points as u64;
    }

    let x = floats[..points].to_vec();

    let mut channels: HashMap<String, Vec<f64>> = HashMap::new();
    for (i, name) in metadata.channel_names.iter().enumerate() {
        let start = (i + 1) * points;
        let end = start + points;
        if end > total_floats {
            log::warn!(
                "channel {name:?} slice {start}..{end} exceeds payload of {total_floats} \
                 floats, skipping"
            );
            continue;
        }
        channels.insert(name.clone(), floats[start..end].to_vec());
    }

    // Range headers can be stripped along with the rest of the metadata;
    // the decoded x column is the next best source.
    if metadata.x_min.is_nan() {
        metadata.x_min = x.first().copied().unwrap_or(0.0);
    }
    if metadata.x_max.is_nan() {
        metadata.x_max = x.last().copied().unwrap_or(0.0);
    }

    Ok(ViewportResponse {
        x,
        channels,
        metadata,
    })
}

/// Reinterpret the payload as f64s, copying through `chunks_exact` only
/// when the buffer is not 8-byte aligned.
fn cast_floats(bytes: &[u8]) -> Vec<f64> {
    match bytemuck::try_cast_slice::<u8, f64>(bytes) {
        Ok(slice) => slice.to_vec(),
        Err(_) => bytes
            .chunks_exact(8)
            .map(|chunk| f64::from_le_bytes(chunk.try_into().unwrap()))
            .collect(),
    }
}
