//! Out-of-band viewport response metadata
//!
//! Metadata travels as response headers, separately from the binary body,
//! so the two can desynchronize independently (proxies and cross-origin
//! policies strip headers). `resolve` turns whatever survived into a
//! usable `ViewportMetadata`, back-computing counts from the payload size
//! where necessary. Header-derived counts are authoritative over any
//! structural guess.

use tracelab_shared::viewport::{ViewportMetadata, XAxisType};

pub const HEADER_TOTAL_POINTS: &str = "x-total-points";
pub const HEADER_RETURNED_POINTS: &str = "x-returned-points";
pub const HEADER_FULL_RESOLUTION: &str = "x-full-resolution";
pub const HEADER_NUM_COLUMNS: &str = "x-num-columns";
pub const HEADER_DATA_MIN: &str = "x-data-min";
pub const HEADER_DATA_MAX: &str = "x-data-max";
pub const HEADER_CHANNEL_NAMES: &str = "x-channel-names";
pub const HEADER_AXIS_TYPE: &str = "x-axis-type";
pub const HEADER_AXIS_FORMAT: &str = "x-axis-format";

/// Raw side-channel metadata as it came off the wire; every field may be
/// missing independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportHeaders {
    pub total_points: Option<u64>,
    pub returned_points: Option<u64>,
    pub is_full_resolution: Option<bool>,
    pub num_columns: Option<u32>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub channel_names: Option<Vec<String>>,
    pub x_type: Option<XAxisType>,
    pub x_format: Option<String>,
}

impl ViewportHeaders {
    /// Build from raw header name/value pairs. Unknown headers are
    /// ignored; unparseable values are dropped with a warning.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut headers = Self::default();
        for (name, value) in pairs {
            match name.to_ascii_lowercase().as_str() {
                HEADER_TOTAL_POINTS => headers.total_points = parse(name, value),
                HEADER_RETURNED_POINTS => headers.returned_points = parse(name, value),
                HEADER_FULL_RESOLUTION => headers.is_full_resolution = parse_bool(value),
                HEADER_NUM_COLUMNS => headers.num_columns = parse(name, value),
                HEADER_DATA_MIN => headers.x_min = parse(name, value),
                HEADER_DATA_MAX => headers.x_max = parse(name, value),
                HEADER_CHANNEL_NAMES => {
                    let names: Vec<String> = value
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    if !names.is_empty() {
                        headers.channel_names = Some(names);
                    }
                }
                HEADER_AXIS_TYPE => {
                    headers.x_type = match value.trim() {
                        "timestamp" => Some(XAxisType::Timestamp),
                        "numeric" => Some(XAxisType::Numeric),
                        other => {
                            log::warn!("unknown {HEADER_AXIS_TYPE} value {other:?}");
                            None
                        }
                    }
                }
                HEADER_AXIS_FORMAT => headers.x_format = Some(value.to_string()),
                _ => {}
            }
        }
        headers
    }

    /// Resolve into concrete metadata given the payload's float count.
    ///
    /// Fallback chain: a missing column count first tries the channel-name
    /// list, then degrades to a single x-only column; a missing returned
    /// count is back-computed as `total_floats / num_columns`.
    pub fn resolve(&self, total_floats: usize) -> ViewportMetadata {
        let num_columns = match self.num_columns {
            Some(n) if n > 0 => n,
            _ => match &self.channel_names {
                Some(names) => names.len() as u32 + 1,
                None => {
                    log::warn!(
                        "column count unavailable, treating payload as a single x-only column"
                    );
                    1
                }
            },
        };

        let returned_points = match self.returned_points {
            Some(n) => n,
            None => {
                let inferred = total_floats as u64 / num_columns as u64;
                log::warn!(
                    "returned-points header missing, inferred {inferred} from \
                     {total_floats} floats across {num_columns} columns"
                );
                inferred
            }
        };

        let channel_names = match &self.channel_names {
            Some(names) => names.clone(),
            None => {
                let synthesized: Vec<String> = (0..num_columns.saturating_sub(1))
                    .map(|i| format!("channel_{i}"))
                    .collect();
                if !synthesized.is_empty() {
                    log::warn!("channel-names header missing, synthesized {synthesized:?}");
                }
                synthesized
            }
        };

        let total_points = self.total_points.unwrap_or(returned_points);

        ViewportMetadata {
            total_points,
            returned_points,
            is_full_resolution: self
                .is_full_resolution
                .unwrap_or(total_points <= returned_points),
            x_min: self.x_min.unwrap_or(f64::NAN),
            x_max: self.x_max.unwrap_or(f64::NAN),
            num_columns,
            channel_names,
            x_type: self.x_type.unwrap_or_default(),
            x_format: self.x_format.clone(),
        }
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("unparseable header {name}: {value:?}");
            None
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_full_set() {
        let headers = ViewportHeaders::from_pairs([
            ("x-total-points", "1000000"),
            ("x-returned-points", "5000"),
            ("x-full-resolution", "false"),
            ("x-num-columns", "3"),
            ("x-data-min", "0"),
            ("x-data-max", "86400"),
            ("x-channel-names", "Temperature, Pressure"),
            ("x-axis-type", "timestamp"),
            ("x-axis-format", "%H:%M:%S"),
        ]);

        assert_eq!(headers.total_points, Some(1_000_000));
        assert_eq!(headers.returned_points, Some(5_000));
        assert_eq!(headers.num_columns, Some(3));
        assert_eq!(
            headers.channel_names,
            Some(vec!["Temperature".to_string(), "Pressure".to_string()])
        );
        assert_eq!(headers.x_type, Some(XAxisType::Timestamp));

        let meta = headers.resolve(15_000);
        assert_eq!(meta.returned_points, 5_000);
        assert!(!meta.is_full_resolution);
        assert_eq!(meta.num_columns, 3);
    }

    #[test]
    fn test_resolve_back_computes_returned_points() {
        let headers = ViewportHeaders {
            num_columns: Some(3),
            ..Default::default()
        };
        let meta = headers.resolve(3_000);
        assert_eq!(meta.returned_points, 1_000);
        assert_eq!(meta.channel_names.len(), 2);
    }

    #[test]
    fn test_resolve_degrades_to_x_only() {
        let meta = ViewportHeaders::default().resolve(500);
        assert_eq!(meta.num_columns, 1);
        assert_eq!(meta.returned_points, 500);
        assert!(meta.channel_names.is_empty());
    }

    #[test]
    fn test_unparseable_values_are_dropped() {
        let headers = ViewportHeaders::from_pairs([("x-num-columns", "lots")]);
        assert_eq!(headers.num_columns, None);
    }

    #[test]
    fn test_channel_names_fall_back_for_column_count() {
        let headers = ViewportHeaders::from_pairs([("x-channel-names", "a,b,c")]);
        let meta = headers.resolve(4_000);
        assert_eq!(meta.num_columns, 4);
        assert_eq!(meta.returned_points, 1_000);
    }
}
