//! X-axis coordinate values in the axis's native domain
//!
//! Click and relayout events arrive already converted from any on-screen
//! date representation back to either a plain number or an RFC 3339
//! timestamp string; both forms flow through the label model unchanged.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A coordinate on the x axis, either numeric or chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Timestamp(String),
}

impl AxisValue {
    /// Numeric projection of the value: timestamps become epoch
    /// milliseconds, unparseable timestamps become None.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AxisValue::Number(n) => Some(*n),
            AxisValue::Timestamp(s) => parse_timestamp(s).map(|dt| dt.timestamp_millis() as f64),
        }
    }

    /// Midpoint of two values in the native domain: the arithmetic mean
    /// for numbers, the chronological midpoint for timestamps. Mixed or
    /// unparseable inputs fall back to whichever numeric projection is
    /// available.
    pub fn midpoint(a: &AxisValue, b: &AxisValue) -> AxisValue {
        match (a, b) {
            (AxisValue::Number(x), AxisValue::Number(y)) => AxisValue::Number((x + y) / 2.0),
            (AxisValue::Timestamp(x), AxisValue::Timestamp(y)) => {
                match (parse_timestamp(x), parse_timestamp(y)) {
                    (Some(dx), Some(dy)) => {
                        let mid_ms = (dx.timestamp_millis() + dy.timestamp_millis()) / 2;
                        match DateTime::<Utc>::from_timestamp_millis(mid_ms) {
                            Some(mid) => AxisValue::Timestamp(
                                mid.to_rfc3339_opts(SecondsFormat::Millis, true),
                            ),
                            None => a.clone(),
                        }
                    }
                    _ => {
                        log::warn!("midpoint of unparseable timestamps {x:?} / {y:?}");
                        a.clone()
                    }
                }
            }
            _ => {
                let (fa, fb) = (a.as_f64(), b.as_f64());
                match (fa, fb) {
                    (Some(x), Some(y)) => AxisValue::Number((x + y) / 2.0),
                    _ => a.clone(),
                }
            }
        }
    }
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self {
        AxisValue::Number(v)
    }
}

impl std::fmt::Display for AxisValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisValue::Number(n) => write!(f, "{n}"),
            AxisValue::Timestamp(s) => write!(f, "{s}"),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_midpoint() {
        let mid = AxisValue::midpoint(&AxisValue::Number(10.0), &AxisValue::Number(20.0));
        assert_eq!(mid, AxisValue::Number(15.0));
    }

    #[test]
    fn test_chronological_midpoint() {
        let a = AxisValue::Timestamp("2024-01-01T00:00:00Z".to_string());
        let b = AxisValue::Timestamp("2024-01-03T00:00:00Z".to_string());
        let mid = AxisValue::midpoint(&a, &b);
        assert_eq!(
            mid,
            AxisValue::Timestamp("2024-01-02T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_as_f64_is_epoch_millis() {
        let t = AxisValue::Timestamp("1970-01-01T00:00:01Z".to_string());
        assert_eq!(t.as_f64(), Some(1000.0));
    }

    #[test]
    fn test_untagged_serde() {
        let n: AxisValue = serde_json::from_str("42.5").unwrap();
        assert_eq!(n, AxisValue::Number(42.5));
        let t: AxisValue = serde_json::from_str("\"2024-01-01T00:00:00Z\"").unwrap();
        assert_eq!(t, AxisValue::Timestamp("2024-01-01T00:00:00Z".to_string()));
    }
}
