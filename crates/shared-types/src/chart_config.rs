//! Chart configuration: fetch/debounce tuning and endpoint location

use serde::{Deserialize, Serialize};

/// Maximum downsample target per channel
pub const MAX_POINTS_CEILING: u32 = 20_000;

/// Minimum downsample target per channel
pub const MAX_POINTS_FLOOR: u32 = 5_000;

/// Tuning knobs for one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Quiet period that coalesces rapid navigation into one fetch.
    pub debounce_ms: u64,
    /// Quiet period that coalesces label edits into one save.
    pub autosave_ms: u64,
    /// Target downsample count per channel.
    pub max_points: u32,
    pub base_url: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            autosave_ms: 500,
            max_points: 10_000,
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Configuration validation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ChartConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> ConfigValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.max_points < MAX_POINTS_FLOOR {
            errors.push(format!(
                "maxPoints too small: {} (min: {})",
                self.max_points, MAX_POINTS_FLOOR
            ));
        }
        if self.max_points > MAX_POINTS_CEILING {
            errors.push(format!(
                "maxPoints too large: {} (max: {})",
                self.max_points, MAX_POINTS_CEILING
            ));
        }
        if self.base_url.is_empty() {
            errors.push("baseUrl must not be empty".to_string());
        }
        if self.debounce_ms == 0 {
            warnings.push("debounceMs of 0 disables fetch coalescing".to_string());
        }
        if self.autosave_ms == 0 {
            warnings.push("autosaveMs of 0 disables save coalescing".to_string());
        }

        ConfigValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
