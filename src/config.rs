//! Optional JSON tuning file.
//!
//! ```json
//! {
//!   "placement": { "exclusion_band_height": 900, "max_margin_ratio": 0.3 },
//!   "hsv_ranges": [ { "lower": [0, 0, 92], "upper": [184, 19, 144] } ]
//! }
//! ```
//!
//! Every key is optional; anything left out keeps its built-in default.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::detection::calibration::{HsvRange, ROAD_HSV_RANGES};
use crate::placement::PlacementParams;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningConfig {
    pub placement: PlacementParams,
    pub hsv_ranges: Option<Vec<HsvRange>>,
}

impl TuningConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        if matches!(&config.hsv_ranges, Some(ranges) if ranges.is_empty()) {
            anyhow::bail!("hsv_ranges must contain at least one range");
        }
        Ok(config)
    }

    /// Configured colour table, or the built-in road calibration.
    pub fn hsv_ranges(&self) -> Vec<HsvRange> {
        self.hsv_ranges
            .clone()
            .unwrap_or_else(|| ROAD_HSV_RANGES.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_keeps_defaults() {
        let config = TuningConfig::from_json("{}").unwrap();
        assert_eq!(config.placement, PlacementParams::default());
        assert_eq!(config.hsv_ranges(), ROAD_HSV_RANGES.to_vec());
    }

    #[test]
    fn partial_placement_overrides_one_field() {
        let config =
            TuningConfig::from_json(r#"{"placement": {"exclusion_band_height": 10}}"#).unwrap();
        assert_eq!(config.placement.exclusion_band_height, 10);
        assert_eq!(
            config.placement.max_margin_ratio,
            PlacementParams::default().max_margin_ratio
        );
    }

    #[test]
    fn rejects_empty_range_table() {
        assert!(TuningConfig::from_json(r#"{"hsv_ranges": []}"#).is_err());
    }
}
