pub mod calibration;
pub mod contours;
pub mod preprocessing;

use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::models::{Contour, Rectangle};
use calibration::{HsvRange, ROAD_HSV_RANGES};

/// Finds the road surface in an image by colour segmentation.
///
/// Each calibrated HSV band is thresholded independently. Contours from all
/// masks are pooled and the one enclosing the largest area wins, so a strong
/// detection in any band beats weaker ones in the others.
#[derive(Debug, Clone)]
pub struct RegionLocator {
    ranges: Vec<HsvRange>,
}

impl RegionLocator {
    pub fn new() -> Self {
        Self {
            ranges: ROAD_HSV_RANGES.to_vec(),
        }
    }

    /// Replace the calibration table.
    pub fn with_ranges(mut self, ranges: Vec<HsvRange>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn ranges(&self) -> &[HsvRange] {
        &self.ranges
    }

    /// One binary mask per calibrated range, in table order.
    pub fn masks(&self, img: &RgbImage) -> Vec<GrayImage> {
        let hsv = preprocessing::to_hsv(img);
        self.ranges
            .iter()
            .map(|range| preprocessing::in_range(&hsv, range))
            .collect()
    }

    /// Bounding rectangle of the largest road-coloured region, or `None`
    /// when no pixel matches any range.
    pub fn locate(&self, img: &RgbImage) -> Option<Rectangle> {
        let mut pooled: Vec<Contour> = Vec::new();
        for (idx, mask) in self.masks(img).iter().enumerate() {
            let found = contours::find_contours(mask);
            debug!("range {}: {} contours", idx + 1, found.len());
            pooled.extend(found);
        }

        let best = contours::largest(&pooled)?;
        let rect = best.bounding_rect()?;
        debug!(
            "largest of {} contours: area {:.1}, bounds {}",
            pooled.len(),
            best.area(),
            rect
        );
        Some(rect)
    }
}

impl Default for RegionLocator {
    fn default() -> Self {
        Self::new()
    }
}
