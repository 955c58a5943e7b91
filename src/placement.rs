//! Choose where a fixed-size crop sits inside an image.

use serde::{Deserialize, Serialize};

use crate::error::{CropError, Result};
use crate::models::Rectangle;

/// Tuning for vertical placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    /// Height in pixels of the strip at the bottom of the frame that holds the
    /// vehicle hood. The crop avoids it whenever the image is tall enough.
    pub exclusion_band_height: u32,
    /// Largest gap, as a fraction of the crop height, tolerated between the
    /// crop's bottom edge and the exclusion band before the crop is dropped
    /// down onto the band.
    pub max_margin_ratio: f64,
    /// Rows kept above the detected region's top edge.
    pub top_padding: u32,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            exclusion_band_height: 1050,
            max_margin_ratio: 0.25,
            top_padding: 0,
        }
    }
}

/// What the crop is positioned around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Horizontal centre and top edge given directly.
    Point { x: i32, y: i32 },
    /// A located region, e.g. from [`crate::RegionLocator::locate`].
    Region(Rectangle),
}

/// Derive a `width` x `height` crop inside an image of `image_size`.
///
/// Fails with [`CropError::CropTooLarge`] when the image is smaller than the
/// requested crop in either dimension, and with [`CropError::DegenerateCrop`]
/// for a zero-sized request. A successful result always lies inside the image
/// and has positive area.
pub fn derive_crop(
    (width, height): (u32, u32),
    image_size: (u32, u32),
    anchor: &Anchor,
    params: &PlacementParams,
) -> Result<Rectangle> {
    let (image_width, image_height) = image_size;
    if width > image_width || height > image_height {
        return Err(CropError::CropTooLarge {
            requested_width: width,
            requested_height: height,
            image_width,
            image_height,
        });
    }

    let (w, h) = (width as i64, height as i64);
    let (img_w, img_h) = (image_width as i64, image_height as i64);

    let (centre_x, y_min) = match anchor {
        Anchor::Point { x, y } => (*x as i64, *y as i64),
        Anchor::Region(region) => (
            region.centre_x() as i64,
            vertical_origin(region, h, img_h, params),
        ),
    };

    let x_min = (centre_x - w / 2).max(0).min(img_w - w);
    let y_min = y_min.clamp(0, img_h - h);

    let crop = Rectangle::from_origin_size(x_min as i32, y_min as i32, width, height);
    if crop.is_degenerate() {
        return Err(CropError::DegenerateCrop(crop));
    }
    Ok(crop)
}

// Start at the region's top edge. If the crop would then run into the hood
// band, or leave too much unused road above it, rest the crop on the band.
fn vertical_origin(region: &Rectangle, h: i64, img_h: i64, params: &PlacementParams) -> i64 {
    let usable_bottom = (img_h - params.exclusion_band_height as i64).max(0);
    let top = region.y_min() as i64 - params.top_padding as i64;

    let slack = usable_bottom - (top + h);
    if slack < 0 || slack as f64 > params.max_margin_ratio * h as f64 {
        usable_bottom - h
    } else {
        top
    }
}
