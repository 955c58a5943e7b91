//! Re-derive YOLO boxes for a cropped image.

use tracing::debug;

use crate::error::{CropError, Result};
use crate::models::{NormalizedBox, PixelBox, Rectangle};

/// Project `boxes`, normalized to an image of `original_size`, into the frame
/// of `crop`.
///
/// The crop is clipped to the image before use. Boxes that do not overlap the
/// crop with positive area are dropped; boxes that straddle it keep only their
/// visible part. An empty result means nothing survived and no label file
/// should be written.
pub fn reproject(
    boxes: &[NormalizedBox],
    original_size: (u32, u32),
    crop: &Rectangle,
) -> Result<Vec<NormalizedBox>> {
    let crop = crop.clip_to(original_size.0, original_size.1);
    if crop.is_degenerate() {
        return Err(CropError::DegenerateCrop(crop));
    }

    let projected: Vec<NormalizedBox> = boxes
        .iter()
        .map(|b| b.to_pixel(original_size))
        .filter_map(|pixel| pixel.intersection(&crop))
        .map(|visible| renormalize(&visible, &crop))
        .collect();

    debug!(
        "reprojected {} of {} boxes into crop {}",
        projected.len(),
        boxes.len(),
        crop
    );

    Ok(projected)
}

fn renormalize(visible: &PixelBox, crop: &Rectangle) -> NormalizedBox {
    let cw = crop.width() as f64;
    let ch = crop.height() as f64;
    let origin_x = crop.x_min() as f64;
    let origin_y = crop.y_min() as f64;

    NormalizedBox {
        class_id: visible.class_id,
        cx: ((visible.x1 + visible.x2) / 2.0 - origin_x) / cw,
        cy: ((visible.y1 + visible.y2) / 2.0 - origin_y) / ch,
        w: visible.width() / cw,
        h: visible.height() / ch,
    }
}
