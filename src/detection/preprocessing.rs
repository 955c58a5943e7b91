use image::{GrayImage, Luma, Rgb, RgbImage};

use super::calibration::HsvRange;

/// Convert an RGB image to HSV, stored channel-for-channel in an `RgbImage`.
pub fn to_hsv(img: &RgbImage) -> RgbImage {
    let mut hsv = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        hsv.put_pixel(x, y, Rgb(rgb_to_hsv(pixel.0)));
    }
    hsv
}

/// OpenCV-compatible 8-bit conversion: hue is halved to fit `0..180`.
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = max - min;

    let s = if max > 0.0 { diff * 255.0 / max } else { 0.0 };

    let mut h = if diff == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / diff
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    let mut hue = (h / 2.0).round() as u16;
    if hue >= 180 {
        hue -= 180;
    }

    [hue as u8, s.round() as u8, max as u8]
}

/// Binary mask: 255 where the pixel falls inside `range`, 0 elsewhere.
pub fn in_range(hsv: &RgbImage, range: &HsvRange) -> GrayImage {
    let mut mask = GrayImage::new(hsv.width(), hsv.height());
    for (x, y, pixel) in hsv.enumerate_pixels() {
        if range.contains(pixel.0) {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_match_opencv_scale() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
    }

    #[test]
    fn hue_just_below_red_wraps_to_zero() {
        // 359.8 degrees halves to 179.9, which rounds to 180 and wraps.
        assert_eq!(rgb_to_hsv([255, 0, 1]), [0, 255, 255]);
    }

    #[test]
    fn grey_has_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv([120, 120, 120]), [0, 0, 120]);
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
    }

    #[test]
    fn bluish_asphalt() {
        assert_eq!(rgb_to_hsv([80, 90, 100]), [105, 51, 100]);
    }
}
