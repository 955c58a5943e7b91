use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Grey asphalt, caught by the first calibrated range.
pub const ROAD_GREY: Rgb<u8> = Rgb([120, 120, 120]);
/// Blue-tinted asphalt, caught by the second and fifth ranges.
pub const ROAD_BLUEISH: Rgb<u8> = Rgb([80, 90, 100]);
/// Saturated green, outside every calibrated range.
pub const GRASS: Rgb<u8> = Rgb([0, 200, 0]);

/// Creates a `width` x `height` grass image with filled patches painted on it.
/// Each patch is `(x_min, y_min, x_max, y_max, colour)` with exclusive max corners.
pub fn painted_image(
    width: u32,
    height: u32,
    patches: &[(u32, u32, u32, u32, Rgb<u8>)],
) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, GRASS);
    for &(x_min, y_min, x_max, y_max, colour) in patches {
        for y in y_min..y_max {
            for x in x_min..x_max {
                img.put_pixel(x, y, colour);
            }
        }
    }
    img
}

/// Saves `img` as `<dir>/<name>` (PNG keeps colours exact) and writes the label
/// file beside it. Returns the image path.
pub fn write_sample(dir: &Path, name: &str, img: &RgbImage, labels: &str) -> PathBuf {
    let image_path = dir.join(name);
    img.save(&image_path).expect("Failed to save test image");
    std::fs::write(image_path.with_extension("txt"), labels).expect("Failed to write labels");
    image_path
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
