use serde::{Deserialize, Serialize};

/// Inclusive HSV band, OpenCV 8-bit scale: hue `0..180`, saturation and value `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }
}

/// Asphalt colours observed under different lighting and surface wear.
pub const ROAD_HSV_RANGES: [HsvRange; 6] = [
    HsvRange::new([0, 0, 92], [184, 19, 144]),
    HsvRange::new([103, 31, 0], [120, 70, 110]),
    HsvRange::new([98, 0, 83], [138, 42, 168]),
    HsvRange::new([94, 11, 55], [132, 46, 100]),
    HsvRange::new([100, 12, 68], [126, 52, 112]),
    HsvRange::new([84, 0, 113], [178, 43, 143]),
];
