use std::fmt;

use imageproc::point::Point;

use crate::error::{CropError, Result};

/// Axis-aligned pixel rectangle, `x_min <= x_max` and `y_min <= y_max`.
///
/// Coordinates are signed so callers can describe a crop that hangs off the
/// image; [`Rectangle::clip_to`] brings it back inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rectangle {
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
}

impl Rectangle {
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Result<Self> {
        if x_min > x_max || y_min > y_max {
            return Err(CropError::InvalidRectangle {
                x_min,
                y_min,
                x_max,
                y_max,
            });
        }
        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Build from an origin and a size, the way bounding-rect helpers report.
    pub fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x + width as i32,
            y_max: y + height as i32,
        }
    }

    pub fn x_min(&self) -> i32 {
        self.x_min
    }

    pub fn y_min(&self) -> i32 {
        self.y_min
    }

    pub fn x_max(&self) -> i32 {
        self.x_max
    }

    pub fn y_max(&self) -> i32 {
        self.y_max
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    /// Integer centre, rounded toward negative infinity.
    pub fn centre_x(&self) -> i32 {
        (self.x_min + self.x_max).div_euclid(2)
    }

    pub fn centre_y(&self) -> i32 {
        (self.y_min + self.y_max).div_euclid(2)
    }

    pub fn centre(&self) -> (i32, i32) {
        (self.centre_x(), self.centre_y())
    }

    /// True when the rectangle encloses no pixels.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Clamp every coordinate into `[0, width] x [0, height]`.
    pub fn clip_to(&self, width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        Self {
            x_min: self.x_min.clamp(0, w),
            y_min: self.y_min.clamp(0, h),
            x_max: self.x_max.clamp(0, w),
            y_max: self.y_max.clamp(0, h),
        }
    }

    pub fn describe(&self) -> (i32, i32, i32, i32) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

/// YOLO-style box: centre and size as fractions of the full image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
    pub class_id: u32,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedBox {
    pub fn new(class_id: u32, cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            class_id,
            cx,
            cy,
            w,
            h,
        }
    }

    /// Scale into pixel corners for an image of `(width, height)`.
    /// Corners come out ordered even if `w` or `h` is negative.
    pub fn to_pixel(&self, (width, height): (u32, u32)) -> PixelBox {
        let (w_px, h_px) = (width as f64, height as f64);
        let cx = self.cx * w_px;
        let cy = self.cy * h_px;
        let half_w = (self.w * w_px / 2.0).abs();
        let half_h = (self.h * h_px / 2.0).abs();
        PixelBox {
            class_id: self.class_id,
            x1: cx - half_w,
            y1: cy - half_h,
            x2: cx + half_w,
            y2: cy + half_h,
        }
    }

    /// Map a box normalized to `crop` back into pixel corners of the full image.
    pub fn to_pixel_in(&self, crop: &Rectangle) -> PixelBox {
        let local = self.to_pixel((crop.width() as u32, crop.height() as u32));
        let (dx, dy) = (crop.x_min() as f64, crop.y_min() as f64);
        PixelBox {
            class_id: local.class_id,
            x1: local.x1 + dx,
            y1: local.y1 + dy,
            x2: local.x2 + dx,
            y2: local.y2 + dy,
        }
    }
}

/// Pixel-space corners of a box. Only lives while a single image is reprojected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBox {
    pub class_id: u32,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl PixelBox {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Strict overlap test: touching edges and boxes without area do not count.
    pub fn intersects(&self, rect: &Rectangle) -> bool {
        self.x1 < self.x2
            && self.y1 < self.y2
            && self.x1 < rect.x_max() as f64
            && self.x2 > rect.x_min() as f64
            && self.y1 < rect.y_max() as f64
            && self.y2 > rect.y_min() as f64
    }

    /// The part of this box visible inside `rect`, if any.
    pub fn intersection(&self, rect: &Rectangle) -> Option<PixelBox> {
        if !self.intersects(rect) {
            return None;
        }
        Some(PixelBox {
            class_id: self.class_id,
            x1: self.x1.max(rect.x_min() as f64),
            y1: self.y1.max(rect.y_min() as f64),
            x2: self.x2.min(rect.x_max() as f64),
            y2: self.y2.min(rect.y_max() as f64),
        })
    }
}

/// Boundary of one connected foreground region in a binary mask.
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<u32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<u32>>) -> Self {
        Self { points }
    }

    /// Enclosed area of the boundary polygon (shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            twice_area += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
        }
        (twice_area / 2.0).abs()
    }

    /// Tight bounding rectangle; `x_max`/`y_max` are exclusive.
    pub fn bounding_rect(&self) -> Option<Rectangle> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rectangle::from_origin_size(
            min_x as i32,
            min_y as i32,
            max_x - min_x + 1,
            max_y - min_y + 1,
        ))
    }
}
