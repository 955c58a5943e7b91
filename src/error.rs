//! Recoverable per-image failures. None of these should stop a batch.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Rectangle;

pub type Result<T, E = CropError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("malformed annotation on line {line}: {reason}")]
    Annotation { line: usize, reason: String },

    #[error("no road region found in image")]
    RegionNotFound,

    #[error("requested crop {requested_width}x{requested_height} exceeds image {image_width}x{image_height}")]
    CropTooLarge {
        requested_width: u32,
        requested_height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("crop rectangle {0} has no area")]
    DegenerateCrop(Rectangle),

    #[error("invalid rectangle ({x_min}, {y_min})-({x_max}, {y_max}): min corner exceeds max corner")]
    InvalidRectangle {
        x_min: i32,
        y_min: i32,
        x_max: i32,
        y_max: i32,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CropError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CropError::Io {
            path: path.into(),
            source,
        }
    }
}
