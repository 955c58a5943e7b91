pub mod annotations;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod placement;
pub mod reproject;

pub use detection::RegionLocator;
pub use detection::calibration::{HsvRange, ROAD_HSV_RANGES};
pub use error::CropError;
pub use models::{Contour, NormalizedBox, PixelBox, Rectangle};
pub use pipeline::{
    BatchReport, CropSource, CroppedImage, ImageOutcome, OutputPolicy, Pipeline, crop_image,
};
pub use placement::{Anchor, PlacementParams, derive_crop};
pub use reproject::reproject;
