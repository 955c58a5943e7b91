#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from roadcrop for tests
pub use roadcrop::{
    Anchor, CropError, CropSource, ImageOutcome, NormalizedBox, OutputPolicy, Pipeline,
    PlacementParams, Rectangle, RegionLocator,
};
