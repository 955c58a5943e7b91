use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::annotations::{label_path_for, read_labels, write_labels};
use crate::detection::RegionLocator;
use crate::error::CropError;
use crate::models::{NormalizedBox, Rectangle};
use crate::placement::{Anchor, PlacementParams, derive_crop};
use crate::reproject::reproject;

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".JPG", ".JPEG", ".png", ".PNG"];

/// Where each image's crop rectangle comes from
#[derive(Debug, Clone)]
pub enum CropSource {
    /// The same pixel rectangle for every image, clamped to each image's bounds.
    Fixed(Rectangle),
    /// A `width` x `height` window placed around the located road region.
    Detect {
        width: u32,
        height: u32,
        locator: RegionLocator,
        placement: PlacementParams,
    },
}

impl CropSource {
    /// Resolve the crop rectangle for one image.
    pub fn crop_rect(&self, img: &DynamicImage) -> Result<Rectangle, CropError> {
        let (img_w, img_h) = (img.width(), img.height());
        let crop = match self {
            CropSource::Fixed(rect) => rect.clip_to(img_w, img_h),
            CropSource::Detect {
                width,
                height,
                locator,
                placement,
            } => {
                let region = locator
                    .locate(&img.to_rgb8())
                    .ok_or(CropError::RegionNotFound)?;
                debug!("road region: {}", region);
                derive_crop(
                    (*width, *height),
                    (img_w, img_h),
                    &Anchor::Region(region),
                    placement,
                )?
            }
        };

        if crop.is_degenerate() {
            return Err(CropError::DegenerateCrop(crop));
        }
        Ok(crop)
    }
}

/// Result of cropping a single image.
#[derive(Debug, Clone)]
pub struct CroppedImage {
    pub crop: Rectangle,
    pub image: DynamicImage,
    /// Empty when every box fell outside the crop.
    pub boxes: Vec<NormalizedBox>,
}

/// Crop one decoded image and reproject its boxes. Touches no files.
pub fn crop_image(
    img: &DynamicImage,
    boxes: &[NormalizedBox],
    source: &CropSource,
) -> Result<CroppedImage, CropError> {
    let crop = source.crop_rect(img)?;
    let boxes = reproject(boxes, (img.width(), img.height()), &crop)?;
    let image = img.crop_imm(
        crop.x_min() as u32,
        crop.y_min() as u32,
        crop.width() as u32,
        crop.height() as u32,
    );
    Ok(CroppedImage { crop, image, boxes })
}

/// Where cropped images and their labels are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Same file names inside another directory.
    Directory(PathBuf),
    /// Overwrite the inputs.
    Replace,
    /// `<stem>_cropped.<ext>` beside the input.
    Suffix,
}

impl OutputPolicy {
    /// Output image and label paths for `image_path`.
    pub fn paths_for(&self, image_path: &Path) -> (PathBuf, PathBuf) {
        let image_out = match self {
            OutputPolicy::Directory(dir) => match image_path.file_name() {
                Some(name) => dir.join(name),
                None => dir.join(image_path),
            },
            OutputPolicy::Replace => image_path.to_path_buf(),
            OutputPolicy::Suffix => {
                let stem = image_path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let name = match image_path.extension() {
                    Some(ext) => format!("{stem}_cropped.{}", ext.to_string_lossy()),
                    None => format!("{stem}_cropped"),
                };
                image_path.with_file_name(name)
            }
        };
        let label_out = label_path_for(&image_out);
        (image_out, label_out)
    }
}

/// What happened to one image in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Cropped image and labels written.
    Written { boxes: usize },
    /// No box survived; nothing written except an optional inspection copy.
    Empty { inspection_copy: Option<PathBuf> },
}

/// Counts gathered over a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: usize,
    pub empty: usize,
    pub skipped: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.written + self.empty + self.skipped
    }
}

/// Debug configuration for locator output
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory; each image gets a subdirectory of mask PNGs
    pub output_dir: PathBuf,
}

/// Batch cropper over a directory of images with YOLO label files beside them.
pub struct Pipeline {
    source: CropSource,
    output: OutputPolicy,
    inspect_dir: Option<PathBuf>,
    debug: Option<DebugConfig>,
}

impl Pipeline {
    pub fn new(source: CropSource) -> Self {
        Self {
            source,
            output: OutputPolicy::Suffix,
            inspect_dir: None,
            debug: None,
        }
    }

    pub fn with_output(mut self, output: OutputPolicy) -> Self {
        self.output = output;
        self
    }

    /// Save crops whose boxes all fell outside the crop into `dir` for review.
    pub fn with_inspect_dir(mut self, dir: PathBuf) -> Self {
        self.inspect_dir = Some(dir);
        self
    }

    /// Save the locator's colour masks under `output_dir`.
    /// The directory must be empty or non-existent, and the crop source must
    /// be [`CropSource::Detect`]; a fixed rectangle produces no masks.
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if let CropSource::Fixed(_) = self.source {
            anyhow::bail!("Debug output needs a road-locating crop source, not a fixed rectangle");
        }

        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                anyhow::bail!("Debug directory is not empty: {}", output_dir.display());
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Crop every image in `input_dir`, skipping any that fail.
    ///
    /// Refuses to start when the number of images and label files differ.
    pub fn run(&self, input_dir: &Path) -> Result<BatchReport> {
        let images = discover_images(input_dir)?;
        let label_count = count_label_files(input_dir)?;
        if images.len() != label_count {
            anyhow::bail!(
                "Found {} images but {} label files in {}",
                images.len(),
                label_count,
                input_dir.display()
            );
        }

        if let OutputPolicy::Directory(dir) = &self.output {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        }

        info!("Cropping {} images from {}", images.len(), input_dir.display());

        let mut report = BatchReport::default();
        for image_path in &images {
            match self.process_image(image_path) {
                Ok(ImageOutcome::Written { boxes }) => {
                    debug!("{}: wrote {} boxes", image_path.display(), boxes);
                    report.written += 1;
                }
                Ok(ImageOutcome::Empty { inspection_copy }) => {
                    match inspection_copy {
                        Some(path) => info!(
                            "{}: no boxes inside crop, saved {} for inspection",
                            image_path.display(),
                            path.display()
                        ),
                        None => info!("{}: no boxes inside crop, skipped", image_path.display()),
                    }
                    report.empty += 1;
                }
                Err(e) => {
                    warn!("Skipping {}: {}", image_path.display(), e);
                    report.skipped += 1;
                }
            }
        }

        info!(
            "Done: {} written, {} without boxes, {} skipped",
            report.written, report.empty, report.skipped
        );
        Ok(report)
    }

    /// Crop one image file and write its outputs according to the policy.
    pub fn process_image(&self, image_path: &Path) -> Result<ImageOutcome, CropError> {
        let labels = read_labels(&label_path_for(image_path))?;
        let img = image::open(image_path)?;

        if let (Some(debug), CropSource::Detect { locator, .. }) = (&self.debug, &self.source) {
            self.save_masks(debug, locator, &img, image_path)?;
        }

        let cropped = crop_image(&img, &labels, &self.source)?;
        debug!("{}: crop {}", image_path.display(), cropped.crop);

        if cropped.boxes.is_empty() {
            let inspection_copy = match &self.inspect_dir {
                Some(dir) => {
                    std::fs::create_dir_all(dir).map_err(|e| CropError::io(dir, e))?;
                    let (path, _) = OutputPolicy::Directory(dir.clone()).paths_for(image_path);
                    cropped.image.save(&path)?;
                    Some(path)
                }
                None => None,
            };
            return Ok(ImageOutcome::Empty { inspection_copy });
        }

        let (image_out, label_out) = self.output.paths_for(image_path);
        write_labels(&label_out, &cropped.boxes)?;
        cropped.image.save(&image_out)?;

        Ok(ImageOutcome::Written {
            boxes: cropped.boxes.len(),
        })
    }

    fn save_masks(
        &self,
        debug: &DebugConfig,
        locator: &RegionLocator,
        img: &DynamicImage,
        image_path: &Path,
    ) -> Result<(), CropError> {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let dir = debug.output_dir.join(stem);
        std::fs::create_dir_all(&dir).map_err(|e| CropError::io(&dir, e))?;

        for (idx, mask) in locator.masks(&img.to_rgb8()).iter().enumerate() {
            let path = dir.join(format!("{:02}_range.png", idx + 1));
            mask.save(&path)?;
        }
        debug!("Debug: saved masks to {}", dir.display());
        Ok(())
    }
}

/// Image files directly inside `dir`, sorted by path.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = list_files(dir)?
        .into_iter()
        .filter(|p| {
            let name = p.to_string_lossy();
            IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
        })
        .collect();
    images.sort();
    Ok(images)
}

fn count_label_files(dir: &Path) -> Result<usize> {
    Ok(list_files(dir)?
        .iter()
        .filter(|p| p.to_string_lossy().ends_with(".txt"))
        .count())
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
