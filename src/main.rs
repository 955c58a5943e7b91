use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roadcrop::config::TuningConfig;
use roadcrop::{CropSource, OutputPolicy, Pipeline, Rectangle, RegionLocator};

#[derive(Parser)]
#[command(name = "roadcrop")]
#[command(about = "Crop labelled road images and re-derive their YOLO boxes", version)]
struct Cli {
    /// Directory holding images and their .txt label files
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Write cropped images and labels here instead of beside the inputs
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Overwrite the inputs (ignored when --output-dir is set)
    #[arg(long)]
    replace: bool,

    /// Fixed crop rectangle in pixels
    #[arg(
        long,
        num_args = 4,
        value_names = ["X_MIN", "Y_MIN", "X_MAX", "Y_MAX"],
        default_values_t = [410, 1080, 3580, 1950],
        allow_negative_numbers = true,
        conflicts_with = "detect"
    )]
    fixed: Vec<i32>,

    /// Locate the road by colour and crop a --width x --height window around it
    #[arg(long, requires_all = ["width", "height"])]
    detect: bool,

    /// Crop width in pixels for --detect
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Crop height in pixels for --detect
    #[arg(long, value_name = "PX")]
    height: Option<u32>,

    /// Save crops whose boxes all fell outside the crop here
    #[arg(long, value_name = "DIR")]
    inspect_dir: Option<PathBuf>,

    /// Save colour masks from the road locator (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// JSON file with placement parameters and HSV ranges
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose {
        "roadcrop=debug"
    } else {
        "roadcrop=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let tuning = match &args.config {
        Some(path) => TuningConfig::from_file(path)?,
        None => TuningConfig::default(),
    };

    let source = match (args.detect, args.width, args.height) {
        (true, Some(width), Some(height)) => CropSource::Detect {
            width,
            height,
            locator: RegionLocator::new().with_ranges(tuning.hsv_ranges()),
            placement: tuning.placement,
        },
        (true, _, _) => anyhow::bail!("--detect needs both --width and --height"),
        (false, _, _) => {
            let [x_min, y_min, x_max, y_max] = <[i32; 4]>::try_from(args.fixed.as_slice())
                .map_err(|_| anyhow::anyhow!("--fixed takes exactly four coordinates"))?;
            CropSource::Fixed(Rectangle::new(x_min, y_min, x_max, y_max)?)
        }
    };

    let output = match (args.output_dir, args.replace) {
        (Some(dir), _) => OutputPolicy::Directory(dir),
        (None, true) => OutputPolicy::Replace,
        (None, false) => OutputPolicy::Suffix,
    };

    let mut pipeline = Pipeline::new(source).with_output(output);
    if let Some(dir) = args.inspect_dir {
        pipeline = pipeline.with_inspect_dir(dir);
    }
    if let Some(dir) = args.debug_out {
        pipeline = pipeline.with_debug(dir)?;
    }

    let report = pipeline.run(&args.input_dir)?;
    println!(
        "Processed {} images: {} written, {} without boxes, {} skipped",
        report.total(),
        report.written,
        report.empty,
        report.skipped
    );

    Ok(())
}
