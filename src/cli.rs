use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-press",
    about = "Constraint-driven batch image re-encoding, entirely local",
    long_about = "img-press re-encodes JPEG and PNG images to satisfy size, quality and dimension \
                  constraints without any image leaving the process. It runs an iterative \
                  resize + re-encode search per image and drives whole batches sequentially, \
                  tracking per-item progress and failures and packaging the results.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-press batch ./photos ./out -q 85 -w 1600 --lock-ratio\n  \
    img-press batch \"./shots/*.png\" ./out --aggressive --target-size 512000\n  \
    img-press compress input.jpg output.jpg -q 70\n  \
    img-press info photo.png"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Print per-item details")]
    pub verbose: bool,
}

#[derive(clap::Args, Debug)]
pub struct ConstraintArgs {
    #[arg(
        short = 'q',
        long,
        help = "Encoding quality hint (40-95, default: 80)",
        long_help = "Starting quality for the iterative search, from 40 (smallest) to 95 (best). \
                     Each pass that misses the size ceiling lowers it until the floor is reached."
    )]
    pub quality: Option<u8>,

    #[arg(
        long,
        help = "Widen the iteration budget (15 passes instead of 10)",
        long_help = "Aggressive mode trades latency for a better size/quality point by allowing \
                     more refinement passes per image."
    )]
    pub aggressive: bool,

    #[arg(
        short = 'w',
        long,
        help = "Maximum output width in pixels (default: 1920)",
        long_help = "Bounding-box width. Larger images are downscaled preserving aspect ratio; \
                     smaller images are never upscaled."
    )]
    pub max_width: Option<u32>,

    #[arg(
        short = 'H',
        long,
        help = "Maximum output height in pixels (default: 1080)",
        long_help = "Bounding-box height. Larger images are downscaled preserving aspect ratio; \
                     smaller images are never upscaled."
    )]
    pub max_height: Option<u32>,

    #[arg(
        long,
        help = "Keep max-width and max-height proportional (16:9 by default)",
        long_help = "With the lock on, giving only one of --max-width/--max-height derives the \
                     other from a 16:9 ratio instead of the default bound."
    )]
    pub lock_ratio: bool,

    #[arg(
        short = 't',
        long,
        help = "Per-image size ceiling in bytes (default: 1 MiB)",
        long_help = "A pass whose output is at or under this ceiling ends the search for that \
                     image. If no pass fits, the smallest one wins."
    )]
    pub target_size: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Re-encode every image in a directory, glob or file list",
        long_about = "Ingests JPEG/PNG files (others are silently skipped), compresses them \
                      sequentially, prints per-item outcomes and aggregate savings, and writes \
                      either the single result or one ZIP archive into the output directory."
    )]
    Batch {
        #[arg(
            help = "Input directory, file, or glob pattern",
            long_help = "Examples: './images', 'photo.jpg', './shots/*.png'"
        )]
        input: String,

        #[arg(help = "Output directory for the packaged result")]
        output: PathBuf,

        #[arg(short = 'r', long, help = "Descend into subdirectories")]
        recursive: bool,

        #[command(flatten)]
        constraints: ConstraintArgs,
    },

    #[command(
        about = "Re-encode a single image file",
        long_about = "Runs the same constraint search on one file and writes the winning pass \
                      to the output path."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output image file path")]
        output: PathBuf,

        #[command(flatten)]
        constraints: ConstraintArgs,
    },

    #[command(
        about = "Display image information and constraint-fit hints",
        long_about = "Shows dimensions, byte size, container format, and whether the image \
                      fits the default bounding box and size ceiling."
    )]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,
    },
}
