mod cli;

use clap::Parser;
use cli::{Args, Commands, ConstraintArgs};
use img_press::archive::{self, Package};
use img_press::batch::{Batch, ItemStatus};
use img_press::engine::{compress_file, CompressionOptions};
use img_press::error::Result;
use img_press::ingest::{collect_image_files, kind_of};
use img_press::stats::{self, format_size};
use img_press::{detail, info, logger, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the bundled output when more than one item completes.
const ARCHIVE_FILE_NAME: &str = "compressed-images.zip";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    match args.command {
        Commands::Batch {
            input,
            output,
            recursive,
            constraints,
        } => {
            run_batch(&input, &output, recursive, &constraints)?;
        }
        Commands::Compress {
            input,
            output,
            constraints,
        } => {
            run_compress(&input, &output, &constraints)?;
        }
        Commands::Info { input } => {
            img_press::info::print_image_info(&input)?;
        }
    }

    Ok(())
}

fn resolve_options(constraints: &ConstraintArgs) -> Result<CompressionOptions> {
    CompressionOptions::new(
        constraints.quality,
        constraints.aggressive,
        constraints.max_width,
        constraints.max_height,
        constraints.lock_ratio,
        constraints.target_size,
    )
}

fn run_batch(
    input: &str,
    output_dir: &Path,
    recursive: bool,
    constraints: &ConstraintArgs,
) -> Result<()> {
    let options = resolve_options(constraints)?;

    let files = collect_image_files(input, recursive)?;
    if files.is_empty() {
        warn!("No image files found in the input path");
        return Ok(());
    }

    let batch = Batch::new();
    for path in &files {
        let Some(kind) = kind_of(path) else { continue };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let bytes = fs::read(path)?;
        batch.enqueue(&file_name, kind.media_type(), bytes);
    }

    info!("📊 Found {} image files to process", batch.len());
    detail!(
        "constraints: quality {}, box {}x{}, ceiling {}, budget {} passes",
        options.quality,
        options.max_width,
        options.max_height,
        format_size(options.target_size),
        options.pass_budget()
    );

    let progress = ProgressBar::new(batch.len() as u64);
    progress.set_style(ProgressStyle::default_bar());

    // Strictly one item at a time; a failure marks its item and moves on.
    for id in batch.queued_ids() {
        let _ = batch.run_one(id, &options);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let snapshot = batch.snapshot();
    for item in &snapshot {
        match &item.status {
            ItemStatus::Done { compressed_size } => {
                detail!(
                    "{}: {} -> {}",
                    item.file_name,
                    format_size(item.original_size),
                    format_size(*compressed_size)
                );
            }
            ItemStatus::Failed { reason } => {
                warn!("{}: {}", item.file_name, reason);
            }
            _ => {}
        }
    }

    let stats = stats::aggregate(&snapshot);
    info!("\n📊 Batch summary:");
    info!("  📁 Items completed: {}", batch.completed().len());
    info!("  📊 Total original size: {}", format_size(stats.total_original));
    info!(
        "  📈 Total compressed size: {}",
        format_size(stats.total_compressed)
    );
    info!(
        "  🎯 Savings: {} bytes ({:.1}%)",
        stats.savings_bytes, stats.savings_percent
    );

    let completed = batch.completed();
    if completed.is_empty() {
        warn!("Nothing completed; no output written");
        return Ok(());
    }

    fs::create_dir_all(output_dir).map_err(|_| {
        img_press::error::CompressionError::DirectoryCreationFailed(output_dir.to_path_buf())
    })?;

    let written = match archive::package(&completed)? {
        Package::Single { name, bytes } => {
            let path = output_dir.join(name);
            fs::write(&path, bytes)?;
            path
        }
        Package::Archive { bytes } => {
            let path = output_dir.join(ARCHIVE_FILE_NAME);
            fs::write(&path, bytes)?;
            path
        }
    };
    info!("✅ Wrote {:?}", written);

    Ok(())
}

fn run_compress(input: &PathBuf, output: &PathBuf, constraints: &ConstraintArgs) -> Result<()> {
    let options = resolve_options(constraints)?;

    info!("🗜️  Compressing image: {:?}", input);
    let (original_size, compressed_size) = compress_file(input, output, &options)?;

    let saved = original_size as i64 - compressed_size as i64;
    let percent = if original_size > 0 {
        saved as f64 / original_size as f64 * 100.0
    } else {
        0.0
    };

    info!("📊 Original size: {}", format_size(original_size));
    info!("📈 Compressed size: {}", format_size(compressed_size));
    if saved >= 0 {
        info!("✅ Reduced file size by {:.1}%", percent);
    } else {
        warn!("File size increased by {:.1}%", percent.abs());
    }

    Ok(())
}
