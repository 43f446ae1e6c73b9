use crate::constants::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_TARGET_SIZE, ImageKind};
use crate::error::{CompressionError, Result};
use crate::stats::format_size;
use image::{GenericImageView, ImageReader};
use std::fs;
use std::path::Path;

pub fn print_image_info(input_path: &Path) -> Result<()> {
    if !input_path.exists() {
        return Err(CompressionError::FileNotFound(input_path.to_path_buf()));
    }

    let reader = ImageReader::open(input_path)?;
    let format = reader.format();
    let img = reader.decode()?;
    let metadata = fs::metadata(input_path)?;
    let (width, height) = img.dimensions();

    println!("📋 Image information:");
    println!("  📁 File: {:?}", input_path);
    println!("  📏 Dimensions: {}x{} pixels", width, height);
    println!(
        "  📦 File size: {} bytes ({})",
        metadata.len(),
        format_size(metadata.len())
    );
    println!("  🎨 Color type: {:?}", img.color());
    if let Some(format) = format {
        println!("  🎭 Container format: {:?}", format);
    }
    println!(
        "  📐 Aspect ratio: {:.2}:1",
        width as f64 / height.max(1) as f64
    );

    println!("\n💡 Constraint fit:");
    if width > DEFAULT_MAX_WIDTH || height > DEFAULT_MAX_HEIGHT {
        println!(
            "  📏 Exceeds the default {}x{} bounding box; it would be downscaled",
            DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT
        );
    } else {
        println!(
            "  📏 Fits the default {}x{} bounding box; no resizing needed",
            DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT
        );
    }
    if metadata.len() > DEFAULT_TARGET_SIZE {
        println!(
            "  🎯 Over the {} ceiling; the quality search would iterate",
            format_size(DEFAULT_TARGET_SIZE)
        );
    } else {
        println!(
            "  🎯 Already under the {} ceiling; a single pass would suffice",
            format_size(DEFAULT_TARGET_SIZE)
        );
    }

    let accepted = input_path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ImageKind::from_extension);
    if accepted.is_none() {
        println!("  ⚠️  Extension is outside the accepted set (jpeg, jpg, png)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_image_info_not_found() {
        let result = print_image_info(Path::new("nonexistent.jpg"));
        assert!(matches!(result, Err(CompressionError::FileNotFound(_))));
    }
}
