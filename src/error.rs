use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Encode failure: {0}")]
    EncodeFailure(String),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Invalid quality value: {0}. Must be between 40 and 95")]
    InvalidQuality(u8),

    #[error("Invalid bounding box: {0}x{1}. Both dimensions must be positive")]
    InvalidBounds(u32, u32),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("No item with id {0} in the batch")]
    ItemNotFound(u64),

    #[error("No completed items to package")]
    NoCompletedItems,

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
