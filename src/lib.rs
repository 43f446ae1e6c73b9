pub mod archive;
pub mod batch;
pub mod constants;
pub mod engine;
pub mod error;
pub mod info;
pub mod ingest;
pub mod logger;
pub mod ratio;
pub mod stats;

pub use archive::{package, CompletedItem, Package};
pub use batch::{Batch, ItemId, ItemSnapshot, ItemState, ItemStatus};
pub use constants::ImageKind;
pub use engine::{compress, compress_file, CompressedImage, CompressionOptions};
pub use error::{CompressionError, Result};
pub use ingest::{collect_image_files, is_accepted_file};
pub use ratio::{resolve, Dimension};
pub use stats::{aggregate, format_size, BatchStats};
