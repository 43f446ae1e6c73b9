pub const DEFAULT_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 40;
pub const MAX_QUALITY: u8 = 95;

/// Lowest quality the iterative search may reach. The user-facing range
/// stays within [MIN_QUALITY, MAX_QUALITY]; only the search descends below it.
pub const QUALITY_FLOOR: u8 = 20;

/// Size ceiling a single pass must meet to terminate the search early.
pub const DEFAULT_TARGET_SIZE: u64 = 1024 * 1024;

pub const PASS_BUDGET: usize = 10;
pub const AGGRESSIVE_PASS_BUDGET: usize = 15;

pub const DEFAULT_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

/// Ratio used by the aspect lock until an actual image establishes one.
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

/// Container formats accepted at ingestion. Anything else is silently
/// filtered out before an item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            _ => None,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_kind_from_media_type() {
        assert_eq!(
            ImageKind::from_media_type("image/jpeg"),
            Some(ImageKind::Jpeg)
        );
        assert_eq!(
            ImageKind::from_media_type("image/jpg"),
            Some(ImageKind::Jpeg)
        );
        assert_eq!(ImageKind::from_media_type("IMAGE/PNG"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_media_type("text/plain"), None);
        assert_eq!(ImageKind::from_media_type("image/webp"), None);
    }

    #[test]
    fn test_image_kind_from_extension() {
        assert_eq!(ImageKind::from_extension("jpg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("JPEG"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("png"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_extension("gif"), None);
        assert_eq!(ImageKind::from_extension(""), None);
    }

    #[test]
    fn test_image_kind_round_trip() {
        assert_eq!(
            ImageKind::from_extension(ImageKind::Jpeg.extension()),
            Some(ImageKind::Jpeg)
        );
        assert_eq!(
            ImageKind::from_media_type(ImageKind::Png.media_type()),
            Some(ImageKind::Png)
        );
    }
}
