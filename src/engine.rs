use crate::constants::{
    AGGRESSIVE_PASS_BUDGET, DEFAULT_ASPECT_RATIO, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
    DEFAULT_QUALITY, DEFAULT_TARGET_SIZE, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL,
    MAX_QUALITY, MIN_QUALITY, PASS_BUDGET, QUALITY_FLOOR, ZOPFLI_ITERATIONS,
};
use crate::constants::ImageKind;
use crate::error::{CompressionError, Result};
use crate::ratio::{self, Dimension};
use image::codecs::jpeg::JpegEncoder;
use image::{GenericImageView, ImageFormat, ImageReader};
use oxipng::Deflaters;
use std::fs;
use std::io::Cursor;
use std::num::NonZeroU8;
use std::path::Path;

/// Constraint set shared by every item in a run.
#[derive(Debug, Clone)]
pub struct CompressionOptions {
    pub quality: u8,
    pub aggressive: bool,
    pub max_width: u32,
    pub max_height: u32,
    pub target_size: u64,
}

impl CompressionOptions {
    /// Validates and resolves the constraint set. With the aspect lock on
    /// and only one bound given, the other is derived from the default 16:9
    /// ratio instead of its default value.
    pub fn new(
        quality: Option<u8>,
        aggressive: bool,
        max_width: Option<u32>,
        max_height: Option<u32>,
        maintain_aspect_ratio: bool,
        target_size: Option<u64>,
    ) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }

        if max_width == Some(0) || max_height == Some(0) {
            return Err(CompressionError::InvalidBounds(
                max_width.unwrap_or(DEFAULT_MAX_WIDTH),
                max_height.unwrap_or(DEFAULT_MAX_HEIGHT),
            ));
        }

        let defaults = (DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT);
        let (max_width, max_height) = match (max_width, max_height) {
            (Some(w), None) if maintain_aspect_ratio => {
                ratio::resolve(defaults, Dimension::Width, w, DEFAULT_ASPECT_RATIO, true)
            }
            (None, Some(h)) if maintain_aspect_ratio => {
                ratio::resolve(defaults, Dimension::Height, h, DEFAULT_ASPECT_RATIO, true)
            }
            (w, h) => (w.unwrap_or(defaults.0), h.unwrap_or(defaults.1)),
        };

        Ok(Self {
            quality,
            aggressive,
            max_width,
            max_height,
            target_size: target_size.unwrap_or(DEFAULT_TARGET_SIZE),
        })
    }

    /// Aggressive mode trades latency for more refinement passes.
    pub fn pass_budget(&self) -> usize {
        if self.aggressive {
            AGGRESSIVE_PASS_BUDGET
        } else {
            PASS_BUDGET
        }
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            aggressive: false,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            target_size: DEFAULT_TARGET_SIZE,
        }
    }
}

/// Outcome of a successful search. The container format always matches the
/// source's.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
    pub quality_used: u8,
    pub passes: usize,
}

impl CompressedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Re-encodes one image to meet the constraint set.
///
/// Decodes the source, downscales it into the bounding box if needed (never
/// upscales), then re-encodes starting at `options.quality`, lowering quality
/// multiplicatively after each pass that misses the target ceiling. The first
/// pass under the ceiling wins; otherwise the smallest pass seen is returned
/// once the budget is spent. `progress` receives monotonically non-decreasing
/// percentages in [0, 100], ending with 100.
///
/// A source that cannot be decoded is an `EncodeFailure`; no retry happens.
pub fn compress(
    source: &[u8],
    options: &CompressionOptions,
    mut progress: impl FnMut(u8),
) -> Result<CompressedImage> {
    let reader = ImageReader::new(Cursor::new(source)).with_guessed_format()?;
    let kind = match reader.format() {
        Some(ImageFormat::Jpeg) => ImageKind::Jpeg,
        Some(ImageFormat::Png) => ImageKind::Png,
        Some(other) => {
            return Err(CompressionError::EncodeFailure(format!(
                "unsupported container format {:?}",
                other
            )))
        }
        None => {
            return Err(CompressionError::EncodeFailure(
                "content is not a recognizable image".to_string(),
            ))
        }
    };
    let mut img = reader
        .decode()
        .map_err(|e| CompressionError::EncodeFailure(format!("decode failed: {}", e)))?;

    let (width, height) = img.dimensions();
    if width > options.max_width || height > options.max_height {
        // resize() fits within the box preserving aspect ratio; combined
        // with the exceed check above, the image is never upscaled.
        img = img.resize(
            options.max_width,
            options.max_height,
            image::imageops::FilterType::Lanczos3,
        );
    }

    // JPEG encoding only accepts L8/Rgb8-style buffers, so convert once.
    // PNG pixel data never changes between passes (only the deflater does),
    // so the base encoding happens once as well.
    let input = match kind {
        ImageKind::Jpeg => PassInput::Jpeg(img.to_rgb8()),
        ImageKind::Png => {
            let mut buf = Vec::new();
            img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
            PassInput::Png(buf)
        }
    };

    let budget = options.pass_budget();
    let mut quality = options.quality;
    let mut best: Option<Vec<u8>> = None;
    let mut best_quality = quality;
    let mut passes = 0;
    let mut last_params: Option<u8> = None;

    for pass in 0..budget {
        progress(((pass * 100 / budget) as u8).min(100));

        // Once the step function stops changing the encoder parameters,
        // further passes are byte-identical.
        let params = match &input {
            PassInput::Jpeg(_) => quality,
            PassInput::Png(_) => png_deflater_tier(quality),
        };
        if last_params == Some(params) {
            break;
        }
        last_params = Some(params);

        let encoded = match &input {
            PassInput::Jpeg(rgb) => encode_jpeg(rgb, quality)?,
            PassInput::Png(base) => optimize_png(base, quality)?,
        };
        passes += 1;

        let size = encoded.len() as u64;
        if best.as_ref().map_or(true, |b| encoded.len() < b.len()) {
            best_quality = quality;
            best = Some(encoded);
        }
        if size <= options.target_size || quality == QUALITY_FLOOR {
            break;
        }
        quality = next_quality(quality, options.aggressive);
    }
    progress(100);

    let bytes = best.ok_or_else(|| {
        CompressionError::EncodeFailure("no encoding pass produced output".to_string())
    })?;

    Ok(CompressedImage {
        bytes,
        kind,
        quality_used: best_quality,
        passes,
    })
}

enum PassInput {
    Jpeg(image::RgbImage),
    Png(Vec<u8>),
}

/// Quality step between passes: multiplicative decrease, bounded at the
/// floor. Aggressive mode descends in finer steps so its wider budget buys
/// more distinct refinement passes instead of reaching the floor sooner.
pub fn next_quality(quality: u8, aggressive: bool) -> u8 {
    let stepped = if aggressive {
        quality as u32 * 9 / 10
    } else {
        quality as u32 * 4 / 5
    };
    (stepped as u8).max(QUALITY_FLOOR)
}

fn encode_jpeg(rgb: &image::RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    rgb.write_with_encoder(encoder)?;
    Ok(buf)
}

/// PNG has no scalar quality knob; quality selects the deflater the same way
/// the level tiers do elsewhere in the crate.
fn optimize_png(png_bytes: &[u8], quality: u8) -> Result<Vec<u8>> {
    let mut opts = oxipng::Options::from_preset(4);
    opts.deflate = if quality >= 90 {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };

    oxipng::optimize_from_memory(png_bytes, &opts)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

fn png_deflater_tier(quality: u8) -> u8 {
    if quality >= 90 {
        3
    } else if quality >= 70 {
        2
    } else {
        1
    }
}

/// Runs the search on a file and writes the winning pass next to it.
/// Used by the single-file CLI path; the batch path works on owned bytes.
pub fn compress_file(
    input: &Path,
    output: &Path,
    options: &CompressionOptions,
) -> Result<(u64, u64)> {
    if !input.exists() {
        return Err(CompressionError::FileNotFound(input.to_path_buf()));
    }
    let source = fs::read(input)?;
    let original_size = source.len() as u64;

    let result = compress(&source, options, |_| {})?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }
    fs::write(output, &result.bytes)?;

    Ok((original_size, result.size()))
}
