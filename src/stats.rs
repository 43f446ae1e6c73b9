use crate::batch::{ItemSnapshot, ItemStatus};

/// Aggregate sizes and savings over the `Done` subset of a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    pub total_original: u64,
    pub total_compressed: u64,
    pub savings_bytes: i64,
    pub savings_percent: f64,
}

/// Computes totals over items that reached `Done`; everything else is
/// ignored. `savings_percent` is 0 when nothing completed.
pub fn aggregate<'a>(items: impl IntoIterator<Item = &'a ItemSnapshot>) -> BatchStats {
    let mut total_original = 0u64;
    let mut total_compressed = 0u64;

    for item in items {
        if let ItemStatus::Done { compressed_size } = item.status {
            total_original += item.original_size;
            total_compressed += compressed_size;
        }
    }

    let savings_bytes = total_original as i64 - total_compressed as i64;
    let savings_percent = if total_original == 0 {
        0.0
    } else {
        savings_bytes as f64 / total_original as f64 * 100.0
    };

    BatchStats {
        total_original,
        total_compressed,
        savings_bytes,
        savings_percent,
    }
}

/// Human-readable size with base-1024 thresholds (B/KB/MB).
pub fn format_size(bytes: u64) -> String {
    const THRESHOLD: f64 = 1024.0;

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let kb = bytes as f64 / THRESHOLD;
    if kb < THRESHOLD {
        format!("{:.1} KB", kb)
    } else {
        format!("{:.1} MB", kb / THRESHOLD)
    }
}
