/// Pairing of the bounding-box dimensions under an aspect-ratio lock.
///
/// The lock keeps `width / height` equal to the last explicitly chosen
/// ratio: editing one dimension recomputes the other. Without the lock
/// only the edited dimension changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

/// Computes the new `(width, height)` pair after one dimension is edited.
///
/// `ratio` is width over height. Non-positive inputs are clamped to 1, as
/// is any recomputed dimension that rounds down to zero. Pure, no failure
/// modes.
pub fn resolve(
    current: (u32, u32),
    changed: Dimension,
    new_value: u32,
    ratio: f64,
    lock_enabled: bool,
) -> (u32, u32) {
    let value = new_value.max(1);

    if !lock_enabled {
        return match changed {
            Dimension::Width => (value, current.1.max(1)),
            Dimension::Height => (current.0.max(1), value),
        };
    }

    match changed {
        Dimension::Width => {
            let height = (value as f64 / ratio).round() as u32;
            (value, height.max(1))
        }
        Dimension::Height => {
            let width = (value as f64 * ratio).round() as u32;
            (width.max(1), value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_ASPECT_RATIO;

    #[test]
    fn test_resolve_width_locked_16_9() {
        let (w, h) = resolve((1920, 1080), Dimension::Width, 1600, DEFAULT_ASPECT_RATIO, true);
        assert_eq!((w, h), (1600, 900));
    }

    #[test]
    fn test_resolve_height_locked_16_9() {
        let (w, h) = resolve((1920, 1080), Dimension::Height, 900, DEFAULT_ASPECT_RATIO, true);
        assert_eq!((w, h), (1600, 900));
    }

    #[test]
    fn test_resolve_round_trip_consistency() {
        let ratio = DEFAULT_ASPECT_RATIO;
        let (w1, h1) = resolve((1920, 1080), Dimension::Width, 1600, ratio, true);
        let (w2, h2) = resolve((w1, h1), Dimension::Height, h1, ratio, true);
        assert_eq!((w2, h2), (w1, h1));
    }

    #[test]
    fn test_resolve_unlocked_leaves_other_untouched() {
        let (w, h) = resolve((1920, 1080), Dimension::Width, 640, DEFAULT_ASPECT_RATIO, false);
        assert_eq!((w, h), (640, 1080));

        let (w, h) = resolve((1920, 1080), Dimension::Height, 480, DEFAULT_ASPECT_RATIO, false);
        assert_eq!((w, h), (1920, 480));
    }

    #[test]
    fn test_resolve_clamps_non_positive_input() {
        let (w, h) = resolve((1920, 1080), Dimension::Width, 0, DEFAULT_ASPECT_RATIO, true);
        assert_eq!(w, 1);
        assert!(h >= 1);
    }

    #[test]
    fn test_resolve_tall_ratio() {
        // 3:4 portrait ratio
        let ratio = 3.0 / 4.0;
        let (w, h) = resolve((300, 400), Dimension::Width, 600, ratio, true);
        assert_eq!((w, h), (600, 800));
    }

    #[test]
    fn test_resolve_extreme_ratio_keeps_minimum_of_one() {
        let (w, h) = resolve((10_000, 1), Dimension::Height, 1, 10_000.0, true);
        assert_eq!(h, 1);
        assert_eq!(w, 10_000);

        let (w, h) = resolve((1, 10_000), Dimension::Width, 1, 1.0 / 10_000.0, true);
        assert_eq!(w, 1);
        assert_eq!(h, 10_000);
    }
}
