//! Geometry helpers - Pure track/slide math
//!
//! Leaf module with no state. Everything the drivers and navigation
//! primitives need to reason about the track:
//! - Slide lookup by visible center
//! - Continuous-scroll advance with wrap
//! - Marquee cycle distance / duration / resume delay formulas
//!
//! All distances are in pixels (a terminal host maps one cell to one
//! pixel unit), all durations in seconds unless a name says otherwise.

// =============================================================================
// TYPES
// =============================================================================

/// Horizontal bounds of a single slide within the track content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideBounds {
    /// Left edge, relative to the track content origin.
    pub left: f32,
    /// Slide width.
    pub width: f32,
}

impl SlideBounds {
    /// Create bounds from a left edge and width.
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    /// Horizontal midpoint of the slide.
    pub fn midpoint(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

// =============================================================================
// CLAMPING
// =============================================================================

/// Clamp a possibly-negative index into `[0, len - 1]`.
///
/// Returns 0 for an empty slide list (callers guard on emptiness before
/// acting on the result).
pub fn clamp_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.clamp(0, len as isize - 1) as usize
}

// =============================================================================
// SLIDE LOOKUP
// =============================================================================

/// Find the slide nearest the track's visible center.
///
/// Compares each slide's midpoint against `offset + client_width / 2`.
/// Returns 0 for an empty list.
pub fn nearest_slide(offset: f32, client_width: f32, slides: &[SlideBounds]) -> usize {
    let center = offset + client_width / 2.0;
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, slide) in slides.iter().enumerate() {
        let d = (slide.midpoint() - center).abs();
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

// =============================================================================
// CONTINUOUS SCROLL
// =============================================================================

/// Advance a continuous-scroll offset by `speed * dt`, wrapping to 0 when
/// the end of the scrollable extent is reached.
///
/// `max` is `scroll_width - client_width`. Returns `None` when the extent
/// is degenerate (zero or negative), which disables autoplay upstream.
/// The returned offset is always in `[0, max)`.
pub fn continuous_advance(offset: f32, speed: f32, dt: f32, max: f32) -> Option<f32> {
    if max <= 0.0 {
        return None;
    }
    let next = offset + speed * dt.max(0.0);
    // Wrap slightly early so fractional overshoot never pins at the end.
    if next >= max - 1.0 {
        Some(0.0)
    } else {
        Some(next)
    }
}

// =============================================================================
// MARQUEE FORMULAS
// =============================================================================

/// Cycle distance for a marquee loop: the width of one full unduplicated
/// content block plus the inter-item gap after each item.
pub fn marquee_cycle_distance(slide_widths: &[f32], gap: f32) -> f32 {
    let block: f32 = slide_widths.iter().sum();
    block + gap * slide_widths.len() as f32
}

/// Animation duration in seconds for one marquee cycle.
///
/// `max(6s, distance / speed)` with the speed floored at 1 px/s.
pub fn marquee_duration(distance: f32, speed: f32) -> f32 {
    (distance / speed.max(1.0)).max(6.0)
}

/// Convert a live transform offset back into an equivalent animation delay.
///
/// Used when a marquee is rebuilt (e.g. after a resize) so the new
/// animation starts at the same visual position. The offset is folded
/// modulo the cycle distance; the result is the positive delay magnitude
/// the caller applies as a negative `animation-delay`.
pub fn marquee_resume_delay(transform_offset: f32, distance: f32, duration: f32) -> f32 {
    if distance <= 0.0 {
        return 0.0;
    }
    let progress = (transform_offset.abs() % distance) / distance;
    progress * duration
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn three_slides() -> Vec<SlideBounds> {
        vec![
            SlideBounds::new(0.0, 100.0),
            SlideBounds::new(100.0, 100.0),
            SlideBounds::new(200.0, 100.0),
        ]
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-1, 3), 0);
        assert_eq!(clamp_index(0, 3), 0);
        assert_eq!(clamp_index(2, 3), 2);
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(5, 0), 0);
    }

    #[test]
    fn test_nearest_slide_at_origin() {
        // Viewport center at 50 -> slide 0 (midpoint 50)
        assert_eq!(nearest_slide(0.0, 100.0, &three_slides()), 0);
    }

    #[test]
    fn test_nearest_slide_mid_track() {
        // Offset 100, center at 150 -> slide 1 (midpoint 150)
        assert_eq!(nearest_slide(100.0, 100.0, &three_slides()), 1);
        // Offset 90, center 140 -> still closer to slide 1
        assert_eq!(nearest_slide(90.0, 100.0, &three_slides()), 1);
    }

    #[test]
    fn test_nearest_slide_empty() {
        assert_eq!(nearest_slide(50.0, 100.0, &[]), 0);
    }

    #[test]
    fn test_continuous_advance_basic() {
        let next = continuous_advance(0.0, 100.0, 0.1, 50.0).unwrap();
        assert!((next - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_continuous_advance_wraps() {
        // 45 + 10 = 55 >= 49 -> wrap
        assert_eq!(continuous_advance(45.0, 100.0, 0.1, 50.0), Some(0.0));
    }

    #[test]
    fn test_continuous_advance_degenerate() {
        assert_eq!(continuous_advance(0.0, 100.0, 0.1, 0.0), None);
        assert_eq!(continuous_advance(0.0, 100.0, 0.1, -5.0), None);
    }

    #[test]
    fn test_continuous_stays_in_range_over_time() {
        // speed=100 px/s, extent=50 px: after >= 0.5s of deltas the offset
        // must have wrapped at least once and always stay in [0, 50).
        let mut offset = 0.0;
        let mut wrapped = false;
        for _ in 0..40 {
            let prev = offset;
            offset = continuous_advance(offset, 100.0, 0.016, 50.0).unwrap();
            if offset < prev {
                wrapped = true;
            }
            assert!(offset >= 0.0 && offset < 50.0);
        }
        assert!(wrapped);
    }

    #[test]
    fn test_marquee_cycle_distance() {
        // One block of 3 x 100 plus a 10px gap after each item.
        let d = marquee_cycle_distance(&[100.0, 100.0, 100.0], 10.0);
        assert!((d - 330.0).abs() < 0.001);
        assert_eq!(marquee_cycle_distance(&[], 10.0), 0.0);
    }

    #[test]
    fn test_marquee_duration_formula() {
        // distance=800, speed=40 -> max(6, 20) = 20
        assert!((marquee_duration(800.0, 40.0) - 20.0).abs() < 0.001);
        // Short distance floors at 6 seconds
        assert!((marquee_duration(100.0, 40.0) - 6.0).abs() < 0.001);
        // Zero speed floors at 1 px/s instead of dividing by zero
        assert!((marquee_duration(12.0, 0.0) - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_marquee_resume_delay() {
        // Halfway through a 330px cycle at 20s -> 10s delay
        let delay = marquee_resume_delay(165.0, 330.0, 20.0);
        assert!((delay - 10.0).abs() < 0.001);
        // Offset folds modulo the cycle distance
        let delay = marquee_resume_delay(495.0, 330.0, 20.0);
        assert!((delay - 10.0).abs() < 0.001);
        // Degenerate distance
        assert_eq!(marquee_resume_delay(100.0, 0.0, 20.0), 0.0);
    }
}
