//! Memory Track - Headless in-memory host
//!
//! Behaves like a scroll container without any UI attached. Animation
//! writes are recorded verbatim so callers (and the test suite) can
//! assert on exactly what the engine did. Smooth scrolls settle
//! instantly at the clamped target.

use crate::geometry::SlideBounds;

use super::{HostError, PlayState, StyleHandle, TrackHost};

// =============================================================================
// RECORDED STATE
// =============================================================================

/// One injected keyframe stylesheet, kept for inspection after removal.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectedStyle {
    pub handle: StyleHandle,
    pub name: String,
    pub distance: f32,
    pub removed: bool,
}

/// The last `animation` shorthand written to the track.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub name: String,
    pub duration_secs: f32,
    pub delay_secs: f32,
}

// =============================================================================
// MEMORY TRACK
// =============================================================================

/// Headless track host backed by plain vectors.
#[derive(Debug, Default)]
pub struct MemoryTrack {
    slide_widths: Vec<f32>,
    original_count: usize,
    gap: f32,
    client_width: f32,
    scroll_offset: f32,
    focus_within: bool,
    transform_offset: f32,

    drag_styling: bool,
    captured_pointer: Option<u32>,

    next_style_id: u32,
    injected: Vec<InjectedStyle>,
    animation: Option<AnimationSpec>,
    play_state: PlayState,
}

impl MemoryTrack {
    /// Create a track with the given slide widths, inter-item gap and
    /// viewport width.
    pub fn new(slide_widths: &[f32], gap: f32, client_width: f32) -> Self {
        Self {
            slide_widths: slide_widths.to_vec(),
            original_count: slide_widths.len(),
            gap,
            client_width,
            ..Self::default()
        }
    }

    /// Create a track whose content is already duplicated for a
    /// seamless loop: only the first `block_len` slides form the
    /// original block the marquee cycles over. A `block_len` of zero or
    /// beyond the slide count falls back to the full mount count.
    pub fn with_original_block(
        slide_widths: &[f32],
        block_len: usize,
        gap: f32,
        client_width: f32,
    ) -> Self {
        let mut track = Self::new(slide_widths, gap, client_width);
        if block_len > 0 && block_len <= slide_widths.len() {
            track.original_count = block_len;
        }
        track
    }

    /// Mark focus as being on or within the track.
    pub fn set_focus_within(&mut self, focused: bool) {
        self.focus_within = focused;
    }

    /// Simulate a live transform translation (for marquee rebuilds).
    pub fn set_transform_offset(&mut self, offset: f32) {
        self.transform_offset = offset;
    }

    /// Injected stylesheets, including removed ones.
    pub fn injected_styles(&self) -> &[InjectedStyle] {
        &self.injected
    }

    /// The current animation shorthand, if any.
    pub fn animation(&self) -> Option<&AnimationSpec> {
        self.animation.as_ref()
    }

    /// Current `animation-play-state`.
    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Whether the dragging style class is currently applied.
    pub fn drag_styling(&self) -> bool {
        self.drag_styling
    }

    /// The pointer currently captured, if any.
    pub fn captured_pointer(&self) -> Option<u32> {
        self.captured_pointer
    }

    fn max_scroll(&self) -> f32 {
        (self.scroll_width() - self.client_width).max(0.0)
    }
}

impl TrackHost for MemoryTrack {
    fn slide_count(&self) -> usize {
        self.slide_widths.len()
    }

    fn original_slide_count(&self) -> usize {
        self.original_count
    }

    fn slide_bounds(&self, index: usize) -> Option<SlideBounds> {
        let width = *self.slide_widths.get(index)?;
        let left: f32 = self.slide_widths[..index]
            .iter()
            .map(|w| w + self.gap)
            .sum();
        Some(SlideBounds::new(left, width))
    }

    fn slide_gap(&self) -> f32 {
        self.gap
    }

    fn duplicate_slides(&mut self) -> usize {
        let block: Vec<f32> = self.slide_widths[..self.original_count].to_vec();
        self.slide_widths.extend_from_slice(&block);
        block.len()
    }

    fn scroll_width(&self) -> f32 {
        self.slide_widths.iter().map(|w| w + self.gap).sum()
    }

    fn client_width(&self) -> f32 {
        self.client_width
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
    }

    fn scroll_to(&mut self, left: f32, _smooth: bool) {
        // Instant settle; smoothness is presentation-only.
        self.set_scroll_offset(left);
    }

    fn set_drag_styling(&mut self, active: bool) {
        self.drag_styling = active;
    }

    fn capture_pointer(&mut self, pointer_id: u32) {
        self.captured_pointer = Some(pointer_id);
    }

    fn release_pointer(&mut self, pointer_id: u32) {
        if self.captured_pointer == Some(pointer_id) {
            self.captured_pointer = None;
        }
    }

    fn focus_within(&self) -> bool {
        self.focus_within
    }

    fn inject_keyframes(&mut self, name: &str, distance: f32) -> Result<StyleHandle, HostError> {
        let handle = StyleHandle(self.next_style_id);
        self.next_style_id += 1;
        self.injected.push(InjectedStyle {
            handle,
            name: name.to_string(),
            distance,
            removed: false,
        });
        Ok(handle)
    }

    fn remove_style(&mut self, handle: StyleHandle) {
        if let Some(style) = self.injected.iter_mut().find(|s| s.handle == handle) {
            style.removed = true;
        }
    }

    fn set_animation(&mut self, name: &str, duration_secs: f32, delay_secs: f32) {
        self.animation = Some(AnimationSpec {
            name: name.to_string(),
            duration_secs,
            delay_secs,
        });
        self.play_state = PlayState::Running;
    }

    fn set_play_state(&mut self, state: PlayState) {
        if self.animation.is_some() {
            self.play_state = state;
        }
    }

    fn clear_animation(&mut self) {
        self.animation = None;
        self.play_state = PlayState::Running;
        self.transform_offset = 0.0;
    }

    fn transform_offset(&self) -> f32 {
        self.transform_offset
    }
}

// =============================================================================
// TESTS
// =============================================================================
