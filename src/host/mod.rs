//! Host Module - Environment adapter contract
//!
//! The engine never touches a concrete UI environment directly. Everything
//! it needs from the outside world is expressed by the [`TrackHost`] trait:
//! slide geometry, scroll position, drag styling, pointer capture, and the
//! declarative animation surface the marquee strategy writes to.
//!
//! A host is owned by exactly one carousel. Mounting two carousels on the
//! same underlying track is undefined behavior and is a caller contract,
//! not something the engine defends against.
//!
//! Two hosts ship with the crate:
//! - [`MemoryTrack`] - headless, records animation writes; used by the
//!   test suite and suitable for snapshot-style embedding.
//! - [`TerminalTrack`] - terminal reference host (taffy layout +
//!   crossterm rendering) that emulates the keyframe animation by
//!   sampling elapsed time.

mod mem;
mod term;

pub use mem::MemoryTrack;
pub use term::{TerminalTrack, TerminalSlide};

use thiserror::Error;

use crate::geometry::SlideBounds;

// =============================================================================
// TYPES
// =============================================================================

/// Handle to an injected keyframe stylesheet.
///
/// Returned by [`TrackHost::inject_keyframes`] and handed back to
/// [`TrackHost::remove_style`] exactly once, on destroy or marquee rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleHandle(pub(crate) u32);

/// Play state of a declarative animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Running,
    Paused,
}

/// Failures a host can report. All of them degrade the feature that hit
/// them; none cross the public carousel API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    /// The host cannot inject stylesheets (marquee falls back to disabled).
    #[error("style injection unsupported by this host")]
    StyleInjectionUnsupported,
}

// =============================================================================
// TRACK HOST CONTRACT
// =============================================================================

/// Environment adapter for one track element.
///
/// Implementations are expected to behave like a scroll container: the
/// scroll offset is clamped to `[0, scroll_width - client_width]` on
/// write, and `scroll_to` settles at the requested (clamped) position.
pub trait TrackHost {
    // --- Slide geometry ------------------------------------------------

    /// Current number of slides (including any engine-made duplicates).
    fn slide_count(&self) -> usize;

    /// Length of the unduplicated content block the marquee cycles
    /// over. Defaults to the mount count; hosts mounted on content
    /// already duplicated for a seamless loop report the single block
    /// instead. Never grows when the engine appends clones.
    fn original_slide_count(&self) -> usize;

    /// Bounds of a slide, or `None` when out of range.
    fn slide_bounds(&self, index: usize) -> Option<SlideBounds>;

    /// Inter-item gap in pixels.
    fn slide_gap(&self) -> f32;

    /// Append one clone of the original slide block to the track.
    /// Returns the number of slides appended (0 when nothing to clone).
    fn duplicate_slides(&mut self) -> usize;

    // --- Track geometry / scrolling ------------------------------------

    /// Total content width.
    fn scroll_width(&self) -> f32;

    /// Visible viewport width.
    fn client_width(&self) -> f32;

    /// Current scroll offset.
    fn scroll_offset(&self) -> f32;

    /// Write the scroll offset (host clamps to the valid range).
    fn set_scroll_offset(&mut self, offset: f32);

    /// Scroll so `left` aligns with the track's scroll position.
    /// `smooth` is a styling hint; hosts may settle instantly.
    fn scroll_to(&mut self, left: f32, smooth: bool);

    // --- Input surface -------------------------------------------------

    /// Toggle the dragging style class on the track.
    fn set_drag_styling(&mut self, active: bool);

    /// Capture / release a pointer for the duration of a drag.
    fn capture_pointer(&mut self, pointer_id: u32);
    fn release_pointer(&mut self, pointer_id: u32);

    /// Whether input focus is on or within the track.
    fn focus_within(&self) -> bool;

    // --- Declarative animation (marquee) -------------------------------

    /// Inject a uniquely named keyframe rule translating the track from
    /// `translateX(0)` to `translateX(-distance)`.
    fn inject_keyframes(&mut self, name: &str, distance: f32) -> Result<StyleHandle, HostError>;

    /// Remove a previously injected stylesheet.
    fn remove_style(&mut self, handle: StyleHandle);

    /// Set the animation shorthand: `name duration linear infinite` with
    /// the given (negative) delay in seconds.
    fn set_animation(&mut self, name: &str, duration_secs: f32, delay_secs: f32);

    /// Toggle `animation-play-state`. Position is preserved.
    fn set_play_state(&mut self, state: PlayState);

    /// Clear every animation-related inline style the engine added,
    /// returning the track to its pre-mount visual state.
    fn clear_animation(&mut self);

    /// Current computed transform translation X, as a positive magnitude.
    fn transform_offset(&self) -> f32;
}
