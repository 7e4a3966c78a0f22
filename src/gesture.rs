//! Gesture Module - Pointer drag and keyboard navigation events
//!
//! Event types the embedder feeds into the carousel, plus the drag
//! controller. Dragging works directly against the scroll offset:
//! content follows the finger, and it is mutually exclusive with
//! autoplay only by virtue of writing the same offset.

use crate::host::TrackHost;

// =============================================================================
// EVENT TYPES
// =============================================================================

/// Pointer phase, mirroring the pointer-event lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer entered the track (hover begins).
    Enter,
    /// Button pressed within the track.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// Gesture cancelled by the environment.
    Cancel,
    /// Pointer left the track (hover ends; any drag ends too).
    Leave,
}

/// One pointer event routed into the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pointer_id: u32,
    /// Horizontal position in track pixels.
    pub x: f32,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, pointer_id: u32, x: f32) -> Self {
        Self {
            phase,
            pointer_id,
            x,
        }
    }
}

/// Navigation keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

// =============================================================================
// DRAG CONTROLLER
// =============================================================================

/// Pointer drag-to-scroll state.
///
/// On down: record start X and start offset, capture the pointer, apply
/// the dragging style class. On move: `offset = start_offset - dx`. On
/// up/cancel/leave: release capture and drop the style class. A
/// sub-threshold drag commits no slide change - the offset simply stays
/// where the finger left it.
#[derive(Debug, Default)]
pub struct DragController {
    active: bool,
    pointer_id: u32,
    start_x: f32,
    start_offset: f32,
}

impl DragController {
    pub fn active(&self) -> bool {
        self.active
    }

    /// Begin a drag. No-op when one is already in progress.
    pub fn begin<H: TrackHost>(&mut self, host: &mut H, event: &PointerEvent) {
        if self.active {
            return;
        }
        self.active = true;
        self.pointer_id = event.pointer_id;
        self.start_x = event.x;
        self.start_offset = host.scroll_offset();
        host.capture_pointer(event.pointer_id);
        host.set_drag_styling(true);
    }

    /// Follow the pointer. No-op when not dragging.
    pub fn update<H: TrackHost>(&mut self, host: &mut H, x: f32) {
        if !self.active {
            return;
        }
        let dx = x - self.start_x;
        host.set_scroll_offset(self.start_offset - dx);
    }

    /// End the drag, releasing capture and styling. Safe to call when
    /// not dragging (pointer-leave fires unconditionally).
    pub fn end<H: TrackHost>(&mut self, host: &mut H) {
        if !self.active {
            return;
        }
        self.active = false;
        host.release_pointer(self.pointer_id);
        host.set_drag_styling(false);
    }
}

// =============================================================================
// TESTS
// =============================================================================
