//! Terminal Track - Reference host for terminal embedding
//!
//! Maps the track contract onto a one-row strip of labelled slides:
//! - Slide geometry comes from a taffy flex-row layout (one cell = one
//!   pixel unit).
//! - crossterm events convert into carousel events: arrow keys, mouse
//!   enter/leave/drag on the strip row, terminal focus as document
//!   visibility, resize as a geometry refresh.
//! - The declarative marquee animation is emulated by sampling elapsed
//!   wall-clock time against the injected animation parameters;
//!   `animation-play-state` banks progress so pausing freezes position.
//!
//! Rendering is intentionally minimal - a clipped strip of labels -
//! since this host exists as embedding reference, not as a framework.

use std::cell::RefCell;
use std::io::{self, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEventKind, MouseButton, MouseEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use taffy::{
    AvailableSpace, Dimension, FlexDirection, LengthPercentage, Size, Style, TaffyTree,
};

use crate::carousel::CarouselEvent;
use crate::gesture::{NavKey, PointerEvent, PointerPhase};
use crate::geometry::SlideBounds;

use super::{HostError, PlayState, StyleHandle, TrackHost};

// =============================================================================
// SLIDES
// =============================================================================

/// One labelled slide in the strip.
#[derive(Debug, Clone)]
pub struct TerminalSlide {
    pub label: String,
    /// Width in cells.
    pub width: u16,
}

impl TerminalSlide {
    pub fn new(label: impl Into<String>, width: u16) -> Self {
        Self {
            label: label.into(),
            width,
        }
    }
}

// =============================================================================
// ANIMATION EMULATION
// =============================================================================

/// A live emulated animation. Progress accumulates in `banked_secs`
/// while paused; `anchor` marks the start of the current running span.
#[derive(Debug)]
struct EmulatedAnimation {
    duration_secs: f32,
    delay_secs: f32,
    distance: f32,
    play_state: PlayState,
    anchor: Instant,
    banked_secs: f32,
}

impl EmulatedAnimation {
    fn elapsed_secs(&self) -> f32 {
        match self.play_state {
            PlayState::Running => self.banked_secs + self.anchor.elapsed().as_secs_f32(),
            PlayState::Paused => self.banked_secs,
        }
    }

    fn transform_offset(&self) -> f32 {
        if self.distance <= 0.0 || self.duration_secs <= 0.0 {
            return 0.0;
        }
        // A negative delay fast-forwards into the cycle.
        let t = self.elapsed_secs() - self.delay_secs;
        let ratio = (t / self.duration_secs).rem_euclid(1.0);
        ratio * self.distance
    }
}

// =============================================================================
// TERMINAL TRACK
// =============================================================================

/// Track host rendering a one-row slide strip to the terminal.
#[derive(Debug)]
pub struct TerminalTrack {
    slides: Vec<TerminalSlide>,
    original_count: usize,
    gap: f32,
    client_width: f32,
    /// Terminal row the strip renders on.
    row: u16,
    scroll_offset: f32,
    focus_within: bool,
    hovered: bool,
    drag_styling: bool,
    captured_pointer: Option<u32>,

    layout_cache: RefCell<Option<Vec<SlideBounds>>>,
    next_style_id: u32,
    /// Injected keyframes: handle, name, cycle distance.
    keyframes: Vec<(StyleHandle, String, f32)>,
    animation: Option<EmulatedAnimation>,
}

impl TerminalTrack {
    /// Create a strip on the given terminal row with a viewport width
    /// in cells.
    pub fn new(slides: Vec<TerminalSlide>, gap: f32, client_width: f32, row: u16) -> Self {
        let original_count = slides.len();
        Self {
            slides,
            original_count,
            gap,
            client_width,
            row,
            scroll_offset: 0.0,
            focus_within: true,
            hovered: false,
            drag_styling: false,
            captured_pointer: None,
            layout_cache: RefCell::new(None),
            next_style_id: 0,
            keyframes: Vec::new(),
            animation: None,
        }
    }

    /// Create a strip whose slides are already duplicated for a
    /// seamless loop: only the first `block_len` slides form the
    /// original block the marquee cycles over. A `block_len` of zero or
    /// beyond the slide count falls back to the full mount count.
    pub fn with_original_block(
        slides: Vec<TerminalSlide>,
        block_len: usize,
        gap: f32,
        client_width: f32,
        row: u16,
    ) -> Self {
        let mut track = Self::new(slides, gap, client_width, row);
        if block_len > 0 && block_len <= track.slides.len() {
            track.original_count = block_len;
        }
        track
    }

    /// Mark focus as on/within the strip (a single-widget terminal app
    /// usually leaves this true).
    pub fn set_focus_within(&mut self, focused: bool) {
        self.focus_within = focused;
    }

    /// Whether the dragging style class is currently applied.
    pub fn drag_styling(&self) -> bool {
        self.drag_styling
    }

    /// The pointer currently captured by a drag, if any.
    pub fn captured_pointer(&self) -> Option<u32> {
        self.captured_pointer
    }

    // --- Terminal session ----------------------------------------------

    /// Enter raw mode with mouse capture and focus-change reporting.
    pub fn enter() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnableMouseCapture, EnableFocusChange)
    }

    /// Undo [`TerminalTrack::enter`].
    pub fn leave() -> io::Result<()> {
        execute!(stdout(), DisableMouseCapture, DisableFocusChange)?;
        terminal::disable_raw_mode()
    }

    /// Poll for the next terminal event with a timeout.
    pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    // --- Event conversion ----------------------------------------------

    /// Convert a terminal event into a carousel event, tracking hover
    /// state across mouse moves. Returns `None` for events the carousel
    /// does not care about.
    pub fn convert_event(&mut self, event: &Event) -> Option<CarouselEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Left => Some(CarouselEvent::Key(NavKey::ArrowLeft)),
                KeyCode::Right => Some(CarouselEvent::Key(NavKey::ArrowRight)),
                _ => None,
            },
            Event::Mouse(mouse) => {
                let inside = mouse.row == self.row;
                let x = mouse.column as f32;
                match mouse.kind {
                    MouseEventKind::Moved => {
                        if inside != self.hovered {
                            self.hovered = inside;
                            let phase = if inside {
                                PointerPhase::Enter
                            } else {
                                PointerPhase::Leave
                            };
                            Some(CarouselEvent::Pointer(PointerEvent::new(phase, 0, x)))
                        } else {
                            None
                        }
                    }
                    MouseEventKind::Down(MouseButton::Left) if inside => Some(
                        CarouselEvent::Pointer(PointerEvent::new(PointerPhase::Down, 0, x)),
                    ),
                    MouseEventKind::Drag(MouseButton::Left) => Some(CarouselEvent::Pointer(
                        PointerEvent::new(PointerPhase::Move, 0, x),
                    )),
                    MouseEventKind::Up(MouseButton::Left) => Some(CarouselEvent::Pointer(
                        PointerEvent::new(PointerPhase::Up, 0, x),
                    )),
                    _ => None,
                }
            }
            Event::FocusGained => Some(CarouselEvent::VisibilityChanged { hidden: false }),
            Event::FocusLost => Some(CarouselEvent::VisibilityChanged { hidden: true }),
            Event::Resize(width, _) => {
                self.client_width = *width as f32;
                self.layout_cache.replace(None);
                Some(CarouselEvent::Resized)
            }
            _ => None,
        }
    }

    // --- Rendering ------------------------------------------------------

    /// Draw the visible window of the strip.
    pub fn render(&self) -> io::Result<()> {
        let mut out = stdout();
        queue!(out, MoveTo(0, self.row), Clear(ClearType::CurrentLine))?;

        let offset = self.scroll_offset + self.transform_offset();
        for (index, bounds) in self.layout().iter().enumerate() {
            let screen_x = bounds.left - offset;
            if screen_x + bounds.width <= 0.0 || screen_x >= self.client_width {
                continue;
            }
            let label = &self.slides[index].label;
            let col = screen_x.max(0.0) as u16;
            let visible = (self.client_width - screen_x.max(0.0)) as usize;
            let clipped: String = label.chars().take(visible.min(bounds.width as usize)).collect();
            queue!(out, MoveTo(col, self.row), Print(clipped))?;
        }
        out.flush()
    }

    // --- Layout ----------------------------------------------------------

    fn layout(&self) -> Vec<SlideBounds> {
        if let Some(cached) = self.layout_cache.borrow().as_ref() {
            return cached.clone();
        }
        let bounds = self
            .compute_taffy()
            .unwrap_or_else(|_| self.compute_fallback());
        self.layout_cache.replace(Some(bounds.clone()));
        bounds
    }

    fn compute_taffy(&self) -> Result<Vec<SlideBounds>, taffy::TaffyError> {
        let mut tree: TaffyTree<()> = TaffyTree::new();
        let mut children = Vec::with_capacity(self.slides.len());
        for slide in &self.slides {
            children.push(tree.new_leaf(Style {
                size: Size {
                    width: Dimension::Length(slide.width as f32),
                    height: Dimension::Length(1.0),
                },
                ..Style::default()
            })?);
        }
        let root = tree.new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                gap: Size {
                    width: LengthPercentage::Length(self.gap),
                    height: LengthPercentage::Length(0.0),
                },
                ..Style::default()
            },
            &children,
        )?;
        tree.compute_layout(
            root,
            Size::<AvailableSpace> {
                width: AvailableSpace::MaxContent,
                height: AvailableSpace::MaxContent,
            },
        )?;

        let mut bounds = Vec::with_capacity(children.len());
        for child in children {
            let layout = tree.layout(child)?;
            bounds.push(SlideBounds::new(layout.location.x, layout.size.width));
        }
        Ok(bounds)
    }

    /// Plain accumulation, in case the layout engine refuses the tree.
    fn compute_fallback(&self) -> Vec<SlideBounds> {
        let mut left = 0.0;
        self.slides
            .iter()
            .map(|slide| {
                let bounds = SlideBounds::new(left, slide.width as f32);
                left += slide.width as f32 + self.gap;
                bounds
            })
            .collect()
    }

    fn max_scroll(&self) -> f32 {
        (self.scroll_width() - self.client_width).max(0.0)
    }
}

impl TrackHost for TerminalTrack {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn original_slide_count(&self) -> usize {
        self.original_count
    }

    fn slide_bounds(&self, index: usize) -> Option<SlideBounds> {
        self.layout().get(index).copied()
    }

    fn slide_gap(&self) -> f32 {
        self.gap
    }

    fn duplicate_slides(&mut self) -> usize {
        let block: Vec<TerminalSlide> = self.slides[..self.original_count].to_vec();
        let appended = block.len();
        self.slides.extend(block);
        self.layout_cache.replace(None);
        appended
    }

    fn scroll_width(&self) -> f32 {
        self.slides
            .iter()
            .map(|slide| slide.width as f32 + self.gap)
            .sum()
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
        // Terminal cells have no sub-cell easing; settle instantly.
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
        self.keyframes.push((handle, name.to_string(), distance));
        Ok(handle)
    }

    fn remove_style(&mut self, handle: StyleHandle) {
        self.keyframes.retain(|(h, _, _)| *h != handle);
    }

    fn set_animation(&mut self, name: &str, duration_secs: f32, delay_secs: f32) {
        let distance = self
            .keyframes
            .iter()
            .find(|(_, n, _)| n == name)
            .map(|(_, _, d)| *d)
            .unwrap_or(0.0);
        self.animation = Some(EmulatedAnimation {
            duration_secs,
            delay_secs,
            distance,
            play_state: PlayState::Running,
            anchor: Instant::now(),
            banked_secs: 0.0,
        });
    }

    fn set_play_state(&mut self, state: PlayState) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        if animation.play_state == state {
            return;
        }
        match state {
            PlayState::Paused => {
                animation.banked_secs += animation.anchor.elapsed().as_secs_f32();
            }
            PlayState::Running => {
                animation.anchor = Instant::now();
            }
        }
        animation.play_state = state;
    }

    fn clear_animation(&mut self) {
        self.animation = None;
    }

    fn transform_offset(&self) -> f32 {
        self.animation
            .as_ref()
            .map(EmulatedAnimation::transform_offset)
            .unwrap_or(0.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
