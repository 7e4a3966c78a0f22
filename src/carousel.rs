//! Carousel Module - Facade and lifecycle state machine
//!
//! Wires the pause aggregator, autoplay driver and gesture layer
//! together against one [`TrackHost`] and returns the public handle.
//!
//! Lifecycle: `Idle` (constructed, autoplay off) -> `Running` <->
//! `Paused` (driven purely by pause-state recomputation) -> `Destroyed`
//! (terminal). `destroy()` is idempotent and safe to call from inside
//! the engine's own event handling: handles are cleared before any
//! handler body could re-arm them.
//!
//! The embedder owns the event loop. It routes environment events in
//! through [`Carousel::dispatch`] (the same shape as an input router
//! feeding mouse/keyboard state) and drives the step/continuous clocks
//! through [`Carousel::tick`]. An embedder that cannot observe viewport
//! intersection simply never dispatches intersection events and the
//! engine degrades to "always in view".

use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};
use spark_signals::{signal, Signal};
use thiserror::Error;

use crate::autoplay::{AutoplayDriver, ContinuousDriver, MarqueeDriver, StepDriver};
use crate::gesture::{DragController, NavKey, PointerEvent, PointerPhase};
use crate::geometry::{self, SlideBounds};
use crate::host::{PlayState, TrackHost};
use crate::pause::{PauseAggregator, PauseFlags, PausePolicy};
use crate::types::{AutoplayMode, CarouselOptions};

/// Bound on defensive slide duplication for marquee overflow.
const MAX_DUPLICATION_ROUNDS: u32 = 8;

/// Monotonic suffix for injected keyframe names, unique across mounts.
static NEXT_MARQUEE_ID: AtomicU32 = AtomicU32::new(0);

// =============================================================================
// EVENTS
// =============================================================================

/// Environment events the embedder routes into the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// Pointer lifecycle within the track (hover + drag).
    Pointer(PointerEvent),
    /// Arrow-key press.
    Key(NavKey),
    /// Document / application visibility change.
    VisibilityChanged { hidden: bool },
    /// Viewport intersection change for the track.
    IntersectionChanged { in_view: bool },
    /// Track geometry changed (e.g. a resize); live marquees rebuild
    /// in place without a visible jump.
    Resized,
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Facade state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, autoplay not started.
    Idle,
    /// Autoplay active.
    Running,
    /// Autoplay suspended by a pause signal; the handle is still held.
    Paused,
    /// Terminal; reached only via `destroy()`.
    Destroyed,
}

/// Why a mount was skipped instead of producing a carousel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("track element not found")]
    MissingTarget,
    #[error("track has no slides")]
    NoSlides,
}

/// Explicit typed mount result: missing-target and empty-track
/// conditions are observable instead of degrading into silent no-ops.
pub enum MountOutcome<H: TrackHost> {
    Mounted(Carousel<H>),
    Skipped {
        /// The host handed back to the caller, when there was one.
        host: Option<H>,
        reason: SkipReason,
    },
}

impl<H: TrackHost> MountOutcome<H> {
    /// The carousel, if mounting succeeded.
    pub fn mounted(self) -> Option<Carousel<H>> {
        match self {
            Self::Mounted(carousel) => Some(carousel),
            Self::Skipped { .. } => None,
        }
    }

    /// The skip reason, if mounting was skipped.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Mounted(_) => None,
            Self::Skipped { reason, .. } => Some(reason),
        }
    }
}

// =============================================================================
// MOUNT
// =============================================================================

/// Mount a carousel on a track host.
///
/// Returns synchronously with a live handle. When autoplay is enabled
/// the configured strategy starts immediately; a marquee injects its
/// keyframes here. The host is exclusively owned by the returned
/// carousel until destroy/drop.
pub fn mount_carousel<H: TrackHost>(host: H, options: CarouselOptions) -> MountOutcome<H> {
    if host.slide_count() == 0 {
        return MountOutcome::Skipped {
            host: Some(host),
            reason: SkipReason::NoSlides,
        };
    }

    let pause = PauseAggregator::new(PausePolicy::from(&options.autoplay));
    let mut carousel = Carousel {
        host,
        config: options,
        pause,
        driver: AutoplayDriver::Disabled,
        drag: DragController::default(),
        phase: signal(Phase::Idle),
        destroyed: false,
    };
    carousel.start_autoplay();
    MountOutcome::Mounted(carousel)
}

/// Mount against an optionally-resolved track (e.g. a selector lookup
/// that may have matched nothing).
pub fn mount_optional<H: TrackHost>(
    host: Option<H>,
    options: CarouselOptions,
) -> MountOutcome<H> {
    match host {
        Some(host) => mount_carousel(host, options),
        None => MountOutcome::Skipped {
            host: None,
            reason: SkipReason::MissingTarget,
        },
    }
}

// =============================================================================
// CAROUSEL
// =============================================================================

/// Live carousel handle. Owns the track host exclusively.
pub struct Carousel<H: TrackHost> {
    host: H,
    config: CarouselOptions,
    pause: PauseAggregator,
    driver: AutoplayDriver,
    drag: DragController,
    phase: Signal<Phase>,
    destroyed: bool,
}

impl<H: TrackHost> Carousel<H> {
    // --- Introspection -------------------------------------------------

    /// The track host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host (rendering, external geometry
    /// updates). The engine's invariants live in the driver, not in the
    /// host, so this is safe to hand out.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The configuration snapshot captured at mount.
    pub fn config(&self) -> &CarouselOptions {
        &self.config
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// Reactive handle on the lifecycle phase.
    pub fn phase_signal(&self) -> Signal<Phase> {
        self.phase.clone()
    }

    /// Current raw pause flags.
    pub fn pause_flags(&self) -> PauseFlags {
        self.pause.flags()
    }

    /// Whether an autoplay strategy is still live (false when disabled
    /// by configuration or degraded by degenerate geometry).
    pub fn autoplay_active(&self) -> bool {
        !self.driver.is_disabled()
    }

    /// Cycle distance and duration (seconds) of the live marquee
    /// animation, if that strategy is active.
    pub fn marquee_timing(&self) -> Option<(f32, f32)> {
        match &self.driver {
            AutoplayDriver::Marquee(marquee) => Some((marquee.distance, marquee.duration_secs)),
            _ => None,
        }
    }

    /// Index of the slide nearest the visible center.
    pub fn current_index(&self) -> usize {
        geometry::nearest_slide(
            self.host.scroll_offset(),
            self.host.client_width(),
            &self.all_bounds(),
        )
    }

    // --- Navigation ----------------------------------------------------

    /// Advance one slide; wraps to 0 only when looping, else clamps.
    pub fn next(&mut self) {
        if self.destroyed {
            return;
        }
        let count = self.host.slide_count();
        if count == 0 {
            return;
        }
        let current = self.current_index();
        if current + 1 < count {
            self.go_to(current + 1);
        } else if self.config.looping {
            self.go_to(0);
        }
    }

    /// Go back one slide; wraps to the last only when looping.
    pub fn prev(&mut self) {
        if self.destroyed {
            return;
        }
        let count = self.host.slide_count();
        if count == 0 {
            return;
        }
        let current = self.current_index();
        if current > 0 {
            self.go_to(current - 1);
        } else if self.config.looping {
            self.go_to(count - 1);
        }
    }

    /// Smooth-scroll so the slide's left edge aligns with the track's
    /// scroll position. Out-of-range indices clamp.
    pub fn go_to(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        let count = self.host.slide_count();
        if count == 0 {
            return;
        }
        let index = geometry::clamp_index(index as isize, count);
        if let Some(bounds) = self.host.slide_bounds(index) {
            self.host.scroll_to(bounds.left, true);
        }
    }

    // --- Event routing -------------------------------------------------

    /// Route one environment event. Returns true when the event was
    /// consumed (the embedder should then prevent default handling).
    pub fn dispatch(&mut self, event: CarouselEvent) -> bool {
        if self.destroyed {
            return false;
        }
        match event {
            CarouselEvent::Pointer(pointer) => self.dispatch_pointer(pointer),
            CarouselEvent::Key(key) => self.dispatch_key(key),
            CarouselEvent::VisibilityChanged { hidden } => {
                self.signal(PauseFlags::HIDDEN, hidden);
                false
            }
            CarouselEvent::IntersectionChanged { in_view } => {
                self.signal(PauseFlags::OUT_OF_VIEW, !in_view);
                false
            }
            CarouselEvent::Resized => {
                self.refresh();
                false
            }
        }
    }

    fn dispatch_pointer(&mut self, pointer: PointerEvent) -> bool {
        match pointer.phase {
            PointerPhase::Enter => {
                self.signal(PauseFlags::HOVERING, true);
            }
            PointerPhase::Down => {
                if self.config.draggable {
                    self.drag.begin(&mut self.host, &pointer);
                    self.signal(PauseFlags::DRAGGING, true);
                }
            }
            PointerPhase::Move => {
                self.drag.update(&mut self.host, pointer.x);
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                self.end_drag();
            }
            PointerPhase::Leave => {
                self.end_drag();
                self.signal(PauseFlags::HOVERING, false);
            }
        }
        false
    }

    fn dispatch_key(&mut self, key: NavKey) -> bool {
        if !self.config.keyboard || !self.host.focus_within() {
            return false;
        }
        match key {
            NavKey::ArrowRight => self.next(),
            NavKey::ArrowLeft => self.prev(),
        }
        true
    }

    fn end_drag(&mut self) {
        self.drag.end(&mut self.host);
        self.signal(PauseFlags::DRAGGING, false);
    }

    /// Toggle a pause signal and forward any effective transition to
    /// the active strategy.
    fn signal(&mut self, flag: PauseFlags, on: bool) {
        if let Some(running) = self.pause.set(flag, on) {
            self.apply_transition(running);
        }
    }

    fn apply_transition(&mut self, running: bool) {
        if let AutoplayDriver::Marquee(_) = self.driver {
            // Play-state toggles preserve position; the handle stays live.
            self.host.set_play_state(if running {
                PlayState::Running
            } else {
                PlayState::Paused
            });
        }
        if matches!(self.phase.get(), Phase::Running | Phase::Paused) {
            self.phase
                .set(if running { Phase::Running } else { Phase::Paused });
        }
    }

    // --- Clock ---------------------------------------------------------

    /// Drive the step/continuous clocks. `now_ms` is any monotonic
    /// millisecond timestamp chosen by the embedder. Marquee mode needs
    /// no per-tick work; the host's declarative animation carries it.
    pub fn tick(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }

        let due = match &mut self.driver {
            AutoplayDriver::Step(step) => step.due_ticks(now_ms),
            _ => 0,
        };
        for _ in 0..due {
            // The cadence keeps ticking while paused; a paused period is
            // a no-op, so resume never bursts.
            if self.pause.should_run() {
                self.next();
            }
        }

        let frame = match &mut self.driver {
            AutoplayDriver::Continuous(continuous) => continuous
                .delta_secs(now_ms)
                .map(|dt| (dt, continuous.speed())),
            _ => None,
        };
        if let Some((dt, speed)) = frame {
            if self.pause.should_run() {
                self.advance_continuous(dt, speed);
            }
        }
    }

    /// Tick at ~60fps against the wall clock for the given duration.
    /// Convenience for real-time embedding; tests drive `tick` directly.
    pub fn run_for(&mut self, duration: Duration) {
        let epoch = Instant::now();
        while epoch.elapsed() < duration && !self.destroyed {
            self.tick(epoch.elapsed().as_millis() as u64);
            thread::sleep(Duration::from_millis(16));
        }
    }

    fn advance_continuous(&mut self, dt: f32, speed: f32) {
        let max = self.host.scroll_width() - self.host.client_width();
        match geometry::continuous_advance(self.host.scroll_offset(), speed, dt, max) {
            Some(next) => self.host.set_scroll_offset(next),
            None => {
                warn!("continuous autoplay disabled: degenerate scroll extent");
                self.driver = AutoplayDriver::Disabled;
            }
        }
    }

    // --- Autoplay startup ----------------------------------------------

    fn start_autoplay(&mut self) {
        if !self.config.autoplay.enabled {
            return;
        }
        match self.config.autoplay.mode {
            AutoplayMode::Step => {
                self.driver = AutoplayDriver::Step(StepDriver::new(self.config.autoplay.interval_ms));
            }
            AutoplayMode::Continuous => {
                self.driver =
                    AutoplayDriver::Continuous(ContinuousDriver::new(self.config.autoplay.speed));
            }
            AutoplayMode::Marquee => {
                self.start_marquee();
            }
        }
        if !self.driver.is_disabled() {
            self.phase.set(if self.pause.should_run() {
                Phase::Running
            } else {
                Phase::Paused
            });
        }
    }

    /// Build (or rebuild) the declarative marquee animation.
    ///
    /// Content is assumed pre-duplicated for a seamless loop, but the
    /// original block is defensively cloned until the track is at least
    /// twice the viewport wide. Progress survives a rebuild: the live
    /// transform offset is folded into a negative animation delay.
    fn start_marquee(&mut self) {
        let client = self.host.client_width();
        let mut rounds = 0;
        while client > 0.0
            && self.host.scroll_width() < 2.0 * client
            && rounds < MAX_DUPLICATION_ROUNDS
        {
            if self.host.duplicate_slides() == 0 {
                break;
            }
            rounds += 1;
        }

        let widths: Vec<f32> = (0..self.host.original_slide_count())
            .filter_map(|i| self.host.slide_bounds(i))
            .map(|bounds| bounds.width)
            .collect();
        let distance = geometry::marquee_cycle_distance(&widths, self.host.slide_gap());
        if distance <= 0.0 {
            warn!("marquee autoplay disabled: zero cycle distance");
            self.driver = AutoplayDriver::Disabled;
            return;
        }

        let duration = geometry::marquee_duration(distance, self.config.autoplay.speed);
        let delay = geometry::marquee_resume_delay(self.host.transform_offset(), distance, duration);
        let name = format!(
            "ui-marquee-{}",
            NEXT_MARQUEE_ID.fetch_add(1, Ordering::Relaxed)
        );

        match self.host.inject_keyframes(&name, distance) {
            Ok(style) => {
                self.host.set_animation(&name, duration, -delay);
                if !self.pause.should_run() {
                    self.host.set_play_state(PlayState::Paused);
                }
                debug!("marquee started: distance={distance} duration={duration}s");
                self.driver = AutoplayDriver::Marquee(MarqueeDriver {
                    style: Some(style),
                    name,
                    distance,
                    duration_secs: duration,
                });
            }
            Err(err) => {
                warn!("marquee autoplay disabled: {err}");
                self.driver = AutoplayDriver::Disabled;
            }
        }
    }

    /// React to changed track geometry. A live marquee is rebuilt in
    /// place (progress preserved); a continuous clock reseeds so the
    /// next frame cannot observe a stale delta.
    pub fn refresh(&mut self) {
        if self.destroyed {
            return;
        }
        if matches!(self.driver, AutoplayDriver::Marquee(_)) {
            let style = match &mut self.driver {
                AutoplayDriver::Marquee(marquee) => marquee.style.take(),
                _ => None,
            };
            if let Some(handle) = style {
                self.host.remove_style(handle);
            }
            // The old animation stays applied until the replacement
            // lands, so the transform read sees the live position.
            self.start_marquee();
        } else if let AutoplayDriver::Continuous(continuous) = &mut self.driver {
            continuous.restart();
        }
    }

    // --- Teardown ------------------------------------------------------

    /// Tear down every derived resource exactly once. A second call is
    /// a safe no-op. The destroyed flag is set before anything else so
    /// no handler can re-arm a timer or style mid-teardown.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        let driver = std::mem::replace(&mut self.driver, AutoplayDriver::Disabled);
        if let AutoplayDriver::Marquee(mut marquee) = driver {
            if let Some(style) = marquee.style.take() {
                self.host.remove_style(style);
            }
            self.host.clear_animation();
            debug!("marquee {} removed", marquee.name);
        }
        self.drag.end(&mut self.host);
        self.phase.set(Phase::Destroyed);
        debug!("carousel destroyed");
    }

    fn all_bounds(&self) -> Vec<SlideBounds> {
        (0..self.host.slide_count())
            .filter_map(|i| self.host.slide_bounds(i))
            .collect()
    }
}

impl<H: TrackHost> Drop for Carousel<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryTrack;
    use crate::types::AutoplayOptions;

    fn snap_track() -> MemoryTrack {
        MemoryTrack::new(&[100.0, 100.0, 100.0], 0.0, 100.0)
    }

    fn mount(host: MemoryTrack, options: CarouselOptions) -> Carousel<MemoryTrack> {
        mount_carousel(host, options).mounted().expect("mounted")
    }

    fn step_options() -> CarouselOptions {
        CarouselOptions {
            autoplay: AutoplayOptions {
                enabled: true,
                interval_ms: 1000,
                mode: AutoplayMode::Step,
                ..AutoplayOptions::default()
            },
            ..CarouselOptions::interactive()
        }
    }

    // --- Mounting ------------------------------------------------------

    #[test]
    fn test_mount_skips_empty_track() {
        let outcome = mount_carousel(MemoryTrack::new(&[], 0.0, 100.0), CarouselOptions::default());
        assert_eq!(outcome.skip_reason(), Some(&SkipReason::NoSlides));
        match outcome {
            MountOutcome::Skipped { host, .. } => assert!(host.is_some()),
            MountOutcome::Mounted(_) => panic!("expected skip"),
        }
    }

    #[test]
    fn test_mount_optional_missing_target() {
        let outcome = mount_optional::<MemoryTrack>(None, CarouselOptions::default());
        assert_eq!(outcome.skip_reason(), Some(&SkipReason::MissingTarget));
    }

    #[test]
    fn test_idle_without_autoplay() {
        let carousel = mount(snap_track(), CarouselOptions::interactive());
        assert_eq!(carousel.phase(), Phase::Idle);
        assert!(!carousel.autoplay_active());
    }

    // --- Navigation ----------------------------------------------------

    #[test]
    fn test_next_clamps_without_loop() {
        let mut carousel = mount(snap_track(), CarouselOptions::interactive());
        carousel.go_to(2);
        assert_eq!(carousel.current_index(), 2);
        carousel.next();
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_next_wraps_with_loop() {
        let mut carousel = mount(
            snap_track(),
            CarouselOptions {
                looping: true,
                ..CarouselOptions::interactive()
            },
        );
        carousel.go_to(2);
        carousel.next();
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_prev_boundaries() {
        let mut carousel = mount(snap_track(), CarouselOptions::interactive());
        carousel.prev();
        assert_eq!(carousel.current_index(), 0);

        let mut looping = mount(
            snap_track(),
            CarouselOptions {
                looping: true,
                ..CarouselOptions::interactive()
            },
        );
        looping.prev();
        assert_eq!(looping.current_index(), 2);
    }

    #[test]
    fn test_go_to_clamps_index() {
        let mut carousel = mount(snap_track(), CarouselOptions::interactive());
        carousel.go_to(99);
        assert_eq!(carousel.current_index(), 2);
    }

    // --- Keyboard ------------------------------------------------------

    #[test]
    fn test_keyboard_requires_focus_within() {
        let mut carousel = mount(snap_track(), CarouselOptions::interactive());
        assert!(!carousel.dispatch(CarouselEvent::Key(NavKey::ArrowRight)));
        assert_eq!(carousel.current_index(), 0);

        carousel.host_mut().set_focus_within(true);
        assert!(carousel.dispatch(CarouselEvent::Key(NavKey::ArrowRight)));
        assert_eq!(carousel.current_index(), 1);
        assert!(carousel.dispatch(CarouselEvent::Key(NavKey::ArrowLeft)));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_keyboard_disabled_by_config() {
        let mut host = snap_track();
        host.set_focus_within(true);
        let mut carousel = mount(
            host,
            CarouselOptions {
                keyboard: false,
                ..CarouselOptions::interactive()
            },
        );
        assert!(!carousel.dispatch(CarouselEvent::Key(NavKey::ArrowRight)));
        assert_eq!(carousel.current_index(), 0);
    }

    // --- Step autoplay -------------------------------------------------

    #[test]
    fn test_step_advances_then_stops_on_destroy() {
        let mut carousel = mount(snap_track(), step_options());
        assert_eq!(carousel.phase(), Phase::Running);

        carousel.tick(0); // seeds the cadence
        carousel.tick(1000);
        assert_eq!(carousel.current_index(), 1);

        carousel.destroy();
        carousel.tick(2000);
        carousel.tick(3000);
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.phase(), Phase::Destroyed);
    }

    #[test]
    fn test_step_pauses_on_hover_without_burst() {
        let mut carousel = mount(snap_track(), step_options());
        carousel.tick(0);

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Enter,
            0,
            0.0,
        )));
        assert_eq!(carousel.phase(), Phase::Paused);

        // Three periods elapse while hovered: all no-ops
        carousel.tick(3000);
        assert_eq!(carousel.current_index(), 0);

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Leave,
            0,
            0.0,
        )));
        assert_eq!(carousel.phase(), Phase::Running);

        // Exactly one advance per period after resume, no catch-up
        carousel.tick(4000);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_phase_signal_tracks_transitions() {
        let mut carousel = mount(snap_track(), step_options());
        let phase = carousel.phase_signal();
        assert_eq!(phase.get(), Phase::Running);

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Enter,
            0,
            0.0,
        )));
        assert_eq!(phase.get(), Phase::Paused);

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Leave,
            0,
            0.0,
        )));
        assert_eq!(phase.get(), Phase::Running);

        carousel.destroy();
        assert_eq!(phase.get(), Phase::Destroyed);
    }

    #[test]
    fn test_step_pauses_while_hidden() {
        let mut carousel = mount(snap_track(), step_options());
        carousel.tick(0);
        carousel.dispatch(CarouselEvent::VisibilityChanged { hidden: true });
        carousel.tick(1000);
        assert_eq!(carousel.current_index(), 0);
        carousel.dispatch(CarouselEvent::VisibilityChanged { hidden: false });
        carousel.tick(2000);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_out_of_view_pauses_even_without_pause_options() {
        let mut options = step_options();
        options.autoplay.pause_on_hover = false;
        options.autoplay.pause_on_visibility = false;
        let mut carousel = mount(snap_track(), options);

        carousel.tick(0);
        carousel.dispatch(CarouselEvent::IntersectionChanged { in_view: false });
        carousel.tick(1000);
        assert_eq!(carousel.current_index(), 0);
        carousel.dispatch(CarouselEvent::IntersectionChanged { in_view: true });
        carousel.tick(2000);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_step_wraps_when_looping() {
        let mut options = step_options();
        options.looping = true;
        let mut carousel = mount(snap_track(), options);
        carousel.tick(0);
        carousel.tick(1000);
        carousel.tick(2000);
        assert_eq!(carousel.current_index(), 2);
        carousel.tick(3000);
        assert_eq!(carousel.current_index(), 0);
    }

    // --- Continuous autoplay -------------------------------------------

    fn continuous_options(speed: f32) -> CarouselOptions {
        CarouselOptions {
            autoplay: AutoplayOptions {
                enabled: true,
                mode: AutoplayMode::Continuous,
                speed,
                ..AutoplayOptions::default()
            },
            ..CarouselOptions::interactive()
        }
    }

    #[test]
    fn test_continuous_wraps_and_stays_in_range() {
        // content 150, viewport 100 -> extent 50
        let host = MemoryTrack::new(&[50.0, 50.0, 50.0], 0.0, 100.0);
        let mut carousel = mount(host, continuous_options(100.0));

        carousel.tick(0); // seed, no advance
        assert_eq!(carousel.host().scroll_offset(), 0.0);

        let mut wrapped = false;
        let mut prev = 0.0;
        for frame in 1..=40 {
            carousel.tick(frame * 16);
            let offset = carousel.host().scroll_offset();
            if offset < prev {
                wrapped = true;
            }
            assert!(offset >= 0.0 && offset < 50.0);
            prev = offset;
        }
        assert!(wrapped);
    }

    #[test]
    fn test_continuous_degenerate_extent_disables() {
        // viewport wider than content
        let host = MemoryTrack::new(&[50.0], 0.0, 500.0);
        let mut carousel = mount(host, continuous_options(100.0));
        assert!(carousel.autoplay_active());

        carousel.tick(0);
        carousel.tick(16);
        assert!(!carousel.autoplay_active());
        assert_eq!(carousel.host().scroll_offset(), 0.0);
    }

    #[test]
    fn test_continuous_holds_position_while_paused() {
        let host = MemoryTrack::new(&[50.0, 50.0, 50.0], 0.0, 100.0);
        let mut carousel = mount(host, continuous_options(100.0));
        carousel.tick(0);
        carousel.tick(100);
        let before = carousel.host().scroll_offset();

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Enter,
            0,
            0.0,
        )));
        // Clock keeps consuming deltas while paused
        carousel.tick(5000);
        assert_eq!(carousel.host().scroll_offset(), before);

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Leave,
            0,
            0.0,
        )));
        // Resume advances only by the post-resume delta, no jump
        carousel.tick(5016);
        let after = carousel.host().scroll_offset();
        assert!((after - (before + 1.6)).abs() < 0.01);
    }

    // --- Marquee autoplay ----------------------------------------------

    fn marquee_options(speed: f32) -> CarouselOptions {
        CarouselOptions {
            autoplay: AutoplayOptions {
                enabled: true,
                mode: AutoplayMode::Marquee,
                speed,
                ..AutoplayOptions::default()
            },
            ..CarouselOptions::interactive()
        }
    }

    #[test]
    fn test_marquee_duration_from_cycle_distance() {
        // One 800px block, no gap, viewport 400 -> distance 800,
        // duration max(6, 800/40) = 20s
        let host = MemoryTrack::new(&[400.0, 400.0], 0.0, 400.0);
        let carousel = mount(host, marquee_options(40.0));

        let animation = carousel.host().animation().expect("animation set");
        assert!((animation.duration_secs - 20.0).abs() < 0.001);
        assert_eq!(animation.delay_secs, -0.0);
        assert!(animation.name.starts_with("ui-marquee-"));

        let styles = carousel.host().injected_styles();
        assert_eq!(styles.len(), 1);
        assert!((styles[0].distance - 800.0).abs() < 0.001);
        assert!(!styles[0].removed);

        let (distance, duration) = carousel.marquee_timing().expect("marquee live");
        assert!((distance - 800.0).abs() < 0.001);
        assert!((duration - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_marquee_clones_until_overflow() {
        // One 50px slide, viewport 100: duplicated until >= 200
        let host = MemoryTrack::new(&[50.0], 0.0, 100.0);
        let carousel = mount(host, marquee_options(40.0));
        assert_eq!(carousel.host().slide_count(), 4);
        // Cycle distance still covers only the unduplicated block
        let styles = carousel.host().injected_styles();
        assert!((styles[0].distance - 50.0).abs() < 0.001);
        // Short cycle floors at 6 seconds
        let animation = carousel.host().animation().unwrap();
        assert!((animation.duration_secs - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_marquee_pre_duplicated_cycles_one_block() {
        // One 400px block mounted twice for a seamless loop: the cycle
        // covers the block, not the doubled track, so the wrap lands on
        // the identical second copy with no blank viewport.
        let host = MemoryTrack::with_original_block(&[400.0, 400.0], 1, 0.0, 400.0);
        let carousel = mount(host, marquee_options(40.0));

        // Already twice the viewport wide; nothing gets cloned
        assert_eq!(carousel.host().slide_count(), 2);

        let styles = carousel.host().injected_styles();
        assert!((styles[0].distance - 400.0).abs() < 0.001);

        // duration = max(6, 400/40) = 10s
        let animation = carousel.host().animation().expect("animation set");
        assert!((animation.duration_secs - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_marquee_pause_toggles_play_state() {
        let host = MemoryTrack::new(&[400.0, 400.0], 0.0, 400.0);
        let mut carousel = mount(host, marquee_options(40.0));
        assert_eq!(carousel.host().play_state(), PlayState::Running);

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Enter,
            0,
            0.0,
        )));
        assert_eq!(carousel.host().play_state(), PlayState::Paused);
        assert_eq!(carousel.phase(), Phase::Paused);
        // The handle stays live; pausing never removes the animation
        assert!(carousel.host().animation().is_some());

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Leave,
            0,
            0.0,
        )));
        assert_eq!(carousel.host().play_state(), PlayState::Running);
    }

    #[test]
    fn test_marquee_rebuild_preserves_progress() {
        let host = MemoryTrack::new(&[400.0, 400.0], 0.0, 400.0);
        let mut carousel = mount(host, marquee_options(40.0));

        // Halfway through the 800px cycle when the resize lands
        carousel.host_mut().set_transform_offset(400.0);
        carousel.dispatch(CarouselEvent::Resized);

        let styles = carousel.host().injected_styles();
        assert_eq!(styles.len(), 2);
        assert!(styles[0].removed);
        assert!(!styles[1].removed);

        // New animation resumes at half progress: -10s of a 20s cycle
        let animation = carousel.host().animation().unwrap();
        assert!((animation.delay_secs + 10.0).abs() < 0.001);
    }

    #[test]
    fn test_marquee_zero_distance_disables() {
        let host = MemoryTrack::new(&[0.0, 0.0], 0.0, 100.0);
        let carousel = mount(host, marquee_options(40.0));
        assert!(!carousel.autoplay_active());
        assert!(carousel.host().animation().is_none());
    }

    #[test]
    fn test_marquee_destroy_releases_styles() {
        let host = MemoryTrack::new(&[400.0, 400.0], 0.0, 400.0);
        let mut carousel = mount(host, marquee_options(40.0));
        carousel.destroy();

        assert!(carousel.host().injected_styles()[0].removed);
        assert!(carousel.host().animation().is_none());
        assert_eq!(carousel.phase(), Phase::Destroyed);
    }

    // --- Drag integration ----------------------------------------------

    #[test]
    fn test_drag_moves_track_and_flags() {
        let mut carousel = mount(snap_track(), CarouselOptions::interactive());
        carousel.go_to(1);
        assert_eq!(carousel.host().scroll_offset(), 100.0);

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Down,
            1,
            200.0,
        )));
        assert!(carousel.pause_flags().contains(PauseFlags::DRAGGING));

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Move,
            1,
            160.0,
        )));
        assert_eq!(carousel.host().scroll_offset(), 140.0);

        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Up,
            1,
            160.0,
        )));
        assert!(!carousel.pause_flags().contains(PauseFlags::DRAGGING));
        assert!(!carousel.host().drag_styling());
    }

    #[test]
    fn test_drag_disabled_by_config() {
        let mut carousel = mount(
            snap_track(),
            CarouselOptions {
                draggable: false,
                ..CarouselOptions::interactive()
            },
        );
        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Down,
            1,
            200.0,
        )));
        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Move,
            1,
            100.0,
        )));
        assert_eq!(carousel.host().scroll_offset(), 0.0);
    }

    // --- Destroy -------------------------------------------------------

    #[test]
    fn test_destroy_is_idempotent() {
        let mut carousel = mount(snap_track(), step_options());
        carousel.destroy();
        let styles_after_first = carousel.host().injected_styles().len();
        carousel.destroy();
        assert_eq!(carousel.host().injected_styles().len(), styles_after_first);
        assert_eq!(carousel.phase(), Phase::Destroyed);
    }

    #[test]
    fn test_destroyed_carousel_ignores_everything() {
        let mut carousel = mount(snap_track(), CarouselOptions::interactive());
        carousel.host_mut().set_focus_within(true);
        carousel.destroy();

        carousel.next();
        carousel.go_to(2);
        assert!(!carousel.dispatch(CarouselEvent::Key(NavKey::ArrowRight)));
        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Down,
            1,
            100.0,
        )));
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.host().drag_styling());
    }

    #[test]
    fn test_destroy_mid_drag_releases_capture() {
        let mut carousel = mount(snap_track(), CarouselOptions::interactive());
        carousel.dispatch(CarouselEvent::Pointer(PointerEvent::new(
            PointerPhase::Down,
            7,
            100.0,
        )));
        assert_eq!(carousel.host().captured_pointer(), Some(7));
        carousel.destroy();
        assert_eq!(carousel.host().captured_pointer(), None);
        assert!(!carousel.host().drag_styling());
    }
}
