//! Autoplay Module - Three interchangeable strategies
//!
//! The strategy is selected once at mount from the configured mode and
//! never switches at runtime. Exactly one animation handle is live at a
//! time:
//! - Step: a repeating cadence against the embedder-supplied clock.
//! - Continuous: per-tick elapsed-delta scrolling.
//! - Marquee: an injected keyframe stylesheet; pausing toggles
//!   `animation-play-state`, the handle stays live.
//!
//! The drivers own timing state only. Reading geometry and moving the
//! track is done by the facade, which consults the pause aggregator on
//! every due tick.

use crate::host::StyleHandle;

// =============================================================================
// STEP
// =============================================================================

/// Minimum step period. Configured intervals below this are floored.
pub const MIN_STEP_INTERVAL_MS: u64 = 1000;

/// Repeating cadence for step autoplay.
///
/// The cadence keeps ticking while paused; each elapsed period is simply
/// a no-op tick. That avoids drift bookkeeping on resume and guarantees
/// no burst of catch-up advances.
#[derive(Debug)]
pub struct StepDriver {
    period_ms: u64,
    last_fire_ms: Option<u64>,
}

impl StepDriver {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            period_ms: interval_ms.max(MIN_STEP_INTERVAL_MS),
            last_fire_ms: None,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Number of periods that elapsed since the last call.
    ///
    /// The first call seeds the cadence and reports zero. A caller that
    /// ticks regularly sees 0 or 1; after a long gap every elapsed
    /// period is reported once.
    pub fn due_ticks(&mut self, now_ms: u64) -> u32 {
        let last = match self.last_fire_ms {
            Some(last) => last,
            None => {
                self.last_fire_ms = Some(now_ms);
                return 0;
            }
        };

        let mut fired = 0;
        let mut last = last;
        while now_ms.saturating_sub(last) >= self.period_ms {
            last += self.period_ms;
            fired += 1;
        }
        self.last_fire_ms = Some(last);
        fired
    }
}

// =============================================================================
// CONTINUOUS
// =============================================================================

/// Elapsed-delta clock for continuous scrolling.
#[derive(Debug)]
pub struct ContinuousDriver {
    speed: f32,
    last_ts_ms: Option<u64>,
}

impl ContinuousDriver {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            last_ts_ms: None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Elapsed seconds since the previous tick.
    ///
    /// The first tick after (re)start seeds the timestamp and reports
    /// `None` so a stale clock can never produce a huge spurious delta.
    /// The timestamp advances on every tick, paused or not, so resuming
    /// never jumps.
    pub fn delta_secs(&mut self, now_ms: u64) -> Option<f32> {
        match self.last_ts_ms.replace(now_ms) {
            None => None,
            Some(prev) => Some(now_ms.saturating_sub(prev) as f32 / 1000.0),
        }
    }

    /// Forget the previous timestamp; the next tick seeds again.
    pub fn restart(&mut self) {
        self.last_ts_ms = None;
    }
}

// =============================================================================
// MARQUEE
// =============================================================================

/// Live marquee animation: the injected stylesheet plus the parameters
/// needed to rebuild it without a visible jump.
#[derive(Debug)]
pub struct MarqueeDriver {
    pub style: Option<StyleHandle>,
    pub name: String,
    pub distance: f32,
    pub duration_secs: f32,
}

// =============================================================================
// DRIVER
// =============================================================================

/// The one live animation handle for a carousel instance.
///
/// `Disabled` is both "autoplay off" and the degraded end state after a
/// geometry read came back zero or negative.
#[derive(Debug)]
pub enum AutoplayDriver {
    Disabled,
    Step(StepDriver),
    Continuous(ContinuousDriver),
    Marquee(MarqueeDriver),
}

impl AutoplayDriver {
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

// =============================================================================
// TESTS
// =============================================================================
