//! Pause Module - Pause-state aggregation
//!
//! Single source of truth for "is autoplay currently permitted to run".
//! Independent signals (hover, document visibility, viewport
//! intersection, active drag) toggle individual flags; every toggle
//! recomputes the effective boolean synchronously with the triggering
//! event - the flags are never polled.
//!
//! Any true disabling signal forces a pause: the effective state is the
//! logical AND of negations, not last-write-wins. Recomputation is
//! idempotent, so two signals toggling in the same tick converge to the
//! same final boolean.

use std::cell::Cell;

use bitflags::bitflags;
use spark_signals::{signal, Signal};

use crate::types::AutoplayOptions;

// =============================================================================
// FLAGS
// =============================================================================

bitflags! {
    /// Independently-toggled pause signals.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PauseFlags: u8 {
        /// Pointer is over the track.
        const HOVERING = 1 << 0;
        /// The document / application is hidden.
        const HIDDEN = 1 << 1;
        /// The track is outside the viewport.
        const OUT_OF_VIEW = 1 << 2;
        /// A drag is in progress. Tracked for gesture bookkeeping; does
        /// not gate autoplay (drag competes for the scroll offset, not
        /// for the pause set).
        const DRAGGING = 1 << 3;
    }
}

// =============================================================================
// POLICY
// =============================================================================

/// Which signals count, captured from the autoplay configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PausePolicy {
    pub enabled: bool,
    pub pause_on_hover: bool,
    pub pause_on_visibility: bool,
}

impl From<&AutoplayOptions> for PausePolicy {
    fn from(autoplay: &AutoplayOptions) -> Self {
        Self {
            enabled: autoplay.enabled,
            pause_on_hover: autoplay.pause_on_hover,
            pause_on_visibility: autoplay.pause_on_visibility,
        }
    }
}

// =============================================================================
// AGGREGATOR
// =============================================================================

/// Combines the pause flags into one effective "should run" boolean.
///
/// The flags live in a signal so embedders can observe them reactively;
/// the effective boolean is recomputed eagerly on every transition and
/// cached, never derived lazily.
pub struct PauseAggregator {
    flags: Signal<PauseFlags>,
    policy: PausePolicy,
    effective: Cell<bool>,
}

impl PauseAggregator {
    pub fn new(policy: PausePolicy) -> Self {
        let effective = compute(PauseFlags::empty(), policy);
        Self {
            flags: signal(PauseFlags::empty()),
            policy,
            effective: Cell::new(effective),
        }
    }

    /// Toggle one signal and recompute.
    ///
    /// Returns `Some(running)` when the effective state transitioned,
    /// `None` when it is unchanged (the caller forwards transitions to
    /// the active autoplay strategy).
    pub fn set(&self, flag: PauseFlags, on: bool) -> Option<bool> {
        let mut flags = self.flags.get();
        flags.set(flag, on);
        self.flags.set(flags);

        let next = compute(flags, self.policy);
        if next == self.effective.get() {
            None
        } else {
            self.effective.set(next);
            Some(next)
        }
    }

    /// The cached effective state.
    pub fn should_run(&self) -> bool {
        self.effective.get()
    }

    /// Current raw flags.
    pub fn flags(&self) -> PauseFlags {
        self.flags.get()
    }

    /// Whether a drag is currently flagged.
    pub fn dragging(&self) -> bool {
        self.flags.get().contains(PauseFlags::DRAGGING)
    }
}

/// `should_run` per the aggregation rule. `OUT_OF_VIEW` always counts;
/// hover and visibility count only when configured; `DRAGGING` never
/// gates.
fn compute(flags: PauseFlags, policy: PausePolicy) -> bool {
    policy.enabled
        && !(policy.pause_on_hover && flags.contains(PauseFlags::HOVERING))
        && !(policy.pause_on_visibility && flags.contains(PauseFlags::HIDDEN))
        && !flags.contains(PauseFlags::OUT_OF_VIEW)
}

// =============================================================================
// TESTS
// =============================================================================
