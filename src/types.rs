//! Core types - Configuration snapshot and shared enums
//!
//! The configuration is captured once at mount and never mutated;
//! re-mounting is the only way to change it.

// =============================================================================
// NAVIGATION
// =============================================================================

/// Navigation style for discrete slide movement.
///
/// Reserved for future styles; only snap-to-slide behavior is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationStyle {
    /// Snap the target slide's left edge to the track's scroll position.
    #[default]
    Snap,
}

// =============================================================================
// AUTOPLAY
// =============================================================================

/// Which autoplay strategy drives the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayMode {
    /// Advance one discrete slide per timer period.
    #[default]
    Step,
    /// Scroll smoothly at a constant pixel rate, per-frame.
    Continuous,
    /// Declarative keyframe loop; no per-frame engine work.
    Marquee,
}

/// Autoplay descriptor, part of the immutable configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayOptions {
    /// Master switch for any autoplay strategy.
    pub enabled: bool,
    /// Step-mode period in milliseconds. The step driver floors this
    /// at 1000ms regardless of the configured value.
    pub interval_ms: u64,
    /// Strategy selected once at mount.
    pub mode: AutoplayMode,
    /// Pixels per second for continuous and marquee modes.
    pub speed: f32,
    /// Whether hovering the track suspends autoplay.
    pub pause_on_hover: bool,
    /// Whether a hidden document suspends autoplay.
    pub pause_on_visibility: bool,
}

impl Default for AutoplayOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 3000,
            mode: AutoplayMode::Step,
            speed: 40.0,
            pause_on_hover: true,
            pause_on_visibility: true,
        }
    }
}

impl AutoplayOptions {
    /// Autoplay enabled with defaults for everything else.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

// =============================================================================
// CAROUSEL OPTIONS
// =============================================================================

/// Immutable configuration snapshot captured at mount.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarouselOptions {
    /// Navigation style (only `Snap` exists today).
    pub style: NavigationStyle,
    /// Wrap around at boundaries for next/prev/step-autoplay.
    pub looping: bool,
    /// Arrow-key navigation while focus is within the track.
    pub keyboard: bool,
    /// Pointer drag-to-scroll.
    pub draggable: bool,
    /// Autoplay descriptor.
    pub autoplay: AutoplayOptions,
}

impl CarouselOptions {
    /// Defaults matching an interactive carousel: keyboard and drag
    /// enabled, no loop, no autoplay.
    pub fn interactive() -> Self {
        Self {
            keyboard: true,
            draggable: true,
            ..Self::default()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autoplay_defaults() {
        let a = AutoplayOptions::default();
        assert!(!a.enabled);
        assert_eq!(a.interval_ms, 3000);
        assert_eq!(a.mode, AutoplayMode::Step);
        assert_eq!(a.speed, 40.0);
        assert!(a.pause_on_hover);
        assert!(a.pause_on_visibility);
    }

    #[test]
    fn test_enabled_shorthand() {
        let a = AutoplayOptions::enabled();
        assert!(a.enabled);
        assert_eq!(a.interval_ms, 3000);
        assert_eq!(a.mode, AutoplayMode::Step);
    }

    #[test]
    fn test_interactive_defaults() {
        let o = CarouselOptions::interactive();
        assert!(o.keyboard);
        assert!(o.draggable);
        assert!(!o.looping);
        assert!(!o.autoplay.enabled);
        assert_eq!(o.style, NavigationStyle::Snap);
    }
}
