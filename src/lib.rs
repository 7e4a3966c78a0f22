//! # ui-carousel
//!
//! Reactive carousel/marquee engine with pluggable track hosts.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! observable pause and lifecycle state.
//!
//! ## Architecture
//!
//! The engine is split along one seam: everything environment-specific
//! (geometry queries, scrolling, pointer capture, stylesheet injection)
//! lives behind the [`host::TrackHost`] trait, while the carousel facade
//! owns policy - pause aggregation, the autoplay strategy, drag, and the
//! lifecycle state machine.
//!
//! ```text
//! embedder events → Carousel::dispatch → PauseAggregator ─┐
//! embedder clock  → Carousel::tick     → AutoplayDriver ──┼→ TrackHost
//!                                        DragController ──┘
//! ```
//!
//! Mounting is explicit: [`carousel::mount_carousel`] inspects the host
//! and returns a typed [`carousel::MountOutcome`] instead of silently
//! doing nothing on an empty track.
//!
//! ## Modules
//!
//! - [`types`] - Configuration (navigation style, autoplay options)
//! - [`geometry`] - Pure slide/offset math shared by every strategy
//! - [`host`] - The track contract plus memory and terminal hosts
//! - [`pause`] - Pause-signal aggregation
//! - [`autoplay`] - Step / continuous / marquee timing drivers
//! - [`gesture`] - Pointer and keyboard event types, drag controller
//! - [`carousel`] - The facade and its lifecycle state machine

pub mod autoplay;
pub mod carousel;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod pause;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use carousel::{
    mount_carousel, mount_optional, Carousel, CarouselEvent, MountOutcome, Phase, SkipReason,
};

pub use host::{
    HostError, MemoryTrack, PlayState, StyleHandle, TerminalSlide, TerminalTrack, TrackHost,
};

pub use pause::{PauseAggregator, PauseFlags, PausePolicy};

pub use gesture::{DragController, NavKey, PointerEvent, PointerPhase};

pub use geometry::{clamp_index, nearest_slide, SlideBounds};
