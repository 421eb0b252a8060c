//! Folio Animation System
//!
//! Explicit, framework-independent animation state for document graphics.
//!
//! # Features
//!
//! - **Easing**: standard curves plus CSS-style cubic beziers
//! - **Animation state**: `start + duration + easing`, sampled at frame times
//! - **Timelines**: orchestrate staggered entries with offsets
//! - **Frame scheduler**: per-owner frame callbacks that can be cancelled on teardown

pub mod easing;
pub mod scheduler;
pub mod timeline;

pub use easing::Easing;
pub use scheduler::{FrameId, FrameOwner, FrameScheduler};
pub use timeline::{AnimationState, Timeline, TimelineEntryId};
