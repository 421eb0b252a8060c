//! Animation state and timeline orchestration
//!
//! Times are absolute milliseconds from the host's frame clock. Nothing here
//! reads a clock itself, so every frame is reproducible from its timestamp.

use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;

/// One animation: starts at `start_ms`, runs for `duration_ms`, shaped by `easing`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl AnimationState {
    pub fn new(start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            start_ms,
            duration_ms: duration_ms.max(0.0),
            easing,
        }
    }

    /// Eased progress in 0.0..=1.0 at `now_ms`.
    ///
    /// Before the start this is 0.0; a zero duration jumps straight to 1.0.
    pub fn progress(&self, now_ms: f64) -> f32 {
        let local = now_ms - self.start_ms;
        if local < 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 || local >= self.duration_ms {
            return 1.0;
        }
        self.easing.apply((local / self.duration_ms) as f32)
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.end_ms()
    }
}

new_key_type! {
    pub struct TimelineEntryId;
}

/// An entry in a timeline
struct TimelineEntry {
    /// Offset in milliseconds from timeline start
    offset_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

/// A timeline that orchestrates multiple animations (e.g. a path reveal
/// followed by staggered point fade-ins).
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    started_at: Option<f64>,
    current_ms: f64,
    duration_ms: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            started_at: None,
            current_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    /// Add an animation to the timeline at a given offset
    pub fn add(&mut self, offset_ms: f64, duration_ms: f64, easing: Easing) -> TimelineEntryId {
        let offset_ms = offset_ms.max(0.0);
        let duration_ms = duration_ms.max(0.0);
        let id = self.entries.insert(TimelineEntry {
            offset_ms,
            duration_ms,
            easing,
        });
        self.duration_ms = self.duration_ms.max(offset_ms + duration_ms);
        id
    }

    /// Total length of the timeline.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn start(&mut self, now_ms: f64) {
        self.started_at = Some(now_ms);
        self.current_ms = 0.0;
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Jump to the end state (used when animation is disabled).
    pub fn finish(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(0.0);
        }
        self.current_ms = self.duration_ms;
    }

    /// Advance to the frame at `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        let Some(start) = self.started_at else {
            return;
        };
        self.current_ms = (now_ms - start).clamp(0.0, self.duration_ms);
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some() && self.current_ms < self.duration_ms
    }

    pub fn is_finished(&self) -> bool {
        self.started_at.is_some() && self.current_ms >= self.duration_ms
    }

    /// Eased progress of an entry at the current frame, in 0.0..=1.0.
    pub fn value(&self, id: TimelineEntryId) -> Option<f32> {
        let entry = self.entries.get(id)?;
        if self.started_at.is_none() {
            return Some(0.0);
        }
        let state = AnimationState::new(entry.offset_ms, entry.duration_ms, entry.easing);
        Some(state.progress(self.current_ms))
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_progress_is_clamped_and_eased() {
        let s = AnimationState::new(100.0, 200.0, Easing::Linear);
        assert_eq!(s.progress(50.0), 0.0);
        assert!((s.progress(200.0) - 0.5).abs() < 1e-6);
        assert_eq!(s.progress(400.0), 1.0);
        assert!(s.is_finished(300.0));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let s = AnimationState::new(0.0, 0.0, Easing::EaseOutCubic);
        assert_eq!(s.progress(0.0), 1.0);
    }

    #[test]
    fn staggered_entries_progress_independently() {
        let mut tl = Timeline::new();
        let a = tl.add(0.0, 100.0, Easing::Linear);
        let b = tl.add(100.0, 100.0, Easing::Linear);
        assert_eq!(tl.duration_ms(), 200.0);

        assert_eq!(tl.value(a), Some(0.0));
        tl.start(1_000.0);
        tl.tick(1_050.0);
        assert!((tl.value(a).unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(tl.value(b), Some(0.0));
        assert!(tl.is_playing());

        tl.tick(1_500.0);
        assert_eq!(tl.value(a), Some(1.0));
        assert_eq!(tl.value(b), Some(1.0));
        assert!(tl.is_finished());
    }

    #[test]
    fn finish_jumps_to_end_without_start() {
        let mut tl = Timeline::new();
        let a = tl.add(50.0, 100.0, Easing::EaseOutCubic);
        tl.finish();
        assert_eq!(tl.value(a), Some(1.0));
    }
}
