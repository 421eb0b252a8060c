//! Entrance animation: path reveal, area fade and staggered markers.

use folio_animation::{Easing, Timeline, TimelineEntryId};

use crate::options::ChartOptions;

pub const REVEAL_MS: f64 = 900.0;
pub const AREA_FADE_MS: f64 = 600.0;
pub const AREA_FADE_DELAY_MS: f64 = 300.0;
pub const MARKER_MS: f64 = 250.0;
pub const MARKER_STAGGER_MS: f64 = 60.0;
pub const DEFAULT_REVEAL_EASING: Easing = Easing::EaseInOutCubic;

/// Sampled animation values for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationFrame {
    /// Visible share of the line path, `0.0..=1.0`.
    pub reveal: f32,
    pub area_opacity: f32,
    markers: Vec<f32>,
}

impl AnimationFrame {
    pub fn complete() -> Self {
        Self {
            reveal: 1.0,
            area_opacity: 1.0,
            markers: Vec::new(),
        }
    }

    /// Progress of marker `index`; markers without an entry are fully shown.
    pub fn marker(&self, index: usize) -> f32 {
        self.markers.get(index).copied().unwrap_or(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.reveal >= 1.0 && self.area_opacity >= 1.0 && self.markers.iter().all(|m| *m >= 1.0)
    }
}

/// Timeline for one chart's entrance. Disabled animations start finished.
pub struct ChartAnimation {
    timeline: Timeline,
    reveal: TimelineEntryId,
    area: TimelineEntryId,
    markers: Vec<TimelineEntryId>,
    enabled: bool,
}

impl ChartAnimation {
    pub fn new(marker_count: usize, enabled: bool, reveal_easing: Easing) -> Self {
        let mut timeline = Timeline::new();
        let reveal = timeline.add(0.0, REVEAL_MS, reveal_easing);
        let area = timeline.add(AREA_FADE_DELAY_MS, AREA_FADE_MS, Easing::EaseOutCubic);
        let markers = (0..marker_count)
            .map(|i| timeline.add(i as f64 * MARKER_STAGGER_MS, MARKER_MS, Easing::EaseOutQuad))
            .collect();
        if !enabled {
            timeline.finish();
        }
        Self {
            timeline,
            reveal,
            area,
            markers,
            enabled,
        }
    }

    pub fn for_options(marker_count: usize, options: &ChartOptions) -> Self {
        Self::new(marker_count, options.animate, options.easing)
    }

    /// Fresh animation for new data. Once the entrance has been played the
    /// replacement starts finished, so a data update never replays it.
    pub fn rebuilt(&self, marker_count: usize, options: &ChartOptions) -> Self {
        let mut next = Self::for_options(marker_count, options);
        if self.is_started() {
            next.finish();
        }
        next
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start playing at `now_ms`. Only the first call has an effect.
    pub fn start(&mut self, now_ms: f64) {
        if !self.enabled || self.timeline.is_started() {
            return;
        }
        self.timeline.start(now_ms);
        tracing::trace!(now_ms, duration_ms = self.timeline.duration_ms(), "chart animation started");
    }

    pub fn tick(&mut self, now_ms: f64) {
        self.timeline.tick(now_ms);
    }

    /// Jump to the final state (static output, reduced motion).
    pub fn finish(&mut self) {
        self.timeline.finish();
    }

    pub fn is_started(&self) -> bool {
        self.timeline.is_started()
    }

    pub fn is_playing(&self) -> bool {
        self.timeline.is_playing()
    }

    pub fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }

    pub fn frame(&self) -> AnimationFrame {
        if self.timeline.is_finished() {
            return AnimationFrame::complete();
        }
        let value = |id| self.timeline.value(id).unwrap_or(1.0);
        AnimationFrame {
            reveal: value(self.reveal),
            area_opacity: value(self.area),
            markers: self.markers.iter().map(|id| value(*id)).collect(),
        }
    }
}

impl std::fmt::Debug for ChartAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartAnimation")
            .field("enabled", &self.enabled)
            .field("markers", &self.markers.len())
            .field("started", &self.timeline.is_started())
            .field("finished", &self.timeline.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_animation_is_complete_immediately() {
        let a = ChartAnimation::new(3, false, DEFAULT_REVEAL_EASING);
        assert!(a.is_finished());
        assert!(a.frame().is_complete());
    }

    #[test]
    fn nothing_is_visible_before_start() {
        let a = ChartAnimation::new(2, true, DEFAULT_REVEAL_EASING);
        let f = a.frame();
        assert_eq!(f.reveal, 0.0);
        assert_eq!(f.marker(0), 0.0);
        assert!(!a.is_playing());
    }

    #[test]
    fn reveal_progresses_with_frames() {
        let mut a = ChartAnimation::new(3, true, DEFAULT_REVEAL_EASING);
        a.start(1_000.0);
        a.tick(1_000.0 + REVEAL_MS / 2.0);
        let mid = a.frame();
        assert!(mid.reveal > 0.0 && mid.reveal < 1.0);
        assert_eq!(mid.marker(0), 1.0);
        assert!(a.is_playing());

        a.tick(10_000.0);
        assert!(a.frame().is_complete());
        assert!(a.is_finished());
    }

    #[test]
    fn reveal_follows_configured_easing() {
        let mut a = ChartAnimation::new(0, true, Easing::Linear);
        a.start(0.0);
        a.tick(REVEAL_MS / 4.0);
        assert!((a.frame().reveal - 0.25).abs() < 1e-4);
    }

    #[test]
    fn rebuilt_after_start_does_not_replay() {
        let options = ChartOptions::new("c");
        let fresh = ChartAnimation::for_options(2, &options);
        assert!(!fresh.rebuilt(3, &options).is_finished());

        let mut played = ChartAnimation::for_options(2, &options);
        played.start(0.0);
        assert!(played.rebuilt(3, &options).is_finished());
    }

    #[test]
    fn start_is_once() {
        let mut a = ChartAnimation::new(1, true, DEFAULT_REVEAL_EASING);
        a.start(0.0);
        a.tick(REVEAL_MS);
        a.start(REVEAL_MS);
        assert_eq!(a.frame().reveal, 1.0);
    }
}
