//! Hover and keyboard selection.
//!
//! Hit testing inverts the x mapping of [`crate::mapper`]; the selection state
//! machine never touches chart data, so it is safe to drive from any event.

use crate::mapper::slot_scale;
use crate::view::DrawingArea;

/// What produced the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverSource {
    Pointer,
    Keyboard,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering { index: usize, source: HoverSource },
}

impl HoverState {
    pub fn index(&self) -> Option<usize> {
        match *self {
            HoverState::Idle => None,
            HoverState::Hovering { index, .. } => Some(index),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Keys the chart reacts to while focused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKey {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Escape,
}

impl ChartKey {
    /// Parse a DOM-style key name (`"ArrowRight"`, `"Home"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "Escape" | "Esc" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Nearest slot to `pointer_x`, clamped to `[0, slot_count - 1]`.
///
/// There is no distance cutoff: any x over the surface selects a slot.
pub fn index_at(pointer_x: f32, area: &DrawingArea, slot_count: usize) -> Option<usize> {
    if slot_count == 0 || !pointer_x.is_finite() {
        return None;
    }
    let Some(scale) = slot_scale(area, slot_count) else {
        return Some(0);
    };
    let raw = scale.invert(pointer_x).round();
    Some(raw.clamp(0.0, (slot_count - 1) as f32) as usize)
}

/// Selection state for one chart instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
    state: HoverState,
    slot_count: usize,
}

impl Interaction {
    pub fn new(slot_count: usize) -> Self {
        Self {
            state: HoverState::Idle,
            slot_count,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.index()
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Update the number of selectable slots after a data change. A selection
    /// past the new end is clamped; no slots means idle.
    pub fn set_slot_count(&mut self, slot_count: usize) {
        self.slot_count = slot_count;
        if let HoverState::Hovering { index, source } = self.state {
            self.state = match slot_count {
                0 => HoverState::Idle,
                n => HoverState::Hovering {
                    index: index.min(n - 1),
                    source,
                },
            };
        }
    }

    /// Select `index` (clamped). Idempotent.
    pub fn select(&mut self, index: usize, source: HoverSource) {
        if self.slot_count == 0 {
            self.state = HoverState::Idle;
            return;
        }
        self.state = HoverState::Hovering {
            index: index.min(self.slot_count - 1),
            source,
        };
    }

    /// Pointer over a slot-based chart.
    pub fn pointer_move(&mut self, pointer_x: f32, area: &DrawingArea) {
        match index_at(pointer_x, area, self.slot_count) {
            Some(index) => self.select(index, HoverSource::Pointer),
            None => self.state = HoverState::Idle,
        }
    }

    /// Pointer over a chart with its own hit test (bands); `None` is a miss.
    pub fn pointer_over(&mut self, index: Option<usize>) {
        match index {
            Some(index) => self.select(index, HoverSource::Pointer),
            None => self.pointer_leave(),
        }
    }

    /// Pointer left the surface. Keyboard selection persists.
    pub fn pointer_leave(&mut self) {
        if let HoverState::Hovering {
            source: HoverSource::Pointer,
            ..
        } = self.state
        {
            self.state = HoverState::Idle;
        }
    }

    pub fn step(&mut self, step: Step) {
        if self.slot_count == 0 {
            self.state = HoverState::Idle;
            return;
        }
        let last = self.slot_count - 1;
        let index = match (self.state.index(), step) {
            (None, Step::Next) => 0,
            (None, Step::Previous) => last,
            (Some(i), Step::Next) => (i + 1).min(last),
            (Some(i), Step::Previous) => i.saturating_sub(1),
        };
        self.select(index, HoverSource::Keyboard);
    }

    pub fn key(&mut self, key: ChartKey) {
        match key {
            ChartKey::ArrowRight => self.step(Step::Next),
            ChartKey::ArrowLeft => self.step(Step::Previous),
            ChartKey::Home => self.select(0, HoverSource::Keyboard),
            ChartKey::End => self.select(self.slot_count.saturating_sub(1), HoverSource::Keyboard),
            ChartKey::Escape => self.state = HoverState::Idle,
        }
    }

    /// Focus left the chart.
    pub fn blur(&mut self) {
        self.state = HoverState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Padding;

    fn area() -> DrawingArea {
        DrawingArea::new(560.0, 220.0, Padding::default())
    }

    #[test]
    fn hit_test_rounds_to_nearest_slot() {
        assert_eq!(index_at(52.0, &area(), 3), Some(0));
        assert_eq!(index_at(170.0, &area(), 3), Some(0));
        assert_eq!(index_at(180.0, &area(), 3), Some(1));
        assert_eq!(index_at(536.0, &area(), 3), Some(2));
    }

    #[test]
    fn hit_test_clamps_outside_plot() {
        assert_eq!(index_at(-1_000.0, &area(), 3), Some(0));
        assert_eq!(index_at(10_000.0, &area(), 3), Some(2));
        assert_eq!(index_at(100.0, &area(), 1), Some(0));
        assert_eq!(index_at(100.0, &area(), 0), None);
    }

    #[test]
    fn next_from_idle_starts_at_zero_and_saturates() {
        let mut i = Interaction::new(2);
        i.step(Step::Next);
        assert_eq!(i.selected(), Some(0));
        i.step(Step::Next);
        i.step(Step::Next);
        assert_eq!(i.selected(), Some(1));
    }

    #[test]
    fn previous_from_idle_starts_at_end() {
        let mut i = Interaction::new(4);
        i.step(Step::Previous);
        assert_eq!(i.selected(), Some(3));
        for _ in 0..10 {
            i.step(Step::Previous);
        }
        assert_eq!(i.selected(), Some(0));
    }

    #[test]
    fn pointer_leave_keeps_keyboard_focus() {
        let mut i = Interaction::new(3);
        i.key(ChartKey::ArrowRight);
        i.pointer_leave();
        assert_eq!(
            i.state(),
            HoverState::Hovering {
                index: 0,
                source: HoverSource::Keyboard
            }
        );

        i.pointer_move(536.0, &area());
        assert_eq!(i.selected(), Some(2));
        i.pointer_leave();
        assert_eq!(i.state(), HoverState::Idle);
    }

    #[test]
    fn home_end_escape_and_blur() {
        let mut i = Interaction::new(5);
        i.key(ChartKey::End);
        assert_eq!(i.selected(), Some(4));
        i.key(ChartKey::Home);
        assert_eq!(i.selected(), Some(0));
        i.key(ChartKey::Escape);
        assert_eq!(i.state(), HoverState::Idle);
        i.key(ChartKey::ArrowLeft);
        i.blur();
        assert_eq!(i.state(), HoverState::Idle);
    }

    #[test]
    fn empty_chart_stays_idle() {
        let mut i = Interaction::new(0);
        i.step(Step::Next);
        i.key(ChartKey::End);
        i.pointer_move(200.0, &area());
        assert_eq!(i.state(), HoverState::Idle);
    }

    #[test]
    fn shrinking_data_clamps_selection() {
        let mut i = Interaction::new(5);
        i.select(4, HoverSource::Keyboard);
        i.set_slot_count(2);
        assert_eq!(i.selected(), Some(1));
        i.set_slot_count(0);
        assert_eq!(i.state(), HoverState::Idle);
    }

    #[test]
    fn key_names_parse() {
        assert_eq!(ChartKey::from_name("ArrowRight"), Some(ChartKey::ArrowRight));
        assert_eq!(ChartKey::from_name("Esc"), Some(ChartKey::Escape));
        assert_eq!(ChartKey::from_name("Tab"), None);
    }
}
