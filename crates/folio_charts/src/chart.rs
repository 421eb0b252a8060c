use std::sync::{Arc, Mutex};

use folio_i18n::Catalogs;

use crate::animation::ChartAnimation;
use crate::axis::ValueTick;
use crate::interaction::{ChartKey, Interaction};
use crate::mapper::PixelPoint;
use crate::options::ChartOptions;
use crate::render::RenderedChart;

/// Derived geometry of one render pass, for debugging and tooling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inspection {
    /// One entry per drawn series (bars: one point per bar top).
    pub series: Vec<Vec<PixelPoint>>,
    pub ticks: Vec<ValueTick>,
    /// SVG path data of each line path, in draw order.
    pub paths: Vec<String>,
}

/// Common surface of every chart kind.
///
/// Models are plain state; hosts keep them behind a [`ChartHandle`] and drive
/// them with pointer, keyboard and frame events.
pub trait ChartModel: Send + 'static {
    fn kind(&self) -> &'static str;
    fn options(&self) -> &ChartOptions;
    fn options_mut(&mut self) -> &mut ChartOptions;
    fn interaction(&self) -> &Interaction;
    fn interaction_mut(&mut self) -> &mut Interaction;
    fn animation(&self) -> &ChartAnimation;
    fn animation_mut(&mut self) -> &mut ChartAnimation;

    /// Record paint commands for the current state.
    fn render(&self, catalogs: &Catalogs) -> RenderedChart;

    fn inspect(&self) -> Inspection;

    fn on_pointer_move(&mut self, x: f32) {
        let area = self.options().area();
        self.interaction_mut().pointer_move(x, &area);
    }

    fn on_pointer_leave(&mut self) {
        self.interaction_mut().pointer_leave();
    }

    fn on_key(&mut self, key: ChartKey) {
        self.interaction_mut().key(key);
    }

    fn on_blur(&mut self) {
        self.interaction_mut().blur();
    }

    /// New container size (responsive layout). Non-finite sizes are ignored.
    fn resize(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        let opts = self.options_mut();
        opts.width = width.max(0.0);
        opts.height = height.max(0.0);
    }
}

/// Shared handle for a chart model.
#[derive(Clone)]
pub struct ChartHandle(pub Arc<Mutex<dyn ChartModel>>);

impl ChartHandle {
    pub fn new<M: ChartModel>(model: M) -> Self {
        Self(Arc::new(Mutex::new(model)))
    }

    /// Run `f` with the model locked. `None` if the lock is poisoned.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn ChartModel) -> R) -> Option<R> {
        match self.0.lock() {
            Ok(mut guard) => Some(f(&mut *guard)),
            Err(_) => {
                tracing::debug!("chart model lock poisoned");
                None
            }
        }
    }
}

impl std::fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ChartHandle").finish()
    }
}
