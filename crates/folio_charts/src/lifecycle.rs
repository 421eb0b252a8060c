//! Mount lifecycle
//!
//! A mounted chart holds subscriptions to the host's visibility and resize
//! observers plus any frame callbacks it scheduled. [`ChartMount::dispose`]
//! releases all of them; after that, late notifications and frames are no-ops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use folio_animation::{FrameId, FrameOwner, FrameScheduler};
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::chart::{ChartHandle, ChartModel};

new_key_type! {
    pub struct ObserverId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObserverKind {
    Visibility,
    Resize,
}

/// Notification delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObserverEvent {
    Visibility(bool),
    Resize { width: f32, height: f32 },
}

impl ObserverEvent {
    pub fn kind(&self) -> ObserverKind {
        match self {
            Self::Visibility(_) => ObserverKind::Visibility,
            Self::Resize { .. } => ObserverKind::Resize,
        }
    }
}

type ObserverCallback = Box<dyn FnMut(ObserverEvent) + Send>;

struct ObserverEntry {
    kind: ObserverKind,
    callback: ObserverCallback,
}

type Observers = Mutex<SlotMap<ObserverId, ObserverEntry>>;

/// Host-side registry of visibility and resize observers.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    inner: Arc<Observers>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `kind`. Dropping the returned
    /// subscription detaches it.
    pub fn observe<F>(&self, kind: ObserverKind, callback: F) -> Subscription
    where
        F: FnMut(ObserverEvent) + Send + 'static,
    {
        let id = match self.inner.lock() {
            Ok(mut observers) => Some(observers.insert(ObserverEntry {
                kind,
                callback: Box::new(callback),
            })),
            Err(_) => {
                debug!("observer registry poisoned; subscription inert");
                None
            }
        };
        Subscription {
            registry: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver `event` to every matching observer. Returns how many ran.
    ///
    /// Callbacks must not call back into the registry.
    pub fn notify(&self, event: ObserverEvent) -> usize {
        let Ok(mut observers) = self.inner.lock() else {
            return 0;
        };
        let kind = event.kind();
        let mut delivered = 0;
        for (_, entry) in observers.iter_mut().filter(|(_, e)| e.kind == kind) {
            (entry.callback)(event);
            delivered += 1;
        }
        delivered
    }

    pub fn observer_count(&self) -> usize {
        self.inner.lock().map(|o| o.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// An attached observer. Detached on [`dispose`](Self::dispose) or drop.
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<Observers>,
    id: Option<ObserverId>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Detach the observer. Idempotent.
    pub fn dispose(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut observers) = registry.lock() {
                observers.remove(id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Flags shared between a mount and the callbacks it hands out.
#[derive(Debug, Default)]
struct MountFlags {
    alive: AtomicBool,
    /// Set once, the first time the chart is reported visible.
    revealed: AtomicBool,
}

/// Scoped resources of one mounted chart.
pub struct ChartMount {
    handle: ChartHandle,
    owner: FrameOwner,
    flags: Arc<MountFlags>,
    subscriptions: Vec<Subscription>,
    pending: Option<FrameId>,
}

impl ChartMount {
    /// Attach `handle` to the host's observers.
    pub fn mount(handle: ChartHandle, registry: &ObserverRegistry, scheduler: &mut FrameScheduler) -> Self {
        let flags = Arc::new(MountFlags {
            alive: AtomicBool::new(true),
            revealed: AtomicBool::new(false),
        });

        let visibility = {
            let flags = Arc::clone(&flags);
            registry.observe(ObserverKind::Visibility, move |event| {
                if let ObserverEvent::Visibility(true) = event {
                    if flags.alive.load(Ordering::Acquire) {
                        flags.revealed.store(true, Ordering::Release);
                    }
                }
            })
        };

        let resize = {
            let flags = Arc::clone(&flags);
            let model = Arc::downgrade(&handle.0);
            registry.observe(ObserverKind::Resize, move |event| {
                let ObserverEvent::Resize { width, height } = event else {
                    return;
                };
                if !flags.alive.load(Ordering::Acquire) {
                    return;
                }
                with_model(&model, |m| {
                    if m.options().responsive {
                        m.resize(width, height);
                    }
                });
            })
        };

        let owner = scheduler.new_owner();
        debug!(owner = owner.0, "chart mounted");
        Self {
            handle,
            owner,
            flags,
            subscriptions: vec![visibility, resize],
            pending: None,
        }
    }

    pub fn handle(&self) -> &ChartHandle {
        &self.handle
    }

    pub fn owner(&self) -> FrameOwner {
        self.owner
    }

    pub fn is_alive(&self) -> bool {
        self.flags.alive.load(Ordering::Acquire)
    }

    /// Whether the chart has been reported visible at least once.
    pub fn is_revealed(&self) -> bool {
        self.flags.revealed.load(Ordering::Acquire)
    }

    /// Request the next animation frame if the chart still needs one.
    ///
    /// Hosts call this after delivering notifications and after each frame.
    /// The first frame after the chart became visible starts the reveal; later
    /// frames advance it until it finishes.
    pub fn schedule_next_frame(&mut self, scheduler: &mut FrameScheduler) -> Option<FrameId> {
        if !self.is_alive() || !self.is_revealed() {
            return None;
        }
        if let Some(id) = self.pending.filter(|id| scheduler.is_pending(*id)) {
            return Some(id);
        }
        let needs_frame = self
            .handle
            .with(|m| {
                let animation = m.animation();
                animation.is_enabled() && !animation.is_finished()
            })
            .unwrap_or(false);
        if !needs_frame {
            self.pending = None;
            return None;
        }

        let flags = Arc::clone(&self.flags);
        let model = Arc::downgrade(&self.handle.0);
        let id = scheduler.request_frame(self.owner, move |now_ms| {
            if !flags.alive.load(Ordering::Acquire) {
                return;
            }
            with_model(&model, |m| {
                let animation = m.animation_mut();
                if animation.is_started() {
                    animation.tick(now_ms);
                } else {
                    animation.start(now_ms);
                }
            });
        });
        trace!(owner = self.owner.0, "chart frame requested");
        self.pending = Some(id);
        Some(id)
    }

    /// Detach observers and cancel every pending frame. Idempotent.
    pub fn dispose(&mut self, scheduler: &mut FrameScheduler) {
        let cancelled = scheduler.cancel_owner(self.owner);
        self.release();
        debug!(owner = self.owner.0, cancelled, "chart disposed");
    }

    fn release(&mut self) {
        self.flags.alive.store(false, Ordering::Release);
        self.pending = None;
        for subscription in &mut self.subscriptions {
            subscription.dispose();
        }
        self.subscriptions.clear();
    }
}

impl Drop for ChartMount {
    fn drop(&mut self) {
        // Frames still queued see the cleared flag and do nothing.
        self.release();
    }
}

impl std::fmt::Debug for ChartMount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartMount")
            .field("owner", &self.owner)
            .field("alive", &self.is_alive())
            .field("revealed", &self.is_revealed())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

fn with_model(model: &Weak<Mutex<dyn ChartModel>>, f: impl FnOnce(&mut dyn ChartModel)) {
    let Some(model) = model.upgrade() else {
        return;
    };
    match model.lock() {
        Ok(mut guard) => f(&mut *guard),
        Err(_) => debug!("chart model lock poisoned"),
    };
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::DataPoint;
    use crate::line::LineChartModel;
    use crate::options::ChartOptions;

    fn handle(animate: bool) -> ChartHandle {
        let points = vec![DataPoint::new("a", 1.0), DataPoint::new("b", 3.0)];
        ChartHandle::new(LineChartModel::new(points, ChartOptions::new("c").with_animation(animate)))
    }

    fn started(handle: &ChartHandle) -> bool {
        handle.with(|m| m.animation().is_started()).unwrap_or(false)
    }

    #[test]
    fn no_frames_before_visible() {
        let registry = ObserverRegistry::new();
        let mut scheduler = FrameScheduler::new();
        let mut mount = ChartMount::mount(handle(true), &registry, &mut scheduler);
        assert_eq!(registry.observer_count(), 2);
        assert_eq!(mount.schedule_next_frame(&mut scheduler), None);
        registry.notify(ObserverEvent::Visibility(false));
        assert_eq!(mount.schedule_next_frame(&mut scheduler), None);
    }

    #[test]
    fn reveal_runs_to_completion() {
        let registry = ObserverRegistry::new();
        let mut scheduler = FrameScheduler::new();
        let h = handle(true);
        let mut mount = ChartMount::mount(h.clone(), &registry, &mut scheduler);

        registry.notify(ObserverEvent::Visibility(true));
        let first = mount.schedule_next_frame(&mut scheduler);
        assert!(first.is_some());
        // Repeated requests reuse the pending frame.
        assert_eq!(mount.schedule_next_frame(&mut scheduler), first);
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.run_frame(100.0);
        assert!(started(&h));
        assert!(mount.schedule_next_frame(&mut scheduler).is_some());
        scheduler.run_frame(100.0 + 10_000.0);
        assert!(h.with(|m| m.animation().is_finished()).unwrap_or(false));
        assert_eq!(mount.schedule_next_frame(&mut scheduler), None);
    }

    #[test]
    fn visibility_is_once() {
        let registry = ObserverRegistry::new();
        let mut scheduler = FrameScheduler::new();
        let mount = ChartMount::mount(handle(true), &registry, &mut scheduler);
        registry.notify(ObserverEvent::Visibility(true));
        registry.notify(ObserverEvent::Visibility(false));
        assert!(mount.is_revealed());
    }

    #[test]
    fn disabled_animation_needs_no_frames() {
        let registry = ObserverRegistry::new();
        let mut scheduler = FrameScheduler::new();
        let mut mount = ChartMount::mount(handle(false), &registry, &mut scheduler);
        registry.notify(ObserverEvent::Visibility(true));
        assert_eq!(mount.schedule_next_frame(&mut scheduler), None);
    }

    #[test]
    fn resize_updates_responsive_model() {
        let registry = ObserverRegistry::new();
        let mut scheduler = FrameScheduler::new();
        let h = handle(true);
        let _mount = ChartMount::mount(h.clone(), &registry, &mut scheduler);
        registry.notify(ObserverEvent::Resize {
            width: 320.0,
            height: 180.0,
        });
        assert_eq!(h.with(|m| m.options().width), Some(320.0));
    }

    #[test]
    fn subscription_detaches_once() {
        let registry = ObserverRegistry::new();
        let mut sub = registry.observe(ObserverKind::Visibility, |_| {});
        assert!(sub.is_active());
        assert_eq!(registry.observer_count(), 1);
        sub.dispose();
        sub.dispose();
        assert!(!sub.is_active());
        assert_eq!(registry.observer_count(), 0);
    }

    #[test]
    fn dispose_cancels_frames_and_ignores_late_events() {
        let registry = ObserverRegistry::new();
        let mut scheduler = FrameScheduler::new();
        let h = handle(true);
        let mut mount = ChartMount::mount(h.clone(), &registry, &mut scheduler);
        registry.notify(ObserverEvent::Visibility(true));
        mount.schedule_next_frame(&mut scheduler);
        assert_eq!(scheduler.pending_count(), 1);

        mount.dispose(&mut scheduler);
        assert!(!mount.is_alive());
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(registry.observer_count(), 0);
        assert_eq!(
            registry.notify(ObserverEvent::Resize {
                width: 100.0,
                height: 50.0
            }),
            0
        );
        assert_eq!(h.with(|m| m.options().width), Some(560.0));
        assert_eq!(mount.schedule_next_frame(&mut scheduler), None);
        assert!(!started(&h));
    }

    #[test]
    fn dropped_mount_leaves_queued_frames_inert() {
        let registry = ObserverRegistry::new();
        let mut scheduler = FrameScheduler::new();
        let h = handle(true);
        let mut mount = ChartMount::mount(h.clone(), &registry, &mut scheduler);
        registry.notify(ObserverEvent::Visibility(true));
        mount.schedule_next_frame(&mut scheduler);
        drop(mount);

        assert_eq!(registry.observer_count(), 0);
        scheduler.run_frame(16.0);
        assert!(!started(&h));
    }
}
