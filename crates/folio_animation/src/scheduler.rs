//! Frame scheduler
//!
//! Hosts request a callback for the next frame; each request is tagged with the
//! owner that made it so the owner can cancel everything it scheduled when it
//! is torn down.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct FrameId;
}

/// Identifies the component that requested a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameOwner(pub u64);

type FrameCallback = Box<dyn FnOnce(f64)>;

struct PendingFrame {
    owner: FrameOwner,
    callback: FrameCallback,
}

/// Pending frame callbacks, run once per `run_frame`.
pub struct FrameScheduler {
    pending: SlotMap<FrameId, PendingFrame>,
    next_owner: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            pending: SlotMap::with_key(),
            next_owner: 1,
        }
    }

    /// Allocate a fresh owner tag.
    pub fn new_owner(&mut self) -> FrameOwner {
        let owner = FrameOwner(self.next_owner);
        self.next_owner += 1;
        owner
    }

    /// Schedule `callback` for the next frame. It receives the frame time in ms.
    pub fn request_frame<F>(&mut self, owner: FrameOwner, callback: F) -> FrameId
    where
        F: FnOnce(f64) + 'static,
    {
        self.pending.insert(PendingFrame {
            owner,
            callback: Box::new(callback),
        })
    }

    /// Cancel one pending frame. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, id: FrameId) -> bool {
        self.pending.remove(id).is_some()
    }

    /// Cancel every pending frame of `owner`; returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: FrameOwner) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, f| f.owner != owner);
        let dropped = before - self.pending.len();
        if dropped > 0 {
            tracing::trace!(owner = owner.0, dropped, "cancelled pending frames");
        }
        dropped
    }

    pub fn is_pending(&self, id: FrameId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Run every callback pending at the start of this frame.
    ///
    /// Returns the number of callbacks that ran.
    pub fn run_frame(&mut self, now_ms: f64) -> usize {
        let due: Vec<FrameId> = self.pending.keys().collect();
        let mut ran = 0;
        for id in due {
            if let Some(frame) = self.pending.remove(id) {
                (frame.callback)(now_ms);
                ran += 1;
            }
        }
        ran
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn frames_run_once_with_frame_time() {
        let mut s = FrameScheduler::new();
        let owner = s.new_owner();
        let seen = Rc::new(Cell::new(0.0));
        let seen2 = seen.clone();
        s.request_frame(owner, move |t| seen2.set(t));

        assert_eq!(s.run_frame(16.0), 1);
        assert_eq!(seen.get(), 16.0);
        assert_eq!(s.run_frame(32.0), 0);
    }

    #[test]
    fn cancel_owner_only_drops_that_owner() {
        let mut s = FrameScheduler::new();
        let a = s.new_owner();
        let b = s.new_owner();
        let hits = Rc::new(Cell::new(0));

        for owner in [a, a, b] {
            let hits = hits.clone();
            s.request_frame(owner, move |_| hits.set(hits.get() + 1));
        }
        assert_eq!(s.cancel_owner(a), 2);
        s.run_frame(0.0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cancel_single_frame() {
        let mut s = FrameScheduler::new();
        let owner = s.new_owner();
        let id = s.request_frame(owner, |_| panic!("cancelled frame must not run"));
        assert!(s.is_pending(id));
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert_eq!(s.run_frame(0.0), 0);
    }
}
