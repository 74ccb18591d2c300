// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Frame: keyed coalescing of work to animation frames and delays.
//!
//! Pointer-move streams arrive much faster than frames render. The rest of
//! the engine never hand-rolls "do this at most once per frame" or "wait for
//! the event burst to settle"; both patterns live here as one scheduler:
//!
//! - [`FrameScheduler::schedule_frame`]: run a callback on the next frame
//!   tick. Scheduling again under the same key before the tick replaces the
//!   pending callback (latest wins), so a burst of pointer moves costs one
//!   recomputation.
//! - [`FrameScheduler::schedule_debounced`]: run a callback once a fixed
//!   delay has elapsed without the key being rescheduled. Used for external
//!   drag-and-drop interop events, which fire at high frequency without
//!   frame coupling.
//!
//! The scheduler is host-driven and carries no clock of its own: the host
//! calls [`FrameScheduler::run_frame`] from its frame loop and
//! [`FrameScheduler::poll`] with its current monotonic time in milliseconds.
//! This keeps the crate `no_std` and the controllers testable without a real
//! event loop.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use trellis_frame::FrameScheduler;
//!
//! let mut frames: FrameScheduler<&str> = FrameScheduler::new();
//! let hits = Rc::new(Cell::new(0));
//!
//! let h = hits.clone();
//! frames.schedule_frame("hit-test", move || h.set(h.get() + 1));
//! let h = hits.clone();
//! frames.schedule_frame("hit-test", move || h.set(h.get() + 1)); // replaces the first
//!
//! frames.run_frame();
//! assert_eq!(hits.get(), 1);
//! ```
//!
//! [`FrameScheduler::run_frame`] detaches the pending queue before running
//! it, and a callback cannot re-enter the scheduler it runs on (the host
//! holds it exclusively for the tick). A callback with follow-up work parks
//! it on the side and schedules it once `run_frame` returns; either way it
//! runs no earlier than the next frame. One frame's failure never cancels
//! future frames: each tick recomputes from current state rather than
//! applying deltas.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

type Callback = Box<dyn FnOnce()>;

/// Keyed scheduler coalescing callbacks to frame ticks or fixed delays.
///
/// Keys only need equality, so callers can use ids, small enums, or tuples
/// without hashing constraints.
pub struct FrameScheduler<K> {
    frame: Vec<(K, Callback)>,
    delayed: Vec<(K, Callback, f64)>,
}

impl<K> fmt::Debug for FrameScheduler<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending_frame", &self.frame.len())
            .field("pending_delayed", &self.delayed.len())
            .finish()
    }
}

impl<K> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FrameScheduler<K> {
    /// Creates an empty scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame: Vec::new(),
            delayed: Vec::new(),
        }
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.frame.is_empty() && self.delayed.is_empty()
    }

    /// Runs all callbacks pending for this frame, in scheduling order.
    ///
    /// Returns the number of callbacks run. The pending queue is detached
    /// first, so work scheduled once this returns waits for the next call.
    pub fn run_frame(&mut self) -> usize {
        let pending = core::mem::take(&mut self.frame);
        let count = pending.len();
        for (_, callback) in pending {
            callback();
        }
        count
    }

    /// Runs all delayed callbacks whose deadline has passed.
    ///
    /// `now_ms` is the host's monotonic clock in milliseconds; it must not go
    /// backwards between calls. Returns the number of callbacks run.
    pub fn poll(&mut self, now_ms: f64) -> usize {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.delayed.len() {
            if self.delayed[i].2 <= now_ms {
                let (_, callback, _) = self.delayed.remove(i);
                due.push(callback);
            } else {
                i += 1;
            }
        }
        let count = due.len();
        for callback in due {
            callback();
        }
        count
    }

    /// Drops all pending work without running it.
    pub fn cancel_all(&mut self) {
        self.frame.clear();
        self.delayed.clear();
    }
}

impl<K: PartialEq> FrameScheduler<K> {
    /// Schedules `callback` for the next frame tick.
    ///
    /// If the key is already pending for this frame, the new callback
    /// replaces the old one (latest wins).
    pub fn schedule_frame(&mut self, key: K, callback: impl FnOnce() + 'static) {
        let boxed: Callback = Box::new(callback);
        if let Some(slot) = self.frame.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = boxed;
        } else {
            self.frame.push((key, boxed));
        }
    }

    /// Schedules `callback` to run once `delay_ms` elapses without the key
    /// being rescheduled (trailing-edge debounce).
    ///
    /// Rescheduling an already-pending key replaces its callback *and*
    /// restarts its delay.
    pub fn schedule_debounced(
        &mut self,
        key: K,
        callback: impl FnOnce() + 'static,
        delay_ms: f64,
        now_ms: f64,
    ) {
        let deadline = now_ms + delay_ms.max(0.0);
        let boxed: Callback = Box::new(callback);
        if let Some(slot) = self.delayed.iter_mut().find(|(k, _, _)| *k == key) {
            slot.1 = boxed;
            slot.2 = deadline;
        } else {
            self.delayed.push((key, boxed, deadline));
        }
    }

    /// Cancels pending work (frame and delayed) for one key.
    pub fn cancel(&mut self, key: &K) {
        self.frame.retain(|(k, _)| k != key);
        self.delayed.retain(|(k, _, _)| k != key);
    }
}
