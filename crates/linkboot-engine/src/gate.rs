//! Callback dispatch gate.
//!
//! Closing the gate from another thread waits for an in-flight callback to
//! return; once `close` returns no callback can start. Closing from inside a
//! callback only flips the flag, since waiting there would deadlock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

#[derive(Debug, Default)]
pub(crate) struct Gate {
    closed: AtomicBool,
    dispatch: Mutex<()>,
    dispatching: Mutex<Option<ThreadId>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the dispatching thread even if the callback unwinds.
struct Dispatching<'a>(&'a Mutex<Option<ThreadId>>);

impl<'a> Dispatching<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>) -> Self {
        *lock(slot) = Some(thread::current().id());
        Self(slot)
    }
}

impl Drop for Dispatching<'_> {
    fn drop(&mut self) {
        *lock(self.0) = None;
    }
}

impl Gate {
    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Runs `f` unless the gate is closed. Returns whether it ran.
    pub(crate) fn dispatch(&self, f: impl FnOnce()) -> bool {
        let _guard = lock(&self.dispatch);
        if self.is_closed() {
            return false;
        }
        let _dispatching = Dispatching::enter(&self.dispatching);
        f();
        true
    }

    /// Runs `f` as the last callback ever, closing the gate first.
    pub(crate) fn dispatch_final(&self, f: impl FnOnce()) -> bool {
        let _guard = lock(&self.dispatch);
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        let _dispatching = Dispatching::enter(&self.dispatching);
        f();
        true
    }

    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        if *lock(&self.dispatching) == Some(thread::current().id()) {
            return;
        }
        drop(lock(&self.dispatch));
    }
}
