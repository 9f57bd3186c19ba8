use std::sync::Arc;

use parking_lot::Mutex;

/// Sending half, usable from any thread.
pub struct Producer<T> {
    buf: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
        }
    }
}

impl<T> Producer<T> {
    pub fn send(&self, value: T) {
        self.buf.lock().push(value);
    }
}

/// Receiving half, drained on the UI thread.
pub struct Inbox<T> {
    buf: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Inbox<T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
        }
    }
}

impl<T> Inbox<T> {
    /// Everything sent since the last drain, oldest first.
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.buf.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.buf.lock().is_empty()
    }
}

/// A mutex-guarded buffer for results produced off the UI thread.
///
/// Worker threads never touch state cells directly; they `send` here and the
/// UI thread drains once per tick (see `poll_inbox` in fux-ui).
pub fn handoff<T>() -> (Producer<T>, Inbox<T>) {
    let buf = Arc::new(Mutex::new(Vec::new()));
    (Producer { buf: buf.clone() }, Inbox { buf })
}
