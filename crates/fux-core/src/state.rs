use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::reactive::BuildCx;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity shared by state cells and subscribers.
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Something that wants to hear about state mutations.
pub trait Subscriber {
    fn rebuild(&self);
}

/// Type-erased view of a state cell, kept by whoever recorded a read of it.
pub trait Dependency {
    fn cell_id(&self) -> u64;
    fn unsubscribe(&self, subscriber_id: u64);
}

struct Sub {
    id: u64,
    target: Weak<dyn Subscriber>,
}

struct CellInner<T> {
    id: u64,
    value: RefCell<T>,
    subs: RefCell<SmallVec<[Sub; 4]>>,
}

/// Observable value. Clones share the same value and subscriber list.
pub struct StateCell<T: 'static>(Rc<CellInner<T>>);

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCell")
            .field("id", &self.0.id)
            .field("value", &*self.0.value.borrow())
            .finish()
    }
}

impl<T: 'static> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(CellInner {
            id: next_id(),
            value: RefCell::new(value),
            subs: RefCell::new(SmallVec::new()),
        }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// Untracked read.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }

    /// Tracked read: the build in progress becomes a subscriber.
    pub fn watch(&self, cx: &mut BuildCx) -> T
    where
        T: Clone,
    {
        cx.record(self);
        self.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.value.borrow())
    }

    /// Replaces the value and notifies subscribers, unless `v` equals the
    /// current value.
    pub fn set(&self, v: T)
    where
        T: PartialEq,
    {
        {
            let mut cur = self.0.value.borrow_mut();
            if *cur == v {
                return;
            }
            *cur = v;
        }
        self.notify();
    }

    /// Mutates in place; notifies only if the value actually changed.
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone + PartialEq,
    {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Registers `target` under `id`. Registering the same id twice keeps one entry.
    pub fn subscribe(&self, id: u64, target: Weak<dyn Subscriber>) {
        let mut subs = self.0.subs.borrow_mut();
        if subs.iter().any(|s| s.id == id) {
            return;
        }
        subs.push(Sub { id, target });
    }

    pub fn unsubscribe(&self, id: u64) {
        self.0.subs.borrow_mut().retain(|s| s.id != id);
    }

    /// Live subscribers. Does not prune.
    pub fn subscriber_count(&self) -> usize {
        self.0
            .subs
            .borrow()
            .iter()
            .filter(|s| s.target.strong_count() > 0)
            .count()
    }

    pub(crate) fn as_dependency(&self) -> Rc<dyn Dependency> {
        self.0.clone()
    }

    fn notify(&self) {
        // Collect first: a rebuild may read or write this cell again.
        let live: SmallVec<[Rc<dyn Subscriber>; 4]> = {
            let mut subs = self.0.subs.borrow_mut();
            subs.retain(|s| s.target.strong_count() > 0);
            subs.iter().filter_map(|s| s.target.upgrade()).collect()
        };
        log::trace!("state {} changed, {} subscriber(s)", self.0.id, live.len());
        for s in live {
            s.rebuild();
        }
    }
}

impl<T> Dependency for CellInner<T> {
    fn cell_id(&self) -> u64 {
        self.id
    }
    fn unsubscribe(&self, subscriber_id: u64) {
        self.subs.borrow_mut().retain(|s| s.id != subscriber_id);
    }
}

pub fn state<T>(value: T) -> StateCell<T> {
    StateCell::new(value)
}
