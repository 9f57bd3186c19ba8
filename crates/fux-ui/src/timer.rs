use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use fux_core::{AppCx, Inbox, TimerCallback, TimerId};
use web_time::{Duration, Instant};

/// Source of "now" for timers.
pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }
    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

/// One-shot callbacks ordered by deadline, then by insertion.
#[derive(Default)]
pub struct TimerQueue {
    entries: BTreeMap<(Instant, u64), TimerCallback>,
    deadlines: HashMap<u64, Instant>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, deadline: Instant, callback: TimerCallback) -> TimerId {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.entries.insert((deadline, seq), callback);
        self.deadlines.insert(seq, deadline);
        TimerId(seq)
    }

    pub fn remove(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(at) => self.entries.remove(&(at, id.0)).is_some(),
            None => false,
        }
    }

    /// Sequence number of the most recently added timer. Timers added after
    /// this value was read can be held back with [`TimerQueue::pop_due`].
    pub fn last_seq(&self) -> u64 {
        self.next_seq
    }

    /// Removes and returns the earliest timer due at `now` that was added no
    /// later than `added_by`.
    pub fn pop_due(&mut self, now: Instant, added_by: u64) -> Option<(TimerId, TimerCallback)> {
        let key = self
            .entries
            .range(..=(now, u64::MAX))
            .map(|(k, _)| *k)
            .find(|(_, seq)| *seq <= added_by)?;
        let cb = self.entries.remove(&key)?;
        self.deadlines.remove(&key.1);
        Some((TimerId(key.1), cb))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type Tick = Box<dyn FnMut(&mut dyn AppCx) -> bool>;

fn arm(cx: &mut dyn AppCx, every: Duration, mut tick: Tick) -> TimerId {
    cx.add_timer(
        every,
        Box::new(move |cx: &mut dyn AppCx| {
            if tick(cx) {
                arm(cx, every, tick);
            }
        }),
    )
}

/// Calls `tick` every `every` for as long as it returns `true`.
///
/// Returns the id of the first arming only; stop the interval by returning
/// `false` from `tick`.
pub fn add_interval(
    cx: &mut dyn AppCx,
    every: Duration,
    tick: impl FnMut(&mut dyn AppCx) -> bool + 'static,
) -> TimerId {
    arm(cx, every, Box::new(tick))
}

/// Drains `inbox` on the UI thread every `every`, handing each message to
/// `on_message` in the order it was sent.
pub fn poll_inbox<T: 'static>(
    cx: &mut dyn AppCx,
    inbox: Inbox<T>,
    every: Duration,
    mut on_message: impl FnMut(&mut dyn AppCx, T) + 'static,
) -> TimerId {
    add_interval(cx, every, move |cx| {
        for msg in inbox.drain() {
            on_message(cx, msg);
        }
        true
    })
}
