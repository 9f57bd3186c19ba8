//! Reactive builders.
//!
//! A [`Reactive`] owns a build closure and the child it produced last. The
//! closure receives a [`BuildCx`]; every [`StateCell::watch`] made through it
//! subscribes the builder to that cell. When a watched cell changes the
//! closure runs again right away and the new child waits in the builder until
//! the tree picks it up (see `on_rebuilt`).
//!
//! Each build gets a fresh `BuildCx`, so a build that triggers another
//! builder's build never leaks its dependencies into the outer one.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::state::{Dependency, StateCell, Subscriber, next_id};
use crate::View;

/// What happens to subscriptions from earlier builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DependencyPolicy {
    /// Subscriptions only grow; a cell read once keeps notifying this builder
    /// for its whole life. Repeat reads are deduplicated.
    #[default]
    Accumulate,
    /// After each build, cells the latest build did not read are unsubscribed.
    Rederive,
}

/// Dependency recorder handed to a build closure.
pub struct BuildCx {
    subscriber_id: u64,
    subscriber: Weak<dyn Subscriber>,
    deps: Vec<Rc<dyn Dependency>>,
}

impl BuildCx {
    pub fn new(subscriber_id: u64, subscriber: Weak<dyn Subscriber>) -> Self {
        Self {
            subscriber_id,
            subscriber,
            deps: Vec::new(),
        }
    }

    /// A recorder that tracks nothing, for building views outside a reactive.
    pub fn untracked() -> Self {
        let none: Weak<dyn Subscriber> = Weak::<Reactive>::new();
        Self::new(0, none)
    }

    pub(crate) fn record<T: 'static>(&mut self, cell: &StateCell<T>) {
        if self.subscriber.strong_count() == 0 {
            return;
        }
        if self.deps.iter().any(|d| d.cell_id() == cell.id()) {
            return;
        }
        cell.subscribe(self.subscriber_id, self.subscriber.clone());
        self.deps.push(cell.as_dependency());
    }

    pub fn dependency_ids(&self) -> Vec<u64> {
        self.deps.iter().map(|d| d.cell_id()).collect()
    }

    fn into_deps(self) -> Vec<Rc<dyn Dependency>> {
        self.deps
    }
}

type BuildFn = Box<dyn Fn(&mut BuildCx) -> View>;

pub struct Reactive {
    id: u64,
    this: Weak<Reactive>,
    build: BuildFn,
    policy: DependencyPolicy,
    pending: RefCell<Option<View>>,
    deps: RefCell<Vec<Rc<dyn Dependency>>>,
    building: Cell<bool>,
    generation: Cell<u64>,
    on_rebuilt: RefCell<Option<Rc<dyn Fn()>>>,
}

impl std::fmt::Debug for Reactive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactive")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .field("generation", &self.generation.get())
            .finish()
    }
}

impl Reactive {
    /// Creates the builder and runs the first build immediately.
    pub fn new(policy: DependencyPolicy, build: impl Fn(&mut BuildCx) -> View + 'static) -> Rc<Self> {
        let r = Rc::new_cyclic(|this| Reactive {
            id: next_id(),
            this: this.clone(),
            build: Box::new(build),
            policy,
            pending: RefCell::new(None),
            deps: RefCell::new(Vec::new()),
            building: Cell::new(false),
            generation: Cell::new(0),
            on_rebuilt: RefCell::new(None),
        });
        r.run_build();
        r
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn policy(&self) -> DependencyPolicy {
        self.policy
    }

    /// Number of builds run so far.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Cell ids this builder currently holds subscriptions on.
    pub fn dependency_ids(&self) -> Vec<u64> {
        self.deps.borrow().iter().map(|d| d.cell_id()).collect()
    }

    /// Takes the child produced by the latest build, if not taken yet.
    pub fn take_child(&self) -> Option<View> {
        self.pending.borrow_mut().take()
    }

    pub fn has_pending_child(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Hook run after every rebuild; the tree uses it to schedule a remount.
    pub fn set_on_rebuilt(&self, hook: Option<Rc<dyn Fn()>>) {
        *self.on_rebuilt.borrow_mut() = hook;
    }

    fn run_build(&self) {
        if self.building.get() {
            log::warn!("reactive {} re-entered its own build; skipped", self.id);
            return;
        }
        self.building.set(true);
        let me: Weak<dyn Subscriber> = self.this.clone();
        let mut cx = BuildCx::new(self.id, me);
        let view = (self.build)(&mut cx);
        self.building.set(false);

        let fresh = cx.into_deps();
        {
            let mut deps = self.deps.borrow_mut();
            match self.policy {
                DependencyPolicy::Accumulate => {
                    for d in fresh {
                        if !deps.iter().any(|old| old.cell_id() == d.cell_id()) {
                            deps.push(d);
                        }
                    }
                }
                DependencyPolicy::Rederive => {
                    for old in deps.iter() {
                        if !fresh.iter().any(|d| d.cell_id() == old.cell_id()) {
                            old.unsubscribe(self.id);
                        }
                    }
                    *deps = fresh;
                }
            }
        }

        *self.pending.borrow_mut() = Some(view);
        self.generation.set(self.generation.get() + 1);

        let hook = self.on_rebuilt.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }
}

impl Subscriber for Reactive {
    fn rebuild(&self) {
        self.run_build();
    }
}

impl Drop for Reactive {
    fn drop(&mut self) {
        for d in self.deps.get_mut().drain(..) {
            d.unsubscribe(self.id);
        }
    }
}
