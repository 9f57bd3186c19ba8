//! One application instance: the node tree, overlays, timers and focus, and
//! the per-frame step that drives them.
//!
//! A frame runs, in order: due timers, input routing, layout (only if
//! something invalidated it), paint. Input is routed against the geometry of
//! the last completed layout; once anything invalidates layout during a
//! frame, the remaining routed events of that frame are dropped.

use std::iter::once;

use fux_core::{
    AppCx, Constraints, InputEvent, KeyEvent, OverlayId, PointerButton, Rect, Renderer, Size,
    TimerCallback, TimerId, Vec2, View, ViewKind,
};
use smallvec::SmallVec;
use web_time::{Duration, Instant};

use crate::focus::FocusOwner;
use crate::layout::{layout, layout_positioned};
use crate::overlay::OverlayStack;
use crate::paint::{PaintState, paint};
use crate::router::{PointerClass, Route, route};
use crate::textfield::FieldAction;
use crate::timer::{Clock, SystemClock, TimerQueue};
use crate::tree::{Node, NodeId, NodeState, Tree};

pub const DEFAULT_SNACKBAR_DURATION: Duration = Duration::from_millis(3000);

/// What happened during one [`Runtime::frame`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub timers_fired: usize,
    pub events_routed: usize,
    pub events_dropped: usize,
    pub layout_ran: bool,
    pub remounted: usize,
    pub quit: bool,
}

pub struct Runtime {
    tree: Tree,
    root: NodeId,
    overlays: OverlayStack,
    timers: TimerQueue,
    focus: FocusOwner,
    clock: Box<dyn Clock>,
    viewport: Size,
    pointer: Vec2,
    hovered: Option<NodeId>,
    pressed: Option<NodeId>,
    snackbar_duration: Duration,
    quit: bool,
}

impl Runtime {
    pub fn new(root: View, viewport: Size) -> Self {
        Self::with_clock(root, viewport, Box::new(SystemClock))
    }

    pub fn with_clock(root: View, viewport: Size, clock: Box<dyn Clock>) -> Self {
        let mut tree = Tree::new();
        let root = tree.mount(root, None);
        Self {
            tree,
            root,
            overlays: OverlayStack::default(),
            timers: TimerQueue::new(),
            focus: FocusOwner::default(),
            clock,
            viewport,
            pointer: Vec2::ZERO,
            hovered: None,
            pressed: None,
            snackbar_duration: DEFAULT_SNACKBAR_DURATION,
            quit: false,
        }
    }

    pub fn set_snackbar_duration(&mut self, d: Duration) {
        self.snackbar_duration = d;
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }
    pub fn root(&self) -> NodeId {
        self.root
    }
    pub fn overlay_roots(&self) -> Vec<NodeId> {
        self.overlays.roots().collect()
    }
    pub fn overlay_ids(&self) -> Vec<OverlayId> {
        self.overlays.ids()
    }
    pub fn focused(&self) -> Option<NodeId> {
        self.focus.owner()
    }
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }
    pub fn text_input_active(&self) -> bool {
        self.focus.text_input_active()
    }
    pub fn layout_dirty(&self) -> bool {
        self.tree.invalidation().is_dirty()
    }
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
    pub fn screen_rect(&self, id: NodeId) -> Option<Rect> {
        self.tree.screen_rect(id)
    }

    /// Runs one frame over `events` and draws into `r`.
    pub fn frame(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        r: &mut dyn Renderer,
    ) -> FrameReport {
        let mut report = FrameReport {
            timers_fired: self.fire_timers(),
            ..FrameReport::default()
        };

        for ev in events {
            match ev {
                InputEvent::Quit => {
                    log::info!("quit requested");
                    self.quit = true;
                    continue;
                }
                InputEvent::WindowResized { width, height } => {
                    self.viewport = Size::new(width.max(0.0), height.max(0.0));
                    self.tree.invalidation().mark_dirty();
                    continue;
                }
                _ => {}
            }
            if let Some(p) = ev.position() {
                self.pointer = p;
            }
            if self.layout_dirty() {
                log::debug!("dropping {ev:?}: layout is stale");
                report.events_dropped += 1;
                continue;
            }
            report.events_routed += 1;
            self.dispatch(ev);
        }

        if self.layout_dirty() {
            report.remounted = self.layout_pass(r);
            report.layout_ran = true;
        }
        self.render(r);
        report.quit = self.quit;
        report
    }

    fn fire_timers(&mut self) -> usize {
        let now = self.clock.now();
        let limit = self.timers.last_seq();
        let mut fired = 0;
        while let Some((_, cb)) = self.timers.pop_due(now, limit) {
            cb(self);
            fired += 1;
        }
        if fired > 0 {
            log::trace!("fired {fired} timer(s)");
        }
        fired
    }

    /// Remounts rebuilt reactive subtrees and lays out the root and every
    /// overlay against the viewport. A positioned layer root is placed by its
    /// edge offsets; any other sits at the top-left corner.
    pub fn layout_pass(&mut self, r: &mut dyn Renderer) -> usize {
        let remounted = self.tree.flush_rebuilds();
        self.forget_missing_nodes();
        let c = Constraints::loose(self.viewport);
        let roots: SmallVec<[NodeId; 4]> = once(self.root).chain(self.overlays.roots()).collect();
        for id in roots {
            let positioned = self
                .tree
                .get(id)
                .is_some_and(|n| n.modifier.is_positioned());
            if positioned {
                layout_positioned(&mut self.tree, id, self.viewport, r);
                continue;
            }
            layout(&mut self.tree, id, c, r);
            if let Some(n) = self.tree.get_mut(id) {
                n.rect.x = 0.0;
                n.rect.y = 0.0;
            }
        }
        self.tree.invalidation().clear();
        remounted
    }

    pub fn render(&mut self, r: &mut dyn Renderer) {
        let ps = PaintState {
            hovered: self.hovered,
            pressed: self.pressed,
            focused: self.focus.owner(),
        };
        r.begin_frame(self.viewport);
        paint(&self.tree, self.root, Vec2::ZERO, r, &ps);
        for id in self.overlays.roots() {
            paint(&self.tree, id, Vec2::ZERO, r, &ps);
        }
        r.end_frame();
    }

    fn layers(&self) -> SmallVec<[NodeId; 4]> {
        self.overlays
            .roots_top_down()
            .chain(once(self.root))
            .collect()
    }

    fn dispatch(&mut self, ev: InputEvent) {
        let layers = self.layers();
        match ev {
            InputEvent::PointerMoved { position } => {
                self.hovered = match route(&self.tree, &layers, position, PointerClass::Move) {
                    Route::Target(id) => Some(id),
                    _ => None,
                };
            }
            InputEvent::PointerDown {
                position,
                button: PointerButton::Primary,
            } => match route(&self.tree, &layers, position, PointerClass::Press) {
                Route::Target(id) if self.is_field(id) => {
                    self.pressed = None;
                    self.request_focus(id);
                }
                Route::Target(id) => {
                    self.pressed = Some(id);
                    self.clear_focus();
                }
                Route::Consumed | Route::Miss => {
                    self.pressed = None;
                    self.clear_focus();
                }
            },
            InputEvent::PointerUp {
                position,
                button: PointerButton::Primary,
            } => {
                let pressed = self.pressed.take();
                if let Route::Target(id) = route(&self.tree, &layers, position, PointerClass::Press)
                    && pressed == Some(id)
                {
                    self.click(id);
                }
            }
            InputEvent::Wheel { delta_y } => {
                if let Route::Target(id) =
                    route(&self.tree, &layers, self.pointer, PointerClass::Wheel)
                    && let Some(node) = self.tree.get_mut(id)
                    && let NodeState::Scroll(s) = &mut node.state
                {
                    s.scroll_by(delta_y);
                }
            }
            InputEvent::KeyDown(k) => {
                if let Some(id) = self.focus.owner() {
                    self.key_to_field(id, &k);
                }
            }
            InputEvent::TextInput(s) => {
                if let Some(id) = self.focus.owner()
                    && self.focus.text_input_active()
                {
                    self.text_to_field(id, &s);
                }
            }
            _ => {}
        }
    }

    fn is_field(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(|n| n.kind.is_focusable())
    }

    fn click(&mut self, id: NodeId) {
        let cb = match self.tree.get(id).map(|n| &n.kind) {
            Some(ViewKind::Button { on_click, .. }) => on_click.clone(),
            _ => return,
        };
        cb(self);
    }

    fn key_to_field(&mut self, id: NodeId, k: &KeyEvent) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        let Node { kind, state, .. } = node;
        let (ViewKind::TextField { value, on_submit, .. }, NodeState::Field(field)) = (kind, state)
        else {
            return;
        };
        let value = value.clone();
        let on_submit = on_submit.clone();
        let action = field.handle_key(&value, k);
        if action == FieldAction::Submit
            && let Some(cb) = on_submit
        {
            let text = value.get();
            cb(self, &text);
        }
    }

    fn text_to_field(&mut self, id: NodeId, s: &str) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if let (ViewKind::TextField { value, .. }, NodeState::Field(field)) =
            (&node.kind, &mut node.state)
        {
            let value = value.clone();
            field.insert_text(&value, s);
        }
    }

    /// Gives `id` keyboard focus. The previous owner's focus-lost hook runs
    /// first; focusing the current owner again does nothing.
    pub fn request_focus(&mut self, id: NodeId) {
        if self.focus.owner() == Some(id) || !self.tree.contains(id) {
            return;
        }
        if let Some(prev) = self.focus.release() {
            self.focus_lost(prev);
        }
        let wants_text = self.is_field(id);
        self.focus.assign(id, wants_text);
    }

    fn focus_lost(&mut self, id: NodeId) {
        let hook = match self.tree.get(id).map(|n| &n.kind) {
            Some(ViewKind::TextField { on_blur, .. }) => on_blur.clone(),
            _ => None,
        };
        if let Some(cb) = hook {
            cb(self);
        }
    }

    /// Clears references to nodes that a remount or overlay removal deleted.
    fn forget_missing_nodes(&mut self) {
        if let Some(f) = self.focus.owner()
            && !self.tree.contains(f)
        {
            self.focus.release();
        }
        if self.hovered.is_some_and(|h| !self.tree.contains(h)) {
            self.hovered = None;
        }
        if self.pressed.is_some_and(|p| !self.tree.contains(p)) {
            self.pressed = None;
        }
    }
}

impl AppCx for Runtime {
    fn push_overlay(&mut self, view: View) -> OverlayId {
        let node = self.tree.mount(view, None);
        let id = self.overlays.push(node);
        log::debug!("pushed overlay {id:?} ({} open)", self.overlays.len());
        id
    }

    fn pop_overlay(&mut self) -> Option<OverlayId> {
        let (id, node) = self.overlays.pop()?;
        self.tree.remove(node);
        self.forget_missing_nodes();
        log::debug!("popped overlay {id:?}");
        Some(id)
    }

    fn remove_overlay(&mut self, id: OverlayId) -> bool {
        let Some(node) = self.overlays.remove(id) else {
            return false;
        };
        self.tree.remove(node);
        self.forget_missing_nodes();
        log::debug!("removed overlay {id:?}");
        true
    }

    fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    fn add_timer(&mut self, delay: Duration, callback: TimerCallback) -> TimerId {
        let at = self.clock.now() + delay;
        self.timers.add(at, callback)
    }

    fn remove_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove(id)
    }

    fn now(&self) -> Instant {
        self.clock.now()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn invalidate_layout(&mut self) {
        self.tree.invalidation().mark_dirty();
    }

    fn clear_focus(&mut self) {
        if let Some(prev) = self.focus.release() {
            self.focus_lost(prev);
        }
    }

    fn snackbar_duration(&self) -> Duration {
        self.snackbar_duration
    }
}
