//! The retained node arena.
//!
//! Nodes live in a slot map and refer to each other by [`NodeId`]: children
//! are owned through the parent's `children` list, the `parent` link is a
//! plain id. A node's `rect` is relative to its parent's origin (for children
//! of a scroll region, relative to the unscrolled content origin) and only
//! means something between a layout pass and the next mutation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fux_core::{Modifier, Rect, TreeError, Vec2, View, ViewKind};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::scroll::ScrollState;
use crate::textfield::TextFieldState;

slotmap::new_key_type! {
    pub struct NodeId;
}

/// Per-node state that outlives rebuilds of the descriptor it came from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NodeState {
    #[default]
    None,
    Scroll(ScrollState),
    Field(TextFieldState),
}

#[derive(Debug)]
pub struct Node {
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub rect: Rect,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub state: NodeState,
}

/// Shared between the tree and the reactive builders mounted in it.
#[derive(Debug, Default)]
pub struct Invalidation {
    layout_dirty: Cell<bool>,
    rebuilt: RefCell<Vec<NodeId>>,
}

impl Invalidation {
    pub fn mark_dirty(&self) {
        self.layout_dirty.set(true);
    }
    pub fn is_dirty(&self) -> bool {
        self.layout_dirty.get()
    }
    pub fn clear(&self) {
        self.layout_dirty.set(false);
    }
    pub fn push_rebuilt(&self, id: NodeId) {
        self.rebuilt.borrow_mut().push(id);
        self.mark_dirty();
    }
    pub fn has_rebuilt(&self) -> bool {
        !self.rebuilt.borrow().is_empty()
    }
    fn take_rebuilt(&self) -> Vec<NodeId> {
        std::mem::take(&mut *self.rebuilt.borrow_mut())
    }
}

#[derive(Default)]
pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
    invalidation: Rc<Invalidation>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidation(&self) -> &Rc<Invalidation> {
        &self.invalidation
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// `id` followed by each of its ancestors.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), |n| self.parent(*n)).filter(|n| self.contains(*n))
    }

    pub fn is_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        self.ancestors(of).any(|n| n == ancestor)
    }

    /// Turns a descriptor into nodes, consuming it.
    pub fn mount(&mut self, view: View, parent: Option<NodeId>) -> NodeId {
        let View {
            kind,
            modifier,
            children,
        } = view;

        let state = match &kind {
            ViewKind::Scroll { .. } => NodeState::Scroll(ScrollState::new()),
            ViewKind::TextField { value, .. } => {
                NodeState::Field(value.with(|t| TextFieldState::at_end(t)))
            }
            _ => NodeState::None,
        };
        let reactive = match &kind {
            ViewKind::Reactive(r) => Some(r.clone()),
            _ => None,
        };

        let id = self.nodes.insert(Node {
            kind,
            modifier,
            rect: Rect::ZERO,
            parent,
            children: SmallVec::new(),
            state,
        });

        if let Some(r) = reactive {
            let inv = self.invalidation.clone();
            r.set_on_rebuilt(Some(Rc::new(move || inv.push_rebuilt(id))));
            match r.take_child() {
                Some(child) => {
                    let c = self.mount(child, Some(id));
                    self.push_child(id, c);
                }
                None => log::warn!("reactive {} mounted without a built child", r.id()),
            }
        }

        for child in children {
            let c = self.mount(child, Some(id));
            self.push_child(id, c);
        }

        self.invalidation.mark_dirty();
        id
    }

    fn push_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
    }

    /// Removes `id` and everything below it.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(p) = self.parent(id)
            && let Some(pn) = self.nodes.get_mut(p)
        {
            pn.children.retain(|c| *c != id);
        }
        self.remove_subtree(id);
        self.invalidation.mark_dirty();
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        if let ViewKind::Reactive(r) = &node.kind {
            r.set_on_rebuilt(None);
        }
        for c in node.children {
            self.remove_subtree(c);
        }
    }

    /// Moves `child` under `new_parent`.
    ///
    /// Refuses moves that would make a node its own ancestor.
    pub fn attach(&mut self, child: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        if !self.contains(child) || !self.contains(new_parent) {
            return Err(TreeError::MissingNode);
        }
        let cyclic = self.is_ancestor(child, new_parent);
        debug_assert!(!cyclic, "attach would create a cycle");
        if cyclic {
            log::error!("refusing to attach {child:?} under its descendant {new_parent:?}");
            return Err(TreeError::Cycle);
        }
        if let Some(old) = self.parent(child)
            && let Some(pn) = self.nodes.get_mut(old)
        {
            pn.children.retain(|c| *c != child);
        }
        if let Some(n) = self.nodes.get_mut(child) {
            n.parent = Some(new_parent);
        }
        self.push_child(new_parent, child);
        self.invalidation.mark_dirty();
        Ok(())
    }

    /// Replaces the children of every reactive node that rebuilt since the
    /// last call. Returns how many were remounted.
    pub fn flush_rebuilds(&mut self) -> usize {
        let mut count = 0;
        while self.invalidation.has_rebuilt() {
            let mut queued = self.invalidation.take_rebuilt();
            queued.dedup();
            for id in queued {
                // A node may be gone because an outer builder replaced it.
                let Some(ViewKind::Reactive(r)) = self.nodes.get(id).map(|n| n.kind.clone()) else {
                    continue;
                };
                let Some(view) = r.take_child() else {
                    continue;
                };
                let old: SmallVec<[NodeId; 4]> = self.children(id).into();
                for c in old {
                    self.remove_subtree(c);
                }
                if let Some(n) = self.nodes.get_mut(id) {
                    n.children.clear();
                }
                let c = self.mount(view, Some(id));
                self.push_child(id, c);
                count += 1;
            }
        }
        if count > 0 {
            log::debug!("remounted {count} reactive subtree(s)");
        }
        count
    }

    /// Scroll offset a node applies to its children, as a vector.
    pub fn scroll_shift(&self, id: NodeId) -> Vec2 {
        match self.nodes.get(id) {
            Some(Node {
                kind: ViewKind::Scroll { axis },
                state: NodeState::Scroll(s),
                ..
            }) => match axis {
                fux_core::Axis::Horizontal => Vec2::new(s.offset(), 0.0),
                fux_core::Axis::Vertical => Vec2::new(0.0, s.offset()),
            },
            _ => Vec2::ZERO,
        }
    }

    /// Rectangle in window coordinates, with every enclosing scroll offset applied.
    pub fn screen_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let mut origin = node.rect.origin();
        let mut cur = node.parent;
        while let Some(p) = cur {
            let pn = self.nodes.get(p)?;
            origin = origin - self.scroll_shift(p) + pn.rect.origin();
            cur = pn.parent;
        }
        Some(Rect::from_origin_size(origin, node.rect.size()))
    }

    /// First node under `root` (depth-first, pre-order) matching `pred`.
    pub fn find(&self, root: NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let node = self.nodes.get(root)?;
        if pred(node) {
            return Some(root);
        }
        node.children.iter().find_map(|c| self.find(*c, pred))
    }

    pub fn find_text(&self, root: NodeId, needle: &str) -> Option<NodeId> {
        self.find(root, &|n| matches!(&n.kind, ViewKind::Text { text, .. } if text == needle))
    }

    pub fn find_button(&self, root: NodeId, label: &str) -> Option<NodeId> {
        self.find(root, &|n| matches!(&n.kind, ViewKind::Button { label: l, .. } if l == label))
    }

    /// Every `Text` under `root`, in tree order.
    pub fn texts(&self, root: NodeId) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(root, &mut out);
        out
    }

    fn collect_texts(&self, id: NodeId, out: &mut Vec<String>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if let ViewKind::Text { text, .. } = &node.kind {
            out.push(text.clone());
        }
        for c in &node.children {
            self.collect_texts(*c, out);
        }
    }
}
