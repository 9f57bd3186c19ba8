use fux_core::{Rect, Vec2, ViewKind};

use crate::tree::{NodeId, Tree};

/// Deepest node under `point`, children before parents and later siblings
/// before earlier ones. `origin` is the window position of `id`'s parent.
///
/// Purely geometric: it does not care whether the node can handle anything.
/// Scroll regions clip their children to their own rectangle.
pub fn hit_test(tree: &Tree, id: NodeId, origin: Vec2, point: Vec2) -> Option<NodeId> {
    let node = tree.get(id)?;
    let rect = Rect::from_origin_size(origin + node.rect.origin(), node.rect.size());

    let child_origin = if matches!(node.kind, ViewKind::Scroll { .. }) {
        if !rect.contains(point) {
            return None;
        }
        rect.origin() - tree.scroll_shift(id)
    } else {
        rect.origin()
    };

    for c in tree.children(id).iter().rev() {
        if let Some(hit) = hit_test(tree, *c, child_origin, point) {
            return Some(hit);
        }
    }
    rect.contains(point).then_some(id)
}
