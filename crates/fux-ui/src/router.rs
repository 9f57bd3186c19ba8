//! Picks the node that receives a pointer event.
//!
//! Layers are queried top to bottom (topmost overlay first, the root last).
//! The first layer with any node under the point owns the event: the hit node
//! and its ancestors are searched for one that handles the event kind, and if
//! none does the event is swallowed. Only a geometric miss falls through to
//! the next layer.

use fux_core::{Vec2, ViewKind};

use crate::hit::hit_test;
use crate::tree::{NodeId, Tree};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerClass {
    /// Button down or up.
    Press,
    Move,
    Wheel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Target(NodeId),
    /// Hit a layer with no handler on the chain.
    Consumed,
    Miss,
}

pub fn handles(kind: &ViewKind, class: PointerClass) -> bool {
    match class {
        PointerClass::Press => {
            matches!(kind, ViewKind::Button { .. } | ViewKind::TextField { .. })
        }
        PointerClass::Move => matches!(kind, ViewKind::Button { .. }),
        PointerClass::Wheel => matches!(kind, ViewKind::Scroll { .. }),
    }
}

pub fn route_in_layer(tree: &Tree, layer: NodeId, point: Vec2, class: PointerClass) -> Route {
    let Some(hit) = hit_test(tree, layer, Vec2::ZERO, point) else {
        return Route::Miss;
    };
    for id in tree.ancestors(hit) {
        let Some(node) = tree.get(id) else {
            break;
        };
        if handles(&node.kind, class) {
            return Route::Target(id);
        }
        if id == layer {
            break;
        }
    }
    Route::Consumed
}

/// `layers` is ordered top to bottom.
pub fn route(tree: &Tree, layers: &[NodeId], point: Vec2, class: PointerClass) -> Route {
    for layer in layers {
        match route_in_layer(tree, *layer, point, class) {
            Route::Miss => continue,
            found => return found,
        }
    }
    Route::Miss
}
