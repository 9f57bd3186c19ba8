//! Constraint-passing layout.
//!
//! `layout` sets a node's width and height from the constraints its parent
//! offers; the parent then sets the node's x/y. Every node goes through the
//! same wrapper: explicit `width`/`height` and `fill_max_*` tighten the
//! constraints, padding is removed before the kind-specific policy runs and
//! added back afterwards.

use fux_core::{Axis, Constraints, Renderer, Size, UNBOUNDED, Vec2, ViewKind};
use smallvec::SmallVec;

use crate::textfield::{FIELD_PAD_Y, FIELD_WIDTH};
use crate::tree::{NodeId, NodeState, Tree};

pub const BUTTON_PAD_X: f32 = 12.0;
pub const BUTTON_PAD_Y: f32 = 8.0;

enum Policy {
    Leaf(Size),
    /// Children overlap at the origin.
    Wrap { loosen: bool, fill: bool },
    Linear { axis: Axis, spacing: f32 },
    Stack,
    Center,
    Scroll { axis: Axis },
}

fn policy_for(tree: &Tree, id: NodeId, c: Constraints, r: &mut dyn Renderer) -> Policy {
    let Some(node) = tree.get(id) else {
        return Policy::Leaf(Size::ZERO);
    };
    match &node.kind {
        ViewKind::Empty => Policy::Leaf(Size::ZERO),
        ViewKind::Text { text, style } => Policy::Leaf(r.measure_text(text, style)),
        ViewKind::Button { label, style, .. } => {
            let s = r.measure_text(label, style);
            Policy::Leaf(Size::new(
                s.width + BUTTON_PAD_X * 2.0,
                s.height + BUTTON_PAD_Y * 2.0,
            ))
        }
        ViewKind::TextField { style, .. } => {
            let width = FIELD_WIDTH.max(c.min_width).min(c.max_width);
            Policy::Leaf(Size::new(width, style.font_size + FIELD_PAD_Y * 2.0))
        }
        ViewKind::Image { path } => Policy::Leaf(
            r.load_image(path)
                .map(|h| r.measure_image(h))
                .unwrap_or(Size::ZERO),
        ),
        ViewKind::Divider { thickness, .. } => Policy::Leaf(Size::new(
            if c.has_bounded_width() { c.max_width } else { 0.0 },
            thickness.max(0.0),
        )),
        ViewKind::Box => Policy::Wrap {
            loosen: true,
            fill: false,
        },
        ViewKind::Surface => Policy::Wrap {
            loosen: true,
            fill: true,
        },
        ViewKind::Reactive(_) => Policy::Wrap {
            loosen: false,
            fill: false,
        },
        ViewKind::Row { spacing } => Policy::Linear {
            axis: Axis::Horizontal,
            spacing: *spacing,
        },
        ViewKind::Column { spacing } => Policy::Linear {
            axis: Axis::Vertical,
            spacing: *spacing,
        },
        ViewKind::Stack => Policy::Stack,
        ViewKind::Center => Policy::Center,
        ViewKind::Scroll { axis } => Policy::Scroll { axis: *axis },
    }
}

fn children_of(tree: &Tree, id: NodeId) -> SmallVec<[NodeId; 8]> {
    tree.children(id).iter().copied().collect()
}

fn set_size(tree: &mut Tree, id: NodeId, s: Size) {
    if let Some(n) = tree.get_mut(id) {
        n.rect.w = s.width;
        n.rect.h = s.height;
    }
}

fn set_pos(tree: &mut Tree, id: NodeId, p: Vec2) {
    if let Some(n) = tree.get_mut(id) {
        n.rect.x = p.x;
        n.rect.y = p.y;
    }
}

fn shift(tree: &mut Tree, id: NodeId, by: Vec2) {
    if let Some(n) = tree.get_mut(id) {
        n.rect = n.rect.translate(by);
    }
}

/// Lays out `id` and its subtree under `c`; returns (and stores) its size.
pub fn layout(tree: &mut Tree, id: NodeId, c: Constraints, r: &mut dyn Renderer) -> Size {
    let Some(node) = tree.get(id) else {
        return Size::ZERO;
    };
    let m = node.modifier.clone();

    let mut inner = c.normalized();
    if let Some(w) = m.width {
        inner = inner.tighten_width(w.max(0.0));
    }
    if let Some(h) = m.height {
        inner = inner.tighten_height(h.max(0.0));
    }
    if m.fill_max_w && inner.has_bounded_width() {
        inner = inner.tighten_width(inner.max_width);
    }
    if m.fill_max_h && inner.has_bounded_height() {
        inner = inner.tighten_height(inner.max_height);
    }

    let pad = m.padding;
    let content_c = inner.deflate(pad);
    let content = layout_content(tree, id, content_c, r);

    let offset = Vec2::new(pad.left, pad.top);
    if offset != Vec2::ZERO {
        for child in children_of(tree, id) {
            shift(tree, child, offset);
        }
    }

    let size = inner
        .constrain(Size::new(
            content.width + pad.horizontal(),
            content.height + pad.vertical(),
        ))
        .sanitized();
    set_size(tree, id, size);
    size
}

fn layout_content(tree: &mut Tree, id: NodeId, c: Constraints, r: &mut dyn Renderer) -> Size {
    match policy_for(tree, id, c, r) {
        Policy::Leaf(s) => c.constrain(s),
        Policy::Wrap { loosen, fill } => {
            let child_c = if loosen { c.loosen() } else { c };
            let mut s = Size::ZERO;
            for child in children_of(tree, id) {
                let cs = layout(tree, child, child_c, r);
                set_pos(tree, child, Vec2::ZERO);
                s.width = s.width.max(cs.width);
                s.height = s.height.max(cs.height);
            }
            if fill {
                if c.has_bounded_width() {
                    s.width = c.max_width;
                }
                if c.has_bounded_height() {
                    s.height = c.max_height;
                }
            }
            s
        }
        Policy::Linear { axis, spacing } => layout_linear(tree, id, axis, spacing, c, r),
        Policy::Stack => layout_stack(tree, id, c, r),
        Policy::Center => layout_center(tree, id, c, r),
        Policy::Scroll { axis } => layout_scroll(tree, id, axis, c, r),
    }
}

fn layout_linear(
    tree: &mut Tree,
    id: NodeId,
    axis: Axis,
    spacing: f32,
    c: Constraints,
    r: &mut dyn Renderer,
) -> Size {
    let children = children_of(tree, id);
    let n = children.len();
    if n == 0 {
        return Size::ZERO;
    }
    let cross = axis.flip();
    let cross_max = c.max_along(cross);
    let main_bounded = c.is_bounded(axis);

    let weights: SmallVec<[f32; 8]> = children
        .iter()
        .map(|ch| {
            if main_bounded {
                tree.get(*ch).map(|n| n.modifier.flex_weight()).unwrap_or(0.0)
            } else {
                0.0
            }
        })
        .collect();
    let total_weight: f32 = weights.iter().sum();

    let natural = Constraints::unbounded().with_axis(cross, 0.0, cross_max);
    let mut sizes: SmallVec<[Size; 8]> = SmallVec::from_elem(Size::ZERO, n);
    let mut fixed = 0.0;
    for (i, child) in children.iter().enumerate() {
        if weights[i] <= 0.0 {
            sizes[i] = layout(tree, *child, natural, r);
            fixed += sizes[i].main(axis);
        }
    }

    let gaps = spacing * (n - 1) as f32;
    if total_weight > 0.0 {
        let remaining = (c.max_along(axis) - fixed - gaps).max(0.0);
        for (i, child) in children.iter().enumerate() {
            if weights[i] > 0.0 {
                let share = remaining * weights[i] / total_weight;
                let cc = natural.with_axis(axis, share, share);
                sizes[i] = layout(tree, *child, cc, r);
            }
        }
    }

    let mut cursor = 0.0;
    let mut cross_extent: f32 = 0.0;
    for (i, child) in children.iter().enumerate() {
        let p = match axis {
            Axis::Horizontal => Vec2::new(cursor, 0.0),
            Axis::Vertical => Vec2::new(0.0, cursor),
        };
        set_pos(tree, *child, p);
        cursor += sizes[i].main(axis) + spacing;
        cross_extent = cross_extent.max(sizes[i].cross(axis));
    }
    let main: f32 = sizes.iter().map(|s| s.main(axis)).sum::<f32>() + gaps;
    Size::from_axes(axis, main, cross_extent)
}

fn layout_stack(tree: &mut Tree, id: NodeId, c: Constraints, r: &mut dyn Renderer) -> Size {
    let children = children_of(tree, id);
    let loose = c.loosen();

    let mut own = Size::ZERO;
    let mut any_flow = false;
    for child in &children {
        let positioned = tree
            .get(*child)
            .is_some_and(|n| n.modifier.is_positioned());
        if positioned {
            continue;
        }
        any_flow = true;
        let s = layout(tree, *child, loose, r);
        set_pos(tree, *child, Vec2::ZERO);
        own.width = own.width.max(s.width);
        own.height = own.height.max(s.height);
    }
    if !any_flow {
        own = Size::new(
            if c.has_bounded_width() { c.max_width } else { 0.0 },
            if c.has_bounded_height() { c.max_height } else { 0.0 },
        );
    }
    let own = c.constrain(own);

    for child in &children {
        if tree
            .get(*child)
            .is_some_and(|n| n.modifier.is_positioned())
        {
            layout_positioned(tree, *child, own, r);
        }
    }
    own
}

/// Lays out an absolutely positioned node inside an area of size `area`,
/// using whichever edge offsets it declares. A pair of opposing offsets fixes
/// that dimension. The node's position is stored relative to the area.
pub fn layout_positioned(tree: &mut Tree, id: NodeId, area: Size, r: &mut dyn Renderer) -> Size {
    let Some(m) = tree.get(id).map(|n| n.modifier.clone()) else {
        return Size::ZERO;
    };
    let (min_w, max_w) = match (m.offset_left, m.offset_right) {
        (Some(l), Some(rt)) => {
            let w = (area.width - l - rt).max(0.0);
            (w, w)
        }
        _ => (0.0, area.width),
    };
    let (min_h, max_h) = match (m.offset_top, m.offset_bottom) {
        (Some(t), Some(b)) => {
            let h = (area.height - t - b).max(0.0);
            (h, h)
        }
        _ => (0.0, area.height),
    };
    let cc = Constraints {
        min_width: min_w,
        max_width: max_w,
        min_height: min_h,
        max_height: max_h,
    };
    let s = layout(tree, id, cc, r);
    let x = match (m.offset_left, m.offset_right) {
        (Some(l), _) => l,
        (None, Some(rt)) => area.width - rt - s.width,
        (None, None) => 0.0,
    };
    let y = match (m.offset_top, m.offset_bottom) {
        (Some(t), _) => t,
        (None, Some(b)) => area.height - b - s.height,
        (None, None) => 0.0,
    };
    set_pos(tree, id, Vec2::new(x, y));
    s
}

fn layout_center(tree: &mut Tree, id: NodeId, c: Constraints, r: &mut dyn Renderer) -> Size {
    let children = children_of(tree, id);
    let loose = c.loosen();
    let mut sizes: SmallVec<[Size; 4]> = SmallVec::new();
    let mut biggest = Size::ZERO;
    for child in &children {
        let s = layout(tree, *child, loose, r);
        biggest.width = biggest.width.max(s.width);
        biggest.height = biggest.height.max(s.height);
        sizes.push(s);
    }
    let own = Size::new(
        if c.has_bounded_width() { c.max_width } else { biggest.width },
        if c.has_bounded_height() { c.max_height } else { biggest.height },
    );
    for (child, s) in children.iter().zip(sizes) {
        let p = Vec2::new(
            ((own.width - s.width) / 2.0).max(0.0),
            ((own.height - s.height) / 2.0).max(0.0),
        );
        set_pos(tree, *child, p);
    }
    own
}

fn layout_scroll(
    tree: &mut Tree,
    id: NodeId,
    axis: Axis,
    c: Constraints,
    r: &mut dyn Renderer,
) -> Size {
    let children = children_of(tree, id);
    let child_c = c.loosen().with_axis(axis, 0.0, UNBOUNDED);
    let mut content = Size::ZERO;
    for child in &children {
        let s = layout(tree, *child, child_c, r);
        set_pos(tree, *child, Vec2::ZERO);
        content.width = content.width.max(s.width);
        content.height = content.height.max(s.height);
    }
    let main = if c.is_bounded(axis) {
        c.max_along(axis)
    } else {
        content.main(axis)
    };
    let own = c.constrain(Size::from_axes(axis, main, content.cross(axis)));

    if let Some(node) = tree.get_mut(id) {
        if let NodeState::Scroll(state) = &mut node.state {
            state.set_viewport(own.main(axis));
            state.set_content(content.main(axis));
        }
    }
    own
}

#[cfg(test)]
mod tests {
    use super::*;
    use fux_core::headless::HeadlessRenderer;
    use fux_core::{EdgeInsets, Modifier, Rect, TextStyle, View};

    fn sized(w: f32, h: f32) -> View {
        View::new(ViewKind::Box).modifier(Modifier::new().size(w, h))
    }

    fn run(view: View, c: Constraints) -> (Tree, NodeId) {
        let mut t = Tree::new();
        let root = t.mount(view, None);
        let mut r = HeadlessRenderer::new();
        layout(&mut t, root, c, &mut r);
        (t, root)
    }

    fn rect(t: &Tree, id: NodeId) -> Rect {
        t.get(id).unwrap().rect
    }

    #[test]
    fn test_zero_constraints_give_zero_size() {
        let v = View::new(ViewKind::Column { spacing: 4.0 }).with_children(vec![
            View::new(ViewKind::Text {
                text: "abc".into(),
                style: TextStyle::sized(10.0),
            }),
            sized(30.0, 30.0),
        ]);
        let (t, root) = run(v, Constraints::tight(Size::ZERO));
        assert_eq!(rect(&t, root).size(), Size::ZERO);
        for c in t.children(root) {
            let s = rect(&t, *c).size();
            assert!(s.width >= 0.0 && s.height >= 0.0);
        }
    }

    #[test]
    fn test_box_padding_without_child_collapses_to_padding() {
        let v = View::new(ViewKind::Box).modifier(Modifier::new().padding_values(EdgeInsets::ltrb(
            1.0, 2.0, 3.0, 4.0,
        )));
        let (t, root) = run(v, Constraints::unbounded());
        assert_eq!(rect(&t, root).size(), Size::new(4.0, 6.0));
    }

    #[test]
    fn test_box_padding_offsets_child() {
        let v = View::new(ViewKind::Box)
            .modifier(Modifier::new().padding(5.0))
            .with_children(vec![sized(20.0, 10.0)]);
        let (t, root) = run(v, Constraints::loose(Size::new(100.0, 100.0)));
        assert_eq!(rect(&t, root).size(), Size::new(30.0, 20.0));
        let child = t.children(root)[0];
        assert_eq!(rect(&t, child), Rect::new(5.0, 5.0, 20.0, 10.0));
    }

    #[test]
    fn test_button_size_from_label() {
        let v = View::new(ViewKind::Button {
            label: "Click".into(),
            style: TextStyle::sized(16.0),
            on_click: std::rc::Rc::new(|_| {}),
        });
        let (t, root) = run(v, Constraints::unbounded());
        assert_eq!(rect(&t, root).size(), Size::new(64.0, 32.0));
    }

    #[test]
    fn test_row_cross_axis_is_tallest_child() {
        let v = View::new(ViewKind::Row { spacing: 2.0 })
            .with_children(vec![sized(10.0, 5.0), sized(20.0, 15.0)]);
        let (t, root) = run(v, Constraints::unbounded());
        assert_eq!(rect(&t, root).size(), Size::new(32.0, 15.0));
        let second = t.children(root)[1];
        assert_eq!(rect(&t, second).origin(), Vec2::new(12.0, 0.0));
    }

    #[test]
    fn test_flex_ignored_when_main_axis_unbounded() {
        let v = View::new(ViewKind::Row { spacing: 0.0 }).with_children(vec![
            View::new(ViewKind::Box).modifier(Modifier::new().flex_grow(1.0)),
            sized(10.0, 10.0),
        ]);
        let (t, root) = run(v, Constraints::unbounded());
        assert_eq!(rect(&t, root).size(), Size::new(10.0, 10.0));
    }

    #[test]
    fn test_zero_total_weight_distributes_nothing() {
        let v = View::new(ViewKind::Row { spacing: 0.0 })
            .modifier(Modifier::new().width(400.0))
            .with_children(vec![
                View::new(ViewKind::Box).modifier(Modifier::new().flex_grow(0.0)),
                sized(50.0, 10.0),
            ]);
        let (t, root) = run(v, Constraints::unbounded());
        let first = t.children(root)[0];
        assert_eq!(rect(&t, first).w, 0.0);
        assert_eq!(rect(&t, root).w, 400.0);
    }

    #[test]
    fn test_stack_positions_from_edges() {
        let v = View::new(ViewKind::Stack)
            .modifier(Modifier::new().size(200.0, 100.0))
            .with_children(vec![
                sized(20.0, 20.0)
                    .modifier(Modifier::new().size(20.0, 20.0).absolute().offset_right(10.0).offset_bottom(5.0)),
                View::new(ViewKind::Box)
                    .modifier(Modifier::new().height(10.0).absolute().offset_left(30.0).offset_right(50.0)),
                sized(5.0, 5.0).modifier(Modifier::new().size(5.0, 5.0).absolute()),
            ]);
        let (t, root) = run(v, Constraints::unbounded());
        let kids = t.children(root).to_vec();
        assert_eq!(rect(&t, kids[0]), Rect::new(170.0, 75.0, 20.0, 20.0));
        assert_eq!(rect(&t, kids[1]), Rect::new(30.0, 0.0, 120.0, 10.0));
        assert_eq!(rect(&t, kids[2]).origin(), Vec2::ZERO);
    }

    #[test]
    fn test_stack_sizes_to_flow_children() {
        let v = View::new(ViewKind::Stack)
            .with_children(vec![sized(40.0, 10.0), sized(20.0, 30.0)]);
        let (t, root) = run(v, Constraints::loose(Size::new(300.0, 300.0)));
        assert_eq!(rect(&t, root).size(), Size::new(40.0, 30.0));
    }

    #[test]
    fn test_stack_without_flow_children_fills() {
        let v = View::new(ViewKind::Stack)
            .with_children(vec![sized(5.0, 5.0).modifier(Modifier::new().size(5.0, 5.0).absolute())]);
        let (t, root) = run(v, Constraints::loose(Size::new(300.0, 200.0)));
        assert_eq!(rect(&t, root).size(), Size::new(300.0, 200.0));
    }

    #[test]
    fn test_center_uses_child_size_when_unbounded() {
        let v = View::new(ViewKind::Center).with_children(vec![sized(50.0, 20.0)]);
        let (t, root) = run(v, Constraints::unbounded());
        assert_eq!(rect(&t, root).size(), Size::new(50.0, 20.0));
        let child = t.children(root)[0];
        assert_eq!(rect(&t, child).origin(), Vec2::ZERO);
    }

    #[test]
    fn test_scroll_measures_content_unbounded() {
        let v = View::new(ViewKind::Scroll {
            axis: Axis::Vertical,
        })
        .modifier(Modifier::new().height(200.0))
        .with_children(vec![sized(100.0, 500.0)]);
        let (t, root) = run(v, Constraints::loose(Size::new(300.0, 600.0)));
        assert_eq!(rect(&t, root).size(), Size::new(100.0, 200.0));
        let child = t.children(root)[0];
        assert_eq!(rect(&t, child).h, 500.0);
        match &t.get(root).unwrap().state {
            NodeState::Scroll(s) => {
                assert_eq!(s.viewport(), 200.0);
                assert_eq!(s.content(), 500.0);
                assert_eq!(s.max_offset(), 300.0);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_text_field_width_clamped() {
        let v = View::new(ViewKind::TextField {
            value: fux_core::state(String::new()),
            placeholder: String::new(),
            style: TextStyle::sized(16.0),
            on_submit: None,
            on_blur: None,
        });
        let (t, root) = run(v, Constraints::loose(Size::new(100.0, 100.0)));
        assert_eq!(rect(&t, root).size(), Size::new(100.0, 32.0));
    }

    #[test]
    fn test_missing_image_is_zero_sized() {
        let v = View::new(ViewKind::Image {
            path: "nope.png".into(),
        });
        let (t, root) = run(v, Constraints::unbounded());
        assert_eq!(rect(&t, root).size(), Size::ZERO);
    }
}
