use fux_core::{Color, CornerRadius, Rect, Renderer, Vec2, ViewKind};

use crate::layout::{BUTTON_PAD_X, BUTTON_PAD_Y};
use crate::textfield::{FIELD_PAD_X, FIELD_PAD_Y};
use crate::tree::{NodeId, NodeState, Tree};

pub const BUTTON_COLOR: Color = Color(0, 123, 255, 255);
pub const FIELD_COLOR: Color = Color::WHITE;
pub const PLACEHOLDER_COLOR: Color = Color::GREY;

/// Interaction state that changes how nodes look.
#[derive(Clone, Copy, Debug, Default)]
pub struct PaintState {
    pub hovered: Option<NodeId>,
    pub pressed: Option<NodeId>,
    pub focused: Option<NodeId>,
}

/// Draws `id` and its subtree. `origin` is the window position of the
/// parent's origin; stored rectangles are only read.
pub fn paint(tree: &Tree, id: NodeId, origin: Vec2, r: &mut dyn Renderer, ps: &PaintState) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let rect = Rect::from_origin_size(origin + node.rect.origin(), node.rect.size());
    let content = rect.inset(node.modifier.padding);
    let m = &node.modifier;

    match &node.kind {
        ViewKind::Button { .. } => {}
        _ => {
            if let Some(bg) = m.background.filter(|c| c.is_visible()) {
                r.draw_rect(rect, bg, m.radius);
            }
        }
    }

    match &node.kind {
        ViewKind::Text { text, style } => r.draw_text(text, style, content.x, content.y),
        ViewKind::Button { label, style, .. } => {
            let base = m.background.unwrap_or(BUTTON_COLOR);
            let fill = if ps.pressed == Some(id) {
                base.lighten(0.35)
            } else if ps.hovered == Some(id) {
                base.lighten(0.2)
            } else {
                base
            };
            let radius = if m.radius == CornerRadius::ZERO {
                CornerRadius::all(4.0)
            } else {
                m.radius
            };
            r.draw_rect(rect, fill, radius);
            r.draw_text(
                label,
                style,
                content.x + BUTTON_PAD_X,
                content.y + BUTTON_PAD_Y,
            );
        }
        ViewKind::TextField {
            value,
            placeholder,
            style,
            ..
        } => {
            let focused = ps.focused == Some(id);
            if m.background.is_none() {
                r.draw_rect(rect, FIELD_COLOR, CornerRadius::all(4.0));
            }
            let tx = content.x + FIELD_PAD_X;
            let ty = content.y + FIELD_PAD_Y;
            let text = value.get();
            if text.is_empty() {
                if !placeholder.is_empty() {
                    let hint = style.clone().with_color(PLACEHOLDER_COLOR);
                    r.draw_text(placeholder, &hint, tx, ty);
                }
            } else {
                r.draw_text(&text, style, tx, ty);
            }
            let underline = if focused { BUTTON_COLOR } else { Color::GREY };
            let bottom = rect.y + rect.h;
            r.draw_line(rect.x, bottom, rect.x + rect.w, bottom, underline);
            if focused && let NodeState::Field(f) = &node.state {
                let cx = tx + r.measure_text(f.prefix(&text), style).width;
                r.draw_line(cx, ty, cx, ty + style.font_size, style.color);
            }
        }
        ViewKind::Image { path } => {
            if let Some(h) = r.load_image(path) {
                r.draw_image(h, content);
            }
        }
        ViewKind::Divider { color, .. } => {
            let y = content.y + content.h / 2.0;
            r.draw_line(content.x, y, content.x + content.w, y, *color);
        }
        ViewKind::Scroll { .. } => {
            r.push_clip(rect);
            let child_origin = rect.origin() - tree.scroll_shift(id);
            for c in tree.children(id) {
                paint(tree, *c, child_origin, r, ps);
            }
            r.pop_clip();
            return;
        }
        _ => {}
    }

    for c in tree.children(id) {
        paint(tree, *c, rect.origin(), r, ps);
    }
}
