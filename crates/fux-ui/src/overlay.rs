//! Overlays: subtrees laid out against the viewport and drawn above the root.
//!
//! Dialogs and snack bars are plain compositions of `push_overlay`,
//! `remove_overlay` and `add_timer`; the stack itself knows nothing about
//! them.

use fux_core::{AppCx, Color, EdgeInsets, Modifier, OverlayId, TextStyle, View, ViewKind};
use web_time::Duration;

use crate::tree::NodeId;

/// Overlay roots, back to front.
#[derive(Debug, Default)]
pub struct OverlayStack {
    entries: Vec<(OverlayId, NodeId)>,
    next: u64,
}

impl OverlayStack {
    pub fn push(&mut self, root: NodeId) -> OverlayId {
        self.next += 1;
        let id = OverlayId(self.next);
        self.entries.push((id, root));
        id
    }

    pub fn pop(&mut self) -> Option<(OverlayId, NodeId)> {
        self.entries.pop()
    }

    pub fn remove(&mut self, id: OverlayId) -> Option<NodeId> {
        let pos = self.entries.iter().position(|(o, _)| *o == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Back to front, for layout and painting.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|(_, n)| *n)
    }

    /// Front to back, for input.
    pub fn roots_top_down(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().rev().map(|(_, n)| *n)
    }

    pub fn ids(&self) -> Vec<OverlayId> {
        self.entries.iter().map(|(o, _)| *o).collect()
    }
}

pub const SCRIM: Color = Color(0, 0, 0, 128);

/// Pushes a modal dialog: a scrim over the whole viewport with
/// `content` centered on a card.
pub fn show_dialog(cx: &mut dyn AppCx, content: View) -> OverlayId {
    let card = View::new(ViewKind::Box)
        .modifier(
            Modifier::new()
                .padding(16.0)
                .background(Color::WHITE)
                .clip_rounded(8.0),
        )
        .with_children(vec![content]);
    // The scrim is the layer root, so the layer covers the whole viewport.
    let dialog = View::new(ViewKind::Center)
        .modifier(Modifier::new().fill_max_size().background(SCRIM))
        .with_children(vec![card]);
    cx.push_overlay(dialog)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnackBarPosition {
    Top,
    #[default]
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnackBarStyle {
    pub position: SnackBarPosition,
    /// `None` uses the application's default.
    pub duration: Option<Duration>,
    pub background: Color,
    pub text_color: Color,
    pub margin: f32,
}

impl Default for SnackBarStyle {
    fn default() -> Self {
        Self {
            position: SnackBarPosition::Bottom,
            duration: None,
            background: Color(50, 50, 50, 255),
            text_color: Color::WHITE,
            margin: 16.0,
        }
    }
}

/// Shows `message` anchored to the top or bottom edge and removes it after
/// the style's duration. The bar is the layer root, so the layer only covers
/// the bar and input elsewhere reaches the layers below.
pub fn show_snackbar(
    cx: &mut dyn AppCx,
    message: impl Into<String>,
    style: SnackBarStyle,
) -> OverlayId {
    let mut m = Modifier::new()
        .absolute()
        .offset_left(style.margin)
        .offset_right(style.margin)
        .padding_values(EdgeInsets::symmetric(16.0, 12.0))
        .background(style.background)
        .clip_rounded(4.0);
    m = match style.position {
        SnackBarPosition::Top => m.offset_top(style.margin),
        SnackBarPosition::Bottom => m.offset_bottom(style.margin),
    };
    let bar = View::new(ViewKind::Box).modifier(m).with_children(vec![View::new(
        ViewKind::Text {
            text: message.into(),
            style: TextStyle::default().with_color(style.text_color),
        },
    )]);

    let id = cx.push_overlay(bar);
    let after = style.duration.unwrap_or_else(|| cx.snackbar_duration());
    cx.add_timer(
        after,
        Box::new(move |cx: &mut dyn AppCx| {
            cx.remove_overlay(id);
        }),
    );
    id
}
