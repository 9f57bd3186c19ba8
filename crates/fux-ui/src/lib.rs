#![allow(non_snake_case)]
//! Widgets, the node tree and the frame runtime.
//!
//! Widgets are plain functions returning a [`View`] descriptor; children are
//! attached with [`ViewExt::child`]. A [`Runtime`] mounts the root view,
//! lays it out, routes input and paints through any [`Renderer`].
//!
//! ```rust
//! use fux_core::headless::HeadlessRenderer;
//! use fux_core::*;
//! use fux_ui::*;
//!
//! let count = state(0);
//! let root = Column(Modifier::new().padding(8.0)).child((
//!     Obx({
//!         let count = count.clone();
//!         move |cx| Text(format!("Count: {}", count.watch(cx)))
//!     }),
//!     Button("+", {
//!         let count = count.clone();
//!         move |_| count.update(|c| *c += 1)
//!     }),
//! ));
//!
//! let mut rt = Runtime::new(root, Size::new(200.0, 100.0));
//! let mut r = HeadlessRenderer::new();
//! rt.frame([], &mut r);
//! assert_eq!(rt.tree().texts(rt.root()), vec!["Count: 0"]);
//! ```

pub mod focus;
pub mod hit;
pub mod layout;
pub mod overlay;
pub mod paint;
pub mod router;
pub mod runtime;
pub mod scroll;
pub mod textfield;
pub mod timer;
pub mod tree;

use std::rc::Rc;

use fux_core::*;

pub use overlay::{SnackBarPosition, SnackBarStyle, show_dialog, show_snackbar};
pub use runtime::{FrameReport, Runtime};
pub use scroll::ScrollState;
pub use textfield::TextFieldState;
pub use timer::{Clock, ManualClock, SystemClock, add_interval, poll_inbox};
pub use tree::{NodeId, Tree};

pub fn Empty() -> View {
    View::new(ViewKind::Empty)
}

/// Root scaffold: fills whatever the viewport offers.
pub fn Surface(modifier: Modifier, child: View) -> View {
    View::new(ViewKind::Surface)
        .modifier(modifier)
        .with_children(vec![child])
}

pub fn Box(modifier: Modifier) -> View {
    View::new(ViewKind::Box).modifier(modifier)
}

/// A box with an explicit width and/or height. `None` leaves that axis to
/// the content.
pub fn SizedBox(width: Option<f32>, height: Option<f32>) -> View {
    let mut m = Modifier::new();
    if let Some(w) = width {
        m = m.width(w);
    }
    if let Some(h) = height {
        m = m.height(h);
    }
    Box(m)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(ViewKind::Row { spacing: 0.0 }).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(ViewKind::Column { spacing: 0.0 }).modifier(modifier)
}

pub fn Spacer() -> View {
    Box(Modifier::new().flex_grow(1.0))
}

/// Gives `child` a share of the leftover main-axis space of its row or column.
pub fn Expanded(weight: f32, mut child: View) -> View {
    child.modifier.flex_grow = Some(weight.max(0.0));
    child
}

pub fn Center(modifier: Modifier) -> View {
    View::new(ViewKind::Center).modifier(modifier)
}

pub fn Stack(modifier: Modifier) -> View {
    View::new(ViewKind::Stack).modifier(modifier)
}

pub fn Scroll(modifier: Modifier) -> View {
    View::new(ViewKind::Scroll {
        axis: Axis::Vertical,
    })
    .modifier(modifier)
}

pub fn HorizontalScroll(modifier: Modifier) -> View {
    View::new(ViewKind::Scroll {
        axis: Axis::Horizontal,
    })
    .modifier(modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text {
        text: text.into(),
        style: TextStyle::default(),
    })
}

pub fn Button(label: impl Into<String>, on_click: impl Fn(&mut dyn AppCx) + 'static) -> View {
    View::new(ViewKind::Button {
        label: label.into(),
        style: TextStyle::default().with_color(Color::WHITE),
        on_click: Rc::new(on_click),
    })
}

/// A single-line editor bound to `value`.
pub fn TextField(value: StateCell<String>, placeholder: impl Into<String>) -> View {
    View::new(ViewKind::TextField {
        value,
        placeholder: placeholder.into(),
        style: TextStyle::default(),
        on_submit: None,
        on_blur: None,
    })
}

pub fn Image(modifier: Modifier, path: impl Into<String>) -> View {
    View::new(ViewKind::Image { path: path.into() }).modifier(modifier)
}

/// A one-pixel horizontal rule spanning the width it is offered.
pub fn Divider(color: Color) -> View {
    View::new(ViewKind::Divider {
        color,
        thickness: 1.0,
    })
}

/// Title strip for the top of a [`Scaffold`].
pub fn AppBar(title: impl Into<String>) -> View {
    Box(Modifier::new()
        .fill_max_width()
        .padding_values(EdgeInsets::symmetric(16.0, 14.0))
        .background(paint::BUTTON_COLOR))
    .child(Text(title).color(Color::WHITE).size(20.0))
}

pub fn FloatingActionButton(
    label: impl Into<String>,
    on_click: impl Fn(&mut dyn AppCx) + 'static,
) -> View {
    Button(label, on_click).modifier(
        Modifier::new()
            .background(paint::BUTTON_COLOR)
            .clip_rounded(16.0),
    )
}

/// Page layout: an optional bar on top, `content` filling the rest, and an
/// optional action button floating 16px from the bottom-right corner.
pub fn Scaffold(top_bar: Option<View>, floating_action_button: Option<View>, content: View) -> View {
    let mut page: Vec<View> = Vec::new();
    if let Some(bar) = top_bar {
        page.push(bar);
    }
    page.push(Expanded(1.0, content));

    let mut layers = vec![Column(Modifier::new().fill_max_size()).child(page)];
    if let Some(fab) = floating_action_button {
        layers.push(
            Box(Modifier::new().absolute().offset_right(16.0).offset_bottom(16.0)).child(fab),
        );
    }
    Stack(Modifier::new().fill_max_size()).child(layers)
}

/// Reactive builder. Rebuilds whenever a cell read through `watch` changes.
pub fn Obx(build: impl Fn(&mut BuildCx) -> View + 'static) -> View {
    ObxWith(DependencyPolicy::default(), build)
}

pub fn ObxWith(policy: DependencyPolicy, build: impl Fn(&mut BuildCx) -> View + 'static) -> View {
    View::new(ViewKind::Reactive(Reactive::new(policy, build)))
}

/// Shows `content()` while `cell` holds `true`.
pub fn If(cell: StateCell<bool>, content: impl Fn() -> View + 'static) -> View {
    Obx(move |cx| if cell.watch(cx) { content() } else { Empty() })
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(mut self, children: impl IntoChildren) -> Self {
        let mut kids = std::mem::take(&mut self.children);
        kids.extend(children.into_children());
        self.with_children(kids)
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);

fn style_mut(kind: &mut ViewKind) -> Option<&mut TextStyle> {
    match kind {
        ViewKind::Text { style, .. }
        | ViewKind::Button { style, .. }
        | ViewKind::TextField { style, .. } => Some(style),
        _ => None,
    }
}

/// Method styling for text, buttons and text fields.
pub trait TextStyleExt {
    fn color(self, c: Color) -> View;
    fn size(self, px: f32) -> View;
    fn font(self, family: impl Into<String>) -> View;
}

impl TextStyleExt for View {
    fn color(mut self, c: Color) -> View {
        if let Some(s) = style_mut(&mut self.kind) {
            s.color = c;
        }
        self
    }
    fn size(mut self, px: f32) -> View {
        if let Some(s) = style_mut(&mut self.kind) {
            s.font_size = px.max(0.0);
        }
        self
    }
    fn font(mut self, family: impl Into<String>) -> View {
        if let Some(s) = style_mut(&mut self.kind) {
            s.font_family = Some(family.into());
        }
        self
    }
}

pub trait LinearExt {
    /// Gap between consecutive children of a row or column.
    fn spacing(self, gap: f32) -> View;
}

impl LinearExt for View {
    fn spacing(mut self, gap: f32) -> View {
        if let ViewKind::Row { spacing } | ViewKind::Column { spacing } = &mut self.kind {
            *spacing = gap.max(0.0);
        }
        self
    }
}

pub trait TextFieldExt {
    /// Called with the current text when Enter is pressed.
    fn on_submit(self, f: impl Fn(&mut dyn AppCx, &str) + 'static) -> View;
    /// Called when the field loses focus.
    fn on_blur(self, f: impl Fn(&mut dyn AppCx) + 'static) -> View;
}

impl TextFieldExt for View {
    fn on_submit(mut self, f: impl Fn(&mut dyn AppCx, &str) + 'static) -> View {
        if let ViewKind::TextField { on_submit, .. } = &mut self.kind {
            *on_submit = Some(Rc::new(f));
        }
        self
    }
    fn on_blur(mut self, f: impl Fn(&mut dyn AppCx) + 'static) -> View {
        if let ViewKind::TextField { on_blur, .. } = &mut self.kind {
            *on_blur = Some(Rc::new(f));
        }
        self
    }
}
