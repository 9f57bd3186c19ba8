use std::rc::Rc;

use web_time::{Duration, Instant};

use crate::{Axis, Color, Modifier, Reactive, Size, StateCell, TextStyle};

/// Handle to a pushed overlay, stable until the overlay is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

pub type Callback = Rc<dyn Fn(&mut dyn AppCx)>;
pub type SubmitCallback = Rc<dyn Fn(&mut dyn AppCx, &str)>;
pub type TimerCallback = Box<dyn FnOnce(&mut dyn AppCx)>;

/// What callbacks may do to the running application.
///
/// Implemented by the runtime; widget callbacks, timers and overlay helpers
/// all talk to the application through this.
pub trait AppCx {
    fn push_overlay(&mut self, view: View) -> OverlayId;
    /// Removes the topmost overlay. No-op when there is none.
    fn pop_overlay(&mut self) -> Option<OverlayId>;
    /// Removes a specific overlay; `false` if it is already gone.
    fn remove_overlay(&mut self, id: OverlayId) -> bool;
    fn overlay_count(&self) -> usize;

    /// One-shot callback, due `delay` from now. Fires no earlier than the next frame.
    fn add_timer(&mut self, delay: Duration, callback: TimerCallback) -> TimerId;
    fn remove_timer(&mut self, id: TimerId) -> bool;
    fn now(&self) -> Instant;

    fn viewport(&self) -> Size;
    fn invalidate_layout(&mut self);
    fn clear_focus(&mut self);
    /// Default lifetime of a transient message.
    fn snackbar_duration(&self) -> Duration;
}

#[derive(Clone)]
pub enum ViewKind {
    Empty,
    Box,
    /// Root scaffold; fills its constraints.
    Surface,
    Row {
        spacing: f32,
    },
    Column {
        spacing: f32,
    },
    Stack,
    Center,
    Scroll {
        axis: Axis,
    },
    Text {
        text: String,
        style: TextStyle,
    },
    Button {
        label: String,
        style: TextStyle,
        on_click: Callback,
    },
    TextField {
        value: StateCell<String>,
        placeholder: String,
        style: TextStyle,
        on_submit: Option<SubmitCallback>,
        on_blur: Option<Callback>,
    },
    Image {
        path: String,
    },
    /// Horizontal rule across the offered width.
    Divider {
        color: Color,
        thickness: f32,
    },
    Reactive(Rc<Reactive>),
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Empty => write!(f, "Empty"),
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Surface => write!(f, "Surface"),
            ViewKind::Row { spacing } => f.debug_struct("Row").field("spacing", spacing).finish(),
            ViewKind::Column { spacing } => {
                f.debug_struct("Column").field("spacing", spacing).finish()
            }
            ViewKind::Stack => write!(f, "Stack"),
            ViewKind::Center => write!(f, "Center"),
            ViewKind::Scroll { axis } => f.debug_struct("Scroll").field("axis", axis).finish(),
            ViewKind::Text { text, style } => f
                .debug_struct("Text")
                .field("text", text)
                .field("font_size", &style.font_size)
                .finish(),
            ViewKind::Button { label, .. } => f
                .debug_struct("Button")
                .field("label", label)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::TextField {
                value, placeholder, ..
            } => f
                .debug_struct("TextField")
                .field("value", &value.get())
                .field("placeholder", placeholder)
                .finish(),
            ViewKind::Image { path } => f.debug_struct("Image").field("path", path).finish(),
            ViewKind::Divider { thickness, .. } => {
                f.debug_struct("Divider").field("thickness", thickness).finish()
            }
            ViewKind::Reactive(r) => f.debug_tuple("Reactive").field(&r.id()).finish(),
        }
    }
}

impl ViewKind {
    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Empty => "Empty",
            ViewKind::Box => "Box",
            ViewKind::Surface => "Surface",
            ViewKind::Row { .. } => "Row",
            ViewKind::Column { .. } => "Column",
            ViewKind::Stack => "Stack",
            ViewKind::Center => "Center",
            ViewKind::Scroll { .. } => "Scroll",
            ViewKind::Text { .. } => "Text",
            ViewKind::Button { .. } => "Button",
            ViewKind::TextField { .. } => "TextField",
            ViewKind::Image { .. } => "Image",
            ViewKind::Divider { .. } => "Divider",
            ViewKind::Reactive(_) => "Reactive",
        }
    }

    pub fn is_focusable(&self) -> bool {
        matches!(self, ViewKind::TextField { .. })
    }
}

/// Widget descriptor. Built by the application, consumed when mounted.
#[derive(Clone, Debug)]
pub struct View {
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            kind,
            modifier: Modifier::default(),
            children: vec![],
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }

    /// Depth-first text of every `Text` node, for tests and logs.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        fn walk(v: &View, out: &mut Vec<String>) {
            if let ViewKind::Text { text, .. } = &v.kind {
                out.push(text.clone());
            }
            for c in &v.children {
                walk(c, out);
            }
        }
        walk(self, &mut out);
        out
    }
}
