use bitflags::bitflags;

use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3; // Cmd on Mac, Win key on Windows
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    F(u8), // F1-F12
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }
}

/// Everything the windowing layer can hand to the frame loop.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved { position: Vec2 },
    PointerDown { position: Vec2, button: PointerButton },
    PointerUp { position: Vec2, button: PointerButton },
    /// Pixels to add to the scroll offset; positive reveals content further down.
    Wheel { delta_y: f32 },
    KeyDown(KeyEvent),
    TextInput(String),
    WindowResized { width: f32, height: f32 },
    Quit,
}

impl InputEvent {
    pub fn pointer_moved(x: f32, y: f32) -> Self {
        InputEvent::PointerMoved {
            position: Vec2::new(x, y),
        }
    }
    pub fn pointer_down(x: f32, y: f32) -> Self {
        InputEvent::PointerDown {
            position: Vec2::new(x, y),
            button: PointerButton::Primary,
        }
    }
    pub fn pointer_up(x: f32, y: f32) -> Self {
        InputEvent::PointerUp {
            position: Vec2::new(x, y),
            button: PointerButton::Primary,
        }
    }
    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown(KeyEvent::new(key))
    }
    pub fn text(s: impl Into<String>) -> Self {
        InputEvent::TextInput(s.into())
    }

    /// Pointer events are routed by hit-testing; the rest go to the focus owner
    /// or the runtime itself.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerMoved { .. }
                | InputEvent::PointerDown { .. }
                | InputEvent::PointerUp { .. }
                | InputEvent::Wheel { .. }
        )
    }

    pub fn position(&self) -> Option<Vec2> {
        match self {
            InputEvent::PointerMoved { position }
            | InputEvent::PointerDown { position, .. }
            | InputEvent::PointerUp { position, .. } => Some(*position),
            _ => None,
        }
    }
}
