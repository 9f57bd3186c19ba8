use fux_core::{Key, KeyEvent, StateCell};
use unicode_segmentation::UnicodeSegmentation;

pub const FIELD_WIDTH: f32 = 220.0;
pub const FIELD_PAD_X: f32 = 8.0;
pub const FIELD_PAD_Y: f32 = 8.0;

/// find prev/next grapheme boundaries around a byte index
fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

fn clamp_to_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Retained editing state of a mounted text field. The text itself lives in
/// the bound `StateCell<String>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextFieldState {
    /// Byte offset into the value, always on a char boundary.
    pub caret: usize,
}

/// What a key press asks the runtime to do beyond editing.
#[derive(Debug, PartialEq, Eq)]
pub enum FieldAction {
    None,
    Submit,
}

impl TextFieldState {
    pub fn at_end(text: &str) -> Self {
        Self { caret: text.len() }
    }

    fn caret_in(&self, text: &str) -> usize {
        clamp_to_char_boundary(text, self.caret)
    }

    pub fn insert_text(&mut self, value: &StateCell<String>, s: &str) {
        let mut text = value.get();
        let at = self.caret_in(&text);
        text.insert_str(at, s);
        self.caret = at + s.len();
        value.set(text);
    }

    pub fn delete_backward(&mut self, value: &StateCell<String>) {
        let mut text = value.get();
        let pos = self.caret_in(&text);
        if pos == 0 {
            return;
        }
        let prev = prev_grapheme_boundary(&text, pos);
        text.replace_range(prev..pos, "");
        self.caret = prev;
        value.set(text);
    }

    pub fn delete_forward(&mut self, value: &StateCell<String>) {
        let mut text = value.get();
        let pos = self.caret_in(&text);
        if pos >= text.len() {
            return;
        }
        let next = next_grapheme_boundary(&text, pos);
        text.replace_range(pos..next, "");
        self.caret = pos;
        value.set(text);
    }

    pub fn move_cursor(&mut self, text: &str, delta: isize) {
        let mut pos = self.caret_in(text);
        if delta < 0 {
            for _ in 0..delta.unsigned_abs() {
                pos = prev_grapheme_boundary(text, pos);
            }
        } else {
            for _ in 0..(delta as usize) {
                pos = next_grapheme_boundary(text, pos);
            }
        }
        self.caret = pos;
    }

    /// Applies an editing key. Keys a field does not understand are ignored.
    pub fn handle_key(&mut self, value: &StateCell<String>, ev: &KeyEvent) -> FieldAction {
        match &ev.key {
            Key::Backspace => self.delete_backward(value),
            Key::Delete => self.delete_forward(value),
            Key::ArrowLeft => value.with(|t| self.move_cursor(t, -1)),
            Key::ArrowRight => value.with(|t| self.move_cursor(t, 1)),
            Key::Home => self.caret = 0,
            Key::End => self.caret = value.with(|t| t.len()),
            Key::Enter => return FieldAction::Submit,
            _ => {}
        }
        FieldAction::None
    }

    /// Text before the caret, for placing it when painting.
    pub fn prefix<'a>(&self, text: &'a str) -> &'a str {
        &text[..self.caret_in(text)]
    }
}
