//! # Scroll model
//!
//! A scroll region keeps its retained [`ScrollState`] on the node. Layout
//! feeds it the viewport and content extents along the scroll axis; wheel
//! input moves the offset. The offset is applied on the fly when painting
//! and hit-testing, never written into descendant rectangles.

/// Offset plus the two extents it is clamped against.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    offset: f32,
    viewport: f32,
    content: f32,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
    pub fn viewport(&self) -> f32 {
        self.viewport
    }
    pub fn content(&self) -> f32 {
        self.content
    }

    pub fn max_offset(&self) -> f32 {
        (self.content - self.viewport).max(0.0)
    }

    pub fn set_viewport(&mut self, v: f32) {
        self.viewport = v.max(0.0);
        self.clamp_offset();
    }

    pub fn set_content(&mut self, c: f32) {
        self.content = c.max(0.0);
        self.clamp_offset();
    }

    pub fn set_offset(&mut self, off: f32) {
        self.offset = off.clamp(0.0, self.max_offset());
    }

    /// Moves by `delta` pixels, clamped; returns the part that was not consumed.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let before = self.offset;
        self.set_offset(before + delta);
        delta - (self.offset - before)
    }

    fn clamp_offset(&mut self) {
        let max_off = self.max_offset();
        if self.offset > max_off {
            self.offset = max_off;
        }
        if self.offset < 0.0 {
            self.offset = 0.0;
        }
    }
}
