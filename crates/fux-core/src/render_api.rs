use crate::{Color, Rect, Size};

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
    /// `None` selects the renderer's default font.
    pub font_family: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            color: Color::BLACK,
            font_family: None,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f32) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    pub fn all(r: f32) -> Self {
        Self {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }
}

/// Opaque handle returned by [`Renderer::load_image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Drawing and measuring primitives the toolkit needs from a backend.
///
/// Measurement calls must not draw and must return the same answer for the
/// same input, so layout can call them as often as it likes. Drawing calls
/// are only made during the render pass.
pub trait Renderer {
    fn begin_frame(&mut self, _viewport: Size) {}
    fn end_frame(&mut self) {}

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Size;
    /// Cached by path; a failed load returns `None` after any fallback.
    fn load_image(&mut self, path: &str) -> Option<ImageHandle>;
    fn measure_image(&mut self, image: ImageHandle) -> Size;

    fn draw_rect(&mut self, rect: Rect, color: Color, radius: CornerRadius);
    fn draw_text(&mut self, text: &str, style: &TextStyle, x: f32, y: f32);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color);
    fn draw_image(&mut self, image: ImageHandle, dest: Rect);

    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);
}
