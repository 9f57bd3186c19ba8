//! A renderer that draws into a display list instead of a window.
//!
//! Glyph metrics are fixed (advance `font_size * 0.5`, line height
//! `font_size`) so layouts come out the same on every machine.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::ResourceError;
use crate::{Color, CornerRadius, ImageHandle, Rect, Renderer, Size, TextStyle, Vec2};

pub const DEFAULT_FONT: &str = "sans";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: CornerRadius,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Image {
        image: ImageHandle,
        rect: Rect,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

/// One line per node, in paint order.
impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = |c: &Color| format!("#{:02x}{:02x}{:02x}{:02x}", c.0, c.1, c.2, c.3);
        for (i, n) in self.nodes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match n {
                SceneNode::Rect { rect, color, .. } => write!(
                    f,
                    "rect {},{} {}x{} {}",
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    hex(color)
                )?,
                SceneNode::Text {
                    text,
                    x,
                    y,
                    size,
                    color,
                } => write!(f, "text {text:?} at {x},{y} size {size} {}", hex(color))?,
                SceneNode::Line { from, to, color } => write!(
                    f,
                    "line {},{} -> {},{} {}",
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    hex(color)
                )?,
                SceneNode::Image { image, rect } => write!(
                    f,
                    "image {} {},{} {}x{}",
                    image.0, rect.x, rect.y, rect.w, rect.h
                )?,
                SceneNode::PushClip { rect } => {
                    write!(f, "clip {},{} {}x{}", rect.x, rect.y, rect.w, rect.h)?
                }
                SceneNode::PopClip => write!(f, "unclip")?,
            }
        }
        Ok(())
    }
}

impl Scene {
    /// Every drawn string, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn find_text(&self, needle: &str) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|n| matches!(n, SceneNode::Text { text, .. } if text == needle))
    }
}

pub struct HeadlessRenderer {
    pub scene: Scene,
    fonts: HashSet<String>,
    default_font: Option<String>,
    warned_fonts: HashSet<String>,
    image_files: HashMap<String, Size>,
    fallback_image: Option<String>,
    image_cache: HashMap<String, ImageHandle>,
    image_sizes: Vec<Size>,
    clip_depth: usize,
    frames: u64,
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        let mut r = Self::without_fonts();
        r.fonts.insert(DEFAULT_FONT.to_string());
        r.default_font = Some(DEFAULT_FONT.to_string());
        r
    }

    /// No fonts at all: text measures as zero and is never drawn.
    pub fn without_fonts() -> Self {
        Self {
            scene: Scene::default(),
            fonts: HashSet::new(),
            default_font: None,
            warned_fonts: HashSet::new(),
            image_files: HashMap::new(),
            fallback_image: None,
            image_cache: HashMap::new(),
            image_sizes: Vec::new(),
            clip_depth: 0,
            frames: 0,
        }
    }

    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.fonts.insert(family.into());
        self
    }

    /// Makes `path` loadable with the given pixel size.
    pub fn with_image(mut self, path: impl Into<String>, size: Size) -> Self {
        self.image_files.insert(path.into(), size);
        self
    }

    /// Image used when a requested path is missing.
    pub fn with_fallback_image(mut self, path: impl Into<String>) -> Self {
        self.fallback_image = Some(path.into());
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of distinct images decoded so far.
    pub fn images_loaded(&self) -> usize {
        self.image_sizes.len()
    }

    fn resolve_font(&mut self, style: &TextStyle) -> Result<(), ResourceError> {
        match &style.font_family {
            Some(f) if self.fonts.contains(f) => Ok(()),
            requested => {
                if self.default_font.is_none() {
                    return Err(ResourceError::FontUnavailable(
                        requested.clone().unwrap_or_default(),
                    ));
                }
                if let Some(f) = requested
                    && self.warned_fonts.insert(f.clone())
                {
                    log::warn!("{}; using {DEFAULT_FONT}", ResourceError::FontUnavailable(f.clone()));
                }
                Ok(())
            }
        }
    }

    fn decode(&mut self, path: &str) -> Option<ImageHandle> {
        let size = *self.image_files.get(path)?;
        let handle = ImageHandle(self.image_sizes.len() as u32);
        self.image_sizes.push(size);
        self.image_cache.insert(path.to_string(), handle);
        Some(handle)
    }
}

impl Renderer for HeadlessRenderer {
    fn begin_frame(&mut self, _viewport: Size) {
        self.scene.nodes.clear();
        self.clip_depth = 0;
    }

    fn end_frame(&mut self) {
        debug_assert_eq!(self.clip_depth, 0, "unbalanced clip stack");
        self.frames += 1;
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Size {
        if self.resolve_font(style).is_err() {
            return Size::ZERO;
        }
        let advance = style.font_size * 0.5;
        Size::new(text.chars().count() as f32 * advance, style.font_size)
    }

    fn load_image(&mut self, path: &str) -> Option<ImageHandle> {
        if let Some(h) = self.image_cache.get(path) {
            return Some(*h);
        }
        if let Some(h) = self.decode(path) {
            return Some(h);
        }
        log::warn!("{}", ResourceError::ImageNotFound(path.to_string()));
        let fallback = self.fallback_image.clone()?;
        let h = match self.image_cache.get(&fallback) {
            Some(h) => *h,
            None => self.decode(&fallback)?,
        };
        self.image_cache.insert(path.to_string(), h);
        Some(h)
    }

    fn measure_image(&mut self, image: ImageHandle) -> Size {
        self.image_sizes
            .get(image.0 as usize)
            .copied()
            .unwrap_or(Size::ZERO)
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, radius: CornerRadius) {
        self.scene.nodes.push(SceneNode::Rect {
            rect,
            color,
            radius,
        });
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, x: f32, y: f32) {
        if self.resolve_font(style).is_err() {
            return;
        }
        self.scene.nodes.push(SceneNode::Text {
            text: text.to_string(),
            x,
            y,
            size: style.font_size,
            color: style.color,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.scene.nodes.push(SceneNode::Line {
            from: Vec2::new(x1, y1),
            to: Vec2::new(x2, y2),
            color,
        });
    }

    fn draw_image(&mut self, image: ImageHandle, dest: Rect) {
        if (image.0 as usize) < self.image_sizes.len() {
            self.scene.nodes.push(SceneNode::Image { image, rect: dest });
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.scene.nodes.push(SceneNode::PushClip { rect });
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            log::error!("pop_clip without matching push_clip");
            return;
        }
        self.clip_depth -= 1;
        self.scene.nodes.push(SceneNode::PopClip);
    }
}
