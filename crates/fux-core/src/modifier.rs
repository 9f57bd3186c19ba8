use crate::{Color, CornerRadius, EdgeInsets};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PositionType {
    #[default]
    Relative,
    /// Placed by a parent `Stack` from the `offset_*` edges.
    Absolute,
}

/// Layout and decoration attributes shared by every view kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max_w: bool,
    pub fill_max_h: bool,
    pub padding: EdgeInsets,
    pub background: Option<Color>,
    pub radius: CornerRadius,
    pub flex_grow: Option<f32>,
    pub position_type: PositionType,
    pub offset_left: Option<f32>,
    pub offset_right: Option<f32>,
    pub offset_top: Option<f32>,
    pub offset_bottom: Option<f32>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.width = Some(w);
        self.height = Some(h);
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max_w = true;
        self.fill_max_h = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn fill_max_height(mut self) -> Self {
        self.fill_max_h = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = EdgeInsets::all(v);
        self
    }
    pub fn padding_values(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }
    /// Solid fill drawn behind the node's content.
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
    pub fn clip_rounded(mut self, radius: f32) -> Self {
        self.radius = CornerRadius::all(radius);
        self
    }
    pub fn corner_radius(mut self, radius: CornerRadius) -> Self {
        self.radius = radius;
        self
    }
    pub fn flex_grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }
    pub fn absolute(mut self) -> Self {
        self.position_type = PositionType::Absolute;
        self
    }
    pub fn offset(
        mut self,
        left: Option<f32>,
        top: Option<f32>,
        right: Option<f32>,
        bottom: Option<f32>,
    ) -> Self {
        self.offset_left = left;
        self.offset_top = top;
        self.offset_right = right;
        self.offset_bottom = bottom;
        self
    }
    pub fn offset_left(mut self, v: f32) -> Self {
        self.offset_left = Some(v);
        self
    }
    pub fn offset_right(mut self, v: f32) -> Self {
        self.offset_right = Some(v);
        self
    }
    pub fn offset_top(mut self, v: f32) -> Self {
        self.offset_top = Some(v);
        self
    }
    pub fn offset_bottom(mut self, v: f32) -> Self {
        self.offset_bottom = Some(v);
        self
    }

    pub fn is_positioned(&self) -> bool {
        self.position_type == PositionType::Absolute
    }

    pub fn flex_weight(&self) -> f32 {
        self.flex_grow.unwrap_or(0.0).max(0.0)
    }
}
