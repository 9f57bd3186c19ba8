/// Extent used for "size to content" along an axis.
pub const UNBOUNDED: f32 = f32::INFINITY;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + o.x,
            y: self.y + o.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - o.x,
            y: self.y - o.y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn main(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn cross(&self, axis: Axis) -> f32 {
        self.main(axis.flip())
    }

    /// Builds a size from main/cross extents along `axis`.
    pub fn from_axes(axis: Axis, main: f32, cross: f32) -> Self {
        match axis {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    /// Clamps negative and NaN extents to zero.
    ///
    /// A negative extent is a layout bug; debug builds stop here so the
    /// offending widget is found, release builds keep running with zero.
    pub fn sanitized(self) -> Size {
        let ok = self.width >= 0.0 && self.height >= 0.0;
        debug_assert!(ok, "negative or NaN layout size: {self:?}");
        if !ok {
            log::error!("clamping invalid layout size {self:?}");
        }
        Size {
            width: if self.width >= 0.0 { self.width } else { 0.0 },
            height: if self.height >= 0.0 { self.height } else { 0.0 },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Vec2, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.width,
            h: size.height,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.w,
            height: self.h,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.w / 2.0,
            y: self.y + self.h / 2.0,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn translate(&self, by: Vec2) -> Rect {
        Rect {
            x: self.x + by.x,
            y: self.y + by.y,
            ..*self
        }
    }

    pub fn inset(&self, e: EdgeInsets) -> Rect {
        Rect {
            x: self.x + e.left,
            y: self.y + e.top,
            w: (self.w - e.horizontal()).max(0.0),
            h: (self.h - e.vertical()).max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn all(v: f32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    /// `(left, top, right, bottom)`
    pub fn ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

impl Axis {
    pub fn flip(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Min/max extents a parent offers a child during layout.
///
/// `max_*` may be [`UNBOUNDED`], which asks the child for its natural size
/// along that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Constraints {
    pub fn tight(size: Size) -> Self {
        Self {
            min_width: size.width,
            max_width: size.width,
            min_height: size.height,
            max_height: size.height,
        }
    }

    pub fn loose(max: Size) -> Self {
        Self {
            min_width: 0.0,
            max_width: max.width,
            min_height: 0.0,
            max_height: max.height,
        }
    }

    pub fn unbounded() -> Self {
        Self::loose(Size::new(UNBOUNDED, UNBOUNDED))
    }

    pub fn max(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    pub fn min(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    pub fn is_bounded(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.has_bounded_width(),
            Axis::Vertical => self.has_bounded_height(),
        }
    }

    pub fn max_along(&self, axis: Axis) -> f32 {
        self.max().main(axis)
    }

    pub fn min_along(&self, axis: Axis) -> f32 {
        self.min().main(axis)
    }

    /// Drops the minimums, keeping the maximums.
    pub fn loosen(&self) -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            ..*self
        }
    }

    /// Repairs negative/NaN extents and `min > max`.
    pub fn normalized(self) -> Self {
        fn fix(v: f32) -> f32 {
            if v >= 0.0 { v } else { 0.0 }
        }
        let ok = self.min_width >= 0.0
            && self.min_height >= 0.0
            && self.max_width >= 0.0
            && self.max_height >= 0.0
            && self.min_width <= self.max_width
            && self.min_height <= self.max_height;
        debug_assert!(ok, "invalid constraints: {self:?}");
        if ok {
            return self;
        }
        log::error!("clamping invalid constraints {self:?}");
        let max_width = fix(self.max_width);
        let max_height = fix(self.max_height);
        Self {
            min_width: fix(self.min_width).min(max_width),
            max_width,
            min_height: fix(self.min_height).min(max_height),
            max_height,
        }
    }

    /// Removes padding from both bounds, never going below zero.
    pub fn deflate(&self, e: EdgeInsets) -> Self {
        let h = e.horizontal();
        let v = e.vertical();
        Self {
            min_width: (self.min_width - h).max(0.0),
            max_width: (self.max_width - h).max(0.0),
            min_height: (self.min_height - v).max(0.0),
            max_height: (self.max_height - v).max(0.0),
        }
    }

    /// Pins the width to `w`, clamped into the current range.
    pub fn tighten_width(&self, w: f32) -> Self {
        let w = w.max(self.min_width).min(self.max_width);
        Self {
            min_width: w,
            max_width: w,
            ..*self
        }
    }

    /// Pins the height to `h`, clamped into the current range.
    pub fn tighten_height(&self, h: f32) -> Self {
        let h = h.max(self.min_height).min(self.max_height);
        Self {
            min_height: h,
            max_height: h,
            ..*self
        }
    }

    /// Constraints along `axis` set to `[min, max]`, leaving the other axis.
    pub fn with_axis(&self, axis: Axis, min: f32, max: f32) -> Self {
        match axis {
            Axis::Horizontal => Self {
                min_width: min,
                max_width: max,
                ..*self
            },
            Axis::Vertical => Self {
                min_height: min,
                max_height: max,
                ..*self
            },
        }
    }

    pub fn constrain(&self, s: Size) -> Size {
        Size {
            width: s.width.max(self.min_width).min(self.max_width),
            height: s.height.max(self.min_height).min(self.max_height),
        }
    }
}
