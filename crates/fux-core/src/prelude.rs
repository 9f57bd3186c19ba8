pub use crate::color::Color;
pub use crate::error::*;
pub use crate::geometry::{Axis, Constraints, EdgeInsets, Rect, Size, UNBOUNDED, Vec2};
pub use crate::handoff::{Inbox, Producer, handoff};
pub use crate::headless::{HeadlessRenderer, Scene, SceneNode};
pub use crate::input::*;
pub use crate::modifier::Modifier;
pub use crate::reactive::{BuildCx, DependencyPolicy, Reactive};
pub use crate::render_api::{CornerRadius, ImageHandle, Renderer, TextStyle};
pub use crate::state::{StateCell, state};
pub use crate::view::{AppCx, Callback, OverlayId, TimerId, View, ViewKind};
