//! # State cells and reactive builders
//!
//! fux keeps a retained tree of nodes and only rebuilds the parts that
//! depend on state that changed. The pieces in this crate:
//!
//! - `StateCell<T>`: an observable value.
//! - `Reactive`: a node that owns a build closure and rebuilds when a cell it
//!   watched changes.
//! - `View`: the widget descriptor a build produces.
//! - `Renderer`: what a drawing backend has to provide.
//!
//! ## State cells
//!
//! ```rust
//! use fux_core::*;
//!
//! let count = state(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! `set` does nothing when the new value equals the old one, so writing the
//! same value twice notifies subscribers once.
//!
//! ## Tracked reads
//!
//! Dependencies are recorded through the `BuildCx` a builder receives, not
//! through a global:
//!
//! ```rust
//! use fux_core::*;
//!
//! let name = state("Jane".to_string());
//! let r = Reactive::new(DependencyPolicy::Accumulate, {
//!     let name = name.clone();
//!     move |cx| {
//!         View::new(ViewKind::Text {
//!             text: format!("Hi {}", name.watch(cx)),
//!             style: TextStyle::default(),
//!         })
//!     }
//! });
//! assert_eq!(name.subscriber_count(), 1);
//!
//! name.set("Doe".to_string());
//! assert_eq!(r.generation(), 2);
//! assert_eq!(r.take_child().map(|v| v.texts()), Some(vec!["Hi Doe".to_string()]));
//! ```
//!
//! `get()` is an untracked read and never subscribes.

pub mod color;
pub mod error;
pub mod geometry;
pub mod handoff;
pub mod headless;
pub mod input;
pub mod modifier;
pub mod prelude;
pub mod reactive;
pub mod render_api;
pub mod state;
pub mod tests;
pub mod view;

pub use color::*;
pub use error::*;
pub use geometry::*;
pub use handoff::*;
pub use input::*;
pub use modifier::*;
pub use reactive::*;
pub use render_api::*;
pub use state::*;
pub use view::*;
