//! Casement core - the platform-neutral widget model.
//!
//! This crate holds everything the windowing layer consumes but does not
//! own: geometry and color values, font descriptions, input event records,
//! the signal/slot mechanism, logical timers, and the widget tree itself.
//! Nothing in this crate touches a native handle.
//!
//! # Key Types
//!
//! - [`Widget`] / [`WidgetArena`] - the logical widget tree
//! - [`Signal`] - typed notification from widgets to the application
//! - [`Timer`] - a logical timer description
//! - [`Point`], [`Size`], [`Rect`] - integer pixel geometry
//! - [`Color`], [`Font`] - value types that key native resource caches
//!
//! # Example
//!
//! ```
//! use casement_core::{Rect, Widget, WidgetArena};
//!
//! let mut arena = WidgetArena::new();
//! let window = arena.insert(Widget::window("Demo").with_bounds(Rect::new(100, 100, 400, 300)));
//! let button = arena
//!     .insert_child(Widget::button("Quit").with_bounds(Rect::new(10, 10, 80, 24)), window)
//!     .unwrap();
//!
//! assert_eq!(arena.parent(button), Some(window));
//! ```

pub mod color;
pub mod error;
pub mod event;
pub mod font;
pub mod geometry;
pub mod logging;
pub mod signal;
pub mod timer;
pub mod widget;

pub use color::{Color, SystemColor};
pub use error::{CoreError, CoreResult};
pub use event::{
    Key, KeyEvent, KeyKind, Modifiers, MouseButton, MouseEvent, MouseKind, WindowEvent, WindowKind,
};
pub use font::{Font, FontStyle};
pub use geometry::{Point, Rect, Size};
pub use signal::{ConnectionId, Signal};
pub use timer::{Timer, TimerId};
pub use widget::{
    Accelerator, Column, ItemsModel, Model, RangeModel, TableModel, TabsModel, TreeNode, Widget,
    WidgetArena, WidgetId, WidgetKind, WidgetSignals,
};
