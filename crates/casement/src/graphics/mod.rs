//! Drawing: the graphics context and the native resource cache.

pub mod context;
pub mod resources;

pub use context::{Graphics, PaintHook, get_radial};
pub use resources::ResourceCache;
