//! Casement - a native adapter layer for the Casement widget model.
//!
//! This crate binds the platform-neutral widget tree from `casement-core`
//! to a handle-based windowing system behind the [`NativeSystem`] trait.
//! Each widget kind gets an adapter that owns exactly one native handle,
//! translates between the logical model and native control state, and
//! turns native messages back into typed signals.
//!
//! The [`Shell`] is the subsystem context: it materializes widget trees
//! into native windows, pumps the message loop, runs nested modal loops
//! for dialogs, and owns the graphics resource cache and timer registry.
//!
//! # Example
//!
//! ```
//! use casement::Shell;
//! use casement_core::{Rect, Widget};
//!
//! let mut shell = Shell::headless()?;
//! let window = shell.add_root(Widget::window("Demo").with_bounds(Rect::new(100, 100, 400, 300)));
//! let button = shell.add_child(Widget::button("Quit").with_bounds(Rect::new(10, 10, 80, 24)), window)?;
//!
//! let queue = shell.queue();
//! shell.widget(button).unwrap().signals.clicked.connect(move |_| queue.quit());
//!
//! shell.open_window(window)?;
//! shell.click(button)?;
//! shell.run();
//! # Ok::<(), casement::ShellError>(())
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod graphics;
pub mod menu;
pub mod shell;
pub mod system;
pub mod timer;
pub mod window;

pub use config::ShellConfig;
pub use error::{ShellError, ShellResult};
pub use graphics::{Graphics, PaintHook, ResourceCache};
pub use shell::{Shell, ShellQueue};
pub use system::headless::HeadlessSystem;
pub use system::{
    Message, MessageChoice, MessageChoices, MessageKind, NativeSystem, RawHandle, TextMetrics,
    WindowClass,
};
pub use timer::TimerRegistry;
pub use window::WindowState;
