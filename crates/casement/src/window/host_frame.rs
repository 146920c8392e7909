//! Host frames: windows embedded into a native handle the application does
//! not own.
//!
//! The embedding host supplies a raw parent handle; the frame materializes
//! as a child of it and behaves like a window from the inside. The one
//! hard rule is teardown: the host owns its native tree, so closing a host
//! frame forgets the handle instead of destroying it.

use casement_core::logging::targets;
use casement_core::{WidgetId, WidgetKind};
use tracing::warn;

use crate::adapter::{Adapter, AdapterBase, AdapterCtx};
use crate::error::{ShellError, ShellResult};
use crate::system::{Message, RawHandle, StyleFlags, WindowClass};
use crate::window::{WindowAdapter, WindowOps, WindowState};

/// Adapter for a window hosted inside an externally owned native handle.
pub struct HostFrameAdapter {
    inner: WindowAdapter,
    closed: bool,
}

impl HostFrameAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            inner: WindowAdapter::new(widget, WindowClass::Frame),
            closed: false,
        }
    }

    /// Release our reference without touching the host's native tree.
    fn release(&mut self, ctx: &mut AdapterCtx<'_>) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.inner.base_mut().forget(ctx);
        if let Some(w) = ctx.arena.get(self.inner.base().widget()) {
            w.signals.closed.emit(());
        }
    }
}

impl Adapter for HostFrameAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::HostFrame
    }

    fn base(&self) -> &AdapterBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        self.inner.base_mut()
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let widget = self.inner.base().widget();
        let host = ctx
            .arena
            .get(widget)
            .ok_or(ShellError::StaleWidget)?
            .host_parent
            .ok_or(ShellError::Creation {
                kind: WidgetKind::HostFrame.name(),
                reason: "no host parent handle supplied".to_string(),
            })?;
        self.inner.base_mut().create_with_parent(
            ctx,
            WindowClass::Frame,
            StyleFlags::empty(),
            Some(RawHandle(host)),
        )?;
        Ok(())
    }

    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.inner.post_materialize(ctx);
    }

    fn destroy(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.release(ctx);
    }

    fn dispatch(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        self.inner.dispatch(ctx, message)
    }

    fn as_window_ops(&mut self) -> Option<&mut dyn WindowOps> {
        Some(self)
    }

    fn window_state(&self) -> Option<WindowState> {
        Some(if self.closed {
            WindowState::Closed
        } else {
            self.inner.state()
        })
    }
}

impl WindowOps for HostFrameAdapter {
    fn close(&mut self, ctx: &mut AdapterCtx<'_>) {
        if let Some(w) = ctx.arena.get(self.inner.base().widget()) {
            w.signals.closing.emit(());
        }
        self.release(ctx);
    }

    fn relayout(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.inner.relayout(ctx);
    }

    fn center(&mut self, _ctx: &mut AdapterCtx<'_>) {
        // Position belongs to the host.
        warn!(target: targets::WINDOW, "center ignored for a hosted frame");
    }

    fn to_front(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.inner.to_front(ctx);
    }

    fn state(&self) -> WindowState {
        if self.closed {
            WindowState::Closed
        } else {
            self.inner.state()
        }
    }
}
