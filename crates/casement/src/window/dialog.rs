//! Dialog adapter and the modal stack.
//!
//! A dialog is a framed window with a dialog-style frame; everything else
//! delegates to [`WindowAdapter`]. Modality is not a property of the
//! adapter but of the pump: while a dialog is modal, the [`ModalStack`]
//! filters interactive messages so only the topmost modal subtree receives
//! input. Paint, timers, and lifecycle messages always pass.

use casement_core::logging::targets;
use casement_core::{Size, WidgetArena, WidgetId, WidgetKind};
use tracing::trace;

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, BindingTable};
use crate::error::ShellResult;
use crate::system::{Message, MessageKind, WindowClass};
use crate::window::{WindowAdapter, WindowOps, WindowState};

/// Adapter for a dialog window.
pub struct DialogAdapter {
    inner: WindowAdapter,
}

impl DialogAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            inner: WindowAdapter::new(widget, WindowClass::Dialog),
        }
    }
}

impl Adapter for DialogAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Dialog
    }

    fn base(&self) -> &AdapterBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        self.inner.base_mut()
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.inner.materialize(ctx)
    }

    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.inner.post_materialize(ctx);
    }

    fn destroy(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.inner.destroy(ctx);
    }

    fn dispatch(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        self.inner.dispatch(ctx, message)
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        self.inner.preferred_size(ctx)
    }

    fn as_window_ops(&mut self) -> Option<&mut dyn WindowOps> {
        Some(&mut self.inner)
    }

    fn window_state(&self) -> Option<WindowState> {
        Some(self.inner.state())
    }
}

// ===== Modal stack =====

/// The currently modal windows, innermost last.
///
/// Nested modal loops push on entry and pop on exit; the pump consults
/// [`ModalStack::allows`] before dispatching each message.
#[derive(Default)]
pub struct ModalStack {
    stack: Vec<WidgetId>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, window: WidgetId) {
        trace!(target: targets::WINDOW, ?window, depth = self.stack.len() + 1, "modal entered");
        self.stack.push(window);
    }

    pub fn pop(&mut self) -> Option<WidgetId> {
        let popped = self.stack.pop();
        trace!(target: targets::WINDOW, window = ?popped, depth = self.stack.len(), "modal left");
        popped
    }

    pub fn top(&self) -> Option<WidgetId> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether `message` may be dispatched under the current modality.
    ///
    /// Interactive messages for widgets outside the topmost modal subtree
    /// are suppressed; everything else passes. Interactive messages naming
    /// an unknown handle are suppressed too, since their target cannot be
    /// proven inside the modal subtree.
    pub fn allows(&self, arena: &WidgetArena, bindings: &BindingTable, message: &Message) -> bool {
        let Some(top) = self.top() else { return true };
        if !is_interactive(message.kind) {
            return true;
        }
        match bindings.widget_for(message.target) {
            Some(widget) => arena.is_in_subtree(widget, top),
            None => false,
        }
    }
}

/// Message kinds suppressed for non-modal windows while a modal loop runs.
fn is_interactive(kind: MessageKind) -> bool {
    matches!(
        kind,
        MessageKind::MouseDown
            | MessageKind::MouseUp
            | MessageKind::MouseMove
            | MessageKind::MouseDoubleClick
            | MessageKind::KeyDown
            | MessageKind::Character
            | MessageKind::Command
            | MessageKind::Notify
            | MessageKind::Scroll
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use casement_core::{Point, Widget};
    use crate::system::RawHandle;

    fn setup() -> (WidgetArena, BindingTable, WidgetId, WidgetId) {
        let mut arena = WidgetArena::new();
        let main = arena.insert(Widget::window("main"));
        let dialog = arena.insert_child(Widget::dialog("modal"), main).unwrap();
        let mut bindings = BindingTable::new();
        bindings.register_handle(main, RawHandle(1));
        bindings.register_handle(dialog, RawHandle(2));
        (arena, bindings, main, dialog)
    }

    #[test]
    fn test_input_outside_modal_subtree_blocked() {
        let (arena, bindings, _, dialog) = setup();
        let mut stack = ModalStack::new();
        stack.push(dialog);
        let to_main = Message::mouse(
            RawHandle(1),
            MessageKind::MouseDown,
            Default::default(),
            Point::new(5, 5),
            Default::default(),
            1,
        );
        let to_dialog = Message::mouse(
            RawHandle(2),
            MessageKind::MouseDown,
            Default::default(),
            Point::new(5, 5),
            Default::default(),
            1,
        );
        assert!(!stack.allows(&arena, &bindings, &to_main));
        assert!(stack.allows(&arena, &bindings, &to_dialog));
    }

    #[test]
    fn test_paint_and_timer_pass_while_modal() {
        let (arena, bindings, _, dialog) = setup();
        let mut stack = ModalStack::new();
        stack.push(dialog);
        let paint = Message {
            target: RawHandle(1),
            kind: MessageKind::Paint,
            param_a: 0,
            param_b: 0,
        };
        let timer = Message::timer(RawHandle(1), 3);
        assert!(stack.allows(&arena, &bindings, &paint));
        assert!(stack.allows(&arena, &bindings, &timer));
    }

    #[test]
    fn test_unknown_handle_input_blocked_while_modal() {
        let (arena, bindings, _, dialog) = setup();
        let mut stack = ModalStack::new();
        let stray = Message::command(RawHandle(99), 1, None);
        assert!(stack.allows(&arena, &bindings, &stray));
        stack.push(dialog);
        assert!(!stack.allows(&arena, &bindings, &stray));
        stack.pop();
        assert!(stack.allows(&arena, &bindings, &stray));
    }
}
