//! Top-level window adapters: frame windows, dialogs, and host frames.
//!
//! A [`WindowAdapter`] owns everything with window lifetime: the native
//! frame handle, the accelerator table, the tooltip controller, and the
//! reusable input-event records that are rewritten per dispatched message.
//! Dialogs and host frames are thin specializations in [`dialog`] and
//! [`host_frame`]; the modal loop itself is pumped by the shell.

pub mod dialog;
pub mod host_frame;

pub use dialog::{DialogAdapter, ModalStack};
pub use host_frame::HostFrameAdapter;

use casement_core::logging::targets;
use casement_core::{
    Accelerator, KeyEvent, KeyKind, MouseEvent, MouseKind, Point, Rect, WidgetId, WidgetKind,
    WindowEvent, WindowKind,
};
use tracing::{debug, trace, warn};

use crate::adapter::{Adapter, AdapterBase, AdapterCtx};
use crate::error::ShellResult;
use crate::graphics::Graphics;
use crate::menu;
use crate::system::{Message, MessageKind, RawHandle, StyleFlags, WindowClass};

/// Lifecycle of a top-level adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WindowState {
    #[default]
    Created,
    Open,
    Closing,
    Closed,
}

/// Operations shared by windows, dialogs, and host frames.
pub trait WindowOps {
    /// Close the window. Idempotent beyond `Closing`.
    fn close(&mut self, ctx: &mut AdapterCtx<'_>);
    /// Re-push bounds for the whole child tree and repaint.
    fn relayout(&mut self, ctx: &mut AdapterCtx<'_>);
    /// Center the window within the screen.
    fn center(&mut self, ctx: &mut AdapterCtx<'_>);
    fn to_front(&mut self, ctx: &mut AdapterCtx<'_>);
    fn state(&self) -> WindowState;
}

/// Adapter for a top-level framed window.
pub struct WindowAdapter {
    base: AdapterBase,
    class: WindowClass,
    state: WindowState,
    tooltip: Option<RawHandle>,
    /// The attached menu bar widget, torn down at close.
    menu_bar: Option<WidgetId>,
    accelerators_set: bool,
    /// Reusable event records, rewritten in place per dispatched message.
    mouse_cache: MouseEvent,
    key_cache: KeyEvent,
    window_cache: WindowEvent,
    /// The widget capturing mouse input between button-down and button-up.
    drag: Option<WidgetId>,
    hover: Option<WidgetId>,
}

impl WindowAdapter {
    pub fn new(widget: WidgetId, class: WindowClass) -> Self {
        Self {
            base: AdapterBase::new(widget),
            class,
            state: WindowState::Created,
            tooltip: None,
            menu_bar: None,
            accelerators_set: false,
            mouse_cache: MouseEvent::default(),
            key_cache: KeyEvent::default(),
            window_cache: WindowEvent::default(),
            drag: None,
            hover: None,
        }
    }

    pub fn frame(widget: WidgetId) -> Self {
        Self::new(widget, WindowClass::Frame)
    }

    fn top_level_style(&self, ctx: &AdapterCtx<'_>) -> StyleFlags {
        let mut style = StyleFlags::empty();
        if let Some(w) = ctx.arena.get(self.base.widget()) {
            if w.titled {
                style |= StyleFlags::TITLED;
            }
            if w.resizable {
                style |= StyleFlags::RESIZABLE;
            }
        }
        if self.class == WindowClass::Dialog {
            style |= StyleFlags::DIALOG_FRAME;
        }
        style
    }

    /// Post-open setup: accelerators, tooltips, menu bar. Associated once
    /// here and torn down at close.
    fn open_extras(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let widget = self.base.widget();

        let accelerators: Vec<Accelerator> = ctx
            .arena
            .get(widget)
            .map(|w| w.accelerators.clone())
            .unwrap_or_default();
        if !accelerators.is_empty() {
            ctx.system.set_accelerators(handle, &accelerators);
            self.accelerators_set = true;
        }

        let tips: Vec<(RawHandle, String)> = ctx
            .arena
            .descendants(widget)
            .into_iter()
            .filter_map(|id| {
                let text = ctx.arena.get(id)?.tooltip.clone()?;
                Some((ctx.handle_of(id)?, text))
            })
            .collect();
        if !tips.is_empty() {
            match ctx.system.create_tooltip(handle) {
                Ok(tooltip) => {
                    for (target, text) in &tips {
                        ctx.system.add_tool(tooltip, *target, text);
                    }
                    self.tooltip = Some(tooltip);
                }
                Err(err) => {
                    warn!(target: targets::WINDOW, %err, "tooltip controller creation failed")
                }
            }
        }

        if let Some(bar) = ctx.arena.get(widget).and_then(|w| w.menu_bar) {
            match menu::materialize(ctx, bar) {
                Ok(menu_handle) => {
                    ctx.system.attach_menu_bar(handle, menu_handle);
                    self.menu_bar = Some(bar);
                }
                Err(err) => {
                    warn!(target: targets::WINDOW, %err, "menu bar materialization failed")
                }
            }
        }
    }

    fn emit_window(&mut self, ctx: &AdapterCtx<'_>, kind: WindowKind) {
        let bounds = ctx
            .arena
            .get(self.base.widget())
            .map(|w| w.bounds)
            .unwrap_or(Rect::ZERO);
        self.window_cache = WindowEvent { kind, bounds };
        if let Some(w) = ctx.arena.get(self.base.widget()) {
            w.signals.window.emit(self.window_cache);
        }
    }

    // ----- Paint -----

    fn on_paint(&mut self, ctx: &mut AdapterCtx<'_>) -> i64 {
        let Some(handle) = self.base.handle() else { return 0 };
        let widget = self.base.widget();
        let ticket = ctx.system.begin_paint(handle);
        let hook = ctx.bindings.take_paint_hook(widget);
        let (_, background) = self.base.color_hook(ctx);
        {
            let mut graphics =
                Graphics::paint(&mut *ctx.system, &mut *ctx.resources, handle, ticket);
            if let Some(color) = background {
                graphics.save();
                graphics.set_color(color);
                graphics.fill_rect(ticket.dirty);
                graphics.restore();
            }
            if let Some(mut hook) = hook {
                hook(&mut graphics);
                ctx.bindings.put_paint_hook(widget, hook);
            }
        }
        0
    }

    // ----- Mouse routing -----

    /// Hit-test the logical tree, maintain the drag component across
    /// button-down → move → button-up, and deliver into the target's
    /// client space.
    fn on_mouse(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        let window = self.base.widget();
        let at = message.point();
        let target = match self.drag {
            Some(dragged) if ctx.arena.contains(dragged) => dragged,
            _ => hit_test(ctx, window, at).unwrap_or(window),
        };
        match message.kind {
            MessageKind::MouseDown => self.drag = Some(target),
            MessageKind::MouseUp => self.drag = None,
            MessageKind::MouseMove => {
                if self.hover != Some(target) {
                    trace!(target: targets::WINDOW, from = ?self.hover, to = ?target, "hover change");
                    self.hover = Some(target);
                }
            }
            _ => {}
        }
        let origin = origin_within(ctx, window, target);
        let kind = match message.kind {
            MessageKind::MouseDown => MouseKind::Down,
            MessageKind::MouseUp => MouseKind::Up,
            MessageKind::MouseDoubleClick => MouseKind::DoubleClick,
            _ => MouseKind::Moved,
        };
        let (button, modifiers, clicks) = message.mouse_params();
        self.mouse_cache = MouseEvent {
            kind,
            button,
            position: Point::new(at.x - origin.x, at.y - origin.y),
            modifiers,
            click_count: clicks,
        };
        if let Some(w) = ctx.arena.get(target) {
            w.signals.mouse.emit(self.mouse_cache);
        }
        0
    }

    // ----- Key routing -----

    /// Keys go to the focused component if it belongs to this window, else
    /// to the window itself.
    fn on_key(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        let Some((key, modifiers)) = message.key() else {
            debug!(target: targets::DISPATCH, "undecodable key message dropped");
            return 0;
        };
        let window = self.base.widget();
        let target = ctx
            .system
            .focused()
            .and_then(|h| ctx.bindings.widget_for(h))
            .filter(|&id| id != window && ctx.arena.is_in_subtree(id, window))
            .unwrap_or(window);
        let kind = if message.kind == MessageKind::Character {
            KeyKind::Char
        } else {
            KeyKind::Down
        };
        self.key_cache = KeyEvent {
            kind,
            key,
            modifiers,
        };
        if let Some(w) = ctx.arena.get(target) {
            w.signals.key.emit(self.key_cache);
        }
        0
    }

    fn on_close_request(&mut self, ctx: &mut AdapterCtx<'_>) -> i64 {
        if let Some(w) = ctx.arena.get(self.base.widget()) {
            w.signals.closing.emit(());
        }
        self.emit_window(ctx, WindowKind::Closing);
        self.close_window(ctx);
        0
    }

    /// Full teardown: tooltip, accelerators, menu, then the handle.
    fn close_window(&mut self, ctx: &mut AdapterCtx<'_>) {
        if self.state >= WindowState::Closing {
            return;
        }
        self.state = WindowState::Closing;
        let handle = self.base.handle();
        if let Some(tooltip) = self.tooltip.take() {
            ctx.system.destroy_handle(tooltip);
        }
        if self.accelerators_set {
            if let Some(h) = handle {
                ctx.system.clear_accelerators(h);
            }
            self.accelerators_set = false;
        }
        if let Some(bar) = self.menu_bar.take() {
            menu::destroy(ctx, bar);
        }
        self.base.destroy(ctx);
        self.state = WindowState::Closed;
        if let Some(w) = ctx.arena.get(self.base.widget()) {
            w.signals.closed.emit(());
        }
        self.emit_window(ctx, WindowKind::Closed);
        debug!(target: targets::WINDOW, widget = ?self.base.widget(), "window closed");
    }
}

impl Adapter for WindowAdapter {
    fn kind(&self) -> WidgetKind {
        match self.class {
            WindowClass::Dialog => WidgetKind::Dialog,
            _ => WidgetKind::Window,
        }
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let style = self.top_level_style(ctx);
        self.base.create_with_parent(ctx, self.class, style, None)?;
        Ok(())
    }

    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.open_extras(ctx);
        self.state = WindowState::Open;
        self.emit_window(ctx, WindowKind::Opened);
    }

    fn destroy(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.close_window(ctx);
    }

    fn dispatch(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        match message.kind {
            MessageKind::Paint => self.on_paint(ctx),
            MessageKind::MouseDown
            | MessageKind::MouseUp
            | MessageKind::MouseMove
            | MessageKind::MouseDoubleClick => self.on_mouse(ctx, message),
            MessageKind::KeyDown | MessageKind::Character => self.on_key(ctx, message),
            MessageKind::Resize => {
                self.base.capture_native_bounds(ctx);
                self.emit_window(ctx, WindowKind::Resized);
                if let Some(w) = ctx.arena.get(self.base.widget()) {
                    w.signals.resized.emit(message.size());
                }
                0
            }
            MessageKind::Move => {
                self.base.capture_native_bounds(ctx);
                self.emit_window(ctx, WindowKind::Moved);
                if let Some(w) = ctx.arena.get(self.base.widget()) {
                    w.signals.moved.emit(message.point());
                }
                0
            }
            MessageKind::CloseRequest => self.on_close_request(ctx),
            MessageKind::Destroy => {
                self.base.handle_destroyed(ctx);
                if self.state < WindowState::Closed {
                    self.state = WindowState::Closed;
                    if let Some(w) = ctx.arena.get(self.base.widget()) {
                        w.signals.closed.emit(());
                    }
                    self.emit_window(ctx, WindowKind::Closed);
                }
                0
            }
            MessageKind::FocusGained => {
                self.emit_window(ctx, WindowKind::FocusGained);
                0
            }
            MessageKind::FocusLost => {
                self.emit_window(ctx, WindowKind::FocusLost);
                0
            }
            _ => self.base.dispatch_default(ctx, message),
        }
    }

    fn as_window_ops(&mut self) -> Option<&mut dyn WindowOps> {
        Some(self)
    }

    fn window_state(&self) -> Option<WindowState> {
        Some(self.state)
    }
}

impl WindowOps for WindowAdapter {
    fn close(&mut self, ctx: &mut AdapterCtx<'_>) {
        if let Some(w) = ctx.arena.get(self.base.widget()) {
            w.signals.closing.emit(());
        }
        self.close_window(ctx);
    }

    fn relayout(&mut self, ctx: &mut AdapterCtx<'_>) {
        let widget = self.base.widget();
        for id in ctx.arena.descendants(widget) {
            if id == widget {
                continue;
            }
            if let Some(mut adapter) = ctx.bindings.checkout(id) {
                adapter.update_bounds(ctx);
                ctx.bindings.checkin(id, adapter);
            }
        }
        self.base.invalidate(ctx);
    }

    fn center(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let screen = ctx.system.screen_size();
        let current = ctx.system.bounds(handle);
        let centered = current.centered_in(Rect::from_origin_size(Point::ZERO, screen));
        ctx.system.set_bounds(handle, centered);
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            w.bounds = centered;
        }
    }

    fn to_front(&mut self, ctx: &mut AdapterCtx<'_>) {
        if let Some(handle) = self.base.handle() {
            ctx.system.to_front(handle);
        }
    }

    fn state(&self) -> WindowState {
        self.state
    }
}

// ===== Hit testing =====

/// The deepest visible widget under `at` (window client coordinates), or
/// `None` when the point misses every child.
pub fn hit_test(ctx: &AdapterCtx<'_>, window: WidgetId, at: Point) -> Option<WidgetId> {
    fn descend(ctx: &AdapterCtx<'_>, id: WidgetId, local: Point) -> WidgetId {
        // Later children draw on top, so scan back to front.
        let children = ctx.arena.children(id);
        for &child in children.iter().rev() {
            let Some(w) = ctx.arena.get(child) else { continue };
            if !w.visible || w.kind().is_menu() {
                continue;
            }
            if w.bounds.contains(local) {
                return descend(
                    ctx,
                    child,
                    Point::new(local.x - w.bounds.x, local.y - w.bounds.y),
                );
            }
        }
        id
    }
    let hit = descend(ctx, window, at);
    (hit != window).then_some(hit)
}

/// The origin of `target`'s client area in `window`'s client space.
fn origin_within(ctx: &AdapterCtx<'_>, window: WidgetId, target: WidgetId) -> Point {
    let mut origin = Point::ZERO;
    let mut cursor = target;
    while cursor != window {
        let Some(w) = ctx.arena.get(cursor) else { break };
        origin = origin.offset(w.bounds.x, w.bounds.y);
        match ctx.arena.parent(cursor) {
            Some(parent) => cursor = parent,
            None => break,
        }
    }
    origin
}
