//! Component adapters: the binding between logical widgets and native
//! handles.
//!
//! Every materialized widget is backed by exactly one adapter implementing
//! [`Adapter`]. An adapter owns one [`AdapterBase`] (the single point of
//! native-handle ownership) and layers widget-specific behavior on top. The
//! native-base capability and the domain capabilities meet by composition:
//! the concrete adapter embeds the base and forwards to it, so there is one
//! handle and one capability surface per widget with no inheritance
//! ambiguity.
//!
//! Adapters never reach native state directly; everything flows through an
//! [`AdapterCtx`], the borrowed view of the shell the dispatcher hands in.

pub mod dispatch;
pub mod widgets;

use std::collections::HashMap;

use casement_core::logging::targets;
use casement_core::{
    Color, KeyEvent, KeyKind, MouseEvent, MouseKind, Point, Rect, Size, Widget, WidgetArena,
    WidgetId, WidgetKind,
};
use tracing::{debug, trace, warn};

use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::graphics::{Graphics, PaintHook, ResourceCache};
use crate::menu::MenuAdapter;
use crate::system::{
    CreateParams, Message, MessageKind, NativeSystem, RawHandle, StyleFlags, SurfaceId,
    WindowClass,
};
use crate::timer::TimerRegistry;
use crate::window::WindowState;

// ===== Context =====

/// The dispatcher's borrowed view of the subsystem.
///
/// Everything an adapter may touch during materialization, dispatch, or a
/// capability call: the native system, the logical tree, the resource
/// cache, the binding tables, and the timer registry. Lives only for the
/// duration of one operation.
pub struct AdapterCtx<'a> {
    pub system: &'a mut dyn NativeSystem,
    pub arena: &'a mut WidgetArena,
    pub resources: &'a mut ResourceCache,
    pub bindings: &'a mut BindingTable,
    pub timers: &'a mut TimerRegistry,
    pub config: &'a ShellConfig,
}

impl AdapterCtx<'_> {
    /// The native handle bound to `widget`, or `None` if unmaterialized.
    ///
    /// This is how sibling adapters reach each other's handles; the storage
    /// itself stays private to the binding table.
    pub fn handle_of(&self, widget: WidgetId) -> Option<RawHandle> {
        self.bindings.handle_of(widget)
    }

    /// Whether `widget`'s handle parents child handles natively.
    ///
    /// Per-widget override first, then subsystem configuration, then the
    /// kind's default.
    pub fn is_native_parent(&self, widget: WidgetId) -> bool {
        let Some(w) = self.arena.get(widget) else {
            return false;
        };
        if let Some(per_widget) = w.native_parent_override {
            return per_widget;
        }
        self.config
            .native_parent_for(w.kind())
            .unwrap_or_else(|| w.kind().default_native_parent())
    }

    /// The nearest materialized ancestor acting as a native parent.
    pub fn native_parent_of(&self, widget: WidgetId) -> Option<(WidgetId, RawHandle)> {
        let mut cursor = self.arena.parent(widget);
        while let Some(id) = cursor {
            if self.is_native_parent(id) {
                if let Some(handle) = self.handle_of(id) {
                    return Some((id, handle));
                }
            }
            cursor = self.arena.parent(id);
        }
        None
    }

    /// Offset from `widget`'s logical parent space to the client space of
    /// its native parent, accumulated over handle-less ancestors.
    pub fn offset_to_native_parent(&self, widget: WidgetId) -> Point {
        let mut offset = Point::ZERO;
        let mut cursor = self.arena.parent(widget);
        while let Some(id) = cursor {
            if self.is_native_parent(id) && self.handle_of(id).is_some() {
                break;
            }
            if let Some(w) = self.arena.get(id) {
                offset = offset.offset(w.bounds.x, w.bounds.y);
            }
            cursor = self.arena.parent(id);
        }
        offset
    }

    /// `widget`'s bounds in its native parent's client space.
    pub fn native_bounds(&self, widget: WidgetId) -> Rect {
        let bounds = self.arena.get(widget).map(|w| w.bounds).unwrap_or(Rect::ZERO);
        let offset = self.offset_to_native_parent(widget);
        bounds.translated(offset.x, offset.y)
    }

    /// An explicit graphics context on `handle`.
    pub fn graphics(&mut self, handle: RawHandle) -> Graphics<'_> {
        Graphics::explicit(&mut *self.system, &mut *self.resources, handle)
    }
}

// ===== Binding table =====

/// Owns the adapters and the handle tables.
///
/// Adapters are checked out for the duration of a dispatch so they can
/// reach siblings through the same table without aliasing themselves;
/// handle lookups keep working for checked-out adapters because the handle
/// maps are stored separately.
#[derive(Default)]
pub struct BindingTable {
    adapters: HashMap<WidgetId, Box<dyn Adapter>>,
    menus: HashMap<WidgetId, MenuAdapter>,
    widget_by_handle: HashMap<RawHandle, WidgetId>,
    handle_by_widget: HashMap<WidgetId, RawHandle>,
    widget_by_control: HashMap<u16, WidgetId>,
    paint_hooks: HashMap<WidgetId, PaintHook>,
    next_control_id: u16,
}

impl BindingTable {
    pub fn new() -> Self {
        Self {
            next_control_id: 100,
            ..Self::default()
        }
    }

    pub fn bind(&mut self, widget: WidgetId, adapter: Box<dyn Adapter>) {
        trace!(target: targets::ADAPTER, ?widget, kind = adapter.kind().name(), "adapter bound");
        self.adapters.insert(widget, adapter);
    }

    pub fn is_bound(&self, widget: WidgetId) -> bool {
        self.adapters.contains_key(&widget)
    }

    pub fn adapter(&self, widget: WidgetId) -> Option<&dyn Adapter> {
        self.adapters.get(&widget).map(|a| a.as_ref())
    }

    /// Take an adapter out for a dispatch. Pair with [`BindingTable::checkin`].
    pub fn checkout(&mut self, widget: WidgetId) -> Option<Box<dyn Adapter>> {
        self.adapters.remove(&widget)
    }

    pub fn checkin(&mut self, widget: WidgetId, adapter: Box<dyn Adapter>) {
        self.adapters.insert(widget, adapter);
    }

    pub fn widget_for(&self, handle: RawHandle) -> Option<WidgetId> {
        self.widget_by_handle.get(&handle).copied()
    }

    pub fn widget_for_control(&self, control_id: u16) -> Option<WidgetId> {
        self.widget_by_control.get(&control_id).copied()
    }

    pub fn handle_of(&self, widget: WidgetId) -> Option<RawHandle> {
        self.handle_by_widget.get(&widget).copied()
    }

    pub fn alloc_control_id(&mut self, widget: WidgetId) -> u16 {
        let id = self.next_control_id;
        self.next_control_id = self.next_control_id.wrapping_add(1).max(100);
        self.widget_by_control.insert(id, widget);
        id
    }

    pub fn register_handle(&mut self, widget: WidgetId, handle: RawHandle) {
        self.widget_by_handle.insert(handle, widget);
        self.handle_by_widget.insert(widget, handle);
    }

    pub fn unregister_handle(&mut self, handle: RawHandle) {
        if let Some(widget) = self.widget_by_handle.remove(&handle) {
            self.handle_by_widget.remove(&widget);
        }
    }

    /// Drop every table entry for `widget`. The adapter, if still bound, is
    /// discarded.
    pub fn remove_widget(&mut self, widget: WidgetId) {
        self.adapters.remove(&widget);
        self.menus.remove(&widget);
        self.paint_hooks.remove(&widget);
        if let Some(handle) = self.handle_by_widget.remove(&widget) {
            self.widget_by_handle.remove(&handle);
        }
        self.widget_by_control.retain(|_, w| *w != widget);
    }

    pub fn bound_widgets(&self) -> Vec<WidgetId> {
        self.adapters.keys().copied().collect()
    }

    pub fn handle_count(&self) -> usize {
        self.handle_by_widget.len()
    }

    // ----- Menu bindings (separate handle space) -----

    pub fn bind_menu(&mut self, widget: WidgetId, adapter: MenuAdapter) {
        self.menus.insert(widget, adapter);
    }

    pub fn menu(&self, widget: WidgetId) -> Option<&MenuAdapter> {
        self.menus.get(&widget)
    }

    pub fn menu_mut(&mut self, widget: WidgetId) -> Option<&mut MenuAdapter> {
        self.menus.get_mut(&widget)
    }

    pub fn unbind_menu(&mut self, widget: WidgetId) -> Option<MenuAdapter> {
        self.menus.remove(&widget)
    }

    pub fn menu_widgets(&self) -> Vec<WidgetId> {
        self.menus.keys().copied().collect()
    }

    // ----- Paint hooks -----

    pub fn set_paint_hook(&mut self, widget: WidgetId, hook: PaintHook) {
        self.paint_hooks.insert(widget, hook);
    }

    pub fn take_paint_hook(&mut self, widget: WidgetId) -> Option<PaintHook> {
        self.paint_hooks.remove(&widget)
    }

    pub fn put_paint_hook(&mut self, widget: WidgetId, hook: PaintHook) {
        self.paint_hooks.insert(widget, hook);
    }
}

// ===== Capability interfaces =====

/// Widgets carrying user-visible text content.
pub trait Textual {
    fn set_text(&mut self, ctx: &mut AdapterCtx<'_>, text: &str);
    fn text(&self, ctx: &AdapterCtx<'_>) -> String;
}

/// Widgets with a press action and an optional two-state check.
pub trait Pressable {
    /// Run the widget's activation as if the user pressed it.
    fn press(&mut self, ctx: &mut AdapterCtx<'_>);
    fn set_checked(&mut self, ctx: &mut AdapterCtx<'_>, checked: bool);
    fn is_checked(&self, ctx: &AdapterCtx<'_>) -> bool;
}

/// Widgets holding an indexed list of items with a selection.
pub trait ItemSelectable {
    fn select(&mut self, ctx: &mut AdapterCtx<'_>, index: Option<usize>);
    fn selection(&self, ctx: &AdapterCtx<'_>) -> Option<usize>;
    /// Re-push the logical model into the native control.
    fn reload(&mut self, ctx: &mut AdapterCtx<'_>);
}

/// Column/row operations of table-shaped widgets.
pub trait TableOps {
    fn reload(&mut self, ctx: &mut AdapterCtx<'_>);
    /// The native width of column `index`, after any native auto-sizing.
    fn column_width(&self, ctx: &AdapterCtx<'_>, index: usize) -> i32;
    fn select_row(&mut self, ctx: &mut AdapterCtx<'_>, row: Option<usize>);
}

/// Value/range operations of scroll bars.
pub trait ScrollOps {
    fn set_value(&mut self, ctx: &mut AdapterCtx<'_>, value: i32);
    fn value(&self, ctx: &AdapterCtx<'_>) -> i32;
    /// Re-push the logical range into the native control.
    fn update_range(&mut self, ctx: &mut AdapterCtx<'_>);
}

// ===== The adapter trait =====

/// The native-base capability set every concrete widget adapter
/// specializes.
///
/// Default implementations delegate to the embedded [`AdapterBase`], so a
/// concrete adapter only overrides what differs for its widget kind. The
/// capability accessors (`as_textual`, ...) default to `None`; a kind that
/// supports a capability overrides the accessor to return itself.
pub trait Adapter {
    fn kind(&self) -> WidgetKind;
    fn base(&self) -> &AdapterBase;
    fn base_mut(&mut self) -> &mut AdapterBase;

    /// Create the native handle from the logical widget's configuration.
    ///
    /// On failure the adapter stays unmaterialized and the error surfaces
    /// to the application.
    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()>;

    /// Second materialization phase, run after the whole tree has handles.
    fn post_materialize(&mut self, _ctx: &mut AdapterCtx<'_>) {}

    /// Destroy the native handle, exactly once.
    fn destroy(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.base_mut().destroy(ctx);
    }

    /// The single message entry point for this adapter's handle.
    ///
    /// The default gives baseline behavior for the common messages and
    /// hands everything else to the platform default handler.
    fn dispatch(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        self.base_mut().dispatch_default(ctx, message)
    }

    /// A command code resolved to this adapter (activation, selection
    /// change, text change). Explicit no-op by default.
    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        let _ = ctx;
        trace!(
            target: targets::DISPATCH,
            kind = self.kind().name(),
            code,
            "command ignored by kind"
        );
    }

    /// An auxiliary notification code resolved to this adapter. Explicit
    /// no-op by default.
    fn notify(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        let _ = ctx;
        trace!(
            target: targets::DISPATCH,
            kind = self.kind().name(),
            code,
            "notify ignored by kind"
        );
    }

    /// Push the logical rectangle to the native handle.
    fn update_bounds(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.base_mut().update_bounds(ctx);
    }

    /// Read native geometry back into the logical widget.
    fn capture_native_bounds(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.base_mut().capture_native_bounds(ctx);
    }

    fn invalidate(&self, ctx: &mut AdapterCtx<'_>) {
        self.base().invalidate(ctx);
    }

    fn set_enabled(&mut self, ctx: &mut AdapterCtx<'_>, enabled: bool) {
        self.base_mut().set_enabled(ctx, enabled);
    }

    fn set_visible(&mut self, ctx: &mut AdapterCtx<'_>, visible: bool) {
        self.base_mut().set_visible(ctx, visible);
    }

    fn focus(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.base_mut().focus(ctx);
    }

    /// The adapter's preferred native size, or `None` when the native
    /// control has no opinion.
    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let _ = ctx;
        None
    }

    /// Re-push kind-specific model data. No-op for model-less kinds.
    fn apply_model(&mut self, _ctx: &mut AdapterCtx<'_>) {}

    // ----- Capability accessors -----

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        None
    }

    fn as_pressable(&mut self) -> Option<&mut dyn Pressable> {
        None
    }

    fn as_item_selectable(&mut self) -> Option<&mut dyn ItemSelectable> {
        None
    }

    fn as_table_ops(&mut self) -> Option<&mut dyn TableOps> {
        None
    }

    fn as_scroll_ops(&mut self) -> Option<&mut dyn ScrollOps> {
        None
    }

    fn as_window_ops(&mut self) -> Option<&mut dyn crate::window::WindowOps> {
        None
    }

    /// The lifecycle state, for top-level adapters. `None` for controls.
    fn window_state(&self) -> Option<WindowState> {
        None
    }
}

// ===== The base adapter =====

/// Single point of native-handle ownership shared by every widget adapter.
pub struct AdapterBase {
    widget: WidgetId,
    handle: Option<RawHandle>,
}

impl AdapterBase {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            widget,
            handle: None,
        }
    }

    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    pub fn handle(&self) -> Option<RawHandle> {
        self.handle
    }

    /// Create this adapter's handle under its nearest native parent.
    ///
    /// Idempotent: a second call returns the existing handle.
    pub fn create(
        &mut self,
        ctx: &mut AdapterCtx<'_>,
        class: WindowClass,
        extra_style: StyleFlags,
    ) -> ShellResult<RawHandle> {
        let parent = ctx.native_parent_of(self.widget).map(|(_, h)| h);
        self.create_with_parent(ctx, class, extra_style, parent)
    }

    /// Create this adapter's handle under an explicit native parent
    /// (`None` for a top-level handle).
    pub fn create_with_parent(
        &mut self,
        ctx: &mut AdapterCtx<'_>,
        class: WindowClass,
        extra_style: StyleFlags,
        parent: Option<RawHandle>,
    ) -> ShellResult<RawHandle> {
        if let Some(handle) = self.handle {
            return Ok(handle);
        }
        let (text, font, enabled, visible, kind) = {
            let w = ctx.arena.get(self.widget).ok_or(ShellError::StaleWidget)?;
            (
                w.text.clone(),
                w.font.clone(),
                w.enabled,
                w.visible,
                w.kind(),
            )
        };
        let mut style = extra_style;
        if parent.is_some() {
            style |= StyleFlags::CHILD;
        }
        if visible {
            style |= StyleFlags::VISIBLE;
        }
        let bounds = if parent.is_some() {
            ctx.native_bounds(self.widget)
        } else {
            ctx.arena
                .get(self.widget)
                .map(|w| w.bounds)
                .unwrap_or(Rect::ZERO)
        };
        let control_id = if parent.is_some() {
            ctx.bindings.alloc_control_id(self.widget)
        } else {
            0
        };
        let params = CreateParams {
            class,
            style,
            text: &text,
            bounds,
            parent,
            control_id,
        };
        let handle = ctx.system.create_handle(&params).map_err(|err| {
            warn!(target: targets::ADAPTER, kind = kind.name(), %err, "handle creation failed");
            ShellError::Creation {
                kind: kind.name(),
                reason: err.to_string(),
            }
        })?;
        ctx.bindings.register_handle(self.widget, handle);
        self.handle = Some(handle);
        if !enabled {
            ctx.system.set_enabled(handle, false);
        }
        let font_handle = ctx.resources.resolve_font(&mut *ctx.system, font.as_ref());
        ctx.system.set_control_font(handle, font_handle);
        trace!(
            target: targets::ADAPTER,
            kind = kind.name(),
            handle = handle.0,
            "materialized"
        );
        Ok(handle)
    }

    /// Destroy the handle and unregister it. Safe to call twice; the second
    /// call is a no-op.
    pub fn destroy(&mut self, ctx: &mut AdapterCtx<'_>) {
        if let Some(handle) = self.handle.take() {
            ctx.bindings.unregister_handle(handle);
            // A parent already destroyed natively takes its children with
            // it; only destroy what is still live.
            if ctx.system.is_live(handle) {
                ctx.system.destroy_handle(handle);
            }
            trace!(target: targets::ADAPTER, handle = handle.0, "handle destroyed");
        }
    }

    /// Drop the handle reference without destroying the native object.
    ///
    /// Used when an embedding host owns the native window tree and has
    /// already torn it down (or will).
    pub fn forget(&mut self, ctx: &mut AdapterCtx<'_>) {
        if let Some(handle) = self.handle.take() {
            ctx.bindings.unregister_handle(handle);
            debug!(target: targets::ADAPTER, handle = handle.0, "handle forgotten");
        }
    }

    // ----- Default capability behavior -----

    pub fn update_bounds(&mut self, ctx: &mut AdapterCtx<'_>) {
        if let Some(handle) = self.handle {
            let bounds = ctx.native_bounds(self.widget);
            ctx.system.set_bounds(handle, bounds);
        }
    }

    /// Read native geometry back into the logical widget, compensating for
    /// handle-less ancestors. Used after native auto-layout, e.g. a list
    /// box rounding its height to whole rows.
    pub fn capture_native_bounds(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.handle else { return };
        let native = ctx.system.bounds(handle);
        let offset = ctx.offset_to_native_parent(self.widget);
        if let Some(w) = ctx.arena.get_mut(self.widget) {
            w.bounds = Rect::new(
                native.x - offset.x,
                native.y - offset.y,
                native.width,
                native.height,
            );
        }
    }

    /// Invalidate this widget's area. Handle-less (lightweight) widgets
    /// invalidate their rectangle in the nearest materialized native
    /// parent instead.
    pub fn invalidate(&self, ctx: &mut AdapterCtx<'_>) {
        if let Some(handle) = self.handle {
            ctx.system.invalidate(handle, None);
        } else if let Some((_, parent)) = ctx.native_parent_of(self.widget) {
            let area = ctx.native_bounds(self.widget);
            ctx.system.invalidate(parent, Some(area));
        }
    }

    pub fn set_enabled(&mut self, ctx: &mut AdapterCtx<'_>, enabled: bool) {
        if let Some(w) = ctx.arena.get_mut(self.widget) {
            w.enabled = enabled;
        }
        if let Some(handle) = self.handle {
            ctx.system.set_enabled(handle, enabled);
        }
    }

    pub fn set_visible(&mut self, ctx: &mut AdapterCtx<'_>, visible: bool) {
        if let Some(w) = ctx.arena.get_mut(self.widget) {
            w.visible = visible;
        }
        if let Some(handle) = self.handle {
            ctx.system.set_visible(handle, visible);
        }
    }

    pub fn focus(&mut self, ctx: &mut AdapterCtx<'_>) {
        if let Some(handle) = self.handle {
            ctx.system.set_focus(handle);
        }
    }

    pub fn set_text_native(&mut self, ctx: &mut AdapterCtx<'_>, text: &str) {
        if let Some(handle) = self.handle {
            ctx.system.set_text(handle, text);
        }
    }

    /// The widget's color overrides for erase/draw, `(foreground,
    /// background)`. `None` means native default.
    pub fn color_hook(&self, ctx: &AdapterCtx<'_>) -> (Option<Color>, Option<Color>) {
        ctx.arena
            .get(self.widget)
            .map(|w| (w.foreground, w.background))
            .unwrap_or((None, None))
    }

    /// Preferred size derived from the widget's text and font, plus
    /// padding. Building block for concrete `preferred_size` overrides.
    pub fn text_extent(&self, ctx: &mut AdapterCtx<'_>) -> Size {
        let (text, font) = match ctx.arena.get(self.widget) {
            Some(w) => (w.text.clone(), w.font.clone()),
            None => return Size::ZERO,
        };
        ctx.resources
            .measure_text(&mut *ctx.system, font.as_ref(), &text)
    }

    // ----- Default dispatch =====

    /// Baseline handling for the common messages; everything else goes to
    /// the platform default handler.
    pub fn dispatch_default(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        match message.kind {
            MessageKind::MouseDown
            | MessageKind::MouseUp
            | MessageKind::MouseMove
            | MessageKind::MouseDoubleClick => {
                self.emit_mouse(ctx, message);
                0
            }
            MessageKind::KeyDown | MessageKind::Character => {
                self.emit_key(ctx, message);
                ctx.system.default_reply(message)
            }
            MessageKind::FocusGained => {
                self.emit_focus(ctx, true);
                0
            }
            MessageKind::FocusLost => {
                self.emit_focus(ctx, false);
                0
            }
            MessageKind::Resize => {
                self.capture_native_bounds(ctx);
                if let Some(w) = ctx.arena.get(self.widget) {
                    w.signals.resized.emit(message.size());
                }
                0
            }
            MessageKind::Move => {
                self.capture_native_bounds(ctx);
                if let Some(w) = ctx.arena.get(self.widget) {
                    w.signals.moved.emit(message.point());
                }
                0
            }
            MessageKind::EraseBackground => self.erase_background(ctx, message),
            MessageKind::Destroy => {
                self.handle_destroyed(ctx);
                0
            }
            _ => ctx.system.default_reply(message),
        }
    }

    /// Fill the client area with the widget's background override, if any.
    fn erase_background(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        let (_, background) = self.color_hook(ctx);
        let Some(color) = background else {
            return ctx.system.default_reply(message);
        };
        let Some(handle) = self.handle else { return 0 };
        let surface = SurfaceId(message.param_a);
        let area = Rect::from_origin_size(Point::ZERO, ctx.system.client_size(handle));
        let brush = ctx.resources.brush_for(&mut *ctx.system, color);
        ctx.system.fill_rect(surface, area, brush);
        1
    }

    /// The native object is gone; drop the handle reference.
    pub fn handle_destroyed(&mut self, ctx: &mut AdapterCtx<'_>) {
        if let Some(handle) = self.handle.take() {
            ctx.bindings.unregister_handle(handle);
            trace!(target: targets::ADAPTER, handle = handle.0, "native object destroyed");
        }
    }

    pub fn emit_mouse(&mut self, ctx: &AdapterCtx<'_>, message: &Message) {
        let kind = match message.kind {
            MessageKind::MouseDown => MouseKind::Down,
            MessageKind::MouseUp => MouseKind::Up,
            MessageKind::MouseDoubleClick => MouseKind::DoubleClick,
            _ => MouseKind::Moved,
        };
        let (button, modifiers, clicks) = message.mouse_params();
        let event = MouseEvent {
            kind,
            button,
            position: message.point(),
            modifiers,
            click_count: clicks,
        };
        if let Some(w) = ctx.arena.get(self.widget) {
            w.signals.mouse.emit(event);
        }
    }

    pub fn emit_key(&mut self, ctx: &AdapterCtx<'_>, message: &Message) {
        let Some((key, modifiers)) = message.key() else {
            debug!(target: targets::DISPATCH, "undecodable key message dropped");
            return;
        };
        let kind = if message.kind == MessageKind::Character {
            KeyKind::Char
        } else {
            KeyKind::Down
        };
        let event = KeyEvent {
            kind,
            key,
            modifiers,
        };
        if let Some(w) = ctx.arena.get(self.widget) {
            w.signals.key.emit(event);
        }
    }

    fn emit_focus(&mut self, ctx: &AdapterCtx<'_>, gained: bool) {
        if let Some(w) = ctx.arena.get(self.widget) {
            w.signals.focus_changed.emit(gained);
        }
    }

    /// Shared read access to this adapter's widget.
    pub fn widget_ref<'w>(&self, ctx: &'w AdapterCtx<'_>) -> Option<&'w Widget> {
        ctx.arena.get(self.widget)
    }
}
