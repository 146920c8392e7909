//! The windowing subsystem context.
//!
//! A [`Shell`] owns everything with subsystem lifetime: the native system,
//! the widget arena, the adapter bindings, the resource cache, the timer
//! registry, and the modal stack. Every application-facing operation goes
//! through it, and every native message comes back through its pump.
//!
//! Re-entrancy is handled by marshaling, not locking: code running inside
//! a dispatch (signal handlers, paint hooks) cannot borrow the shell
//! again, so it posts a [`ShellTask`] through a [`ShellQueue`] instead.
//! The pump drains the task queue between messages, which is also how
//! nested modal loops are driven from the outside.

use casement_core::logging::{span_names, targets};
use casement_core::{
    Color, Font, Key, Point, Rect, Size, SystemColor, Timer, TimerId, Widget, WidgetArena,
    WidgetId, WidgetKind,
};
use crossbeam_channel::{Receiver, Sender, unbounded};
use static_assertions::assert_impl_all;
use tracing::{debug, debug_span, info, trace, warn};

use crate::adapter::dispatch::{self, DispatchOutcome};
use crate::adapter::{Adapter, AdapterCtx, BindingTable, widgets};
use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::graphics::{Graphics, PaintHook, ResourceCache};
use crate::menu;
use crate::system::headless::HeadlessSystem;
use crate::system::{
    Message, MessageChoice, MessageChoices, MessageKind, NativeSystem, RawHandle, TextMetrics,
    WindowClass,
};
use crate::timer::TimerRegistry;
use crate::window::{ModalStack, WindowState};

/// Work marshaled onto the pump from re-entrant or foreign contexts.
enum ShellTask {
    /// Close a window as if its close box was clicked.
    Close(WidgetId),
    /// Leave the outermost loop.
    Quit,
    /// Arbitrary work against the shell.
    Run(Box<dyn FnOnce(&mut Shell) + Send>),
}

/// A cloneable handle for posting work to the shell's pump.
///
/// Signal handlers run while the shell is mutably borrowed by the
/// dispatcher, so they cannot call back into it directly; they post
/// through this instead. Tasks run between pumped messages, in post
/// order.
#[derive(Clone)]
pub struct ShellQueue {
    tx: Sender<ShellTask>,
}

assert_impl_all!(ShellQueue: Send, Sync);

impl ShellQueue {
    pub fn close(&self, window: WidgetId) {
        let _ = self.tx.send(ShellTask::Close(window));
    }

    pub fn quit(&self) {
        let _ = self.tx.send(ShellTask::Quit);
    }

    pub fn run(&self, task: impl FnOnce(&mut Shell) + Send + 'static) {
        let _ = self.tx.send(ShellTask::Run(Box::new(task)));
    }
}

/// The subsystem context.
pub struct Shell {
    system: Box<dyn NativeSystem>,
    arena: WidgetArena,
    bindings: BindingTable,
    resources: ResourceCache,
    timers: TimerRegistry,
    modal_stack: ModalStack,
    config: ShellConfig,
    tasks_tx: Sender<ShellTask>,
    tasks_rx: Receiver<ShellTask>,
    quit: bool,
}

impl Shell {
    /// Create a shell over `system`, registering the control classes.
    pub fn new(mut system: Box<dyn NativeSystem>, config: ShellConfig) -> ShellResult<Self> {
        system
            .register_classes(WindowClass::ALL)
            .map_err(|err| ShellError::Creation {
                kind: "window classes",
                reason: err.to_string(),
            })?;
        info!(target: targets::SHELL, system = system.name(), "shell created");
        let (tasks_tx, tasks_rx) = unbounded();
        let resources = ResourceCache::new(config.max_pen_width(), config.default_font().clone());
        Ok(Self {
            system,
            arena: WidgetArena::new(),
            bindings: BindingTable::new(),
            resources,
            timers: TimerRegistry::new(),
            modal_stack: ModalStack::new(),
            config,
            tasks_tx,
            tasks_rx,
            quit: false,
        })
    }

    /// A shell over the in-process [`HeadlessSystem`], for tests and tools.
    pub fn headless() -> ShellResult<Self> {
        Self::new(Box::new(HeadlessSystem::new()), ShellConfig::default())
    }

    /// A queue for posting work from signal handlers and other threads.
    pub fn queue(&self) -> ShellQueue {
        ShellQueue {
            tx: self.tasks_tx.clone(),
        }
    }

    fn ctx(&mut self) -> AdapterCtx<'_> {
        AdapterCtx {
            system: &mut *self.system,
            arena: &mut self.arena,
            resources: &mut self.resources,
            bindings: &mut self.bindings,
            timers: &mut self.timers,
            config: &self.config,
        }
    }

    /// Check `id`'s adapter out, run `f`, check it back in.
    fn with_adapter<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Adapter, &mut AdapterCtx<'_>) -> ShellResult<R>,
    ) -> ShellResult<R> {
        if !self.arena.contains(id) {
            return Err(ShellError::StaleWidget);
        }
        let mut adapter = self
            .bindings
            .checkout(id)
            .ok_or(ShellError::NotMaterialized)?;
        let result = {
            let mut ctx = self.ctx();
            f(adapter.as_mut(), &mut ctx)
        };
        self.bindings.checkin(id, adapter);
        result
    }

    // ===== Widget tree =====

    pub fn add_root(&mut self, widget: Widget) -> WidgetId {
        self.arena.insert(widget)
    }

    pub fn add_child(&mut self, widget: Widget, parent: WidgetId) -> ShellResult<WidgetId> {
        Ok(self.arena.insert_child(widget, parent)?)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.arena.get(id)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.arena.get_mut(id)
    }

    pub fn arena(&self) -> &WidgetArena {
        &self.arena
    }

    // ===== Window lifecycle =====

    /// Materialize `window` and its subtree, then run the second phase.
    ///
    /// Menu subtrees are skipped; the window adapter materializes its menu
    /// bar itself. Already-bound widgets are left alone, so reopening after
    /// adding children only materializes the additions.
    pub fn open_window(&mut self, window: WidgetId) -> ShellResult<()> {
        let targets: Vec<(WidgetId, WidgetKind)> = self
            .arena
            .descendants(window)
            .into_iter()
            .filter_map(|id| self.arena.get(id).map(|w| (id, w.kind())))
            .filter(|(_, kind)| !kind.is_menu())
            .collect();
        if targets.is_empty() {
            return Err(ShellError::StaleWidget);
        }
        let mut fresh = Vec::with_capacity(targets.len());
        for &(id, kind) in &targets {
            if self.bindings.is_bound(id) {
                continue;
            }
            let Some(mut adapter) = widgets::adapter_for(id, kind) else {
                continue;
            };
            {
                let mut ctx = self.ctx();
                adapter.materialize(&mut ctx)?;
            }
            self.bindings.bind(id, adapter);
            fresh.push(id);
        }
        // Second phase, once the whole tree has handles.
        for id in fresh {
            if let Some(mut adapter) = self.bindings.checkout(id) {
                {
                    let mut ctx = self.ctx();
                    adapter.post_materialize(&mut ctx);
                }
                self.bindings.checkin(id, adapter);
            }
        }
        self.drain_tasks();
        Ok(())
    }

    /// Close a window through its adapter. The widget tree stays.
    pub fn close_window(&mut self, window: WidgetId) -> ShellResult<()> {
        let result = self.with_adapter(window, |adapter, ctx| match adapter.as_window_ops() {
            Some(ops) => {
                ops.close(ctx);
                Ok(())
            }
            None => Err(ShellError::WrongKind { expected: "window" }),
        });
        self.drain_tasks();
        result
    }

    /// Tear down a widget subtree, native side first, then the logical
    /// widgets.
    pub fn destroy_widget(&mut self, id: WidgetId) {
        let ids = self.arena.descendants(id);
        // Menu subtrees tear down from their root; destroying the root
        // handle takes the submenus with it natively.
        for &wid in &ids {
            let is_root_menu = self
                .bindings
                .menu(wid)
                .is_some_and(|adapter| adapter.is_root());
            if is_root_menu {
                let mut ctx = self.ctx();
                menu::destroy(&mut ctx, wid);
            }
        }
        // Reverse pre-order puts children before their parents.
        for &wid in ids.iter().rev() {
            if let Some(mut adapter) = self.bindings.checkout(wid) {
                let mut ctx = self.ctx();
                adapter.destroy(&mut ctx);
            }
            self.bindings.remove_widget(wid);
        }
        self.arena.remove(id);
        self.drain_tasks();
    }

    /// The lifecycle state of a top-level widget's adapter.
    pub fn window_state(&self, window: WidgetId) -> Option<WindowState> {
        self.bindings.adapter(window).and_then(|a| a.window_state())
    }

    // ===== The pump =====

    /// Pump one message (after draining marshaled tasks).
    ///
    /// Returns `false` when the message queue is empty or quit was
    /// requested.
    pub fn pump_once(&mut self) -> bool {
        self.drain_tasks();
        if self.system.take_quit() {
            self.quit = true;
        }
        if self.quit {
            return false;
        }
        let Some(message) = self.system.next_message() else {
            return false;
        };
        let message = self.translate(message);
        if !self
            .modal_stack
            .allows(&self.arena, &self.bindings, &message)
        {
            trace!(
                target: targets::DISPATCH,
                kind = ?message.kind,
                handle = message.target.0,
                "suppressed by modal loop"
            );
            return true;
        }
        let outcome = {
            let mut ctx = self.ctx();
            dispatch::route(&mut ctx, &message)
        };
        if let DispatchOutcome::Dropped = outcome {
            trace!(target: targets::DISPATCH, kind = ?message.kind, "message dropped");
        }
        self.drain_tasks();
        true
    }

    /// Pump until the message queue runs dry.
    pub fn process_pending(&mut self) {
        while self.pump_once() {}
    }

    /// Run the outer message loop until quit.
    pub fn run(&mut self) {
        let span = debug_span!(span_names::PUMP);
        let _enter = span.enter();
        while self.pump_once() {}
        if !self.quit {
            debug!(target: targets::SHELL, "message queue exhausted; leaving the loop");
        }
    }

    /// Open `dialog` and pump a nested loop until it closes.
    ///
    /// Input for windows outside the dialog's subtree is suppressed while
    /// the loop runs. Nested dialogs stack: each call pushes one level and
    /// pumps until its own dialog closes.
    pub fn show_dialog(&mut self, dialog: WidgetId) -> ShellResult<()> {
        let span = debug_span!(span_names::MODAL, depth = self.modal_stack.depth() + 1);
        let _enter = span.enter();
        self.open_window(dialog)?;
        self.modal_stack.push(dialog);
        loop {
            if self.quit {
                break;
            }
            match self.window_state(dialog) {
                Some(WindowState::Closed) | None => break,
                _ => {}
            }
            if !self.pump_once() {
                // Check again: an idle pump may still have drained the
                // task that closed us.
                if !matches!(self.window_state(dialog), Some(WindowState::Closed) | None) {
                    warn!(
                        target: targets::SHELL,
                        "modal loop idle with the dialog still open; leaving"
                    );
                }
                break;
            }
        }
        self.modal_stack.pop();
        Ok(())
    }

    /// Ask the outer loop to end.
    pub fn post_quit(&mut self) {
        self.quit = true;
    }

    /// Apply the target window's accelerator table to a key message.
    fn translate(&mut self, message: Message) -> Message {
        if message.kind != MessageKind::KeyDown {
            return message;
        }
        let window_handle = self
            .bindings
            .widget_for(message.target)
            .map(|w| self.arena.root_of(w))
            .and_then(|root| self.bindings.handle_of(root));
        let Some(handle) = window_handle else {
            return message;
        };
        match self.system.translate_accelerator(handle, &message) {
            Some(command) => command,
            None => message,
        }
    }

    fn drain_tasks(&mut self) {
        while let Ok(task) = self.tasks_rx.try_recv() {
            match task {
                ShellTask::Close(window) => {
                    if let Err(err) = self.close_window(window) {
                        debug!(target: targets::SHELL, %err, "queued close failed");
                    }
                }
                ShellTask::Quit => self.quit = true,
                ShellTask::Run(task) => task(self),
            }
        }
    }

    // ===== Capability facades =====

    pub fn set_text(&mut self, id: WidgetId, text: &str) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            let textual = adapter
                .as_textual()
                .ok_or(ShellError::WrongKind { expected: "textual" })?;
            textual.set_text(ctx, text);
            Ok(())
        })
    }

    pub fn text(&mut self, id: WidgetId) -> ShellResult<String> {
        self.with_adapter(id, |adapter, ctx| {
            let textual = adapter
                .as_textual()
                .ok_or(ShellError::WrongKind { expected: "textual" })?;
            Ok(textual.text(ctx))
        })
    }

    /// Activate a button-like widget as if the user pressed it.
    pub fn click(&mut self, id: WidgetId) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            let pressable = adapter
                .as_pressable()
                .ok_or(ShellError::WrongKind { expected: "pressable" })?;
            pressable.press(ctx);
            Ok(())
        })
    }

    /// Set the checked state of a checkbox, radio button, or menu item.
    pub fn set_checked(&mut self, id: WidgetId, checked: bool) -> ShellResult<()> {
        let kind = self.arena.get(id).ok_or(ShellError::StaleWidget)?.kind();
        if kind == WidgetKind::MenuItem {
            let mut ctx = self.ctx();
            return menu::set_checked(&mut ctx, id, checked);
        }
        self.with_adapter(id, |adapter, ctx| {
            let pressable = adapter
                .as_pressable()
                .ok_or(ShellError::WrongKind { expected: "pressable" })?;
            pressable.set_checked(ctx, checked);
            Ok(())
        })
    }

    pub fn is_checked(&mut self, id: WidgetId) -> ShellResult<bool> {
        let kind = self.arena.get(id).ok_or(ShellError::StaleWidget)?.kind();
        if kind == WidgetKind::MenuItem {
            let ctx = self.ctx();
            return menu::is_checked(&ctx, id);
        }
        self.with_adapter(id, |adapter, ctx| {
            let pressable = adapter
                .as_pressable()
                .ok_or(ShellError::WrongKind { expected: "pressable" })?;
            Ok(pressable.is_checked(ctx))
        })
    }

    pub fn set_selection(&mut self, id: WidgetId, index: Option<usize>) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            let selectable = adapter
                .as_item_selectable()
                .ok_or(ShellError::WrongKind { expected: "selectable" })?;
            selectable.select(ctx, index);
            Ok(())
        })
    }

    pub fn selection(&mut self, id: WidgetId) -> ShellResult<Option<usize>> {
        self.with_adapter(id, |adapter, ctx| {
            let selectable = adapter
                .as_item_selectable()
                .ok_or(ShellError::WrongKind { expected: "selectable" })?;
            Ok(selectable.selection(ctx))
        })
    }

    /// Re-push the widget's logical model into the native control.
    pub fn reload_model(&mut self, id: WidgetId) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            adapter.apply_model(ctx);
            Ok(())
        })
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            adapter.set_enabled(ctx, enabled);
            Ok(())
        })
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            adapter.set_visible(ctx, visible);
            Ok(())
        })
    }

    pub fn focus_widget(&mut self, id: WidgetId) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            adapter.focus(ctx);
            Ok(())
        })
    }

    /// Push the widget's logical bounds to its native handle.
    pub fn update_bounds(&mut self, id: WidgetId) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            adapter.update_bounds(ctx);
            Ok(())
        })
    }

    pub fn invalidate(&mut self, id: WidgetId) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            adapter.invalidate(ctx);
            Ok(())
        })
    }

    pub fn preferred_size(&mut self, id: WidgetId) -> ShellResult<Option<Size>> {
        self.with_adapter(id, |adapter, ctx| Ok(adapter.preferred_size(ctx)))
    }

    pub fn relayout(&mut self, window: WidgetId) -> ShellResult<()> {
        self.with_adapter(window, |adapter, ctx| {
            let ops = adapter
                .as_window_ops()
                .ok_or(ShellError::WrongKind { expected: "window" })?;
            ops.relayout(ctx);
            Ok(())
        })
    }

    pub fn center(&mut self, window: WidgetId) -> ShellResult<()> {
        self.with_adapter(window, |adapter, ctx| {
            let ops = adapter
                .as_window_ops()
                .ok_or(ShellError::WrongKind { expected: "window" })?;
            ops.center(ctx);
            Ok(())
        })
    }

    pub fn to_front(&mut self, window: WidgetId) -> ShellResult<()> {
        self.with_adapter(window, |adapter, ctx| {
            let ops = adapter
                .as_window_ops()
                .ok_or(ShellError::WrongKind { expected: "window" })?;
            ops.to_front(ctx);
            Ok(())
        })
    }

    pub fn set_scroll_value(&mut self, id: WidgetId, value: i32) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            let ops = adapter
                .as_scroll_ops()
                .ok_or(ShellError::WrongKind { expected: "scroll bar" })?;
            ops.set_value(ctx, value);
            Ok(())
        })
    }

    pub fn scroll_value(&mut self, id: WidgetId) -> ShellResult<i32> {
        self.with_adapter(id, |adapter, ctx| {
            let ops = adapter
                .as_scroll_ops()
                .ok_or(ShellError::WrongKind { expected: "scroll bar" })?;
            Ok(ops.value(ctx))
        })
    }

    /// The native width of a table column after auto-sizing.
    pub fn column_width(&mut self, id: WidgetId, index: usize) -> ShellResult<i32> {
        self.with_adapter(id, |adapter, ctx| {
            let ops = adapter
                .as_table_ops()
                .ok_or(ShellError::WrongKind { expected: "table" })?;
            Ok(ops.column_width(ctx, index))
        })
    }

    pub fn select_row(&mut self, id: WidgetId, row: Option<usize>) -> ShellResult<()> {
        self.with_adapter(id, |adapter, ctx| {
            let ops = adapter
                .as_table_ops()
                .ok_or(ShellError::WrongKind { expected: "table" })?;
            ops.select_row(ctx, row);
            Ok(())
        })
    }

    // ===== Painting =====

    /// Install the hook painting `id` (owner-drawn controls and window
    /// backgrounds).
    pub fn set_paint_hook(&mut self, id: WidgetId, hook: PaintHook) {
        self.bindings.set_paint_hook(id, hook);
    }

    /// Run `f` with an explicit graphics context on `id`'s handle.
    pub fn with_graphics(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut Graphics<'_>),
    ) -> ShellResult<()> {
        let handle = self
            .bindings
            .handle_of(id)
            .ok_or(ShellError::NotMaterialized)?;
        let mut ctx = self.ctx();
        let mut graphics = ctx.graphics(handle);
        f(&mut graphics);
        Ok(())
    }

    pub fn text_size(&mut self, font: Option<&Font>, text: &str) -> Size {
        self.resources.measure_text(&mut *self.system, font, text)
    }

    pub fn text_metrics(&mut self, font: Option<&Font>) -> TextMetrics {
        self.resources.text_metrics(&mut *self.system, font)
    }

    /// Release the native resources derived from a logical color.
    pub fn release_color(&mut self, color: Color) {
        self.resources.release_color(&mut *self.system, color);
    }

    pub fn release_font(&mut self, font: &Font) {
        self.resources.release_font(&mut *self.system, font);
    }

    // ===== Menus =====

    /// Enable or disable a materialized menu item.
    pub fn set_menu_enabled(&mut self, item: WidgetId, enabled: bool) -> ShellResult<()> {
        let mut ctx = self.ctx();
        menu::set_enabled(&mut ctx, item, enabled)
    }

    /// Open `popup` at `at` in `window`'s client space, blocking until the
    /// user chooses or dismisses. Returns the chosen command id.
    pub fn open_popup(
        &mut self,
        window: WidgetId,
        popup: WidgetId,
        at: Point,
    ) -> ShellResult<Option<u32>> {
        let result = {
            let mut ctx = self.ctx();
            menu::open_popup(&mut ctx, window, popup, at)
        };
        self.drain_tasks();
        result
    }

    // ===== Timers =====

    /// Start `timer` against `window`'s native handle.
    pub fn start_timer(&mut self, window: WidgetId, timer: Timer) -> ShellResult<TimerId> {
        let handle = self
            .bindings
            .handle_of(window)
            .ok_or(ShellError::NotMaterialized)?;
        Ok(self.timers.start(&mut *self.system, handle, timer))
    }

    pub fn stop_timer(&mut self, id: TimerId) -> bool {
        self.timers.stop(&mut *self.system, id)
    }

    pub fn active_timer_count(&self) -> usize {
        self.timers.len()
    }

    // ===== System queries =====

    pub fn screen_size(&self) -> Size {
        self.system.screen_size()
    }

    pub fn system_color(&self, color: SystemColor) -> Color {
        self.system.system_color(color)
    }

    pub fn scroll_bar_thickness(&self, vertical: bool) -> i32 {
        self.system.scroll_bar_thickness(vertical)
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.system.is_key_down(key)
    }

    /// Show a native message box owned by `owner` (or the screen).
    pub fn message_box(
        &mut self,
        owner: Option<WidgetId>,
        title: &str,
        text: &str,
        choices: MessageChoices,
    ) -> MessageChoice {
        let owner = owner.and_then(|id| self.bindings.handle_of(id));
        self.system.message_box(owner, title, text, choices)
    }

    pub fn handle_of(&self, id: WidgetId) -> Option<RawHandle> {
        self.bindings.handle_of(id)
    }

    /// Logical bounds of `id`, as last captured from the native side.
    pub fn bounds_of(&self, id: WidgetId) -> Option<Rect> {
        self.arena.get(id).map(|w| w.bounds)
    }

    pub fn system(&self) -> &dyn NativeSystem {
        &*self.system
    }

    pub fn system_mut(&mut self) -> &mut dyn NativeSystem {
        &mut *self.system
    }

    /// The headless backend, when this shell runs over one.
    pub fn headless_mut(&mut self) -> Option<&mut HeadlessSystem> {
        self.system.as_any_mut().downcast_mut()
    }

    pub fn headless_ref(&self) -> Option<&HeadlessSystem> {
        self.system.as_any().downcast_ref()
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.timers.teardown(&mut *self.system);
        // Adapters destroy in arbitrary order; a parent destroyed first
        // takes its native children with it and the children's destroy
        // sees a dead handle and only unregisters.
        for id in self.bindings.bound_widgets() {
            if let Some(mut adapter) = self.bindings.checkout(id) {
                let mut ctx = AdapterCtx {
                    system: &mut *self.system,
                    arena: &mut self.arena,
                    resources: &mut self.resources,
                    bindings: &mut self.bindings,
                    timers: &mut self.timers,
                    config: &self.config,
                };
                adapter.destroy(&mut ctx);
            }
        }
        // Menu roots not owned by a window (never-attached bars, cached
        // popups). Only the root's handle is destroyed; submenus go with
        // it natively.
        for id in self.bindings.menu_widgets() {
            if let Some(adapter) = self.bindings.unbind_menu(id) {
                if adapter.is_root() {
                    if let Some(handle) = adapter.handle() {
                        self.system.destroy_menu(handle);
                    }
                }
            }
        }
        self.resources.clear(&mut *self.system);
        debug!(target: targets::SHELL, "shell dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casement_core::Rect;

    fn shell() -> Shell {
        Shell::headless().unwrap()
    }

    #[test]
    fn test_open_window_materializes_subtree() {
        let mut shell = shell();
        let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
        let panel = shell.add_child(Widget::panel(), window).unwrap();
        let button = shell.add_child(Widget::button("ok"), panel).unwrap();
        shell.open_window(window).unwrap();
        assert!(shell.handle_of(window).is_some());
        assert!(shell.handle_of(panel).is_some());
        assert!(shell.handle_of(button).is_some());
        assert_eq!(shell.window_state(window), Some(WindowState::Open));
    }

    #[test]
    fn test_open_stale_widget_fails() {
        let mut shell = shell();
        let window = shell.add_root(Widget::window("gone"));
        shell.destroy_widget(window);
        assert!(matches!(
            shell.open_window(window),
            Err(ShellError::StaleWidget)
        ));
    }

    #[test]
    fn test_capability_on_wrong_kind() {
        let mut shell = shell();
        let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
        let label = shell.add_child(Widget::label("hi"), window).unwrap();
        shell.open_window(window).unwrap();
        assert!(matches!(
            shell.click(label),
            Err(ShellError::WrongKind { expected: "pressable" })
        ));
        assert_eq!(shell.text(label).unwrap(), "hi");
    }

    #[test]
    fn test_queue_quit_stops_pump() {
        let mut shell = shell();
        let queue = shell.queue();
        queue.quit();
        assert!(!shell.pump_once());
    }

    #[test]
    fn test_destroy_widget_releases_handles() {
        let mut shell = shell();
        let window = shell.add_root(Widget::window("main").with_bounds(Rect::new(0, 0, 300, 200)));
        shell.add_child(Widget::button("a"), window).unwrap();
        shell.add_child(Widget::button("b"), window).unwrap();
        shell.open_window(window).unwrap();
        shell.destroy_widget(window);
        let sys = shell.headless_ref().unwrap();
        assert_eq!(sys.live_handle_count(), 0);
        assert_eq!(sys.stale_handle_destroys(), 0);
        assert!(shell.widget(window).is_none());
    }
}
