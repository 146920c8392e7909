//! The menu tree: bar, popup, and leaf item in one adapter.
//!
//! Menus live in their own native handle space, so their adapters sit in a
//! separate binding table from the control adapters. One [`MenuAdapter`]
//! type covers every structural role; behavior branches on the role
//! derived from the widget's place in the tree. Checked/enabled flags are
//! mutated natively with no shadow copy; once a menu is open, native
//! state is the source of truth.

use casement_core::logging::targets;
use casement_core::{Point, WidgetId, WidgetKind};
use tracing::{debug, trace, warn};

use crate::adapter::AdapterCtx;
use crate::error::{ShellError, ShellResult};
use crate::system::MenuHandle;

/// The structural role of a menu node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuRole {
    /// Attached to a window's frame.
    Bar,
    /// A popup or submenu with its own native handle.
    Popup,
    /// A leaf item appended into its container.
    Item,
    Separator,
}

impl MenuRole {
    fn of(kind: WidgetKind) -> Option<MenuRole> {
        match kind {
            WidgetKind::MenuBar => Some(MenuRole::Bar),
            WidgetKind::Menu => Some(MenuRole::Popup),
            WidgetKind::MenuItem => Some(MenuRole::Item),
            WidgetKind::MenuSeparator => Some(MenuRole::Separator),
            _ => None,
        }
    }
}

/// Adapter for one node of the menu tree.
///
/// Bars and popups own a native menu handle; items and separators record
/// the container handle they were appended into, which is where native
/// check/enable calls go.
pub struct MenuAdapter {
    widget: WidgetId,
    role: MenuRole,
    /// This node's own handle (bars and popups only).
    handle: Option<MenuHandle>,
    /// The containing menu's handle (items and separators only).
    container: Option<MenuHandle>,
}

impl MenuAdapter {
    fn new(widget: WidgetId, role: MenuRole) -> Self {
        Self {
            widget,
            role,
            handle: None,
            container: None,
        }
    }

    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    pub fn role(&self) -> MenuRole {
        self.role
    }

    pub fn handle(&self) -> Option<MenuHandle> {
        self.handle
    }

    /// True for bars and standalone popups, the nodes whose native destroy
    /// takes the whole subtree with it.
    pub fn is_root(&self) -> bool {
        self.handle.is_some() && self.container.is_none()
    }
}

/// Materialize the menu subtree rooted at `root` and bind an adapter per
/// node. Returns the root's native handle.
pub fn materialize(ctx: &mut AdapterCtx<'_>, root: WidgetId) -> ShellResult<MenuHandle> {
    let kind = ctx.arena.get(root).ok_or(ShellError::StaleWidget)?.kind();
    let role = MenuRole::of(kind).ok_or(ShellError::WrongKind { expected: "menu" })?;
    let handle = match role {
        MenuRole::Bar => ctx.system.create_menu_bar(),
        MenuRole::Popup => ctx.system.create_popup_menu(),
        _ => return Err(ShellError::WrongKind { expected: "menu bar or popup" }),
    };
    let mut adapter = MenuAdapter::new(root, role);
    adapter.handle = Some(handle);
    ctx.bindings.bind_menu(root, adapter);
    trace!(target: targets::MENU, ?root, handle = handle.0, role = ?role, "menu materialized");
    fill(ctx, root, handle)?;
    Ok(handle)
}

/// Append `parent`'s children into the native menu `into`, recursing
/// through submenus.
fn fill(ctx: &mut AdapterCtx<'_>, parent: WidgetId, into: MenuHandle) -> ShellResult<()> {
    let children: Vec<WidgetId> = ctx.arena.children(parent).to_vec();
    for child in children {
        let (kind, text, command, checked, enabled) = {
            let w = ctx.arena.get(child).ok_or(ShellError::StaleWidget)?;
            (w.kind(), w.text.clone(), w.command_id, w.checked, w.enabled)
        };
        match MenuRole::of(kind) {
            Some(MenuRole::Item) => {
                let id = command.unwrap_or(0);
                ctx.system.append_item(into, id, &text);
                if checked {
                    ctx.system.set_item_checked(into, id, true);
                }
                if !enabled {
                    ctx.system.set_item_enabled(into, id, false);
                }
                let mut adapter = MenuAdapter::new(child, MenuRole::Item);
                adapter.container = Some(into);
                ctx.bindings.bind_menu(child, adapter);
            }
            Some(MenuRole::Separator) => {
                ctx.system.append_separator(into);
                let mut adapter = MenuAdapter::new(child, MenuRole::Separator);
                adapter.container = Some(into);
                ctx.bindings.bind_menu(child, adapter);
            }
            Some(MenuRole::Popup) => {
                let sub = ctx.system.create_popup_menu();
                let mut adapter = MenuAdapter::new(child, MenuRole::Popup);
                adapter.handle = Some(sub);
                adapter.container = Some(into);
                ctx.bindings.bind_menu(child, adapter);
                fill(ctx, child, sub)?;
                ctx.system.append_submenu(into, sub, &text);
            }
            _ => {
                warn!(target: targets::MENU, kind = kind.name(), "non-menu widget inside a menu tree; skipped");
            }
        }
    }
    Ok(())
}

/// Set an item's native checked flag directly.
pub fn set_checked(ctx: &mut AdapterCtx<'_>, item: WidgetId, checked: bool) -> ShellResult<()> {
    let (container, id) = item_location(ctx, item)?;
    if let Some(w) = ctx.arena.get_mut(item) {
        w.checked = checked;
    }
    ctx.system.set_item_checked(container, id, checked);
    Ok(())
}

pub fn is_checked(ctx: &AdapterCtx<'_>, item: WidgetId) -> ShellResult<bool> {
    let (container, id) = item_location(ctx, item)?;
    Ok(ctx.system.is_item_checked(container, id))
}

/// Set an item's native enabled flag directly.
pub fn set_enabled(ctx: &mut AdapterCtx<'_>, item: WidgetId, enabled: bool) -> ShellResult<()> {
    let (container, id) = item_location(ctx, item)?;
    if let Some(w) = ctx.arena.get_mut(item) {
        w.enabled = enabled;
    }
    ctx.system.set_item_enabled(container, id, enabled);
    Ok(())
}

fn item_location(ctx: &AdapterCtx<'_>, item: WidgetId) -> ShellResult<(MenuHandle, u32)> {
    let adapter = ctx
        .bindings
        .menu(item)
        .ok_or(ShellError::NotMaterialized)?;
    let container = adapter.container.ok_or(ShellError::WrongKind { expected: "menu item" })?;
    let id = ctx
        .arena
        .get(item)
        .ok_or(ShellError::StaleWidget)?
        .command_id
        .unwrap_or(0);
    Ok((container, id))
}

/// Remove a node's children natively and logically.
pub fn remove_all(ctx: &mut AdapterCtx<'_>, node: WidgetId) -> ShellResult<()> {
    let adapter = ctx.bindings.menu(node).ok_or(ShellError::NotMaterialized)?;
    let Some(handle) = adapter.handle else {
        return Err(ShellError::WrongKind { expected: "menu bar or popup" });
    };
    ctx.system.remove_all_items(handle);
    let children: Vec<WidgetId> = ctx.arena.children(node).to_vec();
    for child in children {
        for id in ctx.arena.descendants(child) {
            ctx.bindings.unbind_menu(id);
        }
        ctx.arena.remove(child);
    }
    Ok(())
}

/// Destroy a materialized menu subtree's native handles and unbind its
/// adapters. The logical widgets stay.
pub fn destroy(ctx: &mut AdapterCtx<'_>, root: WidgetId) {
    let ids = ctx.arena.descendants(root);
    let root_handle = ctx.bindings.menu(root).and_then(|a| a.handle);
    for id in ids {
        ctx.bindings.unbind_menu(id);
    }
    // Destroying the root takes submenus with it natively.
    if let Some(handle) = root_handle {
        ctx.system.destroy_menu(handle);
        trace!(target: targets::MENU, ?root, handle = handle.0, "menu destroyed");
    }
}

/// Open `menu` as a transient popup at `at` in `window`'s client space.
///
/// Blocks until the user chooses an item or dismisses. The chosen item's
/// activation fires exactly once before the transient native handle is
/// released; the adapter bindings do not survive the call, so repeated
/// opens re-materialize from the logical tree.
pub fn open_popup(
    ctx: &mut AdapterCtx<'_>,
    window: WidgetId,
    menu: WidgetId,
    at: Point,
) -> ShellResult<Option<u32>> {
    let window_handle = ctx.handle_of(window).ok_or(ShellError::NotMaterialized)?;
    let handle = materialize(ctx, menu)?;
    let chosen = ctx.system.track_popup(window_handle, handle, at);
    let result = if chosen == 0 {
        debug!(target: targets::MENU, "popup dismissed");
        None
    } else if let Some(item) = ctx
        .arena
        .find_in_subtree(menu, |w| w.command_id == Some(chosen))
    {
        if let Some(w) = ctx.arena.get(item) {
            w.signals.activated.emit(());
        }
        Some(chosen)
    } else {
        debug!(target: targets::MENU, chosen, "popup chose an unknown item id; dropped");
        None
    };
    destroy(ctx, menu);
    Ok(result)
}
