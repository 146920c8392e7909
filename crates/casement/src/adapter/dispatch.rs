//! The message dispatch state machine.
//!
//! Every native message flows: message → adapter lookup by handle →
//! `dispatch()` on the bound adapter → either the adapter handles it fully
//! or the platform default handler gets it. Four message kinds need
//! cross-adapter resolution before any adapter runs and are routed here
//! centrally:
//!
//! - **Command/Notify**: the native control identifier is resolved back to
//!   the originating adapter: child handle first, then a control-id scan,
//!   then a menu-item id search. Unmatched identifiers are logged and
//!   dropped, never fatal.
//! - **Ownerdraw**: redirected to the widget's paint hook with a
//!   message-bound graphics context that cannot outlive the callback.
//! - **Scroll**: forwarded to the scroll bar the request came from rather
//!   than the owner window the message targets.
//! - **Timer fired**: resolved through the timer registry.

use casement_core::logging::targets;
use casement_core::WidgetId;
use tracing::{debug, trace};

use super::AdapterCtx;
use crate::graphics::Graphics;
use crate::system::{Message, MessageKind, RawHandle};

/// How a routed message ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// An adapter handled the message and produced this reply.
    Handled(i64),
    /// No adapter claimed it; the platform default handler replied.
    Defaulted(i64),
    /// The message named an unknown identifier and was dropped.
    Dropped,
}

impl DispatchOutcome {
    pub fn reply(self) -> i64 {
        match self {
            Self::Handled(r) | Self::Defaulted(r) => r,
            Self::Dropped => 0,
        }
    }

    pub fn was_handled(self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Route one native message to its adapter.
pub fn route(ctx: &mut AdapterCtx<'_>, message: &Message) -> DispatchOutcome {
    trace!(
        target: targets::DISPATCH,
        kind = ?message.kind,
        handle = message.target.0,
        "routing message"
    );
    match message.kind {
        MessageKind::TimerFired => return route_timer(ctx, message),
        MessageKind::Command => return route_command(ctx, message),
        MessageKind::Notify => return route_notify(ctx, message),
        MessageKind::Scroll => return route_scroll(ctx, message),
        MessageKind::OwnerDraw => return route_owner_draw(ctx, message),
        _ => {}
    }

    let Some(widget) = ctx.bindings.widget_for(message.target) else {
        debug!(
            target: targets::DISPATCH,
            handle = message.target.0,
            kind = ?message.kind,
            "message for unknown handle; default handling"
        );
        return DispatchOutcome::Defaulted(ctx.system.default_reply(message));
    };
    dispatch_to(ctx, widget, message)
}

/// Check the target adapter out, run its dispatch entry point, check it
/// back in.
fn dispatch_to(ctx: &mut AdapterCtx<'_>, widget: WidgetId, message: &Message) -> DispatchOutcome {
    let Some(mut adapter) = ctx.bindings.checkout(widget) else {
        // Re-entrant dispatch to a checked-out adapter; absorb rather than
        // alias.
        debug!(target: targets::DISPATCH, ?widget, "adapter busy; default handling");
        return DispatchOutcome::Defaulted(ctx.system.default_reply(message));
    };
    let reply = adapter.dispatch(ctx, message);
    ctx.bindings.checkin(widget, adapter);
    DispatchOutcome::Handled(reply)
}

fn route_timer(ctx: &mut AdapterCtx<'_>, message: &Message) -> DispatchOutcome {
    let native_id = message.timer_id();
    if ctx.timers.on_fired(&mut *ctx.system, native_id) {
        DispatchOutcome::Handled(0)
    } else {
        debug!(target: targets::TIMER, native_id, "timer message with no registry entry; dropped");
        DispatchOutcome::Dropped
    }
}

fn route_command(ctx: &mut AdapterCtx<'_>, message: &Message) -> DispatchOutcome {
    let code = message.command_id();
    // A control command carries the child handle that raised it.
    if let Some(child) = message.child_handle() {
        if let Some(widget) = ctx.bindings.widget_for(child) {
            if let Some(mut adapter) = ctx.bindings.checkout(widget) {
                adapter.command(ctx, code);
                ctx.bindings.checkin(widget, adapter);
                return DispatchOutcome::Handled(0);
            }
        }
        debug!(
            target: targets::DISPATCH,
            child = child.0,
            code,
            "command from unknown control; dropped"
        );
        return DispatchOutcome::Dropped;
    }
    // Menu and accelerator commands carry only the command id.
    if let Some(widget) = find_command_target(ctx, message.target, code) {
        trace!(target: targets::DISPATCH, code, "menu/accelerator command");
        if let Some(w) = ctx.arena.get(widget) {
            w.signals.activated.emit(());
        }
        return DispatchOutcome::Handled(0);
    }
    debug!(target: targets::DISPATCH, code, "command id unmatched; dropped");
    DispatchOutcome::Dropped
}

/// Resolve a bare command id against the target window's subtree and its
/// attached menu bar.
fn find_command_target(ctx: &AdapterCtx<'_>, target: RawHandle, code: u32) -> Option<WidgetId> {
    let window = ctx.bindings.widget_for(target)?;
    let root = ctx.arena.root_of(window);
    if let Some(found) = ctx
        .arena
        .find_in_subtree(root, |w| w.command_id == Some(code))
    {
        return Some(found);
    }
    let bar = ctx.arena.get(root)?.menu_bar?;
    ctx.arena
        .find_in_subtree(bar, |w| w.command_id == Some(code))
}

fn route_notify(ctx: &mut AdapterCtx<'_>, message: &Message) -> DispatchOutcome {
    let code = message.command_id();
    let Some(child) = message.child_handle() else {
        debug!(target: targets::DISPATCH, code, "notify without source handle; dropped");
        return DispatchOutcome::Dropped;
    };
    let Some(widget) = ctx.bindings.widget_for(child) else {
        debug!(target: targets::DISPATCH, child = child.0, code, "notify from unknown control; dropped");
        return DispatchOutcome::Dropped;
    };
    let Some(mut adapter) = ctx.bindings.checkout(widget) else {
        return DispatchOutcome::Dropped;
    };
    adapter.notify(ctx, code);
    ctx.bindings.checkin(widget, adapter);
    DispatchOutcome::Handled(0)
}

fn route_scroll(ctx: &mut AdapterCtx<'_>, message: &Message) -> DispatchOutcome {
    // Scroll requests target the owner window but belong to the bar.
    let bar = RawHandle(message.param_b);
    let Some(widget) = ctx.bindings.widget_for(bar) else {
        debug!(target: targets::DISPATCH, bar = bar.0, "scroll from unknown bar; dropped");
        return DispatchOutcome::Dropped;
    };
    dispatch_to(ctx, widget, message)
}

fn route_owner_draw(ctx: &mut AdapterCtx<'_>, message: &Message) -> DispatchOutcome {
    let Some(record) = ctx.system.draw_item(message.param_b) else {
        debug!(target: targets::DISPATCH, key = message.param_b, "ownerdraw record missing; dropped");
        return DispatchOutcome::Dropped;
    };
    let control = RawHandle(message.param_a);
    let Some(widget) = ctx.bindings.widget_for(control) else {
        debug!(target: targets::DISPATCH, control = control.0, "ownerdraw for unknown control; dropped");
        return DispatchOutcome::Dropped;
    };
    let Some(mut hook) = ctx.bindings.take_paint_hook(widget) else {
        debug!(target: targets::DISPATCH, ?widget, "ownerdraw without paint hook; dropped");
        return DispatchOutcome::Dropped;
    };
    {
        // The context borrows the system for the callback's duration, so
        // the hook cannot retain it.
        let mut graphics = Graphics::owner_draw(&mut *ctx.system, &mut *ctx.resources, record);
        hook(&mut graphics);
    }
    ctx.bindings.put_paint_hook(widget, hook);
    DispatchOutcome::Handled(1)
}
