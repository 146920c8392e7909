//! Standalone scroll bars.
//!
//! The native control reports scroll requests to its owner window; the
//! dispatcher redirects them here. Every request resolves to a clamped
//! value pushed back into the control, so the thumb never leaves the
//! range.

use casement_core::logging::targets;
use casement_core::{RangeModel, WidgetId, WidgetKind};
use tracing::{debug, trace};

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, ScrollOps};
use crate::error::ShellResult;
use crate::system::{Message, MessageKind, ScrollCode, StyleFlags, WindowClass};

pub struct ScrollBarAdapter {
    base: AdapterBase,
}

impl ScrollBarAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }

    fn range(&self, ctx: &AdapterCtx<'_>) -> RangeModel {
        ctx.arena
            .get(self.base.widget())
            .and_then(|w| w.range())
            .copied()
            .unwrap_or_default()
    }

    fn push_range(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let range = self.range(ctx);
        ctx.system.set_scroll_info(
            handle,
            range.minimum,
            range.maximum,
            range.page,
            range.value,
        );
    }

    /// Apply a clamped value and notify on change.
    fn apply_value(&mut self, ctx: &mut AdapterCtx<'_>, value: i32, notify: bool) {
        let range = self.range(ctx);
        let clamped = range.clamp(value);
        if clamped == range.value {
            return;
        }
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            if let Some(r) = w.range_mut() {
                r.value = clamped;
            }
        }
        self.push_range(ctx);
        if notify {
            if let Some(w) = ctx.arena.get(self.base.widget()) {
                w.signals.value_changed.emit(clamped);
            }
        }
    }

    fn on_scroll(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        let Some(code) = message.scroll_code() else {
            debug!(target: targets::DISPATCH, raw = message.param_a, "unknown scroll code; dropped");
            return 0;
        };
        let range = self.range(ctx);
        let target = match code {
            ScrollCode::LineBack => range.value - 1,
            ScrollCode::LineForward => range.value + 1,
            ScrollCode::PageBack => range.value - range.page,
            ScrollCode::PageForward => range.value + range.page,
            ScrollCode::ThumbTrack(pos) => pos,
        };
        trace!(target: targets::ADAPTER, ?code, target, "scroll request");
        self.apply_value(ctx, target, true);
        0
    }
}

impl Adapter for ScrollBarAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ScrollBar
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let style = if self.range(ctx).vertical {
            StyleFlags::VERTICAL
        } else {
            StyleFlags::HORIZONTAL
        };
        self.base.create(ctx, WindowClass::ScrollBar, style)?;
        self.push_range(ctx);
        Ok(())
    }

    fn dispatch(&mut self, ctx: &mut AdapterCtx<'_>, message: &Message) -> i64 {
        match message.kind {
            MessageKind::Scroll => self.on_scroll(ctx, message),
            _ => self.base.dispatch_default(ctx, message),
        }
    }

    fn apply_model(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_range(ctx);
    }

    fn as_scroll_ops(&mut self) -> Option<&mut dyn ScrollOps> {
        Some(self)
    }
}

impl ScrollOps for ScrollBarAdapter {
    /// Programmatic set: clamped, no value-changed signal.
    fn set_value(&mut self, ctx: &mut AdapterCtx<'_>, value: i32) {
        self.apply_value(ctx, value, false);
    }

    fn value(&self, ctx: &AdapterCtx<'_>) -> i32 {
        self.range(ctx).value
    }

    fn update_range(&mut self, ctx: &mut AdapterCtx<'_>) {
        // Re-clamp the value in case the range shrank under it.
        let range = self.range(ctx);
        let clamped = range.clamp(range.value);
        if clamped != range.value {
            if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
                if let Some(r) = w.range_mut() {
                    r.value = clamped;
                }
            }
        }
        self.push_range(ctx);
    }
}
