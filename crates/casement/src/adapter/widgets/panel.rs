//! Containers: panels, group boxes, and handle-less lightweights.

use casement_core::{WidgetId, WidgetKind};

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, Textual};
use crate::error::ShellResult;
use crate::system::{StyleFlags, WindowClass};

/// A plain child container with its own native handle.
pub struct PanelAdapter {
    base: AdapterBase,
}

impl PanelAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for PanelAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Panel
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.base.create(ctx, WindowClass::Panel, StyleFlags::empty())?;
        Ok(())
    }
}

/// A widget with no native handle at all.
///
/// Its rectangle lives in the nearest materialized ancestor's client area;
/// painting goes through that ancestor's surface and invalidation targets
/// the rectangle there.
pub struct LightweightAdapter {
    base: AdapterBase,
}

impl LightweightAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for LightweightAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Lightweight
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    // Nothing to create; the adapter exists so the widget participates in
    // capability calls uniformly.
    fn materialize(&mut self, _ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        Ok(())
    }

    fn update_bounds(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.base.invalidate(ctx);
    }

    fn set_visible(&mut self, ctx: &mut AdapterCtx<'_>, visible: bool) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            w.visible = visible;
        }
        self.base.invalidate(ctx);
    }
}

/// A captioned frame drawn around its sibling controls.
pub struct GroupBoxAdapter {
    base: AdapterBase,
}

impl GroupBoxAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for GroupBoxAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::GroupBox
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.base
            .create(ctx, WindowClass::GroupBox, StyleFlags::GROUP)?;
        Ok(())
    }

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        Some(self)
    }
}

impl Textual for GroupBoxAdapter {
    fn set_text(&mut self, ctx: &mut AdapterCtx<'_>, text: &str) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            w.text = text.to_string();
        }
        self.base.set_text_native(ctx, text);
    }

    fn text(&self, ctx: &AdapterCtx<'_>) -> String {
        ctx.arena
            .get(self.base.widget())
            .map(|w| w.text.clone())
            .unwrap_or_default()
    }
}
