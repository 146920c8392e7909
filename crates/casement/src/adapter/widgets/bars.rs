//! Window furniture: tool bars and status bars.

use casement_core::{Size, WidgetId, WidgetKind};

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, Textual};
use crate::error::ShellResult;
use crate::system::{StyleFlags, WindowClass};

const TOOL_BAR_HEIGHT: i32 = 28;
const STATUS_BAR_HEIGHT: i32 = 22;

/// A container strip along the top of a window. Child buttons are regular
/// widgets parented into it.
pub struct ToolBarAdapter {
    base: AdapterBase,
}

impl ToolBarAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for ToolBarAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ToolBar
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.base
            .create(ctx, WindowClass::ToolBar, StyleFlags::HORIZONTAL)?;
        Ok(())
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let width = ctx
            .arena
            .get(self.base.widget())
            .map(|w| w.bounds.width)
            .unwrap_or(0);
        Some(Size::new(width, TOOL_BAR_HEIGHT))
    }
}

/// A text strip along the bottom of a window.
pub struct StatusBarAdapter {
    base: AdapterBase,
}

impl StatusBarAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for StatusBarAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::StatusBar
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.base
            .create(ctx, WindowClass::StatusBar, StyleFlags::HORIZONTAL)?;
        Ok(())
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let width = ctx
            .arena
            .get(self.base.widget())
            .map(|w| w.bounds.width)
            .unwrap_or(0);
        Some(Size::new(width, STATUS_BAR_HEIGHT))
    }

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        Some(self)
    }
}

impl Textual for StatusBarAdapter {
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
