//! Static text labels.

use casement_core::{Size, WidgetId, WidgetKind};

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, Textual};
use crate::error::ShellResult;
use crate::system::{StyleFlags, WindowClass};

/// Horizontal and vertical slack around a label's measured text.
const PADDING: Size = Size::new(4, 2);

pub struct LabelAdapter {
    base: AdapterBase,
}

impl LabelAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for LabelAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Label
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let style = if ctx
            .arena
            .get(self.base.widget())
            .is_some_and(|w| w.ownerdraw)
        {
            StyleFlags::OWNERDRAW
        } else {
            StyleFlags::empty()
        };
        self.base.create(ctx, WindowClass::Label, style)?;
        Ok(())
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let extent = self.base.text_extent(ctx);
        Some(extent.grown(PADDING.width, PADDING.height))
    }

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        Some(self)
    }
}

impl Textual for LabelAdapter {
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
