//! Edit controls: single-line fields and multi-line areas.
//!
//! Text content is the one place the native control is authoritative: the
//! user types into it directly, so the logical text is refreshed from the
//! handle on every change notification rather than shadowed.

use casement_core::{Size, WidgetId, WidgetKind};

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, Textual};
use crate::error::ShellResult;
use crate::system::{codes, StyleFlags, WindowClass};

fn edit_style(ctx: &AdapterCtx<'_>, widget: WidgetId, extra: StyleFlags) -> StyleFlags {
    let mut style = StyleFlags::BORDER | extra;
    if !ctx.arena.get(widget).is_some_and(|w| w.editable) {
        style |= StyleFlags::READ_ONLY;
    }
    style
}

/// Sync logical text from the native control and notify.
fn on_text_changed(base: &AdapterBase, ctx: &mut AdapterCtx<'_>) {
    let Some(handle) = base.handle() else { return };
    let current = ctx.system.text(handle);
    if let Some(w) = ctx.arena.get_mut(base.widget()) {
        if w.text == current {
            return;
        }
        w.text = current.clone();
        w.signals.text_changed.emit(current);
    }
}

// ===== Single-line field =====

pub struct TextFieldAdapter {
    base: AdapterBase,
}

impl TextFieldAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for TextFieldAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::TextField
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let style = edit_style(ctx, self.base.widget(), StyleFlags::empty());
        self.base.create(ctx, WindowClass::Edit, style)?;
        Ok(())
    }

    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        match code {
            codes::TEXT_CHANGED => on_text_changed(&self.base, ctx),
            codes::ACTIVATED => {
                if let Some(w) = ctx.arena.get(self.base.widget()) {
                    w.signals.activated.emit(());
                }
            }
            _ => {}
        }
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let extent = self.base.text_extent(ctx);
        // Room for a short entry even when empty.
        Some(Size::new(extent.width.max(64) + 8, extent.height + 8))
    }

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        Some(self)
    }
}

impl Textual for TextFieldAdapter {
    fn set_text(&mut self, ctx: &mut AdapterCtx<'_>, text: &str) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            w.text = text.to_string();
        }
        self.base.set_text_native(ctx, text);
    }

    fn text(&self, ctx: &AdapterCtx<'_>) -> String {
        match self.base.handle() {
            Some(handle) => ctx.system.text(handle),
            None => ctx
                .arena
                .get(self.base.widget())
                .map(|w| w.text.clone())
                .unwrap_or_default(),
        }
    }
}

// ===== Multi-line area =====

pub struct TextAreaAdapter {
    base: AdapterBase,
}

impl TextAreaAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for TextAreaAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::TextArea
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let style = edit_style(ctx, self.base.widget(), StyleFlags::MULTILINE);
        self.base.create(ctx, WindowClass::Edit, style)?;
        Ok(())
    }

    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        if code == codes::TEXT_CHANGED {
            on_text_changed(&self.base, ctx);
        }
    }

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        Some(self)
    }
}

impl Textual for TextAreaAdapter {
    fn set_text(&mut self, ctx: &mut AdapterCtx<'_>, text: &str) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            w.text = text.to_string();
        }
        self.base.set_text_native(ctx, text);
    }

    fn text(&self, ctx: &AdapterCtx<'_>) -> String {
        match self.base.handle() {
            Some(handle) => ctx.system.text(handle),
            None => ctx
                .arena
                .get(self.base.widget())
                .map(|w| w.text.clone())
                .unwrap_or_default(),
        }
    }
}
