//! List-shaped controls: combo boxes and list boxes.
//!
//! Both push their [`ItemsModel`] into the native control at materialize
//! time and read the selection back when the control reports a change. The
//! logical model stays authoritative for item text; the native control is
//! authoritative for selection between change notifications.

use casement_core::logging::targets;
use casement_core::{ItemsModel, Size, WidgetId, WidgetKind};
use tracing::trace;

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, ItemSelectable};
use crate::error::ShellResult;
use crate::system::{codes, StyleFlags, WindowClass};

fn model_of(ctx: &AdapterCtx<'_>, widget: WidgetId) -> ItemsModel {
    ctx.arena
        .get(widget)
        .and_then(|w| w.items())
        .cloned()
        .unwrap_or_default()
}

/// One display row per value; an annotation rides behind a tab stop.
fn row_text(model: &ItemsModel, index: usize) -> String {
    let value = &model.values[index];
    match model.annotations.get(index) {
        Some(note) if !note.is_empty() => format!("{value}\t{note}"),
        _ => value.clone(),
    }
}

// ===== Combo box =====

pub struct ComboBoxAdapter {
    base: AdapterBase,
}

impl ComboBoxAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }

    fn push_items(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let model = model_of(ctx, self.base.widget());
        ctx.system.clear_items(handle);
        for index in 0..model.values.len() {
            ctx.system.add_item_text(handle, &row_text(&model, index));
        }
        ctx.system
            .set_selected_index(handle, model.primary_selection());
    }
}

impl Adapter for ComboBoxAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ComboBox
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.base
            .create(ctx, WindowClass::ComboBox, StyleFlags::DROP_DOWN)?;
        self.push_items(ctx);
        Ok(())
    }

    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        if code != codes::SELECTION_CHANGED {
            return;
        }
        let Some(handle) = self.base.handle() else { return };
        let index = ctx.system.selected_index(handle);
        trace!(target: targets::ADAPTER, ?index, "combo selection");
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            if let Some(items) = w.items_mut() {
                items.select_only(index);
            }
            w.signals
                .selection_changed
                .emit(index.map_or(-1, |i| i as i32));
        }
    }

    fn apply_model(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_items(ctx);
    }

    fn as_item_selectable(&mut self) -> Option<&mut dyn ItemSelectable> {
        Some(self)
    }
}

impl ItemSelectable for ComboBoxAdapter {
    fn select(&mut self, ctx: &mut AdapterCtx<'_>, index: Option<usize>) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            if let Some(items) = w.items_mut() {
                items.select_only(index);
            }
        }
        if let Some(handle) = self.base.handle() {
            ctx.system.set_selected_index(handle, index);
        }
    }

    fn selection(&self, ctx: &AdapterCtx<'_>) -> Option<usize> {
        match self.base.handle() {
            Some(handle) => ctx.system.selected_index(handle),
            None => ctx
                .arena
                .get(self.base.widget())
                .and_then(|w| w.items())
                .and_then(|m| m.primary_selection()),
        }
    }

    fn reload(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_items(ctx);
    }
}

// ===== List box =====

pub struct ListBoxAdapter {
    base: AdapterBase,
}

impl ListBoxAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }

    fn push_items(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let model = model_of(ctx, self.base.widget());
        ctx.system.clear_items(handle);
        for index in 0..model.values.len() {
            ctx.system.add_item_text(handle, &row_text(&model, index));
        }
        if model.multi_select {
            for &index in &model.selected {
                ctx.system.set_item_selected(handle, index, true);
            }
        } else {
            ctx.system
                .set_selected_index(handle, model.primary_selection());
        }
    }

    fn read_selection(&self, ctx: &AdapterCtx<'_>) -> Vec<usize> {
        let Some(handle) = self.base.handle() else {
            return Vec::new();
        };
        let multi = ctx
            .arena
            .get(self.base.widget())
            .and_then(|w| w.items())
            .is_some_and(|m| m.multi_select);
        if multi {
            (0..ctx.system.item_count(handle))
                .filter(|&i| ctx.system.is_item_selected(handle, i))
                .collect()
        } else {
            ctx.system.selected_index(handle).into_iter().collect()
        }
    }
}

impl Adapter for ListBoxAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ListBox
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let mut style = StyleFlags::BORDER;
        let widget = ctx.arena.get(self.base.widget());
        if widget.and_then(|w| w.items()).is_some_and(|m| m.multi_select) {
            style |= StyleFlags::MULTI_SELECT;
        }
        if widget.is_some_and(|w| w.ownerdraw) {
            style |= StyleFlags::OWNERDRAW;
        }
        self.base.create(ctx, WindowClass::ListBox, style)?;
        self.push_items(ctx);
        Ok(())
    }

    /// The native control rounds its height to whole rows; read the real
    /// geometry back so layout sees what the user sees.
    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.base.capture_native_bounds(ctx);
    }

    fn update_bounds(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.base.update_bounds(ctx);
        self.base.capture_native_bounds(ctx);
    }

    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        match code {
            codes::SELECTION_CHANGED => {
                let selected = self.read_selection(ctx);
                let primary = selected.first().copied();
                if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
                    if let Some(items) = w.items_mut() {
                        items.selected = selected;
                    }
                    w.signals
                        .selection_changed
                        .emit(primary.map_or(-1, |i| i as i32));
                }
            }
            codes::ACTIVATED => {
                if let Some(w) = ctx.arena.get(self.base.widget()) {
                    w.signals.activated.emit(());
                }
            }
            _ => {}
        }
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let Some(handle) = self.base.handle() else { return None };
        let model = model_of(ctx, self.base.widget());
        let rows = if model.visible_rows > 0 {
            model.visible_rows
        } else {
            model.values.len().max(1) as i32
        };
        let row_height = ctx.system.item_height(handle);
        let width = ctx
            .arena
            .get(self.base.widget())
            .map(|w| w.bounds.width)
            .unwrap_or(0);
        Some(Size::new(width, rows * row_height))
    }

    fn apply_model(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_items(ctx);
    }

    fn as_item_selectable(&mut self) -> Option<&mut dyn ItemSelectable> {
        Some(self)
    }
}

impl ItemSelectable for ListBoxAdapter {
    fn select(&mut self, ctx: &mut AdapterCtx<'_>, index: Option<usize>) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            if let Some(items) = w.items_mut() {
                items.select_only(index);
            }
        }
        if let Some(handle) = self.base.handle() {
            ctx.system.set_selected_index(handle, index);
        }
    }

    fn selection(&self, ctx: &AdapterCtx<'_>) -> Option<usize> {
        self.read_selection(ctx).first().copied()
    }

    fn reload(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_items(ctx);
    }
}
