//! Multi-column tables.

use casement_core::logging::targets;
use casement_core::{TableModel, WidgetId, WidgetKind};
use tracing::trace;

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, TableOps};
use crate::error::ShellResult;
use crate::system::{codes, StyleFlags, WindowClass};

pub struct TableAdapter {
    base: AdapterBase,
    /// Column widths read back after native auto-sizing.
    column_widths: Vec<i32>,
}

impl TableAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
            column_widths: Vec::new(),
        }
    }

    fn model(&self, ctx: &AdapterCtx<'_>) -> TableModel {
        ctx.arena
            .get(self.base.widget())
            .and_then(|w| w.table_model())
            .cloned()
            .unwrap_or_default()
    }

    fn push_model(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let model = self.model(ctx);
        let columns: Vec<(String, i32)> = model
            .columns
            .iter()
            .map(|c| (c.title.clone(), c.width))
            .collect();
        ctx.system.clear_items(handle);
        ctx.system.set_columns(handle, &columns);
        for row in &model.rows {
            ctx.system.add_row(handle, row);
        }
        ctx.system.set_selected_index(handle, model.selected);
        self.capture_column_widths(ctx);
    }

    /// Width zero asks the native control to size to content; read the
    /// result back so layout can use real numbers.
    fn capture_column_widths(&mut self, ctx: &AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let count = ctx
            .arena
            .get(self.base.widget())
            .and_then(|w| w.table_model())
            .map(|m| m.columns.len())
            .unwrap_or(0);
        self.column_widths = (0..count)
            .map(|i| ctx.system.column_width(handle, i))
            .collect();
    }
}

impl Adapter for TableAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Table
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.base
            .create(ctx, WindowClass::Table, StyleFlags::BORDER)?;
        self.push_model(ctx);
        Ok(())
    }

    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.capture_column_widths(ctx);
    }

    fn notify(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        match code {
            codes::SELECTION_CHANGED => {
                let Some(handle) = self.base.handle() else { return };
                let row = ctx.system.selected_index(handle);
                trace!(target: targets::ADAPTER, ?row, "table selection");
                if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
                    if let Some(table) = w.table_model_mut() {
                        table.selected = row;
                    }
                    w.signals
                        .selection_changed
                        .emit(row.map_or(-1, |i| i as i32));
                }
            }
            codes::ROW_ACTIVATED => {
                if let Some(w) = ctx.arena.get(self.base.widget()) {
                    w.signals.activated.emit(());
                }
            }
            _ => {}
        }
    }

    fn apply_model(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_model(ctx);
    }

    fn as_table_ops(&mut self) -> Option<&mut dyn TableOps> {
        Some(self)
    }
}

impl TableOps for TableAdapter {
    fn reload(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_model(ctx);
    }

    fn column_width(&self, _ctx: &AdapterCtx<'_>, index: usize) -> i32 {
        self.column_widths.get(index).copied().unwrap_or(0)
    }

    fn select_row(&mut self, ctx: &mut AdapterCtx<'_>, row: Option<usize>) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            if let Some(table) = w.table_model_mut() {
                table.selected = row;
            }
        }
        if let Some(handle) = self.base.handle() {
            ctx.system.set_selected_index(handle, row);
        }
    }
}
