//! Tabbed panes.
//!
//! The native tab control renders only the tab strip; the pages are the
//! pane's child widgets, shown or hidden as the selection moves. Tab
//! titles come from the child pages' text.

use casement_core::logging::targets;
use casement_core::{WidgetId, WidgetKind};
use tracing::trace;

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, ItemSelectable};
use crate::error::ShellResult;
use crate::system::{codes, StyleFlags, WindowClass};

pub struct TabbedPaneAdapter {
    base: AdapterBase,
}

impl TabbedPaneAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }

    fn pages(&self, ctx: &AdapterCtx<'_>) -> Vec<WidgetId> {
        ctx.arena.children(self.base.widget()).to_vec()
    }

    fn push_titles(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let titles: Vec<String> = self
            .pages(ctx)
            .into_iter()
            .filter_map(|id| ctx.arena.get(id).map(|w| w.text.clone()))
            .collect();
        ctx.system.clear_items(handle);
        for title in &titles {
            ctx.system.add_item_text(handle, title);
        }
        let selected = ctx
            .arena
            .get(self.base.widget())
            .and_then(|w| w.tabs())
            .map(|t| t.selected)
            .unwrap_or(0);
        ctx.system.set_selected_index(handle, Some(selected));
    }

    /// Show only page `selected`; pages are sibling adapters reached
    /// through the binding table.
    fn show_page(&mut self, ctx: &mut AdapterCtx<'_>, selected: usize) {
        for (index, page) in self.pages(ctx).into_iter().enumerate() {
            let visible = index == selected;
            if let Some(mut adapter) = ctx.bindings.checkout(page) {
                adapter.set_visible(ctx, visible);
                ctx.bindings.checkin(page, adapter);
            } else if let Some(w) = ctx.arena.get_mut(page) {
                w.visible = visible;
            }
        }
    }
}

impl Adapter for TabbedPaneAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::TabbedPane
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.base
            .create(ctx, WindowClass::TabControl, StyleFlags::empty())?;
        self.push_titles(ctx);
        Ok(())
    }

    /// Page visibility waits for the pages to be materialized.
    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        let selected = ctx
            .arena
            .get(self.base.widget())
            .and_then(|w| w.tabs())
            .map(|t| t.selected)
            .unwrap_or(0);
        self.show_page(ctx, selected);
    }

    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        if code != codes::SELECTION_CHANGED {
            return;
        }
        let Some(handle) = self.base.handle() else { return };
        let Some(index) = ctx.system.selected_index(handle) else {
            return;
        };
        trace!(target: targets::ADAPTER, index, "tab selected");
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            if let Some(tabs) = w.tabs_mut() {
                tabs.selected = index;
            }
        }
        self.show_page(ctx, index);
        if let Some(w) = ctx.arena.get(self.base.widget()) {
            w.signals.selection_changed.emit(index as i32);
        }
    }

    fn apply_model(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_titles(ctx);
        let selected = ctx
            .arena
            .get(self.base.widget())
            .and_then(|w| w.tabs())
            .map(|t| t.selected)
            .unwrap_or(0);
        self.show_page(ctx, selected);
    }

    fn as_item_selectable(&mut self) -> Option<&mut dyn ItemSelectable> {
        Some(self)
    }
}

impl ItemSelectable for TabbedPaneAdapter {
    fn select(&mut self, ctx: &mut AdapterCtx<'_>, index: Option<usize>) {
        let Some(index) = index else { return };
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            if let Some(tabs) = w.tabs_mut() {
                tabs.selected = index;
            }
        }
        if let Some(handle) = self.base.handle() {
            ctx.system.set_selected_index(handle, Some(index));
        }
        self.show_page(ctx, index);
    }

    fn selection(&self, ctx: &AdapterCtx<'_>) -> Option<usize> {
        ctx.arena
            .get(self.base.widget())
            .and_then(|w| w.tabs())
            .map(|t| t.selected)
    }

    fn reload(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.apply_model(ctx);
    }
}
