//! Tree views.
//!
//! The logical model is a vector of [`TreeNode`] roots; pushing it walks
//! the nodes depth-first and mirrors them natively. Selection is reported
//! as the flattened depth-first index, which matches the native control's
//! item order.

use casement_core::logging::targets;
use casement_core::{TreeNode, WidgetId, WidgetKind};
use tracing::trace;

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, ItemSelectable};
use crate::error::ShellResult;
use crate::system::{codes, StyleFlags, WindowClass};

pub struct TreeAdapter {
    base: AdapterBase,
}

impl TreeAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }

    fn push_nodes(&mut self, ctx: &mut AdapterCtx<'_>) {
        let Some(handle) = self.base.handle() else { return };
        let nodes: Vec<TreeNode> = ctx
            .arena
            .get(self.base.widget())
            .and_then(|w| w.tree_nodes())
            .map(|n| n.to_vec())
            .unwrap_or_default();
        ctx.system.clear_items(handle);
        for node in &nodes {
            add_recursive(ctx, handle, None, node);
        }
    }
}

fn add_recursive(
    ctx: &mut AdapterCtx<'_>,
    handle: crate::system::RawHandle,
    parent: Option<u64>,
    node: &TreeNode,
) {
    let id = ctx.system.add_tree_node(handle, parent, &node.text);
    for child in &node.children {
        add_recursive(ctx, handle, Some(id), child);
    }
}

impl Adapter for TreeAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Tree
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        self.base.create(ctx, WindowClass::Tree, StyleFlags::BORDER)?;
        self.push_nodes(ctx);
        Ok(())
    }

    fn notify(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        match code {
            codes::SELECTION_CHANGED => {
                let Some(handle) = self.base.handle() else { return };
                let index = ctx.system.selected_index(handle);
                trace!(target: targets::ADAPTER, ?index, "tree selection");
                if let Some(w) = ctx.arena.get(self.base.widget()) {
                    w.signals
                        .selection_changed
                        .emit(index.map_or(-1, |i| i as i32));
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
        self.push_nodes(ctx);
    }

    fn as_item_selectable(&mut self) -> Option<&mut dyn ItemSelectable> {
        Some(self)
    }
}

impl ItemSelectable for TreeAdapter {
    fn select(&mut self, ctx: &mut AdapterCtx<'_>, index: Option<usize>) {
        if let Some(handle) = self.base.handle() {
            ctx.system.set_selected_index(handle, index);
        }
    }

    fn selection(&self, ctx: &AdapterCtx<'_>) -> Option<usize> {
        self.base
            .handle()
            .and_then(|handle| ctx.system.selected_index(handle))
    }

    fn reload(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.push_nodes(ctx);
    }
}
