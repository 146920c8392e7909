//! Buttons in all their shapes: push, check, radio, and the handle-less
//! radio group.

use casement_core::logging::targets;
use casement_core::{Size, WidgetId, WidgetKind};
use tracing::trace;

use crate::adapter::{Adapter, AdapterBase, AdapterCtx, ItemSelectable, Pressable, Textual};
use crate::error::ShellResult;
use crate::system::{codes, StyleFlags, WindowClass};

/// Slack around a button's measured caption.
const CAPTION_PADDING: Size = Size::new(24, 12);

fn caption_style(ctx: &AdapterCtx<'_>, widget: WidgetId, base: StyleFlags) -> StyleFlags {
    let mut style = base;
    if ctx.arena.get(widget).is_some_and(|w| w.ownerdraw) {
        style |= StyleFlags::OWNERDRAW;
    }
    style
}

// ===== Push button =====

pub struct ButtonAdapter {
    base: AdapterBase,
}

impl ButtonAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }
}

impl Adapter for ButtonAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let style = caption_style(ctx, self.base.widget(), StyleFlags::PUSH);
        self.base.create(ctx, WindowClass::Button, style)?;
        Ok(())
    }

    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        if code == codes::ACTIVATED {
            if let Some(w) = ctx.arena.get(self.base.widget()) {
                w.signals.clicked.emit(());
            }
        }
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let extent = self.base.text_extent(ctx);
        Some(extent.grown(CAPTION_PADDING.width, CAPTION_PADDING.height))
    }

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        Some(self)
    }

    fn as_pressable(&mut self) -> Option<&mut dyn Pressable> {
        Some(self)
    }
}

impl Textual for ButtonAdapter {
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

impl Pressable for ButtonAdapter {
    fn press(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.command(ctx, codes::ACTIVATED);
    }

    fn set_checked(&mut self, _ctx: &mut AdapterCtx<'_>, _checked: bool) {}

    fn is_checked(&self, _ctx: &AdapterCtx<'_>) -> bool {
        false
    }
}

// ===== Checkbox =====

pub struct CheckboxAdapter {
    base: AdapterBase,
}

impl CheckboxAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }

    fn apply_check(&mut self, ctx: &mut AdapterCtx<'_>, checked: bool, notify: bool) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            w.checked = checked;
        }
        if let Some(handle) = self.base.handle() {
            ctx.system.set_check_state(handle, checked);
        }
        if notify {
            if let Some(w) = ctx.arena.get(self.base.widget()) {
                w.signals.toggled.emit(checked);
            }
        }
    }
}

impl Adapter for CheckboxAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Checkbox
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let style = caption_style(ctx, self.base.widget(), StyleFlags::CHECKBOX);
        self.base.create(ctx, WindowClass::Button, style)?;
        Ok(())
    }

    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        let checked = ctx
            .arena
            .get(self.base.widget())
            .is_some_and(|w| w.checked);
        if checked {
            if let Some(handle) = self.base.handle() {
                ctx.system.set_check_state(handle, true);
            }
        }
    }

    /// The native control does not toggle itself; flip state here and push
    /// it back.
    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        if code == codes::ACTIVATED {
            let checked = !ctx
                .arena
                .get(self.base.widget())
                .is_some_and(|w| w.checked);
            self.apply_check(ctx, checked, true);
        }
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let extent = self.base.text_extent(ctx);
        Some(extent.grown(CAPTION_PADDING.width, 8))
    }

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        Some(self)
    }

    fn as_pressable(&mut self) -> Option<&mut dyn Pressable> {
        Some(self)
    }
}

impl Textual for CheckboxAdapter {
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

impl Pressable for CheckboxAdapter {
    fn press(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.command(ctx, codes::ACTIVATED);
    }

    /// Programmatic set: no toggled signal, matching native behavior.
    fn set_checked(&mut self, ctx: &mut AdapterCtx<'_>, checked: bool) {
        self.apply_check(ctx, checked, false);
    }

    fn is_checked(&self, ctx: &AdapterCtx<'_>) -> bool {
        ctx.arena
            .get(self.base.widget())
            .is_some_and(|w| w.checked)
    }
}

// ===== Radio button =====

/// The radio buttons sharing `widget`'s parent, in child order.
fn radio_peers(ctx: &AdapterCtx<'_>, widget: WidgetId) -> Vec<WidgetId> {
    let Some(parent) = ctx.arena.parent(widget) else {
        return vec![widget];
    };
    ctx.arena
        .children(parent)
        .iter()
        .copied()
        .filter(|&id| {
            ctx.arena
                .get(id)
                .is_some_and(|w| w.kind() == WidgetKind::RadioButton)
        })
        .collect()
}

pub struct RadioButtonAdapter {
    base: AdapterBase,
}

impl RadioButtonAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }

    /// Check this button, uncheck its peers, and notify. The containing
    /// radio group (if any) reports the new selected index.
    fn select_self(&mut self, ctx: &mut AdapterCtx<'_>, notify: bool) {
        let widget = self.base.widget();
        let peers = radio_peers(ctx, widget);
        let mut selected_index = None;
        for (index, peer) in peers.iter().copied().enumerate() {
            let checked = peer == widget;
            if checked {
                selected_index = Some(index);
            }
            if let Some(w) = ctx.arena.get_mut(peer) {
                w.checked = checked;
            }
            if let Some(handle) = ctx.handle_of(peer) {
                ctx.system.set_check_state(handle, checked);
            }
        }
        if !notify {
            return;
        }
        if let Some(w) = ctx.arena.get(widget) {
            w.signals.toggled.emit(true);
        }
        let group = ctx.arena.parent(widget).filter(|&p| {
            ctx.arena
                .get(p)
                .is_some_and(|w| w.kind() == WidgetKind::RadioGroup)
        });
        if let (Some(group), Some(index)) = (group, selected_index) {
            if let Some(w) = ctx.arena.get_mut(group) {
                if let Some(items) = w.items_mut() {
                    items.select_only(Some(index));
                }
                w.signals.selection_changed.emit(index as i32);
            }
        }
    }
}

impl Adapter for RadioButtonAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::RadioButton
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        let style = caption_style(ctx, self.base.widget(), StyleFlags::RADIO);
        self.base.create(ctx, WindowClass::Button, style)?;
        Ok(())
    }

    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        let checked = ctx
            .arena
            .get(self.base.widget())
            .is_some_and(|w| w.checked);
        if checked {
            if let Some(handle) = self.base.handle() {
                ctx.system.set_check_state(handle, true);
            }
        }
    }

    fn command(&mut self, ctx: &mut AdapterCtx<'_>, code: u32) {
        if code == codes::ACTIVATED {
            self.select_self(ctx, true);
        }
    }

    fn preferred_size(&self, ctx: &mut AdapterCtx<'_>) -> Option<Size> {
        let extent = self.base.text_extent(ctx);
        Some(extent.grown(CAPTION_PADDING.width, 8))
    }

    fn as_textual(&mut self) -> Option<&mut dyn Textual> {
        Some(self)
    }

    fn as_pressable(&mut self) -> Option<&mut dyn Pressable> {
        Some(self)
    }
}

impl Textual for RadioButtonAdapter {
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

impl Pressable for RadioButtonAdapter {
    fn press(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.command(ctx, codes::ACTIVATED);
    }

    fn set_checked(&mut self, ctx: &mut AdapterCtx<'_>, checked: bool) {
        // A radio button is only ever checked by selecting it.
        if checked {
            self.select_self(ctx, false);
        }
    }

    fn is_checked(&self, ctx: &AdapterCtx<'_>) -> bool {
        ctx.arena
            .get(self.base.widget())
            .is_some_and(|w| w.checked)
    }
}

// ===== Radio group =====

/// A handle-less grouping of radio buttons exposing an indexed selection.
pub struct RadioGroupAdapter {
    base: AdapterBase,
}

impl RadioGroupAdapter {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            base: AdapterBase::new(widget),
        }
    }

    fn member_radios(&self, ctx: &AdapterCtx<'_>) -> Vec<WidgetId> {
        ctx.arena
            .children(self.base.widget())
            .iter()
            .copied()
            .filter(|&id| {
                ctx.arena
                    .get(id)
                    .is_some_and(|w| w.kind() == WidgetKind::RadioButton)
            })
            .collect()
    }

    fn push_selection(&mut self, ctx: &mut AdapterCtx<'_>, index: Option<usize>) {
        let members = self.member_radios(ctx);
        for (i, member) in members.iter().copied().enumerate() {
            let checked = Some(i) == index;
            if let Some(w) = ctx.arena.get_mut(member) {
                w.checked = checked;
            }
            if let Some(handle) = ctx.handle_of(member) {
                ctx.system.set_check_state(handle, checked);
            }
        }
    }
}

impl Adapter for RadioGroupAdapter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::RadioGroup
    }

    fn base(&self) -> &AdapterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn materialize(&mut self, _ctx: &mut AdapterCtx<'_>) -> ShellResult<()> {
        // No native presence; the member radio buttons carry the handles.
        Ok(())
    }

    /// Push the model's initial selection once the member buttons exist.
    fn post_materialize(&mut self, ctx: &mut AdapterCtx<'_>) {
        let initial = ctx
            .arena
            .get(self.base.widget())
            .and_then(|w| w.items())
            .and_then(|m| m.primary_selection());
        if initial.is_some() {
            trace!(target: targets::ADAPTER, index = ?initial, "radio group initial selection");
            self.push_selection(ctx, initial);
        }
    }

    fn apply_model(&mut self, ctx: &mut AdapterCtx<'_>) {
        let selection = ctx
            .arena
            .get(self.base.widget())
            .and_then(|w| w.items())
            .and_then(|m| m.primary_selection());
        self.push_selection(ctx, selection);
    }

    fn as_item_selectable(&mut self) -> Option<&mut dyn ItemSelectable> {
        Some(self)
    }
}

impl ItemSelectable for RadioGroupAdapter {
    fn select(&mut self, ctx: &mut AdapterCtx<'_>, index: Option<usize>) {
        if let Some(w) = ctx.arena.get_mut(self.base.widget()) {
            if let Some(items) = w.items_mut() {
                items.select_only(index);
            }
        }
        self.push_selection(ctx, index);
    }

    fn selection(&self, ctx: &AdapterCtx<'_>) -> Option<usize> {
        let members = self.member_radios(ctx);
        members
            .iter()
            .position(|&id| ctx.arena.get(id).is_some_and(|w| w.checked))
    }

    fn reload(&mut self, ctx: &mut AdapterCtx<'_>) {
        self.apply_model(ctx);
    }
}
