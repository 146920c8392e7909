//! The concrete adapter per widget kind.
//!
//! [`adapter_for`] is the single construction point: the shell asks it for
//! an adapter when a widget first materializes. Menu kinds have no control
//! adapter; they go through the menu binding path instead.

mod bars;
mod button;
mod label;
mod list;
mod panel;
mod scroll_bar;
mod table;
mod tabs;
mod text;
mod tree;

pub use bars::{StatusBarAdapter, ToolBarAdapter};
pub use button::{ButtonAdapter, CheckboxAdapter, RadioButtonAdapter, RadioGroupAdapter};
pub use label::LabelAdapter;
pub use list::{ComboBoxAdapter, ListBoxAdapter};
pub use panel::{GroupBoxAdapter, LightweightAdapter, PanelAdapter};
pub use scroll_bar::ScrollBarAdapter;
pub use table::TableAdapter;
pub use tabs::TabbedPaneAdapter;
pub use text::{TextAreaAdapter, TextFieldAdapter};
pub use tree::TreeAdapter;

use casement_core::{WidgetId, WidgetKind};

use super::Adapter;
use crate::window::{DialogAdapter, HostFrameAdapter, WindowAdapter};

/// Construct the adapter for `kind`, or `None` for kinds with no control
/// adapter (the menu tree).
pub fn adapter_for(id: WidgetId, kind: WidgetKind) -> Option<Box<dyn Adapter>> {
    let adapter: Box<dyn Adapter> = match kind {
        WidgetKind::Label => Box::new(LabelAdapter::new(id)),
        WidgetKind::Panel => Box::new(PanelAdapter::new(id)),
        WidgetKind::Lightweight => Box::new(LightweightAdapter::new(id)),
        WidgetKind::Button => Box::new(ButtonAdapter::new(id)),
        WidgetKind::RadioButton => Box::new(RadioButtonAdapter::new(id)),
        WidgetKind::RadioGroup => Box::new(RadioGroupAdapter::new(id)),
        WidgetKind::Checkbox => Box::new(CheckboxAdapter::new(id)),
        WidgetKind::ComboBox => Box::new(ComboBoxAdapter::new(id)),
        WidgetKind::ListBox => Box::new(ListBoxAdapter::new(id)),
        WidgetKind::GroupBox => Box::new(GroupBoxAdapter::new(id)),
        WidgetKind::TextField => Box::new(TextFieldAdapter::new(id)),
        WidgetKind::TextArea => Box::new(TextAreaAdapter::new(id)),
        WidgetKind::ToolBar => Box::new(ToolBarAdapter::new(id)),
        WidgetKind::StatusBar => Box::new(StatusBarAdapter::new(id)),
        WidgetKind::TabbedPane => Box::new(TabbedPaneAdapter::new(id)),
        WidgetKind::Table => Box::new(TableAdapter::new(id)),
        WidgetKind::Tree => Box::new(TreeAdapter::new(id)),
        WidgetKind::ScrollBar => Box::new(ScrollBarAdapter::new(id)),
        WidgetKind::Window => Box::new(WindowAdapter::frame(id)),
        WidgetKind::HostFrame => Box::new(HostFrameAdapter::new(id)),
        WidgetKind::Dialog => Box::new(DialogAdapter::new(id)),
        WidgetKind::MenuBar
        | WidgetKind::Menu
        | WidgetKind::MenuItem
        | WidgetKind::MenuSeparator => return None,
    };
    Some(adapter)
}
