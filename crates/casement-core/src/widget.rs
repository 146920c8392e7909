//! The logical widget model.
//!
//! A [`Widget`] is the platform-neutral description of a UI element: what
//! kind it is, its text, bounds, font, colors, and kind-specific model data
//! (list values, table rows, scroll range). Widgets live in a
//! [`WidgetArena`] and form a tree through parent/child links managed by the
//! arena.
//!
//! Widgets carry no native state whatsoever. The windowing layer binds one
//! adapter to each widget and pushes this description into native handles;
//! state flows back through the [`WidgetSignals`] on each widget.

use slotmap::{SlotMap, new_key_type};

use crate::color::Color;
use crate::error::{CoreError, CoreResult};
use crate::event::{Key, KeyEvent, Modifiers, MouseEvent, WindowEvent};
use crate::font::Font;
use crate::geometry::{Point, Rect, Size};
use crate::signal::Signal;

new_key_type! {
    /// A unique identifier for a widget in a [`WidgetArena`].
    pub struct WidgetId;
}

/// Every widget kind the layer can materialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Label,
    Panel,
    /// A widget with no native presence that paints into its nearest native
    /// ancestor.
    Lightweight,
    Button,
    RadioButton,
    /// A logical grouping of radio buttons with no native presence.
    RadioGroup,
    Checkbox,
    ComboBox,
    ListBox,
    GroupBox,
    TextField,
    TextArea,
    ToolBar,
    StatusBar,
    TabbedPane,
    Table,
    Tree,
    ScrollBar,
    Window,
    /// A window whose native parent is supplied by an embedding host.
    HostFrame,
    Dialog,
    MenuBar,
    /// A popup or submenu node.
    Menu,
    MenuItem,
    MenuSeparator,
}

impl WidgetKind {
    /// A short stable name, used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Panel => "panel",
            Self::Lightweight => "lightweight",
            Self::Button => "button",
            Self::RadioButton => "radio button",
            Self::RadioGroup => "radio group",
            Self::Checkbox => "checkbox",
            Self::ComboBox => "combo box",
            Self::ListBox => "list box",
            Self::GroupBox => "group box",
            Self::TextField => "text field",
            Self::TextArea => "text area",
            Self::ToolBar => "tool bar",
            Self::StatusBar => "status bar",
            Self::TabbedPane => "tabbed pane",
            Self::Table => "table",
            Self::Tree => "tree",
            Self::ScrollBar => "scroll bar",
            Self::Window => "window",
            Self::HostFrame => "host frame",
            Self::Dialog => "dialog",
            Self::MenuBar => "menu bar",
            Self::Menu => "menu",
            Self::MenuItem => "menu item",
            Self::MenuSeparator => "menu separator",
        }
    }

    /// Whether this kind is a top-level surface with its own pump.
    pub const fn is_top_level(self) -> bool {
        matches!(self, Self::Window | Self::HostFrame | Self::Dialog)
    }

    /// Whether this kind belongs to the menu tree.
    pub const fn is_menu(self) -> bool {
        matches!(
            self,
            Self::MenuBar | Self::Menu | Self::MenuItem | Self::MenuSeparator
        )
    }

    /// Whether handles of this kind act as native parents of child handles
    /// by default. Per-widget and per-subsystem configuration can override.
    pub const fn default_native_parent(self) -> bool {
        matches!(
            self,
            Self::Label | Self::Panel | Self::Window | Self::HostFrame | Self::Dialog
        )
    }
}

/// A keyboard shortcut attached to a window, translated into a command
/// carrying `command` before key dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accelerator {
    pub key: Key,
    pub modifiers: Modifiers,
    pub command: u32,
}

impl Accelerator {
    pub const fn new(key: Key, modifiers: Modifiers, command: u32) -> Self {
        Self {
            key,
            modifiers,
            command,
        }
    }
}

// ===== Kind-specific model data =====

/// A table column: header text and width in pixels (0 = size to content).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub width: i32,
}

impl Column {
    pub fn new(title: impl Into<String>, width: i32) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

/// Model for list-shaped widgets (combo boxes, list boxes, radio groups).
#[derive(Clone, Debug, Default)]
pub struct ItemsModel {
    pub values: Vec<String>,
    /// Optional second column shown beside each value (list boxes only).
    pub annotations: Vec<String>,
    /// Selected indexes, ascending. Single-select kinds keep at most one.
    pub selected: Vec<usize>,
    pub multi_select: bool,
    /// Rows the widget prefers to show without scrolling.
    pub visible_rows: i32,
}

impl ItemsModel {
    /// The primary (first) selected index.
    pub fn primary_selection(&self) -> Option<usize> {
        self.selected.first().copied()
    }

    /// Replace the selection with a single index, or clear it.
    pub fn select_only(&mut self, index: Option<usize>) {
        self.selected.clear();
        if let Some(i) = index {
            self.selected.push(i);
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }
}

/// Model for tables: columns plus rows of cell text.
#[derive(Clone, Debug, Default)]
pub struct TableModel {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub selected: Option<usize>,
}

/// A node in a tree widget's model.
#[derive(Clone, Debug, Default)]
pub struct TreeNode {
    pub text: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }
}

/// Model for scroll bars.
#[derive(Clone, Copy, Debug)]
pub struct RangeModel {
    pub minimum: i32,
    pub maximum: i32,
    /// Size of one page (thumb extent and page-scroll step).
    pub page: i32,
    pub value: i32,
    pub vertical: bool,
}

impl Default for RangeModel {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: 100,
            page: 10,
            value: 0,
            vertical: true,
        }
    }
}

impl RangeModel {
    /// Clamp `value` into the scrollable range.
    pub fn clamp(&self, value: i32) -> i32 {
        let top = (self.maximum - self.page + 1).max(self.minimum);
        value.clamp(self.minimum, top)
    }
}

/// Model for tabbed panes. Tab titles come from the child pages' text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TabsModel {
    pub selected: usize,
}

/// Kind-specific model data, tagged by shape rather than by widget kind so
/// adapters can match on what they consume.
#[derive(Clone, Debug, Default)]
pub enum Model {
    #[default]
    None,
    Items(ItemsModel),
    Table(TableModel),
    Tree(Vec<TreeNode>),
    Range(RangeModel),
    Tabs(TabsModel),
}

// ===== Signals =====

/// The capability callbacks a widget can deliver to the application.
///
/// Every widget carries the full set; kinds that never emit a given signal
/// simply leave it unconnected.
#[derive(Debug, Default)]
pub struct WidgetSignals {
    /// A button-like widget was activated.
    pub clicked: Signal<()>,
    /// A two-state widget changed state (checkbox, radio button).
    pub toggled: Signal<bool>,
    /// The selected index changed (-1 = no selection).
    pub selection_changed: Signal<i32>,
    /// Text content changed; carries the new text.
    pub text_changed: Signal<String>,
    /// The widget's default action ran (menu item chosen, return pressed).
    pub activated: Signal<()>,
    /// A scroll bar's value changed.
    pub value_changed: Signal<i32>,
    /// A window received a close request. The close proceeds after this.
    pub closing: Signal<()>,
    /// A window's native object is gone.
    pub closed: Signal<()>,
    pub resized: Signal<Size>,
    pub moved: Signal<Point>,
    pub mouse: Signal<MouseEvent>,
    pub key: Signal<KeyEvent>,
    pub window: Signal<WindowEvent>,
    pub focus_changed: Signal<bool>,
}

// ===== Widget =====

/// A platform-neutral UI element.
///
/// Configuration fields are public: the widget is a description record, and
/// the windowing layer reads it when materializing and pushing state. Tree
/// links are private and managed by [`WidgetArena`].
pub struct Widget {
    kind: WidgetKind,
    /// Label text, window title, button caption, tab title, or menu text.
    pub text: String,
    /// Bounds relative to the parent's client area (screen for top-levels).
    pub bounds: Rect,
    pub font: Option<Font>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub enabled: bool,
    pub visible: bool,
    /// Text widgets: whether the user can edit the content.
    pub editable: bool,
    pub tooltip: Option<String>,
    /// Delegate painting of this widget to application code.
    pub ownerdraw: bool,
    /// Initial check state (checkboxes, radio buttons, menu items).
    pub checked: bool,
    /// Command identifier for menu items and accelerator targets.
    pub command_id: Option<u32>,
    /// Overrides the kind's default native-parent behavior when set.
    pub native_parent_override: Option<bool>,
    /// Windows: draw a title bar.
    pub titled: bool,
    /// Windows: user-resizable frame.
    pub resizable: bool,
    /// Host frames: the raw native handle supplied by the embedding host.
    pub host_parent: Option<u64>,
    /// Windows: the menu bar widget to attach at open.
    pub menu_bar: Option<WidgetId>,
    /// Windows: keyboard shortcuts installed at open.
    pub accelerators: Vec<Accelerator>,
    pub model: Model,
    pub signals: WidgetSignals,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
}

impl Widget {
    /// Create a widget of the given kind with kind-appropriate defaults.
    pub fn new(kind: WidgetKind) -> Self {
        let model = match kind {
            WidgetKind::ComboBox | WidgetKind::ListBox | WidgetKind::RadioGroup => {
                Model::Items(ItemsModel::default())
            }
            WidgetKind::Table => Model::Table(TableModel::default()),
            WidgetKind::Tree => Model::Tree(Vec::new()),
            WidgetKind::ScrollBar => Model::Range(RangeModel::default()),
            WidgetKind::TabbedPane => Model::Tabs(TabsModel::default()),
            _ => Model::None,
        };
        Self {
            kind,
            text: String::new(),
            bounds: Rect::ZERO,
            font: None,
            foreground: None,
            background: None,
            enabled: true,
            visible: true,
            editable: true,
            tooltip: None,
            ownerdraw: false,
            checked: false,
            command_id: None,
            native_parent_override: None,
            titled: true,
            resizable: true,
            host_parent: None,
            menu_bar: None,
            accelerators: Vec::new(),
            model,
            signals: WidgetSignals::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    // ----- Convenience constructors -----

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(WidgetKind::Label).with_text(text)
    }

    pub fn panel() -> Self {
        Self::new(WidgetKind::Panel)
    }

    pub fn button(text: impl Into<String>) -> Self {
        Self::new(WidgetKind::Button).with_text(text)
    }

    pub fn radio_button(text: impl Into<String>) -> Self {
        Self::new(WidgetKind::RadioButton).with_text(text)
    }

    pub fn radio_group() -> Self {
        Self::new(WidgetKind::RadioGroup)
    }

    pub fn checkbox(text: impl Into<String>) -> Self {
        Self::new(WidgetKind::Checkbox).with_text(text)
    }

    pub fn combo_box() -> Self {
        Self::new(WidgetKind::ComboBox)
    }

    pub fn list_box() -> Self {
        Self::new(WidgetKind::ListBox)
    }

    pub fn group_box(text: impl Into<String>) -> Self {
        Self::new(WidgetKind::GroupBox).with_text(text)
    }

    pub fn text_field() -> Self {
        Self::new(WidgetKind::TextField)
    }

    pub fn text_area() -> Self {
        Self::new(WidgetKind::TextArea)
    }

    pub fn tabbed_pane() -> Self {
        Self::new(WidgetKind::TabbedPane)
    }

    pub fn table() -> Self {
        Self::new(WidgetKind::Table)
    }

    pub fn tree() -> Self {
        Self::new(WidgetKind::Tree)
    }

    pub fn scroll_bar(vertical: bool) -> Self {
        let mut w = Self::new(WidgetKind::ScrollBar);
        if let Model::Range(range) = &mut w.model {
            range.vertical = vertical;
        }
        w
    }

    pub fn window(title: impl Into<String>) -> Self {
        Self::new(WidgetKind::Window).with_text(title)
    }

    pub fn dialog(title: impl Into<String>) -> Self {
        Self::new(WidgetKind::Dialog).with_text(title)
    }

    /// A window hosted inside a native handle owned by an embedding host.
    pub fn host_frame(host_parent: u64) -> Self {
        let mut w = Self::new(WidgetKind::HostFrame);
        w.host_parent = Some(host_parent);
        w.titled = false;
        w
    }

    pub fn menu_bar() -> Self {
        Self::new(WidgetKind::MenuBar)
    }

    pub fn menu(text: impl Into<String>) -> Self {
        Self::new(WidgetKind::Menu).with_text(text)
    }

    pub fn menu_item(text: impl Into<String>, command: u32) -> Self {
        let mut w = Self::new(WidgetKind::MenuItem).with_text(text);
        w.command_id = Some(command);
        w
    }

    pub fn menu_separator() -> Self {
        Self::new(WidgetKind::MenuSeparator)
    }

    // ----- Builder-style configuration -----

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn with_ownerdraw(mut self) -> Self {
        self.ownerdraw = true;
        self
    }

    pub fn with_command_id(mut self, command: u32) -> Self {
        self.command_id = Some(command);
        self
    }

    // ----- Accessors -----

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Whether this widget's handle should parent child handles natively,
    /// honoring the per-widget override.
    pub fn is_native_parent(&self) -> bool {
        self.native_parent_override
            .unwrap_or_else(|| self.kind.default_native_parent())
    }

    // ----- Typed model access -----

    pub fn items(&self) -> Option<&ItemsModel> {
        match &self.model {
            Model::Items(m) => Some(m),
            _ => None,
        }
    }

    pub fn items_mut(&mut self) -> Option<&mut ItemsModel> {
        match &mut self.model {
            Model::Items(m) => Some(m),
            _ => None,
        }
    }

    pub fn table_model(&self) -> Option<&TableModel> {
        match &self.model {
            Model::Table(m) => Some(m),
            _ => None,
        }
    }

    pub fn table_model_mut(&mut self) -> Option<&mut TableModel> {
        match &mut self.model {
            Model::Table(m) => Some(m),
            _ => None,
        }
    }

    pub fn tree_nodes(&self) -> Option<&[TreeNode]> {
        match &self.model {
            Model::Tree(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn tree_nodes_mut(&mut self) -> Option<&mut Vec<TreeNode>> {
        match &mut self.model {
            Model::Tree(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn range(&self) -> Option<&RangeModel> {
        match &self.model {
            Model::Range(m) => Some(m),
            _ => None,
        }
    }

    pub fn range_mut(&mut self) -> Option<&mut RangeModel> {
        match &mut self.model {
            Model::Range(m) => Some(m),
            _ => None,
        }
    }

    pub fn tabs(&self) -> Option<&TabsModel> {
        match &self.model {
            Model::Tabs(m) => Some(m),
            _ => None,
        }
    }

    pub fn tabs_mut(&mut self) -> Option<&mut TabsModel> {
        match &mut self.model {
            Model::Tabs(m) => Some(m),
            _ => None,
        }
    }
}

// ===== Arena =====

/// Owns every logical widget and maintains the tree structure.
#[derive(Default)]
pub struct WidgetArena {
    widgets: SlotMap<WidgetId, Widget>,
}

impl WidgetArena {
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
        }
    }

    /// Insert a widget with no parent.
    pub fn insert(&mut self, widget: Widget) -> WidgetId {
        self.widgets.insert(widget)
    }

    /// Insert a widget as the last child of `parent`.
    pub fn insert_child(&mut self, widget: Widget, parent: WidgetId) -> CoreResult<WidgetId> {
        if !self.widgets.contains_key(parent) {
            return Err(CoreError::WidgetNotFound);
        }
        let id = self.widgets.insert(widget);
        // Both keys are known live, attach cannot fail with a cycle.
        self.attach(id, parent)?;
        Ok(id)
    }

    /// Attach an existing root widget as the last child of `parent`.
    pub fn attach(&mut self, child: WidgetId, parent: WidgetId) -> CoreResult<()> {
        if child == parent {
            return Err(CoreError::WouldCycle);
        }
        if !self.widgets.contains_key(child) || !self.widgets.contains_key(parent) {
            return Err(CoreError::WidgetNotFound);
        }
        if self.widgets[child].parent.is_some() {
            return Err(CoreError::AlreadyAttached);
        }
        // Reject attaching a widget underneath its own subtree.
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(CoreError::WouldCycle);
            }
            cursor = self.widgets[id].parent;
        }
        self.widgets[child].parent = Some(parent);
        self.widgets[parent].children.push(child);
        Ok(())
    }

    /// Detach a widget from its parent, leaving it a root.
    pub fn detach(&mut self, child: WidgetId) -> CoreResult<()> {
        let parent = self
            .widgets
            .get(child)
            .ok_or(CoreError::WidgetNotFound)?
            .parent;
        if let Some(parent) = parent {
            self.widgets[child].parent = None;
            self.widgets[parent].children.retain(|&c| c != child);
        }
        Ok(())
    }

    /// Remove a widget and its whole subtree.
    ///
    /// Returns the removed widgets in post-order (children before parents),
    /// which is the order native teardown wants. Returns an empty vec for a
    /// stale id.
    pub fn remove(&mut self, id: WidgetId) -> Vec<(WidgetId, Widget)> {
        if !self.widgets.contains_key(id) {
            return Vec::new();
        }
        let _ = self.detach(id);
        let mut order = Vec::new();
        self.post_order(id, &mut order);
        order
            .into_iter()
            .filter_map(|wid| self.widgets.remove(wid).map(|w| (wid, w)))
            .collect()
    }

    fn post_order(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        for &child in self.widgets[id].children.iter() {
            self.post_order(child, out);
        }
        out.push(id);
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(id).and_then(|w| w.parent)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.widgets
            .get(id)
            .map(|w| w.children.as_slice())
            .unwrap_or(&[])
    }

    /// The root of the tree containing `id`.
    pub fn root_of(&self, id: WidgetId) -> WidgetId {
        let mut cursor = id;
        while let Some(parent) = self.parent(cursor) {
            cursor = parent;
        }
        cursor
    }

    /// Whether `id` is `root` or one of its descendants.
    pub fn is_in_subtree(&self, id: WidgetId, root: WidgetId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == root {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// The subtree rooted at `root` in pre-order, including `root`.
    pub fn descendants(&self, root: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        if self.widgets.contains_key(root) {
            self.pre_order(root, &mut out);
        }
        out
    }

    fn pre_order(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        out.push(id);
        for &child in self.widgets[id].children.iter() {
            self.pre_order(child, out);
        }
    }

    /// Find the first widget in `root`'s subtree matching `pred`, pre-order.
    pub fn find_in_subtree(
        &self,
        root: WidgetId,
        pred: impl Fn(&Widget) -> bool,
    ) -> Option<WidgetId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| pred(&self.widgets[id]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.widgets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (WidgetArena, WidgetId, WidgetId, WidgetId) {
        let mut arena = WidgetArena::new();
        let window = arena.insert(Widget::window("main"));
        let panel = arena.insert_child(Widget::panel(), window).unwrap();
        let button = arena.insert_child(Widget::button("ok"), panel).unwrap();
        (arena, window, panel, button)
    }

    #[test]
    fn test_tree_links() {
        let (arena, window, panel, button) = setup();
        assert_eq!(arena.parent(button), Some(panel));
        assert_eq!(arena.parent(panel), Some(window));
        assert_eq!(arena.children(window), &[panel]);
        assert_eq!(arena.root_of(button), window);
        assert!(arena.is_in_subtree(button, window));
        assert!(arena.is_in_subtree(window, window));
        assert!(!arena.is_in_subtree(window, button));
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let (mut arena, window, panel, _) = setup();
        arena.detach(panel).unwrap();
        assert_eq!(arena.attach(window, window), Err(CoreError::WouldCycle));
        // window under its own former subtree
        arena.attach(panel, window).unwrap();
        let err = arena.attach(window, panel);
        assert_eq!(err, Err(CoreError::WouldCycle));
    }

    #[test]
    fn test_attach_rejects_double_parent() {
        let (mut arena, window, _, button) = setup();
        assert_eq!(
            arena.attach(button, window),
            Err(CoreError::AlreadyAttached)
        );
    }

    #[test]
    fn test_remove_is_post_order() {
        let (mut arena, window, panel, button) = setup();
        let removed = arena.remove(window);
        let ids: Vec<WidgetId> = removed.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![button, panel, window]);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_remove_stale_is_empty() {
        let (mut arena, window, _, _) = setup();
        arena.remove(window);
        assert!(arena.remove(window).is_empty());
    }

    #[test]
    fn test_find_in_subtree() {
        let (mut arena, window, panel, _) = setup();
        let item = arena
            .insert_child(Widget::menu_item("Open", 7), panel)
            .unwrap();
        let found = arena.find_in_subtree(window, |w| w.command_id == Some(7));
        assert_eq!(found, Some(item));
        assert_eq!(
            arena.find_in_subtree(window, |w| w.command_id == Some(9)),
            None
        );
    }

    #[test]
    fn test_model_accessors_match_kind() {
        let mut w = Widget::table();
        assert!(w.table_model().is_some());
        assert!(w.table_model_mut().is_some());
        assert!(w.items().is_none());
        assert!(Widget::list_box().items().is_some());
    }

    #[test]
    fn test_native_parent_override() {
        let mut w = Widget::tabbed_pane();
        assert!(!w.is_native_parent());
        w.native_parent_override = Some(true);
        assert!(w.is_native_parent());
        assert!(Widget::panel().is_native_parent());
    }
}
