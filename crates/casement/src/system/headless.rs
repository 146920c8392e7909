//! The in-process reference system.
//!
//! [`HeadlessSystem`] implements the whole [`NativeSystem`] surface with
//! plain data structures and a manual clock, so the adapter layer runs
//! deterministically with no display. It reproduces the native quirks the
//! layer has to compensate for: list boxes round their height to whole
//! rows, and titled frames put their client area inside a border and
//! caption.
//!
//! Everything observable is counted or logged: draw calls, resource
//! lifetimes, popup opens, stale deletes. Tests script the interactive
//! answers (popup choices, message box buttons) up front and assert on the
//! counters afterwards.

use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use casement_core::logging::targets;
use casement_core::{Accelerator, Color, Font, Key, Point, Rect, Size, SystemColor};
use tracing::{debug, trace};

use super::{
    BrushHandle, CreateParams, DrawItemRecord, FontHandle, MenuHandle, Message, MessageChoice,
    MessageChoices, MessageKind, NativeSystem, PaintTicket, PenHandle, RawHandle, StyleFlags,
    SurfaceId, SystemCallError, TextMetrics, WindowClass,
};

/// Fixed row height of headless list boxes.
pub const ROW_HEIGHT: i32 = 16;
/// Left/right border thickness of a titled frame.
const FRAME_EDGE: i32 = 4;
/// Caption height of a titled frame.
const CAPTION: i32 = 24;

/// One logged drawing primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    Line { from: Point, to: Point },
    Rect(Rect),
    RoundRect(Rect),
    Ellipse(Rect),
    Pie { rect: Rect, from: Point, to: Point },
    FillRect(Rect),
    Text { at: Point, text: String },
}

#[derive(Default)]
struct NativeObject {
    class: Option<WindowClass>,
    style: StyleFlags,
    text: String,
    bounds: Rect,
    parent: Option<RawHandle>,
    control_id: u16,
    enabled: bool,
    visible: bool,
    checked: bool,
    read_only: bool,
    font: FontHandle,
    items: Vec<String>,
    selected: Vec<usize>,
    columns: Vec<(String, i32)>,
    rows: Vec<Vec<String>>,
    tree_nodes: Vec<(u64, Option<u64>, String)>,
    scroll: (i32, i32, i32, i32),
    tools: Vec<(RawHandle, String)>,
    menu_bar: Option<MenuHandle>,
}

enum MenuEntry {
    Item {
        id: u32,
        text: String,
        checked: bool,
        enabled: bool,
    },
    Separator,
    Submenu { handle: MenuHandle, text: String },
}

struct MenuObject {
    bar: bool,
    entries: Vec<MenuEntry>,
}

struct TimerArm {
    window: RawHandle,
    id: u64,
    interval: Duration,
    due: Duration,
}

/// The deterministic in-process [`NativeSystem`].
pub struct HeadlessSystem {
    registered: HashSet<WindowClass>,
    objects: HashMap<RawHandle, NativeObject>,
    next_handle: u64,
    focused: Option<RawHandle>,

    queue: VecDeque<Message>,
    quit: bool,
    defaulted: usize,

    accelerators: HashMap<RawHandle, Vec<Accelerator>>,

    surfaces: HashMap<SurfaceId, RawHandle>,
    next_surface: u64,
    draw_log: Vec<DrawOp>,
    draw_items: HashMap<u64, DrawItemRecord>,

    brushes: HashMap<BrushHandle, Color>,
    pens: HashMap<PenHandle, (Color, i32)>,
    fonts: HashMap<FontHandle, Font>,
    next_resource: u64,
    stale_resource_deletes: usize,
    stale_handle_destroys: usize,

    menus: HashMap<MenuHandle, MenuObject>,
    next_menu: u64,
    popup_replies: VecDeque<u32>,
    popup_opens: usize,

    message_replies: VecDeque<MessageChoice>,
    message_boxes: Vec<(String, String)>,

    timers: Vec<TimerArm>,
    clock: Duration,

    keys_down: HashSet<u32>,
}

impl Default for HeadlessSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSystem {
    pub fn new() -> Self {
        Self {
            registered: HashSet::new(),
            objects: HashMap::new(),
            next_handle: 1,
            focused: None,
            queue: VecDeque::new(),
            quit: false,
            defaulted: 0,
            accelerators: HashMap::new(),
            surfaces: HashMap::new(),
            next_surface: 1,
            draw_log: Vec::new(),
            draw_items: HashMap::new(),
            brushes: HashMap::new(),
            pens: HashMap::new(),
            fonts: HashMap::new(),
            next_resource: 1,
            stale_resource_deletes: 0,
            stale_handle_destroys: 0,
            menus: HashMap::new(),
            next_menu: 1,
            popup_replies: VecDeque::new(),
            popup_opens: 0,
            message_replies: VecDeque::new(),
            message_boxes: Vec::new(),
            timers: Vec::new(),
            clock: Duration::ZERO,
            keys_down: HashSet::new(),
        }
    }

    // ----- Test instrumentation -----

    pub fn live_handle_count(&self) -> usize {
        self.objects.len()
    }

    pub fn live_surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn live_brush_count(&self) -> usize {
        self.brushes.len()
    }

    pub fn live_pen_count(&self) -> usize {
        self.pens.len()
    }

    pub fn live_font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn live_menu_count(&self) -> usize {
        self.menus.len()
    }

    /// Deletes of resources or handles that were not live.
    pub fn stale_resource_deletes(&self) -> usize {
        self.stale_resource_deletes
    }

    pub fn stale_handle_destroys(&self) -> usize {
        self.stale_handle_destroys
    }

    /// Every drawing primitive executed so far, in order.
    pub fn draw_ops(&self) -> &[DrawOp] {
        &self.draw_log
    }

    pub fn clear_draw_ops(&mut self) {
        self.draw_log.clear();
    }

    pub fn popup_opens(&self) -> usize {
        self.popup_opens
    }

    /// Queue the item id the next tracked popup reports (0 = dismissed).
    pub fn script_popup_reply(&mut self, chosen: u32) {
        self.popup_replies.push_back(chosen);
    }

    /// Queue the button the next message box reports.
    pub fn script_message_reply(&mut self, choice: MessageChoice) {
        self.message_replies.push_back(choice);
    }

    /// Titles and texts of every message box shown.
    pub fn message_boxes(&self) -> &[(String, String)] {
        &self.message_boxes
    }

    /// Install the record behind an ownerdraw message key.
    pub fn script_draw_item(&mut self, key: u64, record: DrawItemRecord) {
        self.draw_items.insert(key, record);
    }

    pub fn press_key(&mut self, key: Key) {
        self.keys_down.insert(key.to_raw());
    }

    pub fn release_key(&mut self, key: Key) {
        self.keys_down.remove(&key.to_raw());
    }

    /// Advance the manual clock, posting timer messages in due order.
    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
        loop {
            let next = self
                .timers
                .iter_mut()
                .filter(|t| t.due <= self.clock)
                .min_by_key(|t| t.due);
            let Some(arm) = next else { break };
            let message = Message::timer(arm.window, arm.id);
            arm.due += arm.interval;
            self.queue.push_back(message);
        }
    }

    pub fn pending_messages(&self) -> usize {
        self.queue.len()
    }

    // ----- Internals -----

    fn alloc_handle(&mut self) -> RawHandle {
        let handle = RawHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn object(&self, handle: RawHandle) -> Option<&NativeObject> {
        self.objects.get(&handle)
    }

    fn object_mut(&mut self, handle: RawHandle) -> Option<&mut NativeObject> {
        self.objects.get_mut(&handle)
    }

    fn apply_quirks(class: Option<WindowClass>, mut bounds: Rect) -> Rect {
        if class == Some(WindowClass::ListBox) && bounds.height > 0 {
            // Whole rows only; never below one row.
            bounds.height = (bounds.height / ROW_HEIGHT).max(1) * ROW_HEIGHT;
        }
        bounds
    }

    fn children_of(&self, parent: RawHandle) -> Vec<RawHandle> {
        self.objects
            .iter()
            .filter(|(_, o)| o.parent == Some(parent))
            .map(|(&h, _)| h)
            .collect()
    }

    fn font_for_handle(&self, font: FontHandle) -> Font {
        self.fonts.get(&font).cloned().unwrap_or_default()
    }

    fn metrics_of(font: &Font) -> TextMetrics {
        let height = font.point_size() + 4;
        TextMetrics {
            height,
            ascent: height * 4 / 5,
            max_char_width: font.point_size() * 3 / 5 + 1,
            average_char_width: font.point_size() * 3 / 5,
            external_leading: 0,
        }
    }
}

impl NativeSystem for HeadlessSystem {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn register_classes(&mut self, classes: &[WindowClass]) -> Result<(), SystemCallError> {
        self.registered.extend(classes.iter().copied());
        Ok(())
    }

    fn create_handle(&mut self, params: &CreateParams<'_>) -> Result<RawHandle, SystemCallError> {
        if !self.registered.contains(&params.class) {
            return Err(SystemCallError::new(
                "create_handle",
                format!("class {:?} not registered", params.class),
            ));
        }
        if let Some(parent) = params.parent {
            if !self.objects.contains_key(&parent) {
                return Err(SystemCallError::new(
                    "create_handle",
                    format!("parent handle {} is not live", parent.0),
                ));
            }
        }
        let handle = self.alloc_handle();
        let bounds = Self::apply_quirks(Some(params.class), params.bounds);
        self.objects.insert(
            handle,
            NativeObject {
                class: Some(params.class),
                style: params.style,
                text: params.text.to_string(),
                bounds,
                parent: params.parent,
                control_id: params.control_id,
                enabled: true,
                visible: params.style.contains(StyleFlags::VISIBLE),
                read_only: params.style.contains(StyleFlags::READ_ONLY),
                font: self.stock_font(),
                ..NativeObject::default()
            },
        );
        trace!(target: targets::SYSTEM, handle = handle.0, class = ?params.class, "handle created");
        Ok(handle)
    }

    fn destroy_handle(&mut self, handle: RawHandle) {
        if self.objects.remove(&handle).is_none() {
            self.stale_handle_destroys += 1;
            debug!(target: targets::SYSTEM, handle = handle.0, "destroy of dead handle");
            return;
        }
        // Native destruction takes the child tree with it.
        for child in self.children_of(handle) {
            self.destroy_handle(child);
        }
        if self.focused == Some(handle) {
            self.focused = None;
        }
        self.accelerators.remove(&handle);
        self.timers.retain(|t| t.window != handle);
    }

    fn is_live(&self, handle: RawHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    fn set_text(&mut self, handle: RawHandle, text: &str) {
        if let Some(o) = self.object_mut(handle) {
            o.text = text.to_string();
        }
    }

    fn text(&self, handle: RawHandle) -> String {
        self.object(handle).map(|o| o.text.clone()).unwrap_or_default()
    }

    fn set_enabled(&mut self, handle: RawHandle, enabled: bool) {
        if let Some(o) = self.object_mut(handle) {
            o.enabled = enabled;
        }
    }

    fn is_enabled(&self, handle: RawHandle) -> bool {
        self.object(handle).is_some_and(|o| o.enabled)
    }

    fn set_visible(&mut self, handle: RawHandle, visible: bool) {
        if let Some(o) = self.object_mut(handle) {
            o.visible = visible;
        }
    }

    fn is_visible(&self, handle: RawHandle) -> bool {
        self.object(handle).is_some_and(|o| o.visible)
    }

    fn set_focus(&mut self, handle: RawHandle) {
        if self.objects.contains_key(&handle) {
            self.focused = Some(handle);
        }
    }

    fn focused(&self) -> Option<RawHandle> {
        self.focused
    }

    fn set_bounds(&mut self, handle: RawHandle, bounds: Rect) {
        let class = self.object(handle).and_then(|o| o.class);
        let bounds = Self::apply_quirks(class, bounds);
        if let Some(o) = self.object_mut(handle) {
            o.bounds = bounds;
        }
    }

    fn bounds(&self, handle: RawHandle) -> Rect {
        self.object(handle).map(|o| o.bounds).unwrap_or(Rect::ZERO)
    }

    fn client_size(&self, handle: RawHandle) -> Size {
        let Some(o) = self.object(handle) else {
            return Size::ZERO;
        };
        if o.style.contains(StyleFlags::TITLED) {
            Size::new(
                (o.bounds.width - 2 * FRAME_EDGE).max(0),
                (o.bounds.height - CAPTION - FRAME_EDGE).max(0),
            )
        } else {
            o.bounds.size()
        }
    }

    fn client_offset(&self, handle: RawHandle) -> Point {
        let titled = self
            .object(handle)
            .is_some_and(|o| o.style.contains(StyleFlags::TITLED));
        if titled {
            Point::new(FRAME_EDGE, CAPTION)
        } else {
            Point::ZERO
        }
    }

    fn invalidate(&mut self, _handle: RawHandle, _area: Option<Rect>) {}

    fn to_front(&mut self, _handle: RawHandle) {}

    fn set_control_font(&mut self, handle: RawHandle, font: FontHandle) {
        if let Some(o) = self.object_mut(handle) {
            o.font = font;
        }
    }

    fn set_check_state(&mut self, handle: RawHandle, checked: bool) {
        if let Some(o) = self.object_mut(handle) {
            o.checked = checked;
        }
    }

    fn check_state(&self, handle: RawHandle) -> bool {
        self.object(handle).is_some_and(|o| o.checked)
    }

    fn set_read_only(&mut self, handle: RawHandle, read_only: bool) {
        if let Some(o) = self.object_mut(handle) {
            o.read_only = read_only;
        }
    }

    fn add_item_text(&mut self, handle: RawHandle, text: &str) {
        if let Some(o) = self.object_mut(handle) {
            o.items.push(text.to_string());
        }
    }

    fn clear_items(&mut self, handle: RawHandle) {
        if let Some(o) = self.object_mut(handle) {
            o.items.clear();
            o.rows.clear();
            o.tree_nodes.clear();
            o.selected.clear();
        }
    }

    fn item_count(&self, handle: RawHandle) -> usize {
        self.object(handle)
            .map(|o| o.items.len().max(o.rows.len()).max(o.tree_nodes.len()))
            .unwrap_or(0)
    }

    fn set_selected_index(&mut self, handle: RawHandle, index: Option<usize>) {
        if let Some(o) = self.object_mut(handle) {
            o.selected.clear();
            if let Some(i) = index {
                o.selected.push(i);
            }
        }
    }

    fn selected_index(&self, handle: RawHandle) -> Option<usize> {
        self.object(handle).and_then(|o| o.selected.first().copied())
    }

    fn set_item_selected(&mut self, handle: RawHandle, index: usize, selected: bool) {
        if let Some(o) = self.object_mut(handle) {
            if selected {
                if !o.selected.contains(&index) {
                    o.selected.push(index);
                    o.selected.sort_unstable();
                }
            } else {
                o.selected.retain(|&i| i != index);
            }
        }
    }

    fn is_item_selected(&self, handle: RawHandle, index: usize) -> bool {
        self.object(handle)
            .is_some_and(|o| o.selected.contains(&index))
    }

    fn item_height(&self, _handle: RawHandle) -> i32 {
        ROW_HEIGHT
    }

    fn set_columns(&mut self, handle: RawHandle, columns: &[(String, i32)]) {
        if let Some(o) = self.object_mut(handle) {
            o.columns = columns.to_vec();
        }
    }

    fn column_width(&self, handle: RawHandle, index: usize) -> i32 {
        let Some(o) = self.object(handle) else { return 0 };
        let Some((title, declared)) = o.columns.get(index) else {
            return 0;
        };
        if *declared > 0 {
            return *declared;
        }
        // Auto-size: widest cell (or the header) at the stock char width.
        let chars = o
            .rows
            .iter()
            .filter_map(|r| r.get(index))
            .map(|c| c.chars().count())
            .chain(std::iter::once(title.chars().count()))
            .max()
            .unwrap_or(0);
        chars as i32 * 7 + 12
    }

    fn add_row(&mut self, handle: RawHandle, cells: &[String]) {
        if let Some(o) = self.object_mut(handle) {
            o.rows.push(cells.to_vec());
        }
    }

    fn add_tree_node(&mut self, handle: RawHandle, parent: Option<u64>, text: &str) -> u64 {
        let Some(o) = self.object_mut(handle) else { return 0 };
        let id = o.tree_nodes.len() as u64 + 1;
        o.tree_nodes.push((id, parent, text.to_string()));
        id
    }

    fn set_scroll_info(&mut self, handle: RawHandle, minimum: i32, maximum: i32, page: i32, value: i32) {
        if let Some(o) = self.object_mut(handle) {
            o.scroll = (minimum, maximum, page, value);
        }
    }

    fn scroll_value(&self, handle: RawHandle) -> i32 {
        self.object(handle).map(|o| o.scroll.3).unwrap_or(0)
    }

    // ----- Message queue -----

    fn post(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    fn next_message(&mut self) -> Option<Message> {
        self.queue.pop_front()
    }

    fn default_reply(&mut self, _message: &Message) -> i64 {
        self.defaulted += 1;
        0
    }

    fn post_quit(&mut self) {
        self.quit = true;
    }

    fn take_quit(&mut self) -> bool {
        std::mem::take(&mut self.quit)
    }

    // ----- Accelerators -----

    fn translate_accelerator(&mut self, window: RawHandle, message: &Message) -> Option<Message> {
        if message.kind != MessageKind::KeyDown {
            return None;
        }
        let (key, modifiers) = message.key()?;
        let table = self.accelerators.get(&window)?;
        let hit = table
            .iter()
            .find(|a| a.key == key && a.modifiers == modifiers)?;
        trace!(target: targets::SYSTEM, command = hit.command, "accelerator translated");
        Some(Message::command(window, hit.command, None))
    }

    fn set_accelerators(&mut self, window: RawHandle, table: &[Accelerator]) {
        self.accelerators.insert(window, table.to_vec());
    }

    fn clear_accelerators(&mut self, window: RawHandle) {
        self.accelerators.remove(&window);
    }

    // ----- Tooltips -----

    fn create_tooltip(&mut self, window: RawHandle) -> Result<RawHandle, SystemCallError> {
        if !self.objects.contains_key(&window) {
            return Err(SystemCallError::new(
                "create_tooltip",
                format!("owner handle {} is not live", window.0),
            ));
        }
        let handle = self.alloc_handle();
        self.objects.insert(
            handle,
            NativeObject {
                class: Some(WindowClass::ToolTip),
                parent: Some(window),
                enabled: true,
                ..NativeObject::default()
            },
        );
        Ok(handle)
    }

    fn add_tool(&mut self, tooltip: RawHandle, target: RawHandle, text: &str) {
        if let Some(o) = self.object_mut(tooltip) {
            o.tools.push((target, text.to_string()));
        }
    }

    // ----- Surfaces and drawing -----

    fn begin_paint(&mut self, handle: RawHandle) -> PaintTicket {
        let dirty = Rect::from_origin_size(Point::ZERO, self.client_size(handle));
        let surface = self.acquire_surface(handle);
        PaintTicket { surface, dirty }
    }

    fn end_paint(&mut self, handle: RawHandle, surface: SurfaceId) {
        self.release_surface(handle, surface);
    }

    fn acquire_surface(&mut self, handle: RawHandle) -> SurfaceId {
        let surface = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(surface, handle);
        surface
    }

    fn release_surface(&mut self, _handle: RawHandle, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }

    fn draw_item(&self, record: u64) -> Option<DrawItemRecord> {
        self.draw_items.get(&record).copied()
    }

    fn select_pen(&mut self, _surface: SurfaceId, _pen: PenHandle) {}

    fn select_brush(&mut self, _surface: SurfaceId, _brush: BrushHandle) {}

    fn select_font(&mut self, _surface: SurfaceId, _font: FontHandle) {}

    fn set_text_color(&mut self, _surface: SurfaceId, _color: Color) {}

    fn set_back_color(&mut self, _surface: SurfaceId, _color: Color) {}

    fn set_xor(&mut self, _surface: SurfaceId, _enabled: bool) {}

    fn line(&mut self, _surface: SurfaceId, from: Point, to: Point) {
        self.draw_log.push(DrawOp::Line { from, to });
    }

    fn rectangle(&mut self, _surface: SurfaceId, rect: Rect) {
        self.draw_log.push(DrawOp::Rect(rect));
    }

    fn round_rect(&mut self, _surface: SurfaceId, rect: Rect, _corner: Size) {
        self.draw_log.push(DrawOp::RoundRect(rect));
    }

    fn ellipse(&mut self, _surface: SurfaceId, rect: Rect) {
        self.draw_log.push(DrawOp::Ellipse(rect));
    }

    fn pie(&mut self, _surface: SurfaceId, rect: Rect, from: Point, to: Point) {
        self.draw_log.push(DrawOp::Pie { rect, from, to });
    }

    fn fill_rect(&mut self, _surface: SurfaceId, rect: Rect, _brush: BrushHandle) {
        self.draw_log.push(DrawOp::FillRect(rect));
    }

    fn text_out(&mut self, _surface: SurfaceId, at: Point, text: &str) {
        self.draw_log.push(DrawOp::Text {
            at,
            text: text.to_string(),
        });
    }

    // ----- Drawing resources -----

    fn create_brush(&mut self, color: Color) -> BrushHandle {
        let handle = BrushHandle(self.next_resource);
        self.next_resource += 1;
        self.brushes.insert(handle, color);
        handle
    }

    fn create_pen(&mut self, color: Color, width: i32) -> PenHandle {
        let handle = PenHandle(self.next_resource);
        self.next_resource += 1;
        self.pens.insert(handle, (color, width));
        handle
    }

    fn create_font(&mut self, font: &Font) -> FontHandle {
        let handle = FontHandle(self.next_resource);
        self.next_resource += 1;
        self.fonts.insert(handle, font.clone());
        handle
    }

    fn delete_brush(&mut self, brush: BrushHandle) {
        if self.brushes.remove(&brush).is_none() {
            self.stale_resource_deletes += 1;
        }
    }

    fn delete_pen(&mut self, pen: PenHandle) {
        if self.pens.remove(&pen).is_none() {
            self.stale_resource_deletes += 1;
        }
    }

    fn delete_font(&mut self, font: FontHandle) {
        if font == self.stock_font() {
            self.stale_resource_deletes += 1;
            return;
        }
        if self.fonts.remove(&font).is_none() {
            self.stale_resource_deletes += 1;
        }
    }

    fn stock_font(&self) -> FontHandle {
        FontHandle(0)
    }

    fn stock_hollow_brush(&self) -> BrushHandle {
        BrushHandle(0)
    }

    fn font_metrics(&self, font: FontHandle) -> TextMetrics {
        Self::metrics_of(&self.font_for_handle(font))
    }

    fn measure_text(&self, font: FontHandle, text: &str) -> Size {
        let metrics = self.font_metrics(font);
        Size::new(
            text.chars().count() as i32 * metrics.max_char_width,
            metrics.height,
        )
    }

    // ----- Menus -----

    fn create_menu_bar(&mut self) -> MenuHandle {
        let handle = MenuHandle(self.next_menu);
        self.next_menu += 1;
        self.menus.insert(
            handle,
            MenuObject {
                bar: true,
                entries: Vec::new(),
            },
        );
        handle
    }

    fn create_popup_menu(&mut self) -> MenuHandle {
        let handle = MenuHandle(self.next_menu);
        self.next_menu += 1;
        self.menus.insert(
            handle,
            MenuObject {
                bar: false,
                entries: Vec::new(),
            },
        );
        handle
    }

    fn append_item(&mut self, menu: MenuHandle, id: u32, text: &str) {
        if let Some(m) = self.menus.get_mut(&menu) {
            m.entries.push(MenuEntry::Item {
                id,
                text: text.to_string(),
                checked: false,
                enabled: true,
            });
        }
    }

    fn append_separator(&mut self, menu: MenuHandle) {
        if let Some(m) = self.menus.get_mut(&menu) {
            m.entries.push(MenuEntry::Separator);
        }
    }

    fn append_submenu(&mut self, menu: MenuHandle, submenu: MenuHandle, text: &str) {
        if let Some(m) = self.menus.get_mut(&menu) {
            m.entries.push(MenuEntry::Submenu {
                handle: submenu,
                text: text.to_string(),
            });
        }
    }

    fn set_item_checked(&mut self, menu: MenuHandle, id: u32, checked: bool) {
        if let Some(m) = self.menus.get_mut(&menu) {
            for entry in &mut m.entries {
                if let MenuEntry::Item {
                    id: item_id,
                    checked: c,
                    ..
                } = entry
                {
                    if *item_id == id {
                        *c = checked;
                    }
                }
            }
        }
    }

    fn is_item_checked(&self, menu: MenuHandle, id: u32) -> bool {
        self.menus.get(&menu).is_some_and(|m| {
            m.entries.iter().any(|e| {
                matches!(e, MenuEntry::Item { id: item_id, checked: true, .. } if *item_id == id)
            })
        })
    }

    fn set_item_enabled(&mut self, menu: MenuHandle, id: u32, enabled: bool) {
        if let Some(m) = self.menus.get_mut(&menu) {
            for entry in &mut m.entries {
                if let MenuEntry::Item {
                    id: item_id,
                    enabled: e,
                    ..
                } = entry
                {
                    if *item_id == id {
                        *e = enabled;
                    }
                }
            }
        }
    }

    fn remove_all_items(&mut self, menu: MenuHandle) {
        let submenus: Vec<MenuHandle> = match self.menus.get_mut(&menu) {
            Some(m) => {
                let subs = m
                    .entries
                    .iter()
                    .filter_map(|e| match e {
                        MenuEntry::Submenu { handle, .. } => Some(*handle),
                        _ => None,
                    })
                    .collect();
                m.entries.clear();
                subs
            }
            None => Vec::new(),
        };
        for sub in submenus {
            self.destroy_menu(sub);
        }
    }

    fn destroy_menu(&mut self, menu: MenuHandle) {
        let Some(object) = self.menus.remove(&menu) else {
            self.stale_resource_deletes += 1;
            return;
        };
        for entry in object.entries {
            if let MenuEntry::Submenu { handle, .. } = entry {
                self.destroy_menu(handle);
            }
        }
    }

    fn attach_menu_bar(&mut self, window: RawHandle, menu: MenuHandle) {
        if let Some(o) = self.object_mut(window) {
            o.menu_bar = Some(menu);
        }
    }

    fn redraw_menu_bar(&mut self, _window: RawHandle) {}

    fn track_popup(&mut self, _window: RawHandle, menu: MenuHandle, _at: Point) -> u32 {
        self.popup_opens += 1;
        if !self.menus.contains_key(&menu) {
            return 0;
        }
        self.popup_replies.pop_front().unwrap_or(0)
    }

    // ----- Timers -----

    fn set_timer(&mut self, window: RawHandle, id: u64, interval: Duration) {
        // Native timers clamp to a minimum period; a zero interval would
        // make `advance` spin forever.
        let interval = interval.max(Duration::from_millis(1));
        // Re-arming an existing id restarts its schedule.
        self.timers.retain(|t| !(t.window == window && t.id == id));
        self.timers.push(TimerArm {
            window,
            id,
            interval,
            due: self.clock + interval,
        });
    }

    fn kill_timer(&mut self, window: RawHandle, id: u64) {
        self.timers.retain(|t| !(t.window == window && t.id == id));
    }

    // ----- System queries -----

    fn screen_size(&self) -> Size {
        Size::new(1280, 1024)
    }

    fn system_color(&self, color: SystemColor) -> Color {
        match color {
            SystemColor::ButtonFace => Color::LIGHT_GRAY,
            SystemColor::ButtonShadow => Color::DARK_GRAY,
            SystemColor::ButtonHighlight => Color::WHITE,
            SystemColor::WindowBackground => Color::WHITE,
            SystemColor::WindowText => Color::BLACK,
            SystemColor::Highlight => Color::new(0, 0, 128),
            SystemColor::HighlightText => Color::WHITE,
            SystemColor::GrayText => Color::GRAY,
        }
    }

    fn scroll_bar_thickness(&self, _vertical: bool) -> i32 {
        16
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key.to_raw())
    }

    fn message_box(
        &mut self,
        _owner: Option<RawHandle>,
        title: &str,
        text: &str,
        choices: MessageChoices,
    ) -> MessageChoice {
        self.message_boxes.push((title.to_string(), text.to_string()));
        self.message_replies.pop_front().unwrap_or(match choices {
            MessageChoices::Ok | MessageChoices::OkCancel => MessageChoice::Ok,
            MessageChoices::YesNo | MessageChoices::YesNoCancel => MessageChoice::Yes,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casement_core::Modifiers;

    fn system() -> HeadlessSystem {
        let mut sys = HeadlessSystem::new();
        sys.register_classes(WindowClass::ALL).unwrap();
        sys
    }

    fn create(sys: &mut HeadlessSystem, class: WindowClass, style: StyleFlags, bounds: Rect, parent: Option<RawHandle>) -> RawHandle {
        sys.create_handle(&CreateParams {
            class,
            style,
            text: "",
            bounds,
            parent,
            control_id: 0,
        })
        .unwrap()
    }

    #[test]
    fn test_unregistered_class_rejected() {
        let mut sys = HeadlessSystem::new();
        let err = sys.create_handle(&CreateParams {
            class: WindowClass::Frame,
            style: StyleFlags::empty(),
            text: "",
            bounds: Rect::ZERO,
            parent: None,
            control_id: 0,
        });
        assert!(err.is_err());
    }

    #[test]
    fn test_listbox_rounds_height_to_rows() {
        let mut sys = system();
        let frame = create(&mut sys, WindowClass::Frame, StyleFlags::empty(), Rect::new(0, 0, 300, 300), None);
        let list = create(
            &mut sys,
            WindowClass::ListBox,
            StyleFlags::CHILD,
            Rect::new(10, 10, 100, 75),
            Some(frame),
        );
        assert_eq!(sys.bounds(list).height, 64);
        sys.set_bounds(list, Rect::new(10, 10, 100, 100));
        assert_eq!(sys.bounds(list).height, 96);
        // Never below one row.
        sys.set_bounds(list, Rect::new(10, 10, 100, 5));
        assert_eq!(sys.bounds(list).height, ROW_HEIGHT);
    }

    #[test]
    fn test_titled_frame_client_geometry() {
        let mut sys = system();
        let frame = create(
            &mut sys,
            WindowClass::Frame,
            StyleFlags::TITLED,
            Rect::new(0, 0, 200, 150),
            None,
        );
        assert_eq!(sys.client_offset(frame), Point::new(4, 24));
        assert_eq!(sys.client_size(frame), Size::new(192, 122));
        let plain = create(
            &mut sys,
            WindowClass::Panel,
            StyleFlags::empty(),
            Rect::new(0, 0, 200, 150),
            None,
        );
        assert_eq!(sys.client_offset(plain), Point::ZERO);
        assert_eq!(sys.client_size(plain), Size::new(200, 150));
    }

    #[test]
    fn test_destroy_takes_children() {
        let mut sys = system();
        let frame = create(&mut sys, WindowClass::Frame, StyleFlags::empty(), Rect::new(0, 0, 100, 100), None);
        let panel = create(&mut sys, WindowClass::Panel, StyleFlags::CHILD, Rect::new(0, 0, 50, 50), Some(frame));
        let button = create(&mut sys, WindowClass::Button, StyleFlags::CHILD, Rect::new(0, 0, 20, 20), Some(panel));
        sys.destroy_handle(frame);
        assert!(!sys.is_live(panel));
        assert!(!sys.is_live(button));
        assert_eq!(sys.live_handle_count(), 0);
        sys.destroy_handle(button);
        assert_eq!(sys.stale_handle_destroys(), 1);
    }

    #[test]
    fn test_accelerator_translation() {
        let mut sys = system();
        let frame = create(&mut sys, WindowClass::Frame, StyleFlags::empty(), Rect::ZERO, None);
        sys.set_accelerators(
            frame,
            &[Accelerator::new(Key::Char('s'), Modifiers::CTRL, 42)],
        );
        let hit = Message::key_down(frame, Key::Char('s'), Modifiers::CTRL);
        let translated = sys.translate_accelerator(frame, &hit).unwrap();
        assert_eq!(translated.kind, MessageKind::Command);
        assert_eq!(translated.command_id(), 42);
        let miss = Message::key_down(frame, Key::Char('s'), Modifiers::empty());
        assert!(sys.translate_accelerator(frame, &miss).is_none());
    }

    #[test]
    fn test_manual_clock_fires_in_due_order() {
        let mut sys = system();
        let frame = create(&mut sys, WindowClass::Frame, StyleFlags::empty(), Rect::ZERO, None);
        sys.set_timer(frame, 1, Duration::from_millis(30));
        sys.set_timer(frame, 2, Duration::from_millis(20));
        sys.advance(Duration::from_millis(65));
        let ids: Vec<u64> = std::iter::from_fn(|| sys.next_message())
            .map(|m| m.timer_id())
            .collect();
        // Due times: 20, 30, 40, 60 -> ids 2, 1, 2, 2 then 1 at 60.
        assert_eq!(ids, vec![2, 1, 2, 1, 2]);
        sys.kill_timer(frame, 1);
        sys.kill_timer(frame, 2);
        sys.advance(Duration::from_millis(100));
        assert!(sys.next_message().is_none());
    }

    #[test]
    fn test_zero_interval_timer_is_clamped() {
        let mut sys = system();
        let frame = create(&mut sys, WindowClass::Frame, StyleFlags::empty(), Rect::ZERO, None);
        sys.set_timer(frame, 1, Duration::ZERO);
        // Clamped to the native minimum, so advancing terminates with one
        // message per clamped period.
        sys.advance(Duration::from_millis(3));
        assert_eq!(sys.pending_messages(), 3);
        sys.kill_timer(frame, 1);
        sys.advance(Duration::from_millis(10));
        assert_eq!(sys.pending_messages(), 3);
    }

    #[test]
    fn test_popup_reply_script() {
        let mut sys = system();
        let frame = create(&mut sys, WindowClass::Frame, StyleFlags::empty(), Rect::ZERO, None);
        let menu = sys.create_popup_menu();
        sys.append_item(menu, 7, "Cut");
        sys.script_popup_reply(7);
        assert_eq!(sys.track_popup(frame, menu, Point::ZERO), 7);
        // Unscripted open reports a dismissal.
        assert_eq!(sys.track_popup(frame, menu, Point::ZERO), 0);
        assert_eq!(sys.popup_opens(), 2);
    }

    #[test]
    fn test_menu_destroy_recurses() {
        let mut sys = system();
        let bar = sys.create_menu_bar();
        let file = sys.create_popup_menu();
        sys.append_item(file, 1, "Open");
        sys.append_submenu(bar, file, "File");
        assert_eq!(sys.live_menu_count(), 2);
        sys.destroy_menu(bar);
        assert_eq!(sys.live_menu_count(), 0);
        assert_eq!(sys.stale_resource_deletes(), 0);
    }
}
