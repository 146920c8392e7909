//! The native windowing system interface.
//!
//! Everything the adapter layer asks of the host platform goes through
//! [`NativeSystem`]: handle creation and destruction, state pushes, drawing,
//! menus, timers, and the message queue. The trait is written against the
//! handle-and-message model shared by desktop window systems; a conforming
//! implementation supplies opaque integer handles and delivers [`Message`]
//! records in arrival order.
//!
//! [`HeadlessSystem`](headless::HeadlessSystem) is the in-process reference
//! implementation used by the test suite.

pub mod headless;

use std::any::Any;
use std::time::Duration;

use bitflags::bitflags;
use thiserror::Error;

use casement_core::{
    Accelerator, Color, Font, Key, Modifiers, MouseButton, Point, Rect, Size, SystemColor,
};

// ===== Handles =====

/// An opaque native window/control handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawHandle(pub u64);

/// An opaque native menu handle. Menus live in their own handle space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MenuHandle(pub u64);

/// An open drawing surface (device context) on some handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// A native fill brush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BrushHandle(pub u64);

/// A native stroke pen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PenHandle(pub u64);

/// A native font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u64);

/// A native call that the system rejected.
#[derive(Error, Debug, Clone)]
#[error("{call}: {detail}")]
pub struct SystemCallError {
    pub call: &'static str,
    pub detail: String,
}

impl SystemCallError {
    pub fn new(call: &'static str, detail: impl Into<String>) -> Self {
        Self {
            call,
            detail: detail.into(),
        }
    }
}

// ===== Handle creation =====

/// The native control class a handle is created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowClass {
    /// Top-level framed window.
    Frame,
    /// Top-level dialog window.
    Dialog,
    /// Generic child container.
    Panel,
    /// Static text.
    Label,
    /// Push button, checkbox, or radio button (style selects which).
    Button,
    ComboBox,
    ListBox,
    /// Single- or multi-line text editor.
    Edit,
    GroupBox,
    ToolBar,
    StatusBar,
    TabControl,
    /// Multi-column row view.
    Table,
    Tree,
    ScrollBar,
    /// Tooltip controller window.
    ToolTip,
}

impl WindowClass {
    /// Every class the layer materializes, registered once per subsystem.
    pub const ALL: &'static [WindowClass] = &[
        WindowClass::Frame,
        WindowClass::Dialog,
        WindowClass::Panel,
        WindowClass::Label,
        WindowClass::Button,
        WindowClass::ComboBox,
        WindowClass::ListBox,
        WindowClass::Edit,
        WindowClass::GroupBox,
        WindowClass::ToolBar,
        WindowClass::StatusBar,
        WindowClass::TabControl,
        WindowClass::Table,
        WindowClass::Tree,
        WindowClass::ScrollBar,
        WindowClass::ToolTip,
    ];
}

bitflags! {
    /// Style flags passed at handle creation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u32 {
        /// Parented child control rather than a top-level window.
        const CHILD = 1 << 0;
        const VISIBLE = 1 << 1;
        const BORDER = 1 << 2;
        /// Top-level: draw a title bar.
        const TITLED = 1 << 3;
        /// Top-level: user-resizable frame.
        const RESIZABLE = 1 << 4;
        /// Top-level: fixed dialog frame.
        const DIALOG_FRAME = 1 << 5;
        /// Button class: push button.
        const PUSH = 1 << 6;
        /// Button class: checkbox.
        const CHECKBOX = 1 << 7;
        /// Button class: radio button.
        const RADIO = 1 << 8;
        /// Painting is delegated to the application.
        const OWNERDRAW = 1 << 9;
        /// Edit class: multi-line.
        const MULTILINE = 1 << 10;
        /// Edit class: read-only.
        const READ_ONLY = 1 << 11;
        /// List class: multiple selection.
        const MULTI_SELECT = 1 << 12;
        /// Combo class: drop-down presentation.
        const DROP_DOWN = 1 << 13;
        const VERTICAL = 1 << 14;
        const HORIZONTAL = 1 << 15;
        /// First control of an input group.
        const GROUP = 1 << 16;
    }
}

/// Parameters for one native handle creation call.
#[derive(Debug)]
pub struct CreateParams<'a> {
    pub class: WindowClass,
    pub style: StyleFlags,
    pub text: &'a str,
    /// Parent-client-relative for children, screen coordinates for
    /// top-levels.
    pub bounds: Rect,
    pub parent: Option<RawHandle>,
    /// Identifier reported back in command messages from this control.
    /// Zero for top-levels.
    pub control_id: u16,
}

// ===== Messages =====

/// The kinds of native message the layer routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Repaint request. Surface comes from `begin_paint` while handling.
    Paint,
    /// Background erase; `param_a` is the surface.
    EraseBackground,
    /// A control delegated painting; `param_a` is the control handle,
    /// `param_b` the draw-item record key.
    OwnerDraw,
    /// Command from a control or menu; `param_a` is the command id,
    /// `param_b` the child handle (zero for menus and accelerators).
    Command,
    /// Auxiliary control notification; same parameter layout as `Command`.
    Notify,
    /// Scroll request from a scroll bar; `param_a` packs the scroll code,
    /// `param_b` is the scroll bar handle.
    Scroll,
    /// Mouse events; `param_a` packs the client position, `param_b` packs
    /// button, modifiers, and click count.
    MouseDown,
    MouseUp,
    MouseMove,
    MouseDoubleClick,
    /// Key events; `param_a` is the raw key code, `param_b` the modifiers.
    KeyDown,
    Character,
    /// `param_a` packs the new client size.
    Resize,
    /// `param_a` packs the new origin.
    Move,
    CloseRequest,
    /// The native object is gone; the handle is invalid after this message.
    Destroy,
    /// `param_a` is the native timer id.
    TimerFired,
    FocusGained,
    FocusLost,
}

/// One native message: a target handle, a kind, and two generic parameters
/// whose meaning depends on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    pub target: RawHandle,
    pub kind: MessageKind,
    pub param_a: u64,
    pub param_b: u64,
}

impl Message {
    pub const fn new(target: RawHandle, kind: MessageKind, param_a: u64, param_b: u64) -> Self {
        Self {
            target,
            kind,
            param_a,
            param_b,
        }
    }

    pub const fn command(target: RawHandle, command: u32, child: Option<RawHandle>) -> Self {
        let child_raw = match child {
            Some(h) => h.0,
            None => 0,
        };
        Self::new(target, MessageKind::Command, command as u64, child_raw)
    }

    pub const fn notify(target: RawHandle, code: u32, child: RawHandle) -> Self {
        Self::new(target, MessageKind::Notify, code as u64, child.0)
    }

    pub const fn scroll(target: RawHandle, code: ScrollCode, bar: RawHandle) -> Self {
        Self::new(target, MessageKind::Scroll, code.to_raw(), bar.0)
    }

    pub fn mouse(
        target: RawHandle,
        kind: MessageKind,
        button: MouseButton,
        at: Point,
        modifiers: Modifiers,
        clicks: u8,
    ) -> Self {
        let b = button.to_raw() as u64
            | ((modifiers.bits() as u64) << 8)
            | ((clicks as u64) << 16);
        Self::new(target, kind, param::pack_point(at), b)
    }

    pub fn key_down(target: RawHandle, key: Key, modifiers: Modifiers) -> Self {
        Self::new(
            target,
            MessageKind::KeyDown,
            key.to_raw() as u64,
            modifiers.bits() as u64,
        )
    }

    pub fn character(target: RawHandle, ch: char, modifiers: Modifiers) -> Self {
        Self::new(
            target,
            MessageKind::Character,
            Key::Char(ch).to_raw() as u64,
            modifiers.bits() as u64,
        )
    }

    pub fn resize(target: RawHandle, size: Size) -> Self {
        Self::new(target, MessageKind::Resize, param::pack_size(size), 0)
    }

    pub fn moved(target: RawHandle, origin: Point) -> Self {
        Self::new(target, MessageKind::Move, param::pack_point(origin), 0)
    }

    pub const fn close_request(target: RawHandle) -> Self {
        Self::new(target, MessageKind::CloseRequest, 0, 0)
    }

    pub const fn destroy(target: RawHandle) -> Self {
        Self::new(target, MessageKind::Destroy, 0, 0)
    }

    pub const fn timer(target: RawHandle, native_id: u64) -> Self {
        Self::new(target, MessageKind::TimerFired, native_id, 0)
    }

    // ----- Parameter access -----

    /// The command or notify code.
    pub const fn command_id(&self) -> u32 {
        self.param_a as u32
    }

    /// The child handle of a command/notify message, if any.
    pub const fn child_handle(&self) -> Option<RawHandle> {
        if self.param_b == 0 {
            None
        } else {
            Some(RawHandle(self.param_b))
        }
    }

    /// The position carried by mouse and move messages.
    pub const fn point(&self) -> Point {
        param::unpack_point(self.param_a)
    }

    /// The size carried by resize messages.
    pub const fn size(&self) -> Size {
        param::unpack_size(self.param_a)
    }

    /// The key and modifiers of a key message.
    pub fn key(&self) -> Option<(Key, Modifiers)> {
        let key = Key::from_raw(self.param_a as u32)?;
        let modifiers = Modifiers::from_bits_truncate(self.param_b as u8);
        Some((key, modifiers))
    }

    /// Button, modifiers, and click count of a mouse message.
    pub fn mouse_params(&self) -> (MouseButton, Modifiers, u8) {
        let button = MouseButton::from_raw(self.param_b as u8);
        let modifiers = Modifiers::from_bits_truncate((self.param_b >> 8) as u8);
        let clicks = (self.param_b >> 16) as u8;
        (button, modifiers, clicks)
    }

    /// The native timer id of a timer message.
    pub const fn timer_id(&self) -> u64 {
        self.param_a
    }

    /// The scroll code of a scroll message.
    pub fn scroll_code(&self) -> Option<ScrollCode> {
        ScrollCode::from_raw(self.param_a)
    }
}

/// Parameter packing for the two generic message parameters.
pub mod param {
    use casement_core::{Point, Size};

    pub const fn pack_point(point: Point) -> u64 {
        (point.x as u32 as u64) | ((point.y as u32 as u64) << 32)
    }

    pub const fn unpack_point(raw: u64) -> Point {
        Point::new(raw as u32 as i32, (raw >> 32) as u32 as i32)
    }

    pub const fn pack_size(size: Size) -> u64 {
        (size.width as u32 as u64) | ((size.height as u32 as u64) << 32)
    }

    pub const fn unpack_size(raw: u64) -> Size {
        Size::new(raw as u32 as i32, (raw >> 32) as u32 as i32)
    }
}

/// Command codes reported by native controls.
pub mod codes {
    /// Button pressed / control default action.
    pub const ACTIVATED: u32 = 1;
    /// Selection changed in a list-shaped control.
    pub const SELECTION_CHANGED: u32 = 2;
    /// Text content changed in an edit control.
    pub const TEXT_CHANGED: u32 = 3;
    /// Notify: a row was double-clicked.
    pub const ROW_ACTIVATED: u32 = 4;
}

/// What a scroll bar asks its owner to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollCode {
    LineBack,
    LineForward,
    PageBack,
    PageForward,
    /// Thumb dragged to the given value.
    ThumbTrack(i32),
}

impl ScrollCode {
    pub const fn to_raw(self) -> u64 {
        match self {
            Self::LineBack => 0,
            Self::LineForward => 1,
            Self::PageBack => 2,
            Self::PageForward => 3,
            Self::ThumbTrack(pos) => 4 | ((pos as u32 as u64) << 32),
        }
    }

    pub const fn from_raw(raw: u64) -> Option<Self> {
        match raw & 0xffff_ffff {
            0 => Some(Self::LineBack),
            1 => Some(Self::LineForward),
            2 => Some(Self::PageBack),
            3 => Some(Self::PageForward),
            4 => Some(Self::ThumbTrack((raw >> 32) as u32 as i32)),
            _ => None,
        }
    }
}

// ===== Painting =====

/// Returned by `begin_paint`: the surface to draw on and the area that
/// needs repainting.
#[derive(Clone, Copy, Debug)]
pub struct PaintTicket {
    pub surface: SurfaceId,
    pub dirty: Rect,
}

bitflags! {
    /// Item state flags carried by a draw-item record.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DrawItemState: u32 {
        const SELECTED = 1 << 0;
        const FOCUSED = 1 << 1;
        const DISABLED = 1 << 2;
    }
}

/// The record behind an ownerdraw request: which control, which item, where
/// to draw it, and the surface to draw on. Valid only while the ownerdraw
/// message is being handled.
#[derive(Clone, Copy, Debug)]
pub struct DrawItemRecord {
    pub control: RawHandle,
    /// Item index within the control, or -1 for whole-control draws.
    pub item: i32,
    /// Item bounds in the control's client space.
    pub bounds: Rect,
    pub state: DrawItemState,
    pub surface: SurfaceId,
}

/// Font measurements reported by the native system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextMetrics {
    /// Total cell height (ascent plus descent).
    pub height: i32,
    pub ascent: i32,
    pub max_char_width: i32,
    pub average_char_width: i32,
    /// Extra space the font requests between lines.
    pub external_leading: i32,
}

// ===== Prompts =====

/// Button sets for a native message box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageChoices {
    Ok,
    OkCancel,
    YesNo,
    YesNoCancel,
}

/// The button the user chose in a native message box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageChoice {
    Ok,
    Cancel,
    Yes,
    No,
}

// ===== The system trait =====

/// The complete outbound interface to the host windowing system.
///
/// All calls are synchronous and must be made from the pump thread. Handle
/// arguments that no longer refer to live objects are ignored by state
/// setters and answered with defaults by queries; only creation calls fail
/// loudly.
pub trait NativeSystem {
    fn name(&self) -> &'static str;

    // ----- Window classes -----

    /// Register the control classes the layer materializes. Called once per
    /// subsystem before the first handle creation.
    fn register_classes(&mut self, classes: &[WindowClass]) -> Result<(), SystemCallError>;

    // ----- Handles -----

    fn create_handle(&mut self, params: &CreateParams<'_>) -> Result<RawHandle, SystemCallError>;

    /// Destroy a handle and every native child under it. Each destroyed
    /// handle produces a `Destroy` message.
    fn destroy_handle(&mut self, handle: RawHandle);

    fn is_live(&self, handle: RawHandle) -> bool;

    fn set_text(&mut self, handle: RawHandle, text: &str);
    fn text(&self, handle: RawHandle) -> String;
    fn set_enabled(&mut self, handle: RawHandle, enabled: bool);
    fn is_enabled(&self, handle: RawHandle) -> bool;
    fn set_visible(&mut self, handle: RawHandle, visible: bool);
    fn is_visible(&self, handle: RawHandle) -> bool;
    fn set_focus(&mut self, handle: RawHandle);
    fn focused(&self) -> Option<RawHandle>;

    /// Move and size a handle. Child bounds are parent-client-relative.
    fn set_bounds(&mut self, handle: RawHandle, bounds: Rect);
    fn bounds(&self, handle: RawHandle) -> Rect;
    fn client_size(&self, handle: RawHandle) -> Size;
    /// Where the client area starts within the outer bounds.
    fn client_offset(&self, handle: RawHandle) -> Point;

    /// Mark an area (or everything) as needing repaint.
    fn invalidate(&mut self, handle: RawHandle, area: Option<Rect>);
    fn to_front(&mut self, handle: RawHandle);
    fn set_control_font(&mut self, handle: RawHandle, font: FontHandle);

    /// Check state of checkable buttons.
    fn set_check_state(&mut self, handle: RawHandle, checked: bool);
    fn check_state(&self, handle: RawHandle) -> bool;
    fn set_read_only(&mut self, handle: RawHandle, read_only: bool);

    // ----- Item-bearing controls -----

    fn add_item_text(&mut self, handle: RawHandle, text: &str);
    /// Remove all items, rows, and nodes from an item-bearing control.
    fn clear_items(&mut self, handle: RawHandle);
    fn item_count(&self, handle: RawHandle) -> usize;
    fn set_selected_index(&mut self, handle: RawHandle, index: Option<usize>);
    fn selected_index(&self, handle: RawHandle) -> Option<usize>;
    fn set_item_selected(&mut self, handle: RawHandle, index: usize, selected: bool);
    fn is_item_selected(&self, handle: RawHandle, index: usize) -> bool;
    /// Height of one item row, from the control's current font.
    fn item_height(&self, handle: RawHandle) -> i32;

    fn set_columns(&mut self, handle: RawHandle, columns: &[(String, i32)]);
    fn column_width(&self, handle: RawHandle, index: usize) -> i32;
    fn add_row(&mut self, handle: RawHandle, cells: &[String]);
    fn add_tree_node(&mut self, handle: RawHandle, parent: Option<u64>, text: &str) -> u64;

    fn set_scroll_info(&mut self, handle: RawHandle, minimum: i32, maximum: i32, page: i32, value: i32);
    fn scroll_value(&self, handle: RawHandle) -> i32;

    // ----- Messages -----

    fn post(&mut self, message: Message);
    /// The next message in arrival order, or `None` when the queue is idle.
    fn next_message(&mut self) -> Option<Message>;
    /// Platform default handling for a message the adapter passed on.
    fn default_reply(&mut self, message: &Message) -> i64;
    fn post_quit(&mut self);
    /// Consume a pending quit request.
    fn take_quit(&mut self) -> bool;

    /// Translate a key message into the matching accelerator command for
    /// `window`, if its table has one.
    fn translate_accelerator(&mut self, window: RawHandle, message: &Message) -> Option<Message>;
    fn set_accelerators(&mut self, window: RawHandle, table: &[Accelerator]);
    fn clear_accelerators(&mut self, window: RawHandle);

    // ----- Tooltips -----

    fn create_tooltip(&mut self, window: RawHandle) -> Result<RawHandle, SystemCallError>;
    fn add_tool(&mut self, tooltip: RawHandle, target: RawHandle, text: &str);

    // ----- Painting -----

    fn begin_paint(&mut self, handle: RawHandle) -> PaintTicket;
    fn end_paint(&mut self, handle: RawHandle, surface: SurfaceId);
    /// Open a surface outside of a paint message.
    fn acquire_surface(&mut self, handle: RawHandle) -> SurfaceId;
    fn release_surface(&mut self, handle: RawHandle, surface: SurfaceId);
    /// Resolve a draw-item record key from an ownerdraw message.
    fn draw_item(&self, record: u64) -> Option<DrawItemRecord>;

    fn select_pen(&mut self, surface: SurfaceId, pen: PenHandle);
    fn select_brush(&mut self, surface: SurfaceId, brush: BrushHandle);
    fn select_font(&mut self, surface: SurfaceId, font: FontHandle);
    fn set_text_color(&mut self, surface: SurfaceId, color: Color);
    fn set_back_color(&mut self, surface: SurfaceId, color: Color);
    /// Toggle inverting (XOR) draw mode on a surface.
    fn set_xor(&mut self, surface: SurfaceId, enabled: bool);

    fn line(&mut self, surface: SurfaceId, from: Point, to: Point);
    /// Outline with the current pen and fill with the current brush.
    fn rectangle(&mut self, surface: SurfaceId, rect: Rect);
    fn round_rect(&mut self, surface: SurfaceId, rect: Rect, corner: Size);
    fn ellipse(&mut self, surface: SurfaceId, rect: Rect);
    /// Elliptical wedge from radial point `from` counter-clockwise to `to`.
    fn pie(&mut self, surface: SurfaceId, rect: Rect, from: Point, to: Point);
    fn fill_rect(&mut self, surface: SurfaceId, rect: Rect, brush: BrushHandle);
    /// Draw text with the surface's current font and colors.
    fn text_out(&mut self, surface: SurfaceId, at: Point, text: &str);

    // ----- Drawing resources -----

    fn create_brush(&mut self, color: Color) -> BrushHandle;
    fn create_pen(&mut self, color: Color, width: i32) -> PenHandle;
    fn create_font(&mut self, font: &Font) -> FontHandle;
    fn delete_brush(&mut self, brush: BrushHandle);
    fn delete_pen(&mut self, pen: PenHandle);
    fn delete_font(&mut self, font: FontHandle);
    /// The system's default UI font. Never deleted.
    fn stock_font(&self) -> FontHandle;
    /// A brush that fills nothing. Never deleted.
    fn stock_hollow_brush(&self) -> BrushHandle;
    fn font_metrics(&self, font: FontHandle) -> TextMetrics;
    fn measure_text(&self, font: FontHandle, text: &str) -> Size;

    // ----- Menus -----

    fn create_menu_bar(&mut self) -> MenuHandle;
    fn create_popup_menu(&mut self) -> MenuHandle;
    fn append_item(&mut self, menu: MenuHandle, id: u32, text: &str);
    fn append_separator(&mut self, menu: MenuHandle);
    fn append_submenu(&mut self, menu: MenuHandle, submenu: MenuHandle, text: &str);
    fn set_item_checked(&mut self, menu: MenuHandle, id: u32, checked: bool);
    fn is_item_checked(&self, menu: MenuHandle, id: u32) -> bool;
    fn set_item_enabled(&mut self, menu: MenuHandle, id: u32, enabled: bool);
    fn remove_all_items(&mut self, menu: MenuHandle);
    /// Destroy a menu and its submenus.
    fn destroy_menu(&mut self, menu: MenuHandle);
    fn attach_menu_bar(&mut self, window: RawHandle, menu: MenuHandle);
    fn redraw_menu_bar(&mut self, window: RawHandle);
    /// Run a popup menu at `at` (window-client coordinates), blocking until
    /// the user chooses an item or dismisses. Returns the chosen item id,
    /// or 0 on dismissal.
    fn track_popup(&mut self, window: RawHandle, menu: MenuHandle, at: Point) -> u32;

    // ----- Timers -----

    /// Start (or restart) a native timer delivering `TimerFired` messages
    /// to `window` every `interval`.
    fn set_timer(&mut self, window: RawHandle, id: u64, interval: Duration);
    fn kill_timer(&mut self, window: RawHandle, id: u64);

    // ----- System queries -----

    fn screen_size(&self) -> Size;
    fn system_color(&self, color: SystemColor) -> Color;
    fn scroll_bar_thickness(&self, vertical: bool) -> i32;
    fn is_key_down(&self, key: Key) -> bool;
    /// Show a modal message box and return the user's choice.
    fn message_box(
        &mut self,
        owner: Option<RawHandle>,
        title: &str,
        text: &str,
        choices: MessageChoices,
    ) -> MessageChoice;

    // ----- Escape hatch -----

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_packing_negative() {
        let p = Point::new(-5, 70000);
        assert_eq!(param::unpack_point(param::pack_point(p)), p);
    }

    #[test]
    fn test_size_packing() {
        let s = Size::new(800, 600);
        assert_eq!(param::unpack_size(param::pack_size(s)), s);
    }

    #[test]
    fn test_mouse_message_params() {
        let msg = Message::mouse(
            RawHandle(3),
            MessageKind::MouseDown,
            MouseButton::Right,
            Point::new(12, -2),
            Modifiers::SHIFT | Modifiers::CTRL,
            2,
        );
        assert_eq!(msg.point(), Point::new(12, -2));
        let (button, modifiers, clicks) = msg.mouse_params();
        assert_eq!(button, MouseButton::Right);
        assert_eq!(modifiers, Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(clicks, 2);
    }

    #[test]
    fn test_key_message_params() {
        let msg = Message::key_down(RawHandle(1), Key::F(3), Modifiers::ALT);
        assert_eq!(msg.key(), Some((Key::F(3), Modifiers::ALT)));
    }

    #[test]
    fn test_scroll_code_round_trip() {
        for code in [
            ScrollCode::LineBack,
            ScrollCode::LineForward,
            ScrollCode::PageBack,
            ScrollCode::PageForward,
            ScrollCode::ThumbTrack(-40),
        ] {
            assert_eq!(ScrollCode::from_raw(code.to_raw()), Some(code));
        }
    }

    #[test]
    fn test_command_message() {
        let msg = Message::command(RawHandle(9), codes::ACTIVATED, Some(RawHandle(11)));
        assert_eq!(msg.command_id(), codes::ACTIVATED);
        assert_eq!(msg.child_handle(), Some(RawHandle(11)));
        let menu = Message::command(RawHandle(9), 40, None);
        assert_eq!(menu.child_handle(), None);
    }
}
