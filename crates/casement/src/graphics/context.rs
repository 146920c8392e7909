//! The graphics context: a transient, stateful view over a native surface.
//!
//! A [`Graphics`] exists in one of three modes: explicit (the application
//! asked to draw outside a paint event), paint-bound (wrapping the surface
//! of an in-flight paint message), or ownerdraw-bound (wrapping the surface
//! of a draw-item record). In every mode the context borrows the native
//! system and the resource cache mutably, so it cannot outlive the call
//! that created it and cannot be retained past an ownerdraw callback.
//!
//! Coordinates are in the owning widget's client space, origin top-left.

use casement_core::logging::targets;
use casement_core::{Color, Font, Point, Rect, Size};
use tracing::trace;

use super::resources::ResourceCache;
use crate::system::{DrawItemRecord, NativeSystem, PaintTicket, RawHandle, SurfaceId, TextMetrics};

/// An application-supplied paint callback, run with a scoped context during
/// ownerdraw dispatch or an explicit paint request.
pub type PaintHook = Box<dyn FnMut(&mut Graphics<'_>)>;

/// The point on an ellipse centered at `center` with radii `rx`/`ry` at
/// `angle` degrees. Angle 0 is at 3 o'clock and increases counter-clockwise,
/// matching [`Graphics::fill_arc`]'s start/arc parameters.
pub fn get_radial(center: Point, rx: i32, ry: i32, angle: f64) -> Point {
    let radians = angle.to_radians();
    // Screen y grows downward, so counter-clockwise subtracts.
    Point::new(
        center.x + (radians.cos() * rx as f64).round() as i32,
        center.y - (radians.sin() * ry as f64).round() as i32,
    )
}

#[derive(Clone, Debug)]
struct DrawState {
    color: Color,
    background: Color,
    font: Option<Font>,
    pen_width: i32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            background: Color::WHITE,
            font: None,
            pen_width: 1,
        }
    }
}

/// How the surface was obtained, which decides how it is given back.
enum SurfaceOrigin {
    /// From `acquire_surface`; released at drop.
    Explicit,
    /// From `begin_paint`; ended at drop.
    Paint,
    /// Borrowed from a draw-item record; the message owns it.
    OwnerDraw,
}

/// A stateful drawing surface with save/restore semantics.
pub struct Graphics<'a> {
    system: &'a mut dyn NativeSystem,
    resources: &'a mut ResourceCache,
    handle: RawHandle,
    surface: SurfaceId,
    origin: SurfaceOrigin,
    dirty: Option<Rect>,
    draw_item: Option<DrawItemRecord>,
    state: DrawState,
    saved: Vec<DrawState>,
    xor_active: bool,
}

impl<'a> Graphics<'a> {
    /// Open a surface on `handle` outside of any paint message.
    pub fn explicit(
        system: &'a mut dyn NativeSystem,
        resources: &'a mut ResourceCache,
        handle: RawHandle,
    ) -> Self {
        let surface = system.acquire_surface(handle);
        Self {
            system,
            resources,
            handle,
            surface,
            origin: SurfaceOrigin::Explicit,
            dirty: None,
            draw_item: None,
            state: DrawState::default(),
            saved: Vec::new(),
            xor_active: false,
        }
    }

    /// Wrap the surface of an in-flight paint message.
    pub fn paint(
        system: &'a mut dyn NativeSystem,
        resources: &'a mut ResourceCache,
        handle: RawHandle,
        ticket: PaintTicket,
    ) -> Self {
        Self {
            system,
            resources,
            handle,
            surface: ticket.surface,
            origin: SurfaceOrigin::Paint,
            dirty: Some(ticket.dirty),
            draw_item: None,
            state: DrawState::default(),
            saved: Vec::new(),
            xor_active: false,
        }
    }

    /// Wrap the surface of an ownerdraw record.
    pub fn owner_draw(
        system: &'a mut dyn NativeSystem,
        resources: &'a mut ResourceCache,
        record: DrawItemRecord,
    ) -> Self {
        Self {
            system,
            resources,
            handle: record.control,
            surface: record.surface,
            origin: SurfaceOrigin::OwnerDraw,
            dirty: Some(record.bounds),
            draw_item: Some(record),
            state: DrawState::default(),
            saved: Vec::new(),
            xor_active: false,
        }
    }

    // ----- Message-bound extras -----

    /// The area that needs repainting, for paint- and ownerdraw-bound
    /// contexts.
    pub fn dirty(&self) -> Option<Rect> {
        self.dirty
    }

    /// The raw ownerdraw record, for widgets needing item metrics.
    pub fn draw_item(&self) -> Option<&DrawItemRecord> {
        self.draw_item.as_ref()
    }

    // ----- State -----

    pub fn color(&self) -> Color {
        self.state.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    pub fn background_color(&self) -> Color {
        self.state.background
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.state.background = color;
    }

    /// The current font, or the cache's default when none was set.
    pub fn font(&self) -> &Font {
        self.state
            .font
            .as_ref()
            .unwrap_or_else(|| self.resources.default_font())
    }

    pub fn set_font(&mut self, font: Font) {
        self.state.font = Some(font);
    }

    pub fn pen_width(&self) -> i32 {
        self.state.pen_width
    }

    pub fn set_pen_width(&mut self, width: i32) {
        self.state.pen_width = width.max(1);
    }

    /// Snapshot the current pen, brush, and font selection.
    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Restore the state captured by the matching [`Graphics::save`].
    ///
    /// A restore without a matching save is a programming error, checked in
    /// debug builds only.
    pub fn restore(&mut self) {
        debug_assert!(!self.saved.is_empty(), "restore without matching save");
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Switch to inverting draw mode, drawing with `color`. Must be paired
    /// with [`Graphics::clear_xor_mode`] before the context is released.
    pub fn set_xor_mode(&mut self, color: Color) {
        self.state.color = color;
        self.xor_active = true;
        self.system.set_xor(self.surface, true);
    }

    /// Return to normal draw mode.
    pub fn clear_xor_mode(&mut self) {
        self.xor_active = false;
        self.system.set_xor(self.surface, false);
    }

    // ----- Selection plumbing -----

    fn select_stroke(&mut self) {
        let pen = self
            .resources
            .pen_for(&mut *self.system, self.state.color, self.state.pen_width);
        self.system.select_pen(self.surface, pen);
    }

    fn select_fill(&mut self) {
        let brush = self.resources.brush_for(&mut *self.system, self.state.color);
        self.system.select_brush(self.surface, brush);
    }

    /// Outline-only shapes select a transparent fill for the call.
    fn select_hollow_fill(&mut self) {
        let hollow = self.system.stock_hollow_brush();
        self.system.select_brush(self.surface, hollow);
    }

    fn select_text(&mut self) {
        let handle = self
            .resources
            .resolve_font(&mut *self.system, self.state.font.as_ref());
        self.system.select_font(self.surface, handle);
        self.system.set_text_color(self.surface, self.state.color);
        self.system.set_back_color(self.surface, self.state.background);
    }

    // ----- Primitives -----

    pub fn draw_line(&mut self, from: Point, to: Point) {
        self.select_stroke();
        self.system.line(self.surface, from, to);
    }

    pub fn draw_rect(&mut self, rect: Rect) {
        self.select_stroke();
        self.select_hollow_fill();
        self.system.rectangle(self.surface, rect);
    }

    pub fn fill_rect(&mut self, rect: Rect) {
        let brush = self.resources.brush_for(&mut *self.system, self.state.color);
        self.system.fill_rect(self.surface, rect, brush);
    }

    pub fn draw_round_rect(&mut self, rect: Rect, corner: Size) {
        self.select_stroke();
        self.select_hollow_fill();
        self.system.round_rect(self.surface, rect, corner);
    }

    pub fn fill_round_rect(&mut self, rect: Rect, corner: Size) {
        self.select_stroke();
        self.select_fill();
        self.system.round_rect(self.surface, rect, corner);
    }

    pub fn draw_oval(&mut self, rect: Rect) {
        self.select_stroke();
        self.select_hollow_fill();
        self.system.ellipse(self.surface, rect);
    }

    pub fn fill_oval(&mut self, rect: Rect) {
        self.select_stroke();
        self.select_fill();
        self.system.ellipse(self.surface, rect);
    }

    /// Fill the elliptical wedge of `rect` from `start_angle` spanning
    /// `arc_angle` degrees, counter-clockwise, 0 at 3 o'clock.
    pub fn fill_arc(&mut self, rect: Rect, start_angle: f64, arc_angle: f64) {
        let center = rect.center();
        let rx = rect.width / 2;
        let ry = rect.height / 2;
        let from = get_radial(center, rx, ry, start_angle);
        let to = get_radial(center, rx, ry, start_angle + arc_angle);
        self.select_stroke();
        self.select_fill();
        self.system.pie(self.surface, rect, from, to);
    }

    /// Draw `text` with its top-left corner at `at`, in the current font
    /// and colors.
    pub fn draw_string(&mut self, text: &str, at: Point) {
        self.select_text();
        self.system.text_out(self.surface, at, text);
    }

    // ----- Measurement -----

    /// Measure `text` under the current font, via the resource cache.
    pub fn get_text_size(&mut self, text: &str) -> Size {
        self.resources
            .measure_text(&mut *self.system, self.state.font.as_ref(), text)
    }

    /// Measure `text` under a specific font, leaving the current font alone.
    pub fn get_text_size_with(&mut self, font: &Font, text: &str) -> Size {
        self.resources.measure_text(&mut *self.system, Some(font), text)
    }

    /// The full native metric record of the current font.
    pub fn text_metrics(&mut self) -> TextMetrics {
        self.resources
            .text_metrics(&mut *self.system, self.state.font.as_ref())
    }
}

impl Drop for Graphics<'_> {
    fn drop(&mut self) {
        debug_assert!(self.saved.is_empty(), "unbalanced save on graphics context");
        debug_assert!(!self.xor_active, "XOR mode left active on graphics context");
        match self.origin {
            SurfaceOrigin::Explicit => {
                trace!(target: targets::RESOURCE, handle = self.handle.0, "surface released");
                self.system.release_surface(self.handle, self.surface);
            }
            SurfaceOrigin::Paint => self.system.end_paint(self.handle, self.surface),
            SurfaceOrigin::OwnerDraw => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::headless::HeadlessSystem;
    use crate::system::{CreateParams, StyleFlags, WindowClass};
    use casement_core::FontStyle;

    fn setup() -> (HeadlessSystem, ResourceCache, RawHandle) {
        let mut sys = HeadlessSystem::new();
        sys.register_classes(WindowClass::ALL).unwrap();
        let handle = sys
            .create_handle(&CreateParams {
                class: WindowClass::Frame,
                style: StyleFlags::TITLED | StyleFlags::VISIBLE,
                text: "paint",
                bounds: Rect::new(0, 0, 200, 150),
                parent: None,
                control_id: 0,
            })
            .unwrap();
        (sys, ResourceCache::new(4, Font::default()), handle)
    }

    #[test]
    fn test_save_restore_round_trip() {
        let (mut sys, mut cache, handle) = setup();
        let mut g = Graphics::explicit(&mut sys, &mut cache, handle);
        g.set_color(Color::RED);
        g.set_pen_width(3);
        g.save();
        g.set_color(Color::BLUE);
        g.set_font(Font::new("Mono", 12).with_style(FontStyle::BOLD));
        g.set_pen_width(1);
        g.restore();
        assert_eq!(g.color(), Color::RED);
        assert_eq!(g.pen_width(), 3);
        assert_eq!(g.font(), &Font::default());
    }

    #[test]
    fn test_xor_pairing() {
        let (mut sys, mut cache, handle) = setup();
        {
            let mut g = Graphics::explicit(&mut sys, &mut cache, handle);
            g.set_xor_mode(Color::WHITE);
            g.draw_rect(Rect::new(10, 10, 20, 20));
            g.clear_xor_mode();
        }
        assert_eq!(sys.live_surface_count(), 0);
    }

    #[test]
    fn test_explicit_surface_released_on_drop() {
        let (mut sys, mut cache, handle) = setup();
        {
            let mut g = Graphics::explicit(&mut sys, &mut cache, handle);
            g.draw_line(Point::ZERO, Point::new(10, 10));
        }
        assert_eq!(sys.live_surface_count(), 0);
        assert_eq!(sys.draw_ops().len(), 1);
    }

    #[test]
    fn test_radial_convention() {
        let center = Point::new(50, 50);
        assert_eq!(get_radial(center, 20, 10, 0.0), Point::new(70, 50));
        assert_eq!(get_radial(center, 20, 10, 90.0), Point::new(50, 40));
        assert_eq!(get_radial(center, 20, 10, 180.0), Point::new(30, 50));
        assert_eq!(get_radial(center, 20, 10, 270.0), Point::new(50, 60));
    }

    #[test]
    fn test_text_measure_uses_cache() {
        let (mut sys, mut cache, handle) = setup();
        let mut g = Graphics::explicit(&mut sys, &mut cache, handle);
        let font = Font::new("Sans", 10);
        let a = g.get_text_size_with(&font, "Hello");
        let b = g.get_text_size_with(&font, "Hello");
        assert_eq!(a, b);
        drop(g);
        assert_eq!(cache.font_count(), 1);
    }
}
