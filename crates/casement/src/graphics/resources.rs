//! The native drawing-resource cache.
//!
//! Creating native brushes, pens, and fonts is the expensive half of
//! drawing, so the cache interns them: the first request for a logical
//! color or font value creates the handle, every later request returns the
//! same one. Handles are released exactly once, when the application
//! releases the owning logical value or at subsystem teardown, and never
//! dangle afterwards because the cache entry goes with them.

use std::collections::HashMap;

use casement_core::logging::targets;
use casement_core::{Color, Font, Size};
use tracing::trace;

use crate::system::{BrushHandle, FontHandle, NativeSystem, PenHandle, TextMetrics};

/// Interned native drawing resources, keyed by logical value.
pub struct ResourceCache {
    /// Widest pen stroke kept; wider requests clamp to this.
    max_pen_width: i32,
    /// Applied when a measurement or selection names no font.
    default_font: Font,
    brushes: HashMap<Color, BrushHandle>,
    pens: HashMap<(Color, i32), PenHandle>,
    fonts: HashMap<Font, FontHandle>,
}

impl ResourceCache {
    pub fn new(max_pen_width: i32, default_font: Font) -> Self {
        Self {
            max_pen_width: max_pen_width.max(1),
            default_font,
            brushes: HashMap::new(),
            pens: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    pub fn default_font(&self) -> &Font {
        &self.default_font
    }

    pub fn max_pen_width(&self) -> i32 {
        self.max_pen_width
    }

    /// The native fill brush for `color`, created on first use.
    pub fn brush_for(&mut self, system: &mut dyn NativeSystem, color: Color) -> BrushHandle {
        if let Some(&brush) = self.brushes.get(&color) {
            return brush;
        }
        let brush = system.create_brush(color);
        trace!(target: targets::RESOURCE, ?color, handle = brush.0, "brush created");
        self.brushes.insert(color, brush);
        brush
    }

    /// The native stroke pen for `color` at `width` pixels.
    ///
    /// Widths clamp into `1..=max_pen_width`, so only a fixed small set of
    /// pens ever exists per color.
    pub fn pen_for(&mut self, system: &mut dyn NativeSystem, color: Color, width: i32) -> PenHandle {
        let width = width.clamp(1, self.max_pen_width);
        if let Some(&pen) = self.pens.get(&(color, width)) {
            return pen;
        }
        let pen = system.create_pen(color, width);
        trace!(target: targets::RESOURCE, ?color, width, handle = pen.0, "pen created");
        self.pens.insert((color, width), pen);
        pen
    }

    /// The native font for `font`, created on first use.
    pub fn font_for(&mut self, system: &mut dyn NativeSystem, font: &Font) -> FontHandle {
        if let Some(&handle) = self.fonts.get(font) {
            return handle;
        }
        let handle = system.create_font(font);
        trace!(
            target: targets::RESOURCE,
            family = font.family(),
            size = font.point_size(),
            handle = handle.0,
            "font created"
        );
        self.fonts.insert(font.clone(), handle);
        handle
    }

    /// The native font for `font`, or for the default font when `None`.
    pub fn resolve_font(
        &mut self,
        system: &mut dyn NativeSystem,
        font: Option<&Font>,
    ) -> FontHandle {
        let font = font.cloned().unwrap_or_else(|| self.default_font.clone());
        self.font_for(system, &font)
    }

    /// Native metrics of `font` (default font when `None`).
    pub fn text_metrics(
        &mut self,
        system: &mut dyn NativeSystem,
        font: Option<&Font>,
    ) -> TextMetrics {
        let handle = self.resolve_font(system, font);
        system.font_metrics(handle)
    }

    /// Measure `text` under `font` without drawing it.
    pub fn measure_text(
        &mut self,
        system: &mut dyn NativeSystem,
        font: Option<&Font>,
        text: &str,
    ) -> Size {
        let handle = self.resolve_font(system, font);
        system.measure_text(handle, text)
    }

    /// Release every handle derived from `color`.
    ///
    /// Call when the application drops the logical color. Releasing a color
    /// that was never cached is a no-op.
    pub fn release_color(&mut self, system: &mut dyn NativeSystem, color: Color) {
        if let Some(brush) = self.brushes.remove(&color) {
            system.delete_brush(brush);
        }
        let widths: Vec<i32> = self
            .pens
            .keys()
            .filter(|(c, _)| *c == color)
            .map(|&(_, w)| w)
            .collect();
        for width in widths {
            if let Some(pen) = self.pens.remove(&(color, width)) {
                system.delete_pen(pen);
            }
        }
        trace!(target: targets::RESOURCE, ?color, "color resources released");
    }

    /// Release the handle derived from `font`, if cached.
    pub fn release_font(&mut self, system: &mut dyn NativeSystem, font: &Font) {
        if let Some(handle) = self.fonts.remove(font) {
            system.delete_font(handle);
            trace!(target: targets::RESOURCE, family = font.family(), "font released");
        }
    }

    /// Release every remaining handle. Called once at subsystem teardown.
    pub fn clear(&mut self, system: &mut dyn NativeSystem) {
        for (_, brush) in self.brushes.drain() {
            system.delete_brush(brush);
        }
        for (_, pen) in self.pens.drain() {
            system.delete_pen(pen);
        }
        for (_, font) in self.fonts.drain() {
            system.delete_font(font);
        }
        trace!(target: targets::RESOURCE, "cache cleared");
    }

    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    pub fn pen_count(&self) -> usize {
        self.pens.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::headless::HeadlessSystem;

    fn setup() -> (HeadlessSystem, ResourceCache) {
        (
            HeadlessSystem::new(),
            ResourceCache::new(4, Font::new("Sans", 10)),
        )
    }

    #[test]
    fn test_brush_identity_stable() {
        let (mut sys, mut cache) = setup();
        let a = cache.brush_for(&mut sys, Color::RED);
        let b = cache.brush_for(&mut sys, Color::RED);
        assert_eq!(a, b);
        assert_eq!(cache.brush_count(), 1);
        assert_ne!(cache.brush_for(&mut sys, Color::BLUE), a);
    }

    #[test]
    fn test_pen_width_clamps_to_widest() {
        let (mut sys, mut cache) = setup();
        let widest = cache.pen_for(&mut sys, Color::BLACK, 4);
        let clamped = cache.pen_for(&mut sys, Color::BLACK, 99);
        assert_eq!(widest, clamped);
        assert_eq!(cache.pen_count(), 1);
        let thin = cache.pen_for(&mut sys, Color::BLACK, 0);
        assert_eq!(thin, cache.pen_for(&mut sys, Color::BLACK, 1));
    }

    #[test]
    fn test_release_color_drops_brush_and_pens() {
        let (mut sys, mut cache) = setup();
        cache.brush_for(&mut sys, Color::RED);
        cache.pen_for(&mut sys, Color::RED, 1);
        cache.pen_for(&mut sys, Color::RED, 3);
        cache.pen_for(&mut sys, Color::BLUE, 1);
        cache.release_color(&mut sys, Color::RED);
        assert_eq!(cache.brush_count(), 0);
        assert_eq!(cache.pen_count(), 1);
        assert_eq!(sys.stale_resource_deletes(), 0);
        // Releasing again must not touch the system.
        cache.release_color(&mut sys, Color::RED);
        assert_eq!(sys.stale_resource_deletes(), 0);
    }

    #[test]
    fn test_font_release_and_measure() {
        let (mut sys, mut cache) = setup();
        let font = Font::new("Sans", 10);
        let first = cache.measure_text(&mut sys, Some(&font), "Hello");
        let second = cache.measure_text(&mut sys, Some(&font), "Hello");
        assert_eq!(first, second);
        assert_eq!(cache.font_count(), 1);
        cache.release_font(&mut sys, &font);
        assert_eq!(cache.font_count(), 0);
        assert_eq!(sys.stale_resource_deletes(), 0);
    }

    #[test]
    fn test_clear_releases_everything_once() {
        let (mut sys, mut cache) = setup();
        cache.brush_for(&mut sys, Color::RED);
        cache.pen_for(&mut sys, Color::RED, 2);
        cache.font_for(&mut sys, &Font::new("Mono", 9));
        cache.clear(&mut sys);
        assert_eq!(cache.brush_count() + cache.pen_count() + cache.font_count(), 0);
        assert_eq!(sys.live_brush_count(), 0);
        assert_eq!(sys.live_pen_count(), 0);
        assert_eq!(sys.live_font_count(), 0);
        assert_eq!(sys.stale_resource_deletes(), 0);
    }
}
