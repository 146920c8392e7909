//! Subsystem configuration.

use std::collections::HashMap;

use casement_core::{Font, WidgetKind};

/// Configuration for a [`crate::Shell`].
///
/// # Example
///
/// ```
/// use casement::ShellConfig;
/// use casement_core::{Font, WidgetKind};
///
/// let config = ShellConfig::new()
///     .with_default_font(Font::new("Sans", 10))
///     .with_native_parent(WidgetKind::TabbedPane, true);
/// ```
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Font applied when a widget specifies none.
    default_font: Font,
    /// Interval within which two clicks become a double click.
    double_click_ms: u32,
    /// Widest pen the resource cache will create; wider requests clamp.
    max_pen_width: i32,
    /// Per-kind native-parent behavior overrides.
    ///
    /// Whether composite containers parent their children natively varies
    /// by platform; this maps a widget kind to the answer for the target
    /// system. A per-widget override on the logical widget wins over this.
    native_parents: HashMap<WidgetKind, bool>,
}

impl ShellConfig {
    pub fn new() -> Self {
        Self {
            default_font: Font::default(),
            double_click_ms: 500,
            max_pen_width: 4,
            native_parents: HashMap::new(),
        }
    }

    pub fn with_default_font(mut self, font: Font) -> Self {
        self.default_font = font;
        self
    }

    pub fn with_double_click_ms(mut self, ms: u32) -> Self {
        self.double_click_ms = ms;
        self
    }

    pub fn with_max_pen_width(mut self, width: i32) -> Self {
        self.max_pen_width = width.max(1);
        self
    }

    pub fn with_native_parent(mut self, kind: WidgetKind, native: bool) -> Self {
        self.native_parents.insert(kind, native);
        self
    }

    pub fn default_font(&self) -> &Font {
        &self.default_font
    }

    pub fn double_click_ms(&self) -> u32 {
        self.double_click_ms
    }

    pub fn max_pen_width(&self) -> i32 {
        self.max_pen_width
    }

    /// The configured native-parent answer for `kind`, if any.
    pub fn native_parent_for(&self, kind: WidgetKind) -> Option<bool> {
        self.native_parents.get(&kind).copied()
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let c = ShellConfig::default();
        assert_eq!(c.max_pen_width(), 4);
        assert_eq!(c.native_parent_for(WidgetKind::TabbedPane), None);
    }

    #[test]
    fn test_config_overrides() {
        let c = ShellConfig::new()
            .with_max_pen_width(0)
            .with_native_parent(WidgetKind::TabbedPane, true);
        assert_eq!(c.max_pen_width(), 1);
        assert_eq!(c.native_parent_for(WidgetKind::TabbedPane), Some(true));
    }
}
