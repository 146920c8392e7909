//! Color values.
//!
//! Colors are plain RGB triples. They are value types: two colors with the
//! same channels are the same color, which is what keys the native brush and
//! pen caches downstream.

/// An opaque RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::new(192, 192, 192);
    pub const DARK_GRAY: Color = Color::new(64, 64, 64);

    /// Create a color from its channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            red: ((rgb >> 16) & 0xff) as u8,
            green: ((rgb >> 8) & 0xff) as u8,
            blue: (rgb & 0xff) as u8,
        }
    }

    /// Pack into a `0xRRGGBB` value.
    pub const fn to_rgb(self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }
}

/// Well-known colors supplied by the native system's current theme.
///
/// Resolved to concrete [`Color`] values through the windowing subsystem,
/// never hardcoded by widgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemColor {
    /// Face color of buttons and control surfaces.
    ButtonFace,
    /// Dark edge of 3D control borders.
    ButtonShadow,
    /// Light edge of 3D control borders.
    ButtonHighlight,
    /// Background of ordinary windows.
    WindowBackground,
    /// Text drawn on ordinary windows.
    WindowText,
    /// Background of selected items.
    Highlight,
    /// Text of selected items.
    HighlightText,
    /// Text of disabled controls.
    GrayText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_round_trip() {
        let c = Color::from_rgb(0x4080ff);
        assert_eq!(c, Color::new(0x40, 0x80, 0xff));
        assert_eq!(c.to_rgb(), 0x4080ff);
    }
}
