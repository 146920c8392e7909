//! Font descriptions.
//!
//! A [`Font`] describes what the application wants; the native system maps it
//! to a concrete face. Fonts are value types and key the native font cache,
//! so equality and hashing cover every field.

use bitflags::bitflags;

bitflags! {
    /// Style attributes of a font.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FontStyle: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
    }
}

/// A logical font: family name, style, and point size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Font {
    family: String,
    style: FontStyle,
    point_size: i32,
}

impl Font {
    /// Create a plain font.
    pub fn new(family: impl Into<String>, point_size: i32) -> Self {
        Self {
            family: family.into(),
            style: FontStyle::empty(),
            point_size,
        }
    }

    /// Builder-style: set the style attributes.
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// The family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The style attributes.
    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// The point size.
    pub fn point_size(&self) -> i32 {
        self.point_size
    }

    pub fn is_bold(&self) -> bool {
        self.style.contains(FontStyle::BOLD)
    }

    pub fn is_italic(&self) -> bool {
        self.style.contains(FontStyle::ITALIC)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Sans", 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_identity() {
        let a = Font::new("Sans", 10).with_style(FontStyle::BOLD);
        let b = Font::new("Sans", 10).with_style(FontStyle::BOLD);
        let c = Font::new("Sans", 10);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
