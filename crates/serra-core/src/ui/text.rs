// src/ui/text.rs
//! Font selection and text measurement.

use embedded_graphics::geometry::Size;
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::MonoFont;

/// Text size variants.
///
/// Provides three preset text sizes with corresponding embedded-graphics
/// fonts:
/// - `Small`: 5x8 font
/// - `Medium`: 6x10 font (default)
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        }
    }

    /// Pixel extent of `text` rendered in this font, from the mono font
    /// metrics (fixed advance, single line).
    pub fn measure(&self, text: &str) -> Size {
        let font = self.font();
        let advance = font.character_size.width + font.character_spacing;
        let chars = text.chars().count() as u32;
        let width = (chars * advance).saturating_sub(font.character_spacing);
        Size::new(width, font.character_size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_uses_fixed_advance() {
        // FONT_6X10 has a 6px advance and no extra spacing
        assert_eq!(TextSize::Medium.measure("Back"), Size::new(24, 10));
        assert_eq!(TextSize::Large.measure("Temp1"), Size::new(50, 20));
    }

    #[test]
    fn measure_empty_is_zero_width() {
        assert_eq!(TextSize::Small.measure("").width, 0);
    }
}
