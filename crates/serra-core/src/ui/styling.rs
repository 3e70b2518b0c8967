// src/ui/styling.rs
//! Color definitions for the console UI.
//!
//! All colors are RGB565 (5 bits red, 6 bits green, 5 bits blue). To
//! convert from 8-bit RGB: R>>3, G>>2, B>>3.

use embedded_graphics::pixelcolor::Rgb565;

/// Screen background.
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);

/// Primary text color.
pub const COLOR_TEXT: Rgb565 = Rgb565::new(31, 63, 31);

/// Secondary text color - light gray, used for tooltips and footers.
pub const COLOR_TEXT_DIM: Rgb565 = Rgb565::new(21, 42, 21);

/// Navigation widget fill - cyan.
pub const COLOR_NAV: Rgb565 = Rgb565::new(0, 63, 31);

/// Back widget fill - purple.
pub const COLOR_BACK: Rgb565 = Rgb565::new(128 >> 3, 0, 128 >> 3);

/// Reading tile fill - dark teal.
pub const COLOR_TILE: Rgb565 = Rgb565::new(29 >> 3, 47 >> 2, 43 >> 3);

/// Reading tile foreground - bright teal-green.
pub const COLOR_TILE_TEXT: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

/// Calibration marker color - magenta.
pub const COLOR_CAL_MARKER: Rgb565 = Rgb565::new(31, 0, 31);

/// Calibration success message color - green.
pub const COLOR_CAL_DONE: Rgb565 = Rgb565::new(0, 63, 0);
