// src/surface.rs
//! Touch-side contract of the display surface.
//!
//! Drawing goes through `embedded_graphics::DrawTarget<Color = Rgb565>`;
//! this trait adds the two touch-related operations the screen state
//! machine needs from the same surface. Firmware implements it over the
//! XPT2046 + TFT pair; the simulator over the SDL window.

use embedded_graphics::pixelcolor::Rgb565;

use crate::touch::TouchSample;

/// Raw constants produced by the touch calibration sequence, in the
/// layout the touch driver consumes: `[x_min, x_max, y_min, y_max, flags]`.
pub type TouchCalData = [u16; 5];

pub trait TouchSurface {
    /// Read the current raw touch coordinate, already mapped to screen
    /// pixels. Returns the sentinel when nothing is pressed.
    fn sample_touch(&mut self) -> TouchSample;

    /// Run the blocking corner-marker calibration sequence and return the
    /// five raw constants. This is the only operation in the system that
    /// blocks the UI loop.
    fn run_calibration(
        &mut self,
        marker_color: Rgb565,
        background_color: Rgb565,
        marker_size: u16,
    ) -> TouchCalData;
}
