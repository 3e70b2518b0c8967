// src/surface.rs
//! The physical display surface: TFT panel + XPT2046 touch ADC.
//!
//! [`TftSurface`] bundles the mipidsi draw target with the touch driver
//! and the five calibration constants, so the screen manager sees one
//! collaborator for drawing, touch sampling and calibration.

use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_hal::spi::SpiDevice;
use embassy_time::{block_for, Duration};
use log::{error, info};

use serra_core::surface::{TouchCalData, TouchSurface};
use serra_core::touch::TouchSample;
use serra_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

use crate::xpt2046::{RawTouch, Xpt2046};

/// Calibration flag: raw x runs opposite the display's x axis.
const FLAG_INVERT_X: u16 = 0b010;
/// Calibration flag: raw y runs opposite the display's y axis.
const FLAG_INVERT_Y: u16 = 0b100;

/// Constants measured for the stock panel; replaced after a calibration
/// run.
pub const DEFAULT_CALIBRATION: TouchCalData = [338, 3387, 343, 3489, 4];

/// Distance of the calibration markers from the screen edges.
const CAL_MARKER_INSET: i32 = 10;

/// Poll period while the calibration sequence waits on a press.
const CAL_POLL: Duration = Duration::from_millis(20);

pub struct TftSurface<D, SPI> {
    display: D,
    touch: Xpt2046<SPI>,
    cal: TouchCalData,
}

impl<D, SPI> TftSurface<D, SPI>
where
    D: DrawTarget<Color = Rgb565>,
    SPI: SpiDevice,
{
    pub fn new(display: D, touch: Xpt2046<SPI>, cal: TouchCalData) -> Self {
        Self {
            display,
            touch,
            cal,
        }
    }

    pub fn calibration(&self) -> TouchCalData {
        self.cal
    }

    /// Map a raw 12-bit coordinate pair to screen pixels using the
    /// calibration constants `[x_min, x_max, y_min, y_max, flags]`.
    fn map_raw(&self, raw: RawTouch) -> TouchSample {
        let [x_min, x_max, y_min, y_max, flags] = self.cal;
        let mut x = scale(raw.x, x_min, x_max, DISPLAY_WIDTH_PX);
        let mut y = scale(raw.y, y_min, y_max, DISPLAY_HEIGHT_PX);
        if flags & FLAG_INVERT_X != 0 {
            x = DISPLAY_WIDTH_PX - 1 - x;
        }
        if flags & FLAG_INVERT_Y != 0 {
            y = DISPLAY_HEIGHT_PX - 1 - y;
        }
        TouchSample::new(x, y)
    }

    /// Block until the panel reports a press, then until it is released
    /// again, returning the pressed coordinates.
    fn wait_for_tap(&mut self) -> RawTouch {
        let raw = loop {
            match self.touch.read_raw() {
                Ok(Some(raw)) => break raw,
                Ok(None) => {}
                Err(e) => error!("touch read failed: {:?}", e),
            }
            block_for(CAL_POLL);
        };
        loop {
            match self.touch.read_raw() {
                Ok(None) => break,
                Ok(Some(_)) => {}
                Err(e) => error!("touch read failed: {:?}", e),
            }
            block_for(CAL_POLL);
        }
        raw
    }
}

fn scale(value: u16, lo: u16, hi: u16, range: u16) -> u16 {
    let span = hi.saturating_sub(lo).max(1) as u32;
    let offset = value.saturating_sub(lo) as u32;
    (offset * range as u32 / span).min(range as u32 - 1) as u16
}

impl<D, SPI> Dimensions for TftSurface<D, SPI>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn bounding_box(&self) -> Rectangle {
        self.display.bounding_box()
    }
}

impl<D, SPI> DrawTarget for TftSurface<D, SPI>
where
    D: DrawTarget<Color = Rgb565>,
    SPI: SpiDevice,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        self.display.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        self.display.fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.display.fill_solid(area, color)
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.display.clear(color)
    }
}

impl<D, SPI> TouchSurface for TftSurface<D, SPI>
where
    D: DrawTarget<Color = Rgb565>,
    SPI: SpiDevice,
{
    fn sample_touch(&mut self) -> TouchSample {
        match self.touch.read_raw() {
            Ok(Some(raw)) => self.map_raw(raw),
            Ok(None) => TouchSample::NONE,
            Err(e) => {
                error!("touch read failed: {:?}", e);
                TouchSample::NONE
            }
        }
    }

    fn run_calibration(
        &mut self,
        marker_color: Rgb565,
        background_color: Rgb565,
        marker_size: u16,
    ) -> TouchCalData {
        let size = marker_size as i32;
        let far_x = DISPLAY_WIDTH_PX as i32 - CAL_MARKER_INSET - size;
        let far_y = DISPLAY_HEIGHT_PX as i32 - CAL_MARKER_INSET - size;
        let corners = [
            Point::new(CAL_MARKER_INSET, CAL_MARKER_INSET),
            Point::new(far_x, CAL_MARKER_INSET),
            Point::new(CAL_MARKER_INSET, far_y),
            Point::new(far_x, far_y),
        ];

        let mut taps = [RawTouch { x: 0, y: 0 }; 4];
        for (corner, tap) in corners.iter().zip(taps.iter_mut()) {
            let marker =
                Rectangle::new(*corner, Size::new(marker_size as u32, marker_size as u32));
            marker
                .into_styled(PrimitiveStyle::with_fill(marker_color))
                .draw(&mut self.display)
                .ok();

            *tap = self.wait_for_tap();

            marker
                .into_styled(PrimitiveStyle::with_fill(background_color))
                .draw(&mut self.display)
                .ok();
        }

        let [tl, tr, bl, br] = taps;
        let mut x_lo = midpoint(tl.x, bl.x);
        let mut x_hi = midpoint(tr.x, br.x);
        let mut y_lo = midpoint(tl.y, tr.y);
        let mut y_hi = midpoint(bl.y, br.y);
        let mut flags = 0u16;
        if x_lo > x_hi {
            core::mem::swap(&mut x_lo, &mut x_hi);
            flags |= FLAG_INVERT_X;
        }
        if y_lo > y_hi {
            core::mem::swap(&mut y_lo, &mut y_hi);
            flags |= FLAG_INVERT_Y;
        }

        self.cal = [x_lo, x_hi, y_lo, y_hi, flags];
        info!("touch calibration updated: {:?}", self.cal);
        self.cal
    }
}

fn midpoint(a: u16, b: u16) -> u16 {
    ((a as u32 + b as u32) / 2) as u16
}
