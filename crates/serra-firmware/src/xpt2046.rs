// src/xpt2046.rs
//! Blocking SPI driver for the XPT2046 resistive touch ADC.
//!
//! The controller answers single-channel conversions: one control byte
//! selects the measurement, the next two clocked bytes carry a 12-bit
//! result left-aligned in the upper bits. Pressure (Z1) gates whether a
//! coordinate read is meaningful; the PENIRQ line is wired separately and
//! handled by the touch IRQ task.

use embedded_hal::spi::SpiDevice;

// Control bytes (start bit, channel select, 12-bit differential mode).
const READ_X: u8 = 0xD0;
const READ_Y: u8 = 0x90;
const READ_Z1: u8 = 0xB0;

/// Z1 conversions below this are noise, not a press.
const PRESSURE_THRESHOLD: u16 = 100;

/// Conversions averaged per coordinate read.
const SAMPLES_PER_READ: usize = 4;

/// Errors that can occur talking to the touch ADC.
#[derive(Debug)]
pub enum Error<E> {
    /// SPI communication error
    Spi(E),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Self::Spi(e)
    }
}

/// A raw (unmapped) 12-bit coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTouch {
    pub x: u16,
    pub y: u16,
}

pub struct Xpt2046<SPI> {
    spi: SPI,
}

impl<SPI> Xpt2046<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Run one conversion for the given control byte.
    fn convert(&mut self, control: u8) -> Result<u16, Error<SPI::Error>> {
        let mut buf = [control, 0, 0];
        self.spi.transfer_in_place(&mut buf)?;
        // 12-bit result, left-aligned across the two response bytes
        Ok(((buf[1] as u16) << 8 | buf[2] as u16) >> 3)
    }

    /// Whether the panel is currently being pressed, judged by Z1
    /// pressure.
    pub fn is_pressed(&mut self) -> Result<bool, Error<SPI::Error>> {
        Ok(self.convert(READ_Z1)? > PRESSURE_THRESHOLD)
    }

    /// Read an averaged raw coordinate pair, or `None` when the panel is
    /// not pressed.
    pub fn read_raw(&mut self) -> Result<Option<RawTouch>, Error<SPI::Error>> {
        if !self.is_pressed()? {
            return Ok(None);
        }

        let mut x_sum: u32 = 0;
        let mut y_sum: u32 = 0;
        for _ in 0..SAMPLES_PER_READ {
            x_sum += self.convert(READ_X)? as u32;
            y_sum += self.convert(READ_Y)? as u32;
        }

        Ok(Some(RawTouch {
            x: (x_sum / SAMPLES_PER_READ as u32) as u16,
            y: (y_sum / SAMPLES_PER_READ as u32) as u16,
        }))
    }
}
