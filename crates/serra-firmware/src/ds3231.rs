// src/ds3231.rs
//! DS3231 real-time clock driver.
//!
//! Reads the seven BCD timekeeping registers in one burst and converts
//! them to a calendar [`DateTime`]. The DS3231 stores a two-digit year
//! plus a century flag; this driver applies the offset so consumers get a
//! full year.

use embedded_hal::i2c::I2c;
use log::error;
use serra_core::rtc::{Clock, DateTime};

/// DS3231 I2C address
pub const I2C_ADDR: u8 = 0x68;

/// First timekeeping register (seconds)
const REG_SECONDS: u8 = 0x00;

fn bcd_to_bin(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

pub struct Ds3231<I2C> {
    i2c: I2C,
    /// Last successfully read timestamp, reported when a read fails.
    last: DateTime,
}

impl<I2C> Ds3231<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            last: DateTime::default(),
        }
    }

    /// Read and decode the timekeeping registers.
    pub fn read_time(&mut self) -> Result<DateTime, I2C::Error> {
        let mut regs = [0u8; 7];
        self.i2c.write_read(I2C_ADDR, &[REG_SECONDS], &mut regs)?;

        // bit 7 of the month register is the century flag
        let year_base: u16 = if regs[5] & 0x80 != 0 { 2100 } else { 2000 };
        let datetime = DateTime {
            second: bcd_to_bin(regs[0] & 0x7F),
            minute: bcd_to_bin(regs[1] & 0x7F),
            // 24-hour mode assumed (bit 6 clear)
            hour: bcd_to_bin(regs[2] & 0x3F),
            day: bcd_to_bin(regs[4] & 0x3F),
            month: bcd_to_bin(regs[5] & 0x1F),
            year: year_base + bcd_to_bin(regs[6]) as u16,
        };

        self.last = datetime;
        Ok(datetime)
    }
}

impl<I2C> Clock for Ds3231<I2C>
where
    I2C: I2c,
{
    fn now(&mut self) -> DateTime {
        match self.read_time() {
            Ok(datetime) => datetime,
            Err(e) => {
                error!("DS3231 read failed: {:?}, reusing last timestamp", e);
                self.last
            }
        }
    }
}
