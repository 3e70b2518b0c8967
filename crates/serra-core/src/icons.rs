// src/icons.rs
//! Static icon assets.
//!
//! Icons are stored XBM-style: 1 bit per pixel, least-significant bit
//! first within each byte, rows padded to a whole byte. Set bits are drawn
//! in the caller's foreground color; clear bits are transparent, so the
//! widget background shows through.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// A 1-bpp bitmap with known pixel dimensions.
#[derive(Debug, Clone, Copy)]
pub struct Icon {
    data: &'static [u8],
    width: u32,
    height: u32,
}

impl Icon {
    pub const fn new(data: &'static [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Blit the icon with its top-left corner at `top_left`, drawing set
    /// bits in `color` and skipping clear bits.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        top_left: Point,
        color: Rgb565,
    ) -> Result<(), D::Error> {
        let data = self.data;
        let width = self.width;
        let row_bytes = (self.width as usize).div_ceil(8);

        let pixels = (0..self.height).flat_map(move |y| {
            (0..width).filter_map(move |x| {
                let byte = data[y as usize * row_bytes + (x / 8) as usize];
                if byte & (1 << (x % 8)) != 0 {
                    Some(Pixel(top_left + Point::new(x as i32, y as i32), color))
                } else {
                    None
                }
            })
        });

        display.draw_iter(pixels)
    }
}

/// 63x63 cog, used by the idle screen's configuration button.
pub const ICON_COG: Icon = Icon::new(&COG_63X63, 63, 63);

#[rustfmt::skip]
static COG_63X63: [u8; 504] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0xfc, 0x1f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfc,
    0x1f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfc, 0x1f, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0xfc, 0x1f, 0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0xfc,
    0x1f, 0x80, 0x00, 0x00, 0x00, 0xc0, 0x01, 0xf8, 0x0f, 0xc0, 0x01, 0x00,
    0x00, 0xe0, 0x01, 0xf8, 0x0f, 0xc0, 0x03, 0x00, 0x00, 0xf8, 0x03, 0xfe,
    0x3f, 0xe0, 0x0f, 0x00, 0x00, 0xfc, 0xc7, 0xff, 0xff, 0xf1, 0x1f, 0x00,
    0x00, 0xfc, 0xf7, 0xff, 0xff, 0xf7, 0x1f, 0x00, 0x00, 0xfe, 0xff, 0xff,
    0xff, 0xff, 0x3f, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f, 0x00,
    0x80, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0xff, 0xff, 0xff,
    0xff, 0xff, 0x7f, 0x00, 0x00, 0xfc, 0xff, 0xff, 0xff, 0xff, 0x1f, 0x00,
    0x00, 0xf8, 0xff, 0xff, 0xff, 0xff, 0x0f, 0x00, 0x00, 0xe0, 0xff, 0xff,
    0xff, 0xff, 0x03, 0x00, 0x00, 0xf0, 0xff, 0xff, 0xff, 0xff, 0x07, 0x00,
    0x00, 0xf0, 0xff, 0xff, 0xff, 0xff, 0x07, 0x00, 0x00, 0xf8, 0xff, 0xff,
    0xff, 0xff, 0x0f, 0x00, 0x00, 0xf8, 0xff, 0xff, 0xff, 0xff, 0x0f, 0x00,
    0x00, 0xf8, 0xff, 0x0f, 0xf8, 0xff, 0x0f, 0x00, 0x00, 0xfc, 0xff, 0x03,
    0xe0, 0xff, 0x1f, 0x00, 0xf8, 0xfc, 0xff, 0x01, 0xc0, 0xff, 0x9f, 0x0f,
    0xf8, 0xff, 0xff, 0x01, 0xc0, 0xff, 0xff, 0x0f, 0xf8, 0xff, 0xff, 0x00,
    0x80, 0xff, 0xff, 0x0f, 0xf8, 0xff, 0xff, 0x00, 0x80, 0xff, 0xff, 0x0f,
    0xf8, 0xff, 0xff, 0x00, 0x80, 0xff, 0xff, 0x0f, 0xfc, 0xff, 0xff, 0x00,
    0x80, 0xff, 0xff, 0x1f, 0xf8, 0xff, 0xff, 0x00, 0x80, 0xff, 0xff, 0x0f,
    0xf8, 0xff, 0xff, 0x00, 0x80, 0xff, 0xff, 0x0f, 0xf8, 0xff, 0xff, 0x00,
    0x80, 0xff, 0xff, 0x0f, 0xf8, 0xff, 0xff, 0x01, 0xc0, 0xff, 0xff, 0x0f,
    0xf8, 0xfc, 0xff, 0x01, 0xc0, 0xff, 0x9f, 0x0f, 0x00, 0xfc, 0xff, 0x03,
    0xe0, 0xff, 0x1f, 0x00, 0x00, 0xf8, 0xff, 0x0f, 0xf8, 0xff, 0x0f, 0x00,
    0x00, 0xf8, 0xff, 0xff, 0xff, 0xff, 0x0f, 0x00, 0x00, 0xf8, 0xff, 0xff,
    0xff, 0xff, 0x0f, 0x00, 0x00, 0xf0, 0xff, 0xff, 0xff, 0xff, 0x07, 0x00,
    0x00, 0xf0, 0xff, 0xff, 0xff, 0xff, 0x07, 0x00, 0x00, 0xe0, 0xff, 0xff,
    0xff, 0xff, 0x03, 0x00, 0x00, 0xf8, 0xff, 0xff, 0xff, 0xff, 0x0f, 0x00,
    0x00, 0xfc, 0xff, 0xff, 0xff, 0xff, 0x1f, 0x00, 0x00, 0xff, 0xff, 0xff,
    0xff, 0xff, 0x7f, 0x00, 0x80, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00,
    0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f, 0x00, 0x00, 0xfe, 0xff, 0xff,
    0xff, 0xff, 0x3f, 0x00, 0x00, 0xfc, 0xf7, 0xff, 0xff, 0xf7, 0x1f, 0x00,
    0x00, 0xfc, 0xc7, 0xff, 0xff, 0xf1, 0x1f, 0x00, 0x00, 0xf8, 0x03, 0xfe,
    0x3f, 0xe0, 0x0f, 0x00, 0x00, 0xe0, 0x01, 0xf8, 0x0f, 0xc0, 0x03, 0x00,
    0x00, 0xc0, 0x01, 0xf8, 0x0f, 0xc0, 0x01, 0x00, 0x00, 0x80, 0x00, 0xfc,
    0x1f, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfc, 0x1f, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0xfc, 0x1f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfc,
    0x1f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfc, 0x1f, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cog_dimensions() {
        assert_eq!(ICON_COG.size(), Size::new(63, 63));
        // 63 px wide -> 8 bytes per row, 63 rows
        assert_eq!(COG_63X63.len(), 8 * 63);
    }

    #[test]
    fn cog_center_is_hollow() {
        // the hub hole: bit (31, 31) must be clear
        let row_bytes = 8;
        let byte = COG_63X63[31 * row_bytes + 31 / 8];
        assert_eq!(byte & (1 << (31 % 8)), 0);
    }
}
