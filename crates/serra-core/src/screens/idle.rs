// src/screens/idle.rs
//! Home/dashboard screen: six readings, last-update stamp, and the
//! navigation widget into the configuration screen.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use log::debug;

use crate::greenhouse::GreenhouseData;
use crate::rtc::DateTime;
use crate::screens::constants::*;
use crate::screens::ScreenId;
use crate::touch::TouchSample;
use crate::ui::widget::{ButtonWidget, TooltipAnchor, WidgetShape};
use crate::ui::{styling, TextSize};
use crate::icons::ICON_COG;

pub struct IdleScreen<'a> {
    pub data: &'a GreenhouseData,
    pub now: DateTime,
}

impl IdleScreen<'_> {
    /// Draw the full screen and evaluate the navigation hit-test against
    /// the current stable touch sample.
    pub fn render<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        touch: TouchSample,
    ) -> Result<Option<ScreenId>, D::Error> {
        display.clear(styling::COLOR_BACKGROUND)?;

        let readings: [(&str, f32); 6] = [
            ("Temp1", self.data.temp1),
            ("Temp2", self.data.temp2),
            ("Temp3", self.data.temp3),
            ("Hum1", self.data.hum1),
            ("Hum2", self.data.hum2),
            ("Hum3", self.data.hum3),
        ];

        for (row, (label, value)) in readings.iter().enumerate() {
            let mut text: String<8> = String::new();
            write!(text, "{:.1}", value).ok();

            let mut tile = ButtonWidget::new(
                Point::new(TILE_COLUMN_X, row as i32 * TILE_ROW_STEP_PX),
                Size::new(TILE_SIZE_PX, TILE_SIZE_PX),
            );
            tile.set_style(
                styling::COLOR_TILE,
                styling::COLOR_TILE_TEXT,
                WidgetShape::RoundRect {
                    corner_radius: TILE_CORNER_RADIUS_PX,
                },
            );
            tile.set_text(&text, TextSize::Medium);
            tile.set_tooltip(
                label,
                TextSize::Medium,
                TooltipAnchor::Right,
                TOOLTIP_PADDING_PX,
                styling::COLOR_TEXT_DIM,
            );
            tile.draw(display)?;
        }

        let mut footer: String<40> = String::new();
        write!(
            footer,
            "Last update: {} {}",
            self.now.time_string(),
            self.now.date_string()
        )
        .ok();
        Text::with_baseline(
            &footer,
            Point::new(TILE_COLUMN_X, FOOTER_Y),
            MonoTextStyle::new(TextSize::Small.font(), styling::COLOR_TEXT_DIM),
            Baseline::Top,
        )
        .draw(display)?;

        let mut nav = ButtonWidget::new(
            Point::new(NAV_ORIGIN.0, NAV_ORIGIN.1),
            Size::new(TILE_SIZE_PX, TILE_SIZE_PX),
        );
        nav.set_style(styling::COLOR_NAV, Rgb565::BLACK, WidgetShape::Ellipse);
        nav.set_icon(&ICON_COG);
        nav.draw(display)?;

        if nav.is_pressed(touch) {
            debug!("idle: config widget pressed");
            return Ok(Some(ScreenId::Config));
        }
        Ok(None)
    }
}
