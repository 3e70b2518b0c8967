// src/screens/config.rs
//! Configuration screen.
//!
//! Currently a placeholder layout: the greenhouse settings tile is not
//! interactive yet, only the back navigation works.
// TODO: wire the vent-override tile to a GreenhouseConfig uplink push.

use embedded_graphics::prelude::*;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Baseline, Text};
use log::debug;

use crate::greenhouse::GreenhouseConfig;
use crate::screens::constants::*;
use crate::screens::ScreenId;
use crate::touch::TouchSample;
use crate::ui::widget::{ButtonWidget, TooltipAnchor, WidgetShape};
use crate::ui::{styling, TextSize};

pub struct ConfigScreen<'a> {
    pub config: &'a GreenhouseConfig,
}

impl ConfigScreen<'_> {
    pub fn render<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        touch: TouchSample,
    ) -> Result<Option<ScreenId>, D::Error> {
        display.clear(styling::COLOR_BACKGROUND)?;

        Text::with_baseline(
            "Configuration page",
            Point::new(TILE_COLUMN_X, 20),
            MonoTextStyle::new(TextSize::Large.font(), styling::COLOR_TEXT),
            Baseline::Top,
        )
        .draw(display)?;

        let mut vents = ButtonWidget::new(Point::new(TILE_COLUMN_X, 80), Size::new(120, 50));
        vents.set_style(
            styling::COLOR_TILE,
            styling::COLOR_TILE_TEXT,
            WidgetShape::Rect,
        );
        vents.set_text(
            if self.config.vent_override {
                "Vents: open"
            } else {
                "Vents: auto"
            },
            TextSize::Medium,
        );
        vents.set_tooltip(
            "coming soon",
            TextSize::Small,
            TooltipAnchor::Down,
            10,
            styling::COLOR_TEXT_DIM,
        );
        vents.draw(display)?;

        let mut back = ButtonWidget::new(
            Point::new(BACK_ORIGIN.0, BACK_ORIGIN.1),
            Size::new(BACK_SIZE_PX, BACK_SIZE_PX),
        );
        back.set_style(
            styling::COLOR_BACK,
            Rgb565::WHITE,
            WidgetShape::RoundRect {
                corner_radius: BACK_CORNER_RADIUS_PX,
            },
        );
        back.set_text("Back", TextSize::Medium);
        back.draw(display)?;

        if back.is_pressed(touch) {
            debug!("config: back widget pressed");
            return Ok(Some(ScreenId::Idle));
        }
        Ok(None)
    }
}
