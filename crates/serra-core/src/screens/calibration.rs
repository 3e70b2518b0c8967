// src/screens/calibration.rs
//! Touch calibration screen.
//!
//! Runs the surface's blocking corner-marker sequence and reports the raw
//! constants through the log. This screen has no widgets and never
//! transitions on its own; it is reached only through the explicit entry
//! points in the setup/config flows.

use embedded_graphics::prelude::*;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use embedded_layout::prelude::*;
use log::info;

use crate::screens::constants::CAL_MARKER_SIZE_PX;
use crate::screens::ScreenId;
use crate::surface::TouchSurface;
use crate::ui::{styling, TextSize, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

pub struct CalibrationScreen;

impl CalibrationScreen {
    pub fn render<D>(&self, display: &mut D) -> Result<Option<ScreenId>, D::Error>
    where
        D: DrawTarget<Color = Rgb565> + TouchSurface,
    {
        let screen = Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
        );

        display.clear(styling::COLOR_BACKGROUND)?;
        Text::with_baseline(
            "Touch corners as indicated",
            Point::zero(),
            MonoTextStyle::new(TextSize::Medium.font(), styling::COLOR_TEXT),
            Baseline::Top,
        )
        .align_to(&screen, horizontal::Center, vertical::Top)
        .draw(display)?;

        let constants = display.run_calibration(
            styling::COLOR_CAL_MARKER,
            styling::COLOR_BACKGROUND,
            CAL_MARKER_SIZE_PX,
        );
        info!("calibration values {:?}", constants);

        display.clear(styling::COLOR_BACKGROUND)?;
        Text::with_baseline(
            "Calibration complete!",
            Point::zero(),
            MonoTextStyle::new(TextSize::Medium.font(), styling::COLOR_CAL_DONE),
            Baseline::Top,
        )
        .align_to(&screen, horizontal::Center, vertical::Center)
        .draw(display)?;
        Text::with_baseline(
            "Constants written to the log.",
            Point::new(0, DISPLAY_HEIGHT_PX as i32 / 2 + 20),
            MonoTextStyle::new(TextSize::Small.font(), styling::COLOR_TEXT_DIM),
            Baseline::Top,
        )
        .align_to(&screen, horizontal::Center, vertical::NoAlignment)
        .draw(display)?;

        Ok(None)
    }
}
