// src/screens/manager.rs
//! Screen state machine and refresh trigger policy.
//!
//! [`ScreenManager`] owns the display surface, the clock, the touch
//! debouncer and the latest greenhouse snapshot. It is driven by a single
//! cooperative tick loop; the only concurrent input is the touch IRQ
//! flag, written by the signal context and consumed here.

use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::Rgb565;
use log::debug;

use crate::greenhouse::{GreenhouseConfig, GreenhouseData};
use crate::rtc::Clock;
use crate::screens::{CalibrationScreen, ConfigScreen, IdleScreen, ScreenId};
use crate::surface::TouchSurface;
use crate::touch::{TouchDebouncer, TouchIrqFlag, TouchSample};

pub struct ScreenManager<'a, D, C>
where
    D: DrawTarget<Color = Rgb565> + TouchSurface,
    C: Clock,
{
    surface: D,
    clock: C,
    irq: &'a TouchIrqFlag,
    debouncer: TouchDebouncer,
    data: GreenhouseData,
    config: GreenhouseConfig,
    new_data: bool,
    current: ScreenId,
}

impl<'a, D, C> ScreenManager<'a, D, C>
where
    D: DrawTarget<Color = Rgb565> + TouchSurface,
    C: Clock,
{
    pub fn new(surface: D, clock: C, irq: &'a TouchIrqFlag) -> Self {
        Self {
            surface,
            clock,
            irq,
            debouncer: TouchDebouncer::new(),
            data: GreenhouseData::default(),
            config: GreenhouseConfig::default(),
            new_data: false,
            current: ScreenId::Idle,
        }
    }

    /// Render the initial idle screen. Call once after construction.
    pub fn init(&mut self) -> Result<(), D::Error> {
        self.set_screen(ScreenId::Idle)
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    /// Replace the snapshot wholesale and flag it for the next tick.
    pub fn submit_data(&mut self, data: GreenhouseData) {
        self.data = data;
        self.new_data = true;
    }

    /// The current stable (debounced) touch sample.
    pub fn touch_sample(&self) -> TouchSample {
        self.debouncer.sample()
    }

    /// Set the current screen and render it immediately.
    ///
    /// A render evaluates its widget hit-tests against the stable touch
    /// sample; a hit resets the touch and re-enters here with the target
    /// screen, so a transition chain settles within a single call.
    pub fn set_screen(&mut self, id: ScreenId) -> Result<(), D::Error> {
        let mut next = Some(id);
        while let Some(id) = next.take() {
            self.current = id;
            debug!("screen set to {:?}", id);
            let touch = self.debouncer.sample();
            let outcome = match id {
                ScreenId::Idle => IdleScreen {
                    data: &self.data,
                    now: self.clock.now(),
                }
                .render(&mut self.surface, touch)?,
                ScreenId::Config => ConfigScreen {
                    config: &self.config,
                }
                .render(&mut self.surface, touch)?,
                ScreenId::Calibration => CalibrationScreen.render(&mut self.surface)?,
            };
            if let Some(target) = outcome {
                self.debouncer.reset();
                next = Some(target);
            }
        }
        Ok(())
    }

    /// One pass of the refresh trigger policy.
    ///
    /// A consumed press edge samples the touch through the debouncer and
    /// re-renders the current screen (hit-tests run inside the render).
    /// Otherwise a pending snapshot re-renders only the idle screen; the
    /// flag never survives the tick either way.
    pub fn tick(&mut self, now_ms: u64) -> Result<(), D::Error> {
        if self.irq.take() {
            let raw = self.surface.sample_touch();
            self.debouncer.feed(raw, now_ms);
            self.set_screen(self.current)?;
        }
        if self.new_data {
            debug!("new data available");
            if self.current == ScreenId::Idle {
                self.set_screen(ScreenId::Idle)?;
            }
            self.new_data = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtc::DateTime;
    use core::convert::Infallible;

    /// Records the pixel stream instead of displaying it, and plays back
    /// queued raw touch samples.
    struct TestSurface {
        raw_touch: TouchSample,
        pixels: u32,
        fingerprint: u32,
        cal_runs: u32,
    }

    impl TestSurface {
        fn new() -> Self {
            Self {
                raw_touch: TouchSample::NONE,
                pixels: 0,
                fingerprint: 0x811c_9dc5,
                cal_runs: 0,
            }
        }

        fn reset_fingerprint(&mut self) {
            self.pixels = 0;
            self.fingerprint = 0x811c_9dc5;
        }
    }

    impl OriginDimensions for TestSurface {
        fn size(&self) -> Size {
            Size::new(320, 480)
        }
    }

    impl DrawTarget for TestSurface {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Rgb565>>,
        {
            for Pixel(point, color) in pixels {
                self.pixels += 1;
                for word in [point.x as u32, point.y as u32, color.into_storage() as u32] {
                    self.fingerprint = (self.fingerprint ^ word).wrapping_mul(0x0100_0193);
                }
            }
            Ok(())
        }
    }

    impl TouchSurface for TestSurface {
        fn sample_touch(&mut self) -> TouchSample {
            self.raw_touch
        }

        fn run_calibration(
            &mut self,
            _marker_color: Rgb565,
            _background_color: Rgb565,
            _marker_size: u16,
        ) -> crate::surface::TouchCalData {
            self.cal_runs += 1;
            [338, 3387, 343, 3489, 4]
        }
    }

    struct FixedClock(DateTime);

    impl Clock for FixedClock {
        fn now(&mut self) -> DateTime {
            self.0
        }
    }

    fn manager(irq: &TouchIrqFlag) -> ScreenManager<'_, TestSurface, FixedClock> {
        let clock = FixedClock(DateTime {
            year: 2023,
            month: 7,
            day: 9,
            hour: 12,
            minute: 30,
            second: 0,
        });
        ScreenManager::new(TestSurface::new(), clock, irq)
    }

    fn snapshot() -> GreenhouseData {
        GreenhouseData {
            temp1: 23.5,
            temp2: 22.9,
            temp3: 24.1,
            hum1: 75.0,
            hum2: 74.2,
            hum3: 76.8,
        }
    }

    #[test]
    fn starts_on_idle_and_renders() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.init().unwrap();
        assert_eq!(mgr.current(), ScreenId::Idle);
        assert!(mgr.surface().pixels > 0);
    }

    #[test]
    fn sentinel_touch_causes_no_transition() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.submit_data(snapshot());
        mgr.init().unwrap();

        irq.notify();
        mgr.tick(1000).unwrap();
        assert_eq!(mgr.current(), ScreenId::Idle);
    }

    #[test]
    fn nav_press_transitions_to_config_and_resets_touch() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.submit_data(snapshot());
        mgr.init().unwrap();

        // (230, 375) is inside the (200, 350, 63, 63) navigation widget
        mgr.surface_mut().raw_touch = TouchSample::new(230, 375);
        irq.notify();
        mgr.tick(1000).unwrap();

        assert_eq!(mgr.current(), ScreenId::Config);
        assert!(mgr.touch_sample().is_none());
    }

    #[test]
    fn back_press_returns_to_idle() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.init().unwrap();

        mgr.surface_mut().raw_touch = TouchSample::new(230, 375);
        irq.notify();
        mgr.tick(1000).unwrap();
        assert_eq!(mgr.current(), ScreenId::Config);

        // the touch was reset, so this press lands despite the window
        mgr.surface_mut().raw_touch = TouchSample::new(250, 400);
        irq.notify();
        mgr.tick(1100).unwrap();
        assert_eq!(mgr.current(), ScreenId::Idle);
        assert!(mgr.touch_sample().is_none());
    }

    #[test]
    fn rerender_is_idempotent() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.submit_data(snapshot());
        mgr.init().unwrap();

        mgr.surface_mut().reset_fingerprint();
        mgr.set_screen(ScreenId::Idle).unwrap();
        let first = (mgr.surface().pixels, mgr.surface().fingerprint);

        mgr.surface_mut().reset_fingerprint();
        mgr.set_screen(ScreenId::Idle).unwrap();
        let second = (mgr.surface().pixels, mgr.surface().fingerprint);

        assert_eq!(first, second);
    }

    #[test]
    fn new_data_rerenders_only_idle() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.init().unwrap();

        // move to config
        mgr.surface_mut().raw_touch = TouchSample::new(230, 375);
        irq.notify();
        mgr.tick(1000).unwrap();
        assert_eq!(mgr.current(), ScreenId::Config);

        // a fresh snapshot must not redraw the config screen
        mgr.surface_mut().reset_fingerprint();
        mgr.submit_data(snapshot());
        mgr.tick(2000).unwrap();
        assert_eq!(mgr.surface().pixels, 0);

        // the flag was cleared: the next tick stays quiet too
        mgr.tick(3000).unwrap();
        assert_eq!(mgr.surface().pixels, 0);
    }

    #[test]
    fn new_data_refreshes_idle() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.init().unwrap();

        mgr.surface_mut().reset_fingerprint();
        mgr.submit_data(snapshot());
        mgr.tick(1000).unwrap();
        assert!(mgr.surface().pixels > 0);
        assert_eq!(mgr.current(), ScreenId::Idle);
    }

    #[test]
    fn calibration_runs_the_blocking_sequence() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.set_screen(ScreenId::Calibration).unwrap();
        assert_eq!(mgr.current(), ScreenId::Calibration);
        assert_eq!(mgr.surface().cal_runs, 1);
    }

    #[test]
    fn debounce_window_suppresses_rapid_second_press() {
        let irq = TouchIrqFlag::new();
        let mut mgr = manager(&irq);
        mgr.init().unwrap();

        // first press misses every widget but is accepted as the sample
        mgr.surface_mut().raw_touch = TouchSample::new(10, 470);
        irq.notify();
        mgr.tick(1000).unwrap();
        assert_eq!(mgr.touch_sample(), TouchSample::new(10, 470));

        // second press inside the window would hit the nav widget, but the
        // debouncer keeps the previous coordinates
        mgr.surface_mut().raw_touch = TouchSample::new(230, 375);
        irq.notify();
        mgr.tick(1200).unwrap();
        assert_eq!(mgr.current(), ScreenId::Idle);
        assert_eq!(mgr.touch_sample(), TouchSample::new(10, 470));
    }
}
