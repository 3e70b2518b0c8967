//! Desktop simulator for the serra-rs greenhouse console UI.
//!
//! Renders the serra-core screens in an SDL2 window via
//! `embedded-graphics-simulator`. Generates synthetic greenhouse frames so
//! the screens can be exercised without a radio link or hardware.
//!
//! # Key bindings
//!
//! | Key | Action                       |
//! |-----|------------------------------|
//! | 1   | Idle (dashboard) screen      |
//! | 2   | Configuration screen         |
//! | C   | Touch calibration screen     |
//! | Q   | Quit                         |
//!
//! Mouse clicks are forwarded as touch presses.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use log::info;

use serra_core::config::POLL_INTERVAL_MS;
use serra_core::greenhouse::GreenhouseData;
use serra_core::rtc::{Clock, DateTime};
use serra_core::screens::{ScreenId, ScreenManager};
use serra_core::surface::{TouchCalData, TouchSurface};
use serra_core::touch::{TouchIrqFlag, TouchSample};
use serra_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 1;

/// Target frame duration (~60 FPS: the tick loop is cheap).
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Raw press edges from the mouse, consumed by the UI tick.
static TOUCH_IRQ: TouchIrqFlag = TouchIrqFlag::new();

// ---------------------------------------------------------------------------
// Simulated display surface
// ---------------------------------------------------------------------------

/// SDL-backed surface: drawing goes to the simulator display, touches come
/// from forwarded mouse clicks.
struct SimSurface {
    display: SimulatorDisplay<Rgb565>,
    pending: TouchSample,
}

impl SimSurface {
    fn new() -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(
                DISPLAY_WIDTH_PX as u32,
                DISPLAY_HEIGHT_PX as u32,
            )),
            pending: TouchSample::NONE,
        }
    }

    fn display(&self) -> &SimulatorDisplay<Rgb565> {
        &self.display
    }

    /// Record a mouse click as the current raw touch coordinate.
    fn push_touch(&mut self, point: Point) {
        self.pending = TouchSample::new(point.x.max(0) as u16, point.y.max(0) as u16);
    }
}

impl Dimensions for SimSurface {
    fn bounding_box(&self) -> Rectangle {
        self.display.bounding_box()
    }
}

impl DrawTarget for SimSurface {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        self.display.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.display.fill_solid(area, color)
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.display.clear(color)
    }
}

impl TouchSurface for SimSurface {
    fn sample_touch(&mut self) -> TouchSample {
        self.pending
    }

    fn run_calibration(
        &mut self,
        marker_color: Rgb565,
        _background_color: Rgb565,
        marker_size: u16,
    ) -> TouchCalData {
        // there is no panel to measure: draw the corner markers once so the
        // flow is visible, then hand back the stock constants
        let size = Size::new(marker_size as u32, marker_size as u32);
        let far_x = DISPLAY_WIDTH_PX as i32 - 10 - marker_size as i32;
        let far_y = DISPLAY_HEIGHT_PX as i32 - 10 - marker_size as i32;
        for corner in [
            Point::new(10, 10),
            Point::new(far_x, 10),
            Point::new(10, far_y),
            Point::new(far_x, far_y),
        ] {
            let _ = Rectangle::new(corner, size)
                .into_styled(PrimitiveStyle::with_fill(marker_color))
                .draw(&mut self.display);
        }
        [338, 3387, 343, 3489, 4]
    }
}

// ---------------------------------------------------------------------------
// Host clock
// ---------------------------------------------------------------------------

/// Clock collaborator backed by the host system time (UTC).
struct HostClock;

impl Clock for HostClock {
    fn now(&mut self) -> DateTime {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let (year, month, day) = civil_from_days((secs / 86_400) as i64);
        let tod = secs % 86_400;

        DateTime {
            year: year as u16,
            month,
            day,
            hour: (tod / 3600) as u8,
            minute: (tod % 3600 / 60) as u8,
            second: (tod % 60) as u8,
        }
    }
}

/// Convert days since 1970-01-01 to a civil (year, month, day) date.
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

// ---------------------------------------------------------------------------
// Mock data generation
// ---------------------------------------------------------------------------

/// Generates synthetic greenhouse readings that drift over time.
struct MockGreenhouse {
    elapsed_secs: f64,
}

impl MockGreenhouse {
    fn new() -> Self {
        Self { elapsed_secs: 0.0 }
    }

    /// Advance the internal clock and return a new frame.
    fn next_frame(&mut self, dt_secs: f64) -> GreenhouseData {
        self.elapsed_secs += dt_secs;
        let t = self.elapsed_secs;

        // temperatures: 22-24 °C sinusoidal, slightly out of phase per bed
        let temp = |phase: f64| (23.0 + (t / 60.0 + phase).sin()) as f32;
        // humidities: 74-76 % with a different period
        let hum = |phase: f64| (75.0 + (t / 90.0 + phase).cos()) as f32;

        GreenhouseData {
            temp1: temp(0.0),
            temp2: temp(1.0),
            temp3: temp(2.0),
            hum1: hum(0.0),
            hum2: hum(1.0),
            hum3: hum(2.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting serra simulator");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: 1=Idle  2=Config  C=Calibration  Q=Quit");

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Serra Simulator", &output_settings);

    let mut greenhouse = MockGreenhouse::new();
    let mut manager = ScreenManager::new(SimSurface::new(), HostClock, &TOUCH_IRQ);
    manager.submit_data(greenhouse.next_frame(0.0));
    manager.init().expect("initial render failed");

    let started = Instant::now();
    let mut last_frame = Instant::now();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(manager.surface().display());

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::Num1 | Keycode::Kp1 => {
                        info!("Navigating to Idle");
                        manager.set_screen(ScreenId::Idle).unwrap();
                    }
                    Keycode::Num2 | Keycode::Kp2 => {
                        info!("Navigating to Config");
                        manager.set_screen(ScreenId::Config).unwrap();
                    }
                    Keycode::C => {
                        info!("Entering touch calibration");
                        manager.set_screen(ScreenId::Calibration).unwrap();
                    }
                    _ => {}
                },

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    manager.surface_mut().push_touch(point);
                    TOUCH_IRQ.notify();
                }

                _ => {}
            }
        }

        // --- Synthetic greenhouse frames ----------------------------------
        if last_frame.elapsed() >= Duration::from_millis(POLL_INTERVAL_MS) {
            let dt = last_frame.elapsed().as_secs_f64();
            manager.submit_data(greenhouse.next_frame(dt));
            last_frame = Instant::now();
        }

        // --- UI tick ------------------------------------------------------
        let now_ms = started.elapsed().as_millis() as u64;
        manager.tick(now_ms).expect("render failed");

        window.update(manager.surface().display());

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
