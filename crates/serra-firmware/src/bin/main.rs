#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use core::cell::RefCell;

use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::timer::timg::TimerGroup;
use log::{error, info};
use static_cell::StaticCell;

// Display-LCD panel specific imports
use embedded_hal_bus::spi::{ExclusiveDevice, RefCellDevice};
use mipidsi::interface::SpiInterface;
use mipidsi::{models::ILI9486Rgb565, Builder as MipidsiBuilder};

use serra_core::config::{POLL_INTERVAL_MS, UI_TICK_MS};
use serra_core::screens::ScreenManager;
use serra_core::touch::TouchIrqFlag;
use serra_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use serra_firmware::ds3231::Ds3231;
use serra_firmware::link::{Cc1101, DATA_CHANNEL};
use serra_firmware::surface::{TftSurface, DEFAULT_CALIBRATION};
use serra_firmware::xpt2046::Xpt2046;

/// Raw press edges from the PENIRQ line, consumed by the UI tick.
static TOUCH_IRQ: TouchIrqFlag = TouchIrqFlag::new();

type RadioSpi =
    ExclusiveDevice<Spi<'static, esp_hal::Async>, Output<'static>, embassy_time::Delay>;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    error!("PANIC: {}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// Forward PENIRQ falling edges to the shared press flag.
///
/// Nothing else is allowed here: no drawing, no allocation, no
/// state-machine calls.
#[embassy_executor::task]
async fn touch_irq_task(mut pin: Input<'static>) {
    loop {
        pin.wait_for_falling_edge().await;
        TOUCH_IRQ.notify();
    }
}

/// Poll the greenhouse over the radio and forward fresh frames to the UI.
#[embassy_executor::task]
async fn link_task(spi: RadioSpi) {
    let mut radio = Cc1101::new(spi);
    if let Err(e) = radio.init().await {
        error!("radio init failed: {:?}", e);
    }

    loop {
        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
        match radio.service().await {
            Ok(Some(frame)) => {
                // the UI keeps the latest frame; drop on backpressure
                DATA_CHANNEL.try_send(frame).ok();
            }
            Ok(None) => {}
            Err(e) => error!("radio poll failed: {:?}", e),
        }
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    // Configure and initialize the display + touch pair.

    // 1. The TFT and the XPT2046 share the SPI2 bus with separate CS lines
    let spi_bus = Spi::new(peripherals.SPI2, SpiConfig::default())
        .unwrap()
        .with_sck(peripherals.GPIO36)
        .with_mosi(peripherals.GPIO37)
        .with_miso(peripherals.GPIO35);
    static SPI2_BUS: StaticCell<RefCell<Spi<'static, esp_hal::Blocking>>> = StaticCell::new();
    let spi_bus = SPI2_BUS.init(RefCell::new(spi_bus));

    let tft_cs = Output::new(peripherals.GPIO34, Level::High, OutputConfig::default());
    let touch_cs = Output::new(peripherals.GPIO21, Level::High, OutputConfig::default());
    let dc = Output::new(peripherals.GPIO33, Level::Low, OutputConfig::default());

    let tft_spi = RefCellDevice::new_no_delay(spi_bus, tft_cs).unwrap();
    let touch_spi = RefCellDevice::new_no_delay(spi_bus, touch_cs).unwrap();

    // 2. A buffer for SPI batching (larger = faster, uses more RAM)
    static SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();
    let spi_buffer = SPI_BUFFER.init([0u8; 512]);

    // 3. Build and initialize the display driver
    let di = SpiInterface::new(tft_spi, dc, spi_buffer);
    let display = MipidsiBuilder::new(ILI9486Rgb565, di)
        .display_size(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
        .init(&mut embassy_time::Delay)
        .expect("Failed to initialize display");

    info!("Display initialized!");

    // 4. PENIRQ falling edge -> press flag
    let penirq = Input::new(
        peripherals.GPIO18,
        InputConfig::default().with_pull(Pull::Up),
    );
    spawner.spawn(touch_irq_task(penirq)).unwrap();

    // DS3231 RTC on I2C0
    let i2c = I2c::new(peripherals.I2C0, I2cConfig::default())
        .unwrap()
        .with_sda(peripherals.GPIO8)
        .with_scl(peripherals.GPIO9);
    let clock = Ds3231::new(i2c);

    // CC1101 radio on its own SPI3 bus
    let radio_bus = Spi::new(peripherals.SPI3, SpiConfig::default())
        .unwrap()
        .with_sck(peripherals.GPIO12)
        .with_mosi(peripherals.GPIO11)
        .with_miso(peripherals.GPIO13)
        .into_async();
    let radio_cs = Output::new(peripherals.GPIO10, Level::High, OutputConfig::default());
    let radio_spi = ExclusiveDevice::new(radio_bus, radio_cs, embassy_time::Delay).unwrap();
    spawner.spawn(link_task(radio_spi)).unwrap();

    let touch = Xpt2046::new(touch_spi);
    let surface = TftSurface::new(display, touch, DEFAULT_CALIBRATION);
    let mut manager = ScreenManager::new(surface, clock, &TOUCH_IRQ);

    #[cfg(feature = "touch-calibration")]
    {
        use serra_core::screens::ScreenId;
        manager
            .set_screen(ScreenId::Calibration)
            .expect("calibration render failed");
    }

    manager.init().expect("initial render failed");
    info!("setup completed");

    loop {
        if let Ok(frame) = DATA_CHANNEL.try_receive() {
            manager.submit_data(frame);
        }
        if let Err(e) = manager.tick(Instant::now().as_millis()) {
            error!("display error: {:?}", e);
        }
        Timer::after(Duration::from_millis(UI_TICK_MS)).await;
    }
}
