// src/link.rs
//! CC1101 packet radio link to the greenhouse.
//!
//! The greenhouse transmits one postcard-encoded [`GreenhouseData`] frame
//! per request; configuration changes are pushed back the same way. Only
//! the FIFO/strobe plumbing lives here: protocol correctness is the
//! greenhouse's problem, this side just ferries payload bytes.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_hal_async::spi::SpiDevice;
use log::{debug, warn};
use serra_core::greenhouse::{
    decode_frame, encode_frame, GreenhouseConfig, GreenhouseData, LINK_FRAME_MAX,
};

/// Frames received from the greenhouse, consumed by the UI tick loop.
pub static DATA_CHANNEL: Channel<CriticalSectionRawMutex, GreenhouseData, 4> = Channel::new();

/// Config frames queued for uplink when the user modifies a setting.
pub static CONFIG_CHANNEL: Channel<CriticalSectionRawMutex, GreenhouseConfig, 2> = Channel::new();

// Command strobes
const SRES: u8 = 0x30;
const SRX: u8 = 0x34;
const STX: u8 = 0x35;
const SFRX: u8 = 0x3A;
const SFTX: u8 = 0x3B;

// Status/FIFO registers
const RXBYTES: u8 = 0x3B;
const FIFO: u8 = 0x3F;

const BURST: u8 = 0x40;
const READ: u8 = 0x80;

/// Errors that can occur talking to the radio.
#[derive(Debug)]
pub enum Error<E> {
    /// SPI communication error
    Spi(E),
    /// The received payload did not decode as a frame
    BadFrame,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Self::Spi(e)
    }
}

pub struct Cc1101<SPI> {
    spi: SPI,
}

impl<SPI> Cc1101<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    async fn strobe(&mut self, strobe: u8) -> Result<(), Error<SPI::Error>> {
        self.spi.write(&[strobe]).await?;
        Ok(())
    }

    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error<SPI::Error>> {
        let mut buf = [reg | READ | BURST, 0];
        self.spi.transfer_in_place(&mut buf).await?;
        Ok(buf[1])
    }

    /// Reset the radio and enter receive mode.
    pub async fn init(&mut self) -> Result<(), Error<SPI::Error>> {
        self.strobe(SRES).await?;
        self.strobe(SFRX).await?;
        self.strobe(SRX).await?;
        Ok(())
    }

    /// Drain the RX FIFO and decode a data frame, if one arrived since
    /// the last poll.
    pub async fn poll(&mut self) -> Result<Option<GreenhouseData>, Error<SPI::Error>> {
        let available = (self.read_reg(RXBYTES).await? & 0x7F) as usize;
        if available == 0 {
            return Ok(None);
        }

        let len = available.min(LINK_FRAME_MAX);
        let mut buf = [0u8; LINK_FRAME_MAX + 1];
        buf[0] = FIFO | READ | BURST;
        self.spi.transfer_in_place(&mut buf[..len + 1]).await?;

        // back to receive for the next frame
        self.strobe(SFRX).await?;
        self.strobe(SRX).await?;

        let frame = decode_frame(&buf[1..len + 1]).map_err(|_| Error::BadFrame)?;
        Ok(Some(frame))
    }

    /// Transmit a config frame, then return to receive mode.
    pub async fn push_config(
        &mut self,
        config: &GreenhouseConfig,
    ) -> Result<(), Error<SPI::Error>> {
        let mut buf = [0u8; LINK_FRAME_MAX + 1];
        buf[0] = FIFO | BURST;
        let used = encode_frame(config, &mut buf[1..])
            .map_err(|_| Error::BadFrame)?
            .len();

        self.spi.write(&buf[..used + 1]).await?;
        self.strobe(STX).await?;
        self.strobe(SFTX).await?;
        self.strobe(SRX).await?;
        Ok(())
    }

    /// One pass of the link tick: push any pending config change, then
    /// poll for a fresh data frame.
    pub async fn service(&mut self) -> Result<Option<GreenhouseData>, Error<SPI::Error>> {
        if let Ok(config) = CONFIG_CHANNEL.try_receive() {
            debug!("pushing config frame: {:?}", config);
            self.push_config(&config).await?;
        }

        debug!("polling for new data");
        match self.poll().await {
            Ok(frame) => Ok(frame),
            Err(Error::BadFrame) => {
                warn!("discarding malformed frame");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
