// src/greenhouse.rs
//! Greenhouse telemetry snapshot and radio frame codec.
//!
//! The greenhouse pushes one [`GreenhouseData`] frame per poll; the
//! console pushes a [`GreenhouseConfig`] frame back when the user changes
//! something. Frames are postcard-encoded structs; the radio layer treats
//! them as opaque payloads.

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Most recent sensor readings, replaced wholesale on every poll.
///
/// Consumers always see a fully-populated snapshot; there are no partial
/// updates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GreenhouseData {
    pub temp1: f32,
    pub temp2: f32,
    pub temp3: f32,
    pub hum1: f32,
    pub hum2: f32,
    pub hum3: f32,
}

/// Settings pushed back to the greenhouse when modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GreenhouseConfig {
    /// Force the vents open regardless of the greenhouse's own logic.
    pub vent_override: bool,
}

/// Maximum encoded size of any link frame.
pub const LINK_FRAME_MAX: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("frame does not fit the transmit buffer")]
    Overflow,
    #[error("received frame is truncated or malformed")]
    Malformed,
}

/// Encode a frame into `buf`, returning the used prefix.
pub fn encode_frame<'a, T: Serialize>(
    frame: &T,
    buf: &'a mut [u8],
) -> Result<&'a mut [u8], LinkError> {
    postcard::to_slice(frame, buf).map_err(|_| LinkError::Overflow)
}

/// Decode a frame received from the radio.
pub fn decode_frame<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, LinkError> {
    postcard::from_bytes(bytes).map_err(|_| LinkError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GreenhouseData {
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
    fn data_frame_fits_the_link_buffer() {
        let mut buf = [0u8; LINK_FRAME_MAX];
        let used = encode_frame(&sample(), &mut buf).unwrap();
        assert!(!used.is_empty());
        assert!(used.len() <= LINK_FRAME_MAX);
    }

    #[test]
    fn data_frame_survives_the_link() {
        let mut buf = [0u8; LINK_FRAME_MAX];
        let used = encode_frame(&sample(), &mut buf).unwrap();
        let decoded: GreenhouseData = decode_frame(used).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let mut buf = [0u8; LINK_FRAME_MAX];
        let used = encode_frame(&sample(), &mut buf).unwrap();
        let cut = used.len() / 2;
        let err = decode_frame::<GreenhouseData>(&used[..cut]).unwrap_err();
        assert_eq!(err, LinkError::Malformed);
    }

    #[test]
    fn config_frame_round_trips() {
        let config = GreenhouseConfig {
            vent_override: true,
        };
        let mut buf = [0u8; LINK_FRAME_MAX];
        let used = encode_frame(&config, &mut buf).unwrap();
        let decoded: GreenhouseConfig = decode_frame(used).unwrap();
        assert_eq!(decoded, config);
    }
}
