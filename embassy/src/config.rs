//! Compile-time parameters of the beacon.
//!
//! There is no runtime configuration surface, pins, bit rates and the shape of
//! a batch are fixed when the firmware is built.

use crate::readings::Reading;

/// number of readings in every transmitted batch
pub const READING_COUNT: usize = 11;

/// smallest reading that may be generated
pub const READING_MIN: Reading = 1;

/// largest reading that may be generated, inclusive
pub const READING_MAX: Reading = 255;

/// pause at the top of every loop iteration
pub const TX_INTERVAL_MS: u32 = 1000;

/// RN2483 default bit rate, framed 8N1
pub const RADIO_BAUD: u32 = 57_600;

/// ST-Link virtual COM port
pub const DEBUG_BAUD: u32 = 115_200;

pub const TX_PREFIX: &str = "radio tx ";

/// how often the radio repeats a single `radio tx`
pub const TX_COUNT: u16 = 1;

/// the RN2483 only accepts commands terminated by CR LF
pub const LINE_TERMINATOR: &str = "\r\n";

/// 3 digits per reading plus the separating spaces
pub const BATCH_TEXT_CAPACITY: usize = READING_COUNT * 3 + (READING_COUNT - 1);

pub const PAYLOAD_CAPACITY: usize = BATCH_TEXT_CAPACITY * 2;

pub const FRAME_CAPACITY: usize = 128;

/// Runtime view of the loop parameters handed to a
/// [Transmitter](crate::transmitter::Transmitter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitterConfig {
    /// delay before each frame in ms
    pub interval_ms: u32,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        TransmitterConfig {
            interval_ms: TX_INTERVAL_MS,
        }
    }
}
