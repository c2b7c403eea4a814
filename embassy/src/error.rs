//! Error type shared by every module of the beacon.

use core::fmt;

use embedded_io_async::ErrorKind;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// a fixed size buffer was too small for the rendered text
    Capacity,

    /// writing to the transmit channel failed
    Channel(ErrorKind),

    /// odd length or a character outside `0-9A-Fa-f`
    InvalidHex,

    /// decoded bytes are not valid utf-8
    InvalidText,

    /// a radio line did not have the expected `radio_rx <hex>` shape
    MalformedLine,

    /// a batch did not hold exactly [READING_COUNT](crate::config::READING_COUNT) fields
    MalformedBatch,

    /// a field was not an integer in `[1, 256)`
    InvalidReading,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Capacity => write!(f, "buffer capacity exceeded"),
            Error::Channel(kind) => write!(f, "transmit channel write failed: {:?}", kind),
            Error::InvalidHex => write!(f, "invalid hex payload"),
            Error::InvalidText => write!(f, "payload is not valid utf-8"),
            Error::MalformedLine => write!(f, "line carries no radio data"),
            Error::MalformedBatch => write!(f, "wrong number of readings in batch"),
            Error::InvalidReading => write!(f, "reading out of range"),
        }
    }
}
