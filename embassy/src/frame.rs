//! Building `radio tx` frames and writing them to the transmit channel.

use core::fmt::Write as _;

use embedded_io_async::{Error as _, Write};
use heapless::String;

use crate::config::{FRAME_CAPACITY, LINE_TERMINATOR, TX_COUNT, TX_PREFIX};
use crate::error::{Error, Result};

/// one complete line as written to the radio, terminator included
pub type Frame = String<FRAME_CAPACITY>;

/// Commands understood by the RN2483 that the beacon sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioCommand<'a> {
    /// hex `payload` sent `count` times in a row
    Transmit { payload: &'a str, count: u16 },
}

impl RadioCommand<'_> {
    /// Renders the command followed by [LINE_TERMINATOR].
    pub fn render<const N: usize>(&self) -> Result<String<N>> {
        let mut line = String::new();
        match self {
            RadioCommand::Transmit { payload, count } => {
                line.push_str(TX_PREFIX).map_err(|_| Error::Capacity)?;
                line.push_str(payload).map_err(|_| Error::Capacity)?;
                write!(line, " {}", count).map_err(|_| Error::Capacity)?;
            }
        }
        line.push_str(LINE_TERMINATOR).map_err(|_| Error::Capacity)?;
        Ok(line)
    }
}

/// `"radio tx " + payload + " 1"` plus the line terminator.
pub fn build_frame(payload: &str) -> Result<Frame> {
    RadioCommand::Transmit {
        payload,
        count: TX_COUNT,
    }
    .render()
}

/// Writes the whole frame, there is no acknowledgment and no retry.
pub async fn send_frame<W: Write>(channel: &mut W, frame: &str) -> Result<()> {
    channel
        .write_all(frame.as_bytes())
        .await
        .map_err(|err| Error::Channel(err.kind()))
}
