//! Replies of the RN2483 radio module and decoding of received frames.
//!
//! The beacon never acts on a reply, they are only logged and mirrored onto the
//! developer console with [echo_reply]. [decode_received_line]
//! is what a receiving module's host does with a `radio_rx` line: strip the
//! keyword, hex decode the data and split the readings back out.

use embedded_io_async::{Error as _, Write};

use crate::config::{BATCH_TEXT_CAPACITY, LINE_TERMINATOR, PAYLOAD_CAPACITY};
use crate::encoding;
use crate::error::{Error, Result};
use crate::readings::ReadingsBatch;

/// A line received from the radio module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioReply<'a> {
    /// command accepted
    Ok,
    InvalidParam,
    Busy,
    /// transmission finished
    TxOk,
    /// transmission or reception failed
    RadioErr,
    /// hex data received over the air
    Rx(&'a str),
}

impl<'a> RadioReply<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next()?;

        let reply = match keyword {
            "ok" => RadioReply::Ok,
            "invalid_param" => RadioReply::InvalidParam,
            "busy" => RadioReply::Busy,
            "radio_tx_ok" => RadioReply::TxOk,
            "radio_err" => RadioReply::RadioErr,
            "radio_rx" => RadioReply::Rx(tokens.next()?),
            _ => return None,
        };

        match tokens.next() {
            Some(_) => None,
            None => Some(reply),
        }
    }
}

/// Writes `radio: <line>` to the developer console.
pub async fn echo_reply<W: Write>(console: &mut W, line: &str) -> Result<()> {
    for part in ["radio: ", line, LINE_TERMINATOR] {
        console
            .write_all(part.as_bytes())
            .await
            .map_err(|err| Error::Channel(err.kind()))?;
    }
    Ok(())
}

/// Decodes a `radio_rx <hex>` line into the batch that was transmitted.
pub fn decode_received_line(line: &str) -> Result<ReadingsBatch> {
    let data = match RadioReply::parse(line) {
        Some(RadioReply::Rx(data)) => data,
        _ => return Err(Error::MalformedLine),
    };

    if data.len() > PAYLOAD_CAPACITY {
        return Err(Error::MalformedBatch);
    }
    let bytes = encoding::decode::<BATCH_TEXT_CAPACITY>(data)?;
    let text = core::str::from_utf8(&bytes).map_err(|_| Error::InvalidText)?;
    ReadingsBatch::parse(text)
}
