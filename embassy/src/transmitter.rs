//! The beacon loop: wait, generate, encode, transmit, forever.
//!
//! [Transmitter] owns its channel, reading source and delay so that any of them
//! can be replaced, on the host the whole loop runs against a mock UART and a
//! delay that returns immediately.

use embedded_hal_async::delay::DelayNs;
use embedded_io_async::Write;
use heapless::String;

use crate::config::{TransmitterConfig, PAYLOAD_CAPACITY};
use crate::encoding::encode_upper;
use crate::error::Result;
use crate::frame::{build_frame, send_frame, Frame};
use crate::readings::{ReadingSource, ReadingsBatch};
use crate::{log_debug, log_info, log_warn};

/// Where the loop currently is, cycled in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitterState {
    /// next step waits out the interval
    Idle,
    /// next step draws a batch
    Generating,
    /// next step renders the batch into a frame
    Encoding,
    /// next step writes the frame
    Transmitting,
}

/// A [TransmitterState] together with what the next step works on.
enum Stage {
    Idle,
    Generating,
    Encoding(ReadingsBatch),
    Transmitting(Frame),
}

pub struct Transmitter<W, S, D> {
    channel: W,
    source: S,
    delay: D,
    config: TransmitterConfig,
    stage: Stage,
    frames_sent: u32,
}

impl<W, S, D> Transmitter<W, S, D>
where
    W: Write,
    S: ReadingSource,
    D: DelayNs,
{
    pub fn new(channel: W, source: S, delay: D, config: TransmitterConfig) -> Self {
        Transmitter {
            channel,
            source,
            delay,
            config,
            stage: Stage::Idle,
            frames_sent: 0,
        }
    }

    pub fn state(&self) -> TransmitterState {
        match self.stage {
            Stage::Idle => TransmitterState::Idle,
            Stage::Generating => TransmitterState::Generating,
            Stage::Encoding(_) => TransmitterState::Encoding,
            Stage::Transmitting(_) => TransmitterState::Transmitting,
        }
    }

    /// number of frames written without a channel error
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    pub fn channel(&self) -> &W {
        &self.channel
    }

    pub fn into_parts(self) -> (W, S, D) {
        (self.channel, self.source, self.delay)
    }

    /// Performs the work of the current state and moves on to the next one.
    ///
    /// Returns the frame once it has been written. A failing step drops the
    /// batch in flight and leaves the transmitter [TransmitterState::Idle].
    pub async fn step(&mut self) -> Result<Option<Frame>> {
        match core::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Idle => {
                self.delay.delay_ms(self.config.interval_ms).await;
                self.stage = Stage::Generating;
                Ok(None)
            }
            Stage::Generating => {
                let batch = ReadingsBatch::generate(&mut self.source);
                self.stage = Stage::Encoding(batch);
                Ok(None)
            }
            Stage::Encoding(batch) => {
                let text = batch.join()?;
                let payload: String<PAYLOAD_CAPACITY> = encode_upper(text.as_bytes())?;
                let frame = build_frame(&payload)?;
                log_debug!("readings: {}", text.as_str());
                self.stage = Stage::Transmitting(frame);
                Ok(None)
            }
            Stage::Transmitting(frame) => {
                send_frame(&mut self.channel, &frame).await?;
                self.frames_sent = self.frames_sent.wrapping_add(1);
                log_debug!("frame {} sent", self.frames_sent);
                Ok(Some(frame))
            }
        }
    }

    /// Steps until a frame has been written and returns it.
    ///
    /// The state is back at [TransmitterState::Idle] afterwards, whether the
    /// iteration succeeded or not.
    pub async fn cycle(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = self.step().await? {
                return Ok(frame);
            }
        }
    }

    /// Never returns, failed iterations are logged and the loop goes on.
    pub async fn run(&mut self) {
        log_info!("radio beacon started, one frame every {} ms", self.config.interval_ms);
        loop {
            if let Err(err) = self.cycle().await {
                log_warn!("frame dropped: {:?}", err);
            }
        }
    }
}
