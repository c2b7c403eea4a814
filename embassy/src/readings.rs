//! Synthetic sensor readings and their decimal text form.
//!
//! A [ReadingsBatch] is drawn from a [ReadingSource] once per loop iteration and
//! rendered with [ReadingsBatch::join] as `"12 7 255 ..."`. [ReadingsBatch::parse]
//! is the inverse used when a received frame is decoded.

use core::fmt::Write;

use heapless::String;
use rand::{Rng, RngCore};

use crate::config::{BATCH_TEXT_CAPACITY, READING_COUNT, READING_MAX, READING_MIN};
use crate::error::{Error, Result};

/// one synthetic sample, always in `[1, 256)`
pub type Reading = u8;

pub type BatchText = String<BATCH_TEXT_CAPACITY>;

/// Source of readings, injected so that a fixed sequence can replace the RNG.
pub trait ReadingSource {
    fn next_reading(&mut self) -> Reading;
}

/// Uniform readings in `READING_MIN..=READING_MAX` drawn from any [RngCore],
/// on the board this is the STM32 true random number generator.
pub struct RandomReadings<R> {
    rng: R,
}

impl<R: RngCore> RandomReadings<R> {
    pub fn new(rng: R) -> Self {
        RandomReadings { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> ReadingSource for RandomReadings<R> {
    fn next_reading(&mut self) -> Reading {
        self.rng.gen_range(READING_MIN..=READING_MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadingsBatch {
    readings: [Reading; READING_COUNT],
}

impl ReadingsBatch {
    /// Draws [READING_COUNT] readings, kept in generation order.
    pub fn generate<S: ReadingSource + ?Sized>(source: &mut S) -> Self {
        let mut readings = [READING_MIN; READING_COUNT];
        for reading in readings.iter_mut() {
            *reading = source.next_reading();
        }
        ReadingsBatch { readings }
    }

    pub fn from_readings(readings: [Reading; READING_COUNT]) -> Result<Self> {
        if readings.iter().any(|r| *r < READING_MIN) {
            return Err(Error::InvalidReading);
        }
        Ok(ReadingsBatch { readings })
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn join(&self) -> Result<BatchText> {
        join_decimal(&self.readings)
    }

    /// Parses whitespace separated decimal fields, exactly [READING_COUNT] of them.
    pub fn parse(text: &str) -> Result<Self> {
        let mut readings = [READING_MIN; READING_COUNT];
        let mut count = 0;

        for field in text.split_whitespace() {
            if count == READING_COUNT {
                return Err(Error::MalformedBatch);
            }
            let value: u16 = field.parse().map_err(|_| Error::InvalidReading)?;
            readings[count] = Reading::try_from(value)
                .ok()
                .filter(|r| *r >= READING_MIN)
                .ok_or(Error::InvalidReading)?;
            count += 1;
        }

        if count != READING_COUNT {
            return Err(Error::MalformedBatch);
        }
        Ok(ReadingsBatch { readings })
    }
}

/// Renders `values` in their shortest decimal form joined by single spaces.
pub fn join_decimal<const N: usize>(values: &[Reading]) -> Result<String<N>> {
    let mut text = String::new();
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            text.push(' ').map_err(|_| Error::Capacity)?;
        }
        write!(text, "{}", value).map_err(|_| Error::Capacity)?;
    }
    Ok(text)
}
