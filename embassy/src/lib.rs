#![cfg_attr(not(test), no_std)]

//! Firmware library for a LoRa beacon on the Nucleo-F767ZI.
//!
//! Every [config::TX_INTERVAL_MS] the board draws a batch of synthetic readings,
//! renders them as decimal text, hex encodes that text and hands it to an RN2483
//! radio module as a `radio tx` command over a second USART.
//!
//! Everything except the peripheral bring-up in `uart` is hardware agnostic: the
//! [transmitter::Transmitter] only sees an [embedded_io_async::Write] channel,
//! a [readings::ReadingSource] and an [embedded_hal_async::delay::DelayNs].

pub mod logging;

pub mod config;
pub mod error;

pub mod encoding;
pub mod frame;
pub mod radio;
pub mod readings;
pub mod transmitter;

#[cfg(feature = "stm32")]
pub mod uart;

pub use error::{Error, Result};
