//! USART bring-up for the Nucleo-F767ZI and the radio reply reader.

use embassy_stm32::mode::Async;
use embassy_stm32::usart::{self, Config, DataBits, Parity, StopBits, UartRx};
use embedded_io_async::Write;

use crate::config::{DEBUG_BAUD, RADIO_BAUD};
use crate::radio::{echo_reply, RadioReply};
use crate::{log_debug, log_info, log_warn};

/// Developer console on USART3, routed to the ST-Link virtual COM port.
#[macro_export]
macro_rules! setup_usart_developer_console {
    ($p:ident, $irqs:ident) => {
        ::embassy_stm32::usart::Uart::new(
            $p.USART3,
            $p.PD9, // rx
            $p.PD8, // tx
            $irqs,
            $p.DMA1_CH4, // tx
            $p.DMA1_CH1, // rx
            $crate::uart::developer_console_config(),
        ).expect("USART generation failed")
    }
}

/// RN2483 radio module on USART2, pins D52 (rx) and D53 (tx) of the Zio connector.
#[macro_export]
macro_rules! setup_usart_radio {
    ($p:ident, $irqs:ident) => {
        ::embassy_stm32::usart::Uart::new(
            $p.USART2,
            $p.PD6, // rx
            $p.PD5, // tx
            $irqs,
            $p.DMA1_CH6, // tx
            $p.DMA1_CH5, // rx
            $crate::uart::radio_config(),
        ).expect("USART generation failed")
    }
}

pub fn developer_console_config() -> Config {
    let mut config = Config::default();
    config.baudrate = DEBUG_BAUD;
    config
}

/// 8 data bits, no parity, 1 stop bit
pub fn radio_config() -> Config {
    let mut config = Config::default();
    config.baudrate = RADIO_BAUD;
    config.data_bits = DataBits::DataBits8;
    config.parity = Parity::ParityNone;
    config.stop_bits = StopBits::STOP1;
    config
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadLineError {
    Usart(usart::Error),
    Utf8,
}

/// Reads until the line goes idle and returns the received text, trimmed.
pub async fn read_until_idle_as_utf8<'a, const N: usize>(
    usart_rx: &mut UartRx<'static, Async>,
    buf: &'a mut [u8; N],
) -> Result<&'a str, ReadLineError> {
    let len = usart_rx
        .read_until_idle(buf)
        .await
        .map_err(ReadLineError::Usart)?;
    core::str::from_utf8(&buf[..len])
        .map(str::trim)
        .map_err(|_| ReadLineError::Utf8)
}

/// Logs everything the radio module answers and mirrors it onto the developer
/// console, the beacon never reacts to it.
pub async fn log_radio_replies<W: Write>(mut usart_rx: UartRx<'static, Async>, mut console: W) {
    let mut buf: [u8; 64] = [0; 64];
    loop {
        let msg = match read_until_idle_as_utf8(&mut usart_rx, &mut buf).await {
            Ok(msg) => msg,
            Err(err) => {
                log_warn!("radio rx ignored: {:?}", err);
                continue;
            }
        };

        for line in msg.lines().filter(|line| !line.trim().is_empty()) {
            if let Err(err) = echo_reply(&mut console, line).await {
                log_warn!("developer console: {:?}", err);
            }

            match RadioReply::parse(line) {
                Some(reply @ (RadioReply::RadioErr | RadioReply::InvalidParam | RadioReply::Busy)) => {
                    log_warn!("radio: {:?}", reply)
                }
                Some(reply) => log_info!("radio: {:?}", reply),
                None => log_debug!("radio: {}", line),
            }
        }
    }
}
