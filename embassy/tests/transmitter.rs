use core::convert::Infallible;

use embassy_futures::block_on;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{ErrorType, Write};
use rand::rngs::mock::StepRng;

use nucleo_f767zi::config::{TransmitterConfig, READING_COUNT};
use nucleo_f767zi::encoding::decode;
use nucleo_f767zi::radio::decode_received_line;
use nucleo_f767zi::readings::{RandomReadings, Reading, ReadingSource};
use nucleo_f767zi::transmitter::{Transmitter, TransmitterState};

#[derive(Default)]
struct MockUart {
    tx: Vec<u8>,
}

impl MockUart {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.tx.clone())
            .unwrap()
            .split_terminator("\r\n")
            .map(str::to_owned)
            .collect()
    }
}

impl ErrorType for MockUart {
    type Error = Infallible;
}

impl Write for MockUart {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
        self.tx.extend_from_slice(buf);
        Ok(buf.len())
    }
}

#[derive(Default)]
struct MockDelay {
    elapsed_ns: u64,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

/// Hands out `values` in order, starting over at the end.
struct FixedSequence {
    values: Vec<Reading>,
    pos: usize,
}

impl FixedSequence {
    fn new(values: &[Reading]) -> Self {
        FixedSequence {
            values: values.to_vec(),
            pos: 0,
        }
    }
}

impl ReadingSource for FixedSequence {
    fn next_reading(&mut self) -> Reading {
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}

#[test]
fn test_fixed_sequence_gives_exact_frames() {
    let source = FixedSequence::new(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 255, 42, 100, 200, 16]);
    let mut transmitter = Transmitter::new(
        MockUart::default(),
        source,
        MockDelay::default(),
        TransmitterConfig { interval_ms: 250 },
    );

    block_on(transmitter.cycle()).unwrap();
    block_on(transmitter.cycle()).unwrap();

    let lines = transmitter.channel().lines();
    assert_eq!(
        lines,
        vec![
            "radio tx 312032203320342035203620372038203920313020323535 1",
            // 42 100 200 16 1 2 3 4 5 6 7
            "radio tx 343220313030203230302031362031203220332034203520362037 1",
        ]
    );
    assert_eq!(transmitter.frames_sent(), 2);
    assert_eq!(transmitter.state(), TransmitterState::Idle);

    let (_, source, delay) = transmitter.into_parts();
    assert_eq!(source.pos, 2 * READING_COUNT);
    assert_eq!(delay.elapsed_ns, 2 * 250 * 1_000_000);
}

#[test]
fn test_random_frames_are_well_formed() {
    let source = RandomReadings::new(StepRng::new(1, 0x5851_F42D_4C95_7F2D));
    let mut transmitter = Transmitter::new(
        MockUart::default(),
        source,
        MockDelay::default(),
        TransmitterConfig::default(),
    );

    for _ in 0..50 {
        block_on(transmitter.cycle()).unwrap();
    }

    let lines = transmitter.channel().lines();
    assert_eq!(lines.len(), 50);

    for line in lines {
        let payload = line
            .strip_prefix("radio tx ")
            .and_then(|rest| rest.strip_suffix(" 1"))
            .unwrap();

        assert!(payload
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

        let bytes: heapless::Vec<u8, 64> = decode(payload).unwrap();
        let text = core::str::from_utf8(&bytes).unwrap();
        assert_eq!(payload.len(), 2 * text.len());
        assert_eq!(text.matches(' ').count(), READING_COUNT - 1);

        let values: Vec<u16> = text.split(' ').map(|v| v.parse().unwrap()).collect();
        assert_eq!(values.len(), READING_COUNT);
        assert!(values.iter().all(|v| (1..256).contains(v)));

        // what the receiving side gets back out of the air
        let received = format!("radio_rx  {}", payload);
        let batch = decode_received_line(&received).unwrap();
        let expected: Vec<Reading> = values.iter().map(|v| *v as Reading).collect();
        assert_eq!(batch.readings(), expected.as_slice());
    }
}
