//! Uppercase hex rendering of raw bytes, two digits per byte.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::error::{Error, Result};

/// Renders every byte of `input` as two uppercase hex digits, in order.
///
/// The output is always exactly `2 * input.len()` characters long, values below
/// `0x10` are zero padded. Fails with [Error::Capacity] if `N` is too small.
pub fn encode_upper<const N: usize>(input: &[u8]) -> Result<String<N>> {
    let mut out = String::new();
    for byte in input {
        write!(out, "{:02X}", byte).map_err(|_| Error::Capacity)?;
    }
    Ok(out)
}

/// Inverse of [encode_upper], accepts either case.
pub fn decode<const N: usize>(input: &str) -> Result<Vec<u8, N>> {
    if input.len() % 2 != 0 {
        return Err(Error::InvalidHex);
    }

    let mut out = Vec::new();
    out.resize_default(input.len() / 2)
        .map_err(|_| Error::Capacity)?;
    hex::decode_to_slice(input, &mut out).map_err(|_| Error::InvalidHex)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_digits_and_space() {
        let out: String<8> = encode_upper(b"7 3").unwrap();
        assert_eq!(out.as_str(), "372033");
    }

    #[test]
    fn test_encode_empty() {
        let out: String<8> = encode_upper(b"").unwrap();
        assert_eq!(out.as_str(), "");
    }

    #[test]
    fn test_encode_pads_small_bytes() {
        for byte in 0u8..16 {
            let out: String<2> = encode_upper(&[byte]).unwrap();
            assert_eq!(out.len(), 2);
            assert!(out.starts_with('0'));
        }
        let out: String<8> = encode_upper(&[0x0a, 0xff, 0x10]).unwrap();
        assert_eq!(out.as_str(), "0AFF10");
    }

    #[test]
    fn test_encode_is_twice_as_long() {
        let text = "1 2 3 4 5 6 7 8 9 10 255";
        let out: String<64> = encode_upper(text.as_bytes()).unwrap();
        assert_eq!(out.len(), 2 * text.len());
        assert_eq!(out.as_str(), "312032203320342035203620372038203920313020323535");
    }

    #[test]
    fn test_encode_capacity() {
        assert_eq!(encode_upper::<5>(b"abc"), Err(Error::Capacity));
    }

    #[test]
    fn test_decode_recovers_text() {
        let text = "200 1 17 255 3 4 5 6 7 8 9";
        let hex: String<64> = encode_upper(text.as_bytes()).unwrap();
        let bytes: Vec<u8, 32> = decode(&hex).unwrap();
        assert_eq!(core::str::from_utf8(&bytes), Ok(text));
    }

    #[test]
    fn test_decode_lowercase() {
        let bytes: Vec<u8, 4> = decode("0aff").unwrap();
        assert_eq!(bytes.as_slice(), &[0x0a, 0xff]);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert_eq!(decode::<4>("ABC"), Err(Error::InvalidHex));
        assert_eq!(decode::<4>("ZZ"), Err(Error::InvalidHex));
        assert_eq!(decode::<1>("ABCD"), Err(Error::Capacity));
    }
}
