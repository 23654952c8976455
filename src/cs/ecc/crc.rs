//! CRC (Cyclic Redundancy Check) by binary polynomial long division.
//!
//! The data is treated as the coefficients of a binary polynomial, padded
//! with `generator.len() - 1` zero bits and divided modulo 2 by the
//! generator. The remainder is the check value appended to the frame.
//!
//! Unlike a table-driven CRC, this engine reproduces the pencil-and-paper
//! process: a register is refilled from the dividend just far enough to reach
//! the generator width, then XORed with the generator. Every subtraction is
//! recorded as aligned trace lines so the division can be shown step by step.
//!
//! # Examples
//!
//! ```
//! use channel_codes::cs::ecc::{BitSequence, CrcEngine};
//!
//! let engine = CrcEngine::new("1011".parse().unwrap()).unwrap();
//! let data: BitSequence = "100110101111010010001".parse().unwrap();
//!
//! let outcome = engine.compute(&data);
//! assert_eq!(outcome.remainder_text(), "101");
//!
//! let frame = engine.frame(&data);
//! assert!(engine.verify(&frame));
//! ```

use crate::cs::ecc::sequence::{bits_to_string, BitSequence};
use crate::cs::ecc::Result;
use crate::cs::error::Error;
use bitvec::prelude::*;
use log::debug;

/// Widest generator the division register can hold
pub const MAX_GENERATOR_BITS: usize = 64;

/// Partial remainder during the division.
///
/// `Empty` holds the value zero; the next step then pulls a full generator
/// width. `Holding` pulls only what is missing up to that width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Register {
    Empty,
    Holding(u64),
}

impl Register {
    fn from_value(value: u64) -> Self {
        if value == 0 {
            Register::Empty
        } else {
            Register::Holding(value)
        }
    }

    fn value(self) -> u64 {
        match self {
            Register::Empty => 0,
            Register::Holding(value) => value,
        }
    }
}

/// Number of significant bits in `value`
fn bit_length(value: u64) -> usize {
    (u64::BITS - value.leading_zeros()) as usize
}

/// Result of one CRC computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrcOutcome {
    /// Final remainder, zero-padded to the number of check bits
    remainder: BitVec<u8, Msb0>,
    /// Display lines of the long division
    trace: Vec<String>,
}

impl CrcOutcome {
    /// Check bits, always `generator.len() - 1` wide
    pub fn remainder(&self) -> &BitSlice<u8, Msb0> {
        &self.remainder
    }

    pub fn remainder_text(&self) -> String {
        bits_to_string(&self.remainder)
    }

    /// True when the divided stream was a multiple of the generator
    pub fn is_zero(&self) -> bool {
        self.remainder.not_any()
    }

    /// Aligned lines of the long division, for display only
    pub fn trace(&self) -> &[String] {
        &self.trace
    }
}

/// Long-division CRC over a fixed generator polynomial.
#[derive(Debug, Clone)]
pub struct CrcEngine {
    /// Generator polynomial as given
    generator: BitSequence,
    /// Generator polynomial as an integer, XORed into the register
    divisor: u64,
}

impl CrcEngine {
    /// Creates an engine for `generator`.
    ///
    /// The generator needs at least two bits and a leading 1, and must fit
    /// the 64-bit register.
    pub fn new(generator: BitSequence) -> Result<Self> {
        if generator.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "generator must have at least 2 bits, got {}",
                generator.len()
            )));
        }
        if generator.len() > MAX_GENERATOR_BITS {
            return Err(Error::InputTooLarge {
                length: generator.len(),
                max_length: MAX_GENERATOR_BITS,
            });
        }
        if !generator.bits()[0] {
            return Err(Error::InvalidInput(format!(
                "generator {} must start with 1",
                generator
            )));
        }

        let divisor = generator.bits().load_be::<u64>();
        Ok(CrcEngine { generator, divisor })
    }

    pub fn generator(&self) -> &BitSequence {
        &self.generator
    }

    /// Number of check bits appended to each frame
    pub fn check_bits(&self) -> usize {
        self.width() - 1
    }

    fn width(&self) -> usize {
        self.generator.len()
    }

    /// Divides `data` padded with zero check bits and returns the remainder.
    pub fn compute(&self, data: &BitSequence) -> CrcOutcome {
        let width = self.width();
        let mut stream = data.bits().to_bitvec();
        stream.resize(stream.len() + self.check_bits(), false);

        let mut trace = Vec::new();
        push_line(&mut trace, format!("{}|{}", bits_to_string(&stream), self.generator));

        let mut register = Register::Empty;
        let mut consumed = 0;

        while consumed < stream.len() {
            let wanted = match register {
                Register::Empty => width,
                Register::Holding(value) => width - bit_length(value),
            };
            let end = (consumed + wanted).min(stream.len());
            let chunk = &stream[consumed..end];
            let value = register
                .value()
                .checked_shl(chunk.len() as u32)
                .unwrap_or(0)
                | chunk.load_be::<u64>();
            consumed = end;

            // A register short of full width only happens after leading
            // zeros or at the end of the stream; neither is subtracted.
            if bit_length(value) < width {
                register = Register::from_value(value);
                continue;
            }

            let indent = " ".repeat(consumed - width);
            if consumed > width {
                push_line(&mut trace, format!("{}{:b}", indent, value));
            }
            push_line(&mut trace, format!("{}{}", indent, self.generator));
            push_line(&mut trace, format!("{}{}", indent, "_".repeat(width)));

            register = Register::from_value(value ^ self.divisor);
        }

        let mut remainder = bitvec![u8, Msb0; 0; self.check_bits()];
        remainder.store_be(register.value());

        push_line(
            &mut trace,
            format!(
                "{}{}",
                " ".repeat(stream.len() - remainder.len()),
                bits_to_string(&remainder)
            ),
        );

        CrcOutcome { remainder, trace }
    }

    /// Returns `data` followed by its check bits, ready for transmission
    pub fn frame(&self, data: &BitSequence) -> BitSequence {
        data.concat(self.compute(data).remainder())
    }

    /// Checks a received frame; true when it divides with no remainder
    pub fn verify(&self, frame: &BitSequence) -> bool {
        self.compute(frame).is_zero()
    }
}

fn push_line(trace: &mut Vec<String>, line: String) {
    debug!("crc: {}", line);
    trace.push(line);
}

/// Computes the CRC remainder of `data` for `generator`, both as bit strings.
///
/// Returns the remainder and the aligned long-division trace.
pub fn crc_remainder(data: &str, generator: &str) -> Result<(String, Vec<String>)> {
    let engine = CrcEngine::new(generator.parse()?)?;
    let data: BitSequence = data.parse()?;
    let outcome = engine.compute(&data);
    Ok((outcome.remainder_text(), outcome.trace))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(generator: &str) -> CrcEngine {
        CrcEngine::new(generator.parse().unwrap()).unwrap()
    }

    fn bits(s: &str) -> BitSequence {
        s.parse().unwrap()
    }

    #[test]
    fn test_worked_example() {
        let (remainder, trace) = crc_remainder("100110101111010010001", "1011").unwrap();
        assert_eq!(remainder, "101");
        assert_eq!(trace.first().unwrap(), "100110101111010010001000|1011");
        assert_eq!(trace.last().unwrap(), &format!("{}101", " ".repeat(21)));
    }

    #[test]
    fn test_full_trace() {
        let (remainder, trace) = crc_remainder("1101011011", "10011").unwrap();
        assert_eq!(remainder, "1110");
        assert_eq!(
            trace,
            vec![
                "11010110110000|10011",
                "10011",
                "_____",
                " 10011",
                " 10011",
                " _____",
                "      10110",
                "      10011",
                "      _____",
                "        10100",
                "        10011",
                "        _____",
                "          1110",
            ]
        );
    }

    #[test]
    fn test_remainder_is_padded_to_check_width() {
        let engine = engine("1011");
        let outcome = engine.compute(&bits("1011"));
        assert_eq!(outcome.remainder_text(), "000");
        assert!(outcome.is_zero());

        let outcome = engine.compute(&bits("1"));
        assert_eq!(outcome.remainder().len(), engine.check_bits());
        assert_eq!(outcome.remainder_text(), "011");
    }

    #[test]
    fn test_leading_zeros_are_not_subtracted() {
        let (remainder, _) = crc_remainder("0001", "11").unwrap();
        assert_eq!(remainder, "1");

        let (remainder, trace) = crc_remainder("0011", "11").unwrap();
        assert_eq!(remainder, "0");
        assert_eq!(trace[1], "  11");
        assert_eq!(trace[2], "  11");
    }

    #[test]
    fn test_frame_divides_to_zero() {
        let cases = [
            ("100110101111010010001", "1011"),
            ("1101011011", "10011"),
            ("0000001", "111"),
            ("1", "1101"),
            ("11111111", "100000111"),
        ];

        for (data, generator) in cases {
            let engine = engine(generator);
            let (remainder, _) = crc_remainder(data, generator).unwrap();
            let frame = format!("{}{}", data, remainder);

            let (check, _) = crc_remainder(&frame, generator).unwrap();
            assert!(check.chars().all(|c| c == '0'), "{} / {}", data, generator);
            assert!(engine.verify(&engine.frame(&bits(data))));
        }
    }

    #[test]
    fn test_verify_detects_single_bit_errors() {
        let engine = engine("1011");
        let frame = engine.frame(&bits("100110101111010010001"));
        assert_eq!(frame.to_string(), "100110101111010010001101");

        for i in 0..frame.len() {
            let mut corrupted = frame.clone().into_inner();
            let bit = corrupted[i];
            corrupted.set(i, !bit);
            assert!(!engine.verify(&BitSequence::new(corrupted).unwrap()));
        }
    }

    #[test]
    fn test_invalid_generators() {
        assert!(matches!(
            CrcEngine::new(bits("1")),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            CrcEngine::new(bits("0101")),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            crc_remainder("1011", ""),
            Err(Error::InvalidInput(_))
        ));

        let wide = format!("1{}", "0".repeat(64));
        assert_eq!(
            crc_remainder("1011", &wide).unwrap_err(),
            Error::InputTooLarge {
                length: 65,
                max_length: 64
            }
        );
    }

    #[test]
    fn test_widest_generator() {
        let generator = format!("1{}1", "0".repeat(62));
        let engine = engine(&generator);
        let data = bits("110010");
        assert_eq!(engine.check_bits(), 63);
        assert!(engine.verify(&engine.frame(&data)));
    }

    #[test]
    fn test_invalid_data() {
        assert!(matches!(
            crc_remainder("", "1011"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            crc_remainder("10a1", "1011"),
            Err(Error::Format { .. })
        ));
    }
}
