//! Typed sequences parsed from the loose textual notation.
//!
//! Sequences are written as comma-separated tokens, optionally wrapped in
//! parentheses and with arbitrary whitespace: `(1, -1, 1, 1)`, `1,0,1` or
//! simply `1011`. Empty tokens left by stray delimiters are ignored.
//!
//! Parsing happens once at the boundary; the codes downstream only see
//! [`ChipCode`], [`BitSequence`] or plain integer slices.

use crate::cs::ecc::Result;
use crate::cs::error::Error;
use bitvec::prelude::*;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Splits `input` into non-empty tokens with all whitespace removed.
pub(crate) fn tokenize(input: &str) -> Vec<String> {
    input
        .trim()
        .trim_matches(|c: char| c == '(' || c == ')')
        .split(',')
        .map(|token| token.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parses every token of `input` as a signed integer.
pub(crate) fn parse_integers(input: &str) -> Result<Vec<i32>> {
    tokenize(input)
        .into_iter()
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| Error::format(token, "an integer"))
        })
        .collect()
}

/// A device's spreading code: a fixed-length sequence of signed chip weights.
///
/// Codes used for encoding are normally ±1 valued; decoding accepts any
/// integer weights since it only correlates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipCode(Vec<i32>);

impl ChipCode {
    /// Creates a chip code, rejecting an empty sequence.
    ///
    /// `i32::MIN` is rejected as well since it has no sign inverse.
    pub fn new(chips: Vec<i32>) -> Result<Self> {
        if chips.is_empty() {
            return Err(Error::InvalidInput("chip code is empty".to_string()));
        }
        if chips.contains(&i32::MIN) {
            return Err(Error::InvalidInput(format!(
                "chip weight {} has no sign inverse",
                i32::MIN
            )));
        }
        Ok(ChipCode(chips))
    }

    /// The chip weights in transmission order
    pub fn chips(&self) -> &[i32] {
        &self.0
    }

    /// Number of chips per data bit
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The elementwise sign inverse, sent for a logical 0.
    ///
    /// Always derived on demand from the code itself.
    pub fn not_code(&self) -> ChipCode {
        ChipCode(self.0.iter().map(|chip| -chip).collect())
    }
}

impl FromStr for ChipCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChipCode::new(parse_integers(s)?)
    }
}

impl Display for ChipCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_chips(f, &self.0)
    }
}

/// Writes `chips` as `(c1,c2,...)`.
pub(crate) fn write_chips(f: &mut Formatter<'_>, chips: &[i32]) -> std::fmt::Result {
    write!(f, "(")?;
    for (i, chip) in chips.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", chip)?;
    }
    write!(f, ")")
}

/// An ordered, non-empty sequence of binary digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSequence(BitVec<u8, Msb0>);

impl BitSequence {
    /// Wraps existing bits, rejecting an empty sequence
    pub fn new(bits: BitVec<u8, Msb0>) -> Result<Self> {
        if bits.is_empty() {
            return Err(Error::InvalidInput("bit sequence is empty".to_string()));
        }
        Ok(BitSequence(bits))
    }

    /// Parses polar data tokens: `1` is a logical one, `0` or `-1` a logical zero.
    ///
    /// Used for CDMA data where bits are usually written as `(1, -1, -1)`.
    pub fn from_polar(s: &str) -> Result<Self> {
        let mut bits = BitVec::new();
        for value in parse_integers(s)? {
            match value {
                1 => bits.push(true),
                0 | -1 => bits.push(false),
                other => return Err(Error::format(other.to_string(), "1, 0 or -1")),
            }
        }
        BitSequence::new(bits)
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BitVec<u8, Msb0> {
        self.0
    }

    /// This sequence followed by `tail`
    pub fn concat(&self, tail: &BitSlice<u8, Msb0>) -> BitSequence {
        let mut bits = self.0.clone();
        bits.extend_from_bitslice(tail);
        BitSequence(bits)
    }
}

impl FromStr for BitSequence {
    type Err = Error;

    /// Parses binary digits; commas, whitespace and outer parentheses are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut bits = BitVec::new();
        for token in tokenize(s) {
            for c in token.chars() {
                match c {
                    '0' => bits.push(false),
                    '1' => bits.push(true),
                    other => return Err(Error::format(other.to_string(), "a binary digit")),
                }
            }
        }
        BitSequence::new(bits)
    }
}

impl Display for BitSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_bits(f, &self.0)
    }
}

/// Writes `bits` as a string of `0`/`1` characters.
pub(crate) fn write_bits(f: &mut Formatter<'_>, bits: &BitSlice<u8, Msb0>) -> std::fmt::Result {
    for bit in bits.iter().by_vals() {
        write!(f, "{}", if bit { '1' } else { '0' })?;
    }
    Ok(())
}

/// Renders `bits` as a string of `0`/`1` characters.
pub(crate) fn bits_to_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}
