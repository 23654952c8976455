//! CDMA chip-sequence spreading.
//!
//! Each device owns a chip code. A data bit of 1 is transmitted as the code
//! itself and a 0 as its sign inverse (the "not-code"), so one bit is spread
//! over `code.len()` chips. The receiver recovers each bit with a matched
//! filter: the normalized dot product of a chip group with the code.
//!
//! Because orthogonal codes correlate to zero, several devices may transmit
//! at once and the summed signal can still be decoded per device.
//!
//! # Examples
//!
//! ```
//! use channel_codes::cs::ecc::{BitSequence, ChipCode, ChipCodec};
//!
//! let code: ChipCode = "(1,-1,1,1)".parse().unwrap();
//! let codec = ChipCodec::new(code);
//!
//! let data = BitSequence::from_polar("(1,-1,-1)").unwrap();
//! let signal = codec.encode(&data);
//! assert_eq!(signal.to_string(), "(1,-1,1,1,-1,1,-1,-1,-1,1,-1,-1)");
//!
//! let estimate = codec.decode(&signal);
//! assert_eq!(estimate.sign_text(), "1, -1, -1");
//! ```

use crate::cs::ecc::sequence::{parse_integers, write_chips, BitSequence, ChipCode};
use crate::cs::ecc::Result;
use crate::cs::error::Error;
use log::{debug, warn};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A chip stream as sent on (or received from) the shared channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSignal(Vec<i32>);

impl EncodedSignal {
    /// Creates a signal, rejecting an empty chip stream
    pub fn new(chips: Vec<i32>) -> Result<Self> {
        if chips.is_empty() {
            return Err(Error::InvalidInput("signal is empty".to_string()));
        }
        Ok(EncodedSignal(chips))
    }

    pub fn chips(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Chip-wise sum of two transmissions sharing the channel.
    ///
    /// The shorter signal is treated as silent past its end. Fails when a
    /// summed chip does not fit in an `i32`.
    pub fn superpose(&self, other: &EncodedSignal) -> Result<EncodedSignal> {
        let len = self.len().max(other.len());
        let chips = (0..len)
            .map(|i| {
                let a = self.0.get(i).copied().unwrap_or(0);
                let b = other.0.get(i).copied().unwrap_or(0);
                a.checked_add(b).ok_or_else(|| {
                    Error::InvalidInput(format!("chip {}: {} + {} overflows", i, a, b))
                })
            })
            .collect::<Result<Vec<i32>>>()?;
        Ok(EncodedSignal(chips))
    }
}

impl FromStr for EncodedSignal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EncodedSignal::new(parse_integers(s)?)
    }
}

impl Display for EncodedSignal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_chips(f, &self.0)
    }
}

/// Correlation scores recovered from a signal, one per data bit.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEstimate {
    scores: Vec<f64>,
}

impl DecodedEstimate {
    /// Raw matched-filter outputs
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Sign of each score: 1, -1, or 0 when the bit is ambiguous
    pub fn signs(&self) -> Vec<i8> {
        self.scores.iter().map(|&score| sign(score)).collect()
    }

    /// Scores with two decimals, joined by `", "`
    pub fn raw_text(&self) -> String {
        self.scores
            .iter()
            .map(|score| format!("{:.2}", score))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Signs joined by `", "`
    pub fn sign_text(&self) -> String {
        self.signs()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

fn sign(score: f64) -> i8 {
    if score > 0.0 {
        1
    } else if score < 0.0 {
        -1
    } else {
        0
    }
}

/// Spreads and despreads data for one device code.
#[derive(Debug, Clone)]
pub struct ChipCodec {
    code: ChipCode,
}

impl ChipCodec {
    pub fn new(code: ChipCode) -> Self {
        ChipCodec { code }
    }

    pub fn code(&self) -> &ChipCode {
        &self.code
    }

    /// Replaces every data bit by the code (bit 1) or the not-code (bit 0)
    ///
    /// The result always holds `code.len() * data.len()` chips.
    pub fn encode(&self, data: &BitSequence) -> EncodedSignal {
        let not_code = self.code.not_code();
        let mut chips = Vec::with_capacity(self.code.len() * data.len());

        for bit in data.bits().iter().by_vals() {
            let group = if bit {
                self.code.chips()
            } else {
                not_code.chips()
            };
            chips.extend_from_slice(group);
        }

        EncodedSignal(chips)
    }

    /// Correlates each code-length group of `signal` with the code.
    ///
    /// A trailing group shorter than the code is dropped rather than
    /// rejected; use [`ChipCodec::decode_strict`] to refuse such signals.
    pub fn decode(&self, signal: &EncodedSignal) -> DecodedEstimate {
        let width = self.code.len();
        let (symbols, leftover) = num_integer::div_rem(signal.len(), width);
        if leftover != 0 {
            warn!(
                "dropping {} trailing chips: signal of {} chips is not a multiple of code length {}",
                leftover,
                signal.len(),
                width
            );
        }

        let scores: Vec<f64> = signal
            .chips()
            .chunks_exact(width)
            .map(|group| self.correlate(group))
            .collect();

        debug_assert_eq!(scores.len(), symbols);
        for (i, score) in scores.iter().enumerate() {
            debug!("symbol {}: correlation {:.2}", i, score);
        }

        DecodedEstimate { scores }
    }

    /// Like [`ChipCodec::decode`] but fails when the signal has a partial group.
    pub fn decode_strict(&self, signal: &EncodedSignal) -> Result<DecodedEstimate> {
        let (_, leftover) = num_integer::div_rem(signal.len(), self.code.len());
        if leftover != 0 {
            return Err(Error::LengthMismatch {
                signal_len: signal.len(),
                code_len: self.code.len(),
            });
        }
        Ok(self.decode(signal))
    }

    /// Mean of the per-chip products between `group` and the code
    fn correlate(&self, group: &[i32]) -> f64 {
        // i32 products summed in i128 cannot overflow.
        let sum: i128 = self
            .code
            .chips()
            .iter()
            .zip(group)
            .map(|(&c, &s)| i128::from(c) * i128::from(s))
            .sum();
        sum as f64 / self.code.len() as f64
    }
}

/// Encodes `data` for the device owning `code`, both in textual notation.
///
/// Returns the chip stream as `(c1,c2,...)`.
pub fn cdma_encode(code: &str, data: &str) -> Result<String> {
    let code: ChipCode = code.parse()?;
    let data = BitSequence::from_polar(data)?;
    Ok(ChipCodec::new(code).encode(&data).to_string())
}

/// Decodes `signal` with `code`, both in textual notation.
///
/// Returns the two-decimal correlation scores and their signs, each joined
/// by `", "`.
pub fn cdma_decode(code: &str, signal: &str) -> Result<(String, String)> {
    let code: ChipCode = code.parse()?;
    let signal: EncodedSignal = signal.parse()?;
    let estimate = ChipCodec::new(code).decode(&signal);
    Ok((estimate.raw_text(), estimate.sign_text()))
}
