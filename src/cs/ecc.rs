//! Channel coding and error control.
//!
//! This module provides three classical, independent codes used to teach
//! digital communication fundamentals:
//! - CDMA chip-sequence spreading and matched-filter despreading
//! - CRC remainders computed by binary polynomial long division
//! - Hamming single-error-correcting codeword generation
//!
//! All of them are pure functions over short bit or chip sequences. Input is
//! accepted in a loose textual form (`(1, -1, 1, 1)` or `1011`), tokenized once
//! by [`sequence`] and then handled as typed values.
//!
//! CRC and Hamming additionally return a step-by-step trace of the
//! intermediate states, ready for display. The trace is diagnostic only.
//!
//! # Examples
//!
//! ```rust
//! use channel_codes::cs::ecc::{cdma_encode, crc_remainder, hamming_encode};
//!
//! let signal = cdma_encode("(1,-1,1,1)", "(1,-1,-1)").unwrap();
//! assert_eq!(signal, "(1,-1,1,1,-1,1,-1,-1,-1,1,-1,-1)");
//!
//! let (remainder, _trace) = crc_remainder("100110101111010010001", "1011").unwrap();
//! assert_eq!(remainder, "101");
//!
//! let (codeword, _trace) = hamming_encode("1011").unwrap();
//! assert_eq!(codeword, "0110011");
//! ```

pub use crate::cs::error::Result;

pub mod cdma;
pub mod crc;
pub mod hamming;
pub mod sequence;

pub use cdma::{cdma_decode, cdma_encode, ChipCodec, DecodedEstimate, EncodedSignal};
pub use crc::{crc_remainder, CrcEngine, CrcOutcome};
pub use hamming::{hamming_encode, plan_parity_positions, HammingEncoder, HammingOutcome, ParityPlan};
pub use sequence::{BitSequence, ChipCode};
