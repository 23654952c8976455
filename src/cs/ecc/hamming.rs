//! Hamming code generation.
//!
//! Parity bits are placed at the power-of-two positions (1, 2, 4, 8, ...) of
//! the codeword and data bits fill the remaining positions in order. Parity
//! bit `N` covers `N` bits, skips `N` bits, and repeats, starting from
//! position `N`; it is set so that its covering set holds an even number of
//! ones. A single flipped bit can then be located from the failing checks.
//!
//! Only generation is provided. Every parity bit is computed against the
//! codeword as filled so far, so bits set earlier take part in later checks.
//!
//! # Examples
//!
//! ```
//! use channel_codes::cs::ecc::hamming_encode;
//!
//! let (codeword, trace) = hamming_encode("1011").unwrap();
//! assert_eq!(codeword, "0110011");
//! assert_eq!(trace.last().unwrap(), "Result: 0110011");
//! ```

use crate::cs::ecc::sequence::{bits_to_string, BitSequence};
use crate::cs::ecc::Result;
use bitvec::prelude::*;
use log::debug;
use std::fmt::{Display, Formatter};

/// Ascending 1-based codeword positions that hold parity bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityPlan(Vec<usize>);

impl ParityPlan {
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether 1-based `position` holds a parity bit
    pub fn contains(&self, position: usize) -> bool {
        self.0.binary_search(&position).is_ok()
    }
}

impl Display for ParityPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let positions: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", positions.join(","))
    }
}

/// Plans the parity positions for `data_len` data bits.
///
/// Walks the powers of two, adding each one while it is below the codeword
/// length grown so far; each added parity bit lengthens the codeword by one.
pub fn plan_parity_positions(data_len: usize) -> ParityPlan {
    let mut positions = Vec::new();
    let mut length = data_len;
    let mut position = 1;

    while position < length {
        positions.push(position);
        length += 1;
        position *= 2;
    }

    ParityPlan(positions)
}

/// A generated codeword together with how it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HammingOutcome {
    /// Parity positions used for this codeword
    plan: ParityPlan,
    /// Data and parity bits in transmission order
    codeword: BitVec<u8, Msb0>,
    /// Numbered description of each step
    trace: Vec<String>,
}

impl HammingOutcome {
    pub fn plan(&self) -> &ParityPlan {
        &self.plan
    }

    pub fn codeword(&self) -> &BitSlice<u8, Msb0> {
        &self.codeword
    }

    pub fn codeword_text(&self) -> String {
        bits_to_string(&self.codeword)
    }

    /// Numbered explanation of each step, for display only
    pub fn trace(&self) -> &[String] {
        &self.trace
    }
}

/// Builds Hamming codewords from data bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HammingEncoder;

impl HammingEncoder {
    pub fn new() -> Self {
        HammingEncoder
    }

    /// Parity positions used for `data_len` data bits
    pub fn plan(&self, data_len: usize) -> ParityPlan {
        plan_parity_positions(data_len)
    }

    /// Encodes `data` into a codeword with parity bits at the planned positions
    pub fn encode(&self, data: &BitSequence) -> HammingOutcome {
        let plan = self.plan(data.len());
        let total = data.len() + plan.len();
        let mut trace = Vec::new();

        // Parity slots start as 0; data bits keep their order around them.
        let mut codeword = bitvec![u8, Msb0; 0; total];
        let mut source = data.bits().iter().by_vals();
        for index in 0..total {
            if plan.contains(index + 1) {
                continue;
            }
            if let Some(bit) = source.next() {
                codeword.set(index, bit);
            }
        }

        push_line(
            &mut trace,
            format!(
                "1) Insert parity bits at power-of-two positions ({}): {}",
                plan,
                bits_to_string(&codeword)
            ),
        );
        push_line(
            &mut trace,
            "2) Parity bit N covers N bits, skips N bits, and repeats, starting from position N"
                .to_string(),
        );

        for (step, &position) in plan.positions().iter().enumerate() {
            let mut examined = BitVec::<u8, Msb0>::new();
            for start in (position - 1..total).step_by(2 * position) {
                let end = (start + position).min(total);
                examined.extend_from_bitslice(&codeword[start..end]);
            }

            let ones = examined.count_ones();
            let parity = ones % 2 == 1;
            codeword.set(position - 1, parity);

            push_line(
                &mut trace,
                format!(
                    "{}) Bit {} checks {} => {} ones ({}) => set {}",
                    step + 3,
                    position,
                    bits_to_string(&examined),
                    ones,
                    if parity { "odd" } else { "even" },
                    u8::from(parity)
                ),
            );
        }

        push_line(&mut trace, format!("Result: {}", bits_to_string(&codeword)));

        HammingOutcome {
            plan,
            codeword,
            trace,
        }
    }
}

fn push_line(trace: &mut Vec<String>, line: String) {
    debug!("hamming: {}", line);
    trace.push(line);
}

/// Encodes a bit string and returns the codeword with its trace.
pub fn hamming_encode(data: &str) -> Result<(String, Vec<String>)> {
    let data: BitSequence = data.parse()?;
    let outcome = HammingEncoder::new().encode(&data);
    Ok((outcome.codeword_text(), outcome.trace))
}
