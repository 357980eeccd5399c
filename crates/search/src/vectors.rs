//! Input vectors and their enumeration order.

use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::fmt;

/// A primary-input bit vector.
///
/// Bit `i` drives the `i`-th primary input. Displays and serializes as a
/// bit string in input order, e.g. `010011011`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputVector(pub Vec<bool>);

impl InputVector {
    /// Decode enumeration index `index` into a `width`-bit vector.
    ///
    /// The first input is the slowest-varying bit, so indices count up
    /// like big-endian binary: index 0 is all-low, index `2^w - 1` is
    /// all-high. Enumeration order is part of the witness tie-break
    /// contract and must not change.
    pub fn from_index(index: u64, width: usize) -> Self {
        InputVector(
            (0..width)
                .map(|i| (index >> (width - 1 - i)) & 1 == 1)
                .collect(),
        )
    }

    /// Number of bits.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// The bits, in primary-input order.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }
}

impl fmt::Display for InputVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.iter().map(|&bit| if bit { '1' } else { '0' }).format("")
        )
    }
}

impl Serialize for InputVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
