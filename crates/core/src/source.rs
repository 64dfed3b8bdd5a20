//! Randomness for hash coefficients
//!
//! A table never reaches for process-wide random state. Whoever builds it
//! hands in a [`CoefficientSource`], and the source is consulted exactly
//! twice: once for `a`, once for `b`.

use crate::error::TableError;

/// Supplier of uniformly distributed 64-bit words.
pub trait CoefficientSource {
    fn next_u64(&mut self) -> Result<u64, TableError>;

    /// Uniform draw from `low..=high` (Lemire's multiply-shift reduction).
    ///
    /// Fails with [`TableError::EmptyRange`] when `low > high`.
    fn draw_in(&mut self, low: u64, high: u64) -> Result<u64, TableError> {
        if low > high {
            return Err(TableError::EmptyRange { low, high });
        }
        let span = u128::from(high - low) + 1;
        let word = u128::from(self.next_u64()?);
        Ok(low + ((word * span) >> 64) as u64)
    }
}

/// Operating-system entropy via `getrandom`
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl CoefficientSource for OsEntropy {
    fn next_u64(&mut self) -> Result<u64, TableError> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes).map_err(|e| TableError::Entropy(e.to_string()))?;
        Ok(u64::from_le_bytes(bytes))
    }
}

/// Deterministic SplitMix64 stream.
///
/// Tables built from the same seed share coefficients, so their layouts
/// and dumps are identical. Not for adversarial settings: anyone who knows
/// the seed knows the hash function.
#[derive(Debug, Clone)]
pub struct SeededSource {
    state: u64,
}

impl SeededSource {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl CoefficientSource for SeededSource {
    fn next_u64(&mut self) -> Result<u64, TableError> {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Ok(z ^ (z >> 31))
    }
}
