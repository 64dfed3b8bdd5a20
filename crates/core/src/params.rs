//! Universal Hashing Parameters
//!
//! Constants shared by every table instance. Coefficients `a` and `b` are
//! drawn per table; everything here is fixed.

/// Prime modulus of the affine hash family (10^9 + 7)
pub const PRIME: u64 = 1_000_000_007;

/// Bucket count used when none is given
pub const DEFAULT_BUCKET_COUNT: usize = 101;

/// Multiplier of the polynomial rolling hash used for text keys
pub const STRING_DIGEST_BASE: u64 = 31;
