//! Universal hash function
//!
//! One member of the Carter–Wegman family
//! `h(d) = ((a * d + b) mod p) mod m`, picked at random per table.
//! For two distinct reduced digests the chance of landing in the same bucket
//! is about `1/m` over the random choice of `(a, b)`, whatever keys an
//! adversary feeds in.

use crate::digest::Digest;
use crate::error::TableError;
use crate::params::PRIME;
use crate::source::CoefficientSource;

/// A fixed `(a, b)` draw bound to a bucket count.
///
/// Immutable once built: changing the coefficients would strand every entry
/// already stored under the old mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalHash {
    /// Multiplier, in `1..PRIME`
    a: u64,
    /// Offset, in `0..PRIME`
    b: u64,
    /// Number of buckets the output is folded into
    buckets: usize,
}

impl UniversalHash {
    /// Draw fresh coefficients from `source`.
    pub fn draw<S>(source: &mut S, buckets: usize) -> Result<Self, TableError>
    where
        S: CoefficientSource + ?Sized,
    {
        check_bucket_count(buckets)?;
        let a = source.draw_in(1, PRIME - 1)?;
        let b = source.draw_in(0, PRIME - 1)?;
        Ok(Self { a, b, buckets })
    }

    /// Build a hash function from known coefficients.
    ///
    /// Requires `1 <= a < PRIME`, `b < PRIME` and `1 <= buckets <= PRIME`.
    pub fn from_coefficients(a: u64, b: u64, buckets: usize) -> Result<Self, TableError> {
        check_bucket_count(buckets)?;
        if a == 0 || a >= PRIME {
            return Err(TableError::CoefficientOutOfRange {
                name: "a",
                value: a,
                min: 1,
                max: PRIME,
            });
        }
        if b >= PRIME {
            return Err(TableError::CoefficientOutOfRange {
                name: "b",
                value: b,
                min: 0,
                max: PRIME,
            });
        }
        Ok(Self { a, b, buckets })
    }

    pub fn a(&self) -> u64 {
        self.a
    }

    pub fn b(&self) -> u64 {
        self.b
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets
    }

    /// Bucket index for a key.
    #[inline]
    pub fn index_of<Q: Digest + ?Sized>(&self, key: &Q) -> usize {
        self.index_of_digest(key.digest())
    }

    /// Bucket index for a raw digest.
    ///
    /// The digest is brought into `0..PRIME` first, so negative values and
    /// values wider than the prime are handled. After reduction both factors
    /// are below 2^30 and the product fits in a `u64`.
    #[inline]
    pub fn index_of_digest(&self, digest: i128) -> usize {
        let d = digest.rem_euclid(i128::from(PRIME)) as u64;
        let h = (self.a * d + self.b) % PRIME;
        (h % self.buckets as u64) as usize
    }
}

/// Bucket indices come from a value below `PRIME`, so more buckets than
/// `PRIME` could never all be reached.
fn check_bucket_count(buckets: usize) -> Result<(), TableError> {
    if buckets == 0 {
        return Err(TableError::ZeroBuckets);
    }
    if buckets as u64 > PRIME {
        return Err(TableError::TooManyBuckets {
            requested: buckets,
            max: PRIME,
        });
    }
    Ok(())
}
