//! Key digests
//!
//! A digest is the integer a key contributes to the affine hash step. It
//! must be a pure function of the key's value: the same key yields the same
//! digest in every process, on every platform, on every run.

use std::borrow::Cow;

use crate::params::{PRIME, STRING_DIGEST_BASE};

/// Keys that can be reduced to a reproducible integer digest.
///
/// Two keys that compare equal must produce the same digest, and a type
/// used as a borrowed lookup form (`str` for `String`) must digest exactly
/// like its owner.
pub trait Digest {
    /// Integer digest of the key. May be negative or larger than the prime;
    /// the hash function reduces it before use.
    fn digest(&self) -> i128;
}

/// Polynomial rolling hash over Unicode scalar values, modulo [`PRIME`]
///
/// `h = (h * 31 + c) mod p`, starting from zero.
pub fn digest_str(text: &str) -> i128 {
    let mut h: u64 = 0;
    for c in text.chars() {
        h = (h * STRING_DIGEST_BASE + u64::from(c)) % PRIME;
    }
    i128::from(h)
}

macro_rules! identity_digest {
    ($($t:ty),* $(,)?) => {
        $(
            impl Digest for $t {
                #[inline]
                fn digest(&self) -> i128 {
                    *self as i128
                }
            }
        )*
    };
}

identity_digest!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

// u128 does not fit i128; fold it into range first.
impl Digest for u128 {
    #[inline]
    fn digest(&self) -> i128 {
        (*self % u128::from(PRIME)) as i128
    }
}

impl Digest for bool {
    #[inline]
    fn digest(&self) -> i128 {
        i128::from(*self as u8)
    }
}

impl Digest for char {
    #[inline]
    fn digest(&self) -> i128 {
        i128::from(u32::from(*self))
    }
}

impl Digest for str {
    fn digest(&self) -> i128 {
        digest_str(self)
    }
}

impl Digest for String {
    fn digest(&self) -> i128 {
        digest_str(self)
    }
}

impl Digest for Box<str> {
    fn digest(&self) -> i128 {
        digest_str(self)
    }
}

impl Digest for Cow<'_, str> {
    fn digest(&self) -> i128 {
        digest_str(self)
    }
}

impl<T: Digest + ?Sized> Digest for &T {
    #[inline]
    fn digest(&self) -> i128 {
        (**self).digest()
    }
}
