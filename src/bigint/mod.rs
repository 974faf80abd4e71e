//! Arbitrary-precision unsigned integers.
//!
//! Addresses, netmasks and the intermediate values of prefix arithmetic range
//! from a few bits to well past 128 bits (`1 << 128` is the size of `::/0`), so
//! every address computation goes through [`BigInteger`].
//!
//! Values are stored as 32-bit limbs, most significant first, in canonical
//! form: no leading zero limbs, and zero is exactly one zero limb. Partial
//! results are always computed in a 64-bit accumulator.

pub mod division;
pub mod radix;

// Re-export commonly used types
pub use radix::Radix;

use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU32;
use std::ops::{Add, Mul, Shl, Shr};
use std::str::FromStr;

use crate::error::{AddrError, Result};

pub(crate) const LIMB_BITS: usize = 32;
pub(crate) const LIMB_BASE: u64 = 1 << LIMB_BITS;

/// Divisor constant for `small_mod` and friends. Only used to initialise
/// `const` items, so a zero argument is a compile error.
pub(crate) const fn nonzero(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(n) => n,
        None => panic!("divisor constant must be nonzero"),
    }
}

/// Immutable unsigned integer of unbounded width.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    limbs: Vec<u32>,
}

impl BigInteger {
    pub fn zero() -> Self {
        BigInteger { limbs: vec![0] }
    }

    pub fn one() -> Self {
        BigInteger { limbs: vec![1] }
    }

    /// `2^exp`.
    pub fn pow2(exp: usize) -> Self {
        &Self::one() << exp
    }

    /// Build a value from most-significant-first limbs, dropping leading zeros.
    pub fn from_limbs(limbs: Vec<u32>) -> Self {
        match limbs.iter().position(|&l| l != 0) {
            Some(0) => BigInteger { limbs },
            Some(start) => BigInteger {
                limbs: limbs[start..].to_vec(),
            },
            None => Self::zero(),
        }
    }

    /// Build a value from least-significant-first limbs.
    pub(crate) fn from_le_limbs(mut limbs: Vec<u32>) -> Self {
        limbs.reverse();
        Self::from_limbs(limbs)
    }

    /// Limbs in canonical most-significant-first order.
    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    pub(crate) fn le_limbs(&self) -> Vec<u32> {
        self.limbs.iter().rev().copied().collect()
    }

    /// Limb `i` counted from the least significant end, zero past the top.
    fn limb_le(&self, i: usize) -> u32 {
        let len = self.limbs.len();
        if i < len {
            self.limbs[len - 1 - i]
        } else {
            0
        }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 0
    }

    pub fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 1
    }

    /// Number of significant bits; zero has a bit length of 0.
    pub fn bit_len(&self) -> usize {
        let top = self.limbs[0];
        (self.limbs.len() - 1) * LIMB_BITS + (LIMB_BITS - top.leading_zeros() as usize)
    }

    /// Test bit `n`, counted from the least significant bit.
    pub fn bit(&self, n: usize) -> bool {
        (self.limb_le(n / LIMB_BITS) >> (n % LIMB_BITS)) & 1 == 1
    }

    /// `self - other`, or `None` when `other > self`.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if *self < *other {
            return None;
        }
        let mut out = Vec::with_capacity(self.limbs.len());
        let mut borrow = 0u64;
        for i in 0..self.limbs.len() {
            let x = self.limb_le(i) as u64;
            let y = other.limb_le(i) as u64 + borrow;
            if x >= y {
                out.push((x - y) as u32);
                borrow = 0;
            } else {
                out.push((x + LIMB_BASE - y) as u32);
                borrow = 1;
            }
        }
        Some(Self::from_le_limbs(out))
    }

    /// `self - other`, clamped at zero.
    pub fn saturating_sub(&self, other: &Self) -> Self {
        self.checked_sub(other).unwrap_or_else(Self::zero)
    }

    /// Absolute difference `|self - other|`.
    pub fn abs_diff(&self, other: &Self) -> Self {
        match self.cmp(other) {
            Ordering::Less => other.saturating_sub(self),
            _ => self.saturating_sub(other),
        }
    }

    /// `self * m + a` for machine-word operands, used by string parsing.
    pub(crate) fn mul_add_small(&self, m: u32, a: u32) -> Self {
        let mut out = Vec::with_capacity(self.limbs.len() + 1);
        let mut carry = a as u64;
        for &limb in self.limbs.iter().rev() {
            let t = limb as u64 * m as u64 + carry;
            out.push(t as u32);
            carry = t >> LIMB_BITS;
        }
        out.push(carry as u32);
        Self::from_le_limbs(out)
    }

    pub fn to_u32(&self) -> Option<u32> {
        match self.limbs.as_slice() {
            [x] => Some(*x),
            _ => None,
        }
    }

    pub fn to_u128(&self) -> Option<u128> {
        if self.limbs.len() > 4 {
            return None;
        }
        Some(
            self.limbs
                .iter()
                .fold(0u128, |acc, &l| (acc << LIMB_BITS) | l as u128),
        )
    }
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        // Canonical form: a longer limb sequence is always larger.
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.cmp(&other.limbs))
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn add(self, other: &BigInteger) -> BigInteger {
        let n = self.limbs.len().max(other.limbs.len());
        let mut out = Vec::with_capacity(n + 1);
        let mut carry = 0u64;
        for i in 0..n {
            let t = self.limb_le(i) as u64 + other.limb_le(i) as u64 + carry;
            out.push(t as u32);
            carry = t >> LIMB_BITS;
        }
        out.push(carry as u32);
        BigInteger::from_le_limbs(out)
    }
}

impl Mul<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn mul(self, other: &BigInteger) -> BigInteger {
        if self.is_zero() || other.is_zero() {
            return BigInteger::zero();
        }
        let a = self.le_limbs();
        let b = other.le_limbs();
        let mut out = vec![0u32; a.len() + b.len()];
        for (i, &x) in a.iter().enumerate() {
            let mut carry = 0u64;
            for (j, &y) in b.iter().enumerate() {
                // (2^32-1)^2 + 2*(2^32-1) still fits in u64
                let t = x as u64 * y as u64 + out[i + j] as u64 + carry;
                out[i + j] = t as u32;
                carry = t >> LIMB_BITS;
            }
            out[i + b.len()] = carry as u32;
        }
        BigInteger::from_le_limbs(out)
    }
}

impl Shl<usize> for &BigInteger {
    type Output = BigInteger;

    fn shl(self, n: usize) -> BigInteger {
        if self.is_zero() {
            return BigInteger::zero();
        }
        let bits = (n % LIMB_BITS) as u32;
        let mut out = vec![0u32; n / LIMB_BITS];
        out.reserve(self.limbs.len() + 1);
        let mut carry = 0u32;
        for &limb in self.limbs.iter().rev() {
            if bits == 0 {
                out.push(limb);
            } else {
                out.push((limb << bits) | carry);
                carry = limb >> (LIMB_BITS as u32 - bits);
            }
        }
        out.push(carry);
        BigInteger::from_le_limbs(out)
    }
}

impl Shr<usize> for &BigInteger {
    type Output = BigInteger;

    fn shr(self, n: usize) -> BigInteger {
        let skip = n / LIMB_BITS;
        if skip >= self.limbs.len() {
            return BigInteger::zero();
        }
        let bits = (n % LIMB_BITS) as u32;
        let src = &self.le_limbs()[skip..];
        let out = (0..src.len())
            .map(|i| {
                let high = match src.get(i + 1) {
                    Some(&next) if bits != 0 => next << (LIMB_BITS as u32 - bits),
                    _ => 0,
                };
                (src[i] >> bits) | high
            })
            .collect();
        BigInteger::from_le_limbs(out)
    }
}

impl From<u32> for BigInteger {
    fn from(v: u32) -> Self {
        BigInteger { limbs: vec![v] }
    }
}

impl From<u64> for BigInteger {
    fn from(v: u64) -> Self {
        Self::from_limbs(vec![(v >> 32) as u32, v as u32])
    }
}

impl From<u128> for BigInteger {
    fn from(v: u128) -> Self {
        Self::from_limbs(vec![
            (v >> 96) as u32,
            (v >> 64) as u32,
            (v >> 32) as u32,
            v as u32,
        ])
    }
}

impl From<usize> for BigInteger {
    fn from(v: usize) -> Self {
        Self::from(v as u64)
    }
}

impl FromStr for BigInteger {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, Radix::Decimal)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.to_str_radix(Radix::Decimal))
    }
}

impl fmt::LowerHex for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_str_radix(Radix::Hex))
    }
}

impl fmt::Binary for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0b", &self.to_str_radix(Radix::Binary))
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInteger({})", self)
    }
}
