//! Text and byte conversions for [`BigInteger`].

use std::num::NonZeroU32;

use super::{nonzero, BigInteger, LIMB_BITS};

const BINARY_CHUNK: NonZeroU32 = nonzero(1 << 31);
const DECIMAL_CHUNK: NonZeroU32 = nonzero(1_000_000_000);
const HEX_CHUNK: NonZeroU32 = nonzero(1 << 28);
use crate::error::{AddrError, Result};

/// The bases a [`BigInteger`] can be rendered in or parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Decimal,
    Hex,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }

    /// Largest power of the base that fits a limb, and its digit count.
    fn chunk(self) -> (NonZeroU32, usize) {
        match self {
            Radix::Binary => (BINARY_CHUNK, 31),
            Radix::Decimal => (DECIMAL_CHUNK, 9),
            Radix::Hex => (HEX_CHUNK, 7),
        }
    }
}

impl TryFrom<u32> for Radix {
    type Error = AddrError;

    fn try_from(base: u32) -> Result<Self> {
        match base {
            2 => Ok(Radix::Binary),
            10 => Ok(Radix::Decimal),
            16 => Ok(Radix::Hex),
            other => Err(AddrError::UnsupportedRadix(other)),
        }
    }
}

impl BigInteger {
    /// Render in the given base, without prefix or padding.
    ///
    /// Binary is read straight off the limbs; other bases divide repeatedly by
    /// the largest limb-sized power of the base and collect digits from the
    /// least significant end.
    pub fn to_str_radix(&self, radix: Radix) -> String {
        if radix == Radix::Binary {
            let mut limbs = self.limbs().iter();
            let mut out = limbs.next().map(|l| format!("{:b}", l)).unwrap_or_default();
            for limb in limbs {
                out.push_str(&format!("{:032b}", limb));
            }
            return out;
        }

        let (chunk, width) = radix.chunk();
        let mut chunks = Vec::new();
        let mut rest = self.clone();
        loop {
            let (q, r) = rest.div_rem_small(chunk);
            chunks.push(r);
            if q.is_zero() {
                break;
            }
            rest = q;
        }

        let mut out = String::with_capacity(chunks.len() * width);
        for (i, c) in chunks.iter().rev().enumerate() {
            let part = match radix {
                Radix::Hex => format!("{:x}", c),
                _ => c.to_string(),
            };
            if i > 0 {
                out.extend(std::iter::repeat('0').take(width - part.len()));
            }
            out.push_str(&part);
        }
        out
    }

    /// Parse digits in the given base with Horner's rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use cidrkit::bigint::{BigInteger, Radix};
    ///
    /// let v = BigInteger::from_str_radix("ff", Radix::Hex)?;
    /// assert_eq!(v, BigInteger::from(255u32));
    /// # Ok::<(), cidrkit::AddrError>(())
    /// ```
    pub fn from_str_radix(s: &str, radix: Radix) -> Result<BigInteger> {
        if s.is_empty() {
            return Err(AddrError::parse(s, "empty numeral"));
        }
        let base = radix.base();
        s.chars().try_fold(BigInteger::zero(), |acc, c| {
            c.to_digit(base)
                .map(|d| acc.mul_add_small(base, d))
                .ok_or_else(|| AddrError::parse(s, format!("'{}' is not a base-{} digit", c, base)))
        })
    }

    /// Canonical big-endian bytes; zero is a single zero byte.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let bytes: Vec<u8> = self.limbs().iter().flat_map(|l| l.to_be_bytes()).collect();
        match bytes.iter().position(|&b| b != 0) {
            Some(start) => bytes[start..].to_vec(),
            None => vec![0],
        }
    }

    pub fn from_bytes_be(bytes: &[u8]) -> BigInteger {
        let limb_bytes = LIMB_BITS / 8;
        let pad = (limb_bytes - bytes.len() % limb_bytes) % limb_bytes;
        let padded: Vec<u8> = std::iter::repeat(0u8).take(pad).chain(bytes.iter().copied()).collect();
        let limbs = padded
            .chunks(limb_bytes)
            .map(|c| c.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
            .collect();
        BigInteger::from_limbs(limbs)
    }
}
