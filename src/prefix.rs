//! CIDR prefix lengths and their netmasks.

use std::cmp::Ordering;
use std::fmt;

use crate::bigint::{BigInteger, Radix};
use crate::error::{AddrError, Result};
use crate::family::Family;

/// A prefix length bound to a family, with its netmask cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix {
    length: usize,
    family: Family,
    netmask: BigInteger,
}

impl Prefix {
    /// Create a prefix of `length` bits.
    ///
    /// # Returns
    ///
    /// [`AddrError::Range`] if `length` exceeds the family's bit width.
    pub fn new(length: usize, family: Family) -> Result<Self> {
        if length > family.bits() {
            return Err(AddrError::range(format!(
                "prefix /{} is wider than {} bits for {}",
                length,
                family.bits(),
                family
            )));
        }
        Ok(Self::build(length, family))
    }

    /// The host-route prefix: /32 for IPv4, /128 for IPv6.
    pub fn full(family: Family) -> Self {
        Self::build(family.bits(), family)
    }

    fn build(length: usize, family: Family) -> Self {
        let ones = BigInteger::pow2(length).saturating_sub(&BigInteger::one());
        let netmask = &ones << (family.bits() - length);
        Prefix {
            length,
            family,
            netmask,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn netmask(&self) -> &BigInteger {
        &self.netmask
    }

    /// Number of host bits, `bits - length`.
    pub fn host_prefix(&self) -> usize {
        self.family.bits() - self.length
    }

    /// Low `host_prefix` bits set.
    pub fn host_mask(&self) -> BigInteger {
        self.size().saturating_sub(&BigInteger::one())
    }

    /// Number of addresses covered, `2^host_prefix`.
    pub fn size(&self) -> BigInteger {
        BigInteger::pow2(self.host_prefix())
    }

    pub fn with_length(&self, length: usize) -> Result<Self> {
        Self::new(length, self.family)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, n: usize) -> Result<Self> {
        let length = self
            .length
            .checked_add(n)
            .ok_or_else(|| AddrError::range("prefix length overflow"))?;
        self.with_length(length)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, n: usize) -> Result<Self> {
        let length = self.length.checked_sub(n).ok_or_else(|| {
            AddrError::range(format!("cannot shorten /{} by {} bits", self.length, n))
        })?;
        self.with_length(length)
    }

    /// Netmask as a zero-padded binary string of the family's width.
    pub fn bits(&self) -> String {
        let raw = self.netmask.to_str_radix(Radix::Binary);
        format!("{:0>width$}", raw, width = self.family.bits())
    }

    /// Netmask in the family's address notation, e.g. `255.255.255.0`.
    pub fn to_ip_str(&self) -> String {
        self.family.format_compressed(&self.netmask)
    }
}

impl Ord for Prefix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.family
            .cmp(&other.family)
            .then_with(|| self.length.cmp(&other.length))
    }
}

impl PartialOrd for Prefix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.length)
    }
}
