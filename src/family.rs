//! Per-family constants and text rendering.
//!
//! [`Family`] is the closed set of address families. Everything that differs
//! between IPv4 and IPv6 (widths, group rendering, reverse zone, the
//! usable-host offset) is a `match` on it.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::bigint::{nonzero, BigInteger};
use crate::rle;

const V4_GROUP_MODULUS: NonZeroU32 = nonzero(0x100);
const V6_GROUP_MODULUS: NonZeroU32 = nonzero(0x1_0000);
const V6_NIBBLE_MODULUS: NonZeroU32 = nonzero(0x10);

/// Address family. `V4` orders before `V6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Total address width in bits.
    pub const fn bits(self) -> usize {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Width of one textual group: an octet or a hextet.
    pub const fn group_bits(self) -> usize {
        match self {
            Family::V4 => 8,
            Family::V6 => 16,
        }
    }

    /// Width of one reverse-DNS label.
    pub const fn dns_bits(self) -> usize {
        match self {
            Family::V4 => 8,
            Family::V6 => 4,
        }
    }

    pub const fn rev_domain(self) -> &'static str {
        match self {
            Family::V4 => "in-addr.arpa",
            Family::V6 => "ip6.arpa",
        }
    }

    /// Distance from the network address to the first usable host.
    /// IPv4 reserves the network and broadcast addresses.
    pub const fn host_offset(self) -> u32 {
        match self {
            Family::V4 => 1,
            Family::V6 => 0,
        }
    }

    pub const fn group_count(self) -> usize {
        self.bits() / self.group_bits()
    }

    /// Largest host value, `2^bits - 1`.
    pub fn max_host(self) -> BigInteger {
        BigInteger::pow2(self.bits()).saturating_sub(&BigInteger::one())
    }

    fn group_modulus(self) -> NonZeroU32 {
        match self {
            Family::V4 => V4_GROUP_MODULUS,
            Family::V6 => V6_GROUP_MODULUS,
        }
    }

    fn dns_modulus(self) -> NonZeroU32 {
        match self {
            Family::V4 => V4_GROUP_MODULUS,
            Family::V6 => V6_NIBBLE_MODULUS,
        }
    }

    /// Split `host` into groups, most significant first.
    pub fn groups(self, host: &BigInteger) -> Vec<u32> {
        let mut groups = split_low(host, self.group_count(), self.group_bits(), self.group_modulus());
        groups.reverse();
        groups
    }

    /// Split `host` into reverse-DNS label values, least significant first.
    pub fn dns_groups(self, host: &BigInteger) -> Vec<u32> {
        split_low(host, self.bits() / self.dns_bits(), self.dns_bits(), self.dns_modulus())
    }

    /// One group as it appears in the compressed form.
    pub fn group_str(self, value: u32) -> String {
        match self {
            Family::V4 => value.to_string(),
            Family::V6 => format!("{:x}", value),
        }
    }

    pub fn dns_label(self, value: u32) -> String {
        match self {
            Family::V4 => value.to_string(),
            Family::V6 => format!("{:x}", value),
        }
    }

    /// Canonical text without prefix.
    ///
    /// IPv4 is plain dotted decimal. IPv6 replaces the first longest run of
    /// zero groups with `::`.
    pub fn format_compressed(self, host: &BigInteger) -> String {
        let groups = self.groups(host);
        match self {
            Family::V4 => join_groups(self, &groups, "."),
            Family::V6 => {
                let mut out = String::new();
                let mut collapsed = false;
                let mut need_sep = false;
                for run in rle::encode(&groups) {
                    if !collapsed && run.value == 0 && run.longest {
                        out.push_str("::");
                        collapsed = true;
                        need_sep = false;
                        continue;
                    }
                    for _ in 0..run.count {
                        if need_sep {
                            out.push(':');
                        }
                        out.push_str(&self.group_str(run.value));
                        need_sep = true;
                    }
                }
                out
            }
        }
    }

    /// Full-width text without prefix: every IPv6 group is four hex digits.
    pub fn format_uncompressed(self, host: &BigInteger) -> String {
        let groups = self.groups(host);
        match self {
            Family::V4 => join_groups(self, &groups, "."),
            Family::V6 => groups
                .iter()
                .map(|g| format!("{:04x}", g))
                .collect::<Vec<_>>()
                .join(":"),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

fn split_low(host: &BigInteger, count: usize, width: usize, modulus: NonZeroU32) -> Vec<u32> {
    let mut rest = host.clone();
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(rest.small_mod(modulus));
        rest = &rest >> width;
    }
    out
}

fn join_groups(family: Family, groups: &[u32], sep: &str) -> String {
    groups
        .iter()
        .map(|&g| family.group_str(g))
        .collect::<Vec<_>>()
        .join(sep)
}
