//! Family-specific behavior: special ranges, classful networks, IPv4-mapped
//! IPv6 addresses and the well-known IPv6 constants.

use super::{parse::split_to_u32, to_network, IpAddress};
use crate::bigint::BigInteger;
use crate::error::{AddrError, Result};
use crate::family::Family;
use crate::prefix::Prefix;

/// RFC 1918 blocks.
const PRIVATE_V4: [(u32, usize); 3] = [(0x0a00_0000, 8), (0xac10_0000, 12), (0xc0a8_0000, 16)];
const LOOPBACK_V4: (u32, usize) = (0x7f00_0000, 8);
/// Unique local addresses, fd00::/8.
const PRIVATE_V6: (u128, usize) = (0xfd << 120, 8);

const MAPPED_MARKER: u32 = 0xffff;

/// The IPv4 address carried in the low 32 bits of `::ffff:a.b.c.d`, if any.
/// An IPv6 prefix of `96 + n` maps to an IPv4 prefix of `n`.
pub(crate) fn embedded_ipv4(host: &BigInteger, prefix: &Prefix) -> Option<Box<IpAddress>> {
    if prefix.family() != Family::V6 || (host >> 32).to_u32() != Some(MAPPED_MARKER) {
        return None;
    }
    let low = host.to_u128()? as u32;
    if low == 0 {
        return None;
    }
    let v4_length = Family::V4.bits().checked_sub(prefix.host_prefix())?;
    IpAddress::from_u32(low, v4_length).ok().map(Box::new)
}

/// Like [`embedded_ipv4`], but a mapped address whose prefix is shorter
/// than /96 is an error rather than a plain IPv6 address.
pub(crate) fn mapped_for_parse(host: &BigInteger, prefix: &Prefix) -> Result<Option<Box<IpAddress>>> {
    let marked = (host >> 32).to_u32() == Some(MAPPED_MARKER);
    let low_zero = host.to_u128().map_or(true, |v| v as u32 == 0);
    if marked && !low_zero && prefix.host_prefix() > Family::V4.bits() {
        return Err(AddrError::range(format!(
            "mapped address prefix /{} is shorter than /96",
            prefix.length()
        )));
    }
    Ok(embedded_ipv4(host, prefix))
}

impl IpAddress {
    /// `::1/128`
    pub fn ipv6_loopback() -> IpAddress {
        IpAddress {
            host: BigInteger::one(),
            prefix: Prefix::full(Family::V6),
            mapped: None,
        }
    }

    /// `::/128`
    pub fn ipv6_unspecified() -> IpAddress {
        IpAddress {
            host: BigInteger::zero(),
            prefix: Prefix::full(Family::V6),
            mapped: None,
        }
    }

    /// Parse a bare IPv4 address and give it its classful prefix: /8 for
    /// class A, /16 for class B, /24 for class C and /32 otherwise.
    pub fn parse_classful(s: &str) -> Result<IpAddress> {
        let host = split_to_u32(s.trim())?;
        let length = match host {
            h if h < 0x8000_0000 => 8,
            h if h < 0xc000_0000 => 16,
            h if h < 0xe000_0000 => 24,
            _ => 32,
        };
        IpAddress::from_u32(host, length)
    }

    /// Whether `self` lies inside `net/length` of the same family.
    fn within(&self, net: BigInteger, length: usize) -> bool {
        self.prefix.length() >= length
            && to_network(&self.host, self.family().bits() - length) == net
    }

    pub fn is_private(&self) -> bool {
        match self.family() {
            Family::V4 => PRIVATE_V4
                .iter()
                .any(|&(net, len)| self.within(BigInteger::from(net), len)),
            Family::V6 => self.within(BigInteger::from(PRIVATE_V6.0), PRIVATE_V6.1),
        }
    }

    pub fn is_loopback(&self) -> bool {
        match self.family() {
            Family::V4 => self.within(BigInteger::from(LOOPBACK_V4.0), LOOPBACK_V4.1),
            Family::V6 => self.host.is_one(),
        }
    }

    /// True only for the IPv6 address `::`.
    pub fn is_unspecified(&self) -> bool {
        self.is_ipv6() && self.host.is_zero()
    }

    /// True for `::ffff:a.b.c.d` addresses that carry their IPv4 form.
    pub fn is_mapped(&self) -> bool {
        self.mapped.is_some() && (&self.host >> 32).to_u32() == Some(MAPPED_MARKER)
    }

    pub fn is_class_a(&self) -> bool {
        self.is_ipv4() && self.host < BigInteger::from(0x8000_0000u32)
    }

    pub fn is_class_b(&self) -> bool {
        self.is_ipv4()
            && self.host >= BigInteger::from(0x8000_0000u32)
            && self.host < BigInteger::from(0xc000_0000u32)
    }

    pub fn is_class_c(&self) -> bool {
        self.is_ipv4()
            && self.host >= BigInteger::from(0xc000_0000u32)
            && self.host < BigInteger::from(0xe000_0000u32)
    }

    /// The same host value as an IPv6 address. An IPv4 `/n` becomes `/96+n`.
    pub fn to_ipv6(&self) -> IpAddress {
        match self.family() {
            Family::V4 => IpAddress {
                host: self.host.clone(),
                prefix: Prefix::new(96 + self.prefix.length(), Family::V6)
                    .unwrap_or_else(|_| Prefix::full(Family::V6)),
                mapped: None,
            },
            Family::V6 => self.clone(),
        }
    }

    /// `::ffff:a.b.c.d` for mapped addresses, the compressed form otherwise.
    pub fn to_s_mapped(&self) -> String {
        match self.mapped() {
            Some(v4) if self.is_mapped() => format!("::ffff:{}", v4.to_s()),
            _ => self.to_s(),
        }
    }

    /// [`to_s_mapped`](Self::to_s_mapped) with the IPv4 prefix length.
    pub fn to_string_mapped(&self) -> String {
        match self.mapped() {
            Some(v4) if self.is_mapped() => format!("{}/{}", self.to_s_mapped(), v4.prefix),
            _ => self.to_string(),
        }
    }
}
