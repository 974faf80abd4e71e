//! Text parsing for IPv4, IPv6 and IPv4-mapped IPv6 addresses.

use std::sync::LazyLock;

use regex::Regex;

use super::{special, IpAddress};
use crate::bigint::BigInteger;
use crate::error::{AddrError, Result};
use crate::family::Family;
use crate::prefix::Prefix;

/// Compiled patterns used to classify and validate address text
pub struct AddressPatterns {
    /// A colon followed later by a dot: "::ffff:1.2.3.4"
    pub mapped: Regex,
    /// Any dot: "10.0.0.1"
    pub ipv4: Regex,
    /// Any colon: "2001:db8::1"
    pub ipv6: Regex,
    /// Plain decimal numeral
    pub decimal: Regex,
    /// Plain hex numeral
    pub hex: Regex,
}

impl AddressPatterns {
    pub fn new() -> Self {
        Self {
            mapped: Regex::new(r":.+\.").expect("Invalid mapped regex"),
            ipv4: Regex::new(r"\.").expect("Invalid ipv4 regex"),
            ipv6: Regex::new(r":").expect("Invalid ipv6 regex"),
            decimal: Regex::new(r"^\d+$").expect("Invalid decimal regex"),
            hex: Regex::new(r"^[0-9a-fA-F]+$").expect("Invalid hex regex"),
        }
    }
}

impl Default for AddressPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global patterns instance
pub static PATTERNS: LazyLock<AddressPatterns> = LazyLock::new(AddressPatterns::new);

impl IpAddress {
    /// Parse an address in any supported notation, with optional `/prefix`.
    ///
    /// # Arguments
    ///
    /// * `s` - `a.b.c.d[/len|/mask]`, `x:x::x[/len]` or `::ffff:a.b.c.d[/len]`
    ///
    /// # Examples
    ///
    /// ```
    /// use cidrkit::IpAddress;
    ///
    /// let ip = IpAddress::parse("2001:db8::8:800:200c:417a/64")?;
    /// assert_eq!(ip.network().to_string(), "2001:db8::/64");
    /// # Ok::<(), cidrkit::AddrError>(())
    /// ```
    pub fn parse(s: &str) -> Result<IpAddress> {
        if PATTERNS.mapped.is_match(s) {
            Self::parse_mapped(s)
        } else if PATTERNS.ipv4.is_match(s) {
            Self::parse_ipv4(s)
        } else if PATTERNS.ipv6.is_match(s) {
            Self::parse_ipv6(s)
        } else {
            Err(AddrError::parse(s, "not an IPv4 or IPv6 address"))
        }
    }

    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Validate a bare IPv4 address (no prefix).
    pub fn is_valid_ipv4(addr: &str) -> bool {
        split_to_u32(addr).is_ok()
    }

    /// Validate a bare IPv6 address (no prefix).
    pub fn is_valid_ipv6(addr: &str) -> bool {
        split_to_num(addr).is_ok()
    }

    /// True for a contiguous netmask or a decimal prefix length.
    pub fn is_valid_netmask(s: &str) -> bool {
        Self::parse_netmask_to_prefix(s).is_ok()
    }

    pub fn parse_ipv4(s: &str) -> Result<IpAddress> {
        let (addr, mask) = split_at_slash(s)?;
        let host = split_to_u32(addr)?;
        let length = match mask {
            Some(mask) => netmask_prefix_for(mask, Family::V4)?,
            None => Family::V4.bits(),
        };
        IpAddress::new(BigInteger::from(host), Prefix::new(length, Family::V4)?)
    }

    pub fn parse_ipv6(s: &str) -> Result<IpAddress> {
        let (addr, mask) = split_at_slash(s)?;
        let host = split_to_num(addr)?;
        let length = match mask {
            Some(mask) => parse_decimal(mask)?,
            None => Family::V6.bits(),
        };
        let mut ip = IpAddress::new(host, Prefix::new(length, Family::V6)?)?;
        ip.mapped = special::mapped_for_parse(&ip.host, &ip.prefix)?;
        Ok(ip)
    }

    /// Parse an IPv6 address whose last group is written as dotted IPv4.
    ///
    /// The IPv4 tail (with any netmask) is parsed first and re-encoded as two
    /// hex groups. The result must be a `::ffff:0:0/96` address; a tail that
    /// follows only zero groups ("::1.2.3.4") is promoted to that form.
    pub fn parse_mapped(s: &str) -> Result<IpAddress> {
        let (addr, mask) = split_at_slash(s)?;
        let segments: Vec<&str> = addr.split(':').collect();
        let (v4_text, head) = segments
            .split_last()
            .filter(|(_, head)| !head.is_empty())
            .ok_or_else(|| AddrError::parse(s, "missing IPv6 part"))?;

        let v4 = match mask {
            Some(mask) => Self::parse_ipv4(&format!("{}/{}", v4_text, mask))?,
            None => Self::parse_ipv4(v4_text)?,
        };
        let packed = v4
            .host_u32()
            .ok_or_else(|| AddrError::Format(format!("{} is not a 32-bit value", v4)))?;
        let length = 96 + v4.prefix.length();
        let tail = format!("{:x}:{:x}/{}", packed >> 16, packed & 0xffff, length);

        let ip = Self::parse_ipv6(&format!("{}:{}", head.join(":"), tail))?;
        if ip.is_mapped() {
            return Ok(ip);
        }
        if !(&ip.host >> 32).is_zero() {
            return Err(AddrError::Format(format!("{} is not an IPv4-mapped address", s)));
        }
        Self::parse_ipv6(&format!("::ffff:{}", tail))
    }

    /// Prefix length from a decimal string or a netmask address.
    pub fn parse_netmask_to_prefix(s: &str) -> Result<usize> {
        if PATTERNS.decimal.is_match(s) {
            return parse_decimal(s);
        }
        let ip = Self::parse(s)?;
        netmask_to_prefix(&ip.host, ip.family().bits())
    }
}

/// Prefix length of a netmask value of `bits` width.
///
/// Bits are scanned from the least significant end: zeros are host bits until
/// the first one, after which every bit must be one.
pub fn netmask_to_prefix(netmask: &BigInteger, bits: usize) -> Result<usize> {
    if netmask.bit_len() > bits {
        return Err(AddrError::parse(&netmask.to_string(), "netmask wider than the address"));
    }
    let mut host_bits = 0;
    let mut in_network = false;
    for i in 0..bits {
        match (in_network, netmask.bit(i)) {
            (false, false) => host_bits += 1,
            (false, true) => in_network = true,
            (true, true) => {}
            (true, false) => {
                return Err(AddrError::parse(
                    &netmask.to_string(),
                    "netmask is not a contiguous run of ones",
                ))
            }
        }
    }
    Ok(bits - host_bits)
}

/// Prefix length from `mask`, requiring a netmask address to be of `family`.
pub(crate) fn netmask_prefix_for(mask: &str, family: Family) -> Result<usize> {
    if PATTERNS.decimal.is_match(mask) {
        return parse_decimal(mask);
    }
    let ip = IpAddress::parse(mask)?;
    if ip.family() != family {
        return Err(AddrError::parse(mask, format!("not an {} netmask", family)));
    }
    netmask_to_prefix(&ip.host, family.bits())
}

fn parse_decimal(s: &str) -> Result<usize> {
    if !PATTERNS.decimal.is_match(s) {
        return Err(AddrError::parse(s, "prefix must be a decimal number"));
    }
    s.parse::<usize>()
        .map_err(|e| AddrError::parse(s, e.to_string()))
}

/// Split "addr/mask" into trimmed parts.
pub(crate) fn split_at_slash(s: &str) -> Result<(&str, Option<&str>)> {
    let mut pieces = s.trim().split('/');
    let addr = pieces.next().map(str::trim).unwrap_or_default();
    let mask = pieces.next().map(str::trim);
    if pieces.next().is_some() {
        return Err(AddrError::parse(s, "more than one '/'"));
    }
    if addr.is_empty() {
        return Err(AddrError::parse(s, "empty address"));
    }
    if mask == Some("") {
        return Err(AddrError::parse(s, "empty prefix"));
    }
    Ok((addr, mask))
}

/// Dotted decimal to a 32-bit value. With fewer than four parts the last
/// part is the low octet and the others fill from the top: "10.1" is 10.0.0.1.
pub(crate) fn split_to_u32(addr: &str) -> Result<u32> {
    let parts: Vec<&str> = addr.split('.').collect();
    if parts.len() > 4 {
        return Err(AddrError::parse(addr, "more than four octets"));
    }
    let octets = parts
        .iter()
        .map(|part| {
            if !PATTERNS.decimal.is_match(part) {
                return Err(AddrError::parse(addr, format!("'{}' is not a decimal octet", part)));
            }
            match part.parse::<u32>() {
                Ok(v) if v <= 255 => Ok(v),
                _ => Err(AddrError::parse(addr, format!("octet {} above 255", part))),
            }
        })
        .collect::<Result<Vec<u32>>>()?;

    let (last, leading) = octets
        .split_last()
        .ok_or_else(|| AddrError::parse(addr, "empty address"))?;
    let host = leading
        .iter()
        .enumerate()
        .fold(*last, |acc, (i, &octet)| acc | (octet << (24 - 8 * i)));
    Ok(host)
}

/// Colon-hex text to a 128-bit value, expanding at most one "::".
pub(crate) fn split_to_num(addr: &str) -> Result<BigInteger> {
    let halves: Vec<&str> = addr.split("::").collect();
    match halves.as_slice() {
        [whole] => {
            let (value, count) = split_on_colon(whole)?;
            if count != Family::V6.group_count() {
                return Err(AddrError::parse(addr, format!("expected 8 groups, found {}", count)));
            }
            Ok(value)
        }
        [head, tail] => {
            let (high, high_count) = split_on_colon(head)?;
            let (low, low_count) = split_on_colon(tail)?;
            if high_count + low_count >= Family::V6.group_count() {
                return Err(AddrError::parse(addr, "'::' must stand for at least one group"));
            }
            let shift = Family::V6.bits() - high_count * Family::V6.group_bits();
            Ok(&(&high << shift) + &low)
        }
        _ => Err(AddrError::parse(addr, "more than one '::'")),
    }
}

/// Parse colon-separated hex groups into a value and a group count.
fn split_on_colon(s: &str) -> Result<(BigInteger, usize)> {
    let s = s.trim();
    if s.is_empty() {
        return Ok((BigInteger::zero(), 0));
    }
    let mut value = BigInteger::zero();
    let mut count = 0;
    for group in s.split(':') {
        if !PATTERNS.hex.is_match(group) {
            return Err(AddrError::parse(s, format!("'{}' is not a hex group", group)));
        }
        let v = match u32::from_str_radix(group, 16) {
            Ok(v) if v <= 0xffff => v,
            _ => return Err(AddrError::parse(s, format!("group {} above ffff", group))),
        };
        count += 1;
        if count > Family::V6.group_count() {
            return Err(AddrError::parse(s, "more than eight groups"));
        }
        value = value.mul_add_small(0x1_0000, v);
    }
    Ok((value, count))
}
