//! IP addresses with their prefix.
//!
//! [`IpAddress`] is an immutable value: a host number, a [`Prefix`] of the
//! same family and, for IPv4-mapped IPv6 addresses, the embedded IPv4
//! address. Every derived address (network, broadcast, subnets) is a new
//! value.

pub mod dns;
pub mod parse;
pub mod special;

// Re-export commonly used types
pub use parse::{AddressPatterns, PATTERNS};

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::aggregate;
use crate::bigint::{BigInteger, Radix};
use crate::error::{AddrError, Result};
use crate::family::Family;
use crate::prefix::Prefix;

/// An IPv4 or IPv6 address together with its prefix length.
#[derive(Debug, Clone)]
pub struct IpAddress {
    host: BigInteger,
    prefix: Prefix,
    mapped: Option<Box<IpAddress>>,
}

/// Largest address list a single call may build.
const MAX_MATERIALIZED: usize = isize::MAX as usize / std::mem::size_of::<IpAddress>();

/// Clear the low `host_prefix` bits.
pub(crate) fn to_network(host: &BigInteger, host_prefix: usize) -> BigInteger {
    &(host >> host_prefix) << host_prefix
}

impl IpAddress {
    /// Build an address from its parts.
    ///
    /// # Returns
    ///
    /// [`AddrError::Range`] if `host` does not fit the prefix's family.
    pub fn new(host: BigInteger, prefix: Prefix) -> Result<Self> {
        let family = prefix.family();
        if host.bit_len() > family.bits() {
            return Err(AddrError::range(format!(
                "host {} does not fit in {} bits",
                host,
                family.bits()
            )));
        }
        Ok(IpAddress {
            host,
            prefix,
            mapped: None,
        })
    }

    pub fn from_u32(host: u32, prefix: usize) -> Result<Self> {
        Self::new(BigInteger::from(host), Prefix::new(prefix, Family::V4)?)
    }

    pub fn from_u128(host: u128, prefix: usize) -> Result<Self> {
        Self::new(BigInteger::from(host), Prefix::new(prefix, Family::V6)?)
    }

    /// Same family, new host and prefix. Callers keep `host` in range.
    pub(crate) fn derive(&self, host: BigInteger, prefix: Prefix) -> Self {
        let mapped = match self.mapped {
            Some(_) => special::embedded_ipv4(&host, &prefix),
            None => None,
        };
        IpAddress {
            host,
            prefix,
            mapped,
        }
    }

    pub fn family(&self) -> Family {
        self.prefix.family()
    }

    pub fn host_address(&self) -> &BigInteger {
        &self.host
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// The embedded IPv4 address of a mapped IPv6 address.
    pub fn mapped(&self) -> Option<&IpAddress> {
        self.mapped.as_deref()
    }

    pub fn is_ipv4(&self) -> bool {
        self.family() == Family::V4
    }

    pub fn is_ipv6(&self) -> bool {
        self.family() == Family::V6
    }

    pub fn host_u32(&self) -> Option<u32> {
        self.host.to_u32()
    }

    pub fn host_u128(&self) -> Option<u128> {
        self.host.to_u128()
    }

    pub fn netmask(&self) -> BigInteger {
        self.prefix.netmask().clone()
    }

    /// Number of addresses in the network.
    pub fn size(&self) -> BigInteger {
        self.prefix.size()
    }

    /// The address with all host bits cleared.
    pub fn network(&self) -> IpAddress {
        self.derive(
            to_network(&self.host, self.prefix.host_prefix()),
            self.prefix.clone(),
        )
    }

    /// The address with all host bits set.
    pub fn broadcast(&self) -> IpAddress {
        let host = &to_network(&self.host, self.prefix.host_prefix()) + &self.prefix.host_mask();
        self.derive(host, self.prefix.clone())
    }

    /// First usable host. For IPv4 this skips the network address. The result
    /// never passes the broadcast address, so for a /32 (or an IPv6 /128)
    /// `first` is the host itself.
    pub fn first(&self) -> IpAddress {
        let network = to_network(&self.host, self.prefix.host_prefix());
        let broadcast = &network + &self.prefix.host_mask();
        let host = &network + &BigInteger::from(self.family().host_offset());
        self.derive(host.min(broadcast), self.prefix.clone())
    }

    /// Last usable host. For IPv4 this skips the broadcast address. The result
    /// never drops below the network address, so for a /32 `last` is the host
    /// itself.
    pub fn last(&self) -> IpAddress {
        let network = to_network(&self.host, self.prefix.host_prefix());
        let broadcast = &network + &self.prefix.host_mask();
        let host = broadcast.saturating_sub(&BigInteger::from(self.family().host_offset()));
        self.derive(host.max(network), self.prefix.clone())
    }

    /// True when `other` lies entirely inside this network.
    ///
    /// # Examples
    ///
    /// ```
    /// use cidrkit::IpAddress;
    ///
    /// let net: IpAddress = "10.0.0.0/8".parse()?;
    /// assert!(net.includes(&"10.1.1.1/32".parse()?));
    /// assert!(!net.includes(&"10.0.0.0/7".parse()?));
    /// # Ok::<(), cidrkit::AddrError>(())
    /// ```
    pub fn includes(&self, other: &IpAddress) -> bool {
        self.is_same_kind(other)
            && self.prefix.length() <= other.prefix.length()
            && to_network(&self.host, self.prefix.host_prefix())
                == to_network(&other.host, self.prefix.host_prefix())
    }

    /// True when every address in `others` lies inside this network.
    pub fn includes_all(&self, others: &[IpAddress]) -> bool {
        others.iter().all(|other| self.includes(other))
    }

    /// True when both addresses belong to the same family.
    pub fn is_same_kind(&self, other: &IpAddress) -> bool {
        self.family() == other.family()
    }

    /// True if this is the network address of a prefix shorter than the
    /// family width.
    pub fn is_network(&self) -> bool {
        self.prefix.length() != self.family().bits()
            && self.host == to_network(&self.host, self.prefix.host_prefix())
    }

    /// Copy with a different prefix length; the host bits are kept.
    pub fn change_prefix(&self, length: usize) -> Result<IpAddress> {
        let prefix = self.prefix.with_length(length)?;
        Ok(self.derive(self.host.clone(), prefix))
    }

    /// Copy with the prefix given as a netmask string or decimal length.
    pub fn change_netmask(&self, netmask: &str) -> Result<IpAddress> {
        let length = parse::netmask_prefix_for(netmask, self.family())?;
        self.change_prefix(length)
    }

    /// Split the network into all subnets of `length`.
    pub fn subnet(&self, length: usize) -> Result<Vec<IpAddress>> {
        if length < self.prefix.length() || length > self.family().bits() {
            return Err(AddrError::range(format!(
                "subnet /{} must lie between /{} and /{}",
                length,
                self.prefix.length(),
                self.family().bits()
            )));
        }
        let too_many = || AddrError::range(format!("too many /{} subnets in {}", length, self));
        let count = u32::try_from(length - self.prefix.length())
            .ok()
            .and_then(|shift| 1usize.checked_shl(shift))
            .filter(|&count| count <= MAX_MATERIALIZED)
            .ok_or_else(too_many)?;

        let prefix = self.prefix.with_length(length)?;
        let step = prefix.size();
        let mut host = to_network(&self.host, self.prefix.host_prefix());
        let mut subnets = Vec::new();
        subnets.try_reserve_exact(count).map_err(|_| too_many())?;
        for _ in 0..count {
            let next = &host + &step;
            subnets.push(self.derive(host, prefix.clone()));
            host = next;
        }
        Ok(subnets)
    }

    /// The network of `length` bits that contains this address.
    pub fn supernet(&self, length: usize) -> Result<IpAddress> {
        if length >= self.prefix.length() {
            return Err(AddrError::range(format!(
                "supernet /{} must be shorter than /{}",
                length,
                self.prefix.length()
            )));
        }
        let prefix = self.prefix.with_length(length)?;
        Ok(self.derive(to_network(&self.host, prefix.host_prefix()), prefix))
    }

    /// Split into exactly `count` networks.
    ///
    /// The network is first cut into the smallest power of two of equal
    /// subnets that is at least `count`. Adjacent pairs are then merged from
    /// the end until `count` remain, so an uneven split ends with larger
    /// blocks.
    pub fn split(&self, count: usize) -> Result<Vec<IpAddress>> {
        let host_prefix = self.prefix.host_prefix();
        let too_many = host_prefix < usize::BITS as usize && count > (1usize << host_prefix);
        if count == 0 || too_many {
            return Err(AddrError::range(format!("cannot split {} into {} networks", self, count)));
        }
        let extra_bits = count
            .checked_next_power_of_two()
            .map(|n| n.trailing_zeros() as usize)
            .ok_or_else(|| AddrError::range(format!("cannot split {} into {} networks", self, count)))?;

        let mut networks = self.subnet(self.prefix.length() + extra_bits)?;
        while networks.len() > count {
            if !aggregate::sum_first_found(&mut networks) {
                break;
            }
        }
        Ok(networks)
    }

    /// Visit every address from the network address to the broadcast address.
    pub fn each<F: FnMut(IpAddress)>(&self, f: F) {
        self.walk(self.network().host, self.broadcast().host, f);
    }

    /// Visit every usable host from [`first`](Self::first) to [`last`](Self::last).
    pub fn each_host<F: FnMut(IpAddress)>(&self, f: F) {
        self.walk(self.first().host, self.last().host, f);
    }

    fn walk<F: FnMut(IpAddress)>(&self, from: BigInteger, to: BigInteger, mut f: F) {
        let one = BigInteger::one();
        let mut host = from;
        while host <= to {
            let next = &host + &one;
            f(self.derive(host, self.prefix.clone()));
            host = next;
        }
    }

    /// The next address, if it is still a usable host of this network.
    pub fn inc(&self) -> Option<IpAddress> {
        let host = &self.host + &BigInteger::one();
        (host <= self.last().host).then(|| self.derive(host, self.prefix.clone()))
    }

    /// The previous address, if it is still a usable host of this network.
    pub fn dec(&self) -> Option<IpAddress> {
        let host = self.host.checked_sub(&BigInteger::one())?;
        (host >= self.first().host).then(|| self.derive(host, self.prefix.clone()))
    }

    /// Compressed address text without the prefix.
    pub fn to_s(&self) -> String {
        self.family().format_compressed(&self.host)
    }

    pub fn to_s_uncompressed(&self) -> String {
        self.family().format_uncompressed(&self.host)
    }

    pub fn to_string_uncompressed(&self) -> String {
        format!("{}/{}", self.to_s_uncompressed(), self.prefix)
    }

    /// Zero-padded binary rendering of the host.
    pub fn bits(&self) -> String {
        let raw = self.host.to_str_radix(Radix::Binary);
        format!("{:0>width$}", raw, width = self.family().bits())
    }

    pub fn to_hex(&self) -> String {
        self.host.to_str_radix(Radix::Hex)
    }

    /// Group values, most significant first.
    pub fn parts(&self) -> Vec<u32> {
        self.family().groups(&self.host)
    }

    /// Groups as fixed-width hex strings.
    pub fn parts_hex_str(&self) -> Vec<String> {
        let width = self.family().group_bits() / 4;
        self.parts()
            .iter()
            .map(|p| format!("{:0width$x}", p, width = width))
            .collect()
    }

    /// Reverse-DNS label values, least significant first.
    pub fn dns_parts(&self) -> Vec<u32> {
        self.family().dns_groups(&self.host)
    }

    /// Aggregate `addresses` into the smallest covering set of networks.
    pub fn summarize(addresses: &[IpAddress]) -> Vec<IpAddress> {
        aggregate::summarize(addresses)
    }
}

impl PartialEq for IpAddress {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.host == other.host
    }
}

impl Eq for IpAddress {}

impl Hash for IpAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.prefix.hash(state);
        self.host.hash(state);
    }
}

impl Ord for IpAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.family()
            .cmp(&other.family())
            .then_with(|| self.host.cmp(&other.host))
            .then_with(|| self.prefix.length().cmp(&other.prefix.length()))
    }
}

impl PartialOrd for IpAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.to_s(), self.prefix)
    }
}

impl FromStr for IpAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self> {
        IpAddress::parse(s)
    }
}

/// `a + b` aggregates the two addresses.
impl Add for &IpAddress {
    type Output = Vec<IpAddress>;

    fn add(self, other: &IpAddress) -> Vec<IpAddress> {
        aggregate::summarize(&[self.clone(), other.clone()])
    }
}

/// `a - b` is the distance between the two hosts.
impl Sub for &IpAddress {
    type Output = BigInteger;

    fn sub(self, other: &IpAddress) -> BigInteger {
        self.host.abs_diff(&other.host)
    }
}

impl Serialize for IpAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        IpAddress::parse(&text).map_err(serde::de::Error::custom)
    }
}
