//! # cidrkit - IPv4 and IPv6 address arithmetic
//!
//! This library parses, formats and manipulates IP addresses and CIDR
//! networks for both address families, including IPv4-mapped IPv6 addresses.
//!
//! ## Overview
//!
//! Every address is an [`IpAddress`]: a host number, a [`Prefix`] and a
//! [`Family`]. All arithmetic runs on [`BigInteger`], an unsigned
//! arbitrary-precision integer, so IPv6 values and sizes such as `2^128`
//! need no special cases.
//!
//! ## Key Features
//!
//! - **Parsing**: dotted IPv4 (including abbreviated forms and dotted
//!   netmasks), IPv6 with `::` compression, and `::ffff:a.b.c.d`
//! - **Canonical text**: compressed and uncompressed IPv6, binary and hex views
//! - **Prefix arithmetic**: network, broadcast, first/last host, inclusion
//! - **Subnetting**: subnet, supernet and uneven split
//! - **Aggregation**: collapse a network list into the minimal covering set
//! - **Reverse DNS**: `in-addr.arpa` / `ip6.arpa` zone names
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `bigint`: unsigned big integers, long division, radix and byte conversion
//! - `family`: per-family constants and text rendering
//! - `rle`: run-length coding of address groups, used for `::` compression
//! - `prefix`: prefix lengths and netmasks
//! - `address`: the address type, parsing, special ranges and reverse DNS
//! - `aggregate`: network summarization
//! - `config` / `config_loader`: YAML batch jobs for the `cidrkit` binary
//!
//! ## Example Usage
//!
//! ```rust
//! use cidrkit::{aggregate, IpAddress};
//!
//! let net: IpAddress = "172.16.10.1/24".parse()?;
//! assert_eq!(net.network().to_string(), "172.16.10.0/24");
//! assert_eq!(net.broadcast().to_s(), "172.16.10.255");
//! assert_eq!(net.dns_reverse(), "10.16.172.in-addr.arpa");
//!
//! let merged = aggregate::summarize_str(&["10.0.0.0/24", "10.0.1.0/24"])?;
//! assert_eq!(merged[0].to_string(), "10.0.0.0/23");
//! # Ok::<(), cidrkit::AddrError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`Result`], whose error is [`AddrError`]. The
//! config loader and the binary wrap these in `color_eyre` reports with
//! context.

pub mod address;
pub mod aggregate;
pub mod bigint;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod family;
pub mod prefix;
pub mod rle;

// Re-export commonly used types
pub use address::IpAddress;
pub use bigint::BigInteger;
pub use error::{AddrError, Result};
pub use family::Family;
pub use prefix::Prefix;
