//! ICMP echo wire format parsing and building.
//!
//! The following packet are supported:
//! - `ICMPv4` (header and echo request/reply body)
//! - `ICMPv6` (header and echo request/reply body)
//! - `IPv4` (header view, used to strip the header delivered by raw sockets)
//!
//! # Endianness
//!
//! The internal representation is held in network byte order (big-endian) and
//! all accessor methods take and return data in host byte order, converting as
//! necessary for the given architecture.
//!
//! # Example
//!
//! The following example builds an `ICMPv4` echo request packet:
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! use pingo_packet::checksum::icmp_ipv4_checksum;
//! use pingo_packet::icmpv4::echo::EchoPacket;
//! use pingo_packet::icmpv4::{IcmpCode, IcmpPacket, IcmpType};
//!
//! let mut buf = [0; IcmpPacket::minimum_packet_size()];
//! let mut icmp = EchoPacket::new(&mut buf)?;
//! icmp.set_icmp_type(IcmpType::EchoRequest);
//! icmp.set_icmp_code(IcmpCode(0));
//! icmp.set_identifier(1234);
//! icmp.set_sequence(10);
//! icmp.set_checksum(icmp_ipv4_checksum(icmp.packet()));
//! assert_eq!(icmp.packet(), &hex_literal::hex!("08 00 f3 23 04 d2 00 0a"));
//! # Ok(())
//! # }
//! ```
//!
//! The following example parses an `ICMPv6` echo reply:
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! use pingo_packet::icmpv6::echo::EchoPacket;
//! use pingo_packet::icmpv6::{IcmpPacket, IcmpType};
//!
//! let buf = hex_literal::hex!("81 00 00 00 30 39 00 04 68 69");
//! assert_eq!(IcmpType::EchoReply, IcmpPacket::new_view(&buf)?.get_icmp_type());
//! let packet = EchoPacket::new_view(&buf)?;
//! assert_eq!(12345, packet.get_identifier());
//! assert_eq!(4, packet.get_sequence());
//! assert_eq!(b"hi", packet.payload());
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod buffer;

/// Packet errors.
pub mod error;

/// Functions for calculating network checksums.
pub mod checksum;

/// `ICMPv4` packets.
pub mod icmpv4;

/// `ICMPv6` packets.
pub mod icmpv6;

/// `IPv4` packets.
pub mod ipv4;
