use crate::config::Protocol;
use crate::error::{Error, Result};
use crate::types::{Identifier, Sequence};
use pingo_packet::checksum::icmp_ipv4_checksum;
use pingo_packet::{icmpv4, icmpv6};
use std::fmt::{Display, Formatter};

/// The maximum size of an `ICMP` message we will send.
///
/// The largest `IPv4` datagram less the minimum `IPv4` header.
pub const MAX_ICMP_PACKET_SIZE: usize = 65_515;

/// An `ICMP` message type, from either the `ICMPv4` or the `ICMPv6` type space.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IcmpMessageType {
    V4(icmpv4::IcmpType),
    V6(icmpv6::IcmpType),
}

impl IcmpMessageType {
    /// The echo request type for a protocol.
    #[must_use]
    pub const fn echo_request(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Icmp => Self::V4(icmpv4::IcmpType::EchoRequest),
            Protocol::IcmpV6 => Self::V6(icmpv6::IcmpType::EchoRequest),
        }
    }

    /// The numeric type.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::V4(ty) => ty.id(),
            Self::V6(ty) => ty.id(),
        }
    }

    /// Is this an echo reply of either protocol?
    #[must_use]
    pub const fn is_echo_reply(self) -> bool {
        matches!(
            self,
            Self::V4(icmpv4::IcmpType::EchoReply) | Self::V6(icmpv6::IcmpType::EchoReply)
        )
    }
}

impl From<icmpv4::IcmpType> for IcmpMessageType {
    fn from(ty: icmpv4::IcmpType) -> Self {
        Self::V4(ty)
    }
}

impl From<icmpv6::IcmpType> for IcmpMessageType {
    fn from(ty: icmpv6::IcmpType) -> Self {
        Self::V6(ty)
    }
}

impl Display for IcmpMessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V4(ty) => write!(f, "icmp {ty:?} ({})", ty.id()),
            Self::V6(ty) => write!(f, "ipv6-icmp {ty:?} ({})", ty.id()),
        }
    }
}

/// An `ICMP` echo request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EchoRequest<'a> {
    pub icmp_type: IcmpMessageType,
    pub identifier: Identifier,
    pub sequence: Sequence,
    pub payload: &'a [u8],
}

impl<'a> EchoRequest<'a> {
    #[must_use]
    pub const fn new(
        icmp_type: IcmpMessageType,
        identifier: Identifier,
        sequence: Sequence,
        payload: &'a [u8],
    ) -> Self {
        Self {
            icmp_type,
            identifier,
            sequence,
            payload,
        }
    }

    /// Marshal the request to wire format.
    ///
    /// The checksum of an `ICMPv4` message is computed here, the checksum of
    /// an `ICMPv6` message is left as zero for the kernel to fill.
    pub fn marshal(&self) -> Result<Vec<u8>> {
        let size = icmpv4::echo::EchoPacket::minimum_packet_size() + self.payload.len();
        if size > MAX_ICMP_PACKET_SIZE {
            return Err(Error::InvalidPacketSize(size));
        }
        let mut buf = vec![0_u8; size];
        match self.icmp_type {
            IcmpMessageType::V4(ty) => {
                let mut packet = icmpv4::echo::EchoPacket::new(&mut buf)?;
                packet.set_icmp_type(ty);
                packet.set_icmp_code(icmpv4::IcmpCode(0));
                packet.set_identifier(self.identifier.0);
                packet.set_sequence(self.sequence.0);
                packet.set_payload(self.payload);
                packet.set_checksum(icmp_ipv4_checksum(packet.packet()));
            }
            IcmpMessageType::V6(ty) => {
                let mut packet = icmpv6::echo::EchoPacket::new(&mut buf)?;
                packet.set_icmp_type(ty);
                packet.set_icmp_code(icmpv6::IcmpCode(0));
                packet.set_identifier(self.identifier.0);
                packet.set_sequence(self.sequence.0);
                packet.set_payload(self.payload);
            }
        }
        Ok(buf)
    }
}

/// The echo fields of a received echo request or reply.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EchoBody {
    pub identifier: u16,
    pub sequence: u16,
    pub payload_len: usize,
}

/// A received `ICMP` message.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ReplyMessage {
    pub icmp_type: IcmpMessageType,
    pub code: u8,
    pub checksum: u16,
    /// The echo fields, present for echo requests and replies only.
    pub echo: Option<EchoBody>,
}

impl ReplyMessage {
    /// Parse an `ICMP` message in the type space of `protocol`.
    ///
    /// The buffer must start at the `ICMP` header.
    pub fn parse(protocol: Protocol, buf: &[u8]) -> Result<Self> {
        match protocol {
            Protocol::Icmp => Self::parse_v4(buf),
            Protocol::IcmpV6 => Self::parse_v6(buf),
        }
    }

    fn parse_v4(buf: &[u8]) -> Result<Self> {
        let packet = icmpv4::IcmpPacket::new_view(buf)?;
        let icmp_type = packet.get_icmp_type();
        let echo = match icmp_type {
            icmpv4::IcmpType::EchoReply | icmpv4::IcmpType::EchoRequest => {
                let echo = icmpv4::echo::EchoPacket::new_view(buf)?;
                Some(EchoBody {
                    identifier: echo.get_identifier(),
                    sequence: echo.get_sequence(),
                    payload_len: echo.payload().len(),
                })
            }
            _ => None,
        };
        Ok(Self {
            icmp_type: IcmpMessageType::V4(icmp_type),
            code: packet.get_icmp_code().0,
            checksum: packet.get_checksum(),
            echo,
        })
    }

    fn parse_v6(buf: &[u8]) -> Result<Self> {
        let packet = icmpv6::IcmpPacket::new_view(buf)?;
        let icmp_type = packet.get_icmp_type();
        let echo = match icmp_type {
            icmpv6::IcmpType::EchoReply | icmpv6::IcmpType::EchoRequest => {
                let echo = icmpv6::echo::EchoPacket::new_view(buf)?;
                Some(EchoBody {
                    identifier: echo.get_identifier(),
                    sequence: echo.get_sequence(),
                    payload_len: echo.payload().len(),
                })
            }
            _ => None,
        };
        Ok(Self {
            icmp_type: IcmpMessageType::V6(icmp_type),
            code: packet.get_icmp_code().0,
            checksum: packet.get_checksum(),
            echo,
        })
    }
}
