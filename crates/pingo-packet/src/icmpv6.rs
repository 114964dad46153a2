use crate::buffer::Buffer;
use crate::error::{Error, Result};

/// The type of `ICMPv6` packet.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum IcmpType {
    DestinationUnreachable,
    PacketTooBig,
    TimeExceeded,
    ParameterProblem,
    EchoRequest,
    EchoReply,
    Other(u8),
}

impl IcmpType {
    #[must_use]
    pub const fn id(&self) -> u8 {
        match self {
            Self::DestinationUnreachable => 1,
            Self::PacketTooBig => 2,
            Self::TimeExceeded => 3,
            Self::ParameterProblem => 4,
            Self::EchoRequest => 128,
            Self::EchoReply => 129,
            Self::Other(id) => *id,
        }
    }
}

impl From<u8> for IcmpType {
    fn from(val: u8) -> Self {
        match val {
            1 => Self::DestinationUnreachable,
            2 => Self::PacketTooBig,
            3 => Self::TimeExceeded,
            4 => Self::ParameterProblem,
            128 => Self::EchoRequest,
            129 => Self::EchoReply,
            id => Self::Other(id),
        }
    }
}

/// The `ICMPv6` code.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct IcmpCode(pub u8);

impl From<u8> for IcmpCode {
    fn from(val: u8) -> Self {
        Self(val)
    }
}

const TYPE_OFFSET: usize = 0;
const CODE_OFFSET: usize = 1;
const CHECKSUM_OFFSET: usize = 2;

/// Represents an `ICMPv6` packet of any type.
///
/// Only the common header fields are exposed, the message body (from byte 4)
/// is interpreted by the type specific packets.
///
/// The internal representation is held in network byte order (big-endian) and all accessor methods
/// take and return data in host byte order, converting as necessary for the given architecture.
#[derive(Debug)]
pub struct IcmpPacket<'a> {
    buf: Buffer<'a>,
}

impl<'a> IcmpPacket<'a> {
    pub fn new_view(packet: &'a [u8]) -> Result<Self> {
        if packet.len() >= Self::minimum_packet_size() {
            Ok(Self {
                buf: Buffer::Immutable(packet),
            })
        } else {
            Err(Error::InsufficientPacketBuffer(
                String::from("IcmpPacket"),
                Self::minimum_packet_size(),
                packet.len(),
            ))
        }
    }

    #[must_use]
    pub const fn minimum_packet_size() -> usize {
        8
    }

    #[must_use]
    pub fn get_icmp_type(&self) -> IcmpType {
        IcmpType::from(self.buf.read(TYPE_OFFSET))
    }

    #[must_use]
    pub fn get_icmp_code(&self) -> IcmpCode {
        IcmpCode::from(self.buf.read(CODE_OFFSET))
    }

    #[must_use]
    pub fn get_checksum(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(CHECKSUM_OFFSET))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, IcmpType::DestinationUnreachable)]
    #[test_case(2, IcmpType::PacketTooBig)]
    #[test_case(3, IcmpType::TimeExceeded)]
    #[test_case(4, IcmpType::ParameterProblem)]
    #[test_case(128, IcmpType::EchoRequest)]
    #[test_case(129, IcmpType::EchoReply)]
    #[test_case(135, IcmpType::Other(135))]
    fn test_icmp_type(id: u8, expected: IcmpType) {
        let buf = [id, 0, 0, 0, 0, 0, 0, 0];
        let packet = IcmpPacket::new_view(&buf).unwrap();
        assert_eq!(expected, packet.get_icmp_type());
        assert_eq!(id, expected.id());
    }

    #[test]
    fn test_view_destination_unreachable() {
        let buf = hex_literal::hex!("01 04 1a 2b 00 00 00 00 60 00");
        let packet = IcmpPacket::new_view(&buf).unwrap();
        assert_eq!(IcmpType::DestinationUnreachable, packet.get_icmp_type());
        assert_eq!(IcmpCode(4), packet.get_icmp_code());
        assert_eq!(0x1a2b, packet.get_checksum());
    }

    #[test]
    fn test_new_view_insufficient_buffer() {
        const SIZE: usize = IcmpPacket::minimum_packet_size();
        let buf = [0_u8; SIZE - 1];
        let err = IcmpPacket::new_view(&buf).unwrap_err();
        assert_eq!(
            Error::InsufficientPacketBuffer(String::from("IcmpPacket"), SIZE, SIZE - 1),
            err
        );
    }
}

pub mod echo {
    use crate::buffer::Buffer;
    use crate::error::{Error, Result};
    use crate::icmpv6::{IcmpCode, IcmpType};

    const TYPE_OFFSET: usize = 0;
    const CODE_OFFSET: usize = 1;
    const IDENTIFIER_OFFSET: usize = 4;
    const SEQUENCE_OFFSET: usize = 6;

    /// Represents an `ICMPv6` `EchoRequest` or `EchoReply` packet.
    ///
    /// Both messages share a single layout ([rfc4443] section 4).
    ///
    /// The internal representation is held in network byte order (big-endian) and all accessor
    /// methods take and return data in host byte order, converting as necessary for the given
    /// architecture.
    ///
    /// [rfc4443]: https://datatracker.ietf.org/doc/html/rfc4443#section-4
    #[derive(Debug)]
    pub struct EchoPacket<'a> {
        buf: Buffer<'a>,
    }

    impl<'a> EchoPacket<'a> {
        pub fn new(packet: &'a mut [u8]) -> Result<Self> {
            if packet.len() >= Self::minimum_packet_size() {
                Ok(Self {
                    buf: Buffer::Mutable(packet),
                })
            } else {
                Err(Error::InsufficientPacketBuffer(
                    String::from("EchoPacket"),
                    Self::minimum_packet_size(),
                    packet.len(),
                ))
            }
        }

        pub fn new_view(packet: &'a [u8]) -> Result<Self> {
            if packet.len() >= Self::minimum_packet_size() {
                Ok(Self {
                    buf: Buffer::Immutable(packet),
                })
            } else {
                Err(Error::InsufficientPacketBuffer(
                    String::from("EchoPacket"),
                    Self::minimum_packet_size(),
                    packet.len(),
                ))
            }
        }

        #[must_use]
        pub const fn minimum_packet_size() -> usize {
            8
        }

        #[must_use]
        pub fn get_identifier(&self) -> u16 {
            u16::from_be_bytes(self.buf.get_bytes(IDENTIFIER_OFFSET))
        }

        #[must_use]
        pub fn get_sequence(&self) -> u16 {
            u16::from_be_bytes(self.buf.get_bytes(SEQUENCE_OFFSET))
        }

        pub fn set_icmp_type(&mut self, val: IcmpType) {
            *self.buf.write(TYPE_OFFSET) = val.id();
        }

        pub fn set_icmp_code(&mut self, val: IcmpCode) {
            *self.buf.write(CODE_OFFSET) = val.0;
        }

        pub fn set_identifier(&mut self, val: u16) {
            self.buf.set_bytes(IDENTIFIER_OFFSET, val.to_be_bytes());
        }

        pub fn set_sequence(&mut self, val: u16) {
            self.buf.set_bytes(SEQUENCE_OFFSET, val.to_be_bytes());
        }

        pub fn set_payload(&mut self, vals: &[u8]) {
            let current_offset = Self::minimum_packet_size();
            self.buf.as_slice_mut()[current_offset..current_offset + vals.len()]
                .copy_from_slice(vals);
        }

        #[must_use]
        pub fn payload(&self) -> &[u8] {
            &self.buf.as_slice()[Self::minimum_packet_size()..]
        }
    }

}
