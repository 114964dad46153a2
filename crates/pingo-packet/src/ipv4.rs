use crate::buffer::Buffer;
use crate::error::{Error, Result};

const IHL_OFFSET: usize = 0;

/// A read only view of an `IPv4` header.
///
/// Raw `IPv4` sockets deliver the `IPv4` header along with the `ICMP` message
/// and this view is used to locate the message within the datagram.
#[derive(Debug)]
pub struct Ipv4Packet<'a> {
    buf: Buffer<'a>,
}

impl<'a> Ipv4Packet<'a> {
    /// Create a view of an `IPv4` packet.
    ///
    /// Fails if the buffer is shorter than the minimum header or shorter than
    /// the header length the packet itself declares.
    pub fn new_view(packet: &'a [u8]) -> Result<Self> {
        if packet.len() < Self::minimum_packet_size() {
            return Err(Error::InsufficientPacketBuffer(
                String::from("Ipv4Packet"),
                Self::minimum_packet_size(),
                packet.len(),
            ));
        }
        let ipv4 = Self {
            buf: Buffer::Immutable(packet),
        };
        let header_len = ipv4.header_len();
        if header_len < Self::minimum_packet_size() || header_len > packet.len() {
            return Err(Error::InvalidHeaderLength(
                String::from("Ipv4Packet"),
                header_len,
                packet.len(),
            ));
        }
        Ok(ipv4)
    }

    #[must_use]
    pub const fn minimum_packet_size() -> usize {
        20
    }

    /// The header length in 32 bit words.
    #[must_use]
    pub fn get_header_length(&self) -> u8 {
        self.buf.read(IHL_OFFSET) & 0xf
    }

    /// The bytes following the header, including any options.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buf.as_slice()[self.header_len()..]
    }

    fn header_len(&self) -> usize {
        usize::from(self.get_header_length()) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_view_echo_reply() {
        let buf = hex!(
            "
            45 00 00 1c 3a 5b 00 00 40 01 42 84 7f 00 00 01
            7f 00 00 01 00 00 f7 ff 00 00 00 01
            "
        );
        let packet = Ipv4Packet::new_view(&buf).unwrap();
        assert_eq!(5, packet.get_header_length());
        assert_eq!(&hex!("00 00 f7 ff 00 00 00 01"), packet.payload());
    }

    #[test]
    fn test_view_with_options() {
        let buf = hex!(
            "
            46 00 00 20 00 00 00 00 40 01 00 00 0a 00 00 01
            0a 00 00 02 01 01 01 00 08 00 f7 ff 00 00 00 00
            "
        );
        let packet = Ipv4Packet::new_view(&buf).unwrap();
        assert_eq!(6, packet.get_header_length());
        assert_eq!(&hex!("08 00 f7 ff 00 00 00 00"), packet.payload());
    }

    #[test]
    fn test_header_length_exceeds_buffer() {
        let buf = hex!("4f 00 00 14 00 00 00 00 40 01 00 00 0a 00 00 01 0a 00 00 02");
        let err = Ipv4Packet::new_view(&buf).unwrap_err();
        assert_eq!(
            Error::InvalidHeaderLength(String::from("Ipv4Packet"), 60, 20),
            err
        );
    }

    #[test]
    fn test_header_length_too_small() {
        let buf = hex!("42 00 00 14 00 00 00 00 40 01 00 00 0a 00 00 01 0a 00 00 02");
        let err = Ipv4Packet::new_view(&buf).unwrap_err();
        assert_eq!(
            Error::InvalidHeaderLength(String::from("Ipv4Packet"), 8, 20),
            err
        );
    }

    #[test]
    fn test_new_view_insufficient_buffer() {
        const SIZE: usize = Ipv4Packet::minimum_packet_size();
        let buf = [0_u8; SIZE - 1];
        let err = Ipv4Packet::new_view(&buf).unwrap_err();
        assert_eq!(
            Error::InsufficientPacketBuffer(String::from("Ipv4Packet"), SIZE, SIZE - 1),
            err
        );
    }
}
