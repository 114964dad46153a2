use crate::error::{Error, Result};
use crate::message::IcmpMessageType;
use crate::types::{Identifier, Sequence};
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::time::Duration;

/// Default values for configuration.
pub mod defaults {
    use crate::config::Network;
    use std::time::Duration;

    /// The default value for `network`.
    pub const DEFAULT_NETWORK: Network = Network::Udp4;

    /// The default value for `timeout`.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

    /// The default value for the sequence discriminator.
    pub const DEFAULT_SEQUENCE_DISCRIMINATOR: u32 = 0;
}

/// The IP protocol number `ICMP` messages are parsed with.
pub const PROTOCOL_ICMP: u8 = 1;

/// The IP protocol number `ICMPv6` messages are parsed with.
pub const PROTOCOL_IPV6_ICMP: u8 = 58;

/// The transport mode used to send and receive echo messages.
///
/// The datagram modes use unprivileged `ICMP` sockets, which not every
/// platform offers or permits. The raw modes generally require elevated
/// privileges.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Network {
    /// `IPv4` datagram `ICMP` socket bound to the unspecified address.
    Udp4,
    /// `IPv4` raw `ICMP` socket bound to the unspecified address.
    Ip4Icmp,
    /// `IPv6` datagram `ICMPv6` socket bound to the unspecified address.
    Udp6,
    /// `IPv6` raw `ICMPv6` socket bound to the loopback address.
    ///
    /// As this mode binds to `::1` it can only reach loopback destinations.
    Ip6Icmp,
}

impl Network {
    /// The local address the socket for this mode is bound to.
    #[must_use]
    pub const fn local_addr(self) -> IpAddr {
        match self {
            Self::Udp4 | Self::Ip4Icmp => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Self::Udp6 => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            Self::Ip6Icmp => IpAddr::V6(Ipv6Addr::LOCALHOST),
        }
    }

    /// Does this mode use a raw socket?
    #[must_use]
    pub const fn is_raw(self) -> bool {
        matches!(self, Self::Ip4Icmp | Self::Ip6Icmp)
    }

    /// Does this mode use an `IPv6` socket?
    #[must_use]
    pub const fn is_ipv6(self) -> bool {
        matches!(self, Self::Udp6 | Self::Ip6Icmp)
    }

    /// The protocol native to the address family of this mode.
    #[must_use]
    pub const fn protocol(self) -> Protocol {
        if self.is_ipv6() {
            Protocol::IcmpV6
        } else {
            Protocol::Icmp
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(network: &str) -> Result<Self> {
        match network {
            "udp4" | "datagram-v4" => Ok(Self::Udp4),
            "ip4:icmp" | "ip4:1" | "raw-v4" => Ok(Self::Ip4Icmp),
            "udp6" | "datagram-v6" => Ok(Self::Udp6),
            "ip6:ipv6-icmp" | "ip6:58" | "raw-v6" => Ok(Self::Ip6Icmp),
            _ => Err(Error::UnsupportedNetwork(network.to_string())),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Udp4 => write!(f, "udp4"),
            Self::Ip4Icmp => write!(f, "ip4:icmp"),
            Self::Udp6 => write!(f, "udp6"),
            Self::Ip6Icmp => write!(f, "ip6:ipv6-icmp"),
        }
    }
}

/// The protocol used to select a destination address and to parse replies.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Protocol {
    /// Internet Control Message Protocol
    Icmp,
    /// Internet Control Message Protocol for `IPv6`
    IcmpV6,
}

impl Protocol {
    /// The IP protocol number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Icmp => PROTOCOL_ICMP,
            Self::IcmpV6 => PROTOCOL_IPV6_ICMP,
        }
    }
}

impl TryFrom<u8> for Protocol {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self> {
        match number {
            PROTOCOL_ICMP => Ok(Self::Icmp),
            PROTOCOL_IPV6_ICMP => Ok(Self::IcmpV6),
            _ => Err(Error::UnsupportedProtocol(number)),
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Icmp => write!(f, "icmp"),
            Self::IcmpV6 => write!(f, "ipv6-icmp"),
        }
    }
}

/// The configuration of a single echo probe.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProbeConfig {
    pub network: Network,
    pub host: String,
    pub timeout: Duration,
    pub icmp_type: IcmpMessageType,
    pub protocol: Protocol,
    pub identifier: Identifier,
    pub sequence: Sequence,
    pub payload: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("udp4", Network::Udp4)]
    #[test_case("datagram-v4", Network::Udp4)]
    #[test_case("ip4:icmp", Network::Ip4Icmp)]
    #[test_case("ip4:1", Network::Ip4Icmp)]
    #[test_case("raw-v4", Network::Ip4Icmp)]
    #[test_case("udp6", Network::Udp6)]
    #[test_case("datagram-v6", Network::Udp6)]
    #[test_case("ip6:ipv6-icmp", Network::Ip6Icmp)]
    #[test_case("ip6:58", Network::Ip6Icmp)]
    #[test_case("raw-v6", Network::Ip6Icmp)]
    fn test_network_from_str(name: &str, expected: Network) {
        assert_eq!(expected, Network::from_str(name).unwrap());
    }

    #[test_case("udp5")]
    #[test_case("tcp")]
    #[test_case("UDP4")]
    #[test_case("")]
    fn test_network_from_str_unsupported(name: &str) {
        let err = Network::from_str(name).unwrap_err();
        assert!(matches!(err, Error::UnsupportedNetwork(network) if network == name));
    }

    #[test_case(Network::Udp4, "0.0.0.0", false, Protocol::Icmp)]
    #[test_case(Network::Ip4Icmp, "0.0.0.0", true, Protocol::Icmp)]
    #[test_case(Network::Udp6, "::", false, Protocol::IcmpV6)]
    #[test_case(Network::Ip6Icmp, "::1", true, Protocol::IcmpV6)]
    fn test_network_properties(network: Network, addr: &str, raw: bool, protocol: Protocol) {
        assert_eq!(IpAddr::from_str(addr).unwrap(), network.local_addr());
        assert_eq!(raw, network.is_raw());
        assert_eq!(protocol, network.protocol());
    }

    #[test]
    fn test_network_display_round_trip() {
        for network in [
            Network::Udp4,
            Network::Ip4Icmp,
            Network::Udp6,
            Network::Ip6Icmp,
        ] {
            assert_eq!(network, Network::from_str(&network.to_string()).unwrap());
        }
    }

    #[test_case(1, Protocol::Icmp)]
    #[test_case(58, Protocol::IcmpV6)]
    fn test_protocol_from_number(number: u8, expected: Protocol) {
        assert_eq!(expected, Protocol::try_from(number).unwrap());
        assert_eq!(number, expected.number());
    }

    #[test_case(0)]
    #[test_case(6)]
    #[test_case(17)]
    fn test_protocol_unsupported(number: u8) {
        let err = Protocol::try_from(number).unwrap_err();
        assert!(matches!(err, Error::UnsupportedProtocol(n) if n == number));
    }
}
