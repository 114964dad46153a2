use crate::config::defaults;
use crate::config::{Network, ProbeConfig, Protocol};
use crate::error::{Error, Result};
use crate::message::{IcmpMessageType, MAX_ICMP_PACKET_SIZE};
use crate::types::{Identifier, Sequence};
use crate::Prober;
use pingo_packet::icmpv4::echo::EchoPacket;
use std::time::Duration;

/// Build a prober.
///
/// This is a convenience builder to simplify the creation of a [`Prober`]
/// for a single echo exchange.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// use pingo_core::{Builder, Network};
/// use std::time::Duration;
///
/// let prober = Builder::new(Network::Ip4Icmp, "example.com")
///     .timeout(Duration::from_millis(500))
///     .sequence_discriminator(3)
///     .payload(b"hello")
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Prober`] - A single echo round trip probe.
#[derive(Debug)]
pub struct Builder {
    network: Network,
    host: String,
    timeout: Duration,
    icmp_type: Option<IcmpMessageType>,
    protocol: Option<Protocol>,
    identifier: Option<Identifier>,
    sequence_discriminator: u32,
    payload: Vec<u8>,
}

impl Builder {
    /// Build a prober builder for a given transport mode and host.
    ///
    /// The host may be a name or a literal IP address.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// use pingo_core::{Builder, Network};
    ///
    /// let prober = Builder::new(Network::Udp4, "127.0.0.1").build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(network: Network, host: impl Into<String>) -> Self {
        Self {
            network,
            host: host.into(),
            timeout: defaults::DEFAULT_TIMEOUT,
            icmp_type: None,
            protocol: None,
            identifier: None,
            sequence_discriminator: defaults::DEFAULT_SEQUENCE_DISCRIMINATOR,
            payload: Vec::new(),
        }
    }

    /// Set the read timeout.
    ///
    /// A timeout under one microsecond fails the probe without waiting for a
    /// reply.
    ///
    /// If not set then `DEFAULT_TIMEOUT` will be used.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Set the `ICMP` type of the request.
    ///
    /// If not set then the echo request type of the protocol will be used.
    #[must_use]
    pub fn icmp_type(self, icmp_type: IcmpMessageType) -> Self {
        Self {
            icmp_type: Some(icmp_type),
            ..self
        }
    }

    /// Set the protocol used to select the destination address and to parse
    /// replies.
    ///
    /// If not set then the protocol native to the address family of the
    /// network will be used.
    #[must_use]
    pub fn protocol(self, protocol: Protocol) -> Self {
        Self {
            protocol: Some(protocol),
            ..self
        }
    }

    /// Set the echo identifier.
    ///
    /// If not set then the identifier derived from the process id will be used.
    #[must_use]
    pub fn identifier(self, identifier: Identifier) -> Self {
        Self {
            identifier: Some(identifier),
            ..self
        }
    }

    /// Set the sequence discriminator `k`; the echo sequence number is `1 << k`.
    ///
    /// If not set then `DEFAULT_SEQUENCE_DISCRIMINATOR` will be used.
    #[must_use]
    pub fn sequence_discriminator(self, sequence_discriminator: u32) -> Self {
        Self {
            sequence_discriminator,
            ..self
        }
    }

    /// Set the echo payload.
    ///
    /// If not set then the payload is empty.
    #[must_use]
    pub fn payload(self, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            ..self
        }
    }

    /// Build the `Prober`.
    pub fn build(self) -> Result<Prober> {
        let size = EchoPacket::minimum_packet_size() + self.payload.len();
        if size > MAX_ICMP_PACKET_SIZE {
            return Err(Error::InvalidPacketSize(size));
        }
        let protocol = self.protocol.unwrap_or_else(|| self.network.protocol());
        Ok(Prober::new(ProbeConfig {
            network: self.network,
            host: self.host,
            timeout: self.timeout,
            icmp_type: self
                .icmp_type
                .unwrap_or_else(|| IcmpMessageType::echo_request(protocol)),
            protocol,
            identifier: self.identifier.unwrap_or_else(Identifier::from_process_id),
            sequence: Sequence::from_discriminator(self.sequence_discriminator),
            payload: self.payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingo_packet::{icmpv4, icmpv6};

    #[test]
    fn test_builder_minimal() {
        let prober = Builder::new(Network::Udp4, "localhost").build().unwrap();
        let config = prober.config();
        assert_eq!(Network::Udp4, config.network);
        assert_eq!("localhost", config.host);
        assert_eq!(defaults::DEFAULT_TIMEOUT, config.timeout);
        assert_eq!(Protocol::Icmp, config.protocol);
        assert_eq!(
            IcmpMessageType::V4(icmpv4::IcmpType::EchoRequest),
            config.icmp_type
        );
        assert_eq!(Identifier::from_process_id(), config.identifier);
        assert_eq!(Sequence(1), config.sequence);
        assert!(config.payload.is_empty());
    }

    #[test]
    fn test_builder_ipv6_defaults() {
        let prober = Builder::new(Network::Ip6Icmp, "::1").build().unwrap();
        let config = prober.config();
        assert_eq!(Protocol::IcmpV6, config.protocol);
        assert_eq!(
            IcmpMessageType::V6(icmpv6::IcmpType::EchoRequest),
            config.icmp_type
        );
    }

    #[test]
    fn test_builder_full() {
        let prober = Builder::new(Network::Udp6, "example.com")
            .timeout(Duration::from_millis(250))
            .icmp_type(IcmpMessageType::V6(icmpv6::IcmpType::EchoRequest))
            .protocol(Protocol::IcmpV6)
            .identifier(Identifier(4321))
            .sequence_discriminator(9)
            .payload(b"payload".as_slice())
            .build()
            .unwrap();
        let config = prober.config();
        assert_eq!(Network::Udp6, config.network);
        assert_eq!("example.com", config.host);
        assert_eq!(Duration::from_millis(250), config.timeout);
        assert_eq!(Protocol::IcmpV6, config.protocol);
        assert_eq!(Identifier(4321), config.identifier);
        assert_eq!(Sequence(512), config.sequence);
        assert_eq!(b"payload", config.payload.as_slice());
    }

    #[test]
    fn test_builder_protocol_independent_of_network() {
        let prober = Builder::new(Network::Udp4, "localhost")
            .protocol(Protocol::IcmpV6)
            .build()
            .unwrap();
        assert_eq!(Protocol::IcmpV6, prober.config().protocol);
        assert_eq!(
            IcmpMessageType::V6(icmpv6::IcmpType::EchoRequest),
            prober.config().icmp_type
        );
    }

    #[test]
    fn test_builder_payload_too_large() {
        let err = Builder::new(Network::Udp4, "localhost")
            .payload(vec![0_u8; MAX_ICMP_PACKET_SIZE])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPacketSize(_)));
    }
}
