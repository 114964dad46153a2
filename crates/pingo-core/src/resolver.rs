use crate::config::Protocol;
use crate::error::{Error, Result};
use crate::net::LocalAddrKind;
use std::net::{IpAddr, SocketAddr};
use tracing::instrument;

/// Resolve a host name to IP addresses.
#[cfg_attr(test, mockall::automock)]
pub trait Resolver {
    /// Lookup all addresses for a host, in resolver order.
    ///
    /// A literal IP address resolves to itself.
    fn lookup(&self, host: &str) -> Result<Vec<IpAddr>>;
}

/// A [`Resolver`] which uses the system resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    #[instrument(skip(self), ret, level = "trace")]
    fn lookup(&self, host: &str) -> Result<Vec<IpAddr>> {
        dns_lookup::lookup_host(host).map_err(|err| Error::LookupFailed(host.to_string(), err))
    }
}

/// Select the destination for an echo request from the resolved addresses.
///
/// For `ICMP` the first `IPv4` address is chosen, an `IPv4`-mapped `IPv6`
/// address counts as `IPv4`. For `ICMPv6` the first `IPv6` address which is
/// not `IPv4`-mapped is chosen. The port is always zero.
pub fn destination_addr(
    kind: LocalAddrKind,
    protocol: Protocol,
    host: &str,
    addrs: &[IpAddr],
) -> Result<SocketAddr> {
    let addr = addrs
        .iter()
        .find_map(|addr| select(protocol, *addr))
        .ok_or_else(|| Error::NoMatchingAddr(host.to_string(), protocol))?;
    match kind {
        LocalAddrKind::Datagram | LocalAddrKind::Raw => Ok(SocketAddr::new(addr, 0)),
        LocalAddrKind::Other => Err(Error::UnsupportedAddrKind),
    }
}

fn select(protocol: Protocol, addr: IpAddr) -> Option<IpAddr> {
    match (protocol, addr) {
        (Protocol::Icmp, IpAddr::V4(_)) => Some(addr),
        (Protocol::Icmp, IpAddr::V6(v6)) => v6.to_ipv4_mapped().map(IpAddr::V4),
        (Protocol::IcmpV6, IpAddr::V6(v6)) if v6.to_ipv4_mapped().is_none() => Some(addr),
        (Protocol::IcmpV6, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use test_case::test_case;

    fn addrs(addrs: &[&str]) -> Vec<IpAddr> {
        addrs
            .iter()
            .map(|addr| IpAddr::from_str(addr).unwrap())
            .collect()
    }

    #[test_case(Protocol::Icmp, &["127.0.0.1"], "127.0.0.1:0")]
    #[test_case(Protocol::Icmp, &["::1", "10.0.0.1", "10.0.0.2"], "10.0.0.1:0")]
    #[test_case(Protocol::Icmp, &["::ffff:192.0.2.1"], "192.0.2.1:0")]
    #[test_case(Protocol::Icmp, &["::1", "::ffff:192.0.2.1", "10.0.0.1"], "192.0.2.1:0")]
    #[test_case(Protocol::IcmpV6, &["::1"], "[::1]:0")]
    #[test_case(Protocol::IcmpV6, &["127.0.0.1", "2001:db8::1", "::1"], "[2001:db8::1]:0")]
    #[test_case(Protocol::IcmpV6, &["::ffff:192.0.2.1", "fe80::1"], "[fe80::1]:0")]
    fn test_destination_addr(protocol: Protocol, resolved: &[&str], expected: &str) {
        let dest =
            destination_addr(LocalAddrKind::Datagram, protocol, "host", &addrs(resolved)).unwrap();
        assert_eq!(SocketAddr::from_str(expected).unwrap(), dest);
    }

    #[test_case(Protocol::Icmp, &[])]
    #[test_case(Protocol::Icmp, &["::1", "2001:db8::1"])]
    #[test_case(Protocol::IcmpV6, &["127.0.0.1"])]
    #[test_case(Protocol::IcmpV6, &["::ffff:192.0.2.1"])]
    fn test_no_matching_addr(protocol: Protocol, resolved: &[&str]) {
        let err =
            destination_addr(LocalAddrKind::Raw, protocol, "host", &addrs(resolved)).unwrap_err();
        assert!(matches!(err, Error::NoMatchingAddr(host, p) if host == "host" && p == protocol));
    }

    #[test]
    fn test_same_destination_for_raw_and_datagram() {
        let resolved = addrs(&["10.0.0.1"]);
        let raw = destination_addr(LocalAddrKind::Raw, Protocol::Icmp, "host", &resolved).unwrap();
        let dgram =
            destination_addr(LocalAddrKind::Datagram, Protocol::Icmp, "host", &resolved).unwrap();
        assert_eq!(raw, dgram);
    }

    #[test]
    fn test_unsupported_addr_kind() {
        let err = destination_addr(
            LocalAddrKind::Other,
            Protocol::Icmp,
            "host",
            &addrs(&["127.0.0.1"]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedAddrKind));
    }

    #[test]
    fn test_system_resolver_literal() -> anyhow::Result<()> {
        let resolved = SystemResolver.lookup("127.0.0.1")?;
        assert!(!resolved.is_empty());
        assert!(resolved
            .iter()
            .all(|addr| *addr == IpAddr::from_str("127.0.0.1").unwrap()));
        Ok(())
    }

    #[test]
    fn test_system_resolver_not_found() {
        let err = SystemResolver.lookup("notfound.invalid").unwrap_err();
        assert!(matches!(err, Error::LookupFailed(host, _) if host == "notfound.invalid"));
    }
}
