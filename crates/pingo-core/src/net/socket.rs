use crate::error::IoResult as Result;
use crate::net::IcmpV6Filter;
use std::net::SocketAddr;
use std::time::Duration;

/// An `ICMP` socket.
#[cfg_attr(test, mockall::automock)]
pub trait Socket
where
    Self: Sized,
{
    /// Create an IPv4 socket for sending and receiving ICMP messages.
    fn new_icmp_socket_ipv4(raw: bool) -> Result<Self>;
    /// Create an IPv6 socket for sending and receiving ICMPv6 messages.
    fn new_icmp_socket_ipv6(raw: bool) -> Result<Self>;
    fn bind(&mut self, address: SocketAddr) -> Result<()>;
    /// The kind of the local address the socket is bound to.
    fn local_addr_kind(&self) -> Result<LocalAddrKind>;
    fn set_icmpv6_filter(&mut self, filter: &IcmpV6Filter) -> Result<()>;
    /// Set the read timeout, which must not be zero.
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<()>;
    /// Returns the number of bytes written.
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> Result<usize>;
    fn recv_from(&mut self, buf: &mut [u8]) -> Result<(usize, Option<SocketAddr>)>;
}

/// The kind of local address a socket is bound to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LocalAddrKind {
    /// A datagram `ICMP` socket, addressed as `UDP`.
    Datagram,
    /// A raw socket, addressed as `IP`.
    Raw,
    /// Any other kind of address.
    Other,
}

#[cfg(test)]
pub mod tests {
    #[macro_export]
    macro_rules! mocket_recv_from {
        ($packet: expr, $addr: expr) => {
            move |buf: &mut [u8]| -> IoResult<(usize, Option<SocketAddr>)> {
                buf[..$packet.len()].copy_from_slice(&$packet);
                Ok(($packet.len(), Some($addr)))
            }
        };
    }
}
