use crate::config::{Network, ProbeConfig};
use crate::error::{Error, Result};
use crate::message::{EchoRequest, ReplyMessage};
use crate::net::{IcmpV6Filter, Socket, SocketImpl};
use crate::resolver::{destination_addr, Resolver, SystemResolver};
use crate::Protocol;
use pingo_packet::ipv4::Ipv4Packet;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::instrument;

/// The size of the buffer replies are read into.
///
/// Larger datagrams are truncated.
pub const MAX_PACKET_SIZE: usize = 1024;

/// A single `ICMP` echo round trip probe.
///
/// Built with a [`Builder`](crate::Builder).
#[derive(Debug, Clone)]
pub struct Prober {
    config: ProbeConfig,
}

impl Prober {
    pub(crate) const fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// The configuration of this probe.
    #[must_use]
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Send one echo request and wait for an echo reply.
    ///
    /// Returns the time from just before the request was sent until just
    /// after the reply was read.
    ///
    /// Any message which is not an echo reply of the configured protocol is
    /// logged and skipped. The read timeout applies afresh to every read, so
    /// a steady stream of such messages can extend the total wait beyond the
    /// timeout.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// use pingo_core::{Builder, Network};
    ///
    /// let rtt = Builder::new(Network::Udp4, "127.0.0.1").build()?.run()?;
    /// println!("{rtt:?}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(&self) -> Result<Duration> {
        self.run_with(&SystemResolver)
    }

    /// Run the probe using a custom [`Resolver`].
    pub fn run_with<R: Resolver>(&self, resolver: &R) -> Result<Duration> {
        exchange::<SocketImpl, R>(&self.config, resolver)
    }
}

/// Perform the echo exchange described by `config`.
///
/// The socket is closed when it is dropped, on every path out of this function.
#[instrument(skip_all, fields(network = %config.network, host = %config.host), level = "debug")]
fn exchange<S: Socket, R: Resolver>(
    config: &ProbeConfig,
    resolver: &R,
) -> Result<Duration> {
    let mut socket = listen::<S>(config.network)?;
    let addrs = resolver.lookup(&config.host)?;
    let kind = socket.local_addr_kind()?;
    let dest = destination_addr(kind, config.protocol, &config.host, &addrs)?;
    tracing::debug!(%dest, "resolved destination");
    if config.network != Network::Udp6 && config.protocol == Protocol::IcmpV6 {
        socket.set_icmpv6_filter(&IcmpV6Filter::echo_reply_and_errors())?;
    }
    let request = EchoRequest::new(
        config.icmp_type,
        config.identifier,
        config.sequence,
        &config.payload,
    );
    let buf = request.marshal()?;
    let start = Instant::now();
    let sent = socket.send_to(&buf, dest)?;
    if sent != buf.len() {
        return Err(Error::ShortWrite(sent, buf.len()));
    }
    let mut reply_buf = [0_u8; MAX_PACKET_SIZE];
    loop {
        let (bytes_read, peer) = recv_with_timeout(&mut socket, config.timeout, &mut reply_buf)?;
        let end = Instant::now();
        let message = icmp_message(config.network, &reply_buf[..bytes_read])?;
        let reply = ReplyMessage::parse(config.protocol, message)?;
        if reply.icmp_type.is_echo_reply() {
            let rtt = end.duration_since(start);
            tracing::debug!(?peer, ?rtt, "echo reply");
            return Ok(rtt);
        }
        tracing::info!(?reply, ?peer, "unexpected message, want echo reply");
    }
}

fn listen<S: Socket>(network: Network) -> Result<S> {
    let mut socket = match network {
        Network::Udp4 => S::new_icmp_socket_ipv4(false),
        Network::Ip4Icmp => S::new_icmp_socket_ipv4(true),
        Network::Udp6 => S::new_icmp_socket_ipv6(false),
        Network::Ip6Icmp => S::new_icmp_socket_ipv6(true),
    }?;
    socket.bind(SocketAddr::new(network.local_addr(), 0))?;
    Ok(socket)
}

fn recv_with_timeout<S: Socket>(
    socket: &mut S,
    timeout: Duration,
    buf: &mut [u8],
) -> Result<(usize, Option<SocketAddr>)> {
    // a read timeout below the socket's microsecond resolution would block forever
    if timeout.as_micros() == 0 {
        return Err(Error::ReadTimeout(timeout));
    }
    socket.set_read_timeout(timeout)?;
    socket.recv_from(buf).map_err(|err| {
        if err.kind().is_timeout() {
            Error::ReadTimeout(timeout)
        } else {
            Error::IoError(err)
        }
    })
}

/// Locate the `ICMP` message within a received datagram.
///
/// Raw `IPv4` sockets deliver the `IPv4` header ahead of the message, as do
/// datagram `IPv4` sockets on macOS.
fn icmp_message(network: Network, datagram: &[u8]) -> Result<&[u8]> {
    let has_ipv4_header = match network {
        Network::Ip4Icmp => true,
        Network::Udp4 => {
            cfg!(any(target_os = "macos", target_os = "ios"))
                && datagram.first().is_some_and(|b| b >> 4 == 4)
        }
        Network::Udp6 | Network::Ip6Icmp => false,
    };
    if has_ipv4_header {
        let header_len = {
            let ipv4 = Ipv4Packet::new_view(datagram)?;
            datagram.len() - ipv4.payload().len()
        };
        Ok(&datagram[header_len..])
    } else {
        Ok(datagram)
    }
}
