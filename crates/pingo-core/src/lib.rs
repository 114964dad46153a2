//! Pingo - measure the round trip time of a single `ICMP` echo.
//!
//! This crate sends one `ICMP` or `ICMPv6` echo request to a host and waits
//! for an echo reply, returning the elapsed time. Four transport modes are
//! supported, unprivileged datagram sockets and raw sockets for each of
//! `IPv4` and `IPv6` (see [`Network`]).
//!
//! # Example
//!
//! The following example sends an echo request over an unprivileged `IPv4`
//! datagram socket:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use pingo_core::{Builder, Network};
//!
//! let rtt = Builder::new(Network::Udp4, "localhost").build()?.run()?;
//! println!("{rtt:?}");
//! # Ok(())
//! # }
//! ```
//!
//! The same probe using the [`ping`] function with the textual network names:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use pingo_core::{ping, IcmpMessageType, Protocol, PROTOCOL_ICMP};
//!
//! let icmp_type = IcmpMessageType::echo_request(Protocol::Icmp);
//! let rtt = ping("udp4", "localhost", 1000, icmp_type, PROTOCOL_ICMP, 0, &[])?;
//! # Ok(())
//! # }
//! ```
//!
//! # See Also
//!
//! - [`Builder`] - Build a [`Prober`].
//! - [`Prober::run`] - Run the probe on the current thread.
//! - [`Prober::run_with`] - Run the probe with a custom [`Resolver`].
#![warn(clippy::all, clippy::pedantic, clippy::nursery, rust_2018_idioms)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc
)]
#![deny(unsafe_code)]

mod builder;
mod config;
mod error;
mod message;
mod net;
mod prober;
mod resolver;
mod types;

use std::str::FromStr;
use std::time::Duration;

pub use builder::Builder;
pub use config::{
    defaults, Network, ProbeConfig, Protocol, PROTOCOL_ICMP, PROTOCOL_IPV6_ICMP,
};
pub use error::{Error, ErrorKind, IoError, IoOperation, IoResult, Result};
pub use message::{EchoBody, EchoRequest, IcmpMessageType, ReplyMessage, MAX_ICMP_PACKET_SIZE};
pub use net::{IcmpV6Filter, LocalAddrKind, Socket, SocketImpl};
pub use prober::{Prober, MAX_PACKET_SIZE};
pub use resolver::{destination_addr, Resolver, SystemResolver};
pub use types::{Identifier, Sequence};

/// Send one echo request to `host` and return the round trip time.
///
/// - `network` names the transport mode, see [`Network`].
/// - `timeout_ms` is the read timeout in milliseconds.
/// - `icmp_type` is the type of the request sent.
/// - `protocol` is [`PROTOCOL_ICMP`] or [`PROTOCOL_IPV6_ICMP`] and decides
///   which resolved address is used and how replies are parsed.
/// - `seq` is the sequence discriminator, the sequence number sent is `1 << seq`.
/// - `payload` is the echo data.
///
/// The identifier is derived from the current process id.
///
/// The network and protocol are validated before any socket is opened.
pub fn ping(
    network: &str,
    host: &str,
    timeout_ms: u64,
    icmp_type: IcmpMessageType,
    protocol: u8,
    seq: u32,
    payload: &[u8],
) -> Result<Duration> {
    let network = Network::from_str(network)?;
    let protocol = Protocol::try_from(protocol)?;
    Builder::new(network, host)
        .timeout(Duration::from_millis(timeout_ms))
        .icmp_type(icmp_type)
        .protocol(protocol)
        .sequence_discriminator(seq)
        .payload(payload)
        .build()?
        .run()
}
