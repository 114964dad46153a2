/// Platform specific network code.
mod platform;

/// A network socket.
mod socket;

/// The `ICMPv6` type filter.
mod filter;

pub use filter::IcmpV6Filter;
pub use socket::{LocalAddrKind, Socket};

/// The platform specific socket type.
pub use platform::SocketImpl;

#[cfg(test)]
pub use socket::MockSocket;
