use crate::config::Protocol;
use std::fmt::{Display, Formatter};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// A probe error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A probe error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("lookup {0}: {1}")]
    LookupFailed(String, #[source] io::Error),
    #[error("no A or AAAA record for {0} matching protocol {1}")]
    NoMatchingAddr(String, Protocol),
    #[error("local address is neither datagram nor raw")]
    UnsupportedAddrKind,
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(u8),
    #[error("invalid packet size: {0}")]
    InvalidPacketSize(usize),
    #[error("invalid packet: {0}")]
    PacketError(#[from] pingo_packet::error::Error),
    #[error("short write: got {0}; want {1}")]
    ShortWrite(usize, usize),
    #[error("no echo reply within {0:?}")]
    ReadTimeout(Duration),
    #[error("IO error: {0}")]
    IoError(#[from] IoError),
}

/// Custom IO error result.
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Custom IO error.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Bind error for {1}: {0}")]
    Bind(io::Error, SocketAddr),
    #[error("Sendto error for {1}: {0}")]
    SendTo(io::Error, SocketAddr),
    #[error("Failed to {1}: {0}")]
    Other(io::Error, IoOperation),
}

impl IoError {
    /// Get the custom error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Bind(e, _) | Self::SendTo(e, _) | Self::Other(e, _) => ErrorKind::from(e),
        }
    }
}

/// Custom error kind.
///
/// A blocking read reports an elapsed timeout as either `EAGAIN` or
/// `ETIMEDOUT` depending on the platform, both are [`ErrorKind::Timeout`].
#[derive(Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Timeout,
    Std(io::ErrorKind),
}

impl ErrorKind {
    /// Is this the error a blocking read reports once its timeout elapses?
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Io operation.
#[derive(Debug)]
pub enum IoOperation {
    NewSocket,
    LocalAddr,
    SetReadTimeout,
    SetIcmpV6Filter,
    RecvFrom,
}

impl Display for IoOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewSocket => write!(f, "create new socket"),
            Self::LocalAddr => write!(f, "local addr"),
            Self::SetReadTimeout => write!(f, "set read timeout"),
            Self::SetIcmpV6Filter => write!(f, "set ICMPv6 filter"),
            Self::RecvFrom => write!(f, "recv from"),
        }
    }
}
