use crate::error::{ErrorKind, IoError, IoOperation, IoResult};
use crate::net::socket::{LocalAddrKind, Socket};
use crate::net::IcmpV6Filter;
use itertools::Itertools;
use socket2::{Domain, Protocol, SockAddr, Type};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::instrument;

/// The `ICMP6_FILTER` socket option at level `IPPROTO_ICMPV6`.
///
/// From `netinet/icmp6.h` (`linux/icmpv6.h` on Linux), `libc` does not export
/// it on every target.
#[cfg(any(target_os = "linux", target_os = "android"))]
const ICMP6_FILTER: nix::libc::c_int = 1;

/// The `ICMP6_FILTER` socket option at level `IPPROTO_ICMPV6`, from `netinet/icmp6.h`.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const ICMP6_FILTER: nix::libc::c_int = 18;

/// A network socket.
pub struct SocketImpl {
    inner: socket2::Socket,
    ty: Type,
}

impl SocketImpl {
    fn new(domain: Domain, ty: Type, protocol: Protocol) -> IoResult<Self> {
        Ok(Self {
            inner: socket2::Socket::new(domain, ty, Some(protocol))
                .map_err(|err| IoError::Other(err, IoOperation::NewSocket))?,
            ty,
        })
    }

    fn local_addr(&self) -> IoResult<Option<SocketAddr>> {
        Ok(self
            .inner
            .local_addr()
            .map_err(|err| IoError::Other(err, IoOperation::LocalAddr))?
            .as_socket())
    }
}

impl Socket for SocketImpl {
    #[instrument(level = "trace")]
    fn new_icmp_socket_ipv4(raw: bool) -> IoResult<Self> {
        if raw {
            Self::new(Domain::IPV4, Type::RAW, Protocol::ICMPV4)
        } else {
            Self::new(Domain::IPV4, Type::DGRAM, Protocol::ICMPV4)
        }
    }
    #[instrument(level = "trace")]
    fn new_icmp_socket_ipv6(raw: bool) -> IoResult<Self> {
        if raw {
            Self::new(Domain::IPV6, Type::RAW, Protocol::ICMPV6)
        } else {
            Self::new(Domain::IPV6, Type::DGRAM, Protocol::ICMPV6)
        }
    }
    #[instrument(skip(self), level = "trace")]
    fn bind(&mut self, address: SocketAddr) -> IoResult<()> {
        self.inner
            .bind(&SockAddr::from(address))
            .map_err(|err| IoError::Bind(err, address))
    }
    #[instrument(skip(self), ret, level = "trace")]
    fn local_addr_kind(&self) -> IoResult<LocalAddrKind> {
        if self.local_addr()?.is_none() {
            return Ok(LocalAddrKind::Other);
        }
        if self.ty == Type::DGRAM {
            Ok(LocalAddrKind::Datagram)
        } else if self.ty == Type::RAW {
            Ok(LocalAddrKind::Raw)
        } else {
            Ok(LocalAddrKind::Other)
        }
    }
    #[instrument(skip(self), level = "trace")]
    fn set_icmpv6_filter(&mut self, filter: &IcmpV6Filter) -> IoResult<()> {
        self.inner
            .set_icmp6_filter_words(&filter.to_sockopt())
            .map_err(|err| IoError::Other(err, IoOperation::SetIcmpV6Filter))
    }
    #[instrument(skip(self), level = "trace")]
    fn set_read_timeout(&mut self, timeout: Duration) -> IoResult<()> {
        self.inner
            .set_read_timeout(Some(timeout))
            .map_err(|err| IoError::Other(err, IoOperation::SetReadTimeout))
    }
    #[instrument(skip(self, buf), level = "trace")]
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> IoResult<usize> {
        tracing::trace!(buf = format!("{:02x?}", buf.iter().format(" ")));
        self.inner
            .send_to(buf, &SockAddr::from(addr))
            .map_err(|err| IoError::SendTo(err, addr))
    }
    #[instrument(skip(self, buf), level = "trace")]
    fn recv_from(&mut self, buf: &mut [u8]) -> IoResult<(usize, Option<SocketAddr>)> {
        let (bytes_read, addr) = self
            .inner
            .recv_from_into_buf(buf)
            .map_err(|err| IoError::Other(err, IoOperation::RecvFrom))?;
        tracing::trace!(
            buf = format!("{:02x?}", buf[..bytes_read].iter().format(" ")),
            bytes_read,
            ?addr
        );
        Ok((bytes_read, addr))
    }
}

impl From<&io::Error> for ErrorKind {
    fn from(value: &io::Error) -> Self {
        match value.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Self::Timeout,
            kind => Self::Std(kind),
        }
    }
}

/// An extension trait to allow `recv_from` method which writes to a `&mut [u8]`.
///
/// This is required for `socket2::Socket` which [does not currently provide] this method.
///
/// [does not currently provide]: https://github.com/rust-lang/socket2/issues/223
trait RecvFrom {
    fn recv_from_into_buf(&self, buf: &mut [u8]) -> io::Result<(usize, Option<SocketAddr>)>;
}

impl RecvFrom for socket2::Socket {
    // Safety: the `recv` implementation promises not to write uninitialised
    // bytes to the `buf`fer, so this casting is safe.
    #![allow(unsafe_code)]
    fn recv_from_into_buf(&self, buf: &mut [u8]) -> io::Result<(usize, Option<SocketAddr>)> {
        let buf = unsafe {
            &mut *(std::ptr::from_mut::<[u8]>(buf) as *mut [std::mem::MaybeUninit<u8>])
        };
        self.recv_from(buf)
            .map(|(size, addr)| (size, addr.as_socket()))
    }
}

/// An extension trait to set the `ICMP6_FILTER` socket option.
///
/// This option is not exposed by `socket2`.
trait SetIcmpV6Filter {
    fn set_icmp6_filter_words(&self, words: &[u32; 8]) -> io::Result<()>;
}

impl SetIcmpV6Filter for socket2::Socket {
    // Safety: `words` is a valid `icmp6_filter` which outlives the call and
    // the length passed is its size.
    #![allow(unsafe_code)]
    fn set_icmp6_filter_words(&self, words: &[u32; 8]) -> io::Result<()> {
        use std::os::fd::AsRawFd;
        let res = unsafe {
            nix::libc::setsockopt(
                self.as_raw_fd(),
                nix::libc::IPPROTO_ICMPV6,
                ICMP6_FILTER,
                words.as_ptr().cast(),
                std::mem::size_of_val(words) as nix::libc::socklen_t,
            )
        };
        if res == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_timeout() {
        let err = io::Error::from(nix::Error::EAGAIN);
        assert_eq!(ErrorKind::Timeout, ErrorKind::from(&err));
        let err = io::Error::from(nix::Error::ETIMEDOUT);
        assert_eq!(ErrorKind::Timeout, ErrorKind::from(&err));
    }

    #[test]
    fn test_error_kind_std() {
        let err = io::Error::from(nix::Error::ECONNREFUSED);
        assert_eq!(ErrorKind::Std(io::ErrorKind::ConnectionRefused), ErrorKind::from(&err));
    }
}
