use pingo_packet::icmpv6::IcmpType;

/// An `ICMPv6` type filter for raw sockets ([rfc3542] section 3.2).
///
/// The filter holds one bit for each of the 256 `ICMPv6` types. Platforms
/// disagree on the meaning of a set bit and so the filter is held in a
/// platform neutral form and converted by [`IcmpV6Filter::to_sockopt`].
///
/// [rfc3542]: https://datatracker.ietf.org/doc/html/rfc3542#section-3.2
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IcmpV6Filter {
    blocked: [u32; 8],
}

impl IcmpV6Filter {
    const fn block_all() -> Self {
        Self {
            blocked: [u32::MAX; 8],
        }
    }

    /// The filter installed on raw `ICMPv6` sockets.
    ///
    /// Passes echo replies and the error messages and blocks everything else,
    /// echo requests included.
    #[must_use]
    pub fn echo_reply_and_errors() -> Self {
        let mut filter = Self::block_all();
        for ty in [
            IcmpType::DestinationUnreachable,
            IcmpType::PacketTooBig,
            IcmpType::TimeExceeded,
            IcmpType::ParameterProblem,
            IcmpType::EchoReply,
        ] {
            filter.set_pass(ty);
        }
        filter
    }

    fn set_pass(&mut self, ty: IcmpType) {
        let (word, bit) = Self::position(ty);
        self.blocked[word] &= !bit;
    }

    /// The filter as the `icmp6_filter` words expected by `setsockopt`.
    ///
    /// On Linux a set bit blocks a type.
    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[must_use]
    pub const fn to_sockopt(&self) -> [u32; 8] {
        self.blocked
    }

    /// The filter as the `icmp6_filter` words expected by `setsockopt`.
    ///
    /// On the BSDs a set bit passes a type.
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    #[must_use]
    pub fn to_sockopt(&self) -> [u32; 8] {
        self.blocked.map(|word| !word)
    }

    fn position(ty: IcmpType) -> (usize, u32) {
        let id = ty.id();
        (usize::from(id >> 5), 1 << (id & 31))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(IcmpType::DestinationUnreachable, true)]
    #[test_case(IcmpType::PacketTooBig, true)]
    #[test_case(IcmpType::TimeExceeded, true)]
    #[test_case(IcmpType::ParameterProblem, true)]
    #[test_case(IcmpType::EchoReply, true)]
    #[test_case(IcmpType::EchoRequest, false)]
    #[test_case(IcmpType::Other(0), false)]
    #[test_case(IcmpType::Other(135), false)]
    #[test_case(IcmpType::Other(255), false)]
    fn test_echo_reply_and_errors(ty: IcmpType, pass: bool) {
        let filter = IcmpV6Filter::echo_reply_and_errors();
        let (word, bit) = IcmpV6Filter::position(ty);
        assert_eq!(pass, filter.blocked[word] & bit == 0);
    }

    #[test]
    fn test_set_pass() {
        let mut filter = IcmpV6Filter::block_all();
        filter.set_pass(IcmpType::Other(200));
        assert_eq!(!(1 << 8), filter.blocked[6]);
        assert!(filter.blocked.iter().enumerate().all(|(i, w)| i == 6 || *w == u32::MAX));
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn test_to_sockopt() {
        let words = IcmpV6Filter::echo_reply_and_errors().to_sockopt();
        assert_eq!(!0b1_1110, words[0]);
        assert_eq!(!0b10, words[4]);
        assert_eq!(u32::MAX, words[7]);
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    #[test]
    fn test_to_sockopt() {
        let words = IcmpV6Filter::echo_reply_and_errors().to_sockopt();
        assert_eq!(0b1_1110, words[0]);
        assert_eq!(0b10, words[4]);
        assert_eq!(0, words[7]);
    }
}
