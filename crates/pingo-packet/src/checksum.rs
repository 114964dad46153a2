//! The Internet checksum ([rfc1071]) for `ICMPv4` messages.
//!
//! `ICMPv6` messages are not covered here: the checksum of an `ICMPv6` message
//! includes an `IPv6` pseudo header and is always computed by the kernel for
//! `IPPROTO_ICMPV6` sockets.
//!
//! This code is derived from [`libpnet`] which is available under the Apache 2.0 license.
//!
//! [rfc1071]: https://datatracker.ietf.org/doc/html/rfc1071
//! [`libpnet`]: https://github.com/libpnet/libpnet

/// The index of the 16 bit checksum word in an `ICMP` header.
const ICMP_CHECKSUM_WORD: usize = 1;

/// Calculate the checksum for an `Ipv4` `ICMP` packet.
///
/// The checksum field of `data` is skipped, so this may be called on a packet
/// whose checksum has already been set.
#[must_use]
pub fn icmp_ipv4_checksum(data: &[u8]) -> u16 {
    checksum(data, ICMP_CHECKSUM_WORD)
}

fn checksum(data: &[u8], ignore_word: usize) -> u16 {
    if data.is_empty() {
        return 0;
    }
    finalize_checksum(sum_be_words(data, ignore_word))
}

fn sum_be_words(data: &[u8], ignore_word: usize) -> u32 {
    let mut words = data.chunks_exact(2);
    let mut sum = words
        .by_ref()
        .enumerate()
        .filter(|(i, _)| *i != ignore_word)
        .map(|(_, word)| u32::from(u16::from_be_bytes([word[0], word[1]])))
        .sum::<u32>();
    if let [last] = words.remainder() {
        if data.len() / 2 != ignore_word {
            sum += u32::from(*last) << 8;
        }
    }
    sum
}

const fn finalize_checksum(mut sum: u32) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xFFFF);
    }
    !sum as u16
}
