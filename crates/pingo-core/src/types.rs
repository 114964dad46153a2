/// `Identifier` newtype.
///
/// The `ICMP` echo identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd)]
pub struct Identifier(pub u16);

impl Identifier {
    /// The identifier derived from the id of the current process.
    ///
    /// Only the low 16 bits of the process id are used.
    #[must_use]
    pub fn from_process_id() -> Self {
        Self((std::process::id() & 0xffff) as u16)
    }
}

/// `Sequence` number newtype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd)]
pub struct Sequence(pub u16);

impl Sequence {
    /// The sequence number `1 << discriminator`.
    ///
    /// The sequence field is 16 bits wide and so a discriminator of 16 or more
    /// encodes as zero.
    #[must_use]
    pub const fn from_discriminator(discriminator: u32) -> Self {
        if discriminator < u16::BITS {
            Self(1 << discriminator)
        } else {
            Self(0)
        }
    }
}

impl From<Sequence> for u16 {
    fn from(sequence: Sequence) -> Self {
        sequence.0
    }
}

impl From<Identifier> for u16 {
    fn from(identifier: Identifier) -> Self {
        identifier.0
    }
}
