/// A byte buffer over a mutable or immutable byte slice.
#[derive(Debug)]
pub enum Buffer<'a> {
    Immutable(&'a [u8]),
    Mutable(&'a mut [u8]),
}

impl Buffer<'_> {
    /// The buffer as an immutable slice of bytes.
    pub fn as_slice(&self) -> &[u8] {
        match &self {
            Buffer::Immutable(packet) => packet,
            Buffer::Mutable(packet) => packet,
        }
    }

    /// Get N bytes from the buffer at a given byte offset.
    pub fn get_bytes<const N: usize>(&self, offset: usize) -> [u8; N] {
        core::array::from_fn(|i| self.read(offset + i))
    }

    /// Set N bytes in the buffer at a given byte offset.
    pub fn set_bytes<const N: usize>(&mut self, offset: usize, bytes: [u8; N]) {
        self.as_slice_mut()[offset..offset + N].copy_from_slice(&bytes);
    }

    /// Get the byte at a given offset.
    pub fn read(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    /// Set the byte at a given offset.
    pub fn write(&mut self, offset: usize) -> &mut u8 {
        &mut self.as_slice_mut()[offset]
    }

    /// The buffer as a mutable slice of bytes.
    ///
    /// Panics for a read only buffer.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        match self {
            Buffer::Immutable(_) => panic!("write operation called on readonly buffer"),
            Buffer::Mutable(packet) => packet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immutable_buffer() {
        let buf = [0x08, 0x00, 0xf7, 0xff];
        let buffer = Buffer::Immutable(&buf);
        assert_eq!([0xf7, 0xff], buffer.get_bytes(2));
        assert_eq!(0x08, buffer.read(0));
    }

    #[test]
    fn test_mutable_buffer() {
        let mut buf = [0_u8; 8];
        let mut buffer = Buffer::Mutable(&mut buf);
        buffer.set_bytes(4, 0x1234_u16.to_be_bytes());
        *buffer.write(0) = 0x80;
        assert_eq!(&[0x80, 0, 0, 0, 0x12, 0x34, 0, 0], buffer.as_slice());
    }

    #[test]
    #[should_panic(expected = "write operation called on readonly buffer")]
    fn test_immutable_buffer_cannot_write() {
        let buf = [0_u8; 4];
        let mut buffer = Buffer::Immutable(&buf);
        *buffer.write(0) = 1;
    }
}
