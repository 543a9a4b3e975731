//! Captured frame buffer.

/// One captured link-layer unit: the raw bytes as read from the wire,
/// Ethernet header first.
///
/// A frame owns its bytes and is immutable once constructed, so it can be
/// shared between the capture thread and any number of readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
}

impl Frame {
    /// Wrap an owned buffer whose length is exactly the received byte count.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Copy the first `len` bytes of a scratch read buffer into a fresh,
    /// exactly-sized allocation.
    ///
    /// Returns `None` if `len` exceeds the buffer.
    pub fn from_read(buf: &[u8], len: usize) -> Option<Self> {
        buf.get(..len).map(|received| Self::new(received.to_vec()))
    }

    /// Number of bytes received.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the frame holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw octets.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the frame, returning its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for Frame {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Frame {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_matches_bytes() {
        let frame = Frame::new(vec![1, 2, 3]);
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.bytes(), &[1, 2, 3]);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::new(Vec::new());
        assert_eq!(frame.len(), 0);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_from_read_sizes_to_received_bytes() {
        let scratch = [0xaau8; 64];
        let frame = Frame::from_read(&scratch, 10).unwrap();
        assert_eq!(frame.len(), 10);
        assert_eq!(frame.into_bytes(), vec![0xaa; 10]);
    }

    #[test]
    fn test_from_read_rejects_overlong_length() {
        let scratch = [0u8; 4];
        assert!(Frame::from_read(&scratch, 5).is_none());
    }

    #[test]
    fn test_from_slice() {
        let frame = Frame::from(&[9u8, 8, 7][..]);
        assert_eq!(frame.as_ref(), &[9, 8, 7]);
    }
}
