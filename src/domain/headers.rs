//! Decoded header views.
//!
//! These are transient values derived from a frame's leading bytes; they are
//! never stored alongside the frame.

use std::net::Ipv4Addr;

use macaddr::MacAddr6;

/// Length of an Ethernet II header.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Length of an IPv4 header without options.
pub const IPV4_HEADER_LEN: usize = 20;

/// Ethernet II header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    /// Destination hardware address (bytes 0..6)
    pub destination: MacAddr6,
    /// Source hardware address (bytes 6..12)
    pub source: MacAddr6,
    /// EtherType in host order (bytes 12..14, big-endian on the wire)
    pub ether_type: u16,
}

/// Fixed 20-byte IPv4 header fields, multi-byte values in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    pub version: u8,
    /// Header length in 32-bit words
    pub header_length_words: u8,
    pub type_of_service: u8,
    pub total_length: u16,
    pub identification: u16,
    pub time_to_live: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

impl Ipv4Header {
    /// Header length in bytes.
    pub fn header_length_bytes(&self) -> usize {
        usize::from(self.header_length_words) * 4
    }

    /// Whether the header declares options past the fixed 20 bytes.
    pub fn has_options(&self) -> bool {
        self.header_length_bytes() > IPV4_HEADER_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(words: u8) -> Ipv4Header {
        Ipv4Header {
            version: 4,
            header_length_words: words,
            type_of_service: 0,
            total_length: 60,
            identification: 1,
            time_to_live: 64,
            protocol: 6,
            checksum: 0,
            source: Ipv4Addr::new(10, 0, 0, 1),
            destination: Ipv4Addr::new(10, 0, 0, 2),
        }
    }

    #[test]
    fn test_header_length_bytes() {
        assert_eq!(header(5).header_length_bytes(), 20);
        assert_eq!(header(15).header_length_bytes(), 60);
    }

    #[test]
    fn test_has_options() {
        assert!(!header(5).has_options());
        assert!(header(6).has_options());
    }
}
