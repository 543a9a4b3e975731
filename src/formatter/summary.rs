//! Header summaries: the packet table row and the detail pane text.

use std::fmt::{self, Write};

use macaddr::MacAddr6;

use crate::decoder::{decode_ethernet, decode_ipv4};
use crate::domain::Frame;

/// Placeholder for a field the frame is too short to carry.
const MISSING: &str = "-";

/// Format MAC address for display.
pub fn format_mac(mac: MacAddr6) -> String {
    format!("{}", mac).to_uppercase()
}

/// One line of the captured-packets table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub index: usize,
    pub source: String,
    pub destination: String,
    /// EtherType as `0xNNNN`
    pub protocol: String,
    pub size: usize,
}

impl FrameRow {
    /// Build a row, rendering placeholders when the Ethernet header is
    /// missing rather than failing.
    pub fn from_frame(index: usize, frame: &Frame) -> Self {
        match decode_ethernet(frame) {
            Ok(eth) => Self {
                index,
                source: format_mac(eth.source),
                destination: format_mac(eth.destination),
                protocol: format!("{:#06x}", eth.ether_type),
                size: frame.len(),
            },
            Err(_) => Self {
                index,
                source: MISSING.to_string(),
                destination: MISSING.to_string(),
                protocol: MISSING.to_string(),
                size: frame.len(),
            },
        }
    }
}

impl fmt::Display for FrameRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6}  {:<17}  {:<17}  {:<6}  {:>5}",
            self.index, self.source, self.destination, self.protocol, self.size
        )
    }
}

/// Render the Ethernet and IPv4 header fields of a frame.
///
/// A section whose header cannot be decoded shows `No data` instead.
pub fn describe_frame(frame: &Frame) -> String {
    let mut output = String::from("Ethernet Header\n");

    // Writing into a String cannot fail.
    match decode_ethernet(frame) {
        Ok(eth) => {
            let _ = writeln!(output, "  Destination Address: {}", format_mac(eth.destination));
            let _ = writeln!(output, "  Source Address: {}", format_mac(eth.source));
            let _ = writeln!(output, "  Protocol: {:#06x}", eth.ether_type);
        }
        Err(_) => output.push_str("  No data\n"),
    }

    output.push_str("IP Header\n");
    match decode_ipv4(frame) {
        Ok(ip) => {
            let _ = writeln!(output, "  IP Version: {}", ip.version);
            let _ = writeln!(output, "  IP Header Length: {} bytes", ip.header_length_bytes());
            let _ = writeln!(output, "  Type Of Service: {}", ip.type_of_service);
            let _ = writeln!(output, "  IP Total Length: {} bytes (Size of Packet)", ip.total_length);
            let _ = writeln!(output, "  Identification: {}", ip.identification);
            let _ = writeln!(output, "  TTL: {}", ip.time_to_live);
            let _ = writeln!(output, "  Protocol: {}", ip.protocol);
            let _ = writeln!(output, "  Checksum: {}", ip.checksum);
            let _ = writeln!(output, "  Source IP: {}", ip.source);
            let _ = writeln!(output, "  Destination IP: {}", ip.destination);
        }
        Err(_) => output.push_str("  No data\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ipv4_frame() -> Frame {
        let mut bytes = vec![
            0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, // destination
            0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, // source
            0x08, 0x00,
        ];
        bytes.extend_from_slice(&[
            0x45, 0x00, 0x00, 0x54, 0x12, 0x34, 0x00, 0x00, 0x40, 0x01, 0x00, 0x10, 10, 0, 0,
            1, 10, 0, 0, 2,
        ]);
        Frame::new(bytes)
    }

    #[test]
    fn test_format_mac() {
        let mac = MacAddr6::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
        assert_eq!(format_mac(mac), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_row_from_ipv4_frame() {
        let row = FrameRow::from_frame(3, &ipv4_frame());
        assert_eq!(row.index, 3);
        assert_eq!(row.source, "AA:BB:CC:DD:EE:FF");
        assert_eq!(row.destination, "DE:AD:BE:EF:00:01");
        assert_eq!(row.protocol, "0x0800");
        assert_eq!(row.size, 34);
    }

    #[test]
    fn test_row_from_runt_frame() {
        let row = FrameRow::from_frame(0, &Frame::new(vec![1, 2, 3]));
        assert_eq!(row.source, "-");
        assert_eq!(row.destination, "-");
        assert_eq!(row.protocol, "-");
        assert_eq!(row.size, 3);
    }

    #[test]
    fn test_row_display_contains_fields() {
        let line = FrameRow::from_frame(7, &ipv4_frame()).to_string();
        assert!(line.contains("AA:BB:CC:DD:EE:FF"));
        assert!(line.contains("DE:AD:BE:EF:00:01"));
        assert!(line.contains("0x0800"));
        assert!(line.trim_end().ends_with("34"));
    }

    #[test]
    fn test_describe_ipv4_frame() {
        let text = describe_frame(&ipv4_frame());
        assert!(text.contains("  Destination Address: DE:AD:BE:EF:00:01\n"));
        assert!(text.contains("  Source Address: AA:BB:CC:DD:EE:FF\n"));
        assert!(text.contains("  Protocol: 0x0800\n"));
        assert!(text.contains("  IP Version: 4\n"));
        assert!(text.contains("  IP Header Length: 20 bytes\n"));
        assert!(text.contains("  IP Total Length: 84 bytes (Size of Packet)\n"));
        assert!(text.contains("  Identification: 4660\n"));
        assert!(text.contains("  TTL: 64\n"));
        assert!(text.contains("  Protocol: 1\n"));
        assert!(text.contains("  Checksum: 16\n"));
        assert!(text.contains("  Source IP: 10.0.0.1\n"));
        assert!(text.contains("  Destination IP: 10.0.0.2\n"));
    }

    #[test]
    fn test_describe_ethernet_only_frame() {
        let bytes = ipv4_frame().bytes()[..20].to_vec();
        let text = describe_frame(&Frame::new(bytes));
        assert!(text.contains("  Source Address: AA:BB:CC:DD:EE:FF\n"));
        assert!(text.ends_with("IP Header\n  No data\n"));
    }

    #[test]
    fn test_describe_runt_frame() {
        let text = describe_frame(&Frame::new(vec![0; 4]));
        assert_eq!(text, "Ethernet Header\n  No data\nIP Header\n  No data\n");
    }
}
