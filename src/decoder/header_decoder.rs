//! Ethernet and IPv4 header decoding built on pnet's packet views.

use macaddr::MacAddr6;
use pnet::packet::ethernet::EthernetPacket;
use pnet::packet::ipv4::Ipv4Packet;

use crate::domain::{EthernetHeader, Frame, Ipv4Header, ETHERNET_HEADER_LEN, IPV4_HEADER_LEN};
use crate::error::DecodeError;

/// Smallest frame that carries a full fixed IPv4 header.
pub const IPV4_MIN_FRAME_LEN: usize = ETHERNET_HEADER_LEN + IPV4_HEADER_LEN;

/// Decode the Ethernet II header from bytes 0..14.
pub fn decode_ethernet(frame: &Frame) -> Result<EthernetHeader, DecodeError> {
    let ethernet = EthernetPacket::new(frame.bytes()).ok_or(DecodeError::TooShort {
        expected: ETHERNET_HEADER_LEN,
        actual: frame.len(),
    })?;

    Ok(EthernetHeader {
        destination: MacAddr6::from(ethernet.get_destination().octets()),
        source: MacAddr6::from(ethernet.get_source().octets()),
        ether_type: ethernet.get_ethertype().0,
    })
}

/// Decode the fixed 20-byte IPv4 header that follows the Ethernet header.
///
/// The checksum is reported, not verified. Options beyond the first 20
/// bytes are not parsed.
pub fn decode_ipv4(frame: &Frame) -> Result<Ipv4Header, DecodeError> {
    let too_short = DecodeError::TooShort {
        expected: IPV4_MIN_FRAME_LEN,
        actual: frame.len(),
    };

    let header_bytes = frame
        .bytes()
        .get(ETHERNET_HEADER_LEN..IPV4_MIN_FRAME_LEN)
        .ok_or(too_short)?;
    let ipv4 = Ipv4Packet::new(header_bytes).ok_or(too_short)?;

    Ok(Ipv4Header {
        version: ipv4.get_version(),
        header_length_words: ipv4.get_header_length(),
        // pnet splits the TOS byte into DSCP (high 6 bits) and ECN (low 2)
        type_of_service: (ipv4.get_dscp() << 2) | ipv4.get_ecn(),
        total_length: ipv4.get_total_length(),
        identification: ipv4.get_identification(),
        time_to_live: ipv4.get_ttl(),
        protocol: ipv4.get_next_level_protocol().0,
        checksum: ipv4.get_checksum(),
        source: ipv4.get_source(),
        destination: ipv4.get_destination(),
    })
}
