//! Header decoding module.
//!
//! This module is responsible for interpreting a frame's leading bytes as
//! Ethernet and IPv4 header fields (SRP).

mod header_decoder;

pub use header_decoder::{decode_ethernet, decode_ipv4, IPV4_MIN_FRAME_LEN};
