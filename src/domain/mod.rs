//! Domain models for captured link-layer frames.
//!
//! This module contains the core value types that are independent
//! of any capture backend (SRP, DIP).

mod frame;
mod headers;

pub use frame::Frame;
pub use headers::{EthernetHeader, Ipv4Header, ETHERNET_HEADER_LEN, IPV4_HEADER_LEN};
