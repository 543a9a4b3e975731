//! rawsniff - raw link-layer packet sniffer.
//!
//! Captures frames from an AF_PACKET raw socket (or a single interface via
//! pnet) on a background thread, buffers them in a shared [`FrameSink`],
//! and renders Ethernet/IPv4 header fields plus a hex/ASCII dump on demand.
//!
//! ```no_run
//! use std::time::Duration;
//! use rawsniff::{CaptureEngine, FrameSink, RawSocket};
//!
//! let socket = RawSocket::open(Duration::from_millis(100))?;
//! let mut engine = CaptureEngine::new(Box::new(socket));
//! let sink = FrameSink::new();
//!
//! engine.start_capture(&sink)?;
//! std::thread::sleep(Duration::from_secs(5));
//! engine.stop_capture();
//!
//! for frame in sink.snapshot() {
//!     println!("{}", rawsniff::format_frame(&frame));
//! }
//! engine.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod capture;
pub mod config;
pub mod decoder;
pub mod domain;
pub mod error;
pub mod export;
pub mod formatter;
pub mod reporter;

pub use capture::{
    CaptureEngine, CaptureState, FrameSink, FrameSource, InterfaceCapture, RawSocket,
    MAX_FRAME_SIZE,
};
pub use config::Config;
pub use decoder::{decode_ethernet, decode_ipv4};
pub use domain::{EthernetHeader, Frame, Ipv4Header};
pub use error::{CaptureError, ConfigError, DecodeError, ExportError, SocketError};
pub use export::export_frames;
pub use formatter::{describe_frame, format_frame, write_frame, FrameRow};
pub use reporter::{ConsoleReporter, FrameReporter};
