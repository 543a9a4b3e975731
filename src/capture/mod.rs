//! Packet capture engine.
//!
//! This module defines the `FrameSource` trait (DIP), two implementations
//! (an AF_PACKET raw socket and a pnet interface channel), the shared
//! `FrameSink`, and the `CaptureEngine` that runs the background capture
//! loop.

mod engine;
mod interface;
mod raw_socket;
mod sink;

pub use engine::CaptureEngine;
pub use interface::InterfaceCapture;
pub use raw_socket::RawSocket;
pub use sink::FrameSink;

use std::fmt;

use crate::domain::Frame;
use crate::error::SocketError;

/// Largest frame a single read requests.
pub const MAX_FRAME_SIZE: usize = 65536;

/// Trait for link-layer frame sources (Dependency Inversion Principle).
///
/// The engine depends on this abstraction rather than a concrete socket,
/// making it easy to:
/// - Test the capture loop with scripted sources
/// - Switch between capture backends (raw socket, pnet interface channel)
pub trait FrameSource: Send {
    /// Block until a frame arrives or the poll interval elapses.
    ///
    /// Returns `Ok(None)` when no frame arrived in time. An `Err` is fatal
    /// to the capture session.
    fn read_frame(&mut self) -> Result<Option<Frame>, SocketError>;

    /// Human-readable name of what is being captured.
    fn name(&self) -> &str;
}

/// Whether the engine's capture loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Inactive,
    Active,
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Inactive => write!(f, "inactive"),
            CaptureState::Active => write!(f, "active"),
        }
    }
}
