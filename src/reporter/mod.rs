//! Reporting module for captured frames.
//!
//! This module defines the `FrameReporter` trait (ISP, DIP) and provides
//! a console implementation.

mod console_reporter;

pub use console_reporter::ConsoleReporter;

use crate::domain::Frame;

/// Trait for reporting captured frames (Interface Segregation Principle).
///
/// This trait only handles presentation; capture and decoding live
/// elsewhere. Implementations can write to a terminal, a log, a UI, etc.
pub trait FrameReporter: Send {
    /// Report one captured frame and its position in the sink.
    fn report(&self, index: usize, frame: &Frame);

    /// Called when capture starts.
    fn on_start(&self, source: &str);

    /// Called when capture stops.
    fn on_stop(&self, captured: usize);
}
