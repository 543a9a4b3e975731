//! Console-based frame reporter.

use std::io::{self, Write};

use crate::domain::Frame;
use crate::formatter::{describe_frame, format_frame, FrameRow};
use crate::reporter::FrameReporter;

/// Reports captured frames to stdout, one table row per frame.
pub struct ConsoleReporter {
    /// Whether to append the hex/ASCII dump
    hexdump: bool,
    /// Whether to append decoded header fields
    details: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter.
    pub fn new() -> Self {
        Self {
            hexdump: false,
            details: false,
        }
    }

    /// Enable or disable the hex dump after each row.
    pub fn with_hexdump(mut self, hexdump: bool) -> Self {
        self.hexdump = hexdump;
        self
    }

    /// Enable or disable the header detail section after each row.
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    fn render(&self, index: usize, frame: &Frame) -> String {
        let mut output = FrameRow::from_frame(index, frame).to_string();
        output.push('\n');

        if self.details {
            output.push_str(&describe_frame(frame));
        }
        if self.hexdump {
            output.push_str(&format_frame(frame));
        }

        output
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReporter for ConsoleReporter {
    fn report(&self, index: usize, frame: &Frame) {
        let output = self.render(index, frame);
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(output.as_bytes());
    }

    fn on_start(&self, source: &str) {
        println!("Capturing on {}", source);
        println!("Press Ctrl+C to stop.\n");
        println!(
            "{:>6}  {:<17}  {:<17}  {:<6}  {:>5}",
            "#", "Source", "Destination", "Proto", "Size"
        );
    }

    fn on_stop(&self, captured: usize) {
        println!("\nCaptured Packets: {}", captured);
    }
}
