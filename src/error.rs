//! Error types for capture, decoding, export and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while creating or reading a capture socket.
#[derive(Error, Debug)]
pub enum SocketError {
    /// The process lacks the privilege raw-socket creation requires.
    #[error("insufficient permissions for raw capture (try running as root or with CAP_NET_RAW)")]
    PermissionDenied,

    /// Any other OS-level socket failure, at creation or during a read.
    #[error("socket unavailable: {0}")]
    Unavailable(#[source] io::Error),
}

impl SocketError {
    /// Classify an OS error from socket creation.
    pub fn from_io(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied || is_permission_errno(&err) {
            SocketError::PermissionDenied
        } else {
            SocketError::Unavailable(err)
        }
    }
}

#[cfg(target_os = "linux")]
fn is_permission_errno(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EPERM) | Some(libc::EACCES))
}

#[cfg(not(target_os = "linux"))]
fn is_permission_errno(_err: &io::Error) -> bool {
    false
}

/// Errors raised when decoding header fields from a frame.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
}

/// Errors raised by the capture engine's controls.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The frame source was lost when a worker failed to spawn.
    #[error("capture engine has no frame source")]
    NoSource,

    #[error("capture worker panicked; the frame source was lost")]
    WorkerPanicked,

    #[error("failed to spawn capture worker: {0}")]
    Spawn(#[source] io::Error),
}

/// Errors raised while exporting frames to a file.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write export file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_kind_is_classified() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            SocketError::from_io(err),
            SocketError::PermissionDenied
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_eperm_is_classified() {
        let err = io::Error::from_raw_os_error(libc::EPERM);
        assert!(matches!(
            SocketError::from_io(err),
            SocketError::PermissionDenied
        ));
    }

    #[test]
    fn test_other_errors_are_unavailable() {
        let err = io::Error::new(io::ErrorKind::AddrNotAvailable, "gone");
        assert!(matches!(
            SocketError::from_io(err),
            SocketError::Unavailable(_)
        ));
    }

    #[test]
    fn test_too_short_display() {
        let err = DecodeError::TooShort {
            expected: 14,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "frame too short: expected at least 14 bytes, got 3"
        );
    }
}
