//! AF_PACKET raw socket capturing every protocol on every interface.

use std::io::{self, Read};
use std::time::Duration;

use socket2::Socket;
use tracing::debug;

use super::{FrameSource, MAX_FRAME_SIZE};
use crate::domain::Frame;
use crate::error::SocketError;

/// Shortest read timeout the socket accepts; zero would mean "block forever".
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Link-layer raw socket bound to all protocols (`ETH_P_ALL`).
///
/// Requires root or `CAP_NET_RAW`.
pub struct RawSocket {
    socket: Socket,
    /// Scratch buffer for reads; each frame copies out of it.
    buf: Vec<u8>,
}

impl RawSocket {
    /// Open the raw socket.
    ///
    /// Each read waits at most `poll_interval` so the capture loop can
    /// observe a stop request on a silent interface.
    pub fn open(poll_interval: Duration) -> Result<Self, SocketError> {
        let socket = create_packet_socket().map_err(SocketError::from_io)?;
        let poll_interval = read_timeout(poll_interval);
        socket
            .set_read_timeout(Some(poll_interval))
            .map_err(SocketError::Unavailable)?;

        debug!("Opened raw packet socket (poll interval {:?})", poll_interval);

        Ok(Self {
            socket,
            buf: vec![0u8; MAX_FRAME_SIZE],
        })
    }
}

/// Read timeout actually applied to the socket for a requested interval.
fn read_timeout(poll_interval: Duration) -> Duration {
    poll_interval.max(MIN_POLL_INTERVAL)
}

#[cfg(target_os = "linux")]
fn create_packet_socket() -> io::Result<Socket> {
    use socket2::{Domain, Protocol, Type};

    // The protocol argument is ETH_P_ALL in network byte order.
    let protocol = i32::from((libc::ETH_P_ALL as u16).to_be());
    Socket::new(
        Domain::from(libc::AF_PACKET),
        Type::from(libc::SOCK_RAW),
        Some(Protocol::from(protocol)),
    )
}

#[cfg(not(target_os = "linux"))]
fn create_packet_socket() -> io::Result<Socket> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "AF_PACKET raw sockets are only available on Linux",
    ))
}

impl FrameSource for RawSocket {
    fn read_frame(&mut self) -> Result<Option<Frame>, SocketError> {
        match self.socket.read(&mut self.buf) {
            // A packet socket never delivers an empty frame; treat as no data.
            Ok(0) => Ok(None),
            Ok(len) => Ok(Frame::from_read(&self.buf, len)),
            Err(e) if is_poll_timeout(&e) => Ok(None),
            Err(e) => Err(SocketError::Unavailable(e)),
        }
    }

    fn name(&self) -> &str {
        "all interfaces"
    }
}

/// Whether a read error only means the poll interval elapsed.
pub(super) fn is_poll_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}
