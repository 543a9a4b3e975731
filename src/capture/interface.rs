//! pnet-based capture on a single named interface.

use std::io;
use std::time::Duration;

use pnet::datalink::{self, Channel, Config, DataLinkReceiver, NetworkInterface};
use tracing::debug;

use super::raw_socket::is_poll_timeout;
use super::{FrameSource, MAX_FRAME_SIZE};
use crate::domain::Frame;
use crate::error::SocketError;

/// Frame source reading from one interface through a pnet datalink channel.
pub struct InterfaceCapture {
    interface: NetworkInterface,
    rx: Box<dyn DataLinkReceiver>,
}

impl InterfaceCapture {
    /// Open a capture channel on the named interface.
    pub fn open(interface_name: &str, poll_interval: Duration) -> Result<Self, SocketError> {
        let interface = datalink::interfaces()
            .into_iter()
            .find(|iface| iface.name == interface_name)
            .ok_or_else(|| {
                SocketError::Unavailable(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("interface '{}' not found", interface_name),
                ))
            })?;

        let config = Config {
            read_timeout: Some(poll_interval),
            read_buffer_size: MAX_FRAME_SIZE,
            ..Config::default()
        };

        let rx = match datalink::channel(&interface, config) {
            Ok(Channel::Ethernet(_tx, rx)) => rx,
            Ok(_) => {
                return Err(SocketError::Unavailable(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "unsupported channel type",
                )))
            }
            Err(e) => return Err(classify_channel_error(e)),
        };

        debug!("Opened pnet channel on {}", interface.name);

        Ok(Self { interface, rx })
    }

    /// List all available network interfaces.
    pub fn list_interfaces() -> Vec<String> {
        datalink::interfaces()
            .into_iter()
            .map(|iface| {
                let status = if iface.is_up() { "UP" } else { "DOWN" };
                let ips: Vec<_> = iface.ips.iter().map(|ip| ip.to_string()).collect();
                format!(
                    "{}: {} [{}]",
                    iface.name,
                    status,
                    if ips.is_empty() {
                        "no IP".to_string()
                    } else {
                        ips.join(", ")
                    }
                )
            })
            .collect()
    }
}

impl FrameSource for InterfaceCapture {
    fn read_frame(&mut self) -> Result<Option<Frame>, SocketError> {
        match self.rx.next() {
            Ok(packet) => Ok(Some(Frame::from(packet))),
            Err(e) if is_poll_timeout(&e) => Ok(None),
            Err(e) => Err(SocketError::Unavailable(e)),
        }
    }

    fn name(&self) -> &str {
        &self.interface.name
    }
}

/// pnet reports some permission failures only in the message text.
fn classify_channel_error(err: io::Error) -> SocketError {
    let msg = err.to_string();
    if msg.contains("permission") || msg.contains("Operation not permitted") {
        return SocketError::PermissionDenied;
    }
    SocketError::from_io(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_interface_is_unavailable() {
        let result = InterfaceCapture::open("no-such-iface0", Duration::from_millis(10));
        match result {
            Err(SocketError::Unavailable(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("interface should not exist"),
        }
    }

    #[test]
    fn test_permission_message_is_classified() {
        let err = io::Error::new(io::ErrorKind::Other, "Operation not permitted (os error 1)");
        assert!(matches!(
            classify_channel_error(err),
            SocketError::PermissionDenied
        ));
    }

    #[test]
    fn test_other_channel_errors_are_unavailable() {
        let err = io::Error::new(io::ErrorKind::Other, "No such device");
        assert!(matches!(
            classify_channel_error(err),
            SocketError::Unavailable(_)
        ));
    }

    #[test]
    fn test_list_interfaces_format() {
        for line in InterfaceCapture::list_interfaces() {
            assert!(line.contains(": UP [") || line.contains(": DOWN ["));
        }
    }
}
