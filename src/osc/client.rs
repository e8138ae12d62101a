use std::net::UdpSocket;

use log::debug;
use rosc::{encoder, OscMessage, OscPacket, OscType};
use thiserror::Error;

/// Error types that can occur when sending outbound messages
#[derive(Debug, Error)]
pub enum OscSendError {
    #[error("failed to encode OSC packet: {0}")]
    Encode(#[from] rosc::OscError),

    #[error("failed to send OSC packet: {0}")]
    Io(#[from] std::io::Error),
}

/// Sink for outbound addressed messages
///
/// The handlers and the mirror loop only depend on this trait, so tests can
/// substitute a recording implementation for the UDP client.
pub trait MessageSink: Send + Sync {
    fn send(&self, addr: &str, args: Vec<OscType>) -> Result<(), OscSendError>;
}

/// UDP-based OSC client for sending parameter updates to the VR client
pub struct UdpOscClient {
    sock: UdpSocket,
    /// Target address in "host:port" format
    target: String,
}

impl UdpOscClient {
    /// Create a new client bound to an ephemeral local port.
    ///
    /// # Arguments
    /// * `target` - The target address in "host:port" format (e.g., "127.0.0.1:9000")
    pub fn new<A: Into<String>>(target: A) -> Result<Self, OscSendError> {
        let sock = UdpSocket::bind("0.0.0.0:0")?;
        Ok(Self {
            sock,
            target: target.into(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl MessageSink for UdpOscClient {
    fn send(&self, addr: &str, args: Vec<OscType>) -> Result<(), OscSendError> {
        let packet = OscPacket::Message(OscMessage {
            addr: addr.to_string(),
            args,
        });
        let buf = encoder::encode(&packet)?;
        self.sock.send_to(&buf, &self.target)?;
        debug!("Sent {} ({} bytes)", addr, buf.len());
        Ok(())
    }
}
