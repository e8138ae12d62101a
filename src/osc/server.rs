use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, trace, warn};
use rosc::{OscMessage, OscPacket};

type Handler = Box<dyn Fn(&OscMessage) + Send + Sync>;

/// Binds address patterns to message handlers
///
/// Addresses are matched exactly; the VR client sends one parameter per
/// address and does not use OSC pattern wildcards.
#[derive(Default)]
pub struct OscDispatcher {
    handlers: HashMap<String, Handler>,
}

impl OscDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for an exact address
    pub fn add_handler<F>(&mut self, addr: &str, handler: F)
    where
        F: Fn(&OscMessage) + Send + Sync + 'static,
    {
        if self.handlers.insert(addr.to_string(), Box::new(handler)).is_some() {
            warn!("Replaced existing handler for {}", addr);
        }
    }

    /// Number of registered addresses
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Dispatch a decoded packet, recursing into bundles
    pub fn dispatch(&self, packet: &OscPacket) {
        match packet {
            OscPacket::Message(msg) => {
                if let Some(handler) = self.handlers.get(&msg.addr) {
                    trace!("Dispatching message for {}", msg.addr);
                    handler(msg);
                } else {
                    debug!("No handler registered for {}", msg.addr);
                }
            }
            OscPacket::Bundle(bundle) => {
                for inner in &bundle.content {
                    self.dispatch(inner);
                }
            }
        }
    }
}

/// UDP OSC server feeding inbound datagrams to a dispatcher
pub struct OscServer {
    socket: UdpSocket,
}

impl OscServer {
    /// How long a single receive blocks before the running flag is rechecked
    const READ_TIMEOUT: Duration = Duration::from_millis(500);

    /// Bind the server socket on the given address
    pub fn bind(addr: &str) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(Self::READ_TIMEOUT))?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive and dispatch datagrams until the running flag clears.
    ///
    /// Malformed datagrams are logged and dropped; they never stop the
    /// server.
    pub fn serve(&self, dispatcher: &OscDispatcher, running: &AtomicBool) {
        let mut buf = [0u8; 65536];
        while running.load(Ordering::SeqCst) {
            match self.socket.recv_from(&mut buf) {
                Ok((size, peer)) => match rosc::decoder::decode_udp(&buf[..size]) {
                    Ok((_, packet)) => dispatcher.dispatch(&packet),
                    Err(e) => warn!("Dropping malformed OSC datagram from {}: {}", peer, e),
                },
                Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                    continue;
                }
                Err(e) => warn!("OSC receive error: {}", e),
            }
        }
        debug!("OSC server loop exited");
    }
}
