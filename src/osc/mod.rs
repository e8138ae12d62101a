// OSC transport for the bridge
//
// This module covers the three transport concerns: decoding typed arguments
// out of inbound messages, sending outbound messages over UDP, and the UDP
// server that feeds inbound messages to the registered handlers.

pub mod args;
pub mod client;
pub mod server;

pub use client::{MessageSink, OscSendError, UdpOscClient};
pub use server::{OscDispatcher, OscServer};
