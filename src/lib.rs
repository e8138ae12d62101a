/// Data structures shared across the bridge
pub mod data;

/// OSC transport: argument decoding, outbound client, inbound server
pub mod osc;

/// Spotify Web API client
pub mod spotify;

/// Protocol translation core: command handlers, scrub gestures, mirror loop
pub mod bridge;

/// Helper utilities for I/O and other common tasks
pub mod helpers;

/// Configuration loading
pub mod config;

// Re-export the shared state and repeat mode for easier access
pub use bridge::BridgeState;
pub use data::RepeatMode;
