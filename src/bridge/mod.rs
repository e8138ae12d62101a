// Protocol translation core
//
// Everything between the OSC transport and the Spotify client lives here:
// the command handlers, the scrub gesture state machines and the loop that
// mirrors remote playback state back onto avatar parameters.

pub mod gesture;
pub mod handlers;
pub mod mirror;

#[cfg(test)]
pub(crate) mod test_support;

pub use gesture::{GestureState, GestureTransition, ScrubSession};
pub use handlers::ControlHandlers;
pub use mirror::StateMirror;

use std::sync::Mutex;

use log::warn;

/// Inbound avatar parameter addresses handled by the bridge
pub mod inbound {
    pub const PLAY_PAUSE: &str = "/avatar/parameters/OSC_AUDIO_CONTROLS_PLAY_PAUSE";
    pub const NEXT: &str = "/avatar/parameters/OSC_AUDIO_CONTROLS_NEXT";
    pub const PREVIOUS: &str = "/avatar/parameters/OSC_AUDIO_CONTROLS_PREVIOUS";
    pub const SHUFFLE: &str = "/avatar/parameters/shuffleSongState";
    pub const REPEAT: &str = "/avatar/parameters/repeatSongState";
    pub const IN_SLIDER: &str = "/avatar/parameters/inSlider";
    pub const PROX_VALUE: &str = "/avatar/parameters/proxValue";
    pub const IN_VOLUME_SLIDER: &str = "/avatar/parameters/inVolumeSlider";
    pub const VOLUME_PROX: &str = "/avatar/parameters/volumeSliderProx";
    pub const RAMP: &str = "/ramp";
}

/// Outbound addresses emitted by the bridge
pub mod outbound {
    pub const SLIDER: &str = "/avatar/parameters/slider";
    pub const IS_PLAYING: &str = "/avatar/parameters/isPlaying";
    pub const CHAN1: &str = "/avatar/parameters/chan1";
}

/// State shared between the message handlers and the mirror loop
///
/// Each scrub session sits behind its own mutex so the engaged flag and the
/// live value are always read and written together; the mirror loop never
/// observes a torn pair.
pub struct BridgeState {
    progress: Mutex<ScrubSession>,
    volume: Mutex<ScrubSession>,
}

impl BridgeState {
    pub fn new() -> Self {
        Self {
            progress: Mutex::new(ScrubSession::new()),
            volume: Mutex::new(ScrubSession::new()),
        }
    }

    /// Run a closure against the progress scrub session
    pub fn with_progress<T>(&self, f: impl FnOnce(&mut ScrubSession) -> T) -> Option<T> {
        match self.progress.lock() {
            Ok(mut session) => Some(f(&mut session)),
            Err(_) => {
                warn!("Progress scrub session lock poisoned");
                None
            }
        }
    }

    /// Run a closure against the volume scrub session
    pub fn with_volume<T>(&self, f: impl FnOnce(&mut ScrubSession) -> T) -> Option<T> {
        match self.volume.lock() {
            Ok(mut session) => Some(f(&mut session)),
            Err(_) => {
                warn!("Volume scrub session lock poisoned");
                None
            }
        }
    }

    /// Whether the progress scrub gesture is currently engaged
    pub fn progress_engaged(&self) -> bool {
        self.with_progress(|session| session.is_engaged())
            .unwrap_or(false)
    }
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::new()
    }
}
