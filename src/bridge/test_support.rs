// Mock collaborators shared by the bridge tests

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use rosc::OscType;

use crate::data::RepeatMode;
use crate::helpers::now_playing::NowPlayingSink;
use crate::osc::client::{MessageSink, OscSendError};
use crate::spotify::{
    PlaybackApi, Result, SpotifyArtist, SpotifyCurrentlyPlaying, SpotifyError, SpotifyPlayerState,
    SpotifyTrack, SpotifyUserProfile,
};

/// Playback API mock that records every call and serves configurable state
#[derive(Default)]
pub(crate) struct MockApi {
    calls: Mutex<Vec<String>>,
    /// Whether the player reports as playing
    pub playing: AtomicBool,
    /// Currently playing track, if any: (name, artist, duration_ms)
    pub track: Mutex<Option<(String, String, u64)>>,
    /// Position within the current track
    pub progress_ms: Mutex<u64>,
    /// Number of upcoming state fetches that fail
    pub fail_fetches: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(name: &str, artist: &str, duration_ms: u64) -> Self {
        let api = Self::new();
        *api.track.lock().unwrap() = Some((name.to_string(), artist.to_string(), duration_ms));
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn current_track(&self) -> Option<SpotifyTrack> {
        self.track
            .lock()
            .unwrap()
            .as_ref()
            .map(|(name, artist, duration_ms)| SpotifyTrack {
                id: None,
                name: name.clone(),
                duration_ms: *duration_ms,
                artists: vec![SpotifyArtist {
                    id: None,
                    name: artist.clone(),
                }],
            })
    }

    fn take_failure(&self) -> bool {
        self.fail_fetches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok()
    }
}

impl PlaybackApi for MockApi {
    fn play(&self) -> Result<()> {
        self.record("play".to_string());
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.record("pause".to_string());
        Ok(())
    }

    fn next_track(&self) -> Result<()> {
        self.record("next".to_string());
        Ok(())
    }

    fn previous_track(&self) -> Result<()> {
        self.record("previous".to_string());
        Ok(())
    }

    fn seek(&self, position_ms: u64) -> Result<()> {
        self.record(format!("seek:{}", position_ms));
        Ok(())
    }

    fn set_shuffle(&self, enabled: bool) -> Result<()> {
        self.record(format!("shuffle:{}", enabled));
        Ok(())
    }

    fn set_repeat(&self, mode: RepeatMode) -> Result<()> {
        self.record(format!("repeat:{}", mode));
        Ok(())
    }

    fn set_volume(&self, volume_percent: u32) -> Result<()> {
        self.record(format!("volume:{}", volume_percent));
        Ok(())
    }

    fn currently_playing(&self) -> Result<Option<SpotifyCurrentlyPlaying>> {
        if self.take_failure() {
            return Err(SpotifyError::RemoteCallFailed("mock failure".to_string()));
        }
        self.record("currently_playing".to_string());
        Ok(Some(SpotifyCurrentlyPlaying {
            item: self.current_track(),
            progress_ms: Some(*self.progress_ms.lock().unwrap()),
            is_playing: self.playing.load(Ordering::SeqCst),
        }))
    }

    fn player_state(&self) -> Result<Option<SpotifyPlayerState>> {
        if self.take_failure() {
            return Err(SpotifyError::RemoteCallFailed("mock failure".to_string()));
        }
        self.record("player_state".to_string());
        Ok(Some(SpotifyPlayerState {
            is_playing: self.playing.load(Ordering::SeqCst),
            repeat_state: None,
            shuffle_state: None,
            progress_ms: None,
            item: None,
        }))
    }

    fn current_user(&self) -> Result<SpotifyUserProfile> {
        Ok(SpotifyUserProfile {
            id: "mock-user".to_string(),
            display_name: None,
        })
    }
}

/// Message sink that records outbound messages instead of sending them
#[derive(Default)]
pub(crate) struct RecordingSink {
    messages: Mutex<Vec<(String, Vec<OscType>)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, Vec<OscType>)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn sent_to(&self, addr: &str) -> Vec<Vec<OscType>> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, _)| a == addr)
            .map(|(_, args)| args.clone())
            .collect()
    }
}

impl MessageSink for RecordingSink {
    fn send(&self, addr: &str, args: Vec<OscType>) -> std::result::Result<(), OscSendError> {
        self.messages
            .lock()
            .unwrap()
            .push((addr.to_string(), args));
        Ok(())
    }
}

/// Now-playing sink that records updates in memory
#[derive(Default)]
pub(crate) struct RecordingNowPlaying {
    lines: Mutex<Vec<(String, String)>>,
}

impl RecordingNowPlaying {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(String, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl NowPlayingSink for RecordingNowPlaying {
    fn update(&self, track: &str, artist: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap()
            .push((track.to_string(), artist.to_string()));
        Ok(())
    }
}
