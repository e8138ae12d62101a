use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::data::RepeatMode;

use super::auth::TokenProvider;
use super::{Result, SpotifyError};

const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Timeout applied to every API request; handlers call the API in-line and
/// must not hang on a stalled connection
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

// Response structures for the subset of the player API the bridge drives

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyCurrentlyPlaying {
    pub item: Option<SpotifyTrack>,
    pub progress_ms: Option<u64>,
    pub is_playing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    pub name: String,
    pub duration_ms: u64,
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlayerState {
    pub is_playing: bool,
    pub repeat_state: Option<String>,
    pub shuffle_state: Option<bool>,
    pub progress_ms: Option<u64>,
    pub item: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

/// Abstract interface to the remote playback service
///
/// The translation core and the mirror loop depend on this trait only, so
/// tests substitute a mock and the HTTP client stays swappable.
pub trait PlaybackApi: Send + Sync {
    /// Resume playback on the active device
    fn play(&self) -> Result<()>;

    /// Pause playback on the active device
    fn pause(&self) -> Result<()>;

    /// Skip to the next track
    fn next_track(&self) -> Result<()>;

    /// Skip to the previous track
    fn previous_track(&self) -> Result<()>;

    /// Seek to a position in the current track
    fn seek(&self, position_ms: u64) -> Result<()>;

    /// Enable or disable shuffle
    fn set_shuffle(&self, enabled: bool) -> Result<()>;

    /// Set the repeat mode
    fn set_repeat(&self, mode: RepeatMode) -> Result<()>;

    /// Set the device volume in percent (0-100)
    fn set_volume(&self, volume_percent: u32) -> Result<()>;

    /// Fetch the currently playing track, or None if there is no active
    /// playback session
    fn currently_playing(&self) -> Result<Option<SpotifyCurrentlyPlaying>>;

    /// Fetch the player state, or None if there is no active device
    fn player_state(&self) -> Result<Option<SpotifyPlayerState>>;

    /// Fetch the authenticated user's profile
    fn current_user(&self) -> Result<SpotifyUserProfile>;
}

/// Spotify Web API client
pub struct SpotifyClient {
    tokens: Arc<dyn TokenProvider>,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_base_url(tokens, API_BASE_URL)
    }

    /// Create a client against a different base URL (used by tests)
    pub fn with_base_url(tokens: Arc<dyn TokenProvider>, base_url: &str) -> Self {
        Self {
            tokens,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: &str, path: &str) -> Result<ureq::Response> {
        let token = self.tokens.access_token()?;
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        ureq::request(method, &url)
            .timeout(HTTP_TIMEOUT)
            .set("Authorization", &format!("Bearer {}", token))
            .call()
            .map_err(|e| SpotifyError::RemoteCallFailed(e.to_string()))
    }

    /// Issue a command request whose response body is ignored
    fn command(&self, method: &str, path: &str) -> Result<()> {
        self.request(method, path).map(|_| ())
    }

    /// Issue a GET request; a 204 or empty body decodes to None
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self.request("GET", path)?;
        if response.status() == 204 {
            return Ok(None);
        }

        let body = response
            .into_string()
            .map_err(|e| SpotifyError::RemoteCallFailed(e.to_string()))?;
        if body.is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&body)?))
    }
}

impl PlaybackApi for SpotifyClient {
    fn play(&self) -> Result<()> {
        self.command("PUT", "/me/player/play")
    }

    fn pause(&self) -> Result<()> {
        self.command("PUT", "/me/player/pause")
    }

    fn next_track(&self) -> Result<()> {
        self.command("POST", "/me/player/next")
    }

    fn previous_track(&self) -> Result<()> {
        self.command("POST", "/me/player/previous")
    }

    fn seek(&self, position_ms: u64) -> Result<()> {
        self.command("PUT", &format!("/me/player/seek?position_ms={}", position_ms))
    }

    fn set_shuffle(&self, enabled: bool) -> Result<()> {
        self.command("PUT", &format!("/me/player/shuffle?state={}", enabled))
    }

    fn set_repeat(&self, mode: RepeatMode) -> Result<()> {
        self.command("PUT", &format!("/me/player/repeat?state={}", mode.as_api_str()))
    }

    fn set_volume(&self, volume_percent: u32) -> Result<()> {
        self.command(
            "PUT",
            &format!("/me/player/volume?volume_percent={}", volume_percent),
        )
    }

    fn currently_playing(&self) -> Result<Option<SpotifyCurrentlyPlaying>> {
        self.get_json("/me/player/currently-playing")
    }

    fn player_state(&self) -> Result<Option<SpotifyPlayerState>> {
        self.get_json("/me/player")
    }

    fn current_user(&self) -> Result<SpotifyUserProfile> {
        self.get_json("/me")?
            .ok_or_else(|| SpotifyError::RemoteCallFailed("empty profile response".to_string()))
    }
}
