// Spotify Web API integration
//
// This module provides the playback-control surface of the Spotify Web API
// behind an object-safe trait so the translation core never talks HTTP
// directly. Token acquisition and refresh happen outside this process.

pub mod api;
pub mod auth;

pub use api::{
    PlaybackApi, SpotifyArtist, SpotifyClient, SpotifyCurrentlyPlaying, SpotifyPlayerState,
    SpotifyTrack, SpotifyUserProfile,
};
pub use auth::{StaticTokenProvider, TokenProvider};

use thiserror::Error;

/// Spotify API error types
#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("remote call failed: {0}")]
    RemoteCallFailed(String),

    #[error("no track is currently playing")]
    NoTrackPlaying,

    #[error("authentication error: {0}")]
    AuthError(String),

    #[error("failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpotifyError>;
