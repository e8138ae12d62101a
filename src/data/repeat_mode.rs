/// Repeat mode enumeration for playback
use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Repeat disabled
    Off,
    /// Repeat the current track
    Track,
    /// Repeat the current context (album, playlist, ...)
    Context,
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatMode::Off
    }
}

impl RepeatMode {
    /// Map the avatar parameter integer onto a repeat mode.
    ///
    /// The parameter space is not ordered like the API space: 1 selects
    /// context repeat and 2 selects track repeat. Existing avatar
    /// configurations depend on this assignment, so it must not be
    /// "fixed" to a monotonic one.
    pub fn from_parameter(value: i32) -> Option<RepeatMode> {
        match value {
            0 => Some(RepeatMode::Off),
            1 => Some(RepeatMode::Context),
            2 => Some(RepeatMode::Track),
            _ => None,
        }
    }

    /// Integer form used on the avatar parameter
    pub fn as_parameter(&self) -> i32 {
        match self {
            RepeatMode::Off => 0,
            RepeatMode::Context => 1,
            RepeatMode::Track => 2,
        }
    }

    /// String form used by the remote API
    pub fn as_api_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::Track => "track",
            RepeatMode::Context => "context",
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_api_str())
    }
}
