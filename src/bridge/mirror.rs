use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use rosc::OscType;

use crate::data::PlaybackSnapshot;
use crate::helpers::now_playing::NowPlayingSink;
use crate::helpers::rounding::round_to_decimal;
use crate::osc::MessageSink;
use crate::spotify::{PlaybackApi, SpotifyCurrentlyPlaying};

use super::{outbound, BridgeState};

/// Interval between remote state polls
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Extended wait after a failed poll before resuming the normal cadence
const BACKOFF_INTERVAL: Duration = Duration::from_secs(10);

/// How often a sleeping loop rechecks the running flag
const SHUTDOWN_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Periodically mirrors remote playback state onto avatar parameters
///
/// Each tick fetches one playback snapshot and emits the elapsed fraction
/// on the slider parameter plus the playing flag. The slider emission is
/// suppressed while the progress gesture is engaged; remote-authoritative
/// progress would fight the local scrub.
pub struct StateMirror {
    api: Arc<dyn PlaybackApi>,
    sink: Arc<dyn MessageSink>,
    state: Arc<BridgeState>,
    now_playing: Arc<dyn NowPlayingSink>,
}

impl StateMirror {
    pub fn new(
        api: Arc<dyn PlaybackApi>,
        sink: Arc<dyn MessageSink>,
        state: Arc<BridgeState>,
        now_playing: Arc<dyn NowPlayingSink>,
    ) -> Self {
        Self {
            api,
            sink,
            state,
            now_playing,
        }
    }

    /// Run one poll cycle and return the delay before the next one
    pub fn tick(&self) -> Duration {
        let playing = match self.api.currently_playing() {
            Ok(playing) => playing,
            Err(e) => {
                warn!("Error retrieving currently playing track: {}", e);
                return BACKOFF_INTERVAL;
            }
        };

        match playing.as_ref().and_then(snapshot_of) {
            Some(snapshot) => self.emit(&snapshot),
            None => debug!("No track is currently playing, skipping mirror update"),
        }

        POLL_INTERVAL
    }

    fn emit(&self, snapshot: &PlaybackSnapshot) {
        if self.state.progress_engaged() {
            debug!("Progress scrub engaged, suppressing slider update");
        } else {
            let progress = round_to_decimal(snapshot.progress_fraction(), 2);
            if let Err(e) = self
                .sink
                .send(outbound::SLIDER, vec![OscType::Float(progress as f32)])
            {
                warn!("Failed to send slider update: {}", e);
            }
        }

        if let Err(e) = self
            .sink
            .send(outbound::IS_PLAYING, vec![OscType::Bool(snapshot.is_playing)])
        {
            warn!("Failed to send playing state: {}", e);
        }

        if let Err(e) = self
            .now_playing
            .update(&snapshot.track_name, &snapshot.artist_name)
        {
            warn!("Failed to update now playing file: {}", e);
        }
    }

    /// Poll until the running flag clears
    pub fn run(&self, running: &AtomicBool) {
        while running.load(Ordering::SeqCst) {
            let delay = self.tick();
            sleep_interruptible(delay, running);
        }
        debug!("State mirror loop exited");
    }
}

/// Project the API response onto a snapshot; None while nothing is playing
fn snapshot_of(playing: &SpotifyCurrentlyPlaying) -> Option<PlaybackSnapshot> {
    let track = playing.item.as_ref()?;
    let artist_name = track
        .artists
        .first()
        .map(|artist| artist.name.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    Some(PlaybackSnapshot {
        track_name: track.name.clone(),
        artist_name,
        progress_ms: playing.progress_ms.unwrap_or(0),
        duration_ms: track.duration_ms,
        is_playing: playing.is_playing,
    })
}

/// Sleep in small slices so shutdown is not delayed by a full interval
fn sleep_interruptible(delay: Duration, running: &AtomicBool) {
    let mut remaining = delay;
    while remaining > Duration::ZERO {
        if !running.load(Ordering::SeqCst) {
            return;
        }
        let slice = std::cmp::min(SHUTDOWN_CHECK_INTERVAL, remaining);
        thread::sleep(slice);
        remaining = remaining.saturating_sub(slice);
    }
}
