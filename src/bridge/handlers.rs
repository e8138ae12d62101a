use std::sync::Arc;

use log::{debug, info, warn};
use rosc::{OscMessage, OscType};

use crate::data::RepeatMode;
use crate::helpers::rounding::round_to_decimal;
use crate::osc::args;
use crate::osc::{MessageSink, OscDispatcher};
use crate::spotify::{PlaybackApi, Result as SpotifyResult, SpotifyError};

use super::gesture::GestureTransition;
use super::{inbound, outbound, BridgeState};

/// Translates inbound avatar parameter messages into playback calls
///
/// Every handler is terminal: failures are logged and the handler returns.
/// Nothing here may panic or block other handlers beyond its own in-line
/// remote call.
pub struct ControlHandlers {
    api: Arc<dyn PlaybackApi>,
    sink: Arc<dyn MessageSink>,
    state: Arc<BridgeState>,
}

impl ControlHandlers {
    pub fn new(
        api: Arc<dyn PlaybackApi>,
        sink: Arc<dyn MessageSink>,
        state: Arc<BridgeState>,
    ) -> Self {
        Self { api, sink, state }
    }

    /// Bind every handled address on the dispatcher
    pub fn register(self: Arc<Self>, dispatcher: &mut OscDispatcher) {
        let handlers = self.clone();
        dispatcher.add_handler(inbound::PLAY_PAUSE, move |msg| handlers.handle_play_pause(msg));
        let handlers = self.clone();
        dispatcher.add_handler(inbound::NEXT, move |msg| handlers.handle_next(msg));
        let handlers = self.clone();
        dispatcher.add_handler(inbound::PREVIOUS, move |msg| handlers.handle_previous(msg));
        let handlers = self.clone();
        dispatcher.add_handler(inbound::SHUFFLE, move |msg| handlers.handle_shuffle(msg));
        let handlers = self.clone();
        dispatcher.add_handler(inbound::REPEAT, move |msg| handlers.handle_repeat(msg));
        let handlers = self.clone();
        dispatcher.add_handler(inbound::IN_SLIDER, move |msg| handlers.handle_slider_state(msg));
        let handlers = self.clone();
        dispatcher.add_handler(inbound::PROX_VALUE, move |msg| handlers.handle_prox_value(msg));
        let handlers = self.clone();
        dispatcher.add_handler(inbound::IN_VOLUME_SLIDER, move |msg| {
            handlers.handle_volume_state(msg)
        });
        let handlers = self.clone();
        dispatcher.add_handler(inbound::VOLUME_PROX, move |msg| {
            handlers.handle_volume_prox(msg)
        });
        let handlers = self;
        dispatcher.add_handler(inbound::RAMP, move |msg| handlers.handle_ramp(msg));
    }

    /// Decode the trigger flag; command actions fire on button-down only
    fn was_selected(&self, msg: &OscMessage) -> bool {
        match args::parse_bool(msg) {
            Ok(selected) => selected,
            Err(e) => {
                warn!("Ignoring {}: {}", msg.addr, e);
                false
            }
        }
    }

    /// Toggle between play and pause based on the current remote state.
    ///
    /// The avatar button is a trigger, not a toggle; which way to flip is
    /// resolved locally by querying the player state.
    pub fn handle_play_pause(&self, msg: &OscMessage) {
        if !self.was_selected(msg) {
            return;
        }

        let playing = match self.api.player_state() {
            Ok(state) => state.map(|s| s.is_playing).unwrap_or(false),
            Err(e) => {
                warn!("Failed to get current player state: {}", e);
                return;
            }
        };

        if playing {
            match self.api.pause() {
                Ok(()) => info!("Playback paused"),
                Err(e) => warn!("Failed to pause playback: {}", e),
            }
        } else {
            match self.api.play() {
                Ok(()) => info!("Playback resumed"),
                Err(e) => warn!("Failed to resume playback: {}", e),
            }
        }
    }

    pub fn handle_next(&self, msg: &OscMessage) {
        if !self.was_selected(msg) {
            return;
        }
        if let Err(e) = self.api.next_track() {
            warn!("Failed to skip to the next track: {}", e);
        }
    }

    pub fn handle_previous(&self, msg: &OscMessage) {
        if !self.was_selected(msg) {
            return;
        }
        if let Err(e) = self.api.previous_track() {
            warn!("Failed to skip to the previous track: {}", e);
        }
    }

    pub fn handle_shuffle(&self, msg: &OscMessage) {
        let value = match args::parse_int(msg) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring {}: {}", msg.addr, e);
                return;
            }
        };

        let enabled = value == 1;
        match self.api.set_shuffle(enabled) {
            Ok(()) => info!("Shuffle state set to {}", enabled),
            Err(e) => warn!("Failed to set shuffle state: {}", e),
        }
    }

    pub fn handle_repeat(&self, msg: &OscMessage) {
        let value = match args::parse_int(msg) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring {}: {}", msg.addr, e);
                return;
            }
        };

        let mode = match RepeatMode::from_parameter(value) {
            Some(mode) => mode,
            None => {
                warn!("Invalid repeat state: {}", value);
                return;
            }
        };

        match self.api.set_repeat(mode) {
            Ok(()) => info!("Repeat state set to {}", mode),
            Err(e) => warn!("Failed to set repeat state: {}", e),
        }
    }

    /// Enter/exit signal for the progress scrub gesture
    pub fn handle_slider_state(&self, msg: &OscMessage) {
        let engaged = match args::parse_bool(msg) {
            Ok(engaged) => engaged,
            Err(e) => {
                warn!("Ignoring {}: {}", msg.addr, e);
                return;
            }
        };

        let transition = match self.state.with_progress(|session| session.set_engaged(engaged)) {
            Some(transition) => transition,
            None => return,
        };

        if let GestureTransition::Committed(live_value) = transition {
            self.commit_progress(live_value);
        }
    }

    /// Live value for the progress scrub gesture
    pub fn handle_prox_value(&self, msg: &OscMessage) {
        let value = match args::parse_float(msg) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring {}: {}", msg.addr, e);
                return;
            }
        };
        self.state.with_progress(|session| session.update_live(value));
    }

    /// Enter/exit signal for the volume scrub gesture
    pub fn handle_volume_state(&self, msg: &OscMessage) {
        let engaged = match args::parse_bool(msg) {
            Ok(engaged) => engaged,
            Err(e) => {
                warn!("Ignoring {}: {}", msg.addr, e);
                return;
            }
        };

        let transition = match self.state.with_volume(|session| session.set_engaged(engaged)) {
            Some(transition) => transition,
            None => return,
        };

        if let GestureTransition::Committed(live_value) = transition {
            self.commit_volume(live_value);
        }
    }

    /// Live value for the volume scrub gesture
    pub fn handle_volume_prox(&self, msg: &OscMessage) {
        let value = match args::parse_float(msg) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring {}: {}", msg.addr, e);
                return;
            }
        };
        self.state.with_volume(|session| session.update_live(value));
    }

    /// Pass-through relay, independent of all other state
    pub fn handle_ramp(&self, msg: &OscMessage) {
        let value = match msg.args.first() {
            Some(OscType::Float(value)) => *value,
            _ => {
                warn!("First argument in ramp message is not a float");
                return;
            }
        };

        if let Err(e) = self.sink.send(outbound::CHAN1, vec![OscType::Float(value)]) {
            warn!("Failed to relay ramp value: {}", e);
        }
    }

    /// Seek to the scrubbed position and confirm it on the slider parameter.
    ///
    /// The live value measures proximity from the end of the bar, so the
    /// elapsed fraction is its complement. Out-of-range values pass through
    /// unclamped; the remote side rejects impossible positions.
    fn commit_progress(&self, live_value: f64) {
        let duration_ms = match self.current_track_duration() {
            Ok(duration_ms) => duration_ms,
            Err(e) => {
                warn!("Error retrieving current track duration: {}", e);
                return;
            }
        };

        let percentage = 1.0 - live_value;
        let timestamp_ms = (duration_ms as f64 * percentage).round() as u64;

        let confirmed = round_to_decimal(percentage, 2);
        if let Err(e) = self
            .sink
            .send(outbound::SLIDER, vec![OscType::Float(confirmed as f32)])
        {
            warn!("Failed to send slider confirmation: {}", e);
        }

        debug!("Committing progress scrub to {} ms ({:.2})", timestamp_ms, confirmed);
        if let Err(e) = self.api.seek(timestamp_ms) {
            warn!("Error seeking to timestamp: {}", e);
        }
    }

    /// Apply the scrubbed volume; no confirmation message is sent for volume
    fn commit_volume(&self, live_value: f64) {
        let percentage = 100.0 * live_value;
        let volume = percentage.round() as u32;
        match self.api.set_volume(volume) {
            Ok(()) => info!("Playback volume set to {}%", volume),
            Err(e) => warn!("Failed to set playback volume: {}", e),
        }
    }

    /// Duration of the current track, fetched fresh at commit time
    fn current_track_duration(&self) -> SpotifyResult<u64> {
        match self.api.currently_playing()? {
            Some(playing) => match playing.item {
                Some(track) => Ok(track.duration_ms),
                None => Err(SpotifyError::NoTrackPlaying),
            },
            None => Err(SpotifyError::NoTrackPlaying),
        }
    }
}
