use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use oscbridge::bridge::{BridgeState, ControlHandlers, StateMirror};
use oscbridge::config::{self, OscConfig};
use oscbridge::helpers::now_playing::NowPlayingFile;
use oscbridge::osc::{OscDispatcher, OscServer, UdpOscClient};
use oscbridge::spotify::{PlaybackApi, SpotifyClient, SpotifyError, StaticTokenProvider};

/// Bridge between VR avatar parameters and Spotify playback
#[derive(Parser)]
#[command(name = "oscbridge", version, about = "OSC bridge for Spotify playback control")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "oscbridge.json")]
    config: PathBuf,

    /// Listen address for inbound avatar parameters (overrides the config)
    #[arg(long)]
    receive: Option<String>,

    /// Target address for outbound parameter updates (overrides the config)
    #[arg(long)]
    send: Option<String>,
}

fn main() {
    // Initialize the logger with default configuration
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let args = Args::parse();
    info!("OSC audio bridge starting");

    let config = match config::load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "Could not load {} ({}), continuing with defaults",
                args.config.display(),
                e
            );
            serde_json::json!({})
        }
    };

    let mut osc_config = OscConfig::from_json(&config);
    if let Some(addr) = args.receive {
        osc_config.receive_addr = addr;
    }
    if let Some(addr) = args.send {
        osc_config.send_addr = addr;
    }

    let tokens = config::get_service_config(&config, "spotify")
        .ok_or_else(|| SpotifyError::AuthError("no spotify configuration found".to_string()))
        .and_then(StaticTokenProvider::from_config);
    let tokens = match tokens {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("Spotify configuration error: {}", e);
            process::exit(1);
        }
    };

    let api = Arc::new(SpotifyClient::new(tokens));
    match api.current_user() {
        Ok(user) => info!(
            "Logged in as {}",
            user.display_name.as_deref().unwrap_or(&user.id)
        ),
        Err(e) => warn!("Could not fetch the Spotify user profile: {}", e),
    }

    let sink = match UdpOscClient::new(osc_config.send_addr.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create OSC client for {}: {}", osc_config.send_addr, e);
            process::exit(1);
        }
    };

    let state = Arc::new(BridgeState::new());
    let now_playing = Arc::new(NowPlayingFile::new(&osc_config.now_playing_path));

    // Shared flag for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Error setting Ctrl+C handler: {}", e);
    }

    // Background thread mirroring remote playback state
    let mirror = StateMirror::new(api.clone(), sink.clone(), state.clone(), now_playing);
    let mirror_running = running.clone();
    let mirror_thread = thread::spawn(move || mirror.run(&mirror_running));

    // Dispatcher wiring and the OSC server on the main thread
    let mut dispatcher = OscDispatcher::new();
    Arc::new(ControlHandlers::new(api, sink, state)).register(&mut dispatcher);

    let server = match OscServer::bind(&osc_config.receive_addr) {
        Ok(server) => server,
        Err(e) => {
            error!(
                "Failed to bind OSC server on {}: {}",
                osc_config.receive_addr, e
            );
            running.store(false, Ordering::SeqCst);
            let _ = mirror_thread.join();
            process::exit(1);
        }
    };

    info!(
        "Listening for avatar parameters on {}, sending updates to {}",
        osc_config.receive_addr, osc_config.send_addr
    );
    server.serve(&dispatcher, &running);

    running.store(false, Ordering::SeqCst);
    if mirror_thread.join().is_err() {
        warn!("State mirror thread panicked");
    }
    info!("Exiting");
}
