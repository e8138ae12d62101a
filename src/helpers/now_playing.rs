use std::fs;
use std::io;
use std::path::PathBuf;

/// Sink for the human-readable "now playing" line
///
/// The mirror loop pushes the current track through this on every tick so
/// external overlays can display it. Implementations must tolerate being
/// called with the same track repeatedly.
pub trait NowPlayingSink: Send + Sync {
    fn update(&self, track: &str, artist: &str) -> io::Result<()>;
}

/// Writes "Track - Artist" to a text file, replacing the previous contents
pub struct NowPlayingFile {
    path: PathBuf,
}

impl NowPlayingFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl NowPlayingSink for NowPlayingFile {
    fn update(&self, track: &str, artist: &str) -> io::Result<()> {
        fs::write(&self.path, format!("{} - {}\n", track, artist))
    }
}
