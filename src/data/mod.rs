// Data structures for the OSC bridge

pub mod playback;
pub mod repeat_mode;

pub use playback::PlaybackSnapshot;
pub use repeat_mode::RepeatMode;
