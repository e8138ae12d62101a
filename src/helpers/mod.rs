pub mod now_playing;
pub mod rounding;

pub use now_playing::{NowPlayingFile, NowPlayingSink};
pub use rounding::round_to_decimal;
