//! Song page: a looping track and a bouquet that blooms alongside it.

pub mod audio;
pub mod player;
pub mod song;

pub use audio::AudioTrack;
pub use player::{Playback, PlaybackAction};
pub use song::SongPlayer;
