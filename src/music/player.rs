/// What the audio element should do after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    Play,
    Pause,
}

/// Play/pause button state; `open` gates the quote overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Playback {
    playing: bool,
    open: bool,
}

impl Playback {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip both flags and report the action matching the old state
    pub fn toggle(&mut self) -> PlaybackAction {
        let action = if self.playing {
            PlaybackAction::Pause
        } else {
            PlaybackAction::Play
        };
        self.playing = !self.playing;
        self.open = !self.open;
        action
    }

    /// Quote overlay, present only while open
    pub fn quote<'a>(&self, quote: &'a str) -> Option<&'a str> {
        self.open.then_some(quote)
    }

    /// Button label, e.g. "Play Floricienta"
    pub fn button_label(&self, artist: &str) -> String {
        let verb = if self.playing { "Pause" } else { "Play" };
        format!("{} {}", verb, artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_stopped_and_closed() {
        let playback = Playback::default();
        assert!(!playback.is_playing());
        assert!(!playback.is_open());
        assert_eq!(playback.quote("hola"), None);
    }

    #[test]
    fn test_toggle_cycle() {
        let mut playback = Playback::default();

        assert_eq!(playback.toggle(), PlaybackAction::Play);
        assert!(playback.is_playing());
        assert!(playback.is_open());
        assert_eq!(playback.quote("hola"), Some("hola"));

        assert_eq!(playback.toggle(), PlaybackAction::Pause);
        assert!(!playback.is_playing());
        assert!(!playback.is_open());
        assert_eq!(playback.quote("hola"), None);
    }

    #[test]
    fn test_button_label() {
        let mut playback = Playback::default();
        assert_eq!(playback.button_label("Floricienta"), "Play Floricienta");
        playback.toggle();
        assert_eq!(playback.button_label("Floricienta"), "Pause Floricienta");
    }
}
