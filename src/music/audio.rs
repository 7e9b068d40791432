use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, HtmlAudioElement};
use tracing::{debug, error, info, warn};
use crate::config::SongConfig;
use crate::error::{GardenError, Result};

/// Looping audio element with its load listeners
///
/// Dropping the track pauses it and detaches the listeners, so nothing keeps
/// playing after the song scene goes away.
pub struct AudioTrack {
    element: HtmlAudioElement,
    src: String,
    on_ready: Closure<dyn FnMut()>,
    on_error: Closure<dyn FnMut(Event)>,
    on_play_rejected: Closure<dyn FnMut(JsValue)>,
}

impl AudioTrack {
    pub fn new(config: &SongConfig) -> Result<Self> {
        let element =
            HtmlAudioElement::new_with_src(&config.audio_src).map_err(GardenError::dom)?;
        element.set_loop(config.looping);

        let src = config.audio_src.clone();

        let on_ready = {
            let src = src.clone();
            Closure::wrap(Box::new(move || {
                info!(%src, "audio loaded and ready to play");
            }) as Box<dyn FnMut()>)
        };
        let on_error = {
            let src = src.clone();
            Closure::wrap(Box::new(move |event: Event| {
                error!(%src, event = ?event.type_(), "failed to load audio file");
            }) as Box<dyn FnMut(Event)>)
        };
        // Autoplay policies reject play() without a user gesture
        let on_play_rejected = Closure::wrap(Box::new(move |err: JsValue| {
            warn!(?err, "audio playback was rejected");
        }) as Box<dyn FnMut(JsValue)>);

        element
            .add_event_listener_with_callback("canplaythrough", on_ready.as_ref().unchecked_ref())
            .map_err(GardenError::dom)?;
        element
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .map_err(GardenError::dom)?;

        Ok(Self {
            element,
            src,
            on_ready,
            on_error,
            on_play_rejected,
        })
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn play(&self) {
        match self.element.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_play_rejected);
                debug!(src = %self.src, "audio play");
            }
            Err(err) => warn!(?err, "audio play failed"),
        }
    }

    pub fn pause(&self) {
        if let Err(err) = self.element.pause() {
            warn!(?err, "audio pause failed");
        }
    }
}

impl Drop for AudioTrack {
    fn drop(&mut self) {
        self.pause();
        let _ = self.element.remove_event_listener_with_callback(
            "canplaythrough",
            self.on_ready.as_ref().unchecked_ref(),
        );
        let _ = self
            .element
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
        debug!(src = %self.src, "audio released");
    }
}
