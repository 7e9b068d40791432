use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;
use tracing::info;
use crate::camera::OrbitCamera;
use crate::config::{SiteConfig, SongConfig};
use crate::error::Result;
use crate::mesh::sunflower;
use crate::render::{PipelineSettings, RenderPipeline, WebGLContext};
use crate::scene::{Bouquet, BouquetMeshes};
use super::audio::AudioTrack;
use super::player::{Playback, PlaybackAction};

/// Song page engine: three blooming bouquets and a looping track
#[wasm_bindgen]
pub struct SongPlayer {
    pipeline: RenderPipeline,
    camera: OrbitCamera,
    bouquet: Bouquet,
    meshes: BouquetMeshes,
    audio: Option<AudioTrack>,
    playback: Playback,
    config: SongConfig,
    time: f32,
}

impl SongPlayer {
    fn build(canvas: HtmlCanvasElement, config: SongConfig) -> Result<Self> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;
        let gl = WebGLContext::context_for(&canvas)?;

        let mut pipeline = RenderPipeline::new(gl, width, height, PipelineSettings::song())?;
        let meshes = BouquetMeshes {
            wrap: pipeline.upload_mesh(&sunflower::wrap())?,
            stem: pipeline.upload_mesh(&sunflower::bouquet_stem())?,
            petal: pipeline.upload_mesh(&sunflower::petal())?,
            center: pipeline.upload_mesh(&sunflower::center())?,
        };
        let audio = AudioTrack::new(&config)?;

        info!(src = %audio.src(), "song player ready");

        Ok(Self {
            pipeline,
            camera: OrbitCamera::song(),
            bouquet: Bouquet::default(),
            meshes,
            audio: Some(audio),
            playback: Playback::default(),
            config,
            time: 0.0,
        })
    }

    /// Artist half of "Artist - Song"
    fn artist(&self) -> &str {
        self.config
            .title
            .split(" - ")
            .next()
            .unwrap_or(&self.config.title)
    }
}

#[wasm_bindgen]
impl SongPlayer {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<SongPlayer, JsValue> {
        Ok(Self::build(canvas, SiteConfig::default().song)?)
    }

    /// Build from a YAML site configuration; only the `song` section is used
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<SongPlayer, JsValue> {
        let config = SiteConfig::from_yaml(yaml)?;
        Ok(Self::build(canvas, config.song)?)
    }

    /// Play or pause; the quote shows while the music plays.
    /// Returns whether the track is now playing.
    pub fn toggle_play(&mut self) -> bool {
        let action = self.playback.toggle();
        if let Some(audio) = &self.audio {
            match action {
                PlaybackAction::Play => audio.play(),
                PlaybackAction::Pause => audio.pause(),
            }
        }
        info!(playing = self.playback.is_playing(), "toggle play");
        self.playback.is_playing()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn is_open(&self) -> bool {
        self.playback.is_open()
    }

    /// Quote to show above the bouquets, only after the play toggle
    pub fn quote(&self) -> Option<String> {
        self.playback.quote(&self.config.quote).map(str::to_string)
    }

    pub fn title(&self) -> String {
        self.config.title.clone()
    }

    pub fn button_label(&self) -> String {
        self.playback.button_label(self.artist())
    }

    pub fn render(&mut self, dt: f32) {
        if self.audio.is_none() {
            return;
        }
        self.time += dt;
        let draws = self.bouquet.draws(self.time, &self.meshes);
        self.pipeline.render(&draws, &self.camera);
    }

    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.orbit(delta_x, delta_y);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.pan(delta_x, delta_y);
    }

    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), JsValue> {
        Ok(self.pipeline.resize(width, height)?)
    }

    /// Stop the music and release GPU resources; rendering becomes a no-op
    pub fn dispose(&mut self) {
        if self.audio.take().is_some() {
            self.pipeline.dispose();
            info!("song player disposed");
        }
    }
}

impl Drop for SongPlayer {
    fn drop(&mut self) {
        self.dispose();
    }
}
