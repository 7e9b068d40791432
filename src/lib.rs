use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;
use tracing::{debug, info};

pub mod animation;
pub mod camera;
pub mod config;
pub mod error;
pub mod garden;
pub mod interaction;
pub mod math;
pub mod mesh;
pub mod music;
pub mod particles;
pub mod render;
pub mod scene;

pub use music::SongPlayer;

use animation::Sway;
use camera::OrbitCamera;
use config::{GardenConfig, SiteConfig};
use garden::Garden;
use interaction::{ClickAction, GardenPicker, Ray, resolve_click};
use mesh::sunflower;
use particles::WaterDroplets;
use render::{ImageTexture, PipelineSettings, RenderPipeline, WebGLContext, SOIL_FALLBACK};
use scene::{GardenMeshes, SunflowerMeshes};

/// Droplets in the watering column
const DROPLET_COUNT: usize = 100;

/// Install the panic hook and the browser log subscriber
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    cfg_if::cfg_if! {
        if #[cfg(debug_assertions)] {
            const MAX_TRACING_LEVEL: tracing::Level = tracing::Level::DEBUG;
        } else {
            const MAX_TRACING_LEVEL: tracing::Level = tracing::Level::INFO;
        }
    }

    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(MAX_TRACING_LEVEL)
            .build(),
    );
    #[cfg(not(target_arch = "wasm32"))]
    let _ = MAX_TRACING_LEVEL;
}

/// Garden page engine exposed to JavaScript
#[wasm_bindgen]
pub struct VirtualGarden {
    pipeline: RenderPipeline,
    camera: OrbitCamera,
    garden: Garden,
    picker: GardenPicker,
    sway: Sway,
    droplets: WaterDroplets,
    meshes: GardenMeshes,
    ground_texture: Option<ImageTexture>,
    time: f32,
    width: i32,
    height: i32,
    hovered: Option<usize>,
}

impl VirtualGarden {
    fn build(canvas: HtmlCanvasElement, config: GardenConfig) -> error::Result<Self> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;
        let gl = WebGLContext::context_for(&canvas)?;

        let mut pipeline = RenderPipeline::new(gl, width, height, PipelineSettings::garden())?;
        let meshes = GardenMeshes {
            ground: pipeline.upload_mesh(&scene::ground_mesh())?,
            flower: SunflowerMeshes {
                stem: pipeline.upload_mesh(&sunflower::garden_stem())?,
                petal: pipeline.upload_mesh(&sunflower::petal())?,
                center: pipeline.upload_mesh(&sunflower::center())?,
                leaf: pipeline.upload_mesh(&sunflower::leaf())?,
            },
        };

        let ground_texture =
            ImageTexture::load(pipeline.context(), &config.ground_texture, SOIL_FALLBACK)?;
        pipeline.set_texture(ground_texture.texture().clone());

        info!(cap = config.max_flowers, "virtual garden ready");

        Ok(Self {
            pipeline,
            camera: OrbitCamera::garden(),
            garden: Garden::new(config),
            picker: GardenPicker::default(),
            sway: Sway::default(),
            droplets: WaterDroplets::new(DROPLET_COUNT),
            meshes,
            ground_texture: Some(ground_texture),
            time: 0.0,
            width,
            height,
            hovered: None,
        })
    }

    fn ray_at(&self, x: f32, y: f32) -> Option<Ray> {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        Ray::from_screen(
            x,
            y,
            self.width as f32,
            self.height as f32,
            &self.camera.view_matrix(),
            &self.camera.projection_matrix(aspect),
        )
    }

    fn is_disposed(&self) -> bool {
        self.ground_texture.is_none()
    }
}

#[wasm_bindgen]
impl VirtualGarden {
    /// Create a garden with the stock rules
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<VirtualGarden, JsValue> {
        Ok(Self::build(canvas, GardenConfig::default())?)
    }

    /// Create a garden from a YAML site configuration
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<VirtualGarden, JsValue> {
        let config = SiteConfig::from_yaml(yaml)?;
        Ok(Self::build(canvas, config.garden)?)
    }

    /// Update and render a frame
    pub fn render(&mut self, dt: f32) {
        if self.is_disposed() {
            return;
        }
        self.time += dt;

        if let Some(event) = self.garden.advance(dt) {
            debug!(index = event.index, growth = event.growth, "growth applied");
        }

        match scene::droplet_origin(&self.garden, &self.sway, self.time) {
            Some(origin) => {
                self.droplets.update(dt);
                let data = self.droplets.particle_data(origin);
                if let Err(err) = self.pipeline.update_particles(&data) {
                    tracing::warn!(%err, "droplet upload failed");
                }
            }
            None => self.pipeline.clear_particles(),
        }

        let draws = scene::garden_draws(&self.garden, &self.meshes, &self.sway, self.time);
        self.pipeline.render(&draws, &self.camera);
    }

    /// Handle a click at canvas pixel coordinates.
    /// Returns "planted", "watering", "ignored" or "none".
    pub fn on_click(&mut self, x: f32, y: f32) -> String {
        if self.is_disposed() {
            return ClickAction::None.as_str().to_string();
        }
        let Some(ray) = self.ray_at(x, y) else {
            return ClickAction::None.as_str().to_string();
        };

        let targets = scene::pick_targets(self.garden.flowers());
        let action = resolve_click(&mut self.garden, &self.picker, &targets, &ray);
        if let ClickAction::Watering(_) = action {
            // Fresh column for every watering
            self.droplets.reset();
        }
        action.as_str().to_string()
    }

    /// Index of the flower under the pointer, for cursor feedback
    pub fn on_mouse_move(&mut self, x: f32, y: f32) -> Option<usize> {
        let ray = self.ray_at(x, y)?;
        let targets = scene::pick_targets(self.garden.flowers());
        self.hovered = self.picker.hover(&ray, &targets);
        self.hovered
    }

    pub fn hovered_flower(&self) -> Option<usize> {
        self.hovered
    }

    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.orbit(delta_x, delta_y);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), JsValue> {
        self.pipeline.resize(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn flower_count(&self) -> usize {
        self.garden.len()
    }

    pub fn max_flowers(&self) -> usize {
        self.garden.max_flowers()
    }

    pub fn flower_growth(&self, index: usize) -> Option<f32> {
        self.garden.get(index).map(|f| f.growth)
    }

    pub fn watering_index(&self) -> Option<usize> {
        self.garden.watering_index()
    }

    pub fn planting_hint(&self) -> String {
        self.garden.planting_hint()
    }

    pub fn watering_hint(&self) -> String {
        self.garden.watering_hint().to_string()
    }

    /// Whether the soil image has replaced the fallback color
    pub fn ground_loaded(&self) -> bool {
        self.ground_texture.as_ref().is_some_and(ImageTexture::is_loaded)
    }

    /// Cancel the pending watering and free GPU resources
    pub fn dispose(&mut self) {
        if self.ground_texture.take().is_some() {
            self.garden.cancel_watering();
            self.pipeline.dispose();
            info!("virtual garden disposed");
        }
    }
}

impl Drop for VirtualGarden {
    fn drop(&mut self) {
        self.dispose();
    }
}
