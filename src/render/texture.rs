use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlImageElement, WebGlTexture};
use tracing::{info, warn};
use crate::error::{GardenError, Result};
use super::webgl::WebGLContext;

/// Brown shown until the soil image decodes, and kept if it never does
pub const SOIL_FALLBACK: [u8; 4] = [0x6b, 0x4f, 0x2f, 0xff];

/// Texture filled asynchronously from an image URL
///
/// The GPU texture is usable immediately as a 1x1 solid color; the image
/// replaces it once the browser has decoded it. A failed load is logged and
/// the fallback color stays.
pub struct ImageTexture {
    texture: WebGlTexture,
    image: HtmlImageElement,
    loaded: Rc<Cell<bool>>,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

impl ImageTexture {
    pub fn load(ctx: &WebGLContext, src: &str, fallback: [u8; 4]) -> Result<Self> {
        let texture = ctx.create_solid_texture(fallback)?;
        let image = HtmlImageElement::new().map_err(GardenError::dom)?;
        let loaded = Rc::new(Cell::new(false));

        let on_load = {
            let ctx = ctx.clone();
            let texture = texture.clone();
            let image = image.clone();
            let loaded = loaded.clone();
            let src = src.to_string();
            Closure::wrap(Box::new(move || match ctx.upload_image(&texture, &image) {
                Ok(()) => {
                    loaded.set(true);
                    info!(%src, "texture loaded");
                }
                Err(err) => warn!(%src, %err, "texture upload failed"),
            }) as Box<dyn FnMut()>)
        };

        let on_error = {
            let src = src.to_string();
            Closure::wrap(Box::new(move || {
                warn!(%src, "texture failed to load, keeping fallback color");
            }) as Box<dyn FnMut()>)
        };

        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        image.set_src(src);

        Ok(Self {
            texture,
            image,
            loaded,
            _on_load: on_load,
            _on_error: on_error,
        })
    }

    pub fn texture(&self) -> &WebGlTexture {
        &self.texture
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }
}

impl Drop for ImageTexture {
    fn drop(&mut self) {
        // The closures die with us; the image must not call them afterwards
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}
