use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as Gl, WebGlBuffer,
    WebGlFramebuffer, WebGlProgram, WebGlRenderbuffer, WebGlShader, WebGlTexture,
    WebGlUniformLocation, WebGlVertexArrayObject,
};
use crate::error::{GardenError, Result};

/// Wrapper around WebGL2 context with helper methods
#[derive(Clone)]
pub struct WebGLContext {
    pub gl: Gl,
}

impl WebGLContext {
    pub fn new(gl: Gl) -> Self {
        Self { gl }
    }

    /// WebGL2 context of a canvas element
    pub fn context_for(canvas: &HtmlCanvasElement) -> Result<Gl> {
        canvas
            .get_context("webgl2")
            .map_err(GardenError::dom)?
            .ok_or_else(|| GardenError::WebGl("WebGL2 is not available".to_string()))?
            .dyn_into::<Gl>()
            .map_err(|_| GardenError::WebGl("context is not WebGL2".to_string()))
    }

    pub fn compile_shader(&self, shader_type: u32, source: &str) -> Result<WebGlShader> {
        let gl = &self.gl;

        let shader = gl
            .create_shader(shader_type)
            .ok_or(GardenError::Resource("shader"))?;

        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);

        if gl
            .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            Err(GardenError::Shader(format!("compilation failed: {}", log)))
        }
    }

    pub fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<WebGlProgram> {
        let gl = &self.gl;

        let vert_shader = self.compile_shader(Gl::VERTEX_SHADER, vert_src)?;
        let frag_shader = self.compile_shader(Gl::FRAGMENT_SHADER, frag_src)?;

        let program = gl
            .create_program()
            .ok_or(GardenError::Resource("program"))?;

        gl.attach_shader(&program, &vert_shader);
        gl.attach_shader(&program, &frag_shader);
        gl.link_program(&program);

        // Linked into the program now
        gl.delete_shader(Some(&vert_shader));
        gl.delete_shader(Some(&frag_shader));

        if gl
            .get_program_parameter(&program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(program)
        } else {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            Err(GardenError::Shader(format!("linking failed: {}", log)))
        }
    }

    /// Create an array buffer and upload data
    pub fn create_buffer_f32(&self, data: &[f32], usage: u32) -> Result<WebGlBuffer> {
        let gl = &self.gl;

        let buffer = gl
            .create_buffer()
            .ok_or(GardenError::Resource("vertex buffer"))?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));

        // Safety: the view is consumed by buffer_data before any allocation
        unsafe {
            let array = js_sys::Float32Array::view(data);
            gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &array, usage);
        }

        gl.bind_buffer(Gl::ARRAY_BUFFER, None);
        Ok(buffer)
    }

    /// Overwrite the start of an existing array buffer
    pub fn update_buffer_f32(&self, buffer: &WebGlBuffer, data: &[f32]) {
        let gl = &self.gl;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
        unsafe {
            let array = js_sys::Float32Array::view(data);
            gl.buffer_sub_data_with_i32_and_array_buffer_view(Gl::ARRAY_BUFFER, 0, &array);
        }
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);
    }

    /// Create an index buffer; leaves it bound to the current VAO
    pub fn create_index_buffer(&self, data: &[u32], usage: u32) -> Result<WebGlBuffer> {
        let gl = &self.gl;

        let buffer = gl
            .create_buffer()
            .ok_or(GardenError::Resource("index buffer"))?;
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&buffer));

        unsafe {
            let array = js_sys::Uint32Array::view(data);
            gl.buffer_data_with_array_buffer_view(Gl::ELEMENT_ARRAY_BUFFER, &array, usage);
        }

        Ok(buffer)
    }

    pub fn create_vao(&self) -> Result<WebGlVertexArrayObject> {
        self.gl
            .create_vertex_array()
            .ok_or(GardenError::Resource("vertex array"))
    }

    /// Float attribute at `location`, `size` components, offsets in floats
    pub fn vertex_attrib(&self, location: u32, size: i32, stride_floats: i32, offset_floats: i32) {
        self.gl.enable_vertex_attrib_array(location);
        self.gl.vertex_attrib_pointer_with_i32(
            location,
            size,
            Gl::FLOAT,
            false,
            stride_floats * 4,
            offset_floats * 4,
        );
    }

    /// Empty render-target texture
    pub fn create_texture(&self, width: i32, height: i32) -> Result<WebGlTexture> {
        let gl = &self.gl;

        let texture = gl
            .create_texture()
            .ok_or(GardenError::Resource("texture"))?;
        gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));

        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            Gl::TEXTURE_2D,
            0,
            Gl::RGBA as i32,
            width,
            height,
            0,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            None,
        )
        .map_err(GardenError::dom)?;

        self.set_sampling(Gl::LINEAR, Gl::CLAMP_TO_EDGE);
        gl.bind_texture(Gl::TEXTURE_2D, None);
        Ok(texture)
    }

    /// 1x1 repeating texture of a single color, used until an image arrives
    pub fn create_solid_texture(&self, rgba: [u8; 4]) -> Result<WebGlTexture> {
        let gl = &self.gl;

        let texture = gl
            .create_texture()
            .ok_or(GardenError::Resource("texture"))?;
        gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));

        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            Gl::TEXTURE_2D,
            0,
            Gl::RGBA as i32,
            1,
            1,
            0,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            Some(&rgba[..]),
        )
        .map_err(GardenError::dom)?;

        self.set_sampling(Gl::LINEAR, Gl::REPEAT);
        gl.bind_texture(Gl::TEXTURE_2D, None);
        Ok(texture)
    }

    /// Replace a texture's contents with a decoded image, repeating with mipmaps
    pub fn upload_image(&self, texture: &WebGlTexture, image: &HtmlImageElement) -> Result<()> {
        let gl = &self.gl;
        gl.bind_texture(Gl::TEXTURE_2D, Some(texture));

        gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
            Gl::TEXTURE_2D,
            0,
            Gl::RGBA as i32,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            image,
        )
        .map_err(GardenError::dom)?;

        gl.generate_mipmap(Gl::TEXTURE_2D);
        self.set_sampling(Gl::LINEAR_MIPMAP_LINEAR, Gl::REPEAT);

        gl.bind_texture(Gl::TEXTURE_2D, None);
        Ok(())
    }

    /// Filtering and wrap for the currently bound 2D texture
    fn set_sampling(&self, min_filter: u32, wrap: u32) {
        let gl = &self.gl;
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MIN_FILTER, min_filter as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MAG_FILTER, Gl::LINEAR as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, wrap as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_T, wrap as i32);
    }

    pub fn create_depth_buffer(&self, width: i32, height: i32) -> Result<WebGlRenderbuffer> {
        let gl = &self.gl;
        let depth = gl
            .create_renderbuffer()
            .ok_or(GardenError::Resource("depth buffer"))?;
        gl.bind_renderbuffer(Gl::RENDERBUFFER, Some(&depth));
        gl.renderbuffer_storage(Gl::RENDERBUFFER, Gl::DEPTH_COMPONENT24, width, height);
        gl.bind_renderbuffer(Gl::RENDERBUFFER, None);
        Ok(depth)
    }

    /// Framebuffer with a color texture attachment and an optional depth buffer
    pub fn create_framebuffer(
        &self,
        texture: &WebGlTexture,
        depth: Option<&WebGlRenderbuffer>,
    ) -> Result<WebGlFramebuffer> {
        let gl = &self.gl;

        let fbo = gl
            .create_framebuffer()
            .ok_or(GardenError::Resource("framebuffer"))?;
        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&fbo));

        gl.framebuffer_texture_2d(
            Gl::FRAMEBUFFER,
            Gl::COLOR_ATTACHMENT0,
            Gl::TEXTURE_2D,
            Some(texture),
            0,
        );
        if let Some(depth) = depth {
            gl.framebuffer_renderbuffer(
                Gl::FRAMEBUFFER,
                Gl::DEPTH_ATTACHMENT,
                Gl::RENDERBUFFER,
                Some(depth),
            );
        }

        let status = gl.check_framebuffer_status(Gl::FRAMEBUFFER);
        gl.bind_framebuffer(Gl::FRAMEBUFFER, None);
        if status != Gl::FRAMEBUFFER_COMPLETE {
            return Err(GardenError::WebGl(format!("framebuffer incomplete: {}", status)));
        }

        Ok(fbo)
    }

    pub fn get_uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    pub fn uniform_1f(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    pub fn uniform_2f(&self, location: Option<&WebGlUniformLocation>, x: f32, y: f32) {
        self.gl.uniform2f(location, x, y);
    }

    pub fn uniform_vec3(&self, location: Option<&WebGlUniformLocation>, v: [f32; 3]) {
        self.gl.uniform3f(location, v[0], v[1], v[2]);
    }

    pub fn uniform_matrix4fv(&self, location: Option<&WebGlUniformLocation>, data: &[f32; 16]) {
        self.gl.uniform_matrix4fv_with_f32_array(location, false, data);
    }

    pub fn uniform_1i(&self, location: Option<&WebGlUniformLocation>, value: i32) {
        self.gl.uniform1i(location, value);
    }

    pub fn uniform_bool(&self, location: Option<&WebGlUniformLocation>, value: bool) {
        self.gl.uniform1i(location, value as i32);
    }

    pub fn clear(&self, color: [f32; 4]) {
        self.gl.clear_color(color[0], color[1], color[2], color[3]);
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    pub fn enable_depth_test(&self) {
        self.gl.enable(Gl::DEPTH_TEST);
    }

    pub fn enable_blending(&self) {
        self.gl.enable(Gl::BLEND);
        self.gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }
}
