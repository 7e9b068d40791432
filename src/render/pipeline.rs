use web_sys::{
    WebGl2RenderingContext as Gl, WebGlBuffer, WebGlFramebuffer, WebGlProgram,
    WebGlRenderbuffer, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};
use tracing::debug;
use crate::camera::OrbitCamera;
use crate::error::{GardenError, Result};
use crate::math::Vec3;
use crate::mesh::{Mesh, VERTEX_FLOATS};
use crate::particles::PARTICLE_FLOATS;
use super::draw::{DrawCall, MeshId};
use super::webgl::WebGLContext;
use super::shaders::*;

/// Soft-knee bloom over the whole scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    pub threshold: f32,
    pub smoothing: f32,
    pub strength: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            smoothing: 0.9,
            strength: 0.4,
        }
    }
}

/// Per-scene lighting and post-processing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub clear_color: [f32; 4],
    pub ambient: f32,
    pub light_position: Vec3,
    pub light_intensity: f32,
    pub bloom: Option<BloomSettings>,
}

impl PipelineSettings {
    /// Sky-blue backdrop, no post-processing
    pub fn garden() -> Self {
        Self {
            clear_color: [0.53, 0.81, 0.92, 1.0],
            ambient: 0.5,
            light_position: Vec3::new(10.0, 10.0, 10.0),
            light_intensity: 1.0,
            bloom: None,
        }
    }

    /// Page-grey backdrop with bloom so the petals glow
    pub fn song() -> Self {
        Self {
            clear_color: [0.97, 0.97, 0.97, 1.0],
            bloom: Some(BloomSettings::default()),
            ..Self::garden()
        }
    }
}

/// Cached uniform locations for the mesh shader
struct MeshUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    lit: Option<WebGlUniformLocation>,
    use_texture: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    ambient_strength: Option<WebGlUniformLocation>,
    light_pos: Option<WebGlUniformLocation>,
    light_intensity: Option<WebGlUniformLocation>,
}

struct ParticleUniforms {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    point_scale: Option<WebGlUniformLocation>,
}

struct GpuMesh {
    vao: WebGlVertexArrayObject,
    vertex_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    index_count: i32,
}

/// Offscreen targets and programs for the bloom passes
struct BloomPass {
    settings: BloomSettings,
    extract_program: WebGlProgram,
    blur_program: WebGlProgram,
    composite_program: WebGlProgram,

    extract_texture: Option<WebGlUniformLocation>,
    threshold: Option<WebGlUniformLocation>,
    smoothing: Option<WebGlUniformLocation>,
    blur_texture: Option<WebGlUniformLocation>,
    direction: Option<WebGlUniformLocation>,
    scene: Option<WebGlUniformLocation>,
    bloom: Option<WebGlUniformLocation>,
    bloom_strength: Option<WebGlUniformLocation>,

    targets: Option<BloomTargets>,
}

struct BloomTargets {
    scene_texture: WebGlTexture,
    scene_depth: WebGlRenderbuffer,
    scene_fbo: WebGlFramebuffer,
    bloom_textures: [WebGlTexture; 2],
    bloom_fbos: [WebGlFramebuffer; 2],
}

impl BloomTargets {
    fn new(ctx: &WebGLContext, width: i32, height: i32) -> Result<Self> {
        let scene_texture = ctx.create_texture(width, height)?;
        let scene_depth = ctx.create_depth_buffer(width, height)?;
        let scene_fbo = ctx.create_framebuffer(&scene_texture, Some(&scene_depth))?;

        // Blur at half resolution
        let bloom_width = (width / 2).max(1);
        let bloom_height = (height / 2).max(1);
        let first = ctx.create_texture(bloom_width, bloom_height)?;
        let second = ctx.create_texture(bloom_width, bloom_height)?;
        let first_fbo = ctx.create_framebuffer(&first, None)?;
        let second_fbo = ctx.create_framebuffer(&second, None)?;

        Ok(Self {
            scene_texture,
            scene_depth,
            scene_fbo,
            bloom_textures: [first, second],
            bloom_fbos: [first_fbo, second_fbo],
        })
    }

    fn delete(self, gl: &Gl) {
        gl.delete_framebuffer(Some(&self.scene_fbo));
        gl.delete_renderbuffer(Some(&self.scene_depth));
        gl.delete_texture(Some(&self.scene_texture));
        for (texture, fbo) in self.bloom_textures.iter().zip(self.bloom_fbos.iter()) {
            gl.delete_framebuffer(Some(fbo));
            gl.delete_texture(Some(texture));
        }
    }
}

impl BloomPass {
    fn new(ctx: &WebGLContext, settings: BloomSettings, width: i32, height: i32) -> Result<Self> {
        let extract_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, BLOOM_EXTRACT_SHADER)?;
        let blur_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, BLUR_SHADER)?;
        let composite_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, COMPOSITE_SHADER)?;

        Ok(Self {
            settings,
            extract_texture: ctx.get_uniform_location(&extract_program, "u_texture"),
            threshold: ctx.get_uniform_location(&extract_program, "u_threshold"),
            smoothing: ctx.get_uniform_location(&extract_program, "u_smoothing"),
            blur_texture: ctx.get_uniform_location(&blur_program, "u_texture"),
            direction: ctx.get_uniform_location(&blur_program, "u_direction"),
            scene: ctx.get_uniform_location(&composite_program, "u_scene"),
            bloom: ctx.get_uniform_location(&composite_program, "u_bloom"),
            bloom_strength: ctx.get_uniform_location(&composite_program, "u_bloom_strength"),
            extract_program,
            blur_program,
            composite_program,
            targets: Some(BloomTargets::new(ctx, width, height)?),
        })
    }

    fn resize(&mut self, ctx: &WebGLContext, width: i32, height: i32) -> Result<()> {
        if let Some(old) = self.targets.take() {
            old.delete(&ctx.gl);
        }
        self.targets = Some(BloomTargets::new(ctx, width, height)?);
        Ok(())
    }

    /// Extract, blur both ways, composite onto the canvas
    fn apply(&self, ctx: &WebGLContext, width: i32, height: i32) {
        let Some(targets) = &self.targets else { return };
        let gl = &ctx.gl;

        gl.disable(Gl::DEPTH_TEST);
        gl.disable(Gl::BLEND);

        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&targets.bloom_fbos[0]));
        ctx.viewport(0, 0, (width / 2).max(1), (height / 2).max(1));
        gl.use_program(Some(&self.extract_program));
        gl.active_texture(Gl::TEXTURE0);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&targets.scene_texture));
        ctx.uniform_1i(self.extract_texture.as_ref(), 0);
        ctx.uniform_1f(self.threshold.as_ref(), self.settings.threshold);
        ctx.uniform_1f(self.smoothing.as_ref(), self.settings.smoothing);
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        gl.use_program(Some(&self.blur_program));
        ctx.uniform_1i(self.blur_texture.as_ref(), 0);

        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&targets.bloom_fbos[1]));
        gl.bind_texture(Gl::TEXTURE_2D, Some(&targets.bloom_textures[0]));
        ctx.uniform_2f(self.direction.as_ref(), 1.0, 0.0);
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&targets.bloom_fbos[0]));
        gl.bind_texture(Gl::TEXTURE_2D, Some(&targets.bloom_textures[1]));
        ctx.uniform_2f(self.direction.as_ref(), 0.0, 1.0);
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        gl.bind_framebuffer(Gl::FRAMEBUFFER, None);
        ctx.viewport(0, 0, width, height);
        gl.use_program(Some(&self.composite_program));

        gl.active_texture(Gl::TEXTURE0);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&targets.scene_texture));
        ctx.uniform_1i(self.scene.as_ref(), 0);

        gl.active_texture(Gl::TEXTURE1);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&targets.bloom_textures[0]));
        ctx.uniform_1i(self.bloom.as_ref(), 1);

        ctx.uniform_1f(self.bloom_strength.as_ref(), self.settings.strength);
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        gl.active_texture(Gl::TEXTURE0);
    }

    fn delete(mut self, gl: &Gl) {
        if let Some(targets) = self.targets.take() {
            targets.delete(gl);
        }
        gl.delete_program(Some(&self.extract_program));
        gl.delete_program(Some(&self.blur_program));
        gl.delete_program(Some(&self.composite_program));
    }
}

/// Draws instanced meshes, point-sprite particles and optional bloom
pub struct RenderPipeline {
    ctx: WebGLContext,
    settings: PipelineSettings,

    mesh_program: WebGlProgram,
    particle_program: WebGlProgram,
    mesh_uniforms: MeshUniforms,
    particle_uniforms: ParticleUniforms,

    meshes: Vec<GpuMesh>,
    texture: Option<WebGlTexture>,

    particle_vao: Option<WebGlVertexArrayObject>,
    particle_buffer: Option<WebGlBuffer>,
    /// Floats the particle buffer can hold
    particle_capacity: usize,
    particle_count: i32,

    bloom: Option<BloomPass>,

    width: i32,
    height: i32,
}

impl RenderPipeline {
    pub fn new(gl: Gl, width: i32, height: i32, settings: PipelineSettings) -> Result<Self> {
        let ctx = WebGLContext::new(gl);

        let mesh_program = ctx.create_program(MESH_VERTEX_SHADER, MESH_FRAGMENT_SHADER)?;
        let particle_program =
            ctx.create_program(PARTICLE_VERTEX_SHADER, PARTICLE_FRAGMENT_SHADER)?;

        let mesh_uniforms = MeshUniforms {
            model: ctx.get_uniform_location(&mesh_program, "u_model"),
            view: ctx.get_uniform_location(&mesh_program, "u_view"),
            projection: ctx.get_uniform_location(&mesh_program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&mesh_program, "u_camera_pos"),
            color: ctx.get_uniform_location(&mesh_program, "u_color"),
            emissive: ctx.get_uniform_location(&mesh_program, "u_emissive"),
            shininess: ctx.get_uniform_location(&mesh_program, "u_shininess"),
            lit: ctx.get_uniform_location(&mesh_program, "u_lit"),
            use_texture: ctx.get_uniform_location(&mesh_program, "u_use_texture"),
            texture: ctx.get_uniform_location(&mesh_program, "u_texture"),
            ambient_strength: ctx.get_uniform_location(&mesh_program, "u_ambient_strength"),
            light_pos: ctx.get_uniform_location(&mesh_program, "u_light_pos"),
            light_intensity: ctx.get_uniform_location(&mesh_program, "u_light_intensity"),
        };

        let particle_uniforms = ParticleUniforms {
            view: ctx.get_uniform_location(&particle_program, "u_view"),
            projection: ctx.get_uniform_location(&particle_program, "u_projection"),
            point_scale: ctx.get_uniform_location(&particle_program, "u_point_scale"),
        };

        let bloom = match settings.bloom {
            Some(bloom) => Some(BloomPass::new(&ctx, bloom, width, height)?),
            None => None,
        };

        debug!(width, height, bloom = bloom.is_some(), "render pipeline ready");

        Ok(Self {
            ctx,
            settings,
            mesh_program,
            particle_program,
            mesh_uniforms,
            particle_uniforms,
            meshes: Vec::new(),
            texture: None,
            particle_vao: None,
            particle_buffer: None,
            particle_capacity: 0,
            particle_count: 0,
            bloom,
            width,
            height,
        })
    }

    pub fn context(&self) -> &WebGLContext {
        &self.ctx
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Upload a unit mesh; draws place it with a model matrix
    pub fn upload_mesh(&mut self, mesh: &Mesh) -> Result<MeshId> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = self.ctx.create_buffer_f32(&mesh.vertex_data(), Gl::STATIC_DRAW)?;
        let index_data = mesh.index_data();
        let index_buffer = self.ctx.create_index_buffer(index_data, Gl::STATIC_DRAW)?;

        // position(3) + normal(3) + uv(2)
        let stride = VERTEX_FLOATS as i32;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertex_buffer));
        self.ctx.vertex_attrib(0, 3, stride, 0);
        self.ctx.vertex_attrib(1, 3, stride, 3);
        self.ctx.vertex_attrib(2, 2, stride, 6);

        gl.bind_vertex_array(None);
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);

        self.meshes.push(GpuMesh {
            vao,
            vertex_buffer,
            index_buffer,
            index_count: index_data.len() as i32,
        });
        Ok(MeshId(self.meshes.len() - 1))
    }

    /// Texture sampled by `Material::textured` draws
    pub fn set_texture(&mut self, texture: WebGlTexture) {
        self.texture = Some(texture);
    }

    /// Replace the particle set; the buffer grows as needed
    /// Format: position(3) + size(1) + alpha(1) + color(3) per particle
    pub fn update_particles(&mut self, data: &[f32]) -> Result<()> {
        if data.len() > self.particle_capacity || self.particle_buffer.is_none() {
            self.delete_particle_buffers();

            let gl = &self.ctx.gl;
            let vao = self.ctx.create_vao()?;
            gl.bind_vertex_array(Some(&vao));

            let buffer = self.ctx.create_buffer_f32(data, Gl::DYNAMIC_DRAW)?;
            let stride = PARTICLE_FLOATS as i32;
            gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
            self.ctx.vertex_attrib(0, 3, stride, 0);
            self.ctx.vertex_attrib(1, 1, stride, 3);
            self.ctx.vertex_attrib(2, 1, stride, 4);
            self.ctx.vertex_attrib(3, 3, stride, 5);

            gl.bind_vertex_array(None);
            gl.bind_buffer(Gl::ARRAY_BUFFER, None);

            self.particle_vao = Some(vao);
            self.particle_buffer = Some(buffer);
            self.particle_capacity = data.len();
        } else if let Some(buffer) = &self.particle_buffer {
            self.ctx.update_buffer_f32(buffer, data);
        }

        self.particle_count = (data.len() / PARTICLE_FLOATS) as i32;
        Ok(())
    }

    pub fn clear_particles(&mut self) {
        self.particle_count = 0;
    }

    /// Render one frame from the camera's point of view
    pub fn render(&self, draws: &[DrawCall], camera: &OrbitCamera) {
        let gl = &self.ctx.gl;

        let projection = camera.projection_matrix(self.aspect());
        let view = camera.view_matrix();
        let eye = camera.position();

        let scene_fbo = self
            .bloom
            .as_ref()
            .and_then(|bloom| bloom.targets.as_ref())
            .map(|targets| &targets.scene_fbo);
        gl.bind_framebuffer(Gl::FRAMEBUFFER, scene_fbo);
        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(self.settings.clear_color);
        self.ctx.enable_depth_test();
        gl.disable(Gl::BLEND);
        // Petals and the paper wrap are seen from both sides
        gl.disable(Gl::CULL_FACE);

        gl.use_program(Some(&self.mesh_program));
        let u = &self.mesh_uniforms;
        self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
        self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
        self.ctx.uniform_vec3(u.camera_pos.as_ref(), eye.to_array());
        self.ctx.uniform_1f(u.ambient_strength.as_ref(), self.settings.ambient);
        self.ctx.uniform_vec3(u.light_pos.as_ref(), self.settings.light_position.to_array());
        self.ctx.uniform_1f(u.light_intensity.as_ref(), self.settings.light_intensity);

        gl.active_texture(Gl::TEXTURE0);
        gl.bind_texture(Gl::TEXTURE_2D, self.texture.as_ref());
        self.ctx.uniform_1i(u.texture.as_ref(), 0);

        for draw in draws {
            let Some(mesh) = self.meshes.get(draw.mesh.0) else {
                continue;
            };
            let material = &draw.material;

            self.ctx.uniform_matrix4fv(u.model.as_ref(), draw.model.as_slice());
            self.ctx.uniform_vec3(u.color.as_ref(), material.color.to_array());
            self.ctx.uniform_vec3(u.emissive.as_ref(), material.emissive.to_array());
            self.ctx.uniform_1f(u.shininess.as_ref(), material.shininess);
            self.ctx.uniform_bool(u.lit.as_ref(), material.lit);
            self.ctx
                .uniform_bool(u.use_texture.as_ref(), material.textured && self.texture.is_some());

            gl.bind_vertex_array(Some(&mesh.vao));
            gl.draw_elements_with_i32(Gl::TRIANGLES, mesh.index_count, Gl::UNSIGNED_INT, 0);
        }

        if self.particle_vao.is_some() && self.particle_count > 0 {
            gl.use_program(Some(&self.particle_program));
            self.ctx.enable_blending();
            gl.depth_mask(false);

            let p = &self.particle_uniforms;
            self.ctx.uniform_matrix4fv(p.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(p.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(p.point_scale.as_ref(), self.height as f32 / 2.0);

            gl.bind_vertex_array(self.particle_vao.as_ref());
            gl.draw_arrays(Gl::POINTS, 0, self.particle_count);

            gl.depth_mask(true);
            gl.disable(Gl::BLEND);
        }

        gl.bind_vertex_array(None);

        if let Some(bloom) = &self.bloom {
            bloom.apply(&self.ctx, self.width, self.height);
        }
    }

    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(GardenError::WebGl(format!(
                "invalid canvas size {}x{}",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        if let Some(bloom) = &mut self.bloom {
            bloom.resize(&self.ctx, width, height)?;
        }
        Ok(())
    }

    fn delete_particle_buffers(&mut self) {
        let gl = &self.ctx.gl;
        if let Some(vao) = self.particle_vao.take() {
            gl.delete_vertex_array(Some(&vao));
        }
        if let Some(buffer) = self.particle_buffer.take() {
            gl.delete_buffer(Some(&buffer));
        }
        self.particle_capacity = 0;
        self.particle_count = 0;
    }

    /// Release every GPU object; safe to call more than once
    pub fn dispose(&mut self) {
        self.delete_particle_buffers();

        let gl = &self.ctx.gl;
        for mesh in self.meshes.drain(..) {
            gl.delete_vertex_array(Some(&mesh.vao));
            gl.delete_buffer(Some(&mesh.vertex_buffer));
            gl.delete_buffer(Some(&mesh.index_buffer));
        }
        if let Some(texture) = self.texture.take() {
            gl.delete_texture(Some(&texture));
        }
        if let Some(bloom) = self.bloom.take() {
            bloom.delete(gl);
        }
        gl.delete_program(Some(&self.mesh_program));
        gl.delete_program(Some(&self.particle_program));
        debug!("render pipeline disposed");
    }
}
