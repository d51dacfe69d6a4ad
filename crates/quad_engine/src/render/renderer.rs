//! OpenGL renderer for the textured quad
//!
//! Owns the GL function table and every GL object the demo creates. Objects
//! are built one setup step at a time so a failure part-way through leaves a
//! renderer that can still tear down whatever exists.

use crate::assets::{image_loader::ImageData, shader_source::ShaderSource, AssetError};
use crate::config::{RenderConfig, SamplerDesc};
use crate::render::quad::{self, QUAD_VERTEX_COUNT};
use crate::render::resources::{GpuResource, ReleaseStack};
use crate::render::{shader, texture};
use glow::HasContext;

/// Texture unit the quad texture is bound to
pub const TEXTURE_UNIT: u32 = 0;

/// GPU handles needed to draw one frame
#[derive(Debug, Clone)]
pub struct FrameRenderState {
    /// Linked vertex+fragment program
    pub program: glow::Program,
    /// Quad positions
    pub vertex_buffer: glow::Buffer,
    /// Vertex format for the quad
    pub vertex_array: glow::VertexArray,
    /// Quad texture
    pub texture: glow::Texture,
    /// Sampler uniform, absent if the shader does not use it
    pub sampler_location: Option<glow::UniformLocation>,
}

/// Renderer state built up during startup
pub struct Renderer {
    gl: glow::Context,
    resources: ReleaseStack<GpuResource>,
    texture: Option<glow::Texture>,
    program: Option<glow::Program>,
    vertex_buffer: Option<glow::Buffer>,
    vertex_array: Option<glow::VertexArray>,
    sampler_location: Option<glow::UniformLocation>,
}

impl Renderer {
    /// Wrap a loaded GL context; no objects are created yet
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            resources: ReleaseStack::new(),
            texture: None,
            program: None,
            vertex_buffer: None,
            vertex_array: None,
            sampler_location: None,
        }
    }

    /// Upload the quad texture
    pub fn load_texture(&mut self, image: &ImageData, sampler: SamplerDesc) -> Result<(), AssetError> {
        let texture = texture::upload_texture(&self.gl, image, sampler)?;
        self.resources.push(GpuResource::Texture(texture));
        self.texture = Some(texture);
        Ok(())
    }

    /// Compile and link the GPU program
    pub fn load_program(
        &mut self,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<(), AssetError> {
        let program = shader::compile_program(&self.gl, vertex, fragment)?;
        self.resources.push(GpuResource::Program(program));
        self.program = Some(program);
        Ok(())
    }

    /// Upload the quad vertex buffer
    pub fn create_square(&mut self) -> Result<(), AssetError> {
        let vertex_buffer = quad::upload_vertex_buffer(&self.gl)?;
        self.resources.push(GpuResource::Buffer(vertex_buffer));
        self.vertex_buffer = Some(vertex_buffer);
        Ok(())
    }

    /// Point the sampler uniform at [`TEXTURE_UNIT`]
    pub fn init_uniforms(&mut self, sampler_uniform: &str) -> Result<(), AssetError> {
        let program = self.program.ok_or_else(|| missing("program"))?;

        // SAFETY: `program` is a live, linked program of this context.
        unsafe {
            self.sampler_location = self.gl.get_uniform_location(program, sampler_uniform);
            match &self.sampler_location {
                Some(location) => {
                    self.gl.use_program(Some(program));
                    self.gl.uniform_1_i32(Some(location), TEXTURE_UNIT as i32);
                    self.gl.use_program(None);
                }
                None => log::warn!(
                    "Uniform \"{}\" not found in GPU program; texture unit left at default",
                    sampler_uniform
                ),
            }
        }
        Ok(())
    }

    /// Describe the quad vertex format
    pub fn init_input_assembler(&mut self) -> Result<(), AssetError> {
        let vertex_buffer = self.vertex_buffer.ok_or_else(|| missing("vertex buffer"))?;
        let vertex_array = quad::create_vertex_array(&self.gl, vertex_buffer)?;
        self.resources.push(GpuResource::VertexArray(vertex_array));
        self.vertex_array = Some(vertex_array);
        Ok(())
    }

    /// Viewport, culling, clear color and depth test
    pub fn init_pipeline_state(&self, viewport: (u32, u32), config: &RenderConfig) {
        let [r, g, b, a] = config.clear_color;
        let width = i32::try_from(viewport.0).unwrap_or(i32::MAX);
        let height = i32::try_from(viewport.1).unwrap_or(i32::MAX);

        // SAFETY: fixed-function state changes on the current context.
        unsafe {
            self.gl.viewport(0, 0, width, height);
            if config.cull_back_faces {
                self.gl.enable(glow::CULL_FACE);
            }
            self.gl.clear_color(r, g, b, a);
            if config.depth_test {
                self.gl.enable(glow::DEPTH_TEST);
            }
        }

        log::debug!("Pipeline state: viewport {}x{}, {:?}", width, height, config);
    }

    /// Handles for drawing, once every setup step has run
    pub fn frame_state(&self) -> Option<FrameRenderState> {
        Some(FrameRenderState {
            program: self.program?,
            vertex_buffer: self.vertex_buffer?,
            vertex_array: self.vertex_array?,
            texture: self.texture?,
            sampler_location: self.sampler_location.clone(),
        })
    }

    /// Clear the targets and draw the quad
    ///
    /// Only clears if setup has not completed.
    pub fn draw_frame(&self) {
        // SAFETY: all bound handles come from `frame_state` and are live.
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            let Some(state) = self.frame_state() else {
                return;
            };

            self.gl.bind_vertex_array(Some(state.vertex_array));
            self.gl.use_program(Some(state.program));
            self.gl.active_texture(glow::TEXTURE0 + TEXTURE_UNIT);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(state.texture));

            self.gl.draw_arrays(glow::TRIANGLE_STRIP, 0, QUAD_VERTEX_COUNT);
        }
    }

    /// Number of GL objects still owned
    pub fn live_objects(&self) -> usize {
        self.resources.len()
    }

    /// Delete every GL object, newest first; later calls do nothing
    pub fn destroy(&mut self) -> usize {
        self.texture = None;
        self.program = None;
        self.vertex_buffer = None;
        self.vertex_array = None;
        self.sampler_location = None;

        // SAFETY: unbinding before deletion on the current context.
        unsafe {
            self.gl.use_program(None);
            self.gl.bind_vertex_array(None);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }

        let gl = &self.gl;
        let released = self.resources.release_all(|resource| resource.delete(gl));
        if released > 0 {
            log::info!("Released {} GPU objects", released);
        }
        released
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if !self.resources.is_empty() {
            log::warn!(
                "Renderer dropped with {} live GPU objects",
                self.resources.len()
            );
        }
    }
}

fn missing(what: &'static str) -> AssetError {
    AssetError::GpuObject {
        what,
        message: "setup step ran before its prerequisite".to_string(),
    }
}
