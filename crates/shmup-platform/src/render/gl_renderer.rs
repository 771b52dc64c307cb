use std::mem::{offset_of, size_of};
use std::rc::Rc;

use glam::Mat4;
use slotmap::SlotMap;

use super::backend::RendererBackend;
use super::scene::{BufferId, Entity, Mesh, Texture, TextureFormat, TextureId, Vertex, World};
use super::shader::{ShaderPaths, ShaderProgram, ShaderSlot};
use crate::fs::FileSystem;
use crate::gl::{self, Gl};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not create {kind} buffer: {message}")]
    CreateBuffer { kind: &'static str, message: String },
}

const ATTRIBUTE_SLOTS: [ShaderSlot; 3] = [ShaderSlot::Vertex, ShaderSlot::Normal, ShaderSlot::TexCoord];

/// Renderer backed by a GL-ES 3.0 context.
///
/// Owns the entity shader program and every texture and buffer object it
/// hands out ids for. GPU objects are released by [`shutdown`](Self::shutdown)
/// or on drop, so it must not outlive the context behind `gl`.
pub struct GlRenderer<G: Gl> {
    gl: Rc<G>,
    shader: ShaderProgram<G>,
    textures: SlotMap<TextureId, G::Texture>,
    buffers: SlotMap<BufferId, G::Buffer>,
}

impl<G: Gl> GlRenderer<G> {
    /// Loads the entity shader. A failed load still yields a usable renderer
    /// that clears the screen every frame.
    pub fn new(gl: Rc<G>, fs: &FileSystem, paths: &ShaderPaths) -> Self {
        let shader = ShaderProgram::load(&*gl, fs, paths);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        Self {
            gl,
            shader,
            textures: SlotMap::with_key(),
            buffers: SlotMap::with_key(),
        }
    }

    pub fn shader(&self) -> &ShaderProgram<G> {
        &self.shader
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Deletes the program and every texture and buffer still alive.
    pub fn shutdown(&mut self) {
        let (textures, buffers) = (self.textures.len(), self.buffers.len());
        for (_, texture) in self.textures.drain() {
            self.gl.delete_texture(texture);
        }
        for (_, buffer) in self.buffers.drain() {
            self.gl.delete_buffer(buffer);
        }
        self.shader.destroy(&*self.gl);

        if textures + buffers > 0 {
            log::info!("renderer shutdown: released {textures} textures, {buffers} buffers");
        }
    }

    fn create_buffer(&mut self, target: u32, bytes: &[u8]) -> Result<BufferId, RenderError> {
        let kind = if target == gl::ELEMENT_ARRAY_BUFFER { "index" } else { "vertex" };
        let buffer = self
            .gl
            .create_buffer()
            .map_err(|message| RenderError::CreateBuffer { kind, message })?;

        self.gl.bind_buffer(target, Some(buffer));
        self.gl.buffer_data_u8_slice(target, bytes, gl::STATIC_DRAW);
        self.gl.bind_buffer(target, None);

        Ok(self.buffers.insert(buffer))
    }

    fn delete_buffer(&mut self, id: BufferId) {
        match self.buffers.remove(id) {
            Some(buffer) => self.gl.delete_buffer(buffer),
            None => log::warn!("free of unknown buffer {id:?} ignored"),
        }
    }

    fn draw_entity(&self, entity: &Entity, view: &Mat4, projection: &Mat4) {
        let gl = &*self.gl;

        if !entity.is_drawable() {
            return;
        }
        let Some(mesh) = entity.mesh else {
            return;
        };
        // Never draw past the end of the uploaded index buffer.
        let Ok(count) = i32::try_from(entity.num_indices.min(mesh.num_indices)) else {
            log::warn!("entity index count {} out of range, skipped", entity.num_indices);
            return;
        };
        let (Some(&vbo), Some(&ibo)) = (
            self.buffers.get(mesh.vertex_buffer),
            self.buffers.get(mesh.index_buffer),
        ) else {
            log::warn!("entity references a freed mesh, skipped");
            return;
        };

        // View and model combine first.
        let mvp = *projection * (*view * entity.matrix);
        gl.uniform_matrix_4_f32_slice(
            self.shader.uniform(ShaderSlot::ModelViewProjection),
            false,
            &mvp.to_cols_array(),
        );

        let diffuse = entity
            .material
            .and_then(|m| m.diffuse)
            .and_then(|id| self.textures.get(id).copied());
        gl.active_texture(gl::TEXTURE0);
        gl.bind_texture(gl::TEXTURE_2D, diffuse);
        gl.uniform_1_i32(self.shader.uniform(ShaderSlot::BaseMap), 0);

        gl.bind_buffer(gl::ARRAY_BUFFER, Some(vbo));
        gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, Some(ibo));

        let stride = size_of::<Vertex>() as i32;
        let layout = [
            (ShaderSlot::Vertex, 3, gl::FLOAT, false, offset_of!(Vertex, pos)),
            (ShaderSlot::Normal, 3, gl::SHORT, true, offset_of!(Vertex, normal)),
            (ShaderSlot::TexCoord, 2, gl::SHORT, true, offset_of!(Vertex, text)),
        ];
        for (slot, size, data_type, normalized, offset) in layout {
            if let Some(index) = self.shader.attribute(slot) {
                gl.vertex_attrib_pointer_f32(index, size, data_type, normalized, stride, offset as i32);
            }
        }

        gl.draw_elements(gl::TRIANGLES, count, gl::UNSIGNED_SHORT, 0);
    }
}

impl<G: Gl> RendererBackend for GlRenderer<G> {
    fn name(&self) -> &'static str {
        "gles3"
    }

    fn render_entities(&mut self, world: &World) {
        let gl = &*self.gl;

        if !self.shader.is_linked() {
            gl.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
            return;
        }

        gl.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        gl.enable(gl::DEPTH_TEST);
        gl.enable(gl::CULL_FACE);
        gl.cull_face(gl::BACK);
        gl.disable(gl::BLEND);
        gl.use_program(self.shader.handle());

        let view = world.camera.view();
        let projection = world.camera.projection();

        let light = &world.light;
        gl.uniform_3_f32_slice(
            self.shader.uniform(ShaderSlot::LightAmbient),
            &light.ambient.to_array(),
        );
        gl.uniform_3_f32_slice(
            self.shader.uniform(ShaderSlot::LightDiffuse),
            &light.diffuse.to_array(),
        );
        gl.uniform_3_f32_slice(
            self.shader.uniform(ShaderSlot::LightPosition),
            &light.position.to_array(),
        );

        let attributes: Vec<u32> = ATTRIBUTE_SLOTS
            .iter()
            .filter_map(|slot| self.shader.attribute(*slot))
            .collect();
        for &index in &attributes {
            gl.enable_vertex_attrib_array(index);
        }

        let players = world.players.iter().map(|p| &p.entity);
        for entity in world.map.iter().chain(players) {
            self.draw_entity(entity, &view, &projection);
        }

        for &index in &attributes {
            gl.disable_vertex_attrib_array(index);
        }
    }

    fn upload_texture_to_gpu(&mut self, texture: &mut Texture) {
        let Some(data) = texture.data.as_deref() else {
            return;
        };

        let expected = texture.expected_len();
        if data.len() < expected {
            log::warn!(
                "texture {}x{} {:?} has {} bytes, expected {expected}; not uploaded",
                texture.width,
                texture.height,
                texture.format,
                data.len()
            );
            return;
        }

        let (id, handle) = match texture.id {
            Some(id) => match self.textures.get(id) {
                Some(&handle) => (id, handle),
                None => {
                    log::warn!("upload to unknown texture {id:?} ignored");
                    return;
                }
            },
            None => match self.gl.create_texture() {
                Ok(handle) => (self.textures.insert(handle), handle),
                Err(e) => {
                    log::error!("could not create texture object: {e}");
                    return;
                }
            },
        };

        let gl = &*self.gl;
        gl.bind_texture(gl::TEXTURE_2D, Some(handle));
        gl.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
        gl.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
        gl.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);

        let format = match texture.format {
            TextureFormat::Rgb => gl::RGB,
            TextureFormat::Rgba => gl::RGBA,
        };
        gl.tex_image_2d(
            gl::TEXTURE_2D,
            0,
            format as i32,
            texture.width as i32,
            texture.height as i32,
            0,
            format,
            gl::UNSIGNED_BYTE,
            Some(&data[..expected]),
        );

        texture.id = Some(id);
        texture.data = None;
    }

    fn free_gpu_texture(&mut self, texture: &mut Texture) {
        let Some(id) = texture.id else {
            log::warn!("free of texture without a GPU id ignored");
            return;
        };
        let Some(handle) = self.textures.remove(id) else {
            log::warn!("free of unknown texture {id:?} ignored");
            return;
        };

        self.gl.delete_texture(handle);
        texture.id = None;
    }

    fn upload_mesh(&mut self, vertices: &[Vertex], indices: &[u16]) -> Option<Mesh> {
        let vertex_buffer = match self.create_buffer(gl::ARRAY_BUFFER, bytemuck::cast_slice(vertices)) {
            Ok(id) => id,
            Err(e) => {
                log::error!("mesh upload failed: {e}");
                return None;
            }
        };
        let index_buffer = match self.create_buffer(gl::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(indices)) {
            Ok(id) => id,
            Err(e) => {
                log::error!("mesh upload failed: {e}");
                self.delete_buffer(vertex_buffer);
                return None;
            }
        };

        Some(Mesh {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        })
    }

    fn free_mesh(&mut self, mesh: Mesh) {
        self.delete_buffer(mesh.vertex_buffer);
        self.delete_buffer(mesh.index_buffer);
    }
}

impl<G: Gl> Drop for GlRenderer<G> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
