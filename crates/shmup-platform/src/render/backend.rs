use super::scene::{BufferId, Entity, Mesh, SpriteVertex, Texture, Vertex, World};

/// The engine's rendering capabilities.
///
/// Every method has a no-op default so the engine can call any capability
/// regardless of which implementation is bound. Implementations override
/// only what they actually support.
pub trait RendererBackend {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn set_3d(&mut self) {}
    fn set_2d(&mut self) {}
    fn stop_rendition(&mut self) {}
    fn start_clean_frame(&mut self) {}
    fn set_texture(&mut self, _texture: &Texture) {}

    /// Draws the map entities, then the players, with the entity shader.
    fn render_entities(&mut self, _world: &World) {}

    fn render_players_bullets(&mut self, _world: &World) {}
    fn render_fx_sprites(&mut self, _world: &World) {}
    fn render_string(&mut self, _text: &str, _x: f32, _y: f32, _size: f32) {}
    fn render_colorless_sprites(&mut self, _vertices: &[SpriteVertex], _indices: &[u16]) {}

    /// Copies the current color buffer into `out`; returns bytes written.
    fn get_color_buffer(&mut self, _out: &mut [u8]) -> usize {
        0
    }

    fn upload_entity_to_gpu(&mut self, _entity: &mut Entity) {}

    fn upload_vertices_to_gpu(&mut self, _data: &[u8]) -> Option<BufferId> {
        None
    }

    fn free_gpu_buffer(&mut self, _buffer: BufferId) {}
    fn draw_controls(&mut self) {}
    fn fade_screen(&mut self, _alpha: f32) {}
    fn set_material_texture_blending(&mut self, _enabled: bool) {}
    fn set_transparency(&mut self, _alpha: f32) {}

    fn is_texture_compression_supported(&self) -> bool {
        false
    }

    fn refresh_viewport(&mut self, _width: u32, _height: u32) {}

    /// Moves `texture.data` to the GPU and assigns `texture.id`.
    fn upload_texture_to_gpu(&mut self, _texture: &mut Texture) {}

    /// Releases the GPU object behind `texture.id` and clears the id.
    fn free_gpu_texture(&mut self, _texture: &mut Texture) {}

    /// Uploads indexed geometry. `None` when unsupported or on failure.
    fn upload_mesh(&mut self, _vertices: &[Vertex], _indices: &[u16]) -> Option<Mesh> {
        None
    }

    fn free_mesh(&mut self, _mesh: Mesh) {}
}

/// Renderer with every capability stubbed out.
///
/// This is what the platform holds until a graphics context exists.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullRenderer;

impl RendererBackend for NullRenderer {
    fn name(&self) -> &'static str {
        "null"
    }
}
