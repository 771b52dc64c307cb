//! Entity renderer: shader loading, the renderer interface and its GL
//! implementation.

mod backend;
mod binder;
mod gl_renderer;
pub mod scene;
mod shader;

#[cfg(test)]
pub(crate) use shader::fixtures as shader_fixtures;

pub use backend::{NullRenderer, RendererBackend};
pub use binder::bind_renderer_methods;
pub use gl_renderer::{GlRenderer, RenderError};
pub use scene::{
    BufferId, Camera, Entity, Light, Material, Mesh, Player, SpriteVertex, Texture, TextureFormat,
    TextureId, Vertex, World,
};
pub use shader::{
    ShaderError, ShaderPaths, ShaderProgram, ShaderSlot, SlotBinding, SlotKind, SlotTable, Stage,
    DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER,
};
