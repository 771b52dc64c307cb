use std::rc::Rc;

use super::backend::RendererBackend;
use super::gl_renderer::GlRenderer;
use super::shader::ShaderPaths;
use crate::fs::FileSystem;
use crate::gl::Gl;

/// Swaps `renderer` for a GL-backed one and loads the entity shader.
///
/// Without a graphics context (`gl == None`) this logs, leaves `renderer`
/// as it was and returns `false`; call again once the context exists.
pub fn bind_renderer_methods<G: Gl + 'static>(
    renderer: &mut Box<dyn RendererBackend>,
    gl: Option<Rc<G>>,
    fs: &FileSystem,
    shaders: &ShaderPaths,
) -> bool {
    let Some(gl) = gl else {
        log::error!("graphics context not ready, renderer left as '{}'", renderer.name());
        return false;
    };

    let bound = GlRenderer::new(gl, fs, shaders);
    if !bound.shader().is_linked() {
        log::warn!("renderer bound without a usable shader program; frames will be blank");
    }

    log::info!("renderer bound: '{}' -> '{}'", renderer.name(), bound.name());
    *renderer = Box::new(bound);
    true
}
