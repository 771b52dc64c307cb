//! Host graphics API seam.
//!
//! [`Gl`] is the slice of OpenGL ES 3.0 this crate uses. [`GlowBackend`] is
//! the real implementation; tests drive the renderer through a recording one.

mod api;
mod glow_backend;

#[cfg(test)]
pub(crate) mod recording;

pub use api::Gl;
pub use glow_backend::GlowBackend;

pub use glow::{
    ARRAY_BUFFER, BACK, BLEND, CLAMP_TO_EDGE, COLOR_BUFFER_BIT, CULL_FACE, DEPTH_BUFFER_BIT,
    DEPTH_TEST, ELEMENT_ARRAY_BUFFER, FLOAT, FRAGMENT_SHADER, LINEAR, RGB, RGBA, SHORT,
    STATIC_DRAW, TEXTURE0, TEXTURE_2D, TEXTURE_MAG_FILTER, TEXTURE_MIN_FILTER, TEXTURE_WRAP_S,
    TEXTURE_WRAP_T, TRIANGLES, UNSIGNED_BYTE, UNSIGNED_SHORT, VERTEX_SHADER,
};
