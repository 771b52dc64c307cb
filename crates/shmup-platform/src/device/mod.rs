//! Window + GL-ES context.
//!
//! [`Display`] owns the native window, the GL context and surface, and the
//! shared [`GlowBackend`] the renderer draws through.

mod display;

pub use display::{Display, DisplayConfig};
