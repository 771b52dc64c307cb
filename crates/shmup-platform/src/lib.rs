//! Shmup platform crate.
//!
//! GL-ES 3.0 adapter between the game engine and the host: shader program
//! loading and the entity renderer, buffered file access, input translation,
//! silent audio, and the window loop that drives it all.

pub mod audio;
pub mod core;
pub mod device;
pub mod fs;
pub mod gl;
pub mod input;
pub mod render;
pub mod time;
pub mod window;

pub mod logging;
