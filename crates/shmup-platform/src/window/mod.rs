//! Host loop.
//!
//! Owns the `winit` event loop and wires window events to the [`Platform`](crate::core::Platform).

mod runtime;

pub use runtime::Runtime;
