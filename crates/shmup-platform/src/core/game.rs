use crate::input::{InputEvent, InputState};
use crate::render::{RendererBackend, World};
use crate::time::FrameTime;

/// Control directive returned by game callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// The engine side of the adapter.
pub trait Game {
    /// Scene the entity pass draws this frame.
    fn world(&self) -> &World;

    /// Called after a graphics-backed renderer replaced the previous one.
    /// GPU resources created against the old renderer are gone.
    fn on_renderer_bound(&mut self, renderer: &mut dyn RendererBackend) {
        let _ = renderer;
    }

    fn on_input(&mut self, event: &InputEvent) {
        let _ = event;
    }

    /// Simulation step, run before the frame is drawn.
    fn update(&mut self, time: FrameTime, input: &InputState) -> AppControl;
}
