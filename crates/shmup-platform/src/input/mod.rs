//! Input subsystem.
//!
//! [`InputEvent`] is the only type the game sees; the runtime translates
//! window events into it through [`platform::winit`].

pub mod platform {
    pub mod winit;
}
mod state;
mod types;

pub use state::{
    InputCallback, InputState, TouchPoint, MAX_KEYS, MAX_MOUSE_BUTTONS, MAX_TOUCH_POINTS,
};
pub use types::{buttons, keys, InputEvent};
