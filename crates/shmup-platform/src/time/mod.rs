//! Frame timing.
//!
//! `Platform::advance_frame` ticks one `FrameClock` per frame and hands the
//! resulting `FrameTime` to the game.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
