//! Engine-facing contracts.
//!
//! [`Game`] is what the engine implements; [`Platform`] is the adapter state
//! it runs against, advanced one frame at a time by whatever host loop owns it.

mod game;
mod platform;

pub use game::{AppControl, Game};
pub use platform::{Platform, PlatformConfig};
