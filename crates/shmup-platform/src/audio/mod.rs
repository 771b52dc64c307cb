//! Audio backend interface.
//!
//! Nothing is mixed or played yet. The engine calls through
//! [`AudioBackend`] so a real backend can slot in later without touching it.

use std::path::Path;

pub trait AudioBackend {
    fn init(&mut self) {}

    /// Fire-and-forget sound effect. `pan` is -1 (left) to 1 (right).
    fn play_sound(&mut self, _id: u32, _volume: f32, _pan: f32) {}

    fn upload(&mut self, _id: u32, _data: &[u8]) {}
    fn play(&mut self, _id: u32) {}

    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn is_paused(&self) -> bool {
        false
    }

    fn start_soundtrack(&mut self, _path: &Path) {}
    fn stop_soundtrack(&mut self) {}
}

/// Backend that accepts everything and produces no sound.
#[derive(Debug, Default)]
pub struct SilentAudio {
    paused: bool,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for SilentAudio {
    fn init(&mut self) {
        log::info!("audio: silent backend, sound disabled");
    }

    fn play_sound(&mut self, id: u32, volume: f32, pan: f32) {
        log::debug!("audio: play_sound id={id} volume={volume:.2} pan={pan:.2} (silent)");
    }

    fn upload(&mut self, id: u32, data: &[u8]) {
        log::debug!("audio: upload id={id} ({} bytes) ignored", data.len());
    }

    fn play(&mut self, id: u32) {
        log::debug!("audio: play id={id} (silent)");
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn start_soundtrack(&mut self, path: &Path) {
        log::debug!("audio: soundtrack '{}' requested (silent)", path.display());
    }
}
