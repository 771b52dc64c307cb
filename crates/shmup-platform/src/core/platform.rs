use std::path::PathBuf;
use std::rc::Rc;

use crate::audio::{AudioBackend, SilentAudio};
use crate::device::DisplayConfig;
use crate::fs::{FileSystem, DEFAULT_GAME_DIR};
use crate::gl::Gl;
use crate::input::{InputEvent, InputState};
use crate::render::{bind_renderer_methods, NullRenderer, RendererBackend, ShaderPaths};
use crate::time::FrameClock;

use super::game::{AppControl, Game};

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub display: DisplayConfig,
    pub shaders: ShaderPaths,

    /// Directory files are resolved against.
    pub base_dir: PathBuf,
    pub game_dir: PathBuf,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            shaders: ShaderPaths::default(),
            base_dir: PathBuf::from("."),
            game_dir: PathBuf::from(DEFAULT_GAME_DIR),
        }
    }
}

/// Everything the adapter owns on behalf of the engine.
///
/// Starts with a [`NullRenderer`] until [`bind_renderer`](Self::bind_renderer)
/// succeeds. The host calls [`advance_frame`](Self::advance_frame) once per
/// display refresh.
pub struct Platform {
    renderer: Box<dyn RendererBackend>,
    audio: Box<dyn AudioBackend>,
    fs: FileSystem,
    input: InputState,
    clock: FrameClock,
    shaders: ShaderPaths,
    paused: bool,
}

impl Platform {
    pub fn new(config: &PlatformConfig) -> Self {
        let mut audio: Box<dyn AudioBackend> = Box::new(SilentAudio::new());
        audio.init();

        Self {
            renderer: Box::new(NullRenderer),
            audio,
            fs: FileSystem::new(&config.base_dir).with_game_dir(&config.game_dir),
            input: InputState::new(),
            clock: FrameClock::new(),
            shaders: config.shaders.clone(),
            paused: false,
        }
    }

    pub fn with_audio(mut self, mut audio: Box<dyn AudioBackend>) -> Self {
        audio.init();
        self.audio = audio;
        self
    }

    /// Installs the GL renderer and tells the game. Returns `false` while
    /// there is no context; the previous renderer stays in place.
    pub fn bind_renderer<G, T>(&mut self, gl: Option<Rc<G>>, game: &mut T) -> bool
    where
        G: Gl + 'static,
        T: Game + ?Sized,
    {
        if !bind_renderer_methods(&mut self.renderer, gl, &self.fs, &self.shaders) {
            return false;
        }
        game.on_renderer_bound(self.renderer.as_mut());
        true
    }

    /// Runs one frame: clock tick, game update, entity pass.
    ///
    /// A paused platform skips the frame entirely.
    pub fn advance_frame<T: Game + ?Sized>(&mut self, game: &mut T) -> AppControl {
        if self.paused {
            return AppControl::Continue;
        }

        let time = self.clock.tick();
        let control = game.update(time, &self.input);
        self.renderer.render_entities(game.world());
        control
    }

    /// Records `event` and forwards it to the game.
    pub fn handle_input<T: Game + ?Sized>(&mut self, event: InputEvent, game: &mut T) {
        self.input.handle_event(&event);
        game.on_input(&event);
    }

    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("platform paused");
        }
        self.paused = true;
        self.audio.pause();
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::info!("platform resumed");
            self.clock.reset();
        }
        self.paused = false;
        self.audio.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Forwards a framebuffer size change to the renderer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.refresh_viewport(width, height);
    }

    pub fn renderer(&self) -> &dyn RendererBackend {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> &mut dyn RendererBackend {
        self.renderer.as_mut()
    }

    pub fn audio_mut(&mut self) -> &mut dyn AudioBackend {
        self.audio.as_mut()
    }

    pub fn fs(&self) -> &FileSystem {
        &self.fs
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn frame_index(&self) -> u64 {
        self.clock.frame_index()
    }
}
