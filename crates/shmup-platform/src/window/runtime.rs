use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::core::{AppControl, Game, Platform, PlatformConfig};
use crate::device::Display;
use crate::input::platform::winit::translate_window_event;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `game` in a single window until it exits or the window closes.
    pub fn run<T>(config: PlatformConfig, game: T) -> Result<()>
    where
        T: Game + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, game);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct AppState<T: Game> {
    config: PlatformConfig,
    game: T,

    // Drops before `display`: the renderer releases GL objects while the
    // context is still alive.
    platform: Platform,
    display: Option<Display>,

    exit_requested: bool,
}

impl<T: Game> AppState<T> {
    fn new(config: PlatformConfig, game: T) -> Self {
        let platform = Platform::new(&config);
        Self {
            config,
            game,
            platform,
            display: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_display(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let display =
            Display::new(event_loop, &self.config.display).context("failed to create display")?;

        if !self.platform.bind_renderer(Some(display.gl()), &mut self.game) {
            anyhow::bail!("renderer could not be bound to the new GL context");
        }

        let size = display.size();
        self.platform.resize(size.width, size.height);
        display.request_redraw();

        self.display = Some(display);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let control = self.platform.advance_frame(&mut self.game);

        if let Some(display) = &self.display {
            if let Err(e) = display.swap_buffers() {
                log::error!("{e:#}");
            }
        }

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }
}

impl<T: Game> ApplicationHandler for AppState<T> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.platform.resume();

        if self.display.is_some() {
            return;
        }

        if let Err(e) = self.create_display(event_loop) {
            log::error!("failed to start: {e:#}");
            self.request_exit(event_loop);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.platform.pause();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; vsync paces the loop.
        if let Some(display) = &self.display {
            display.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(size) = self.display.as_ref().map(Display::size) else {
            return;
        };

        if let Some(ev) = translate_window_event(size, self.platform.input(), &event) {
            self.platform.handle_input(ev, &mut self.game);
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => {
                if let Some(display) = &self.display {
                    display.resize(*new_size);
                    display.request_redraw();
                }
                self.platform.resize(new_size.width, new_size.height);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
