use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{Context, Result};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{Display as GlutinDisplay, DisplayApiPreference, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window};

use crate::gl::{Gl, GlowBackend};

/// Window and framebuffer parameters.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,

    /// Sync buffer swaps to the display refresh.
    pub vsync: bool,
    pub fullscreen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Shmup3D".to_string(),
            width: 800,
            height: 600,
            vsync: true,
            fullscreen: false,
        }
    }
}

/// The rendering context: window, GL-ES 3.0 context and surface.
///
/// Fields drop in declaration order, so the GL context and surface go
/// before the window they were created for.
pub struct Display {
    gl: Rc<GlowBackend>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl Display {
    /// Creates the window and a current GL-ES 3.0 context with an RGBA8,
    /// 24-bit depth, 8-bit stencil, double-buffered framebuffer.
    pub fn new(event_loop: &ActiveEventLoop, config: &DisplayConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let raw_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();
        let raw_display = event_loop
            .display_handle()
            .context("event loop has no native display handle")?
            .as_raw();

        // SAFETY: the display handle comes from the live event loop.
        let gl_display = unsafe { GlutinDisplay::new(raw_display, display_preference(raw_handle)) }
            .context("failed to create GL display")?;

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24)
            .with_stencil_size(8)
            .with_single_buffering(false)
            .compatible_with_native_window(raw_handle)
            .build();

        // SAFETY: the template only references `window`, which is alive.
        let gl_config = unsafe { gl_display.find_configs(template) }
            .context("failed to query GL configs")?
            .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
            .context("no GL config with RGBA8, 24-bit depth and 8-bit stencil")?;

        log::info!(
            "GL config: depth {} stencil {} samples {}",
            gl_config.depth_size(),
            gl_config.stencil_size(),
            gl_config.num_samples()
        );

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
            .build(Some(raw_handle));

        // SAFETY: the raw handle belongs to `window`, which outlives the context.
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attrs) }
            .context("failed to create GL-ES 3.0 context")?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        // SAFETY: as above, the surface is dropped before the window.
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        // SAFETY: the context is current on this thread.
        let glow = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name).cast())
        };
        let gl = Rc::new(GlowBackend::new(glow));

        if config.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let size = window.inner_size();
        gl.viewport(0, 0, size.width as i32, size.height as i32);
        log::info!("display ready: {}x{}", size.width, size.height);

        Ok(Self {
            gl,
            surface,
            context,
            window,
        })
    }

    /// Shared handle for the renderer.
    pub fn gl(&self) -> Rc<GlowBackend> {
        Rc::clone(&self.gl)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Resizes the surface and the viewport. Zero-sized (minimized) windows
    /// are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
        self.gl.viewport(0, 0, size.width as i32, size.height as i32);
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }

    pub fn set_fullscreen(&self, fullscreen: bool) {
        let mode = fullscreen.then_some(Fullscreen::Borderless(None));
        self.window.set_fullscreen(mode);
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

#[cfg(target_os = "macos")]
fn display_preference(_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(target_os = "windows")]
fn display_preference(window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(Some(window))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn display_preference(_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}
