use std::ffi::CString;
use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window, WindowAttributes};

use super::api::GlApi;
use super::glow_backend::GlowBackend;

/// Initialization parameters for the GL layer.
///
/// Keep this structure minimal. Add flags only when a demo needs them.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested context version; a core profile is always requested.
    pub version: (u8, u8),

    /// Depth buffer precision in bits. The demos rely on depth testing.
    pub depth_bits: u8,

    /// Synchronize buffer swaps with the display refresh.
    pub vsync: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            depth_bits: 24,
            vsync: true,
        }
    }
}

/// Owns the window, the glutin surface/context pair and the loaded GL backend.
///
/// Field order is drop order: the backend goes first, the window last, so the
/// surface never outlives the native window it was created for.
pub struct GlContext {
    gl: Rc<GlowBackend>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlContext {
    /// Creates a window together with a current GL context.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attrs: WindowAttributes,
        init: GlInit,
    ) -> Result<Self> {
        let template = ConfigTemplateBuilder::new().with_depth_size(init.depth_bits);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |configs| {
                // glutin fails `build` before calling the picker when nothing matches.
                configs
                    .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
                    .expect("glutin passed an empty config list")
            })
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;

        let window = window.context("display builder did not create a window")?;
        let raw_window_handle = window.window_handle().ok().map(|h| h.as_raw());
        let gl_display = gl_config.display();

        let (major, minor) = init.version;
        let context_attrs = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(raw_window_handle);

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attrs) }
            .with_context(|| format!("failed to create an OpenGL {major}.{minor} core context"))?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to build window surface attributes")?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if init.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::warn!("vsync unavailable: {e}");
            }
        }

        // The context was made current on this thread just above.
        let gl = unsafe {
            let raw = glow::Context::from_loader_function(|symbol| match CString::new(symbol) {
                Ok(symbol) => gl_display.get_proc_address(&symbol),
                Err(_) => std::ptr::null(),
            });
            GlowBackend::new(raw)
        };

        let size = window.inner_size();
        gl.viewport(0, 0, size.width as i32, size.height as i32);

        log::info!(
            "OpenGL {major}.{minor} core context ready ({}x{}, {} samples)",
            size.width,
            size.height,
            gl_config.num_samples()
        );

        Ok(Self {
            gl: Rc::new(gl),
            surface,
            context,
            window,
        })
    }

    /// Shared handle used by resource wrappers.
    pub fn api(&self) -> Rc<dyn GlApi> {
        self.gl.clone()
    }

    /// Direct access to the `glow` backend.
    pub fn backend(&self) -> &GlowBackend {
        &self.gl
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Resizes the surface and the viewport.
    ///
    /// A zero-sized surface cannot be configured; only the request is ignored.
    pub fn resize(&self, new_size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height))
        else {
            return;
        };

        self.surface.resize(&self.context, w, h);
        self.gl.viewport(0, 0, new_size.width as i32, new_size.height as i32);
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }

    /// Hides and grabs the cursor so mouse motion drives the camera indefinitely.
    pub fn set_cursor_captured(&self, captured: bool) {
        let grab = if captured {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };

        if let Err(e) = grab {
            log::warn!("cursor grab change failed: {e}");
        }
        self.window.set_cursor_visible(!captured);
    }
}
