use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::gl::{GlContext, GlInit};
use crate::input::{translate_device_event, translate_window_event};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gl: GlInit,

    /// Hide and grab the cursor; pointer motion then arrives as relative deltas.
    pub capture_cursor: bool,

    /// Stop after this many presented frames.
    pub max_frames: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "learngl".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            gl: GlInit::default(),
            capture_cursor: true,
            max_frames: None,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the app with `build` once a GL context is
    /// current, then drives frames until the app or the user closes it.
    pub fn run<A, F>(config: RuntimeConfig, build: F) -> Result<()>
    where
        A: App + 'static,
        F: FnOnce(&GlContext) -> Result<A>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, build);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => {
                log::info!("runtime finished after {} frames", state.frames);
                Ok(())
            }
        }
    }
}

/// The single window and everything bound to its GL context.
///
/// Field order is drop order: the app releases its GL objects while the
/// context is still alive.
struct WindowEntry<A> {
    app: A,
    clock: FrameClock,
    gl: GlContext,
}

struct AppState<A, F> {
    config: RuntimeConfig,
    build: Option<F>,
    entry: Option<WindowEntry<A>>,

    frames: u64,
    error: Option<anyhow::Error>,
}

impl<A, F> AppState<A, F>
where
    A: App + 'static,
    F: FnOnce(&GlContext) -> Result<A>,
{
    fn new(config: RuntimeConfig, build: F) -> Self {
        Self {
            config,
            build: Some(build),
            entry: None,
            frames: 0,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let Some(build) = self.build.take() else {
            return Ok(());
        };

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let gl = GlContext::new(event_loop, attrs, self.config.gl.clone())?;
        if self.config.capture_cursor {
            gl.set_cursor_captured(true);
        }

        let app = build(&gl).context("failed to build application")?;
        gl.window().request_redraw();

        self.entry = Some(WindowEntry {
            app,
            clock: FrameClock::new(),
            gl,
        });
        Ok(())
    }

    /// Runs one frame and presents it. Returns whether the loop should stop.
    fn redraw(&mut self) -> Result<bool> {
        let Some(WindowEntry { app, clock, gl }) = self.entry.as_mut() else {
            return Ok(false);
        };

        let time = clock.tick();
        let mut ctx = FrameCtx::new(gl.backend(), gl.size(), time);
        let control = app
            .on_frame(&mut ctx)
            .with_context(|| format!("frame {} failed", time.frame_index))?;
        let close = ctx.should_close() || control == AppControl::Exit;

        gl.window().pre_present_notify();
        gl.swap_buffers()?;
        self.frames += 1;

        let frame_limit = self.config.max_frames.is_some_and(|max| self.frames >= max);
        if frame_limit {
            log::info!("frame limit reached");
        }
        Ok(close || frame_limit)
    }
}

impl<A, F> ApplicationHandler for AppState<A, F>
where
    A: App + 'static,
    F: FnOnce(&GlContext) -> Result<A>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the demos animate every frame.
        if let Some(entry) = &self.entry {
            entry.gl.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let captured = self.config.capture_cursor;
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(entry.gl.window(), &event, captured) {
            entry.app.input().apply_event(ev);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                entry.gl.resize(new_size);
                entry.gl.window().request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.gl.size();
                entry.gl.resize(new_size);
            }

            // Grabs are released by the OS on focus loss.
            WindowEvent::Focused(true) if captured => entry.gl.set_cursor_captured(true),

            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(true) => event_loop.exit(),
                Ok(false) => {}
                Err(e) => self.fail(event_loop, e),
            },

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if !self.config.capture_cursor {
            return;
        }
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_device_event(&event) {
            entry.app.input().apply_event(ev);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Tear down GL objects while the event loop still owns the display.
        self.entry = None;
    }
}
