use winit::dpi::PhysicalSize;

use crate::gl::GlApi;
use crate::time::FrameTime;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// Requesting close does not abort the frame; the runtime presents it and
/// stops before the next one.
pub struct FrameCtx<'a> {
    gl: &'a dyn GlApi,
    size: PhysicalSize<u32>,
    time: FrameTime,
    should_close: bool,
}

impl<'a> FrameCtx<'a> {
    pub(crate) fn new(gl: &'a dyn GlApi, size: PhysicalSize<u32>, time: FrameTime) -> Self {
        Self {
            gl,
            size,
            time,
            should_close: false,
        }
    }

    /// GL entry points for clears and draw calls.
    pub fn gl(&self) -> &'a dyn GlApi {
        self.gl
    }

    /// Seconds since the runtime started.
    pub fn elapsed_time(&self) -> f64 {
        self.time.elapsed
    }

    /// Seconds since the previous frame.
    pub fn delta(&self) -> f32 {
        self.time.dt
    }

    pub fn frame_index(&self) -> u64 {
        self.time.frame_index
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.size.width, self.size.height)
    }

    /// Width over height; 1.0 while the window is minimized.
    pub fn aspect_ratio(&self) -> f32 {
        if self.size.height == 0 {
            return 1.0;
        }
        self.size.width as f32 / self.size.height as f32
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn set_should_close(&mut self, close: bool) {
        self.should_close = close;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::testing::{Call, RecordingGl};
    use crate::gl::ClearMask;

    fn frame_time() -> FrameTime {
        FrameTime {
            dt: 0.016,
            elapsed: 2.5,
            frame_index: 7,
        }
    }

    #[test]
    fn exposes_frame_timing_and_size() {
        let gl = RecordingGl::new();
        let ctx = FrameCtx::new(&*gl, PhysicalSize::new(800, 600), frame_time());

        assert_eq!(ctx.elapsed_time(), 2.5);
        assert_eq!(ctx.delta(), 0.016);
        assert_eq!(ctx.frame_index(), 7);
        assert_eq!(ctx.size(), (800, 600));
        assert!((ctx.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn minimized_window_has_unit_aspect() {
        let gl = RecordingGl::new();
        let ctx = FrameCtx::new(&*gl, PhysicalSize::new(800, 0), frame_time());
        assert_eq!(ctx.aspect_ratio(), 1.0);
    }

    #[test]
    fn close_request_can_be_withdrawn() {
        let gl = RecordingGl::new();
        let mut ctx = FrameCtx::new(&*gl, PhysicalSize::new(1, 1), frame_time());
        assert!(!ctx.should_close());

        ctx.set_should_close(true);
        assert!(ctx.should_close());
        ctx.set_should_close(false);
        assert!(!ctx.should_close());
    }

    #[test]
    fn draw_calls_reach_the_backend() {
        let gl = RecordingGl::new();
        let ctx = FrameCtx::new(&*gl, PhysicalSize::new(1, 1), frame_time());

        ctx.gl().clear(ClearMask::COLOR_DEPTH);

        assert_eq!(gl.calls(), vec![Call::Clear(ClearMask::COLOR_DEPTH)]);
    }
}
