mod geometry;
mod getting_started;
mod lighting;
mod textures;

pub use getting_started::GettingStarted;
pub use lighting::Lighting;

use glam::Vec3;

use learngl_engine::camera::Camera;
use learngl_engine::core::FrameCtx;
use learngl_engine::input::{InputState, Key};

/// Vertical field of view upper bound, in degrees.
const MAX_ZOOM: f32 = 45.0;

/// Input snapshot plus the camera it steers, shared by every scene.
struct FlyView {
    input: InputState,
    camera: Camera,
    cursor_seeded: bool,
}

impl FlyView {
    fn new() -> Self {
        Self {
            input: InputState::new(),
            camera: Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, MAX_ZOOM),
            cursor_seeded: false,
        }
    }

    /// Starts look deltas from the first absolute cursor position, so a
    /// free cursor does not swing the view on the first frame.
    fn seed_cursor(&mut self) {
        if self.cursor_seeded || !self.input.cursor_positioned() {
            return;
        }
        let (x, y) = self.input.cursor_position();
        self.camera.set_previous_cursor(x, y);
        self.cursor_seeded = true;
    }

    /// Escape requests close, the camera consumes the input, then the
    /// one-frame scroll latch is cleared.
    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        if self.input.is_key_down(Key::Escape) {
            ctx.set_should_close(true);
        }

        self.seed_cursor();
        self.camera.update(ctx.delta(), &self.input);
        self.input.reset_state();
    }
}
